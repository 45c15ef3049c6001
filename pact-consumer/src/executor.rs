use crate::{
    error::Error, outcome::TestFailure, pact::InteractionPhase, MockServer, PactV3,
};
use futures::FutureExt;
use std::{any::Any, future::Future, panic::AssertUnwindSafe};
use tracing::{debug, info, warn};

impl PactV3 {
    /// Starts a mock server for the declared interactions, runs `test_fn`
    /// against it and checks what the server saw.
    ///
    /// Resolves with the value of `test_fn` when it succeeded and the mock
    /// server recorded no errors or mismatches; the pact file is written in
    /// that case only. Otherwise the error carries a printable report that
    /// combines the test failure with the server's findings. The engine is
    /// told to shut the run down exactly once on every path, including a
    /// failed start.
    pub async fn execute_test<T, E, F, Fut>(&mut self, test_fn: F) -> Result<T, Error>
    where
        F: FnOnce(MockServer) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.check_phase("execute_test", &[InteractionPhase::Idle])?;

        let mock_server = match self.engine.start_mock_server().await {
            Ok(mock_server) => mock_server,
            Err(e) => {
                warn!(error = %e, "mock server could not be started");
                if let Err(shutdown_error) = self.engine.shutdown_test(None).await {
                    warn!(error = %shutdown_error, "shutdown after a failed start failed");
                }
                return Err(Error::PreRun(e.to_string()));
            }
        };
        info!(id = %mock_server.id, url = %mock_server.url, "mock server started");

        let handle = mock_server.clone();
        let run = AssertUnwindSafe(async move { test_fn(handle).await }).catch_unwind();
        let test_outcome = match run.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let e: Box<dyn std::error::Error + Send + Sync> = e.into();
                Err(e.to_string())
            }
            Err(panic) => Err(panic_message(panic)),
        };
        if let Err(e) = &test_outcome {
            debug!(error = %e, "test function failed");
        }

        let outcome = AssertUnwindSafe(self.verify(&mock_server, test_outcome))
            .catch_unwind()
            .await;

        if let Err(e) = self.engine.shutdown_test(Some(&mock_server)).await {
            warn!(id = %mock_server.id, error = %e, "mock server shutdown failed");
        } else {
            debug!(id = %mock_server.id, "mock server shut down");
        }

        match outcome {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    async fn verify<T>(
        &self,
        mock_server: &MockServer,
        test_outcome: Result<T, String>,
    ) -> Result<T, Error> {
        match test_outcome {
            Ok(value) => {
                let result = self.engine.test_result(&mock_server.id).await?;

                if let Some(mock_server_error) = &result.mock_server_error {
                    return Err(Error::MockServer(mock_server_error.clone()));
                }

                if result.has_mismatches() {
                    let failure = TestFailure::from_test_result(None, &result);
                    return Err(Error::Mismatches(failure.message()));
                }

                self.engine
                    .write_pact_file(&mock_server.id, self.options.dir())
                    .await?;
                info!(dir = %self.options.dir().display(), "pact file written");

                Ok(value)
            }
            Err(test_error) => {
                let result = self
                    .engine
                    .test_result(&mock_server.id)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(id = %mock_server.id, error = %e, "could not fetch mock server results");
                        Default::default()
                    });

                let failure = TestFailure::from_test_result(Some(test_error), &result);
                Err(Error::TestFailed(failure.message()))
            }
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("test function panicked")
    }
}
