use async_trait::async_trait;
use pact_consumer::{
    EngineError, MockServer, PactEngine, ProviderState, RequestSpec, ResponseSpec, TestResult,
};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

/// A command received by the [`RecordingEngine`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    AddInteraction {
        description: String,
        states: Vec<ProviderState>,
    },
    AddRequest {
        request: RequestSpec,
        body: Option<String>,
    },
    AddRequestBinaryFile {
        request: RequestSpec,
        content_type: String,
        file: PathBuf,
    },
    AddRequestMultipartFileUpload {
        request: RequestSpec,
        content_type: String,
        file: PathBuf,
        part: String,
    },
    AddResponse {
        response: ResponseSpec,
        body: Option<String>,
    },
    AddResponseBinaryFile {
        response: ResponseSpec,
        content_type: String,
        file: PathBuf,
    },
    AddResponseMultipartFileUpload {
        response: ResponseSpec,
        content_type: String,
        file: PathBuf,
        part: String,
    },
    StartMockServer,
    TestResult(String),
    WritePactFile { id: String, dir: PathBuf },
    /// Carries the mock server id, `None` after a failed start.
    ShutdownTest(Option<String>),
}

#[derive(Debug, Default)]
struct Behaviour {
    start_error: Option<String>,
    test_result: TestResult,
    test_result_error: Option<String>,
    write_error: Option<String>,
    shutdown_error: Option<String>,
}

/// Engine double that records every command and answers with canned results.
///
/// Clones share the same log, so a test can keep one clone for inspection
/// after handing another to the pact.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
    behaviour: Arc<Mutex<Behaviour>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count<F: Fn(&EngineCall) -> bool>(&self, predicate: F) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn shutdown_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::ShutdownTest(_)))
    }

    pub fn pact_file_writes(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::WritePactFile { .. }))
    }

    pub fn fail_start<S: Into<String>>(&self, message: S) {
        self.behaviour.lock().unwrap().start_error = Some(message.into());
    }

    pub fn set_test_result(&self, test_result: TestResult) {
        self.behaviour.lock().unwrap().test_result = test_result;
    }

    pub fn set_mismatches<I: IntoIterator<Item = serde_json::Value>>(&self, records: I) {
        self.behaviour.lock().unwrap().test_result.mock_server_mismatches =
            Some(records.into_iter().map(|record| record.to_string()).collect());
    }

    pub fn set_mock_server_error<S: Into<String>>(&self, message: S) {
        self.behaviour.lock().unwrap().test_result.mock_server_error = Some(message.into());
    }

    pub fn fail_test_result<S: Into<String>>(&self, message: S) {
        self.behaviour.lock().unwrap().test_result_error = Some(message.into());
    }

    pub fn fail_write<S: Into<String>>(&self, message: S) {
        self.behaviour.lock().unwrap().write_error = Some(message.into());
    }

    pub fn fail_shutdown<S: Into<String>>(&self, message: S) {
        self.behaviour.lock().unwrap().shutdown_error = Some(message.into());
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn canned<T>(&self, value: T, error: Option<String>) -> Result<T, EngineError> {
        match error {
            Some(message) => Err(EngineError::new(message)),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl PactEngine for RecordingEngine {
    fn add_interaction(
        &mut self,
        description: &str,
        states: &[ProviderState],
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddInteraction {
            description: description.into(),
            states: states.to_vec(),
        });
        Ok(())
    }

    fn add_request(
        &mut self,
        request: &RequestSpec,
        body: Option<&str>,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddRequest {
            request: request.clone(),
            body: body.map(String::from),
        });
        Ok(())
    }

    fn add_request_binary_file(
        &mut self,
        request: &RequestSpec,
        content_type: &str,
        file: &Path,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddRequestBinaryFile {
            request: request.clone(),
            content_type: content_type.into(),
            file: file.into(),
        });
        Ok(())
    }

    fn add_request_multipart_file_upload(
        &mut self,
        request: &RequestSpec,
        content_type: &str,
        file: &Path,
        part: &str,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddRequestMultipartFileUpload {
            request: request.clone(),
            content_type: content_type.into(),
            file: file.into(),
            part: part.into(),
        });
        Ok(())
    }

    fn add_response(
        &mut self,
        response: &ResponseSpec,
        body: Option<&str>,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddResponse {
            response: response.clone(),
            body: body.map(String::from),
        });
        Ok(())
    }

    fn add_response_binary_file(
        &mut self,
        response: &ResponseSpec,
        content_type: &str,
        file: &Path,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddResponseBinaryFile {
            response: response.clone(),
            content_type: content_type.into(),
            file: file.into(),
        });
        Ok(())
    }

    fn add_response_multipart_file_upload(
        &mut self,
        response: &ResponseSpec,
        content_type: &str,
        file: &Path,
        part: &str,
    ) -> Result<(), EngineError> {
        self.record(EngineCall::AddResponseMultipartFileUpload {
            response: response.clone(),
            content_type: content_type.into(),
            file: file.into(),
            part: part.into(),
        });
        Ok(())
    }

    async fn start_mock_server(&self) -> Result<MockServer, EngineError> {
        self.record(EngineCall::StartMockServer);
        let error = self.behaviour.lock().unwrap().start_error.clone();

        self.canned(
            MockServer {
                port: 1234,
                url: "http://127.0.0.1:1234".into(),
                id: "recording-1".into(),
            },
            error,
        )
    }

    async fn test_result(&self, mock_server_id: &str) -> Result<TestResult, EngineError> {
        self.record(EngineCall::TestResult(mock_server_id.into()));
        let behaviour = self.behaviour.lock().unwrap();

        self.canned(
            behaviour.test_result.clone(),
            behaviour.test_result_error.clone(),
        )
    }

    async fn write_pact_file(&self, mock_server_id: &str, dir: &Path) -> Result<(), EngineError> {
        self.record(EngineCall::WritePactFile {
            id: mock_server_id.into(),
            dir: dir.into(),
        });
        let error = self.behaviour.lock().unwrap().write_error.clone();

        self.canned((), error)
    }

    async fn shutdown_test(&self, mock_server: Option<&MockServer>) -> Result<(), EngineError> {
        self.record(EngineCall::ShutdownTest(mock_server.map(|m| m.id.clone())));
        let error = self.behaviour.lock().unwrap().shutdown_error.clone();

        self.canned((), error)
    }
}
