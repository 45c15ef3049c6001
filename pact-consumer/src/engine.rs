use crate::{
    error::EngineError, MockServer, ProviderState, RequestSpec, ResponseSpec, TestResult,
};
use async_trait::async_trait;
use std::{fmt::Debug, path::Path};

/// Command interface of the verification engine that owns the contract model,
/// the mock servers and the pact files.
///
/// Interaction commands mutate the contract held by the engine; nothing is
/// re-derived on the consumer side. Implementations are constructed for one
/// consumer/provider pair.
#[async_trait]
pub trait PactEngine: Debug + Send + Sync {
    fn add_interaction(
        &mut self,
        description: &str,
        states: &[ProviderState],
    ) -> Result<(), EngineError>;

    /// `body` is the already serialized request body, if the request has one.
    fn add_request(&mut self, request: &RequestSpec, body: Option<&str>)
        -> Result<(), EngineError>;

    fn add_request_binary_file(
        &mut self,
        request: &RequestSpec,
        content_type: &str,
        file: &Path,
    ) -> Result<(), EngineError>;

    fn add_request_multipart_file_upload(
        &mut self,
        request: &RequestSpec,
        content_type: &str,
        file: &Path,
        part: &str,
    ) -> Result<(), EngineError>;

    fn add_response(
        &mut self,
        response: &ResponseSpec,
        body: Option<&str>,
    ) -> Result<(), EngineError>;

    fn add_response_binary_file(
        &mut self,
        response: &ResponseSpec,
        content_type: &str,
        file: &Path,
    ) -> Result<(), EngineError>;

    fn add_response_multipart_file_upload(
        &mut self,
        response: &ResponseSpec,
        content_type: &str,
        file: &Path,
        part: &str,
    ) -> Result<(), EngineError>;

    /// Starts a mock server for the interactions declared so far.
    ///
    /// An error means no runnable test context exists. `shutdown_test` is
    /// still called once with `None` for that run.
    async fn start_mock_server(&self) -> Result<MockServer, EngineError>;

    async fn test_result(&self, mock_server_id: &str) -> Result<TestResult, EngineError>;

    async fn write_pact_file(&self, mock_server_id: &str, dir: &Path) -> Result<(), EngineError>;

    /// Releases everything held for one run. `mock_server` is `None` when
    /// the run failed to start.
    async fn shutdown_test(&self, mock_server: Option<&MockServer>) -> Result<(), EngineError>;
}
