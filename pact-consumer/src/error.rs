use crate::pact::InteractionPhase;
use thiserror::Error;

/// Error returned by a [`PactEngine`](crate::PactEngine) implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EngineError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// The engine could not start a runnable test context.
    #[error("{0}")]
    PreRun(String),
    /// The test function failed; the message is the full multi-line report.
    #[error("{0}")]
    TestFailed(String),
    /// The mock server reported an error unrelated to specific mismatches.
    #[error("{0}")]
    MockServer(String),
    /// The mock server recorded one or more mismatches.
    #[error("{0}")]
    Mismatches(String),
    #[error("{operation} is not allowed while the interaction is {phase}")]
    InvalidSequence {
        operation: &'static str,
        phase: InteractionPhase,
    },
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Could not serialize body: {0}")]
    Serialization(#[from] serde_json::Error),
}
