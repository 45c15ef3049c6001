mod data;
mod engine;
mod error;
mod executor;
mod mismatch;
mod outcome;
mod pact;
mod pact_configuration;

pub use data::{MockServer, ProviderState, RequestSpec, ResponseSpec, TestResult};
pub use engine::PactEngine;
pub use error::{EngineError, Error};
pub use mismatch::{Mismatch, MismatchEntry, MismatchRecord};
pub use outcome::TestFailure;
pub use pact::{InteractionPhase, PactV3};
pub use pact_configuration::{PactV3Options, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV};
