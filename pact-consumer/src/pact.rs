use crate::{
    error::Error, PactEngine, PactV3Options, ProviderState, RequestSpec, ResponseSpec,
};
use serde_json::{Map, Value};
use std::{fmt::Display, path::Path};
use tracing::debug;

/// Where the builder is within the interaction currently being declared.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InteractionPhase {
    /// No interaction is open; provider states may be declared.
    Idle,
    /// A description was sent, the request is still missing.
    Described,
    /// The request was sent, the response is still missing.
    Requested,
}

impl Display for InteractionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionPhase::Idle => write!(f, "not started"),
            InteractionPhase::Described => write!(f, "awaiting a request"),
            InteractionPhase::Requested => write!(f, "awaiting a response"),
        }
    }
}

/// Declares the interactions of one consumer/provider pact and runs consumer
/// tests against them.
///
/// Every call is forwarded to the engine, which owns the contract. The only
/// state kept here is the list of provider states for the next interaction.
#[derive(Debug)]
pub struct PactV3 {
    pub(crate) options: PactV3Options,
    pub(crate) engine: Box<dyn PactEngine>,
    states: Vec<ProviderState>,
    pub(crate) phase: InteractionPhase,
}

impl PactV3 {
    pub fn new(options: PactV3Options, engine: Box<dyn PactEngine>) -> Self {
        debug!(
            consumer = options.consumer(),
            provider = options.provider(),
            "creating pact"
        );

        Self {
            options,
            engine,
            states: Vec::new(),
            phase: InteractionPhase::Idle,
        }
    }

    pub fn options(&self) -> &PactV3Options {
        &self.options
    }

    /// Provider states that will be attached to the next interaction.
    pub fn pending_states(&self) -> &[ProviderState] {
        &self.states
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    pub fn given<S: Into<String>>(&mut self, provider_state: S) -> Result<&mut Self, Error> {
        self.push_state(ProviderState::new(provider_state))
    }

    pub fn given_with_params<S: Into<String>>(
        &mut self,
        provider_state: S,
        parameters: Map<String, Value>,
    ) -> Result<&mut Self, Error> {
        self.push_state(ProviderState::with_parameters(provider_state, parameters))
    }

    fn push_state(&mut self, state: ProviderState) -> Result<&mut Self, Error> {
        self.check_phase("given", &[InteractionPhase::Idle])?;
        debug!(state = %state.description, "provider state declared");
        self.states.push(state);
        Ok(self)
    }

    /// Opens a new interaction with the provider states declared so far.
    /// The states stay pending until the response is declared.
    pub fn upon_receiving(&mut self, description: &str) -> Result<&mut Self, Error> {
        self.check_phase("upon_receiving", &[InteractionPhase::Idle])?;
        debug!(description, states = self.states.len(), "adding interaction");

        self.engine.add_interaction(description, &self.states)?;
        self.phase = InteractionPhase::Described;
        Ok(self)
    }

    pub fn with_request(&mut self, request: &RequestSpec) -> Result<&mut Self, Error> {
        self.check_phase("with_request", &[InteractionPhase::Described])?;
        debug!(method = %request.method, path = %request.path, "adding request");

        let body = serialize_body(request.body.as_ref())?;
        self.engine.add_request(request, body.as_deref())?;
        self.phase = InteractionPhase::Requested;
        Ok(self)
    }

    pub fn with_request_binary_file<P: AsRef<Path>>(
        &mut self,
        request: &RequestSpec,
        content_type: &str,
        file: P,
    ) -> Result<&mut Self, Error> {
        self.check_phase("with_request_binary_file", &[InteractionPhase::Described])?;
        debug!(method = %request.method, path = %request.path, content_type, "adding binary request");

        self.engine
            .add_request_binary_file(request, content_type, file.as_ref())?;
        self.phase = InteractionPhase::Requested;
        Ok(self)
    }

    pub fn with_request_multipart_file_upload<P: AsRef<Path>>(
        &mut self,
        request: &RequestSpec,
        content_type: &str,
        file: P,
        part: &str,
    ) -> Result<&mut Self, Error> {
        self.check_phase(
            "with_request_multipart_file_upload",
            &[InteractionPhase::Described],
        )?;
        debug!(method = %request.method, path = %request.path, content_type, part, "adding multipart request");

        self.engine
            .add_request_multipart_file_upload(request, content_type, file.as_ref(), part)?;
        self.phase = InteractionPhase::Requested;
        Ok(self)
    }

    /// Declares the response and closes the interaction.
    pub fn will_respond_with(&mut self, response: &ResponseSpec) -> Result<&mut Self, Error> {
        self.check_phase("will_respond_with", &[InteractionPhase::Requested])?;
        debug!(status = response.status, "adding response");

        let body = serialize_body(response.body.as_ref())?;
        self.engine.add_response(response, body.as_deref())?;
        self.close_interaction();
        Ok(self)
    }

    pub fn with_response_binary_file<P: AsRef<Path>>(
        &mut self,
        response: &ResponseSpec,
        content_type: &str,
        file: P,
    ) -> Result<&mut Self, Error> {
        self.check_phase("with_response_binary_file", &[InteractionPhase::Requested])?;
        debug!(status = response.status, content_type, "adding binary response");

        self.engine
            .add_response_binary_file(response, content_type, file.as_ref())?;
        self.close_interaction();
        Ok(self)
    }

    pub fn with_response_multipart_file_upload<P: AsRef<Path>>(
        &mut self,
        response: &ResponseSpec,
        content_type: &str,
        file: P,
        part: &str,
    ) -> Result<&mut Self, Error> {
        self.check_phase(
            "with_response_multipart_file_upload",
            &[InteractionPhase::Requested],
        )?;
        debug!(status = response.status, content_type, part, "adding multipart response");

        self.engine
            .add_response_multipart_file_upload(response, content_type, file.as_ref(), part)?;
        self.close_interaction();
        Ok(self)
    }

    fn close_interaction(&mut self) {
        self.states.clear();
        self.phase = InteractionPhase::Idle;
    }

    /// Only enforced with strict sequencing; otherwise every call goes through
    /// and the engine decides what to make of it.
    pub(crate) fn check_phase(
        &self,
        operation: &'static str,
        allowed: &[InteractionPhase],
    ) -> Result<(), Error> {
        if self.options.strict_sequencing() && !allowed.contains(&self.phase) {
            return Err(Error::InvalidSequence {
                operation,
                phase: self.phase,
            });
        }

        Ok(())
    }
}

fn serialize_body(body: Option<&Value>) -> Result<Option<String>, Error> {
    match body {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::to_string(value)?)),
    }
}
