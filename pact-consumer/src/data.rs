use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A precondition the provider has to satisfy before an interaction is exercised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderState {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl ProviderState {
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self {
            description: description.into(),
            parameters: None,
        }
    }

    pub fn with_parameters<S: Into<String>>(description: S, parameters: Map<String, Value>) -> Self {
        Self {
            description: description.into(),
            parameters: Some(parameters),
        }
    }
}

/// Expected shape of the request the consumer is going to send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub query: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new<S1: Into<String>, S2: Into<String>>(method: S1, path: S2) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_query<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Response the mock server will send back for a matched request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub status: u16,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ResponseSpec {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Handle of a mock server started for a single test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockServer {
    pub port: u16,
    pub url: String,
    pub id: String,
}

/// Match results reported by the engine once a test run has finished.
///
/// Every entry of `mock_server_mismatches` is a JSON document of the form
/// `{"mismatches": [{"type": ..., "path": ..., "mismatch": ...}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_server_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_server_mismatches: Option<Vec<String>>,
}

impl TestResult {
    pub fn has_mismatches(&self) -> bool {
        self.mock_server_mismatches
            .as_ref()
            .map(|mismatches| !mismatches.is_empty())
            .unwrap_or(false)
    }
}
