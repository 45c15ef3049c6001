use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// A single discrepancy between an actual request and its expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    #[serde(rename = "type")]
    pub mismatch_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub mismatch: String,
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) if !path.is_empty() => {
                write!(f, "{} (at {}) {}", self.mismatch_type, path, self.mismatch)
            }
            _ => write!(f, "{} {}", self.mismatch_type, self.mismatch),
        }
    }
}

/// One item of a mismatch record. Items that don't decode into a
/// [`Mismatch`] keep their JSON text so they can still be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchEntry {
    Mismatch(Mismatch),
    Unreadable(String),
}

impl Display for MismatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchEntry::Mismatch(mismatch) => write!(f, "{}", mismatch),
            MismatchEntry::Unreadable(text) => write!(f, "{}", text),
        }
    }
}

/// One entry of the engine's mismatch list. A record can bundle several
/// mismatches, e.g. every body difference of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchRecord {
    Parsed(Vec<MismatchEntry>),
    /// The record could not be decoded and is reported verbatim.
    Raw(String),
}

#[derive(Deserialize)]
struct RecordDocument {
    #[serde(default)]
    mismatches: Vec<Value>,
}

impl MismatchRecord {
    pub fn parse(record: &str) -> Self {
        match serde_json::from_str::<RecordDocument>(record) {
            Ok(document) => MismatchRecord::Parsed(
                document
                    .mismatches
                    .into_iter()
                    .map(|entry| match serde_json::from_value::<Mismatch>(entry.clone()) {
                        Ok(mismatch) => MismatchEntry::Mismatch(mismatch),
                        Err(e) => {
                            tracing::debug!(error = %e, "mismatch entry has an unexpected shape");
                            MismatchEntry::Unreadable(entry.to_string())
                        }
                    })
                    .collect(),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "mismatch record is not valid JSON");
                MismatchRecord::Raw(record.to_owned())
            }
        }
    }

    /// The report lines this record contributes, before numbering.
    pub fn lines(&self) -> Vec<String> {
        match self {
            MismatchRecord::Parsed(entries) => entries.iter().map(|e| e.to_string()).collect(),
            MismatchRecord::Raw(text) => vec![text.clone()],
        }
    }
}
