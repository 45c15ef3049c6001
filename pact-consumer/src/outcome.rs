use crate::{mismatch::MismatchRecord, TestResult};

/// Everything that went wrong in a single test run, gathered from the test
/// function and from the engine's match results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestFailure {
    pub test_error: Option<String>,
    pub mock_server_error: Option<String>,
    pub mismatches: Vec<MismatchRecord>,
}

impl TestFailure {
    pub fn from_test_result(test_error: Option<String>, result: &TestResult) -> Self {
        Self {
            test_error,
            mock_server_error: result.mock_server_error.clone(),
            mismatches: result
                .mock_server_mismatches
                .iter()
                .flatten()
                .map(|record| MismatchRecord::parse(record))
                .collect(),
        }
    }

    /// Renders the report shown to the user. Mismatches are numbered from 1
    /// across all records.
    pub fn message(&self) -> String {
        let mut message = String::from("Test failed for the following reasons:");

        if let Some(test_error) = &self.test_error {
            message.push_str("\n\n\tTest code failed with an error: ");
            message.push_str(test_error);
        }

        if let Some(mock_server_error) = &self.mock_server_error {
            message.push_str("\n\n\t");
            message.push_str(mock_server_error);
        }

        if !self.mismatches.is_empty() {
            message.push_str("\n\n\tMock server failed with the following mismatches: ");
            let lines = self.mismatches.iter().flat_map(|record| record.lines());
            for (number, line) in (1..).zip(lines) {
                message.push_str(&format!("\n\t\t{}) {}", number, line));
            }
        }

        message
    }
}
