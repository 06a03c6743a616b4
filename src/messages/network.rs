//! Network messages - results coming back from request workers

use chrono::{DateTime, Local};

use crate::models::Response;

/// Why a dispatched request produced no response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    #[error("Request timed out ({0}s)")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Error reading body: {0}")]
    Body(String),
}

/// Outcome of one dispatched request
#[derive(Debug, Clone)]
pub struct Completion {
    /// `"<collection>/<request>"`, not unique across dispatches
    pub id: String,
    pub outcome: Result<Response, ExecError>,
    pub received_at: DateTime<Local>,
}

impl Completion {
    pub fn new(id: impl Into<String>, outcome: Result<Response, ExecError>) -> Self {
        Completion {
            id: id.into(),
            outcome,
            received_at: Local::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_error_messages() {
        assert_eq!(ExecError::Timeout(30).to_string(), "Request timed out (30s)");
        assert_eq!(
            ExecError::Connect("refused".into()).to_string(),
            "Connection failed: refused"
        );
    }
}
