use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HarnessError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Transport timeout waiting on {server}")]
    TransportTimeout { server: String },

    #[error("Server {server} unreachable: {detail}")]
    TransportUnreachable { server: String, detail: String },

    #[error("Failed to decode DNS response: {0}")]
    DecodeFailure(String),

    #[error("Definition rejected: {0}")]
    AdmissionRejected(String),

    #[error("Propagation timeout: '{name}' not observed within {waited_ms}ms")]
    PropagationTimeout { name: String, waited_ms: u64 },

    #[error("Readiness timeout: selector '{selector}' never reached {expected} ready replicas")]
    ReadinessTimeout { selector: String, expected: usize },

    #[error("Assertion failed for '{name}': expected {expected}, actual {actual}")]
    AssertionFailed {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("No answer at index {index} (answer count {count})")]
    AnswerIndexOutOfBounds { index: usize, count: usize },

    #[error("Answer at index {index} is a {actual} record, expected {expected}")]
    AnswerTypeMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Namespace error: {0}")]
    NamespaceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HarnessError {
    /// True for the failure family a lookup against a poisoned or
    /// unreachable resolver is allowed to produce.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            HarnessError::TransportTimeout { .. }
                | HarnessError::TransportUnreachable { .. }
                | HarnessError::DecodeFailure(_)
        )
    }
}
