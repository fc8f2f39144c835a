use super::RecordType;
use std::net::SocketAddr;
use std::sync::Arc;

/// One DNS question aimed at one server. Built per invocation and
/// discarded after the answer is evaluated.
#[derive(Debug, Clone)]
pub struct ProbeQuery {
    pub server: SocketAddr,
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub source_address: Option<SocketAddr>,
}

impl ProbeQuery {
    pub fn new(server: SocketAddr, domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            server,
            domain: domain.into(),
            record_type,
            source_address: None,
        }
    }

    /// Bind the client socket to a specific local address before sending.
    pub fn with_source(mut self, source: SocketAddr) -> Self {
        self.source_address = Some(source);
        self
    }
}
