use async_trait::async_trait;
use dnscheck_domain::{HarnessError, ProbeQuery, ProbeResponse};

/// The query client seam. One call sends exactly one wire query and
/// blocks until a response arrives or the configured timeout elapses.
/// Implementations never retry and never cache.
#[async_trait]
pub trait DnsProber: Send + Sync {
    async fn probe(&self, query: &ProbeQuery) -> Result<ProbeResponse, HarnessError>;
}
