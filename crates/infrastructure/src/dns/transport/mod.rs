pub mod udp;

use async_trait::async_trait;
use dnscheck_domain::HarnessError;
use std::time::Duration;

pub use udp::UdpTransport;

/// One request, one response. Implementations never retry; every
/// failure is surfaced as a transport error.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, HarnessError>;

    fn protocol_name(&self) -> &'static str;
}
