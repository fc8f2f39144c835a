use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use super::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use dnscheck_application::ports::DnsProber;
use dnscheck_domain::{HarnessError, ProbeQuery, ProbeResponse};
use std::time::Duration;
use tracing::{debug, warn};

/// Query client over UDP: one wire query per call, no retries, no
/// caching. Build → send → decode.
pub struct UdpProber {
    query_timeout: Duration,
}

impl UdpProber {
    pub fn new(query_timeout: Duration) -> Self {
        Self { query_timeout }
    }
}

#[async_trait]
impl DnsProber for UdpProber {
    async fn probe(&self, query: &ProbeQuery) -> Result<ProbeResponse, HarnessError> {
        let (id, bytes) = MessageBuilder::build_query(&query.domain, query.record_type)?;

        let mut transport = UdpTransport::new(query.server);
        if let Some(source) = query.source_address {
            transport = transport.with_source(source);
        }

        let raw = transport.send(&bytes, self.query_timeout).await?;
        let parsed = ResponseParser::parse(&raw)?;

        // Mismatched ids are tolerated: the source suite never verified
        // them, so they are logged rather than failed.
        if parsed.id != id {
            warn!(
                domain = %query.domain,
                expected_id = id,
                response_id = parsed.id,
                "transaction id mismatch"
            );
        }

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            status = %parsed.response.status,
            answers = parsed.response.answers.len(),
            "probe completed"
        );

        Ok(parsed.response)
    }
}
