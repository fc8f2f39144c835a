//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! The only transport the harness speaks. Messages are sent as-is (no
//! framing); exactly one datagram goes out per call and the first reply
//! within the timeout is returned.

use super::DnsTransport;
use async_trait::async_trait;
use dnscheck_domain::HarnessError;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
    source_addr: Option<SocketAddr>,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            source_addr: None,
        }
    }

    /// Bind the client socket to `source` instead of an ephemeral port.
    pub fn with_source(mut self, source: SocketAddr) -> Self {
        self.source_addr = Some(source);
        self
    }

    fn unreachable(&self, detail: String) -> HarnessError {
        HarnessError::TransportUnreachable {
            server: self.server_addr.to_string(),
            detail,
        }
    }

    fn timeout_error(&self) -> HarnessError {
        HarnessError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    fn map_io(&self, context: &str, error: std::io::Error) -> HarnessError {
        match error.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => self.timeout_error(),
            _ => self.unreachable(format!("{}: {}", context, error)),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, HarnessError> {
        // Ephemeral port unless a source address was requested; a source
        // that cannot be bound fails the call outright.
        let bind_addr: SocketAddr = match self.source_addr {
            Some(source) => source,
            None if self.server_addr.is_ipv4() => "0.0.0.0:0".parse().unwrap(),
            None => "[::]:0".parse().unwrap(),
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.unreachable(format!("failed to bind {}: {}", bind_addr, e)))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.map_io("failed to send query", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| self.map_io("failed to receive response", e))?;

        // Validate response came from expected server
        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
