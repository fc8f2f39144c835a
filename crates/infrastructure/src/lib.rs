//! dnscheck Infrastructure Layer
//!
//! Wire-level DNS plumbing (query construction, UDP transport, response
//! decoding) and the embedded resolver the harness runs against when no
//! external resolver is wired in.
pub mod dns;
pub mod resolver;

pub use dns::prober::UdpProber;
pub use resolver::EmbeddedResolver;
