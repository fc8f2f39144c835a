mod definition_applier;
mod dns_prober;
mod namespace;
mod readiness;

pub use definition_applier::DefinitionApplier;
pub use dns_prober::DnsProber;
pub use namespace::NamespaceProvisioner;
pub use readiness::ReadinessWaiter;

// Re-export for convenience
pub use dnscheck_domain::ProbeQuery;
