//! dnscheck Application Layer
//!
//! Ports for the external collaborators (definition apply, readiness,
//! namespaces, the query client) and the scenario orchestrator that
//! drives apply → propagate → query → assert → cleanup.
pub mod ports;
pub mod scenario;

pub use ports::{DefinitionApplier, DnsProber, NamespaceProvisioner, ReadinessWaiter};
pub use scenario::{
    conformance_suite, Check, Phase, Scenario, ScenarioReport, ScenarioRunner, ScenarioState,
};
