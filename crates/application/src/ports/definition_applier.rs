use async_trait::async_trait;
use dnscheck_domain::{DefinitionSet, HarnessError};

/// Applies declarative record-set documents against the resolver's
/// backing configuration. Success means admission only; propagation is
/// observed separately by the orchestrator.
#[async_trait]
pub trait DefinitionApplier: Send + Sync {
    async fn apply(&self, namespace: &str, set: &DefinitionSet) -> Result<(), HarnessError>;

    async fn remove(&self, namespace: &str, set_name: &str) -> Result<(), HarnessError>;
}
