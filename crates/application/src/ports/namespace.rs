use async_trait::async_trait;
use dnscheck_domain::HarnessError;

/// Provisioning and teardown of the isolated namespace a scenario owns.
/// `delete` must release every resource the namespace acquired.
#[async_trait]
pub trait NamespaceProvisioner: Send + Sync {
    async fn create(&self, namespace: &str) -> Result<(), HarnessError>;

    async fn delete(&self, namespace: &str) -> Result<(), HarnessError>;
}
