use async_trait::async_trait;
use dnscheck_domain::HarnessError;
use std::time::Duration;

/// Blocks until the workloads matching a label selector report the
/// expected replica count, or the bound elapses.
#[async_trait]
pub trait ReadinessWaiter: Send + Sync {
    async fn wait_ready(
        &self,
        selector: &str,
        replicas: usize,
        timeout: Duration,
    ) -> Result<(), HarnessError>;
}
