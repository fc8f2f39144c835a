use super::{Check, Scenario, ScenarioReport, ScenarioState};
use crate::ports::{DefinitionApplier, DnsProber, NamespaceProvisioner, ReadinessWaiter};
use dnscheck_domain::config::TimingConfig;
use dnscheck_domain::{HarnessError, ProbeQuery, ProbeResponse};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives one scenario through apply → propagate → query → assert, and
/// guarantees the namespace and every applied definition are released on
/// both the success and failure paths.
pub struct ScenarioRunner {
    prober: Arc<dyn DnsProber>,
    applier: Arc<dyn DefinitionApplier>,
    readiness: Arc<dyn ReadinessWaiter>,
    namespaces: Arc<dyn NamespaceProvisioner>,
    resolver_addr: SocketAddr,
    timing: TimingConfig,
}

impl ScenarioRunner {
    pub fn new(
        prober: Arc<dyn DnsProber>,
        applier: Arc<dyn DefinitionApplier>,
        readiness: Arc<dyn ReadinessWaiter>,
        namespaces: Arc<dyn NamespaceProvisioner>,
        resolver_addr: SocketAddr,
        timing: TimingConfig,
    ) -> Self {
        Self {
            prober,
            applier,
            readiness,
            namespaces,
            resolver_addr,
            timing,
        }
    }

    pub async fn run(&self, scenario: &Scenario) -> ScenarioReport {
        let started = Instant::now();
        let mut state = ScenarioState::Init;
        let mut applied: Vec<String> = Vec::new();

        info!(
            scenario = %scenario.name,
            namespace = %scenario.namespace,
            "scenario starting"
        );

        let result = match self.namespaces.create(&scenario.namespace).await {
            Ok(()) => {
                let inner = self.run_phases(scenario, &mut state, &mut applied).await;

                // Cleanup runs no matter how the phases ended. A cleanup
                // failure surfaces only when the phases themselves passed.
                let cleanup = self.cleanup(scenario, &applied).await;
                if cleanup.is_ok() {
                    state = ScenarioState::CleanedUp;
                }
                inner.and(cleanup)
            }
            Err(e) => Err(e),
        };

        if let Err(error) = &result {
            error!(
                scenario = %scenario.name,
                namespace = %scenario.namespace,
                state = %state,
                error = %error,
                "scenario failed"
            );
        } else {
            info!(
                scenario = %scenario.name,
                namespace = %scenario.namespace,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "scenario passed"
            );
        }

        ScenarioReport {
            scenario: scenario.name.clone(),
            namespace: scenario.namespace.clone(),
            state,
            passed: result.is_ok(),
            failure: result.err(),
            elapsed: started.elapsed(),
        }
    }

    /// Run independent scenarios as sibling tasks. One scenario failing
    /// (or panicking) never aborts the others; every scenario reports.
    pub async fn run_all(self: &Arc<Self>, scenarios: Vec<Scenario>) -> Vec<ScenarioReport> {
        let handles: Vec<_> = scenarios
            .into_iter()
            .map(|scenario| {
                let runner = Arc::clone(self);
                let name = scenario.name.clone();
                let namespace = scenario.namespace.clone();
                (
                    name,
                    namespace,
                    tokio::spawn(async move { runner.run(&scenario).await }),
                )
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (name, namespace, handle) in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(join_error) => {
                    error!(scenario = %name, error = %join_error, "scenario task died");
                    reports.push(ScenarioReport {
                        scenario: name,
                        namespace,
                        state: ScenarioState::Init,
                        passed: false,
                        failure: Some(HarnessError::NamespaceError(format!(
                            "scenario task died: {}",
                            join_error
                        ))),
                        elapsed: std::time::Duration::ZERO,
                    });
                }
            }
        }
        reports
    }

    async fn run_phases(
        &self,
        scenario: &Scenario,
        state: &mut ScenarioState,
        applied: &mut Vec<String>,
    ) -> Result<(), HarnessError> {
        self.readiness
            .wait_ready(
                &scenario.selector,
                scenario.replicas,
                self.timing.readiness_timeout(),
            )
            .await?;

        for phase in &scenario.phases {
            if let Some(definition) = &phase.definition {
                self.applier.apply(&scenario.namespace, definition).await?;
                applied.push(definition.name.clone());
                self.transition(scenario, phase.label, state, ScenarioState::DefinitionApplied);

                // Bounded poll until the resolver reflects the applied
                // definition; never a fixed sleep.
                if let Some(check) = phase.checks.first() {
                    self.await_propagation(check).await?;
                }
                self.transition(scenario, phase.label, state, ScenarioState::Propagated);
            }

            for check in &phase.checks {
                let outcome = self.lookup(check).await;
                self.transition(scenario, phase.label, state, ScenarioState::Queried);
                check.expectation.check(&check.domain, &outcome)?;
            }
            self.transition(scenario, phase.label, state, ScenarioState::Asserted);
        }

        Ok(())
    }

    async fn await_propagation(&self, check: &Check) -> Result<(), HarnessError> {
        let deadline = Instant::now() + self.timing.propagation_timeout();

        loop {
            let outcome = self.lookup(check).await;
            if check.expectation.check(&check.domain, &outcome).is_ok() {
                return Ok(());
            }

            if Instant::now() + self.timing.poll_interval() > deadline {
                return Err(HarnessError::PropagationTimeout {
                    name: check.domain.to_string(),
                    waited_ms: self.timing.propagation_timeout_ms,
                });
            }
            tokio::time::sleep(self.timing.poll_interval()).await;
        }
    }

    async fn lookup(&self, check: &Check) -> Result<ProbeResponse, HarnessError> {
        let query = ProbeQuery::new(
            self.resolver_addr,
            Arc::clone(&check.domain),
            check.record_type,
        );
        let outcome = self.prober.probe(&query).await;
        debug!(
            domain = %check.domain,
            record_type = %check.record_type,
            outcome = ?outcome.as_ref().map(|r| r.summary()),
            "lookup"
        );
        outcome
    }

    async fn cleanup(&self, scenario: &Scenario, applied: &[String]) -> Result<(), HarnessError> {
        let mut first_error = None;

        for set_name in applied {
            if let Err(e) = self.applier.remove(&scenario.namespace, set_name).await {
                warn!(
                    namespace = %scenario.namespace,
                    set = %set_name,
                    error = %e,
                    "failed to remove definition set"
                );
                first_error.get_or_insert(e);
            }
        }

        if let Err(e) = self.namespaces.delete(&scenario.namespace).await {
            warn!(
                namespace = %scenario.namespace,
                error = %e,
                "failed to delete namespace"
            );
            first_error.get_or_insert(e);
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    fn transition(
        &self,
        scenario: &Scenario,
        phase: &'static str,
        state: &mut ScenarioState,
        next: ScenarioState,
    ) {
        *state = next;
        debug!(
            scenario = %scenario.name,
            phase = phase,
            state = %next,
            "state transition"
        );
    }
}
