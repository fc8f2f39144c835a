use dnscheck_domain::{DefinitionSet, Expectation, HarnessError, RecordType};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// One lookup and its expected outcome.
#[derive(Debug, Clone)]
pub struct Check {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub expectation: Expectation,
}

impl Check {
    pub fn new(
        domain: impl Into<Arc<str>>,
        record_type: RecordType,
        expectation: Expectation,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            expectation,
        }
    }
}

/// One apply-then-verify step. A phase with no definition re-checks
/// state established by earlier phases.
#[derive(Debug, Clone)]
pub struct Phase {
    pub label: &'static str,
    pub definition: Option<DefinitionSet>,
    pub checks: Vec<Check>,
}

impl Phase {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            definition: None,
            checks: Vec::new(),
        }
    }

    pub fn applying(mut self, definition: DefinitionSet) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// One end-to-end verification scenario. Owns an isolated namespace of
/// resolver records; steps inside it are strictly ordered.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub namespace: String,
    /// Label selector handed to the readiness collaborator.
    pub selector: String,
    pub replicas: usize,
    pub phases: Vec<Phase>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            selector: "app.kubernetes.io/name=resolver".to_string(),
            replicas: 1,
            phases: Vec::new(),
        }
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }
}

/// Progress of a scenario through its fixed step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScenarioState {
    Init,
    DefinitionApplied,
    Propagated,
    Queried,
    Asserted,
    CleanedUp,
}

impl fmt::Display for ScenarioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScenarioState::Init => "init",
            ScenarioState::DefinitionApplied => "definition-applied",
            ScenarioState::Propagated => "propagated",
            ScenarioState::Queried => "queried",
            ScenarioState::Asserted => "asserted",
            ScenarioState::CleanedUp => "cleaned-up",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one scenario. Scenarios report independently; a failure
/// here never aborts a sibling.
#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: String,
    pub namespace: String,
    pub state: ScenarioState,
    pub passed: bool,
    pub failure: Option<HarnessError>,
    pub elapsed: Duration,
}

impl ScenarioReport {
    pub fn failure_message(&self) -> Option<String> {
        self.failure.as_ref().map(|e| e.to_string())
    }
}
