mod model;
mod runner;
mod suite;

pub use model::{Check, Phase, Scenario, ScenarioReport, ScenarioState};
pub use runner::ScenarioRunner;
pub use suite::conformance_suite;
