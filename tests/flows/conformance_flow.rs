//! Conformance Flow Tests
//!
//! Runs the built-in suite against an embedded resolver, one scenario
//! per test plus the whole suite concurrently.

use dnscheck_application::{
    conformance_suite, Check, Phase, Scenario, ScenarioRunner, ScenarioState,
};
use dnscheck_domain::config::TimingConfig;
use dnscheck_domain::{
    DefinitionSet, Expectation, RecordDefinition, RecordType, ResponseExpectation,
};
use dnscheck_infrastructure::{EmbeddedResolver, UdpProber};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

const ZONE: &str = "example.org";

fn timing() -> TimingConfig {
    TimingConfig {
        query_timeout_ms: 1000,
        poll_interval_ms: 20,
        propagation_timeout_ms: 2000,
        readiness_timeout_ms: 1000,
    }
}

async fn harness() -> (Arc<EmbeddedResolver>, Arc<ScenarioRunner>) {
    let resolver = Arc::new(
        EmbeddedResolver::start("127.0.0.1:0".parse().unwrap())
            .await
            .expect("failed to start embedded resolver"),
    );
    let prober = Arc::new(UdpProber::new(timing().query_timeout()));
    let runner = Arc::new(ScenarioRunner::new(
        prober,
        resolver.clone(),
        resolver.clone(),
        resolver.clone(),
        resolver.addr(),
        timing(),
    ));
    (resolver, runner)
}

async fn run_scenario(name: &str) {
    let (resolver, runner) = harness().await;

    let scenario = conformance_suite(ZONE, "flow")
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("scenario {} missing from suite", name));

    let report = runner.run(&scenario).await;
    assert!(
        report.passed,
        "scenario {} failed: {:?}",
        name, report.failure
    );
    assert_eq!(report.state, ScenarioState::CleanedUp);

    resolver.shutdown();
}

#[tokio::test]
async fn test_basic_type_a_resolve() {
    run_scenario("basic-a-resolve").await;
}

#[tokio::test]
async fn test_nodata_reply_on_unlabeled_endpoints() {
    run_scenario("nodata-unlabeled").await;
}

#[tokio::test]
async fn test_broken_definition_does_not_break_resolver() {
    run_scenario("broken-non-interference").await;
}

#[tokio::test]
async fn test_ttl_is_correctly_evaluated() {
    run_scenario("ttl-round-trip").await;
}

#[tokio::test]
async fn test_basic_type_txt_resolve() {
    run_scenario("txt-round-trip").await;
}

#[tokio::test]
async fn test_type_aaaa_returns_success_with_no_answers() {
    run_scenario("aaaa-nodata").await;
}

#[tokio::test]
async fn test_type_aaaa_returns_nameerror_for_nonexistent_host() {
    run_scenario("nonexistent-nxdomain").await;
}

#[tokio::test]
async fn test_repeated_queries_are_stable() {
    run_scenario("repeat-stability").await;
}

#[tokio::test]
async fn test_whole_suite_runs_concurrently() {
    let (resolver, runner) = harness().await;

    let scenarios = conformance_suite(ZONE, "suite");
    let count = scenarios.len();
    let reports = runner.run_all(scenarios).await;

    assert_eq!(reports.len(), count);
    for report in &reports {
        assert!(
            report.passed,
            "scenario {} failed: {:?}",
            report.scenario, report.failure
        );
    }

    resolver.shutdown();
}

#[tokio::test]
async fn test_failing_sibling_does_not_abort_others() {
    let (resolver, runner) = harness().await;

    let mut scenarios = conformance_suite(ZONE, "mixed");
    // a scenario whose expectation can never be met: converges on the
    // wrong address, so propagation times out
    scenarios.push(
        Scenario::new("doomed", "dnscheck-doomed-mixed").with_phase(
            Phase::new("doomed")
                .applying(DefinitionSet::new("doomed").with_record(RecordDefinition::new(
                    format!("doomed.{}", ZONE),
                    RecordType::A,
                    vec!["5.5.5.5".to_string()],
                )))
                .with_check(Check::new(
                    format!("doomed.{}", ZONE),
                    RecordType::A,
                    Expectation::response(
                        ResponseExpectation::new()
                            .containing_address(IpAddr::V4(Ipv4Addr::new(6, 6, 6, 6))),
                    ),
                )),
        ),
    );

    let reports = runner.run_all(scenarios).await;

    let doomed = reports.iter().find(|r| r.scenario == "doomed").unwrap();
    assert!(!doomed.passed);

    for report in reports.iter().filter(|r| r.scenario != "doomed") {
        assert!(
            report.passed,
            "sibling {} was dragged down: {:?}",
            report.scenario, report.failure
        );
    }

    resolver.shutdown();
}
