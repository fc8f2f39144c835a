//! Built-in conformance suite.
//!
//! One scenario per resolver property under test: healthy address
//! serving, NODATA vs NXDOMAIN, TTL and TXT round-trips, and the
//! resilience property that a malformed definition never breaks
//! previously-healthy names.

use super::{Check, Phase, Scenario};
use dnscheck_domain::{
    DefinitionSet, Expectation, RecordDefinition, RecordType, ResponseExpectation, ResponseStatus,
};
use std::net::{IpAddr, Ipv4Addr};

const HOST1_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4));
const HOST2_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 2, 3, 5));
const TTL_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
const CONFIGURED_TTL: u32 = 123;

fn namespace(scenario: &str, run_id: &str) -> String {
    // namespaces must be lowercase
    format!("dnscheck-{}-{}", scenario, run_id).to_lowercase()
}

/// Healthy record set: host1/host2 carry addresses, host3 is declared
/// with no targets so it answers NODATA instead of NXDOMAIN.
fn basic_set(zone: &str) -> DefinitionSet {
    DefinitionSet::new("basic")
        .with_record(RecordDefinition::new(
            format!("host1.{}", zone),
            RecordType::A,
            vec![HOST1_ADDR.to_string()],
        ))
        .with_record(RecordDefinition::new(
            format!("host2.{}", zone),
            RecordType::A,
            vec![HOST2_ADDR.to_string()],
        ))
        .with_record(RecordDefinition::new(
            format!("host3.{}", zone),
            RecordType::A,
            vec![],
        ))
}

/// Deliberately malformed: targets that cannot parse as addresses.
/// Admission succeeds; serving the names must not.
fn broken_set(zone: &str) -> DefinitionSet {
    DefinitionSet::new("broken")
        .with_record(RecordDefinition::new(
            format!("broken1.{}", zone),
            RecordType::A,
            vec!["not-an-ip".to_string()],
        ))
        .with_record(RecordDefinition::new(
            format!("broken2.{}", zone),
            RecordType::A,
            vec!["999.999.999.999".to_string()],
        ))
}

fn ttl_set(zone: &str) -> DefinitionSet {
    DefinitionSet::new("ttl").with_record(
        RecordDefinition::new(
            format!("ttl.{}", zone),
            RecordType::A,
            vec![TTL_ADDR.to_string()],
        )
        .with_ttl(CONFIGURED_TTL),
    )
}

fn txt_set(zone: &str) -> DefinitionSet {
    DefinitionSet::new("txt").with_record(RecordDefinition::new(
        format!("txt.{}", zone),
        RecordType::TXT,
        vec!["foo=bar".to_string()],
    ))
}

fn contains(addr: IpAddr) -> Expectation {
    Expectation::response(ResponseExpectation::new().containing_address(addr))
}

/// Build the conformance scenarios for `zone`. Each scenario owns a
/// unique namespace derived from `run_id` so concurrent runs never
/// observe each other's definitions.
pub fn conformance_suite(zone: &str, run_id: &str) -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    scenarios.push(
        Scenario::new("basic-a-resolve", namespace("basic-a", run_id)).with_phase(
            Phase::new("basic")
                .applying(basic_set(zone))
                .with_check(Check::new(
                    format!("host1.{}", zone),
                    RecordType::A,
                    contains(HOST1_ADDR),
                ))
                .with_check(Check::new(
                    format!("host2.{}", zone),
                    RecordType::A,
                    contains(HOST2_ADDR),
                )),
        ),
    );

    scenarios.push(
        Scenario::new("nodata-unlabeled", namespace("nodata", run_id)).with_phase(
            Phase::new("basic")
                .applying(basic_set(zone))
                .with_check(Check::new(
                    format!("host3.{}", zone),
                    RecordType::A,
                    Expectation::response(
                        ResponseExpectation::new()
                            .with_status(ResponseStatus::Success)
                            .with_answer_count(0)
                            .excluding_address(HOST1_ADDR),
                    ),
                )),
        ),
    );

    scenarios.push(
        Scenario::new("broken-non-interference", namespace("broken", run_id))
            .with_phase(
                Phase::new("healthy")
                    .applying(basic_set(zone))
                    .with_check(Check::new(
                        format!("host1.{}", zone),
                        RecordType::A,
                        contains(HOST1_ADDR),
                    )),
            )
            .with_phase(
                Phase::new("broken")
                    .applying(broken_set(zone))
                    .with_check(Check::new(
                        format!("broken1.{}", zone),
                        RecordType::A,
                        Expectation::failure(),
                    ))
                    .with_check(Check::new(
                        format!("broken2.{}", zone),
                        RecordType::A,
                        Expectation::failure(),
                    ))
                    // healthy records must keep resolving
                    .with_check(Check::new(
                        format!("host1.{}", zone),
                        RecordType::A,
                        contains(HOST1_ADDR),
                    )),
            ),
    );

    scenarios.push(
        Scenario::new("ttl-round-trip", namespace("ttl", run_id)).with_phase(
            Phase::new("ttl").applying(ttl_set(zone)).with_check(Check::new(
                format!("ttl.{}", zone),
                RecordType::A,
                Expectation::response(
                    ResponseExpectation::new()
                        .with_status(ResponseStatus::Success)
                        .with_ttl(CONFIGURED_TTL),
                ),
            )),
        ),
    );

    scenarios.push(
        Scenario::new("txt-round-trip", namespace("txt", run_id)).with_phase(
            Phase::new("txt").applying(txt_set(zone)).with_check(Check::new(
                format!("txt.{}", zone),
                RecordType::TXT,
                Expectation::response(
                    ResponseExpectation::new().with_text(vec!["foo=bar".to_string()]),
                ),
            )),
        ),
    );

    scenarios.push(
        Scenario::new("aaaa-nodata", namespace("aaaa-nodata", run_id)).with_phase(
            Phase::new("basic")
                .applying(basic_set(zone))
                .with_check(Check::new(
                    format!("host1.{}", zone),
                    RecordType::AAAA,
                    Expectation::response(
                        ResponseExpectation::new()
                            .with_status(ResponseStatus::Success)
                            .with_answer_count(0),
                    ),
                )),
        ),
    );

    scenarios.push(
        Scenario::new("nonexistent-nxdomain", namespace("nxdomain", run_id)).with_phase(
            Phase::new("basic")
                .applying(basic_set(zone))
                // first check doubles as the propagation signal
                .with_check(Check::new(
                    format!("host1.{}", zone),
                    RecordType::A,
                    contains(HOST1_ADDR),
                ))
                .with_check(Check::new(
                    format!("nonexistent.{}", zone),
                    RecordType::AAAA,
                    Expectation::response(
                        ResponseExpectation::new()
                            .with_status(ResponseStatus::NameError)
                            .with_answer_count(0),
                    ),
                )),
        ),
    );

    let mut stability = Phase::new("basic").applying(basic_set(zone));
    for _ in 0..3 {
        stability = stability
            .with_check(Check::new(
                format!("host1.{}", zone),
                RecordType::A,
                contains(HOST1_ADDR),
            ))
            .with_check(Check::new(
                format!("host2.{}", zone),
                RecordType::A,
                contains(HOST2_ADDR),
            ));
    }
    scenarios.push(
        Scenario::new("repeat-stability", namespace("stability", run_id)).with_phase(stability),
    );

    scenarios
}
