//! Namespace Isolation Flow Tests
//!
//! Every record is owned by one namespace; teardown and breakage in one
//! namespace must never disturb names owned by another.

use dnscheck_application::ports::{DefinitionApplier, DnsProber, NamespaceProvisioner};
use dnscheck_domain::{
    DefinitionSet, HarnessError, ProbeQuery, RecordDefinition, RecordType,
};
use dnscheck_infrastructure::{EmbeddedResolver, UdpProber};
use std::net::IpAddr;
use std::time::Duration;

async fn start_resolver() -> EmbeddedResolver {
    EmbeddedResolver::start("127.0.0.1:0".parse().unwrap())
        .await
        .expect("failed to start embedded resolver")
}

fn prober() -> UdpProber {
    UdpProber::new(Duration::from_secs(2))
}

fn single_record_set(doc: &str, name: &str, target: &str) -> DefinitionSet {
    DefinitionSet::new(doc).with_record(RecordDefinition::new(
        name,
        RecordType::A,
        vec![target.to_string()],
    ))
}

#[tokio::test]
async fn test_namespace_teardown_leaves_siblings_serving() {
    let resolver = start_resolver().await;

    resolver.create("ns-a").await.unwrap();
    resolver.create("ns-b").await.unwrap();
    resolver
        .apply("ns-a", &single_record_set("a", "host-a.example.org", "1.1.1.1"))
        .await
        .unwrap();
    resolver
        .apply("ns-b", &single_record_set("b", "host-b.example.org", "2.2.2.2"))
        .await
        .unwrap();

    resolver.delete("ns-a").await.unwrap();

    let gone = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "host-a.example.org",
            RecordType::A,
        ))
        .await
        .unwrap();
    assert!(gone.is_nxdomain());

    let kept = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "host-b.example.org",
            RecordType::A,
        ))
        .await
        .unwrap();
    assert!(kept
        .addresses()
        .contains(&"2.2.2.2".parse::<IpAddr>().unwrap()));

    resolver.shutdown();
}

#[tokio::test]
async fn test_poisoning_is_scoped_to_the_owning_namespace() {
    let resolver = start_resolver().await;

    resolver.create("ns-broken").await.unwrap();
    resolver.create("ns-healthy").await.unwrap();
    resolver
        .apply(
            "ns-broken",
            &single_record_set("broken", "broken.example.org", "not-an-ip"),
        )
        .await
        .unwrap();
    resolver
        .apply(
            "ns-healthy",
            &single_record_set("healthy", "healthy.example.org", "3.3.3.3"),
        )
        .await
        .unwrap();

    let broken = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "broken.example.org",
            RecordType::A,
        ))
        .await;
    assert!(matches!(broken, Err(HarnessError::DecodeFailure(_))));

    let healthy = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "healthy.example.org",
            RecordType::A,
        ))
        .await
        .unwrap();
    assert!(healthy
        .addresses()
        .contains(&"3.3.3.3".parse::<IpAddr>().unwrap()));

    // removing the broken namespace clears the poisoning
    resolver.delete("ns-broken").await.unwrap();
    let after = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "broken.example.org",
            RecordType::A,
        ))
        .await
        .unwrap();
    assert!(after.is_nxdomain());

    resolver.shutdown();
}

#[tokio::test]
async fn test_removing_one_document_keeps_the_rest_of_the_namespace() {
    let resolver = start_resolver().await;

    resolver.create("ns").await.unwrap();
    resolver
        .apply("ns", &single_record_set("one", "one.example.org", "1.1.1.1"))
        .await
        .unwrap();
    resolver
        .apply("ns", &single_record_set("two", "two.example.org", "2.2.2.2"))
        .await
        .unwrap();

    resolver.remove("ns", "one").await.unwrap();

    let gone = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "one.example.org",
            RecordType::A,
        ))
        .await
        .unwrap();
    assert!(gone.is_nxdomain());

    let kept = prober()
        .probe(&ProbeQuery::new(
            resolver.addr(),
            "two.example.org",
            RecordType::A,
        ))
        .await
        .unwrap();
    assert!(kept
        .addresses()
        .contains(&"2.2.2.2".parse::<IpAddr>().unwrap()));

    resolver.shutdown();
}
