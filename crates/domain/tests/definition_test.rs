use dnscheck_domain::{
    DefinitionSet, HarnessError, RecordDefinition, RecordType, DEFAULT_RECORD_TTL,
};
use std::net::{IpAddr, Ipv4Addr};

#[test]
fn test_effective_ttl_defaults() {
    let record = RecordDefinition::new(
        "host1.example.org",
        RecordType::A,
        vec!["1.2.3.4".to_string()],
    );
    assert_eq!(record.effective_ttl(), DEFAULT_RECORD_TTL);

    let with_ttl = record.with_ttl(123);
    assert_eq!(with_ttl.effective_ttl(), 123);
}

#[test]
fn test_validate_accepts_normal_names() {
    let record = RecordDefinition::new(
        "host1.example.org",
        RecordType::A,
        vec!["1.2.3.4".to_string()],
    );
    assert!(record.validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_name() {
    let record = RecordDefinition::new("", RecordType::A, vec![]);
    assert!(matches!(
        record.validate(),
        Err(HarnessError::AdmissionRejected(_))
    ));
}

#[test]
fn test_validate_rejects_empty_label() {
    let record = RecordDefinition::new("host..example.org", RecordType::A, vec![]);
    assert!(record.validate().is_err());
}

#[test]
fn test_validate_rejects_oversized_label() {
    let name = format!("{}.example.org", "a".repeat(64));
    let record = RecordDefinition::new(name, RecordType::A, vec![]);
    assert!(record.validate().is_err());
}

#[test]
fn test_parsed_addresses() {
    let record = RecordDefinition::new(
        "host1.example.org",
        RecordType::A,
        vec!["1.2.3.4".to_string(), "1.2.3.5".to_string()],
    );
    let addrs = record.parsed_addresses().unwrap();
    assert_eq!(
        addrs,
        vec![
            IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)),
            IpAddr::V4(Ipv4Addr::new(1, 2, 3, 5))
        ]
    );
}

#[test]
fn test_malformed_target_is_admitted_but_unparseable() {
    let record = RecordDefinition::new(
        "broken1.example.org",
        RecordType::A,
        vec!["not-an-ip".to_string()],
    );

    // Admission only checks the name; the target breaks at serving time.
    assert!(record.validate().is_ok());
    assert!(record.parsed_addresses().is_err());
}

#[test]
fn test_definition_set_validates_records() {
    let set = DefinitionSet::new("basic")
        .with_record(RecordDefinition::new(
            "host1.example.org",
            RecordType::A,
            vec!["1.2.3.4".to_string()],
        ))
        .with_record(RecordDefinition::new("", RecordType::TXT, vec![]));

    assert!(set.validate().is_err());
}

#[test]
fn test_definition_set_serde_round_trip() {
    let set = DefinitionSet::new("ttl").with_record(
        RecordDefinition::new(
            "ttl.example.org",
            RecordType::A,
            vec!["10.0.0.1".to_string()],
        )
        .with_ttl(123),
    );

    let rendered = toml::to_string(&set).unwrap();
    let parsed: DefinitionSet = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, set);
}
