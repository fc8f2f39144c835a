//! Namespaced record storage behind the embedded resolver.
//!
//! Every record is owned by exactly one (namespace, document) pair.
//! Teardown and poisoning are scoped to the owner; lookups see the
//! union of all namespaces. A name whose definition could not be
//! turned into servable records is "poisoned": admission succeeded,
//! serving must not.

use dashmap::DashMap;
use dnscheck_domain::{DefinitionSet, HarnessError, RecordType};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq)]
pub enum StoredData {
    Addresses(Vec<IpAddr>),
    Texts(Vec<String>),
}

impl StoredData {
    fn is_empty(&self) -> bool {
        match self {
            StoredData::Addresses(addrs) => addrs.is_empty(),
            StoredData::Texts(texts) => texts.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSet {
    pub ttl: u32,
    pub data: StoredData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The name is covered by a malformed definition; it must not be
    /// served cleanly.
    Poisoned,
    Records(StoredSet),
    /// Name known, no data of the queried type.
    NoData,
    /// Name unknown everywhere.
    NameError,
}

#[derive(Default)]
struct DocumentFootprint {
    keys: Vec<(String, RecordType)>,
    poisoned: Vec<String>,
}

#[derive(Default)]
struct NamespaceRecords {
    sets: HashMap<(String, RecordType), StoredSet>,
    poisoned: HashSet<String>,
    documents: HashMap<String, DocumentFootprint>,
}

impl NamespaceRecords {
    fn drop_document(&mut self, name: &str) {
        if let Some(footprint) = self.documents.remove(name) {
            for key in footprint.keys {
                self.sets.remove(&key);
            }
            for name in footprint.poisoned {
                self.poisoned.remove(&name);
            }
        }
    }
}

#[derive(Default)]
pub struct RecordStore {
    namespaces: DashMap<String, NamespaceRecords>,
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_lowercase()
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_namespace(&self, namespace: &str) -> Result<(), HarnessError> {
        if self.namespaces.contains_key(namespace) {
            return Err(HarnessError::NamespaceError(format!(
                "namespace '{}' already exists",
                namespace
            )));
        }
        self.namespaces
            .insert(namespace.to_string(), NamespaceRecords::default());
        Ok(())
    }

    pub fn remove_namespace(&self, namespace: &str) -> Result<(), HarnessError> {
        match self.namespaces.remove(namespace) {
            Some(_) => Ok(()),
            None => Err(HarnessError::NamespaceError(format!(
                "namespace '{}' does not exist",
                namespace
            ))),
        }
    }

    /// Admit a definition document into a namespace. Re-applying a
    /// document replaces its previous content. Address records whose
    /// targets do not parse (or whose family does not match the record
    /// type) poison the name instead of being rejected.
    pub fn apply_document(
        &self,
        namespace: &str,
        set: &DefinitionSet,
    ) -> Result<(), HarnessError> {
        set.validate()?;

        let mut records = self.namespaces.get_mut(namespace).ok_or_else(|| {
            HarnessError::NamespaceError(format!("namespace '{}' does not exist", namespace))
        })?;

        records.drop_document(&set.name);

        let mut footprint = DocumentFootprint::default();
        for record in &set.records {
            let name = normalize(&record.name);
            let ttl = record.effective_ttl();

            let data = if record.record_type.is_address() {
                match record.parsed_addresses() {
                    Ok(addrs) if addrs.iter().all(|a| family_matches(record.record_type, a)) => {
                        StoredData::Addresses(addrs)
                    }
                    _ => {
                        records.poisoned.insert(name.clone());
                        footprint.poisoned.push(name);
                        continue;
                    }
                }
            } else {
                StoredData::Texts(record.targets.clone())
            };

            let key = (name, record.record_type);
            footprint.keys.push(key.clone());
            records.sets.insert(key, StoredSet { ttl, data });
        }

        records.documents.insert(set.name.clone(), footprint);
        Ok(())
    }

    pub fn remove_document(&self, namespace: &str, set_name: &str) -> Result<(), HarnessError> {
        let mut records = self.namespaces.get_mut(namespace).ok_or_else(|| {
            HarnessError::NamespaceError(format!("namespace '{}' does not exist", namespace))
        })?;
        records.drop_document(set_name);
        Ok(())
    }

    pub fn lookup(&self, name: &str, record_type: RecordType) -> LookupOutcome {
        let name = normalize(name);
        let mut poisoned = false;
        let mut found: Option<StoredSet> = None;
        let mut known = false;

        for entry in self.namespaces.iter() {
            let records = entry.value();
            if records.poisoned.contains(&name) {
                poisoned = true;
            }
            if let Some(set) = records.sets.get(&(name.clone(), record_type)) {
                known = true;
                if !set.data.is_empty() && found.is_none() {
                    found = Some(set.clone());
                }
            }
            if records.sets.keys().any(|(n, _)| n == &name) {
                known = true;
            }
        }

        if poisoned {
            LookupOutcome::Poisoned
        } else if let Some(set) = found {
            LookupOutcome::Records(set)
        } else if known {
            LookupOutcome::NoData
        } else {
            LookupOutcome::NameError
        }
    }
}

fn family_matches(record_type: RecordType, addr: &IpAddr) -> bool {
    match record_type {
        RecordType::A => addr.is_ipv4(),
        RecordType::AAAA => addr.is_ipv6(),
        RecordType::TXT => false,
    }
}
