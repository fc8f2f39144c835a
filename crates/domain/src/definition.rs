use super::{HarnessError, RecordType};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// TTL used when a definition does not set one.
pub const DEFAULT_RECORD_TTL: u32 = 30;

/// One declared record set: a name, a kind, and its target values.
/// For address kinds the targets are IP literals; for TXT they are the
/// text strings served verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDefinition {
    pub name: Arc<str>,
    pub record_type: RecordType,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
}

impl RecordDefinition {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        targets: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            targets,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn effective_ttl(&self) -> u32 {
        self.ttl.unwrap_or(DEFAULT_RECORD_TTL)
    }

    /// Admission-level validation: the declared name must be a
    /// syntactically plausible domain name. Target values are NOT
    /// validated here — a definition with garbage address targets is
    /// admitted and breaks only at serving time.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.name.is_empty() {
            return Err(HarnessError::AdmissionRejected(
                "record name is empty".to_string(),
            ));
        }
        if self.name.len() > 253 {
            return Err(HarnessError::AdmissionRejected(format!(
                "record name '{}' exceeds 253 octets",
                self.name
            )));
        }
        for label in self.name.trim_end_matches('.').split('.') {
            if label.is_empty() || label.len() > 63 {
                return Err(HarnessError::AdmissionRejected(format!(
                    "record name '{}' has an invalid label",
                    self.name
                )));
            }
            if !label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(HarnessError::AdmissionRejected(format!(
                    "record name '{}' contains invalid characters",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Parse address targets. `Err` means the definition is
    /// malformed-by-design: admitted, but unservable.
    pub fn parsed_addresses(&self) -> Result<Vec<IpAddr>, HarnessError> {
        self.targets
            .iter()
            .map(|target| {
                target.parse::<IpAddr>().map_err(|_| {
                    HarnessError::InvalidDomainName(format!(
                        "target '{}' of '{}' is not an IP address",
                        target, self.name
                    ))
                })
            })
            .collect()
    }
}

/// A named declarative record-set document, the unit of apply/remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSet {
    pub name: String,
    pub records: Vec<RecordDefinition>,
}

impl DefinitionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: RecordDefinition) -> Self {
        self.records.push(record);
        self
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.name.is_empty() {
            return Err(HarnessError::AdmissionRejected(
                "definition set has no name".to_string(),
            ));
        }
        for record in &self.records {
            record.validate()?;
        }
        Ok(())
    }
}
