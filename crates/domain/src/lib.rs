//! dnscheck Domain Layer
pub mod answer;
pub mod config;
pub mod definition;
pub mod errors;
pub mod expectation;
pub mod probe;
pub mod record_type;

pub use answer::{AnswerRecord, ProbeResponse, ResponseStatus};
pub use config::{CliOverrides, ConfigError, HarnessConfig};
pub use definition::{DefinitionSet, RecordDefinition, DEFAULT_RECORD_TTL};
pub use errors::HarnessError;
pub use expectation::{Expectation, ResponseExpectation};
pub use probe::ProbeQuery;
pub use record_type::RecordType;
