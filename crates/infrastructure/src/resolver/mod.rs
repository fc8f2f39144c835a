mod embedded;
mod store;

pub use embedded::EmbeddedResolver;
pub use store::{LookupOutcome, RecordStore, StoredData, StoredSet};
