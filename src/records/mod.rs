//! Static hostname to address record storage.
//!
//! A [`RecordSet`] is an ordered list of [`Record`]s loaded once from disk (see [`file`]) and
//! never mutated afterwards. The [DNS listener][crate::dns] serves whichever set is currently
//! published in a [`SharedRecords`], which can be swapped for a freshly loaded set at runtime
//! without in-flight lookups ever observing a partial update.
//!
//! # Matching
//!
//! Hostnames are compared with exact, case-sensitive string equality against the query name as
//! rendered from the wire. Names decoded from the wire are always fully qualified, so a
//! configured hostname must carry the trailing dot to be served:
//!
//! ```json
//! {
//!   "records": [
//!     { "hostname": "example.com.", "ip": "93.184.216.34" },
//!     { "hostname": "example.com.", "ip": "192.0.2.1" }
//!   ]
//! }
//! ```
//!
//! When several records share a hostname the **first** one in file order is served, the rest
//! are shadowed.

use serde::{Deserialize, Serialize};

pub mod file;
pub mod shared;

pub use shared::SharedRecords;

/// A single static binding from a hostname to a textual IPv4 or IPv6 address.
///
/// The address is kept as written in the record file. It is only parsed when a query matches
/// the record, so one bad entry never prevents the rest of the set from being served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub hostname: String,
    #[serde(rename = "ip", alias = "address")]
    pub address: String,
}

impl Record {
    pub fn new(hostname: impl Into<String>, address: impl Into<String>) -> Self {
        Record {
            hostname: hostname.into(),
            address: address.into(),
        }
    }
}

/// The immutable, ordered collection of all [`Record`]s being served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct RecordSet {
    #[serde(default)]
    records: Vec<Record>,
}

impl RecordSet {
    /// Find the first record whose hostname equals `name` exactly.
    ///
    /// No normalization is applied: case and trailing dots must match.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.hostname == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        RecordSet { records }
    }
}
