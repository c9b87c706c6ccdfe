//! Host Crab
//!
//! A very minimal authoritative DNS server answering address queries for a static list of
//! hostnames.
//!
//! Records are loaded from a JSON file at startup into an immutable [`RecordSet`], served over
//! UDP by the [DNS server][crate::dns], and can be reloaded at runtime without interrupting
//! lookups already in flight.
//!
#![warn(clippy::pedantic)]

pub mod config;
pub mod dns;
pub mod error;
pub mod records;

pub use config::{Config, SharedConfig};
pub use dns::new as new_dns;
pub use dns::Resolver;
pub use records::{Record, RecordSet, SharedRecords};
