//! Static record DNS server.
//!
//! Host Crab answers queries over UDP for the hostnames in the loaded
//! [`RecordSet`][crate::records::RecordSet]. Only the first question of a query is looked at,
//! and only its name: the query type and class are not used for filtering.
//!
//! # Answers
//!
//! When the name matches a record, the response carries exactly one answer with a TTL of 300
//! seconds, class `IN`, and the record's address. IPv4 addresses are served as `A` records and
//! IPv6 addresses as `AAAA` records.
//!
//! E.g. with the record file:
//! ```json
//! {
//!   "records": [ { "hostname": "example.com.", "ip": "93.184.216.34" } ]
//! }
//! ```
//!
//! A query for `example.com` would return:
//!
//! ```bash
//! ❯ dig @127.0.0.1 -p 5353 example.com +short
//! 93.184.216.34
//! ```
//!
//! # Name errors
//!
//! Names without a record get an `NXDOMAIN` response with no answers. Matching is case
//! sensitive, so a query for `EXAMPLE.COM` gets `NXDOMAIN` even with the record above.
//!
//! # Dropped requests
//!
//! No response at all is sent for datagrams that don't decode, queries without a question, or
//! names whose configured address isn't a valid IP. Each of these is logged and only affects
//! the one request: clients are expected to time out and retry.

mod resolver;
pub mod server;

pub use resolver::{Resolver, ANSWER_TTL};
pub use server::new;
