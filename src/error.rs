//! Error types.

use std::net::AddrParseError;
use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible Host Crab error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a query matches a [`Record`][crate::records::Record] whose configured
    /// address isn't a valid IPv4 or IPv6 literal.
    ///
    /// This only affects the query that matched the record: the
    /// [DNS listener][crate::dns] logs it and drops that one request.
    #[error("invalid address {address:?} configured for \"{hostname}\"")]
    InvalidAddress {
        hostname: String,
        address: String,
        #[source]
        source: AddrParseError,
    },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g. when
    /// [trying to load a `Config`][crate::config::Config::try_from_file], or
    /// [trying to load a `RecordSet`][crate::records::RecordSet::try_from_file]) fails
    /// due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when a datagram can't be decoded as a DNS message, or a response can't be
    /// encoded. The [DNS listener][crate::dns] logs it and drops that one request.
    #[error("DNS error: {0}")]
    DNSError(#[from] ProtoError),
}
