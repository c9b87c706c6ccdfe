use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

pub type SharedConfig = Arc<Config>;

const DEFAULT_DNS_PORT: u16 = 53;
const DEFAULT_RECORDS_PATH: &str = "dns_records.json";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_dns_udp_bind_addr")]
    pub dns_udp_bind_addr: SocketAddr,
    #[serde(default = "default_records_path")]
    pub records_path: String,
}

fn default_dns_udp_bind_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_DNS_PORT)
}

fn default_records_path() -> String {
    DEFAULT_RECORDS_PATH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dns_udp_bind_addr: default_dns_udp_bind_addr(),
            records_path: default_records_path(),
        }
    }
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened, or [`Error::InvalidJSON`] if the
    /// contents aren't a valid config document.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let conf: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(conf, Config::default());
        assert_eq!(conf.dns_udp_bind_addr, "0.0.0.0:53".parse().unwrap());
        assert_eq!(conf.records_path, "dns_records.json");
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"dns_udp_bind_addr": "127.0.0.1:5353", "records_path": "/etc/hostcrab.json"}}"#
        )
        .unwrap();

        let conf = Config::try_from_file(f.path()).unwrap();
        assert_eq!(conf.dns_udp_bind_addr, "127.0.0.1:5353".parse().unwrap());
        assert_eq!(conf.records_path, "/etc/hostcrab.json");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::try_from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::IO(_)));
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"dns_udp_bind_addr": "not an addr"}}"#).unwrap();

        let err = Config::try_from_file(f.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidJSON(_)));
    }
}
