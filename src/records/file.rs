//! JSON file persistence for [`RecordSet`][super::RecordSet].
use crate::error::Error;
use crate::records::{Record, RecordSet};
use std::net::IpAddr;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

impl RecordSet {
    /// Load a [`RecordSet`] from the JSON record file at the given path, or return an Error.
    ///
    /// Entries that can never be served as configured are logged but kept, so that file order
    /// (and with it first-match-wins) is preserved exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read.
    ///
    /// Returns [`Error::InvalidJSON`] if the file isn't a valid record document.
    pub async fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let mut f = File::open(p.as_ref()).await?;
        let mut buf = vec![];
        f.read_to_end(&mut buf).await?;

        let set: RecordSet = serde_json::from_slice(&buf)?;
        set.warn_unservable();
        tracing::debug!(
            "loaded {} record(s) from {}",
            set.len(),
            p.as_ref().display()
        );
        Ok(set)
    }

    /// Save the record set as pretty JSON to the given path, or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if a record can't be serialized to JSON.
    ///
    /// Returns [`Error::IO`] if the serialized record set can't be written to the path.
    pub async fn save(&self, p: impl AsRef<Path>) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(self)?;
        let mut output_file = File::create(p).await?;
        output_file.write_all(data.as_bytes()).await?;
        output_file.flush().await?;
        Ok(())
    }

    fn warn_unservable(&self) {
        for (record, problem) in self.unservable() {
            match problem {
                Unservable::MissingTrailingDot => tracing::warn!(
                    "hostname \"{}\" has no trailing dot and will not match queries from the wire",
                    record.hostname
                ),
                Unservable::InvalidAddress => tracing::warn!(
                    "address {:?} for \"{}\" is not a valid IP, queries for it will be dropped",
                    record.address,
                    record.hostname
                ),
            }
        }
    }

    /// Records, in file order, that can never produce an answer as configured.
    fn unservable(&self) -> Vec<(&Record, Unservable)> {
        let mut found = Vec::new();
        for record in self.iter() {
            if !record.hostname.ends_with('.') {
                found.push((record, Unservable::MissingTrailingDot));
            }
            if record.address.parse::<IpAddr>().is_err() {
                found.push((record, Unservable::InvalidAddress));
            }
        }
        found
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unservable {
    MissingTrailingDot,
    InvalidAddress,
}

#[cfg(test)]
mod tests {
    use super::Unservable;
    use crate::error::Error;
    use crate::records::{Record, RecordSet};

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dns_records.json");
        let set = RecordSet::from(vec![
            Record::new("dup.example.com.", "192.0.2.1"),
            Record::new("dup.example.com.", "192.0.2.2"),
            Record::new("bad.example.com.", "not-an-ip"),
        ]);

        set.save(&path).await.unwrap();
        let loaded = RecordSet::try_from_file(&path).await.unwrap();

        assert_eq!(loaded, set);
        assert_eq!(
            loaded.find_by_name("dup.example.com.").unwrap().address,
            "192.0.2.1"
        );
    }

    #[tokio::test]
    async fn saved_file_uses_ip_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dns_records.json");
        RecordSet::from(vec![Record::new("example.com.", "93.184.216.34")])
            .save(&path)
            .await
            .unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["records"][0]["hostname"], "example.com.");
        assert_eq!(doc["records"][0]["ip"], "93.184.216.34");
    }

    #[tokio::test]
    async fn unservable_records_are_kept_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dns_records.json");
        tokio::fs::write(
            &path,
            r#"{"records": [
                {"hostname": "dotless.example.com", "ip": "192.0.2.1"},
                {"hostname": "bad.example.com.", "ip": "192.0.2"},
                {"hostname": "good.example.com.", "ip": "192.0.2.3"}
            ]}"#,
        )
        .await
        .unwrap();

        let loaded = RecordSet::try_from_file(&path).await.unwrap();
        let expected = vec![
            Record::new("dotless.example.com", "192.0.2.1"),
            Record::new("bad.example.com.", "192.0.2"),
            Record::new("good.example.com.", "192.0.2.3"),
        ];
        assert_eq!(loaded.iter().cloned().collect::<Vec<_>>(), expected);
        assert_eq!(
            loaded.unservable(),
            vec![
                (&expected[0], Unservable::MissingTrailingDot),
                (&expected[1], Unservable::InvalidAddress),
            ]
        );

        loaded.save(&path).await.unwrap();
        let reloaded = RecordSet::try_from_file(&path).await.unwrap();
        assert_eq!(reloaded, loaded);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordSet::try_from_file(dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IO(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dns_records.json");
        tokio::fs::write(&path, "records:\n  - hostname: example.com.\n")
            .await
            .unwrap();

        let err = RecordSet::try_from_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::InvalidJSON(_)));
    }
}
