//! On-disk persistence of holiday listings
//!
//! Each listing is written to `<data_dir>/<c1>_<c2>_..._holidays.json`,
//! pretty-printed with four-space indentation and non-ASCII text kept as-is.
//! Files are written to a temporary sibling and renamed into place, so a
//! reader never observes a partially written listing.

use crate::constants::{HOLIDAYS_FILE_SUFFIX, JSON_INDENT};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write-only sink for rendered holiday listings
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the listing file for a list of country codes
    pub fn file_path(&self, countries: &[String]) -> PathBuf {
        self.data_dir
            .join(format!("{}{}", countries.join("_"), HOLIDAYS_FILE_SUFFIX))
    }

    /// Persist a rendered listing, returning the path written
    pub async fn save(&self, countries: &[String], listing: &serde_json::Value) -> Result<PathBuf> {
        let contents = to_pretty_json(listing)?;
        let data_dir = self.data_dir.clone();
        let path = self.file_path(countries);

        let written =
            tokio::task::spawn_blocking(move || write_atomically(&data_dir, &path, &contents))
                .await
                .map_err(|e| Error::unexpected(format!("Persistence task failed: {}", e)))??;

        info!("Saved holidays to {}", written.display());
        Ok(written)
    }
}

fn to_pretty_json(listing: &serde_json::Value) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    listing.serialize(&mut serializer)?;
    Ok(buffer)
}

fn write_atomically(data_dir: &Path, path: &Path, contents: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(data_dir).map_err(|e| {
        Error::persistence(
            format!("Failed to create data directory '{}'", data_dir.display()),
            e,
        )
    })?;

    let mut temp_file = NamedTempFile::new_in(data_dir).map_err(|e| {
        Error::persistence(
            format!("Failed to create temporary file in '{}'", data_dir.display()),
            e,
        )
    })?;
    temp_file
        .write_all(contents)
        .and_then(|_| temp_file.flush())
        .map_err(|e| Error::persistence(format!("Failed to write '{}'", path.display()), e))?;

    temp_file.persist(path).map_err(|e| {
        Error::persistence(format!("Failed to move listing to '{}'", path.display()), e.error)
    })?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_file_path_joins_country_codes() {
        let store = JsonFileStore::new("/data");
        let path = store.file_path(&["UA".to_string(), "FR".to_string()]);
        assert_eq!(path, PathBuf::from("/data/UA_FR_holidays.json"));
    }

    #[tokio::test]
    async fn test_save_writes_pretty_utf8_json() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("nested").join("data"));
        let listing = json!({ "UA": [{ "name": "День Незалежності" }] });

        let path = store.save(&["UA".to_string()], &listing).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("День Незалежності"));
        assert!(written.contains("\n    \"UA\": ["));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, listing);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_listing() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        let countries = vec!["FR".to_string()];

        store.save(&countries, &json!({ "FR": [1] })).await.unwrap();
        let path = store.save(&countries, &json!({ "FR": [] })).await.unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed, json!({ "FR": [] }));

        // Only the listing itself remains, no temporary files
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way").unwrap();

        let store = JsonFileStore::new(blocker.join("data"));
        let err = store
            .save(&["UA".to_string()], &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
    }
}
