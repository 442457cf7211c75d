use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::ConfigStore;

/// Stores the configuration as a file on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigStore for JsonFileStore {
    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no config at {}", self.path.display());
                Ok(None)
            }
            Err(err) => {
                Err(err).with_context(|| format!("cannot read {}", self.path.display()))
            }
        }
    }

    async fn write(&self, contents: &str) -> Result<()> {
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("cannot write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use std::path::Path;
    use tempfile::TempDir;

    fn store_in(dir: &Path) -> JsonFileStore {
        JsonFileStore::new(dir.join(CONFIG_FILE_NAME))
    }

    #[tokio::test]
    async fn absent_file_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_overwrites_whole_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(temp.path());

        store.write("{\"exclude\": [\"a\", \"b\"]}").await.unwrap();
        store.write("{}").await.unwrap();
        assert_eq!(store.read().await.unwrap().as_deref(), Some("{}"));
        assert_eq!(
            std::fs::read_to_string(temp.path().join(".tree.json")).unwrap(),
            "{}"
        );
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp.path().join("missing"));

        let err = store.write("{}").await.unwrap_err();
        assert!(format!("{err:#}").contains(".tree.json"));
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".tree.json")).unwrap();
        let store = store_in(temp.path());

        assert!(store.read().await.is_err());
    }
}
