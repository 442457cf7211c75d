use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::models::{EntryKind, FsEntry};

use super::FileSystem;

#[derive(Clone, Debug)]
enum Listing {
    Entries(Vec<FsEntry>),
    Failure(String),
}

/// In-memory directory listings keyed by path, recording every lookup.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    listings: HashMap<PathBuf, Listing>,
    calls: Vec<PathBuf>,
}

impl MockFileSystem {
    /// Registers `dir` with children given as `(name, kind)`; paths are `dir/name`.
    pub fn add_dir(&self, dir: impl AsRef<Path>, children: &[(&str, EntryKind)]) {
        let dir = dir.as_ref();
        let entries = children
            .iter()
            .map(|(name, kind)| FsEntry::new(dir.join(name), *name, *kind))
            .collect();
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .listings
            .insert(dir.to_path_buf(), Listing::Entries(entries));
    }

    pub fn fail_dir(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .listings
            .insert(dir.into(), Listing::Failure(message.into()));
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());

        match inner.listings.get(dir) {
            Some(Listing::Entries(entries)) => Ok(entries.clone()),
            Some(Listing::Failure(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no such directory: {}", dir.display())),
        }
    }
}
