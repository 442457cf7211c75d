use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::FileType;
use std::path::Path;
use tokio::task;
use tracing::warn;

use crate::models::{EntryKind, FsEntry};

use super::FileSystem;

/// Lists directories on the local disk.
pub struct RealFileSystem;

fn kind_of(file_type: FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let reader = std::fs::read_dir(&dir)
                .with_context(|| format!("cannot read directory {}", dir.display()))?;

            let mut entries = Vec::new();
            for entry in reader {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!("skipping entry in {}: {err}", dir.display());
                        continue;
                    }
                };
                // An entry whose type cannot be determined is still listed, as a leaf.
                let kind = entry.file_type().map(kind_of).unwrap_or(EntryKind::Other);
                entries.push(FsEntry::new(
                    entry.path(),
                    entry.file_name().to_string_lossy(),
                    kind,
                ));
            }
            Ok(entries)
        })
        .await?
    }
}
