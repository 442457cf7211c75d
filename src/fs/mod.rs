mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::models::FsEntry;

/// Source of directory listings for the walker.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Returns the immediate entries of `dir`, in no particular order.
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>>;
}
