use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::ConfigStore;

/// Configuration kept in memory, with injectable read and write failures.
#[derive(Clone, Default)]
pub struct MockConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    contents: Option<String>,
    read_error: Option<String>,
    write_error: Option<String>,
    writes: usize,
}

impl MockConfigStore {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::default();
        store.inner.lock().expect("mock store lock").contents = Some(contents.into());
        store
    }

    pub fn fail_reads(&self, message: impl Into<String>) {
        self.inner.lock().expect("mock store lock").read_error = Some(message.into());
    }

    pub fn fail_writes(&self, message: impl Into<String>) {
        self.inner.lock().expect("mock store lock").write_error = Some(message.into());
    }

    pub fn contents(&self) -> Option<String> {
        self.inner.lock().expect("mock store lock").contents.clone()
    }

    /// Attempted writes, including failed ones.
    pub fn write_count(&self) -> usize {
        self.inner.lock().expect("mock store lock").writes
    }
}

#[async_trait]
impl ConfigStore for MockConfigStore {
    async fn read(&self) -> Result<Option<String>> {
        let inner = self.inner.lock().expect("mock store lock");
        match &inner.read_error {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(inner.contents.clone()),
        }
    }

    async fn write(&self, contents: &str) -> Result<()> {
        let mut inner = self.inner.lock().expect("mock store lock");
        inner.writes += 1;
        if let Some(message) = &inner.write_error {
            return Err(anyhow!("{message}"));
        }
        inner.contents = Some(contents.to_owned());
        Ok(())
    }
}
