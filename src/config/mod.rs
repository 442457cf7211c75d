//! Persisted exclusion patterns, stored as JSON in `.tree.json`.
//!
//! Every failure here is recoverable: a missing, unreadable or malformed file
//! loads as an empty configuration and a failed write only costs persistence.

mod json;

#[cfg(test)]
mod mock;

pub use json::JsonFileStore;

#[cfg(test)]
pub use mock::MockConfigStore;

use std::collections::HashSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

/// Name of the sidecar file, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = ".tree.json";

/// Raw storage for the configuration document.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns `None` when nothing has been stored yet.
    async fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored document in full.
    async fn write(&self, contents: &str) -> Result<()>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Keys this tool does not use; written back untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ExcludeConfig {
    fn parse(contents: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(contents).context("malformed exclude configuration")?;
        config.exclude = merge(&[], &config.exclude);
        Ok(config)
    }

    fn to_pretty_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Reads the stored configuration, falling back to an empty one on any failure.
pub async fn load<S: ConfigStore>(store: &S) -> ExcludeConfig {
    let contents = match store.read().await {
        Ok(Some(contents)) => contents,
        Ok(None) => return ExcludeConfig::default(),
        Err(err) => {
            error!("Error reading {CONFIG_FILE_NAME}: {err:#}");
            return ExcludeConfig::default();
        }
    };

    ExcludeConfig::parse(&contents).unwrap_or_else(|err| {
        error!("Error reading {CONFIG_FILE_NAME}: {err:#}");
        ExcludeConfig::default()
    })
}

/// Union of `existing` and `additions`, keeping first occurrences in order.
/// Additions are trimmed and blank ones dropped.
pub fn merge(existing: &[String], additions: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    existing
        .iter()
        .map(String::as_str)
        .chain(additions.iter().map(|p| p.trim()))
        .filter(|p| !p.is_empty() && seen.insert(*p))
        .map(str::to_owned)
        .collect()
}

/// Overwrites the stored configuration. Returns whether it was persisted.
pub async fn save<S: ConfigStore>(store: &S, config: &ExcludeConfig) -> bool {
    let result = match config.to_pretty_json() {
        Ok(json) => store.write(&json).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            error!("Error writing {CONFIG_FILE_NAME}: {err:#}");
            false
        }
    }
}

/// Loads the persisted patterns and folds `additions` into them.
///
/// When there are additions the merged configuration is saved exactly once.
/// The returned list applies to this run even if saving failed.
pub async fn apply_cli_excludes<S: ConfigStore>(store: &S, additions: &[String]) -> Vec<String> {
    let mut config = load(store).await;
    if additions.is_empty() {
        return config.exclude;
    }

    config.exclude = merge(&config.exclude, additions);
    if save(store, &config).await {
        info!(
            "Updated {CONFIG_FILE_NAME} with excludes: {}",
            additions.join(", ")
        );
    }
    config.exclude
}
