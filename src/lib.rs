pub mod cli;
pub mod config;
pub mod core;
pub mod fs;
pub mod models;

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::config::ConfigStore;
use crate::core::{CompiledPatterns, WalkOptions, walk_dir};
use crate::fs::FileSystem;

/// Persists any new excludes, then walks `cli.path` and writes the tree to `out`.
///
/// Unreadable directories and config problems are logged, not returned.
/// Errors are limited to malformed `--exclude` globs and a failing `out`.
pub async fn run<F, S, W>(cli: &Cli, fs: &F, store: &S, out: &mut W) -> Result<()>
where
    F: FileSystem,
    S: ConfigStore,
    W: Write,
{
    for pattern in &cli.exclude {
        CompiledPatterns::validate(pattern).context("rejected --exclude")?;
    }

    let excludes: Vec<String> = config::apply_cli_excludes(store, &cli.exclude)
        .await
        .into_iter()
        .filter(|pattern| match CompiledPatterns::validate(pattern) {
            Ok(()) => true,
            Err(err) => {
                warn!("skipping stored pattern: {err:#}");
                false
            }
        })
        .collect();
    debug!("active excludes: {excludes:?}");

    let options = WalkOptions {
        max_depth: cli.max_depth(),
        show_files: cli.show_files(),
        patterns: CompiledPatterns::new(&excludes)?,
    };

    walk_dir(fs, &cli.path, &options, out)
        .await
        .and_then(|()| out.flush())
        .context("cannot write tree")
}

/// True when `err` comes from the reader of our output going away, as with `| head`.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}
