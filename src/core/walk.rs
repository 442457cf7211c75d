use std::cmp::Ordering;
use std::io::{self, Write};
use std::path::Path;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use tracing::{debug, error, warn};

use super::CompiledPatterns;
use super::render::{child_prefix, write_line};
use crate::fs::FileSystem;
use crate::models::FsEntry;

/// Configuration options for directory traversal.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Levels to descend below the root; `Some(1)` lists only the root's children.
    pub max_depth: Option<usize>,
    /// When false only directories are kept.
    pub show_files: bool,
    /// Entries whose bare name matches are dropped along with their subtree.
    pub patterns: CompiledPatterns,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_files: true,
            patterns: CompiledPatterns::default(),
        }
    }
}

/// Walk a directory tree, writing each visible entry to `out` as soon as it is listed.
///
/// Listing failures never abort the walk: they are logged and the failing
/// directory simply has no lines beneath its own. Only write errors are returned.
pub async fn walk_dir<F, W>(fs: &F, dir: &Path, options: &WalkOptions, out: &mut W) -> io::Result<()>
where
    F: FileSystem,
    W: Write,
{
    walk_dir_internal(fs, dir, options, 0, "", out).await
}

async fn walk_dir_internal<F, W>(
    fs: &F,
    dir: &Path,
    options: &WalkOptions,
    current_depth: usize,
    prefix: &str,
    out: &mut W,
) -> io::Result<()>
where
    F: FileSystem,
    W: Write,
{
    let mut entries = match fs.read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) => {
            error!("{err:#}");
            return Ok(());
        }
    };

    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    let visible: Vec<FsEntry> = entries
        .into_iter()
        .filter(|entry| is_visible(entry, options))
        .collect();

    for (index, entry) in visible.iter().enumerate() {
        let is_last = index + 1 == visible.len();
        write_line(out, prefix, &entry.name, is_last)?;

        // --depth 1 means "show 1 level of children", so depth 0 does not recurse.
        let should_recurse = entry.kind.is_dir()
            && match options.max_depth {
                Some(max) => current_depth + 1 < max,
                None => true,
            };

        if should_recurse {
            let nested = child_prefix(prefix, is_last);
            Box::pin(walk_dir_internal(
                fs,
                &entry.path,
                options,
                current_depth + 1,
                &nested,
                out,
            ))
            .await?;
        }
    }

    Ok(())
}

fn is_visible(entry: &FsEntry, options: &WalkOptions) -> bool {
    if options.patterns.matches(&entry.name) {
        debug!("excluded {}", entry.path.display());
        return false;
    }

    options.show_files || entry.kind.is_dir()
}

thread_local! {
    static COLLATOR: Option<CollatorBorrowed<'static>> = {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Tertiary);
        match Collator::try_new(Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!("no collation data, sorting by code point: {err}");
                None
            }
        }
    };
}

/// Sibling order: Unicode root collation (punctuation, then digits, then
/// letters with accents and case as secondary and tertiary differences),
/// falling back to code points so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}
