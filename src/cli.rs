use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::warn;

const CONFIG_HELP: &str = "\
Configuration:
  Exclusions are persisted in `.tree.json` in the current directory:

    {
      \"exclude\": [\"node_modules\", \"dist\", \"*.log\"]
    }

  The \"exclude\" field is a list of glob patterns matched against entry names
  and applied on every run. Patterns given with --exclude are merged into it.

Examples:
  ptree --depth 2
  ptree --dirs-only
  ptree --exclude node_modules,dist
  ptree some/directory --depth 3";

#[derive(Parser, Debug)]
#[command(name = "ptree", version, disable_version_flag = true)]
#[command(about = "Print a directory as an indented tree, with persisted exclusions", long_about = None)]
#[command(after_help = CONFIG_HELP)]
pub struct Cli {
    /// Directory to print (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Depth limit for directory traversal; non-numeric values mean unlimited
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub depth: Option<String>,

    /// Show files as well as directories (the default)
    #[arg(long)]
    pub files_only: bool,

    /// Show directories only
    #[arg(long)]
    pub dirs_only: bool,

    /// Comma-separated glob patterns to exclude; saved to .tree.json
    #[arg(short, long, value_name = "PATTERNS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// `None` means unlimited.
    pub fn max_depth(&self) -> Option<usize> {
        let raw = self.depth.as_deref()?;
        let depth = parse_depth(raw);
        if depth.is_none() {
            warn!("--depth {raw:?} is not a number; depth is unlimited");
        }
        depth
    }

    pub fn show_files(&self) -> bool {
        !self.dirs_only
    }
}

/// Reads the leading integer of `raw`, ignoring anything after it.
///
/// Zero and negative depths still list the root's children, so they clamp to 1.
pub fn parse_depth(raw: &str) -> Option<usize> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_len];
    if digits.is_empty() {
        return None;
    }

    if negative {
        return Some(1);
    }
    let depth = digits.parse::<usize>().unwrap_or(usize::MAX);
    Some(depth.max(1))
}
