use std::io::{self, Write};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const BLANK_INDENT: &str = "    ";

/// Writes one tree line: `prefix + marker + name`.
pub fn write_line<W: Write>(
    writer: &mut W,
    prefix: &str,
    name: &str,
    is_last: bool,
) -> io::Result<()> {
    let marker = if is_last { LAST_BRANCH } else { BRANCH };
    writeln!(writer, "{prefix}{marker}{name}")
}

/// Prefix for the children of an entry written with `prefix`.
pub fn child_prefix(prefix: &str, is_last: bool) -> String {
    let indent = if is_last { BLANK_INDENT } else { PIPE_INDENT };
    format!("{prefix}{indent}")
}
