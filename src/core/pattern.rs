use std::collections::HashSet;

use anyhow::{Context, bail};
use regex::{Regex, RegexSet};

/// Exclusion globs compiled for matching against bare entry names.
/// Literal names take a hash-set fast path; wildcard patterns share one `RegexSet`.
#[derive(Clone, Debug, Default)]
pub struct CompiledPatterns {
    exact_matches: HashSet<String>,
    regex_set: Option<RegexSet>,
}

impl CompiledPatterns {
    /// Compiles every non-blank pattern. Run [`CompiledPatterns::validate`]
    /// first to find out which pattern is at fault.
    pub fn new<I, S>(patterns: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exact_matches = HashSet::new();
        let mut regex_patterns = Vec::new();

        for pattern in patterns {
            let p = pattern.as_ref().trim();
            if p.is_empty() {
                continue;
            }

            if has_glob_syntax(p) {
                regex_patterns.push(glob_to_regex(p)?);
            } else {
                exact_matches.insert(p.to_owned());
            }
        }

        let regex_set = if regex_patterns.is_empty() {
            None
        } else {
            Some(RegexSet::new(&regex_patterns).context("cannot compile exclude patterns")?)
        };

        Ok(Self {
            exact_matches,
            regex_set,
        })
    }

    /// Fails when `pattern` could not be compiled by [`CompiledPatterns::new`].
    pub fn validate(pattern: &str) -> anyhow::Result<()> {
        let p = pattern.trim();
        if has_glob_syntax(p) {
            Regex::new(&glob_to_regex(p)?)
                .with_context(|| format!("invalid exclude pattern `{p}`"))?;
        }
        Ok(())
    }

    /// True when `name` matches any pattern.
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        if self.exact_matches.contains(name) {
            return true;
        }

        match self.regex_set {
            Some(ref regex_set) => regex_set.is_match(name),
            None => false,
        }
    }
}

fn has_glob_syntax(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{', '(', '\\'])
}

#[derive(Clone, Copy)]
enum Group {
    Brace,
    /// Extglob `?(..)`, `*(..)`, `+(..)` or `@(..)`, holding its regex closer.
    Extglob(&'static str),
}

impl Group {
    fn closer(self) -> &'static str {
        match self {
            Group::Brace => ")",
            Group::Extglob(closer) => closer,
        }
    }
}

/// Translates a glob into an anchored regex.
///
/// Supports `*`, `?`, classes (`[abc]`, `[a-z]`, `[!abc]`, `[^abc]`), brace
/// alternation (`{a,b}`), extglob groups (`@(a|b)`, `?(..)`, `*(..)`, `+(..)`)
/// and `\` escapes. A `[`, `{` or `(` without a closer is a literal character.
/// Negated extglobs (`!(..)`) have no regex equivalent and are rejected.
fn glob_to_regex(pattern: &str) -> anyhow::Result<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 6);
    let mut groups: Vec<Group> = Vec::new();
    let mut i = 0;

    out.push_str("(?s)^");
    while i < chars.len() {
        let c = chars[i];
        let opens_group = chars.get(i + 1) == Some(&'(') && group_closes(&chars, i + 1, '(', ')');
        match c {
            '!' if opens_group => {
                bail!("invalid exclude pattern `{pattern}`: `!(...)` groups are not supported");
            }
            '?' | '*' | '+' | '@' if opens_group => {
                out.push_str("(?:");
                groups.push(Group::Extglob(match c {
                    '?' => ")?",
                    '*' => ")*",
                    '+' => ")+",
                    _ => ")",
                }));
                i += 1;
            }
            '*' => {
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&chars[i + 1..end], &mut out);
                    i = end;
                }
                None => push_literal(&mut out, c),
            },
            '{' if group_closes(&chars, i, '{', '}') => {
                out.push_str("(?:");
                groups.push(Group::Brace);
            }
            ',' if matches!(groups.last(), Some(Group::Brace)) => out.push('|'),
            '|' if matches!(groups.last(), Some(Group::Extglob(_))) => out.push('|'),
            '}' if matches!(groups.last(), Some(Group::Brace)) => {
                groups.pop();
                out.push(')');
            }
            ')' if matches!(groups.last(), Some(Group::Extglob(_))) => {
                if let Some(group) = groups.pop() {
                    out.push_str(group.closer());
                }
            }
            '\\' => {
                // A trailing backslash stands for itself.
                let escaped = chars.get(i + 1).copied().unwrap_or('\\');
                if i + 1 < chars.len() {
                    i += 1;
                }
                push_literal(&mut out, escaped);
            }
            _ => push_literal(&mut out, c),
        }
        i += 1;
    }

    // Interleaved groups like `{a(b}c)` can leave one open.
    while let Some(group) = groups.pop() {
        out.push_str(group.closer());
    }

    out.push('$');
    Ok(out)
}

/// Whether the bracket at `chars[start] == open` has a matching `close`.
fn group_closes(chars: &[char], start: usize, open: char, close: char) -> bool {
    let mut depth = 0usize;
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return true;
                }
            }
            _ => {}
        }
        i += 1;
    }
    false
}

/// Index of the `]` closing the class opened at `chars[start] == '['`.
/// A `]` directly after the opening bracket (or its `!`/`^`) is a member.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if matches!(chars.get(i), Some('!') | Some('^')) {
        i += 1;
    }
    let body_start = i;
    while i < chars.len() {
        if chars[i] == ']' && i > body_start {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Emits a regex class for the glob class body between the brackets.
fn push_class(body: &[char], out: &mut String) {
    let mut members = body;
    out.push('[');
    if let Some(('!' | '^', rest)) = body.split_first() {
        out.push('^');
        members = rest;
    }
    for &c in members {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(']');
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
