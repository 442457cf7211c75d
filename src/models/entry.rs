use std::path::PathBuf;

/// What a directory entry is, as reported without following symlinks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

impl EntryKind {
    /// Only real directories are descended into; symlinks stay leaves.
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

/// One raw entry from a directory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsEntry {
    pub path: PathBuf,
    /// Bare name: the final path component.
    pub name: String,
    pub kind: EntryKind,
}

impl FsEntry {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind,
        }
    }
}
