use chrono::{DateTime, Utc};

use crate::core::Mode;

/// Read-only description of a node, as returned by `stat`.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    name: String,
    len: u64,
    is_dir: bool,
    mode: Mode,
    modified: DateTime<Utc>,
}

impl Metadata {
    pub(crate) fn new(name: &str, len: u64, is_dir: bool, mode: Mode) -> Metadata {
        Metadata {
            name: name.to_string(),
            len,
            is_dir,
            mode,
            modified: Utc::now(),
        }
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data length in bytes; 0 for a directory.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Modification times are not tracked; this is the moment the metadata was taken.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}
