//! Error kinds returned by the in-memory file system.
//!
//! Handle operations (`read`, `write`, `seek`) return a bare [`FileError`]. File system
//! operations (`mkdir`, `open_file`, `stat`, ...) wrap the kind into a [`PathError`] carrying the
//! attempted operation and the path it was attempted on.

use std::fmt;
use std::io;

use thiserror::Error;

/// The fixed set of failure conditions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("read-only file")]
    ReadOnly,
    #[error("write-only file")]
    WriteOnly,
    #[error("file too large")]
    TooLarge,
    #[error("negative seek offset")]
    NegativeSeek,
    #[error("invalid seek whence")]
    InvalidWhence,
    #[error("seek offset past end of data")]
    TooFar,
    #[error("file does not exist")]
    NotExist,
    #[error("file already exists")]
    Exist,
    #[error("file is a directory")]
    IsDirectory,
}

impl From<FileError> for io::Error {
    fn from(err: FileError) -> io::Error {
        let kind = match err {
            FileError::ReadOnly | FileError::WriteOnly => io::ErrorKind::PermissionDenied,
            FileError::TooLarge => io::ErrorKind::OutOfMemory,
            FileError::NegativeSeek | FileError::InvalidWhence | FileError::TooFar => {
                io::ErrorKind::InvalidInput
            }
            FileError::NotExist => io::ErrorKind::NotFound,
            FileError::Exist => io::ErrorKind::AlreadyExists,
            FileError::IsDirectory => io::ErrorKind::IsADirectory,
        };
        io::Error::new(kind, err)
    }
}

/// The file system operation that failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
    Mkdir,
    Open,
    Stat,
    ReadDir,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Mkdir => write!(f, "mkdir"),
            Op::Open => write!(f, "open"),
            Op::Stat => write!(f, "stat"),
            Op::ReadDir => write!(f, "readdir"),
        }
    }
}

/// A [`FileError`] annotated with the operation and the path that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{op} {path}: {kind}")]
pub struct PathError {
    pub op: Op,
    pub path: String,
    #[source]
    pub kind: FileError,
}

impl PathError {
    pub fn new<S: Into<String>>(op: Op, path: S, kind: FileError) -> Self {
        PathError {
            op,
            path: path.into(),
            kind,
        }
    }

    pub fn kind(&self) -> FileError {
        self.kind
    }
}

impl From<PathError> for io::Error {
    fn from(err: PathError) -> io::Error {
        let kind = io::Error::from(err.kind).kind();
        io::Error::new(kind, err)
    }
}
