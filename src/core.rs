use std::fmt::Debug;

use bitflags::bitflags;

use crate::error::{FileError, PathError};
use crate::vfs::Metadata;

/// Result of a handle operation.
pub type Result<T> = std::result::Result<T, FileError>;

/// Result of a file system operation.
pub type FsResult<T> = std::result::Result<T, PathError>;

/// A handle as returned by `MemFS`, with its access-mode wrapper already applied.
pub type FileHandle = Box<dyn File>;

/// Permission and type bits. Stored on every node, never enforced.
pub type Mode = u32;

/// Initial capacity of a freshly created file buffer.
pub const INITIAL_DATA_SIZE: usize = 512;

/// Mode used by `create`.
pub const CREATE_DEFAULT_MODE: Mode = 0o666;

bitflags! {
    /// Open-mode directives accepted by `open_file`.
    ///
    /// At most one of `READ_ONLY`, `WRITE_ONLY` and `READ_WRITE` is meaningful per call.
    /// `READ_ONLY` is the empty set, so a plain `OpenFlags::empty()` opens for reading.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        const WRITE_ONLY = 0o1;
        const READ_WRITE = 0o2;
        /// Create the file if it does not exist.
        const CREATE = 0o100;
        /// Replace an existing file with an empty one. Only honoured together with `CREATE`.
        const TRUNC = 0o1000;
        /// Position the cursor at end of data on open.
        const APPEND = 0o2000;
    }
}

impl OpenFlags {
    pub const READ_ONLY: OpenFlags = OpenFlags::empty();
}

/// Reference point of a seek.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

impl TryFrom<i32> for Whence {
    type Error = FileError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            _ => Err(FileError::InvalidWhence),
        }
    }
}

/// What a successful `read` produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were copied into the destination.
    Bytes(usize),
    /// The cursor was already at (or past) the end of data. Nothing was copied.
    EndOfData,
}

impl ReadOutcome {
    /// Number of bytes copied, `0` on end of data.
    pub fn count(self) -> usize {
        match self {
            ReadOutcome::Bytes(n) => n,
            ReadOutcome::EndOfData => 0,
        }
    }

    pub fn is_end(self) -> bool {
        self == ReadOutcome::EndOfData
    }
}

/// The capability set of an open file.
///
/// Implemented by the bare in-memory handle and by the permission wrappers around it, so
/// wrappers compose over any `File`.
pub trait File: Debug {
    /// Copies bytes from the current offset into `buf` and advances the offset.
    fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome>;

    /// Writes all of `buf` at the current offset, growing the file if needed.
    /// Either every byte is written or none is.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Moves the cursor. The target must lie within `0..=len`.
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64>;

    /// Same as `seek`, with the whence given as a raw `0`/`1`/`2`.
    fn seek_raw(&mut self, offset: i64, whence: i32) -> Result<i64> {
        let whence = Whence::try_from(whence)?;
        self.seek(offset, whence)
    }

    fn close(&mut self) -> Result<()>;

    /// Full path the handle was opened with.
    fn name(&self) -> &str;
}

impl<F: File + ?Sized> File for Box<F> {
    fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        (**self).seek(offset, whence)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// The capability set of a file system.
pub trait FsBackend {
    type File: File;

    /// Creates a single directory. The parent must already exist.
    fn mkdir<P: AsRef<str>>(&mut self, path: P, mode: Mode) -> FsResult<()>;

    /// Creates (or truncates) a file and opens it read-write.
    fn create<P: AsRef<str>>(&mut self, path: P) -> FsResult<Self::File>;

    /// Opens an existing file read-only.
    fn open<P: AsRef<str>>(&mut self, path: P) -> FsResult<Self::File> {
        self.open_file(path, OpenFlags::READ_ONLY, 0)
    }

    fn open_file<P: AsRef<str>>(
        &mut self,
        path: P,
        flags: OpenFlags,
        mode: Mode,
    ) -> FsResult<Self::File>;

    fn stat<P: AsRef<str>>(&self, path: P) -> FsResult<Metadata>;
}

/// Tunables of a `MemFS`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemFsOptions {
    /// Capacity reserved for every new file buffer.
    pub initial_capacity: usize,
    /// Mode given to files made by `create`.
    pub create_mode: Mode,
}

impl Default for MemFsOptions {
    fn default() -> Self {
        MemFsOptions {
            initial_capacity: INITIAL_DATA_SIZE,
            create_mode: CREATE_DEFAULT_MODE,
        }
    }
}
