//! A volatile, in-process hierarchical file system for Rust.
//! Lets code written against a file-like API run in tests or sandboxes without touching disk.
//!
//! ### Overview
//!
//! `vfs-mem` keeps a directory tree in memory and hands out open-file handles that follow
//! POSIX-like open flags (`CREATE`, `TRUNC`, `APPEND`, read-only, write-only, read-write).
//! Nothing is persisted: the tree lives exactly as long as its `MemFS` value.
//!
//! **Key ideas**:
//! - **Shared buffers**: every handle opened on a file sees the same bytes. A write through
//!   one handle is visible to all others on that file.
//! - **Bounded seek**: the cursor always stays within `0..=len`; seeking past the end fails
//!   instead of extending the file.
//! - **Typed errors**: failures are one of a small fixed set of [`FileError`] kinds. File
//!   system operations wrap them into a [`PathError`] naming the operation and path.
//! - **End of data is not an error**: `read` reports [`ReadOutcome::EndOfData`].
//!
//! ### Example
//!
//! ```
//! use vfs_mem::{File, FsBackend, MemFS, OpenFlags};
//!
//! let mut fs = MemFS::new();
//! fs.mkdir("/tmp", 0o755).unwrap();
//!
//! let mut file = fs.create("/tmp/hello.txt").unwrap();
//! file.write(b"Hello world!").unwrap();
//!
//! let mut file = fs
//!     .open_file("/tmp/hello.txt", OpenFlags::APPEND | OpenFlags::READ_WRITE, 0)
//!     .unwrap();
//! file.write(b"Bye world").unwrap();
//!
//! assert_eq!(fs.read("/tmp/hello.txt").unwrap(), b"Hello world!Bye world");
//! ```

mod core;
mod error;
mod vfs;

pub use crate::core::{
    CREATE_DEFAULT_MODE, File, FileHandle, FsBackend, FsResult, INITIAL_DATA_SIZE, MemFsOptions,
    Mode, OpenFlags, ReadOutcome, Result, Whence,
};
pub use error::{FileError, Op, PathError};
pub use vfs::{
    Buffer, MemFS, MemFile, Metadata, Node, NodeKind, PATH_SEPARATOR, ReadOnlyFile, Resolved,
    SharedBuffer, WriteOnlyFile,
};
