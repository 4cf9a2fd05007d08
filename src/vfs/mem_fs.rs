//! This module provides a volatile file system kept entirely in process memory.

use log::debug;

use crate::core::{File, FileHandle, FsBackend, FsResult, Mode, MemFsOptions, OpenFlags, Whence};
use crate::error::{FileError, Op, PathError};
use crate::vfs::{MemFile, Metadata, Node, ReadOnlyFile, WriteOnlyFile};

/// Path separator. Every path handed to `MemFS` is absolute and starts with it.
pub const PATH_SEPARATOR: char = '/';

/// A file system whose directory tree lives in memory and disappears with the value.
///
/// ### Internal state
///
/// * `root` - the `/` directory. Every other node is reachable only by walking child maps down
///   from it; there are no parent links and no side index.
/// * `options` - buffer sizing and the default mode for `create`.
///
/// ### Paths
///
/// Paths are split on `/` literally. `"/"` names the root. Empty segments (`"//"`, a trailing
/// `/`) and relative paths never resolve. `.` and `..` are ordinary names.
///
/// ### Sharing
///
/// All handles opened on a file share its buffer, so data written through one handle is
/// immediately readable through every other. Truncating (`CREATE | TRUNC`) installs a new
/// buffer; handles opened before that keep the old one.
///
/// ### Thread Safety
///
/// Not thread-safe. Handles are `!Send` and the tree is mutated without locking.
///
/// ### Example
///
/// ```
/// use vfs_mem::{File, FsBackend, MemFS, ReadOutcome};
///
/// let mut fs = MemFS::new();
/// fs.mkdir("/docs", 0o755).unwrap();
///
/// let mut file = fs.create("/docs/note.txt").unwrap();
/// file.write(b"Hello").unwrap();
///
/// let mut file = fs.open("/docs/note.txt").unwrap();
/// let mut buf = [0u8; 16];
/// assert_eq!(file.read(&mut buf).unwrap(), ReadOutcome::Bytes(5));
/// assert_eq!(fs.stat("/docs/note.txt").unwrap().len(), 5);
/// ```
#[derive(Debug)]
pub struct MemFS {
    root: Node,
    options: MemFsOptions,
}

/// A path split into the directories to walk and the final name.
#[derive(Debug, PartialEq)]
enum Parsed<'a> {
    Root,
    Entry { dirs: Vec<&'a str>, leaf: &'a str },
}

/// Outcome of resolving a path: the directory holding the last segment and the node found
/// there, if any. Resolving `/` yields the root with no parent.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub parent: Option<&'a Node>,
    pub node: Option<&'a Node>,
}

fn parse(path: &str) -> Result<Parsed<'_>, FileError> {
    let rest = path
        .strip_prefix(PATH_SEPARATOR)
        .ok_or(FileError::NotExist)?;
    if rest.is_empty() {
        return Ok(Parsed::Root);
    }

    let mut segments: Vec<&str> = rest.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(FileError::NotExist);
    }

    // `rest` is non-empty, so there is at least one segment
    let leaf = segments.pop().unwrap_or_default();
    Ok(Parsed::Entry {
        dirs: segments,
        leaf,
    })
}

impl MemFS {
    /// Creates an empty file system holding only `/`.
    pub fn new() -> Self {
        Self::with_options(MemFsOptions::default())
    }

    pub fn with_options(options: MemFsOptions) -> Self {
        Self {
            root: Node::root(),
            options,
        }
    }

    pub fn options(&self) -> &MemFsOptions {
        &self.options
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Walks `dirs` from the root. Each segment must name an existing directory.
    fn walk(&self, dirs: &[&str]) -> Result<&Node, FileError> {
        let mut current = &self.root;
        for segment in dirs {
            current = match current.child(segment) {
                Some(node) if node.is_dir() => node,
                _ => return Err(FileError::NotExist),
            };
        }
        Ok(current)
    }

    fn walk_mut(&mut self, dirs: &[&str]) -> Result<&mut Node, FileError> {
        let mut current = &mut self.root;
        for segment in dirs {
            current = match current.children_mut().and_then(|c| c.get_mut(*segment)) {
                Some(node) if node.is_dir() => node,
                _ => return Err(FileError::NotExist),
            };
        }
        Ok(current)
    }

    /// Resolves `path` into its parent directory and the node it names.
    ///
    /// Fails with [`FileError::NotExist`] only when an intermediate segment is missing or is a
    /// file; a missing last segment is reported as `node: None`.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>, FileError> {
        match parse(path)? {
            Parsed::Root => Ok(Resolved {
                parent: None,
                node: Some(&self.root),
            }),
            Parsed::Entry { dirs, leaf } => {
                let parent = self.walk(&dirs)?;
                Ok(Resolved {
                    parent: Some(parent),
                    node: parent.child(leaf),
                })
            }
        }
    }

    fn lookup(&self, path: &str) -> Result<&Node, FileError> {
        self.resolve(path)?.node.ok_or(FileError::NotExist)
    }

    /// Checks if a `path` exists.
    pub fn exists<P: AsRef<str>>(&self, path: P) -> bool {
        self.lookup(path.as_ref()).is_ok()
    }

    /// Checks if `path` exists and is a directory.
    pub fn is_dir<P: AsRef<str>>(&self, path: P) -> bool {
        self.lookup(path.as_ref()).is_ok_and(Node::is_dir)
    }

    /// Checks if `path` exists and is a regular file.
    pub fn is_file<P: AsRef<str>>(&self, path: P) -> bool {
        self.lookup(path.as_ref()).is_ok_and(Node::is_file)
    }

    /// Returns the sorted names of the entries of directory `path`.
    pub fn ls<P: AsRef<str>>(&self, path: P) -> FsResult<Vec<String>> {
        let path = path.as_ref();
        let err = |kind| PathError::new(Op::ReadDir, path, kind);

        let children = self
            .lookup(path)
            .map_err(err)?
            .children()
            .ok_or_else(|| err(FileError::NotExist))?;
        Ok(children.keys().cloned().collect())
    }

    /// Reads the whole content of file `path` through a read-only handle.
    pub fn read<P: AsRef<str>>(&self, path: P) -> FsResult<Vec<u8>> {
        let path = path.as_ref();
        let err = |kind| PathError::new(Op::Open, path, kind);

        let node = self.lookup(path).map_err(err)?;
        let buffer = node.buffer().ok_or_else(|| err(FileError::IsDirectory))?;
        let mut file = ReadOnlyFile::new(MemFile::new(node.full_path(), buffer.clone()));

        let mut content = Vec::with_capacity(node.len() as usize);
        let mut chunk = [0u8; 4096];
        loop {
            let n = file.read(&mut chunk).map_err(err)?;
            if n.is_end() {
                break;
            }
            content.extend_from_slice(&chunk[..n.count()]);
        }
        Ok(content)
    }
}

impl Default for MemFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for MemFS {
    type File = FileHandle;

    /// Creates a directory at `path`.
    /// * The parent of `path` must already exist and be a directory.
    /// * Fails with `Exist` if anything already occupies `path`.
    fn mkdir<P: AsRef<str>>(&mut self, path: P, mode: Mode) -> FsResult<()> {
        let path = path.as_ref();
        let err = |kind| PathError::new(Op::Mkdir, path, kind);

        let (dirs, leaf) = match parse(path).map_err(err)? {
            Parsed::Root => return Err(err(FileError::Exist)),
            Parsed::Entry { dirs, leaf } => (dirs, leaf),
        };

        let parent = self.walk_mut(&dirs).map_err(err)?;
        let children = parent
            .children_mut()
            .ok_or_else(|| err(FileError::NotExist))?;
        if children.contains_key(leaf) {
            return Err(err(FileError::Exist));
        }

        children.insert(leaf.to_string(), Node::new_dir(leaf, path, mode));
        debug!("mkdir {} (mode {:o})", path, mode);
        Ok(())
    }

    fn create<P: AsRef<str>>(&mut self, path: P) -> FsResult<Self::File> {
        let mode = self.options.create_mode;
        self.open_file(
            path,
            OpenFlags::CREATE | OpenFlags::TRUNC | OpenFlags::READ_WRITE,
            mode,
        )
    }

    /// Opens `path` according to `flags`.
    ///
    /// * `CREATE` makes a new empty file. If the file exists, it is replaced when `TRUNC` is
    ///   also given and the call fails with `Exist` otherwise.
    /// * `APPEND` positions the cursor at end of data.
    /// * `READ_WRITE` returns an unrestricted handle, `WRITE_ONLY` one that rejects reads and
    ///   anything else one that rejects writes.
    fn open_file<P: AsRef<str>>(
        &mut self,
        path: P,
        flags: OpenFlags,
        mode: Mode,
    ) -> FsResult<Self::File> {
        let path = path.as_ref();
        let err = |kind| PathError::new(Op::Open, path, kind);
        let capacity = self.options.initial_capacity;

        let (dirs, leaf) = match parse(path).map_err(err)? {
            Parsed::Root => return Err(err(FileError::IsDirectory)),
            Parsed::Entry { dirs, leaf } => (dirs, leaf),
        };

        let parent = self.walk_mut(&dirs).map_err(err)?;
        let children = parent
            .children_mut()
            .ok_or_else(|| err(FileError::NotExist))?;

        let existing = children.get(leaf);
        if existing.is_some_and(Node::is_dir) {
            return Err(err(FileError::IsDirectory));
        }

        if flags.contains(OpenFlags::CREATE) {
            if existing.is_some() && !flags.contains(OpenFlags::TRUNC) {
                return Err(err(FileError::Exist));
            }
            let replaced = existing.is_some();
            children.insert(
                leaf.to_string(),
                Node::new_file(leaf, path, mode, capacity),
            );
            if replaced {
                debug!("truncated {}", path);
            } else {
                debug!("created {} (mode {:o})", path, mode);
            }
        }

        let node = children.get(leaf).ok_or_else(|| err(FileError::NotExist))?;
        let buffer = node
            .buffer()
            .ok_or_else(|| err(FileError::IsDirectory))?
            .clone();

        let mut file = MemFile::new(node.full_path(), buffer);
        if flags.contains(OpenFlags::APPEND) {
            file.seek(0, Whence::End).map_err(err)?;
        }

        let handle: FileHandle = if flags.contains(OpenFlags::READ_WRITE) {
            debug!("opened {} read-write", path);
            Box::new(file)
        } else if flags.contains(OpenFlags::WRITE_ONLY) {
            debug!("opened {} write-only", path);
            Box::new(WriteOnlyFile::new(file))
        } else {
            debug!("opened {} read-only", path);
            Box::new(ReadOnlyFile::new(file))
        };
        Ok(handle)
    }

    /// Describes the node at `path`. Directories report a size of 0.
    fn stat<P: AsRef<str>>(&self, path: P) -> FsResult<Metadata> {
        let path = path.as_ref();
        self.lookup(path)
            .map(Node::metadata)
            .map_err(|kind| PathError::new(Op::Stat, path, kind))
    }
}
