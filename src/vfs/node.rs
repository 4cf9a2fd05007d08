use std::collections::BTreeMap;

use crate::core::Mode;
use crate::vfs::Metadata;
use crate::vfs::buffer::{Buffer, SharedBuffer};

/// What a node holds: child entries for a directory, data for a regular file.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Directory(BTreeMap<String, Node>),
    File(SharedBuffer),
}

/// An entry of the directory tree.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    full_path: String,
    mode: Mode,
    kind: NodeKind,
}

impl Node {
    /// The root directory `/`.
    pub fn root() -> Node {
        Node::new_dir("/", "/", 0)
    }

    pub fn new_dir<N: Into<String>, P: Into<String>>(name: N, full_path: P, mode: Mode) -> Node {
        Node {
            name: name.into(),
            full_path: full_path.into(),
            mode,
            kind: NodeKind::Directory(BTreeMap::new()),
        }
    }

    /// A regular file with an empty buffer of `capacity` reserved bytes.
    pub fn new_file<N: Into<String>, P: Into<String>>(
        name: N,
        full_path: P,
        mode: Mode,
        capacity: usize,
    ) -> Node {
        Node {
            name: name.into(),
            full_path: full_path.into(),
            mode,
            kind: NodeKind::File(Buffer::shared(capacity)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match &self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, Node>> {
        match &mut self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    /// Child `name` of a directory. Always `None` for a file.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().and_then(|children| children.get(name))
    }

    pub fn buffer(&self) -> Option<&SharedBuffer> {
        match &self.kind {
            NodeKind::File(buffer) => Some(buffer),
            NodeKind::Directory(_) => None,
        }
    }

    /// Size in bytes. Directories report 0.
    pub fn len(&self) -> u64 {
        match &self.kind {
            NodeKind::File(buffer) => buffer.borrow().len() as u64,
            NodeKind::Directory(_) => 0,
        }
    }

    /// Snapshot of the node's attributes, stamped with the current time.
    pub fn metadata(&self) -> Metadata {
        Metadata::new(&self.name, self.len(), self.is_dir(), self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::File;
    use crate::vfs::MemFile;

    #[test]
    fn test_root() {
        let root = Node::root();
        assert_eq!(root.name(), "/");
        assert!(root.is_dir());
        assert!(!root.is_file());
        assert!(root.children().is_some_and(|c| c.is_empty()));
        assert!(root.buffer().is_none());
        assert_eq!(root.len(), 0);
    }

    #[test]
    fn test_file_node() {
        let node = Node::new_file("foo.txt", "/tmp/foo.txt", 0o644, 512);
        assert!(node.is_file());
        assert!(node.children().is_none());
        assert!(node.child("anything").is_none());
        assert_eq!(node.full_path(), "/tmp/foo.txt");
        assert_eq!(node.mode(), 0o644);
        assert!(node.buffer().is_some_and(|b| b.borrow().capacity() == 512));
    }

    #[test]
    fn test_len_follows_buffer() {
        let node = Node::new_file("foo.txt", "/foo.txt", 0o666, 512);
        let buffer = node.buffer().cloned().unwrap();
        let mut file = MemFile::new(node.full_path(), buffer);
        file.write(b"Hello").unwrap();

        assert_eq!(node.len(), 5);
        let meta = node.metadata();
        assert_eq!(meta.name(), "foo.txt");
        assert_eq!(meta.len(), 5);
        assert!(!meta.is_dir());
    }

    #[test]
    fn test_children_mut() {
        let mut root = Node::root();
        root.children_mut()
            .unwrap()
            .insert("tmp".into(), Node::new_dir("tmp", "/tmp", 0o755));
        assert!(root.child("tmp").is_some_and(Node::is_dir));
    }
}
