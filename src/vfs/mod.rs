mod buffer;
mod file;
mod mem_fs;
mod metadata;
mod node;

pub use buffer::{Buffer, SharedBuffer};
pub use file::{MemFile, ReadOnlyFile, WriteOnlyFile};
pub use mem_fs::{MemFS, PATH_SEPARATOR, Resolved};
pub use metadata::Metadata;
pub use node::{Node, NodeKind};
