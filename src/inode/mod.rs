//! In-memory inode objects and child-table types
//!
//! An inode's identity is assigned at allocation time and survives whether
//! or not the inode is currently resident in memory. Residency is tracked
//! per child with a tagged reference, never a nullable pointer.

mod entry;
mod tree;

pub use entry::{ChildRef, ContentId, DirEntry, EntryKind, InodeHandle, InodeId};
pub use tree::{FileInode, TreeContents, TreeInode};
