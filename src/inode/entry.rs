//! Directory entry types
//!
//! A directory's child table maps names to entries. Each entry declares
//! its kind up front and carries a [`ChildRef`] that is either a live
//! handle to a resident inode or the bare identity of a non-resident one.

use crate::inode::{FileInode, TreeInode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable inode number, assigned at allocation time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InodeId(pub u64);

impl InodeId {
    /// The root directory is always inode 1
    pub const ROOT: InodeId = InodeId(1);
}

impl fmt::Display for InodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the backing content object in the source-of-truth store
///
/// Absent when an entry carries local-only, not-yet-committed state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId([u8; 32]);

impl ContentId {
    /// Wrap a raw 32-byte identifier
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        ContentId(bytes)
    }

    /// Derive a content identifier by hashing object data
    pub fn hash(data: &[u8]) -> Self {
        ContentId(*blake3::hash(data).as_bytes())
    }

    /// Raw identifier bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", hex::encode(self.0))
    }
}

/// Declared type of a directory entry, independent of residency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Directory
    Directory,
    /// Regular file
    RegularFile,
    /// Symbolic link
    Symlink,
}

impl EntryKind {
    /// Check if this kind is a directory
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// Owning handle to a resident inode object
#[derive(Debug, Clone)]
pub enum InodeHandle {
    /// Resident directory
    Tree(Arc<TreeInode>),
    /// Resident file or symlink
    File(Arc<FileInode>),
}

impl InodeHandle {
    /// Inode number of the referenced object
    pub fn ino(&self) -> InodeId {
        match self {
            InodeHandle::Tree(tree) => tree.ino(),
            InodeHandle::File(file) => file.ino(),
        }
    }

    /// Content identifier of the referenced object, if known
    pub fn content_id(&self) -> Option<ContentId> {
        match self {
            InodeHandle::Tree(tree) => tree.content_id(),
            InodeHandle::File(file) => file.content_id(),
        }
    }

    /// Live reference count of the referenced object
    pub fn fs_refcount(&self) -> u64 {
        match self {
            InodeHandle::Tree(tree) => tree.fs_refcount(),
            InodeHandle::File(file) => file.fs_refcount(),
        }
    }

    /// Downcast to a resident directory
    pub fn as_tree(&self) -> Option<&Arc<TreeInode>> {
        match self {
            InodeHandle::Tree(tree) => Some(tree),
            InodeHandle::File(_) => None,
        }
    }
}

/// Reference from a parent directory to one of its children
///
/// The handle is present if and only if the child is resident in memory.
/// `NotResident` does not imply deletion; the child may still be allocated
/// in the overlay store.
#[derive(Debug, Clone)]
pub enum ChildRef {
    /// Child is resident; the handle owns a reference to the live object
    Resident(InodeHandle),
    /// Child is allocated but not resident; only its identity is recorded
    NotResident {
        /// Inode number
        ino: InodeId,
        /// Content identifier, if known
        content_id: Option<ContentId>,
    },
}

impl ChildRef {
    /// Inode number of the child, resident or not
    pub fn ino(&self) -> InodeId {
        match self {
            ChildRef::Resident(handle) => handle.ino(),
            ChildRef::NotResident { ino, .. } => *ino,
        }
    }

    /// Content identifier of the child, if known
    pub fn content_id(&self) -> Option<ContentId> {
        match self {
            ChildRef::Resident(handle) => handle.content_id(),
            ChildRef::NotResident { content_id, .. } => *content_id,
        }
    }

    /// Check if the child is currently resident
    pub fn is_resident(&self) -> bool {
        matches!(self, ChildRef::Resident(_))
    }
}

/// One row of a directory's live child table
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Declared entry kind
    pub kind: EntryKind,
    /// Reference to the child
    pub child: ChildRef,
}

impl DirEntry {
    /// Entry for a resident child directory
    pub fn resident_tree(tree: Arc<TreeInode>) -> Self {
        DirEntry {
            kind: EntryKind::Directory,
            child: ChildRef::Resident(InodeHandle::Tree(tree)),
        }
    }

    /// Entry for a resident file or symlink
    pub fn resident_file(file: Arc<FileInode>, kind: EntryKind) -> Self {
        DirEntry {
            kind,
            child: ChildRef::Resident(InodeHandle::File(file)),
        }
    }

    /// Entry for an allocated but non-resident child
    pub fn not_resident(kind: EntryKind, ino: InodeId, content_id: Option<ContentId>) -> Self {
        DirEntry {
            kind,
            child: ChildRef::NotResident { ino, content_id },
        }
    }

    /// Inode number of the child
    pub fn ino(&self) -> InodeId {
        self.child.ino()
    }

    /// Content identifier of the child, if known
    pub fn content_id(&self) -> Option<ContentId> {
        self.child.content_id()
    }

    /// Check if the declared kind is a directory
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_hash_is_stable() {
        let a = ContentId::hash(b"hello");
        let b = ContentId::hash(b"hello");
        let c = ContentId::hash(b"world");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_content_id_display_is_hex() {
        let id = ContentId::from_bytes([0xab; 32]);
        assert_eq!(id.to_string(), "ab".repeat(32));
    }

    #[test]
    fn test_not_resident_entry_identity() {
        let cid = ContentId::hash(b"tree");
        let entry = DirEntry::not_resident(EntryKind::Directory, InodeId(42), Some(cid));
        assert_eq!(entry.ino(), InodeId(42));
        assert_eq!(entry.content_id(), Some(cid));
        assert!(entry.is_dir());
        assert!(!entry.child.is_resident());
    }

    #[test]
    fn test_resident_tree_entry() {
        let tree = Arc::new(TreeInode::new(InodeId(7), None));
        let entry = DirEntry::resident_tree(tree.clone());
        assert_eq!(entry.ino(), InodeId(7));
        assert!(entry.child.is_resident());
        match &entry.child {
            ChildRef::Resident(handle) => assert!(handle.as_tree().is_some()),
            ChildRef::NotResident { .. } => panic!("expected resident child"),
        }
    }

    #[test]
    fn test_file_handle_is_not_a_tree() {
        let file = Arc::new(FileInode::new(InodeId(9), None));
        let entry = DirEntry::resident_file(file, EntryKind::RegularFile);
        match &entry.child {
            ChildRef::Resident(handle) => assert!(handle.as_tree().is_none()),
            ChildRef::NotResident { .. } => panic!("expected resident child"),
        }
    }
}
