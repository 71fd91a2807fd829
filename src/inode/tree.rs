//! Materialized inode objects
//!
//! A materialized directory owns its child table behind its own
//! reader/writer lock; no lock covers more than one directory. The live
//! reference count tracks outstanding external references to the resident
//! object and is queried independently of the contents lock.

use crate::inode::{ContentId, DirEntry, InodeId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live contents of a materialized directory
#[derive(Debug, Default)]
pub struct TreeContents {
    /// Child table, ordered by name
    pub entries: BTreeMap<String, DirEntry>,
    /// Content identifier for the directory itself, if known
    pub content_id: Option<ContentId>,
}

impl TreeContents {
    /// Create empty contents with an optional content identifier
    pub fn new(content_id: Option<ContentId>) -> Self {
        TreeContents {
            entries: BTreeMap::new(),
            content_id,
        }
    }
}

/// A materialized (memory-resident) directory inode
#[derive(Debug)]
pub struct TreeInode {
    ino: InodeId,
    contents: RwLock<TreeContents>,
    fs_refcount: AtomicU64,
}

impl TreeInode {
    /// Create a materialized directory with an empty child table
    pub fn new(ino: InodeId, content_id: Option<ContentId>) -> Self {
        TreeInode {
            ino,
            contents: RwLock::new(TreeContents::new(content_id)),
            fs_refcount: AtomicU64::new(0),
        }
    }

    /// Inode number
    pub fn ino(&self) -> InodeId {
        self.ino
    }

    /// The contents lock, scoped to this directory only
    pub fn contents(&self) -> &RwLock<TreeContents> {
        &self.contents
    }

    /// Content identifier for this directory, if known
    pub fn content_id(&self) -> Option<ContentId> {
        self.contents.read().content_id
    }

    /// Current live reference count
    pub fn fs_refcount(&self) -> u64 {
        self.fs_refcount.load(Ordering::SeqCst)
    }

    /// Record a new external reference, returning the updated count
    pub fn acquire_ref(&self) -> u64 {
        self.fs_refcount.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Drop an external reference, returning the updated count
    pub fn release_ref(&self) -> u64 {
        self.fs_refcount.fetch_sub(1, Ordering::SeqCst) - 1
    }

    /// Insert or replace a child entry
    pub fn insert_entry(&self, name: impl Into<String>, entry: DirEntry) {
        self.contents.write().entries.insert(name.into(), entry);
    }

    /// Remove a child entry by name
    pub fn remove_entry(&self, name: &str) -> Option<DirEntry> {
        self.contents.write().entries.remove(name)
    }
}

/// A materialized file or symlink inode
#[derive(Debug)]
pub struct FileInode {
    ino: InodeId,
    content_id: RwLock<Option<ContentId>>,
    fs_refcount: AtomicU64,
}

impl FileInode {
    /// Create a materialized file object
    pub fn new(ino: InodeId, content_id: Option<ContentId>) -> Self {
        FileInode {
            ino,
            content_id: RwLock::new(content_id),
            fs_refcount: AtomicU64::new(0),
        }
    }

    /// Inode number
    pub fn ino(&self) -> InodeId {
        self.ino
    }

    /// Content identifier, if known
    pub fn content_id(&self) -> Option<ContentId> {
        *self.content_id.read()
    }

    /// Set or clear the content identifier
    pub fn set_content_id(&self, content_id: Option<ContentId>) {
        *self.content_id.write() = content_id;
    }

    /// Current live reference count
    pub fn fs_refcount(&self) -> u64 {
        self.fs_refcount.load(Ordering::SeqCst)
    }

    /// Record a new external reference, returning the updated count
    pub fn acquire_ref(&self) -> u64 {
        self.fs_refcount.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Drop an external reference, returning the updated count
    pub fn release_ref(&self) -> u64 {
        self.fs_refcount.fetch_sub(1, Ordering::SeqCst) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inode::EntryKind;

    #[test]
    fn test_new_tree_is_empty() {
        let tree = TreeInode::new(InodeId::ROOT, None);
        assert_eq!(tree.ino(), InodeId::ROOT);
        assert!(tree.contents().read().entries.is_empty());
        assert_eq!(tree.fs_refcount(), 0);
    }

    #[test]
    fn test_entries_are_name_ordered() {
        let tree = TreeInode::new(InodeId::ROOT, None);
        tree.insert_entry("b", DirEntry::not_resident(EntryKind::RegularFile, InodeId(3), None));
        tree.insert_entry("a", DirEntry::not_resident(EntryKind::Directory, InodeId(2), None));
        tree.insert_entry("c", DirEntry::not_resident(EntryKind::Symlink, InodeId(4), None));

        let contents = tree.contents().read();
        let names: Vec<_> = contents.entries.keys().cloned().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_entry() {
        let tree = TreeInode::new(InodeId::ROOT, None);
        tree.insert_entry("a", DirEntry::not_resident(EntryKind::RegularFile, InodeId(2), None));
        assert!(tree.remove_entry("a").is_some());
        assert!(tree.remove_entry("a").is_none());
    }

    #[test]
    fn test_refcount_acquire_release() {
        let tree = TreeInode::new(InodeId::ROOT, None);
        assert_eq!(tree.acquire_ref(), 1);
        assert_eq!(tree.acquire_ref(), 2);
        assert_eq!(tree.release_ref(), 1);
        assert_eq!(tree.fs_refcount(), 1);
    }

    #[test]
    fn test_file_content_id_update() {
        let file = FileInode::new(InodeId(5), None);
        assert!(file.content_id().is_none());

        let cid = ContentId::hash(b"data");
        file.set_content_id(Some(cid));
        assert_eq!(file.content_id(), Some(cid));
    }
}
