//! Traversal visitor contract

use crate::inode::{ChildRef, ContentId, EntryKind, InodeId};
use std::path::Path;

/// Snapshot descriptor for one child of a visited directory
///
/// Built fresh for each traversal pass and discarded with it; descriptors
/// are never persisted or reused across calls, and two descriptors for
/// the same inode are not assumed equal across time.
#[derive(Debug, Clone)]
pub struct ChildEntry {
    /// Entry name within the parent directory
    pub name: String,
    /// Declared entry kind
    pub kind: EntryKind,
    /// Resident handle or bare identity
    pub child: ChildRef,
}

impl ChildEntry {
    /// Inode number of the child
    pub fn ino(&self) -> InodeId {
        self.child.ino()
    }

    /// Content identifier of the child, if known
    pub fn content_id(&self) -> Option<ContentId> {
        self.child.content_id()
    }

    /// Check if the child is currently resident in memory
    pub fn is_resident(&self) -> bool {
        self.child.is_resident()
    }
}

/// Callbacks driving a traversal
///
/// The walk is fully synchronous; a slow `visit_directory` stalls the
/// whole traversal. Answers from `should_recurse` are never memoized, so
/// equivalent inputs must yield equivalent answers if the caller needs
/// repeatable behavior.
pub trait TraversalCallbacks {
    /// Called exactly once per visited directory, the root included
    ///
    /// `refcount` is the live reference count of a materialized
    /// directory, and 0 for one reconstructed from an overlay record.
    /// `entries` must be treated as read-only for the duration of the
    /// call.
    fn visit_directory(
        &mut self,
        path: &Path,
        ino: InodeId,
        content_id: Option<&ContentId>,
        refcount: u64,
        entries: &[ChildEntry],
    );

    /// Asked before descending into a child; only ever called for
    /// children whose declared kind is directory
    fn should_recurse(&mut self, entry: &ChildEntry) -> bool;
}
