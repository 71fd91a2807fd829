//! The traversal engine
//!
//! Pre-order depth-first walk rooted at a materialized directory. Each
//! directory's contents lock is held only long enough to copy its entries
//! and content identifier into a detached snapshot; no lock is held while
//! recursing or while the visitor runs. At most one directory's lock is
//! ever held at a time, so there is no cross-directory lock ordering to
//! get wrong.

use crate::error::Result;
use crate::inode::{ChildRef, ContentId, EntryKind, InodeId, TreeContents, TreeInode};
use crate::overlay::{OverlayDir, OverlayStore};
use crate::walk::{ChildEntry, TraversalCallbacks};
use std::path::Path;
use tracing::trace;

/// Normalize a live child table into an ordered descriptor sequence
fn parse_tree_contents(contents: &TreeContents) -> Vec<ChildEntry> {
    contents
        .entries
        .iter()
        .map(|(name, entry)| ChildEntry {
            name: name.clone(),
            kind: entry.kind,
            child: entry.child.clone(),
        })
        .collect()
}

/// Normalize an overlay record into an ordered descriptor sequence
fn parse_overlay_contents(record: &OverlayDir) -> Vec<ChildEntry> {
    record
        .entries
        .iter()
        .map(|entry| ChildEntry {
            name: entry.name.clone(),
            kind: entry.kind,
            child: ChildRef::NotResident {
                ino: entry.ino,
                content_id: entry.content_id,
            },
        })
        .collect()
}

/// Copy a materialized directory's state under a scoped read lock
///
/// The guard dies inside this function, so the lock can never leak into
/// the recursion or the visitor.
fn snapshot_tree(tree: &TreeInode) -> (Vec<ChildEntry>, Option<ContentId>) {
    let contents = tree.contents().read();
    (parse_tree_contents(&contents), contents.content_id)
}

/// Walk every allocated directory reachable from a materialized root
///
/// Invokes the visitor exactly once per directory in pre-order, following
/// each directory's own child order. Children without a resident handle
/// whose declared kind is directory are looked up in the overlay store;
/// an empty record ends that branch silently. Overlay failures abort the
/// walk at the point of failure.
pub fn traverse(
    overlay: &OverlayStore,
    root: &TreeInode,
    root_path: &Path,
    callbacks: &mut dyn TraversalCallbacks,
) -> Result<()> {
    let (children, content_id) = snapshot_tree(root);
    traverse_children(
        overlay,
        &children,
        root_path,
        root.ino(),
        content_id.as_ref(),
        root.fs_refcount(),
        callbacks,
    )
}

/// Recursive step; operates on detached data only
fn traverse_children(
    overlay: &OverlayStore,
    children: &[ChildEntry],
    path: &Path,
    ino: InodeId,
    content_id: Option<&ContentId>,
    refcount: u64,
    callbacks: &mut dyn TraversalCallbacks,
) -> Result<()> {
    trace!("Visiting {:?} (inode {})", path, ino);
    callbacks.visit_directory(path, ino, content_id, refcount, children);

    for entry in children {
        let child_path = path.join(&entry.name);
        match &entry.child {
            ChildRef::Resident(handle) => {
                if let Some(child_tree) = handle.as_tree() {
                    if callbacks.should_recurse(entry) {
                        traverse(overlay, child_tree, &child_path, callbacks)?;
                    }
                }
            }
            ChildRef::NotResident {
                ino: child_ino,
                content_id,
            } => {
                if entry.kind == EntryKind::Directory && callbacks.should_recurse(entry) {
                    // A record for the child means it has been allocated
                    // and can be traversed; an empty record means never
                    // allocated or purely remote, and ends the branch.
                    let record = overlay.load_dir(*child_ino)?;
                    if !record.is_empty() {
                        let grandchildren = parse_overlay_contents(&record);
                        traverse_children(
                            overlay,
                            &grandchildren,
                            &child_path,
                            *child_ino,
                            content_id.as_ref(),
                            0,
                            callbacks,
                        )?;
                    }
                }
            }
        }
    }

    Ok(())
}
