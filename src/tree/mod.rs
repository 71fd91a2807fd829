//! Working tree assembly
//!
//! Couples the overlay store with the materialized inode tree: opens the
//! store, materializes the root, exposes the traversal entry point, and
//! materializes further directories on demand.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::inode::{ChildRef, DirEntry, InodeHandle, InodeId, TreeInode};
use crate::overlay::{OverlayDir, OverlayStore};
use crate::walk::{self, TraversalCallbacks};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A working tree backed by an overlay store
pub struct WorkingTree {
    overlay: OverlayStore,
    root: Arc<TreeInode>,
}

impl WorkingTree {
    /// Open the overlay store and materialize the root directory
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let overlay = OverlayStore::open(&config.overlay)?;

        let root = Arc::new(TreeInode::new(InodeId::ROOT, None));
        let record = overlay.load_dir(InodeId::ROOT)?;
        populate_from_record(&root, &record);

        info!("Opened working tree ({} root entries)", record.len());
        Ok(WorkingTree { overlay, root })
    }

    /// The materialized root directory
    pub fn root(&self) -> &Arc<TreeInode> {
        &self.root
    }

    /// The overlay store backing non-resident directories
    pub fn overlay(&self) -> &OverlayStore {
        &self.overlay
    }

    /// Walk every allocated directory reachable from the root
    pub fn traverse(&self, callbacks: &mut dyn TraversalCallbacks) -> Result<()> {
        walk::traverse(&self.overlay, &self.root, Path::new(""), callbacks)
    }

    /// Materialize a declared child directory from its overlay record
    ///
    /// Returns the existing object if the child is already resident.
    /// Overlay I/O happens with no lock held; residency is re-checked
    /// after the parent's write lock is reacquired, and a concurrent
    /// materialization wins.
    pub fn materialize_dir(&self, parent: &TreeInode, name: &str) -> Result<Arc<TreeInode>> {
        let (ino, content_id) = {
            let contents = parent.contents().read();
            let entry =
                contents
                    .entries
                    .get(name)
                    .ok_or_else(|| Error::EntryNotFound {
                        parent: parent.ino(),
                        name: name.to_string(),
                    })?;
            if !entry.kind.is_dir() {
                return Err(Error::NotADirectory(entry.ino()));
            }
            match &entry.child {
                ChildRef::Resident(InodeHandle::Tree(tree)) => return Ok(tree.clone()),
                ChildRef::Resident(InodeHandle::File(file)) => {
                    return Err(Error::NotADirectory(file.ino()))
                }
                ChildRef::NotResident { ino, content_id } => (*ino, *content_id),
            }
        };

        let record = self.overlay.load_dir(ino)?;
        let tree = Arc::new(TreeInode::new(ino, content_id));
        populate_from_record(&tree, &record);

        let mut contents = parent.contents().write();
        match contents.entries.get_mut(name) {
            Some(entry) => match &entry.child {
                ChildRef::Resident(InodeHandle::Tree(existing)) => Ok(existing.clone()),
                _ => {
                    entry.child = ChildRef::Resident(InodeHandle::Tree(tree.clone()));
                    Ok(tree)
                }
            },
            None => Err(Error::EntryNotFound {
                parent: parent.ino(),
                name: name.to_string(),
            }),
        }
    }
}

/// Fill a freshly built directory's table from its overlay record
fn populate_from_record(tree: &TreeInode, record: &OverlayDir) {
    let mut contents = tree.contents().write();
    for entry in &record.entries {
        contents.entries.insert(
            entry.name.clone(),
            DirEntry::not_resident(entry.kind, entry.ino, entry.content_id),
        );
    }
}
