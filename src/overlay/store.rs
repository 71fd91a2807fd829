//! Overlay database access

use crate::config::OverlayConfig;
use crate::error::Result;
use crate::inode::InodeId;
use crate::overlay::OverlayDir;
use tracing::debug;

const DIRS_TREE: &str = "dirs";

/// Persistent store of directory records for non-materialized inodes
pub struct OverlayStore {
    db: sled::Db,
    dirs: sled::Tree,
    flush_on_write: bool,
}

impl OverlayStore {
    /// Open (or create) the overlay database described by the config
    pub fn open(config: &OverlayConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .open()?;
        let dirs = db.open_tree(DIRS_TREE)?;

        debug!("Opened overlay store at {:?}", config.path);

        Ok(OverlayStore {
            db,
            dirs,
            flush_on_write: config.flush_on_write,
        })
    }

    /// Load the directory record for an inode
    ///
    /// Returns an empty record when nothing is allocated for the inode.
    /// That is the designed "not materialized / never allocated" signal,
    /// not an error.
    pub fn load_dir(&self, ino: InodeId) -> Result<OverlayDir> {
        match self.dirs.get(Self::key(ino))? {
            Some(raw) => {
                let dir: OverlayDir = bincode::deserialize(&raw)?;
                debug!("Loaded overlay record for inode {} ({} entries)", ino, dir.len());
                Ok(dir)
            }
            None => Ok(OverlayDir::empty()),
        }
    }

    /// Write the directory record for an inode
    pub fn save_dir(&self, ino: InodeId, dir: &OverlayDir) -> Result<()> {
        let raw = bincode::serialize(dir)?;
        self.dirs.insert(Self::key(ino), raw)?;
        if self.flush_on_write {
            self.db.flush()?;
        }
        debug!("Saved overlay record for inode {} ({} entries)", ino, dir.len());
        Ok(())
    }

    /// Remove the directory record for an inode, if present
    pub fn remove_dir(&self, ino: InodeId) -> Result<()> {
        self.dirs.remove(Self::key(ino))?;
        if self.flush_on_write {
            self.db.flush()?;
        }
        Ok(())
    }

    /// Check whether a record exists for an inode
    pub fn contains(&self, ino: InodeId) -> Result<bool> {
        Ok(self.dirs.contains_key(Self::key(ino))?)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn key(ino: InodeId) -> [u8; 8] {
        ino.0.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inode::{ContentId, EntryKind};
    use crate::overlay::OverlayEntry;

    fn open_store(dir: &tempfile::TempDir) -> OverlayStore {
        let config = OverlayConfig {
            path: dir.path().join("overlay"),
            cache_capacity: 1024 * 1024,
            flush_on_write: false,
        };
        OverlayStore::open(&config).unwrap()
    }

    #[test]
    fn test_missing_record_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let record = store.load_dir(InodeId(99)).unwrap();
        assert!(record.is_empty());
        assert!(!store.contains(InodeId(99)).unwrap());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let record = OverlayDir {
            entries: vec![
                OverlayEntry {
                    name: "sub".to_string(),
                    kind: EntryKind::Directory,
                    ino: InodeId(5),
                    content_id: None,
                },
                OverlayEntry {
                    name: "file.txt".to_string(),
                    kind: EntryKind::RegularFile,
                    ino: InodeId(6),
                    content_id: Some(ContentId::hash(b"contents")),
                },
            ],
        };

        store.save_dir(InodeId(4), &record).unwrap();
        assert!(store.contains(InodeId(4)).unwrap());

        let loaded = store.load_dir(InodeId(4)).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_remove_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store.save_dir(InodeId(4), &OverlayDir::empty()).unwrap();
        assert!(store.contains(InodeId(4)).unwrap());

        store.remove_dir(InodeId(4)).unwrap();
        assert!(!store.contains(InodeId(4)).unwrap());
        assert!(store.load_dir(InodeId(4)).unwrap().is_empty());
    }

    #[test]
    fn test_saved_empty_record_reads_back_empty() {
        // An allocated-but-empty directory and a never-allocated one are
        // indistinguishable to readers; both load as the empty record.
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store.save_dir(InodeId(7), &OverlayDir::empty()).unwrap();
        assert!(store.load_dir(InodeId(7)).unwrap().is_empty());
    }
}
