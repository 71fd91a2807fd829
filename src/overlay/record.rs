//! Overlay directory records

use crate::inode::{ContentId, EntryKind, InodeId};
use serde::{Deserialize, Serialize};

/// One child entry in an overlay directory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayEntry {
    /// Entry name
    pub name: String,
    /// Declared entry kind
    pub kind: EntryKind,
    /// Inode number
    pub ino: InodeId,
    /// Content identifier, if known
    pub content_id: Option<ContentId>,
}

/// Recorded contents of a non-materialized directory
///
/// Entry order is the record's own order and is preserved through
/// encoding, storage, and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayDir {
    /// Child entries, in record order
    pub entries: Vec<OverlayEntry>,
}

impl OverlayDir {
    /// An empty record; the designed signal for "nothing allocated here"
    pub fn empty() -> Self {
        OverlayDir::default()
    }

    /// Check whether the record holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
