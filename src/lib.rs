//! vfswalk - Traversal engine for an overlay-backed working tree
//!
//! A virtual filesystem client keeps its working tree in two coexisting
//! forms: live in-memory inode objects for directories that are currently
//! materialized, and an on-disk overlay store recording directory contents
//! for inodes that are allocated but not memory-resident. This crate walks
//! the whole logical tree across both forms, invoking a caller-supplied
//! visitor exactly once per directory and letting the caller prune
//! branches via a per-child predicate.

pub mod config;
pub mod error;
pub mod inode;
pub mod overlay;
pub mod tree;
pub mod walk;

pub use config::Config;
pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::inode::{ChildRef, EntryKind, InodeId, TreeInode};
    pub use crate::tree::WorkingTree;
    pub use crate::walk::{traverse, ChildEntry, TraversalCallbacks};
}
