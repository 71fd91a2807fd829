//! On-disk overlay store
//!
//! Records directory contents for inodes that are allocated but not
//! currently materialized in memory. A record is an immutable snapshot
//! with no associated lock; loading a record for an inode nothing was
//! ever written for yields an empty record, not an error.

mod record;
mod store;

pub use record::{OverlayDir, OverlayEntry};
pub use store::OverlayStore;
