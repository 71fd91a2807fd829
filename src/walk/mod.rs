//! Tree traversal
//!
//! Depth-first walk over the logical tree of allocated entries, uniform
//! across materialized directories and overlay records. The caller
//! supplies the visitor and decides, per directory child, whether the
//! walk descends.

mod callbacks;
mod traverse;

pub use callbacks::{ChildEntry, TraversalCallbacks};
pub use traverse::traverse;
