//! Error types for the layout engine
//!
//! These are contract violations: querying a rectangle that is undefined or
//! applying a snapshot to a structure it was not taken from. Recoverable
//! conditions (a detached item during an immediate pass, a stale reference
//! in a snapshot pass) are logged instead.

use thiserror::Error;

use super::item::ItemId;

/// Errors that can occur while computing or applying layout
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The block's item is gone or detached from its parent
    #[error("layout block is not active, item {item} is not available")]
    InactiveBlock { item: ItemId },

    /// A constraint needs the parent of an item that has none
    #[error("item {item} has no super item to resolve its coordinate space")]
    MissingSuperItem { item: ItemId },

    /// A snapshot does not match the structure it is applied to
    #[error("snapshot structure mismatch: expected {expected} child snapshots, found {found}")]
    SnapshotMismatch { expected: usize, found: usize },

    /// A scheme with no nodes has no rectangle
    #[error("layout scheme has no blocks")]
    EmptyScheme,
}

impl LayoutError {
    pub fn inactive(item: ItemId) -> Self {
        Self::InactiveBlock { item }
    }

    pub fn missing_super_item(item: ItemId) -> Self {
        Self::MissingSuperItem { item }
    }

    pub fn mismatch(expected: usize, found: usize) -> Self {
        Self::SnapshotMismatch { expected, found }
    }
}
