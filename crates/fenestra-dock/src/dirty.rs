//! Dirty tracking for dock nodes.
//!
//! Structural operations mark the nodes they touch; the manager folds the
//! accumulated flags into its persistence dirty bit once per mutation.

use bitflags::bitflags;

bitflags! {
    /// What about a node changed since the last time it was processed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirtyFlags: u32 {
        /// Child sizing must be recomputed.
        const LAYOUT = 1 << 0;
        /// The node changed role or its children changed.
        const STRUCTURE = 1 << 1;
        /// The node's own rect moved or resized.
        const GEOMETRY = 1 << 2;
    }
}
