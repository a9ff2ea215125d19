//! Dock node types: the tagged union at the heart of the split tree.

use serde::{Deserialize, Serialize};

use fenestra_core::geometry::{Rect, Size};

use crate::constants::MIN_WINDOW_SIZE;
use crate::dirty::DirtyFlags;
use crate::tabs::TabStrip;
use crate::tree::NodeId;

/// Side of a rectangular panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    /// Pointer is not near any edge.
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
}

impl Border {
    /// The split orientation an attach on this border produces.
    pub fn layout(&self) -> Option<LayoutType> {
        match self {
            Border::Left | Border::Right => Some(LayoutType::Horizontal),
            Border::Top | Border::Bottom => Some(LayoutType::Vertical),
            Border::None => None,
        }
    }

    /// Whether an attach on this border places the new window first.
    pub fn places_new_first(&self) -> bool {
        matches!(self, Border::Left | Border::Top)
    }

    /// Check if this border names an actual edge.
    pub fn is_edge(&self) -> bool {
        !matches!(self, Border::None)
    }
}

/// Orientation of a split container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutType {
    /// Side-by-side children (vertical split line).
    #[default]
    Horizontal,
    /// Stacked children (horizontal split line).
    Vertical,
}

/// What a dock node is: a tabbed leaf panel or a two-child split.
///
/// A one-child split is unrepresentable by construction; collapse always
/// goes straight from two children back to a leaf or an adopted split.
#[derive(Debug)]
pub enum DockKind {
    /// A panel owning an ordered strip of content tabs.
    Leaf { tabs: TabStrip },
    /// A container splitting its rect between exactly two children.
    Split {
        layout: LayoutType,
        /// Percentage of the primary axis given to the first child.
        ratio: f32,
        children: [NodeId; 2],
    },
}

/// One slot in the dock arena.
#[derive(Debug)]
pub struct DockNode {
    /// Back-reference to the owning split, `None` for tree roots.
    pub parent: Option<NodeId>,
    /// Whether this node belongs to the floating overlay forest.
    pub is_floating: bool,
    /// Last computed layout rect, in manager space.
    pub rect: Rect<f32>,
    pub min_size: Size<f32>,
    /// Hover-derived: which edge the pointer is closest to, if any.
    pub closest_border: Border,
    pub dirty: DirtyFlags,
    pub kind: DockKind,
}

impl DockNode {
    /// Create an empty leaf.
    pub fn leaf(is_floating: bool) -> Self {
        Self {
            parent: None,
            is_floating,
            rect: Rect::ZERO,
            min_size: MIN_WINDOW_SIZE,
            closest_border: Border::None,
            dirty: DirtyFlags::LAYOUT | DirtyFlags::STRUCTURE,
            kind: DockKind::Leaf {
                tabs: TabStrip::new(),
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, DockKind::Leaf { .. })
    }

    pub fn is_split(&self) -> bool {
        matches!(self.kind, DockKind::Split { .. })
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The tab strip, for leaves.
    pub fn tabs(&self) -> Option<&TabStrip> {
        match &self.kind {
            DockKind::Leaf { tabs } => Some(tabs),
            DockKind::Split { .. } => None,
        }
    }

    /// The tab strip, mutable, for leaves.
    pub fn tabs_mut(&mut self) -> Option<&mut TabStrip> {
        match &mut self.kind {
            DockKind::Leaf { tabs } => Some(tabs),
            DockKind::Split { .. } => None,
        }
    }

    /// The child pair, for splits.
    pub fn split_children(&self) -> Option<[NodeId; 2]> {
        match self.kind {
            DockKind::Split { children, .. } => Some(children),
            DockKind::Leaf { .. } => None,
        }
    }

    /// Orientation and ratio, for splits.
    pub fn split_layout(&self) -> Option<(LayoutType, f32)> {
        match self.kind {
            DockKind::Split { layout, ratio, .. } => Some((layout, ratio)),
            DockKind::Leaf { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_layout_mapping() {
        assert_eq!(Border::Left.layout(), Some(LayoutType::Horizontal));
        assert_eq!(Border::Right.layout(), Some(LayoutType::Horizontal));
        assert_eq!(Border::Top.layout(), Some(LayoutType::Vertical));
        assert_eq!(Border::Bottom.layout(), Some(LayoutType::Vertical));
        assert_eq!(Border::None.layout(), None);
    }

    #[test]
    fn test_border_ordering_rule() {
        assert!(Border::Left.places_new_first());
        assert!(Border::Top.places_new_first());
        assert!(!Border::Right.places_new_first());
        assert!(!Border::Bottom.places_new_first());
    }

    #[test]
    fn test_new_leaf_shape() {
        let node = DockNode::leaf(false);
        assert!(node.is_leaf());
        assert!(node.is_root());
        assert!(node.tabs().unwrap().is_empty());
        assert_eq!(node.split_children(), None);
    }
}
