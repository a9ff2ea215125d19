//! Border detection: which edge the pointer is near, and whether that
//! edge is a draggable split line.

use fenestra_core::geometry::Rect;
use fenestra_core::math::Vec2;

use crate::constants::BORDER_DETECTION_THRESHOLD;
use crate::node::{Border, DockKind, LayoutType};
use crate::tree::{DockTree, NodeId};

/// Which border of `rect` the pointer is within the detection threshold
/// of, if any. Points outside the rect detect nothing.
///
/// Corners resolve in a fixed priority: Left, Right, Top, Bottom.
pub fn closest_border(point: Vec2, rect: &Rect<f32>) -> Border {
    if !rect.contains(point) {
        return Border::None;
    }

    let local_x = point.x - rect.x;
    let local_y = point.y - rect.y;

    if local_x < BORDER_DETECTION_THRESHOLD {
        Border::Left
    } else if local_x > rect.width - BORDER_DETECTION_THRESHOLD {
        Border::Right
    } else if local_y < BORDER_DETECTION_THRESHOLD {
        Border::Top
    } else if local_y > rect.height - BORDER_DETECTION_THRESHOLD {
        Border::Bottom
    } else {
        Border::None
    }
}

/// Find the ancestor split whose split line coincides with `border` of
/// `leaf`, walking up from the leaf.
///
/// A border is draggable only when some ancestor split runs along the
/// same axis and the leaf's edge is the inner one: the trailing edge of
/// a first child or the leading edge of a second child. Walking continues
/// through ancestors only while the edge stays coincident with the
/// ancestor's own edge; once the edge is interior to a subtree with no
/// owning split, nothing is draggable.
pub fn draggable_split(tree: &DockTree, leaf: NodeId, border: Border) -> Option<NodeId> {
    let axis = border.layout()?;

    let mut current = leaf;
    while let Some(parent_id) = tree.get(current)?.parent {
        let parent = tree.get(parent_id)?;
        let DockKind::Split {
            layout, children, ..
        } = &parent.kind
        else {
            return None;
        };
        let (layout, children) = (*layout, *children);

        let is_first = children[0] == current;

        if layout == axis {
            let inner = match (border, is_first) {
                (Border::Right, true) | (Border::Left, false) => true,
                (Border::Bottom, true) | (Border::Top, false) => true,
                _ => false,
            };
            if inner {
                return Some(parent_id);
            }

            // On this axis the child only shares the parent's outer edge
            // when it sits on that side; otherwise no ancestor owns it.
            let outer = match (border, is_first) {
                (Border::Left, true) | (Border::Top, true) => true,
                (Border::Right, false) | (Border::Bottom, false) => true,
                _ => false,
            };
            if !outer {
                return None;
            }
        }
        // A perpendicular split shares both of the parent's edges on this
        // axis, so the walk always continues through it.

        current = parent_id;
    }

    None
}

/// Which axis a border drag moves along.
pub fn drag_axis(layout: LayoutType, delta: Vec2) -> f32 {
    match layout {
        LayoutType::Horizontal => delta.x,
        LayoutType::Vertical => delta.y,
    }
}
