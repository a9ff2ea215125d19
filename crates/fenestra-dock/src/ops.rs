//! Structural operations on the dock tree.
//!
//! Attach converts a leaf into a split by cloning its payload into a
//! sibling; detach collapses a split back into whatever its surviving
//! child was. Both keep the 0-or-2 children invariant at every return.

use std::fmt;

use fenestra_core::geometry::Rect;
use tracing::debug;

use crate::constants::{RATIO_DEFAULT, RATIO_MAX, RATIO_MIN};
use crate::dirty::DirtyFlags;
use crate::node::{Border, DockKind, LayoutType};
use crate::tree::{DockTree, NodeId};

/// Error types for dock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// Node not found in the arena.
    NodeNotFound(NodeId),
    /// Operation requires a leaf but the node is a split.
    NotALeaf(NodeId),
    /// Attach requires an actual edge, not `Border::None`.
    EdgeRequired,
    /// A node cannot be attached to itself.
    SameNode(NodeId),
}

impl fmt::Display for DockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockError::NodeNotFound(id) => write!(f, "node {id:?} not found"),
            DockError::NotALeaf(id) => write!(f, "node {id:?} is not a leaf"),
            DockError::EdgeRequired => write!(f, "attach requires an edge border"),
            DockError::SameNode(id) => write!(f, "node {id:?} cannot be attached to itself"),
        }
    }
}

impl std::error::Error for DockError {}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;

/// Attach `new_node` onto `target` at the given border.
///
/// `target` must be a leaf; it becomes a split whose payload moves into a
/// freshly created sibling clone. Left/Top place the new window first,
/// Right/Bottom place the clone first; the orientation follows the border
/// axis and the ratio starts at 50.
pub fn attach(tree: &mut DockTree, target: NodeId, new_node: NodeId, border: Border) -> DockResult<()> {
    let layout = border.layout().ok_or(DockError::EdgeRequired)?;
    attach_impl(tree, target, new_node, layout, border.places_new_first())
}

/// Attach with an explicit orientation instead of a hover border.
///
/// The clone keeps the first slot and `new_node` the second, which is the
/// order programmatic callers (and restored layouts) expect.
pub fn attach_with_layout(
    tree: &mut DockTree,
    target: NodeId,
    new_node: NodeId,
    layout: LayoutType,
) -> DockResult<()> {
    attach_impl(tree, target, new_node, layout, false)
}

fn attach_impl(
    tree: &mut DockTree,
    target: NodeId,
    new_node: NodeId,
    layout: LayoutType,
    new_first: bool,
) -> DockResult<()> {
    if target == new_node {
        return Err(DockError::SameNode(target));
    }

    let floating = {
        let target_node = tree.get(target).ok_or(DockError::NodeNotFound(target))?;
        if !target_node.is_leaf() {
            return Err(DockError::NotALeaf(target));
        }
        target_node.is_floating
    };
    {
        let new = tree.get(new_node).ok_or(DockError::NodeNotFound(new_node))?;
        if !new.is_leaf() {
            return Err(DockError::NotALeaf(new_node));
        }
    }

    // The new window joins target's tree and layer.
    tree.unroot(new_node);
    if let Some(new) = tree.get_mut(new_node) {
        new.parent = Some(target);
        new.is_floating = floating;
    }

    // Clone the target's payload into a fresh sibling; the target itself
    // becomes the split container.
    let clone = tree.create_detached_leaf(floating);
    let children = if new_first {
        [new_node, clone]
    } else {
        [clone, new_node]
    };

    let (old_kind, min_size) = {
        let target_node = tree.get_mut(target).ok_or(DockError::NodeNotFound(target))?;
        let old_kind = std::mem::replace(
            &mut target_node.kind,
            DockKind::Split {
                layout,
                ratio: RATIO_DEFAULT,
                children,
            },
        );
        target_node.closest_border = Border::None;
        (old_kind, target_node.min_size)
    };
    let DockKind::Leaf { tabs } = old_kind else {
        // Checked above; a split target never reaches this point.
        return Err(DockError::NotALeaf(target));
    };

    if let Some(clone_node) = tree.get_mut(clone) {
        clone_node.parent = Some(target);
        clone_node.min_size = min_size;
        clone_node.kind = DockKind::Leaf { tabs };
    }

    update_layouts(tree, target);

    tree.mark_dirty(target, DirtyFlags::STRUCTURE | DirtyFlags::LAYOUT);
    tree.mark_dirty(new_node, DirtyFlags::STRUCTURE | DirtyFlags::GEOMETRY);
    tree.mark_dirty(clone, DirtyFlags::STRUCTURE | DirtyFlags::GEOMETRY);

    debug!(?target, ?new_node, ?clone, ?layout, "attached window");
    Ok(())
}

/// Detach an emptied child from its parent split, collapsing the split
/// into the surviving sibling.
///
/// Returns `Ok(false)` without touching the tree when `child` is not
/// actually a child of `parent` (repeated calls are no-ops) or when the
/// child's subtree still holds tabs (a drag may be repopulating it).
pub fn detach(tree: &mut DockTree, parent: NodeId, child: NodeId) -> DockResult<bool> {
    let Some(parent_node) = tree.get(parent) else {
        return Ok(false);
    };
    let Some(children) = parent_node.split_children() else {
        return Ok(false);
    };
    if !children.contains(&child) {
        return Ok(false);
    }
    if tree.subtree_tab_count(child) > 0 {
        return Ok(false);
    }

    let survivor = if children[0] == child {
        children[1]
    } else {
        children[0]
    };

    make_as_root(tree, parent, survivor)?;
    tree.remove_subtree(child);

    debug!(?parent, ?child, ?survivor, "detached child, split collapsed");
    Ok(true)
}

/// Collapse `parent` so it represents exactly what `survivor` did, one
/// level higher, then destroy the survivor node.
fn make_as_root(tree: &mut DockTree, parent: NodeId, survivor: NodeId) -> DockResult<()> {
    let survivor_node = tree
        .remove_node(survivor)
        .ok_or(DockError::NodeNotFound(survivor))?;

    match survivor_node.kind {
        DockKind::Leaf { tabs } => {
            let parent_node = tree.get_mut(parent).ok_or(DockError::NodeNotFound(parent))?;
            parent_node.kind = DockKind::Leaf { tabs };
            parent_node.is_floating = survivor_node.is_floating;
            parent_node.min_size = survivor_node.min_size;
        }
        DockKind::Split {
            layout,
            ratio,
            children,
        } => {
            let parent_node = tree.get_mut(parent).ok_or(DockError::NodeNotFound(parent))?;
            parent_node.kind = DockKind::Split {
                layout,
                ratio,
                children,
            };
            parent_node.is_floating = survivor_node.is_floating;
            update_parents(tree, parent);
        }
    }

    update_layouts(tree, parent);
    tree.mark_dirty(
        parent,
        DirtyFlags::STRUCTURE | DirtyFlags::LAYOUT | DirtyFlags::GEOMETRY,
    );
    Ok(())
}

/// Repoint the parent back-references of every node below `id`.
fn update_parents(tree: &mut DockTree, id: NodeId) {
    let Some(children) = tree.get(id).and_then(|node| node.split_children()) else {
        return;
    };
    for child in children {
        if let Some(child_node) = tree.get_mut(child) {
            child_node.parent = Some(id);
        }
        update_parents(tree, child);
    }
}

/// Set a split's ratio, clamped to the legal band, and re-propagate
/// both children's sizes.
pub fn set_ratio(tree: &mut DockTree, split: NodeId, value: f32) -> DockResult<()> {
    {
        let node = tree.get_mut(split).ok_or(DockError::NodeNotFound(split))?;
        match &mut node.kind {
            DockKind::Split { ratio, .. } => *ratio = value.clamp(RATIO_MIN, RATIO_MAX),
            DockKind::Leaf { .. } => return Ok(()),
        }
    }
    update_layouts(tree, split);
    tree.mark_dirty(split, DirtyFlags::LAYOUT);
    Ok(())
}

/// The rects a split's rect divides into for a given orientation/ratio.
pub fn split_rects(rect: &Rect<f32>, layout: LayoutType, ratio: f32) -> (Rect<f32>, Rect<f32>) {
    match layout {
        LayoutType::Horizontal => {
            let first_width = rect.width * ratio / 100.0;
            (
                Rect::new(rect.x, rect.y, first_width, rect.height),
                Rect::new(
                    rect.x + first_width,
                    rect.y,
                    rect.width - first_width,
                    rect.height,
                ),
            )
        }
        LayoutType::Vertical => {
            let first_height = rect.height * ratio / 100.0;
            (
                Rect::new(rect.x, rect.y, rect.width, first_height),
                Rect::new(
                    rect.x,
                    rect.y + first_height,
                    rect.width,
                    rect.height - first_height,
                ),
            )
        }
    }
}

/// Recompute child rects below `id` from each split's ratio.
pub fn update_layouts(tree: &mut DockTree, id: NodeId) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let rect = node.rect;
    let (layout, ratio, children) = match &node.kind {
        DockKind::Split {
            layout,
            ratio,
            children,
        } => (*layout, *ratio, *children),
        DockKind::Leaf { .. } => return,
    };

    let (first_rect, second_rect) = split_rects(&rect, layout, ratio);
    if let Some(first) = tree.get_mut(children[0]) {
        first.rect = first_rect;
    }
    if let Some(second) = tree.get_mut(children[1]) {
        second.rect = second_rect;
    }
    tree.mark_dirty(children[0], DirtyFlags::GEOMETRY | DirtyFlags::LAYOUT);
    tree.mark_dirty(children[1], DirtyFlags::GEOMETRY | DirtyFlags::LAYOUT);

    update_layouts(tree, children[0]);
    update_layouts(tree, children[1]);
}

/// Destroy a whole controller subtree, detaching it from its parent
/// split first when it has one.
pub fn destroy(tree: &mut DockTree, node: NodeId) -> DockResult<()> {
    if !tree.contains(node) {
        return Ok(());
    }

    // Empty every strip below so the detach guard lets the subtree go.
    for id in tree.subtree(node) {
        if let Some(tabs) = tree.get_mut(id).and_then(|n| n.tabs_mut()) {
            tabs.take_all();
        }
    }

    match tree.get(node).and_then(|n| n.parent) {
        Some(parent) => {
            detach(tree, parent, node)?;
        }
        None => tree.remove_subtree(node),
    }

    debug!(?node, "destroyed window subtree");
    Ok(())
}
