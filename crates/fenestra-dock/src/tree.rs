//! The dock arena: node storage plus the forest of top-level trees.
//!
//! Ownership runs parent→children through the arena; child→parent
//! back-references are plain ids, so removal is a single-pass delete plus
//! back-reference invalidation rather than a lifetime puzzle.

use indexmap::IndexMap;

use fenestra_core::math::Vec2;

use crate::constants::TAB_STRIP_HEIGHT;
use crate::content::ContentId;
use crate::dirty::DirtyFlags;
use crate::node::{DockKind, DockNode};

/// Node identifier in the dock arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Arena of dock nodes plus the ordered root list.
///
/// Docked roots keep their creation order; floating roots stack above
/// them, later creations hit-testing first.
pub struct DockTree {
    nodes: IndexMap<NodeId, DockNode>,
    roots: Vec<NodeId>,
    next_id: usize,
    dirty_accum: DirtyFlags,
}

impl DockTree {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            roots: Vec::new(),
            next_id: 0,
            dirty_accum: DirtyFlags::empty(),
        }
    }

    fn insert_node(&mut self, node: DockNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        self.mark_dirty(id, DirtyFlags::LAYOUT | DirtyFlags::STRUCTURE);
        id
    }

    /// Create an empty leaf registered as a new top-level root.
    pub fn create_root_leaf(&mut self, is_floating: bool) -> NodeId {
        let id = self.insert_node(DockNode::leaf(is_floating));
        self.roots.push(id);
        id
    }

    /// Create an empty leaf that is not part of any tree yet.
    ///
    /// Used for attach payloads and leaf clones; the caller wires the
    /// parent before the next event is processed.
    pub fn create_detached_leaf(&mut self, is_floating: bool) -> NodeId {
        self.insert_node(DockNode::leaf(is_floating))
    }

    pub fn get(&self, id: NodeId) -> Option<&DockNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DockNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf panels across the whole forest.
    pub fn leaf_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_leaf()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DockNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn docked_root_count(&self) -> usize {
        self.roots
            .iter()
            .filter(|id| self.get(**id).is_some_and(|node| !node.is_floating))
            .count()
    }

    /// Register an existing node as a top-level root.
    pub fn add_root(&mut self, id: NodeId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Remove a node from the root list without touching the arena.
    pub fn unroot(&mut self, id: NodeId) {
        self.roots.retain(|root| *root != id);
    }

    /// Delete a single node from the arena and the root list.
    pub fn remove_node(&mut self, id: NodeId) -> Option<DockNode> {
        self.unroot(id);
        self.dirty_accum |= DirtyFlags::STRUCTURE;
        self.nodes.shift_remove(&id)
    }

    /// Delete a node and every descendant.
    pub fn remove_subtree(&mut self, id: NodeId) {
        for node in self.subtree(id) {
            self.remove_node(node);
        }
    }

    pub fn mark_dirty(&mut self, id: NodeId, flags: DirtyFlags) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dirty |= flags;
            self.dirty_accum |= flags;
        }
    }

    /// Take the flags accumulated since the last call.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty_accum)
    }

    /// Walk up to the root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.get(current).and_then(|node| node.parent) {
            current = parent;
        }
        current
    }

    /// The other child of `parent`, given one of them.
    pub fn sibling_of(&self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        let children = self.get(parent)?.split_children()?;
        if children[0] == child {
            Some(children[1])
        } else if children[1] == child {
            Some(children[0])
        } else {
            None
        }
    }

    /// Depth-first list of `id` and all its descendants.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get(current) {
                out.push(current);
                if let Some(children) = node.split_children() {
                    stack.extend(children);
                }
            }
        }
        out
    }

    /// Total number of tabs held by leaves below (and including) `id`.
    pub fn subtree_tab_count(&self, id: NodeId) -> usize {
        self.subtree(id)
            .iter()
            .filter_map(|node| self.get(*node)?.tabs())
            .map(|tabs| tabs.len())
            .sum()
    }

    /// The leaf whose strip holds `content`.
    pub fn find_leaf_with_content(&self, content: ContentId) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| {
                node.tabs()
                    .is_some_and(|tabs| tabs.position_of(content).is_some())
            })
            .map(|(id, _)| id)
    }

    /// Hit-test the forest: floating trees first (topmost wins), then the
    /// docked underlay. Splits are descended by child rects; only leaves
    /// are returned.
    pub fn leaf_at(&self, point: Vec2) -> Option<NodeId> {
        let floating = self
            .roots
            .iter()
            .rev()
            .filter(|id| self.get(**id).is_some_and(|node| node.is_floating));
        let docked = self
            .roots
            .iter()
            .rev()
            .filter(|id| self.get(**id).is_some_and(|node| !node.is_floating));

        for root in floating.chain(docked) {
            if let Some(leaf) = self.descend_to_leaf(*root, point) {
                return Some(leaf);
            }
        }
        None
    }

    fn descend_to_leaf(&self, id: NodeId, point: Vec2) -> Option<NodeId> {
        let node = self.get(id)?;
        if !node.rect.contains(point) {
            return None;
        }

        match node.kind {
            DockKind::Leaf { .. } => Some(id),
            DockKind::Split { children, .. } => children
                .iter()
                .find_map(|child| self.descend_to_leaf(*child, point)),
        }
    }

    /// The leaf whose tab strip band is under the pointer, if any.
    pub fn strip_at(&self, point: Vec2) -> Option<NodeId> {
        let leaf = self.leaf_at(point)?;
        let rect = self.get(leaf)?.rect;
        (point.y <= rect.y + TAB_STRIP_HEIGHT).then_some(leaf)
    }

    /// Remove every node, leaving an empty forest.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty_accum |= DirtyFlags::STRUCTURE;
    }

    /// Check the structural invariants of the whole forest.
    ///
    /// Every split has exactly two children whose parents point back at
    /// it; every root has no parent; every non-root is referenced by its
    /// parent exactly once. Intended for tests and debug assertions.
    pub fn validate(&self) -> Result<(), String> {
        for root in &self.roots {
            let node = self
                .get(*root)
                .ok_or_else(|| format!("root {root:?} not in arena"))?;
            if node.parent.is_some() {
                return Err(format!("root {root:?} has a parent"));
            }
        }

        for (id, node) in self.iter() {
            match &node.kind {
                DockKind::Leaf { .. } => {}
                DockKind::Split { children, .. } => {
                    for child in children {
                        let child_node = self
                            .get(*child)
                            .ok_or_else(|| format!("split {id:?} references missing {child:?}"))?;
                        if child_node.parent != Some(id) {
                            return Err(format!(
                                "child {child:?} of {id:?} points at {:?}",
                                child_node.parent
                            ));
                        }
                        if self.roots.contains(child) {
                            return Err(format!("child {child:?} is also a root"));
                        }
                    }
                    if children[0] == children[1] {
                        return Err(format!("split {id:?} lists the same child twice"));
                    }
                }
            }

            if node.parent.is_none() && !self.roots.contains(&id) {
                // Detached nodes are only legal mid-mutation, never between
                // events.
                return Err(format!("{id:?} is parentless but not a root"));
            }
        }

        Ok(())
    }
}

impl Default for DockTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenestra_core::geometry::Rect;

    #[test]
    fn test_create_and_lookup() {
        let mut tree = DockTree::new();
        let a = tree.create_root_leaf(false);
        let b = tree.create_root_leaf(true);

        assert_ne!(a, b);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.roots(), &[a, b]);
        assert_eq!(tree.docked_root_count(), 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_node_unroots() {
        let mut tree = DockTree::new();
        let a = tree.create_root_leaf(false);

        assert!(tree.remove_node(a).is_some());
        assert!(tree.roots().is_empty());
        assert!(!tree.contains(a));
        assert!(tree.remove_node(a).is_none());
    }

    #[test]
    fn test_leaf_at_prefers_floating() {
        let mut tree = DockTree::new();
        let docked = tree.create_root_leaf(false);
        let floating = tree.create_root_leaf(true);

        tree.get_mut(docked).unwrap().rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        tree.get_mut(floating).unwrap().rect = Rect::new(100.0, 100.0, 400.0, 400.0);

        assert_eq!(tree.leaf_at(Vec2::new(150.0, 150.0)), Some(floating));
        assert_eq!(tree.leaf_at(Vec2::new(700.0, 50.0)), Some(docked));
        assert_eq!(tree.leaf_at(Vec2::new(900.0, 50.0)), None);
    }

    #[test]
    fn test_strip_at_band() {
        let mut tree = DockTree::new();
        let leaf = tree.create_root_leaf(false);
        tree.get_mut(leaf).unwrap().rect = Rect::new(0.0, 0.0, 400.0, 300.0);

        assert_eq!(tree.strip_at(Vec2::new(10.0, 10.0)), Some(leaf));
        assert_eq!(tree.strip_at(Vec2::new(10.0, 100.0)), None);
    }

    #[test]
    fn test_take_dirty_accumulates() {
        let mut tree = DockTree::new();
        let a = tree.create_root_leaf(false);
        tree.take_dirty();

        tree.mark_dirty(a, DirtyFlags::GEOMETRY);
        let flags = tree.take_dirty();
        assert!(flags.contains(DirtyFlags::GEOMETRY));
        assert!(tree.take_dirty().is_empty());
    }
}
