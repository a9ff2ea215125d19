//! Serializable mirror of the dock forest.
//!
//! Snapshot types are deliberately independent of the live tree: they
//! carry only what a layout needs to be rebuilt (content-type keys,
//! orientation, ratio, floating geometry), never node ids or handles.

use serde::{Deserialize, Serialize};

use fenestra_core::geometry::{Rect, Size};

use crate::constants::{RATIO_DEFAULT, RATIO_MAX, RATIO_MIN};
use crate::node::{DockKind, LayoutType};
use crate::ops;
use crate::tabs::Tab;
use crate::tree::{DockTree, NodeId};

/// Version stamp embedded in every persisted file.
pub const SCHEMA_VERSION: u32 = 1;

/// One persisted tab: the registry key plus whether it was selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub content_type: String,
    pub active: bool,
}

/// One node of a persisted tree.
///
/// Leaves carry `tabs`; splits carry `layout`/`ratio` and exactly two
/// children. Normalized geometry is only meaningful on floating roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub is_floating: bool,
    pub tabs: Vec<TabSnapshot>,
    pub normalized_size: (f32, f32),
    pub normalized_position: (f32, f32),
    pub layout: LayoutType,
    pub ratio: f32,
    pub children: Vec<LayoutSnapshot>,
}

/// A named forest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub windows: Vec<LayoutSnapshot>,
}

/// The manager's persisted index: every known layout plus the current one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ManagerIndex {
    pub current: Option<String>,
    pub layouts: Vec<String>,
}

impl LayoutSnapshot {
    /// Capture the subtree rooted at `id`.
    pub fn capture(tree: &DockTree, id: NodeId, reference: Size<f32>) -> Option<Self> {
        let node = tree.get(id)?;

        let mut snap = LayoutSnapshot {
            is_floating: node.is_floating,
            tabs: Vec::new(),
            normalized_size: (0.0, 0.0),
            normalized_position: (0.0, 0.0),
            layout: LayoutType::default(),
            ratio: RATIO_DEFAULT,
            children: Vec::new(),
        };

        // Only floating roots keep their own geometry; docked trees fill
        // whatever region the manager assigns.
        if node.is_root() && node.is_floating {
            snap.normalized_size = (
                node.rect.width / reference.width,
                node.rect.height / reference.height,
            );
            snap.normalized_position = (
                node.rect.x / reference.width,
                node.rect.y / reference.height,
            );
        }

        match &node.kind {
            DockKind::Leaf { tabs } => {
                snap.tabs = tabs
                    .iter()
                    .enumerate()
                    .map(|(index, tab)| TabSnapshot {
                        content_type: tab.content.content_type.clone(),
                        active: tabs.active_index() == Some(index),
                    })
                    .collect();
            }
            DockKind::Split {
                layout,
                ratio,
                children,
            } => {
                snap.layout = *layout;
                snap.ratio = *ratio;
                snap.children = children
                    .iter()
                    .filter_map(|child| Self::capture(tree, *child, reference))
                    .collect();
            }
        }

        Some(snap)
    }

    /// Check the 0-or-2 children shape all the way down.
    pub fn is_well_formed(&self) -> bool {
        match self.children.len() {
            0 => true,
            2 => self.children.iter().all(Self::is_well_formed),
            _ => false,
        }
    }

    /// Every content-type key mentioned in this subtree.
    pub fn content_types<'snap>(&'snap self, out: &mut Vec<&'snap str>) {
        for tab in &self.tabs {
            out.push(&tab.content_type);
        }
        for child in &self.children {
            child.content_types(out);
        }
    }
}

impl Layout {
    /// Capture the entire live forest under `name`.
    pub fn capture(tree: &DockTree, name: impl Into<String>, reference: Size<f32>) -> Self {
        Layout {
            name: name.into(),
            windows: tree
                .roots()
                .iter()
                .filter_map(|root| LayoutSnapshot::capture(tree, *root, reference))
                .collect(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.windows.iter().all(LayoutSnapshot::is_well_formed)
    }

    pub fn content_types(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for window in &self.windows {
            window.content_types(&mut out);
        }
        out
    }
}

/// Rebuild a forest from snapshots into an (empty) tree.
///
/// `make_tab` turns each persisted tab back into a live one; the caller
/// owns handle allocation. Docked roots fill `work_area`; floating roots
/// take their normalized geometry scaled by `reference`.
pub fn restore_forest(
    tree: &mut DockTree,
    windows: &[LayoutSnapshot],
    reference: Size<f32>,
    work_area: Rect<f32>,
    make_tab: &mut dyn FnMut(&TabSnapshot) -> Tab,
) {
    for snap in windows {
        let root = restore_node(tree, snap, None, snap.is_floating, make_tab);
        tree.add_root(root);

        if let Some(node) = tree.get_mut(root) {
            node.rect = if snap.is_floating {
                Rect::new(
                    snap.normalized_position.0 * reference.width,
                    snap.normalized_position.1 * reference.height,
                    snap.normalized_size.0 * reference.width,
                    snap.normalized_size.1 * reference.height,
                )
            } else {
                work_area
            };
        }

        ops::update_layouts(tree, root);
    }
}

fn restore_node(
    tree: &mut DockTree,
    snap: &LayoutSnapshot,
    parent: Option<NodeId>,
    is_floating: bool,
    make_tab: &mut dyn FnMut(&TabSnapshot) -> Tab,
) -> NodeId {
    // Nodes start as empty leaves; split payload is attached after both
    // children exist.
    let id = tree.create_detached_leaf(is_floating);
    if let Some(node) = tree.get_mut(id) {
        node.parent = parent;
    }

    if snap.children.len() == 2 {
        let first = restore_node(tree, &snap.children[0], Some(id), is_floating, make_tab);
        let second = restore_node(tree, &snap.children[1], Some(id), is_floating, make_tab);
        if let Some(node) = tree.get_mut(id) {
            node.kind = DockKind::Split {
                layout: snap.layout,
                ratio: snap.ratio.clamp(RATIO_MIN, RATIO_MAX),
                children: [first, second],
            };
        }
    } else {
        let mut active = None;
        if let Some(tabs) = tree.get_mut(id).and_then(|node| node.tabs_mut()) {
            for (index, tab_snap) in snap.tabs.iter().enumerate() {
                tabs.push(make_tab(tab_snap));
                if tab_snap.active {
                    active = Some(index);
                }
            }
            if let Some(index) = active {
                tabs.select(index);
            }
        }
    }

    id
}
