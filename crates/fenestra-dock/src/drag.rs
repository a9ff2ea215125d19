//! Drag sessions.
//!
//! Exactly one gesture can be in flight at a time; the manager holds an
//! `Option<DragSession>` and every pointer event threads through it.
//! There is no cancel path: releasing the pointer always resolves the
//! session through one of the terminal cases.

use fenestra_core::geometry::Rect;
use fenestra_core::math::Vec2;

use crate::constants::{SNAP_GRID_COARSE, SNAP_GRID_FINE};
use crate::content::ContentId;
use crate::node::Border;
use crate::tabs::Tab;
use crate::tree::NodeId;

/// Grid snapping for floating-window moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    #[default]
    None,
    /// Snap to the coarse grid.
    Coarse,
    /// Snap to the fine grid.
    Fine,
}

impl SnapMode {
    pub fn grid(&self) -> Option<f32> {
        match self {
            SnapMode::None => None,
            SnapMode::Coarse => Some(SNAP_GRID_COARSE),
            SnapMode::Fine => Some(SNAP_GRID_FINE),
        }
    }
}

/// State of a tab mid-drag.
#[derive(Debug)]
pub struct TabDrag {
    /// Identity of the dragged tab's content.
    pub content: ContentId,
    /// The leaf the tab started in.
    pub origin: NodeId,
    /// Tab count of the origin strip at gesture begin.
    pub origin_tab_count: usize,
    /// The strip currently holding the tab, `None` while it floats free
    /// with the pointer.
    pub current_strip: Option<NodeId>,
    /// The tab itself while it is linked to no strip.
    pub held: Option<Tab>,
}

/// What a drag session is doing.
#[derive(Debug)]
pub enum DragKind {
    /// Dragging a shared split border to change its ratio.
    SplitResize { split: NodeId, start_ratio: f32 },
    /// Dragging a tab between strips, borders and empty space.
    Tab(TabDrag),
    /// Moving a floating root window.
    FloatMove {
        node: NodeId,
        start_pos: Vec2,
        snap: SnapMode,
    },
    /// Resizing a floating root window by one of its outer edges.
    FloatResize {
        node: NodeId,
        border: Border,
        start_rect: Rect<f32>,
    },
}

/// One in-flight pointer gesture.
#[derive(Debug)]
pub struct DragSession {
    pub kind: DragKind,
    pub start_pointer: Vec2,
    pub pointer: Vec2,
}

impl DragSession {
    pub fn new(kind: DragKind, start_pointer: Vec2) -> Self {
        Self {
            kind,
            start_pointer,
            pointer: start_pointer,
        }
    }

    pub fn update(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Pointer travel since gesture begin.
    pub fn delta(&self) -> Vec2 {
        self.pointer - self.start_pointer
    }
}
