//! The tab drag gesture: begin / move / end.
//!
//! Begin is guarded by the last-docked-window policy. During move the
//! tab either floats free with the pointer or rides whatever strip it
//! hovers. End resolves by spatial case analysis: split a bordered
//! target, split the origin itself, merge into a strip, or float.

use tracing::{debug, warn};

use fenestra_core::geometry::Rect;
use fenestra_core::math::Vec2;

use crate::border::closest_border;
use crate::constants::DEFAULT_FLOATING_SIZE;
use crate::content::ContentId;
use crate::drag::{DragKind, DragSession, TabDrag};
use crate::manager::DockManager;
use crate::node::Border;
use crate::ops;
use crate::tabs::Tab;
use crate::tree::NodeId;

impl DockManager {
    /// Begin dragging the tab holding `content`.
    ///
    /// Refused while another gesture is active, and refused silently
    /// when the tab is the last one of the last docked window: at least
    /// one docked window must always exist.
    pub fn begin_tab_drag(&mut self, content: ContentId, pos: Vec2) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(origin) = self.tree.find_leaf_with_content(content) else {
            return false;
        };

        let root = self.tree.root_of(origin);
        let root_is_floating = self
            .tree
            .get(root)
            .map(|node| node.is_floating)
            .unwrap_or(false);

        if !root_is_floating
            && self.tree.docked_root_count() == 1
            && self.tree.subtree_tab_count(root) == 1
        {
            warn!(?content, "refused tab drag: last docked window");
            return false;
        }

        let origin_tab_count = self
            .tree
            .get(origin)
            .and_then(|node| node.tabs())
            .map(|tabs| tabs.len())
            .unwrap_or(0);

        self.drag = Some(DragSession::new(
            DragKind::Tab(TabDrag {
                content,
                origin,
                origin_tab_count,
                current_strip: Some(origin),
                held: None,
            }),
            pos,
        ));
        debug!(?content, ?origin, "began tab drag");
        true
    }

    /// Move phase: unlink when off every strip, relink at the hovered
    /// position when over one.
    pub(crate) fn tab_drag_moved(&mut self, drag: &mut TabDrag, pos: Vec2) {
        match self.tree.strip_at(pos) {
            None => {
                // Off every strip: the tab floats free with the pointer.
                self.unlink_dragged_tab(drag);
            }
            Some(strip) => {
                if drag.current_strip == Some(strip) {
                    return;
                }
                self.unlink_dragged_tab(drag);
                if let Some(tab) = drag.held.take() {
                    let index = {
                        let (rect, len) = match self.tree.get(strip) {
                            Some(node) => (
                                node.rect,
                                node.tabs().map(|tabs| tabs.len()).unwrap_or(0),
                            ),
                            None => {
                                drag.held = Some(tab);
                                return;
                            }
                        };
                        insertion_index(&rect, len, pos)
                    };
                    if let Some(tabs) = self.tree.get_mut(strip).and_then(|n| n.tabs_mut()) {
                        tabs.insert(index, tab);
                        drag.current_strip = Some(strip);
                    } else {
                        drag.held = Some(tab);
                    }
                }
            }
        }
    }

    fn unlink_dragged_tab(&mut self, drag: &mut TabDrag) {
        let Some(strip) = drag.current_strip.take() else {
            return;
        };
        if let Some(tabs) = self.tree.get_mut(strip).and_then(|n| n.tabs_mut())
            && let Some((tab, was_active)) = tabs.remove_content(drag.content)
        {
            if was_active && !tabs.is_empty() {
                tabs.select(0);
            }
            drag.held = Some(tab);
        }
        // The emptied strip stays alive until the gesture ends; the end
        // cases decide whether it collapses.
    }

    /// End phase: resolve the drop.
    pub(crate) fn end_tab_drag(&mut self, mut drag: TabDrag, pos: Vec2) {
        match drag.current_strip {
            // (d) dropped onto a strip: the move phase already linked the
            // tab there; select it and collapse the origin if it emptied.
            Some(strip) => {
                if let Some(tabs) = self.tree.get_mut(strip).and_then(|n| n.tabs_mut()) {
                    tabs.select_content(drag.content);
                }
                if strip != drag.origin {
                    self.cleanup_empty_leaf(drag.origin, Some(strip));
                }
                debug!(content = ?drag.content, ?strip, "tab merged into strip");
            }
            None => {
                let Some(tab) = drag.held.take() else {
                    // The tab is linked nowhere and held nowhere: the
                    // origin strip never released it.
                    return;
                };

                let target = self.tree.leaf_at(pos);
                let border = target
                    .and_then(|t| self.tree.get(t))
                    .map(|node| closest_border(pos, &node.rect))
                    .unwrap_or(Border::None);

                let origin_tabs = self
                    .tree
                    .get(drag.origin)
                    .and_then(|node| node.tabs())
                    .map(|tabs| tabs.len())
                    .unwrap_or(0);

                match target {
                    // (a) split a different window at its detected border.
                    Some(target) if target != drag.origin && border.is_edge() => {
                        self.split_onto(target, border, tab, drag.origin);
                    }
                    // (b) split the origin itself, if it kept at least
                    // one tab.
                    Some(target)
                        if target == drag.origin && border.is_edge() && origin_tabs >= 1 =>
                    {
                        self.split_onto(target, border, tab, drag.origin);
                    }
                    // (c) anywhere else: a new floating window.
                    _ => self.float_tab(tab, pos, drag.origin),
                }
            }
        }

        self.mark_layout_dirty();
    }

    /// Split `target` at `border`, moving `tab` into the fresh leaf.
    fn split_onto(&mut self, target: NodeId, border: Border, tab: Tab, origin: NodeId) {
        // Collapse the emptied origin first; if the collapse absorbed the
        // target (it was the origin's sibling), follow it to the parent.
        let target = if target != origin {
            self.cleanup_empty_leaf(origin, Some(target))
                .unwrap_or(target)
        } else {
            target
        };

        let floating = self
            .tree
            .get(target)
            .map(|node| node.is_floating)
            .unwrap_or(false);
        let node = self.tree.create_detached_leaf(floating);
        if let Some(tabs) = self.tree.get_mut(node).and_then(|n| n.tabs_mut()) {
            tabs.push(tab);
        }

        match ops::attach(&mut self.tree, target, node, border) {
            Ok(()) => {
                debug!(?target, ?node, ?border, "tab split onto window");
            }
            Err(err) => {
                // Guarded no-op per the error model; the tab still needs
                // a home, so it becomes a floating window instead.
                warn!(%err, ?target, "attach refused, floating the tab");
                let pos = self
                    .tree
                    .get(target)
                    .map(|n| n.rect.center())
                    .unwrap_or(Vec2::ZERO);
                self.promote_floating(node, pos);
            }
        }
    }

    /// Case (c): the tab becomes a brand-new floating root at the drop
    /// position.
    fn float_tab(&mut self, tab: Tab, pos: Vec2, origin: NodeId) {
        let node = self.tree.create_detached_leaf(true);
        if let Some(tabs) = self.tree.get_mut(node).and_then(|n| n.tabs_mut()) {
            tabs.push(tab);
        }
        self.promote_floating(node, pos);
        self.cleanup_empty_leaf(origin, None);
        debug!(?node, "tab floated into new window");
    }

    pub(crate) fn promote_floating(&mut self, node: NodeId, pos: Vec2) {
        let rect = self.clamp_to_work_area(Rect::new(
            pos.x - DEFAULT_FLOATING_SIZE.width / 2.0,
            pos.y - DEFAULT_FLOATING_SIZE.height / 2.0,
            DEFAULT_FLOATING_SIZE.width,
            DEFAULT_FLOATING_SIZE.height,
        ));
        if let Some(n) = self.tree.get_mut(node) {
            n.parent = None;
            n.is_floating = true;
            n.rect = rect;
        }
        self.tree.add_root(node);
    }
}

/// Where between the existing tabs the pointer lands, assuming evenly
/// sized tabs across the strip.
fn insertion_index(rect: &Rect<f32>, len: usize, pos: Vec2) -> usize {
    if len == 0 {
        return 0;
    }
    let slot_width = rect.width / len as f32;
    if slot_width <= 0.0 {
        return len;
    }
    (((pos.x - rect.x) / slot_width).floor().max(0.0) as usize).min(len)
}
