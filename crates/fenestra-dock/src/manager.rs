//! The dock manager: one context object owning the forest, the content
//! registry, the single in-flight drag session and the layout store.
//!
//! Cross-cutting state (the selected window, the dragging tab) lives
//! here as plain fields rather than statics, written by pointer events
//! and read by the render layer.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error, warn};

use fenestra_core::geometry::{Rect, Size};
use fenestra_core::math::Vec2;

use crate::border::{self, closest_border, draggable_split};
use crate::constants::{DEFAULT_FLOATING_SIZE, MENU_BAR_HEIGHT, RATIO_DEFAULT};
use crate::content::{ContentError, ContentHandle, ContentId, ContentPrototype, ContentRegistry};
use crate::drag::{DragKind, DragSession, SnapMode};
use crate::node::{Border, LayoutType};
use crate::ops::{self, DockError};
use crate::snapshot::{self, Layout, ManagerIndex};
use crate::store::{LayoutStore, StoreError};
use crate::tabs::Tab;
use crate::tree::{DockTree, NodeId};

/// Manager configuration: viewport reference geometry plus persistence
/// locations and cadence.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Reference resolution all normalized geometry is relative to.
    pub reference_size: Size<f32>,
    /// Height reserved above the docked area for the menu bar.
    pub menu_bar_height: f32,
    /// Quiet time before a dirty forest is flushed to disk, in seconds.
    pub autosave_delay: f32,
    /// Directory holding the layout files and index.
    pub layout_dir: PathBuf,
    /// Bundled defaults copied into `layout_dir` on first run.
    pub default_layout_dir: Option<PathBuf>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            reference_size: Size::new(1920.0, 1080.0),
            menu_bar_height: MENU_BAR_HEIGHT,
            autosave_delay: 0.75,
            layout_dir: PathBuf::from("fenestra-layouts"),
            default_layout_dir: None,
        }
    }
}

/// Errors surfaced by the manager's public API.
#[derive(Debug)]
pub enum ManagerError {
    /// Content type requested but never registered.
    NotRegistered(String),
    /// A prototype with the same content type already exists.
    DuplicateContentType(String),
    /// The named layout is not in the manager's index.
    UnknownLayout(String),
    /// Refusing to remove the last remaining layout.
    LastLayout,
    /// A structural operation failed.
    Structural(DockError),
    /// The layout store failed.
    Store(StoreError),
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::NotRegistered(key) => {
                write!(f, "content type '{key}' is not registered")
            }
            ManagerError::DuplicateContentType(key) => {
                write!(f, "content type '{key}' is already registered")
            }
            ManagerError::UnknownLayout(name) => write!(f, "unknown layout '{name}'"),
            ManagerError::LastLayout => write!(f, "cannot remove the last layout"),
            ManagerError::Structural(err) => write!(f, "structural error: {err}"),
            ManagerError::Store(err) => write!(f, "layout store error: {err}"),
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManagerError::Structural(err) => Some(err),
            ManagerError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ManagerError {
    fn from(err: StoreError) -> Self {
        ManagerError::Store(err)
    }
}

impl From<DockError> for ManagerError {
    fn from(err: DockError) -> Self {
        ManagerError::Structural(err)
    }
}

impl From<ContentError> for ManagerError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Duplicate(key) => ManagerError::DuplicateContentType(key),
            ContentError::NotRegistered(key) => ManagerError::NotRegistered(key),
        }
    }
}

/// Process-wide dock state: the forest, the registry, hover/drag
/// bookkeeping and named-layout persistence.
pub struct DockManager {
    pub(crate) tree: DockTree,
    registry: ContentRegistry,
    config: ManagerConfig,
    store: LayoutStore,
    layout_names: Vec<String>,
    current_layout: Option<String>,
    pub(crate) drag: Option<DragSession>,
    pub(crate) hovered: Option<NodeId>,
    dirty: bool,
    quiet: f32,
    pub(crate) loading: bool,
    next_content_id: u64,
}

impl DockManager {
    /// Open a manager over the configured layout directory, seeding it
    /// from the bundled defaults on first run.
    pub fn new(config: ManagerConfig) -> Result<Self, ManagerError> {
        let store = LayoutStore::open(&config.layout_dir)?;

        if let Some(defaults) = &config.default_layout_dir {
            // First-run seeding is best effort; an unreadable defaults
            // directory should not stop the session.
            if let Err(err) = store.seed_from(defaults) {
                warn!(%err, "failed to seed default layouts");
            }
        }

        let (layout_names, current_layout) = match store.load_index() {
            Ok(Some(index)) => (index.layouts, index.current),
            Ok(None) => (store.scan_layouts()?, None),
            Err(err) => {
                error!(%err, "layout index unreadable, rebuilding from disk");
                (store.scan_layouts().unwrap_or_default(), None)
            }
        };

        Ok(Self {
            tree: DockTree::new(),
            registry: ContentRegistry::new(),
            config,
            store,
            layout_names,
            current_layout,
            drag: None,
            hovered: None,
            dirty: false,
            quiet: 0.0,
            loading: false,
            next_content_id: 0,
        })
    }

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The docked region: the reference viewport minus the menu bar.
    pub fn work_area(&self) -> Rect<f32> {
        Rect::new(
            0.0,
            self.config.menu_bar_height,
            self.config.reference_size.width,
            self.config.reference_size.height - self.config.menu_bar_height,
        )
    }

    // ------------------------------------------------------------------
    // Content lifecycle
    // ------------------------------------------------------------------

    /// Register a content prototype under its unique type key.
    pub fn register_content(
        &mut self,
        prototype: Box<dyn ContentPrototype>,
    ) -> Result<(), ManagerError> {
        self.registry.register(prototype)?;
        Ok(())
    }

    /// Create a new content window of the given type.
    ///
    /// The first window docks; every later one floats, so at least one
    /// docked window always exists.
    pub fn create_window(&mut self, content_type: &str) -> Result<ContentHandle, ManagerError> {
        let (key, label) = {
            let proto = self.registry.get(content_type)?;
            (proto.content_type().to_owned(), proto.title().to_owned())
        };

        let is_floating = self.tree.docked_root_count() > 0;
        let node = self.tree.create_root_leaf(is_floating);

        let rect = if is_floating {
            self.clamp_to_work_area(Rect::new(
                self.config.reference_size.width / 2.0 - DEFAULT_FLOATING_SIZE.width / 2.0,
                self.config.reference_size.height / 2.0 - DEFAULT_FLOATING_SIZE.height / 2.0,
                DEFAULT_FLOATING_SIZE.width,
                DEFAULT_FLOATING_SIZE.height,
            ))
        } else {
            self.work_area()
        };
        if let Some(n) = self.tree.get_mut(node) {
            n.rect = rect;
        }

        let handle = self.alloc_handle(key);
        if let Some(tabs) = self.tree.get_mut(node).and_then(|n| n.tabs_mut()) {
            let index = tabs.push(Tab::new(label, handle.clone()));
            tabs.select(index);
        }

        self.mark_layout_dirty();
        debug!(%content_type, ?node, is_floating, "created window");
        Ok(handle)
    }

    fn alloc_handle(&mut self, content_type: String) -> ContentHandle {
        self.next_content_id += 1;
        ContentHandle::new(ContentId(self.next_content_id), content_type)
    }

    /// Remove one content window's tab, collapsing its leaf if it
    /// empties.
    pub fn destroy_content(&mut self, content: ContentId) {
        let Some(leaf) = self.tree.find_leaf_with_content(content) else {
            return;
        };

        if let Some(tabs) = self.tree.get_mut(leaf).and_then(|n| n.tabs_mut())
            && let Some((_, was_active)) = tabs.remove_content(content)
        {
            if was_active && !tabs.is_empty() {
                tabs.select(0);
            }
        }

        self.cleanup_empty_leaf(leaf, None);
        self.mark_layout_dirty();
        debug!(?content, "destroyed content");
    }

    /// Destroy a whole window subtree: tabs, splits and all.
    pub fn destroy_window(&mut self, node: NodeId) -> Result<(), ManagerError> {
        ops::destroy(&mut self.tree, node)?;
        self.mark_layout_dirty();
        Ok(())
    }

    /// Dock an existing content window onto `target` with an explicit
    /// orientation, the programmatic sibling of the drag gesture.
    pub fn dock_content(
        &mut self,
        content: ContentId,
        target: NodeId,
        layout: LayoutType,
    ) -> Result<(), ManagerError> {
        let Some(origin) = self.tree.find_leaf_with_content(content) else {
            return Ok(());
        };
        if origin == target {
            return Ok(());
        }

        let tab = {
            let Some(tabs) = self.tree.get_mut(origin).and_then(|n| n.tabs_mut()) else {
                return Ok(());
            };
            let Some((tab, was_active)) = tabs.remove_content(content) else {
                return Ok(());
            };
            if was_active && !tabs.is_empty() {
                tabs.select(0);
            }
            tab
        };

        let target = self
            .cleanup_empty_leaf(origin, Some(target))
            .unwrap_or(target);

        let floating = self
            .tree
            .get(target)
            .map(|n| n.is_floating)
            .unwrap_or(false);
        let node = self.tree.create_detached_leaf(floating);
        if let Some(tabs) = self.tree.get_mut(node).and_then(|n| n.tabs_mut()) {
            tabs.push(tab);
        }

        ops::attach_with_layout(&mut self.tree, target, node, layout)?;
        self.mark_layout_dirty();
        Ok(())
    }

    pub fn docked_root_count(&self) -> usize {
        self.tree.docked_root_count()
    }

    /// Number of window panels (leaves) across the whole forest.
    pub fn window_count(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Select the tab holding `content` in its strip.
    pub fn activate_content(&mut self, content: ContentId) {
        let Some(leaf) = self.tree.find_leaf_with_content(content) else {
            return;
        };
        if let Some(tabs) = self.tree.get_mut(leaf).and_then(|n| n.tabs_mut())
            && tabs.select_content(content)
        {
            self.mark_layout_dirty();
        }
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Track the pointer: drives the active drag, or refreshes the
    /// hovered leaf and its closest border.
    pub fn pointer_moved(&mut self, pos: Vec2) {
        if self.drag.is_some() {
            self.drag_moved(pos);
            return;
        }

        if let Some(prev) = self.hovered.take()
            && let Some(node) = self.tree.get_mut(prev)
        {
            node.closest_border = Border::None;
        }

        if let Some(leaf) = self.tree.leaf_at(pos) {
            let rect = match self.tree.get(leaf) {
                Some(node) => node.rect,
                None => return,
            };
            let border = closest_border(pos, &rect);
            if let Some(node) = self.tree.get_mut(leaf) {
                node.closest_border = border;
            }
            self.hovered = Some(leaf);
        }
    }

    /// Pointer down: maybe begins a border drag. An ancestor split
    /// owning the hovered border starts a split resize; a border on a
    /// floating root's outer edge starts a floating resize.
    pub fn pointer_pressed(&mut self, pos: Vec2) {
        if self.drag.is_some() {
            return;
        }
        self.pointer_moved(pos);

        let Some(leaf) = self.hovered else {
            return;
        };
        let border = self
            .tree
            .get(leaf)
            .map(|n| n.closest_border)
            .unwrap_or_default();
        if !border.is_edge() {
            return;
        }

        if let Some(split) = draggable_split(&self.tree, leaf, border) {
            let start_ratio = self
                .tree
                .get(split)
                .and_then(|n| n.split_layout())
                .map(|(_, ratio)| ratio)
                .unwrap_or(RATIO_DEFAULT);
            self.drag = Some(DragSession::new(
                DragKind::SplitResize { split, start_ratio },
                pos,
            ));
            debug!(?split, start_ratio, "began split resize");
            return;
        }

        let root = self.tree.root_of(leaf);
        let root_is_floating = self
            .tree
            .get(root)
            .map(|n| n.is_floating)
            .unwrap_or(false);
        if root_is_floating && self.border_on_root_edge(leaf, root, border) {
            let start_rect = match self.tree.get(root) {
                Some(node) => node.rect,
                None => return,
            };
            self.drag = Some(DragSession::new(
                DragKind::FloatResize {
                    node: root,
                    border,
                    start_rect,
                },
                pos,
            ));
            debug!(?root, ?border, "began floating resize");
        }
    }

    /// Begin moving a floating root window.
    pub fn begin_float_move(&mut self, node: NodeId, pos: Vec2, snap: SnapMode) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(root) = self.tree.get(node) else {
            return false;
        };
        if !root.is_root() || !root.is_floating {
            return false;
        }

        self.drag = Some(DragSession::new(
            DragKind::FloatMove {
                node,
                start_pos: root.rect.position(),
                snap,
            },
            pos,
        ));
        true
    }

    /// Pointer up: resolves whatever gesture is in flight. There is no
    /// cancel path; the last state always wins.
    pub fn pointer_released(&mut self, pos: Vec2) {
        let Some(mut session) = self.drag.take() else {
            return;
        };
        session.update(pos);

        match session.kind {
            DragKind::SplitResize { .. }
            | DragKind::FloatMove { .. }
            | DragKind::FloatResize { .. } => self.mark_layout_dirty(),
            DragKind::Tab(tab_drag) => self.end_tab_drag(tab_drag, pos),
        }
    }

    fn drag_moved(&mut self, pos: Vec2) {
        let Some(mut session) = self.drag.take() else {
            return;
        };
        session.update(pos);
        let delta = session.delta();

        match &mut session.kind {
            DragKind::SplitResize { split, start_ratio } => {
                let (split, start_ratio) = (*split, *start_ratio);
                self.resize_split_drag(split, start_ratio, delta);
            }
            DragKind::Tab(tab_drag) => self.tab_drag_moved(tab_drag, pos),
            DragKind::FloatMove {
                node,
                start_pos,
                snap,
            } => {
                let (node, start_pos, snap) = (*node, *start_pos, *snap);
                self.float_move_drag(node, start_pos, snap, delta);
            }
            DragKind::FloatResize {
                node,
                border,
                start_rect,
            } => {
                let (node, border, start_rect) = (*node, *border, *start_rect);
                self.float_resize_drag(node, border, start_rect, delta);
            }
        }

        self.drag = Some(session);
    }

    fn resize_split_drag(&mut self, split: NodeId, start_ratio: f32, delta: Vec2) {
        let Some(node) = self.tree.get(split) else {
            return;
        };
        let Some((layout, _)) = node.split_layout() else {
            return;
        };

        let total = match layout {
            LayoutType::Horizontal => node.rect.width,
            LayoutType::Vertical => node.rect.height,
        };
        if total <= 0.0 {
            return;
        }

        let diff = border::drag_axis(layout, delta);
        let start = total * start_ratio / 100.0;
        let value = (start + diff).clamp(0.0, total);
        let percent = value / total * 100.0;

        if let Err(err) = ops::set_ratio(&mut self.tree, split, percent) {
            warn!(%err, "split resize lost its node");
        }
    }

    fn float_move_drag(&mut self, node: NodeId, start_pos: Vec2, snap: SnapMode, delta: Vec2) {
        let Some(root) = self.tree.get(node) else {
            return;
        };
        let size = root.rect.size();

        let mut pos = start_pos + delta;
        if let Some(grid) = snap.grid() {
            pos.x = (pos.x / grid).round() * grid;
            pos.y = (pos.y / grid).round() * grid;
        }

        let rect = self.clamp_to_work_area(Rect::new(pos.x, pos.y, size.width, size.height));
        if let Some(root) = self.tree.get_mut(node) {
            root.rect = rect;
        }
        self.tree
            .mark_dirty(node, crate::dirty::DirtyFlags::GEOMETRY);
        ops::update_layouts(&mut self.tree, node);
    }

    fn float_resize_drag(
        &mut self,
        node: NodeId,
        border: Border,
        start_rect: Rect<f32>,
        delta: Vec2,
    ) {
        let Some(root) = self.tree.get(node) else {
            return;
        };
        let min = root.min_size;
        let work = self.work_area();

        let mut rect = start_rect;
        match border {
            Border::Left => {
                let max_x = start_rect.right() - min.width;
                let new_x = (start_rect.x + delta.x).clamp(work.x, max_x);
                rect.width = start_rect.right() - new_x;
                rect.x = new_x;
            }
            Border::Right => {
                rect.width = (start_rect.width + delta.x)
                    .clamp(min.width, work.right() - start_rect.x);
            }
            Border::Top => {
                let max_y = start_rect.bottom() - min.height;
                let new_y = (start_rect.y + delta.y).clamp(work.y, max_y);
                rect.height = start_rect.bottom() - new_y;
                rect.y = new_y;
            }
            Border::Bottom => {
                rect.height = (start_rect.height + delta.y)
                    .clamp(min.height, work.bottom() - start_rect.y);
            }
            Border::None => return,
        }

        if let Some(root) = self.tree.get_mut(node) {
            root.rect = rect;
        }
        self.tree.mark_dirty(
            node,
            crate::dirty::DirtyFlags::GEOMETRY | crate::dirty::DirtyFlags::LAYOUT,
        );
        ops::update_layouts(&mut self.tree, node);
    }

    /// Whether a leaf's detected border lies on its tree root's outer
    /// edge (which is what a floating resize grabs).
    fn border_on_root_edge(&self, leaf: NodeId, root: NodeId, border: Border) -> bool {
        let (Some(leaf_rect), Some(root_rect)) = (
            self.tree.get(leaf).map(|n| n.rect),
            self.tree.get(root).map(|n| n.rect),
        ) else {
            return false;
        };

        let eps = 0.5;
        match border {
            Border::Left => (leaf_rect.x - root_rect.x).abs() < eps,
            Border::Right => (leaf_rect.right() - root_rect.right()).abs() < eps,
            Border::Top => (leaf_rect.y - root_rect.y).abs() < eps,
            Border::Bottom => (leaf_rect.bottom() - root_rect.bottom()).abs() < eps,
            Border::None => false,
        }
    }

    pub(crate) fn clamp_to_work_area(&self, rect: Rect<f32>) -> Rect<f32> {
        let work = self.work_area();
        let x = rect
            .x
            .clamp(work.x, (work.right() - rect.width).max(work.x));
        let y = rect
            .y
            .clamp(work.y, (work.bottom() - rect.height).max(work.y));
        Rect::new(x, y, rect.width, rect.height)
    }

    /// Collapse `leaf` if its strip has emptied.
    ///
    /// Returns the node that now holds `keep`'s content: collapsing a
    /// split absorbs the surviving sibling into the parent, so a caller
    /// holding the sibling's id must switch to the parent's.
    pub(crate) fn cleanup_empty_leaf(
        &mut self,
        leaf: NodeId,
        keep: Option<NodeId>,
    ) -> Option<NodeId> {
        if !self.tree.contains(leaf) {
            return keep;
        }
        let empty = self
            .tree
            .get(leaf)
            .and_then(|n| n.tabs())
            .is_some_and(|tabs| tabs.is_empty());
        if !empty {
            return keep;
        }

        match self.tree.get(leaf).and_then(|n| n.parent) {
            Some(parent) => {
                let survivor = self.tree.sibling_of(parent, leaf);
                match ops::detach(&mut self.tree, parent, leaf) {
                    Ok(true) if keep.is_some() && keep == survivor => Some(parent),
                    Ok(_) => keep,
                    Err(err) => {
                        warn!(%err, "failed to collapse emptied leaf");
                        keep
                    }
                }
            }
            None => {
                self.tree.remove_node(leaf);
                keep
            }
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn current_layout(&self) -> Option<&str> {
        self.current_layout.as_deref()
    }

    pub fn list_layouts(&self) -> &[String] {
        &self.layout_names
    }

    fn index(&self) -> ManagerIndex {
        ManagerIndex {
            current: self.current_layout.clone(),
            layouts: self.layout_names.clone(),
        }
    }

    /// Snapshot the live forest under `name` and persist it, making it
    /// the current layout.
    pub fn save_layout(&mut self, name: &str) -> Result<(), ManagerError> {
        let layout = Layout::capture(&self.tree, name, self.config.reference_size);
        self.store.save_layout(&layout)?;

        if !self.layout_names.iter().any(|n| n == name) {
            self.layout_names.push(name.to_owned());
        }
        self.current_layout = Some(name.to_owned());
        self.store.save_index(&self.index())?;

        self.dirty = false;
        self.quiet = 0.0;
        Ok(())
    }

    /// Replace the live forest with the named layout.
    ///
    /// The file is read and checked before anything is destroyed: a
    /// missing or corrupt layout leaves the current forest untouched.
    pub fn load_layout(&mut self, name: &str) -> Result<(), ManagerError> {
        let layout = self.store.load_layout(name)?;
        for key in layout.content_types() {
            if !self.registry.contains(key) {
                return Err(ManagerError::NotRegistered(key.to_owned()));
            }
        }

        self.loading = true;
        self.drag = None;
        self.hovered = None;
        self.tree.clear();

        let reference = self.config.reference_size;
        let work_area = self.work_area();
        let registry = &self.registry;
        let next_id = &mut self.next_content_id;
        snapshot::restore_forest(
            &mut self.tree,
            &layout.windows,
            reference,
            work_area,
            &mut |tab_snap| {
                let label = registry
                    .get(&tab_snap.content_type)
                    .map(|proto| proto.title().to_owned())
                    .unwrap_or_else(|_| tab_snap.content_type.clone());
                *next_id += 1;
                Tab::new(
                    label,
                    ContentHandle::new(ContentId(*next_id), tab_snap.content_type.clone()),
                )
            },
        );

        self.current_layout = Some(name.to_owned());
        if !self.layout_names.iter().any(|n| n == name) {
            self.layout_names.push(name.to_owned());
        }

        // Construction side effects are not user edits; swallow them so
        // the load itself does not trigger a save storm.
        let _ = self.tree.take_dirty();
        self.loading = false;
        self.dirty = false;
        self.quiet = 0.0;

        debug!(%name, windows = self.tree.roots().len(), "loaded layout");
        Ok(())
    }

    /// Forget a named layout. The last remaining layout cannot be
    /// removed.
    pub fn remove_layout(&mut self, name: &str) -> Result<(), ManagerError> {
        if !self.layout_names.iter().any(|n| n == name) {
            return Err(ManagerError::UnknownLayout(name.to_owned()));
        }
        if self.layout_names.len() == 1 {
            return Err(ManagerError::LastLayout);
        }

        self.store.remove_layout(name)?;
        self.layout_names.retain(|n| n != name);
        if self.current_layout.as_deref() == Some(name) {
            self.current_layout = self.layout_names.first().cloned();
        }
        self.store.save_index(&self.index())?;
        Ok(())
    }

    /// Fold structural dirt into the persistence flag and flush the
    /// debounced autosave once the forest has been quiet long enough.
    pub fn tick(&mut self, dt: f32) {
        if !self.tree.take_dirty().is_empty() && !self.loading {
            self.dirty = true;
            self.quiet = 0.0;
        }

        if !self.dirty || self.loading {
            return;
        }

        self.quiet += dt;
        if self.quiet < self.config.autosave_delay {
            return;
        }
        self.flush();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn flush(&mut self) {
        let Some(name) = self.current_layout.clone() else {
            // Nothing named to write into yet; an explicit save_layout
            // will pick the changes up.
            self.dirty = false;
            return;
        };

        let layout = Layout::capture(&self.tree, &name, self.config.reference_size);
        let result = self
            .store
            .save_layout(&layout)
            .and_then(|()| self.store.save_index(&self.index()));

        match result {
            Ok(()) => {
                self.dirty = false;
                self.quiet = 0.0;
                debug!(%name, "autosaved layout");
            }
            Err(err) => {
                // Keep the dirty flag; the next quiet period retries.
                error!(%err, "autosave failed, will retry");
                self.quiet = 0.0;
            }
        }
    }

    pub(crate) fn mark_layout_dirty(&mut self) {
        let _ = self.tree.take_dirty();
        if let Some(hovered) = self.hovered
            && !self.tree.contains(hovered)
        {
            self.hovered = None;
        }
        if self.loading {
            return;
        }
        self.dirty = true;
        self.quiet = 0.0;
    }
}
