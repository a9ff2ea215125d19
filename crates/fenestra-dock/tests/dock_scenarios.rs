//! End-to-end docking scenarios: window creation policy, drag-to-split,
//! border resize, collapse on detach, merge and float.

use fenestra_dock::{
    ContentHandle, ContentPrototype, DockManager, ManagerConfig, SnapMode, Vec2,
};

struct Panel {
    key: &'static str,
    title: &'static str,
}

impl ContentPrototype for Panel {
    fn content_type(&self) -> &str {
        self.key
    }

    fn title(&self) -> &str {
        self.title
    }
}

fn manager() -> (DockManager, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ManagerConfig {
        layout_dir: dir.path().join("layouts"),
        ..ManagerConfig::default()
    };
    let mut manager = DockManager::new(config).unwrap();
    manager
        .register_content(Box::new(Panel {
            key: "hierarchy",
            title: "Hierarchy",
        }))
        .unwrap();
    manager
        .register_content(Box::new(Panel {
            key: "inspector",
            title: "Inspector",
        }))
        .unwrap();
    (manager, dir)
}

fn leaf_content_type(manager: &DockManager, node: fenestra_dock::NodeId) -> String {
    manager
        .tree()
        .get(node)
        .unwrap()
        .tabs()
        .unwrap()
        .active_tab()
        .unwrap()
        .content
        .content_type
        .clone()
}

/// Drag `handle`'s tab so that it ends at `end`.
fn drag_tab(manager: &mut DockManager, handle: &ContentHandle, end: Vec2) {
    assert!(manager.begin_tab_drag(handle.id, Vec2::new(0.0, 0.0)));
    manager.pointer_moved(end);
    manager.pointer_released(end);
}

#[test]
fn first_window_docks_then_windows_float() {
    let (mut manager, _dir) = manager();

    let _a = manager.create_window("hierarchy").unwrap();
    assert_eq!(manager.docked_root_count(), 1);

    let _b = manager.create_window("inspector").unwrap();
    assert_eq!(manager.docked_root_count(), 1);
    assert_eq!(manager.tree().roots().len(), 2);

    let floating_root = manager.tree().roots()[1];
    assert!(manager.tree().get(floating_root).unwrap().is_floating);
    assert!(manager.tree().validate().is_ok());
}

#[test]
fn unregistered_content_type_fails() {
    let (mut manager, _dir) = manager();
    assert!(manager.create_window("console").is_err());
    assert_eq!(manager.window_count(), 0);
}

#[test]
fn duplicate_registration_fails() {
    let (mut manager, _dir) = manager();
    let err = manager.register_content(Box::new(Panel {
        key: "hierarchy",
        title: "Another Hierarchy",
    }));
    assert!(err.is_err());
}

// Scenario A: drag the floating window's tab onto the docked root's
// right border; expect a horizontal split [docked content, dragged
// content] at ratio 50.
#[test]
fn scenario_a_split_right() {
    let (mut manager, _dir) = manager();

    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();

    drag_tab(&mut manager, &b, Vec2::new(1910.0, 500.0));

    assert_eq!(manager.tree().roots().len(), 1);
    let root = manager.tree().roots()[0];
    let node = manager.tree().get(root).unwrap();
    assert!(node.is_split());

    let (layout, ratio) = node.split_layout().unwrap();
    assert_eq!(layout, fenestra_dock::LayoutType::Horizontal);
    assert_eq!(ratio, 50.0);

    let [first, second] = node.split_children().unwrap();
    assert_eq!(leaf_content_type(&manager, first), "hierarchy");
    assert_eq!(leaf_content_type(&manager, second), "inspector");

    // Both children sized from the 50% ratio.
    let first_rect = manager.tree().get(first).unwrap().rect;
    let second_rect = manager.tree().get(second).unwrap().rect;
    assert_eq!(first_rect.width, 960.0);
    assert_eq!(second_rect.x, 960.0);

    assert!(manager.tree().validate().is_ok());
}

// Scenario B: drag the shared border a quarter of the parent's width;
// the ratio follows, clamped to [10, 90].
#[test]
fn scenario_b_border_drag_resize() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    drag_tab(&mut manager, &b, Vec2::new(1910.0, 500.0));

    let root = manager.tree().roots()[0];

    // Grab the split line from the first child's right border band.
    manager.pointer_pressed(Vec2::new(950.0, 500.0));
    assert!(manager.is_dragging());

    manager.pointer_moved(Vec2::new(1430.0, 500.0));
    let (_, ratio) = manager.tree().get(root).unwrap().split_layout().unwrap();
    assert_eq!(ratio, 75.0);

    let [first, second] = manager.tree().get(root).unwrap().split_children().unwrap();
    assert_eq!(manager.tree().get(first).unwrap().rect.width, 1440.0);
    assert_eq!(manager.tree().get(second).unwrap().rect.width, 480.0);

    // Way past the edge: the clamp holds the ratio inside the band.
    manager.pointer_moved(Vec2::new(3000.0, 500.0));
    let (_, ratio) = manager.tree().get(root).unwrap().split_layout().unwrap();
    assert_eq!(ratio, 90.0);

    manager.pointer_released(Vec2::new(3000.0, 500.0));
    assert!(!manager.is_dragging());
    assert!(manager.tree().validate().is_ok());
}

// Scenario C: drag the first tab out of the split onto open space; the
// split collapses to a single root around the other window and the tab
// becomes a new floating root.
#[test]
fn scenario_c_detach_collapses_and_floats() {
    let (mut manager, _dir) = manager();
    let a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    drag_tab(&mut manager, &b, Vec2::new(1910.0, 500.0));

    // Drop in the middle of the docked area: no strip, no border.
    drag_tab(&mut manager, &a, Vec2::new(500.0, 500.0));

    assert_eq!(manager.tree().roots().len(), 2);
    assert_eq!(manager.docked_root_count(), 1);

    let docked = manager
        .tree()
        .roots()
        .iter()
        .copied()
        .find(|id| !manager.tree().get(*id).unwrap().is_floating)
        .unwrap();
    let floating = manager
        .tree()
        .roots()
        .iter()
        .copied()
        .find(|id| manager.tree().get(*id).unwrap().is_floating)
        .unwrap();

    // The split collapsed back into a leaf wrapping the inspector.
    assert!(manager.tree().get(docked).unwrap().is_leaf());
    assert_eq!(leaf_content_type(&manager, docked), "inspector");

    // The dragged tab floats at the drop point.
    assert_eq!(leaf_content_type(&manager, floating), "hierarchy");
    let rect = manager.tree().get(floating).unwrap().rect;
    assert_eq!(rect.center(), Vec2::new(500.0, 500.0));

    assert!(manager.tree().validate().is_ok());
}

// Dropping a tab onto another window's strip merges the groups.
#[test]
fn merge_into_tab_strip() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();

    // The docked root's strip band sits just under the menu bar.
    drag_tab(&mut manager, &b, Vec2::new(900.0, 50.0));

    assert_eq!(manager.tree().roots().len(), 1);
    let root = manager.tree().roots()[0];
    let node = manager.tree().get(root).unwrap();
    assert!(node.is_leaf());

    let tabs = node.tabs().unwrap();
    assert_eq!(tabs.len(), 2);
    // The dropped tab is selected.
    assert_eq!(tabs.active_tab().unwrap().content.id, b.id);
    assert!(manager.tree().validate().is_ok());
}

// Dropping a tab onto its own window's border splits that window.
#[test]
fn split_own_window() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    drag_tab(&mut manager, &b, Vec2::new(900.0, 50.0));

    let root = manager.tree().roots()[0];

    // Drag the inspector tab from the merged strip to the bottom border.
    drag_tab(&mut manager, &b, Vec2::new(960.0, 1070.0));

    let node = manager.tree().get(root).unwrap();
    assert!(node.is_split());
    let (layout, _) = node.split_layout().unwrap();
    assert_eq!(layout, fenestra_dock::LayoutType::Vertical);

    let [top, bottom] = node.split_children().unwrap();
    assert_eq!(leaf_content_type(&manager, top), "hierarchy");
    assert_eq!(leaf_content_type(&manager, bottom), "inspector");
    assert!(manager.tree().validate().is_ok());
}

// Policy: the last tab of the last docked window refuses to move.
#[test]
fn last_docked_window_protected() {
    let (mut manager, _dir) = manager();
    let a = manager.create_window("hierarchy").unwrap();

    assert_eq!(manager.docked_root_count(), 1);
    let before = manager.tree().node_count();

    assert!(!manager.begin_tab_drag(a.id, Vec2::new(100.0, 100.0)));
    assert!(!manager.is_dragging());

    // The forest is untouched.
    assert_eq!(manager.tree().node_count(), before);
    assert_eq!(manager.docked_root_count(), 1);

    // A floating tab is still free to move.
    let b = manager.create_window("inspector").unwrap();
    assert!(manager.begin_tab_drag(b.id, Vec2::new(900.0, 350.0)));
    manager.pointer_released(Vec2::new(900.0, 350.0));
}

#[test]
fn destroy_content_collapses_leaf() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    drag_tab(&mut manager, &b, Vec2::new(1910.0, 500.0));

    assert_eq!(manager.window_count(), 2);

    manager.destroy_content(b.id);

    // The emptied leaf collapsed, leaving one docked leaf root.
    assert_eq!(manager.window_count(), 1);
    let root = manager.tree().roots()[0];
    assert!(manager.tree().get(root).unwrap().is_leaf());
    assert_eq!(leaf_content_type(&manager, root), "hierarchy");
    assert!(manager.tree().validate().is_ok());
}

#[test]
fn dock_content_with_explicit_layout() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();

    let target = manager.tree().roots()[0];
    manager
        .dock_content(b.id, target, fenestra_dock::LayoutType::Vertical)
        .unwrap();

    let node = manager.tree().get(target).unwrap();
    assert!(node.is_split());
    let (layout, ratio) = node.split_layout().unwrap();
    assert_eq!(layout, fenestra_dock::LayoutType::Vertical);
    assert_eq!(ratio, 50.0);

    // Explicit attach keeps the existing content first.
    let [first, second] = node.split_children().unwrap();
    assert_eq!(leaf_content_type(&manager, first), "hierarchy");
    assert_eq!(leaf_content_type(&manager, second), "inspector");
    assert!(manager.tree().validate().is_ok());
}

#[test]
fn float_move_snaps_and_clamps() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();

    let leaf = manager.tree().find_leaf_with_content(b.id).unwrap();
    let node = manager.tree().root_of(leaf);

    assert!(manager.begin_float_move(node, Vec2::new(900.0, 400.0), SnapMode::Coarse));
    manager.pointer_moved(Vec2::new(937.0, 412.0));

    let rect = manager.tree().get(node).unwrap().rect;
    assert_eq!(rect.x % 25.0, 0.0);
    assert_eq!(rect.y % 25.0, 0.0);

    // Dragging far off-screen pins the window inside the work area.
    manager.pointer_moved(Vec2::new(-5000.0, -5000.0));
    let rect = manager.tree().get(node).unwrap().rect;
    assert_eq!(rect.x, 0.0);
    assert_eq!(rect.y, 40.0);

    manager.pointer_released(Vec2::new(-5000.0, -5000.0));
    assert!(!manager.is_dragging());
}

#[test]
fn float_resize_respects_min_size() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();

    let leaf = manager.tree().find_leaf_with_content(b.id).unwrap();
    let node = manager.tree().root_of(leaf);
    let start = manager.tree().get(node).unwrap().rect;

    // Grab the right edge and pull outward.
    manager.pointer_pressed(Vec2::new(start.right() - 10.0, start.center().y));
    assert!(manager.is_dragging());

    manager.pointer_moved(Vec2::new(start.right() + 90.0, start.center().y));
    let rect = manager.tree().get(node).unwrap().rect;
    assert_eq!(rect.width, start.width + 100.0);

    // Pushing far inward stops at the minimum width.
    manager.pointer_moved(Vec2::new(start.x - 2000.0, start.center().y));
    let rect = manager.tree().get(node).unwrap().rect;
    assert_eq!(rect.width, 300.0);

    manager.pointer_released(Vec2::new(start.x, start.center().y));
}

#[test]
fn activate_content_selects_tab() {
    let (mut manager, _dir) = manager();
    let a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    drag_tab(&mut manager, &b, Vec2::new(900.0, 50.0));

    let root = manager.tree().roots()[0];
    manager.activate_content(a.id);
    assert_eq!(
        manager
            .tree()
            .get(root)
            .unwrap()
            .tabs()
            .unwrap()
            .active_tab()
            .unwrap()
            .content
            .id,
        a.id
    );
}

#[test]
fn destroy_window_removes_subtree() {
    let (mut manager, _dir) = manager();
    let _a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    drag_tab(&mut manager, &b, Vec2::new(1910.0, 500.0));

    let root = manager.tree().roots()[0];
    manager.destroy_window(root).unwrap();

    assert!(manager.tree().is_empty());
    assert_eq!(manager.window_count(), 0);
    assert_eq!(manager.docked_root_count(), 0);
}

#[test]
fn forest_invariants_after_churn() {
    let (mut manager, _dir) = manager();
    let a = manager.create_window("hierarchy").unwrap();
    let b = manager.create_window("inspector").unwrap();
    let c = manager.create_window("inspector").unwrap();

    drag_tab(&mut manager, &b, Vec2::new(1910.0, 500.0));
    drag_tab(&mut manager, &c, Vec2::new(960.0, 1070.0));
    drag_tab(&mut manager, &a, Vec2::new(500.0, 300.0));
    drag_tab(&mut manager, &c, Vec2::new(400.0, 400.0));

    let tree = manager.tree();
    tree.validate().unwrap();

    // Every split has exactly two children with correct back-refs, and
    // exactly one parentless node per tree.
    for (id, node) in tree.iter() {
        if let Some(children) = node.split_children() {
            for child in children {
                assert_eq!(tree.get(child).unwrap().parent, Some(id));
            }
        }
    }
    for root in tree.roots() {
        assert!(tree.get(*root).unwrap().parent.is_none());
    }
}
