//! Benchmarks for dock tree operations

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use fenestra_dock::snapshot;
use fenestra_dock::{
    Border, ContentHandle, ContentId, DockTree, Layout, NodeId, Rect, Size, Tab, ops,
};

fn reference() -> Size<f32> {
    Size::new(1920.0, 1080.0)
}

fn seeded_tree(leaves: usize) -> (DockTree, Vec<NodeId>) {
    let mut tree = DockTree::new();
    let root = tree.create_root_leaf(false);
    tree.get_mut(root).unwrap().rect = Rect::new(0.0, 0.0, 1920.0, 1040.0);
    tree.get_mut(root)
        .unwrap()
        .tabs_mut()
        .unwrap()
        .push(Tab::new("panel-0", ContentHandle::new(ContentId(0), "panel")));

    let mut leaf_ids = vec![root];
    for i in 1..leaves {
        let slot = i % leaf_ids.len();
        let target = leaf_ids[slot];
        // Alternate borders to get a bushy, mixed-orientation tree.
        let border = match i % 4 {
            0 => Border::Left,
            1 => Border::Right,
            2 => Border::Top,
            _ => Border::Bottom,
        };
        let node = tree.create_detached_leaf(false);
        tree.get_mut(node).unwrap().tabs_mut().unwrap().push(Tab::new(
            format!("panel-{i}"),
            ContentHandle::new(ContentId(i as u64), "panel"),
        ));
        ops::attach(&mut tree, target, node, border).unwrap();

        // The target became a split; its payload now lives in the clone.
        let children = tree.get(target).unwrap().split_children().unwrap();
        let clone = if children[0] == node {
            children[1]
        } else {
            children[0]
        };
        leaf_ids[slot] = clone;
        leaf_ids.push(node);
    }

    (tree, leaf_ids)
}

fn bench_attach_detach_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("attach_detach_churn");

    for leaves in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(leaves), &leaves, |b, &leaves| {
            b.iter(|| {
                let (mut tree, targets) = seeded_tree(leaves);
                // Empty and detach every other leaf.
                for node in targets.iter().skip(1).step_by(2) {
                    if let Some(tabs) = tree.get_mut(*node).and_then(|n| n.tabs_mut()) {
                        tabs.take_all();
                    }
                    if let Some(parent) = tree.get(*node).and_then(|n| n.parent) {
                        ops::detach(&mut tree, parent, *node).unwrap();
                    }
                }
                black_box(tree.node_count())
            });
        });
    }

    group.finish();
}

fn bench_ratio_propagation(c: &mut Criterion) {
    let (mut tree, _) = seeded_tree(64);
    let root = tree.roots()[0];

    c.bench_function("ratio_propagation_64", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let ratio = if flip { 30.0 } else { 70.0 };
            ops::set_ratio(&mut tree, root, ratio).unwrap();
            black_box(tree.get(root).map(|n| n.rect.width))
        });
    });
}

fn bench_snapshot_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_round_trip");

    for leaves in [4, 16, 64] {
        let (tree, _) = seeded_tree(leaves);
        let work_area = Rect::new(0.0, 0.0, 1920.0, 1040.0);

        group.bench_with_input(BenchmarkId::from_parameter(leaves), &leaves, |b, _| {
            b.iter(|| {
                let layout = Layout::capture(&tree, "bench", reference());
                let mut rebuilt = DockTree::new();
                let mut next = 0_u64;
                snapshot::restore_forest(
                    &mut rebuilt,
                    &layout.windows,
                    reference(),
                    work_area,
                    &mut |tab| {
                        next += 1;
                        Tab::new(
                            tab.content_type.clone(),
                            ContentHandle::new(ContentId(next), tab.content_type.clone()),
                        )
                    },
                );
                black_box(rebuilt.node_count())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_attach_detach_churn,
    bench_ratio_propagation,
    bench_snapshot_round_trip
);
criterion_main!(benches);
