use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis_ui::{update_layout, Grid, Leaf, NodeArena, NodeId, Panel, Size};

const CHAIN_DEPTHS: &[usize] = &[16, 256];
const GRID_CHILDREN: &[usize] = &[64, 512];
const ROOT_SIZE: Size = Size {
    width: 1080.0,
    height: 1920.0,
};

/// Panel chain of `depth` levels ending in a leaf; returns (root, leaf).
fn build_chain(arena: &mut NodeArena, depth: usize) -> (NodeId, NodeId) {
    let root = arena.create(Box::new(Panel::new_node()));
    let mut parent = root;
    for _ in 0..depth {
        let next = arena.create(Box::new(Panel::new_node()));
        arena.insert_child(parent, next).unwrap();
        parent = next;
    }
    let leaf = arena.create(Box::new(Leaf::new_node(Size::new(10.0, 10.0))));
    arena.insert_child(parent, leaf).unwrap();
    (root, leaf)
}

fn build_grid(arena: &mut NodeArena, children: usize) -> (NodeId, Vec<NodeId>) {
    let grid = arena.create(Box::new(Grid::new_node()));
    let ids = (0..children)
        .map(|_| {
            let child = arena.create(Box::new(Leaf::new_node(Size::new(8.0, 8.0))));
            arena.insert_child(grid, child).unwrap();
            child
        })
        .collect();
    (grid, ids)
}

fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");
    for &depth in CHAIN_DEPTHS {
        group.bench_with_input(BenchmarkId::new("deep_leaf", depth), &depth, |b, &depth| {
            let mut arena = NodeArena::new();
            let (root, leaf) = build_chain(&mut arena, depth);
            update_layout(&mut arena, root, ROOT_SIZE).unwrap();
            b.iter(|| {
                arena.invalidate_measure(black_box(leaf));
                update_layout(&mut arena, root, ROOT_SIZE).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_cell_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_cells");
    for &count in GRID_CHILDREN {
        group.bench_with_input(BenchmarkId::new("set_row", count), &count, |b, &count| {
            let mut arena = NodeArena::new();
            let (grid, children) = build_grid(&mut arena, count);
            update_layout(&mut arena, grid, ROOT_SIZE).unwrap();
            let mut row = 0;
            b.iter(|| {
                row = (row + 1) % 8;
                for &child in children.iter().step_by(7) {
                    Grid::set_row(&mut arena, child, row).unwrap();
                }
                update_layout(&mut arena, grid, ROOT_SIZE).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_propagation, bench_cell_changes);
criterion_main!(benches);
