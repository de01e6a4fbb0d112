use super::*;
use crate::layout::update_layout;
use crate::panel::{Leaf, Panel};
use std::cell::RefCell;
use trellis_core::LayoutFlags;
use trellis_ui_graphics::Rect;

fn leaf(arena: &mut NodeArena) -> NodeId {
    arena.create(Box::new(Leaf::new_node(Size::new(10.0, 10.0))))
}

/// Splits the grid into equal tracks and remembers what it was given.
#[derive(Default)]
struct UniformSizer {
    seen: RefCell<Vec<(usize, usize, Vec<GridCell>)>>,
}

impl UniformSizer {
    fn track_size(count: usize, extent: f32) -> f32 {
        extent / count.max(1) as f32
    }
}

impl TrackSizer for UniformSizer {
    fn measure(
        &self,
        definitions: &GridDefinitions,
        cells: &[GridCell],
        children: &mut dyn LayoutChildren,
        constraints: Constraints,
    ) -> Size {
        self.seen.borrow_mut().push((
            definitions.rows.len(),
            definitions.columns.len(),
            cells.to_vec(),
        ));
        for index in 0..children.len() {
            children.measure(index, constraints.loosen());
        }
        constraints.max_size()
    }

    fn arrange(
        &self,
        definitions: &GridDefinitions,
        cells: &[GridCell],
        children: &mut dyn LayoutChildren,
        final_size: Size,
    ) -> Size {
        let width = Self::track_size(definitions.columns.len(), final_size.width);
        let height = Self::track_size(definitions.rows.len(), final_size.height);
        for (index, cell) in cells.iter().enumerate() {
            let slot = Rect::new(
                cell.column as f32 * width,
                cell.row as f32 * height,
                width * cell.effective_column_span() as f32,
                height * cell.effective_row_span() as f32,
            );
            children.arrange(index, slot);
        }
        final_size
    }
}

fn slot_of(arena: &NodeArena, id: NodeId) -> Option<Rect> {
    arena
        .with_node(id, |node: &LayoutNode| node.layout_state().slot)
        .unwrap()
}

/// Root panel holding a grid holding two leaves, laid out once.
fn clean_grid_tree(arena: &mut NodeArena) -> (NodeId, NodeId, NodeId, NodeId) {
    let root = arena.create(Box::new(Panel::new_node()));
    let grid = arena.create(Box::new(Grid::new_node()));
    let a = leaf(arena);
    let b = leaf(arena);
    arena.insert_child(root, grid).unwrap();
    arena.insert_child(grid, a).unwrap();
    arena.insert_child(grid, b).unwrap();
    update_layout(arena, root, Size::new(100.0, 100.0)).unwrap();
    (root, grid, a, b)
}

#[test]
fn cell_properties_default_to_zero() {
    let mut arena = NodeArena::new();
    let a = leaf(&mut arena);
    let node = arena.get(a).unwrap();
    assert_eq!(Grid::row(node), 0);
    assert_eq!(Grid::row_span(node), 0);
    assert_eq!(Grid::column(node), 0);
    assert_eq!(Grid::column_span(node), 0);
    assert_eq!(Grid::cell(node), GridCell::default());
}

#[test]
fn setters_store_values_under_grid_keys() {
    let mut arena = NodeArena::new();
    let a = leaf(&mut arena);
    Grid::set_row(&mut arena, a, 2).unwrap();
    Grid::set_column(&mut arena, a, 1).unwrap();
    Grid::set_row_span(&mut arena, a, 3).unwrap();
    Grid::set_column_span(&mut arena, a, 0).unwrap();

    let node = arena.get(a).unwrap();
    let cell = Grid::cell(node);
    assert_eq!(
        cell,
        GridCell {
            row: 2,
            column: 1,
            row_span: 3,
            column_span: 0,
        }
    );
    assert_eq!(cell.effective_column_span(), 1);
    assert_eq!(cell.effective_row_span(), 3);
    let keys: Vec<String> = node
        .core()
        .attached()
        .iter()
        .map(|(key, _)| key.to_string())
        .collect();
    assert!(keys.contains(&"grid.row".to_string()));
    assert!(keys.contains(&"grid.column-span".to_string()));
}

#[test]
fn cell_change_invalidates_child_and_grid() {
    let mut arena = NodeArena::new();
    let (root, grid, a, b) = clean_grid_tree(&mut arena);
    for id in [root, grid, a, b] {
        assert!(arena.flags(id).is_empty());
    }

    Grid::set_column(&mut arena, a, 1).unwrap();

    assert!(arena.flags(a).contains(LayoutFlags::MEASURE));
    assert!(arena.flags(grid).contains(LayoutFlags::MEASURE));
    assert!(arena.flags(root).contains(LayoutFlags::MEASURE_HINT));
    assert!(!arena.flags(root).contains(LayoutFlags::MEASURE));
    assert!(arena.flags(b).is_empty());
}

#[test]
fn cell_change_under_plain_panel_leaves_panel_measure_alone() {
    let mut arena = NodeArena::new();
    let root = arena.create(Box::new(Panel::new_node()));
    let a = leaf(&mut arena);
    arena.insert_child(root, a).unwrap();
    update_layout(&mut arena, root, Size::new(50.0, 50.0)).unwrap();

    Grid::set_row(&mut arena, a, 4).unwrap();

    assert!(arena.flags(a).contains(LayoutFlags::MEASURE));
    assert!(!arena.flags(root).contains(LayoutFlags::MEASURE));
    assert!(arena.flags(root).contains(LayoutFlags::MEASURE_HINT));
}

#[test]
fn cell_change_on_detached_node_marks_only_itself() {
    let mut arena = NodeArena::new();
    let a = leaf(&mut arena);
    Grid::set_row(&mut arena, a, 1).unwrap();
    assert!(arena.flags(a).contains(LayoutFlags::MEASURE));
    assert_eq!(Grid::row(arena.get(a).unwrap()), 1);
}

#[test]
fn setters_report_missing_nodes() {
    let mut arena = NodeArena::new();
    let err = Grid::set_row(&mut arena, 9, 1).unwrap_err();
    assert_eq!(err, NodeError::Missing { id: 9 });
}

#[test]
fn definitions_round_trip_and_invalidate_measure() {
    let mut arena = NodeArena::new();
    let (root, grid, _, _) = clean_grid_tree(&mut arena);

    let rows = vec![
        RowDefinition::new(GridLength::Auto),
        RowDefinition::new(GridLength::Star(2.0)),
    ];
    Grid::set_row_definitions(&mut arena, grid, Some(rows.clone())).unwrap();

    assert_eq!(Grid::row_definitions(&arena, grid).unwrap(), rows);
    assert!(Grid::column_definitions(&arena, grid).unwrap().is_empty());
    assert!(arena.flags(grid).contains(LayoutFlags::MEASURE));
    assert!(arena.flags(root).contains(LayoutFlags::MEASURE_HINT));

    Grid::set_row_definitions(&mut arena, grid, None).unwrap();
    assert!(Grid::row_definitions(&arena, grid).unwrap().is_empty());
}

#[test]
fn definitions_require_a_grid() {
    let mut arena = NodeArena::new();
    let panel = arena.create(Box::new(Panel::new_node()));
    let err = Grid::set_column_definitions(&mut arena, panel, Some(Vec::new())).unwrap_err();
    assert!(matches!(err, NodeError::TypeMismatch { id, .. } if id == panel));
    assert!(Grid::row_definitions(&arena, panel).is_err());
}

#[test]
fn grid_is_a_cell_container_and_panel_is_not() {
    let grid = Grid::new_node();
    let panel = Panel::new_node();
    assert_eq!(
        grid.cell_container().map(|cells| cells.cell_domain()),
        Some(GRID_DOMAIN)
    );
    assert!(panel.cell_container().is_none());
}

#[test]
fn grid_without_sizer_overlays_children() {
    let mut arena = NodeArena::new();
    let (_, grid, a, b) = clean_grid_tree(&mut arena);
    let grid_slot = slot_of(&arena, grid).unwrap();
    assert_eq!(slot_of(&arena, a), Some(Rect::from_size(grid_slot.size())));
    assert_eq!(slot_of(&arena, b), Some(Rect::from_size(grid_slot.size())));
}

#[test]
fn sizer_sees_cells_and_definitions() {
    let mut arena = NodeArena::new();
    let sizer = Rc::new(UniformSizer::default());
    let grid = arena.create(Box::new(Grid::with_sizer(sizer.clone())));
    let a = leaf(&mut arena);
    let b = leaf(&mut arena);
    arena.insert_child(grid, a).unwrap();
    arena.insert_child(grid, b).unwrap();
    Grid::set_column_definitions(
        &mut arena,
        grid,
        Some(vec![ColumnDefinition::default(), ColumnDefinition::default()]),
    )
    .unwrap();
    Grid::set_column(&mut arena, b, 1).unwrap();

    update_layout(&mut arena, grid, Size::new(100.0, 40.0)).unwrap();

    {
        let seen = sizer.seen.borrow();
        let (rows, columns, cells) = seen.last().unwrap();
        assert_eq!((*rows, *columns), (0, 2));
        assert_eq!(cells[0], GridCell::default());
        assert_eq!(cells[1].column, 1);
    }
    assert_eq!(slot_of(&arena, a), Some(Rect::new(0.0, 0.0, 50.0, 40.0)));
    assert_eq!(slot_of(&arena, b), Some(Rect::new(50.0, 0.0, 50.0, 40.0)));

    Grid::set_column(&mut arena, a, 1).unwrap();
    Grid::set_column(&mut arena, b, 0).unwrap();
    let outcome = update_layout(&mut arena, grid, Size::new(100.0, 40.0)).unwrap();

    assert_eq!(sizer.seen.borrow().len(), 2);
    assert_eq!(outcome.measured, 3);
    assert_eq!(slot_of(&arena, a), Some(Rect::new(50.0, 0.0, 50.0, 40.0)));
    assert_eq!(slot_of(&arena, b), Some(Rect::new(0.0, 0.0, 50.0, 40.0)));
}
