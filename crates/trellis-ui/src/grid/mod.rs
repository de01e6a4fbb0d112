//! Grid container: attached cell properties, track definitions and the
//! sizing hook.

mod definitions;

pub use definitions::{
    parse_column_definitions, parse_lengths, parse_row_definitions, ColumnDefinition, GridLength,
    ParseGridLengthError, RowDefinition,
};

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;
use trellis_core::{AttachedProperty, AttachedStore, CellContainer, Node, NodeArena, NodeError, NodeId};
use trellis_ui_graphics::Size;
use trellis_ui_layout::{Constraints, LayoutChildren, LayoutPolicy};

use crate::layout_node::LayoutNode;
use crate::panel::{arrange_overlay, measure_overlay};

/// Owner domain of the grid's attached properties.
pub const GRID_DOMAIN: &str = "grid";

/// Cell a child asked for through its attached properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridCell {
    pub row: i32,
    pub column: i32,
    pub row_span: i32,
    pub column_span: i32,
}

impl GridCell {
    pub fn from_store(store: &AttachedStore) -> Self {
        Self {
            row: store.get(&Grid::ROW),
            column: store.get(&Grid::COLUMN),
            row_span: store.get(&Grid::ROW_SPAN),
            column_span: store.get(&Grid::COLUMN_SPAN),
        }
    }

    /// Row span, with unset or non-positive spans counting as one track.
    pub fn effective_row_span(&self) -> i32 {
        self.row_span.max(1)
    }

    pub fn effective_column_span(&self) -> i32 {
        self.column_span.max(1)
    }
}

/// Track definitions of one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridDefinitions {
    pub rows: Vec<RowDefinition>,
    pub columns: Vec<ColumnDefinition>,
}

/// Track-sizing algorithm plugged into a [`GridLayout`].
///
/// `cells[i]` is the cell of child `i`. Implementations measure and arrange
/// the children through `children`.
pub trait TrackSizer {
    fn measure(
        &self,
        definitions: &GridDefinitions,
        cells: &[GridCell],
        children: &mut dyn LayoutChildren,
        constraints: Constraints,
    ) -> Size;

    fn arrange(
        &self,
        definitions: &GridDefinitions,
        cells: &[GridCell],
        children: &mut dyn LayoutChildren,
        final_size: Size,
    ) -> Size;
}

/// Layout policy of a grid.
///
/// Without a [`TrackSizer`] every child fills the whole grid.
#[derive(Default)]
pub struct GridLayout {
    definitions: RefCell<GridDefinitions>,
    sizer: Option<Rc<dyn TrackSizer>>,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizer(sizer: Rc<dyn TrackSizer>) -> Self {
        Self {
            definitions: RefCell::default(),
            sizer: Some(sizer),
        }
    }

    pub fn definitions(&self) -> Ref<'_, GridDefinitions> {
        self.definitions.borrow()
    }

    fn cells(children: &dyn LayoutChildren) -> SmallVec<[GridCell; 8]> {
        (0..children.len())
            .map(|index| {
                children
                    .attached(index)
                    .map(GridCell::from_store)
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl CellContainer for GridLayout {
    fn cell_domain(&self) -> &'static str {
        GRID_DOMAIN
    }
}

impl LayoutPolicy for GridLayout {
    fn measure(&self, children: &mut dyn LayoutChildren, constraints: Constraints) -> Size {
        match &self.sizer {
            Some(sizer) => {
                let cells = Self::cells(children);
                let definitions = self.definitions.borrow();
                sizer.measure(&definitions, &cells, children, constraints)
            }
            None => measure_overlay(children, constraints),
        }
    }

    fn arrange(&self, children: &mut dyn LayoutChildren, final_size: Size) -> Size {
        match &self.sizer {
            Some(sizer) => {
                let cells = Self::cells(children);
                let definitions = self.definitions.borrow();
                sizer.arrange(&definitions, &cells, children, final_size)
            }
            None => arrange_overlay(children, final_size),
        }
    }

    fn cell_container(&self) -> Option<&dyn CellContainer> {
        Some(self)
    }
}

/// Grid attached properties and inputs.
///
/// Cell setters store the value on the child and re-measure both the child
/// and, when it sits in a grid, the grid itself.
pub struct Grid;

impl Grid {
    pub const TAG: &'static str = "grid";

    pub const ROW: AttachedProperty<i32> = AttachedProperty::new(GRID_DOMAIN, "row", 0);
    pub const ROW_SPAN: AttachedProperty<i32> = AttachedProperty::new(GRID_DOMAIN, "row-span", 0);
    pub const COLUMN: AttachedProperty<i32> = AttachedProperty::new(GRID_DOMAIN, "column", 0);
    pub const COLUMN_SPAN: AttachedProperty<i32> =
        AttachedProperty::new(GRID_DOMAIN, "column-span", 0);

    pub fn new_node() -> LayoutNode {
        LayoutNode::container(Self::TAG, Rc::new(GridLayout::new()))
    }

    pub fn with_sizer(sizer: Rc<dyn TrackSizer>) -> LayoutNode {
        LayoutNode::container(Self::TAG, Rc::new(GridLayout::with_sizer(sizer)))
    }

    pub fn row(node: &dyn Node) -> i32 {
        node.core().get_attached(&Self::ROW)
    }

    pub fn set_row(arena: &mut NodeArena, id: NodeId, value: i32) -> Result<(), NodeError> {
        set_cell_property(arena, id, &Self::ROW, value)
    }

    pub fn row_span(node: &dyn Node) -> i32 {
        node.core().get_attached(&Self::ROW_SPAN)
    }

    pub fn set_row_span(arena: &mut NodeArena, id: NodeId, value: i32) -> Result<(), NodeError> {
        set_cell_property(arena, id, &Self::ROW_SPAN, value)
    }

    pub fn column(node: &dyn Node) -> i32 {
        node.core().get_attached(&Self::COLUMN)
    }

    pub fn set_column(arena: &mut NodeArena, id: NodeId, value: i32) -> Result<(), NodeError> {
        set_cell_property(arena, id, &Self::COLUMN, value)
    }

    pub fn column_span(node: &dyn Node) -> i32 {
        node.core().get_attached(&Self::COLUMN_SPAN)
    }

    pub fn set_column_span(
        arena: &mut NodeArena,
        id: NodeId,
        value: i32,
    ) -> Result<(), NodeError> {
        set_cell_property(arena, id, &Self::COLUMN_SPAN, value)
    }

    pub fn cell(node: &dyn Node) -> GridCell {
        GridCell::from_store(node.core().attached())
    }

    pub fn row_definitions(arena: &NodeArena, id: NodeId) -> Result<Vec<RowDefinition>, NodeError> {
        with_grid_layout(arena, id, |grid| grid.definitions.borrow().rows.clone())
    }

    /// Replaces the row definitions; `None` clears them.
    pub fn set_row_definitions(
        arena: &mut NodeArena,
        id: NodeId,
        rows: Option<Vec<RowDefinition>>,
    ) -> Result<(), NodeError> {
        with_grid_layout(arena, id, |grid| {
            grid.definitions.borrow_mut().rows = rows.unwrap_or_default();
        })?;
        arena.invalidate_measure(id);
        Ok(())
    }

    pub fn column_definitions(
        arena: &NodeArena,
        id: NodeId,
    ) -> Result<Vec<ColumnDefinition>, NodeError> {
        with_grid_layout(arena, id, |grid| grid.definitions.borrow().columns.clone())
    }

    /// Replaces the column definitions; `None` clears them.
    pub fn set_column_definitions(
        arena: &mut NodeArena,
        id: NodeId,
        columns: Option<Vec<ColumnDefinition>>,
    ) -> Result<(), NodeError> {
        with_grid_layout(arena, id, |grid| {
            grid.definitions.borrow_mut().columns = columns.unwrap_or_default();
        })?;
        arena.invalidate_measure(id);
        Ok(())
    }
}

fn set_cell_property(
    arena: &mut NodeArena,
    id: NodeId,
    property: &AttachedProperty<i32>,
    value: i32,
) -> Result<(), NodeError> {
    arena.get_mut(id)?.core_mut().set_attached(property, value);
    log::trace!("set {} = {value} on node {id}", property.key());
    arena.invalidate_cell(id);
    Ok(())
}

fn with_grid_layout<R>(
    arena: &NodeArena,
    id: NodeId,
    f: impl FnOnce(&GridLayout) -> R,
) -> Result<R, NodeError> {
    let policy = arena.with_node(id, |node: &LayoutNode| node.policy())?;
    let grid = policy
        .as_any()
        .downcast_ref::<GridLayout>()
        .ok_or(NodeError::TypeMismatch {
            id,
            expected: std::any::type_name::<GridLayout>(),
        })?;
    Ok(f(grid))
}

#[cfg(test)]
#[path = "../tests/grid_tests.rs"]
mod tests;
