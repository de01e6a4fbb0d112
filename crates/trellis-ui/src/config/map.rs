//! Mappers that apply converted values to nodes.

use trellis_core::{NodeArena, NodeError, NodeId};

use super::{ConfigError, ConfigValue};
use crate::grid::Grid;

/// Applies a converted value to a node.
pub type Setter = fn(&mut NodeArena, NodeId, ConfigValue) -> Result<(), ConfigError>;

/// How a configuration key reaches a node.
#[derive(Clone, Copy)]
pub enum PropertyMapping {
    /// An input of the node's own type, named `field`.
    Normal { field: &'static str, set: Setter },
    /// A static setter owned by another type, typically an attached property.
    Custom(Setter),
}

impl PropertyMapping {
    pub fn setter(&self) -> Setter {
        match self {
            PropertyMapping::Normal { set, .. } => *set,
            PropertyMapping::Custom(set) => *set,
        }
    }

    /// Node input a normal mapping writes. Custom mappings have none.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PropertyMapping::Normal { field, .. } => Some(*field),
            PropertyMapping::Custom(_) => None,
        }
    }
}

impl std::fmt::Debug for PropertyMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyMapping::Normal { field, .. } => {
                f.debug_struct("Normal").field("field", field).finish_non_exhaustive()
            }
            PropertyMapping::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn expect_int(key: &'static str, value: ConfigValue) -> Result<i32, ConfigError> {
    match value {
        ConfigValue::Int(value) => Ok(value),
        other => Err(ConfigError::UnexpectedValue {
            key: key.to_string(),
            expected: "int",
            found: other.kind(),
        }),
    }
}

pub fn map_row_definitions(
    arena: &mut NodeArena,
    id: NodeId,
    value: ConfigValue,
) -> Result<(), ConfigError> {
    match value {
        ConfigValue::Rows(rows) => Ok(Grid::set_row_definitions(arena, id, Some(rows))?),
        other => Err(ConfigError::UnexpectedValue {
            key: "row-definitions".to_string(),
            expected: "row definitions",
            found: other.kind(),
        }),
    }
}

pub fn map_column_definitions(
    arena: &mut NodeArena,
    id: NodeId,
    value: ConfigValue,
) -> Result<(), ConfigError> {
    match value {
        ConfigValue::Columns(columns) => Ok(Grid::set_column_definitions(arena, id, Some(columns))?),
        other => Err(ConfigError::UnexpectedValue {
            key: "column-definitions".to_string(),
            expected: "column definitions",
            found: other.kind(),
        }),
    }
}

fn cell_mapper(
    key: &'static str,
    set: fn(&mut NodeArena, NodeId, i32) -> Result<(), NodeError>,
    arena: &mut NodeArena,
    id: NodeId,
    value: ConfigValue,
) -> Result<(), ConfigError> {
    let value = expect_int(key, value)?;
    Ok(set(arena, id, value)?)
}

pub fn map_grid_row(arena: &mut NodeArena, id: NodeId, value: ConfigValue) -> Result<(), ConfigError> {
    cell_mapper("grid.row", Grid::set_row, arena, id, value)
}

pub fn map_grid_row_span(
    arena: &mut NodeArena,
    id: NodeId,
    value: ConfigValue,
) -> Result<(), ConfigError> {
    cell_mapper("grid.row-span", Grid::set_row_span, arena, id, value)
}

pub fn map_grid_column(
    arena: &mut NodeArena,
    id: NodeId,
    value: ConfigValue,
) -> Result<(), ConfigError> {
    cell_mapper("grid.column", Grid::set_column, arena, id, value)
}

pub fn map_grid_column_span(
    arena: &mut NodeArena,
    id: NodeId,
    value: ConfigValue,
) -> Result<(), ConfigError> {
    cell_mapper("grid.column-span", Grid::set_column_span, arena, id, value)
}
