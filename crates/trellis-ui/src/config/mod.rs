//! String-keyed registries: node types by tag, value converters and
//! property mappers.

mod convert;
mod map;

pub use convert::{
    convert_column_definitions, convert_grid_cell, convert_row_definitions, ConfigValue, Converter,
};
pub use map::{
    map_column_definitions, map_grid_column, map_grid_column_span, map_grid_row,
    map_grid_row_span, map_row_definitions, PropertyMapping, Setter,
};

use indexmap::IndexMap;
use trellis_core::{NodeArena, NodeError, NodeId};

use crate::grid::Grid;
use crate::layout_node::LayoutNode;
use crate::panel::Panel;

/// Builds a fresh node of a registered type.
pub type NodeConstructor = fn() -> LayoutNode;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownNodeType {
        tag: String,
    },
    UnknownProperty {
        key: String,
    },
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    UnexpectedValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    Node(NodeError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownNodeType { tag } => write!(f, "unknown node type `{tag}`"),
            ConfigError::UnknownProperty { key } => write!(f, "unknown property `{key}`"),
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
            ConfigError::UnexpectedValue {
                key,
                expected,
                found,
            } => write!(f, "`{key}` expects {expected}, got {found}"),
            ConfigError::Node(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Node(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NodeError> for ConfigError {
    fn from(err: NodeError) -> Self {
        ConfigError::Node(err)
    }
}

/// Node type, converter and mapper registries.
///
/// Registration order is kept, so listings are stable.
#[derive(Default)]
pub struct Registry {
    node_types: IndexMap<&'static str, NodeConstructor>,
    converters: IndexMap<&'static str, Converter>,
    mappers: IndexMap<&'static str, PropertyMapping>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in panel and grid entries.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_node_type(Panel::TAG, Panel::new_node);
        registry.register_node_type(Grid::TAG, Grid::new_node);

        registry.register_converter("row-definitions", convert_row_definitions);
        registry.register_converter("column-definitions", convert_column_definitions);
        registry.register_converter("grid.row", convert_grid_cell);
        registry.register_converter("grid.row-span", convert_grid_cell);
        registry.register_converter("grid.column", convert_grid_cell);
        registry.register_converter("grid.column-span", convert_grid_cell);

        registry.register_normal("row-definitions", "row_definitions", map_row_definitions);
        registry.register_normal(
            "column-definitions",
            "column_definitions",
            map_column_definitions,
        );
        registry.register_custom("grid.row", map_grid_row);
        registry.register_custom("grid.row-span", map_grid_row_span);
        registry.register_custom("grid.column", map_grid_column);
        registry.register_custom("grid.column-span", map_grid_column_span);
        registry
    }

    /// Registers `constructor` under `tag`, replacing any earlier entry.
    pub fn register_node_type(&mut self, tag: &'static str, constructor: NodeConstructor) {
        log::debug!("register node type `{tag}`");
        self.node_types.insert(tag, constructor);
    }

    pub fn register_converter(&mut self, key: &'static str, converter: Converter) {
        self.converters.insert(key, converter);
    }

    pub fn register_normal(&mut self, key: &'static str, field: &'static str, set: Setter) {
        self.mappers.insert(key, PropertyMapping::Normal { field, set });
    }

    pub fn register_custom(&mut self, key: &'static str, set: Setter) {
        self.mappers.insert(key, PropertyMapping::Custom(set));
    }

    pub fn node_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.node_types.keys().copied()
    }

    pub fn mapping(&self, key: &str) -> Option<&PropertyMapping> {
        self.mappers.get(key)
    }

    /// Creates a node of type `tag` in `arena`.
    pub fn create(&self, arena: &mut NodeArena, tag: &str) -> Result<NodeId, ConfigError> {
        let constructor = self
            .node_types
            .get(tag)
            .ok_or_else(|| ConfigError::UnknownNodeType {
                tag: tag.to_string(),
            })?;
        Ok(arena.create(Box::new(constructor())))
    }

    /// Converts `raw` with the converter of `key`. Keys without a converter
    /// keep the text as is.
    pub fn convert(&self, key: &str, raw: &str) -> Result<ConfigValue, ConfigError> {
        match self.converters.get(key) {
            Some(converter) => converter(raw).map_err(|reason| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                reason,
            }),
            None => Ok(ConfigValue::Text(raw.to_string())),
        }
    }

    /// Converts `raw` and applies it to `node` through the mapper of `key`.
    pub fn apply(
        &self,
        arena: &mut NodeArena,
        node: NodeId,
        key: &str,
        raw: &str,
    ) -> Result<(), ConfigError> {
        let mapping = self
            .mappers
            .get(key)
            .ok_or_else(|| ConfigError::UnknownProperty {
                key: key.to_string(),
            })?;
        let value = self.convert(key, raw)?;
        match mapping.field() {
            Some(field) => log::debug!("apply `{key}` = {value:?} to `{field}` of node {node}"),
            None => log::debug!("apply `{key}` = {value:?} to node {node}"),
        }
        (mapping.setter())(arena, node, value)
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
