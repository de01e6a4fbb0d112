//! Layout nodes, containers and the layout driver for Trellis

pub mod config;
pub mod grid;
mod layout;
mod layout_node;
mod panel;

pub use config::{ConfigError, ConfigValue, Registry};
pub use grid::{
    ColumnDefinition, Grid, GridCell, GridDefinitions, GridLayout, GridLength, RowDefinition,
    TrackSizer,
};
pub use layout::{
    absolute_bounds, update_layout, update_layout_with, LayoutOptions, LayoutOutcome,
    LayoutUpdater,
};
pub use layout_node::{LayoutNode, LayoutState};
pub use panel::{Leaf, Panel};

pub use trellis_core::{LayoutFlags, Node, NodeArena, NodeError, NodeId};
pub use trellis_ui_graphics::{Point, Rect, Size};
pub use trellis_ui_layout::{Constraints, LayoutChildren, LayoutPolicy};

pub mod prelude {
    pub use crate::grid::{Grid, GridLength};
    pub use crate::layout::{update_layout, LayoutOptions};
    pub use crate::layout_node::LayoutNode;
    pub use crate::panel::{Leaf, Panel};
    pub use crate::config::Registry;
    pub use trellis_core::{Node, NodeArena, NodeId};
    pub use trellis_ui_graphics::{Rect, Size};
}
