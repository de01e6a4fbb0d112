#![doc = r"Layout-tree kernel for Trellis: node arena, attached properties and dirty-flag propagation."]

pub mod arena;
pub mod attached;
pub mod collections;
pub mod flags;
pub mod node;
pub mod propagate;
pub mod tree;

pub use arena::{invalidate_cell, NodeArena};
pub use attached::{AttachedKey, AttachedProperty, AttachedStore, AttachedType, AttachedValue};
pub use flags::LayoutFlags;
pub use node::{CellContainer, Node, NodeCore};
pub use propagate::{invalidate_arrange, invalidate_measure, propagate_flag_up, FlagHost};
pub use tree::{
    ChildList, DefaultLayoutTree, LayoutTree, LeafTree, PanelTree, TreeWalker, WalkDirection,
};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    TypeMismatch { id: NodeId, expected: &'static str },
    NotAContainer { id: NodeId },
    AlreadyAttached { id: NodeId, parent: NodeId },
    NotAChild { id: NodeId, parent: NodeId },
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} missing"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} type mismatch; expected {expected}")
            }
            NodeError::NotAContainer { id } => write!(f, "node {id} cannot hold children"),
            NodeError::AlreadyAttached { id, parent } => {
                write!(f, "node {id} is already attached to {parent}")
            }
            NodeError::NotAChild { id, parent } => {
                write!(f, "node {id} is not a child of {parent}")
            }
        }
    }
}

impl std::error::Error for NodeError {}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod arena_tests;

#[cfg(test)]
#[path = "tests/propagate_tests.rs"]
mod propagate_tests;
