use crate::attached::{AttachedProperty, AttachedStore, AttachedType};
use crate::flags::LayoutFlags;
use crate::tree::{DefaultLayoutTree, LayoutTree, LeafTree};
use crate::NodeId;
use std::any::Any;
use std::cell::Cell;
use std::fmt;

/// Capability of containers that place children in cells described by
/// attached properties.
///
/// When a child's cell assignment changes, both the child and a parent
/// exposing this capability are re-measured: the child's required size and
/// the container's track-sizing input are stale together.
pub trait CellContainer {
    /// Owner domain of the attached properties the container reads
    /// (`"grid"` for `grid.row`).
    fn cell_domain(&self) -> &'static str;
}

/// Layout state every node carries regardless of its type.
pub struct NodeCore {
    flags: Cell<LayoutFlags>,
    tree: Box<dyn LayoutTree>,
    attached: AttachedStore,
}

impl NodeCore {
    /// Core for a node that starts out unattached.
    pub fn new() -> Self {
        Self::with_tree(Box::new(DefaultLayoutTree))
    }

    pub fn with_tree(tree: Box<dyn LayoutTree>) -> Self {
        Self {
            flags: Cell::new(LayoutFlags::INITIAL),
            tree,
            attached: AttachedStore::new(),
        }
    }

    pub fn flags(&self) -> LayoutFlags {
        self.flags.get()
    }

    pub fn insert_flags(&self, flags: LayoutFlags) {
        self.flags.set(self.flags.get() | flags);
    }

    pub fn remove_flags(&self, flags: LayoutFlags) {
        self.flags.set(self.flags.get() - flags);
    }

    pub fn tree(&self) -> &dyn LayoutTree {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> &mut dyn LayoutTree {
        self.tree.as_mut()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.tree.parent()
    }

    /// Links this node to `parent`, replacing the unattached placeholder with
    /// a [`LeafTree`] when needed.
    pub(crate) fn attach_to(&mut self, parent: NodeId) {
        if !self.tree.set_parent(Some(parent)) {
            self.tree = Box::new(LeafTree::new(Some(parent)));
        }
    }

    pub(crate) fn detach(&mut self) {
        self.tree.set_parent(None);
    }

    pub fn attached(&self) -> &AttachedStore {
        &self.attached
    }

    pub fn attached_mut(&mut self) -> &mut AttachedStore {
        &mut self.attached
    }

    /// Reads an attached property; unset properties read as their default.
    pub fn get_attached<T: AttachedType>(&self, property: &AttachedProperty<T>) -> T {
        self.attached.get(property)
    }

    /// Stores an attached property without invalidating anything.
    pub fn set_attached<T: AttachedType>(&mut self, property: &AttachedProperty<T>, value: T) {
        self.attached.set(property, value);
    }
}

impl Default for NodeCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCore")
            .field("flags", &self.flags.get())
            .field("parent", &self.tree.parent())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

pub trait Node: Any {
    /// Registry tag of the node type (`"grid"`, `"panel"`, ...).
    fn type_tag(&self) -> &'static str;

    fn core(&self) -> &NodeCore;

    fn core_mut(&mut self) -> &mut NodeCore;

    /// Cell-placement capability, present on grid-like containers.
    fn cell_container(&self) -> Option<&dyn CellContainer> {
        None
    }

    fn flags(&self) -> LayoutFlags {
        self.core().flags()
    }

    fn parent(&self) -> Option<NodeId> {
        self.core().parent()
    }
}

impl dyn Node {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
