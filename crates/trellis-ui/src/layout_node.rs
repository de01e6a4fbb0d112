use std::rc::Rc;

use trellis_core::{CellContainer, LayoutTree, Node, NodeArena, NodeCore, NodeError, NodeId, PanelTree};
use trellis_ui_graphics::{Rect, Size};
use trellis_ui_layout::{Constraints, LayoutPolicy};

/// Results of the last measure and arrange of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutState {
    /// Size the node asked for during its last measure.
    pub desired_size: Size,
    /// Constraints of the last measure, `None` until the first one.
    pub constraints: Option<Constraints>,
    /// Slot the parent placed the node into, relative to the parent's origin.
    pub slot: Option<Rect>,
    /// Size returned by the node's arrange.
    pub render_size: Size,
}

/// Node driven by a [`LayoutPolicy`].
///
/// Containers carry a [`PanelTree`]; leaves start with the unattached
/// placeholder and receive a leaf context when inserted somewhere.
pub struct LayoutNode {
    tag: &'static str,
    core: NodeCore,
    policy: Rc<dyn LayoutPolicy>,
    pub(crate) layout: LayoutState,
}

impl LayoutNode {
    /// Leaf node without children.
    pub fn leaf(tag: &'static str, policy: Rc<dyn LayoutPolicy>) -> Self {
        Self::with_core(tag, NodeCore::new(), policy)
    }

    /// Container node owning an ordered child list.
    pub fn container(tag: &'static str, policy: Rc<dyn LayoutPolicy>) -> Self {
        Self::with_tree(tag, Box::new(PanelTree::new()), policy)
    }

    pub fn with_tree(
        tag: &'static str,
        tree: Box<dyn LayoutTree>,
        policy: Rc<dyn LayoutPolicy>,
    ) -> Self {
        Self::with_core(tag, NodeCore::with_tree(tree), policy)
    }

    fn with_core(tag: &'static str, core: NodeCore, policy: Rc<dyn LayoutPolicy>) -> Self {
        Self {
            tag,
            core,
            policy,
            layout: LayoutState::default(),
        }
    }

    pub fn policy(&self) -> Rc<dyn LayoutPolicy> {
        Rc::clone(&self.policy)
    }

    pub fn layout_state(&self) -> &LayoutState {
        &self.layout
    }

    /// Swaps the policy of `id` and invalidates its measure.
    pub fn replace_policy(
        arena: &mut NodeArena,
        id: NodeId,
        policy: Rc<dyn LayoutPolicy>,
    ) -> Result<(), NodeError> {
        arena.with_node_mut(id, |node: &mut LayoutNode| node.policy = policy)?;
        arena.invalidate_measure(id);
        Ok(())
    }
}

impl Node for LayoutNode {
    fn type_tag(&self) -> &'static str {
        self.tag
    }

    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn cell_container(&self) -> Option<&dyn CellContainer> {
        self.policy.cell_container()
    }
}

impl std::fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutNode")
            .field("tag", &self.tag)
            .field("core", &self.core)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
