use crate::flags::LayoutFlags;
use crate::node::Node;
use crate::propagate::{self, FlagHost};
use crate::tree::{TreeWalker, WalkDirection};
use crate::{NodeError, NodeId};

/// Owning storage for every node of a layout tree.
///
/// Parents refer to children and children to parents by [`NodeId`] only; the
/// arena is the single owner. Slots of removed nodes go on a free list and
/// [`create`](Self::create) hands their ids out again, so an id must not be
/// used after its node was removed.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Option<Box<dyn Node>>>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, node: Box<dyn Node>) -> NodeId {
        let tag = node.type_tag();
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        log::debug!("create node {id} ({tag})");
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&dyn Node, NodeError> {
        self.nodes
            .get(id)
            .ok_or(NodeError::Missing { id })?
            .as_deref()
            .ok_or(NodeError::Missing { id })
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, NodeError> {
        let slot = self
            .nodes
            .get_mut(id)
            .ok_or(NodeError::Missing { id })?
            .as_deref_mut()
            .ok_or(NodeError::Missing { id })?;
        Ok(slot)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id), Some(Some(_)))
    }

    /// Runs `f` on the node downcast to its concrete type.
    pub fn with_node<N: Node + 'static, R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&N) -> R,
    ) -> Result<R, NodeError> {
        let slot = self
            .nodes
            .get(id)
            .ok_or(NodeError::Missing { id })?
            .as_deref()
            .ok_or(NodeError::Missing { id })?;
        let typed = slot
            .as_any()
            .downcast_ref::<N>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            })?;
        Ok(f(typed))
    }

    pub fn with_node_mut<N: Node + 'static, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let slot = self
            .nodes
            .get_mut(id)
            .ok_or(NodeError::Missing { id })?
            .as_deref_mut()
            .ok_or(NodeError::Missing { id })?;
        let typed = slot
            .as_any_mut()
            .downcast_mut::<N>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            })?;
        Ok(f(typed))
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology --

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).ok().and_then(|node| node.parent())
    }

    /// Fresh cursor over the children of `id`.
    pub fn walk(&self, id: NodeId, direction: WalkDirection) -> Result<TreeWalker<'_>, NodeError> {
        Ok(self.get(id)?.core().tree().walk(direction))
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.walk(id, WalkDirection::Forward) {
            Ok(walker) => walker.collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Returns true if `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        let mut hops = 0usize;
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            hops += 1;
            assert!(
                hops <= self.nodes.len(),
                "parent chain of node {id} does not terminate"
            );
            cursor = self.parent(current);
        }
        false
    }

    /// Appends `child` to `parent`.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.insert_child_at(parent, usize::MAX, child)
    }

    /// Inserts `child` at `index` (clamped) among the children of `parent`.
    ///
    /// The parent's measure and arrange are invalidated, which also carries
    /// the child's pending initial layout up the tree.
    ///
    /// # Panics
    ///
    /// Panics if `child` is `parent` or one of its ancestors.
    pub fn insert_child_at(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), NodeError> {
        self.link_child(parent, index, child)?;
        self.invalidate_measure(parent);
        self.invalidate_arrange(parent);
        Ok(())
    }

    /// Validates and records the parent/child link without invalidating.
    fn link_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), NodeError> {
        if let Some(existing) = self.get(child)?.parent() {
            return Err(NodeError::AlreadyAttached {
                id: child,
                parent: existing,
            });
        }
        assert!(
            !self.is_ancestor_or_self(child, parent),
            "attaching node {child} under {parent} would create a cycle"
        );

        let children = self
            .get_mut(parent)?
            .core_mut()
            .tree_mut()
            .children_mut()
            .ok_or(NodeError::NotAContainer { id: parent })?;
        children.insert(index, child);

        self.get_mut(child)?.core_mut().attach_to(parent);
        log::debug!("attach node {child} under {parent}");
        Ok(())
    }

    /// Detaches `child` from `parent`. The child and its subtree stay alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        let removed = self
            .get_mut(parent)?
            .core_mut()
            .tree_mut()
            .children_mut()
            .ok_or(NodeError::NotAContainer { id: parent })?
            .remove(child);
        if !removed {
            return Err(NodeError::NotAChild { id: child, parent });
        }
        if let Ok(node) = self.get_mut(child) {
            node.core_mut().detach();
        }
        log::debug!("detach node {child} from {parent}");

        self.invalidate_measure(parent);
        self.invalidate_arrange(parent);
        Ok(())
    }

    /// Removes `id` and its whole subtree, detaching it from its parent first.
    pub fn remove(&mut self, id: NodeId) -> Result<(), NodeError> {
        if let Some(parent) = self.get(id)?.parent() {
            self.remove_child(parent, id)?;
        }
        self.drop_subtree(id);
        Ok(())
    }

    fn drop_subtree(&mut self, id: NodeId) {
        for child in self.children(id) {
            self.drop_subtree(child);
        }
        if let Some(slot) = self.nodes.get_mut(id) {
            if slot.take().is_some() {
                self.free.push(id);
            }
        }
    }

    /// Runs the template hook of `id`.
    ///
    /// Returns true when content was just materialized; the node is then
    /// marked for measure. Materialized ids are linked like
    /// [`insert_child`](Self::insert_child) links them: ids that are missing or
    /// already attached elsewhere are skipped with a warning.
    ///
    /// # Panics
    ///
    /// Panics if the content contains `id` or one of its ancestors.
    pub fn apply_template(&mut self, id: NodeId) -> Result<bool, NodeError> {
        let tree = self.get_mut(id)?.core_mut().tree_mut();
        if !tree.apply_template() {
            return Ok(false);
        }
        let content = tree.take_materialized();
        for child in content {
            if let Err(err) = self.link_child(id, usize::MAX, child) {
                log::warn!("template of node {id} skipped node {child}: {err}");
            }
        }
        self.invalidate_measure(id);
        Ok(true)
    }

    // -- Flags --

    pub fn flags(&self, id: NodeId) -> LayoutFlags {
        self.get(id).map(|node| node.flags()).unwrap_or_default()
    }

    /// Clears `flags` on `id`. Only the recomputation pass should call this.
    pub fn clear_flags(&mut self, id: NodeId, flags: LayoutFlags) {
        if let Ok(node) = self.get(id) {
            node.core().remove_flags(flags);
        }
    }

    pub fn propagate_flag_up(&mut self, id: NodeId, flag: LayoutFlags) {
        propagate::propagate_flag_up(self, id, flag);
    }

    pub fn invalidate_measure(&mut self, id: NodeId) {
        propagate::invalidate_measure(self, id);
    }

    pub fn invalidate_arrange(&mut self, id: NodeId) {
        propagate::invalidate_arrange(self, id);
    }

    /// Invalidates the measure of `id`, and of its parent when the parent
    /// places children in cells.
    pub fn invalidate_cell(&mut self, id: NodeId) {
        let cell_parent = self.parent(id).filter(|&parent| {
            self.get(parent)
                .map(|node| node.cell_container().is_some())
                .unwrap_or(false)
        });
        if let Some(parent) = cell_parent {
            self.invalidate_measure(parent);
        }
        self.invalidate_measure(id);
    }

    /// Renders the subtree below `root` as an indented listing with flags.
    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.dump_node(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.get(id) {
            Ok(node) => {
                output.push_str(&format!(
                    "{}[{}] {} {:?}\n",
                    indent,
                    id,
                    node.type_tag(),
                    node.flags()
                ));
                for child_id in self.children(id) {
                    self.dump_node(output, child_id, depth + 1);
                }
            }
            Err(_) => output.push_str(&format!("{}[{}] (missing)\n", indent, id)),
        }
    }
}

impl FlagHost for NodeArena {
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)
    }

    fn flags_of(&self, id: NodeId) -> LayoutFlags {
        self.flags(id)
    }

    fn insert_flags(&mut self, id: NodeId, flags: LayoutFlags) {
        if let Ok(node) = self.get(id) {
            node.core().insert_flags(flags);
        }
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Free-function form of [`NodeArena::invalidate_cell`] for containers that
/// want the same "self and cell-placing parent" policy.
pub fn invalidate_cell(arena: &mut NodeArena, id: NodeId) {
    arena.invalidate_cell(id);
}
