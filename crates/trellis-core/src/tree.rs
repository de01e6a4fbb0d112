//! Layout tree contexts.
//!
//! Every node owns a [`LayoutTree`]: the capability object through which it
//! reaches its parent and enumerates its children. Containers hold real child
//! lists; leaves only remember their parent. [`DefaultLayoutTree`] is the
//! placeholder a node carries before it is attached anywhere.

use crate::NodeId;
use smallvec::SmallVec;

/// Order in which a [`TreeWalker`] visits children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalkDirection {
    #[default]
    Forward,
    Reverse,
}

/// Stateful cursor over a node's children.
///
/// A walker starts *before* the first element; every [`step`](Self::step)
/// advances it and reports whether a current element is available. Walkers
/// are cheap; ask the tree for a fresh one to restart.
#[derive(Clone, Debug)]
pub struct TreeWalker<'a> {
    children: &'a [NodeId],
    direction: WalkDirection,
    // Number of elements already yielded.
    taken: usize,
    current: Option<NodeId>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(children: &'a [NodeId], direction: WalkDirection) -> Self {
        Self {
            children,
            direction,
            taken: 0,
            current: None,
        }
    }

    /// A walker that never yields.
    pub fn empty() -> Self {
        Self::new(&[], WalkDirection::Forward)
    }

    /// Advances to the next child. Returns false once the walk is exhausted,
    /// after which [`current`](Self::current) is `None`.
    pub fn step(&mut self) -> bool {
        if self.taken >= self.children.len() {
            self.current = None;
            return false;
        }
        let index = match self.direction {
            WalkDirection::Forward => self.taken,
            WalkDirection::Reverse => self.children.len() - 1 - self.taken,
        };
        self.taken += 1;
        self.current = Some(self.children[index]);
        true
    }

    /// Child the cursor is positioned on.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn direction(&self) -> WalkDirection {
        self.direction
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.step() {
            self.current
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.children.len() - self.taken;
        (remaining, Some(remaining))
    }
}

/// Capability interface a node uses to reach its parent and its children.
pub trait LayoutTree {
    /// Non-owning link to the parent, `None` for roots and unattached nodes.
    fn parent(&self) -> Option<NodeId>;

    /// Records a new parent. Returns false when this tree cannot carry a
    /// parent link (the unattached placeholder); the arena then swaps in a
    /// [`LeafTree`].
    fn set_parent(&mut self, _parent: Option<NodeId>) -> bool {
        false
    }

    /// Materializes lazy content. Returns true when content was just
    /// materialized, which obliges the caller to measure the node again.
    fn apply_template(&mut self) -> bool;

    /// Hands over the content the last [`apply_template`](Self::apply_template)
    /// materialized. The caller validates and links each id before it joins
    /// the child list.
    fn take_materialized(&mut self) -> SmallVec<[NodeId; 4]> {
        SmallVec::new()
    }

    /// Fresh cursor over the children.
    fn walk(&self, direction: WalkDirection) -> TreeWalker<'_>;

    /// Mutable child list for trees that own children.
    fn children_mut(&mut self) -> Option<&mut ChildList> {
        None
    }

    /// True for the unattached placeholder.
    fn is_placeholder(&self) -> bool {
        false
    }
}

/// Tree context used before a node is wired into a container.
///
/// It has no parent, yields no children in either direction and reports its
/// (empty) template as applied every time.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLayoutTree;

impl LayoutTree for DefaultLayoutTree {
    fn parent(&self) -> Option<NodeId> {
        None
    }

    fn apply_template(&mut self) -> bool {
        true
    }

    fn walk(&self, _direction: WalkDirection) -> TreeWalker<'_> {
        TreeWalker::empty()
    }

    fn is_placeholder(&self) -> bool {
        true
    }
}

/// Tree context of an attached node without children of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeafTree {
    parent: Option<NodeId>,
}

impl LeafTree {
    pub fn new(parent: Option<NodeId>) -> Self {
        Self { parent }
    }
}

impl LayoutTree for LeafTree {
    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) -> bool {
        self.parent = parent;
        true
    }

    fn apply_template(&mut self) -> bool {
        false
    }

    fn walk(&self, _direction: WalkDirection) -> TreeWalker<'_> {
        TreeWalker::empty()
    }
}

/// Ordered child list owned by a container tree.
#[derive(Clone, Debug, Default)]
pub struct ChildList {
    ids: SmallVec<[NodeId; 4]>,
}

impl ChildList {
    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.ids.iter().position(|&child| child == id)
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, id: NodeId) {
        let index = index.min(self.ids.len());
        self.ids.insert(index, id);
    }

    pub fn push(&mut self, id: NodeId) {
        self.ids.push(id);
    }

    /// Removes `id`, keeping the order of the remaining children.
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Tree context of a container that owns an ordered child list.
///
/// Content handed over through [`with_template`](Self::with_template) stays
/// pending until the first [`apply_template`](LayoutTree::apply_template).
/// The arena then takes it and links each id as a regular child.
#[derive(Clone, Debug, Default)]
pub struct PanelTree {
    parent: Option<NodeId>,
    children: ChildList,
    pending: Option<SmallVec<[NodeId; 4]>>,
    materialized: SmallVec<[NodeId; 4]>,
}

impl PanelTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel whose children are materialized lazily on first template
    /// application.
    pub fn with_template(content: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            parent: None,
            children: ChildList::default(),
            pending: Some(content.into_iter().collect()),
            materialized: SmallVec::new(),
        }
    }

    pub fn children(&self) -> &ChildList {
        &self.children
    }

    pub fn has_pending_template(&self) -> bool {
        self.pending.is_some()
    }
}

impl LayoutTree for PanelTree {
    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) -> bool {
        self.parent = parent;
        true
    }

    fn apply_template(&mut self) -> bool {
        match self.pending.take() {
            Some(content) => {
                self.materialized.extend(content);
                true
            }
            None => false,
        }
    }

    fn take_materialized(&mut self) -> SmallVec<[NodeId; 4]> {
        std::mem::take(&mut self.materialized)
    }

    fn walk(&self, direction: WalkDirection) -> TreeWalker<'_> {
        TreeWalker::new(self.children.as_slice(), direction)
    }

    fn children_mut(&mut self) -> Option<&mut ChildList> {
        Some(&mut self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_walks_nothing() {
        let tree = DefaultLayoutTree;
        assert_eq!(tree.parent(), None);
        assert!(!tree.walk(WalkDirection::Forward).step());
        assert!(!tree.walk(WalkDirection::Reverse).step());
        assert_eq!(tree.walk(WalkDirection::Forward).count(), 0);
        assert_eq!(tree.walk(WalkDirection::Reverse).count(), 0);
    }

    #[test]
    fn default_tree_reports_template_applied() {
        let mut tree = DefaultLayoutTree;
        assert!(tree.apply_template());
        assert!(tree.apply_template());
        assert!(tree.is_placeholder());
        assert!(!tree.set_parent(Some(3)));
        assert_eq!(tree.parent(), None);
    }

    #[test]
    fn walker_steps_forward_and_reverse() {
        let ids = [4, 7, 9];
        let mut walker = TreeWalker::new(&ids, WalkDirection::Forward);
        assert_eq!(walker.current(), None);
        assert!(walker.step());
        assert_eq!(walker.current(), Some(4));
        assert!(walker.step());
        assert!(walker.step());
        assert_eq!(walker.current(), Some(9));
        assert!(!walker.step());
        assert_eq!(walker.current(), None);

        let reverse = TreeWalker::new(&ids, WalkDirection::Reverse);
        assert_eq!(reverse.direction(), WalkDirection::Reverse);
        let reversed: Vec<_> = reverse.collect();
        assert_eq!(reversed, vec![9, 7, 4]);
    }

    #[test]
    fn panel_walk_is_restartable() {
        let mut tree = PanelTree::new();
        let children = tree.children_mut().unwrap();
        children.push(1);
        children.push(2);
        let first: Vec<_> = tree.walk(WalkDirection::Forward).collect();
        let second: Vec<_> = tree.walk(WalkDirection::Forward).collect();
        assert_eq!(first, second);
        assert_eq!(tree.walk(WalkDirection::Reverse).next(), Some(2));
    }

    #[test]
    fn panel_template_materializes_once() {
        let mut tree = PanelTree::with_template([5, 6]);
        assert!(tree.has_pending_template());
        assert_eq!(tree.walk(WalkDirection::Forward).count(), 0);
        assert!(tree.apply_template());
        assert!(!tree.has_pending_template());
        assert!(!tree.apply_template());
        // Content waits for the arena to link it.
        assert_eq!(tree.walk(WalkDirection::Forward).count(), 0);
        assert_eq!(tree.take_materialized().as_slice(), &[5, 6]);
        assert!(tree.take_materialized().is_empty());
    }

    #[test]
    fn child_list_insert_clamps_and_remove_keeps_order() {
        let mut list = ChildList::default();
        list.push(1);
        list.push(3);
        list.insert(1, 2);
        list.insert(99, 4);
        assert_eq!(list.as_slice(), &[1, 2, 3, 4]);
        assert!(list.remove(2));
        assert!(!list.remove(2));
        assert_eq!(list.as_slice(), &[1, 3, 4]);
    }

    #[test]
    fn leaf_tree_tracks_parent() {
        let mut tree = LeafTree::default();
        assert!(tree.set_parent(Some(8)));
        assert_eq!(tree.parent(), Some(8));
        assert!(!tree.apply_template());
        assert_eq!(tree.walk(WalkDirection::Reverse).count(), 0);
    }
}
