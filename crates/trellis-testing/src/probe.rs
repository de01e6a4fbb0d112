use trellis_core::{FlagHost, LayoutFlags, NodeArena, NodeId};

/// [`FlagHost`] over a real arena that records every flag read and write.
pub struct TracingHost<'a> {
    arena: &'a mut NodeArena,
    reads: std::cell::RefCell<Vec<NodeId>>,
    writes: Vec<(NodeId, LayoutFlags)>,
}

impl<'a> TracingHost<'a> {
    pub fn new(arena: &'a mut NodeArena) -> Self {
        Self {
            arena,
            reads: Default::default(),
            writes: Vec::new(),
        }
    }

    /// Nodes whose flags were read, in order.
    pub fn reads(&self) -> Vec<NodeId> {
        self.reads.borrow().clone()
    }

    /// Flag writes, in order.
    pub fn writes(&self) -> &[(NodeId, LayoutFlags)] {
        &self.writes
    }

    /// Nodes written to, in order.
    pub fn written_nodes(&self) -> Vec<NodeId> {
        self.writes.iter().map(|(id, _)| *id).collect()
    }
}

impl FlagHost for TracingHost<'_> {
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.parent(id)
    }

    fn flags_of(&self, id: NodeId) -> LayoutFlags {
        self.reads.borrow_mut().push(id);
        self.arena.flags(id)
    }

    fn insert_flags(&mut self, id: NodeId, flags: LayoutFlags) {
        self.writes.push((id, flags));
        FlagHost::insert_flags(&mut *self.arena, id, flags);
    }

    fn node_count(&self) -> usize {
        FlagHost::node_count(&*self.arena)
    }
}
