use std::cell::Cell;
use std::rc::Rc;

use trellis_ui::LayoutNode;
use trellis_ui_graphics::Size;
use trellis_ui_layout::{Constraints, LayoutChildren, LayoutPolicy};

/// Fixed-size leaf that counts how often its policy runs.
#[derive(Debug, Default)]
pub struct CountingLeaf {
    size: Cell<Size>,
    measures: Cell<usize>,
    arranges: Cell<usize>,
}

impl CountingLeaf {
    pub const TAG: &'static str = "counting-leaf";

    pub fn new(size: Size) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(size),
            ..Default::default()
        })
    }

    /// Node driven by `policy`; keep the `Rc` to read the counters.
    pub fn node(policy: &Rc<Self>) -> LayoutNode {
        LayoutNode::leaf(Self::TAG, policy.clone())
    }

    /// Changes the reported size. Callers still have to invalidate the
    /// node's measure.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    pub fn measures(&self) -> usize {
        self.measures.get()
    }

    pub fn arranges(&self) -> usize {
        self.arranges.get()
    }

    pub fn reset(&self) {
        self.measures.set(0);
        self.arranges.set(0);
    }
}

impl LayoutPolicy for CountingLeaf {
    fn measure(&self, _children: &mut dyn LayoutChildren, constraints: Constraints) -> Size {
        self.measures.set(self.measures.get() + 1);
        constraints.constrain(self.size.get())
    }

    fn arrange(&self, _children: &mut dyn LayoutChildren, final_size: Size) -> Size {
        self.arranges.set(self.arranges.get() + 1);
        final_size
    }
}
