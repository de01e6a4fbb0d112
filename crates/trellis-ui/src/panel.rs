//! Overlay panel and fixed-size leaf policies.

use std::rc::Rc;

use trellis_ui_graphics::{Rect, Size};
use trellis_ui_layout::{Constraints, LayoutChildren, LayoutPolicy};

use crate::layout_node::LayoutNode;

/// Stacks every child on top of the others, each filling the whole panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Panel;

impl Panel {
    pub const TAG: &'static str = "panel";

    pub fn new_node() -> LayoutNode {
        LayoutNode::container(Self::TAG, Rc::new(Panel))
    }
}

impl LayoutPolicy for Panel {
    fn measure(&self, children: &mut dyn LayoutChildren, constraints: Constraints) -> Size {
        measure_overlay(children, constraints)
    }

    fn arrange(&self, children: &mut dyn LayoutChildren, final_size: Size) -> Size {
        arrange_overlay(children, final_size)
    }
}

/// Measures every child against loosened constraints and wants the largest
/// of their sizes.
pub(crate) fn measure_overlay(children: &mut dyn LayoutChildren, constraints: Constraints) -> Size {
    let child_constraints = constraints.loosen();
    let mut content = Size::ZERO;
    for index in 0..children.len() {
        let desired = children.measure(index, child_constraints);
        content = content.max(desired);
    }
    constraints.constrain(content)
}

pub(crate) fn arrange_overlay(children: &mut dyn LayoutChildren, final_size: Size) -> Size {
    let slot = Rect::from_size(final_size);
    for index in 0..children.len() {
        children.arrange(index, slot);
    }
    final_size
}

/// Leaf with an intrinsic size, clamped by the incoming constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    pub intrinsic_size: Size,
}

impl Leaf {
    pub const TAG: &'static str = "leaf";

    pub fn new(intrinsic_size: Size) -> Self {
        Self { intrinsic_size }
    }

    pub fn new_node(intrinsic_size: Size) -> LayoutNode {
        LayoutNode::leaf(Self::TAG, Rc::new(Self::new(intrinsic_size)))
    }
}

impl LayoutPolicy for Leaf {
    fn measure(&self, _children: &mut dyn LayoutChildren, constraints: Constraints) -> Size {
        constraints.constrain(self.intrinsic_size)
    }

    fn arrange(&self, _children: &mut dyn LayoutChildren, final_size: Size) -> Size {
        final_size
    }
}
