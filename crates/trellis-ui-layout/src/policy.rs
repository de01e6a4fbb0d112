//! Two-pass layout protocol shared by every container.

use crate::constraints::Constraints;
use std::any::Any;
use trellis_core::{AttachedStore, CellContainer, NodeId};
use trellis_ui_graphics::{Rect, Size};

/// Children of the node being laid out, as seen by its policy.
///
/// Implemented by the layout driver. Measuring or arranging a child through
/// this interface recurses into the child's own policy and honors its
/// cached results.
pub trait LayoutChildren {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node_id(&self, index: usize) -> NodeId;

    /// Attached properties of the child at `index`.
    fn attached(&self, index: usize) -> Option<&AttachedStore>;

    /// Measures the child and returns its desired size.
    fn measure(&mut self, index: usize, constraints: Constraints) -> Size;

    /// Desired size from the child's most recent measure.
    fn desired_size(&self, index: usize) -> Size;

    /// Places the child into `slot`, relative to the parent's origin.
    fn arrange(&mut self, index: usize, slot: Rect);
}

/// Measure/arrange hooks of a container.
///
/// `measure` computes the size the subtree wants under `constraints`. It must
/// give the same answer for unchanged inputs and never touch final layout.
/// `arrange` receives the size the parent finally allotted, places the
/// children and returns the size actually used for rendering.
pub trait LayoutPolicy: Any {
    fn measure(&self, children: &mut dyn LayoutChildren, constraints: Constraints) -> Size;

    fn arrange(&self, children: &mut dyn LayoutChildren, final_size: Size) -> Size;

    /// Present on policies that place children in attached-property cells.
    fn cell_container(&self) -> Option<&dyn CellContainer> {
        None
    }
}

impl dyn LayoutPolicy {
    pub fn as_any(&self) -> &dyn Any {
        self
    }
}
