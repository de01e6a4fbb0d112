//! Layout invalidation flags.
//!
//! Each stale concern comes as a pair. The plain flag (`MEASURE`, `ARRANGE`)
//! says the node itself must re-run that pass. The hint flag says the node *or
//! something below it* must; hints are what
//! [`propagate_flag_up`](crate::propagate_flag_up) carries to ancestors so a
//! pass can skip every subtree whose root carries no hint.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayoutFlags: u8 {
        /// The node's desired size is stale.
        const MEASURE = 1 << 0;
        /// The node's final slot is stale.
        const ARRANGE = 1 << 1;
        /// The node or a descendant needs measuring.
        const MEASURE_HINT = 1 << 2;
        /// The node or a descendant needs arranging.
        const ARRANGE_HINT = 1 << 3;

        const HINTS = Self::MEASURE_HINT.bits() | Self::ARRANGE_HINT.bits();
    }
}

impl LayoutFlags {
    /// Flags a freshly created node carries before its first pass.
    pub const INITIAL: LayoutFlags = LayoutFlags::MEASURE.union(LayoutFlags::ARRANGE);

    /// True when a measure pass has to visit this node.
    pub fn needs_measure_visit(self) -> bool {
        self.intersects(LayoutFlags::MEASURE | LayoutFlags::MEASURE_HINT)
    }

    /// True when an arrange pass has to visit this node.
    pub fn needs_arrange_visit(self) -> bool {
        self.intersects(LayoutFlags::ARRANGE | LayoutFlags::ARRANGE_HINT)
    }
}
