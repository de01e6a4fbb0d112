//! Upward dirty-flag propagation and the invalidation entry points built on
//! it.

use crate::flags::LayoutFlags;
use crate::NodeId;

/// Access to the per-node state the propagator reads and writes.
///
/// [`NodeArena`](crate::NodeArena) is the production host; tests plug in
/// probes to observe exactly which ancestors a walk touches.
pub trait FlagHost {
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    fn flags_of(&self, id: NodeId) -> LayoutFlags;

    fn insert_flags(&mut self, id: NodeId, flags: LayoutFlags);

    /// Upper bound on the length of any well-formed parent chain.
    fn node_count(&self) -> usize;
}

/// Sets `flag` on every ancestor of `node`, nearest first, stopping at the
/// first ancestor that already contains it.
///
/// Every flag-setting path goes through here, so an ancestor that already
/// carries `flag` implies every ancestor above it does too; the walk ends
/// there without touching it again. The node itself is not modified.
///
/// # Panics
///
/// Panics on a cyclic parent chain: when the walk comes back to `node`, when
/// it visits more ancestors than the host holds nodes, or (in debug builds)
/// when it stops at an ancestor it flagged itself.
pub fn propagate_flag_up(host: &mut dyn FlagHost, node: NodeId, flag: LayoutFlags) {
    let limit = host.node_count();
    let mut hops = 0usize;
    let mut cursor = host.parent_of(node);
    #[cfg(debug_assertions)]
    let mut written = crate::collections::IdSet::default();

    while let Some(ancestor) = cursor {
        assert_ne!(
            ancestor, node,
            "parent chain of node {node} does not terminate (cycle through itself)"
        );
        if host.flags_of(ancestor).contains(flag) {
            #[cfg(debug_assertions)]
            assert!(
                !written.contains(&ancestor),
                "parent chain of node {node} does not terminate (cycle at {ancestor})"
            );
            log::trace!("propagate {flag:?} from {node}: stopped at {ancestor}");
            return;
        }
        hops += 1;
        assert!(
            hops <= limit,
            "parent chain of node {node} does not terminate (cycle at {ancestor})"
        );
        host.insert_flags(ancestor, flag);
        #[cfg(debug_assertions)]
        written.insert(ancestor);
        cursor = host.parent_of(ancestor);
    }

    log::trace!("propagate {flag:?} from {node}: reached root after {hops} hops");
}

/// Marks `node` as needing measure and tells its ancestors.
pub fn invalidate_measure(host: &mut dyn FlagHost, node: NodeId) {
    host.insert_flags(node, LayoutFlags::MEASURE | LayoutFlags::MEASURE_HINT);
    propagate_flag_up(host, node, LayoutFlags::MEASURE_HINT);
}

/// Marks `node` as needing arrange and tells its ancestors.
pub fn invalidate_arrange(host: &mut dyn FlagHost, node: NodeId) {
    host.insert_flags(node, LayoutFlags::ARRANGE | LayoutFlags::ARRANGE_HINT);
    propagate_flag_up(host, node, LayoutFlags::ARRANGE_HINT);
}
