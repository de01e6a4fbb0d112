//! Recomputation pass: consumes the dirty flags left by invalidation.

use trellis_core::{AttachedStore, LayoutFlags, Node, NodeArena, NodeError, NodeId};
use trellis_ui_graphics::{Rect, Size};
use trellis_ui_layout::{Constraints, LayoutChildren, LayoutPolicy};

use crate::layout_node::{LayoutNode, LayoutState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Snap desired sizes and slots to whole pixels.
    pub round_to_pixels: bool,
}

/// Summary of one [`update_layout`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutOutcome {
    /// Number of measure policies that actually ran.
    pub measured: usize,
    /// Number of arrange policies that actually ran.
    pub arranged: usize,
    /// Size the root was arranged to.
    pub root_size: Size,
}

/// Lays out the tree below `root` within `available` with default options.
pub fn update_layout(
    arena: &mut NodeArena,
    root: NodeId,
    available: Size,
) -> Result<LayoutOutcome, NodeError> {
    update_layout_with(arena, root, available, LayoutOptions::default())
}

pub fn update_layout_with(
    arena: &mut NodeArena,
    root: NodeId,
    available: Size,
    options: LayoutOptions,
) -> Result<LayoutOutcome, NodeError> {
    LayoutUpdater::new(arena, options).update(root, available)
}

/// Walks the dirty part of a tree, measuring then arranging.
///
/// A node is visited when it or one of its descendants carries a flag, or
/// when its parent hands it different constraints or a different slot than
/// last time. Everything else answers from its cached [`LayoutState`].
pub struct LayoutUpdater<'a> {
    arena: &'a mut NodeArena,
    options: LayoutOptions,
    outcome: LayoutOutcome,
    first_error: Option<NodeError>,
}

impl<'a> LayoutUpdater<'a> {
    pub fn new(arena: &'a mut NodeArena, options: LayoutOptions) -> Self {
        Self {
            arena,
            options,
            outcome: LayoutOutcome::default(),
            first_error: None,
        }
    }

    pub fn update(mut self, root: NodeId, available: Size) -> Result<LayoutOutcome, NodeError> {
        let constraints = Constraints::from_available(available);
        let desired = self.measure_node(root, constraints)?;
        let final_size = Size::new(
            if constraints.has_bounded_width() {
                available.width
            } else {
                desired.width
            },
            if constraints.has_bounded_height() {
                available.height
            } else {
                desired.height
            },
        );
        self.arrange_node(root, Rect::from_size(final_size))?;
        if let Some(err) = self.first_error.take() {
            return Err(err);
        }
        self.outcome.root_size = final_size;
        log::debug!(
            "layout of {root}: measured {} arranged {}",
            self.outcome.measured,
            self.outcome.arranged
        );
        Ok(self.outcome)
    }

    fn state(&self, id: NodeId) -> Result<(LayoutFlags, LayoutState), NodeError> {
        self.arena
            .with_node(id, |node: &LayoutNode| (node.flags(), node.layout))
    }

    fn policy(&self, id: NodeId) -> Result<std::rc::Rc<dyn LayoutPolicy>, NodeError> {
        self.arena.with_node(id, |node: &LayoutNode| node.policy())
    }

    pub fn measure_node(&mut self, id: NodeId, constraints: Constraints) -> Result<Size, NodeError> {
        // Materialized content marks the node for measure.
        self.arena.apply_template(id)?;
        let (flags, cached) = self.state(id)?;
        if !flags.needs_measure_visit() && cached.constraints == Some(constraints) {
            return Ok(cached.desired_size);
        }

        let policy = self.policy(id)?;
        let children = self.arena.children(id);
        let mut desired = {
            let mut scope = ChildScope {
                updater: &mut *self,
                children: &children,
            };
            policy.measure(&mut scope, constraints)
        };
        if self.options.round_to_pixels {
            desired = desired.round();
        }
        self.outcome.measured += 1;

        self.settle(id, &children, LayoutFlags::MEASURE, LayoutFlags::MEASURE_HINT);
        self.arena.with_node_mut(id, |node: &mut LayoutNode| {
            node.layout.desired_size = desired;
            node.layout.constraints = Some(constraints);
        })?;
        // Inputs that changed the measure may move children without
        // changing the desired size.
        self.arena.invalidate_arrange(id);
        log::trace!("measured {id}: {desired:?}");
        Ok(desired)
    }

    pub fn arrange_node(&mut self, id: NodeId, slot: Rect) -> Result<(), NodeError> {
        let slot = if self.options.round_to_pixels {
            slot.round()
        } else {
            slot
        };
        let (flags, cached) = self.state(id)?;
        if flags.contains(LayoutFlags::MEASURE) {
            let constraints = cached
                .constraints
                .unwrap_or_else(|| Constraints::tight(slot.width, slot.height));
            self.measure_node(id, constraints)?;
        }
        let (flags, cached) = self.state(id)?;
        if !flags.needs_arrange_visit() && cached.slot == Some(slot) {
            return Ok(());
        }

        let policy = self.policy(id)?;
        let children = self.arena.children(id);
        let render_size = {
            let mut scope = ChildScope {
                updater: &mut *self,
                children: &children,
            };
            policy.arrange(&mut scope, slot.size())
        };
        self.outcome.arranged += 1;

        self.settle(id, &children, LayoutFlags::ARRANGE, LayoutFlags::ARRANGE_HINT);
        self.arena.with_node_mut(id, |node: &mut LayoutNode| {
            node.layout.slot = Some(slot);
            node.layout.render_size = render_size;
        })?;
        log::trace!("arranged {id} into {slot:?}");
        Ok(())
    }

    /// Clears `own | hint` on `id`, keeping the hint while a child the
    /// policy skipped is still dirty.
    fn settle(&mut self, id: NodeId, children: &[NodeId], own: LayoutFlags, hint: LayoutFlags) {
        let child_dirty = children
            .iter()
            .any(|&child| self.arena.flags(child).intersects(own | hint));
        let cleared = if child_dirty { own } else { own | hint };
        self.arena.clear_flags(id, cleared);
    }

    fn record(&mut self, id: NodeId, err: NodeError) {
        log::warn!("layout of node {id} failed: {err}");
        self.first_error.get_or_insert(err);
    }
}

/// Children of the node currently being measured or arranged.
struct ChildScope<'u, 'a> {
    updater: &'u mut LayoutUpdater<'a>,
    children: &'u [NodeId],
}

impl LayoutChildren for ChildScope<'_, '_> {
    fn len(&self) -> usize {
        self.children.len()
    }

    fn node_id(&self, index: usize) -> NodeId {
        self.children[index]
    }

    fn attached(&self, index: usize) -> Option<&AttachedStore> {
        let id = *self.children.get(index)?;
        self.updater
            .arena
            .get(id)
            .ok()
            .map(|node| node.core().attached())
    }

    fn measure(&mut self, index: usize, constraints: Constraints) -> Size {
        let id = self.children[index];
        match self.updater.measure_node(id, constraints) {
            Ok(size) => size,
            Err(err) => {
                self.updater.record(id, err);
                Size::ZERO
            }
        }
    }

    fn desired_size(&self, index: usize) -> Size {
        let id = self.children[index];
        self.updater
            .arena
            .with_node(id, |node: &LayoutNode| node.layout.desired_size)
            .unwrap_or_default()
    }

    fn arrange(&mut self, index: usize, slot: Rect) {
        let id = self.children[index];
        if let Err(err) = self.updater.arrange_node(id, slot) {
            self.updater.record(id, err);
        }
    }
}

/// Accumulated offset of `id` from the root of its tree.
pub fn absolute_bounds(arena: &NodeArena, id: NodeId) -> Result<Rect, NodeError> {
    let slot = arena
        .with_node(id, |node: &LayoutNode| node.layout.slot)?
        .unwrap_or_default();
    let mut bounds = slot;
    let mut cursor = arena.parent(id);
    while let Some(parent) = cursor {
        let origin = arena
            .with_node(parent, |node: &LayoutNode| node.layout.slot)?
            .unwrap_or_default();
        bounds = bounds.translate(origin.x, origin.y);
        cursor = arena.parent(parent);
    }
    Ok(bounds)
}

#[cfg(test)]
#[path = "../tests/layout_tests.rs"]
mod tests;
