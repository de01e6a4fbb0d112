use trellis_core::{LayoutFlags, Node, NodeArena, NodeId};
use trellis_ui::{update_layout_with, Leaf, LayoutNode, LayoutOptions, LayoutOutcome, Registry};
use trellis_ui_graphics::{Rect, Size};

/// Arena, registry and root bundled for layout tests.
///
/// ```ignore
/// let mut rule = LayoutTestRule::new();
/// let grid = rule.create("grid");
/// rule.set_root(grid);
/// rule.layout();
/// rule.assert_clean(grid);
/// ```
pub struct LayoutTestRule {
    arena: NodeArena,
    registry: Registry,
    root: Option<NodeId>,
    available: Size,
    options: LayoutOptions,
}

impl LayoutTestRule {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            registry: Registry::with_defaults(),
            root: None,
            available: Size::new(800.0, 600.0),
            options: LayoutOptions::default(),
        }
    }

    pub fn with_available(mut self, available: Size) -> Self {
        self.available = available;
        self
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Creates a registered node type. Panics on unknown tags.
    pub fn create(&mut self, tag: &str) -> NodeId {
        self.registry
            .create(&mut self.arena, tag)
            .unwrap_or_else(|err| panic!("failed to create `{tag}`: {err}"))
    }

    pub fn add(&mut self, node: LayoutNode) -> NodeId {
        self.arena.create(Box::new(node))
    }

    pub fn leaf(&mut self, width: f32, height: f32) -> NodeId {
        self.add(Leaf::new_node(Size::new(width, height)))
    }

    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.arena
            .insert_child(parent, child)
            .unwrap_or_else(|err| panic!("failed to attach {child} under {parent}: {err}"));
    }

    /// Applies a configuration key through the registry. Panics on errors.
    pub fn apply(&mut self, id: NodeId, key: &str, raw: &str) {
        self.registry
            .apply(&mut self.arena, id, key, raw)
            .unwrap_or_else(|err| panic!("failed to apply `{key}` = `{raw}` to {id}: {err}"));
    }

    /// Runs a layout pass from the root.
    pub fn layout(&mut self) -> LayoutOutcome {
        let root = self.root.expect("LayoutTestRule::layout called without a root");
        update_layout_with(&mut self.arena, root, self.available, self.options)
            .unwrap_or_else(|err| panic!("layout failed: {err}\n{}", self.dump()))
    }

    pub fn flags(&self, id: NodeId) -> LayoutFlags {
        self.arena.flags(id)
    }

    pub fn slot(&self, id: NodeId) -> Option<Rect> {
        self.arena
            .with_node(id, |node: &LayoutNode| node.layout_state().slot)
            .unwrap_or_else(|err| panic!("no layout state for {id}: {err}"))
    }

    pub fn desired_size(&self, id: NodeId) -> Size {
        self.arena
            .with_node(id, |node: &LayoutNode| node.layout_state().desired_size)
            .unwrap_or_else(|err| panic!("no layout state for {id}: {err}"))
    }

    pub fn node(&self, id: NodeId) -> &dyn Node {
        self.arena
            .get(id)
            .unwrap_or_else(|err| panic!("no node {id}: {err}"))
    }

    pub fn dump(&self) -> String {
        self.arena.dump_tree(self.root)
    }

    #[track_caller]
    pub fn assert_clean(&self, id: NodeId) {
        let flags = self.flags(id);
        assert!(
            flags.is_empty(),
            "node {id} expected clean, has {flags:?}\n{}",
            self.dump()
        );
    }

    /// Asserts `id` itself must be measured again.
    #[track_caller]
    pub fn assert_measure_dirty(&self, id: NodeId) {
        let flags = self.flags(id);
        assert!(
            flags.contains(LayoutFlags::MEASURE | LayoutFlags::MEASURE_HINT),
            "node {id} expected measure-dirty, has {flags:?}\n{}",
            self.dump()
        );
    }

    /// Asserts `id` only carries the measure hint of a dirty descendant.
    #[track_caller]
    pub fn assert_measure_hint_only(&self, id: NodeId) {
        let flags = self.flags(id);
        assert!(
            flags.contains(LayoutFlags::MEASURE_HINT) && !flags.contains(LayoutFlags::MEASURE),
            "node {id} expected only a measure hint, has {flags:?}\n{}",
            self.dump()
        );
    }
}

impl Default for LayoutTestRule {
    fn default() -> Self {
        Self::new()
    }
}
