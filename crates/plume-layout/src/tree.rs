//! The box-layout capability and its arena implementation.
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, so callers can hold node handles across passes without
//! borrowing the engine.

use std::fmt;

use crate::geometry::{Available, ComputedLayout, Size};
use crate::style::BoxStyle;

/// A type-safe index into a layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Measurement callback for leaf nodes.
///
/// Receives the available content width (`None` when unconstrained) and
/// returns the content size. The engine may call it several times for the
/// same width, so it must be idempotent.
pub type MeasureFunc = Box<dyn Fn(Option<f32>) -> Size>;

/// A constraint-based box-layout engine.
///
/// Nodes are created detached, inserted under a parent in document order,
/// configured through [`BoxLayout::style_mut`], and read back after
/// [`BoxLayout::compute_layout`].
pub trait BoxLayout {
    /// Allocate a detached node with the default style.
    fn create_node(&mut self) -> NodeId;

    /// Insert `child` into `parent`'s children at `index`.
    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize);

    /// Number of children currently attached to `node`.
    fn child_count(&self, node: NodeId) -> usize;

    /// The layout inputs of `node`.
    fn style(&self, node: NodeId) -> &BoxStyle;

    /// Mutable access to the layout inputs of `node`.
    fn style_mut(&mut self, node: NodeId) -> &mut BoxStyle;

    /// Register a measurement callback, making `node` a measured leaf.
    fn set_measure(&mut self, node: NodeId, measure: MeasureFunc);

    /// Resolve geometry for the subtree rooted at `node`.
    ///
    /// For a root node `available` is the owner size. For an attached node
    /// the subtree is laid out again inside its already-resolved box.
    fn compute_layout(&mut self, node: NodeId, available: Available);

    /// The resolved box of `node`, relative to its parent.
    fn layout(&self, node: NodeId) -> ComputedLayout;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.child_count(parent);
        self.insert_child(parent, child, index);
    }
}

/// One node in a [`FlexTree`].
pub(crate) struct LayoutNode {
    pub(crate) style: BoxStyle,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) measure: Option<MeasureFunc>,
    pub(crate) layout: ComputedLayout,
}

/// Arena-backed flexbox engine implementing [`BoxLayout`].
///
/// See the `flex` module for the supported subset of the algorithm.
#[derive(Default)]
pub struct FlexTree {
    pub(crate) nodes: Vec<LayoutNode>,
}

impl FlexTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of allocated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `node` in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Parent of `node`, if attached.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub(crate) fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.0]
    }
}

impl fmt::Debug for FlexTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl BoxLayout for FlexTree {
    fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(LayoutNode {
            style: BoxStyle::default(),
            parent: None,
            children: Vec::new(),
            measure: None,
            layout: ComputedLayout::default(),
        });
        id
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node.0].children.len()
    }

    fn style(&self, node: NodeId) -> &BoxStyle {
        &self.nodes[node.0].style
    }

    fn style_mut(&mut self, node: NodeId) -> &mut BoxStyle {
        &mut self.nodes[node.0].style
    }

    fn set_measure(&mut self, node: NodeId, measure: MeasureFunc) {
        self.nodes[node.0].measure = Some(measure);
    }

    fn compute_layout(&mut self, node: NodeId, available: Available) {
        if self.nodes[node.0].parent.is_some() {
            log::trace!("re-laying out subtree at {node:?}");
            self.arrange(node);
            return;
        }
        let size = self.measure_node(node, None, available.width, available);
        self.nodes[node.0].layout = ComputedLayout {
            left: 0.0,
            top: 0.0,
            width: size.width,
            height: size.height,
        };
        log::debug!(
            "root layout {}x{} over {} nodes",
            size.width,
            size.height,
            self.nodes.len()
        );
        self.arrange(node);
    }

    fn layout(&self, node: NodeId) -> ComputedLayout {
        self.nodes[node.0].layout
    }
}
