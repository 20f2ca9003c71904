//! Geometry types shared by the layout engine and its callers.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Create a size from its two extents.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Space offered to a node by its owner. `None` means unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Available {
    /// Available width, if definite.
    pub width: Option<f32>,
    /// Available height, if definite.
    pub height: Option<f32>,
}

impl Available {
    /// Unconstrained in both axes.
    pub const UNDEFINED: Self = Self {
        width: None,
        height: None,
    };

    /// Definite space in both axes.
    #[must_use]
    pub const fn definite(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// Edge sizes for padding, border, margin or insets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges<T> {
    /// Top edge.
    pub top: T,
    /// Right edge.
    pub right: T,
    /// Bottom edge.
    pub bottom: T,
    /// Left edge.
    pub left: T,
}

impl<T: Copy> Edges<T> {
    /// The same value on all four edges.
    #[must_use]
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Edges<f32> {
    /// Sum of the left and right edges.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A node's resolved border box, relative to its parent's border box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputedLayout {
    /// Offset from the parent's left border edge.
    pub left: f32,
    /// Offset from the parent's top border edge.
    pub top: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
}
