//! Box layout for the Plume renderer.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//!
//! The renderer treats box layout as an abstract capability: the
//! [`BoxLayout`] trait covers node creation, child insertion, property
//! setters, measurement-callback registration and computed-layout read-back.
//! [`FlexTree`] is the built-in implementation, a single-line flexbox subset
//! sufficient for document-like trees.
//!
//! # Module Structure
//!
//! - [`geometry`] - sizes, edges and computed layouts
//! - [`style`] - box-layout properties and keyword enums
//! - [`tree`] - the [`BoxLayout`] trait and the [`FlexTree`] arena
//! - `flex` - the flex layout algorithm behind [`FlexTree`]

mod flex;
pub mod geometry;
pub mod style;
pub mod tree;

pub use geometry::{Available, ComputedLayout, Edges, Size};
pub use style::{AlignItems, BoxDisplay, BoxStyle, Dimension, FlexDirection, JustifyContent, Position};
pub use tree::{BoxLayout, FlexTree, MeasureFunc, NodeId};
