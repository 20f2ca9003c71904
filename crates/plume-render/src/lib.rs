//! Tree layout, text flow and shadow geometry for the Plume renderer.
//!
//! Turns a tree of styled box, image and text elements into absolutely
//! positioned SVG markup: shapes, text runs, clip paths and shadow filters.
//!
//! Rendering takes two passes over the tree. [`plan`] creates and inserts
//! one layout node per element, resolves styles and reports text that the
//! loaded fonts cannot draw. After the caller has (optionally) loaded more
//! fonts and run the layout engine, [`Plan::paint`] resolves absolute
//! geometry and paints.
//!
//! # Module Structure
//!
//! - [`element`] - the input element tree
//! - [`context`] - render environment, layout context and generated ids
//! - [`font`] - the [`FontResolver`] capability
//! - [`shape`] - structured box outlines
//! - [`shadow`] - drop-shadow and box-shadow geometry
//! - [`text`] - segmentation, line packing and the text flow engine
//! - [`painter`] - rect, image and text painters
//! - [`tree`] - the two-pass tree layout

pub mod context;
pub mod element;
mod error;
pub mod font;
pub mod painter;
pub mod shadow;
pub mod shape;
pub mod text;
pub mod tree;

pub use context::{ID_PREFIX, LayoutContext, RenderEnv};
pub use element::{Component, Element, NodeKind, StyledNode};
pub use error::RenderError;
pub use font::{FontHandle, FontMetrics, FontResolver};
pub use shadow::{ShadowLayers, ShadowTarget, box_shadow, drop_shadow};
pub use shape::{PathCommand, Silhouette};
pub use tree::{Painted, Plan, plan};
