//! Style resolution for the Plume renderer.
//!
//! Elements declare camelCase, CSS-like style objects. This crate turns those
//! declarations into:
//! - box-layout inputs, written into the element's [`plume_layout`] node, and
//! - a [`ComputedStyle`] carrying everything painting and text layout read.
//!
//! # Module Structure
//!
//! - [`declared`] - the declared style map
//! - [`values`] - lengths, angles and component-list parsing
//! - [`keywords`] - keyword-valued properties
//! - [`shadow`] - box-shadow and drop-shadow descriptors
//! - [`transform`] - 2-D transform lists and matrices
//! - [`computed`] - computed and inherited style
//! - [`resolver`] - the [`StyleResolver`] seam and its default implementation

pub mod computed;
pub mod declared;
mod error;
pub mod keywords;
pub mod resolver;
pub mod shadow;
pub mod transform;
pub mod values;

pub use computed::{ComputedStyle, Corners, DEFAULT_COLOR, InheritedStyle};
pub use declared::DeclaredStyle;
pub use error::StyleError;
pub use keywords::{
    BackgroundClip, BorderStyle, FontStyle, ObjectFit, Overflow, TextAlign, TextTransform, WordBreak,
};
pub use resolver::{DefaultStyleResolver, NodeProps, StyleResolver};
pub use shadow::{BoxShadow, DropShadow};
pub use transform::{Transform, TransformFunction, TransformList};
pub use values::{DEFAULT_FONT_SIZE_PX, Length, LengthContext};
