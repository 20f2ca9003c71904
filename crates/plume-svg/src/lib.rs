//! SVG document pipeline for the Plume renderer.
//!
//! Ties the core together with real resources: a [`FontBook`] of parsed
//! font faces, local image sources inlined as `data:` URIs, and the
//! two-phase driver that plans the tree, loads fonts for uncovered text,
//! lays out and paints into a standalone `<svg>` document.
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use plume_svg::{FontBook, RenderOptions, render};
//!
//! let fonts = Rc::new(FontBook::new());
//! let _ = fonts.load_system_font("sans-serif");
//! let element = serde_json::from_str(r#"{"type": "div", "props": {"children": "Hello"}}"#)?;
//! let svg = render(&element, &fonts, &RenderOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Structure
//!
//! - [`fonts`] - the font book and glyph outlines
//! - [`images`] - image source inlining
//! - [`options`] - render options
//! - [`document`] - the render driver and document wrapper

pub mod document;
mod error;
pub mod fonts;
pub mod images;
pub mod options;

pub use document::{render, render_with_loader, wrap_document};
pub use error::{FontError, SvgError};
pub use fonts::{FontBook, FontDescriptor};
pub use images::inline_images;
pub use options::RenderOptions;
