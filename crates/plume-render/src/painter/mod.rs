//! Shape painters.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Each painter takes one node's resolved absolute box and its computed
//! style and returns the markup for that node alone. Any ids a painter
//! emits are namespaced by the node's identifier path.
//!
//! Within one box the layers are painted back to front:
//! 1. Overflow clip definition
//! 2. Outer box shadows
//! 3. Background
//! 4. Inset box shadows
//! 5. Border
//! 6. Image content (`img` only)

mod image;
mod rect;
mod text;

pub use image::paint_image;
pub use rect::paint_rect;
pub use text::{Glyphs, TextRun, glyph_element, paint_text};

use plume_common::XmlElement;
use plume_style::{ComputedStyle, Transform};

use crate::shape::Silhouette;

/// A node's resolved box, ready to paint.
#[derive(Debug, Clone, Copy)]
pub struct BoxPaint<'a> {
    /// Identifier path of the node.
    pub id: &'a str,
    /// Absolute left edge of the border box.
    pub left: f32,
    /// Absolute top edge of the border box.
    pub top: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// The node's computed style.
    pub style: &'a ComputedStyle,
    /// The transform frame the node paints in; `None` for identity.
    pub transform: Option<&'a Transform>,
    /// Draw a bounding outline.
    pub debug: bool,
}

impl BoxPaint<'_> {
    /// The border-box outline, with the node's corner radii.
    #[must_use]
    pub fn silhouette(&self) -> Silhouette {
        Silhouette::rounded_rect(self.left, self.top, self.width, self.height, &self.style.border_radius)
    }
}

/// `url(#id)` reference to the nearest ancestor overflow clip.
pub(crate) fn inherited_clip(style: &ComputedStyle) -> Option<String> {
    style.inherited_clip_path_id.as_ref().map(|id| format!("url(#{id})"))
}

/// Attach the transform frame and opacity shared by every painted layer.
pub(crate) fn decorate(element: XmlElement, transform: Option<&Transform>, opacity: f32) -> XmlElement {
    let element = element.attr_opt("transform", transform);
    if opacity < 1.0 {
        element.num("opacity", opacity)
    } else {
        element
    }
}

/// Wrap markup in a group carrying the transform frame, if any.
pub(crate) fn in_frame(markup: &str, transform: Option<&Transform>) -> String {
    match transform {
        Some(transform) if !markup.is_empty() => XmlElement::new("g").attr("transform", transform).child(markup).build(),
        _ => markup.to_string(),
    }
}
