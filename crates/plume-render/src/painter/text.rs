//! Text segment painter.

use plume_common::XmlElement;
use plume_style::{ComputedStyle, FontStyle, Transform};

use super::{decorate, inherited_clip};

/// Outline color for debug text boxes.
const DEBUG_TEXT_COLOR: &str = "#575eff";

/// How a segment's glyphs are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyphs<'a> {
    /// Pre-outlined SVG path data.
    Path(&'a str),
    /// A substituted image source.
    Image(&'a str),
    /// A `<text>` run positioned by its hanging baseline.
    Text,
}

/// One positioned text segment.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    /// The segment text.
    pub content: &'a str,
    /// Absolute left edge.
    pub left: f32,
    /// Absolute top edge (already shifted by the ascent for [`Glyphs::Text`]).
    pub top: f32,
    /// Advance width.
    pub width: f32,
    /// Line height.
    pub height: f32,
    /// Glyph source.
    pub glyphs: Glyphs<'a>,
    /// Id of a drop-shadow filter to apply.
    pub filter: Option<&'a str>,
    /// The transform frame the segment paints in.
    pub transform: Option<&'a Transform>,
    /// Draw a bounding outline.
    pub debug: bool,
}

/// The segment's geometry without paint: what `background-clip: text`
/// collects into its clip path.
#[must_use]
pub fn glyph_element(run: &TextRun<'_>, style: &ComputedStyle) -> XmlElement {
    match run.glyphs {
        Glyphs::Path(d) => XmlElement::new("path").attr("d", d),
        Glyphs::Image(src) => XmlElement::new("image")
            .attr("href", src)
            .num("x", run.left)
            .num("y", run.top)
            .num("width", run.width)
            .num("height", run.height)
            .attr("preserveAspectRatio", "none"),
        Glyphs::Text => {
            let element = XmlElement::new("text")
                .num("x", run.left)
                .num("y", run.top)
                .num("font-size", style.font_size)
                .attr("font-weight", style.font_weight);
            let element = if style.font_family.is_empty() {
                element
            } else {
                element.attr("font-family", style.font_family.join(", "))
            };
            let element = if style.font_style == FontStyle::Normal {
                element
            } else {
                element.attr("font-style", style.font_style)
            };
            let element = if style.letter_spacing == 0.0 {
                element
            } else {
                element.num("letter-spacing", style.letter_spacing)
            };
            element.text(run.content)
        }
    }
}

/// Paint one segment.
#[must_use]
pub fn paint_text(run: &TextRun<'_>, style: &ComputedStyle) -> String {
    if matches!(run.glyphs, Glyphs::Path(d) if d.is_empty()) {
        return String::new();
    }

    let element = glyph_element(run, style);
    let element = match run.glyphs {
        Glyphs::Image(_) => element,
        Glyphs::Path(_) | Glyphs::Text => element.attr("fill", &style.color),
    };
    let element = element
        .attr_opt("filter", run.filter.map(|id| format!("url(#{id})")))
        .attr_opt("clip-path", inherited_clip(style));
    let mut out = decorate(element, run.transform, style.opacity).build();

    if run.debug {
        let outline = XmlElement::new("rect")
            .num("x", run.left)
            .num("y", run.top)
            .num("width", run.width)
            .num("height", run.height)
            .attr("fill", "transparent")
            .attr("stroke", DEBUG_TEXT_COLOR)
            .num("stroke-width", 1.0)
            .attr_opt("transform", run.transform);
        out.push_str(&outline.build());
    }
    out
}
