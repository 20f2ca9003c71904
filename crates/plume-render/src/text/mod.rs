//! Text flow.
//!
//! [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! A text leaf becomes one measured layout node (its text container). The
//! first pass transforms and segments the content, registers the
//! measurement callback and reports segments the loaded fonts cannot draw.
//! The second pass reads back the container box, aligns every placed
//! segment and paints it.
//!
//! # Module Structure
//!
//! - [`segment`] - case transforms and Unicode segmentation
//! - [`packing`] - greedy line packing

pub mod packing;
pub mod segment;

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use plume_common::XmlElement;
use plume_layout::{AlignItems, Available, BoxLayout, ComputedLayout, JustifyContent, NodeId, Position, Size};
use plume_style::{ComputedStyle, TextAlign, Transform};

use crate::context::{LayoutContext, RenderEnv, shadow_id};
use crate::error::RenderError;
use crate::font::{FontHandle, FontResolver};
use crate::painter::{Glyphs, TextRun, glyph_element, paint_text};
use crate::shadow::drop_shadow;
use crate::tree::Painted;
use packing::{LinePacking, SegmentWidth, pack_lines};
use segment::{apply_text_transform, is_collapsible_space, segment_text};

/// What one segment turns into when painted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentKind {
    /// Collapsible whitespace.
    Space,
    /// Replaced by an image of `fontSize × fontSize`.
    Image(String),
    /// Drawn with the resolved font.
    Glyphs,
}

#[derive(Debug)]
struct Segment {
    text: String,
    kind: SegmentKind,
}

/// State shared between the measurement callback and painting.
struct Measurer {
    fonts: Rc<dyn FontResolver>,
    font: FontHandle,
    style: Rc<ComputedStyle>,
    segments: Rc<[Segment]>,
    line_height: f32,
    /// Measured on first use, so fonts loaded between the passes count.
    widths: OnceCell<Vec<SegmentWidth>>,
    /// The packing from the most recent measurement.
    last: RefCell<Option<LinePacking>>,
}

impl Measurer {
    fn widths(&self) -> &[SegmentWidth] {
        self.widths.get_or_init(|| {
            self.segments
                .iter()
                .map(|segment| match segment.kind {
                    SegmentKind::Space => {
                        SegmentWidth::Space(self.fonts.measure(self.font, &segment.text, &self.style))
                    }
                    SegmentKind::Image(_) => SegmentWidth::Content(self.style.font_size),
                    SegmentKind::Glyphs => {
                        SegmentWidth::Content(self.fonts.measure(self.font, &segment.text, &self.style))
                    }
                })
                .collect()
        })
    }

    fn measure(&self, available: Option<f32>) -> Size {
        let packing = pack_lines(self.widths(), available, self.line_height);
        let size = Size::new(packing.width, packing.height);
        *self.last.borrow_mut() = Some(packing);
        size
    }
}

/// A text leaf after the first pass.
pub(crate) struct TextPlan {
    id: String,
    node: NodeId,
    measurer: Rc<Measurer>,
    ascent: f32,
}

/// First pass over a text leaf.
///
/// Returns `None` for content that is empty after transformation; no
/// layout node is allocated for it.
pub(crate) fn plan_text(
    content: &str,
    ctx: &LayoutContext<'_>,
    layout: &mut dyn BoxLayout,
    missing_fonts: &mut Vec<String>,
) -> Result<Option<TextPlan>, RenderError> {
    let style = ctx.parent_style;
    let content = apply_text_transform(content, style.text_transform);
    if content.is_empty() {
        return Ok(None);
    }

    let env = ctx.env;
    let font = env.fonts.get_font(style)?;
    let metrics = env.fonts.metrics(font);
    let ascent = metrics.ascent(style.font_size);
    let line_height = metrics.line_height(style.font_size);

    let segments: Rc<[Segment]> = segment_text(&content, style.word_break)
        .into_iter()
        .map(|text| Segment {
            kind: classify(text, env),
            text: text.to_string(),
        })
        .collect();

    if env.can_load_additional_assets {
        let start = missing_fonts.len();
        for segment in segments.iter().filter(|s| s.kind == SegmentKind::Glyphs) {
            let uncovered = segment.text.chars().any(|ch| !env.fonts.covers(font, ch));
            if uncovered && !missing_fonts[start..].contains(&segment.text) {
                missing_fonts.push(segment.text.clone());
            }
        }
    }

    let node = layout.create_node();
    {
        let container = layout.style_mut(node);
        container.align_items = AlignItems::Baseline;
        container.justify_content = match style.text_align {
            TextAlign::Center => JustifyContent::Center,
            TextAlign::Right | TextAlign::End => JustifyContent::FlexEnd,
            TextAlign::Justify => JustifyContent::SpaceBetween,
            TextAlign::Left | TextAlign::Start => JustifyContent::FlexStart,
        };
    }
    let index = layout.child_count(ctx.parent);
    layout.insert_child(ctx.parent, node, index);

    // Clip state comes from what the parent hands down, not from the
    // parent's own computed style: an `overflow: hidden` or
    // `background-clip: text` parent applies to its text.
    let mut text_style = style.clone();
    text_style.inherited_clip_path_id.clone_from(&ctx.inherited.inherited_clip_path_id);
    text_style.clip_text_active = ctx.inherited.clip_text_active;

    let measurer = Rc::new(Measurer {
        fonts: Rc::clone(&env.fonts),
        font,
        style: Rc::new(text_style),
        segments,
        line_height,
        widths: OnceCell::new(),
        last: RefCell::new(None),
    });
    let callback = Rc::clone(&measurer);
    layout.set_measure(node, Box::new(move |available| callback.measure(available)));
    log::trace!("text {} planned as {node:?}", ctx.id);

    Ok(Some(TextPlan {
        id: ctx.id.to_string(),
        node,
        measurer,
        ascent,
    }))
}

fn classify(text: &str, env: &RenderEnv) -> SegmentKind {
    if is_collapsible_space(text) {
        SegmentKind::Space
    } else if let Some(src) = env.grapheme_images.get(text) {
        SegmentKind::Image(src.clone())
    } else {
        SegmentKind::Glyphs
    }
}

impl TextPlan {
    /// Second pass: align and paint every placed segment.
    pub(crate) fn paint(
        &self,
        origin: (f32, f32),
        frame: Option<&Transform>,
        layout: &mut dyn BoxLayout,
        env: &RenderEnv,
    ) -> Painted {
        let measurer = &self.measurer;
        let style = &*measurer.style;

        if style.position == Position::Absolute {
            layout.compute_layout(self.node, Available::UNDEFINED);
        }
        let container = finite_layout(layout.layout(self.node));
        let left = origin.0 + container.left;
        let top = origin.1 + container.top;

        let packing = measurer
            .last
            .borrow()
            .clone()
            .unwrap_or_else(|| pack_lines(measurer.widths(), Some(container.width), measurer.line_height));
        let last_line = packing.line_count().saturating_sub(1);

        let mut markup = String::new();
        let mut clip_text = String::new();
        for (index, (segment, placement)) in measurer.segments.iter().zip(&packing.placements).enumerate() {
            let Some(placed) = placement else {
                continue;
            };

            // [§ 7.1 'text-align'](https://www.w3.org/TR/css-text-3/#text-align-property)
            let mut x = placed.x;
            let mut y = placed.y;
            let remaining = container.width - packing.line_widths[placed.line];
            match style.text_align {
                TextAlign::Right | TextAlign::End => x += remaining,
                TextAlign::Center => x += remaining / 2.0,
                // "Text is justified according to the method specified by
                // the text-justify property", except on the last line.
                TextAlign::Justify if placed.line < last_line => {
                    let count = packing.line_segments[placed.line];
                    if count > 1 {
                        x += remaining / (count - 1) as f32 * placed.line_index as f32;
                    }
                }
                _ => {}
            }

            let path;
            let glyphs = match &segment.kind {
                SegmentKind::Image(src) => Glyphs::Image(src),
                SegmentKind::Glyphs if env.embed_font => {
                    path = measurer
                        .fonts
                        .glyph_path(measurer.font, &segment.text, left + x, top + y, style);
                    Glyphs::Path(&path)
                }
                SegmentKind::Glyphs | SegmentKind::Space => {
                    // `<text>` hangs from its y coordinate; move it to the baseline.
                    y += self.ascent;
                    Glyphs::Text
                }
            };

            let mut filter = None;
            let filter_id = shadow_id(&self.id, index);
            if let Some(shadow) = &style.text_shadow {
                let defs = drop_shadow(&self.id, index, placed.width, measurer.line_height, shadow);
                if !defs.is_empty() {
                    markup.push_str(&defs);
                    filter = Some(filter_id.as_str());
                }
            }

            let run = TextRun {
                content: &segment.text,
                left: left + x,
                top: top + y,
                width: placed.width,
                height: measurer.line_height,
                glyphs,
                filter,
                transform: frame,
                debug: env.debug,
            };
            if style.clip_text_active {
                let clip_shape: XmlElement = glyph_element(&run, style).attr_opt("transform", frame);
                clip_text.push_str(&clip_shape.build());
            }
            markup.push_str(&paint_text(&run, style));
        }

        Painted {
            markup,
            clip_text: (!clip_text.is_empty()).then_some(clip_text),
        }
    }
}

/// Layout read-back with non-finite values replaced by zero.
pub(crate) fn finite_layout(layout: ComputedLayout) -> ComputedLayout {
    let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
    ComputedLayout {
        left: finite(layout.left),
        top: finite(layout.top),
        width: finite(layout.width),
        height: finite(layout.height),
    }
}
