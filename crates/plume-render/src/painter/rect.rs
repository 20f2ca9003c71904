//! Box painter: backgrounds, borders, box shadows and overflow clips.

use plume_common::XmlElement;
use plume_common::warning::warn_once;
use plume_style::{BackgroundClip, BorderStyle, Corners, Overflow};

use super::{BoxPaint, decorate, in_frame, inherited_clip};
use crate::context::{clip_path_id, clip_text_id};
use crate::shadow::{ShadowTarget, box_shadow};
use crate::shape::Silhouette;

/// Outline color for debug boxes.
const DEBUG_BOX_COLOR: &str = "#ff5757";

/// Paint one box.
#[must_use]
pub fn paint_rect(paint: &BoxPaint<'_>) -> String {
    let style = paint.style;
    let silhouette = paint.silhouette();
    let mut out = String::new();

    // [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    //
    // "hidden: This value indicates that the box's content is clipped to its
    // padding box." Descendants reference this clip through their
    // inherited clip path id.
    if style.overflow == Overflow::Hidden {
        let shape = silhouette.to_element().attr_opt("transform", paint.transform);
        let clip = XmlElement::new("clipPath")
            .attr("id", clip_path_id(paint.id))
            .attr_opt("clip-path", inherited_clip(style))
            .child(&shape.build());
        out.push_str(&XmlElement::new("defs").child(&clip.build()).build());
    }

    let shadows = box_shadow(
        &ShadowTarget {
            id: paint.id,
            width: paint.width,
            height: paint.height,
            silhouette: &silhouette,
            opacity: style.opacity,
            viewport_width: style.viewport_width,
            viewport_height: style.viewport_height,
        },
        &style.box_shadow,
    );
    if let Some(shadows) = &shadows {
        out.push_str(&in_frame(&shadows.outer, paint.transform));
    }

    // [§ 3.7 'background-clip'](https://www.w3.org/TR/css-backgrounds-3/#background-clip)
    if let Some(color) = &style.background_color {
        let clip = if style.background_clip == BackgroundClip::Text {
            Some(format!("url(#{})", clip_text_id(paint.id)))
        } else {
            inherited_clip(style)
        };
        let background = silhouette.to_element().attr("fill", color).attr_opt("clip-path", clip);
        out.push_str(&decorate(background, paint.transform, style.opacity).build());
    }

    if let Some(shadows) = &shadows {
        out.push_str(&in_frame(&shadows.inset, paint.transform));
    }

    if style.has_border() {
        out.push_str(&paint_border(paint));
    }

    if paint.debug {
        let outline = XmlElement::new("rect")
            .num("x", paint.left)
            .num("y", paint.top)
            .num("width", paint.width)
            .num("height", paint.height)
            .attr("fill", "transparent")
            .attr("stroke", DEBUG_BOX_COLOR)
            .num("stroke-width", 1.0)
            .attr_opt("transform", paint.transform);
        out.push_str(&outline.build());
    }

    out
}

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// A uniform border is stroked along the outline inset by half its width,
/// so the stroke lies entirely inside the border box. Mixed widths are
/// filled side by side.
fn paint_border(paint: &BoxPaint<'_>) -> String {
    let style = paint.style;
    let widths = style.border_width;
    let color = style.used_border_color();
    let clip = inherited_clip(style);

    let uniform = widths.top == widths.right && widths.right == widths.bottom && widths.bottom == widths.left;
    if uniform {
        let w = widths.top;
        let half = w / 2.0;
        let radii = &style.border_radius;
        let inner_radii = Corners {
            top_left: (radii.top_left - half).max(0.0),
            top_right: (radii.top_right - half).max(0.0),
            bottom_right: (radii.bottom_right - half).max(0.0),
            bottom_left: (radii.bottom_left - half).max(0.0),
        };
        let outline = Silhouette::rounded_rect(
            paint.left + half,
            paint.top + half,
            paint.width - w,
            paint.height - w,
            &inner_radii,
        );
        let dash = match style.border_style {
            BorderStyle::Dashed => Some(format!("{} {}", w * 2.0, w)),
            BorderStyle::Dotted => Some(format!("{w} {w}")),
            BorderStyle::Solid | BorderStyle::None => None,
        };
        let stroke = outline
            .to_element()
            .attr("fill", "none")
            .attr("stroke", color)
            .num("stroke-width", w)
            .attr_opt("stroke-dasharray", dash)
            .attr_opt("clip-path", clip);
        return decorate(stroke, paint.transform, style.opacity).build();
    }

    if !style.border_radius.is_zero() {
        warn_once("paint", "rounded corners are ignored on borders with mixed widths");
    }
    if style.border_style != BorderStyle::Solid {
        warn_once("paint", "dashed and dotted borders with mixed widths are drawn solid");
    }

    let (left, top, width, height) = (paint.left, paint.top, paint.width, paint.height);
    let sides = [
        (left, top, width, widths.top),
        (left, top + height - widths.bottom, width, widths.bottom),
        (left, top, widths.left, height),
        (left + width - widths.right, top, widths.right, height),
    ];
    let mut content = String::new();
    for (x, y, w, h) in sides {
        if w > 0.0 && h > 0.0 {
            let side = XmlElement::new("rect")
                .num("x", x)
                .num("y", y)
                .num("width", w)
                .num("height", h)
                .attr("fill", color);
            content.push_str(&side.build());
        }
    }
    let group = XmlElement::new("g").attr_opt("clip-path", clip).child(&content);
    decorate(group, paint.transform, style.opacity).build()
}
