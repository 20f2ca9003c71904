//! Image painter.
//!
//! [§ 5.5 'object-fit'](https://www.w3.org/TR/css-images-3/#the-object-fit)

use plume_common::XmlElement;
use plume_common::warning::warn_once;

use super::{BoxPaint, decorate, inherited_clip, paint_rect};

/// Paint an `img` box: its box decorations, then the image in the content box.
#[must_use]
pub fn paint_image(paint: &BoxPaint<'_>, src: Option<&str>) -> String {
    let mut out = paint_rect(paint);
    let Some(src) = src else {
        warn_once("paint", "<img> without a src is drawn as an empty box");
        return out;
    };

    let style = paint.style;
    let border = style.border_width;
    let padding = style.padding;
    let x = paint.left + border.left + padding.left;
    let y = paint.top + border.top + padding.top;
    let width = (paint.width - border.horizontal() - padding.horizontal()).max(0.0);
    let height = (paint.height - border.vertical() - padding.vertical()).max(0.0);

    let image = XmlElement::new("image")
        .attr("href", src)
        .num("x", x)
        .num("y", y)
        .num("width", width)
        .num("height", height)
        .attr("preserveAspectRatio", style.object_fit.preserve_aspect_ratio())
        .attr_opt("clip-path", inherited_clip(style));
    out.push_str(&decorate(image, paint.transform, style.opacity).build());
    out
}
