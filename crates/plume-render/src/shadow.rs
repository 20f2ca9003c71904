//! Shadow geometry.
//!
//! [§ 7 Drop Shadows](https://www.w3.org/TR/css-backgrounds-3/#shadows)
//!
//! Turns shadow descriptors and a box silhouette into filter, mask and group
//! markup. Both operations are pure; descriptors are copied before they are
//! normalized.
//!
//! [§ 7.1 'box-shadow'](https://www.w3.org/TR/css-backgrounds-3/#shadow-blur)
//!
//! "the image that would be generated by applying to the shadow a Gaussian
//! blur with a standard deviation equal to half the blur radius"
//!
//! Filter regions grow by `radius² / 4` on every side. That is a bounded
//! approximation of the blur's reach rather than an exact 3σ bound; existing
//! output depends on it.

use plume_common::{XmlElement, fmt_num};
use plume_style::{BoxShadow, DropShadow};

use crate::context::{shadow_id, shadow_mask_id};
use crate::shape::Silhouette;

/// The box a shadow is cast from.
#[derive(Debug, Clone, Copy)]
pub struct ShadowTarget<'a> {
    /// Identifier path of the node.
    pub id: &'a str,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// The node's outline in absolute coordinates.
    pub silhouette: &'a Silhouette,
    /// Effective opacity of the node.
    pub opacity: f32,
    /// Document width, for viewport-sized masks.
    pub viewport_width: f32,
    /// Document height, for viewport-sized masks.
    pub viewport_height: f32,
}

/// Box-shadow markup split by layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowLayers {
    /// Painted behind the node's background.
    pub outer: String,
    /// Painted above the background, below the border and content.
    pub inset: String,
}

/// Filter region as percentages of the target box.
struct FilterRegion {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl FilterRegion {
    fn from_bounds(left: f32, top: f32, right: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            x: left * 100.0 / width,
            y: top * 100.0 / height,
            width: (right - left) * 100.0 / width,
            height: (bottom - top) * 100.0 / height,
        }
    }

    fn apply(&self, filter: XmlElement) -> XmlElement {
        filter
            .attr("x", percent(self.x))
            .attr("y", percent(self.y))
            .attr("width", percent(self.width))
            .attr("height", percent(self.height))
    }
}

fn percent(value: f32) -> String {
    format!("{}%", fmt_num(value))
}

/// A filter over `width × height` is only meaningful for a finite, non-empty box.
fn has_area(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// A drop-shadow filter definition with id `s-<id>-<suffix>`.
///
/// Returns an empty string unless color, offset and radius are all present,
/// or when the box has no area.
#[must_use]
pub fn drop_shadow(id: &str, suffix: usize, width: f32, height: f32, shadow: &DropShadow) -> String {
    let (Some(color), Some((dx, dy)), Some(radius)) = (&shadow.color, shadow.offset, shadow.radius) else {
        return String::new();
    };
    if !has_area(width, height) {
        return String::new();
    }

    let grow = radius * radius / 4.0;
    let region = FilterRegion::from_bounds(
        (dx - grow).min(0.0),
        (dy - grow).min(0.0),
        (dx + grow + width).max(width),
        (dy + grow + height).max(height),
        width,
        height,
    );

    let effect = XmlElement::new("feDropShadow")
        .num("dx", dx)
        .num("dy", dy)
        .num("stdDeviation", radius / 2.0)
        .attr("flood-color", color)
        .attr("flood-opacity", "1");
    let filter = region.apply(XmlElement::new("filter").attr("id", shadow_id(id, suffix))).child(&effect.build());
    XmlElement::new("defs").child(&filter.build()).build()
}

/// Box-shadow markup for every entry in `shadows`.
///
/// Entries are emitted from last to first, so the first declared shadow
/// ends up topmost within its layer. Returns `None` when there is nothing
/// to paint.
#[must_use]
pub fn box_shadow(target: &ShadowTarget<'_>, shadows: &[BoxShadow]) -> Option<ShadowLayers> {
    if shadows.is_empty() || !has_area(target.width, target.height) {
        return None;
    }

    let mut layers = ShadowLayers::default();
    for (index, declared) in shadows.iter().enumerate().rev() {
        let markup = box_shadow_entry(target, index, declared);
        if declared.inset {
            layers.inset.push_str(&markup);
        } else {
            layers.outer.push_str(&markup);
        }
    }
    Some(layers)
}

fn box_shadow_entry(target: &ShadowTarget<'_>, index: usize, declared: &BoxShadow) -> String {
    let mut shadow = declared.clone();
    // An inset spread shrinks the hole, which is the same as eroding it.
    if shadow.inset && shadow.spread_radius != 0.0 {
        shadow.spread_radius = -shadow.spread_radius;
    }
    let spread = shadow.spread_radius;
    let (inset_dx, inset_dy) = if shadow.inset {
        (shadow.offset_x, shadow.offset_y)
    } else {
        (0.0, 0.0)
    };

    let grow = shadow.blur_radius * shadow.blur_radius / 4.0 + spread;
    let region = FilterRegion::from_bounds(
        (-grow - inset_dx).min(0.0),
        (-grow - inset_dy).min(0.0),
        (grow + target.width - inset_dx).max(target.width),
        (grow + target.height - inset_dy).max(target.height),
        target.width,
        target.height,
    );

    let filter_id = shadow_id(target.id, index);
    let mask_id = shadow_mask_id(target.id, index);
    // SVG cannot grow a shape, so a spread widens its stroke instead.
    let stroke_width = spread * 2.0;

    let mut out = String::new();

    // Luminance mask isolating the outside of the box (outer) or its inside (inset).
    let (base_fill, shape_fill) = if shadow.inset { ("#000", "#fff") } else { ("#fff", "#000") };
    let mask_shape = target
        .silhouette
        .to_element()
        .attr("fill", shape_fill)
        .num("stroke-width", stroke_width);
    let viewport = XmlElement::new("rect")
        .num("x", 0.0)
        .num("y", 0.0)
        .num("width", target.viewport_width)
        .num("height", target.viewport_height)
        .attr("fill", base_fill);
    out.push_str(
        &XmlElement::new("mask")
            .attr("id", &mask_id)
            .attr("maskUnits", "userSpaceOnUse")
            .child(&viewport.build())
            .child(&mask_shape.build())
            .build(),
    );

    let shifted = target.silhouette.translate(shadow.offset_x, shadow.offset_y);
    let mut shape = shifted
        .to_element()
        .attr("fill", "#fff")
        .attr("stroke", "#fff")
        .num("stroke-width", stroke_width)
        .build();

    // A negative spread erodes the shape: subtract a stroke of the same
    // width from its interior.
    if spread < 0.0 {
        let erosion_id = format!("{mask_id}-neg");
        let eroder = shifted
            .to_element()
            .attr("fill", "#fff")
            .attr("stroke", "#000")
            .num("stroke-width", -spread * 2.0);
        out.push_str(
            &XmlElement::new("mask")
                .attr("id", &erosion_id)
                .attr("maskUnits", "userSpaceOnUse")
                .child(&eroder.build())
                .build(),
        );
        shape = XmlElement::new("g")
            .attr("mask", format!("url(#{erosion_id})"))
            .child(&shape)
            .build();
    }

    let blur = XmlElement::new("feGaussianBlur")
        .num("stdDeviation", shadow.blur_radius / 2.0)
        .attr("result", "b");
    let flood = XmlElement::new("feFlood")
        .attr("flood-color", &shadow.color)
        .attr("in", "SourceGraphic")
        .attr("result", "f");
    let composite = XmlElement::new("feComposite")
        .attr("in", "f")
        .attr("in2", "b")
        .attr("operator", if shadow.inset { "out" } else { "in" });
    let filter = region
        .apply(XmlElement::new("filter").attr("id", &filter_id))
        .child(&blur.build())
        .child(&flood.build())
        .child(&composite.build());
    out.push_str(&XmlElement::new("defs").child(&filter.build()).build());

    out.push_str(
        &XmlElement::new("g")
            .attr("mask", format!("url(#{mask_id})"))
            .attr("filter", format!("url(#{filter_id})"))
            .num("opacity", target.opacity)
            .child(&shape)
            .build(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Silhouette {
        Silhouette::Rect {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 50.0,
        }
    }

    #[test]
    fn test_drop_shadow_region_covers_offset() {
        let shadow = DropShadow {
            color: Some("red".to_string()),
            offset: Some((4.0, 0.0)),
            radius: Some(2.0),
        };
        let markup = drop_shadow("0", 0, 100.0, 50.0, &shadow);
        // grow = 1, left = min(3, 0) = 0, right = max(105, 100) = 105
        assert!(markup.contains(r#"x="0%""#), "{markup}");
        assert!(markup.contains(r#"width="105%""#), "{markup}");
        assert!(markup.contains(r#"stdDeviation="1""#), "{markup}");
    }

    #[test]
    fn test_box_shadow_zero_size_is_skipped() {
        let silhouette = square();
        let target = ShadowTarget {
            id: "0",
            width: 0.0,
            height: 50.0,
            silhouette: &silhouette,
            opacity: 1.0,
            viewport_width: 200.0,
            viewport_height: 200.0,
        };
        assert_eq!(box_shadow(&target, &[BoxShadow::default()]), None);
    }

    #[test]
    fn test_inset_spread_is_negated_on_a_copy() {
        let silhouette = square();
        let target = ShadowTarget {
            id: "0",
            width: 100.0,
            height: 50.0,
            silhouette: &silhouette,
            opacity: 1.0,
            viewport_width: 200.0,
            viewport_height: 200.0,
        };
        let shadows = vec![BoxShadow {
            spread_radius: 3.0,
            inset: true,
            ..BoxShadow::default()
        }];
        let layers = box_shadow(&target, &shadows).unwrap();
        assert!(layers.inset.contains("plume_ms-0-0-neg"));
        assert_eq!(shadows[0].spread_radius, 3.0);
    }
}
