//! Style resolution.
//!
//! [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! There is no cascade here: each element carries its own declarations. The
//! resolver combines them with the inherited values, writes the box-layout
//! inputs into the element's layout node and returns the computed style plus
//! the inheritable subset for its children.

use plume_common::warning::warn_once;
use plume_layout::{
    AlignItems, BoxDisplay, BoxLayout, BoxStyle, Dimension, Edges, FlexDirection, JustifyContent,
    NodeId, Position,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::computed::{ComputedStyle, Corners, InheritedStyle};
use crate::declared::DeclaredStyle;
use crate::error::StyleError;
use crate::keywords::{BorderStyle, parse_keyword};
use crate::shadow::{DropShadow, parse_box_shadows, parse_shadow_offset, parse_text_shadow};
use crate::transform::TransformList;
use crate::values::{
    Length, LengthContext, components, expand_box_shorthand, parse_dimension, parse_number,
    parse_px, warn_unsupported,
};

/// Element attributes, other than style and children, that affect layout or painting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeProps {
    /// Image source (`img` elements).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Intrinsic width attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Intrinsic height attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Turns declared style into computed style, configuring the element's
/// layout node as a side effect.
pub trait StyleResolver {
    /// Resolve the style of one element.
    ///
    /// Returns the element's computed style and the inheritable subset for
    /// its children.
    ///
    /// # Errors
    ///
    /// Returns a [`StyleError`] when a structured declaration is malformed.
    fn resolve(
        &self,
        layout: &mut dyn BoxLayout,
        node: NodeId,
        tag: &str,
        inherited: &InheritedStyle,
        declared: &DeclaredStyle,
        props: &NodeProps,
    ) -> Result<(ComputedStyle, InheritedStyle), StyleError>;
}

/// The built-in resolver for camelCase CSS-like style objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStyleResolver;

impl StyleResolver for DefaultStyleResolver {
    fn resolve(
        &self,
        layout: &mut dyn BoxLayout,
        node: NodeId,
        tag: &str,
        inherited: &InheritedStyle,
        declared: &DeclaredStyle,
        props: &NodeProps,
    ) -> Result<(ComputedStyle, InheritedStyle), StyleError> {
        let mut resolution = Resolution {
            computed: ComputedStyle::inherit(inherited),
            layout: BoxStyle::default(),
            inherited_opacity: inherited.opacity,
            border_style_declared: false,
        };

        // [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
        //
        // "em: Equal to the computed value of the font-size property of the
        // element on which it is used." For font-size itself, the parent's.
        if let Some(value) = declared.get("fontSize") {
            let parent_ctx = LengthContext {
                font_size: inherited.font_size,
                viewport_width: inherited.viewport_width,
                viewport_height: inherited.viewport_height,
            };
            match Length::from_value(value).and_then(|l| l.to_px(&parent_ctx, Some(inherited.font_size))) {
                Some(size) if size >= 0.0 => resolution.computed.font_size = size,
                _ => warn_unsupported("fontSize", value),
            }
        }

        let ctx = resolution.computed.length_context();
        for (property, value) in declared.iter() {
            resolution.apply(property, value, &ctx)?;
        }

        // Image intrinsic size attributes act as the default box size.
        if tag == "img" {
            if resolution.layout.width.is_auto()
                && let Some(width) = props.width
            {
                resolution.layout.width = Dimension::Points(width);
            }
            if resolution.layout.height.is_auto()
                && let Some(height) = props.height
            {
                resolution.layout.height = Dimension::Points(height);
            }
        }

        resolution.finish();
        log::trace!("resolved <{tag}> style for {node:?}");
        *layout.style_mut(node) = resolution.layout;
        let computed = resolution.computed;
        let inheritable = computed.inheritable();
        Ok((computed, inheritable))
    }
}

struct Resolution {
    computed: ComputedStyle,
    layout: BoxStyle,
    inherited_opacity: f32,
    border_style_declared: bool,
}

impl Resolution {
    fn apply(&mut self, property: &str, value: &Value, ctx: &LengthContext) -> Result<(), StyleError> {
        let computed = &mut self.computed;
        let layout = &mut self.layout;
        match property {
            // Resolved up front.
            "fontSize" => {}

            // [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
            //
            // Every box is a flex container, so the outer display types all
            // collapse to `flex`.
            "display" => match value.as_str().map(str::trim) {
                Some("none") => layout.display = BoxDisplay::None,
                Some("flex" | "block" | "inline" | "inline-block" | "inline-flex" | "contents") => {
                    layout.display = BoxDisplay::Flex;
                }
                _ => warn_unsupported(property, value),
            },
            "position" => {
                if let Some(position) = parse_keyword::<Position>(property, value) {
                    layout.position = position;
                }
            }
            "top" | "right" | "bottom" | "left" => {
                if let Some(dim) = parse_dimension(property, value, ctx) {
                    match property {
                        "top" => layout.inset.top = dim,
                        "right" => layout.inset.right = dim,
                        "bottom" => layout.inset.bottom = dim,
                        _ => layout.inset.left = dim,
                    }
                }
            }

            // [§ 4 Box Sizing](https://www.w3.org/TR/css-sizing-3/#sizing-properties)
            "width" | "height" | "minWidth" | "minHeight" | "maxWidth" | "maxHeight" => {
                if let Some(dim) = parse_dimension(property, value, ctx) {
                    let slot = match property {
                        "width" => &mut layout.width,
                        "height" => &mut layout.height,
                        "minWidth" => &mut layout.min_width,
                        "minHeight" => &mut layout.min_height,
                        "maxWidth" => &mut layout.max_width,
                        _ => &mut layout.max_height,
                    };
                    *slot = dim;
                }
            }

            // [§ 9.2 Shorthand properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
            "margin" => {
                if let Some(edges) = parse_edges(property, value, ctx) {
                    layout.margin = edges;
                }
            }
            "marginTop" | "marginRight" | "marginBottom" | "marginLeft" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    set_edge(&mut layout.margin, &property["margin".len()..], px);
                }
            }
            "marginHorizontal" | "marginVertical" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    set_axis(&mut layout.margin, property.ends_with("Horizontal"), px);
                }
            }
            "padding" => {
                if let Some(edges) = parse_edges(property, value, ctx) {
                    layout.padding = edges;
                    computed.padding = edges;
                }
            }
            "paddingTop" | "paddingRight" | "paddingBottom" | "paddingLeft" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    set_edge(&mut layout.padding, &property["padding".len()..], px);
                    computed.padding = layout.padding;
                }
            }
            "paddingHorizontal" | "paddingVertical" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    set_axis(&mut layout.padding, property.ends_with("Horizontal"), px);
                    computed.padding = layout.padding;
                }
            }

            // [§ 3 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
            "border" => self.apply_border_shorthand(value, ctx),
            "borderWidth" => {
                if let Some(edges) = parse_edges(property, value, ctx) {
                    computed.border_width = edges;
                }
            }
            "borderTopWidth" | "borderRightWidth" | "borderBottomWidth" | "borderLeftWidth" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    let side = &property["border".len()..property.len() - "Width".len()];
                    set_edge(&mut computed.border_width, side, px);
                }
            }
            "borderColor" => {
                if let Some(color) = value.as_str() {
                    computed.border_color = Some(color.trim().to_string());
                }
            }
            "borderStyle" => {
                if let Some(style) = parse_keyword::<BorderStyle>(property, value) {
                    computed.border_style = style;
                    self.border_style_declared = true;
                }
            }
            "borderRadius" => {
                let radii: Option<Vec<f32>> = components(value)
                    .iter()
                    .map(|v| Length::from_value(v).and_then(|l| l.to_px(ctx, None)))
                    .collect();
                // [§ 5.1](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
                // "The four values for each radii are given in the order
                // top-left, top-right, bottom-right, bottom-left."
                match radii.as_deref().and_then(expand_box_shorthand) {
                    Some([tl, tr, br, bl]) => {
                        computed.border_radius = Corners {
                            top_left: tl,
                            top_right: tr,
                            bottom_right: br,
                            bottom_left: bl,
                        };
                    }
                    None => warn_unsupported(property, value),
                }
            }
            "borderTopLeftRadius" | "borderTopRightRadius" | "borderBottomRightRadius"
            | "borderBottomLeftRadius" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    let corners = &mut computed.border_radius;
                    match property {
                        "borderTopLeftRadius" => corners.top_left = px,
                        "borderTopRightRadius" => corners.top_right = px,
                        "borderBottomRightRadius" => corners.bottom_right = px,
                        _ => corners.bottom_left = px,
                    }
                }
            }

            // [§ 5 Ordering and Orientation](https://www.w3.org/TR/css-flexbox-1/#flow-order)
            "flexDirection" => {
                if let Some(direction) = parse_keyword::<FlexDirection>(property, value) {
                    layout.flex_direction = direction;
                }
            }
            "justifyContent" => {
                if let Some(justify) = parse_keyword::<JustifyContent>(property, value) {
                    layout.justify_content = justify;
                }
            }
            "alignItems" => {
                if let Some(align) = parse_keyword::<AlignItems>(property, value) {
                    layout.align_items = align;
                }
            }
            "alignSelf" => {
                if value.as_str().is_some_and(|s| s.trim() == "auto") {
                    layout.align_self = None;
                } else if let Some(align) = parse_keyword::<AlignItems>(property, value) {
                    layout.align_self = Some(align);
                }
            }
            "flex" => apply_flex_shorthand(layout, value, ctx),
            "flexGrow" | "flexShrink" => match parse_number(value) {
                Some(n) if n >= 0.0 => {
                    if property == "flexGrow" {
                        layout.flex_grow = n;
                    } else {
                        layout.flex_shrink = n;
                    }
                }
                _ => warn_unsupported(property, value),
            },
            "flexBasis" => {
                if let Some(dim) = parse_dimension(property, value, ctx) {
                    layout.flex_basis = dim;
                }
            }
            // [§ 8 Gaps Between Boxes](https://www.w3.org/TR/css-align-3/#gaps)
            "gap" => {
                let gaps: Option<Vec<f32>> = components(value)
                    .iter()
                    .map(|v| Length::from_value(v).and_then(|l| l.to_px(ctx, None)))
                    .collect();
                match gaps.as_deref() {
                    Some([both]) => {
                        layout.row_gap = *both;
                        layout.column_gap = *both;
                    }
                    Some([row, column]) => {
                        layout.row_gap = *row;
                        layout.column_gap = *column;
                    }
                    _ => warn_unsupported(property, value),
                }
            }
            "rowGap" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    layout.row_gap = px;
                }
            }
            "columnGap" => {
                if let Some(px) = parse_px(property, value, ctx) {
                    layout.column_gap = px;
                }
            }

            // [§ 3 Backgrounds](https://www.w3.org/TR/css-backgrounds-3/#backgrounds)
            "backgroundColor" => {
                if let Some(color) = value.as_str() {
                    computed.background_color = Some(color.trim().to_string());
                }
            }
            "background" => match value.as_str() {
                Some(color) if !color.contains("gradient(") && !color.contains("url(") => {
                    computed.background_color = Some(color.trim().to_string());
                }
                _ => warn_unsupported(property, value),
            },
            "backgroundClip" => {
                if let Some(clip) = parse_keyword(property, value) {
                    computed.background_clip = clip;
                }
            }

            // [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/)
            "color" => {
                if let Some(color) = value.as_str() {
                    computed.color = color.trim().to_string();
                }
            }
            "fontFamily" => match value.as_str() {
                Some(families) => {
                    computed.font_family = families
                        .split(',')
                        .map(|f| f.trim().trim_matches(['"', '\'']).to_string())
                        .filter(|f| !f.is_empty())
                        .collect();
                }
                None => warn_unsupported(property, value),
            },
            "fontWeight" => match parse_font_weight(value) {
                Some(weight) => computed.font_weight = weight,
                None => warn_unsupported(property, value),
            },
            "fontStyle" => {
                if let Some(style) = parse_keyword(property, value) {
                    computed.font_style = style;
                }
            }
            "letterSpacing" => {
                if value.as_str().is_some_and(|s| s.trim() == "normal") {
                    computed.letter_spacing = 0.0;
                } else if let Some(px) = parse_px(property, value, ctx) {
                    computed.letter_spacing = px;
                }
            }

            // [CSS Text Level 3](https://www.w3.org/TR/css-text-3/)
            "textAlign" => {
                if let Some(align) = parse_keyword(property, value) {
                    computed.text_align = align;
                }
            }
            "textTransform" => {
                if let Some(transform) = parse_keyword(property, value) {
                    computed.text_transform = transform;
                }
            }
            "wordBreak" => {
                if let Some(word_break) = parse_keyword(property, value) {
                    computed.word_break = word_break;
                }
            }
            "textShadow" => computed.text_shadow = parse_text_shadow(value, ctx, &computed.color),
            "textShadowOffset" => {
                let offset = parse_shadow_offset(value)?;
                computed.text_shadow.get_or_insert_with(DropShadow::default).offset = Some(offset);
            }
            "textShadowColor" => {
                if let Some(color) = value.as_str() {
                    computed.text_shadow.get_or_insert_with(DropShadow::default).color =
                        Some(color.trim().to_string());
                }
            }
            "textShadowRadius" => match parse_number(value) {
                Some(radius) => {
                    computed.text_shadow.get_or_insert_with(DropShadow::default).radius = Some(radius);
                }
                None => warn_unsupported(property, value),
            },

            "boxShadow" => computed.box_shadow = parse_box_shadows(value, ctx)?,

            // [§ 3.2 'opacity'](https://www.w3.org/TR/css-color-4/#transparency)
            "opacity" => match parse_number(value) {
                Some(opacity) => computed.opacity = self.inherited_opacity * opacity.clamp(0.0, 1.0),
                None => warn_unsupported(property, value),
            },
            "overflow" => {
                if let Some(overflow) = parse_keyword(property, value) {
                    computed.overflow = overflow;
                }
            }
            "transform" => {
                let list = TransformList::parse(value)?;
                computed.transform_declared = !list.is_empty();
                computed.transform = computed.transform_declared.then_some(list);
            }
            "objectFit" => {
                if let Some(fit) = parse_keyword(property, value) {
                    computed.object_fit = fit;
                }
            }

            _ => warn_once("style", &format!("unsupported property '{property}'")),
        }
        Ok(())
    }

    /// `border: <width> || <style> || <color>`
    fn apply_border_shorthand(&mut self, value: &Value, ctx: &LengthContext) {
        for part in components(value) {
            if let Some(width) = Length::from_value(&part).and_then(|l| l.to_px(ctx, None)) {
                self.computed.border_width = Edges::all(width);
            } else if let Some(style) = part.as_str().and_then(|s| s.parse::<BorderStyle>().ok()) {
                self.computed.border_style = style;
                self.border_style_declared = true;
            } else if let Some(color) = part.as_str() {
                self.computed.border_color = Some(color.to_string());
            }
        }
    }

    /// Settle properties that depend on each other.
    fn finish(&mut self) {
        // A declared width with no declared style draws a solid border.
        if !self.border_style_declared && self.computed.border_width != Edges::default() {
            self.computed.border_style = BorderStyle::Solid;
        }
        // [§ 3.3](https://www.w3.org/TR/css-backgrounds-3/#border-width)
        // "if the border style is none or hidden, [the computed width is] 0"
        if self.computed.border_style == BorderStyle::None {
            self.computed.border_width = Edges::default();
        }
        self.layout.border = self.computed.border_width;
        self.layout.padding = self.computed.padding;
        self.computed.display = self.layout.display;
        self.computed.position = self.layout.position;
    }
}

/// Parse a 1-4 value pixel shorthand into edges.
fn parse_edges(property: &str, value: &Value, ctx: &LengthContext) -> Option<Edges<f32>> {
    let values: Option<Vec<f32>> = components(value)
        .iter()
        .map(|v| Length::from_value(v).and_then(|l| l.to_px(ctx, None)))
        .collect();
    let parsed = values.as_deref().and_then(expand_box_shorthand).map(|[top, right, bottom, left]| Edges {
        top,
        right,
        bottom,
        left,
    });
    if parsed.is_none() {
        warn_unsupported(property, value);
    }
    parsed
}

fn set_edge(edges: &mut Edges<f32>, side: &str, px: f32) {
    match side {
        "Top" => edges.top = px,
        "Right" => edges.right = px,
        "Bottom" => edges.bottom = px,
        _ => edges.left = px,
    }
}

fn set_axis(edges: &mut Edges<f32>, horizontal: bool, px: f32) {
    if horizontal {
        edges.left = px;
        edges.right = px;
    } else {
        edges.top = px;
        edges.bottom = px;
    }
}

/// [§ 7.1.1 Basic Values of 'flex'](https://www.w3.org/TR/css-flexbox-1/#flex-common)
fn apply_flex_shorthand(layout: &mut BoxStyle, value: &Value, ctx: &LengthContext) {
    match value {
        // "flex: <positive-number>: Equivalent to flex: <positive-number> 1 0."
        Value::Number(_) => {
            if let Some(grow) = parse_number(value) {
                layout.flex_grow = grow;
                layout.flex_shrink = 1.0;
                layout.flex_basis = Dimension::Points(0.0);
            }
        }
        Value::String(s) => match s.trim() {
            // "flex: none: Equivalent to flex: 0 0 auto."
            "none" => {
                layout.flex_grow = 0.0;
                layout.flex_shrink = 0.0;
                layout.flex_basis = Dimension::Auto;
            }
            // "flex: auto: Equivalent to flex: 1 1 auto."
            "auto" => {
                layout.flex_grow = 1.0;
                layout.flex_shrink = 1.0;
                layout.flex_basis = Dimension::Auto;
            }
            other => {
                let parts = components(&Value::String(other.to_string()));
                let mut numbers = parts.iter().map_while(parse_number);
                let grow = numbers.next();
                let shrink = numbers.next();
                let consumed = usize::from(grow.is_some()) + usize::from(shrink.is_some());
                let basis = parts
                    .get(consumed)
                    .and_then(|v| parse_dimension("flex", v, ctx));
                layout.flex_grow = grow.unwrap_or(1.0);
                layout.flex_shrink = shrink.unwrap_or(1.0);
                layout.flex_basis = basis.unwrap_or(if grow.is_some() {
                    Dimension::Points(0.0)
                } else {
                    Dimension::Auto
                });
            }
        },
        _ => warn_unsupported("flex", value),
    }
}

/// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_font_weight(value: &Value) -> Option<u16> {
    match value.as_str().map(str::trim) {
        Some("normal") => Some(400),
        Some("bold") => Some(700),
        Some("lighter") => Some(300),
        Some("bolder") => Some(800),
        _ => parse_number(value)
            .filter(|w| (1.0..=1000.0).contains(w))
            .map(|w| w.round() as u16),
    }
}
