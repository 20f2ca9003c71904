//! Shadow descriptors.
//!
//! [§ 7 Drop Shadows](https://www.w3.org/TR/css-backgrounds-3/#shadows)
//!
//! Both descriptor types are plain values: geometry code that needs a
//! normalized form (such as a negated inset spread) works on a copy.

use serde::Deserialize;
use serde_json::Value;

use crate::error::StyleError;
use crate::values::{Length, LengthContext, split_top_level, warn_unsupported};

/// One entry of a `box-shadow` list.
///
/// [§ 7.1 'box-shadow'](https://www.w3.org/TR/css-backgrounds-3/#box-shadow)
/// "Where `<shadow> = <color>? && [<length>{2} <length [0,∞]>? <length>?] && inset?`"
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxShadow {
    /// "Specifies the horizontal offset of the shadow."
    #[serde(default)]
    pub offset_x: f32,
    /// "Specifies the vertical offset of the shadow."
    #[serde(default)]
    pub offset_y: f32,
    /// "Specifies the blur radius. Negative values are not allowed."
    #[serde(default)]
    pub blur_radius: f32,
    /// "Specifies the spread distance."
    #[serde(default)]
    pub spread_radius: f32,
    /// "Specifies the color of the shadow."
    #[serde(default = "default_shadow_color")]
    pub color: String,
    /// "Changes the drop shadow from an outer box-shadow to an inner box-shadow."
    #[serde(default)]
    pub inset: bool,
}

fn default_shadow_color() -> String {
    "black".to_string()
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur_radius: 0.0,
            spread_radius: 0.0,
            color: default_shadow_color(),
            inset: false,
        }
    }
}

/// A single drop shadow (used for `text-shadow`).
///
/// Every field is optional: a shadow missing any of them is not drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropShadow {
    /// Shadow color.
    pub color: Option<String>,
    /// Shadow offset `(dx, dy)`.
    pub offset: Option<(f32, f32)>,
    /// Blur radius.
    pub radius: Option<f32>,
}

impl DropShadow {
    /// Whether all three parameters are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.color.is_some() && self.offset.is_some() && self.radius.is_some()
    }
}

/// Parse a `boxShadow` declaration: a CSS list string or a JSON array of
/// `{offsetX, offsetY, blurRadius, spreadRadius, color, inset}` objects.
///
/// # Errors
///
/// Returns [`StyleError::InvalidShadow`] when a JSON entry has the wrong shape.
pub fn parse_box_shadows(value: &Value, ctx: &LengthContext) -> Result<Vec<BoxShadow>, StyleError> {
    match value {
        Value::String(s) => Ok(split_top_level(s, ',')
            .into_iter()
            .filter_map(|entry| {
                let parsed = parse_box_shadow_entry(entry, ctx);
                if parsed.is_none() {
                    warn_unsupported("boxShadow", &Value::String(entry.to_string()));
                }
                parsed
            })
            .collect()),
        Value::Array(_) | Value::Object(_) => {
            let list = match value {
                Value::Object(_) => Value::Array(vec![value.clone()]),
                _ => value.clone(),
            };
            serde_json::from_value(list).map_err(|source| StyleError::InvalidShadow {
                property: "boxShadow",
                source,
            })
        }
        _ => {
            warn_unsupported("boxShadow", value);
            Ok(Vec::new())
        }
    }
}

/// `[inset] <x> <y> [<blur> [<spread>]] [<color>]`, in any order of color and inset.
fn parse_box_shadow_entry(entry: &str, ctx: &LengthContext) -> Option<BoxShadow> {
    if entry.trim().eq_ignore_ascii_case("none") {
        return None;
    }
    let mut lengths = Vec::with_capacity(4);
    let mut color = None;
    let mut inset = false;
    for part in split_top_level(entry, ' ') {
        if part.eq_ignore_ascii_case("inset") {
            inset = true;
        } else if let Some(length) = Length::parse(part).and_then(|l| l.to_px(ctx, None)) {
            lengths.push(length);
        } else {
            color = Some(part.to_string());
        }
    }
    let [offset_x, offset_y, rest @ ..] = lengths.as_slice() else {
        return None;
    };
    Some(BoxShadow {
        offset_x: *offset_x,
        offset_y: *offset_y,
        blur_radius: rest.first().copied().unwrap_or(0.0),
        spread_radius: rest.get(1).copied().unwrap_or(0.0),
        color: color.unwrap_or_else(default_shadow_color),
        inset,
    })
}

/// Parse a `textShadow` declaration: `<x> <y> [<blur>] [<color>]`.
///
/// Only the first shadow of a list is used. A missing blur radius is zero and
/// a missing color is the element's text color.
#[must_use]
pub fn parse_text_shadow(value: &Value, ctx: &LengthContext, current_color: &str) -> Option<DropShadow> {
    let Some(text) = value.as_str() else {
        warn_unsupported("textShadow", value);
        return None;
    };
    let first = split_top_level(text, ',').into_iter().next()?;
    if first.eq_ignore_ascii_case("none") {
        return None;
    }
    let mut lengths = Vec::with_capacity(3);
    let mut color = None;
    for part in split_top_level(first, ' ') {
        match Length::parse(part).and_then(|l| l.to_px(ctx, None)) {
            Some(length) => lengths.push(length),
            None => color = Some(part.to_string()),
        }
    }
    let [dx, dy, rest @ ..] = lengths.as_slice() else {
        warn_unsupported("textShadow", value);
        return None;
    };
    Some(DropShadow {
        color: Some(color.unwrap_or_else(|| current_color.to_string())),
        offset: Some((*dx, *dy)),
        radius: Some(rest.first().copied().unwrap_or(0.0)),
    })
}

/// Parse a `textShadowOffset` object `{width, height}`.
///
/// # Errors
///
/// Returns [`StyleError::InvalidShadow`] when the object has the wrong shape.
pub fn parse_shadow_offset(value: &Value) -> Result<(f32, f32), StyleError> {
    #[derive(Deserialize)]
    struct Offset {
        #[serde(default)]
        width: f32,
        #[serde(default)]
        height: f32,
    }
    let offset: Offset =
        serde_json::from_value(value.clone()).map_err(|source| StyleError::InvalidShadow {
            property: "textShadowOffset",
            source,
        })?;
    Ok((offset.width, offset.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_css_box_shadow_list() {
        let shadows = parse_box_shadows(
            &json!("2px 2px 4px #000, inset 0 0 8px 2px rgba(0, 0, 0, 0.5)"),
            &LengthContext::default(),
        )
        .unwrap();
        assert_eq!(shadows.len(), 2);
        assert_eq!(shadows[0].blur_radius, 4.0);
        assert_eq!(shadows[0].color, "#000");
        assert!(!shadows[0].inset);
        assert!(shadows[1].inset);
        assert_eq!(shadows[1].spread_radius, 2.0);
        assert_eq!(shadows[1].color, "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_json_box_shadow_objects() {
        let shadows = parse_box_shadows(
            &json!([{"offsetX": 1, "offsetY": 2, "blurRadius": 3, "color": "red"}]),
            &LengthContext::default(),
        )
        .unwrap();
        assert_eq!(shadows[0].offset_y, 2.0);
        assert_eq!(shadows[0].spread_radius, 0.0);
    }

    #[test]
    fn test_malformed_json_box_shadow_is_error() {
        let result = parse_box_shadows(&json!([{"offsetX": "wide"}]), &LengthContext::default());
        assert!(matches!(result, Err(StyleError::InvalidShadow { .. })));
    }

    #[test]
    fn test_text_shadow_defaults() {
        let shadow =
            parse_text_shadow(&json!("1px 2px"), &LengthContext::default(), "blue").unwrap();
        assert_eq!(shadow.offset, Some((1.0, 2.0)));
        assert_eq!(shadow.radius, Some(0.0));
        assert_eq!(shadow.color.as_deref(), Some("blue"));
        assert!(shadow.is_complete());
    }
}
