//! CSS value parsing.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Declared values arrive as JSON: numbers are pixel lengths, strings carry
//! CSS syntax (`"12px"`, `"1.5em"`, `"50%"`, `"rgba(0, 0, 0, 0.5)"`).

use plume_common::warning::warn_once;
use plume_layout::Dimension;
use serde_json::Value;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px(f32),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f32),
    /// "Equal to the computed value of the font-size property of the root element."
    Rem(f32),
    /// [§ 5.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    /// "1vw = 1% of viewport width"
    Vw(f32),
    /// "1vh = 1% of viewport height"
    Vh(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f32),
}

/// Everything a [`Length`] may be relative to, other than its containing box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthContext {
    /// Computed font size of the element.
    pub font_size: f32,
    /// Document width in pixels.
    pub viewport_width: f32,
    /// Document height in pixels.
    pub viewport_height: f32,
}

impl Default for LengthContext {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE_PX,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl Length {
    /// Parse a single CSS length token such as `12px`, `1.5em` or `50%`.
    ///
    /// A bare number is treated as pixels.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let split = token
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
            .unwrap_or(token.len());
        // An `e` directly followed by `m` belongs to the unit, not the exponent.
        let split = token[..split]
            .rfind(['e', 'E'])
            .filter(|&i| token[i..].starts_with("em") || token[i..].starts_with("ex"))
            .unwrap_or(split);
        let (number, unit) = token.split_at(split);
        let value: f32 = number.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        match unit.to_ascii_lowercase().as_str() {
            "" | "px" => Some(Self::Px(value)),
            "em" => Some(Self::Em(value)),
            "rem" => Some(Self::Rem(value)),
            "vw" => Some(Self::Vw(value)),
            "vh" => Some(Self::Vh(value)),
            "%" => Some(Self::Percent(value)),
            // [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
            "pt" => Some(Self::Px(value * 96.0 / 72.0)),
            _ => None,
        }
    }

    /// Read a length from a declared JSON value (number or string).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => json_f32(n).map(Self::Px),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    /// Resolve to pixels. Percentages resolve against `base` when given.
    #[must_use]
    pub fn to_px(self, ctx: &LengthContext, base: Option<f32>) -> Option<f32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Em(em) => Some(em * ctx.font_size),
            Self::Rem(rem) => Some(rem * DEFAULT_FONT_SIZE_PX),
            Self::Vw(vw) => Some(vw * ctx.viewport_width / 100.0),
            Self::Vh(vh) => Some(vh * ctx.viewport_height / 100.0),
            Self::Percent(pct) => base.map(|b| pct * b / 100.0),
        }
    }

    /// Convert to a layout [`Dimension`], keeping percentages symbolic.
    #[must_use]
    pub fn to_dimension(self, ctx: &LengthContext) -> Dimension {
        match self {
            Self::Percent(pct) => Dimension::Percent(pct),
            other => other.to_px(ctx, None).map_or(Dimension::Auto, Dimension::Points),
        }
    }
}

/// Parse a `<length-percentage> | auto` declaration into a [`Dimension`].
pub(crate) fn parse_dimension(property: &str, value: &Value, ctx: &LengthContext) -> Option<Dimension> {
    if value.as_str().is_some_and(|s| s.trim().eq_ignore_ascii_case("auto")) {
        return Some(Dimension::Auto);
    }
    let parsed = Length::from_value(value).map(|l| l.to_dimension(ctx));
    if parsed.is_none() {
        warn_unsupported(property, value);
    }
    parsed
}

/// Parse a pixel length, rejecting percentages.
pub(crate) fn parse_px(property: &str, value: &Value, ctx: &LengthContext) -> Option<f32> {
    let parsed = Length::from_value(value).and_then(|l| l.to_px(ctx, None));
    if parsed.is_none() {
        warn_unsupported(property, value);
    }
    parsed
}

/// Read a plain number (JSON number or numeric string).
pub(crate) fn parse_number(value: &Value) -> Option<f32> {
    let n = match value {
        Value::Number(n) => json_f32(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Narrow a JSON number to `f32`, rejecting values that do not fit.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn json_f32(n: &serde_json::Number) -> Option<f32> {
    let v = n.as_f64()? as f32;
    v.is_finite().then_some(v)
}

/// [§ 6.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
///
/// Parse an angle into degrees. A bare number is taken as degrees.
pub(crate) fn parse_angle(token: &str) -> Option<f32> {
    let token = token.trim();
    let (number, factor) = if let Some(n) = token.strip_suffix("deg") {
        (n, 1.0)
    } else if let Some(n) = token.strip_suffix("grad") {
        (n, 0.9)
    } else if let Some(n) = token.strip_suffix("rad") {
        (n, 180.0 / std::f32::consts::PI)
    } else if let Some(n) = token.strip_suffix("turn") {
        (n, 360.0)
    } else {
        (token, 1.0)
    };
    let value: f32 = number.trim().parse().ok()?;
    value.is_finite().then_some(value * factor)
}

/// Split a component list on `separator` (or on whitespace when `separator`
/// is `' '`), ignoring separators nested inside parentheses.
///
/// `"1px 2px rgba(0, 0, 0, 0.5)"` splits into three parts.
#[must_use]
pub fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && (c == separator || (separator == ' ' && c.is_whitespace())) => {
                let part = input[start..i].trim();
                if !part.is_empty() {
                    parts.push(part);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    let tail = input[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

/// Expand a 1-4 value box shorthand into `[top, right, bottom, left]`.
///
/// [§ 9.2 Shorthand properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
pub(crate) fn expand_box_shorthand<T: Copy>(values: &[T]) -> Option<[T; 4]> {
    match *values {
        [all] => Some([all, all, all, all]),
        [vertical, horizontal] => Some([vertical, horizontal, vertical, horizontal]),
        [top, horizontal, bottom] => Some([top, horizontal, bottom, horizontal]),
        [top, right, bottom, left] => Some([top, right, bottom, left]),
        _ => None,
    }
}

/// Split a declared value into its whitespace-separated components.
///
/// Numbers become a single component.
pub(crate) fn components(value: &Value) -> Vec<Value> {
    match value {
        Value::String(s) => split_top_level(s, ' ')
            .into_iter()
            .map(|part| Value::String(part.to_string()))
            .collect(),
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

pub(crate) fn warn_unsupported(property: &str, value: &Value) {
    warn_once("style", &format!("unsupported value for '{property}': {value}"));
}
