//! 2-D transforms.
//!
//! [CSS Transforms Module Level 1](https://www.w3.org/TR/css-transforms-1/)
//!
//! A declared `transform` is kept as a [`TransformList`] because
//! percentage translations depend on the element's own box, which is only
//! known after layout. [`TransformList::to_matrix`] resolves it once the box
//! size is available.

use std::fmt;

use serde_json::Value;

use crate::error::StyleError;
use crate::values::{Length, LengthContext, json_f32, parse_angle, parse_number, split_top_level};

/// A 2-D affine matrix `[a c e; b d f; 0 0 1]`, in SVG `matrix()` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Horizontal scale component.
    pub a: f32,
    /// Vertical shear component.
    pub b: f32,
    /// Horizontal shear component.
    pub c: f32,
    /// Vertical scale component.
    pub d: f32,
    /// Horizontal translation.
    pub e: f32,
    /// Vertical translation.
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// A translation.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::IDENTITY
        }
    }

    /// A scale about the origin.
    #[must_use]
    pub const fn scale(x: f32, y: f32) -> Self {
        Self {
            a: x,
            d: y,
            ..Self::IDENTITY
        }
    }

    /// A clockwise rotation in degrees.
    #[must_use]
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A skew by the given angles in degrees.
    #[must_use]
    pub fn skew(x_degrees: f32, y_degrees: f32) -> Self {
        Self {
            b: y_degrees.to_radians().tan(),
            c: x_degrees.to_radians().tan(),
            ..Self::IDENTITY
        }
    }

    /// `self × other`: `other` applies first, then `self`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            a: self.a.mul_add(other.a, self.c * other.b),
            b: self.b.mul_add(other.a, self.d * other.b),
            c: self.a.mul_add(other.c, self.c * other.d),
            d: self.b.mul_add(other.c, self.d * other.d),
            e: self.a.mul_add(other.e, self.c.mul_add(other.f, self.e)),
            f: self.b.mul_add(other.e, self.d.mul_add(other.f, self.f)),
        }
    }

    /// Apply this matrix to a point.
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a.mul_add(x, self.c.mul_add(y, self.e)),
            self.b.mul_add(x, self.d.mul_add(y, self.f)),
        )
    }

    /// Whether this is (numerically) the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        const EPS: f32 = 1e-6;
        (self.a - 1.0).abs() < EPS
            && self.b.abs() < EPS
            && self.c.abs() < EPS
            && (self.d - 1.0).abs() < EPS
            && self.e.abs() < EPS
            && self.f.abs() < EPS
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use plume_common::fmt_num;
        write!(
            f,
            "matrix({},{},{},{},{},{})",
            fmt_num(self.a),
            fmt_num(self.b),
            fmt_num(self.c),
            fmt_num(self.d),
            fmt_num(self.e),
            fmt_num(self.f)
        )
    }
}

/// [§ 12 Transform Functions](https://www.w3.org/TR/css-transforms-1/#transform-functions)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformFunction {
    /// `translate()`, `translateX()`, `translateY()`; percentages refer to
    /// the element's own border box.
    Translate(Length, Length),
    /// `scale()`, `scaleX()`, `scaleY()`.
    Scale(f32, f32),
    /// `rotate()`, in degrees.
    Rotate(f32),
    /// `skew()`, `skewX()`, `skewY()`, in degrees.
    Skew(f32, f32),
    /// `matrix(a, b, c, d, e, f)`.
    Matrix(Transform),
}

/// [§ 5 The 'transform' Property](https://www.w3.org/TR/css-transforms-1/#transform-property)
///
/// Functions are applied left to right, as in CSS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList(pub Vec<TransformFunction>);

impl TransformList {
    /// Whether the list has no functions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve to a matrix for a box of the given size.
    #[must_use]
    pub fn to_matrix(&self, ctx: &LengthContext, width: f32, height: f32) -> Transform {
        self.0.iter().fold(Transform::IDENTITY, |acc, function| {
            let step = match *function {
                TransformFunction::Translate(x, y) => Transform::translate(
                    x.to_px(ctx, Some(width)).unwrap_or(0.0),
                    y.to_px(ctx, Some(height)).unwrap_or(0.0),
                ),
                TransformFunction::Scale(x, y) => Transform::scale(x, y),
                TransformFunction::Rotate(deg) => Transform::rotate(deg),
                TransformFunction::Skew(x, y) => Transform::skew(x, y),
                TransformFunction::Matrix(m) => m,
            };
            acc.then(&step)
        })
    }

    /// Parse a declared `transform`: a CSS function list string, or an array
    /// of single-key objects such as `[{"translateX": 10}, {"rotate": "45deg"}]`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidTransform`] for unknown functions or bad
    /// argument lists.
    pub fn parse(value: &Value) -> Result<Self, StyleError> {
        let invalid = || StyleError::InvalidTransform {
            value: value.to_string(),
        };
        match value {
            Value::String(s) if s.trim().eq_ignore_ascii_case("none") => Ok(Self::default()),
            Value::String(s) => split_top_level(s, ' ')
                .into_iter()
                .map(|call| {
                    let (name, args) = call
                        .strip_suffix(')')
                        .and_then(|c| c.split_once('('))
                        .ok_or_else(invalid)?;
                    let args: Vec<Value> = args
                        .split(',')
                        .map(|a| Value::String(a.trim().to_string()))
                        .collect();
                    parse_function(name.trim(), &args).ok_or_else(invalid)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    let (name, arg) = item
                        .as_object()
                        .filter(|o| o.len() == 1)
                        .and_then(|o| o.iter().next())
                        .ok_or_else(invalid)?;
                    let args = match arg {
                        Value::Array(args) => args.clone(),
                        other => vec![other.clone()],
                    };
                    parse_function(name, &args).ok_or_else(invalid)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            _ => Err(invalid()),
        }
    }
}

fn parse_function(name: &str, args: &[Value]) -> Option<TransformFunction> {
    let length = |v: &Value| Length::from_value(v);
    let angle = |v: &Value| match v {
        Value::Number(n) => json_f32(n),
        Value::String(s) => parse_angle(s),
        _ => None,
    };
    let zero = Length::Px(0.0);
    Some(match (name, args) {
        ("translate", [x]) => TransformFunction::Translate(length(x)?, zero),
        ("translate", [x, y]) => TransformFunction::Translate(length(x)?, length(y)?),
        ("translateX", [x]) => TransformFunction::Translate(length(x)?, zero),
        ("translateY", [y]) => TransformFunction::Translate(zero, length(y)?),
        ("scale", [s]) => {
            let s = parse_number(s)?;
            TransformFunction::Scale(s, s)
        }
        ("scale", [x, y]) => TransformFunction::Scale(parse_number(x)?, parse_number(y)?),
        ("scaleX", [x]) => TransformFunction::Scale(parse_number(x)?, 1.0),
        ("scaleY", [y]) => TransformFunction::Scale(1.0, parse_number(y)?),
        ("rotate", [a]) => TransformFunction::Rotate(angle(a)?),
        ("skew", [x]) => TransformFunction::Skew(angle(x)?, 0.0),
        ("skew", [x, y]) => TransformFunction::Skew(angle(x)?, angle(y)?),
        ("skewX", [x]) => TransformFunction::Skew(angle(x)?, 0.0),
        ("skewY", [y]) => TransformFunction::Skew(0.0, angle(y)?),
        ("matrix", [a, b, c, d, e, f]) => TransformFunction::Matrix(Transform {
            a: parse_number(a)?,
            b: parse_number(b)?,
            c: parse_number(c)?,
            d: parse_number(d)?,
            e: parse_number(e)?,
            f: parse_number(f)?,
        }),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn test_translate_then_rotate_order() {
        let list = TransformList::parse(&json!("translate(10px, 0) rotate(90deg)")).unwrap();
        let m = list.to_matrix(&LengthContext::default(), 0.0, 0.0);
        // rotate applies first: (1, 0) -> (0, 1), then translate by 10.
        assert!(close(m.apply(1.0, 0.0), (10.0, 1.0)));
    }

    #[test]
    fn test_percent_translate_uses_box() {
        let list = TransformList::parse(&json!("translateX(50%)")).unwrap();
        let m = list.to_matrix(&LengthContext::default(), 200.0, 10.0);
        assert_eq!(m.e, 100.0);
    }

    #[test]
    fn test_array_form() {
        let list = TransformList::parse(&json!([{"scale": 2}, {"translateY": 5}])).unwrap();
        let m = list.to_matrix(&LengthContext::default(), 0.0, 0.0);
        assert!(close(m.apply(0.0, 0.0), (0.0, 10.0)));
    }

    #[test]
    fn test_unknown_function_is_error() {
        assert!(TransformList::parse(&json!("perspective(10px)")).is_err());
    }

    #[test]
    fn test_matrix_display() {
        assert_eq!(Transform::translate(3.0, -4.5).to_string(), "matrix(1,0,0,1,3,-4.5)");
    }
}
