//! Structured box outlines.
//!
//! [§ 5.5 Corner Shaping](https://www.w3.org/TR/css-backgrounds-3/#corner-shaping)
//!
//! Painters describe a box's outline as a [`Silhouette`] rather than as
//! markup text, so shadows can shift a copy of the geometry and masks can
//! restyle it without re-parsing attributes.

use std::fmt::Write;

use plume_common::{XmlElement, fmt_num};
use plume_style::Corners;

/// One command of an outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at `(x, y)`.
    MoveTo(f32, f32),
    /// Straight line to `(x, y)`.
    LineTo(f32, f32),
    /// Clockwise quarter-ellipse arc of radii `(rx, ry)` ending at `(x, y)`.
    Arc {
        /// Horizontal radius.
        rx: f32,
        /// Vertical radius.
        ry: f32,
        /// End x.
        x: f32,
        /// End y.
        y: f32,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    fn translate(self, dx: f32, dy: f32) -> Self {
        match self {
            Self::MoveTo(x, y) => Self::MoveTo(x + dx, y + dy),
            Self::LineTo(x, y) => Self::LineTo(x + dx, y + dy),
            Self::Arc { rx, ry, x, y } => Self::Arc {
                rx,
                ry,
                x: x + dx,
                y: y + dy,
            },
            Self::Close => Self::Close,
        }
    }
}

/// The outline of a painted box, in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Silhouette {
    /// An axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },
    /// A closed path, used for rounded corners.
    Path(Vec<PathCommand>),
}

impl Silhouette {
    /// The outline of a box with the given corner radii.
    ///
    /// [§ 5.5 Overlapping Curves](https://www.w3.org/TR/css-backgrounds-3/#corner-overlap)
    ///
    /// "Let f = min(Li/Si), where i ∈ {top, right, bottom, left}, Si is the
    /// sum of the two corresponding radii of the corners on side i, and Ltop
    /// = Lbottom = the width of the box, and Lleft = Lright = the height of
    /// the box. If f < 1, then all corner radii are reduced by multiplying
    /// them by f."
    #[must_use]
    pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, radii: &Corners) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        if radii.is_zero() {
            return Self::Rect { x, y, width, height };
        }

        let Corners {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } = *radii;
        let mut f: f32 = 1.0;
        for (length, sum) in [
            (width, top_left + top_right),
            (height, top_right + bottom_right),
            (width, bottom_right + bottom_left),
            (height, bottom_left + top_left),
        ] {
            if sum > 0.0 {
                f = f.min(length / sum);
            }
        }
        let [tl, tr, br, bl] = [top_left, top_right, bottom_right, bottom_left].map(|r| r.max(0.0) * f);

        let right = x + width;
        let bottom = y + height;
        let mut commands = vec![PathCommand::MoveTo(x, y + tl)];
        if tl > 0.0 {
            commands.push(PathCommand::Arc { rx: tl, ry: tl, x: x + tl, y });
        }
        commands.push(PathCommand::LineTo(right - tr, y));
        if tr > 0.0 {
            commands.push(PathCommand::Arc {
                rx: tr,
                ry: tr,
                x: right,
                y: y + tr,
            });
        }
        commands.push(PathCommand::LineTo(right, bottom - br));
        if br > 0.0 {
            commands.push(PathCommand::Arc {
                rx: br,
                ry: br,
                x: right - br,
                y: bottom,
            });
        }
        commands.push(PathCommand::LineTo(x + bl, bottom));
        if bl > 0.0 {
            commands.push(PathCommand::Arc {
                rx: bl,
                ry: bl,
                x,
                y: bottom - bl,
            });
        }
        commands.push(PathCommand::Close);
        Self::Path(commands)
    }

    /// A copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        match self {
            Self::Rect { x, y, width, height } => Self::Rect {
                x: x + dx,
                y: y + dy,
                width: *width,
                height: *height,
            },
            Self::Path(commands) => Self::Path(commands.iter().map(|c| c.translate(dx, dy)).collect()),
        }
    }

    /// SVG path data for this outline.
    #[must_use]
    pub fn path_data(&self) -> String {
        let commands = match self {
            Self::Rect { x, y, width, height } => vec![
                PathCommand::MoveTo(*x, *y),
                PathCommand::LineTo(x + width, *y),
                PathCommand::LineTo(x + width, y + height),
                PathCommand::LineTo(*x, y + height),
                PathCommand::Close,
            ],
            Self::Path(commands) => commands.clone(),
        };
        let mut d = String::new();
        for command in commands {
            let _ = match command {
                PathCommand::MoveTo(x, y) => write!(d, "M{},{}", fmt_num(x), fmt_num(y)),
                PathCommand::LineTo(x, y) => write!(d, "L{},{}", fmt_num(x), fmt_num(y)),
                PathCommand::Arc { rx, ry, x, y } => write!(
                    d,
                    "A{},{} 0 0 1 {},{}",
                    fmt_num(rx),
                    fmt_num(ry),
                    fmt_num(x),
                    fmt_num(y)
                ),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }

    /// An unstyled `<rect>` or `<path>` element for this outline.
    #[must_use]
    pub fn to_element(&self) -> XmlElement {
        match self {
            Self::Rect { x, y, width, height } => XmlElement::new("rect")
                .num("x", *x)
                .num("y", *y)
                .num("width", *width)
                .num("height", *height),
            Self::Path(_) => XmlElement::new("path").attr("d", self.path_data()),
        }
    }
}
