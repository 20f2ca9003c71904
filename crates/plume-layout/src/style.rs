//! Box-layout properties.
//!
//! [§ 7 Flexibility](https://www.w3.org/TR/css-flexbox-1/#flexibility)
//!
//! A [`BoxStyle`] holds the already-resolved layout inputs of one node. Style
//! resolution (turning declared CSS-like values into these fields) happens
//! outside this crate; the engine only reads them.

use strum_macros::{Display, EnumString};

use crate::geometry::Edges;

/// A length that may be automatic or relative to the containing box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Dimension {
    /// Sized by content or by the flex algorithm.
    #[default]
    Auto,
    /// An absolute length in pixels.
    Points(f32),
    /// A percentage (0-100) of the corresponding containing-box size.
    Percent(f32),
}

impl Dimension {
    /// Resolve against a containing-box size.
    ///
    /// Percentages against an indefinite base behave as `auto`.
    #[must_use]
    pub fn resolve(self, base: Option<f32>) -> Option<f32> {
        match self {
            Self::Auto => None,
            Self::Points(px) => Some(px),
            Self::Percent(pct) => base.map(|b| b * pct / 100.0),
        }
    }

    /// Whether this is [`Dimension::Auto`].
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// Every box is a flex container; `none` removes the box from layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxDisplay {
    /// Participates in layout as a flex container.
    #[default]
    Flex,
    /// Generates no box.
    None,
}

/// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FlexDirection {
    /// "The flex container's main axis has the same orientation as the inline axis."
    #[default]
    Row,
    /// "Same as row, except the main-start and main-end directions are swapped."
    RowReverse,
    /// "The flex container's main axis has the same orientation as the block axis."
    Column,
    /// "Same as column, except the main-start and main-end directions are swapped."
    ColumnReverse,
}

impl FlexDirection {
    /// Whether the main axis is horizontal.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Whether items are placed from the main-end edge.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// [§ 8.2 'justify-content'](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum JustifyContent {
    /// "Flex items are packed toward the start of the line."
    #[default]
    #[strum(to_string = "flex-start", serialize = "start", serialize = "left")]
    FlexStart,
    /// "Flex items are packed toward the center of the line."
    Center,
    /// "Flex items are packed toward the end of the line."
    #[strum(to_string = "flex-end", serialize = "end", serialize = "right")]
    FlexEnd,
    /// "Flex items are evenly distributed in the line."
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size spaces on either end."
    SpaceAround,
    /// Equal spaces between items and at both ends.
    SpaceEvenly,
}

/// [§ 8.3 'align-items'](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum AlignItems {
    /// "If the cross size property of the flex item computes to auto ... the
    /// used outer cross size is the used cross size of its flex line."
    #[default]
    Stretch,
    /// "The cross-start margin edge of the flex item is placed flush with the
    /// cross-start edge of the line."
    #[strum(to_string = "flex-start", serialize = "start")]
    FlexStart,
    /// "The flex item's margin box is centered in the cross axis within the line."
    Center,
    /// "The cross-end margin edge of the flex item is placed flush with the
    /// cross-end edge of the line."
    #[strum(to_string = "flex-end", serialize = "end")]
    FlexEnd,
    /// Laid out as `flex-start`; single-line text containers share one baseline.
    Baseline,
}

/// [§ 2.1 'position'](https://www.w3.org/TR/css-position-3/#position-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// Laid out in flow, then shifted by its insets.
    #[default]
    #[strum(to_string = "relative", serialize = "static")]
    Relative,
    /// Removed from flow and placed against the parent's padding box.
    Absolute,
}

/// Layout inputs for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    /// Whether the node generates a box.
    pub display: BoxDisplay,
    /// Main-axis orientation for the node's children.
    pub flex_direction: FlexDirection,
    /// Main-axis distribution of the node's children.
    pub justify_content: JustifyContent,
    /// Default cross-axis alignment of the node's children.
    pub align_items: AlignItems,
    /// Cross-axis alignment of this node, overriding the parent's `align_items`.
    pub align_self: Option<AlignItems>,
    /// Positioning scheme.
    pub position: Position,
    /// `top`/`right`/`bottom`/`left`.
    pub inset: Edges<Dimension>,
    /// Preferred border-box width.
    pub width: Dimension,
    /// Preferred border-box height.
    pub height: Dimension,
    /// Lower bound on the border-box width.
    pub min_width: Dimension,
    /// Lower bound on the border-box height.
    pub min_height: Dimension,
    /// Upper bound on the border-box width.
    pub max_width: Dimension,
    /// Upper bound on the border-box height.
    pub max_height: Dimension,
    /// Outer spacing in pixels.
    pub margin: Edges<f32>,
    /// Inner spacing in pixels.
    pub padding: Edges<f32>,
    /// Border widths in pixels.
    pub border: Edges<f32>,
    /// [§ 7.1 'flex-grow'](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property)
    pub flex_grow: f32,
    /// [§ 7.1 'flex-shrink'](https://www.w3.org/TR/css-flexbox-1/#flex-shrink-property)
    pub flex_shrink: f32,
    /// [§ 7.2 'flex-basis'](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property)
    pub flex_basis: Dimension,
    /// Gap between rows (column-direction main axis).
    pub row_gap: f32,
    /// Gap between columns (row-direction main axis).
    pub column_gap: f32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            display: BoxDisplay::Flex,
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_self: None,
            position: Position::Relative,
            inset: Edges::all(Dimension::Auto),
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            margin: Edges::default(),
            padding: Edges::default(),
            border: Edges::default(),
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Dimension::Auto,
            row_gap: 0.0,
            column_gap: 0.0,
        }
    }
}

impl BoxStyle {
    /// Padding plus border on each edge.
    #[must_use]
    pub fn frame(&self) -> Edges<f32> {
        Edges {
            top: self.padding.top + self.border.top,
            right: self.padding.right + self.border.right,
            bottom: self.padding.bottom + self.border.bottom,
            left: self.padding.left + self.border.left,
        }
    }

    /// Whether the node is taken out of flow.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }
}
