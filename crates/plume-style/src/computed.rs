//! Computed style.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! Box-layout inputs (sizes, flex properties, margins) are written straight
//! into the layout node by the resolver; [`ComputedStyle`] keeps the values
//! painting and text layout need.

use plume_layout::{BoxDisplay, Edges, Position};

use crate::keywords::{
    BackgroundClip, BorderStyle, FontStyle, ObjectFit, Overflow, TextAlign, TextTransform, WordBreak,
};
use crate::shadow::{BoxShadow, DropShadow};
use crate::transform::TransformList;
use crate::values::{DEFAULT_FONT_SIZE_PX, LengthContext};

/// Default text color.
pub const DEFAULT_COLOR: &str = "black";

/// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// Circular corner radii in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Corners {
    /// Top-left radius.
    pub top_left: f32,
    /// Top-right radius.
    pub top_right: f32,
    /// Bottom-right radius.
    pub bottom_right: f32,
    /// Bottom-left radius.
    pub bottom_left: f32,
}

impl Corners {
    /// The same radius on every corner.
    #[must_use]
    pub const fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Whether every corner is square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    /// Whether all four corners share one radius.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }
}

/// Properties (and renderer directives) passed from parent to children.
///
/// [§ 3.3 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inheriting)
#[derive(Debug, Clone, PartialEq)]
pub struct InheritedStyle {
    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    pub color: String,
    /// [§ 3.1 'font-family'](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
    pub font_family: Vec<String>,
    /// [§ 3.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    pub font_size: f32,
    /// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
    pub font_weight: u16,
    /// [§ 3.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
    pub font_style: FontStyle,
    /// [§ 8.2 'letter-spacing'](https://www.w3.org/TR/css-text-3/#letter-spacing-property)
    pub letter_spacing: f32,
    /// Horizontal alignment of text lines.
    pub text_align: TextAlign,
    /// Case transformation applied to text content.
    pub text_transform: TextTransform,
    /// Segmentation granularity for line breaking.
    pub word_break: WordBreak,
    /// Text shadow, if declared.
    pub text_shadow: Option<DropShadow>,
    /// Accumulated opacity of all ancestors.
    pub opacity: f32,
    /// The transform of the nearest ancestor frame.
    pub transform: Option<TransformList>,
    /// Id of the clip path established by the nearest `overflow: hidden` ancestor.
    pub inherited_clip_path_id: Option<String>,
    /// Whether an ancestor clips its background to descendant text.
    pub clip_text_active: bool,
    /// Document width in pixels.
    pub viewport_width: f32,
    /// Document height in pixels.
    pub viewport_height: f32,
}

impl InheritedStyle {
    /// Initial values for the root of a document of the given size.
    #[must_use]
    pub fn root(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            font_family: Vec::new(),
            font_size: DEFAULT_FONT_SIZE_PX,
            font_weight: 400,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
            text_align: TextAlign::Start,
            text_transform: TextTransform::None,
            word_break: WordBreak::Normal,
            text_shadow: None,
            opacity: 1.0,
            transform: None,
            inherited_clip_path_id: None,
            clip_text_active: false,
            viewport_width,
            viewport_height,
        }
    }
}

/// Computed style of one element.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// Whether the element generates a box.
    pub display: BoxDisplay,
    /// [§ 2.1 'position'](https://www.w3.org/TR/css-position-3/#position-property)
    pub position: Position,
    /// Foreground (text) color.
    pub color: String,
    /// Font family preference list.
    pub font_family: Vec<String>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Numeric font weight (100-900).
    pub font_weight: u16,
    /// Italic or oblique selection.
    pub font_style: FontStyle,
    /// Extra advance after each character, in pixels.
    pub letter_spacing: f32,
    /// Horizontal alignment of text lines.
    pub text_align: TextAlign,
    /// Case transformation applied to text content.
    pub text_transform: TextTransform,
    /// Segmentation granularity for line breaking.
    pub word_break: WordBreak,
    /// Text shadow, if declared.
    pub text_shadow: Option<DropShadow>,
    /// Effective opacity (own value multiplied by every ancestor's).
    pub opacity: f32,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    pub background_color: Option<String>,
    /// [§ 3.7 'background-clip'](https://www.w3.org/TR/css-backgrounds-3/#background-clip)
    pub background_clip: BackgroundClip,
    /// Border widths in pixels.
    pub border_width: Edges<f32>,
    /// Border color; defaults to the text color.
    pub border_color: Option<String>,
    /// Border line style.
    pub border_style: BorderStyle,
    /// Corner radii.
    pub border_radius: Corners,
    /// Padding in pixels.
    pub padding: Edges<f32>,
    /// [§ 7.1 'box-shadow'](https://www.w3.org/TR/css-backgrounds-3/#box-shadow),
    /// in declaration order.
    pub box_shadow: Vec<BoxShadow>,
    /// [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    pub overflow: Overflow,
    /// The element's transform; equal to the inherited one unless declared.
    pub transform: Option<TransformList>,
    /// Whether this element declared its own non-empty `transform`.
    pub transform_declared: bool,
    /// [§ 5.5 'object-fit'](https://www.w3.org/TR/css-images-3/#the-object-fit)
    pub object_fit: ObjectFit,
    /// Id of the clip path established by the nearest `overflow: hidden` ancestor.
    pub inherited_clip_path_id: Option<String>,
    /// Whether this element or an ancestor clips its background to text.
    pub clip_text_active: bool,
    /// Document width in pixels.
    pub viewport_width: f32,
    /// Document height in pixels.
    pub viewport_height: f32,
}

impl ComputedStyle {
    /// Start from the inherited values, with every non-inherited property at
    /// its initial value.
    #[must_use]
    pub fn inherit(parent: &InheritedStyle) -> Self {
        Self {
            display: BoxDisplay::Flex,
            position: Position::Relative,
            color: parent.color.clone(),
            font_family: parent.font_family.clone(),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_style: parent.font_style,
            letter_spacing: parent.letter_spacing,
            text_align: parent.text_align,
            text_transform: parent.text_transform,
            word_break: parent.word_break,
            text_shadow: parent.text_shadow.clone(),
            opacity: parent.opacity,
            background_color: None,
            background_clip: BackgroundClip::BorderBox,
            border_width: Edges::default(),
            border_color: None,
            border_style: BorderStyle::None,
            border_radius: Corners::default(),
            padding: Edges::default(),
            box_shadow: Vec::new(),
            overflow: Overflow::Visible,
            transform: parent.transform.clone(),
            transform_declared: false,
            object_fit: ObjectFit::Fill,
            inherited_clip_path_id: parent.inherited_clip_path_id.clone(),
            clip_text_active: parent.clip_text_active,
            viewport_width: parent.viewport_width,
            viewport_height: parent.viewport_height,
        }
    }

    /// The subset handed down to children.
    #[must_use]
    pub fn inheritable(&self) -> InheritedStyle {
        InheritedStyle {
            color: self.color.clone(),
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            font_style: self.font_style,
            letter_spacing: self.letter_spacing,
            text_align: self.text_align,
            text_transform: self.text_transform,
            word_break: self.word_break,
            text_shadow: self.text_shadow.clone(),
            opacity: self.opacity,
            transform: self.transform.clone(),
            inherited_clip_path_id: self.inherited_clip_path_id.clone(),
            clip_text_active: self.clip_text_active,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }

    /// Context for resolving font- and viewport-relative lengths.
    #[must_use]
    pub const fn length_context(&self) -> LengthContext {
        LengthContext {
            font_size: self.font_size,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }

    /// The border color actually painted.
    #[must_use]
    pub fn used_border_color(&self) -> &str {
        self.border_color.as_deref().unwrap_or(&self.color)
    }

    /// Whether any border is drawn.
    #[must_use]
    pub fn has_border(&self) -> bool {
        self.border_style != BorderStyle::None
            && (self.border_width.top > 0.0
                || self.border_width.right > 0.0
                || self.border_width.bottom > 0.0
                || self.border_width.left > 0.0)
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::inherit(&InheritedStyle::root(0.0, 0.0))
    }
}
