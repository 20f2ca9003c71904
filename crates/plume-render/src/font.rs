//! The font-resolution capability.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! Text layout never touches font files. It asks a [`FontResolver`] for a
//! handle, then measures and outlines text through that handle, so the same
//! engine runs against real fonts in the pipeline and fixed-advance doubles
//! in tests.

use plume_style::ComputedStyle;

use crate::error::RenderError;

/// An opaque reference to a font chosen by a [`FontResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub usize);

/// Vertical metrics in font design units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the em box (positive).
    pub ascender: f32,
    /// Distance from the baseline to the bottom of the em box (negative).
    pub descender: f32,
    /// Design units per em.
    pub units_per_em: f32,
}

impl FontMetrics {
    /// Ascent in pixels at `font_size`.
    #[must_use]
    pub fn ascent(&self, font_size: f32) -> f32 {
        self.ascender / self.units_per_em * font_size
    }

    /// Descent in pixels at `font_size` (positive).
    #[must_use]
    pub fn descent(&self, font_size: f32) -> f32 {
        -self.descender / self.units_per_em * font_size
    }

    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "We recommend a used value for 'normal' between 1.0 and 1.2."
    ///
    /// The used line height is the font's ascent plus descent, times 1.2.
    #[must_use]
    pub fn line_height(&self, font_size: f32) -> f32 {
        (self.ascent(font_size) + self.descent(font_size)) * 1.2
    }
}

/// Font lookup, measurement and outlining.
pub trait FontResolver {
    /// Choose a font for the style's family, weight and style.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Font`] when no font at all can be provided.
    fn get_font(&self, style: &ComputedStyle) -> Result<FontHandle, RenderError>;

    /// Vertical metrics of `font`.
    fn metrics(&self, font: FontHandle) -> FontMetrics;

    /// Advance width of `text` in pixels, including letter spacing.
    fn measure(&self, font: FontHandle, text: &str, style: &ComputedStyle) -> f32;

    /// SVG path data outlining `text` with its top-left corner at
    /// `(left, top)`. The baseline sits at `top + ascent`.
    fn glyph_path(&self, font: FontHandle, text: &str, left: f32, top: f32, style: &ComputedStyle)
    -> String;

    /// Whether `ch` has a glyph in `font` or any loaded fallback.
    fn covers(&self, _font: FontHandle, _ch: char) -> bool {
        true
    }
}
