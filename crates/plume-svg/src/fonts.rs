//! Font loading and glyph outlines.
//!
//! [§ 5 Font Matching Algorithm](https://www.w3.org/TR/css-fonts-4/#font-matching-algorithm)
//!
//! [`FontBook`] holds every loaded face. Advance widths come from fontdue's
//! per-glyph metrics; vertical metrics and outlines come from ttf-parser.
//! Faces can be added between the two render passes, so the book uses
//! interior mutability and is shared behind an `Rc`.

use std::cell::RefCell;
use std::fmt::Write;

use fontdue::{Font, FontSettings};
use plume_common::fmt_num;
use plume_render::{FontHandle, FontMetrics, FontResolver, RenderError};
use plume_style::{ComputedStyle, FontStyle};
use ttf_parser::{Face, OutlineBuilder};

use crate::error::FontError;

/// Common system font paths to search for a default face.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// How a face is selected: family name, weight and style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Family name matched against `fontFamily` (case-insensitive).
    pub family: String,
    /// Numeric weight, 100 to 900.
    pub weight: u16,
    /// Normal, italic or oblique.
    pub style: FontStyle,
}

impl FontDescriptor {
    /// A regular (400, normal) face of `family`.
    #[must_use]
    pub fn regular(family: &str) -> Self {
        Self {
            family: family.to_string(),
            weight: 400,
            style: FontStyle::Normal,
        }
    }
}

struct LoadedFace {
    descriptor: FontDescriptor,
    data: Vec<u8>,
    font: Font,
    metrics: FontMetrics,
}

impl LoadedFace {
    fn covers(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }
}

/// A [`FontResolver`] over a growable set of faces.
#[derive(Default)]
pub struct FontBook {
    faces: RefCell<Vec<LoadedFace>>,
}

impl FontBook {
    /// An empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add one face.
    ///
    /// # Errors
    ///
    /// Returns [`FontError`] when the data is not a font either library can
    /// read.
    pub fn add_font(&self, descriptor: FontDescriptor, data: Vec<u8>) -> Result<FontHandle, FontError> {
        let metrics = {
            let face = Face::parse(&data, 0).map_err(|source| FontError::Face {
                family: descriptor.family.clone(),
                source,
            })?;
            FontMetrics {
                ascender: f32::from(face.ascender()),
                descender: f32::from(face.descender()),
                units_per_em: f32::from(face.units_per_em()),
            }
        };
        let font = Font::from_bytes(data.as_slice(), FontSettings::default()).map_err(|reason| {
            FontError::Parse {
                family: descriptor.family.clone(),
                reason,
            }
        })?;

        let mut faces = self.faces.borrow_mut();
        log::debug!(
            "loaded font {} {} {} ({} glyphs)",
            descriptor.family,
            descriptor.weight,
            descriptor.style,
            font.glyph_count()
        );
        faces.push(LoadedFace {
            descriptor,
            data,
            font,
            metrics,
        });
        Ok(FontHandle(faces.len() - 1))
    }

    /// Add the first readable face from [`SYSTEM_FONT_PATHS`] under `family`.
    ///
    /// Returns `None` when none of the paths holds a usable font.
    pub fn load_system_font(&self, family: &str) -> Option<FontHandle> {
        SYSTEM_FONT_PATHS.iter().find_map(|path| {
            let data = std::fs::read(path).ok()?;
            match self.add_font(FontDescriptor::regular(family), data) {
                Ok(handle) => {
                    log::info!("loaded system font {path}");
                    Some(handle)
                }
                Err(err) => {
                    log::debug!("skipping {path}: {err}");
                    None
                }
            }
        })
    }

    /// Number of loaded faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.borrow().len()
    }

    /// Whether no face has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.borrow().is_empty()
    }
}

/// Index of the face best matching `style` among `faces`.
///
/// [§ 5.2 Matching font styles](https://www.w3.org/TR/css-fonts-4/#font-style-matching)
///
/// The first requested family with any loaded face narrows the set (all
/// faces when none match). Within it a face with the requested style wins
/// over one without, then the closest weight.
fn select(faces: &[LoadedFace], style: &ComputedStyle) -> Option<usize> {
    let family = style.font_family.iter().find(|family| {
        faces
            .iter()
            .any(|face| face.descriptor.family.eq_ignore_ascii_case(family))
    });
    faces
        .iter()
        .enumerate()
        .filter(|(_, face)| family.is_none_or(|family| face.descriptor.family.eq_ignore_ascii_case(family)))
        .min_by_key(|(_, face)| {
            (
                face.descriptor.style != style.font_style,
                face.descriptor.weight.abs_diff(style.font_weight),
            )
        })
        .map(|(index, _)| index)
}

/// The face that draws `ch`: `primary` if it has the glyph, otherwise the
/// first loaded face that does.
fn face_for(faces: &[LoadedFace], primary: usize, ch: char) -> usize {
    if ch.is_whitespace() || faces[primary].covers(ch) {
        return primary;
    }
    faces.iter().position(|face| face.covers(ch)).unwrap_or(primary)
}

impl FontResolver for FontBook {
    fn get_font(&self, style: &ComputedStyle) -> Result<FontHandle, RenderError> {
        select(&self.faces.borrow(), style)
            .map(FontHandle)
            .ok_or_else(|| RenderError::Font(Box::new(FontError::NoFonts)))
    }

    fn metrics(&self, font: FontHandle) -> FontMetrics {
        self.faces.borrow().get(font.0).map_or(
            FontMetrics {
                ascender: 0.8,
                descender: -0.2,
                units_per_em: 1.0,
            },
            |face| face.metrics,
        )
    }

    fn measure(&self, font: FontHandle, text: &str, style: &ComputedStyle) -> f32 {
        let faces = self.faces.borrow();
        if faces.is_empty() {
            return 0.0;
        }
        let primary = font.0.min(faces.len() - 1);
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| {
                let face = &faces[face_for(&faces, primary, ch)];
                face.font.metrics(ch, style.font_size).advance_width + style.letter_spacing
            })
            .sum()
    }

    fn glyph_path(&self, font: FontHandle, text: &str, left: f32, top: f32, style: &ComputedStyle) -> String {
        let faces = self.faces.borrow();
        let Some(primary) = faces.get(font.0) else {
            return String::new();
        };
        let baseline = top + primary.metrics.ascent(style.font_size);

        let mut parsed = ParsedFaces::new(&faces);
        let mut out = String::new();
        let mut pen = left;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let index = face_for(&faces, font.0, ch);
            let loaded = &faces[index];
            if let Some(face) = parsed.get(index)
                && let Some(glyph) = face.glyph_index(ch)
            {
                let mut builder = SvgPathBuilder {
                    out: &mut out,
                    scale: style.font_size / loaded.metrics.units_per_em,
                    x: pen,
                    y: baseline,
                };
                let _ = face.outline_glyph(glyph, &mut builder);
            }
            pen += loaded.font.metrics(ch, style.font_size).advance_width + style.letter_spacing;
        }
        out
    }

    fn covers(&self, _font: FontHandle, ch: char) -> bool {
        self.faces.borrow().iter().any(|face| face.covers(ch))
    }
}

/// ttf-parser views over `faces`, each parsed on first use.
struct ParsedFaces<'a> {
    faces: &'a [LoadedFace],
    parsed: Vec<Option<Option<Face<'a>>>>,
}

impl<'a> ParsedFaces<'a> {
    fn new(faces: &'a [LoadedFace]) -> Self {
        Self {
            faces,
            parsed: faces.iter().map(|_| None).collect(),
        }
    }

    fn get(&mut self, index: usize) -> Option<&Face<'a>> {
        let faces = self.faces;
        let data = &faces.get(index)?.data;
        self.parsed
            .get_mut(index)?
            .get_or_insert_with(|| Face::parse(data, 0).ok())
            .as_ref()
    }

    #[cfg(test)]
    fn parsed_count(&self) -> usize {
        self.parsed.iter().filter(|face| face.is_some()).count()
    }
}

/// Writes ttf-parser outline commands as SVG path data.
///
/// Outlines arrive in font design units with y up; each point is scaled to
/// pixels and flipped around the baseline at `(x, y)`.
struct SvgPathBuilder<'a> {
    out: &'a mut String,
    scale: f32,
    x: f32,
    y: f32,
}

impl SvgPathBuilder<'_> {
    fn point(&mut self, x: f32, y: f32) {
        let _ = write!(
            self.out,
            "{},{}",
            fmt_num(self.x + x * self.scale),
            fmt_num(self.y - y * self.scale)
        );
    }
}

impl OutlineBuilder for SvgPathBuilder<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.out.push('M');
        self.point(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.out.push('L');
        self.point(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.out.push('Q');
        self.point(x1, y1);
        self.out.push(' ');
        self.point(x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.out.push('C');
        self.point(x1, y1);
        self.out.push(' ');
        self.point(x2, y2);
        self.out.push(' ');
        self.point(x, y);
    }

    fn close(&mut self) {
        self.out.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_commands_are_scaled_and_flipped() {
        let mut out = String::new();
        let mut builder = SvgPathBuilder {
            out: &mut out,
            scale: 0.01,
            x: 10.0,
            y: 20.0,
        };
        builder.move_to(0.0, 0.0);
        builder.line_to(100.0, 500.0);
        builder.quad_to(200.0, 0.0, 300.0, 100.0);
        builder.close();
        assert_eq!(out, "M10,20L11,15Q12,20 13,19Z");
    }

    #[test]
    fn test_empty_book_has_no_font() {
        let book = FontBook::new();
        let style = ComputedStyle::inherit(&plume_style::InheritedStyle::root(10.0, 10.0));
        assert!(book.get_font(&style).is_err());
        assert!(book.is_empty());
        assert_eq!(book.measure(FontHandle(0), "abc", &style), 0.0);
        assert_eq!(book.glyph_path(FontHandle(0), "abc", 0.0, 0.0, &style), "");
        assert!(!book.covers(FontHandle(0), 'a'));
    }

    #[test]
    fn test_faces_are_parsed_once_per_call() {
        let book = FontBook::new();
        if book.load_system_font("sans-serif").is_none() {
            return;
        }
        let faces = book.faces.borrow();
        let mut parsed = ParsedFaces::new(&faces);
        assert_eq!(parsed.parsed_count(), 0);
        for _ in 0..3 {
            assert!(parsed.get(0).is_some());
        }
        assert_eq!(parsed.parsed_count(), 1);
        assert!(parsed.get(1).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let book = FontBook::new();
        let err = book
            .add_font(FontDescriptor::regular("Broken"), vec![0, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, FontError::Face { ref family, .. } if family == "Broken"));
        assert!(book.is_empty());
    }
}
