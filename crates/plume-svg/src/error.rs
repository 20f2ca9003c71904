//! Pipeline errors.

use plume_render::RenderError;
use thiserror::Error;

/// A font could not be loaded or chosen.
#[derive(Debug, Error)]
pub enum FontError {
    /// ttf-parser rejected the font data.
    #[error("font `{family}` could not be parsed: {source}")]
    Face {
        /// Family the data was registered under.
        family: String,
        /// The parser's reason.
        #[source]
        source: ttf_parser::FaceParsingError,
    },

    /// fontdue rejected the font data.
    #[error("font `{family}` could not be loaded: {reason}")]
    Parse {
        /// Family the data was registered under.
        family: String,
        /// fontdue's reason.
        reason: &'static str,
    },

    /// Text needs a font and none has been loaded.
    #[error("no fonts are loaded; add at least one font before rendering text")]
    NoFonts,
}

/// A failure that stops a document from rendering.
#[derive(Debug, Error)]
pub enum SvgError {
    /// Layout or painting failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A font supplied for missing glyphs could not be loaded.
    #[error(transparent)]
    Font(#[from] FontError),

    /// The document size is not a positive, finite number of pixels.
    #[error("invalid document size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}
