//! Render options.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Document size and rendering switches.
///
/// Deserializes from camelCase JSON; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Document width in pixels.
    pub width: f32,
    /// Document height in pixels.
    pub height: f32,
    /// Draw text as glyph outlines instead of `<text>` elements.
    pub embed_font: bool,
    /// Outline every box and text segment.
    pub debug: bool,
    /// Report text the loaded fonts cannot draw so more fonts can be loaded
    /// before layout.
    pub can_load_additional_assets: bool,
    /// Image sources that replace whole grapheme clusters (emoji).
    pub grapheme_images: HashMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 630.0,
            embed_font: true,
            debug: false,
            can_load_additional_assets: false,
            grapheme_images: HashMap::new(),
        }
    }
}
