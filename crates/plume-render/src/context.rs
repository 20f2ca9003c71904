//! Per-render environment and per-node layout context.
//!
//! Every node receives an identifier path built by appending its zero-based
//! child index to its parent's path (the root is `"0"`). Generated
//! definition ids are namespaced by that path, so two nodes can never emit
//! the same clip path, filter or mask id.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use plume_layout::NodeId;
use plume_style::{ComputedStyle, InheritedStyle, StyleResolver};

use crate::font::FontResolver;

/// Prefix for every generated definition id, so fragments from several
/// renders can share one document.
pub const ID_PREFIX: &str = "plume_";

/// Collaborators and flags shared by the whole render.
pub struct RenderEnv {
    /// Font lookup, measurement and outlining.
    pub fonts: Rc<dyn FontResolver>,
    /// Declared-to-computed style resolution.
    pub styles: Rc<dyn StyleResolver>,
    /// Emit glyph outlines instead of `<text>` runs.
    pub embed_font: bool,
    /// Outline every box and text segment.
    pub debug: bool,
    /// Report text segments the loaded fonts do not cover.
    pub can_load_additional_assets: bool,
    /// Segments painted as images instead of glyphs, keyed by the segment text.
    pub grapheme_images: HashMap<String, String>,
}

impl RenderEnv {
    /// An environment with every flag off and no grapheme images.
    #[must_use]
    pub fn new(fonts: Rc<dyn FontResolver>, styles: Rc<dyn StyleResolver>) -> Self {
        Self {
            fonts,
            styles,
            embed_font: false,
            debug: false,
            can_load_additional_assets: false,
            grapheme_images: HashMap::new(),
        }
    }
}

impl fmt::Debug for RenderEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEnv")
            .field("embed_font", &self.embed_font)
            .field("debug", &self.debug)
            .field("can_load_additional_assets", &self.can_load_additional_assets)
            .field("grapheme_images", &self.grapheme_images.len())
            .finish_non_exhaustive()
    }
}

/// What a node needs to know about where it sits in the tree.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Identifier path of this node.
    pub id: &'a str,
    /// Computed style of the parent element.
    pub parent_style: &'a ComputedStyle,
    /// Values and directives inherited from the parent.
    pub inherited: &'a InheritedStyle,
    /// The parent's layout node; this node is appended to it.
    pub parent: NodeId,
    /// Shared collaborators and flags.
    pub env: &'a RenderEnv,
}

impl<'a> LayoutContext<'a> {
    /// Context for a child of the node described by `self`.
    #[must_use]
    pub const fn child<'b>(
        &self,
        id: &'b str,
        parent_style: &'b ComputedStyle,
        inherited: &'b InheritedStyle,
        parent: NodeId,
    ) -> LayoutContext<'b>
    where
        'a: 'b,
    {
        LayoutContext {
            id,
            parent_style,
            inherited,
            parent,
            env: self.env,
        }
    }
}

/// The identifier path of child `index` under `parent`.
#[must_use]
pub fn child_id(parent: &str, index: usize) -> String {
    format!("{parent}-{index}")
}

/// Id of the clip path established by an `overflow: hidden` node.
#[must_use]
pub fn clip_path_id(id: &str) -> String {
    format!("{ID_PREFIX}cp-{id}")
}

/// Id of the clip path collecting descendant text for `background-clip: text`.
#[must_use]
pub fn clip_text_id(id: &str) -> String {
    format!("{ID_PREFIX}bct-{id}")
}

/// Id of a shadow filter. `suffix` distinguishes several filters on one node.
#[must_use]
pub fn shadow_id(id: &str, suffix: usize) -> String {
    format!("{ID_PREFIX}s-{id}-{suffix}")
}

/// Id of the visibility mask paired with [`shadow_id`].
#[must_use]
pub fn shadow_mask_id(id: &str, suffix: usize) -> String {
    format!("{ID_PREFIX}ms-{id}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_namespaced_by_path() {
        let path = child_id(&child_id("0", 2), 0);
        assert_eq!(path, "0-2-0");
        assert_eq!(clip_path_id(&path), "plume_cp-0-2-0");
        assert_eq!(clip_text_id(&path), "plume_bct-0-2-0");
        assert_eq!(shadow_id(&path, 1), "plume_s-0-2-0-1");
        assert_eq!(shadow_mask_id(&path, 1), "plume_ms-0-2-0-1");
    }
}
