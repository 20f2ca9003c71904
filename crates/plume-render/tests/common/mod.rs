//! Shared fixtures: a fixed-advance font and a one-call render helper.

#![allow(dead_code)]

use std::rc::Rc;

use plume_layout::{Available, BoxLayout, Dimension, FlexTree};
use plume_render::{
    Element, FontHandle, FontMetrics, FontResolver, LayoutContext, RenderEnv, RenderError, plan,
};
use plume_style::{ComputedStyle, DefaultStyleResolver, InheritedStyle};

/// Every character advances half the font size. Only ASCII is covered.
#[derive(Debug, Default)]
pub struct FixedFont;

impl FontResolver for FixedFont {
    fn get_font(&self, _style: &ComputedStyle) -> Result<FontHandle, RenderError> {
        Ok(FontHandle(0))
    }

    fn metrics(&self, _font: FontHandle) -> FontMetrics {
        FontMetrics {
            ascender: 800.0,
            descender: -200.0,
            units_per_em: 1000.0,
        }
    }

    fn measure(&self, _font: FontHandle, text: &str, style: &ComputedStyle) -> f32 {
        text.chars()
            .map(|_| style.font_size / 2.0 + style.letter_spacing)
            .sum()
    }

    fn glyph_path(
        &self,
        font: FontHandle,
        text: &str,
        left: f32,
        top: f32,
        style: &ComputedStyle,
    ) -> String {
        format!("M{left},{top}h{}", self.measure(font, text, style))
    }

    fn covers(&self, _font: FontHandle, ch: char) -> bool {
        ch.is_ascii()
    }
}

pub fn env() -> RenderEnv {
    RenderEnv::new(Rc::new(FixedFont), Rc::new(DefaultStyleResolver))
}

/// Lay out and paint `element` in a `width × height` document.
pub fn render_with(element: &Element, width: f32, height: f32, env: &RenderEnv) -> String {
    try_render(element, width, height, env).unwrap().0
}

pub fn render(element: &Element, width: f32, height: f32) -> String {
    render_with(element, width, height, &env())
}

/// Render, returning the markup, the missing-font list and the number of
/// layout nodes allocated (including the document root).
pub fn try_render(
    element: &Element,
    width: f32,
    height: f32,
    env: &RenderEnv,
) -> Result<(String, Vec<String>, usize), RenderError> {
    let mut tree = FlexTree::new();
    let root = tree.create_node();
    tree.style_mut(root).width = Dimension::Points(width);
    tree.style_mut(root).height = Dimension::Points(height);

    let inherited = InheritedStyle::root(width, height);
    let root_style = ComputedStyle::inherit(&inherited);
    let ctx = LayoutContext {
        id: "0",
        parent_style: &root_style,
        inherited: &inherited,
        parent: root,
        env,
    };
    let plan = plan(element, &ctx, &mut tree)?;
    tree.compute_layout(root, Available::definite(width, height));
    let markup = plan.paint((0.0, 0.0), &mut tree, env);
    Ok((markup, plan.missing_fonts().to_vec(), tree.len()))
}

/// Parse an element from JSON.
pub fn element(value: serde_json::Value) -> Element {
    Element::from_value(value).unwrap()
}
