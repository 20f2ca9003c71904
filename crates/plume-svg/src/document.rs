//! The two-phase render driver and the outer `<svg>` document.
//!
//! [SVG 1.1 § 5.1.2 The 'svg' element](https://www.w3.org/TR/SVG11/struct.html#SVGElement)

use std::rc::Rc;

use plume_common::{XmlElement, fmt_num};
use plume_layout::{Available, BoxLayout, Dimension, FlexTree};
use plume_render::{Element, FontResolver, LayoutContext, RenderEnv, plan};
use plume_style::{ComputedStyle, DefaultStyleResolver, InheritedStyle};

use crate::error::SvgError;
use crate::fonts::{FontBook, FontDescriptor};
use crate::options::RenderOptions;

/// The SVG namespace.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Render `element` to a complete SVG document.
///
/// # Errors
///
/// Returns [`SvgError`] for an invalid document size or when layout fails.
pub fn render(element: &Element, fonts: &Rc<FontBook>, options: &RenderOptions) -> Result<String, SvgError> {
    render_with_loader(element, fonts, options, |_| Vec::new())
}

/// Render `element`, asking `loader` for fonts covering the text the
/// loaded fonts cannot draw.
///
/// `loader` runs at most once, and only when
/// [`RenderOptions::can_load_additional_assets`] is set. With an empty book
/// it runs before the first pass and receives every text run; otherwise it
/// runs between the passes and receives the uncovered segments. Both lists
/// are in document order.
///
/// # Errors
///
/// Returns [`SvgError`] for an invalid document size, a font the loader
/// returned that cannot be parsed, or a layout failure.
pub fn render_with_loader<F>(
    element: &Element,
    fonts: &Rc<FontBook>,
    options: &RenderOptions,
    loader: F,
) -> Result<String, SvgError>
where
    F: FnOnce(&[String]) -> Vec<(FontDescriptor, Vec<u8>)>,
{
    let (width, height) = (options.width, options.height);
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(SvgError::InvalidSize { width, height });
    }

    let mut loader = Some(loader);
    if options.can_load_additional_assets && fonts.is_empty() {
        let mut runs = Vec::new();
        collect_text(element, &mut runs);
        if !runs.is_empty()
            && let Some(load) = loader.take()
        {
            log::debug!("no fonts loaded; requesting fonts for {} text run(s)", runs.len());
            add_fonts(fonts, load(&runs))?;
        }
    }

    let resolver: Rc<dyn FontResolver> = Rc::<FontBook>::clone(fonts);
    let mut env = RenderEnv::new(resolver, Rc::new(DefaultStyleResolver));
    env.embed_font = options.embed_font;
    env.debug = options.debug;
    env.can_load_additional_assets = options.can_load_additional_assets;
    env.grapheme_images.clone_from(&options.grapheme_images);

    let mut tree = FlexTree::new();
    let root = tree.create_node();
    {
        let style = tree.style_mut(root);
        style.width = Dimension::Points(width);
        style.height = Dimension::Points(height);
    }

    let inherited = InheritedStyle::root(width, height);
    let root_style = ComputedStyle::inherit(&inherited);
    let ctx = LayoutContext {
        id: "0",
        parent_style: &root_style,
        inherited: &inherited,
        parent: root,
        env: &env,
    };
    let planned = plan(element, &ctx, &mut tree)?;

    let missing = planned.missing_fonts();
    if !missing.is_empty()
        && let Some(load) = loader.take()
    {
        log::debug!("{} segment(s) need more fonts", missing.len());
        add_fonts(fonts, load(missing))?;
    }

    tree.compute_layout(root, Available::definite(width, height));
    let content = planned.paint((0.0, 0.0), &mut tree, &env);
    log::debug!("rendered {width}x{height} document over {} layout nodes", tree.len());
    Ok(wrap_document(width, height, &content))
}

fn add_fonts(fonts: &FontBook, loaded: Vec<(FontDescriptor, Vec<u8>)>) -> Result<(), SvgError> {
    for (descriptor, data) in loaded {
        let _ = fonts.add_font(descriptor, data)?;
    }
    Ok(())
}

/// Every non-empty text run under `element`, expanding pure components.
fn collect_text(element: &Element, runs: &mut Vec<String>) {
    match element {
        Element::Empty => {}
        Element::Text(text) => {
            if !text.is_empty() {
                runs.push(text.clone());
            }
        }
        Element::Node(node) => {
            for child in &node.children {
                collect_text(child, runs);
            }
        }
        Element::Component(component) => {
            if !component.is_stateful() {
                collect_text(&component.render(), runs);
            }
        }
    }
}

/// Wrap painted markup in the outer `<svg>` element.
#[must_use]
pub fn wrap_document(width: f32, height: f32, content: &str) -> String {
    XmlElement::new("svg")
        .num("width", width)
        .num("height", height)
        .attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
        .attr("xmlns", SVG_NAMESPACE)
        .child(content)
        .build()
}
