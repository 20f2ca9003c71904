//! Integration tests for style resolution.

use plume_layout::{
    AlignItems, BoxDisplay, BoxLayout, Dimension, Edges, FlexDirection, FlexTree, JustifyContent,
    Position,
};
use plume_style::{
    BackgroundClip, BorderStyle, ComputedStyle, Corners, DeclaredStyle, DefaultStyleResolver,
    InheritedStyle, NodeProps, Overflow, StyleError, StyleResolver, TextAlign, TextTransform,
    WordBreak,
};
use serde_json::json;

/// Helper: resolve `declared` on a fresh node under the given inherited style.
fn resolve_with(
    inherited: &InheritedStyle,
    declared: &DeclaredStyle,
) -> (FlexTree, ComputedStyle, InheritedStyle) {
    let mut tree = FlexTree::new();
    let node = tree.create_node();
    let (computed, inheritable) = DefaultStyleResolver
        .resolve(&mut tree, node, "div", inherited, declared, &NodeProps::default())
        .unwrap();
    (tree, computed, inheritable)
}

fn resolve(declared: &DeclaredStyle) -> (FlexTree, ComputedStyle, InheritedStyle) {
    resolve_with(&InheritedStyle::root(800.0, 600.0), declared)
}

fn style(value: serde_json::Value) -> DeclaredStyle {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_box_properties_reach_layout_node() {
    let (tree, _, _) = resolve(&style(json!({
        "display": "flex",
        "flexDirection": "column",
        "justifyContent": "space-between",
        "alignItems": "center",
        "width": 200,
        "height": "50%",
        "position": "absolute",
        "top": "10px",
    })));
    let box_style = tree.style(plume_layout::NodeId(0));
    assert_eq!(box_style.display, BoxDisplay::Flex);
    assert_eq!(box_style.flex_direction, FlexDirection::Column);
    assert_eq!(box_style.justify_content, JustifyContent::SpaceBetween);
    assert_eq!(box_style.align_items, AlignItems::Center);
    assert_eq!(box_style.width, Dimension::Points(200.0));
    assert_eq!(box_style.height, Dimension::Percent(50.0));
    assert_eq!(box_style.position, Position::Absolute);
    assert_eq!(box_style.inset.top, Dimension::Points(10.0));
}

#[test]
fn test_margin_shorthand_then_longhand() {
    let (tree, _, _) = resolve(&style(json!({
        "margin": "4px 8px",
        "marginLeft": 1,
    })));
    let margin = tree.style(plume_layout::NodeId(0)).margin;
    assert_eq!(
        margin,
        Edges {
            top: 4.0,
            right: 8.0,
            bottom: 4.0,
            left: 1.0
        }
    );
}

#[test]
fn test_em_units_follow_font_size() {
    let (tree, computed, _) = resolve(&style(json!({
        "fontSize": "2em",
        "padding": "1em",
    })));
    assert_eq!(computed.font_size, 32.0);
    assert_eq!(computed.padding, Edges::all(32.0));
    assert_eq!(tree.style(plume_layout::NodeId(0)).padding, Edges::all(32.0));
}

#[test]
fn test_flex_shorthand() {
    let (tree, _, _) = resolve(&style(json!({ "flex": 1 })));
    let box_style = tree.style(plume_layout::NodeId(0));
    assert_eq!(box_style.flex_grow, 1.0);
    assert_eq!(box_style.flex_shrink, 1.0);
    assert_eq!(box_style.flex_basis, Dimension::Points(0.0));

    let (tree, _, _) = resolve(&style(json!({ "flex": "2 0 30px" })));
    let box_style = tree.style(plume_layout::NodeId(0));
    assert_eq!(box_style.flex_grow, 2.0);
    assert_eq!(box_style.flex_shrink, 0.0);
    assert_eq!(box_style.flex_basis, Dimension::Points(30.0));
}

#[test]
fn test_border_shorthand_sets_layout_border() {
    let (tree, computed, _) = resolve(&style(json!({ "border": "2px dashed red" })));
    assert_eq!(computed.border_style, BorderStyle::Dashed);
    assert_eq!(computed.used_border_color(), "red");
    assert_eq!(tree.style(plume_layout::NodeId(0)).border, Edges::all(2.0));
}

#[test]
fn test_border_width_alone_is_solid() {
    let (_, computed, _) = resolve(&style(json!({ "borderWidth": 3 })));
    assert_eq!(computed.border_style, BorderStyle::Solid);
    assert!(computed.has_border());
}

#[test]
fn test_border_style_none_zeroes_width() {
    let (tree, computed, _) = resolve(&style(json!({ "borderWidth": 3, "borderStyle": "none" })));
    assert!(!computed.has_border());
    assert_eq!(tree.style(plume_layout::NodeId(0)).border, Edges::default());
}

#[test]
fn test_border_radius_expansion() {
    let (_, computed, _) = resolve(&style(json!({ "borderRadius": "1px 2px 3px" })));
    assert_eq!(
        computed.border_radius,
        Corners {
            top_left: 1.0,
            top_right: 2.0,
            bottom_right: 3.0,
            bottom_left: 2.0
        }
    );
}

#[test]
fn test_inherited_text_properties() {
    let (_, _, inheritable) = resolve(&style(json!({
        "color": "red",
        "textAlign": "justify",
        "textTransform": "capitalize",
        "wordBreak": "break-all",
        "fontFamily": "'Inter', sans-serif",
    })));
    let (_, child, _) = resolve_with(&inheritable, &DeclaredStyle::new());
    assert_eq!(child.color, "red");
    assert_eq!(child.text_align, TextAlign::Justify);
    assert_eq!(child.text_transform, TextTransform::Capitalize);
    assert_eq!(child.word_break, WordBreak::BreakAll);
    assert_eq!(child.font_family, vec!["Inter".to_string(), "sans-serif".to_string()]);
}

#[test]
fn test_non_inherited_properties_reset() {
    let (_, _, inheritable) = resolve(&style(json!({
        "backgroundColor": "blue",
        "overflow": "hidden",
        "boxShadow": "1px 1px red",
    })));
    let (_, child, _) = resolve_with(&inheritable, &DeclaredStyle::new());
    assert_eq!(child.background_color, None);
    assert_eq!(child.overflow, Overflow::Visible);
    assert!(child.box_shadow.is_empty());
}

#[test]
fn test_opacity_multiplies_down_the_tree() {
    let (_, parent, inheritable) = resolve(&style(json!({ "opacity": 0.5 })));
    assert_eq!(parent.opacity, 0.5);
    let (_, child, _) = resolve_with(&inheritable, &style(json!({ "opacity": 0.5 })));
    assert_eq!(child.opacity, 0.25);
}

#[test]
fn test_transform_is_inherited_unless_declared() {
    let (_, parent, inheritable) = resolve(&style(json!({ "transform": "rotate(45deg)" })));
    assert!(parent.transform.is_some());
    assert!(parent.transform_declared);

    let (_, same, _) = resolve_with(&inheritable, &DeclaredStyle::new());
    assert_eq!(same.transform, inheritable.transform);
    assert!(!same.transform_declared);

    let (_, own, _) = resolve_with(&inheritable, &style(json!({ "transform": "scale(2)" })));
    assert_ne!(own.transform, inheritable.transform);

    let (_, repeated, _) = resolve_with(&inheritable, &style(json!({ "transform": "rotate(45deg)" })));
    assert_eq!(repeated.transform, inheritable.transform);
    assert!(repeated.transform_declared);
}

#[test]
fn test_text_shadow_trio() {
    let (_, computed, _) = resolve(&style(json!({
        "textShadowOffset": { "width": 2, "height": 3 },
        "textShadowColor": "red",
    })));
    let shadow = computed.text_shadow.unwrap();
    assert_eq!(shadow.offset, Some((2.0, 3.0)));
    assert_eq!(shadow.radius, None);
    assert!(!shadow.is_complete());
}

#[test]
fn test_background_clip_text() {
    let (_, computed, _) = resolve(&style(json!({ "backgroundClip": "text" })));
    assert_eq!(computed.background_clip, BackgroundClip::Text);
}

#[test]
fn test_unknown_property_is_ignored() {
    let (_, computed, _) = resolve(&style(json!({ "fancyGlow": "yes", "color": "green" })));
    assert_eq!(computed.color, "green");
}

#[test]
fn test_invalid_transform_is_error() {
    let mut tree = FlexTree::new();
    let node = tree.create_node();
    let result = DefaultStyleResolver.resolve(
        &mut tree,
        node,
        "div",
        &InheritedStyle::root(100.0, 100.0),
        &style(json!({ "transform": "warp(3)" })),
        &NodeProps::default(),
    );
    assert!(matches!(result, Err(StyleError::InvalidTransform { .. })));
}

#[test]
fn test_img_props_size_the_box() {
    let mut tree = FlexTree::new();
    let node = tree.create_node();
    let props = NodeProps {
        src: Some("a.png".to_string()),
        width: Some(64.0),
        height: Some(32.0),
    };
    let _ = DefaultStyleResolver
        .resolve(
            &mut tree,
            node,
            "img",
            &InheritedStyle::root(100.0, 100.0),
            &DeclaredStyle::new(),
            &props,
        )
        .unwrap();
    assert_eq!(tree.style(node).width, Dimension::Points(64.0));
    assert_eq!(tree.style(node).height, Dimension::Points(32.0));
}

#[test]
fn test_display_none() {
    let (tree, _, _) = resolve(&style(json!({ "display": "none" })));
    assert_eq!(tree.style(plume_layout::NodeId(0)).display, BoxDisplay::None);
}
