//! Integration tests for the two-pass tree layout.

mod common;

use std::collections::HashSet;
use std::rc::Rc;

use common::{element, env, render, try_render};
use plume_render::{Component, Element, RenderError, StyledNode};
use serde_json::json;

#[derive(Debug)]
struct Badge {
    color: &'static str,
    stateful: bool,
}

impl Component for Badge {
    fn name(&self) -> &str {
        "Badge"
    }

    fn render(&self) -> Element {
        element(json!({
            "type": "div",
            "props": { "style": { "width": 10, "height": 10, "backgroundColor": self.color } }
        }))
    }

    fn is_stateful(&self) -> bool {
        self.stateful
    }
}

fn ids(markup: &str) -> Vec<&str> {
    markup
        .split(" id=\"")
        .skip(1)
        .map(|rest| &rest[..rest.find('"').unwrap()])
        .collect()
}

#[test]
fn test_null_element_renders_nothing() {
    let (markup, missing, nodes) = try_render(&Element::Empty, 100.0, 100.0, &env()).unwrap();
    assert_eq!(markup, "");
    assert!(missing.is_empty());
    assert_eq!(nodes, 1);
}

#[test]
fn test_stateful_component_is_rejected() {
    let badge = Element::Component(Rc::new(Badge {
        color: "red",
        stateful: true,
    }));
    let tree: Element = StyledNode::new("div").with_child(badge).into();
    let err = try_render(&tree, 100.0, 100.0, &env()).unwrap_err();
    assert!(matches!(err, RenderError::StatefulComponent { ref name } if name == "Badge"));
}

#[test]
fn test_pure_component_is_expanded() {
    let badge = Element::Component(Rc::new(Badge {
        color: "red",
        stateful: false,
    }));
    let markup = render(&badge, 100.0, 100.0);
    assert_eq!(markup, r#"<rect x="0" y="0" width="10" height="10" fill="red"/>"#);
}

#[test]
fn test_generated_ids_are_unique() {
    let leaf = json!({
        "type": "div",
        "props": { "style": { "width": 10, "height": 10, "overflow": "hidden", "boxShadow": "1px 1px 2px #000" } }
    });
    let branch = json!({
        "type": "div",
        "props": {
            "style": { "overflow": "hidden", "boxShadow": "1px 1px 2px #000" },
            "children": [leaf.clone(), null, leaf]
        }
    });
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "overflow": "hidden", "boxShadow": "0 0 4px red, 2px 2px 0 blue" },
            "children": [branch.clone(), branch]
        }
    }));

    let markup = render(&tree, 200.0, 200.0);
    let all = ids(&markup);
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len(), "{all:?}");
    // The empty child still takes up an index in its parent's path.
    assert!(unique.contains("plume_cp-0-1-2"));
    assert!(!unique.contains("plume_cp-0-1-1"));
    assert!(unique.contains("plume_s-0-1"));
    assert!(unique.contains("plume_ms-0-0-0-0"));
}

#[test]
fn test_overflow_hidden_clips_descendants() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "width": 50, "height": 50, "overflow": "hidden" },
            "children": [{
                "type": "div",
                "props": { "style": { "width": 100, "height": 100, "flexShrink": 0, "backgroundColor": "blue" } }
            }]
        }
    }));
    let markup = render(&tree, 200.0, 200.0);
    assert!(markup.starts_with(
        r#"<defs><clipPath id="plume_cp-0"><rect x="0" y="0" width="50" height="50"/></clipPath></defs>"#
    ));
    assert!(markup.contains(r#"<rect x="0" y="0" width="100" height="100" fill="blue" clip-path="url(#plume_cp-0)"/>"#));
}

#[test]
fn test_overflow_hidden_clips_text() {
    let tree = element(json!({
        "type": "div",
        "props": { "style": { "width": 50, "height": 20, "overflow": "hidden", "fontSize": 10 }, "children": "hi" }
    }));
    let markup = render(&tree, 200.0, 200.0);
    let text = &markup[markup.find("<text").unwrap()..];
    assert!(text.contains(r#"clip-path="url(#plume_cp-0)""#), "{markup}");
}

#[test]
fn test_background_clip_text_collects_glyphs() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "backgroundClip": "text", "backgroundColor": "red", "fontSize": 10 },
            "children": [{ "type": "span", "props": { "children": "hi" } }]
        }
    }));
    let markup = render(&tree, 200.0, 200.0);

    let clip = markup.find(r#"<clipPath id="plume_bct-0"><text"#).unwrap();
    let background = markup.find(r#"clip-path="url(#plume_bct-0)""#).unwrap();
    assert!(clip < background, "{markup}");
    assert_eq!(markup.matches("<clipPath id=\"plume_bct-").count(), 1);
    // The text itself is still painted outside the clip path.
    assert_eq!(markup.matches(">hi</text>").count(), 2);
}

#[test]
fn test_transform_frame_applies_to_subtree() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "width": 20, "height": 20, "backgroundColor": "red", "transform": "translate(10px,5px)" },
            "children": [{
                "type": "div",
                "props": { "style": { "width": 5, "height": 5, "backgroundColor": "blue" } }
            }]
        }
    }));
    let markup = render(&tree, 100.0, 100.0);
    assert_eq!(markup.matches(r#"transform="matrix(1,0,0,1,10,5)""#).count(), 2, "{markup}");
}

#[test]
fn test_repeated_transform_composes_with_parent() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "width": 20, "height": 20, "backgroundColor": "red", "transform": "translate(10px,5px)" },
            "children": [{
                "type": "div",
                "props": {
                    "style": { "width": 5, "height": 5, "backgroundColor": "blue", "transform": "translate(10px,5px)" }
                }
            }]
        }
    }));
    let markup = render(&tree, 100.0, 100.0);
    assert!(markup.contains(r#"fill="red" transform="matrix(1,0,0,1,10,5)""#), "{markup}");
    assert!(markup.contains(r#"fill="blue" transform="matrix(1,0,0,1,20,10)""#), "{markup}");
}

#[test]
fn test_display_none_paints_nothing() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "children": [
                { "type": "div", "props": { "style": { "display": "none", "width": 10, "height": 10, "backgroundColor": "red" }, "children": "gone" } },
                { "type": "div", "props": { "style": { "width": 10, "height": 10, "backgroundColor": "blue" } } }
            ]
        }
    }));
    let markup = render(&tree, 100.0, 100.0);
    assert!(!markup.contains("red"));
    assert!(!markup.contains("gone"));
    assert!(markup.contains(r#"<rect x="0" y="0" width="10" height="10" fill="blue"/>"#));
}

#[test]
fn test_absolute_child_is_placed_by_insets() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "width": 100, "height": 100 },
            "children": [{
                "type": "div",
                "props": {
                    "style": { "position": "absolute", "left": 10, "top": 20, "width": 30, "height": 40, "backgroundColor": "red" }
                }
            }]
        }
    }));
    let markup = render(&tree, 200.0, 200.0);
    assert_eq!(markup, r#"<rect x="10" y="20" width="30" height="40" fill="red"/>"#);
}

#[test]
fn test_padding_offsets_children() {
    let tree = element(json!({
        "type": "div",
        "props": {
            "style": { "padding": 8 },
            "children": [{
                "type": "div",
                "props": { "style": { "width": 4, "height": 4, "backgroundColor": "red" } }
            }]
        }
    }));
    let markup = render(&tree, 100.0, 100.0);
    assert_eq!(markup, r#"<rect x="8" y="8" width="4" height="4" fill="red"/>"#);
}

#[test]
fn test_image_is_drawn_in_content_box() {
    let tree = element(json!({
        "type": "img",
        "props": {
            "src": "data:image/png;base64,AA",
            "width": 40,
            "height": 20,
            "style": { "padding": 2, "objectFit": "cover" }
        }
    }));
    let markup = render(&tree, 100.0, 100.0);
    assert!(
        markup.contains(
            r#"<image href="data:image/png;base64,AA" x="2" y="2" width="36" height="16" preserveAspectRatio="xMidYMid slice"/>"#
        ),
        "{markup}"
    );
}
