//! The input element tree.
//!
//! Trees are built programmatically or decoded from JSON in the shape
//! `{"type": "div", "props": {"style": {...}, "children": [...]}}`. Strings
//! and numbers become text, `null` and booleans render nothing, and nested
//! child arrays are flattened.

use std::fmt;
use std::rc::Rc;

use plume_style::{DeclaredStyle, NodeProps};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::RenderError;

/// A function component, evaluated during layout.
///
/// Only pure components are supported: [`Component::render`] must depend on
/// nothing but the component's own props.
pub trait Component: fmt::Debug {
    /// Display name used in diagnostics.
    fn name(&self) -> &str;

    /// Produce the element this component renders to.
    fn render(&self) -> Element;

    /// Whether the component carries state or lifecycle hooks.
    fn is_stateful(&self) -> bool {
        false
    }
}

/// One node of the input tree.
#[derive(Debug, Clone, Default)]
pub enum Element {
    /// Renders nothing (`null`, `undefined`, booleans).
    #[default]
    Empty,
    /// A literal text run.
    Text(String),
    /// A styled box or image.
    Node(StyledNode),
    /// A function component.
    Component(Rc<dyn Component>),
}

/// Whether a node paints as a box or as an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Any non-image element.
    Box,
    /// An `img` element.
    Image,
}

/// A styled element with its children.
#[derive(Debug, Clone)]
pub struct StyledNode {
    /// Box or image.
    pub kind: NodeKind,
    /// The element's tag name, kept for diagnostics.
    pub tag: String,
    /// Declared style.
    pub style: DeclaredStyle,
    /// Children in document order.
    pub children: Vec<Element>,
    /// Non-style attributes (`src`, `width`, `height`).
    pub props: NodeProps,
}

impl StyledNode {
    /// A new element with the given tag and no style or children.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            kind: if tag == "img" {
                NodeKind::Image
            } else {
                NodeKind::Box
            },
            tag: tag.to_string(),
            style: DeclaredStyle::new(),
            children: Vec::new(),
            props: NodeProps::default(),
        }
    }

    /// Replace the declared style.
    #[must_use]
    pub fn with_style(mut self, style: DeclaredStyle) -> Self {
        self.style = style;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Set the non-style attributes.
    #[must_use]
    pub fn with_props(mut self, props: NodeProps) -> Self {
        self.props = props;
        self
    }
}

impl From<StyledNode> for Element {
    fn from(node: StyledNode) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Element {
    /// Decode an element from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidElement`] for objects without a string
    /// `type`, or with a malformed `style` or `props`.
    pub fn from_value(value: Value) -> Result<Self, RenderError> {
        match value {
            Value::Null | Value::Bool(_) => Ok(Self::Empty),
            Value::String(text) => Ok(Self::Text(text)),
            Value::Number(n) => Ok(Self::Text(n.to_string())),
            // A bare array is a fragment: wrap it so it still lays out as one subtree.
            Value::Array(items) => {
                let mut node = StyledNode::new("fragment");
                node.children = flatten_children(Value::Array(items))?;
                Ok(Self::Node(node))
            }
            Value::Object(object) => element_from_object(object).map(Self::Node),
        }
    }
}

fn element_from_object(mut object: Map<String, Value>) -> Result<StyledNode, RenderError> {
    let tag = match object.remove("type") {
        Some(Value::String(tag)) => tag,
        other => {
            return Err(RenderError::InvalidElement(format!(
                "expected a string `type`, found {}",
                other.unwrap_or(Value::Null)
            )));
        }
    };
    let mut props = match object.remove("props") {
        Some(Value::Object(props)) => props,
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            return Err(RenderError::InvalidElement(format!(
                "<{tag}> props must be an object, found {other}"
            )));
        }
    };

    let style = match props.remove("style") {
        Some(style) => serde_json::from_value::<DeclaredStyle>(style)
            .map_err(|e| RenderError::InvalidElement(format!("<{tag}> style: {e}")))?,
        None => DeclaredStyle::new(),
    };
    let children = props
        .remove("children")
        .map(flatten_children)
        .transpose()?
        .unwrap_or_default();
    let attrs = serde_json::from_value::<NodeProps>(Value::Object(props))
        .map_err(|e| RenderError::InvalidElement(format!("<{tag}> props: {e}")))?;

    Ok(StyledNode::new(&tag)
        .with_style(style)
        .with_props(attrs)
        .with_children(children))
}

/// `children` may be a single element or arbitrarily nested arrays.
fn flatten_children(value: Value) -> Result<Vec<Element>, RenderError> {
    let mut out = Vec::new();
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            Value::Array(items) => stack.extend(items.into_iter().rev()),
            other => out.push(Element::from_value(other)?),
        }
    }
    Ok(out)
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_nested_children_are_flattened() {
        let element: Element = serde_json::from_value(json!({
            "type": "div",
            "props": {
                "style": { "color": "red" },
                "children": ["a", ["b", null, ["c"]], 3]
            }
        }))
        .unwrap();
        let Element::Node(node) = element else {
            panic!("expected a node");
        };
        assert_eq!(node.children.len(), 5);
        assert!(matches!(&node.children[0], Element::Text(t) if t == "a"));
        assert!(matches!(&node.children[2], Element::Empty));
        assert!(matches!(&node.children[4], Element::Text(t) if t == "3"));
    }

    #[test]
    fn test_img_kind_and_props() {
        let element = Element::from_value(json!({
            "type": "img",
            "props": { "src": "logo.png", "width": 10, "height": 20 }
        }))
        .unwrap();
        let Element::Node(node) = element else {
            panic!("expected a node");
        };
        assert_eq!(node.kind, NodeKind::Image);
        assert_eq!(node.props.src.as_deref(), Some("logo.png"));
        assert_eq!(node.props.width, Some(10.0));
    }

    #[test]
    fn test_missing_type_is_error() {
        assert!(Element::from_value(json!({ "props": {} })).is_err());
    }
}
