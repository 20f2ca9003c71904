//! Two-pass tree layout.
//!
//! [`plan`] is the first pass. It walks the element tree depth-first in
//! document order, creating one layout node per element (plus one text
//! container per text leaf), resolving styles and collecting the text
//! segments the loaded fonts cannot draw. The caller may then load more
//! fonts and must run the layout engine over the whole tree.
//!
//! [`Plan::paint`] is the second pass. It resolves absolute geometry top
//! down (a child's origin is its parent's absolute top-left) and paints
//! bottom up, returning one markup string.

use plume_common::XmlElement;
use plume_layout::{Available, BoxDisplay, BoxLayout, NodeId, Position};
use plume_style::{BackgroundClip, ComputedStyle, Overflow, Transform};

use crate::context::{LayoutContext, RenderEnv, child_id, clip_path_id, clip_text_id};
use crate::element::{Element, NodeKind};
use crate::error::RenderError;
use crate::painter::{BoxPaint, paint_image, paint_rect};
use crate::text::{TextPlan, finite_layout, plan_text};

/// The output of painting one subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Painted {
    /// Markup for the subtree.
    pub markup: String,
    /// Text geometry collected for the nearest `background-clip: text`
    /// ancestor, if any descendant produced some.
    pub clip_text: Option<String>,
}

/// The result of the first pass over a tree.
pub struct Plan {
    root: Planned,
    missing_fonts: Vec<String>,
}

enum Planned {
    Empty,
    Text(TextPlan),
    Node(NodePlan),
}

struct NodePlan {
    id: String,
    node: NodeId,
    kind: NodeKind,
    src: Option<String>,
    computed: ComputedStyle,
    /// Whether the node's transform differs from the one it inherited.
    establishes_frame: bool,
    /// Whether the node consumes its descendants' clip text.
    owns_clip_text: bool,
    children: Vec<Planned>,
}

/// First pass: allocate and insert layout nodes, resolve styles and
/// collect missing-font segments.
///
/// # Errors
///
/// Returns [`RenderError::StatefulComponent`] for a component with state,
/// and propagates style and font resolution failures.
pub fn plan(element: &Element, ctx: &LayoutContext<'_>, layout: &mut dyn BoxLayout) -> Result<Plan, RenderError> {
    let mut missing_fonts = Vec::new();
    let root = plan_element(element, ctx, layout, &mut missing_fonts)?;
    log::debug!(
        "planned tree {}: {} segment(s) missing a font",
        ctx.id,
        missing_fonts.len()
    );
    Ok(Plan { root, missing_fonts })
}

fn plan_element(
    element: &Element,
    ctx: &LayoutContext<'_>,
    layout: &mut dyn BoxLayout,
    missing_fonts: &mut Vec<String>,
) -> Result<Planned, RenderError> {
    let node = match element {
        Element::Empty => return Ok(Planned::Empty),
        Element::Text(content) => {
            return Ok(plan_text(content, ctx, layout, missing_fonts)?.map_or(Planned::Empty, Planned::Text));
        }
        Element::Component(component) => {
            if component.is_stateful() {
                return Err(RenderError::StatefulComponent {
                    name: component.name().to_string(),
                });
            }
            log::trace!("evaluating component {} at {}", component.name(), ctx.id);
            return plan_element(&component.render(), ctx, layout, missing_fonts);
        }
        Element::Node(node) => node,
    };

    let id = ctx.id.to_string();
    let layout_node = layout.create_node();
    let index = layout.child_count(ctx.parent);
    layout.insert_child(ctx.parent, layout_node, index);

    let (computed, mut inheritable) =
        ctx.env
            .styles
            .resolve(layout, layout_node, &node.tag, ctx.inherited, &node.style, &node.props)?;

    // A declared transform starts a new frame even when it equals the
    // parent's, so the two compose.
    let establishes_frame = computed.transform_declared;
    if computed.overflow == Overflow::Hidden {
        inheritable.inherited_clip_path_id = Some(clip_path_id(&id));
    }
    let owns_clip_text = computed.background_clip == BackgroundClip::Text;
    if owns_clip_text {
        inheritable.clip_text_active = true;
    }
    log::trace!("planned <{}> {id} as {layout_node:?}", node.tag);

    let mut children = Vec::with_capacity(node.children.len());
    for (i, child) in node.children.iter().enumerate() {
        let child_path = child_id(&id, i);
        let child_ctx = ctx.child(&child_path, &computed, &inheritable, layout_node);
        children.push(plan_element(child, &child_ctx, layout, missing_fonts)?);
    }

    Ok(Planned::Node(NodePlan {
        id,
        node: layout_node,
        kind: node.kind,
        src: node.props.src.clone(),
        computed,
        establishes_frame,
        owns_clip_text,
        children,
    }))
}

impl Plan {
    /// Text segments the loaded fonts cannot draw, in visitation order.
    ///
    /// Always empty unless the environment allows loading more assets.
    #[must_use]
    pub fn missing_fonts(&self) -> &[String] {
        &self.missing_fonts
    }

    /// Second pass: paint the tree with its root's parent at `origin`.
    ///
    /// The layout engine must already have computed the tree.
    pub fn paint(&self, origin: (f32, f32), layout: &mut dyn BoxLayout, env: &RenderEnv) -> String {
        let painted = self.root.paint(origin, &Transform::IDENTITY, layout, env);
        log::debug!("painted {} bytes of markup", painted.markup.len());
        painted.markup
    }
}

impl Planned {
    fn paint(&self, origin: (f32, f32), ambient: &Transform, layout: &mut dyn BoxLayout, env: &RenderEnv) -> Painted {
        match self {
            Self::Empty => Painted::default(),
            Self::Text(text) => {
                let frame = (!ambient.is_identity()).then_some(ambient);
                text.paint(origin, frame, layout, env)
            }
            Self::Node(node) => node.paint(origin, ambient, layout, env),
        }
    }
}

impl NodePlan {
    fn paint(&self, origin: (f32, f32), ambient: &Transform, layout: &mut dyn BoxLayout, env: &RenderEnv) -> Painted {
        let style = &self.computed;
        if style.display == BoxDisplay::None {
            return Painted::default();
        }

        if style.position == Position::Absolute {
            layout.compute_layout(self.node, Available::UNDEFINED);
        }
        let resolved = finite_layout(layout.layout(self.node));
        let left = origin.0 + resolved.left;
        let top = origin.1 + resolved.top;

        // [§ 8 The Transform Rendering Model](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
        //
        // "The transformation matrix is computed from the transform and
        // transform-origin properties": translate to the origin (the box
        // centre), apply the functions, translate back.
        let frame = match (&style.transform, self.establishes_frame) {
            (Some(list), true) => {
                let cx = left + resolved.width / 2.0;
                let cy = top + resolved.height / 2.0;
                let matrix = list.to_matrix(&style.length_context(), resolved.width, resolved.height);
                ambient
                    .then(&Transform::translate(cx, cy))
                    .then(&matrix)
                    .then(&Transform::translate(-cx, -cy))
            }
            _ => *ambient,
        };
        let transform = (!frame.is_identity()).then_some(&frame);

        let paint = BoxPaint {
            id: &self.id,
            left,
            top,
            width: resolved.width,
            height: resolved.height,
            style,
            transform,
            debug: env.debug,
        };
        let own = match self.kind {
            NodeKind::Image => paint_image(&paint, self.src.as_deref()),
            NodeKind::Box => paint_rect(&paint),
        };

        let mut children_markup = String::new();
        let mut clip_text = String::new();
        for child in &self.children {
            let painted = child.paint((left, top), &frame, layout, env);
            children_markup.push_str(&painted.markup);
            if let Some(text) = painted.clip_text {
                clip_text.push_str(&text);
            }
        }

        if self.owns_clip_text {
            let clip = XmlElement::new("clipPath")
                .attr("id", clip_text_id(&self.id))
                .attr_opt(
                    "clip-path",
                    style.inherited_clip_path_id.as_ref().map(|id| format!("url(#{id})")),
                )
                .child(&clip_text);
            return Painted {
                markup: clip.build() + &own + &children_markup,
                clip_text: None,
            };
        }

        Painted {
            markup: own + &children_markup,
            clip_text: (!clip_text.is_empty()).then_some(clip_text),
        }
    }
}
