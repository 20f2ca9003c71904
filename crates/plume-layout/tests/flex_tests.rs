//! Integration tests for the flex layout engine.

use std::cell::Cell;
use std::rc::Rc;

use plume_layout::{
    AlignItems, Available, BoxLayout, ComputedLayout, Dimension, Edges, FlexDirection, FlexTree,
    JustifyContent, NodeId, Position, Size,
};

/// Helper: a child with a fixed border-box size.
fn fixed(tree: &mut FlexTree, parent: NodeId, width: f32, height: f32) -> NodeId {
    let node = tree.create_node();
    let style = tree.style_mut(node);
    style.width = Dimension::Points(width);
    style.height = Dimension::Points(height);
    tree.append_child(parent, node);
    node
}

/// Helper: a root container with a definite size.
fn root(tree: &mut FlexTree, width: f32, height: f32) -> NodeId {
    let node = tree.create_node();
    let style = tree.style_mut(node);
    style.width = Dimension::Points(width);
    style.height = Dimension::Points(height);
    node
}

#[test]
fn test_row_places_children_side_by_side() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 300.0, 100.0);
    let a = fixed(&mut tree, r, 50.0, 20.0);
    let b = fixed(&mut tree, r, 70.0, 30.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(
        tree.layout(r),
        ComputedLayout {
            left: 0.0,
            top: 0.0,
            width: 300.0,
            height: 100.0
        }
    );
    assert_eq!(tree.layout(a).left, 0.0);
    assert_eq!(tree.layout(b).left, 50.0);
    assert_eq!(tree.layout(b).width, 70.0);
}

#[test]
fn test_auto_height_stretches_in_row() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 80.0);
    let child = tree.create_node();
    tree.style_mut(child).width = Dimension::Points(40.0);
    tree.append_child(r, child);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(child).height, 80.0);
}

#[test]
fn test_column_direction() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 100.0, 200.0);
    tree.style_mut(r).flex_direction = FlexDirection::Column;
    let a = fixed(&mut tree, r, 100.0, 30.0);
    let b = fixed(&mut tree, r, 100.0, 40.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).top, 0.0);
    assert_eq!(tree.layout(b).top, 30.0);
}

#[test]
fn test_flex_grow_distributes_free_space() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 300.0, 50.0);
    let a = fixed(&mut tree, r, 0.0, 10.0);
    let b = fixed(&mut tree, r, 0.0, 10.0);
    tree.style_mut(a).flex_grow = 1.0;
    tree.style_mut(b).flex_grow = 2.0;
    tree.style_mut(a).width = Dimension::Auto;
    tree.style_mut(b).width = Dimension::Auto;
    tree.style_mut(a).flex_basis = Dimension::Points(0.0);
    tree.style_mut(b).flex_basis = Dimension::Points(0.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert!((tree.layout(a).width - 100.0).abs() < 0.01);
    assert!((tree.layout(b).width - 200.0).abs() < 0.01);
    assert!((tree.layout(b).left - 100.0).abs() < 0.01);
}

#[test]
fn test_flex_shrink_respects_min_width() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 100.0, 50.0);
    let a = fixed(&mut tree, r, 100.0, 10.0);
    let b = fixed(&mut tree, r, 100.0, 10.0);
    tree.style_mut(a).min_width = Dimension::Points(80.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert!((tree.layout(a).width - 80.0).abs() < 0.01);
    assert!((tree.layout(b).width - 20.0).abs() < 0.01);
}

#[test]
fn test_justify_content_center_and_end() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 50.0);
    tree.style_mut(r).justify_content = JustifyContent::Center;
    let a = fixed(&mut tree, r, 50.0, 10.0);
    tree.compute_layout(r, Available::UNDEFINED);
    assert_eq!(tree.layout(a).left, 75.0);

    tree.style_mut(r).justify_content = JustifyContent::FlexEnd;
    tree.compute_layout(r, Available::UNDEFINED);
    assert_eq!(tree.layout(a).left, 150.0);
}

#[test]
fn test_justify_space_between() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 50.0);
    tree.style_mut(r).justify_content = JustifyContent::SpaceBetween;
    let a = fixed(&mut tree, r, 50.0, 10.0);
    let b = fixed(&mut tree, r, 50.0, 10.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).left, 0.0);
    assert_eq!(tree.layout(b).left, 150.0);
}

#[test]
fn test_align_items_center() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 100.0);
    tree.style_mut(r).align_items = AlignItems::Center;
    let a = fixed(&mut tree, r, 50.0, 20.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).top, 40.0);
}

#[test]
fn test_padding_and_border_offset_children() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 100.0);
    tree.style_mut(r).padding = Edges::all(10.0);
    tree.style_mut(r).border = Edges::all(2.0);
    let a = fixed(&mut tree, r, 50.0, 20.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).left, 12.0);
    assert_eq!(tree.layout(a).top, 12.0);
}

#[test]
fn test_row_gap_between_columns() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 50.0);
    tree.style_mut(r).column_gap = 8.0;
    let _ = fixed(&mut tree, r, 20.0, 10.0);
    let b = fixed(&mut tree, r, 20.0, 10.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(b).left, 28.0);
}

#[test]
fn test_row_reverse_places_from_end() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 50.0);
    tree.style_mut(r).flex_direction = FlexDirection::RowReverse;
    let a = fixed(&mut tree, r, 50.0, 10.0);
    let b = fixed(&mut tree, r, 30.0, 10.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).left, 150.0);
    assert_eq!(tree.layout(b).left, 120.0);
}

#[test]
fn test_auto_root_fits_content() {
    let mut tree = FlexTree::new();
    let r = tree.create_node();
    let _ = fixed(&mut tree, r, 40.0, 10.0);
    let _ = fixed(&mut tree, r, 60.0, 25.0);
    tree.compute_layout(r, Available::definite(500.0, 500.0));

    let layout = tree.layout(r);
    assert_eq!(layout.width, 100.0);
    assert_eq!(layout.height, 25.0);
}

#[test]
fn test_percent_width_resolves_against_parent() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 400.0, 100.0);
    let a = tree.create_node();
    tree.style_mut(a).width = Dimension::Percent(25.0);
    tree.append_child(r, a);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).width, 100.0);
}

#[test]
fn test_absolute_child_uses_insets() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 100.0);
    let flow = fixed(&mut tree, r, 50.0, 50.0);
    let abs = fixed(&mut tree, r, 30.0, 30.0);
    {
        let style = tree.style_mut(abs);
        style.position = Position::Absolute;
        style.inset.right = Dimension::Points(10.0);
        style.inset.bottom = Dimension::Points(5.0);
    }
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(flow).left, 0.0);
    assert_eq!(tree.layout(abs).left, 160.0);
    assert_eq!(tree.layout(abs).top, 65.0);
}

#[test]
fn test_absolute_child_stretches_between_insets() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 100.0);
    let abs = tree.create_node();
    {
        let style = tree.style_mut(abs);
        style.position = Position::Absolute;
        style.inset = Edges::all(Dimension::Points(10.0));
    }
    tree.append_child(r, abs);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(
        tree.layout(abs),
        ComputedLayout {
            left: 10.0,
            top: 10.0,
            width: 180.0,
            height: 80.0
        }
    );
}

#[test]
fn test_relative_offset_shifts_box() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 100.0);
    let a = fixed(&mut tree, r, 50.0, 50.0);
    tree.style_mut(a).inset.left = Dimension::Points(7.0);
    tree.style_mut(a).inset.top = Dimension::Points(3.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(a).left, 7.0);
    assert_eq!(tree.layout(a).top, 3.0);
}

#[test]
fn test_measured_leaf_receives_available_width() {
    let seen = Rc::new(Cell::new(None));
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 120.0, 60.0);
    tree.style_mut(r).flex_direction = FlexDirection::Column;
    let leaf = tree.create_node();
    let probe = Rc::clone(&seen);
    tree.set_measure(
        leaf,
        Box::new(move |width| {
            probe.set(width);
            Size::new(width.unwrap_or(0.0).min(90.0), 18.0)
        }),
    );
    tree.append_child(r, leaf);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(seen.get(), Some(120.0));
    assert_eq!(tree.layout(leaf).width, 120.0);
    assert_eq!(tree.layout(leaf).height, 18.0);
}

#[test]
fn test_display_none_takes_no_space() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 50.0);
    let hidden = fixed(&mut tree, r, 50.0, 10.0);
    tree.style_mut(hidden).display = plume_layout::BoxDisplay::None;
    let b = fixed(&mut tree, r, 50.0, 10.0);
    tree.compute_layout(r, Available::UNDEFINED);

    assert_eq!(tree.layout(b).left, 0.0);
    assert_eq!(tree.layout(hidden).width, 0.0);
}

#[test]
fn test_insert_child_at_index() {
    let mut tree = FlexTree::new();
    let r = tree.create_node();
    let a = tree.create_node();
    let b = tree.create_node();
    tree.append_child(r, a);
    tree.insert_child(r, b, 0);

    assert_eq!(tree.children(r), &[b, a]);
    assert_eq!(tree.parent(a), Some(r));
    assert_eq!(tree.child_count(r), 2);
}

#[test]
fn test_compute_layout_on_attached_node_keeps_its_box() {
    let mut tree = FlexTree::new();
    let r = root(&mut tree, 200.0, 100.0);
    let a = fixed(&mut tree, r, 80.0, 40.0);
    let inner = fixed(&mut tree, a, 10.0, 10.0);
    tree.compute_layout(r, Available::UNDEFINED);
    let before = tree.layout(a);

    tree.style_mut(a).justify_content = JustifyContent::FlexEnd;
    tree.compute_layout(a, Available::UNDEFINED);

    assert_eq!(tree.layout(a), before);
    assert_eq!(tree.layout(inner).left, 70.0);
}
