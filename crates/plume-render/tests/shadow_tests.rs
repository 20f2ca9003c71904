//! Integration tests for shadow geometry.

use plume_render::{ShadowTarget, Silhouette, box_shadow, drop_shadow};
use plume_style::{BoxShadow, DropShadow};

fn card() -> Silhouette {
    Silhouette::Rect {
        x: 20.0,
        y: 20.0,
        width: 100.0,
        height: 40.0,
    }
}

fn target(silhouette: &Silhouette) -> ShadowTarget<'_> {
    ShadowTarget {
        id: "0-1",
        width: 100.0,
        height: 40.0,
        silhouette,
        opacity: 1.0,
        viewport_width: 400.0,
        viewport_height: 300.0,
    }
}

fn shadow(offset: f32, blur: f32, spread: f32, color: &str, inset: bool) -> BoxShadow {
    BoxShadow {
        offset_x: offset,
        offset_y: offset,
        blur_radius: blur,
        spread_radius: spread,
        color: color.to_string(),
        inset,
    }
}

#[test]
fn test_single_outer_shadow() {
    let silhouette = card();
    let layers = box_shadow(&target(&silhouette), &[shadow(2.0, 4.0, 0.0, "#000", false)]).unwrap();

    assert!(layers.inset.is_empty());
    assert_eq!(layers.outer.matches("<g ").count(), 1);
    assert!(layers.outer.contains(r#"<feGaussianBlur stdDeviation="2" result="b"/>"#));
    assert!(layers.outer.contains(r#"operator="in""#));
    assert!(layers.outer.contains(r#"filter="url(#plume_s-0-1-0)""#));
    assert!(layers.outer.contains(r#"mask="url(#plume_ms-0-1-0)""#));
    // The mask covers the whole document, not just the box.
    assert!(layers.outer.contains(r##"<rect x="0" y="0" width="400" height="300" fill="#fff"/>"##));
    // The shadow shape is the box moved by the offset.
    assert!(layers.outer.contains(r#"<rect x="22" y="22" width="100" height="40""#));
}

#[test]
fn test_filter_region_grows_by_blur() {
    let silhouette = card();
    let layers = box_shadow(&target(&silhouette), &[shadow(0.0, 4.0, 0.0, "red", false)]).unwrap();
    // grow = 4² / 4 = 4: x = -4 / 100, width = 108 / 100, y = -4 / 40, height = 48 / 40
    assert!(layers.outer.contains(r#"x="-4%""#), "{}", layers.outer);
    assert!(layers.outer.contains(r#"y="-10%""#), "{}", layers.outer);
    assert!(layers.outer.contains(r#"width="108%""#), "{}", layers.outer);
    assert!(layers.outer.contains(r#"height="120%""#), "{}", layers.outer);
}

#[test]
fn test_first_declared_shadow_paints_last() {
    let silhouette = card();
    let layers = box_shadow(
        &target(&silhouette),
        &[
            shadow(1.0, 0.0, 0.0, "red", false),
            shadow(2.0, 0.0, 0.0, "green", false),
            shadow(3.0, 0.0, 0.0, "blue", false),
        ],
    )
    .unwrap();

    let red = layers.outer.find("red").unwrap();
    let green = layers.outer.find("green").unwrap();
    let blue = layers.outer.find("blue").unwrap();
    assert!(blue < green && green < red);
    let filter_2 = layers.outer.find("plume_s-0-1-2").unwrap();
    let filter_0 = layers.outer.find("plume_s-0-1-0").unwrap();
    assert!(filter_2 < filter_0);
}

#[test]
fn test_inset_and_outer_are_partitioned() {
    let silhouette = card();
    let layers = box_shadow(
        &target(&silhouette),
        &[
            shadow(1.0, 2.0, 0.0, "red", true),
            shadow(1.0, 2.0, 0.0, "green", false),
            shadow(1.0, 2.0, 0.0, "blue", true),
        ],
    )
    .unwrap();

    assert!(layers.outer.contains("green"));
    assert!(!layers.outer.contains("red") && !layers.outer.contains("blue"));
    assert!(layers.inset.contains("red") && layers.inset.contains("blue"));
    assert!(!layers.inset.contains("green"));
    assert!(layers.inset.find("blue").unwrap() < layers.inset.find("red").unwrap());
    assert!(layers.inset.contains(r#"operator="out""#));
    assert!(!layers.inset.contains(r#"operator="in""#));
    // Inset masks hide everything but the box interior.
    assert!(layers.inset.contains(r##"height="300" fill="#000""##));
}

#[test]
fn test_negative_spread_adds_erosion_mask() {
    let silhouette = card();
    let eroded = box_shadow(&target(&silhouette), &[shadow(0.0, 2.0, -3.0, "red", false)]).unwrap();
    assert!(eroded.outer.contains(r#"<mask id="plume_ms-0-1-0-neg""#));
    assert!(eroded.outer.contains(r#"<g mask="url(#plume_ms-0-1-0-neg)">"#));
    assert!(eroded.outer.contains(r##"stroke="#000" stroke-width="6""##));

    for spread in [0.0, 3.0] {
        let plain = box_shadow(&target(&silhouette), &[shadow(0.0, 2.0, spread, "red", false)]).unwrap();
        assert!(!plain.outer.contains("-neg"));
    }
}

#[test]
fn test_positive_spread_widens_stroke() {
    let silhouette = card();
    let layers = box_shadow(&target(&silhouette), &[shadow(0.0, 0.0, 5.0, "red", false)]).unwrap();
    assert!(layers.outer.contains(r#"stroke-width="10""#));
}

#[test]
fn test_rounded_shadow_path_is_shifted() {
    let silhouette = Silhouette::rounded_rect(0.0, 0.0, 100.0, 40.0, &plume_style::Corners::all(8.0));
    let layers = box_shadow(&target(&silhouette), &[shadow(5.0, 0.0, 0.0, "red", false)]).unwrap();
    assert!(layers.outer.contains(r#"d="M5,13A8,8 0 0 1 13,5"#), "{}", layers.outer);
}

#[test]
fn test_no_shadows_is_none() {
    let silhouette = card();
    assert!(box_shadow(&target(&silhouette), &[]).is_none());
}

#[test]
fn test_drop_shadow_requires_all_parameters() {
    let color_only = DropShadow {
        color: Some("red".to_string()),
        offset: Some((1.0, 1.0)),
        radius: None,
    };
    assert_eq!(drop_shadow("0", 0, 10.0, 10.0, &color_only), "");
    assert_eq!(drop_shadow("0", 0, 10.0, 10.0, &DropShadow::default()), "");

    let complete = DropShadow {
        radius: Some(4.0),
        ..color_only
    };
    let markup = drop_shadow("0", 3, 10.0, 10.0, &complete);
    assert!(markup.starts_with(r#"<defs><filter id="plume_s-0-3""#));
    assert!(markup.contains(r#"<feDropShadow dx="1" dy="1" stdDeviation="2" flood-color="red" flood-opacity="1"/>"#));
}
