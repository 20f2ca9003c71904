//! Integration tests for the warning system and XML builder.

use plume_common::warning::{clear_warnings, warn_once, warning_count};
use plume_common::{XmlElement, escape};

#[test]
fn test_warn_once_deduplicates() {
    clear_warnings();
    warn_once("style", "unsupported unit 'pt' in width");
    warn_once("style", "unsupported unit 'pt' in width");
    assert_eq!(warning_count(), 1);

    // Same message from another component is a separate warning.
    warn_once("text", "unsupported unit 'pt' in width");
    assert_eq!(warning_count(), 2);

    clear_warnings();
    assert_eq!(warning_count(), 0);
}

#[test]
fn test_escape_borrowed_when_clean() {
    assert!(matches!(escape("plain"), std::borrow::Cow::Borrowed("plain")));
}

#[test]
fn test_clip_path_fragment() {
    let rect = XmlElement::new("rect")
        .num("x", 10.0)
        .num("y", 20.0)
        .num("width", 30.5)
        .num("height", 40.0);
    let clip = XmlElement::new("clipPath")
        .attr("id", "plume_cp-0")
        .child(&rect.build())
        .build();
    assert_eq!(
        clip,
        r#"<clipPath id="plume_cp-0"><rect x="10" y="20" width="30.5" height="40"/></clipPath>"#
    );
}
