//! Image sources.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! The output document must be self-contained, so local `img` sources are
//! read and inlined as `data:` URIs before layout. `data:` sources pass
//! through untouched; remote sources are never fetched.

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use plume_common::warning::warn_once;
use plume_render::{Element, NodeKind};

/// Replace every local `img` source under `element` with a `data:` URI.
///
/// Relative paths resolve against `base_dir`. A source that cannot be read
/// is left as it is, with a warning.
pub fn inline_images(element: &mut Element, base_dir: &Path) {
    let Element::Node(node) = element else {
        return;
    };
    if node.kind == NodeKind::Image
        && let Some(src) = &node.props.src
        && let Some(inlined) = inline_source(src, base_dir)
    {
        node.props.src = Some(inlined);
    }
    for child in &mut node.children {
        inline_images(child, base_dir);
    }
}

fn inline_source(src: &str, base_dir: &Path) -> Option<String> {
    if src.starts_with("data:") {
        return None;
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        warn_once("image", &format!("remote image '{src}' is not fetched"));
        return None;
    }

    let local = strip_url_decorations(src.strip_prefix("file://").unwrap_or(src));
    let path = base_dir.join(local);
    match fs::read(&path) {
        Ok(bytes) => {
            log::debug!("inlined {} ({} bytes)", path.display(), bytes.len());
            Some(data_uri(local, &bytes))
        }
        Err(err) => {
            warn_once("image", &format!("could not read image '{}': {err}", path.display()));
            None
        }
    }
}

/// Strip a query string (`?…`) and fragment (`#…`) so the remainder can be
/// used as a file path.
///
/// [URL Standard § 4.1](https://url.spec.whatwg.org/#concept-url-path)
#[must_use]
pub fn strip_url_decorations(src: &str) -> &str {
    let without_fragment = src.split_once('#').map_or(src, |(path, _)| path);
    without_fragment
        .split_once('?')
        .map_or(without_fragment, |(path, _)| path)
}

/// Encode `bytes` as a base64 `data:` URI.
#[must_use]
pub fn data_uri(path: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type(path, bytes), STANDARD.encode(bytes))
}

/// [MIME Sniffing § 7.1 Matching an image type pattern](https://mimesniff.spec.whatwg.org/#matching-an-image-type-pattern)
///
/// The `.svg` extension wins; otherwise the leading bytes decide.
#[must_use]
pub fn media_type(path: &str, bytes: &[u8]) -> &'static str {
    if Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    {
        return "image/svg+xml";
    }

    let trimmed: Vec<u8> = bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(256)
        .copied()
        .collect();
    match trimmed.as_slice() {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        t if t.starts_with(b"<?xml") || t.starts_with(b"<svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
