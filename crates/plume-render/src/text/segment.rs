//! Case transformation and segmentation.
//!
//! [Unicode Standard Annex #29](https://www.unicode.org/reports/tr29/)
//!
//! Word boundaries for `word-break: normal | keep-all`, extended grapheme
//! clusters for `break-all | break-word`.

use plume_style::{TextTransform, WordBreak};
use unicode_segmentation::UnicodeSegmentation;

/// [§ 2.1 Case Transforms](https://www.w3.org/TR/css-text-3/#text-transform-property)
///
/// `capitalize` uppercases the first grapheme cluster of each word, so a
/// cluster made of several code points is transformed as a whole.
#[must_use]
pub fn apply_text_transform(content: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => content.to_string(),
        TextTransform::Uppercase => content.to_uppercase(),
        TextTransform::Lowercase => content.to_lowercase(),
        TextTransform::Capitalize => content
            .split_word_bounds()
            .map(|word| {
                let mut graphemes = word.graphemes(true);
                let first = graphemes.next().map(str::to_uppercase).unwrap_or_default();
                first + graphemes.as_str()
            })
            .collect(),
    }
}

/// Split `content` into breakable segments at the granularity `word_break`
/// selects. Concatenating the segments gives back `content`.
#[must_use]
pub fn segment_text(content: &str, word_break: WordBreak) -> Vec<&str> {
    if word_break.breaks_graphemes() {
        content.graphemes(true).collect()
    } else {
        content.split_word_bounds().collect()
    }
}

/// Whether a segment collapses into an inter-word gap.
///
/// Word segmentation keeps runs of spaces together, so a segment counts as
/// whitespace when every character in it is.
#[must_use]
pub fn is_collapsible_space(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|ch| matches!(ch, ' ' | '\n' | '\t' | '\u{3000}'))
}
