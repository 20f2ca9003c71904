//! Keyword-valued properties.
//!
//! Each enum parses from its CSS keyword through `strum` and prints back the
//! canonical keyword.

use std::str::FromStr;

use plume_common::warning::warn_once;
use serde_json::Value;
use strum_macros::{Display, EnumString};

/// [§ 7.1 'text-align'](https://www.w3.org/TR/css-text-3/#text-align-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TextAlign {
    /// "Inline-level content is aligned to the start edge of the line box."
    #[default]
    Start,
    /// "Inline-level content is aligned to the end edge of the line box."
    End,
    /// "Inline-level content is aligned to the line-left edge of the line box."
    Left,
    /// "Inline-level content is aligned to the line-right edge of the line box."
    Right,
    /// "Inline-level content is centered within the line box."
    Center,
    /// "Text is justified according to the method specified by the
    /// text-justify property."
    Justify,
}

/// [§ 2.1 'text-transform'](https://www.w3.org/TR/css-text-3/#text-transform-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TextTransform {
    /// "No effects."
    #[default]
    None,
    /// "Puts all typographic letter units in uppercase."
    Uppercase,
    /// "Puts all typographic letter units in lowercase."
    Lowercase,
    /// "Puts the first typographic letter unit of each word, if lowercase,
    /// in titlecase."
    Capitalize,
}

/// [§ 5.2 'word-break'](https://www.w3.org/TR/css-text-3/#word-break-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum WordBreak {
    /// "Words break according to their customary rules."
    #[default]
    Normal,
    /// "Breaking is forbidden within 'words'."
    KeepAll,
    /// "Breaking is allowed within 'words'."
    BreakAll,
    /// Treated as `break-all` for segmentation purposes.
    BreakWord,
}

impl WordBreak {
    /// Whether text should be segmented into grapheme clusters rather than words.
    #[must_use]
    pub const fn breaks_graphemes(self) -> bool {
        matches!(self, Self::BreakAll | Self::BreakWord)
    }
}

/// [§ 5.5 'object-fit'](https://www.w3.org/TR/css-images-3/#the-object-fit)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ObjectFit {
    /// "The replaced content is sized to fill the element's content box."
    #[default]
    Fill,
    /// "The replaced content is scaled to maintain its aspect ratio while
    /// fitting within the element's content box."
    Contain,
    /// "The replaced content is sized to maintain its aspect ratio while
    /// filling the element's entire content box."
    Cover,
    /// "The replaced content is not resized to fit inside the element's content box."
    None,
    /// "Size the content as if none or contain were specified, whichever
    /// would result in a smaller concrete object size."
    ScaleDown,
}

impl ObjectFit {
    /// The equivalent SVG `preserveAspectRatio` value.
    #[must_use]
    pub const fn preserve_aspect_ratio(self) -> &'static str {
        match self {
            Self::Contain | Self::ScaleDown => "xMidYMid",
            Self::Cover => "xMidYMid slice",
            Self::Fill | Self::None => "none",
        }
    }
}

/// [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Overflow {
    /// "There is no special handling of overflow."
    #[default]
    Visible,
    /// "This value indicates that the box's content is clipped to its padding box."
    Hidden,
}

/// [§ 3.7 'background-clip'](https://www.w3.org/TR/css-backgrounds-3/#background-clip)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BackgroundClip {
    /// "The background is painted within (clipped to) the border box."
    #[default]
    BorderBox,
    /// "The background is painted within (clipped to) the padding box."
    PaddingBox,
    /// "The background is painted within (clipped to) the content box."
    ContentBox,
    /// The background is painted within the glyph shapes of descendant text.
    Text,
}

/// [§ 3.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FontStyle {
    /// "Selects a face that is classified as a normal face."
    #[default]
    Normal,
    /// "Selects a font that is labeled as an italic face."
    Italic,
    /// "Selects a font that is labeled as an oblique face."
    Oblique,
}

/// [§ 3.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum BorderStyle {
    /// "No border."
    #[default]
    None,
    /// "A single line segment."
    Solid,
    /// "A series of square-ended dashes."
    Dashed,
    /// "A series of round dots."
    Dotted,
}

/// Parse a keyword value, warning once when it is not recognized.
pub(crate) fn parse_keyword<T: FromStr>(property: &str, value: &Value) -> Option<T> {
    let parsed = value
        .as_str()
        .and_then(|s| T::from_str(s.trim().to_ascii_lowercase().as_str()).ok());
    if parsed.is_none() {
        warn_once(
            "style",
            &format!("unsupported keyword for '{property}': {value}"),
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip_spelling() {
        assert_eq!("keep-all".parse::<WordBreak>(), Ok(WordBreak::KeepAll));
        assert_eq!(TextAlign::Justify.to_string(), "justify");
        assert_eq!(BackgroundClip::BorderBox.to_string(), "border-box");
    }

    #[test]
    fn test_parse_keyword_is_case_insensitive() {
        let value = Value::String("Uppercase".to_string());
        assert_eq!(
            parse_keyword::<TextTransform>("textTransform", &value),
            Some(TextTransform::Uppercase)
        );
    }

    #[test]
    fn test_object_fit_aspect_ratio() {
        assert_eq!(ObjectFit::Cover.preserve_aspect_ratio(), "xMidYMid slice");
        assert_eq!(ObjectFit::Fill.preserve_aspect_ratio(), "none");
    }
}
