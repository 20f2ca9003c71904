//! XML fragment builder.
//!
//! [SVG 1.1 § 5 Document Structure](https://www.w3.org/TR/SVG11/struct.html)
//!
//! Every painter in the renderer produces markup through [`XmlElement`] so
//! attribute escaping and number formatting stay consistent across the
//! output. Elements without content are written in self-closing form.

use std::borrow::Cow;
use std::fmt::{self, Display, Write};

/// A single XML element under construction.
///
/// Attributes keep insertion order; content is raw, already-built markup.
#[derive(Debug, Clone)]
pub struct XmlElement {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    content: String,
}

impl XmlElement {
    /// Start a new element with the given tag name.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            content: String::new(),
        }
    }

    /// Append an attribute. The value is escaped when the element is built.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// Append an attribute only when `value` is present.
    #[must_use]
    pub fn attr_opt<T: Display>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Append a numeric attribute using [`fmt_num`].
    #[must_use]
    pub fn num(mut self, name: &'static str, value: f32) -> Self {
        self.attrs.push((name, fmt_num(value)));
        self
    }

    /// Append raw markup as element content.
    #[must_use]
    pub fn child(mut self, markup: &str) -> Self {
        self.content.push_str(markup);
        self
    }

    /// Append escaped character data as element content.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.content.push_str(&escape(text));
        self
    }

    /// Whether an attribute with this name has been set.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| *n == name)
    }

    /// Serialize the element to a markup string.
    #[must_use]
    pub fn build(&self) -> String {
        self.to_string()
    }
}

impl Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        f.write_str(self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"{}\"", escape(value))?;
        }
        if self.content.is_empty() {
            f.write_str("/>")
        } else {
            write!(f, ">{}</{}>", self.content, self.tag)
        }
    }
}

/// Escape the five XML special characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Format a coordinate compactly: `2` rather than `2.0`, `-0` folded to `0`.
///
/// Non-finite values are written as `0` so a malformed geometry value can
/// never produce an unparseable attribute.
#[must_use]
pub fn fmt_num(value: f32) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_without_content() {
        let el = XmlElement::new("rect").num("x", 1.0).num("y", 2.5);
        assert_eq!(el.build(), r#"<rect x="1" y="2.5"/>"#);
    }

    #[test]
    fn test_nested_content() {
        let inner = XmlElement::new("rect").attr("fill", "#fff").build();
        let el = XmlElement::new("mask").attr("id", "m").child(&inner);
        assert_eq!(el.build(), r##"<mask id="m"><rect fill="#fff"/></mask>"##);
    }

    #[test]
    fn test_attribute_escaping() {
        let el = XmlElement::new("text").attr("font-family", "\"A&B\"").text("1 < 2");
        assert_eq!(
            el.build(),
            r#"<text font-family="&quot;A&amp;B&quot;">1 &lt; 2</text>"#
        );
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(f32::NAN), "0");
        assert_eq!(fmt_num(-1.5), "-1.5");
    }

    #[test]
    fn test_attr_opt_skips_none() {
        let el = XmlElement::new("g").attr_opt::<&str>("mask", None);
        assert!(!el.has_attr("mask"));
        assert_eq!(el.build(), "<g/>");
    }
}
