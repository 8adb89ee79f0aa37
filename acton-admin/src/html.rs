//! Safe markup and HTML escaping
//!
//! Every widget renders to [`SafeHtml`]: a string whose content has already
//! been escaped (or built from escaped parts) and must not be escaped again.
//! Plain text goes through [`escape`] or [`conditional_escape`] before it is
//! combined into markup.
//!
//! # Example
//!
//! ```rust
//! use acton_admin::html::{conditional_escape, escape, SafeHtml};
//!
//! assert_eq!(escape("<b>"), "&lt;b&gt;");
//!
//! let safe = SafeHtml::new("<b>bold</b>");
//! assert_eq!(conditional_escape(&safe).as_str(), "<b>bold</b>");
//! assert_eq!(conditional_escape("<b>").as_str(), "&lt;b&gt;");
//! ```

use std::fmt;

use axum::response::{Html, IntoResponse, Response};

/// A fragment of markup that is safe to emit verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Mark a string as safe without escaping it
    ///
    /// Only use this for markup built from escaped parts or trusted literals.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape plain text and wrap the result
    #[must_use]
    pub fn escaped(text: &str) -> Self {
        Self(escape(text))
    }

    /// Empty fragment
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Borrow the markup
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the fragment contains no markup
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the underlying string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Append another safe fragment
    pub fn push(&mut self, other: &Self) {
        self.0.push_str(&other.0);
    }

    /// Join fragments with a separator
    #[must_use]
    pub fn join<I>(parts: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let parts: Vec<String> = parts.into_iter().map(Self::into_string).collect();
        Self(parts.join(separator))
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeHtml> for String {
    fn from(html: SafeHtml) -> Self {
        html.0
    }
}

impl From<SafeHtml> for minijinja::Value {
    fn from(html: SafeHtml) -> Self {
        Self::from_safe_string(html.0)
    }
}

impl IntoResponse for SafeHtml {
    fn into_response(self) -> Response {
        Html(self.0).into_response()
    }
}

/// Text that may or may not already be safe markup
#[derive(Debug, Clone, Copy)]
pub enum Markup<'a> {
    /// Plain text, escaped on output
    Text(&'a str),
    /// Already-safe markup, emitted as-is
    Safe(&'a SafeHtml),
}

impl<'a> From<&'a str> for Markup<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Markup<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a SafeHtml> for Markup<'a> {
    fn from(html: &'a SafeHtml) -> Self {
        Self::Safe(html)
    }
}

/// Escape a string for use in HTML content or attribute values
#[must_use]
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape plain text, leaving safe markup untouched
#[must_use]
pub fn conditional_escape<'a>(input: impl Into<Markup<'a>>) -> SafeHtml {
    match input.into() {
        Markup::Text(text) => SafeHtml::escaped(text),
        Markup::Safe(html) => html.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_conditional_escape_keeps_safe_markup() {
        let html = SafeHtml::new("<i class=\"fa\"></i>");
        assert_eq!(conditional_escape(&html), html);
    }

    #[test]
    fn test_join() {
        let joined = SafeHtml::join([SafeHtml::new("<a>"), SafeHtml::new("<b>")], "\n");
        assert_eq!(joined.as_str(), "<a>\n<b>");
    }

    #[test]
    fn test_into_template_value_is_not_escaped_again() {
        let mut env = minijinja::Environment::new();
        env.add_template("t.html", "{{ v }}").unwrap();
        let out = env
            .get_template("t.html")
            .unwrap()
            .render(minijinja::context! { v => minijinja::Value::from(SafeHtml::new("<br />")) })
            .unwrap();
        assert_eq!(out, "<br />");
    }
}
