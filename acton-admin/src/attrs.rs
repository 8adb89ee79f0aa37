//! HTML attribute dictionaries
//!
//! Widgets keep their attributes in an [`Attrs`] map. Rendering merges the
//! widget's own attributes with call-time attributes and flattens the result
//! into markup with [`flatatt`].

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::html::{escape, SafeHtml};

/// Attribute that selects inline layout for radio and checkbox groups
///
/// Layout hints steer rendering and are never written to the generated inputs.
pub const INLINE: &str = "inline";

const CLASS: &str = "class";

/// Value of a single HTML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `key="value"` attribute
    Text(String),
    /// Boolean attribute, rendered as a bare `key` when true
    Flag(bool),
}

impl AttrValue {
    /// Text content, if this is a text attribute
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// Truthiness: non-empty text or a set flag
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Flag(b) => *b,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        Self::Text(n.to_string())
    }
}

/// Attribute dictionary, ordered by key
///
/// # Examples
///
/// ```rust
/// use acton_admin::attrs::Attrs;
///
/// let attrs = Attrs::new().with("id", "id_name").with("required", true);
/// assert_eq!(attrs.flatten().as_str(), r#" id="id_name" required"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(BTreeMap<String, AttrValue>);

impl Attrs {
    /// Create an empty attribute map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from default attributes, then apply caller overrides
    ///
    /// Caller-supplied attributes win over the defaults.
    #[must_use]
    pub fn with_defaults(defaults: &[(&str, &str)], overrides: Option<Self>) -> Self {
        let mut attrs: Self = defaults.iter().map(|(k, v)| (*k, *v)).collect();
        if let Some(overrides) = overrides {
            attrs.extend(overrides);
        }
        attrs
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an attribute
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove an attribute
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.remove(key)
    }

    /// Get an attribute value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Get a text attribute value
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(AttrValue::as_text)
    }

    /// Whether an attribute is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether an attribute is present and truthy
    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(AttrValue::is_truthy)
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attributes in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, AttrValue> {
        self.0.iter()
    }

    /// Copy of these attributes updated with `extra`
    #[must_use]
    pub fn merged(&self, extra: Option<&Self>) -> Self {
        let mut attrs = self.clone();
        if let Some(extra) = extra {
            attrs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        attrs
    }

    /// Copy of these attributes without `key`
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut attrs = self.clone();
        attrs.remove(key);
        attrs
    }

    /// Remove one token from the `class` attribute
    ///
    /// The attribute is dropped entirely when no tokens remain.
    pub fn remove_class(&mut self, token: &str) {
        let Some(AttrValue::Text(class)) = self.0.get(CLASS) else {
            return;
        };
        let remaining = class
            .split_whitespace()
            .filter(|c| *c != token)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.0.remove(CLASS);
        } else {
            self.insert(CLASS, remaining);
        }
    }

    /// Flatten into ` key="value"` markup
    #[must_use]
    pub fn flatten(&self) -> SafeHtml {
        flatatt(self)
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> Extend<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Attrs {
    type Item = (String, AttrValue);
    type IntoIter = btree_map::IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attrs {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Convert an attribute map into markup
///
/// Text attributes come first as ` key="value"` pairs sorted by key, followed
/// by the sorted set of true boolean attributes as bare ` key`. False flags
/// are omitted and an empty map yields an empty string. Keys are assumed not
/// to need escaping; values are escaped.
#[must_use]
pub fn flatatt(attrs: &Attrs) -> SafeHtml {
    let mut html = String::new();
    for (key, value) in attrs {
        if let AttrValue::Text(value) = value {
            let _ = write!(html, r#" {key}="{}""#, escape(value));
        }
    }
    for (key, value) in attrs {
        if matches!(value, AttrValue::Flag(true)) {
            html.push(' ');
            html.push_str(key);
        }
    }
    SafeHtml::new(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flatatt_empty() {
        assert_eq!(flatatt(&Attrs::new()).as_str(), "");
    }

    #[test]
    fn test_flatatt_sorted_with_flags_last() {
        let attrs = Attrs::new()
            .with("type", "text")
            .with("disabled", true)
            .with("class", "a b")
            .with("hidden", false)
            .with("autofocus", true);
        assert_eq!(
            flatatt(&attrs).as_str(),
            r#" class="a b" type="text" autofocus disabled"#
        );
    }

    #[test]
    fn test_flatatt_escapes_values() {
        let attrs = Attrs::new().with("title", r#"say "hi" & <bye>"#);
        assert_eq!(
            flatatt(&attrs).as_str(),
            r#" title="say &quot;hi&quot; &amp; &lt;bye&gt;""#
        );
    }

    #[test]
    fn test_with_defaults_caller_wins() {
        let attrs = Attrs::with_defaults(
            &[("class", "date-field"), ("size", "10")],
            Some(Attrs::new().with("class", "custom")),
        );
        assert_eq!(attrs.get_text("class"), Some("custom"));
        assert_eq!(attrs.get_text("size"), Some("10"));
    }

    #[test]
    fn test_merged_does_not_touch_original() {
        let base = Attrs::new().with("class", "a");
        let merged = base.merged(Some(&Attrs::new().with("id", "x")));
        assert!(!base.contains("id"));
        assert_eq!(merged.get_text("id"), Some("x"));
        assert_eq!(merged.get_text("class"), Some("a"));
    }

    #[test]
    fn test_remove_class_token() {
        let mut attrs = Attrs::new().with("class", "form-control  narrow");
        attrs.remove_class("form-control");
        assert_eq!(attrs.get_text("class"), Some("narrow"));
    }

    #[test]
    fn test_remove_last_class_token_drops_attribute() {
        let mut attrs = Attrs::new().with("class", "form-control");
        attrs.remove_class("form-control");
        assert!(!attrs.contains("class"));
    }

    #[test]
    fn test_remove_class_keeps_similar_tokens() {
        let mut attrs = Attrs::new().with("class", "form-control-sm");
        attrs.remove_class("form-control");
        assert_eq!(attrs.get_text("class"), Some("form-control-sm"));
    }

    #[test]
    fn test_truthiness() {
        let attrs = Attrs::new()
            .with("inline", true)
            .with("empty", "")
            .with("off", false)
            .with("text", "yes");
        assert!(attrs.is_truthy("inline"));
        assert!(attrs.is_truthy("text"));
        assert!(!attrs.is_truthy("empty"));
        assert!(!attrs.is_truthy("off"));
        assert!(!attrs.is_truthy("missing"));
    }

    proptest! {
        #[test]
        fn flattened_values_never_contain_raw_quotes(value in ".*") {
            let html = flatatt(&Attrs::new().with("value", value.as_str()));
            let inner = &html.as_str()[r#" value=""#.len()..html.as_str().len() - 1];
            prop_assert!(!inner.contains('"'));
            prop_assert!(!inner.contains('<'));
        }

        #[test]
        fn every_text_attribute_is_emitted(keys in proptest::collection::btree_set("[a-z]{1,8}", 0..8)) {
            let attrs: Attrs = keys.iter().map(|k| (k.as_str(), "v")).collect();
            let html = flatatt(&attrs);
            for key in &keys {
                let needle = format!(r#" {key}="v""#);
                prop_assert!(html.as_str().contains(&needle));
            }
        }
    }
}
