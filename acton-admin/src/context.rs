//! Template context normalization
//!
//! Admin templates receive their variables either as a [`LayeredContext`]
//! (a stack of scopes, as built up while rendering nested templates) or as a
//! plain key/value map. [`flatten_context`] turns either shape into one flat
//! map so plugins can read variables without caring which they were given.
//!
//! # Example
//!
//! ```rust
//! use acton_admin::context::{flatten_context, LayeredContext, TemplateContext};
//! use serde_json::json;
//!
//! let mut layered = LayeredContext::new();
//! layered.insert("title", json!("Users"));
//! layered.push();
//! layered.insert("title", json!("Edit user"));
//!
//! let ctx = TemplateContext::from(layered);
//! let flat = flatten_context(&ctx);
//! assert_eq!(flat["title"], json!("Edit user"));
//! ```

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Flat variable mapping handed to templates
pub type ContextMap = Map<String, Value>;

/// A stack of variable scopes
///
/// Lookups search from the innermost (most recently pushed) scope outwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredContext {
    scopes: Vec<ContextMap>,
}

impl Default for LayeredContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LayeredContext {
    /// Create a context with a single empty scope
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![ContextMap::new()],
        }
    }

    /// Create a context whose first scope is `base`
    #[must_use]
    pub fn with_base(base: ContextMap) -> Self {
        Self { scopes: vec![base] }
    }

    /// Push a new empty innermost scope
    pub fn push(&mut self) {
        self.scopes.push(ContextMap::new());
    }

    /// Push `scope` as the innermost scope
    pub fn push_scope(&mut self, scope: ContextMap) {
        self.scopes.push(scope);
    }

    /// Pop the innermost scope
    ///
    /// The outermost scope is never removed; popping it returns `None`.
    pub fn pop(&mut self) -> Option<ContextMap> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Set a variable in the innermost scope
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value);
        }
    }

    /// Look up a variable, innermost scope first
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(key))
    }

    /// Whether any scope defines `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All scopes, outermost first
    #[must_use]
    pub fn scopes(&self) -> &[ContextMap] {
        &self.scopes
    }

    /// Number of scopes
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

/// Either a layered context or an already-flat mapping
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateContext {
    /// Stack of scopes
    Layered(LayeredContext),
    /// Plain key/value mapping
    Flat(ContextMap),
}

impl From<LayeredContext> for TemplateContext {
    fn from(ctx: LayeredContext) -> Self {
        Self::Layered(ctx)
    }
}

impl From<ContextMap> for TemplateContext {
    fn from(map: ContextMap) -> Self {
        Self::Flat(map)
    }
}

impl TemplateContext {
    /// Flatten into a single mapping (see [`flatten_context`])
    #[must_use]
    pub fn to_flat(&self) -> Cow<'_, ContextMap> {
        flatten_context(self)
    }

    /// Consume the context and return one flat mapping
    #[must_use]
    pub fn into_flat(self) -> ContextMap {
        match self {
            Self::Layered(ctx) => merge_scopes(ctx.scopes.iter()),
            Self::Flat(map) => map,
        }
    }

    /// Convert into a template engine value
    #[must_use]
    pub fn to_template_value(&self) -> minijinja::Value {
        let flat = self.to_flat();
        minijinja::Value::from_serialize(&*flat)
    }
}

/// Flatten a template context into a single mapping
///
/// For a layered context every scope is copied in order from outermost to
/// innermost, so a key defined in several scopes takes the innermost value.
/// A flat mapping is returned as-is without copying.
#[must_use]
pub fn flatten_context(ctx: &TemplateContext) -> Cow<'_, ContextMap> {
    match ctx {
        TemplateContext::Layered(layered) => Cow::Owned(merge_scopes(layered.scopes.iter())),
        TemplateContext::Flat(map) => Cow::Borrowed(map),
    }
}

fn merge_scopes<'a>(scopes: impl Iterator<Item = &'a ContextMap>) -> ContextMap {
    let mut flat = ContextMap::new();
    for scope in scopes {
        for (key, value) in scope {
            flat.insert(key.clone(), value.clone());
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, Value)]) -> ContextMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_inner_scope_wins() {
        let mut ctx = LayeredContext::with_base(map(&[("a", json!(1)), ("b", json!(2))]));
        ctx.push_scope(map(&[("b", json!(3)), ("c", json!(4))]));

        let ctx = TemplateContext::from(ctx);
        let flat = flatten_context(&ctx);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["a"], json!(1));
        assert_eq!(flat["b"], json!(3));
        assert_eq!(flat["c"], json!(4));
    }

    #[test]
    fn test_flat_mapping_is_borrowed() {
        let ctx = TemplateContext::Flat(map(&[("x", json!("y"))]));
        let flat = flatten_context(&ctx);
        assert!(matches!(flat, Cow::Borrowed(_)));
        assert_eq!(flat["x"], json!("y"));
    }

    #[test]
    fn test_empty_layered_context() {
        let ctx = TemplateContext::from(LayeredContext::new());
        assert!(flatten_context(&ctx).is_empty());
    }

    #[test]
    fn test_get_searches_innermost_first() {
        let mut ctx = LayeredContext::new();
        ctx.insert("k", json!("outer"));
        ctx.push();
        assert_eq!(ctx.get("k"), Some(&json!("outer")));
        ctx.insert("k", json!("inner"));
        assert_eq!(ctx.get("k"), Some(&json!("inner")));
        ctx.pop();
        assert_eq!(ctx.get("k"), Some(&json!("outer")));
    }

    #[test]
    fn test_pop_keeps_outermost_scope() {
        let mut ctx = LayeredContext::new();
        assert!(ctx.pop().is_none());
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_into_flat_matches_flatten() {
        let mut ctx = LayeredContext::new();
        ctx.insert("a", json!(true));
        ctx.push();
        ctx.insert("a", json!(false));
        let tc = TemplateContext::from(ctx);
        let borrowed = flatten_context(&tc).into_owned();
        assert_eq!(tc.into_flat(), borrowed);
    }

    #[test]
    fn test_template_value_renders() {
        let mut ctx = LayeredContext::new();
        ctx.insert("name", json!("admin"));
        let value = TemplateContext::from(ctx).to_template_value();

        let mut env = minijinja::Environment::new();
        env.add_template("t", "{{ name }}").unwrap();
        let out = env.get_template("t").unwrap().render(value).unwrap();
        assert_eq!(out, "admin");
    }
}
