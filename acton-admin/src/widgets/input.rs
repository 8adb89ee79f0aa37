//! Single-element input widgets

use std::fmt;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use minijinja::Value;

use super::{Widget, WidgetEnv};
use crate::attrs::Attrs;
use crate::error::WidgetError;
use crate::html::{escape, SafeHtml};
use crate::templates;
use crate::value::{FormData, WidgetValue};

/// Render `<input{attrs} />` for a given type and optional value
///
/// Widget attributes come first, then `type` and `name`, then call-time
/// attributes. An empty value is omitted.
pub(crate) fn render_input_tag(
    input_type: &str,
    widget_attrs: &Attrs,
    name: &str,
    value: Option<&str>,
    extra: Option<&Attrs>,
) -> SafeHtml {
    let mut attrs = widget_attrs.clone();
    attrs.insert("type", input_type);
    attrs.insert("name", name);
    let mut attrs = attrs.merged(extra);
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        attrs.insert("value", value);
    }
    SafeHtml::new(format!("<input{} />", attrs.flatten()))
}

/// Generic `<input>` widget (text, url, number, ...)
#[derive(Debug, Clone)]
pub struct Input {
    input_type: &'static str,
    attrs: Attrs,
}

impl Input {
    /// Create an input of the given type
    #[must_use]
    pub fn new(input_type: &'static str, attrs: Option<Attrs>) -> Self {
        Self {
            input_type,
            attrs: attrs.unwrap_or_default(),
        }
    }

    /// Text input
    #[must_use]
    pub fn text(attrs: Option<Attrs>) -> Self {
        Self::new("text", attrs)
    }

    /// Hidden input
    #[must_use]
    pub fn hidden(attrs: Option<Attrs>) -> Self {
        Self::new("hidden", attrs)
    }

    /// The `type` attribute value
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        self.input_type
    }
}

impl Widget for Input {
    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(
        &self,
        _env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        Ok(render_input_tag(
            self.input_type,
            &self.attrs,
            name,
            value.to_text().as_deref(),
            attrs,
        ))
    }
}

/// Reject strftime strings chrono cannot apply
fn check_format(fmt: &str) -> Result<(), WidgetError> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(WidgetError::InvalidFormat(fmt.to_string()));
    }
    Ok(())
}

/// Date input rendered as text with a configurable format
#[derive(Debug, Clone)]
pub struct DateInput {
    attrs: Attrs,
    format: Option<String>,
}

impl DateInput {
    /// Create a date input
    ///
    /// Without an explicit `format` the configured date input format is used.
    #[must_use]
    pub fn new(attrs: Option<Attrs>, format: Option<String>) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            format,
        }
    }

    fn format_value(&self, env: &WidgetEnv, value: &WidgetValue) -> Result<Option<String>, WidgetError> {
        let fmt = self
            .format
            .as_deref()
            .unwrap_or(&env.config().formats.date_input);
        match value {
            WidgetValue::Date(d) => check_format(fmt).map(|()| Some(d.format(fmt).to_string())),
            WidgetValue::DateTime(dt) => check_format(fmt).map(|()| Some(dt.date().format(fmt).to_string())),
            other => Ok(other.to_text()),
        }
    }
}

impl Widget for DateInput {
    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let value = self.format_value(env, value)?;
        Ok(render_input_tag("text", &self.attrs, name, value.as_deref(), attrs))
    }
}

/// Time input rendered as text with a configurable format
#[derive(Debug, Clone)]
pub struct TimeInput {
    attrs: Attrs,
    format: Option<String>,
}

impl TimeInput {
    /// Create a time input
    ///
    /// Without an explicit `format` the configured time input format is used.
    #[must_use]
    pub fn new(attrs: Option<Attrs>, format: Option<String>) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            format,
        }
    }

    fn format_value(&self, env: &WidgetEnv, value: &WidgetValue) -> Result<Option<String>, WidgetError> {
        let fmt = self
            .format
            .as_deref()
            .unwrap_or(&env.config().formats.time_input);
        match value {
            WidgetValue::Time(t) => check_format(fmt).map(|()| Some(t.format(fmt).to_string())),
            WidgetValue::DateTime(dt) => check_format(fmt).map(|()| Some(dt.time().format(fmt).to_string())),
            other => Ok(other.to_text()),
        }
    }
}

impl Widget for TimeInput {
    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let value = self.format_value(env, value)?;
        Ok(render_input_tag("text", &self.attrs, name, value.as_deref(), attrs))
    }
}

/// Multi-line text area
#[derive(Debug, Clone)]
pub struct Textarea {
    attrs: Attrs,
}

impl Textarea {
    /// Create a textarea; `cols="40"` and `rows="10"` unless overridden
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            attrs: Attrs::with_defaults(&[("cols", "40"), ("rows", "10")], attrs),
        }
    }
}

impl Widget for Textarea {
    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(
        &self,
        _env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let mut final_attrs = self.attrs.clone();
        final_attrs.insert("name", name);
        let final_attrs = final_attrs.merged(attrs);
        let text = value.to_text().unwrap_or_default();
        // The leading newline keeps browsers from eating one the value starts with.
        Ok(SafeHtml::new(format!(
            "<textarea{}>\r\n{}</textarea>",
            final_attrs.flatten(),
            escape(&text)
        )))
    }
}

type CheckTest = Arc<dyn Fn(&WidgetValue) -> bool + Send + Sync>;

/// Single checkbox
#[derive(Clone)]
pub struct CheckboxInput {
    attrs: Attrs,
    check_test: Option<CheckTest>,
}

impl fmt::Debug for CheckboxInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckboxInput")
            .field("attrs", &self.attrs)
            .field("custom_check_test", &self.check_test.is_some())
            .finish()
    }
}

impl Default for CheckboxInput {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CheckboxInput {
    /// Create a checkbox that is checked for any truthy value
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            check_test: None,
        }
    }

    /// Decide the checked state with a custom test
    #[must_use]
    pub fn with_check_test(
        mut self,
        test: impl Fn(&WidgetValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.check_test = Some(Arc::new(test));
        self
    }

    fn is_checked(&self, value: &WidgetValue) -> bool {
        self.check_test
            .as_ref()
            .map_or_else(|| is_truthy(value), |test| test(value))
    }

    /// Parse a checkbox submission
    ///
    /// A missing field is unchecked; `true`/`false` are matched
    /// case-insensitively and any other non-empty string counts as checked.
    #[must_use]
    pub fn parse_submitted(data: &FormData, name: &str) -> bool {
        match data.get(name) {
            None => false,
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(v) => !v.is_empty(),
        }
    }
}

fn is_truthy(value: &WidgetValue) -> bool {
    match value {
        WidgetValue::Empty | WidgetValue::Bool(false) => false,
        WidgetValue::Text(s) => !s.is_empty(),
        _ => true,
    }
}

impl Widget for CheckboxInput {
    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(
        &self,
        _env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let mut final_attrs = self.attrs.clone();
        final_attrs.insert("type", "checkbox");
        final_attrs.insert("name", name);
        let mut final_attrs = final_attrs.merged(attrs);
        if self.is_checked(value) {
            final_attrs.insert("checked", "checked");
        }
        if !matches!(value, WidgetValue::Bool(_)) {
            if let Some(text) = value.to_text().filter(|t| !t.is_empty()) {
                final_attrs.insert("value", text);
            }
        }
        Ok(SafeHtml::new(format!("<input{} />", final_attrs.flatten())))
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        WidgetValue::Bool(Self::parse_submitted(data, name))
    }
}

/// File upload input
///
/// Never renders a value: browsers cannot prefill file inputs.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    attrs: Attrs,
}

impl FileInput {
    /// Create a file input
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
        }
    }
}

impl Widget for FileInput {
    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn render(
        &self,
        _env: &WidgetEnv,
        name: &str,
        _value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        Ok(render_input_tag("file", &self.attrs, name, None, attrs))
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        data.file(name)
            .map_or(WidgetValue::Empty, |f| WidgetValue::Upload(f.clone()))
    }
}

/// File input that shows the current file and offers to clear it
#[derive(Debug, Clone)]
pub struct ClearableFileInput {
    input: FileInput,
    required: bool,
    initial_template: &'static str,
    clear_template: &'static str,
}

impl ClearableFileInput {
    /// Create a clearable file input using the plain templates
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self::with_templates(
            attrs,
            templates::CLEARABLE_FILE_INITIAL,
            templates::CLEARABLE_FILE_CLEAR,
        )
    }

    /// Create a clearable file input with custom substitution templates
    ///
    /// `initial_template` receives `initial_text`, `initial`,
    /// `clear_template`, `input_text` and `input`; `clear_template` receives
    /// `clear`, `clear_checkbox_name`, `clear_checkbox_id` and
    /// `clear_checkbox_label`.
    #[must_use]
    pub fn with_templates(
        attrs: Option<Attrs>,
        initial_template: &'static str,
        clear_template: &'static str,
    ) -> Self {
        Self {
            input: FileInput::new(attrs),
            required: false,
            initial_template,
            clear_template,
        }
    }

    /// Mark the field as required, which hides the clear checkbox
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Name of the clear checkbox for a field
    #[must_use]
    pub fn clear_checkbox_name(name: &str) -> String {
        format!("{name}-clear")
    }

    /// Id of the clear checkbox for a checkbox name
    #[must_use]
    pub fn clear_checkbox_id(checkbox_name: &str) -> String {
        format!("{checkbox_name}_id")
    }

    fn render_clear(&self, env: &WidgetEnv, name: &str) -> Result<SafeHtml, WidgetError> {
        if self.required {
            return Ok(SafeHtml::empty());
        }
        let checkbox_name = Self::clear_checkbox_name(name);
        let checkbox_id = Self::clear_checkbox_id(&checkbox_name);
        let clear = CheckboxInput::default().render(
            env,
            &checkbox_name,
            &WidgetValue::Bool(false),
            Some(&Attrs::new().with("id", checkbox_id.as_str())),
        )?;
        env.render_template(
            self.clear_template,
            minijinja::context! {
                clear => Value::from(clear),
                clear_checkbox_name => Value::from(SafeHtml::escaped(&checkbox_name)),
                clear_checkbox_id => Value::from(SafeHtml::escaped(&checkbox_id)),
                clear_checkbox_label => Value::from(SafeHtml::escaped(&env.config().labels.clear)),
            },
        )
    }
}

impl Widget for ClearableFileInput {
    fn attrs(&self) -> &Attrs {
        self.input.attrs()
    }

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let input = self.input.render(env, name, value, attrs)?;
        let WidgetValue::File(file) = value else {
            return Ok(input);
        };
        if file.url.is_empty() {
            return Ok(input);
        }

        let labels = &env.config().labels;
        let initial = SafeHtml::new(format!(
            r#"<a href="{}">{}</a>"#,
            escape(&file.url),
            escape(&file.name)
        ));
        let clear_template = self.render_clear(env, name)?;
        env.render_template(
            self.initial_template,
            minijinja::context! {
                initial_text => Value::from(SafeHtml::escaped(&labels.currently)),
                initial => Value::from(initial),
                clear_template => Value::from(clear_template),
                input_text => Value::from(SafeHtml::escaped(&labels.change)),
                input => Value::from(input),
            },
        )
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        let upload = self.input.value_from_data(data, name);
        if !self.required && CheckboxInput::parse_submitted(data, &Self::clear_checkbox_name(name)) {
            if upload.is_empty() {
                return WidgetValue::Clear;
            }
            return WidgetValue::Contradiction;
        }
        upload
    }

    fn is_required(&self) -> bool {
        self.required
    }
}
