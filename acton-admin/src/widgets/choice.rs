//! Radio and checkbox groups with pluggable option layout

use std::collections::HashSet;
use std::fmt;

use minijinja::Value;

use super::{Widget, WidgetEnv};
use crate::attrs::{Attrs, INLINE};
use crate::choices::{flat_options, Choice, SelectOption};
use crate::error::WidgetError;
use crate::html::{escape, SafeHtml};
use crate::templates;
use crate::value::{FormData, WidgetValue};

const FORM_CONTROL: &str = "form-control";
const RADIO: &str = "radio";
const CHECKBOX: &str = "checkbox";

/// One radio button or checkbox of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceInput {
    name: String,
    attrs: Attrs,
    choice_value: String,
    choice_label: String,
    index: usize,
    input_type: &'static str,
    checked: bool,
    inline: bool,
}

impl ChoiceInput {
    /// Build the input for option `index` of a group
    ///
    /// A group-level `id` becomes `{id}_{index}`. The `inline` layout hint is
    /// kept aside and never rendered as an attribute.
    #[must_use]
    pub fn new(
        name: &str,
        group_attrs: &Attrs,
        option: &SelectOption,
        index: usize,
        input_type: &'static str,
        checked: bool,
    ) -> Self {
        let inline = group_attrs.is_truthy(INLINE);
        let mut attrs = group_attrs.without(INLINE);
        if let Some(id) = attrs.get_text("id").filter(|id| !id.is_empty()) {
            let id = format!("{id}_{index}");
            attrs.insert("id", id);
        }
        if option.disabled {
            attrs.insert("disabled", true);
        }
        Self {
            name: name.to_owned(),
            attrs,
            choice_value: option.value.clone(),
            choice_label: option.label.clone(),
            index,
            input_type,
            checked,
            inline,
        }
    }

    /// The `<input>` element
    #[must_use]
    pub fn tag(&self) -> SafeHtml {
        let mut attrs = self.attrs.clone();
        attrs.insert("type", self.input_type);
        attrs.insert("name", self.name.as_str());
        attrs.insert("value", self.choice_value.as_str());
        if self.checked {
            attrs.insert("checked", "checked");
        }
        SafeHtml::new(format!("<input{} />", attrs.flatten()))
    }

    /// ` for="{id}"`, or nothing without an id
    #[must_use]
    pub fn label_for(&self) -> SafeHtml {
        self.id().map_or_else(SafeHtml::empty, |id| {
            SafeHtml::new(format!(r#" for="{}""#, escape(id)))
        })
    }

    /// Default markup: `<label for>{tag} {label}</label>`
    #[must_use]
    pub fn render(&self) -> SafeHtml {
        SafeHtml::new(format!(
            "<label{}>{} {}</label>",
            self.label_for(),
            self.tag(),
            escape(&self.choice_label)
        ))
    }

    /// Remove one class token from the input
    pub fn remove_class(&mut self, token: &str) {
        self.attrs.remove_class(token);
    }

    /// Indexed id of this input
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get_text("id").filter(|id| !id.is_empty())
    }

    /// Submitted value of this option
    #[must_use]
    pub fn choice_value(&self) -> &str {
        &self.choice_value
    }

    /// Display label of this option
    #[must_use]
    pub fn choice_label(&self) -> &str {
        &self.choice_label
    }

    /// Position within the group
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// `radio` or `checkbox`
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        self.input_type
    }

    /// Whether the option is selected
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether the group asked for inline layout
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        self.inline
    }
}

impl fmt::Display for ChoiceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render().as_str())
    }
}

/// Layout of a radio or checkbox group
pub trait ChoiceRenderer: fmt::Debug + Send + Sync {
    /// Markup for one option
    ///
    /// # Errors
    ///
    /// Returns error if a layout template fails.
    fn render_choice(&self, env: &WidgetEnv, input: &ChoiceInput) -> Result<SafeHtml, WidgetError>;

    /// Combine the rendered options; `id` is the group-level id, if any
    ///
    /// # Errors
    ///
    /// Returns error if a layout template fails.
    fn render_group(
        &self,
        env: &WidgetEnv,
        id: Option<&str>,
        choices: Vec<SafeHtml>,
    ) -> Result<SafeHtml, WidgetError>;
}

/// `<ul>` list with one `<li>` per option
#[derive(Debug, Clone, Copy, Default)]
pub struct ListChoiceRenderer;

impl ChoiceRenderer for ListChoiceRenderer {
    fn render_choice(&self, _env: &WidgetEnv, input: &ChoiceInput) -> Result<SafeHtml, WidgetError> {
        Ok(SafeHtml::new(format!("<li>{}</li>", input.render())))
    }

    fn render_group(
        &self,
        _env: &WidgetEnv,
        id: Option<&str>,
        choices: Vec<SafeHtml>,
    ) -> Result<SafeHtml, WidgetError> {
        let id_attr = id.map_or_else(String::new, |id| format!(r#" id="{}""#, escape(id)));
        let mut lines = Vec::with_capacity(choices.len() + 2);
        lines.push(SafeHtml::new(format!("<ul{id_attr}>")));
        lines.extend(choices);
        lines.push(SafeHtml::new("</ul>"));
        Ok(SafeHtml::join(lines, "\n"))
    }
}

/// Admin layout: one option per line, bootstrap classes
///
/// Inline groups render `<label class="radio-inline">`, block groups wrap
/// each label in `<div class="radio">` (`checkbox` for checkboxes). Radio
/// inputs drop the `form-control` class; checkboxes keep it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminChoiceRenderer;

impl ChoiceRenderer for AdminChoiceRenderer {
    fn render_choice(&self, env: &WidgetEnv, input: &ChoiceInput) -> Result<SafeHtml, WidgetError> {
        let mut input = input.clone();
        if input.input_type() == RADIO {
            input.remove_class(FORM_CONTROL);
        }

        let (template, layout_class) = if input.is_inline() {
            (templates::CHOICE_INLINE, format!("{}-inline", input.input_type()))
        } else {
            (templates::CHOICE_BLOCK, input.input_type().to_owned())
        };
        env.render_template(
            template,
            minijinja::context! {
                layout_class => Value::from(SafeHtml::escaped(&layout_class)),
                label_for => Value::from(input.label_for()),
                tag => Value::from(input.tag()),
                label => Value::from(SafeHtml::escaped(input.choice_label())),
            },
        )
    }

    fn render_group(
        &self,
        _env: &WidgetEnv,
        _id: Option<&str>,
        choices: Vec<SafeHtml>,
    ) -> Result<SafeHtml, WidgetError> {
        Ok(SafeHtml::join(choices, "\n"))
    }
}

/// Build every input of a group, flattening option groups
fn build_inputs(
    name: &str,
    attrs: &Attrs,
    choices: &[Choice],
    input_type: &'static str,
    is_checked: impl Fn(&str) -> bool,
) -> Vec<ChoiceInput> {
    flat_options(choices)
        .enumerate()
        .map(|(index, option)| {
            ChoiceInput::new(name, attrs, option, index, input_type, is_checked(&option.value))
        })
        .collect()
}

fn render_inputs<R: ChoiceRenderer>(
    env: &WidgetEnv,
    renderer: &R,
    attrs: &Attrs,
    inputs: &[ChoiceInput],
) -> Result<SafeHtml, WidgetError> {
    let rendered = inputs
        .iter()
        .map(|input| renderer.render_choice(env, input))
        .collect::<Result<Vec<_>, _>>()?;
    renderer.render_group(env, attrs.get_text("id").filter(|id| !id.is_empty()), rendered)
}

fn indexed_id(id: &str) -> String {
    if id.is_empty() {
        String::new()
    } else {
        format!("{id}_0")
    }
}

/// Group of radio buttons, one selected value
#[derive(Debug, Clone)]
pub struct RadioSelect<R = ListChoiceRenderer> {
    attrs: Attrs,
    choices: Vec<Choice>,
    renderer: R,
}

impl<R: ChoiceRenderer + Default> RadioSelect<R> {
    /// Create a radio group with the renderer's default layout
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self::with_renderer(attrs, R::default())
    }
}

impl<R: ChoiceRenderer> RadioSelect<R> {
    /// Create a radio group with an explicit renderer
    #[must_use]
    pub fn with_renderer(attrs: Option<Attrs>, renderer: R) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            choices: Vec::new(),
            renderer,
        }
    }

    /// Set the options
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Configured options
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// The individual radio inputs for a value
    #[must_use]
    pub fn inputs(&self, name: &str, value: &WidgetValue, attrs: Option<&Attrs>) -> Vec<ChoiceInput> {
        let selected = value.to_text().unwrap_or_default();
        build_inputs(name, &self.build_attrs(attrs), &self.choices, RADIO, |v| {
            v == selected
        })
    }

    /// The radio input at `index`
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::ChoiceIndex`] when `index` is out of range.
    pub fn input(
        &self,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
        index: usize,
    ) -> Result<ChoiceInput, WidgetError> {
        let mut inputs = self.inputs(name, value, attrs);
        let len = inputs.len();
        if index >= len {
            return Err(WidgetError::ChoiceIndex { index, len });
        }
        Ok(inputs.swap_remove(index))
    }
}

impl<R: ChoiceRenderer> Widget for RadioSelect<R> {
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
        let inputs = self.inputs(name, value, attrs);
        render_inputs(env, &self.renderer, &self.build_attrs(attrs), &inputs)
    }

    fn id_for_label(&self, id: &str) -> String {
        indexed_id(id)
    }
}

/// Group of checkboxes, any number of selected values
#[derive(Debug, Clone)]
pub struct CheckboxSelectMultiple<R = ListChoiceRenderer> {
    attrs: Attrs,
    choices: Vec<Choice>,
    renderer: R,
}

impl<R: ChoiceRenderer + Default> CheckboxSelectMultiple<R> {
    /// Create a checkbox group with the renderer's default layout
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self::with_renderer(attrs, R::default())
    }
}

impl<R: ChoiceRenderer> CheckboxSelectMultiple<R> {
    /// Create a checkbox group with an explicit renderer
    #[must_use]
    pub fn with_renderer(attrs: Option<Attrs>, renderer: R) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            choices: Vec::new(),
            renderer,
        }
    }

    /// Set the options
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Configured options
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// The individual checkboxes for a value
    ///
    /// Selected values are compared as strings; an empty value checks nothing.
    #[must_use]
    pub fn inputs(&self, name: &str, value: &WidgetValue, attrs: Option<&Attrs>) -> Vec<ChoiceInput> {
        let selected: HashSet<String> = value.to_list().into_iter().collect();
        build_inputs(name, &self.build_attrs(attrs), &self.choices, CHECKBOX, |v| {
            selected.contains(v)
        })
    }

    /// The checkbox at `index`
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::ChoiceIndex`] when `index` is out of range.
    pub fn input(
        &self,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
        index: usize,
    ) -> Result<ChoiceInput, WidgetError> {
        let mut inputs = self.inputs(name, value, attrs);
        let len = inputs.len();
        if index >= len {
            return Err(WidgetError::ChoiceIndex { index, len });
        }
        Ok(inputs.swap_remove(index))
    }
}

impl<R: ChoiceRenderer> Widget for CheckboxSelectMultiple<R> {
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
        let inputs = self.inputs(name, value, attrs);
        render_inputs(env, &self.renderer, &self.build_attrs(attrs), &inputs)
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        if data.contains(name) {
            WidgetValue::List(data.get_list(name).to_vec())
        } else {
            WidgetValue::Empty
        }
    }

    fn id_for_label(&self, id: &str) -> String {
        indexed_id(id)
    }
}
