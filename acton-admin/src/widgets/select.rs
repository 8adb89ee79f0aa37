//! `<select>` widgets

use std::collections::HashSet;

use super::{Widget, WidgetEnv};
use crate::attrs::Attrs;
use crate::choices::{Choice, SelectOption};
use crate::error::WidgetError;
use crate::html::{escape, SafeHtml};
use crate::value::{FormData, WidgetValue};

/// Render the `<option>` and `<optgroup>` lines for a set of choices
///
/// Unless `multiple` is set, only the first option matching a selected value
/// is marked selected.
fn render_options(choices: &[Choice], selected: &[String], multiple: bool) -> Vec<String> {
    let mut selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut lines = Vec::new();
    for choice in choices {
        match choice {
            Choice::Option(option) => lines.push(render_option(option, &mut selected, multiple)),
            Choice::Group { label, options } => {
                lines.push(format!(r#"<optgroup label="{}">"#, escape(label)));
                for option in options {
                    lines.push(render_option(option, &mut selected, multiple));
                }
                lines.push("</optgroup>".to_owned());
            }
        }
    }
    lines
}

fn render_option(option: &SelectOption, selected: &mut HashSet<&str>, multiple: bool) -> String {
    let is_selected = if multiple {
        selected.contains(option.value.as_str())
    } else {
        selected.remove(option.value.as_str())
    };
    format!(
        r#"<option value="{}"{}{}>{}</option>"#,
        escape(&option.value),
        if is_selected { r#" selected="selected""# } else { "" },
        if option.disabled { r#" disabled="disabled""# } else { "" },
        escape(&option.label)
    )
}

fn render_select(
    attrs: &Attrs,
    name: &str,
    extra: Option<&Attrs>,
    choices: &[Choice],
    selected: &[String],
    multiple: bool,
) -> SafeHtml {
    let mut final_attrs = attrs.clone();
    final_attrs.insert("name", name);
    let final_attrs = final_attrs.merged(extra);

    let mut lines = vec![format!("<select{}>", final_attrs.flatten())];
    lines.extend(render_options(choices, selected, multiple));
    lines.push("</select>".to_owned());
    SafeHtml::new(lines.join("\n"))
}

/// Single-choice drop-down
#[derive(Debug, Clone, Default)]
pub struct Select {
    attrs: Attrs,
    choices: Vec<Choice>,
}

impl Select {
    /// Create a select with no options
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            choices: Vec::new(),
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
}

impl Widget for Select {
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
        // An empty value selects the blank option, if any.
        let selected = vec![value.to_text().unwrap_or_default()];
        Ok(render_select(&self.attrs, name, attrs, &self.choices, &selected, false))
    }
}

/// Multiple-choice list box
#[derive(Debug, Clone)]
pub struct SelectMultiple {
    attrs: Attrs,
    choices: Vec<Choice>,
}

impl SelectMultiple {
    /// Create a multiple select with no options
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            attrs: attrs.unwrap_or_default(),
            choices: Vec::new(),
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
}

impl Widget for SelectMultiple {
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
        let mut widget_attrs = self.attrs.clone();
        widget_attrs.insert("multiple", "multiple");
        Ok(render_select(
            &widget_attrs,
            name,
            attrs,
            &self.choices,
            &value.to_list(),
            true,
        ))
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        let values = data.get_list(name);
        if values.is_empty() && !data.contains(name) {
            WidgetValue::Empty
        } else {
            WidgetValue::List(values.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;

    fn env() -> WidgetEnv {
        WidgetEnv::new(WidgetConfig::default()).unwrap()
    }

    fn beatles() -> Vec<Choice> {
        vec![
            Choice::option("J", "John"),
            Choice::option("P", "Paul"),
            Choice::option("G", "George"),
            Choice::option("R", "Ringo"),
        ]
    }

    #[test]
    fn test_select_renders_selected_option() {
        let html = Select::new(None)
            .with_choices(beatles())
            .render(&env(), "beatle", &"J".into(), None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            "<select name=\"beatle\">\n\
             <option value=\"J\" selected=\"selected\">John</option>\n\
             <option value=\"P\">Paul</option>\n\
             <option value=\"G\">George</option>\n\
             <option value=\"R\">Ringo</option>\n\
             </select>"
        );
    }

    #[test]
    fn test_single_select_marks_only_first_duplicate() {
        let html = Select::new(None)
            .with_choices([("0", "0"), ("1", "1"), ("0", "extra")])
            .render(&env(), "choices", &"0".into(), None)
            .unwrap();
        assert_eq!(html.as_str().matches("selected=\"selected\"").count(), 1);
    }

    #[test]
    fn test_empty_value_selects_blank_option() {
        let html = Select::new(None)
            .with_choices([("", "---------"), ("a", "A")])
            .render(&env(), "x", &WidgetValue::Empty, None)
            .unwrap();
        assert!(html
            .as_str()
            .contains(r#"<option value="" selected="selected">---------</option>"#));
    }

    #[test]
    fn test_optgroups_and_disabled_options() {
        let html = Select::new(None)
            .with_choices([
                Choice::option("outer", "Outer"),
                Choice::group("Group <1>", [("inner1", "Inner 1"), ("inner2", "Inner 2")]),
                Choice::Option(SelectOption::disabled("off", "Off")),
            ])
            .render(&env(), "nested", &"inner2".into(), None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            "<select name=\"nested\">\n\
             <option value=\"outer\">Outer</option>\n\
             <optgroup label=\"Group &lt;1&gt;\">\n\
             <option value=\"inner1\">Inner 1</option>\n\
             <option value=\"inner2\" selected=\"selected\">Inner 2</option>\n\
             </optgroup>\n\
             <option value=\"off\" disabled=\"disabled\">Off</option>\n\
             </select>"
        );
    }

    #[test]
    fn test_labels_are_escaped() {
        let html = Select::new(None)
            .with_choices([("a\"b", "<b>bold</b>")])
            .render(&env(), "x", &WidgetValue::Empty, None)
            .unwrap();
        assert!(html
            .as_str()
            .contains(r#"<option value="a&quot;b">&lt;b&gt;bold&lt;/b&gt;</option>"#));
    }

    #[test]
    fn test_select_multiple() {
        let html = SelectMultiple::new(None)
            .with_choices(beatles())
            .render(&env(), "beatles", &WidgetValue::from(&["J", "P"][..]), None)
            .unwrap();
        assert!(html.as_str().starts_with(r#"<select multiple="multiple" name="beatles">"#));
        assert_eq!(html.as_str().matches("selected=\"selected\"").count(), 2);
    }

    #[test]
    fn test_select_multiple_value_from_data() {
        let data = FormData::from_pairs([("b", "J"), ("b", "P")]);
        let widget = SelectMultiple::new(None);
        assert_eq!(
            widget.value_from_data(&data, "b"),
            WidgetValue::List(vec!["J".into(), "P".into()])
        );
        assert_eq!(widget.value_from_data(&data, "missing"), WidgetValue::Empty);
    }
}
