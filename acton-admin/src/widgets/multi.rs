//! Widgets composed of several subwidgets

use minijinja::Value;

use super::input::{DateInput, TimeInput};
use super::{Widget, WidgetEnv};
use crate::attrs::Attrs;
use crate::error::WidgetError;
use crate::html::SafeHtml;
use crate::value::{FormData, WidgetValue};

/// A field rendered by several subwidgets
///
/// Subwidget `i` is rendered as `{name}_{i}` with id `{id}_{i}` and receives
/// element `i` of the decompressed value. Output is concatenated, or passed
/// as `widgets` to a wrapper template.
#[derive(Debug)]
pub struct MultiWidget {
    widgets: Vec<Box<dyn Widget>>,
    attrs: Attrs,
    template: Option<&'static str>,
}

impl MultiWidget {
    /// Create a multi widget from its subwidgets
    #[must_use]
    pub fn new(widgets: Vec<Box<dyn Widget>>, attrs: Option<Attrs>) -> Self {
        Self {
            widgets,
            attrs: attrs.unwrap_or_default(),
            template: None,
        }
    }

    /// Wrap the rendered subwidgets with a template
    #[must_use]
    pub const fn with_template(mut self, template: &'static str) -> Self {
        self.template = Some(template);
        self
    }

    /// The subwidgets
    #[must_use]
    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    fn format_output(&self, env: &WidgetEnv, rendered: Vec<SafeHtml>) -> Result<SafeHtml, WidgetError> {
        match self.template {
            Some(template) => {
                let widgets: Vec<Value> = rendered.into_iter().map(Value::from).collect();
                env.render_template(template, minijinja::context! { widgets => widgets })
            }
            None => Ok(SafeHtml::join(rendered, "")),
        }
    }
}

impl Widget for MultiWidget {
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
        let values = value.decompress();
        let final_attrs = self.build_attrs(attrs);
        let id = final_attrs.get_text("id").filter(|id| !id.is_empty());

        let mut rendered = Vec::with_capacity(self.widgets.len());
        for (i, widget) in self.widgets.iter().enumerate() {
            let mut sub_attrs = final_attrs.clone();
            if let Some(id) = id {
                sub_attrs.insert("id", format!("{id}_{i}"));
            }
            let sub_value = values.get(i).cloned().unwrap_or_default();
            rendered.push(widget.render(env, &format!("{name}_{i}"), &sub_value, Some(&sub_attrs))?);
        }
        self.format_output(env, rendered)
    }

    fn media_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        for tag in self.widgets.iter().flat_map(|w| w.media_tags()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        WidgetValue::Multi(
            self.widgets
                .iter()
                .enumerate()
                .map(|(i, widget)| widget.value_from_data(data, &format!("{name}_{i}")))
                .collect(),
        )
    }

    fn id_for_label(&self, id: &str) -> String {
        if id.is_empty() {
            String::new()
        } else {
            format!("{id}_0")
        }
    }
}

/// Date input followed by a time input
#[derive(Debug)]
pub struct SplitDateTimeWidget {
    inner: MultiWidget,
}

impl SplitDateTimeWidget {
    /// Create a split date/time widget with optional input formats
    #[must_use]
    pub fn new(attrs: Option<Attrs>, date_format: Option<String>, time_format: Option<String>) -> Self {
        let widgets: Vec<Box<dyn Widget>> = vec![
            Box::new(DateInput::new(attrs.clone(), date_format)),
            Box::new(TimeInput::new(attrs.clone(), time_format)),
        ];
        Self {
            inner: MultiWidget::new(widgets, attrs),
        }
    }

    /// Build from explicit date and time subwidgets
    #[must_use]
    pub fn from_widgets(
        date: Box<dyn Widget>,
        time: Box<dyn Widget>,
        attrs: Option<Attrs>,
        template: Option<&'static str>,
    ) -> Self {
        let inner = MultiWidget::new(vec![date, time], attrs);
        Self {
            inner: match template {
                Some(template) => inner.with_template(template),
                None => inner,
            },
        }
    }
}

impl Widget for SplitDateTimeWidget {
    fn attrs(&self) -> &Attrs {
        self.inner.attrs()
    }

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        self.inner.render(env, name, value, attrs)
    }

    fn media_tags(&self) -> Vec<&'static str> {
        self.inner.media_tags()
    }

    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        self.inner.value_from_data(data, name)
    }

    fn id_for_label(&self, id: &str) -> String {
        self.inner.id_for_label(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;
    use crate::templates;
    use crate::widgets::Input;
    use chrono::NaiveDate;

    fn env() -> WidgetEnv {
        WidgetEnv::new(WidgetConfig::default()).unwrap()
    }

    #[test]
    fn test_split_datetime_renders_both_parts() {
        let value = NaiveDate::from_ymd_opt(2006, 1, 10)
            .unwrap()
            .and_hms_micro_opt(7, 30, 59, 123)
            .unwrap();
        let html = SplitDateTimeWidget::new(None, None, None)
            .render(&env(), "when", &value.into(), Some(&Attrs::new().with("id", "id_when")))
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<input id="id_when_0" name="when_0" type="text" value="2006-01-10" />"#,
                r#"<input id="id_when_1" name="when_1" type="text" value="07:30:59" />"#
            )
        );
    }

    #[test]
    fn test_empty_value_renders_blank_subwidgets() {
        let html = SplitDateTimeWidget::new(None, None, None)
            .render(&env(), "when", &WidgetValue::Empty, None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            r#"<input name="when_0" type="text" /><input name="when_1" type="text" />"#
        );
    }

    #[test]
    fn test_list_value_and_missing_positions() {
        let widget = MultiWidget::new(
            vec![
                Box::new(Input::text(None)),
                Box::new(Input::text(None)),
                Box::new(Input::hidden(None)),
            ],
            None,
        );
        let html = widget
            .render(&env(), "p", &WidgetValue::List(vec!["a".into(), "b".into()]), None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<input name="p_0" type="text" value="a" />"#,
                r#"<input name="p_1" type="text" value="b" />"#,
                r#"<input name="p_2" type="hidden" />"#
            )
        );
    }

    #[test]
    fn test_template_wraps_output() {
        let widget = MultiWidget::new(vec![Box::new(Input::text(None))], None)
            .with_template(templates::SPLIT_DATETIME);
        let html = widget.render(&env(), "x", &WidgetValue::Empty, None).unwrap();
        assert_eq!(
            html.as_str(),
            r#"<div class="datetime clearfix"><input name="x_0" type="text" /></div>"#
        );
    }

    #[test]
    fn test_value_from_data_and_id_for_label() {
        let widget = SplitDateTimeWidget::new(None, None, None);
        let data = FormData::from_pairs([("when_0", "2024-01-01"), ("when_1", "10:00")]);
        assert_eq!(
            widget.value_from_data(&data, "when"),
            WidgetValue::Multi(vec!["2024-01-01".into(), "10:00".into()])
        );
        assert_eq!(widget.id_for_label("id_when"), "id_when_0");
    }
}
