//! Admin widgets
//!
//! Each admin widget specialises a base widget: it injects default CSS
//! classes and attributes (caller attributes win), wraps the base markup in
//! the admin's decorative templates and declares the vendor assets its
//! client-side behaviour needs.
//!
//! ```rust
//! use acton_admin::prelude::*;
//!
//! # fn example() -> Result<(), WidgetError> {
//! let env = WidgetEnv::new(WidgetConfig::default())?;
//! let widget = AdminDateWidget::new(None);
//! let html = env.render(&widget, "published", &WidgetValue::Empty, None)?;
//! assert!(html.as_str().contains(r#"<input class="date-field" name="published" size="10" type="text" />"#));
//! assert!(html.as_str().contains(">Today</button>"));
//! # Ok(())
//! # }
//! ```

use minijinja::Value;

use super::{
    AdminChoiceRenderer, CheckboxSelectMultiple, ClearableFileInput, DateInput, Input,
    RadioSelect, Select, SelectMultiple, SplitDateTimeWidget, Textarea, TimeInput, Widget,
    WidgetEnv,
};
use crate::attrs::Attrs;
use crate::choices::Choice;
use crate::error::WidgetError;
use crate::html::SafeHtml;
use crate::templates;
use crate::value::{FormData, WidgetValue};

/// Forward the non-rendering parts of [`Widget`] to a wrapped widget
macro_rules! delegate_widget {
    ($field:ident) => {
        fn attrs(&self) -> &Attrs {
            self.$field.attrs()
        }

        fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
            self.$field.value_from_data(data, name)
        }

        fn id_for_label(&self, id: &str) -> String {
            self.$field.id_for_label(id)
        }

        fn is_required(&self) -> bool {
            self.$field.is_required()
        }
    };
}

/// A base widget with a default CSS class and no extra markup
macro_rules! styled_widget {
    ($(#[$meta:meta])* $name:ident($base:ty) = $ctor:path, class = $class:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: $base,
        }

        impl $name {
            #[doc = concat!("Create the widget with `class=\"", $class, "\"` unless overridden")]
            #[must_use]
            pub fn new(attrs: Option<Attrs>) -> Self {
                Self {
                    inner: $ctor(Some(Attrs::with_defaults(&[("class", $class)], attrs))),
                }
            }
        }

        impl Widget for $name {
            delegate_widget!(inner);

            fn render(
                &self,
                env: &WidgetEnv,
                name: &str,
                value: &WidgetValue,
                attrs: Option<&Attrs>,
            ) -> Result<SafeHtml, WidgetError> {
                self.inner.render(env, name, value, attrs)
            }
        }
    };
}

/// Wrap an input in a picker template with an addon button
fn render_picker(
    env: &WidgetEnv,
    template: &str,
    input: SafeHtml,
    button_label: &str,
) -> Result<SafeHtml, WidgetError> {
    env.render_template(
        template,
        minijinja::context! {
            input => Value::from(input),
            button_label => Value::from(SafeHtml::escaped(button_label)),
        },
    )
}

/// Date picker: calendar addon and a "Today" button
#[derive(Debug, Clone)]
pub struct AdminDateWidget {
    inner: DateInput,
}

impl AdminDateWidget {
    /// Create a date picker with `class="date-field" size="10"` unless overridden
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self::with_format(attrs, None)
    }

    /// Create a date picker with an explicit input format
    #[must_use]
    pub fn with_format(attrs: Option<Attrs>, format: Option<String>) -> Self {
        let attrs = Attrs::with_defaults(&[("class", "date-field"), ("size", "10")], attrs);
        Self {
            inner: DateInput::new(Some(attrs), format),
        }
    }
}

impl Widget for AdminDateWidget {
    delegate_widget!(inner);

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let input = self.inner.render(env, name, value, attrs)?;
        render_picker(env, templates::DATE, input, &env.config().labels.today)
    }

    fn media_tags(&self) -> Vec<&'static str> {
        vec!["datepicker.js", "datepicker.css", "xadmin.widget.datetime.js"]
    }
}

/// Time picker: clock addon and a "Now" button
#[derive(Debug, Clone)]
pub struct AdminTimeWidget {
    inner: TimeInput,
}

impl AdminTimeWidget {
    /// Create a time picker with `class="time-field" size="8"` unless overridden
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self::with_format(attrs, None)
    }

    /// Create a time picker with an explicit input format
    #[must_use]
    pub fn with_format(attrs: Option<Attrs>, format: Option<String>) -> Self {
        let attrs = Attrs::with_defaults(&[("class", "time-field"), ("size", "8")], attrs);
        Self {
            inner: TimeInput::new(Some(attrs), format),
        }
    }
}

impl Widget for AdminTimeWidget {
    delegate_widget!(inner);

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        let input = self.inner.render(env, name, value, attrs)?;
        render_picker(env, templates::TIME, input, &env.config().labels.now)
    }

    fn media_tags(&self) -> Vec<&'static str> {
        vec![
            "datepicker.js",
            "clockpicker.js",
            "clockpicker.css",
            "xadmin.widget.datetime.js",
        ]
    }
}

/// Date picker and time picker side by side
#[derive(Debug)]
pub struct AdminSplitDateTime {
    inner: SplitDateTimeWidget,
}

impl AdminSplitDateTime {
    /// Create the split widget; `attrs` are passed to both pickers
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            inner: SplitDateTimeWidget::from_widgets(
                Box::new(AdminDateWidget::new(None)),
                Box::new(AdminTimeWidget::new(None)),
                attrs,
                Some(templates::SPLIT_DATETIME),
            ),
        }
    }
}

impl Widget for AdminSplitDateTime {
    delegate_widget!(inner);

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
}

/// Select enhanced client-side by the admin's select script
#[derive(Debug, Clone)]
pub struct AdminSelectWidget {
    inner: Select,
}

impl AdminSelectWidget {
    /// Create the select
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            inner: Select::new(attrs),
        }
    }

    /// Set the options
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        self.inner = self.inner.with_choices(choices);
        self
    }
}

impl Widget for AdminSelectWidget {
    delegate_widget!(inner);

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
        vec!["select.js", "select.css", "xadmin.widget.select.js"]
    }
}

/// Radio group laid out one option per line with bootstrap classes
pub type AdminRadioSelect = RadioSelect<AdminChoiceRenderer>;

/// Checkbox group laid out one option per line with bootstrap classes
pub type AdminCheckboxSelect = CheckboxSelectMultiple<AdminChoiceRenderer>;

styled_widget!(
    /// Multiple select with `class="select-multi"`
    AdminSelectMultiple(SelectMultiple) = SelectMultiple::new,
    class = "select-multi"
);

impl AdminSelectMultiple {
    /// Set the options
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        self.inner = self.inner.with_choices(choices);
        self
    }
}

/// Clearable file input in the admin's `file-upload` markup
#[derive(Debug, Clone)]
pub struct AdminFileWidget {
    inner: ClearableFileInput,
}

impl AdminFileWidget {
    /// Create the file widget
    #[must_use]
    pub fn new(attrs: Option<Attrs>) -> Self {
        Self {
            inner: ClearableFileInput::with_templates(
                attrs,
                templates::ADMIN_FILE_INITIAL,
                templates::ADMIN_FILE_CLEAR,
            ),
        }
    }

    /// Mark the field as required, which hides the clear checkbox
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.inner = self.inner.required(required);
        self
    }
}

impl Widget for AdminFileWidget {
    delegate_widget!(inner);

    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        self.inner.render(env, name, value, attrs)
    }
}

styled_widget!(
    /// Text area with `class="textarea-field"`
    AdminTextareaWidget(Textarea) = Textarea::new,
    class = "textarea-field"
);

styled_widget!(
    /// Text input with `class="text-field"`
    AdminTextInputWidget(Input) = Input::text,
    class = "text-field"
);

styled_widget!(
    /// URL input with `class="url-field"`
    AdminURLFieldWidget(Input) = Input::text,
    class = "url-field"
);

styled_widget!(
    /// Integer input with `class="int-field"`
    AdminIntegerFieldWidget(Input) = Input::text,
    class = "int-field"
);

styled_widget!(
    /// Comma separated integers with `class="sep-int-field"`
    AdminCommaSeparatedIntegerFieldWidget(Input) = Input::text,
    class = "sep-int-field"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::INLINE;
    use crate::config::{StaticSettings, WidgetConfig};
    use crate::value::{FileRef, UploadedFile};
    use chrono::{NaiveDate, NaiveTime};

    fn env() -> WidgetEnv {
        WidgetEnv::new(WidgetConfig::default()).unwrap()
    }

    #[test]
    fn test_date_widget_markup() {
        let date = NaiveDate::from_ymd_opt(2013, 5, 1).unwrap();
        let html = AdminDateWidget::new(None)
            .render(&env(), "d", &date.into(), None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<div class="input-group date bootstrap-datepicker">"#,
                r#"<span class="input-group-addon"><i class="fa fa-calendar"></i></span>"#,
                r#"<input class="date-field" name="d" size="10" type="text" value="2013-05-01" />"#,
                r#"<span class="input-group-btn"><button class="btn btn-default" type="button">Today</button></span>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn test_caller_attrs_override_defaults() {
        let widget = AdminDateWidget::new(Some(Attrs::new().with("class", "custom")));
        let html = widget.render(&env(), "d", &WidgetValue::Empty, None).unwrap();
        assert!(html
            .as_str()
            .contains(r#"<input class="custom" name="d" size="10" type="text" />"#));
    }

    #[test]
    fn test_time_widget_markup() {
        let time = NaiveTime::from_hms_opt(13, 45, 0).unwrap();
        let html = AdminTimeWidget::new(None)
            .render(&env(), "t", &time.into(), None)
            .unwrap();
        assert!(html
            .as_str()
            .starts_with(r#"<div class="input-group time bootstrap-clockpicker"><span class="input-group-addon"><i class="fa fa-clock-o"></i></span>"#));
        assert!(html
            .as_str()
            .contains(r#"<input class="time-field" name="t" size="8" type="text" value="13:45:00" />"#));
        assert!(html.as_str().contains(">Now</button>"));
    }

    #[test]
    fn test_labels_come_from_config() {
        let mut config = WidgetConfig::default();
        config.labels.today = "Heute".into();
        let env = WidgetEnv::new(config).unwrap();
        let html = AdminDateWidget::new(None)
            .render(&env, "d", &WidgetValue::Empty, None)
            .unwrap();
        assert!(html.as_str().contains(">Heute</button>"));
    }

    #[test]
    fn test_split_datetime() {
        let value = NaiveDate::from_ymd_opt(2013, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let html = AdminSplitDateTime::new(None)
            .render(&env(), "when", &value.into(), Some(&Attrs::new().with("id", "id_when")))
            .unwrap();
        let html = html.as_str();
        assert!(html.starts_with(r#"<div class="datetime clearfix"><div class="input-group date bootstrap-datepicker">"#));
        assert!(html.contains(r#"id="id_when_0" name="when_0" size="10" type="text" value="2013-05-01""#));
        assert!(html.contains(r#"id="id_when_1" name="when_1" size="8" type="text" value="08:00:00""#));
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn test_split_datetime_media_is_merged() {
        let tags = AdminSplitDateTime::new(None).media_tags();
        assert_eq!(
            tags,
            [
                "datepicker.js",
                "datepicker.css",
                "xadmin.widget.datetime.js",
                "clockpicker.js",
                "clockpicker.css",
            ]
        );
    }

    #[test]
    fn test_widget_media_resolves() {
        let mut config = WidgetConfig::default();
        config.static_files = StaticSettings {
            debug: true,
            ..StaticSettings::default()
        };
        let env = WidgetEnv::new(config).unwrap();
        let media = env.media(&AdminSelectWidget::new(None)).unwrap();
        assert!(media.js().iter().any(|u| u == "/static/xadmin/js/xadmin.widget.select.js"));
        assert!(!media.css().is_empty());
    }

    #[test]
    fn test_radio_select_block_layout() {
        let widget = AdminRadioSelect::new(Some(Attrs::new().with("class", "form-control")))
            .with_choices([("a", "Alpha"), ("b", "Beta")]);
        let html = widget
            .render(&env(), "r", &"b".into(), Some(&Attrs::new().with("id", "id_r")))
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<div class="radio"><label for="id_r_0"><input id="id_r_0" name="r" type="radio" value="a" /> Alpha</label></div>"#,
                "\n",
                r#"<div class="radio"><label for="id_r_1"><input checked="checked" id="id_r_1" name="r" type="radio" value="b" /> Beta</label></div>"#
            )
        );
    }

    #[test]
    fn test_checkbox_select_inline_layout() {
        let widget = AdminCheckboxSelect::new(Some(Attrs::new().with(INLINE, true).with("class", "form-control big")))
            .with_choices([("1", "One"), ("2", "Two")]);
        let html = widget
            .render(&env(), "n", &WidgetValue::List(vec!["2".into()]), None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<label class="checkbox-inline"><input class="form-control big" name="n" type="checkbox" value="1" /> One</label>"#,
                "\n",
                r#"<label class="checkbox-inline"><input checked="checked" class="form-control big" name="n" type="checkbox" value="2" /> Two</label>"#
            )
        );
    }

    #[test]
    fn test_checkbox_select_block_keeps_form_control() {
        let widget = AdminCheckboxSelect::new(Some(Attrs::new().with("class", "form-control")))
            .with_choices([("1", "One")]);
        let html = widget.render(&env(), "n", &WidgetValue::Empty, None).unwrap();
        assert_eq!(
            html.as_str(),
            r#"<div class="checkbox"><label><input class="form-control" name="n" type="checkbox" value="1" /> One</label></div>"#
        );
    }

    #[test]
    fn test_checkbox_select_empty_value_checks_nothing() {
        let widget = AdminCheckboxSelect::new(None).with_choices([("1", "One")]);
        let html = widget.render(&env(), "n", &WidgetValue::Empty, None).unwrap();
        assert!(!html.as_str().contains("checked"));
    }

    #[test]
    fn test_select_multiple_default_class() {
        let html = AdminSelectMultiple::new(None)
            .with_choices([("x", "X")])
            .render(&env(), "m", &WidgetValue::Empty, None)
            .unwrap();
        assert!(html
            .as_str()
            .starts_with(r#"<select class="select-multi" multiple="multiple" name="m">"#));
    }

    #[test]
    fn test_file_widget_with_initial_value() {
        let value = WidgetValue::File(FileRef::new("report.pdf", "/media/report.pdf"));
        let html = AdminFileWidget::new(None)
            .render(&env(), "doc", &value, None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            concat!(
                r#"<p class="file-upload">Currently: <a href="/media/report.pdf">report.pdf</a> "#,
                r#"<span class="clearable-file-input"><input id="doc-clear_id" name="doc-clear" type="checkbox" /> "#,
                r#"<label for="doc-clear_id">Clear</label></span><br />"#,
                r#"Change: <input name="doc" type="file" /></p>"#
            )
        );
    }

    #[test]
    fn test_file_widget_submission() {
        let widget = AdminFileWidget::new(None);
        let mut data = FormData::from_pairs([("doc-clear", "on")]);
        assert_eq!(widget.value_from_data(&data, "doc"), WidgetValue::Clear);
        data.add_file("doc", UploadedFile::new("x.pdf", 10));
        assert_eq!(widget.value_from_data(&data, "doc"), WidgetValue::Contradiction);
        assert!(widget.clone().required(true).is_required());
    }

    #[test]
    fn test_styled_inputs() {
        let env = env();
        let cases: [(&dyn Widget, &str); 4] = [
            (&AdminTextInputWidget::new(None), "text-field"),
            (&AdminURLFieldWidget::new(None), "url-field"),
            (&AdminIntegerFieldWidget::new(None), "int-field"),
            (&AdminCommaSeparatedIntegerFieldWidget::new(None), "sep-int-field"),
        ];
        for (widget, class) in cases {
            let html = widget.render(&env, "f", &"1".into(), None).unwrap();
            assert_eq!(
                html.as_str(),
                format!(r#"<input class="{class}" name="f" type="text" value="1" />"#)
            );
        }
    }

    #[test]
    fn test_textarea_widget() {
        let html = AdminTextareaWidget::new(Some(Attrs::new().with("rows", "3")))
            .render(&env(), "notes", &WidgetValue::Empty, None)
            .unwrap();
        assert_eq!(
            html.as_str(),
            "<textarea class=\"textarea-field\" cols=\"40\" name=\"notes\" rows=\"3\">\r\n</textarea>"
        );
    }
}
