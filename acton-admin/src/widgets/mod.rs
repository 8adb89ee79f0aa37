//! Form widgets
//!
//! A widget renders one form field as HTML and parses the submitted value
//! back out of [`FormData`]. The base widgets in this module implement the
//! plain rendering contract; [`admin`] specialises them with admin defaults
//! and decorative markup.
//!
//! # Quick Start
//!
//! ```rust
//! use acton_admin::prelude::*;
//!
//! # fn example() -> Result<(), WidgetError> {
//! let env = WidgetEnv::new(WidgetConfig::default())?;
//!
//! let widget = AdminTextInputWidget::new(None);
//! let html = env.render(&widget, "title", &"Hello".into(), None)?;
//! assert_eq!(
//!     html.as_str(),
//!     r#"<input class="text-field" name="title" type="text" value="Hello" />"#
//! );
//! # Ok(())
//! # }
//! ```

pub mod admin;
mod choice;
mod input;
mod multi;
mod select;

pub use choice::{
    AdminChoiceRenderer, CheckboxSelectMultiple, ChoiceInput, ChoiceRenderer, ListChoiceRenderer,
    RadioSelect,
};
pub use input::{
    CheckboxInput, ClearableFileInput, DateInput, FileInput, Input, Textarea, TimeInput,
};
pub use multi::{MultiWidget, SplitDateTimeWidget};
pub use select::{Select, SelectMultiple};

use std::fmt;

use crate::attrs::Attrs;
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::html::SafeHtml;
use crate::media::{Media, VendorRegistry};
use crate::templates::WidgetTemplates;
use crate::value::{FormData, WidgetValue};

/// Rendering contract shared by every widget
pub trait Widget: fmt::Debug + Send + Sync {
    /// Attributes configured on the widget itself
    fn attrs(&self) -> &Attrs;

    /// Widget attributes updated with call-time attributes
    fn build_attrs(&self, extra: Option<&Attrs>) -> Attrs {
        self.attrs().merged(extra)
    }

    /// Render the field as HTML
    ///
    /// # Errors
    ///
    /// Returns error if a decoration template fails or a value cannot be
    /// formatted.
    fn render(
        &self,
        env: &WidgetEnv,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError>;

    /// Vendor tags of the scripts and stylesheets the widget needs
    fn media_tags(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Extract this widget's value from a submission
    fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        data.get(name)
            .map_or(WidgetValue::Empty, |v| WidgetValue::Text(v.to_owned()))
    }

    /// The id a `<label for>` should point at, given the field id
    fn id_for_label(&self, id: &str) -> String {
        id.to_owned()
    }

    /// Whether the field must be filled in
    fn is_required(&self) -> bool {
        false
    }
}

/// Shared rendering environment: configuration, templates and vendor assets
#[derive(Debug, Clone)]
pub struct WidgetEnv {
    config: WidgetConfig,
    templates: WidgetTemplates,
    vendors: VendorRegistry,
}

impl WidgetEnv {
    /// Build an environment from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the widget templates cannot be loaded.
    pub fn new(config: WidgetConfig) -> Result<Self, WidgetError> {
        let templates = WidgetTemplates::new(config.templates.override_dir.clone())?;
        let vendors = VendorRegistry::new(config.static_files.clone());
        Ok(Self {
            config,
            templates,
            vendors,
        })
    }

    /// Build an environment from existing parts
    #[must_use]
    pub const fn from_parts(
        config: WidgetConfig,
        templates: WidgetTemplates,
        vendors: VendorRegistry,
    ) -> Self {
        Self {
            config,
            templates,
            vendors,
        }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Decoration templates
    #[must_use]
    pub const fn templates(&self) -> &WidgetTemplates {
        &self.templates
    }

    /// Vendor asset registry
    #[must_use]
    pub const fn vendors(&self) -> &VendorRegistry {
        &self.vendors
    }

    /// Render a widget
    ///
    /// # Errors
    ///
    /// Propagates the widget's rendering error.
    pub fn render(
        &self,
        widget: &dyn Widget,
        name: &str,
        value: &WidgetValue,
        attrs: Option<&Attrs>,
    ) -> Result<SafeHtml, WidgetError> {
        tracing::trace!(widget = ?widget, name, "rendering widget");
        widget.render(self, name, value, attrs)
    }

    /// Render a decoration template with a context
    pub(crate) fn render_template(
        &self,
        name: &str,
        ctx: minijinja::Value,
    ) -> Result<SafeHtml, WidgetError> {
        Ok(SafeHtml::new(self.templates.render(name, ctx)?))
    }

    /// Resolve the media a widget declares
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownVendor`] for unresolvable tags.
    pub fn media(&self, widget: &dyn Widget) -> Result<Media, WidgetError> {
        self.vendors.vendor(&widget.media_tags())
    }

    /// Resolve and merge the media of several widgets
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownVendor`] for unresolvable tags.
    pub fn media_for<'a>(
        &self,
        widgets: impl IntoIterator<Item = &'a dyn Widget>,
    ) -> Result<Media, WidgetError> {
        let mut media = Media::new();
        for widget in widgets {
            media.merge(&self.media(widget)?);
        }
        Ok(media)
    }
}
