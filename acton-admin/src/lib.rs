//! acton-admin: form widgets for HTMX admin interfaces
//!
//! Renders admin form controls (date and time pickers, radio and checkbox
//! groups, file uploads, styled text inputs) as HTML fragments. Admin widgets
//! specialise a small set of base widgets: they inject default CSS classes,
//! wrap the base markup in decorative templates and declare the vendor
//! assets their client-side behaviour needs.
//!
//! # Design Principles
//!
//! 1. **Escaped by Default**: every value and label is escaped; only
//!    [`SafeHtml`](html::SafeHtml) passes through untouched
//! 2. **Restylable Markup**: decorations live in minijinja templates that a
//!    deployment can override on disk
//! 3. **HTMX-Friendly**: rendered widgets are axum responses, ready to be
//!    swapped in as partials
//!
//! # Quick Start
//!
//! ```rust
//! use acton_admin::prelude::*;
//!
//! # fn main() -> Result<(), WidgetError> {
//! let env = WidgetEnv::new(WidgetConfig::default())?;
//!
//! let widget = AdminRadioSelect::new(Some(Attrs::new().with("inline", true)))
//!     .with_choices([("draft", "Draft"), ("live", "Live")]);
//! let html = env.render(&widget, "status", &"live".into(), None)?;
//!
//! assert!(html.as_str().contains(r#"class="radio-inline""#));
//! assert!(html.as_str().contains(r#"checked="checked""#));
//! # Ok(())
//! # }
//! ```

pub mod attrs;
pub mod choices;
pub mod config;
pub mod context;
pub mod error;
pub mod html;
pub mod media;
pub mod observability;
pub mod templates;
pub mod value;
pub mod widgets;

pub use error::WidgetError;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use acton_admin::prelude::*;
    //! ```

    pub use crate::attrs::{flatatt, AttrValue, Attrs};
    pub use crate::choices::{choices, Choice, SelectOption};
    pub use crate::config::WidgetConfig;
    pub use crate::context::{flatten_context, LayeredContext, TemplateContext};
    pub use crate::error::{WidgetError, WidgetResult};
    pub use crate::html::{conditional_escape, escape, SafeHtml};
    pub use crate::media::{Media, VendorRegistry};
    pub use crate::value::{FileRef, FormData, UploadedFile, WidgetValue};
    pub use crate::widgets::admin::{
        AdminCheckboxSelect, AdminCommaSeparatedIntegerFieldWidget, AdminDateWidget,
        AdminFileWidget, AdminIntegerFieldWidget, AdminRadioSelect, AdminSelectMultiple,
        AdminSelectWidget, AdminSplitDateTime, AdminTextInputWidget, AdminTextareaWidget,
        AdminTimeWidget, AdminURLFieldWidget,
    };
    pub use crate::widgets::{Widget, WidgetEnv};
}
