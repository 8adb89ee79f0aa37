//! Widget decoration templates
//!
//! The markup that admin widgets wrap around their base inputs (picker
//! addons, file-upload paragraphs, inline/block choice layouts) lives in
//! minijinja templates rather than in code, so deployments can restyle it.
//!
//! Templates are resolved in order:
//! 1. Customizations in the configured override directory
//! 2. Embedded defaults compiled into the binary
//!
//! Every value handed to these templates is already-escaped [`SafeHtml`],
//! so autoescaping never double-escapes widget output.
//!
//! [`SafeHtml`]: crate::html::SafeHtml
//!
//! # Example
//!
//! ```rust
//! use acton_admin::html::SafeHtml;
//! use acton_admin::templates::WidgetTemplates;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let templates = WidgetTemplates::embedded()?;
//! let html = templates.render("widgets/split_datetime.html", minijinja::context! {
//!     widgets => vec![
//!         minijinja::Value::from(SafeHtml::new("<input name=\"d\" />")),
//!     ],
//! })?;
//! assert!(html.starts_with(r#"<div class="datetime clearfix">"#));
//! # Ok(())
//! # }
//! ```

mod loader;

pub use loader::{TemplateError, WidgetTemplates};

/// Date picker wrapper
pub const DATE: &str = "widgets/date.html";
/// Time picker wrapper
pub const TIME: &str = "widgets/time.html";
/// Split date/time wrapper
pub const SPLIT_DATETIME: &str = "widgets/split_datetime.html";
/// Clearable file input with an initial value
pub const CLEARABLE_FILE_INITIAL: &str = "widgets/clearable_file_initial.html";
/// Clear checkbox of a clearable file input
pub const CLEARABLE_FILE_CLEAR: &str = "widgets/clearable_file_clear.html";
/// Admin file input with an initial value
pub const ADMIN_FILE_INITIAL: &str = "widgets/admin_file_initial.html";
/// Clear checkbox of the admin file input
pub const ADMIN_FILE_CLEAR: &str = "widgets/admin_file_clear.html";
/// Inline radio/checkbox option
pub const CHOICE_INLINE: &str = "widgets/choice_inline.html";
/// Block radio/checkbox option
pub const CHOICE_BLOCK: &str = "widgets/choice_block.html";

/// Names of all widget templates
pub const TEMPLATE_NAMES: &[&str] = &[
    DATE,
    TIME,
    SPLIT_DATETIME,
    CLEARABLE_FILE_INITIAL,
    CLEARABLE_FILE_CLEAR,
    ADMIN_FILE_INITIAL,
    ADMIN_FILE_CLEAR,
    CHOICE_INLINE,
    CHOICE_BLOCK,
];
