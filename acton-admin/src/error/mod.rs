//! Error types and error handling

use thiserror::Error;

use crate::templates::TemplateError;

/// Errors raised while rendering widgets or resolving their media
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A decoration template failed to render
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A media tag matched no vendor entry
    #[error("unknown vendor asset: {0}")]
    UnknownVendor(String),

    /// Indexed access past the end of a choice list
    #[error("choice index {index} out of range ({len} choices)")]
    ChoiceIndex {
        /// Requested index
        index: usize,
        /// Number of available choices
        len: usize,
    },

    /// A date/time format string could not be applied
    #[error("invalid format string: {0}")]
    InvalidFormat(String),
}

/// Result alias for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;
