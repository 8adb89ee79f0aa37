//! Widget values and submitted form data
//!
//! [`WidgetValue`] is what a widget renders and what it parses back out of a
//! submission. [`FormData`] holds the submitted, possibly multi-valued fields
//! and uploaded files.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// A stored file that a field currently points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Display name (usually the storage path)
    pub name: String,
    /// Public URL of the file
    pub url: String,
}

impl FileRef {
    /// Create a file reference
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A file received with a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name
    pub filename: String,
    /// Client-supplied content type
    pub content_type: Option<String>,
    /// Size in bytes
    pub size: u64,
}

impl UploadedFile {
    /// Create an uploaded file description
    #[must_use]
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            size,
        }
    }

    /// Set the content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Value rendered by, or parsed from, a widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WidgetValue {
    /// No value
    #[default]
    Empty,
    /// Boolean value (checkboxes)
    Bool(bool),
    /// Single text value
    Text(String),
    /// Several text values (multiple selects, checkbox groups)
    List(Vec<String>),
    /// One value per subwidget (split date/time)
    Multi(Vec<WidgetValue>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Date and time
    DateTime(NaiveDateTime),
    /// Currently stored file
    File(FileRef),
    /// Newly uploaded file
    Upload(UploadedFile),
    /// The user asked to clear a stored file
    Clear,
    /// The user both uploaded a file and asked to clear it
    Contradiction,
}

impl WidgetValue {
    /// Whether this is [`WidgetValue::Empty`]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text form of a scalar value
    ///
    /// Dates and times use ISO formats; list-like values have no single text
    /// form and return `None`, as does [`WidgetValue::Empty`].
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Empty | Self::List(_) | Self::Multi(_) | Self::Clear | Self::Contradiction => {
                None
            }
            Self::Bool(b) => Some(if *b { "True" } else { "False" }.to_owned()),
            Self::Text(s) => Some(s.clone()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::Time(t) => Some(t.format("%H:%M:%S").to_string()),
            Self::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            Self::File(file) => Some(file.name.clone()),
            Self::Upload(file) => Some(file.filename.clone()),
        }
    }

    /// Text values of a list-like value
    ///
    /// Scalars become a one-element list and [`WidgetValue::Empty`] an empty one.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(values) => values.clone(),
            Self::Multi(values) => values.iter().filter_map(Self::to_text).collect(),
            other => other.to_text().into_iter().collect(),
        }
    }

    /// Split a value across subwidgets
    ///
    /// Date-times become `[date, time]` with sub-second precision dropped.
    #[must_use]
    pub fn decompress(&self) -> Vec<Self> {
        match self {
            Self::Multi(values) => values.clone(),
            Self::List(values) => values.iter().cloned().map(Self::Text).collect(),
            Self::DateTime(dt) => {
                let time = dt.time().with_nanosecond(0).unwrap_or_else(|| dt.time());
                vec![Self::Date(dt.date()), Self::Time(time)]
            }
            _ => vec![Self::Empty, Self::Empty],
        }
    }
}

impl From<&str> for WidgetValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for WidgetValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for WidgetValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for WidgetValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[&str]> for WidgetValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl From<NaiveDate> for WidgetValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveTime> for WidgetValue {
    fn from(t: NaiveTime) -> Self {
        Self::Time(t)
    }
}

impl From<NaiveDateTime> for WidgetValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<FileRef> for WidgetValue {
    fn from(file: FileRef) -> Self {
        Self::File(file)
    }
}

impl<T: Into<Self>> From<Option<T>> for WidgetValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Submitted form fields and files
///
/// Fields may repeat; [`FormData::get`] returns the last value and
/// [`FormData::get_list`] all of them in submission order.
///
/// # Examples
///
/// ```rust
/// use acton_admin::value::FormData;
///
/// let data = FormData::from_pairs([("tag", "a"), ("tag", "b"), ("name", "x")]);
/// assert_eq!(data.get("tag"), Some("b"));
/// assert_eq!(data.get_list("tag"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Create empty form data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs, keeping repeats
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::new();
        for (k, v) in pairs {
            data.append(k, v);
        }
        data
    }

    /// Append a value for a field
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Attach an uploaded file
    pub fn add_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.insert(name.into(), file);
    }

    /// Last submitted value for a field
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// All submitted values for a field
    #[must_use]
    pub fn get_list(&self, name: &str) -> &[String] {
        self.values.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether a field was submitted
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Uploaded file for a field
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}
