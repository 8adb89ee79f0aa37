//! Static asset declarations for widgets
//!
//! Widgets name the scripts and stylesheets they need with short vendor tags
//! such as `datepicker.js`. [`VendorRegistry::vendor`] resolves the tags to
//! URLs, picking the development, production or CDN variant of each asset.
//!
//! # Example
//!
//! ```rust
//! use acton_admin::config::StaticSettings;
//! use acton_admin::media::VendorRegistry;
//!
//! # fn example() -> Result<(), acton_admin::WidgetError> {
//! let settings = StaticSettings { debug: true, ..StaticSettings::default() };
//! let vendors = VendorRegistry::new(settings);
//! let media = vendors.vendor(&["datepicker.js", "datepicker.css"])?;
//! assert_eq!(
//!     media.js(),
//!     ["/static/xadmin/vendor/bootstrap-datepicker/js/bootstrap-datepicker.js"]
//! );
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt::Write;

use crate::config::StaticSettings;
use crate::error::WidgetError;
use crate::html::{escape, SafeHtml};

/// Scripts and stylesheets needed by a set of widgets
///
/// Lists keep declaration order and never contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    js: Vec<String>,
    css: Vec<String>,
}

impl Media {
    /// Create empty media
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script URLs
    #[must_use]
    pub fn js(&self) -> &[String] {
        &self.js
    }

    /// Stylesheet URLs
    #[must_use]
    pub fn css(&self) -> &[String] {
        &self.css
    }

    /// Whether no assets are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.js.is_empty() && self.css.is_empty()
    }

    /// Add a script unless already present
    pub fn add_js(&mut self, url: impl Into<String>) {
        push_unique(&mut self.js, url.into());
    }

    /// Add a stylesheet unless already present
    pub fn add_css(&mut self, url: impl Into<String>) {
        push_unique(&mut self.css, url.into());
    }

    /// Append another media declaration
    pub fn merge(&mut self, other: &Self) {
        for url in &other.js {
            self.add_js(url.clone());
        }
        for url in &other.css {
            self.add_css(url.clone());
        }
    }

    /// Render `<link>` and `<script>` tags
    #[must_use]
    pub fn render(&self) -> SafeHtml {
        let mut html = String::new();
        for url in &self.css {
            let _ = writeln!(
                html,
                r#"<link href="{}" type="text/css" media="screen" rel="stylesheet" />"#,
                escape(url)
            );
        }
        for url in &self.js {
            let _ = writeln!(
                html,
                r#"<script type="text/javascript" src="{}"></script>"#,
                escape(url)
            );
        }
        SafeHtml::new(html)
    }
}

fn push_unique(list: &mut Vec<String>, url: String) {
    if !list.contains(&url) {
        list.push(url);
    }
}

/// Asset variant selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
    /// Unminified files
    Dev,
    /// Minified local files
    Production,
    /// Files served from a CDN
    Cdn,
}

impl AssetMode {
    /// Pick the mode for the given static settings
    #[must_use]
    pub const fn from_settings(settings: &StaticSettings) -> Self {
        if settings.debug {
            Self::Dev
        } else if settings.use_cdn {
            Self::Cdn
        } else {
            Self::Production
        }
    }
}

/// Files for one vendor asset in each mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorAsset {
    dev: Vec<String>,
    production: Option<Vec<String>>,
    cdn: Option<Vec<String>>,
}

impl VendorAsset {
    /// Asset with development files only
    #[must_use]
    pub fn dev<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dev: files.into_iter().map(Into::into).collect(),
            production: None,
            cdn: None,
        }
    }

    /// Add minified production files
    #[must_use]
    pub fn production<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.production = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Add CDN files
    #[must_use]
    pub fn cdn<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cdn = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Files for `mode`, falling back CDN, then production, then dev
    #[must_use]
    pub fn files(&self, mode: AssetMode) -> &[String] {
        let cdn = match mode {
            AssetMode::Cdn => self.cdn.as_deref(),
            AssetMode::Production | AssetMode::Dev => None,
        };
        let production = match mode {
            AssetMode::Cdn | AssetMode::Production => self.production.as_deref(),
            AssetMode::Dev => None,
        };
        cdn.or(production).unwrap_or(&self.dev)
    }
}

/// Registry of known vendor assets keyed by dotted tag
#[derive(Debug, Clone)]
pub struct VendorRegistry {
    assets: HashMap<String, VendorAsset>,
    settings: StaticSettings,
}

impl VendorRegistry {
    /// Registry with the built-in admin vendors
    #[must_use]
    pub fn new(settings: StaticSettings) -> Self {
        let mut registry = Self::empty(settings);
        for (tag, asset) in default_vendors() {
            registry.register(tag, asset);
        }
        registry
    }

    /// Registry with no vendors
    #[must_use]
    pub fn empty(settings: StaticSettings) -> Self {
        Self {
            assets: HashMap::new(),
            settings,
        }
    }

    /// Register or replace a vendor asset
    pub fn register(&mut self, tag: impl Into<String>, asset: VendorAsset) {
        self.assets.insert(tag.into(), asset);
    }

    /// Static settings in use
    #[must_use]
    pub const fn settings(&self) -> &StaticSettings {
        &self.settings
    }

    /// Resolve a single tag to asset URLs
    ///
    /// Unregistered tags starting with `xadmin` resolve to the admin's own
    /// `xadmin/{js,css}/{tag}` files.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownVendor`] for any other unknown tag.
    pub fn xstatic(&self, tag: &str) -> Result<Vec<String>, WidgetError> {
        let mode = AssetMode::from_settings(&self.settings);
        let files: Vec<String> = if let Some(asset) = self.assets.get(tag) {
            asset.files(mode).to_vec()
        } else if tag.starts_with("xadmin") {
            match file_type(tag) {
                Some(ext @ ("css" | "js")) => vec![format!("xadmin/{ext}/{tag}")],
                _ => return Err(WidgetError::UnknownVendor(tag.to_string())),
            }
        } else {
            return Err(WidgetError::UnknownVendor(tag.to_string()));
        };

        let lang = self.settings.language.replace('_', "-");
        let urls = files
            .iter()
            .map(|f| self.static_url(&f.replace("{lang}", &lang)))
            .collect();
        tracing::trace!(tag, ?mode, "resolved vendor asset");
        Ok(urls)
    }

    /// Resolve several tags into a [`Media`] declaration
    ///
    /// `.js` tags become scripts and `.css` tags stylesheets.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownVendor`] if any tag cannot be resolved.
    pub fn vendor(&self, tags: &[&str]) -> Result<Media, WidgetError> {
        let mut media = Media::new();
        for tag in tags {
            let urls = self.xstatic(tag)?;
            match file_type(tag) {
                Some("js") => urls.into_iter().for_each(|u| media.add_js(u)),
                Some("css") => urls.into_iter().for_each(|u| media.add_css(u)),
                _ => {}
            }
        }
        Ok(media)
    }

    fn static_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.settings.url, path)
        }
    }
}

fn file_type(tag: &str) -> Option<&str> {
    tag.rsplit_once('.').map(|(_, ext)| ext)
}

fn default_vendors() -> Vec<(&'static str, VendorAsset)> {
    vec![
        (
            "jquery.js",
            VendorAsset::dev(["xadmin/vendor/jquery/jquery.js"])
                .production(["xadmin/vendor/jquery/jquery.min.js"]),
        ),
        (
            "bootstrap.js",
            VendorAsset::dev(["xadmin/vendor/bootstrap/js/bootstrap.js"])
                .production(["xadmin/vendor/bootstrap/js/bootstrap.min.js"])
                .cdn(["https://netdna.bootstrapcdn.com/bootstrap/3.0.2/js/bootstrap.min.js"]),
        ),
        (
            "bootstrap.css",
            VendorAsset::dev(["xadmin/vendor/bootstrap/css/bootstrap.css"])
                .production(["xadmin/vendor/bootstrap/css/bootstrap.min.css"])
                .cdn(["https://netdna.bootstrapcdn.com/bootstrap/3.0.2/css/bootstrap.min.css"]),
        ),
        (
            "font-awesome.css",
            VendorAsset::dev(["xadmin/vendor/font-awesome/css/font-awesome.css"])
                .production(["xadmin/vendor/font-awesome/css/font-awesome.min.css"]),
        ),
        (
            "datepicker.js",
            VendorAsset::dev(["xadmin/vendor/bootstrap-datepicker/js/bootstrap-datepicker.js"]),
        ),
        (
            "datepicker.css",
            VendorAsset::dev(["xadmin/vendor/bootstrap-datepicker/css/datepicker.css"]),
        ),
        (
            "clockpicker.js",
            VendorAsset::dev(["xadmin/vendor/bootstrap-clockpicker/bootstrap-clockpicker.js"])
                .production(["xadmin/vendor/bootstrap-clockpicker/bootstrap-clockpicker.min.js"]),
        ),
        (
            "clockpicker.css",
            VendorAsset::dev(["xadmin/vendor/bootstrap-clockpicker/bootstrap-clockpicker.css"])
                .production(["xadmin/vendor/bootstrap-clockpicker/bootstrap-clockpicker.min.css"]),
        ),
        (
            "select.js",
            VendorAsset::dev([
                "xadmin/vendor/select2/select2.js",
                "xadmin/vendor/select2/select2_locale_{lang}.js",
            ])
            .production([
                "xadmin/vendor/select2/select2.min.js",
                "xadmin/vendor/select2/select2_locale_{lang}.js",
            ]),
        ),
        (
            "select.css",
            VendorAsset::dev(["xadmin/vendor/select2/select2.css"]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(debug: bool, use_cdn: bool) -> StaticSettings {
        StaticSettings {
            url: "/static/".into(),
            debug,
            use_cdn,
            language: "pt_BR".into(),
        }
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(AssetMode::from_settings(&settings(true, true)), AssetMode::Dev);
        assert_eq!(AssetMode::from_settings(&settings(false, true)), AssetMode::Cdn);
        assert_eq!(AssetMode::from_settings(&settings(false, false)), AssetMode::Production);
    }

    #[test]
    fn test_cdn_falls_back_to_production_then_dev() {
        let vendors = VendorRegistry::new(settings(false, true));
        assert_eq!(
            vendors.xstatic("bootstrap.js").unwrap(),
            ["https://netdna.bootstrapcdn.com/bootstrap/3.0.2/js/bootstrap.min.js"]
        );
        assert_eq!(
            vendors.xstatic("jquery.js").unwrap(),
            ["/static/xadmin/vendor/jquery/jquery.min.js"]
        );
        assert_eq!(
            vendors.xstatic("datepicker.css").unwrap(),
            ["/static/xadmin/vendor/bootstrap-datepicker/css/datepicker.css"]
        );
    }

    #[test]
    fn test_language_substitution() {
        let vendors = VendorRegistry::new(settings(true, false));
        assert_eq!(
            vendors.xstatic("select.js").unwrap(),
            [
                "/static/xadmin/vendor/select2/select2.js",
                "/static/xadmin/vendor/select2/select2_locale_pt-BR.js",
            ]
        );
    }

    #[test]
    fn test_xadmin_fallback() {
        let vendors = VendorRegistry::new(settings(true, false));
        assert_eq!(
            vendors.xstatic("xadmin.widget.datetime.js").unwrap(),
            ["/static/xadmin/js/xadmin.widget.datetime.js"]
        );
        assert!(matches!(
            vendors.xstatic("xadmin.widget.datetime.txt"),
            Err(WidgetError::UnknownVendor(_))
        ));
    }

    #[test]
    fn test_unknown_vendor() {
        let vendors = VendorRegistry::new(settings(true, false));
        assert!(matches!(
            vendors.vendor(&["nope.js"]),
            Err(WidgetError::UnknownVendor(tag)) if tag == "nope.js"
        ));
    }

    #[test]
    fn test_vendor_splits_js_and_css() {
        let vendors = VendorRegistry::new(settings(true, false));
        let media = vendors
            .vendor(&["datepicker.js", "datepicker.css", "xadmin.widget.datetime.js"])
            .unwrap();
        assert_eq!(media.js().len(), 2);
        assert_eq!(media.css().len(), 1);
    }

    #[test]
    fn test_merge_deduplicates() {
        let vendors = VendorRegistry::new(settings(true, false));
        let mut a = vendors.vendor(&["datepicker.js"]).unwrap();
        let b = vendors.vendor(&["datepicker.js", "clockpicker.js"]).unwrap();
        a.merge(&b);
        assert_eq!(a.js().len(), 2);
    }

    #[test]
    fn test_render_tags() {
        let mut media = Media::new();
        media.add_css("/static/a.css");
        media.add_js("/static/a.js");
        let html = media.render();
        assert!(html.as_str().contains(r#"<link href="/static/a.css""#));
        assert!(html
            .as_str()
            .contains(r#"<script type="text/javascript" src="/static/a.js"></script>"#));

        let tags = minijinja::Value::from(html.clone());
        assert!(tags.is_safe());
        assert_eq!(tags.as_str(), Some(html.as_str()));
    }
}
