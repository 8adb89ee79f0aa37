//! Configuration management for acton-admin widgets
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_ADMIN_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/acton-admin/{service}/config.toml` (user config, XDG)
//! 4. `/etc/acton-admin/{service}/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! [static_files]
//! url = "/static/"
//! debug = false
//! use_cdn = true
//! language = "pt_BR"
//!
//! [labels]
//! today = "Hoje"
//! now = "Agora"
//!
//! [formats]
//! date_input = "%d/%m/%Y"
//! time_input = "%H:%M"
//!
//! [templates]
//! override_dir = "./templates/widgets"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use acton_admin::config::WidgetConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = WidgetConfig::load_for_service("my-admin")?;
//! let today = &config.labels.today;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Where static assets live and which vendor variants to use
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticSettings {
    /// URL prefix for relative asset paths
    pub url: String,

    /// Serve unminified development assets; off unless configured
    pub debug: bool,

    /// Prefer CDN assets outside debug mode
    pub use_cdn: bool,

    /// Language code substituted into localized asset paths
    pub language: String,
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            url: "/static/".to_string(),
            debug: false,
            use_cdn: false,
            language: "en-us".to_string(),
        }
    }
}

/// User-visible strings rendered by the admin widgets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetLabels {
    /// Date picker button
    pub today: String,
    /// Time picker button
    pub now: String,
    /// Prefix for the currently stored file
    pub currently: String,
    /// Prefix for the replacement file input
    pub change: String,
    /// Label of the clear checkbox
    pub clear: String,
}

impl Default for WidgetLabels {
    fn default() -> Self {
        Self {
            today: "Today".to_string(),
            now: "Now".to_string(),
            currently: "Currently".to_string(),
            change: "Change".to_string(),
            clear: "Clear".to_string(),
        }
    }
}

/// strftime-style formats used to render date and time values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Format for date inputs
    pub date_input: String,
    /// Format for time inputs
    pub time_input: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            date_input: "%Y-%m-%d".to_string(),
            time_input: "%H:%M:%S".to_string(),
        }
    }
}

/// Widget template settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory with customized widget templates
    ///
    /// Files here replace the embedded defaults of the same name.
    pub override_dir: Option<PathBuf>,
}

/// Complete widget configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WidgetConfig {
    /// Static asset settings
    #[serde(default)]
    pub static_files: StaticSettings,

    /// Widget labels
    #[serde(default)]
    pub labels: WidgetLabels,

    /// Date/time formats
    #[serde(default)]
    pub formats: FormatSettings,

    /// Template settings
    #[serde(default)]
    pub templates: TemplateSettings,
}

impl WidgetConfig {
    /// Load configuration for a specific service
    ///
    /// # Errors
    ///
    /// Returns an error if the defaults cannot be serialized, a configuration
    /// file cannot be parsed, or a value has the wrong type.
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let system_config = PathBuf::from("/etc/acton-admin")
            .join(service_name)
            .join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Env::prefixed("ACTON_ADMIN_").split("__").lowercase(true));

        let config = figment.extract()?;
        tracing::debug!(service = service_name, "widget configuration loaded");
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if the defaults cannot be serialized, the file
    /// contains invalid TOML, or a value has the wrong type.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("ACTON_ADMIN_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path for a service
    ///
    /// # Example
    ///
    /// ```rust
    /// use acton_admin::config::WidgetConfig;
    ///
    /// let path = WidgetConfig::recommended_path("my-admin");
    /// // Returns: ~/.config/acton-admin/my-admin/config.toml
    /// ```
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| {
                config_dir
                    .join("acton-admin")
                    .join(service_name)
                    .join("config.toml")
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.static_files.url, "/static/");
        assert!(!config.static_files.debug);
        assert_eq!(config.labels.today, "Today");
        assert_eq!(config.labels.now, "Now");
        assert_eq!(config.formats.date_input, "%Y-%m-%d");
        assert_eq!(config.formats.time_input, "%H:%M:%S");
        assert!(config.templates.override_dir.is_none());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[labels]\ntoday = \"Hoje\"\n\n[static_files]\nurl = \"https://cdn.example.com/s/\"\n"
        )
        .unwrap();

        let config = WidgetConfig::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.labels.today, "Hoje");
        assert_eq!(config.labels.now, "Now");
        assert_eq!(config.static_files.url, "https://cdn.example.com/s/");
    }

    #[test]
    fn test_debug_assets_enabled_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[static_files]\ndebug = true\n").unwrap();

        let config = WidgetConfig::load_from(file.path().to_str().unwrap()).unwrap();
        assert!(config.static_files.debug);
    }

    #[test]
    fn test_recommended_path() {
        let path = WidgetConfig::recommended_path("my-admin");
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
