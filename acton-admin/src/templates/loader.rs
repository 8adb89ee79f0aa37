//! Widget template loader with override directory and hot reload support

use minijinja::{Environment, Value};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::TEMPLATE_NAMES;

/// Errors that can occur when loading or rendering widget templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("failed to read template '{0}': {1}")]
    ReadFailed(String, std::io::Error),

    /// Template was not found in any location
    #[error("template not found: {0}")]
    NotFound(String),

    /// Template compilation or rendering failed
    #[error("template render error: {0}")]
    RenderError(#[from] minijinja::Error),
}

/// Thread-safe widget template environment
///
/// Templates come from the override directory when present there, otherwise
/// from the embedded defaults. The environment supports atomic reload so a
/// running admin picks up edited overrides.
#[derive(Debug)]
pub struct WidgetTemplates {
    env: Arc<RwLock<Environment<'static>>>,
    override_dir: Option<PathBuf>,
}

impl WidgetTemplates {
    /// Create templates that use the embedded defaults only
    ///
    /// # Errors
    ///
    /// Returns error if an embedded template fails to compile.
    pub fn embedded() -> Result<Self, TemplateError> {
        Self::new(None)
    }

    /// Create templates, preferring files in `override_dir`
    ///
    /// # Errors
    ///
    /// Returns error if an override cannot be read or a template fails to
    /// compile.
    pub fn new(override_dir: Option<PathBuf>) -> Result<Self, TemplateError> {
        let env = Self::create_environment(override_dir.as_deref())?;
        Ok(Self {
            env: Arc::new(RwLock::new(env)),
            override_dir,
        })
    }

    fn create_environment(override_dir: Option<&Path>) -> Result<Environment<'static>, TemplateError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for name in TEMPLATE_NAMES {
            let content = Self::load_template_content(name, override_dir)?;
            env.add_template_owned((*name).to_string(), content)?;
        }

        Ok(env)
    }

    /// Load template content: override directory first, then embedded
    fn load_template_content(name: &str, override_dir: Option<&Path>) -> Result<String, TemplateError> {
        if let Some(dir) = override_dir {
            let path = dir.join(name);
            if path.exists() {
                tracing::debug!(template = name, path = %path.display(), "loading widget template override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| TemplateError::ReadFailed(name.to_string(), e));
            }
        }

        Self::get_embedded_template(name)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Get embedded template content
    #[must_use]
    pub fn get_embedded_template(name: &str) -> Option<&'static str> {
        EMBEDDED_TEMPLATES.get(name).copied()
    }

    /// Render a template with the given context
    ///
    /// # Errors
    ///
    /// Returns error if the template is not found or rendering fails.
    pub fn render(&self, name: &str, ctx: Value) -> Result<String, TemplateError> {
        self.env
            .read()
            .get_template(name)
            .and_then(|tmpl| tmpl.render(ctx))
            .map_err(Into::into)
    }

    /// Reload all templates
    ///
    /// Builds a new environment and atomically swaps it with the current one.
    /// On failure the current templates stay in place.
    ///
    /// # Errors
    ///
    /// Returns error if templates cannot be reloaded.
    pub fn reload(&self) -> Result<(), TemplateError> {
        let new_env = match Self::create_environment(self.override_dir.as_deref()) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "widget template reload failed, keeping current templates");
                return Err(e);
            }
        };

        *self.env.write() = new_env;

        tracing::debug!("Widget templates reloaded");
        Ok(())
    }

    /// Check if a template is overridden on disk
    #[must_use]
    pub fn is_customized(&self, name: &str) -> bool {
        self.override_dir
            .as_ref()
            .is_some_and(|dir| dir.join(name).exists())
    }

    /// Get a reference to the override directory
    #[must_use]
    pub const fn override_dir(&self) -> Option<&PathBuf> {
        self.override_dir.as_ref()
    }
}

impl Clone for WidgetTemplates {
    fn clone(&self) -> Self {
        Self {
            env: Arc::clone(&self.env),
            override_dir: self.override_dir.clone(),
        }
    }
}

static EMBEDDED_TEMPLATES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "widgets/date.html" => include_str!("defaults/widgets/date.html"),
    "widgets/time.html" => include_str!("defaults/widgets/time.html"),
    "widgets/split_datetime.html" => include_str!("defaults/widgets/split_datetime.html"),
    "widgets/clearable_file_initial.html" => include_str!("defaults/widgets/clearable_file_initial.html"),
    "widgets/clearable_file_clear.html" => include_str!("defaults/widgets/clearable_file_clear.html"),
    "widgets/admin_file_initial.html" => include_str!("defaults/widgets/admin_file_initial.html"),
    "widgets/admin_file_clear.html" => include_str!("defaults/widgets/admin_file_clear.html"),
    "widgets/choice_inline.html" => include_str!("defaults/widgets/choice_inline.html"),
    "widgets/choice_block.html" => include_str!("defaults/widgets/choice_block.html"),
};
