//! Application configuration for autocrumb.
//!
//! Lookup order: an explicit `--config` path, then `./autocrumb.toml`, then
//! `~/.autocrumb/autocrumb.toml`. CLI flags override config file values, which
//! override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AutocrumbError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "autocrumb.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".autocrumb";

// ---------------------------------------------------------------------------
// Config structs (matching autocrumb.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Markup contract and labeling.
    #[serde(default)]
    pub breadcrumb: BreadcrumbConfig,

    /// Static-site batch settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// `[breadcrumb]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreadcrumbConfig {
    /// Marker attribute: `"auto"` on the root, `"level-N"` on insertion points.
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Root attribute overriding the home label.
    #[serde(default = "default_home_attribute")]
    pub home_attribute: String,

    /// Per-element label override attribute.
    #[serde(default = "default_label_attribute")]
    pub label_attribute: String,

    /// Attribute marking the exact child whose text is set.
    #[serde(default = "default_text_attribute")]
    pub text_attribute: String,

    /// Label of the first crumb when the root does not set one.
    #[serde(default = "default_home_label")]
    pub home_label: String,

    /// Separator between page name and site name in `<title>`.
    #[serde(default = "default_title_separator")]
    pub title_separator: String,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            home_attribute: default_home_attribute(),
            label_attribute: default_label_attribute(),
            text_attribute: default_text_attribute(),
            home_label: default_home_label(),
            title_separator: default_title_separator(),
        }
    }
}

fn default_attribute() -> String {
    "fj-breadcrumb".into()
}
fn default_home_attribute() -> String {
    "fj-breadcrumb-home".into()
}
fn default_label_attribute() -> String {
    "fj-breadcrumb-label".into()
}
fn default_text_attribute() -> String {
    "fj-breadcrumb-text".into()
}
fn default_home_label() -> String {
    "Home".into()
}
fn default_title_separator() -> String {
    " - ".into()
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin the site is served from, e.g. `https://example.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Map `about.html` to `/about` and `blog/index.html` to `/blog/`.
    #[serde(default = "default_true")]
    pub clean_urls: bool,

    /// Maximum number of files rendered at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: None,
            clean_urls: true,
            concurrency: default_concurrency(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_concurrency() -> u32 {
    4
}

// ---------------------------------------------------------------------------
// Breadcrumb options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime generator options - merged from config file + CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbOptions {
    pub attribute: String,
    pub home_attribute: String,
    pub label_attribute: String,
    pub text_attribute: String,
    pub home_label: String,
    pub title_separator: String,
}

impl Default for BreadcrumbOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for BreadcrumbOptions {
    fn from(config: &AppConfig) -> Self {
        let b = &config.breadcrumb;
        Self {
            attribute: b.attribute.clone(),
            home_attribute: b.home_attribute.clone(),
            label_attribute: b.label_attribute.clone(),
            text_attribute: b.text_attribute.clone(),
            home_label: b.home_label.clone(),
            title_separator: b.title_separator.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user config directory (`~/.autocrumb/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AutocrumbError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file (`~/.autocrumb/autocrumb.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config.
///
/// An explicit path must exist. Without one, `./autocrumb.toml` and then the
/// user config file are tried; defaults are returned when neither exists.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return load_config_from(&local);
    }

    // A missing home directory is not fatal here; there is simply no user config.
    if let Ok(path) = config_file_path() {
        if path.exists() {
            return load_config_from(&path);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(AppConfig::default())
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AutocrumbError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        AutocrumbError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Create the user config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AutocrumbError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AutocrumbError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AutocrumbError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject configurations the generator cannot work with.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let b = &config.breadcrumb;
    for (key, value) in [
        ("attribute", &b.attribute),
        ("home_attribute", &b.home_attribute),
        ("label_attribute", &b.label_attribute),
        ("text_attribute", &b.text_attribute),
    ] {
        if value.trim().is_empty() {
            return Err(AutocrumbError::config(format!(
                "breadcrumb.{key} must not be empty"
            )));
        }
    }

    if b.title_separator.is_empty() {
        return Err(AutocrumbError::config(
            "breadcrumb.title_separator must not be empty",
        ));
    }

    if config.site.concurrency == 0 {
        return Err(AutocrumbError::config("site.concurrency must be at least 1"));
    }

    if let Some(origin) = &config.site.origin {
        url::Url::parse(origin).map_err(|e| AutocrumbError::url(origin.as_str(), e))?;
    }

    Ok(())
}
