use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use toolshelf::catalog::{CatalogSettings, LinkPolicy};
use toolshelf::page::PageSettings;
use toolshelf::ripple::{DEFAULT_BUTTON_CLASS, RippleStyle};
use toolshelf::theme::ThemeSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub source: SourceConfig,
    pub catalog: CatalogSettings,
    pub links: LinkPolicy,
    pub theme: ThemeConfig,
    pub ripple: RippleConfig,
    pub page: PageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory or base URL the data documents are fetched from
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub attribute: String,
    pub option_class: String,
    pub storage_path: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let settings = ThemeSettings::default();
        Self {
            storage_key: settings.storage_key,
            attribute: settings.attribute,
            option_class: settings.option_class,
            storage_path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("toolshelf")
                .join("local_storage.json"),
        }
    }
}

impl ThemeConfig {
    pub fn settings(&self) -> ThemeSettings {
        ThemeSettings {
            storage_key: self.storage_key.clone(),
            attribute: self.attribute.clone(),
            option_class: self.option_class.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub button_class: String,
    pub x_property: String,
    pub y_property: String,
}

impl Default for RippleConfig {
    fn default() -> Self {
        let style = RippleStyle::default();
        Self {
            button_class: DEFAULT_BUTTON_CLASS.to_string(),
            x_property: style.x_property,
            y_property: style.y_property,
        }
    }
}

impl RippleConfig {
    pub fn style(&self) -> RippleStyle {
        RippleStyle {
            x_property: self.x_property.clone(),
            y_property: self.y_property.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            source: SourceConfig::default(),
            catalog: CatalogSettings::default(),
            links: LinkPolicy::default(),
            theme: ThemeConfig::default(),
            ripple: RippleConfig::default(),
            page: PageSettings::default(),
        }
    }
}

impl Config {
    /// Default log filter; `RUST_LOG` still takes precedence.
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use toolshelf::catalog::BaseUrlMode;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog.catalog_path, "data/tools_data.json");
        assert_eq!(config.catalog.icons_path, "data/tools_icons.json");
        assert_eq!(config.catalog.render_target, "tools-section");
        assert_eq!(config.links.base_url_mode, BaseUrlMode::Absolute);
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.ripple.x_property, "--mouse-x");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("toolshelf.yml");
        fs::write(
            &path,
            "links:\n  base_url_mode: relative\n  tool_base_url: https://example.org/kit\nsource:\n  location: https://example.org/kit\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.links.base_url_mode, BaseUrlMode::Relative);
        assert_eq!(config.links.tool_base_url, "https://example.org/kit");
        assert_eq!(config.source.location, "https://example.org/kit");
        assert_eq!(config.catalog.render_target, "tools-section");
        assert_eq!(config.theme.attribute, "data-bs-theme");
    }

    #[test]
    fn test_log_level_from_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("toolshelf.yml");
        fs::write(&path, "log_level: debug\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().log_filter(), "debug");

        fs::write(&path, "log_level: null\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().log_filter(), "info");
        assert_eq!(Config::default().log_filter(), "info");
    }

    #[test]
    fn test_explicit_path_missing_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_theme_settings_projection() {
        let mut config = Config::default();
        config.theme.storage_key = "ui-theme".to_string();
        assert_eq!(config.theme.settings().storage_key, "ui-theme");
        assert_eq!(config.ripple.style(), RippleStyle::default());
    }
}
