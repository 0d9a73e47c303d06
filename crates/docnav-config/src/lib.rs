//! Configuration for the docnav widget.
//!
//! Parses a theme file supplied by the embedding page and converts it into
//! the widget's [`IconSet`] and [`ClassNames`]. Missing keys fall back to
//! the widget defaults, so an empty file is a valid configuration.
//!
//! ```toml
//! [icons]
//! base_url = "/static/nav"
//! leaf_selected = "current.png"
//!
//! [classes]
//! parent_label = "navParent"
//! ```
//!
//! Values are taken literally; nothing is read from the process
//! environment or searched for on disk.

use std::path::{Path, PathBuf};

use docnav_widget::{ClassNames, IconPair, IconSet, Theme, join_url};
use serde::Deserialize;

/// Settings that override configuration file values.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override `icons.base_url`.
    pub base_url: Option<String>,
}

/// Widget configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Icon resources.
    pub icons: IconsConfig,
    /// CSS class names.
    pub classes: ClassesConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[icons]` table: a base URL and one file name per icon state.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    pub base_url: String,
    pub parent_collapsed: String,
    pub parent_expanded: String,
    pub leaf_unselected: String,
    pub leaf_selected: String,
    pub section_collapsed: String,
    pub section_expanded: String,
    pub copy: String,
    pub copy_hover: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: "../images".to_owned(),
            parent_collapsed: "plus.png".to_owned(),
            parent_expanded: "minus.png".to_owned(),
            leaf_unselected: "page.png".to_owned(),
            leaf_selected: "pageSelected.png".to_owned(),
            section_collapsed: "sectionPlus.gif".to_owned(),
            section_expanded: "sectionMinus.gif".to_owned(),
            copy: "copycode.gif".to_owned(),
            copy_hover: "copycodeHighlight.gif".to_owned(),
        }
    }
}

impl IconsConfig {
    fn files(&self) -> [(&str, &str); 8] {
        [
            (self.parent_collapsed.as_str(), "icons.parent_collapsed"),
            (self.parent_expanded.as_str(), "icons.parent_expanded"),
            (self.leaf_unselected.as_str(), "icons.leaf_unselected"),
            (self.leaf_selected.as_str(), "icons.leaf_selected"),
            (self.section_collapsed.as_str(), "icons.section_collapsed"),
            (self.section_expanded.as_str(), "icons.section_expanded"),
            (self.copy.as_str(), "icons.copy"),
            (self.copy_hover.as_str(), "icons.copy_hover"),
        ]
    }
}

/// `[classes]` table. Unset keys keep the widget defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClassesConfig {
    pub parent_label: Option<String>,
    pub leaf_label: Option<String>,
    pub expand_collapse: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from `path` with optional overrides.
    ///
    /// Overrides are applied after parsing, before validation.
    ///
    /// # Errors
    ///
    /// Returns error if `path` doesn't exist, parsing fails or validation
    /// fails.
    pub fn load(path: &Path, overrides: Option<&Overrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }
        config.validate()?;

        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(base_url) = &overrides.base_url {
            self.icons.base_url.clone_from(base_url);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an empty icon file name, an
    /// empty class name or a base URL made only of slashes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.icons.base_url;
        if !base_url.is_empty() && base_url.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "icons.base_url cannot consist only of slashes".to_owned(),
            ));
        }
        for (file, field) in self.icons.files() {
            require_non_empty(file, field)?;
        }

        let classes = [
            (&self.classes.parent_label, "classes.parent_label"),
            (&self.classes.leaf_label, "classes.leaf_label"),
            (&self.classes.expand_collapse, "classes.expand_collapse"),
        ];
        for (class, field) in classes {
            if let Some(class) = class {
                require_non_empty(class, field)?;
            }
        }
        Ok(())
    }

    /// Icon resources with the base URL applied.
    #[must_use]
    pub fn icon_set(&self) -> IconSet {
        let icons = &self.icons;
        let url = |file: &str| join_url(&icons.base_url, file);
        let pair = |off: &str, on: &str| IconPair::new(url(off), url(on));
        IconSet {
            parent: pair(&icons.parent_collapsed, &icons.parent_expanded),
            leaf: pair(&icons.leaf_unselected, &icons.leaf_selected),
            section: pair(&icons.section_collapsed, &icons.section_expanded),
            copy: pair(&icons.copy, &icons.copy_hover),
        }
    }

    /// Class names with configured values applied over the defaults.
    #[must_use]
    pub fn classes(&self) -> ClassNames {
        let mut classes = ClassNames::default();
        if let Some(class) = &self.classes.parent_label {
            classes.parent_label.clone_from(class);
        }
        if let Some(class) = &self.classes.leaf_label {
            classes.leaf_label.clone_from(class);
        }
        if let Some(class) = &self.classes.expand_collapse {
            classes.expand_collapse.clone_from(class);
        }
        classes
    }

    /// Theme combining [`icon_set`](Self::icon_set) and [`classes`](Self::classes).
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme {
            icons: self.icon_set(),
            classes: self.classes(),
        }
    }
}
