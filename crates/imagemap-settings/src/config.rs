//! Configuration management
//!
//! Provides the editor configuration loaded from JSON or TOML files,
//! with defaults for every section and validation on load and save.

use crate::error::{SettingsError, SettingsResult};
use imagemap_core::constants::HANDLE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the user's config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Separator placed between emitted `<area>` elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkupSeparator {
    /// One element per line
    #[default]
    Newline,
    /// All elements on a single line
    Space,
}

impl MarkupSeparator {
    /// The literal text joining two elements.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupSeparator::Newline => "\n",
            MarkupSeparator::Space => " ",
        }
    }
}

impl std::fmt::Display for MarkupSeparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupSeparator::Newline => write!(f, "newline"),
            MarkupSeparator::Space => write!(f, "space"),
        }
    }
}

/// HTML markup emission and import policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupSettings {
    /// Map the `href` attribute to the area's `link` field (both ways).
    ///
    /// Off by default: imported `href` values are ignored and no `href` is
    /// emitted, so the link picker stays the single source of links.
    #[serde(default)]
    pub link_as_href: bool,
    /// Separator between emitted elements
    #[serde(default)]
    pub separator: MarkupSeparator,
}

impl Default for MarkupSettings {
    fn default() -> Self {
        Self {
            link_as_href: false,
            separator: MarkupSeparator::Newline,
        }
    }
}

/// Handle geometry on the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleSettings {
    /// Side length of a handle square in surface units
    #[serde(default = "default_handle_size")]
    pub size: f64,
    /// Extra distance accepted around shape bodies when hit testing
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
}

fn default_handle_size() -> f64 {
    HANDLE_SIZE
}

fn default_hit_tolerance() -> f64 {
    2.0
}

impl Default for HandleSettings {
    fn default() -> Self {
        Self {
            size: default_handle_size(),
            hit_tolerance: default_hit_tolerance(),
        }
    }
}

/// Modifier-driven drawing assists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingSettings {
    /// Snap polygon edges to 45° steps while the modifier is held
    #[serde(default = "default_true")]
    pub snap_polygon_angles: bool,
    /// Square (drawing) or keep proportions (editing) of rectangles while the
    /// modifier is held
    #[serde(default = "default_true")]
    pub constrain_rectangles: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            snap_polygon_angles: true,
            constrain_rectangles: true,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Markup policy
    #[serde(default)]
    pub markup: MarkupSettings,
    /// Handle geometry
    #[serde(default)]
    pub handles: HandleSettings,
    /// Drawing assists
    #[serde(default)]
    pub drawing: DrawingSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.handles.size.is_finite() && self.handles.size > 0.0) {
            return Err(SettingsError::invalid("handles.size", "must be > 0"));
        }

        if !(self.handles.hit_tolerance.is_finite() && self.handles.hit_tolerance >= 0.0) {
            return Err(SettingsError::invalid(
                "handles.hit_tolerance",
                "must be >= 0",
            ));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Default location of the editor configuration file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("imagemap").join(CONFIG_FILE_NAME))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))
}
