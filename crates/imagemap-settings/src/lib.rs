//! ImageMap Settings Crate
//!
//! Handles editor configuration: markup emission policy, handle geometry and
//! drawing assists, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, DrawingSettings, EditorConfig, HandleSettings, MarkupSeparator,
    MarkupSettings,
};
pub use error::{SettingsError, SettingsResult};
