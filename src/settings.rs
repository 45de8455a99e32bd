//! Host-owned viewer settings.
//!
//! The host application owns and persists these settings; the engine only
//! parses them out of the host's JSON blob and reads them at runtime. Every
//! field has a default so a partial or empty settings object still yields a
//! usable configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::zoom;

/// Settings the host exposes to the user and hands to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Show the copy-to-clipboard button in the control bar
    #[serde(default = "default_show_copy_button")]
    pub show_copy_button: bool,

    /// Enable keyboard shortcuts inside the modal (Escape always works)
    #[serde(default = "default_enable_keyboard_shortcuts")]
    pub enable_keyboard_shortcuts: bool,

    /// Additive scale step for each zoom action
    #[serde(default = "default_zoom_increment")]
    pub zoom_increment: f32,

    /// Resize the modal to match each loaded image's natural size
    #[serde(default)]
    pub sync_modal_size: bool,
}

fn default_show_copy_button() -> bool {
    true
}

fn default_enable_keyboard_shortcuts() -> bool {
    true
}

fn default_zoom_increment() -> f32 {
    zoom::DEFAULT_INCREMENT
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            show_copy_button: default_show_copy_button(),
            enable_keyboard_shortcuts: default_enable_keyboard_shortcuts(),
            zoom_increment: default_zoom_increment(),
            sync_modal_size: false,
        }
    }
}

impl ViewerSettings {
    /// Serialize the settings to JSON for the host to persist.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings from the host's JSON blob, validating field values.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate field values that serde cannot check structurally.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.zoom_increment.is_finite() || self.zoom_increment <= 0.0 {
            return Err(SettingsError::InvalidZoomIncrement {
                value: self.zoom_increment,
            });
        }
        Ok(())
    }
}

/// Errors that can occur when parsing viewer settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// JSON parsing error
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Zoom increment must be a positive finite number
    #[error("Invalid zoom increment: {value}")]
    InvalidZoomIncrement {
        /// The rejected value
        value: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ViewerSettings::default();
        assert!(settings.show_copy_button);
        assert!(settings.enable_keyboard_shortcuts);
        assert_eq!(settings.zoom_increment, zoom::DEFAULT_INCREMENT);
        assert!(!settings.sync_modal_size);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings = ViewerSettings::from_json("{}").unwrap();
        assert_eq!(settings, ViewerSettings::default());

        let settings = ViewerSettings::from_json(r#"{"zoomIncrement": 0.25}"#);
        // Field names are snake_case; unknown keys are ignored
        assert_eq!(settings.unwrap(), ViewerSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"show_copy_button": false, "zoom_increment": 0.5}"#;
        let settings = ViewerSettings::from_json(json).unwrap();
        assert!(!settings.show_copy_button);
        assert_eq!(settings.zoom_increment, 0.5);
        assert!(settings.enable_keyboard_shortcuts);
    }

    #[test]
    fn test_rejects_nonpositive_zoom_increment() {
        let err = ViewerSettings::from_json(r#"{"zoom_increment": 0.0}"#);
        assert!(matches!(
            err,
            Err(SettingsError::InvalidZoomIncrement { .. })
        ));

        let err = ViewerSettings::from_json(r#"{"zoom_increment": -0.1}"#);
        assert!(matches!(
            err,
            Err(SettingsError::InvalidZoomIncrement { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = ViewerSettings::default();
        settings.sync_modal_size = true;
        settings.zoom_increment = 0.2;

        let json = settings.to_json().unwrap();
        let parsed = ViewerSettings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
