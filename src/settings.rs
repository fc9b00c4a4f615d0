//! Viewer preferences for the logo field
//!
//! Persisted in LocalStorage alongside the site's theme choice.

use serde::{Deserialize, Serialize};

use crate::field::FieldOptions;

/// Field preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mount the floating logos at all
    pub enabled: bool,
    /// Pop a few logos automatically after load
    pub autoplay_hint: bool,
    /// Freeze motion and skip the hint (accessibility)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            autoplay_hint: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Hints only run when motion is allowed
    pub fn effective_autoplay_hint(&self) -> bool {
        self.autoplay_hint && !self.reduced_motion
    }

    /// Options for a new field under these preferences
    pub fn field_options(&self) -> FieldOptions {
        FieldOptions {
            autoplay_hint: self.effective_autoplay_hint(),
            rng_seed: None,
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "floating_logos_settings";

    /// Parse stored JSON, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_hint() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_autoplay_hint());
        assert!(!settings.field_options().autoplay_hint);
        assert!(Settings::default().field_options().autoplay_hint);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"autoplay_hint": false}"#);
        assert!(settings.enabled);
        assert!(!settings.autoplay_hint);
    }

    #[test]
    fn test_garbage_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            enabled: false,
            autoplay_hint: false,
            reduced_motion: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
