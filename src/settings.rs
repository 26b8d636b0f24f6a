//! Editor settings
//!
//! Persisted as JSON: a file on native, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_DURATION, ROTATE_BY_DEFAULT};
#[cfg(not(target_arch = "wasm32"))]
use crate::error::ConfigError;

/// Surface colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Canvas fill behind everything
    pub background: String,
    /// Center axis guides
    pub axis: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "white".to_owned(),
            axis: "hsla(240, 5.9%, 90%, 1)".to_owned(),
        }
    }
}

/// Editor settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Initial play-through length (seconds)
    pub default_duration: f64,
    /// Degrees each entity turns over a full play-through
    pub rotate_by: f64,
    /// RNG seed; `None` seeds from the host clock
    pub seed: Option<u64>,
    /// Open with the example scene instead of an empty one
    pub start_with_example: bool,
    pub theme: Theme,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_duration: MIN_DURATION,
            rotate_by: ROTATE_BY_DEFAULT,
            seed: None,
            start_with_example: true,
            theme: Theme::default(),
        }
    }
}

impl EditorSettings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "spin_canvas_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file. A missing file means defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
