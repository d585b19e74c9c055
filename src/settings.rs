//! Game settings and preferences
//!
//! Persisted separately from the profile in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningPreset};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which feel to play with
    pub preset: TuningPreset,
    /// JSON object merged over the preset (for experimenting with feel)
    pub tuning_overrides: Option<String>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: TuningPreset::Classic,
            tuning_overrides: None,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Create settings from a tuning preset
    pub fn from_preset(preset: TuningPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Resolve the tuning for the next run. Bad overrides fall back to the preset.
    pub fn tuning(&self) -> Tuning {
        let Some(json) = &self.tuning_overrides else {
            return self.preset.tuning();
        };
        match Tuning::from_json_with_preset(json, self.preset) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                self.preset.tuning()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_dash_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
