//! The persisted player record
//!
//! Stored as one JSON object in LocalStorage. The simulation reads the theme
//! from it and reports finished scores back to it.

use serde::{Deserialize, Serialize};

use crate::runner::Theme;

/// Mock wallet balances shown in the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balances {
    pub sui: f64,
    pub dino_coin: u64,
}

impl Default for Balances {
    fn default() -> Self {
        Self {
            sui: 145.5,
            dino_coin: 2500,
        }
    }
}

/// A single player's saved profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub contact_handle: String,
    #[serde(default)]
    pub balances: Balances,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub high_score: u64,
    #[serde(default = "default_item")]
    pub equipped_skin: String,
    #[serde(default = "default_item")]
    pub equipped_background: String,
    #[serde(default)]
    pub owned_item_ids: Vec<String>,
}

fn default_item() -> String {
    "default".to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "u_123".to_string(),
            display_name: "SuiRunner99".to_string(),
            contact_handle: "runner@sui.io".to_string(),
            balances: Balances::default(),
            wallet_address: None,
            high_score: 0,
            equipped_skin: default_item(),
            equipped_background: default_item(),
            owned_item_ids: vec![default_item()],
        }
    }
}

impl UserProfile {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_dash_user";

    /// Record a finished run. Returns true on a new personal best.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            log::info!("New high score: {} (was {})", score, self.high_score);
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Theme the core should carry for this player
    pub fn theme(&self) -> Theme {
        Theme {
            skin: self.equipped_skin.clone(),
            background: self.equipped_background.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load the profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(profile) => {
                        log::info!("Loaded profile for {}", profile.display_name);
                        return profile;
                    }
                    Err(e) => log::warn!("Ignoring unreadable profile: {}", e),
                }
            }
        }

        log::info!("No profile found, starting fresh");
        Self::default()
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Profile saved (high score {})", self.high_score);
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
