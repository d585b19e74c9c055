//! Dino Dash - An endless runner for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, progression)
//! - `runner`: Driver-facing facade over the simulation
//! - `renderer`: Read-only scene projection and the 2D canvas backend
//! - `tuning`: Data-driven game feel (presets and overrides)
//! - `profile`: The persisted player record
//! - `settings`: Player preferences

pub mod profile;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use profile::UserProfile;
pub use runner::{Runner, Theme};
pub use settings::Settings;
pub use tuning::{Tuning, TuningPreset};

/// Play-field geometry defaults
pub mod consts {
    /// Canvas width before the first resize
    pub const FIELD_WIDTH: f32 = 800.0;
    /// Canvas height (fixed by the page layout)
    pub const FIELD_HEIGHT: f32 = 300.0;
    /// Distance from the bottom of the canvas to the ground line
    pub const GROUND_OFFSET: f32 = 50.0;

    /// The actor never moves horizontally
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 40.0;

    /// Obstacles whose right edge is further than this left of the field are dropped
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Horizontal spacing between members of an obstacle cluster
    pub const CLUSTER_SPACING: f32 = 5.0;
}
