//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod jump;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, actor_hitbox, find_collision, obstacle_hitbox};
pub use state::{
    Actor, GameEvent, Obstacle, ObstacleKind, PlayField, RunPhase, SimulationState, Snapshot,
    SpriteRegion,
};
pub use tick::{request_jump, reset, tick};
