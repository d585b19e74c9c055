//! Simulation state and core types
//!
//! Everything a run mutates lives in [`SimulationState`]. The driver only ever
//! sees a copied [`Snapshot`].

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Undrained events kept before the oldest are dropped
pub const MAX_QUEUED_EVENTS: usize = 256;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunPhase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Ticks advance the world
    Running,
    /// Collision happened; only a reset leaves this phase
    Terminated,
}

/// Play-field geometry, in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(GROUND_OFFSET + ACTOR_HEIGHT),
        }
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_OFFSET
    }

    /// Actor top edge when standing on the ground
    #[inline]
    pub fn actor_rest_y(&self) -> f32 {
        self.ground_y() - ACTOR_HEIGHT
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top edge, pixels from the top of the field
    pub y: f32,
    /// Pixels per tick, negative is upward
    pub vel_y: f32,
    pub airborne: bool,
}

impl Actor {
    /// Standing on the ground, not moving
    pub fn at_rest(field: &PlayField) -> Self {
        Self {
            y: field.actor_rest_y(),
            vel_y: 0.0,
            airborne: false,
        }
    }

    /// One step of gravity; lands the actor if it would sink below the ground
    pub fn integrate(&mut self, gravity: f32, field: &PlayField) {
        self.vel_y += gravity;
        self.y += self.vel_y;
        self.clamp_to_ground(field);
    }

    pub fn clamp_to_ground(&mut self, field: &PlayField) {
        let rest = field.actor_rest_y();
        if self.y > rest {
            self.y = rest;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }

    /// Visual bounds (top-left, size)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(ACTOR_X, self.y),
            Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
        )
    }
}

/// Where an obstacle sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Rests on the ground line
    Ground,
    /// Floats above the ground line
    Elevated,
}

/// Source rectangle in the obstacle sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteRegion {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SpriteRegion {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// A hazard scrolling toward the actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub sprite: SpriteRegion,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Things the driver may want to react to (sound, HUD, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { seed: u64 },
    Spawned { count: u32, kind: ObstacleKind },
    SpeedUp { speed: f32 },
    /// Emitted exactly once per run
    GameOver { final_score: u64 },
}

/// Read-only view handed to the driver after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub display_score: u64,
    pub is_alive: bool,
    pub is_running: bool,
}

/// Complete state of a run, owned by exactly one driver
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed every reset starts from
    pub seed: u64,
    pub phase: RunPhase,
    pub field: PlayField,
    pub actor: Actor,
    /// Spawn order: oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    /// Pixels per tick
    pub scroll_speed: f32,
    pub score: f32,
    /// Gap to leave after the newest obstacle before spawning again
    pub next_spawn_gap: f32,
    /// Floored score at the last stepped speed-up
    pub last_speed_step: f32,
    /// Ticks since the run started
    pub ticks: u64,
    pub(crate) rng: Pcg32,
    events: VecDeque<GameEvent>,
    next_id: u32,
}

impl PartialEq for SimulationState {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.phase == other.phase
            && self.field == other.field
            && self.actor == other.actor
            && self.obstacles == other.obstacles
            && self.scroll_speed == other.scroll_speed
            && self.score == other.score
            && self.next_spawn_gap == other.next_spawn_gap
            && self.last_speed_step == other.last_speed_step
            && self.ticks == other.ticks
            && self.rng == other.rng
            && self.next_id == other.next_id
    }
}

impl SimulationState {
    /// Create an idle state; nothing moves until the run is started
    pub fn new(seed: u64) -> Self {
        let field = PlayField::default();
        Self {
            seed,
            phase: RunPhase::Idle,
            field,
            actor: Actor::at_rest(&field),
            obstacles: Vec::new(),
            scroll_speed: 0.0,
            score: 0.0,
            next_spawn_gap: 0.0,
            last_speed_step: 0.0,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn restart_ids(&mut self) {
        self.next_id = 1;
    }

    pub(crate) fn reseed_rng(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// Queue an event for the driver. Past [`MAX_QUEUED_EVENTS`] undrained
    /// events the oldest is dropped.
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn queued_events(&self) -> usize {
        self.events.len()
    }

    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_score: self.display_score(),
            is_alive: self.phase != RunPhase::Terminated,
            is_running: self.phase == RunPhase::Running,
        }
    }

    /// Trailing edge of the most recently spawned obstacle
    pub fn last_trailing_edge(&self) -> Option<f32> {
        self.obstacles.last().map(Obstacle::right)
    }

    /// Apply new field geometry, keeping the actor above the ground
    pub fn resize(&mut self, width: f32, height: f32) {
        let field = PlayField::new(width, height);
        let height_delta = field.ground_y() - self.field.ground_y();
        self.field = field;
        // Everything hangs off the ground line, so shift it all together
        self.actor.y += height_delta;
        self.actor.clamp_to_ground(&self.field);
        for obstacle in &mut self.obstacles {
            obstacle.pos.y += height_delta;
        }
    }
}
