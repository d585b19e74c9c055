//! Collision detection between the actor and obstacles
//!
//! Both sides are axis-aligned rectangles shrunk by an inset so that visual
//! near-misses do not count as hits.

use glam::Vec2;

use super::state::{Actor, Obstacle};

/// Axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    /// Visual bounds shrunk by `inset` on every side (never inverted)
    pub fn inset(pos: Vec2, size: Vec2, inset: f32) -> Self {
        let inset = inset.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
        Self {
            min: pos + Vec2::splat(inset),
            max: pos + size - Vec2::splat(inset),
        }
    }

    /// Strict overlap: touching edges do not collide
    #[inline]
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

pub fn actor_hitbox(actor: &Actor, inset: f32) -> Hitbox {
    let (pos, size) = actor.bounds();
    Hitbox::inset(pos, size, inset)
}

pub fn obstacle_hitbox(obstacle: &Obstacle, inset: f32) -> Hitbox {
    Hitbox::inset(obstacle.pos, obstacle.size, inset)
}

/// First obstacle the actor overlaps, if any
pub fn find_collision<'a>(
    actor: &Actor,
    obstacles: &'a [Obstacle],
    actor_inset: f32,
    obstacle_inset: f32,
) -> Option<&'a Obstacle> {
    let actor_box = actor_hitbox(actor, actor_inset);
    obstacles
        .iter()
        .find(|o| actor_box.overlaps(&obstacle_hitbox(o, obstacle_inset)))
}
