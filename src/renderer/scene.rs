//! Read-only projection of simulation state into drawable shapes
//!
//! Nothing here feeds back into the simulation.

use crate::consts::{ACTOR_HEIGHT, ACTOR_WIDTH, ACTOR_X};
use crate::runner::Theme;
use crate::sim::{ObstacleKind, RunPhase, SimulationState, SpriteRegion};
use crate::tuning::{ObstacleStyle, Tuning};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleDraw {
    pub rect: Rect,
    pub kind: ObstacleKind,
    /// Set when obstacles are drawn from the sprite sheet
    pub sprite: Option<SpriteRegion>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub actor: Rect,
    pub obstacles: Vec<ObstacleDraw>,
    pub phase: RunPhase,
    pub display_score: u64,
    pub theme: Theme,
}

impl Scene {
    pub fn project(state: &SimulationState, tuning: &Tuning, theme: &Theme) -> Self {
        let ground_y = state.field.ground_y();
        let use_sprites = tuning.obstacle_style == ObstacleStyle::SpriteSheet;

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| {
                let y = match o.kind {
                    ObstacleKind::Ground => ground_y - o.size.y,
                    ObstacleKind::Elevated => o.pos.y,
                };
                ObstacleDraw {
                    rect: Rect {
                        x: o.pos.x,
                        y,
                        w: o.size.x,
                        h: o.size.y,
                    },
                    kind: o.kind,
                    sprite: use_sprites.then_some(o.sprite),
                }
            })
            .collect();

        Self {
            width: state.field.width,
            height: state.field.height,
            ground_y,
            actor: Rect {
                x: ACTOR_X,
                y: state.actor.y,
                w: ACTOR_WIDTH,
                h: ACTOR_HEIGHT,
            },
            obstacles,
            phase: state.phase,
            display_score: state.display_score(),
            theme: theme.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{reset, tick};

    #[test]
    fn test_projection_matches_state() {
        let tuning = Tuning::classic();
        let mut state = SimulationState::new(8);
        reset(&mut state, &tuning);
        for _ in 0..30 {
            tick(&mut state, &tuning);
        }
        let before = state.clone();
        let scene = Scene::project(&state, &tuning, &Theme::default());
        assert_eq!(state, before);

        assert_eq!(scene.ground_y, 250.0);
        assert_eq!(scene.actor.x, ACTOR_X);
        assert_eq!(scene.actor.y, state.actor.y);
        assert_eq!(scene.obstacles.len(), state.obstacles.len());
        for (draw, obstacle) in scene.obstacles.iter().zip(&state.obstacles) {
            assert_eq!(draw.rect.x, obstacle.pos.x);
            assert!((draw.rect.y + draw.rect.h - scene.ground_y).abs() < 1e-3);
            assert!(draw.sprite.is_none());
        }
    }

    #[test]
    fn test_sprite_style_carries_regions() {
        let tuning = Tuning::floaty();
        let mut state = SimulationState::new(8);
        reset(&mut state, &tuning);
        tick(&mut state, &tuning);
        let scene = Scene::project(&state, &tuning, &Theme::default());
        assert!(!scene.obstacles.is_empty());
        assert!(scene.obstacles.iter().all(|o| o.sprite.is_some()));
    }
}
