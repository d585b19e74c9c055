//! Obstacle spawning
//!
//! A new obstacle (or cluster) enters at the right edge once the gap behind
//! the newest one exceeds a randomized threshold. The threshold is resampled
//! after each spawn from bounds that widen with scroll speed, so the clearance
//! between hazards stays jumpable as the game speeds up. Clusters are capped to
//! what a single jump can clear at the current speed.

use glam::Vec2;
use rand::Rng;

use super::collision::Hitbox;
use super::jump;
use super::state::{GameEvent, Obstacle, ObstacleKind, SimulationState, SpriteRegion};
use crate::consts::CLUSTER_SPACING;
use crate::tuning::Tuning;

/// Ground hazard frames in the sprite sheet, narrowest first
pub const GROUND_SPRITES: [SpriteRegion; 3] = [
    SpriteRegion::new(0.0, 0.0, 32.0, 48.0),
    SpriteRegion::new(32.0, 0.0, 36.0, 48.0),
    SpriteRegion::new(68.0, 0.0, 40.0, 48.0),
];

/// Flying hazard frame in the sprite sheet
pub const ELEVATED_SPRITE: SpriteRegion = SpriteRegion::new(108.0, 0.0, 46.0, 30.0);

/// Gap between the field's right edge and the newest obstacle's trailing edge
pub fn gap_to_last_obstacle(state: &SimulationState) -> f32 {
    match state.last_trailing_edge() {
        Some(edge) => state.field.width - edge,
        None => state.field.width,
    }
}

/// Spawn if the gap allows it. Returns the number of obstacles added.
pub fn evaluate(state: &mut SimulationState, tuning: &Tuning) -> u32 {
    if gap_to_last_obstacle(state) <= state.next_spawn_gap {
        return 0;
    }

    let (count, kind) = if roll_elevated(state, tuning) {
        spawn_elevated(state, tuning);
        (1, ObstacleKind::Elevated)
    } else {
        let width = tuning.obstacle_width.lerp(state.rng.random());
        let height = tuning.obstacle_height.lerp(state.rng.random());
        let size = cluster_size(state, tuning, width, height);
        spawn_ground_cluster(state, tuning, size, Vec2::new(width, height));
        (size, ObstacleKind::Ground)
    };

    state.next_spawn_gap = sample_gap(state, tuning);
    log::debug!(
        "Spawned {} {:?} at score {:.0}, next gap {:.0}",
        count,
        kind,
        state.score,
        state.next_spawn_gap
    );
    state.push_event(GameEvent::Spawned { count, kind });
    count
}

/// Threshold for the first spawn of a run
pub fn initial_gap(state: &mut SimulationState, tuning: &Tuning) -> f32 {
    let t: f32 = state.rng.random();
    tuning.initial_gap.lerp(t)
}

fn sample_gap(state: &mut SimulationState, tuning: &Tuning) -> f32 {
    let range = tuning.gap.range_at(state.scroll_speed);
    let t: f32 = state.rng.random();
    range.lerp(t)
}

fn roll_elevated(state: &mut SimulationState, tuning: &Tuning) -> bool {
    match &tuning.elevated {
        Some(elevated) if state.score > elevated.min_score => {
            state.rng.random::<f32>() < elevated.chance
        }
        _ => false,
    }
}

/// Larger clusters unlock as the score grows
fn cluster_size(state: &mut SimulationState, tuning: &Tuning, width: f32, height: f32) -> u32 {
    let mut size = 1;
    for rule in &tuning.clusters {
        if state.score > rule.min_score && state.rng.random::<f32>() < rule.chance {
            size = rule.size;
        }
    }
    if size <= 1 {
        return 1;
    }
    let capped = max_clearable_cluster(state, tuning, width, height, size);
    if capped < size {
        log::debug!(
            "Cluster of {} capped to {} at speed {:.2}",
            size,
            capped,
            state.scroll_speed
        );
    }
    capped
}

/// Largest cluster (up to `requested`) whose members a single jump clears
/// at the current scroll speed
pub fn max_clearable_cluster(
    state: &SimulationState,
    tuning: &Tuning,
    width: f32,
    height: f32,
    requested: u32,
) -> u32 {
    let field = &state.field;
    let member = Hitbox::inset(
        Vec2::new(0.0, field.ground_y() - height),
        Vec2::new(width, height),
        tuning.insets.obstacle,
    );
    let Some((first, last)) = jump::clear_window(tuning, field, &member) else {
        return 1;
    };
    let window = last + 1 - first;
    let actor_width = jump::actor_hitbox_width(tuning, field);
    let member_width = member.max.x - member.min.x;
    let pitch = width + CLUSTER_SPACING;

    let mut size = 1;
    while size < requested {
        let span = member_width + size as f32 * pitch;
        // One spare tick absorbs a speed-up mid-air
        if jump::crossing_ticks(actor_width, span, state.scroll_speed) + 1 > window {
            break;
        }
        size += 1;
    }
    size
}

fn spawn_ground_cluster(state: &mut SimulationState, tuning: &Tuning, count: u32, size: Vec2) {
    let sprite = ground_sprite(tuning, size.x);
    let ground_y = state.field.ground_y();
    let start_x = state.field.width;

    for i in 0..count {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Ground,
            pos: Vec2::new(start_x + i as f32 * (size.x + CLUSTER_SPACING), ground_y - size.y),
            size,
            sprite,
        });
    }
}

fn spawn_elevated(state: &mut SimulationState, tuning: &Tuning) {
    let Some(elevated) = &tuning.elevated else {
        return;
    };
    let lift = if elevated.lifts.is_empty() {
        0.0
    } else {
        elevated.lifts[state.rng.random_range(0..elevated.lifts.len())]
    };
    let size = Vec2::new(elevated.width, elevated.height);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind: ObstacleKind::Elevated,
        pos: Vec2::new(state.field.width, state.field.ground_y() - lift - size.y),
        size,
        sprite: ELEVATED_SPRITE,
    });
}

/// Pick the frame whose proportions best match the obstacle width
fn ground_sprite(tuning: &Tuning, width: f32) -> SpriteRegion {
    let span = (tuning.obstacle_width.max - tuning.obstacle_width.min).max(f32::EPSILON);
    let t = ((width - tuning.obstacle_width.min) / span).clamp(0.0, 1.0);
    let index = ((t * GROUND_SPRITES.len() as f32) as usize).min(GROUND_SPRITES.len() - 1);
    GROUND_SPRITES[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RunPhase;
    use crate::tuning::ClusterRule;

    fn running_state(seed: u64, tuning: &Tuning) -> SimulationState {
        let mut state = SimulationState::new(seed);
        state.phase = RunPhase::Running;
        state.scroll_speed = tuning.initial_speed;
        state.next_spawn_gap = initial_gap(&mut state, tuning);
        state
    }

    #[test]
    fn test_first_spawn_enters_at_right_edge() {
        let tuning = Tuning::classic();
        let mut state = running_state(3, &tuning);
        assert_eq!(evaluate(&mut state, &tuning), 1);
        let obstacle = state.obstacles[0];
        assert_eq!(obstacle.pos.x, state.field.width);
        assert_eq!(obstacle.pos.y + obstacle.size.y, state.field.ground_y());
        assert_eq!(obstacle.kind, ObstacleKind::Ground);
    }

    #[test]
    fn test_no_spawn_until_gap_opens() {
        let tuning = Tuning::classic();
        let mut state = running_state(3, &tuning);
        evaluate(&mut state, &tuning);
        // The new obstacle still overlaps the right edge
        assert_eq!(evaluate(&mut state, &tuning), 0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_resampled_gap_within_speed_bounds() {
        let tuning = Tuning::classic();
        for seed in 0..50 {
            let mut state = running_state(seed, &tuning);
            state.scroll_speed = 11.0;
            evaluate(&mut state, &tuning);
            let range = tuning.gap.range_at(11.0);
            assert!(state.next_spawn_gap >= range.min);
            assert!(state.next_spawn_gap <= range.max);
        }
    }

    #[test]
    fn test_clusters_locked_at_low_score() {
        let tuning = Tuning::classic();
        for seed in 0..50 {
            let mut state = running_state(seed, &tuning);
            assert_eq!(evaluate(&mut state, &tuning), 1);
        }
    }

    #[test]
    fn test_cluster_members_are_spaced() {
        let tuning = Tuning {
            clusters: vec![ClusterRule {
                min_score: 0.0,
                chance: 1.0,
                size: 3,
            }],
            ..Tuning::classic()
        };
        let mut state = running_state(11, &tuning);
        state.score = 1.0;
        state.scroll_speed = 10.0;
        assert_eq!(evaluate(&mut state, &tuning), 3);
        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.pos.x).collect();
        let w = state.obstacles[0].size.x;
        assert!((xs[1] - xs[0] - (w + CLUSTER_SPACING)).abs() < 1e-3);
        assert!((xs[2] - xs[1] - (w + CLUSTER_SPACING)).abs() < 1e-3);
    }

    #[test]
    fn test_slow_clusters_are_capped() {
        let tuning = Tuning::floaty();
        let mut state = running_state(0, &tuning);
        state.scroll_speed = 2.833;
        // Floaty clears 50px obstacles on ticks 6..=41
        assert_eq!(max_clearable_cluster(&state, &tuning, 30.0, 30.0, 3), 2);
        assert_eq!(max_clearable_cluster(&state, &tuning, 40.0, 50.0, 3), 1);

        state.scroll_speed = 5.0;
        assert_eq!(max_clearable_cluster(&state, &tuning, 40.0, 50.0, 3), 3);
    }

    #[test]
    fn test_capped_cluster_never_exceeds_request() {
        let tuning = Tuning::classic();
        let mut state = running_state(0, &tuning);
        state.scroll_speed = tuning.max_speed;
        assert_eq!(max_clearable_cluster(&state, &tuning, 30.0, 30.0, 2), 2);
        assert_eq!(max_clearable_cluster(&state, &tuning, 30.0, 30.0, 1), 1);
    }

    #[test]
    fn test_elevated_hazards_float() {
        let mut tuning = Tuning::floaty();
        if let Some(elevated) = &mut tuning.elevated {
            elevated.min_score = 0.0;
            elevated.chance = 1.0;
        }
        let mut state = running_state(5, &tuning);
        state.score = 1.0;
        evaluate(&mut state, &tuning);
        let obstacle = state.obstacles[0];
        assert_eq!(obstacle.kind, ObstacleKind::Elevated);
        assert!(obstacle.pos.y + obstacle.size.y < state.field.ground_y());
        assert_eq!(obstacle.sprite, ELEVATED_SPRITE);
    }

    #[test]
    fn test_ground_sprite_tracks_width() {
        let tuning = Tuning::classic();
        assert_eq!(ground_sprite(&tuning, 30.0), GROUND_SPRITES[0]);
        assert_eq!(ground_sprite(&tuning, 40.0), GROUND_SPRITES[2]);
    }
}
