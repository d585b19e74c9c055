//! Data-driven game feel
//!
//! Every constant that shapes how a run plays lives in [`Tuning`]. Three presets
//! ship with the game; any of their fields can be overridden from JSON.

use serde::{Deserialize, Serialize};

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Snappy jump, stepped speed-up, flat-color obstacles
    #[default]
    Classic,
    /// Low gravity, slow continuous speed-up, sprite obstacles and flying hazards
    Floaty,
    /// Heavy and fast with tight hitboxes
    Arcade,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::Floaty => "Floaty",
            TuningPreset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(TuningPreset::Classic),
            "floaty" => Some(TuningPreset::Floaty),
            "arcade" => Some(TuningPreset::Arcade),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            TuningPreset::Classic => Tuning::classic(),
            TuningPreset::Floaty => Tuning::floaty(),
            TuningPreset::Arcade => Tuning::arcade(),
        }
    }
}

/// How scroll speed grows with score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeedCurve {
    /// Add `increment` each time the score passes another `every_points`
    Stepped { every_points: f32, increment: f32 },
    /// `initial_speed + score / divisor`
    Continuous { divisor: f32 },
}

/// Inclusive-exclusive float range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in [0, 1) onto the range
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    fn ordered(self) -> Self {
        if self.max < self.min {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }
}

/// Spawn gap bounds after a spawn: `base + per_speed * scroll_speed`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapRule {
    pub min_base: f32,
    pub min_per_speed: f32,
    pub max_base: f32,
    pub max_per_speed: f32,
}

impl GapRule {
    /// Sampling range for the given scroll speed
    pub fn range_at(&self, speed: f32) -> Range {
        Range::new(
            self.min_base + self.min_per_speed * speed,
            self.max_base + self.max_per_speed * speed,
        )
        .ordered()
    }
}

/// A cluster of `size` obstacles becomes possible past `min_score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterRule {
    pub min_score: f32,
    /// Probability the rule applies once unlocked
    pub chance: f32,
    pub size: u32,
}

/// Hazards floating above the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatedHazards {
    pub min_score: f32,
    pub chance: f32,
    /// Candidate gaps between the ground line and the hazard's bottom edge
    pub lifts: Vec<f32>,
    pub width: f32,
    pub height: f32,
}

/// Shrinkage applied to every side of a visual box before collision testing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxInsets {
    pub actor: f32,
    pub obstacle: f32,
}

/// How the renderer draws obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ObstacleStyle {
    #[default]
    FlatColor,
    SpriteSheet,
}

/// All tuning constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every tick (px/tick²)
    pub gravity: f32,
    /// Upward velocity given by a jump (px/tick, positive number)
    pub jump_impulse: f32,
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_curve: SpeedCurve,
    /// Score gained per pixel scrolled
    pub score_per_px: f32,
    /// Gap threshold before the first spawn of a run
    pub initial_gap: Range,
    pub gap: GapRule,
    pub obstacle_width: Range,
    pub obstacle_height: Range,
    /// Checked in order; later rules override earlier ones when they fire
    pub clusters: Vec<ClusterRule>,
    pub elevated: Option<ElevatedHazards>,
    pub insets: HitboxInsets,
    pub obstacle_style: ObstacleStyle,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// The feel of the shipped game
    pub fn classic() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: 12.0,
            initial_speed: 5.0,
            max_speed: 15.0,
            speed_curve: SpeedCurve::Stepped {
                every_points: 100.0,
                increment: 0.5,
            },
            score_per_px: 0.05,
            initial_gap: Range::new(400.0, 600.0),
            gap: GapRule {
                min_base: 250.0,
                min_per_speed: 15.0,
                max_base: 500.0,
                max_per_speed: 25.0,
            },
            obstacle_width: Range::new(30.0, 40.0),
            obstacle_height: Range::new(30.0, 50.0),
            clusters: vec![
                ClusterRule {
                    min_score: 500.0,
                    chance: 0.5,
                    size: 2,
                },
                ClusterRule {
                    min_score: 1000.0,
                    chance: 0.3,
                    size: 3,
                },
            ],
            elevated: None,
            insets: HitboxInsets {
                actor: 5.0,
                obstacle: 2.0,
            },
            obstacle_style: ObstacleStyle::FlatColor,
        }
    }

    pub fn floaty() -> Self {
        Self {
            gravity: 0.4,
            jump_impulse: 9.5,
            initial_speed: 2.5,
            max_speed: 10.0,
            speed_curve: SpeedCurve::Continuous { divisor: 3000.0 },
            // The slow scroll leaves little room for long clusters
            clusters: vec![
                ClusterRule {
                    min_score: 800.0,
                    chance: 0.4,
                    size: 2,
                },
                ClusterRule {
                    min_score: 3000.0,
                    chance: 0.2,
                    size: 3,
                },
            ],
            elevated: Some(ElevatedHazards {
                min_score: 300.0,
                chance: 0.25,
                lifts: vec![20.0, 60.0],
                width: 40.0,
                height: 25.0,
            }),
            obstacle_style: ObstacleStyle::SpriteSheet,
            ..Self::classic()
        }
    }

    pub fn arcade() -> Self {
        Self {
            gravity: 0.9,
            jump_impulse: 15.0,
            initial_speed: 6.0,
            max_speed: 18.0,
            speed_curve: SpeedCurve::Stepped {
                every_points: 150.0,
                increment: 1.0,
            },
            insets: HitboxInsets {
                actor: 3.0,
                obstacle: 0.0,
            },
            ..Self::classic()
        }
    }

    /// Parse JSON overrides on top of a preset
    pub fn from_json_with_preset(json: &str, preset: TuningPreset) -> serde_json::Result<Self> {
        let mut base = serde_json::to_value(preset.tuning())?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        if let (Some(base), serde_json::Value::Object(overrides)) =
            (base.as_object_mut(), overrides)
        {
            for (key, value) in overrides {
                base.insert(key, value);
            }
        }
        serde_json::from_value(base)
    }

    /// Clamp values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        self.gravity = self.gravity.max(0.0);
        self.jump_impulse = self.jump_impulse.max(0.0);
        self.initial_speed = self.initial_speed.max(0.0);
        self.max_speed = self.max_speed.max(self.initial_speed);
        self.score_per_px = self.score_per_px.max(0.0);
        self.speed_curve = match self.speed_curve {
            SpeedCurve::Stepped {
                every_points,
                increment,
            } => SpeedCurve::Stepped {
                every_points: every_points.max(1.0),
                increment: increment.max(0.0),
            },
            SpeedCurve::Continuous { divisor } => SpeedCurve::Continuous {
                divisor: divisor.max(f32::EPSILON),
            },
        };
        self.initial_gap = self.initial_gap.ordered();
        self.obstacle_width = self.obstacle_width.ordered();
        self.obstacle_height = self.obstacle_height.ordered();
        for rule in &mut self.clusters {
            rule.chance = rule.chance.clamp(0.0, 1.0);
            rule.size = rule.size.max(1);
        }
        if let Some(elevated) = &mut self.elevated {
            elevated.chance = elevated.chance.clamp(0.0, 1.0);
            if elevated.lifts.is_empty() {
                elevated.lifts.push(0.0);
            }
        }
        self.insets.actor = self.insets.actor.max(0.0);
        self.insets.obstacle = self.insets.obstacle.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in [TuningPreset::Classic, TuningPreset::Floaty, TuningPreset::Arcade] {
            assert_eq!(TuningPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(TuningPreset::from_str("nope"), None);
    }

    #[test]
    fn test_gap_grows_with_speed() {
        let gap = Tuning::classic().gap;
        let slow = gap.range_at(5.0);
        let fast = gap.range_at(15.0);
        assert!(fast.min > slow.min);
        assert!(fast.max > slow.max);
        assert_eq!(slow.min, 325.0);
        assert_eq!(slow.max, 625.0);
    }

    #[test]
    fn test_sanitize_speed_cap_floor() {
        let tuning = Tuning {
            initial_speed: 8.0,
            max_speed: -3.0,
            ..Tuning::classic()
        }
        .sanitized();
        assert_eq!(tuning.max_speed, 8.0);
    }

    #[test]
    fn test_sanitize_orders_ranges() {
        let tuning = Tuning {
            obstacle_height: Range::new(50.0, 30.0),
            insets: HitboxInsets {
                actor: -1.0,
                obstacle: -2.0,
            },
            ..Tuning::classic()
        }
        .sanitized();
        assert_eq!(tuning.obstacle_height, Range::new(30.0, 50.0));
        assert_eq!(tuning.insets.actor, 0.0);
        assert_eq!(tuning.insets.obstacle, 0.0);
    }

    #[test]
    fn test_json_overrides_preset() {
        let tuning = Tuning::from_json_with_preset(
            r#"{"gravity": 0.5, "max_speed": 12.0}"#,
            TuningPreset::Floaty,
        )
        .unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.max_speed, 12.0);
        // Untouched fields keep the preset's values
        assert_eq!(tuning.initial_speed, 2.5);
        assert!(tuning.elevated.is_some());
    }
}
