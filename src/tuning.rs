//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. `Tuning::default()` reproduces the
//! values in [`crate::consts`].

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ActorKind;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Half-open float range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

/// Inclusive integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRange {
    pub min: i32,
    pub max: i32,
}

impl OffsetRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Player geometry and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Fixed vertical position (top of the wall)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal units per tick
    pub speed: f32,
    pub left_bound: f32,
    pub right_bound: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            y: PLAYER_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            left_bound: PLAYER_LEFT_BOUND,
            right_bound: PLAYER_RIGHT_BOUND,
        }
    }
}

/// Projectile launch and flight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub radius: f32,
    pub base_speed: f32,
    /// Multiplier applied to `base_speed` for vx
    pub spread: SpeedRange,
    pub launch_vy: f32,
    pub launch_vy_jitter: f32,
    /// Added to vy every tick
    pub gravity: f32,
    pub cooldown_ms: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            radius: PROJECTILE_RADIUS,
            base_speed: PROJECTILE_BASE_SPEED,
            spread: SpeedRange::new(PROJECTILE_SPREAD_MIN, PROJECTILE_SPREAD_MAX),
            launch_vy: PROJECTILE_LAUNCH_VY,
            launch_vy_jitter: PROJECTILE_LAUNCH_VY_JITTER,
            gravity: GRAVITY,
            cooldown_ms: THROW_COOLDOWN_MS,
        }
    }
}

/// Spawn and respawn rules for one class of scrolling actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorTuning {
    /// Actors created per reset
    pub count: usize,
    pub width: f32,
    pub height: f32,
    /// Horizontal gap between actors of the initial batch
    pub spacing: f32,
    /// Speed drawn for the initial batch
    pub spawn_speed: SpeedRange,
    /// Speed drawn when recycled after walking off the left edge
    pub respawn_speed: SpeedRange,
    /// Offset past the right edge when recycled after walking off
    pub leave_offset: OffsetRange,
    /// Offset past the right edge when recycled after being hit
    pub hit_offset: OffsetRange,
    /// Speed drawn after a hit; `None` keeps the current speed
    pub hit_speed: Option<SpeedRange>,
}

impl ActorTuning {
    pub fn benign() -> Self {
        Self {
            count: BENIGN_COUNT,
            width: BENIGN_WIDTH,
            height: BENIGN_HEIGHT,
            spacing: BENIGN_SPACING,
            spawn_speed: SpeedRange::new(2.0, 3.2),
            respawn_speed: SpeedRange::new(2.0, 3.5),
            leave_offset: OffsetRange::new(100, 300),
            hit_offset: OffsetRange::new(100, 300),
            hit_speed: Some(SpeedRange::new(2.0, 3.5)),
        }
    }

    pub fn penalty() -> Self {
        Self {
            count: PENALTY_COUNT,
            width: PENALTY_WIDTH,
            height: PENALTY_HEIGHT,
            spacing: PENALTY_SPACING,
            spawn_speed: SpeedRange::new(2.3, 3.8),
            respawn_speed: SpeedRange::new(2.3, 3.8),
            leave_offset: OffsetRange::new(250, 450),
            hit_offset: OffsetRange::new(200, 400),
            hit_speed: None,
        }
    }
}

/// Actor section as written in a tuning file; absent fields fall back to
/// the defaults of the actor class it is applied to
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActorTuningPatch {
    count: Option<usize>,
    width: Option<f32>,
    height: Option<f32>,
    spacing: Option<f32>,
    spawn_speed: Option<SpeedRange>,
    respawn_speed: Option<SpeedRange>,
    leave_offset: Option<OffsetRange>,
    hit_offset: Option<OffsetRange>,
    /// Outer `None` means absent, `Some(None)` is an explicit `null`
    #[serde(deserialize_with = "present")]
    hit_speed: Option<Option<SpeedRange>>,
}

impl ActorTuningPatch {
    fn apply(self, base: ActorTuning) -> ActorTuning {
        ActorTuning {
            count: self.count.unwrap_or(base.count),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            spacing: self.spacing.unwrap_or(base.spacing),
            spawn_speed: self.spawn_speed.unwrap_or(base.spawn_speed),
            respawn_speed: self.respawn_speed.unwrap_or(base.respawn_speed),
            leave_offset: self.leave_offset.unwrap_or(base.leave_offset),
            hit_offset: self.hit_offset.unwrap_or(base.hit_offset),
            hit_speed: self.hit_speed.unwrap_or(base.hit_speed),
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn benign_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ActorTuning, D::Error> {
    ActorTuningPatch::deserialize(deserializer).map(|patch| patch.apply(ActorTuning::benign()))
}

fn penalty_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ActorTuning, D::Error> {
    ActorTuningPatch::deserialize(deserializer).map(|patch| patch.apply(ActorTuning::penalty()))
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    /// Baseline the scrolling actors stand on
    pub ground_y: f32,
    /// How far past the left edge an actor walks before it is recycled
    pub offscreen_margin: f32,
    #[serde(deserialize_with = "benign_section")]
    pub benign: ActorTuning,
    #[serde(deserialize_with = "penalty_section")]
    pub penalty: ActorTuning,
    pub points_per_hit: u64,
    pub starting_lives: u8,
    pub total_time_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            ground_y: GROUND_Y,
            offscreen_margin: OFFSCREEN_MARGIN,
            benign: ActorTuning::benign(),
            penalty: ActorTuning::penalty(),
            points_per_hit: POINTS_PER_HIT,
            starting_lives: STARTING_LIVES,
            total_time_secs: TOTAL_TIME_SECS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Spawn rules for one actor class
    pub fn actor(&self, kind: ActorKind) -> &ActorTuning {
        match kind {
            ActorKind::Benign => &self.benign,
            ActorKind::Penalty => &self.penalty,
        }
    }

    /// Leftmost allowed player x
    #[inline]
    pub fn player_min_x(&self) -> f32 {
        self.player.left_bound
    }

    /// Rightmost allowed player x
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.screen_width - self.player.right_bound
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return invalid("screen", "dimensions must be positive");
        }
        if self.player_min_x() > self.player_max_x() {
            return invalid("player", "bounds leave no room to move");
        }
        if self.projectile.radius <= 0.0 {
            return invalid("projectile.radius", "must be positive");
        }
        if self.projectile.spread.min > self.projectile.spread.max {
            return invalid("projectile.spread", "min exceeds max");
        }
        if self.projectile.cooldown_ms < 0.0 {
            return invalid("projectile.cooldown_ms", "must not be negative");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.total_time_secs <= 0.0 {
            return invalid("total_time_secs", "must be positive");
        }
        for (field, actor) in [("benign", &self.benign), ("penalty", &self.penalty)] {
            if actor.width <= 0.0 || actor.height <= 0.0 {
                return invalid(field, "actor size must be positive");
            }
            let speeds = [Some(actor.spawn_speed), Some(actor.respawn_speed), actor.hit_speed];
            if speeds.iter().flatten().any(|r| r.min > r.max) {
                return invalid(field, "speed range min exceeds max");
            }
            if actor.leave_offset.min > actor.leave_offset.max
                || actor.hit_offset.min > actor.hit_offset.max
            {
                return invalid(field, "offset range min exceeds max");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let t = Tuning::default();
        assert_eq!(t.screen_width, SCREEN_WIDTH);
        assert_eq!(t.player_min_x(), 40.0);
        assert_eq!(t.player_max_x(), SCREEN_WIDTH - 40.0);
        assert_eq!(t.benign.count, 3);
        assert_eq!(t.penalty.count, 2);
        assert_eq!(t.penalty.hit_offset, OffsetRange::new(200, 400));
        assert!(t.penalty.hit_speed.is_none());
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t = Tuning::from_json(r#"{ "total_time_secs": 60.0, "player": { "speed": 9.0 } }"#)
            .unwrap();
        assert_eq!(t.total_time_secs, 60.0);
        assert_eq!(t.player.speed, 9.0);
        assert_eq!(t.player.width, PLAYER_WIDTH);
        assert_eq!(t.benign.spacing, BENIGN_SPACING);
    }

    #[test]
    fn test_partial_actor_section_keeps_class_defaults() {
        let t = Tuning::from_json(r#"{ "benign": { "count": 4 }, "penalty": { "width": 50.0 } }"#)
            .unwrap();
        assert_eq!(t.benign.count, 4);
        assert_eq!(t.benign.width, BENIGN_WIDTH);
        assert_eq!(t.benign.hit_offset, OffsetRange::new(100, 300));
        assert_eq!(t.benign.hit_speed, Some(SpeedRange::new(2.0, 3.5)));

        assert_eq!(t.penalty.width, 50.0);
        assert_eq!(t.penalty.count, PENALTY_COUNT);
        assert_eq!(t.penalty.leave_offset, OffsetRange::new(250, 450));
        assert!(t.penalty.hit_speed.is_none());
    }

    #[test]
    fn test_actor_hit_speed_null_keeps_speed() {
        let t = Tuning::from_json(r#"{ "benign": { "hit_speed": null } }"#).unwrap();
        assert!(t.benign.hit_speed.is_none());

        let t = Tuning::from_json(r#"{ "penalty": { "hit_speed": { "min": 1.0, "max": 2.0 } } }"#)
            .unwrap();
        assert_eq!(t.penalty.hit_speed, Some(SpeedRange::new(1.0, 2.0)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let t = Tuning::from_json(&Tuning::default().to_json()).unwrap();
        assert_eq!(t.penalty.leave_offset, OffsetRange::new(250, 450));
        assert_eq!(t.benign.hit_speed, Some(SpeedRange::new(2.0, 3.5)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "starting_lives": 0 }"#),
            Err(TuningError::Invalid { field: "starting_lives", .. })
        ));

        let mut t = Tuning::default();
        t.player.left_bound = 500.0;
        t.player.right_bound = 500.0;
        assert!(t.validate().is_err());
    }
}
