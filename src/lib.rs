//! Monkey Mayhem - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, game state)
//! - `driver`: Frame driver that turns host timestamps into simulation ticks
//! - `persistence`: High-score storage backends
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use driver::{FrameView, Game, HudView, Intent, NullSink, RenderSink};
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Player (the monkey on the wall)
    pub const PLAYER_Y: f32 = 160.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player x is clamped to [PLAYER_LEFT_BOUND, width - PLAYER_RIGHT_BOUND]
    pub const PLAYER_LEFT_BOUND: f32 = 40.0;
    pub const PLAYER_RIGHT_BOUND: f32 = 40.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const PROJECTILE_BASE_SPEED: f32 = 7.0;
    /// Horizontal speed multiplier range
    pub const PROJECTILE_SPREAD_MIN: f32 = 0.8;
    pub const PROJECTILE_SPREAD_MAX: f32 = 1.2;
    /// Launch vy = -PROJECTILE_LAUNCH_VY - uniform(0, PROJECTILE_LAUNCH_VY_JITTER)
    pub const PROJECTILE_LAUNCH_VY: f32 = 8.0;
    pub const PROJECTILE_LAUNCH_VY_JITTER: f32 = 3.0;
    /// Added to vy once per tick (not scaled by dt)
    pub const GRAVITY: f32 = 0.35;
    /// Minimum wall-clock interval between throws
    pub const THROW_COOLDOWN_MS: f64 = 400.0;

    /// Scrolling actors walk along this baseline
    pub const GROUND_Y: f32 = 380.0;
    /// Actor is recycled once its trailing edge passes -OFFSCREEN_MARGIN
    pub const OFFSCREEN_MARGIN: f32 = 20.0;

    pub const BENIGN_COUNT: usize = 3;
    pub const BENIGN_WIDTH: f32 = 30.0;
    pub const BENIGN_HEIGHT: f32 = 40.0;
    pub const BENIGN_SPACING: f32 = 200.0;

    pub const PENALTY_COUNT: usize = 2;
    pub const PENALTY_WIDTH: f32 = 30.0;
    pub const PENALTY_HEIGHT: f32 = 45.0;
    pub const PENALTY_SPACING: f32 = 350.0;

    /// Scoring and run budget
    pub const POINTS_PER_HIT: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
    pub const TOTAL_TIME_SECS: f32 = 120.0;
    /// HUD timer turns red at or below this many seconds
    pub const LOW_TIME_SECS: u32 = 10;
}
