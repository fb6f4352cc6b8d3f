//! Game state and core simulation types
//!
//! One `GameState` owns every entity collection plus score, lives and the
//! countdown. The frame driver holds it and passes it into each operation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use super::rng::RandomSource;
use super::spawn::spawn_batch;
use crate::tuning::Tuning;

/// Which overlay the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Nothing has been started yet
    StartPrompt,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    OutOfLives,
    OutOfTime,
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Thrown,
    Scored { points: u64 },
    LifeLost { remaining: u8 },
    GameOver { reason: GameOverReason, score: u64 },
}

/// The two classes of scrolling actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Scores when hit
    Benign,
    /// Costs a life when hit
    Penalty,
}

/// The player character, walking along the top of the wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Player {
    /// Create a player centred on screen
    pub fn new(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        Self {
            x: tuning.screen_width / 2.0,
            y: p.y,
            width: p.width,
            height: p.height,
            speed: p.speed,
        }
    }

    /// Horizontal centre, where projectiles are released
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn clamp_to(&mut self, min_x: f32, max_x: f32) {
        self.x = self.x.clamp(min_x, max_x);
    }
}

/// A thrown projectile on a parabolic path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Set when a collision consumes it; purged at the end of the tick
    #[serde(default)]
    pub consumed: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            consumed: false,
        }
    }

    /// Advance one fixed step: move, then accelerate downward
    pub fn integrate(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
    }

    /// Still inside `(0, width) x (-inf, height)`
    pub fn in_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x > 0.0 && self.pos.x < width && self.pos.y < height
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A target walking right-to-left along the ground
///
/// Actors are never destroyed; leaving the screen or being hit recycles them
/// to the right of the playfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollingActor {
    pub kind: ActorKind,
    /// Left edge
    pub x: f32,
    /// Feet position; the body extends `height` above it
    pub baseline: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward units per tick
    pub speed: f32,
}

impl ScrollingActor {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.baseline - self.height, self.width, self.height)
    }

    /// Trailing edge is more than `margin` past the left edge
    #[inline]
    pub fn is_past_left_edge(&self, margin: f32) -> bool {
        self.x + self.width < -margin
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub benign: Vec<ScrollingActor>,
    pub penalty: Vec<ScrollingActor>,
    pub score: u64,
    pub lives: u8,
    /// Seconds left on the countdown, never negative
    pub remaining_time: f32,
    pub started: bool,
    pub running: bool,
    /// Wall-clock time of the last accepted throw
    pub last_throw_ms: Option<f64>,
    /// Pending events for the driver
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create the pre-game state: actors placed, nothing running
    pub fn new(tuning: &Tuning, rng: &mut dyn RandomSource) -> Self {
        Self {
            player: Player::new(tuning),
            projectiles: Vec::new(),
            benign: spawn_batch(ActorKind::Benign, tuning, rng),
            penalty: spawn_batch(ActorKind::Penalty, tuning, rng),
            score: 0,
            lives: tuning.starting_lives,
            remaining_time: tuning.total_time_secs,
            started: false,
            running: false,
            last_throw_ms: None,
            events: Vec::new(),
        }
    }

    /// Start a fresh run. Always fully reinitializes.
    pub fn reset(&mut self, tuning: &Tuning, rng: &mut dyn RandomSource) {
        self.player = Player::new(tuning);
        self.projectiles.clear();
        self.benign = spawn_batch(ActorKind::Benign, tuning, rng);
        self.penalty = spawn_batch(ActorKind::Penalty, tuning, rng);
        self.score = 0;
        self.lives = tuning.starting_lives;
        self.remaining_time = tuning.total_time_secs;
        self.started = true;
        self.running = true;
        self.events.clear();
        log::info!("New run: {} lives, {}s", self.lives, self.remaining_time);
    }

    /// True when a restart request would be honored
    pub fn can_restart(&self) -> bool {
        !self.started || (!self.running && (self.lives == 0 || self.remaining_time <= 0.0))
    }

    /// Reset if the game has not started or has genuinely ended.
    /// Returns whether the restart happened.
    pub fn request_restart(&mut self, tuning: &Tuning, rng: &mut dyn RandomSource) -> bool {
        if !self.can_restart() {
            log::debug!("Restart ignored: run in progress");
            return false;
        }
        self.reset(tuning, rng);
        true
    }

    /// Add points for a hit. No-op unless running.
    pub fn add_score(&mut self, points: u64) {
        if !self.running {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::Scored { points });
    }

    /// Take away one life; ends the run on the last one
    pub fn lose_life(&mut self) {
        if !self.running || self.lives == 0 {
            return;
        }

        self.lives -= 1;
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });

        if self.lives == 0 {
            self.end_run(GameOverReason::OutOfLives);
        }
    }

    /// Count the timer down by `dt` seconds; ends the run at zero
    pub fn tick_timer(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        self.remaining_time -= dt.max(0.0);
        if self.remaining_time <= 0.0 {
            self.remaining_time = 0.0;
            self.end_run(GameOverReason::OutOfTime);
        }
    }

    fn end_run(&mut self, reason: GameOverReason) {
        self.running = false;
        log::info!("Game over ({:?}), score {}", reason, self.score);
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
    }

    pub fn render_mode(&self) -> RenderMode {
        if !self.started {
            RenderMode::StartPrompt
        } else if self.running {
            RenderMode::Playing
        } else {
            RenderMode::GameOver
        }
    }

    /// Countdown as shown on the HUD (whole seconds, rounded up)
    pub fn display_seconds(&self) -> u32 {
        self.remaining_time.max(0.0).ceil() as u32
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;

    fn running_state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let mut state = GameState::new(&tuning, &mut rng);
        state.reset(&tuning, &mut rng);
        state.drain_events();
        (state, tuning)
    }

    #[test]
    fn test_new_is_not_started() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, &mut ScriptedRandom::constant(0.0));
        assert!(!state.started);
        assert!(!state.running);
        assert_eq!(state.render_mode(), RenderMode::StartPrompt);
        assert!(state.can_restart());
    }

    #[test]
    fn test_reset_postconditions() {
        let (mut state, tuning) = running_state();
        state.score = 70;
        state.lives = 1;
        state.remaining_time = 3.0;
        state.player.x = 40.0;
        state
            .projectiles
            .push(Projectile::new(Vec2::new(1.0, 1.0), Vec2::ZERO, 8.0));

        state.reset(&tuning, &mut ScriptedRandom::constant(0.1));
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.remaining_time, 120.0);
        assert_eq!(state.benign.len(), 3);
        assert_eq!(state.penalty.len(), 2);
        assert!(state.projectiles.is_empty());
        assert!(state.running && state.started);
        assert_eq!(state.player.x, tuning.screen_width / 2.0);
    }

    #[test]
    fn test_lose_life_to_zero() {
        let (mut state, _) = running_state();

        state.lose_life();
        assert_eq!(state.lives, 2);
        state.lose_life();
        assert_eq!(state.lives, 1);
        assert!(state.running);

        state.lose_life();
        assert_eq!(state.lives, 0);
        assert!(!state.running);

        // Already over - nothing changes
        state.lose_life();
        assert_eq!(state.lives, 0);

        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(state.render_mode(), RenderMode::GameOver);
    }

    #[test]
    fn test_timer_pins_at_zero() {
        let (mut state, _) = running_state();

        state.tick_timer(100.0);
        assert!((state.remaining_time - 20.0).abs() < 1e-4);
        assert!(state.running);

        state.tick_timer(25.0);
        assert_eq!(state.remaining_time, 0.0);
        assert!(!state.running);

        state.tick_timer(1.0);
        assert_eq!(state.remaining_time, 0.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                reason: GameOverReason::OutOfTime,
                score: 0
            }]
        );
    }

    #[test]
    fn test_score_frozen_when_not_running() {
        let (mut state, _) = running_state();
        state.add_score(10);
        state.tick_timer(500.0);
        state.add_score(10);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_restart_only_from_terminal_state() {
        let (mut state, tuning) = running_state();
        let mut rng = ScriptedRandom::constant(0.3);

        state.score = 40;
        assert!(!state.request_restart(&tuning, &mut rng));
        assert_eq!(state.score, 40);

        state.tick_timer(500.0);
        assert!(state.can_restart());
        assert!(state.request_restart(&tuning, &mut rng));
        assert_eq!(state.score, 0);
        assert!(state.running);
    }

    #[test]
    fn test_display_seconds_rounds_up() {
        let (mut state, _) = running_state();
        state.tick_timer(0.25);
        assert_eq!(state.display_seconds(), 120);
        state.remaining_time = 9.01;
        assert_eq!(state.display_seconds(), 10);
    }
}
