//! Simulation step
//!
//! Motion is integrated once per tick with per-tick constants; only the
//! countdown timer (driven separately by the frame driver) scales with
//! elapsed time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::rng::RandomSource;
use super::spawn::{RespawnCause, respawn};
use super::state::{GameEvent, GameState, Projectile};
use crate::tuning::Tuning;

/// Buffered input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Throw is held; rate-limited by the cooldown
    pub throw: bool,
}

/// Advance the game by one tick. No-op unless running.
///
/// `now_ms` is wall-clock time and only feeds the throw cooldown.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
) {
    if !state.running {
        return;
    }

    move_player(state, input, tuning);

    if input.throw {
        try_throw(state, now_ms, tuning, rng);
    }

    advance_projectiles(state, tuning);
    advance_actors(state, tuning, rng);
    resolve_collisions(state, tuning, rng);
}

fn move_player(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let player = &mut state.player;
    if input.move_left {
        player.x -= player.speed;
    }
    if input.move_right {
        player.x += player.speed;
    }
    player.clamp_to(tuning.player_min_x(), tuning.player_max_x());
}

/// Launch a projectile from the player's centre if the cooldown allows
///
/// Returns whether a projectile was created.
pub fn try_throw(state: &mut GameState, now_ms: f64, tuning: &Tuning, rng: &mut dyn RandomSource) -> bool {
    if !state.running {
        return false;
    }
    let cfg = &tuning.projectile;
    if let Some(last) = state.last_throw_ms {
        if now_ms - last < cfg.cooldown_ms {
            return false;
        }
    }
    state.last_throw_ms = Some(now_ms);

    let vx = cfg.base_speed * rng.uniform(cfg.spread.min, cfg.spread.max);
    let vy = -cfg.launch_vy - rng.uniform(0.0, cfg.launch_vy_jitter);
    let pos = Vec2::new(state.player.center_x(), state.player.y);

    state
        .projectiles
        .push(Projectile::new(pos, Vec2::new(vx, vy), cfg.radius));
    state.events.push(GameEvent::Thrown);
    log::debug!("Thrown at ({}, {}) v=({:.2}, {:.2})", pos.x, pos.y, vx, vy);
    true
}

fn advance_projectiles(state: &mut GameState, tuning: &Tuning) {
    let gravity = tuning.projectile.gravity;
    for projectile in &mut state.projectiles {
        projectile.integrate(gravity);
    }
    state
        .projectiles
        .retain(|p| p.in_bounds(tuning.screen_width, tuning.screen_height));
}

fn advance_actors(state: &mut GameState, tuning: &Tuning, rng: &mut dyn RandomSource) {
    let margin = tuning.offscreen_margin;
    for actor in state.benign.iter_mut().chain(state.penalty.iter_mut()) {
        actor.x -= actor.speed;
        if actor.is_past_left_edge(margin) {
            respawn(actor, RespawnCause::LeftScreen, tuning, rng);
        }
    }
}
