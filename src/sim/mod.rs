//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Motion advances once per tick, never scaled by frame time
//! - Randomness only through an injected [`RandomSource`]
//! - Stable iteration order (Benign before Penalty, list order within each)

pub mod collision;
pub mod geometry;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hit, find_hits, resolve_collisions};
pub use geometry::{Circle, Rect, circle_rect_overlap};
pub use rng::{RandomSource, ScriptedRandom};
pub use spawn::{RespawnCause, respawn, spawn_batch};
pub use state::{
    ActorKind, GameEvent, GameOverReason, GameState, Player, Projectile, RenderMode,
    ScrollingActor,
};
pub use tick::{TickInput, tick, try_throw};
