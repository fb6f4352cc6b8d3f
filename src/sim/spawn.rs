//! Spawn and respawn policy for scrolling actors
//!
//! Actors are placed past the right edge of the screen. The initial batch is
//! evenly spaced; recycled actors get a random offset whose range depends on
//! why they were recycled.

use super::rng::RandomSource;
use super::state::{ActorKind, ScrollingActor};
use crate::tuning::{SpeedRange, Tuning};

/// Why an actor is being recycled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnCause {
    /// Walked off the left edge
    LeftScreen,
    /// Struck by a projectile
    Hit,
}

fn draw_speed(range: SpeedRange, rng: &mut dyn RandomSource) -> f32 {
    rng.uniform(range.min, range.max)
}

/// Build the initial batch of actors for `kind`
///
/// Actor `i` starts at `screen_width + i * spacing`, so the batch never
/// overlaps at spawn.
pub fn spawn_batch(kind: ActorKind, tuning: &Tuning, rng: &mut dyn RandomSource) -> Vec<ScrollingActor> {
    let rules = tuning.actor(kind);
    (0..rules.count)
        .map(|i| ScrollingActor {
            kind,
            x: tuning.screen_width + i as f32 * rules.spacing,
            baseline: tuning.ground_y,
            width: rules.width,
            height: rules.height,
            speed: draw_speed(rules.spawn_speed, rng),
        })
        .collect()
}

/// Recycle an actor to the right of the screen
pub fn respawn(actor: &mut ScrollingActor, cause: RespawnCause, tuning: &Tuning, rng: &mut dyn RandomSource) {
    let rules = tuning.actor(actor.kind);
    let (offset, speed) = match cause {
        RespawnCause::LeftScreen => (rules.leave_offset, Some(rules.respawn_speed)),
        RespawnCause::Hit => (rules.hit_offset, rules.hit_speed),
    };

    actor.x = tuning.screen_width + rng.int_inclusive(offset.min, offset.max) as f32;
    if let Some(range) = speed {
        actor.speed = draw_speed(range, rng);
    }
    log::debug!(
        "Respawned {:?} ({:?}) at x={} speed={:.2}",
        actor.kind,
        cause,
        actor.x,
        actor.speed
    );
}
