//! Projectile vs actor collision resolution
//!
//! Resolution runs in two passes over an immutable view: first every
//! projectile is matched against Benign actors, then the survivors against
//! Penalty actors. Only after all hits are known are score, lives, actors and
//! projectiles mutated. A projectile is consumed by at most one hit per tick,
//! and since Benign matching runs first, a projectile touching both kinds
//! always scores.

use super::geometry::circle_rect_overlap;
use super::rng::RandomSource;
use super::spawn::{RespawnCause, respawn};
use super::state::{ActorKind, GameState, Projectile, ScrollingActor};
use crate::tuning::Tuning;

/// One resolved projectile/actor contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index into `GameState::projectiles`
    pub projectile: usize,
    /// Index into the actor list for `kind`
    pub actor: usize,
    pub kind: ActorKind,
}

/// Match live projectiles against one actor list
///
/// `consumed` is shared across passes so a projectile matched in an earlier
/// pass is skipped. Each actor is matched at most once, since a hit sends it
/// off screen.
fn match_pass(
    projectiles: &[Projectile],
    actors: &[ScrollingActor],
    kind: ActorKind,
    consumed: &mut [bool],
    hits: &mut Vec<Hit>,
) {
    let mut taken = vec![false; actors.len()];

    for (pi, projectile) in projectiles.iter().enumerate() {
        if consumed[pi] {
            continue;
        }
        let circle = projectile.circle();
        let found = actors
            .iter()
            .enumerate()
            .find(|(ai, actor)| !taken[*ai] && circle_rect_overlap(&circle, &actor.rect()))
            .map(|(ai, _)| ai);

        if let Some(ai) = found {
            taken[ai] = true;
            consumed[pi] = true;
            hits.push(Hit {
                projectile: pi,
                actor: ai,
                kind,
            });
        }
    }
}

/// Decide every hit for this tick without mutating anything
pub fn find_hits(state: &GameState) -> Vec<Hit> {
    let mut consumed: Vec<bool> = state.projectiles.iter().map(|p| p.consumed).collect();
    let mut hits = Vec::new();

    match_pass(&state.projectiles, &state.benign, ActorKind::Benign, &mut consumed, &mut hits);
    match_pass(&state.projectiles, &state.penalty, ActorKind::Penalty, &mut consumed, &mut hits);

    hits
}

/// Apply all hits for this tick, then purge consumed projectiles
///
/// Returns the hits that were applied, Benign first.
pub fn resolve_collisions(state: &mut GameState, tuning: &Tuning, rng: &mut dyn RandomSource) -> Vec<Hit> {
    if !state.running {
        return Vec::new();
    }

    let hits = find_hits(state);

    for hit in &hits {
        state.projectiles[hit.projectile].consumed = true;
        match hit.kind {
            ActorKind::Benign => {
                state.add_score(tuning.points_per_hit);
                respawn(&mut state.benign[hit.actor], RespawnCause::Hit, tuning, rng);
                log::debug!("Benign hit, score {}", state.score);
            }
            ActorKind::Penalty => {
                state.lose_life();
                respawn(&mut state.penalty[hit.actor], RespawnCause::Hit, tuning, rng);
                log::debug!("Penalty hit, lives {}", state.lives);
            }
        }
    }

    state.projectiles.retain(|p| !p.consumed);
    hits
}
