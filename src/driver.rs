//! Frame driver
//!
//! Turns host frame callbacks into simulation ticks. Input handlers only
//! touch the buffered intents and the restart flag; everything else mutates
//! inside [`Game::on_frame`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::LOW_TIME_SECS;
use crate::highscores::HighScores;
use crate::persistence::HighScoreStore;
use crate::sim::{GameEvent, GameState, RandomSource, RenderMode, TickInput, tick};
use crate::tuning::Tuning;

/// Abstract input intents, already mapped from physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Throw,
}

/// Numbers shown on the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudView {
    pub score: u64,
    pub lives: u8,
    /// Remaining time rounded up to whole seconds
    pub seconds_left: u32,
    /// Timer is in its final stretch
    pub low_time: bool,
    pub high_score: u64,
}

/// Read-only snapshot handed to the renderer once per frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub mode: RenderMode,
    pub hud: HudView,
    /// Events raised during this frame, in order
    pub events: &'a [GameEvent],
}

/// Consumer of per-frame snapshots (canvas, DOM, terminal, ...)
pub trait RenderSink {
    fn present(&mut self, frame: &FrameView<'_>);
}

/// Sink that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &FrameView<'_>) {}
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game<R: RandomSource = Pcg32> {
    state: GameState,
    tuning: Tuning,
    rng: R,
    input: TickInput,
    restart_requested: bool,
    last_timestamp: Option<f64>,
    high_scores: HighScores,
    /// Events raised during the most recent frame
    frame_events: Vec<GameEvent>,
}

impl Game<Pcg32> {
    /// Create a game with a seeded PCG generator
    pub fn new(tuning: Tuning, seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed), store)
    }
}

impl<R: RandomSource> Game<R> {
    /// Create a game with any random source
    pub fn with_rng(tuning: Tuning, mut rng: R, store: Box<dyn HighScoreStore>) -> Self {
        let state = GameState::new(&tuning, &mut rng);
        Self {
            state,
            tuning,
            rng,
            input: TickInput::default(),
            restart_requested: false,
            last_timestamp: None,
            high_scores: HighScores::load(store),
            frame_events: Vec::new(),
        }
    }

    /// Record a key press or release. Applied on the next frame.
    pub fn set_intent(&mut self, intent: Intent, pressed: bool) {
        match intent {
            Intent::MoveLeft => self.input.move_left = pressed,
            Intent::MoveRight => self.input.move_right = pressed,
            Intent::Throw => self.input.throw = pressed,
        }
    }

    /// Ask for a new run. Honored on the next frame, and only if the game
    /// has not started or has ended.
    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    pub fn can_restart(&self) -> bool {
        self.state.can_restart()
    }

    /// Advance one display frame and present it
    ///
    /// `timestamp_ms` drives both the countdown (as a delta) and the throw
    /// cooldown (as wall-clock time).
    pub fn on_frame(&mut self, timestamp_ms: f64, sink: &mut dyn RenderSink) {
        if std::mem::take(&mut self.restart_requested) && self.restart() {
            // Fresh run: the first frame of it has dt = 0
            self.last_timestamp = None;
        }

        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        if self.state.running {
            tick(
                &mut self.state,
                &self.input,
                timestamp_ms,
                &self.tuning,
                &mut self.rng,
            );
            self.state.tick_timer(dt);
        }

        self.process_events();
        sink.present(&self.frame_view());
    }

    fn restart(&mut self) -> bool {
        let restarted = self.state.request_restart(&self.tuning, &mut self.rng);
        if restarted {
            log::info!("Run started (high score {})", self.high_scores.best());
        }
        restarted
    }

    fn process_events(&mut self) {
        self.frame_events = self.state.drain_events();
        for event in &self.frame_events {
            if let GameEvent::GameOver { reason, score } = *event {
                let new_best = self.high_scores.commit(score);
                log::info!(
                    "Run over ({:?}): score {}{}",
                    reason,
                    score,
                    if new_best { " - new high score!" } else { "" }
                );
            }
        }
    }

    pub fn hud(&self) -> HudView {
        let seconds_left = self.state.display_seconds();
        HudView {
            score: self.state.score,
            lives: self.state.lives,
            seconds_left,
            low_time: seconds_left <= LOW_TIME_SECS,
            high_score: self.high_scores.best(),
        }
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            state: &self.state,
            mode: self.state.render_mode(),
            hud: self.hud(),
            events: &self.frame_events,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    /// Events raised during the most recent frame
    pub fn frame_events(&self) -> &[GameEvent] {
        &self.frame_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, MemoryStoreProbe};
    use crate::sim::{GameOverReason, Projectile, ScriptedRandom};
    use glam::Vec2;

    /// Records the render mode of every presented frame
    #[derive(Default)]
    struct RecordingSink {
        modes: Vec<RenderMode>,
        huds: Vec<HudView>,
        events: Vec<GameEvent>,
    }

    impl RenderSink for RecordingSink {
        fn present(&mut self, frame: &FrameView<'_>) {
            self.modes.push(frame.mode);
            self.huds.push(frame.hud);
            self.events.extend_from_slice(frame.events);
        }
    }

    fn game_with_store(store: MemoryStore) -> (Game<ScriptedRandom>, MemoryStoreProbe) {
        let probe = store.probe();
        let game = Game::with_rng(
            Tuning::default(),
            ScriptedRandom::constant(0.5),
            Box::new(store),
        );
        (game, probe)
    }

    fn started_game() -> Game<ScriptedRandom> {
        let (mut game, _) = game_with_store(MemoryStore::new());
        game.request_restart();
        game.on_frame(1_000.0, &mut NullSink);
        game
    }

    #[test]
    fn test_waits_for_start() {
        let (mut game, _) = game_with_store(MemoryStore::new());
        let mut sink = RecordingSink::default();

        game.set_intent(Intent::MoveLeft, true);
        game.on_frame(0.0, &mut sink);
        game.on_frame(5_000.0, &mut sink);
        assert_eq!(game.state().remaining_time, 120.0);
        assert_eq!(game.state().player.x, 400.0);

        game.request_restart();
        game.on_frame(5_016.0, &mut sink);
        assert_eq!(
            sink.modes,
            vec![RenderMode::StartPrompt, RenderMode::StartPrompt, RenderMode::Playing]
        );
    }

    #[test]
    fn test_first_frame_after_start_has_zero_dt() {
        let mut game = started_game();
        assert_eq!(game.state().remaining_time, 120.0);

        game.on_frame(1_500.0, &mut NullSink);
        assert!((game.state().remaining_time - 119.5).abs() < 1e-4);
    }

    #[test]
    fn test_intents_apply_on_next_frame() {
        let mut game = started_game();
        let x = game.state().player.x;

        game.set_intent(Intent::MoveRight, true);
        assert_eq!(game.state().player.x, x);
        game.on_frame(1_016.0, &mut NullSink);
        assert_eq!(game.state().player.x, x + 5.0);

        game.set_intent(Intent::MoveRight, false);
        game.on_frame(1_032.0, &mut NullSink);
        assert_eq!(game.state().player.x, x + 5.0);
    }

    #[test]
    fn test_held_throw_respects_cooldown() {
        let mut game = started_game();
        game.set_intent(Intent::Throw, true);

        // 50 fps for 0.6 s: throws at 1020 and 1420 only
        let mut throws = 0;
        for frame in 1..=30 {
            game.on_frame(1_000.0 + frame as f64 * 20.0, &mut NullSink);
            throws += game
                .frame_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Thrown))
                .count();
        }
        assert_eq!(throws, 2);
        assert_eq!(game.state().last_throw_ms, Some(1_420.0));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut game = started_game();
        game.set_intent(Intent::MoveLeft, true);
        game.on_frame(2_000.0, &mut NullSink);
        let x = game.state().player.x;
        let time = game.state().remaining_time;

        game.set_intent(Intent::MoveLeft, false);
        game.request_restart();
        game.on_frame(2_000.0, &mut NullSink);
        assert!(game.state().running);
        assert_eq!(game.state().player.x, x);
        assert_eq!(game.state().remaining_time, time);
    }

    #[test]
    fn test_game_over_commits_high_score_once() {
        let (mut game, probe) = game_with_store(MemoryStore::with_value(20));
        game.request_restart();
        game.on_frame(0.0, &mut NullSink);
        game.state.score = 30;

        game.on_frame(200_000.0, &mut NullSink);
        assert!(!game.state().running);
        assert_eq!(
            game.frame_events(),
            &[GameEvent::GameOver {
                reason: GameOverReason::OutOfTime,
                score: 30
            }]
        );
        assert_eq!(probe.saves(), 1);
        assert_eq!(probe.value(), Some(30));
        assert_eq!(game.high_score(), 30);

        // Further frames in the over state never save again
        game.on_frame(201_000.0, &mut NullSink);
        game.on_frame(202_000.0, &mut NullSink);
        assert_eq!(probe.saves(), 1);
        assert_eq!(game.frame_view().mode, RenderMode::GameOver);
    }

    #[test]
    fn test_lower_score_not_saved() {
        let (mut game, probe) = game_with_store(MemoryStore::with_value(500));
        game.request_restart();
        game.on_frame(0.0, &mut NullSink);
        game.state.score = 30;
        game.on_frame(200_000.0, &mut NullSink);
        assert_eq!(probe.saves(), 0);
        assert_eq!(game.high_score(), 500);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = started_game();
        game.on_frame(200_000.0, &mut NullSink);
        assert!(game.can_restart());

        game.request_restart();
        game.on_frame(300_000.0, &mut NullSink);
        let state = game.state();
        assert!(state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        // dt reset on restart
        assert_eq!(state.remaining_time, 120.0);
    }

    #[test]
    fn test_hud_low_time() {
        let mut game = started_game();
        let mut sink = RecordingSink::default();
        game.on_frame(1_000.0 + 109_500.0, &mut sink);
        game.on_frame(1_000.0 + 110_000.0, &mut sink);

        assert_eq!(sink.huds[0].seconds_left, 11);
        assert!(!sink.huds[0].low_time);
        assert_eq!(sink.huds[1].seconds_left, 10);
        assert!(sink.huds[1].low_time);
    }

    #[test]
    fn test_frame_carries_hit_events() {
        let mut game = started_game();
        let mut sink = RecordingSink::default();

        // Park a Benign and a Penalty actor under two fresh projectiles
        let ground = game.tuning().ground_y;
        game.state.benign[0].x = 300.0;
        game.state.penalty[0].x = 500.0;
        for x in [307.0, 507.0] {
            game.state.projectiles.push(Projectile::new(
                Vec2::new(x, ground - 20.0),
                Vec2::new(7.0, 0.0),
                8.0,
            ));
        }
        game.on_frame(1_016.0, &mut sink);

        assert_eq!(
            sink.events,
            vec![
                GameEvent::Scored { points: 10 },
                GameEvent::LifeLost { remaining: 2 }
            ]
        );
        assert_eq!(sink.huds[0].score, 10);
        assert_eq!(sink.huds[0].lives, 2);
    }
}
