//! Game Runtime
//!
//! The game session sequences levels: it owns the score, the level source
//! and the host collaborators, runs the current level's tick and swaps
//! levels when a door is reached. Score is the only state that crosses a
//! level transition.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::capability::{AudioCues, Backend};
use super::score::{Score, ScoreDisplay};
use super::session::{FrameContext, FrameOutcome, LevelSession};
use crate::input::FrameInput;
use crate::settings::GameSettings;
use crate::world::{LevelError, LevelSource};

/// Error type for session sequencing
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("no level is running")]
    NoActiveLevel,
}

/// Where the game is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Not started yet
    #[default]
    Idle,
    Playing,
    /// Frozen; ticks do nothing until resumed
    Paused,
    /// The last door was taken
    Finished,
}

/// Result of one game tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// A door was taken and `to` is now running
    LevelChanged { from: String, to: String },
    Finished,
}

/// Outer owner of score and level sequencing
pub struct GameSession<Bk: Backend, Src: LevelSource> {
    settings: GameSettings,
    backend: Bk,
    levels: Src,
    audio: Box<dyn AudioCues>,
    display: Box<dyn ScoreDisplay>,
    score: Score,
    level: Option<LevelSession<Bk>>,
    phase: GamePhase,
    rng: StdRng,
}

impl<Bk: Backend, Src: LevelSource> GameSession<Bk, Src> {
    pub fn new(
        settings: GameSettings,
        backend: Bk,
        levels: Src,
        audio: Box<dyn AudioCues>,
        display: Box<dyn ScoreDisplay>,
    ) -> Self {
        Self {
            settings,
            backend,
            levels,
            audio,
            display,
            score: Score::default(),
            level: None,
            phase: GamePhase::Idle,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the random source (patrol offsets) for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn level(&self) -> Option<&LevelSession<Bk>> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut LevelSession<Bk>> {
        self.level.as_mut()
    }

    pub fn level_name(&self) -> Option<&str> {
        self.level.as_ref().map(|level| level.name())
    }

    pub fn backend(&self) -> &Bk {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut Bk {
        &mut self.backend
    }

    /// Start (or restart) from the first level with a zero score.
    ///
    /// A first level that fails to load leaves the score and any running
    /// level untouched.
    pub fn start(&mut self) -> Result<(), SessionError> {
        let first = self.settings.first_level.clone();
        self.enter_level(&first)?;
        self.score.reset();
        self.display.set_value(self.score.value());
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Replace the running level with `name`.
    ///
    /// The layout is loaded before the old level is torn down, so an unknown
    /// or broken level leaves the current one running.
    fn enter_level(&mut self, name: &str) -> Result<(), SessionError> {
        let layout = self.levels.load(name)?;
        if let Some(old) = self.level.take() {
            old.teardown(&mut self.backend);
        }
        let level = LevelSession::start(&layout, &self.settings, &mut self.backend, &mut self.rng)?;
        info!("entered level '{}' with score {}", name, self.score);
        self.level = Some(level);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.phase = match (self.phase, paused) {
            (GamePhase::Playing, true) => GamePhase::Paused,
            (GamePhase::Paused, false) => GamePhase::Playing,
            (phase, _) => phase,
        };
    }

    pub fn toggle_paused(&mut self) {
        let paused = self.phase == GamePhase::Playing;
        self.set_paused(paused);
    }

    /// Run one frame of the current level and follow any door taken.
    pub fn tick(&mut self, dt: f32, input: &FrameInput) -> Result<TickOutcome, SessionError> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Finished => return Ok(TickOutcome::Finished),
            GamePhase::Idle | GamePhase::Paused => return Ok(TickOutcome::Continue),
        }

        let level = self.level.as_mut().ok_or(SessionError::NoActiveLevel)?;
        let mut ctx = FrameContext {
            backend: &mut self.backend,
            score: &mut self.score,
            audio: &mut *self.audio,
            display: &mut *self.display,
        };
        let outcome = level.tick(dt, input, &mut ctx);

        match outcome {
            FrameOutcome::Continue => Ok(TickOutcome::Continue),
            FrameOutcome::LevelComplete { next: Some(to) } => {
                let from = self.level_name().unwrap_or_default().to_string();
                self.enter_level(&to)?;
                Ok(TickOutcome::LevelChanged { from, to })
            }
            FrameOutcome::LevelComplete { next: None } => {
                if let Some(old) = self.level.take() {
                    old.teardown(&mut self.backend);
                }
                self.phase = GamePhase::Finished;
                info!("game finished with score {}", self.score);
                Ok(TickOutcome::Finished)
            }
        }
    }

    /// Tear down the running level, if any.
    pub fn stop(&mut self) {
        match self.level.take() {
            Some(level) => level.teardown(&mut self.backend),
            None => warn!("stop called with no level running"),
        }
        self.phase = GamePhase::Idle;
    }
}
