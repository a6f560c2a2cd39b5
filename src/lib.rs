//! FOXRUN: the behavior core of a tile-based 2D platformer
//!
//! A fox runs and double-jumps through tile levels, picks up coins, gets
//! swiped at by patrolling mice and leaves each level through a door.
//! This crate holds the decision logic only:
//! - Player movement/animation state machine
//! - Mouse patrol/attack state machine
//! - Per-level overlap resolution, scoring and level transitions
//!
//! Rendering, audio playback, physics integration and input devices are
//! capabilities supplied by the host through the traits in
//! [`game::capability`].

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod game;
pub mod input;
pub mod logging;
pub mod settings;
pub mod world;

pub use game::{GameSession, LevelSession, Score};
pub use settings::GameSettings;
pub use world::{LevelError, LevelLayout};
