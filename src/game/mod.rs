//! Game Foundation Module
//!
//! A lightweight ECS-inspired core for the fox platformer: the fox and mouse
//! state machines plus the per-level pass that couples them.
//!
//! Key concepts:
//! - Entity: Generational index for safe entity references
//! - Component: Plain data attached to entities
//! - World: Container for one level's entities and their components
//! - Event: What happened this frame, for the host to react to
//! - Capability: Traits the host implements (physics body, animation,
//!   tween, audio, score label)
//!
//! Design philosophy:
//! - Controllers decide, capabilities act
//! - No entity mutates another; cross-entity effects happen in the
//!   level session's overlap pass
//! - Compile-time known components

pub mod animation;
pub mod bounds;
pub mod capability;
pub mod component;
pub mod components;
pub mod enemy;
pub mod entity;
pub mod event;
pub mod flash;
pub mod player;
pub mod runtime;
pub mod score;
pub mod session;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use bounds::Aabb;
pub use capability::{
    AnimationPlayer, AudioCues, Backend, BodyConfig, FlashEffect, KinematicBody, SoundCue,
};
pub use components::{Coin, Door, Facing};
pub use enemy::{EnemyController, EnemyState};
pub use entity::Entity;
pub use event::Events;
pub use flash::StagedTween;
pub use player::{JumpKind, PlayerAnim, PlayerController, PlayerSnapshot};
pub use runtime::{GamePhase, GameSession, SessionError, TickOutcome};
pub use score::{Score, ScoreDisplay};
pub use session::{FrameContext, FrameOutcome, LevelSession};
pub use world::World;
