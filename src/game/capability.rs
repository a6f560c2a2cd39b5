//! Host capabilities
//!
//! The game core drives physics bodies, sprite animation, tweens and audio
//! through these traits. A renderer/engine binding
//! implements them; tests use in-memory fakes.

use glam::Vec2;

use super::animation::{AnimationClip, SpriteSheet};
use super::bounds::Aabb;
use super::components::Facing;
use crate::world::TileGrid;

/// A physics-driven body. Velocity is in pixels per second, y down.
pub trait KinematicBody {
    /// Bottom-centre anchor position
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// Resting on solid geometry after the last collision pass
    fn is_on_floor(&self) -> bool;

    /// Overlap box in world space
    fn bounds(&self) -> Aabb;

    fn overlaps(&self, other: &Aabb) -> bool {
        self.bounds().overlaps(other)
    }

    fn set_velocity_x(&mut self, vx: f32) {
        let mut v = self.velocity();
        v.x = vx;
        self.set_velocity(v);
    }

    fn set_velocity_y(&mut self, vy: f32) {
        let mut v = self.velocity();
        v.y = vy;
        self.set_velocity(v);
    }
}

/// Plays sprite-sheet clips on one sprite
pub trait AnimationPlayer {
    /// Start `clip` from its first frame
    fn play(&mut self, clip: &'static AnimationClip);

    /// Name of the clip currently shown, if any
    fn current(&self) -> Option<&'static str>;

    fn is_playing(&self, name: &str) -> bool {
        self.current() == Some(name)
    }

    /// Mirror the sprite horizontally. Sheets are drawn facing right.
    fn set_facing(&mut self, facing: Facing);
}

/// The brief alpha flash shown when the player is hit
pub trait FlashEffect {
    fn start(&mut self);
    fn is_running(&self) -> bool;

    /// Called once per frame by the level session. Hosts that run their own
    /// tween clock can ignore it.
    fn advance(&mut self, _dt: f32) {}
}

/// Sound effects the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Coin,
    Hit,
}

impl SoundCue {
    /// Asset key of the sound
    pub fn key(self) -> &'static str {
        match self {
            SoundCue::Coin => "coin",
            SoundCue::Hit => "hit",
        }
    }
}

/// Fire-and-forget sound playback
pub trait AudioCues {
    fn play_cue(&mut self, cue: SoundCue);
}

/// Physics body setup requested when an actor spawns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConfig {
    pub size: Vec2,
    /// Horizontal deceleration applied when no velocity is commanded
    pub drag: f32,
    pub gravity: bool,
    /// Keep the body inside the level rectangle
    pub clamp_to_level: bool,
}

/// The engine binding a level session runs against.
///
/// It owns the tile layer and steps bodies against solid tiles. Everything
/// it hands out becomes a component of the spawned entity.
pub trait Backend {
    type Body: KinematicBody;
    type Animator: AnimationPlayer;
    type Flash: FlashEffect;

    /// Install the tile layer and world gravity for a new level
    fn load_level(&mut self, tiles: &TileGrid, gravity: f32);

    /// Drop everything installed for the current level
    fn unload_level(&mut self) {}

    fn spawn_body(&mut self, position: Vec2, config: &BodyConfig) -> Self::Body;
    fn spawn_animator(&mut self, sheet: &'static SpriteSheet) -> Self::Animator;
    fn spawn_flash(&mut self) -> Self::Flash;

    /// Integrate one body for `dt` and push it out of solid tiles.
    /// Updates the body's floor contact.
    fn resolve_collisions(&mut self, body: &mut Self::Body, dt: f32);
}
