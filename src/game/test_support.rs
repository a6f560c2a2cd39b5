//! In-memory fakes for the host capabilities

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::animation::{AnimationClip, SpriteSheet};
use super::bounds::Aabb;
use super::capability::{AnimationPlayer, AudioCues, Backend, BodyConfig, KinematicBody, SoundCue};
use super::components::Facing;
use super::flash::StagedTween;
use super::score::ScoreDisplay;
use crate::world::TileGrid;

/// Body whose floor contact and position are set by the test
#[derive(Debug, Clone, PartialEq)]
pub struct FakeBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_floor: bool,
    pub size: Vec2,
}

impl FakeBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, velocity: Vec2::ZERO, on_floor: false, size }
    }

    pub fn grounded(position: Vec2, size: Vec2) -> Self {
        Self { on_floor: true, ..Self::new(position, size) }
    }
}

impl KinematicBody for FakeBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn bounds(&self) -> Aabb {
        Aabb::anchored(self.position, self.size)
    }
}

/// Records every clip started and the last facing applied
#[derive(Debug, Clone, Default)]
pub struct FakeAnimator {
    pub played: Vec<&'static str>,
    pub facing: Facing,
}

impl FakeAnimator {
    pub fn plays_of(&self, name: &str) -> usize {
        self.played.iter().filter(|n| **n == name).count()
    }
}

impl AnimationPlayer for FakeAnimator {
    fn play(&mut self, clip: &'static AnimationClip) {
        self.played.push(clip.name);
    }

    fn current(&self) -> Option<&'static str> {
        self.played.last().copied()
    }

    fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }
}

impl AudioCues for Vec<SoundCue> {
    fn play_cue(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

impl ScoreDisplay for Vec<u32> {
    fn set_value(&mut self, value: u32) {
        self.push(value);
    }
}

/// Shared cue log, for collaborators handed over as boxes
pub type CueLog = Rc<RefCell<Vec<SoundCue>>>;
/// Shared score label log
pub type DisplayLog = Rc<RefCell<Vec<u32>>>;

impl AudioCues for CueLog {
    fn play_cue(&mut self, cue: SoundCue) {
        self.borrow_mut().push(cue);
    }
}

impl ScoreDisplay for DisplayLog {
    fn set_value(&mut self, value: u32) {
        self.borrow_mut().push(value);
    }
}

/// Backend that leaves bodies where the test puts them
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub tiles: Option<TileGrid>,
    pub gravity: f32,
    pub resolve_calls: u32,
    pub unloads: u32,
    pub bodies_spawned: u32,
    pub sheets: Vec<&'static str>,
}

impl Backend for FakeBackend {
    type Body = FakeBody;
    type Animator = FakeAnimator;
    type Flash = StagedTween;

    fn load_level(&mut self, tiles: &TileGrid, gravity: f32) {
        self.tiles = Some(tiles.clone());
        self.gravity = gravity;
    }

    fn unload_level(&mut self) {
        self.tiles = None;
        self.unloads += 1;
    }

    fn spawn_body(&mut self, position: Vec2, config: &BodyConfig) -> FakeBody {
        self.bodies_spawned += 1;
        FakeBody::grounded(position, config.size)
    }

    fn spawn_animator(&mut self, sheet: &'static SpriteSheet) -> FakeAnimator {
        self.sheets.push(sheet.key);
        FakeAnimator::default()
    }

    fn spawn_flash(&mut self) -> StagedTween {
        StagedTween::hit_flash()
    }

    fn resolve_collisions(&mut self, _body: &mut FakeBody, _dt: f32) {
        self.resolve_calls += 1;
    }
}
