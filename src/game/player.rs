//! Fox controller
//!
//! Movement, jump/double-jump and the Idle/Run/Jump/Land animation state
//! machine. The physics body and sprite are capabilities passed in each
//! frame; the controller owns only the decisions.

use glam::Vec2;
use log::{debug, trace};

use super::animation::{fox, AnimationClip};
use super::capability::{AnimationPlayer, FlashEffect, KinematicBody};
use super::components::Facing;
use crate::input::FrameInput;
use crate::settings::PlayerSettings;

/// Animation state of the fox
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAnim {
    Idle,
    Run,
    Jump,
    /// Touchdown squash; blocks Idle/Run until the clip has played out
    Land { remaining: f32 },
}

/// Inputs to one animation transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimSignals {
    pub just_landed: bool,
    pub grounded: bool,
    /// Horizontal speed from the previous physics step
    pub horizontal_speed: f32,
    pub run_threshold: f32,
}

impl PlayerAnim {
    pub fn clip(&self) -> &'static AnimationClip {
        match self {
            PlayerAnim::Idle => &fox::IDLE,
            PlayerAnim::Run => &fox::RUN,
            PlayerAnim::Jump => &fox::JUMP,
            PlayerAnim::Land { .. } => &fox::LAND,
        }
    }

    pub fn is_landing(&self) -> bool {
        matches!(self, PlayerAnim::Land { remaining } if *remaining > 0.0)
    }

    fn tick(self, dt: f32) -> Self {
        match self {
            PlayerAnim::Land { remaining } => {
                PlayerAnim::Land { remaining: (remaining - dt).max(0.0) }
            }
            other => other,
        }
    }

    fn same_state(&self, other: &PlayerAnim) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Animation transition table.
    ///
    /// Landing always wins; an unfinished landing holds; on the ground the
    /// speed picks Run or Idle; in the air nothing changes.
    pub fn next(self, signals: &AnimSignals) -> PlayerAnim {
        if signals.just_landed {
            return PlayerAnim::Land { remaining: fox::LAND.duration() };
        }
        if self.is_landing() {
            return self;
        }
        if signals.grounded {
            if signals.horizontal_speed > signals.run_threshold {
                PlayerAnim::Run
            } else {
                PlayerAnim::Idle
            }
        } else {
            self
        }
    }
}

/// Which jump fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Double,
}

/// Read-only view of the fox handed to enemies each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub facing: Facing,
}

/// Decision state for the player-controlled fox
#[derive(Debug, Clone)]
pub struct PlayerController {
    settings: PlayerSettings,
    grounded: bool,
    just_landed: bool,
    facing: Facing,
    can_double_jump: bool,
    anim: PlayerAnim,
}

impl PlayerController {
    /// A fresh fox starts airborne so its first floor contact lands it
    pub fn new(settings: PlayerSettings) -> Self {
        Self {
            settings,
            grounded: false,
            just_landed: false,
            facing: Facing::Right,
            can_double_jump: false,
            anim: PlayerAnim::Idle,
        }
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn just_landed(&self) -> bool {
        self.just_landed
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn can_double_jump(&self) -> bool {
        self.can_double_jump
    }

    pub fn anim(&self) -> PlayerAnim {
        self.anim
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn snapshot(&self, body: &impl KinematicBody) -> PlayerSnapshot {
        PlayerSnapshot { position: body.position(), facing: self.facing }
    }

    /// Per-frame update, after the physics step.
    pub fn update(
        &mut self,
        dt: f32,
        input: &FrameInput,
        body: &mut impl KinematicBody,
        animator: &mut impl AnimationPlayer,
    ) {
        self.anim = self.anim.tick(dt);

        let was_in_air = !self.grounded;
        self.grounded = body.is_on_floor();
        // Screen y points down: anything not moving up is coming down
        self.just_landed = was_in_air && self.grounded && body.velocity().y >= 0.0;
        if self.just_landed {
            // The double jump belongs to one ground-contact cycle
            self.can_double_jump = false;
            trace!("fox landed at {:?}", body.position());
        }

        let signals = AnimSignals {
            just_landed: self.just_landed,
            grounded: self.grounded,
            horizontal_speed: body.velocity().x.abs(),
            run_threshold: self.settings.run_threshold,
        };
        let next = self.anim.next(&signals);
        if self.just_landed || !next.same_state(&self.anim) {
            animator.play(next.clip());
        }
        self.anim = next;

        let speed = if self.grounded {
            self.settings.ground_speed
        } else {
            self.settings.air_speed
        };

        // Both held: right is written last and wins
        if input.left {
            body.set_velocity_x(-speed);
            self.face(Facing::Left, animator);
        }
        if input.right {
            body.set_velocity_x(speed);
            self.face(Facing::Right, animator);
        }
    }

    fn face(&mut self, facing: Facing, animator: &mut impl AnimationPlayer) {
        self.facing = facing;
        animator.set_facing(facing);
    }

    /// Jump from the floor, or once more in mid-air after a floor jump.
    /// Returns `None` when the jump is rejected.
    pub fn jump(
        &mut self,
        body: &mut impl KinematicBody,
        animator: &mut impl AnimationPlayer,
    ) -> Option<JumpKind> {
        let kind = if body.is_on_floor() {
            self.can_double_jump = true;
            JumpKind::Ground
        } else if self.can_double_jump {
            self.can_double_jump = false;
            JumpKind::Double
        } else {
            trace!("jump rejected, no double jump left");
            return None;
        };

        body.set_velocity_y(-self.settings.jump_power);
        self.anim = PlayerAnim::Jump;
        animator.play(&fox::JUMP);
        debug!("fox {:?} jump", kind);
        Some(kind)
    }

    /// Start the hit flash unless one is already showing.
    /// Returns whether a new flash started.
    pub fn flash(&self, effect: &mut impl FlashEffect) -> bool {
        if effect.is_running() {
            return false;
        }
        effect.start();
        true
    }
}
