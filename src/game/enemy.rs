//! Mouse controller
//!
//! Paces back and forth for a fixed number of steps and stops to swing at
//! the fox whenever it comes close. The swing always plays to the end
//! before the mouse decides again.

use log::trace;
use rand::Rng;

use super::animation::mouse;
use super::capability::{AnimationPlayer, KinematicBody};
use super::components::Facing;
use super::player::PlayerSnapshot;
use crate::settings::EnemySettings;

/// Behavior state of a mouse
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    /// Walking in the given direction
    Patrol(Facing),
    /// Swinging; patrol resumes in `resume` once `remaining` runs out
    Attack { remaining: f32, resume: Facing },
}

impl EnemyState {
    pub fn is_attacking(&self) -> bool {
        matches!(self, EnemyState::Attack { .. })
    }

    /// True while a swing is still playing
    pub fn is_swinging(&self) -> bool {
        matches!(self, EnemyState::Attack { remaining, .. } if *remaining > 0.0)
    }

    pub fn patrol_direction(&self) -> Facing {
        match *self {
            EnemyState::Patrol(dir) => dir,
            EnemyState::Attack { resume, .. } => resume,
        }
    }

    fn tick(self, dt: f32) -> Self {
        match self {
            EnemyState::Attack { remaining, resume } => {
                EnemyState::Attack { remaining: (remaining - dt).max(0.0), resume }
            }
            other => other,
        }
    }

    /// Behavior transition table.
    ///
    /// A running swing is never interrupted. A finished swing starts over
    /// while the fox stays close, else the patrol resumes.
    pub fn next(self, in_range: bool) -> EnemyState {
        match self {
            EnemyState::Patrol(dir) if in_range => {
                EnemyState::Attack { remaining: mouse::SWING.duration(), resume: dir }
            }
            EnemyState::Patrol(_) => self,
            EnemyState::Attack { remaining, .. } if remaining > 0.0 => self,
            EnemyState::Attack { resume, .. } if in_range => {
                EnemyState::Attack { remaining: mouse::SWING.duration(), resume }
            }
            EnemyState::Attack { resume, .. } => EnemyState::Patrol(resume),
        }
    }
}

/// Decision state for one patrolling mouse
#[derive(Debug, Clone)]
pub struct EnemyController {
    speed: f32,
    step_limit: u32,
    aggro_radius: f32,
    step_count: u32,
    state: EnemyState,
    facing: Facing,
}

impl EnemyController {
    /// Mice start at a random point of their patrol so a group does not
    /// turn around in lockstep.
    pub fn new(settings: &EnemySettings, rng: &mut impl Rng) -> Self {
        let start = if settings.patrol_step_limit > 0 {
            rng.gen_range(0..settings.patrol_step_limit)
        } else {
            0
        };
        Self::with_step_count(settings, start)
    }

    pub fn with_step_count(settings: &EnemySettings, step_count: u32) -> Self {
        Self {
            speed: settings.speed,
            step_limit: settings.patrol_step_limit,
            aggro_radius: settings.aggro_radius,
            step_count,
            state: EnemyState::Patrol(Facing::Right),
            facing: Facing::Right,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Per-frame update, after the physics step.
    pub fn update(
        &mut self,
        dt: f32,
        player: &PlayerSnapshot,
        body: &mut impl KinematicBody,
        animator: &mut impl AnimationPlayer,
    ) {
        let prev = self.state.tick(dt);
        let position = body.position();
        let in_range = position.distance(player.position) < self.aggro_radius;

        let next = prev.next(in_range);
        let swing_started = next.is_swinging() && !prev.is_swinging();
        if swing_started {
            trace!("mouse at {:?} swings", position);
            animator.play(&mouse::SWING);
        }
        if prev.is_attacking() && !next.is_attacking() {
            trace!("mouse at {:?} resumes patrol", position);
            animator.play(&mouse::RUN);
        }
        self.state = next;

        if in_range {
            self.face(Facing::toward(position.x, player.position.x), animator);
        }

        if let EnemyState::Patrol(dir) = self.state {
            self.patrol_step(dir, body, animator);
        }
    }

    fn patrol_step(
        &mut self,
        dir: Facing,
        body: &mut impl KinematicBody,
        animator: &mut impl AnimationPlayer,
    ) {
        self.step_count += 1;
        body.set_velocity_x(dir.sign() * self.speed);
        self.face(dir, animator);

        if self.step_count >= self.step_limit {
            trace!("mouse turns after {} steps", self.step_count);
            self.state = EnemyState::Patrol(dir.flipped());
            self.step_count = 0;
        }
    }

    fn face(&mut self, facing: Facing, animator: &mut impl AnimationPlayer) {
        self.facing = facing;
        animator.set_facing(facing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::{FakeAnimator, FakeBody};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn far_player() -> PlayerSnapshot {
        PlayerSnapshot { position: Vec2::new(5000.0, 700.0), facing: Facing::Right }
    }

    fn mouse_at(x: f32, step_count: u32) -> (EnemyController, FakeBody, FakeAnimator) {
        let settings = EnemySettings::default();
        let ctrl = EnemyController::with_step_count(&settings, step_count);
        let body = FakeBody::grounded(Vec2::new(x, 700.0), settings.body_size);
        (ctrl, body, FakeAnimator::default())
    }

    #[test]
    fn test_random_start_within_patrol() {
        let settings = EnemySettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let ctrl = EnemyController::new(&settings, &mut rng);
            assert!(ctrl.step_count() < 90);
            assert_eq!(ctrl.state(), EnemyState::Patrol(Facing::Right));
        }
    }

    #[test]
    fn test_patrol_reverses_after_exact_step_limit() {
        let (mut ctrl, mut body, mut anim) = mouse_at(0.0, 0);
        let player = far_player();

        // Every cycle is exactly 90 steps, alternating forever
        let mut direction = Facing::Right;
        for cycle in 0..4 {
            for step in 0..90 {
                let at = format!("cycle {cycle} step {step}");
                assert_eq!(ctrl.state(), EnemyState::Patrol(direction), "{at}");
                ctrl.update(DT, &player, &mut body, &mut anim);
                // The 90th step still moves the old way
                assert_eq!(body.velocity.x, direction.sign() * 200.0, "{at}");
                if step == 0 {
                    assert_eq!(anim.facing, direction);
                }
            }
            direction = direction.flipped();
            assert_eq!(ctrl.state(), EnemyState::Patrol(direction));
            assert_eq!(ctrl.step_count(), 0);
        }
        assert_eq!(direction, Facing::Right);
    }

    #[test]
    fn test_player_in_range_triggers_swing_toward_player() {
        let (mut ctrl, mut body, mut anim) = mouse_at(500.0, 10);
        let player = PlayerSnapshot { position: Vec2::new(450.0, 700.0), facing: Facing::Right };

        ctrl.update(DT, &player, &mut body, &mut anim);
        assert!(ctrl.state().is_swinging());
        assert_eq!(anim.current(), Some("swing"));
        assert_eq!(ctrl.facing(), Facing::Left);
        assert_eq!(anim.facing, Facing::Left);
        // No patrol step while attacking
        assert_eq!(ctrl.step_count(), 10);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_player_out_of_range_patrols() {
        let (mut ctrl, mut body, mut anim) = mouse_at(500.0, 0);
        let player = PlayerSnapshot { position: Vec2::new(1000.0, 700.0), facing: Facing::Right };

        ctrl.update(DT, &player, &mut body, &mut anim);
        assert_eq!(ctrl.state(), EnemyState::Patrol(Facing::Right));
        assert_eq!(body.velocity.x, 200.0);
        assert_eq!(anim.plays_of("swing"), 0);
    }

    #[test]
    fn test_swing_runs_to_completion() {
        let (mut ctrl, mut body, mut anim) = mouse_at(500.0, 10);
        let near = PlayerSnapshot { position: Vec2::new(550.0, 700.0), facing: Facing::Left };

        ctrl.update(DT, &near, &mut body, &mut anim);
        assert_eq!(ctrl.facing(), Facing::Right);

        // Fox walks away mid-swing; the mouse finishes the swing first
        let far = far_player();
        let mut frames = 0;
        while ctrl.state().is_attacking() {
            ctrl.update(DT, &far, &mut body, &mut anim);
            frames += 1;
            assert!(frames < 120);
        }
        // 8 frames at 9 fps is about 53 game frames
        assert!((52..=55).contains(&frames));
        assert_eq!(anim.plays_of("swing"), 1);
        assert_eq!(anim.current(), Some("run"));
        assert_eq!(body.velocity.x, 200.0);
        assert_eq!(ctrl.step_count(), 11);
    }

    #[test]
    fn test_swing_repeats_while_player_stays() {
        let (mut ctrl, mut body, mut anim) = mouse_at(500.0, 0);
        let near = PlayerSnapshot { position: Vec2::new(520.0, 700.0), facing: Facing::Left };

        for _ in 0..120 {
            ctrl.update(DT, &near, &mut body, &mut anim);
            assert!(ctrl.state().is_attacking());
        }
        assert_eq!(anim.plays_of("swing"), 3);
        assert_eq!(ctrl.step_count(), 0);
    }

    #[test]
    fn test_resume_keeps_patrol_direction() {
        let (mut ctrl, mut body, mut anim) = mouse_at(500.0, 89);
        let far = far_player();
        ctrl.update(DT, &far, &mut body, &mut anim);
        assert_eq!(ctrl.state(), EnemyState::Patrol(Facing::Left));

        let near = PlayerSnapshot { position: Vec2::new(600.0, 700.0), facing: Facing::Left };
        ctrl.update(DT, &near, &mut body, &mut anim);
        assert_eq!(ctrl.facing(), Facing::Right);

        ctrl.update(1.0, &far, &mut body, &mut anim);
        assert_eq!(ctrl.state(), EnemyState::Patrol(Facing::Left));
        assert_eq!(body.velocity.x, -200.0);
    }

    #[test]
    fn test_transition_table() {
        let swing = mouse::SWING.duration();
        let right = EnemyState::Patrol(Facing::Right);

        assert_eq!(right.next(false), right);
        assert_eq!(
            right.next(true),
            EnemyState::Attack { remaining: swing, resume: Facing::Right }
        );

        let mid = EnemyState::Attack { remaining: 0.3, resume: Facing::Left };
        assert_eq!(mid.next(false), mid);
        assert_eq!(mid.next(true), mid);

        let done = EnemyState::Attack { remaining: 0.0, resume: Facing::Left };
        assert_eq!(done.next(false), EnemyState::Patrol(Facing::Left));
        assert_eq!(done.next(true), EnemyState::Attack { remaining: swing, resume: Facing::Left });
    }
}
