//! Per-frame input snapshot
//!
//! The host polls its devices however it likes and hands the core one
//! [`FrameInput`] per frame. Held state for left/right, a press edge for
//! jump.

use super::Action;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// True only on the frame the jump button went down
    pub jump_pressed: bool,
}

impl FrameInput {
    /// No buttons
    pub const IDLE: FrameInput = FrameInput { left: false, right: false, jump_pressed: false };

    pub fn left() -> Self {
        Self { left: true, ..Self::IDLE }
    }

    pub fn right() -> Self {
        Self { right: true, ..Self::IDLE }
    }

    pub fn jump() -> Self {
        Self { jump_pressed: true, ..Self::IDLE }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    /// Check if action is active this frame
    pub fn action(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::Jump => self.jump_pressed,
        }
    }
}

/// Turns raw held button states into a [`FrameInput`].
///
/// Hosts that only expose "is the key down" call [`InputTracker::sample`]
/// once per frame; the tracker remembers last frame's jump state so a held
/// jump button fires exactly once.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    jump_was_down: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame with the current held state of each action
    pub fn sample(&mut self, is_down: impl Fn(Action) -> bool) -> FrameInput {
        let jump_down = is_down(Action::Jump);
        let jump_pressed = jump_down && !self.jump_was_down;
        self.jump_was_down = jump_down;

        FrameInput {
            left: is_down(Action::MoveLeft),
            right: is_down(Action::MoveRight),
            jump_pressed,
        }
    }

    /// Forget the held jump state (level change, focus loss)
    pub fn reset(&mut self) {
        self.jump_was_down = false;
    }
}
