//! Sprite-sheet animation clips
//!
//! The controllers never ask the animation player what it is doing; each
//! one-shot clip's duration feeds the controller's own state timer. The
//! tables below are the frame layouts of the fox and mouse sheets.

/// A named run of sprite-sheet frames
#[derive(Debug, PartialEq)]
pub struct AnimationClip {
    pub name: &'static str,
    pub frames: &'static [u16],
    /// Frames per second
    pub frame_rate: f32,
    pub looping: bool,
}

impl AnimationClip {
    /// Seconds for one pass through the clip
    pub fn duration(&self) -> f32 {
        if self.frame_rate <= 0.0 {
            return 0.0;
        }
        self.frames.len() as f32 / self.frame_rate
    }

    /// Sheet frame shown `elapsed` seconds after the clip started
    pub fn frame_at(&self, elapsed: f32) -> u16 {
        let count = self.frames.len();
        if count == 0 {
            return 0;
        }
        let step = (elapsed.max(0.0) * self.frame_rate) as usize;
        let idx = if self.looping { step % count } else { step.min(count - 1) };
        self.frames[idx]
    }
}

/// A sprite sheet and the clips cut from it
#[derive(Debug)]
pub struct SpriteSheet {
    /// Asset key the host resolves to an image
    pub key: &'static str,
    pub clips: &'static [&'static AnimationClip],
}

impl SpriteSheet {
    pub fn clip(&self, name: &str) -> Option<&'static AnimationClip> {
        self.clips.iter().copied().find(|clip| clip.name == name)
    }
}

/// The fox
pub mod fox {
    use super::{AnimationClip, SpriteSheet};

    pub static IDLE: AnimationClip = AnimationClip {
        name: "idle",
        frames: &[0, 1, 2, 3, 4, 3, 2, 1],
        frame_rate: 9.0,
        looping: true,
    };

    pub static JUMP: AnimationClip = AnimationClip {
        name: "jump",
        frames: &[0, 5, 6, 7, 8, 9],
        frame_rate: 30.0,
        looping: false,
    };

    pub static RUN: AnimationClip = AnimationClip {
        name: "run",
        frames: &[11, 12, 13, 14, 15, 16, 17],
        frame_rate: 9.0,
        looping: true,
    };

    /// Squash on touchdown; the jump frames played backwards
    pub static LAND: AnimationClip = AnimationClip {
        name: "land",
        frames: &[7, 6, 5],
        frame_rate: 15.0,
        looping: false,
    };

    pub static SHEET: SpriteSheet = SpriteSheet {
        key: "player",
        clips: &[&IDLE, &JUMP, &RUN, &LAND],
    };
}

/// The mouse
pub mod mouse {
    use super::{AnimationClip, SpriteSheet};

    pub static STAND: AnimationClip = AnimationClip {
        name: "stand",
        frames: &[0],
        frame_rate: 9.0,
        looping: false,
    };

    pub static SWING: AnimationClip = AnimationClip {
        name: "swing",
        frames: &[0, 1, 2, 3, 4, 5, 6, 7],
        frame_rate: 9.0,
        looping: false,
    };

    pub static RUN: AnimationClip = AnimationClip {
        name: "run",
        frames: &[8, 9, 10, 11, 12, 13, 14],
        frame_rate: 9.0,
        looping: true,
    };

    pub static SHEET: SpriteSheet = SpriteSheet {
        key: "mouse",
        clips: &[&STAND, &SWING, &RUN],
    };
}
