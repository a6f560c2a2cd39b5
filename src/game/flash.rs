//! Staged alpha tween for the hit flash
//!
//! Fades the sprite out, back up, then settles at full alpha. Each stage
//! eases with a bounce-out curve.

use super::capability::FlashEffect;

/// One leg of a staged tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStage {
    pub target: f32,
    /// Seconds
    pub duration: f32,
}

/// Hit feedback: 1 -> 0 -> 0.8 -> 1 over a quarter second
pub const HIT_FLASH: &[TweenStage] = &[
    TweenStage { target: 0.0, duration: 0.05 },
    TweenStage { target: 0.8, duration: 0.05 },
    TweenStage { target: 1.0, duration: 0.15 },
];

/// Bounce-out easing for `t` in [0, 1]
pub fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    let t = t.clamp(0.0, 1.0);
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// A value driven through a fixed list of stages
#[derive(Debug, Clone)]
pub struct StagedTween {
    stages: &'static [TweenStage],
    rest: f32,
    value: f32,
    from: f32,
    stage: Option<usize>,
    elapsed: f32,
}

impl StagedTween {
    pub fn new(stages: &'static [TweenStage], rest: f32) -> Self {
        Self {
            stages,
            rest,
            value: rest,
            from: rest,
            stage: None,
            elapsed: 0.0,
        }
    }

    pub fn hit_flash() -> Self {
        Self::new(HIT_FLASH, 1.0)
    }

    /// Current value (sprite alpha for the hit flash)
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Total length of one run, seconds
    pub fn duration(&self) -> f32 {
        self.stages.iter().map(|s| s.duration).sum()
    }

    fn advance_by(&mut self, dt: f32) {
        let Some(mut stage) = self.stage else {
            return;
        };
        let mut remaining = dt.max(0.0);

        loop {
            let leg = self.stages[stage];
            let left = leg.duration - self.elapsed;
            if remaining < left {
                self.elapsed += remaining;
                let t = self.elapsed / leg.duration;
                self.value = self.from + (leg.target - self.from) * bounce_out(t);
                return;
            }

            remaining -= left.max(0.0);
            self.value = leg.target;
            self.from = leg.target;
            self.elapsed = 0.0;
            stage += 1;
            if stage >= self.stages.len() {
                self.stage = None;
                return;
            }
            self.stage = Some(stage);
        }
    }
}

impl Default for StagedTween {
    fn default() -> Self {
        Self::hit_flash()
    }
}

impl FlashEffect for StagedTween {
    /// Restarts from the resting value
    fn start(&mut self) {
        if self.stages.is_empty() {
            return;
        }
        self.value = self.rest;
        self.from = self.rest;
        self.elapsed = 0.0;
        self.stage = Some(0);
    }

    fn is_running(&self) -> bool {
        self.stage.is_some()
    }

    fn advance(&mut self, dt: f32) {
        self.advance_by(dt);
    }
}
