//! Game components
//!
//! Plain data attached to level entities. Behavior lives in the
//! controllers and the level session.

use serde::{Deserialize, Serialize};

/// Which way a sprite faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing that turns something at `from_x` toward `to_x`.
    /// Ties face left.
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if from_x < to_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Marks a collectible coin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin;

/// A level exit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Level this door leads to; `None` falls back to the level's `next`
    pub target: Option<String>,
}
