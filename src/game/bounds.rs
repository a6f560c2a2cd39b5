//! Axis-aligned boxes
//!
//! Used for overlap resolution only (collect, transition, damage). Solid
//! geometry push-out is the physics backend's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixels, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` whose bottom edge is centred on `anchor`.
    /// Sprites in this game stand on their anchor point.
    pub fn anchored(anchor: Vec2, size: Vec2) -> Self {
        let half_width = size.x * 0.5;
        Self {
            min: Vec2::new(anchor.x - half_width, anchor.y - size.y),
            max: Vec2::new(anchor.x + half_width, anchor.y),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
