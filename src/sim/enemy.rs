//! Pursuit enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{WorldBounds, direction_to};

/// An enemy that homes in on a target every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Step length per tick (world units)
    pub speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self { pos, speed }
    }

    /// Step exactly `speed` toward `target`, then clamp into the world.
    ///
    /// Pure pursuit with no prediction. A target closer than `speed` is
    /// overshot rather than landed on; at zero distance the enemy stays put.
    pub fn advance(&mut self, target: Vec2, bounds: &WorldBounds) {
        if let Some(dir) = direction_to(self.pos, target) {
            self.pos = bounds.clamp(self.pos + dir * self.speed);
        }
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        self.pos.distance(p)
    }
}
