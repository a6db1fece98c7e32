//! Run Away - a pursuit-evasion arcade game
//!
//! Core modules:
//! - `sim`: Simulation (player, destinations, enemies, timer, colors)
//! - `ui`: Screen state machine and click hit regions
//! - `projection`: World/screen/minimap coordinate transforms
//! - `input`: Pointer and click events from the platform thread
//! - `game`: Fixed-timestep game loop
//! - `renderer`: Renderer boundary and a backend-agnostic scene builder
//! - `settings`: Tunables with JSON overrides

pub mod game;
pub mod input;
pub mod projection;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{Clock, FrameStats, Game, SystemClock};
pub use settings::{Settings, SettingsError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 1.0 / TICK_HZ as f64;
    /// Maximum ticks run in one loop iteration before the backlog is dropped
    pub const MAX_CATCH_UP_TICKS: u32 = 30;

    /// World bounds (closed interval, both axes)
    pub const WORLD_MIN: f32 = -100.0;
    pub const WORLD_MAX: f32 = 100.0;

    /// Enemy step length per tick (world units)
    pub const ENEMY_SPEED: f32 = 0.03;
    /// Player step length per tick (a tenth of the enemy speed)
    pub const PLAYER_STEP: f32 = ENEMY_SPEED / 10.0;

    /// Player closer than this marks a destination visited
    pub const VISIT_RADIUS: f32 = 1.0;
    /// Enemy closer than this catches the player
    pub const CATCH_RADIUS: f32 = 7.0 / 12.0;

    /// Enemies never spawn this close to an unvisited destination
    pub const SPAWN_CLEARANCE: f32 = 5.0;
    /// Spawn sampling gives up after this many rejected points
    pub const SPAWN_MAX_ATTEMPTS: u32 = 1000;
    /// Enemies present at the start of every run
    pub const INITIAL_ENEMIES: usize = 3;

    /// Rainbow hue advance per tick (wraps at 1.0)
    pub const RAINBOW_STEP: f32 = 0.006;

    /// Pointer offsets from screen center shorter than this don't steer (pixels)
    pub const STEER_DEADZONE: f32 = 1.0;

    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 640.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Screen size of one world unit is canvas dimension / this
    pub const VIEW_UNITS: f32 = 8.0;

    /// Destination layout (world coordinates)
    pub const DESTINATIONS: [(f32, f32); 8] = [
        (-50.0, -50.0),
        (0.0, -50.0),
        (50.0, -50.0),
        (-50.0, 0.0),
        (50.0, 0.0),
        (-50.0, 50.0),
        (0.0, 50.0),
        (50.0, 50.0),
    ];
}

/// Square world bounds, applied to both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: consts::WORLD_MIN,
            max: consts::WORLD_MAX,
        }
    }
}

impl WorldBounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Side length of the world
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Clamp a point into the world
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.min, self.max), p.y.clamp(self.min, self.max))
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (self.min..=self.max).contains(&p.x) && (self.min..=self.max).contains(&p.y)
    }
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let offset = to - from;
    let len = offset.length();
    (len > 0.0 && len.is_finite()).then(|| offset / len)
}
