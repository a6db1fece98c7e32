//! Rendering boundary
//!
//! The game loop hands a `FrameSnapshot` to a `Renderer` once per loop
//! iteration. `SceneRenderer` turns snapshots into triangles and text labels
//! so a GPU or canvas backend only has to upload and draw them.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{DrawList, SceneRenderer, TextAlign, TextLabel};
pub use vertex::Vertex;

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use crate::WorldBounds;
use crate::sim::{ColorChoice, Destination, Rgb, Simulation, Timer};
use crate::ui::Screen;

/// Renderer failures. The loop logs them and carries on with the next frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render surface lost")]
    SurfaceLost,
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Something that draws frames
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError>;
}

/// Read-only view of everything a frame needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub screen: Screen,
    pub canvas: Vec2,
    /// Latest pointer position, for hover effects
    pub pointer: Option<Vec2>,
    pub world: WorldBounds,
    pub player: Vec2,
    pub player_color: Rgb,
    pub color_choice: ColorChoice,
    pub rainbow_hue: f32,
    pub destinations: Vec<Destination>,
    pub enemies: Vec<Vec2>,
    pub timer: Timer,
}

impl FrameSnapshot {
    pub fn capture(screen: Screen, canvas: Vec2, pointer: Option<Vec2>, sim: &Simulation) -> Self {
        Self {
            screen,
            canvas,
            pointer,
            world: sim.bounds(),
            player: sim.player,
            player_color: sim.color.color,
            color_choice: sim.color.choice,
            rainbow_hue: sim.color.rainbow_hue,
            destinations: sim.destinations.clone(),
            enemies: sim.enemies.iter().map(|e| e.pos).collect(),
            timer: sim.timer,
        }
    }

    pub fn destinations_left(&self) -> usize {
        self.destinations.iter().filter(|d| !d.visited).count()
    }
}
