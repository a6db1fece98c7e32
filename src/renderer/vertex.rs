//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (canvas pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 200.0 / 255.0, 200.0 / 255.0, 1.0];
    pub const WIN_BACKGROUND: [f32; 4] = [0.0, 180.0 / 255.0, 180.0 / 255.0, 1.0];
    pub const LOSE_BACKGROUND: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const DARK_GRAY: [f32; 4] = [64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0, 1.0];
    /// Button label color on rectangular buttons
    pub const BUTTON_TEXT: [f32; 4] = [0.0, 180.0 / 255.0, 180.0 / 255.0, 1.0];
    pub const GRID: [f32; 4] = [0.25, 0.25, 0.25, 80.0 / 255.0];
    pub const DESTINATION_OPEN: [f32; 4] = [1.0, 0.0, 0.0, 80.0 / 255.0];
    pub const DESTINATION_VISITED: [f32; 4] = [0.0, 1.0, 0.0, 80.0 / 255.0];
    pub const MINIMAP_FILL: [f32; 4] = [1.0, 1.0, 1.0, 120.0 / 255.0];
    pub const HUD_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 150.0 / 255.0];
}
