//! Coordinate projection
//!
//! World space is centered on the player: one world unit spans a eighth of
//! the canvas on each axis. The minimap shows the whole world squeezed into a
//! fixed corner rectangle. Rendering and any geometry-dependent hit testing
//! must go through the same `Projector`.

use glam::Vec2;

use crate::WorldBounds;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, VIEW_UNITS};

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl ScreenRect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Inclusive of the edges
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.x <= max.x && p.y >= self.origin.y && p.y <= max.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// World <-> screen <-> minimap transforms for one canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    canvas: Vec2,
    bounds: WorldBounds,
    minimap: ScreenRect,
}

impl Projector {
    pub fn new(canvas: Vec2, bounds: WorldBounds) -> Self {
        // Square minimap in the top-right corner, sized from the width only
        let w = canvas.x;
        let minimap = ScreenRect::new(
            Vec2::new(39.0 * w / 48.0, w / 48.0),
            Vec2::splat(w / 6.0),
        );
        Self {
            canvas,
            bounds,
            minimap,
        }
    }

    /// Projector for the logical 640x480 canvas
    pub fn logical(bounds: WorldBounds) -> Self {
        Self::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT), bounds)
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn minimap(&self) -> ScreenRect {
        self.minimap
    }

    /// Pixels per world unit on each axis
    pub fn scale(&self) -> Vec2 {
        self.canvas / VIEW_UNITS
    }

    pub fn screen_center(&self) -> Vec2 {
        self.canvas * 0.5
    }

    /// Project a world point with the camera on `camera`
    pub fn world_to_screen(&self, world: Vec2, camera: Vec2) -> Vec2 {
        (camera - world) * -self.scale() + self.screen_center()
    }

    pub fn screen_to_world(&self, screen: Vec2, camera: Vec2) -> Vec2 {
        camera + (screen - self.screen_center()) / self.scale()
    }

    /// Map a world point onto the minimap rectangle
    pub fn world_to_minimap(&self, world: Vec2) -> Vec2 {
        let t = (world - Vec2::splat(self.bounds.min)) / self.bounds.span();
        self.minimap.origin + t * self.minimap.size
    }

    pub fn minimap_to_world(&self, minimap: Vec2) -> Vec2 {
        let t = (minimap - self.minimap.origin) / self.minimap.size;
        Vec2::splat(self.bounds.min) + t * self.bounds.span()
    }

    /// World-space (min, max) corners visible around `camera`
    pub fn visible_world(&self, camera: Vec2) -> (Vec2, Vec2) {
        let min = self.screen_to_world(Vec2::ZERO, camera);
        let max = self.screen_to_world(self.canvas, camera);
        (min, max)
    }
}
