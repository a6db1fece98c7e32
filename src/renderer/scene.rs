//! Backend-agnostic scene builder
//!
//! Converts a `FrameSnapshot` into colored triangles in canvas pixels plus
//! text labels for whatever font renderer the platform provides. Geometry
//! comes from the same `Layout` and `Projector` used for hit testing.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use super::{FrameSnapshot, RenderError, Renderer};
use crate::consts::CANVAS_WIDTH;
use crate::projection::{Projector, ScreenRect};
use crate::sim::Rgb;
use crate::ui::{Button, HELP_LINES, Layout, Region, Screen};

/// Horizontal anchoring of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos` is the baseline start
    Left,
    /// `pos` is the center of the text box
    Center,
}

/// Text for the platform font renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    /// Font size in canvas pixels
    pub size: f32,
    pub bold: bool,
    pub color: [f32; 4],
    pub align: TextAlign,
}

/// One frame's worth of geometry, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl DrawList {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn label(&self, text: &str) -> Option<&TextLabel> {
        self.labels.iter().find(|l| l.text == text)
    }

    pub fn has_color(&self, color: [f32; 4]) -> bool {
        self.vertices.iter().any(|v| v.color == color)
    }
}

/// `Renderer` that keeps the latest draw list for a backend to pick up
#[derive(Debug, Default)]
pub struct SceneRenderer {
    last: DrawList,
    frames: u64,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &DrawList {
        &self.last
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Build the draw list for a snapshot
    pub fn build(frame: &FrameSnapshot) -> DrawList {
        let mut builder = SceneBuilder::new(frame);
        builder.background();
        match frame.screen {
            Screen::Menu => builder.menu(),
            Screen::Shop => builder.shop(),
            Screen::Help => builder.help(),
            Screen::Play => builder.play(),
            Screen::Win => builder.result(
                colors::WIN_BACKGROUND,
                "YOU WIN!!!",
                60.0,
                Button::PlayAgain,
            ),
            Screen::Lose => builder.result(
                colors::LOSE_BACKGROUND,
                "You got hit!",
                50.0,
                Button::TryAgain,
            ),
        }
        builder.out
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError> {
        self.last = Self::build(frame);
        self.frames += 1;
        Ok(())
    }
}

struct SceneBuilder<'a> {
    frame: &'a FrameSnapshot,
    layout: Layout,
    projector: Projector,
    /// Canvas width relative to the 640px design width
    ui_scale: f32,
    out: DrawList,
}

impl<'a> SceneBuilder<'a> {
    fn new(frame: &'a FrameSnapshot) -> Self {
        Self {
            frame,
            layout: Layout::new(frame.canvas),
            projector: Projector::new(frame.canvas, frame.world),
            ui_scale: frame.canvas.x / CANVAS_WIDTH,
            out: DrawList::default(),
        }
    }

    fn w(&self) -> f32 {
        self.frame.canvas.x
    }

    fn h(&self) -> f32 {
        self.frame.canvas.y
    }

    fn hovered(&self, region: &Region) -> bool {
        self.frame.pointer.is_some_and(|p| region.contains(p))
    }

    fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: f32,
        bold: bool,
        color: [f32; 4],
        align: TextAlign,
    ) {
        self.out.labels.push(TextLabel {
            text: text.into(),
            pos,
            size: size * self.ui_scale,
            bold,
            color,
            align,
        });
    }

    fn title(&mut self, text: &str) {
        let pos = Vec2::new(self.w() / 2.0, self.h() / 8.0);
        self.text(text, pos, 48.0, true, colors::WHITE, TextAlign::Center);
    }

    fn background(&mut self) {
        shapes::rect(&mut self.out.vertices, Vec2::ZERO, self.frame.canvas, colors::BACKGROUND);
    }

    fn circle_button(&mut self, button: Button, center: Vec2, radius: f32, hovered: bool) {
        let white = Rgb::new(255, 255, 255);
        let fill = if hovered { white.darker(0.8) } else { white };
        let segments = shapes::segments_for(radius);
        let v = &mut self.out.vertices;
        shapes::circle(v, center, radius, fill.to_f32(1.0), segments);
        shapes::ring(v, center, radius, 3.0, colors::BLACK, segments);
        self.text(button.label(), center, 40.0, true, colors::DARK_GRAY, TextAlign::Center);
    }

    fn rect_button(&mut self, button: Button, rect: ScreenRect, hovered: bool) {
        let white = Rgb::new(255, 255, 255);
        let fill = if hovered { white.darker(0.8) } else { white };
        let v = &mut self.out.vertices;
        shapes::rect(v, rect.origin, rect.size, fill.to_f32(1.0));
        shapes::rect_outline(v, rect.origin, rect.size, 2.0, colors::BLACK);
        self.text(
            button.label(),
            rect.center(),
            20.0,
            true,
            colors::BUTTON_TEXT,
            TextAlign::Center,
        );
    }

    /// Draw a screen's button with its stock look
    fn stock_button(&mut self, button: Button, region: Region) {
        let hovered = self.hovered(&region);
        match region {
            Region::Circle { center, radius } => {
                self.circle_button(button, center, radius, hovered)
            }
            Region::Rect(rect) => self.rect_button(button, rect, hovered),
        }
    }

    fn menu(&mut self) {
        let regions = self.layout.regions(Screen::Menu).to_vec();
        for (button, region) in regions {
            self.stock_button(button, region);
        }
    }

    fn shop(&mut self) {
        self.title("SHOP");

        let regions = self.layout.regions(Screen::Shop).to_vec();
        for (button, region) in regions {
            let (Button::Swatch(choice), Region::Circle { center, radius }) = (button, region)
            else {
                self.stock_button(button, region);
                continue;
            };

            // The rainbow swatch always shows the live hue
            let base = choice.resolve(self.frame.rainbow_hue);
            let fill = if self.hovered(&region) { base.darker(0.75) } else { base };
            let segments = shapes::segments_for(radius);
            let v = &mut self.out.vertices;
            shapes::circle(v, center, radius, fill.to_f32(1.0), segments);
            if choice == self.frame.color_choice {
                shapes::ring(v, center, radius + 4.0, 4.0, colors::WHITE, segments);
            } else {
                shapes::ring(v, center, radius, 1.0, colors::BLACK, segments);
            }

            let label_pos = center + Vec2::new(0.0, radius + 18.0 * self.ui_scale);
            self.text(choice.label(), label_pos, 14.0, false, colors::WHITE, TextAlign::Center);
        }
    }

    fn help(&mut self) {
        self.title("HELP");

        let x = self.w() / 2.0;
        for (i, line) in HELP_LINES.iter().enumerate() {
            let y = (110.0 + i as f32 * 24.0) * self.ui_scale;
            self.text(*line, Vec2::new(x, y), 16.0, false, colors::WHITE, TextAlign::Center);
        }

        let regions = self.layout.regions(Screen::Help).to_vec();
        for (button, region) in regions {
            self.stock_button(button, region);
        }
    }

    fn play(&mut self) {
        let camera = self.frame.player;
        let canvas = ScreenRect::new(Vec2::ZERO, self.frame.canvas);
        let (w, h) = (self.w(), self.h());

        // One-unit grid, visible lines only
        let (view_min, view_max) = self.projector.visible_world(camera);
        let world = self.frame.world;
        let first = view_min.max(Vec2::splat(world.min)).ceil();
        let last = view_max.min(Vec2::splat(world.max)).floor();
        let mut x = first.x;
        while x <= last.x {
            let sx = self.projector.world_to_screen(Vec2::new(x, camera.y), camera).x;
            let (from, to) = (Vec2::new(sx, 0.0), Vec2::new(sx, h));
            shapes::line(&mut self.out.vertices, from, to, 1.0, colors::GRID);
            x += 1.0;
        }
        let mut y = first.y;
        while y <= last.y {
            let sy = self.projector.world_to_screen(Vec2::new(camera.x, y), camera).y;
            let (from, to) = (Vec2::new(0.0, sy), Vec2::new(w, sy));
            shapes::line(&mut self.out.vertices, from, to, 1.0, colors::GRID);
            y += 1.0;
        }

        // Player always sits at the screen center
        let center = self.projector.screen_center();
        let player_radius = w / 32.0;
        let segments = shapes::segments_for(player_radius);
        let color = self.frame.player_color;
        shapes::circle(&mut self.out.vertices, center, player_radius, color.to_f32(1.0), segments);
        shapes::ring(
            &mut self.out.vertices,
            center,
            player_radius,
            2.0,
            color.darker(0.7).to_f32(1.0),
            segments,
        );

        let enemy_radius = w / 24.0;
        for &enemy in &self.frame.enemies {
            let pos = self.projector.world_to_screen(enemy, camera);
            if on_canvas(&canvas, pos, enemy_radius) {
                shapes::circle(&mut self.out.vertices, pos, enemy_radius, colors::BLACK, 16);
            }
        }

        let dest_radius = w / 8.0;
        for dest in &self.frame.destinations {
            let pos = self.projector.world_to_screen(dest.pos, camera);
            if !on_canvas(&canvas, pos, dest_radius) {
                continue;
            }
            let fill = if dest.visited {
                colors::DESTINATION_VISITED
            } else {
                colors::DESTINATION_OPEN
            };
            shapes::circle(&mut self.out.vertices, pos, dest_radius, fill, 48);
            shapes::ring(&mut self.out.vertices, pos, dest_radius, 2.0, colors::BLACK, 48);
        }

        self.minimap();

        let left = self.frame.destinations_left();
        self.text(
            format!("DESTINATIONS LEFT : {left}"),
            Vec2::new(10.0, 20.0) * self.ui_scale,
            15.0,
            false,
            colors::HUD_TEXT,
            TextAlign::Left,
        );
        self.text(
            format!("Time: {}", self.frame.timer),
            Vec2::new(10.0, 50.0) * self.ui_scale,
            15.0,
            false,
            colors::HUD_TEXT,
            TextAlign::Left,
        );
    }

    fn minimap(&mut self) {
        let rect = self.projector.minimap();
        let v = &mut self.out.vertices;
        shapes::rect(v, rect.origin, rect.size, colors::MINIMAP_FILL);
        shapes::rect_outline(v, rect.origin, rect.size, 1.0, colors::WHITE);

        let player = self.projector.world_to_minimap(self.frame.player);
        shapes::circle(v, player, 3.0, self.frame.player_color.to_f32(1.0), 12);

        for dest in &self.frame.destinations {
            let pos = self.projector.world_to_minimap(dest.pos);
            let fill = if dest.visited {
                colors::DESTINATION_VISITED
            } else {
                colors::DESTINATION_OPEN
            };
            shapes::circle(v, pos, 4.0, fill, 12);
            shapes::ring(v, pos, 4.0, 1.0, colors::BLACK, 12);
        }

        for &enemy in &self.frame.enemies {
            let pos = self.projector.world_to_minimap(enemy);
            shapes::circle(v, pos, 3.0, colors::BLACK, 12);
        }
    }

    fn result(&mut self, background: [f32; 4], headline: &str, headline_size: f32, button: Button) {
        shapes::rect(&mut self.out.vertices, Vec2::ZERO, self.frame.canvas, background);

        let (w, h) = (self.w(), self.h());
        self.text(
            headline,
            Vec2::new(w / 2.0, h / 4.0),
            headline_size,
            true,
            colors::WHITE,
            TextAlign::Center,
        );
        self.text(
            format!("Time: {}", self.frame.timer),
            Vec2::new(w / 2.0, h / 2.0),
            20.0,
            false,
            colors::WHITE,
            TextAlign::Center,
        );

        if let Some(region) = self.layout.region(self.frame.screen, button) {
            self.stock_button(button, region);
        }
    }
}

/// Does a circle at `pos` touch the canvas at all
fn on_canvas(canvas: &ScreenRect, pos: Vec2, radius: f32) -> bool {
    let padded = ScreenRect::new(
        canvas.origin - Vec2::splat(radius),
        canvas.size + Vec2::splat(2.0 * radius),
    );
    padded.contains(pos)
}
