//! Screen-space button geometry
//!
//! Every region is a fraction of the canvas (designed against 640x480), so a
//! renderer that rescales the canvas keeps clicks and drawing in agreement.

use glam::Vec2;

use super::screen::Screen;
use crate::projection::ScreenRect;
use crate::sim::ColorChoice;

/// A clickable shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Circle { center: Vec2, radius: f32 },
    Rect(ScreenRect),
}

impl Region {
    /// Inclusive of the boundary
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Region::Circle { center, radius } => p.distance_squared(*center) <= radius * radius,
            Region::Rect(rect) => rect.contains(p),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Region::Circle { center, .. } => *center,
            Region::Rect(rect) => rect.center(),
        }
    }
}

/// Everything a click can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Help,
    Shop,
    Swatch(ColorChoice),
    Back,
    PlayAgain,
    TryAgain,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Play => "PLAY",
            Button::Help => "HELP",
            Button::Shop => "SHOP",
            Button::Swatch(choice) => choice.label(),
            Button::Back => "BACK",
            Button::PlayAgain => "PLAY AGAIN",
            Button::TryAgain => "TRY AGAIN",
        }
    }
}

/// Button regions for one canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    canvas: Vec2,
    menu: [(Button, Region); 3],
    shop: Vec<(Button, Region)>,
    back: (Button, Region),
    play_again: (Button, Region),
    try_again: (Button, Region),
}

impl Layout {
    pub fn new(canvas: Vec2) -> Self {
        let (w, h) = (canvas.x, canvas.y);

        let menu = [
            (
                Button::Play,
                Region::Circle {
                    center: Vec2::new(w / 2.0, h / 3.0),
                    radius: w / 6.0,
                },
            ),
            (
                Button::Help,
                Region::Circle {
                    center: Vec2::new(w / 4.0, 3.0 * h / 4.0),
                    radius: w / 8.0,
                },
            ),
            (
                Button::Shop,
                Region::Circle {
                    center: Vec2::new(3.0 * w / 4.0, 3.0 * h / 4.0),
                    radius: w / 8.0,
                },
            ),
        ];

        // 4 across, 2 down
        let swatch_radius = w / 16.0;
        let mut shop: Vec<(Button, Region)> = ColorChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, &choice)| {
                let col = (i % 4) as f32;
                let row = (i / 4) as f32;
                let center = Vec2::new((col + 1.0) * w / 5.0, (row + 1.0) * h / 4.0);
                (
                    Button::Swatch(choice),
                    Region::Circle {
                        center,
                        radius: swatch_radius,
                    },
                )
            })
            .collect();

        let back = (
            Button::Back,
            Region::Rect(ScreenRect::new(
                Vec2::new(w / 2.0 - w / 12.0, 13.0 * h / 16.0 - h / 12.0),
                Vec2::new(w / 6.0, h / 6.0),
            )),
        );
        shop.push(back);

        let result_size = Vec2::new(w / 5.0, h / 10.0);
        let result_rect = ScreenRect::new(
            Vec2::new(w / 2.0, 3.0 * h / 4.0) - result_size * 0.5,
            result_size,
        );

        Self {
            canvas,
            menu,
            shop,
            back,
            play_again: (Button::PlayAgain, Region::Rect(result_rect)),
            try_again: (Button::TryAgain, Region::Rect(result_rect)),
        }
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    /// Active regions for a screen, in hit-test priority order
    pub fn regions(&self, screen: Screen) -> &[(Button, Region)] {
        match screen {
            Screen::Menu => &self.menu,
            Screen::Shop => &self.shop,
            Screen::Help => std::slice::from_ref(&self.back),
            Screen::Play => &[],
            Screen::Win => std::slice::from_ref(&self.play_again),
            Screen::Lose => std::slice::from_ref(&self.try_again),
        }
    }

    /// First button on `screen` containing `p`
    pub fn hit(&self, screen: Screen, p: Vec2) -> Option<Button> {
        self.regions(screen)
            .iter()
            .find(|(_, region)| region.contains(p))
            .map(|(button, _)| *button)
    }

    /// Region of a button on a screen, if it is shown there
    pub fn region(&self, screen: Screen, button: Button) -> Option<Region> {
        self.regions(screen)
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, region)| *region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

    fn logical() -> Layout {
        Layout::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    #[test]
    fn test_menu_buttons() {
        let layout = logical();
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(320.0, 160.0)), Some(Button::Play));
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(160.0, 360.0)), Some(Button::Help));
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(480.0, 360.0)), Some(Button::Shop));
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_edges_are_inside() {
        let layout = logical();
        // Result button spans x 256..384, y 336..384
        assert_eq!(layout.hit(Screen::Win, Vec2::new(256.0, 336.0)), Some(Button::PlayAgain));
        assert_eq!(layout.hit(Screen::Win, Vec2::new(384.0, 384.0)), Some(Button::PlayAgain));
        assert_eq!(layout.hit(Screen::Win, Vec2::new(384.5, 384.0)), None);

        // Help circle: center (160, 360), radius 80
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(160.0, 280.0)), Some(Button::Help));
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(160.0, 279.5)), None);
    }

    #[test]
    fn test_shop_grid() {
        let layout = logical();
        assert_eq!(
            layout.hit(Screen::Shop, Vec2::new(128.0, 120.0)),
            Some(Button::Swatch(ColorChoice::Red))
        );
        assert_eq!(
            layout.hit(Screen::Shop, Vec2::new(512.0, 120.0)),
            Some(Button::Swatch(ColorChoice::Yellow))
        );
        assert_eq!(
            layout.hit(Screen::Shop, Vec2::new(128.0, 240.0)),
            Some(Button::Swatch(ColorChoice::Pink))
        );
        assert_eq!(
            layout.hit(Screen::Shop, Vec2::new(512.0, 240.0)),
            Some(Button::Swatch(ColorChoice::Rainbow))
        );
        // Back rect spans x 266.7..373.3, y 350..430
        assert_eq!(layout.hit(Screen::Shop, Vec2::new(320.0, 390.0)), Some(Button::Back));
        assert_eq!(layout.hit(Screen::Shop, Vec2::new(320.0, 180.0)), None);
    }

    #[test]
    fn test_screen_specific_regions() {
        let layout = logical();
        let back = Vec2::new(320.0, 390.0);
        assert_eq!(layout.hit(Screen::Help, back), Some(Button::Back));
        assert_eq!(layout.hit(Screen::Menu, back), None);

        let result = Vec2::new(320.0, 360.0);
        assert_eq!(layout.hit(Screen::Win, result), Some(Button::PlayAgain));
        assert_eq!(layout.hit(Screen::Lose, result), Some(Button::TryAgain));
        assert_eq!(layout.hit(Screen::Lose, Vec2::new(320.0, 300.0)), None);

        // Nothing is clickable while playing
        assert!(layout.regions(Screen::Play).is_empty());
        assert_eq!(layout.hit(Screen::Play, Vec2::new(320.0, 160.0)), None);
    }

    #[test]
    fn test_scales_with_canvas() {
        let layout = Layout::new(Vec2::new(1280.0, 960.0));
        assert_eq!(layout.hit(Screen::Menu, Vec2::new(640.0, 320.0)), Some(Button::Play));
        assert_eq!(
            layout.region(Screen::Menu, Button::Play),
            Some(Region::Circle {
                center: Vec2::new(640.0, 320.0),
                radius: 1280.0 / 6.0
            })
        );
    }
}
