//! Player color selection (the shop)

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel by `factor` (hover/outline shading)
    pub fn darker(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Normalized RGBA for vertex colors
    pub fn to_f32(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }
}

/// Convert hue/saturation/brightness (all 0..1) to RGB.
///
/// Hue wraps, so 1.25 is the same as 0.25.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb {
    let channel = |v: f32| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = channel(brightness);
        return Rgb::new(v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    Rgb::new(channel(r), channel(g), channel(b))
}

/// Colors offered in the shop, in grid order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Aqua,
    Orange,
    /// Cycles through every hue over time
    Rainbow,
}

impl ColorChoice {
    pub const ALL: [ColorChoice; 8] = [
        ColorChoice::Red,
        ColorChoice::Blue,
        ColorChoice::Green,
        ColorChoice::Yellow,
        ColorChoice::Pink,
        ColorChoice::Aqua,
        ColorChoice::Orange,
        ColorChoice::Rainbow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColorChoice::Red => "Red",
            ColorChoice::Blue => "Blue",
            ColorChoice::Green => "Green",
            ColorChoice::Yellow => "Yellow",
            ColorChoice::Pink => "Pink",
            ColorChoice::Aqua => "Aqua",
            ColorChoice::Orange => "Orange",
            ColorChoice::Rainbow => "Rainbow",
        }
    }

    /// The color at the given rainbow hue
    pub fn resolve(&self, rainbow_hue: f32) -> Rgb {
        match self {
            ColorChoice::Red => Rgb::new(255, 0, 0),
            ColorChoice::Blue => Rgb::new(0, 0, 255),
            ColorChoice::Green => Rgb::new(0, 255, 0),
            ColorChoice::Yellow => Rgb::new(255, 255, 0),
            ColorChoice::Pink => Rgb::new(255, 0, 255),
            ColorChoice::Aqua => Rgb::new(0, 255, 255),
            ColorChoice::Orange => Rgb::new(255, 128, 0),
            ColorChoice::Rainbow => hsb_to_rgb(rainbow_hue, 1.0, 1.0),
        }
    }
}

/// Selected player color plus the shared rainbow clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSelection {
    pub choice: ColorChoice,
    /// Resolved paint color for the current choice
    pub color: Rgb,
    /// 0..1, advances every tick whatever is selected
    pub rainbow_hue: f32,
}

impl Default for ColorSelection {
    fn default() -> Self {
        let choice = ColorChoice::default();
        Self {
            choice,
            color: choice.resolve(0.0),
            rainbow_hue: 0.0,
        }
    }
}

impl ColorSelection {
    pub fn select(&mut self, choice: ColorChoice) {
        self.choice = choice;
        self.color = choice.resolve(self.rainbow_hue);
    }

    /// Advance the rainbow hue by `step`, wrapping at 1.0
    pub fn advance_rainbow(&mut self, step: f32) {
        self.rainbow_hue += step;
        if self.rainbow_hue >= 1.0 {
            self.rainbow_hue -= 1.0;
        }
        if self.choice == ColorChoice::Rainbow {
            self.color = self.choice.resolve(self.rainbow_hue);
        }
    }
}
