//! Screen state machine
//!
//! Screens change only on button clicks or on a finished round. Both inputs
//! are matched exhaustively against the current screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::{Button, Layout};
use crate::sim::{Simulation, TickOutcome};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen with Play/Help/Shop
    #[default]
    Menu,
    /// Color picker
    Shop,
    /// Instructions
    Help,
    /// A run in progress
    Play,
    /// All destinations visited
    Win,
    /// Caught by an enemy
    Lose,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Shop => "shop",
            Screen::Help => "help",
            Screen::Play => "play",
            Screen::Win => "win",
            Screen::Lose => "lose",
        }
    }
}

/// Owns the current screen tag
#[derive(Debug, Clone, Default)]
pub struct ScreenMachine {
    screen: Screen,
}

impl ScreenMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Handle a released click at `pos`.
    ///
    /// Returns the button that was hit, if any. Starting a run resets `sim`.
    pub fn handle_click(
        &mut self,
        pos: Vec2,
        layout: &Layout,
        sim: &mut Simulation,
    ) -> Option<Button> {
        let button = layout.hit(self.screen, pos)?;

        // Buttons a screen doesn't show are listed explicitly, never wildcarded
        match self.screen {
            Screen::Menu => match button {
                Button::Play => self.start_run(sim),
                Button::Help => self.enter(Screen::Help),
                Button::Shop => self.enter(Screen::Shop),
                Button::Swatch(_) | Button::Back | Button::PlayAgain | Button::TryAgain => {
                    return self.unhandled(button);
                }
            },
            Screen::Shop => match button {
                Button::Swatch(choice) => {
                    sim.select_color(choice);
                    log::info!("Player color set to {}", choice.label());
                }
                Button::Back => self.enter(Screen::Menu),
                Button::Play
                | Button::Help
                | Button::Shop
                | Button::PlayAgain
                | Button::TryAgain => return self.unhandled(button),
            },
            Screen::Help => match button {
                Button::Back => self.enter(Screen::Menu),
                Button::Play
                | Button::Help
                | Button::Shop
                | Button::Swatch(_)
                | Button::PlayAgain
                | Button::TryAgain => return self.unhandled(button),
            },
            Screen::Win => match button {
                Button::PlayAgain => self.start_run(sim),
                Button::Play
                | Button::Help
                | Button::Shop
                | Button::Swatch(_)
                | Button::Back
                | Button::TryAgain => return self.unhandled(button),
            },
            Screen::Lose => match button {
                Button::TryAgain => self.start_run(sim),
                Button::Play
                | Button::Help
                | Button::Shop
                | Button::Swatch(_)
                | Button::Back
                | Button::PlayAgain => return self.unhandled(button),
            },
            // Steering only; nothing to click
            Screen::Play => return self.unhandled(button),
        }
        Some(button)
    }

    /// Apply a tick outcome. Only meaningful while playing.
    pub fn handle_outcome(&mut self, outcome: TickOutcome) {
        match (self.screen, outcome) {
            (Screen::Play, TickOutcome::Won) => self.enter(Screen::Win),
            (Screen::Play, TickOutcome::Caught) => self.enter(Screen::Lose),
            (Screen::Play, TickOutcome::Running) => {}
            (Screen::Menu | Screen::Shop | Screen::Help | Screen::Win | Screen::Lose, _) => {}
        }
    }

    fn start_run(&mut self, sim: &mut Simulation) {
        sim.reset();
        self.enter(Screen::Play);
    }

    // The layout only reports buttons shown on the current screen
    fn unhandled(&self, button: Button) -> Option<Button> {
        log::warn!(
            "Button {:?} is not handled on the {} screen",
            button,
            self.screen.as_str()
        );
        None
    }

    fn enter(&mut self, next: Screen) {
        log::info!("Screen {} -> {}", self.screen.as_str(), next.as_str());
        self.screen = next;
    }
}
