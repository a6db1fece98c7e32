//! Screens and click handling
//!
//! `layout` defines where buttons are; `screen` decides what clicking them does.

pub mod layout;
pub mod screen;

pub use layout::{Button, Layout, Region};
pub use screen::{Screen, ScreenMachine};

/// Instructions shown on the help screen
pub const HELP_LINES: [&str; 7] = [
    "Welcome to Runaway! Here are some tips:",
    "",
    "- Visit all destinations to win.",
    "- Avoid getting caught by enemies.",
    "- Enemies move toward your location constantly.",
    "",
    "Good luck!",
];
