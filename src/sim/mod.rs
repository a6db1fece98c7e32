//! Simulation module
//!
//! All gameplay logic lives here. No rendering, input or platform code:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for enemies, layout order for destinations)

pub mod color;
pub mod enemy;
pub mod state;
pub mod tick;

pub use color::{ColorChoice, ColorSelection, Rgb, hsb_to_rgb};
pub use enemy::Enemy;
pub use state::{Destination, Simulation, Timer};
pub use tick::{TickInput, TickOutcome, tick};
