//! Fixed timestep simulation tick
//!
//! Advances the world by exactly one step. Outcomes are reported, not acted
//! on: the screen state machine decides what a win or a catch means.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Simulation;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steering direction from the pointer (None inside the deadzone)
    pub steer: Option<Vec2>,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Nothing decided yet
    Running,
    /// Every destination visited
    Won,
    /// An enemy reached the player
    Caught,
}

impl TickOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, TickOutcome::Running)
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(sim: &mut Simulation, input: &TickInput) -> TickOutcome {
    if let Some(dir) = input.steer {
        sim.steer(dir);
    }

    sim.advance_rainbow();

    // Visits (each new visit brings another enemy)
    let player = sim.player;
    let visit_radius = sim.settings.visit_radius;
    for i in 0..sim.destinations.len() {
        let dest = sim.destinations[i];
        if !dest.visited && dest.pos.distance(player) < visit_radius {
            sim.destinations[i].visited = true;
            log::debug!(
                "Destination {} visited at ({}, {}), {} left",
                i,
                dest.pos.x,
                dest.pos.y,
                sim.remaining()
            );
            sim.spawn_enemy();
        }
    }

    // Pursuit
    let bounds = sim.bounds();
    for enemy in &mut sim.enemies {
        enemy.advance(player, &bounds);
    }

    // A catch ends the tick before anything else is counted
    let catch_radius = sim.settings.catch_radius;
    if sim
        .enemies
        .iter()
        .any(|e| e.distance_to(player) < catch_radius)
    {
        return TickOutcome::Caught;
    }

    let outcome = if sim.all_visited() {
        TickOutcome::Won
    } else {
        TickOutcome::Running
    };

    sim.timer.advance();
    outcome
}

impl Simulation {
    /// One tick without steering input
    pub fn tick(&mut self) -> TickOutcome {
        tick(self, &TickInput::default())
    }
}
