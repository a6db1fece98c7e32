//! Simulation state and core types
//!
//! Everything the game loop mutates lives in one `Simulation` aggregate.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{ColorChoice, ColorSelection};
use super::enemy::Enemy;
use crate::consts::{DESTINATIONS, TICK_HZ};
use crate::settings::Settings;
use crate::{WorldBounds, direction_to};

/// A point the player has to reach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub pos: Vec2,
    pub visited: bool,
}

impl Destination {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            visited: false,
        }
    }
}

/// Elapsed play time in simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub ticks: u64,
    pub tick_hz: u32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TICK_HZ)
    }
}

impl Timer {
    pub fn new(tick_hz: u32) -> Self {
        Self { ticks: 0, tick_hz }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn total_seconds(&self) -> u64 {
        self.ticks / u64::from(self.tick_hz.max(1))
    }

    pub fn seconds(&self) -> u64 {
        self.total_seconds() % 60
    }

    pub fn minutes(&self) -> u64 {
        (self.total_seconds() / 60) % 60
    }

    pub fn hours(&self) -> u64 {
        self.total_seconds() / 3600
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {:02} : {:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Complete game world
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Tunables this run was created with
    pub settings: Settings,
    /// Player position (also the camera)
    pub player: Vec2,
    /// Fixed destination set, in layout order
    pub destinations: Vec<Destination>,
    /// Active enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Play time
    pub timer: Timer,
    /// Player color and rainbow clock
    pub color: ColorSelection,
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
}

impl Simulation {
    /// Create an idle world (no enemies until `reset`)
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            settings,
            player: Vec2::ZERO,
            destinations: DESTINATIONS
                .iter()
                .map(|&(x, y)| Destination::new(x, y))
                .collect(),
            enemies: Vec::new(),
            timer: Timer::new(settings.tick_hz),
            color: ColorSelection::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn bounds(&self) -> WorldBounds {
        self.settings.bounds()
    }

    /// Start a fresh run. Color selection and rainbow clock carry over.
    pub fn reset(&mut self) {
        self.enemies.clear();
        for dest in &mut self.destinations {
            dest.visited = false;
        }
        self.player = Vec2::ZERO;
        self.timer = Timer::new(self.settings.tick_hz);

        for _ in 0..self.settings.initial_enemies {
            self.spawn_enemy();
        }
    }

    /// Move the player one step along `direction` (expected unit length)
    pub fn steer(&mut self, direction: Vec2) {
        // Normalizing here also rejects zero and NaN directions
        let Some(dir) = direction_to(Vec2::ZERO, direction) else {
            return;
        };
        self.player = self.bounds().clamp(self.player + dir * self.settings.player_step);
    }

    pub fn select_color(&mut self, choice: ColorChoice) {
        self.color.select(choice);
    }

    /// Cosmetic part of a tick: advance the rainbow hue
    pub fn advance_rainbow(&mut self) {
        self.color.advance_rainbow(self.settings.rainbow_step);
    }

    pub fn visited_count(&self) -> usize {
        self.destinations.iter().filter(|d| d.visited).count()
    }

    /// Destinations still to visit
    pub fn remaining(&self) -> usize {
        self.destinations.len() - self.visited_count()
    }

    pub fn all_visited(&self) -> bool {
        self.destinations.iter().all(|d| d.visited)
    }

    /// True if `p` is within spawn clearance of any unvisited destination
    pub fn is_near_unvisited(&self, p: Vec2) -> bool {
        self.destinations
            .iter()
            .filter(|d| !d.visited)
            .any(|d| d.pos.distance(p) < self.settings.spawn_clearance)
    }

    /// Pick a spawn point clear of unvisited destinations.
    ///
    /// Gives up after `spawn_max_attempts` samples and returns the last
    /// (unconstrained) sample.
    pub fn spawn_point(&mut self) -> Vec2 {
        let bounds = self.bounds();
        let mut candidate = Vec2::ZERO;
        for _ in 0..self.settings.spawn_max_attempts {
            candidate = self.random_point(&bounds);
            if !self.is_near_unvisited(candidate) {
                return candidate;
            }
        }

        log::warn!(
            "No clear spawn point after {} attempts, using ({:.2}, {:.2})",
            self.settings.spawn_max_attempts,
            candidate.x,
            candidate.y
        );
        candidate
    }

    /// Spawn one enemy at a valid point
    pub fn spawn_enemy(&mut self) {
        let pos = self.spawn_point();
        log::debug!("Enemy spawned at ({:.2}, {:.2})", pos.x, pos.y);
        self.enemies.push(Enemy::new(pos, self.settings.enemy_speed));
    }

    fn random_point(&mut self, bounds: &WorldBounds) -> Vec2 {
        let x = bounds.min + self.rng.random::<f32>() * bounds.span();
        let y = bounds.min + self.rng.random::<f32>() * bounds.span();
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fresh_run(sim: &Simulation) {
        assert_eq!(sim.enemies.len(), 3);
        assert_eq!(sim.player, Vec2::ZERO);
        assert_eq!(sim.timer.ticks, 0);
        assert!(sim.destinations.iter().all(|d| !d.visited));
        for enemy in &sim.enemies {
            assert!(!sim.is_near_unvisited(enemy.pos));
            assert!(sim.bounds().contains(enemy.pos));
            assert_eq!(enemy.speed, sim.settings.enemy_speed);
        }
    }

    #[test]
    fn test_new_is_idle() {
        let sim = Simulation::new(1, Settings::default());
        assert!(sim.enemies.is_empty());
        assert_eq!(sim.destinations.len(), 8);
        assert_eq!(sim.remaining(), 8);
        assert_eq!(sim.color.choice, ColorChoice::Red);
    }

    #[test]
    fn test_reset_twice_gives_canonical_state() {
        let mut sim = Simulation::new(42, Settings::default());
        sim.player = Vec2::new(12.0, -7.0);
        sim.destinations[3].visited = true;
        sim.timer.ticks = 999;
        sim.spawn_enemy();

        sim.reset();
        assert_fresh_run(&sim);
        sim.reset();
        assert_fresh_run(&sim);
    }

    #[test]
    fn test_reset_keeps_color() {
        let mut sim = Simulation::new(3, Settings::default());
        sim.select_color(ColorChoice::Aqua);
        sim.reset();
        assert_eq!(sim.color.choice, ColorChoice::Aqua);
    }

    #[test]
    fn test_spawn_ignores_visited_destinations() {
        let mut sim = Simulation::new(5, Settings::default());
        let near = Vec2::new(-49.0, -50.0);
        assert!(sim.is_near_unvisited(near));
        sim.destinations[0].visited = true;
        assert!(!sim.is_near_unvisited(near));
    }

    #[test]
    fn test_spawn_falls_back_when_nothing_is_clear() {
        // Clearance covers the whole world, so every sample is rejected
        let settings = Settings {
            spawn_clearance: 1000.0,
            spawn_max_attempts: 25,
            ..Settings::default()
        };
        let mut sim = Simulation::new(9, settings);
        sim.reset();
        assert_eq!(sim.enemies.len(), 3);
        for enemy in &sim.enemies {
            assert!(sim.bounds().contains(enemy.pos));
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Simulation::new(77, Settings::default());
        let mut b = Simulation::new(77, Settings::default());
        a.reset();
        b.reset();
        assert_eq!(a.enemies, b.enemies);
    }

    #[test]
    fn test_steer_moves_and_clamps() {
        let mut sim = Simulation::new(1, Settings::default());
        sim.steer(Vec2::new(1.0, 0.0));
        assert!((sim.player.x - 0.003).abs() < 1e-7);

        sim.player = Vec2::new(100.0, -100.0);
        sim.steer(Vec2::new(1.0, -1.0).normalize());
        assert_eq!(sim.player, Vec2::new(100.0, -100.0));
    }

    #[test]
    fn test_steer_ignores_degenerate_direction() {
        let mut sim = Simulation::new(1, Settings::default());
        sim.steer(Vec2::ZERO);
        sim.steer(Vec2::new(f32::NAN, 1.0));
        assert_eq!(sim.player, Vec2::ZERO);
    }

    #[test]
    fn test_timer_display() {
        let mut timer = Timer::default();
        assert_eq!(timer.to_string(), "0 : 00 : 00");

        timer.ticks = 60 * (3600 + 5 * 60 + 7) + 59;
        assert_eq!(timer.hours(), 1);
        assert_eq!(timer.minutes(), 5);
        assert_eq!(timer.seconds(), 7);
        assert_eq!(timer.to_string(), "1 : 05 : 07");
    }
}
