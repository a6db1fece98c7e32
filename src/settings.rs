//! Game settings and tunables
//!
//! Defaults come from `consts`. Overrides can be supplied as a JSON object in
//! the `RUN_AWAY_SETTINGS` environment variable; nothing is read from disk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WorldBounds;
use crate::consts::*;

/// Errors from parsing or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world bounds are empty: min {min} must be below max {max}")]
    EmptyWorld { min: f32, max: f32 },
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

/// Gameplay and loop tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_min: f32,
    pub world_max: f32,

    // === Movement ===
    /// Enemy step per tick
    pub enemy_speed: f32,
    /// Player step per tick
    pub player_step: f32,
    /// Pointer deadzone around screen center (pixels)
    pub steer_deadzone: f32,

    // === Rules ===
    pub visit_radius: f32,
    pub catch_radius: f32,
    pub spawn_clearance: f32,
    pub spawn_max_attempts: u32,
    pub initial_enemies: usize,

    // === Cosmetics ===
    pub rainbow_step: f32,

    // === Loop ===
    pub tick_hz: u32,
    pub max_catch_up_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_min: WORLD_MIN,
            world_max: WORLD_MAX,

            enemy_speed: ENEMY_SPEED,
            player_step: PLAYER_STEP,
            steer_deadzone: STEER_DEADZONE,

            visit_radius: VISIT_RADIUS,
            catch_radius: CATCH_RADIUS,
            spawn_clearance: SPAWN_CLEARANCE,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,
            initial_enemies: INITIAL_ENEMIES,

            rainbow_step: RAINBOW_STEP,

            tick_hz: TICK_HZ,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
        }
    }
}

impl Settings {
    /// Environment variable holding JSON overrides
    pub const ENV_VAR: &'static str = "RUN_AWAY_SETTINGS";

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_min, self.world_max)
    }

    /// Fixed tick duration in seconds
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_hz as f64
    }

    /// Parse a (possibly partial) JSON object and validate the result
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.world_min < self.world_max) {
            return Err(SettingsError::EmptyWorld {
                min: self.world_min,
                max: self.world_max,
            });
        }

        let positive = [
            ("enemy_speed", self.enemy_speed),
            ("player_step", self.player_step),
            ("visit_radius", self.visit_radius),
            ("catch_radius", self.catch_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        // Zero is allowed here: no clearance, no deadzone, frozen rainbow
        let non_negative = [
            ("spawn_clearance", self.spawn_clearance),
            ("steer_deadzone", self.steer_deadzone),
            ("rainbow_step", self.rainbow_step),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        if self.tick_hz == 0 {
            return Err(SettingsError::Zero { field: "tick_hz" });
        }
        if self.spawn_max_attempts == 0 {
            return Err(SettingsError::Zero {
                field: "spawn_max_attempts",
            });
        }
        if self.max_catch_up_ticks == 0 {
            return Err(SettingsError::Zero {
                field: "max_catch_up_ticks",
            });
        }
        Ok(())
    }

    /// Load overrides from the environment, falling back to defaults
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::ENV_VAR);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", Self::ENV_VAR, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bounds(), WorldBounds::new(-100.0, 100.0));
        assert!((settings.tick_dt() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_speed": 0.05, "max_catch_up_ticks": 5 }"#)
            .unwrap();
        assert_eq!(settings.enemy_speed, 0.05);
        assert_eq!(settings.max_catch_up_ticks, 5);
        assert_eq!(settings.world_min, WORLD_MIN);
        assert_eq!(settings.initial_enemies, INITIAL_ENEMIES);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Settings::from_json(r#"{ "world_min": 10, "world_max": 10 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyWorld { .. }));

        let err = Settings::from_json(r#"{ "catch_radius": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::NotPositive {
                field: "catch_radius",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "tick_hz": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Zero { field: "tick_hz" }));
    }
}
