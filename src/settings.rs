//! Game settings: physics tuning and match rules
//!
//! Stored as JSON. Missing fields take their defaults, so older files keep loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StoreError;
use crate::sim::Difficulty;

/// Physics constants, one place for every gameplay-feel number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Puck friction per reference tick
    pub friction: f32,
    /// Puck speed cap at reference width
    pub speed_limit: f32,
    /// Restitution for paddle hits
    pub paddle_elasticity: f32,
    /// Speed floor after a paddle hit at reference width
    pub min_collision_speed: f32,
    /// Energy kept on wall bounces
    pub rebound_damping: f32,
    /// Post-hit random perturbation (fraction of speed)
    pub angle_randomization: f32,
    /// Fraction of paddle displacement treated as its velocity
    pub momentum_transfer: f32,
    /// Fraction of paddle velocity pushed straight into the puck
    pub paddle_push: f32,
    /// Paddle base speed per reference tick at reference width
    pub paddle_speed: f32,
    pub puck_mass: f32,
    pub paddle_mass: f32,
    /// Serve speed band at reference width
    pub launch_speed_min: f32,
    pub launch_speed_max: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            speed_limit: PUCK_SPEED_LIMIT,
            paddle_elasticity: PADDLE_ELASTICITY,
            min_collision_speed: MIN_COLLISION_SPEED,
            rebound_damping: REBOUND_DAMPING,
            angle_randomization: ANGLE_RANDOMIZATION,
            momentum_transfer: PADDLE_MOMENTUM_TRANSFER,
            paddle_push: PADDLE_PUSH,
            paddle_speed: PADDLE_SPEED,
            puck_mass: PUCK_MASS,
            paddle_mass: PADDLE_MASS,
            launch_speed_min: LAUNCH_SPEED_MIN,
            launch_speed_max: LAUNCH_SPEED_MAX,
        }
    }
}

impl PhysicsTuning {
    /// Replace out-of-range values with defaults so the simulation never sees them
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let unit = |v: f32, d: f32| if v.is_finite() && v > 0.0 && v <= 1.0 { v } else { d };
        let positive = |v: f32, d: f32| if v.is_finite() && v > 0.0 { v } else { d };
        let non_negative = |v: f32, d: f32| if v.is_finite() && v >= 0.0 { v } else { d };

        self.friction = unit(self.friction, defaults.friction);
        self.rebound_damping = unit(self.rebound_damping, defaults.rebound_damping);
        self.speed_limit = positive(self.speed_limit, defaults.speed_limit);
        self.min_collision_speed = positive(self.min_collision_speed, defaults.min_collision_speed)
            .min(self.speed_limit);
        self.paddle_elasticity = non_negative(self.paddle_elasticity, defaults.paddle_elasticity);
        self.angle_randomization =
            non_negative(self.angle_randomization, defaults.angle_randomization);
        self.momentum_transfer = non_negative(self.momentum_transfer, defaults.momentum_transfer);
        self.paddle_push = non_negative(self.paddle_push, defaults.paddle_push);
        self.paddle_speed = positive(self.paddle_speed, defaults.paddle_speed);
        self.puck_mass = positive(self.puck_mass, defaults.puck_mass);
        self.paddle_mass = positive(self.paddle_mass, defaults.paddle_mass);
        // Serves bypass the speed governor
        self.launch_speed_min =
            positive(self.launch_speed_min, defaults.launch_speed_min).min(self.speed_limit);
        self.launch_speed_max = non_negative(self.launch_speed_max, defaults.launch_speed_max)
            .min(self.speed_limit)
            .max(self.launch_speed_min);
        self
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: PhysicsTuning,
    /// Points needed to win a classic (opponent ladder) match
    pub classic_win_score: u32,
    /// Points needed to win a duel
    pub duel_win_score: u32,
    /// Duel AI difficulty when none is chosen
    pub default_difficulty: Difficulty,
    /// Fixed RNG seed for reproducible matches
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: PhysicsTuning::default(),
            classic_win_score: CLASSIC_WIN_SCORE,
            duel_win_score: DUEL_WIN_SCORE,
            default_difficulty: Difficulty::Medium,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        settings.classic_win_score = settings.classic_win_score.max(1);
        settings.duel_win_score = settings.duel_win_score.max(1);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::io(path, source))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings: {err}");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| StoreError::io(path, source))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_canonical_constants() {
        let tuning = PhysicsTuning::default();
        assert_eq!(tuning.friction, 0.992);
        assert_eq!(tuning.paddle_elasticity, 1.2);
        assert_eq!(tuning.speed_limit, 25.0);
        let settings = Settings::default();
        assert_eq!(settings.classic_win_score, 3);
        assert_eq!(settings.duel_win_score, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"duel_win_score": 7, "tuning": {"friction": 0.98}}"#)
            .unwrap();
        assert_eq!(settings.duel_win_score, 7);
        assert_eq!(settings.classic_win_score, CLASSIC_WIN_SCORE);
        assert_eq!(settings.tuning.friction, 0.98);
        assert_eq!(settings.tuning.rebound_damping, REBOUND_DAMPING);
    }

    #[test]
    fn test_out_of_range_tuning_is_sanitized() {
        let settings = Settings::from_json(
            r#"{"classic_win_score": 0, "tuning": {"friction": 1.5, "puck_mass": -2.0}}"#,
        )
        .unwrap();
        assert_eq!(settings.tuning.friction, FRICTION);
        assert_eq!(settings.tuning.puck_mass, PUCK_MASS);
        assert_eq!(settings.classic_win_score, 1);
    }

    #[test]
    fn test_launch_band_capped_at_speed_limit() {
        let settings = Settings::from_json(
            r#"{"tuning": {"speed_limit": 5.0, "launch_speed_min": 30.0, "launch_speed_max": 40.0}}"#,
        )
        .unwrap();
        assert_eq!(settings.tuning.launch_speed_min, 5.0);
        assert_eq!(settings.tuning.launch_speed_max, 5.0);

        let tuning = PhysicsTuning {
            launch_speed_max: 3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.launch_speed_max, LAUNCH_SPEED_MIN);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(Settings::from_json("{nope"), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("air_hockey_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(42),
            default_difficulty: Difficulty::Hard,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(Settings::load(path), Err(StoreError::Io { .. })));
        assert_eq!(Settings::load_or_default(path), Settings::default());
    }
}
