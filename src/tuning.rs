//! Data-driven game balance
//!
//! Board layout is fixed (see `consts`); everything a designer might want to
//! nudge lives here and can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration rejected at the edges, before a session exists
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playfield {width}x{height} is too small (each side must exceed {min})")]
    PlayfieldTooSmall { width: f32, height: f32, min: f32 },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playfield dimensions (canvas size in pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Build a playfield, rejecting sizes where spawn placement is undefined
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let min = 2.0 * MAX_SPAWN_MARGIN;
        if !width.is_finite() || !height.is_finite() || width <= min || height <= min {
            return Err(ConfigError::PlayfieldTooSmall { width, height, min });
        }
        Ok(Self { width, height })
    }

    /// Centre of the playfield (avatar start)
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Avatar movement per tick (pixels)
    pub avatar_speed: f32,
    /// Score for a clean water droplet
    pub clean_water_points: i32,
    /// Score for a tool pack
    pub tool_pack_points: i32,
    /// Score lost on contaminant contact (positive number)
    pub contaminant_penalty: i32,
    pub starting_lives: u8,
    /// Periodic spawner cadence
    pub spawn_interval_ms: u32,
    /// Chance per spawner run of adding a clean water droplet
    pub water_spawn_chance: f64,
    /// Chance per spawner run of drifting every contaminant
    pub drift_chance: f64,
    /// Drift offset per axis is (rand - 0.5) * drift_scale
    pub drift_scale: f32,
    /// Drifted contaminants stay within [drift_margin, dimension - drift_margin]
    pub drift_margin: f32,
    /// Contaminant pulse phase advance per tick (radians)
    pub pulse_speed: f32,
    /// Spawner stops adding droplets once this many exist
    pub max_clean_water: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            avatar_speed: 2.0,
            clean_water_points: 10,
            tool_pack_points: 50,
            contaminant_penalty: 20,
            starting_lives: 3,
            spawn_interval_ms: 3000,
            water_spawn_chance: 0.02,
            drift_chance: 0.01,
            drift_scale: 2.0,
            drift_margin: 10.0,
            pulse_speed: 0.1,
            max_clean_water: 60,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("water_spawn_chance", self.water_spawn_chance),
            ("drift_chance", self.drift_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        if self.avatar_speed.is_nan() || self.avatar_speed <= 0.0 {
            return Err(ConfigError::NotPositive("avatar_speed"));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NotPositive("starting_lives"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::NotPositive("spawn_interval_ms"));
        }
        Ok(())
    }

    /// Spawner cadence expressed in host frames
    pub fn spawn_interval_ticks(&self) -> u64 {
        (u64::from(self.spawn_interval_ms) * u64::from(FRAMES_PER_SECOND) / 1000).max(1)
    }
}
