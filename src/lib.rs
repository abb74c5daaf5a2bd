//! Water Heroes - a clean-water collection arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, session state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `progress`: Lifetime score and completed missions
//! - `renderer`: Frame painting (Canvas 2D on wasm)
//! - `audio`: Sound effects for simulation events (Web Audio playback on wasm)

pub mod audio;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use progress::PlayerProgress;
pub use settings::Settings;
pub use tuning::{ConfigError, Playfield, Tuning};

/// Fixed board constants
pub mod consts {
    /// Default playfield (canvas) size
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Host frame rate assumed by the headless driver
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Entity counts per session
    pub const CLEAN_WATER_COUNT: usize = 20;
    pub const TOOL_PACK_COUNT: usize = 5;
    pub const OBSTACLE_COUNT: usize = 8;
    pub const CONTAMINANT_COUNT: usize = 6;

    /// Avatar defaults
    pub const AVATAR_RADIUS: f32 = 15.0;
    /// Half-angle of the open mouth wedge (radians)
    pub const AVATAR_MOUTH_ANGLE: f32 = 0.2;

    /// Entity radii
    pub const CLEAN_WATER_RADIUS: f32 = 8.0;
    pub const TOOL_PACK_RADIUS: f32 = 12.0;
    pub const CONTAMINANT_RADIUS: f32 = 10.0;

    /// Obstacles are square blocks
    pub const OBSTACLE_SIZE: f32 = 30.0;

    /// Spawn margins (distance from playfield edge to spawn point)
    pub const CLEAN_WATER_MARGIN: f32 = 10.0;
    pub const TOOL_PACK_MARGIN: f32 = 15.0;
    /// Applies to the obstacle's top-left corner
    pub const OBSTACLE_MARGIN: f32 = 20.0;
    pub const CONTAMINANT_MARGIN: f32 = 10.0;

    /// Largest spawn margin; the playfield must exceed twice this on each axis
    pub const MAX_SPAWN_MARGIN: f32 = OBSTACLE_MARGIN;
}
