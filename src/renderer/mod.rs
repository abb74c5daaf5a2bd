//! Frame rendering
//!
//! Reads the simulation state and paints it; nothing here feeds back into
//! gameplay. Geometry helpers are shared, the Canvas 2D painter is wasm only.

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::consts::AVATAR_MOUTH_ANGLE;
use crate::sim::Direction;

/// Background grid spacing (pixels)
pub const GRID_SPACING: f64 = 40.0;

/// Colour palette
pub mod palette {
    pub const BACKGROUND: &str = "#1a1a2e";
    pub const GRID: &str = "#16213e";
    pub const OBSTACLE: &str = "#8B4513";
    pub const OBSTACLE_EDGE: &str = "#654321";
    pub const CONTAMINANT: &str = "#8B0000";
    pub const CONTAMINANT_GLOW: &str = "rgba(255, 0, 0, 0.3)";
    pub const WATER: &str = "#00bfff";
    pub const SPARKLE: &str = "#ffffff";
    pub const TOOL_PACK: &str = "#ffd700";
    pub const AVATAR: &str = "#ffff00";
    pub const HUD_TEXT: &str = "#ffffff";
    pub const HINT_TEXT: &str = "#cccccc";
}

/// Start/end angles of the avatar body arc with the mouth open.
///
/// The gap between end and start (going clockwise) is the mouth, centred on
/// the facing direction. Facing `None` draws it to the right.
pub fn mouth_arc(direction: Direction) -> (f64, f64) {
    let m = f64::from(AVATAR_MOUTH_ANGLE);
    let facing = match direction {
        Direction::Right | Direction::None => 0.0,
        Direction::Down => FRAC_PI_2,
        Direction::Left => PI,
        Direction::Up => -FRAC_PI_2,
    };
    (facing + m, facing - m + TAU)
}
