//! Entity records for the board
//!
//! Passive data: the avatar, collectibles, contaminants and obstacles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Facing direction of the avatar (drives the mouth wedge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
    pub direction: Direction,
    /// Mouth animation flag, flips every tick
    pub mouth_open: bool,
}

impl Avatar {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            radius: AVATAR_RADIUS,
            speed,
            direction: Direction::None,
            mouth_open: true,
        }
    }
}

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    CleanWater,
    ToolPack,
}

impl CollectibleKind {
    pub fn radius(self) -> f32 {
        match self {
            CollectibleKind::CleanWater => CLEAN_WATER_RADIUS,
            CollectibleKind::ToolPack => TOOL_PACK_RADIUS,
        }
    }

    /// Distance from the playfield edge to the spawn point
    pub fn spawn_margin(self) -> f32 {
        match self {
            CollectibleKind::CleanWater => CLEAN_WATER_MARGIN,
            CollectibleKind::ToolPack => TOOL_PACK_MARGIN,
        }
    }
}

/// A clean water droplet or tool pack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub radius: f32,
    collected: bool,
}

impl Collectible {
    pub fn new(id: u32, kind: CollectibleKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: kind.radius(),
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    /// Only a session restart puts a collectible back in play
    pub(crate) fn reset(&mut self) {
        self.collected = false;
    }
}

/// Contaminated water: costs score and a life on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contaminant {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Pulse animation phase (radians)
    pub pulse_phase: f32,
    collected: bool,
}

impl Contaminant {
    pub fn new(id: u32, pos: Vec2, pulse_phase: f32) -> Self {
        Self {
            id,
            pos,
            radius: CONTAMINANT_RADIUS,
            pulse_phase,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    /// Visual radius multiplier in [0.8, 1.2]
    pub fn pulse_scale(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * 0.2
    }
}

/// Static blocking rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(OBSTACLE_SIZE),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}
