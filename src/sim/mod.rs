//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, fixed step sizes
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{check_completion, circles_overlap, resolve_collisions};
pub use entity::{Avatar, Collectible, CollectibleKind, Contaminant, Direction, Obstacle};
pub use movement::advance;
pub use spawn::periodic_tick;
pub use state::{GameEvent, GamePhase, GameState, ScoreCategory};
pub use tick::{TickInput, tick};
