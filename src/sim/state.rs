//! Session state and phase transitions
//!
//! One `GameState` per mission attempt. It owns every entity, the seeded RNG
//! and the score/lives counters.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Avatar, Collectible, CollectibleKind, Contaminant, Obstacle};
use super::spawn;
use crate::tuning::{Playfield, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities placed, waiting for `start`
    Initializing,
    /// Active gameplay
    Running,
    /// Ticks and spawner are suspended
    Paused,
    /// Lives ran out
    GameOver,
    /// Every collectible was collected
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Category tag attached to every score delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    /// Clean water droplet
    Collect,
    /// Tool pack
    Complete,
    /// Contaminant
    Error,
}

impl ScoreCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Collect => "collect",
            ScoreCategory::Complete => "complete",
            ScoreCategory::Error => "error",
        }
    }
}

/// Outcomes produced by the simulation for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Score changed by `delta` because entity `id` was hit
    Scored {
        id: u32,
        category: ScoreCategory,
        delta: i32,
    },
    /// A contaminant hit cost a life
    LivesChanged { remaining: u8 },
    /// Lives reached zero
    GameOver { final_score: i64 },
    /// All clean water and tool packs collected
    Victory { final_score: i64 },
    /// Periodic spawner added a droplet
    CollectibleSpawned { id: u32 },
    /// Periodic spawner nudged the contaminants
    ContaminantsDrifted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Internal score; may dip below zero, see `display_score`
    pub score: i64,
    pub lives: u8,
    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
    pub avatar: Avatar,
    /// Clean water and tool packs, in spawn order
    pub collectibles: Vec<Collectible>,
    pub contaminants: Vec<Contaminant>,
    pub obstacles: Vec<Obstacle>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a populated session in `Initializing`
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            avatar: Avatar::new(playfield.center(), tuning.avatar_speed),
            score: 0,
            lives: tuning.starting_lives,
            tuning,
            playfield,
            phase: GamePhase::Initializing,
            time_ticks: 0,
            collectibles: Vec::new(),
            contaminants: Vec::new(),
            obstacles: Vec::new(),
            next_id: 1,
        };

        spawn::initialize(&mut state);
        log::info!(
            "Session created (seed {}): {} collectibles, {} contaminants, {} obstacles",
            seed,
            state.collectibles.len(),
            state.contaminants.len(),
            state.obstacles.len()
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Leave `Initializing`. No-op in any other phase.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Initializing {
            self.phase = GamePhase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Single pause control for the host
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Full reset: score, lives, avatar, collected flags and contaminants.
    /// Obstacles and the droplets added by the spawner are kept.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Initializing;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.avatar = Avatar::new(self.playfield.center(), self.tuning.avatar_speed);
        for collectible in &mut self.collectibles {
            collectible.reset();
        }
        spawn::regenerate_contaminants(self);
        self.start();
        log::info!("Session restarted");
    }

    /// Score as shown to the player (never negative)
    pub fn display_score(&self) -> i64 {
        self.score.max(0)
    }

    /// Apply a score delta
    pub(crate) fn add_score(&mut self, delta: i32) {
        self.score += i64::from(delta);
    }

    /// Lose one life; returns true if that was the last one
    pub(crate) fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Remaining uncollected clean water and tool packs
    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.is_collected()).count()
    }

    pub fn count_kind(&self, kind: CollectibleKind) -> usize {
        self.collectibles.iter().filter(|c| c.kind == kind).count()
    }
}
