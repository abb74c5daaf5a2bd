//! Lifetime player progress
//!
//! Accumulates every score delta across missions and remembers which
//! missions were won. Persisted to LocalStorage.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Progress carried across every mission ever played
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProgress {
    /// Lifetime score, never below zero
    pub total_score: i64,
    /// Missions won (repeat wins included)
    pub communities_helped: u32,
    /// Mission IDs won at least once
    pub completed_missions: BTreeSet<String>,
}

impl PlayerProgress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "waterHeroesPlayerData";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a score delta to the lifetime total (clamped at zero)
    pub fn record_delta(&mut self, delta: i32) {
        self.total_score = (self.total_score + i64::from(delta)).max(0);
    }

    /// Record a won mission. Returns true the first time `mission_id` is won.
    pub fn record_victory(&mut self, mission_id: &str) -> bool {
        self.communities_helped += 1;
        self.completed_missions.insert(mission_id.to_string())
    }

    pub fn is_completed(&self, mission_id: &str) -> bool {
        self.completed_missions.contains(mission_id)
    }

    /// Feed simulation events in; returns true if anything changed
    pub fn apply_events(&mut self, mission_id: &str, events: &[GameEvent]) -> bool {
        let mut changed = false;
        for event in events {
            match event {
                GameEvent::Scored { delta, .. } => {
                    self.record_delta(*delta);
                    changed = true;
                }
                GameEvent::Victory { .. } => {
                    self.record_victory(mission_id);
                    changed = true;
                }
                _ => {}
            }
        }
        changed
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<PlayerProgress>(&json) {
                    Ok(progress) => {
                        log::info!("Loaded player progress (total {})", progress.total_score);
                        return progress;
                    }
                    Err(e) => log::warn!("Failed to parse saved player data: {}", e),
                }
            }
        }

        log::info!("No player progress found, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to save player data");
                    }
                }
                Err(e) => log::warn!("Failed to serialize player data: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ScoreCategory;

    #[test]
    fn test_total_never_negative() {
        let mut progress = PlayerProgress::new();
        progress.record_delta(10);
        progress.record_delta(-20);
        assert_eq!(progress.total_score, 0);
        progress.record_delta(50);
        assert_eq!(progress.total_score, 50);
    }

    #[test]
    fn test_record_victory() {
        let mut progress = PlayerProgress::new();
        assert!(progress.record_victory("india"));
        assert!(!progress.record_victory("india"));
        assert_eq!(progress.communities_helped, 2);
        assert!(progress.is_completed("india"));
        assert!(!progress.is_completed("kenya"));
    }

    #[test]
    fn test_apply_events() {
        let mut progress = PlayerProgress::new();
        let events = [
            GameEvent::Scored {
                id: 1,
                category: ScoreCategory::Complete,
                delta: 50,
            },
            GameEvent::LivesChanged { remaining: 2 },
            GameEvent::Victory { final_score: 50 },
        ];
        assert!(progress.apply_events("india", &events));
        assert_eq!(progress.total_score, 50);
        assert!(progress.is_completed("india"));
        assert!(!progress.apply_events("india", &[GameEvent::ContaminantsDrifted]));
    }

    #[test]
    fn test_saved_format_tolerates_missing_fields() {
        let progress: PlayerProgress = serde_json::from_str(r#"{"totalScore": 120}"#).unwrap();
        assert_eq!(progress.total_score, 120);
        assert_eq!(progress.communities_helped, 0);
        assert!(progress.completed_missions.is_empty());
    }
}
