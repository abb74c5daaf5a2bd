//! Entity placement and the periodic spawner
//!
//! All randomness comes from the session's seeded RNG.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Collectible, CollectibleKind, Contaminant, Obstacle};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Playfield;

/// Uniform point with `margin` clearance from every playfield edge
fn random_point(rng: &mut Pcg32, playfield: &Playfield, margin: f32) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * (playfield.width - 2.0 * margin) + margin,
        rng.random::<f32>() * (playfield.height - 2.0 * margin) + margin,
    )
}

fn spawn_collectible(state: &mut GameState, kind: CollectibleKind) -> u32 {
    let pos = random_point(&mut state.rng, &state.playfield, kind.spawn_margin());
    let id = state.next_entity_id();
    state.collectibles.push(Collectible::new(id, kind, pos));
    id
}

fn spawn_contaminant(state: &mut GameState) {
    let pos = random_point(&mut state.rng, &state.playfield, CONTAMINANT_MARGIN);
    let phase = state.rng.random_range(0.0..std::f32::consts::TAU);
    let id = state.next_entity_id();
    state.contaminants.push(Contaminant::new(id, pos, phase));
}

/// Populate a fresh board. Obstacles may overlap each other.
pub fn initialize(state: &mut GameState) {
    for _ in 0..CLEAN_WATER_COUNT {
        spawn_collectible(state, CollectibleKind::CleanWater);
    }
    for _ in 0..TOOL_PACK_COUNT {
        spawn_collectible(state, CollectibleKind::ToolPack);
    }
    for _ in 0..OBSTACLE_COUNT {
        let pos = random_point(&mut state.rng, &state.playfield, OBSTACLE_MARGIN);
        state.obstacles.push(Obstacle::new(pos));
    }
    for _ in 0..CONTAMINANT_COUNT {
        spawn_contaminant(state);
    }
}

/// Throw away every contaminant and place a fresh set
pub fn regenerate_contaminants(state: &mut GameState) {
    state.contaminants.clear();
    for _ in 0..CONTAMINANT_COUNT {
        spawn_contaminant(state);
    }
}

/// One run of the periodic spawner.
///
/// Does nothing unless the session is running; effects are dropped, not queued.
pub fn periodic_tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    if state.rng.random_bool(state.tuning.water_spawn_chance)
        && state.count_kind(CollectibleKind::CleanWater) < state.tuning.max_clean_water
    {
        let id = spawn_collectible(state, CollectibleKind::CleanWater);
        log::debug!("Spawner added clean water {}", id);
        events.push(GameEvent::CollectibleSpawned { id });
    }

    if state.rng.random_bool(state.tuning.drift_chance) {
        let scale = state.tuning.drift_scale;
        let margin = state.tuning.drift_margin;
        let max = Vec2::new(state.playfield.width - margin, state.playfield.height - margin);
        for contaminant in state.contaminants.iter_mut().filter(|c| !c.is_collected()) {
            let offset = Vec2::new(
                (state.rng.random::<f32>() - 0.5) * scale,
                (state.rng.random::<f32>() - 0.5) * scale,
            );
            contaminant.pos = (contaminant.pos + offset).clamp(Vec2::splat(margin), max);
        }
        log::debug!("Spawner drifted contaminants");
        events.push(GameEvent::ContaminantsDrifted);
    }

    events
}
