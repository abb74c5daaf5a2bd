//! Proximity collision detection and resolution
//!
//! Round entities collide when their centres are closer than the sum of
//! their radii. Obstacles are tested against the avatar's bounding box.

use glam::Vec2;

use super::entity::{Collectible, CollectibleKind, Obstacle};
use super::state::{GameEvent, GamePhase, GameState, ScoreCategory};

/// Strict circle-circle overlap (touching does not count)
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Does the square bounding box of a circle overlap the rectangle?
#[inline]
pub fn circle_bounds_overlap_rect(center: Vec2, radius: f32, rect: &Obstacle) -> bool {
    let max = rect.max();
    center.x + radius > rect.pos.x
        && center.x - radius < max.x
        && center.y + radius > rect.pos.y
        && center.y - radius < max.y
}

/// Apply every avatar hit this tick and return the resulting events.
///
/// Order: clean water, contaminants, tool packs. All hits are applied; if a
/// contaminant took the last life the session moves to `GameOver` afterwards,
/// and the `GameOver` event comes last with the settled score.
pub fn resolve_collisions(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let avatar_pos = state.avatar.pos;
    let avatar_radius = state.avatar.radius;

    let mut hits: Vec<(u32, CollectibleKind)> = Vec::new();
    collect_hits(state, CollectibleKind::CleanWater, avatar_pos, avatar_radius, &mut hits);
    apply_collectible_hits(state, &hits, &mut events);
    hits.clear();

    let mut out_of_lives = false;
    let mut contaminant_hits = Vec::new();
    for contaminant in state.contaminants.iter_mut() {
        if !contaminant.is_collected()
            && circles_overlap(avatar_pos, avatar_radius, contaminant.pos, contaminant.radius)
        {
            contaminant.collect();
            contaminant_hits.push(contaminant.id);
        }
    }
    for id in contaminant_hits {
        let delta = -state.tuning.contaminant_penalty;
        state.add_score(delta);
        events.push(GameEvent::Scored {
            id,
            category: ScoreCategory::Error,
            delta,
        });
        out_of_lives |= state.lose_life();
        events.push(GameEvent::LivesChanged {
            remaining: state.lives,
        });
    }

    collect_hits(state, CollectibleKind::ToolPack, avatar_pos, avatar_radius, &mut hits);
    apply_collectible_hits(state, &hits, &mut events);

    if out_of_lives && state.phase != GamePhase::GameOver {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.display_score());
        events.push(GameEvent::GameOver {
            final_score: state.display_score(),
        });
    }

    events
}

fn collect_hits(
    state: &mut GameState,
    kind: CollectibleKind,
    avatar_pos: Vec2,
    avatar_radius: f32,
    hits: &mut Vec<(u32, CollectibleKind)>,
) {
    for collectible in state.collectibles.iter_mut().filter(|c| c.kind == kind) {
        if !collectible.is_collected()
            && circles_overlap(avatar_pos, avatar_radius, collectible.pos, collectible.radius)
        {
            collectible.collect();
            hits.push((collectible.id, kind));
        }
    }
}

fn apply_collectible_hits(
    state: &mut GameState,
    hits: &[(u32, CollectibleKind)],
    events: &mut Vec<GameEvent>,
) {
    for &(id, kind) in hits {
        let (category, delta) = match kind {
            CollectibleKind::CleanWater => (ScoreCategory::Collect, state.tuning.clean_water_points),
            CollectibleKind::ToolPack => (ScoreCategory::Complete, state.tuning.tool_pack_points),
        };
        state.add_score(delta);
        events.push(GameEvent::Scored {
            id,
            category,
            delta,
        });
    }
}

/// True once every clean water droplet and tool pack is collected.
/// Contaminants do not matter.
pub fn check_completion(collectibles: &[Collectible]) -> bool {
    collectibles.iter().all(|c| c.is_collected())
}
