//! Per-frame simulation tick
//!
//! Movement, then collisions, then the completion check. One call per host
//! frame; the periodic spawner is driven separately (see `spawn`).

use super::collision::{check_completion, resolve_collisions};
use super::movement::advance;
use super::state::{GameEvent, GamePhase, GameState};

/// Directional inputs held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the session by one frame and return what happened.
///
/// Only `Running` sessions change; every other phase is a no-op.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if state.phase != GamePhase::Running {
        return Vec::new();
    }

    state.time_ticks += 1;

    advance(&mut state.avatar, input, &state.obstacles, &state.playfield);

    let pulse_speed = state.tuning.pulse_speed;
    for contaminant in state.contaminants.iter_mut().filter(|c| !c.is_collected()) {
        contaminant.pulse_phase = (contaminant.pulse_phase + pulse_speed) % std::f32::consts::TAU;
    }

    let mut events = resolve_collisions(state);

    if state.phase == GamePhase::Running && check_completion(&state.collectibles) {
        state.phase = GamePhase::Victory;
        log::info!(
            "Mission complete with score {} after {} ticks",
            state.display_score(),
            state.time_ticks
        );
        events.push(GameEvent::Victory {
            final_score: state.display_score(),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Collectible, CollectibleKind, Contaminant};
    use crate::sim::spawn::periodic_tick;
    use crate::tuning::{Playfield, Tuning};
    use glam::Vec2;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Playfield::default(), Tuning::default());
        state.start();
        state
    }

    /// Park every entity far from the avatar so ticks are quiet
    fn quiet_state() -> GameState {
        let mut state = running_state(11);
        state.obstacles.clear();
        for c in &mut state.collectibles {
            c.pos = Vec2::new(20.0, 20.0);
        }
        for c in &mut state.contaminants {
            c.pos = Vec2::new(580.0, 380.0);
        }
        state
    }

    #[test]
    fn test_initializing_does_not_tick() {
        let mut state = GameState::new(5, Playfield::default(), Tuning::default());
        let before = state.avatar.pos;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(state.avatar.pos, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_tick_moves_avatar() {
        let mut state = quiet_state();
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.avatar.pos, Vec2::new(300.0, 202.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = quiet_state();
        state.pause();
        let pos = state.avatar.pos;
        let mouth = state.avatar.mouth_open;
        let phase = state.contaminants[0].pulse_phase;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(tick(&mut state, &input).is_empty());
        }
        assert_eq!(state.avatar.pos, pos);
        assert_eq!(state.avatar.mouth_open, mouth);
        assert_eq!(state.contaminants[0].pulse_phase, phase);

        state.resume();
        tick(&mut state, &input);
        assert_eq!(state.avatar.pos, pos - Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_pulse_phase_advances() {
        let mut state = quiet_state();
        state.contaminants[0].pulse_phase = 1.0;
        tick(&mut state, &TickInput::default());
        assert!((state.contaminants[0].pulse_phase - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_victory_when_all_collected() {
        let mut state = running_state(21);
        state.obstacles.clear();
        for c in &mut state.collectibles {
            c.collect();
        }
        // Three contaminants still out there, away from the avatar
        state.contaminants.truncate(3);
        for c in &mut state.contaminants {
            c.pos = Vec2::new(580.0, 380.0);
        }
        state.score = 300;

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(events, vec![GameEvent::Victory { final_score: 300 }]);
        assert!(state.contaminants.iter().all(|c| !c.is_collected()));
    }

    #[test]
    fn test_last_collectible_triggers_victory() {
        let mut state = quiet_state();
        for c in state.collectibles.iter_mut().skip(1) {
            c.collect();
        }
        let center = state.avatar.pos;
        state.collectibles[0].pos = center;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(matches!(events.last(), Some(GameEvent::Victory { .. })));
    }

    #[test]
    fn test_no_victory_while_items_remain() {
        let mut state = quiet_state();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_freezes_session() {
        let mut state = quiet_state();
        state.lives = 1;
        let center = state.avatar.pos;
        let id = state.next_entity_id();
        state.contaminants.push(Contaminant::new(id, center, 0.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::LivesChanged { remaining: 0 }));

        // Subsequent ticks and spawner runs change nothing
        let score = state.score;
        let pos = state.avatar.pos;
        let ticks = state.time_ticks;
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..20 {
            assert!(tick(&mut state, &input).is_empty());
            assert!(periodic_tick(&mut state).is_empty());
        }
        assert_eq!(state.score, score);
        assert_eq!(state.avatar.pos, pos);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_game_over_wins_over_victory() {
        let mut state = quiet_state();
        state.lives = 1;
        for c in state.collectibles.iter_mut().skip(1) {
            c.collect();
        }
        let center = state.avatar.pos;
        state.collectibles[0].pos = center;
        let id = state.next_entity_id();
        state.contaminants.push(Contaminant::new(id, center, 0.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Victory { .. })));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = quiet_state();
        state.lives = 1;
        let center = state.avatar.pos;
        let id = state.next_entity_id();
        state.collectibles.push(Collectible::new(id, CollectibleKind::CleanWater, center));
        let id = state.next_entity_id();
        state.contaminants.push(Contaminant::new(id, center, 0.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        state.restart();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.collectibles.iter().all(|c| !c.is_collected()));
        assert!(state.contaminants.iter().all(|c| !c.is_collected()));
        assert_eq!(state.contaminants.len(), crate::consts::CONTAMINANT_COUNT);
    }

    #[test]
    fn test_collected_flags_monotonic_within_session() {
        let mut state = running_state(77);
        let mut seen = vec![false; state.collectibles.len()];
        // Sweep the board in a serpentine pattern
        let pattern = [
            TickInput { right: true, ..Default::default() },
            TickInput { down: true, ..Default::default() },
            TickInput { left: true, ..Default::default() },
            TickInput { up: true, ..Default::default() },
        ];
        for i in 0..2000 {
            tick(&mut state, &pattern[(i / 120) % pattern.len()]);
            for (flag, c) in seen.iter_mut().zip(&state.collectibles) {
                if *flag {
                    assert!(c.is_collected());
                }
                *flag = c.is_collected();
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = running_state(99999);
        let mut state2 = running_state(99999);

        let inputs = [
            TickInput { right: true, ..Default::default() },
            TickInput { up: true, right: true, ..Default::default() },
            TickInput::default(),
            TickInput { down: true, left: true, ..Default::default() },
        ];

        for (i, input) in inputs.iter().cycle().take(400).enumerate() {
            let e1 = tick(&mut state1, input);
            let e2 = tick(&mut state2, input);
            assert_eq!(e1, e2);
            if i % 180 == 0 {
                assert_eq!(periodic_tick(&mut state1), periodic_tick(&mut state2));
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.avatar.pos, state2.avatar.pos);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.collectibles.len(), state2.collectibles.len());
    }
}
