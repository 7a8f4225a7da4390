//! Per-frame simulation step
//!
//! Order within a frame: pause edge, player movement (sprint/sickness
//! timers), enemy steering, spawning, collectible pass, enemy pass,
//! level-up check, remaining effect timers.

use super::collision::{GameEvent, check_level_up, update_collectibles, update_enemy_contacts};
use super::dice::Dice;
use super::movement::{move_enemies, move_player};
use super::spawn::try_spawn_enemy;
use super::state::RunState;
use crate::consts::*;
use crate::settings::Pacing;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Sprint modifier held
    pub sprint: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
}

/// Advance the run by one frame of `dt_ms` milliseconds.
///
/// A paused run is left untouched unless the input toggles pause off.
pub fn tick(
    state: &mut RunState,
    input: &FrameInput,
    dt_ms: f32,
    pacing: Pacing,
    dice: &mut impl Dice,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.paused = !state.paused;
        if state.paused {
            log::info!("Paused");
            return events;
        }
        log::info!("Resumed");
    }

    if state.paused {
        return events;
    }

    let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
    let motion_scale = pacing.motion_scale(dt_ms);

    move_player(state, input, dt_ms, motion_scale);
    move_enemies(state, motion_scale);

    if let Some(kind) = try_spawn_enemy(state, dice, pacing.spawn_chance(dt_ms)) {
        events.push(GameEvent::EnemySpawned(kind));
    }

    update_collectibles(state, dt_ms, &mut events);
    update_enemy_contacts(state, dice, &mut events);
    events.extend(check_level_up(state));

    update_effect_timers(state, dt_ms, &mut events);

    events
}

/// Power-up, level-up flash and orbit marker timers
fn update_effect_timers(state: &mut RunState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;

    if player.power_up.tick(dt_ms) {
        player.speed = PLAYER_BASE_SPEED;
        events.push(GameEvent::PowerUpExpired);
    }

    state.level_up_flash.tick(dt_ms);

    if player.is_sick() {
        player.orbit_angle = (player.orbit_angle + dt_ms * SICKNESS_ORBIT_SPEED) % std::f32::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::{ScriptedDice, SimRng};
    use crate::sim::state::{Enemy, EnemyKind};
    use glam::Vec2;

    fn rabbit_on_player(state: &RunState) -> Enemy {
        Enemy {
            id: 500,
            kind: EnemyKind::Rabbit,
            pos: state.player.pos,
            vel: Vec2::ZERO,
            speed: 1.5,
            moves: false,
        }
    }

    #[test]
    fn test_tick_pause() {
        let mut state = RunState::new();
        let mut rng = SimRng::new(12345);
        let pause = FrameInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, 16.0, Pacing::PerFrame, &mut rng);
        assert!(state.paused);

        let frozen = state.clone();
        let held = FrameInput {
            right: true,
            sprint: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut state, &held, 16.0, Pacing::PerFrame, &mut rng);
        }
        assert_eq!(state, frozen);

        // Unpause and the same frame runs
        let resume = FrameInput {
            pause: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &resume, 16.0, Pacing::PerFrame, &mut rng);
        assert!(!state.paused);
        assert_eq!(state.player.pos.x, 405.0);
    }

    #[test]
    fn test_common_collision_scores() {
        let mut state = RunState::new();
        let rabbit = rabbit_on_player(&state);
        state.enemies.push(rabbit);
        let events = tick(&mut state, &FrameInput::default(), 16.0, Pacing::PerFrame, &mut ScriptedDice::never());
        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert!(events.contains(&GameEvent::EnemyCaught {
            kind: EnemyKind::Rabbit,
            points: 10
        }));
    }

    #[test]
    fn test_collision_crosses_threshold() {
        let mut state = RunState::new();
        state.score = 490;
        let rabbit = rabbit_on_player(&state);
        state.enemies.push(rabbit);
        let events = tick(&mut state, &FrameInput::default(), 16.0, Pacing::PerFrame, &mut ScriptedDice::never());
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        // Flash started and already ticked once this frame
        assert_eq!(state.level_up_flash.remaining(), LEVEL_UP_FLASH_MS - 16.0);
    }

    #[test]
    fn test_power_up_expiry_resets_speed() {
        let mut state = RunState::new();
        state.player.speed = PLAYER_BOOSTED_SPEED;
        state.player.power_up.set(POWER_UP_DURATION_MS);
        let mut dice = ScriptedDice::never();
        for _ in 0..49 {
            tick(&mut state, &FrameInput::default(), 100.0, Pacing::PerFrame, &mut dice);
        }
        assert_eq!(state.player.speed, PLAYER_BOOSTED_SPEED);
        let events = tick(&mut state, &FrameInput::default(), 100.0, Pacing::PerFrame, &mut dice);
        assert_eq!(state.player.speed, PLAYER_BASE_SPEED);
        assert!(events.contains(&GameEvent::PowerUpExpired));
    }

    #[test]
    fn test_orbit_angle_advances_only_while_sick() {
        let mut state = RunState::new();
        let mut dice = ScriptedDice::never();
        tick(&mut state, &FrameInput::default(), 100.0, Pacing::PerFrame, &mut dice);
        assert_eq!(state.player.orbit_angle, 0.0);

        state.player.sickness.set(SICKNESS_DURATION_MS);
        tick(&mut state, &FrameInput::default(), 100.0, Pacing::PerFrame, &mut dice);
        assert!((state.player.orbit_angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_event_reported() {
        let mut state = RunState::new();
        // spawn roll, rare roll -> pig, x, y, dx, dy
        let mut dice = ScriptedDice::new([0.0, 0.0, 0.0, 0.0, 0.5, 0.5]);
        let events = tick(&mut state, &FrameInput::default(), 16.0, Pacing::PerFrame, &mut dice);
        assert_eq!(events, vec![GameEvent::EnemySpawned(EnemyKind::Pig)]);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = RunState::new();
        let mut state2 = RunState::new();
        let mut rng1 = SimRng::new(99999);
        let mut rng2 = SimRng::new(99999);

        let inputs = [
            FrameInput {
                up: true,
                ..Default::default()
            },
            FrameInput {
                sprint: true,
                right: true,
                ..Default::default()
            },
            FrameInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, 16.0, Pacing::PerFrame, &mut rng1);
            tick(&mut state2, input, 16.0, Pacing::PerFrame, &mut rng2);
        }

        assert_eq!(state1, state2);
    }
}
