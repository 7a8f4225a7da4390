//! Player movement and enemy steering
//!
//! Motion is linear and clamped to the arena; there is no physics beyond that.
//! Speeds are pixels per reference frame, multiplied by a `motion_scale`
//! chosen by the pacing setting (1.0 for classic per-frame pacing).

use glam::Vec2;

use super::state::RunState;
use super::tick::FrameInput;
use crate::clamp_to_arena;
use crate::consts::*;

/// Unit direction from the four directional inputs (screen y grows downward).
///
/// Diagonals are normalized so they are no faster than straight moves.
pub fn input_direction(input: &FrameInput) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

/// Resolve this frame's speed, advancing the sickness and sprint timers.
///
/// Priority: sickness forces a crawl and freezes sprint; otherwise a sprint
/// may start (held modifier, cooldown finished, not already sprinting) and
/// runs for its full duration before a mandatory cooldown.
pub fn resolve_speed(state: &mut RunState, sprint_held: bool, dt_ms: f32) -> f32 {
    let level = state.level;
    let player = &mut state.player;

    if player.is_sick() {
        if player.sickness.tick(dt_ms) {
            log::info!("Sickness wore off");
        }
        return PLAYER_SICK_SPEED;
    }

    if sprint_held && player.sprint_ready() {
        player.sprint_duration.set(MAX_SPRINT_DURATION_MS);
    }

    if player.is_sprinting() {
        let speed = player.speed + level as f32 * SPRINT_SPEED_PER_LEVEL;
        if player.sprint_duration.tick(dt_ms) {
            player.sprint_cooldown.set(MAX_SPRINT_COOLDOWN_MS);
        }
        speed
    } else {
        player.sprint_cooldown.tick(dt_ms);
        player.speed
    }
}

/// Move the player for one frame
pub fn move_player(state: &mut RunState, input: &FrameInput, dt_ms: f32, motion_scale: f32) {
    let was_sick = state.player.is_sick();
    let speed = resolve_speed(state, input.sprint, dt_ms);

    let mut step = input_direction(input) * speed * motion_scale;
    if was_sick {
        // Sick dogs drift around their current spot instead of running off
        step = step.clamp_length_max(SICKNESS_ORBIT_RADIUS);
    }

    state.player.pos = clamp_to_arena(state.player.pos + step);
}

/// Steer and advance every mobile enemy.
///
/// Enemies inside the avoidance radius are pushed straight away from the
/// player at their own speed (recomputed every frame they stay inside);
/// others keep their stored velocity. Edges invert the offending velocity
/// component before the position is clamped back in.
pub fn move_enemies(state: &mut RunState, motion_scale: f32) {
    let player_pos = state.player.pos;
    let avoidance = state.avoidance_radius();

    for enemy in state.enemies.iter_mut().filter(|e| e.moves) {
        let away = enemy.pos - player_pos;
        let distance = away.length();
        if distance < avoidance && distance > 0.0 {
            enemy.vel = away / distance * enemy.speed;
        }

        enemy.pos += enemy.vel * motion_scale;

        if enemy.pos.x < 0.0 || enemy.pos.x > ARENA_WIDTH {
            enemy.vel.x = -enemy.vel.x;
        }
        if enemy.pos.y < 0.0 || enemy.pos.y > ARENA_HEIGHT {
            enemy.vel.y = -enemy.vel.y;
        }
        enemy.pos = clamp_to_arena(enemy.pos);
    }
}
