//! Dog Hunter - A top-down arena chase game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, spawning, collisions, timers)
//! - `session`: Menu / running / paused state machine with auto-save
//! - `persistence`: Single-slot save/load with a versioned envelope
//! - `platform`: Browser input and storage glue
//! - `settings`: Player preferences (pacing, auto-save, HUD)
//! - `render`: Canvas 2D drawing (wasm only)

pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use persistence::{MemoryStore, SaveError, SaveStore};
pub use session::{Mode, Session};
pub use settings::{Pacing, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (logical canvas pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Nominal frame length the per-frame tuning was balanced for (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta fed to the simulation (tab switches, breakpoints)
    pub const MAX_FRAME_MS: f32 = 250.0;

    /// Player defaults (speeds are pixels per reference frame)
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_BOOSTED_SPEED: f32 = 8.0;
    pub const PLAYER_SICK_SPEED: f32 = 1.0;
    /// Sprint speed bonus per level
    pub const SPRINT_SPEED_PER_LEVEL: f32 = 2.0;
    pub const MAX_SPRINT_DURATION_MS: f32 = 2000.0;
    pub const MAX_SPRINT_COOLDOWN_MS: f32 = 5000.0;

    /// Sickness debuff
    pub const SICKNESS_DURATION_MS: f32 = 15_000.0;
    pub const SICKNESS_ORBIT_RADIUS: f32 = 50.0;
    /// Orbit marker angular speed (radians per ms)
    pub const SICKNESS_ORBIT_SPEED: f32 = 0.005;
    pub const SICKNESS_CHANCE: f32 = 1.0 / 3.0;

    /// Treat power-up
    pub const POWER_UP_DURATION_MS: f32 = 5000.0;

    /// Enemy population
    pub const MAX_ENEMIES: usize = 10;
    pub const ENEMY_SPAWN_CHANCE: f32 = 0.02;
    pub const RARE_ENEMY_CHANCE: f32 = 1.0 / 9.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.2;
    pub const AVOIDANCE_RADIUS: f32 = 100.0;
    pub const AVOIDANCE_PER_LEVEL: f32 = 5.0;

    /// Pickups and hits share one proximity radius
    pub const CONTACT_RADIUS: f32 = 40.0;
    pub const COLLECTIBLE_LIFETIME_MS: f32 = 10_000.0;
    pub const BONE_DROP_CHANCE: f32 = 0.3;
    pub const TREAT_DROP_CHANCE: f32 = 0.1;

    /// Scoring
    pub const COMMON_ENEMY_POINTS: u64 = 10;
    pub const RARE_ENEMY_POINTS: u64 = 20;
    pub const LEVEL_BASE_THRESHOLD: u64 = 500;
    pub const LEVEL_THRESHOLD_STEP: u64 = 50;
    pub const LEVEL_UP_FLASH_MS: f32 = 2000.0;
}

/// Clamp a point into the arena rectangle
#[inline]
pub fn clamp_to_arena(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, consts::ARENA_WIDTH),
        pos.y.clamp(0.0, consts::ARENA_HEIGHT),
    )
}

/// Whether a point lies inside the arena (edges included)
#[inline]
pub fn in_arena(pos: Vec2) -> bool {
    (0.0..=consts::ARENA_WIDTH).contains(&pos.x) && (0.0..=consts::ARENA_HEIGHT).contains(&pos.y)
}

/// Score needed to leave `level`
#[inline]
pub fn level_threshold(level: u32) -> u64 {
    consts::LEVEL_BASE_THRESHOLD + u64::from(level.saturating_sub(1)) * consts::LEVEL_THRESHOLD_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_threshold_strictly_increasing() {
        assert_eq!(level_threshold(1), 500);
        assert_eq!(level_threshold(2), 550);
        for level in 1..50 {
            assert!(level_threshold(level + 1) > level_threshold(level));
        }
    }

    #[test]
    fn test_clamp_to_arena() {
        let p = clamp_to_arena(Vec2::new(-10.0, 900.0));
        assert_eq!(p, Vec2::new(0.0, consts::ARENA_HEIGHT));
        assert!(in_arena(p));
        assert!(!in_arena(Vec2::new(801.0, 10.0)));
    }
}
