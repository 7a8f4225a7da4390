//! Run state and core simulation types
//!
//! Everything that must survive Save/Continue lives in `RunState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timer::Countdown;
use crate::consts::*;

/// Enemy creature types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Common, slow
    Rabbit,
    /// Common, fastest
    Bird,
    /// Common, fast
    Squirrel,
    /// Rare, worth double and may cause sickness on contact
    Pig,
}

impl EnemyKind {
    /// The kinds chosen uniformly when the rare roll fails
    pub const COMMON: [EnemyKind; 3] = [EnemyKind::Rabbit, EnemyKind::Bird, EnemyKind::Squirrel];

    /// Speed at level 1 (pixels per reference frame)
    pub fn base_speed(self) -> f32 {
        match self {
            EnemyKind::Rabbit => 1.5,
            EnemyKind::Bird => 4.0,
            EnemyKind::Squirrel => 3.0,
            EnemyKind::Pig => 2.0,
        }
    }

    pub fn is_rare(self) -> bool {
        self == EnemyKind::Pig
    }

    /// Points awarded on a normal catch (before the player multiplier)
    pub fn points(self) -> u64 {
        if self.is_rare() {
            RARE_ENEMY_POINTS
        } else {
            COMMON_ENEMY_POINTS
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Rabbit => "rabbit",
            EnemyKind::Bird => "bird",
            EnemyKind::Squirrel => "squirrel",
            EnemyKind::Pig => "pig",
        }
    }
}

/// A wandering enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Speed magnitude used when fleeing the player
    pub speed: f32,
    /// Stationary enemies skip steering and drift
    #[serde(default = "default_moves")]
    pub moves: bool,
}

fn default_moves() -> bool {
    true
}

impl Enemy {
    /// Enemy speed for `kind` at `level`
    pub fn speed_for(kind: EnemyKind, level: u32) -> f32 {
        kind.base_speed() + level.saturating_sub(1) as f32 * ENEMY_SPEED_PER_LEVEL
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Minor currency
    Bone,
    /// Major currency, also grants a speed boost
    Treat,
}

/// A time-limited pickup dropped by a caught enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub lifetime: Countdown,
}

/// The player-controlled dog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Current base speed (raised while a treat power-up is active)
    pub speed: f32,
    pub multiplier: u32,
    pub sprint_duration: Countdown,
    pub sprint_cooldown: Countdown,
    pub sickness: Countdown,
    /// Angle of the orbit markers drawn while sick (radians)
    pub orbit_angle: f32,
    pub power_up: Countdown,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            speed: PLAYER_BASE_SPEED,
            multiplier: 1,
            sprint_duration: Countdown::ZERO,
            sprint_cooldown: Countdown::ZERO,
            sickness: Countdown::ZERO,
            orbit_angle: 0.0,
            power_up: Countdown::ZERO,
        }
    }
}

impl Player {
    pub fn is_sprinting(&self) -> bool {
        self.sprint_duration.is_active()
    }

    pub fn is_sick(&self) -> bool {
        self.sickness.is_active()
    }

    /// Sprint can start this frame
    pub fn sprint_ready(&self) -> bool {
        !self.sprint_cooldown.is_active() && !self.sprint_duration.is_active()
    }

    /// Sprint gauge fill in [0, 1] (1 = ready)
    pub fn sprint_gauge(&self) -> f32 {
        1.0 - self.sprint_cooldown.fraction_of(MAX_SPRINT_COOLDOWN_MS)
    }
}

/// Complete run state (serializable unit of persistence)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Score toward the next level (resets on level-up)
    pub score: u64,
    pub bones: u32,
    pub treats: u32,
    /// Current level (1-based)
    pub level: u32,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Active collectibles (sorted by id)
    pub collectibles: Vec<Collectible>,
    pub paused: bool,
    /// Visual-only banner timer after a level-up
    pub level_up_flash: Countdown,
    /// Next entity ID
    #[serde(default = "first_entity_id")]
    next_id: u32,
}

fn first_entity_id() -> u32 {
    1
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    /// Fresh level-1 run with the dog centred in the arena
    pub fn new() -> Self {
        Self {
            score: 0,
            bones: 0,
            treats: 0,
            level: 1,
            player: Player::default(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            paused: false,
            level_up_flash: Countdown::ZERO,
            next_id: first_entity_id(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Score needed to leave the current level
    pub fn level_threshold(&self) -> u64 {
        crate::level_threshold(self.level)
    }

    /// Radius inside which enemies flee the player
    pub fn avoidance_radius(&self) -> f32 {
        AVOIDANCE_RADIUS + self.level.saturating_sub(1) as f32 * AVOIDANCE_PER_LEVEL
    }

    pub fn enemy_population_full(&self) -> bool {
        self.enemies.len() >= MAX_ENEMIES
    }

    /// Restore sorted iteration order (after loading a hand-edited save)
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.collectibles.sort_by_key(|c| c.id);
        let max_id = self
            .enemies
            .iter()
            .map(|e| e.id)
            .chain(self.collectibles.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_id.wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = RunState::new();
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.speed, PLAYER_BASE_SPEED);
        assert!(state.player.sprint_ready());
        assert!(!state.paused);
    }

    #[test]
    fn test_enemy_speed_scales_with_level() {
        assert_eq!(Enemy::speed_for(EnemyKind::Rabbit, 1), 1.5);
        assert!((Enemy::speed_for(EnemyKind::Pig, 6) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_avoidance_radius_grows() {
        let mut state = RunState::new();
        assert_eq!(state.avoidance_radius(), 100.0);
        state.level = 3;
        assert_eq!(state.avoidance_radius(), 110.0);
    }

    #[test]
    fn test_normalize_order_bumps_next_id() {
        let mut state = RunState::new();
        for id in [7, 3] {
            state.enemies.push(Enemy {
                id,
                kind: EnemyKind::Bird,
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                speed: 4.0,
                moves: true,
            });
        }
        state.normalize_order();
        assert_eq!(state.enemies[0].id, 3);
        assert_eq!(state.next_entity_id(), 8);
    }

    #[test]
    fn test_sprint_gauge() {
        let mut player = Player::default();
        assert_eq!(player.sprint_gauge(), 1.0);
        player.sprint_cooldown.set(MAX_SPRINT_COOLDOWN_MS);
        assert_eq!(player.sprint_gauge(), 0.0);
    }
}
