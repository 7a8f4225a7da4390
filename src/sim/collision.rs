//! Proximity collisions, scoring and level progression
//!
//! Both passes use one fixed contact radius around the player; there are no
//! shapes, only centre-to-centre distance.

use glam::Vec2;

use super::dice::Dice;
use super::spawn::drop_loot;
use super::state::{CollectibleKind, Enemy, EnemyKind, RunState};
use crate::consts::*;

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnemySpawned(EnemyKind),
    /// Enemy caught and scored
    EnemyCaught { kind: EnemyKind, points: u64 },
    /// Rare enemy made the dog sick instead of scoring
    SicknessInflicted,
    Collected(CollectibleKind),
    CollectibleExpired(CollectibleKind),
    PowerUpExpired,
    LevelUp { level: u32 },
}

/// Player and target are close enough to touch
#[inline]
pub fn in_contact(player: Vec2, target: Vec2) -> bool {
    player.distance_squared(target) < CONTACT_RADIUS * CONTACT_RADIUS
}

/// Age collectibles and pick up any the player is touching.
///
/// Lifetime is checked first, so an item expiring this frame cannot be
/// collected on the same frame.
pub fn update_collectibles(state: &mut RunState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    let player_pos = state.player.pos;
    let mut collectibles = std::mem::take(&mut state.collectibles);

    collectibles.retain_mut(|c| {
        if c.lifetime.tick(dt_ms) {
            events.push(GameEvent::CollectibleExpired(c.kind));
            return false;
        }
        if !in_contact(player_pos, c.pos) {
            return true;
        }
        match c.kind {
            CollectibleKind::Bone => state.bones = state.bones.saturating_add(1),
            CollectibleKind::Treat => {
                state.treats = state.treats.saturating_add(1);
                state.player.speed = PLAYER_BOOSTED_SPEED;
                state.player.power_up.set(POWER_UP_DURATION_MS);
            }
        }
        events.push(GameEvent::Collected(c.kind));
        false
    });

    state.collectibles = collectibles;
}

/// Outcome of the player touching one enemy
pub fn resolve_enemy_contact(
    state: &mut RunState,
    enemy: &Enemy,
    dice: &mut impl Dice,
) -> GameEvent {
    if enemy.kind.is_rare() && dice.chance(SICKNESS_CHANCE) {
        state.player.sickness.set(SICKNESS_DURATION_MS);
        log::info!("Caught a {} and got sick", enemy.kind.as_str());
        return GameEvent::SicknessInflicted;
    }

    let points = enemy.kind.points() * u64::from(state.player.multiplier);
    state.score = state.score.saturating_add(points);
    drop_loot(state, enemy.pos, dice);
    GameEvent::EnemyCaught {
        kind: enemy.kind,
        points,
    }
}

/// Resolve every enemy touching the player; touched enemies are removed
/// whatever the outcome.
pub fn update_enemy_contacts(state: &mut RunState, dice: &mut impl Dice, events: &mut Vec<GameEvent>) {
    let player_pos = state.player.pos;
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for enemy in enemies {
        if in_contact(player_pos, enemy.pos) {
            let event = resolve_enemy_contact(state, &enemy, dice);
            events.push(event);
        } else {
            survivors.push(enemy);
        }
    }

    state.enemies = survivors;
}

/// Advance to the next level if the threshold is reached.
///
/// At most one level per call: score resets to zero so a single crossing
/// can never count twice.
pub fn check_level_up(state: &mut RunState) -> Option<GameEvent> {
    if state.score < state.level_threshold() {
        return None;
    }
    state.level = state.level.saturating_add(1);
    state.score = 0;
    state.enemies.clear();
    state.level_up_flash.set(LEVEL_UP_FLASH_MS);
    log::info!("Level up! Now on level {}", state.level);
    Some(GameEvent::LevelUp { level: state.level })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::ScriptedDice;
    use crate::sim::spawn::spawn_collectible;

    fn enemy(kind: EnemyKind, pos: Vec2) -> Enemy {
        Enemy {
            id: 99,
            kind,
            pos,
            vel: Vec2::ZERO,
            speed: kind.base_speed(),
            moves: true,
        }
    }

    #[test]
    fn test_contact_radius_is_strict() {
        let p = Vec2::new(100.0, 100.0);
        assert!(in_contact(p, Vec2::new(139.9, 100.0)));
        assert!(!in_contact(p, Vec2::new(140.0, 100.0)));
    }

    #[test]
    fn test_common_enemy_scores_ten() {
        let mut state = RunState::new();
        state.enemies.push(enemy(EnemyKind::Rabbit, state.player.pos + Vec2::new(10.0, 0.0)));
        let mut events = Vec::new();
        update_enemy_contacts(&mut state, &mut ScriptedDice::never(), &mut events);
        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::EnemyCaught {
                kind: EnemyKind::Rabbit,
                points: 10
            }]
        );
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let mut state = RunState::new();
        state.score = u64::MAX - 5;
        state.enemies.push(enemy(EnemyKind::Rabbit, state.player.pos));
        let mut events = Vec::new();
        update_enemy_contacts(&mut state, &mut ScriptedDice::never(), &mut events);
        assert_eq!(state.score, u64::MAX);
        assert_eq!(check_level_up(&mut state), Some(GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_multiplier_applies() {
        let mut state = RunState::new();
        state.player.multiplier = 3;
        let pig = enemy(EnemyKind::Pig, state.player.pos);
        let event = resolve_enemy_contact(&mut state, &pig, &mut ScriptedDice::never());
        assert_eq!(
            event,
            GameEvent::EnemyCaught {
                kind: EnemyKind::Pig,
                points: 60
            }
        );
        assert_eq!(state.score, 60);
    }

    #[test]
    fn test_pig_sickness_skips_scoring() {
        let mut state = RunState::new();
        state.enemies.push(enemy(EnemyKind::Pig, state.player.pos));
        let mut dice = ScriptedDice::new([0.1]);
        let mut events = Vec::new();
        update_enemy_contacts(&mut state, &mut dice, &mut events);
        assert_eq!(state.player.sickness.remaining(), SICKNESS_DURATION_MS);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.collectibles.is_empty());
        assert_eq!(events, vec![GameEvent::SicknessInflicted]);
    }

    #[test]
    fn test_caught_enemy_drops_loot_at_its_position() {
        let mut state = RunState::new();
        let pos = state.player.pos + Vec2::new(0.0, 20.0);
        state.enemies.push(enemy(EnemyKind::Bird, pos));
        // bone roll passes, treat roll fails
        let mut dice = ScriptedDice::new([0.2, 0.5]);
        update_enemy_contacts(&mut state, &mut dice, &mut Vec::new());
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].kind, CollectibleKind::Bone);
        assert_eq!(state.collectibles[0].pos, pos);
    }

    #[test]
    fn test_distant_enemy_untouched() {
        let mut state = RunState::new();
        state.enemies.push(enemy(EnemyKind::Rabbit, Vec2::new(10.0, 10.0)));
        update_enemy_contacts(&mut state, &mut ScriptedDice::never(), &mut Vec::new());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_treat_boosts_speed() {
        let mut state = RunState::new();
        let pos = state.player.pos;
        spawn_collectible(&mut state, pos, CollectibleKind::Treat);
        let mut events = Vec::new();
        update_collectibles(&mut state, 16.0, &mut events);
        assert_eq!(state.treats, 1);
        assert_eq!(state.player.speed, PLAYER_BOOSTED_SPEED);
        assert_eq!(state.player.power_up.remaining(), POWER_UP_DURATION_MS);
        assert!(state.collectibles.is_empty());
        assert_eq!(events, vec![GameEvent::Collected(CollectibleKind::Treat)]);
    }

    #[test]
    fn test_bone_counts() {
        let mut state = RunState::new();
        let pos = state.player.pos + Vec2::new(-30.0, 0.0);
        spawn_collectible(&mut state, pos, CollectibleKind::Bone);
        update_collectibles(&mut state, 16.0, &mut Vec::new());
        assert_eq!(state.bones, 1);
        assert_eq!(state.player.speed, PLAYER_BASE_SPEED);
    }

    #[test]
    fn test_collectible_expires() {
        let mut state = RunState::new();
        spawn_collectible(&mut state, Vec2::new(10.0, 10.0), CollectibleKind::Bone);
        let mut events = Vec::new();
        update_collectibles(&mut state, 9_999.0, &mut events);
        assert_eq!(state.collectibles.len(), 1);
        update_collectibles(&mut state, 1.0, &mut events);
        assert!(state.collectibles.is_empty());
        assert_eq!(events, vec![GameEvent::CollectibleExpired(CollectibleKind::Bone)]);
        assert_eq!(state.bones, 0);
    }

    #[test]
    fn test_level_up_at_exact_threshold() {
        let mut state = RunState::new();
        state.score = 500;
        state.bones = 4;
        state.enemies.push(enemy(EnemyKind::Rabbit, Vec2::ZERO));
        assert_eq!(check_level_up(&mut state), Some(GameEvent::LevelUp { level: 2 }));
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.bones, 4);
        assert_eq!(state.level_up_flash.remaining(), LEVEL_UP_FLASH_MS);
        assert_eq!(check_level_up(&mut state), None);
    }

    #[test]
    fn test_below_threshold_no_level_up() {
        let mut state = RunState::new();
        state.score = 499;
        assert_eq!(check_level_up(&mut state), None);
        assert_eq!(state.level, 1);
    }
}
