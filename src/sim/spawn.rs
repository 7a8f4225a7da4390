//! Enemy and collectible spawning
//!
//! Enemies appear at random arena positions with a weighted type choice;
//! collectibles drop where an enemy was caught.

use glam::Vec2;

use super::dice::Dice;
use super::state::{Collectible, CollectibleKind, Enemy, EnemyKind, RunState};
use super::timer::Countdown;
use crate::consts::*;

/// Two-stage weighted choice: rare first, then uniform among the commons
pub fn choose_enemy_kind(dice: &mut impl Dice) -> EnemyKind {
    if dice.chance(RARE_ENEMY_CHANCE) {
        EnemyKind::Pig
    } else {
        EnemyKind::COMMON[dice.pick(EnemyKind::COMMON.len())]
    }
}

/// Roll the per-frame spawn and add one enemy if it succeeds.
///
/// Returns the kind spawned, if any. The population cap is checked before
/// any roll so a full arena consumes no randomness.
pub fn try_spawn_enemy(state: &mut RunState, dice: &mut impl Dice, chance: f32) -> Option<EnemyKind> {
    if state.enemy_population_full() || !dice.chance(chance) {
        return None;
    }
    Some(spawn_enemy(state, dice))
}

/// Unconditionally spawn an enemy (caller checks the cap)
pub fn spawn_enemy(state: &mut RunState, dice: &mut impl Dice) -> EnemyKind {
    let kind = choose_enemy_kind(dice);
    let pos = Vec2::new(dice.between(0.0, ARENA_WIDTH), dice.between(0.0, ARENA_HEIGHT));
    let vel = Vec2::new(dice.between(-1.0, 1.0), dice.between(-1.0, 1.0));
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        kind,
        pos,
        vel,
        speed: Enemy::speed_for(kind, state.level),
        moves: true,
    });
    log::debug!("Spawned {} #{} at ({:.0}, {:.0})", kind.as_str(), id, pos.x, pos.y);
    kind
}

/// Drop a collectible with the standard lifetime
pub fn spawn_collectible(state: &mut RunState, pos: Vec2, kind: CollectibleKind) {
    let id = state.next_entity_id();
    state.collectibles.push(Collectible {
        id,
        kind,
        pos: crate::clamp_to_arena(pos),
        lifetime: Countdown::new(COLLECTIBLE_LIFETIME_MS),
    });
}

/// Independent bone and treat rolls for a caught enemy (both may drop)
pub fn drop_loot(state: &mut RunState, pos: Vec2, dice: &mut impl Dice) {
    if dice.chance(BONE_DROP_CHANCE) {
        spawn_collectible(state, pos, CollectibleKind::Bone);
    }
    if dice.chance(TREAT_DROP_CHANCE) {
        spawn_collectible(state, pos, CollectibleKind::Treat);
    }
}
