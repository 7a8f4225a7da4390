//! Versioned save envelope
//!
//! The slot holds `{ "version": N, "state": RunState }`. Anything that does
//! not parse, carries an unknown version, or breaks a run invariant is
//! rejected as corrupt.

use serde::{Deserialize, Serialize};

use super::SaveError;
use crate::consts::*;
use crate::in_arena;
use crate::sim::{Countdown, RunState};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub state: RunState,
}

/// Serialize a run into the envelope JSON
pub fn encode(state: &RunState) -> Result<String, SaveError> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        state: state.clone(),
    };
    serde_json::to_string(&envelope).map_err(|e| SaveError::Storage(e.to_string()))
}

/// Parse and validate envelope JSON
pub fn decode(json: &str) -> Result<RunState, SaveError> {
    let envelope: SaveEnvelope = serde_json::from_str(json)?;
    if envelope.version != SAVE_VERSION {
        return Err(SaveError::CorruptSave(format!(
            "unsupported save version {}",
            envelope.version
        )));
    }
    let mut state = envelope.state;
    validate(&state)?;
    state.normalize_order();
    Ok(state)
}

/// Reject states no run could have produced
fn validate(state: &RunState) -> Result<(), SaveError> {
    if state.level == 0 || state.level == u32::MAX {
        return Err(SaveError::CorruptSave(format!("level {} out of range", state.level)));
    }
    // Level-up resets the score on the frame it reaches the threshold
    if state.score >= state.level_threshold() {
        return Err(SaveError::CorruptSave(format!(
            "score {} already clears level {}",
            state.score, state.level
        )));
    }
    if !in_arena(state.player.pos) {
        return Err(SaveError::CorruptSave("player outside arena".into()));
    }
    if state.enemies.len() > MAX_ENEMIES {
        return Err(SaveError::CorruptSave(format!(
            "{} enemies exceeds the population cap",
            state.enemies.len()
        )));
    }
    let entity_outside = state.enemies.iter().any(|e| !in_arena(e.pos))
        || state.collectibles.iter().any(|c| !in_arena(c.pos));
    if entity_outside {
        return Err(SaveError::CorruptSave("entity outside arena".into()));
    }

    let player = &state.player;
    let timers = [
        ("sprint", player.sprint_duration, MAX_SPRINT_DURATION_MS),
        ("sprint cooldown", player.sprint_cooldown, MAX_SPRINT_COOLDOWN_MS),
        ("sickness", player.sickness, SICKNESS_DURATION_MS),
        ("power-up", player.power_up, POWER_UP_DURATION_MS),
        ("level-up flash", state.level_up_flash, LEVEL_UP_FLASH_MS),
    ];
    if let Some((name, _, _)) = timers.iter().find(|(_, t, max)| !timer_within(*t, *max)) {
        return Err(SaveError::CorruptSave(format!("{name} timer out of range")));
    }
    // A live collectible always has time left; an expired one is removed the
    // frame it hits zero
    let stale = state
        .collectibles
        .iter()
        .any(|c| !c.lifetime.is_active() || !timer_within(c.lifetime, COLLECTIBLE_LIFETIME_MS));
    if stale {
        return Err(SaveError::CorruptSave("collectible lifetime out of range".into()));
    }
    Ok(())
}

fn timer_within(timer: Countdown, max_ms: f32) -> bool {
    let ms = timer.remaining();
    (0.0..=max_ms).contains(&ms)
}
