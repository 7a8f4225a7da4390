//! Countdown timers driven by frame deltas
//!
//! Every timed effect in the game (sprint, sickness, power-ups, the level-up
//! flash, collectible lifetimes) is a `Countdown` in milliseconds.

use serde::{Deserialize, Serialize};

/// Remaining time in milliseconds, never negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Countdown(f32);

impl Countdown {
    pub const ZERO: Self = Self(0.0);

    /// Start a countdown at `ms` (negative values clamp to zero)
    pub fn new(ms: f32) -> Self {
        Self(ms.max(0.0))
    }

    pub fn remaining(self) -> f32 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 > 0.0
    }

    /// Restart at `ms`, overriding whatever was left
    pub fn set(&mut self, ms: f32) {
        *self = Self::new(ms);
    }

    pub fn clear(&mut self) {
        self.0 = 0.0;
    }

    /// Advance by `elapsed_ms`.
    ///
    /// Returns `true` only on the call that takes an active countdown to zero.
    pub fn tick(&mut self, elapsed_ms: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.0 = (self.0 - elapsed_ms.max(0.0)).max(0.0);
        self.0 == 0.0
    }

    /// Fraction of `total` still remaining, in [0, 1]
    pub fn fraction_of(self, total: f32) -> f32 {
        if total <= 0.0 {
            0.0
        } else {
            (self.0 / total).clamp(0.0, 1.0)
        }
    }
}
