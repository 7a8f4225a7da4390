//! Simulation module
//!
//! All gameplay logic lives here:
//! - Pure step functions over an explicitly passed `RunState`
//! - Randomness only through a `Dice`
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dice;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::GameEvent;
pub use dice::{Dice, ScriptedDice, SimRng};
pub use state::{Collectible, CollectibleKind, Enemy, EnemyKind, Player, RunState};
pub use tick::{FrameInput, tick};
pub use timer::Countdown;
