//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (persistent key state, read once per frame)
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::InputState;
