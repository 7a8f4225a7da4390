//! Keyboard state
//!
//! Listeners are registered once at startup and only update this struct;
//! the game loop reads it each frame via `take_frame`.

use crate::sim::FrameInput;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Sprint,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            "shift" => Some(Key::Sprint),
            "escape" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Held keys plus a latched pause edge
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: FrameInput,
    pause_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition.
    ///
    /// Presses of movement keys are dropped while `paused`; releases always
    /// land so nothing sticks down after resuming.
    pub fn apply_key(&mut self, key: Key, pressed: bool, paused: bool) {
        if key == Key::Pause {
            if pressed {
                self.pause_pressed = true;
            }
            return;
        }
        if pressed && paused {
            return;
        }
        let slot = match key {
            Key::Up => &mut self.held.up,
            Key::Down => &mut self.held.down,
            Key::Left => &mut self.held.left,
            Key::Right => &mut self.held.right,
            Key::Sprint => &mut self.held.sprint,
            Key::Pause => return,
        };
        *slot = pressed;
    }

    /// Request a pause toggle (menu buttons, focus loss)
    pub fn request_pause_toggle(&mut self) {
        self.pause_pressed = true;
    }

    /// Release every held key (window blur)
    pub fn release_all(&mut self) {
        self.held = FrameInput::default();
    }

    /// Snapshot for one frame; the pause edge is consumed
    pub fn take_frame(&mut self) -> FrameInput {
        let mut frame = self.held;
        frame.pause = std::mem::take(&mut self.pause_pressed);
        frame
    }
}
