//! Game session state machine
//!
//! Owns the single active run and drives it from the host's frame callback:
//! Menu -> Running (new game / continue), Running <-> Paused, and back to
//! Menu on exit. Saves happen once per second of play, on an explicit save,
//! and on exit.

use crate::consts::MAX_FRAME_MS;
use crate::persistence::{self, SaveError, SaveStore};
use crate::settings::Settings;
use crate::sim::{Dice, FrameInput, GameEvent, RunState, SimRng, tick};

/// Top-level session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Running,
    Paused,
}

/// A play session: settings, save backend, randomness and the active run
pub struct Session<S: SaveStore, D: Dice = SimRng> {
    store: S,
    dice: D,
    settings: Settings,
    run: Option<RunState>,
    /// Unpaused play time since the run was started or continued
    running_ms: f64,
    /// Whole seconds of `running_ms` already auto-saved
    saved_seconds: u64,
}

impl<S: SaveStore, D: Dice> Session<S, D> {
    pub fn new(store: S, dice: D, settings: Settings) -> Self {
        Self {
            store,
            dice,
            settings,
            run: None,
            running_ms: 0.0,
            saved_seconds: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        match &self.run {
            None => Mode::Menu,
            Some(run) if run.paused => Mode::Paused,
            Some(_) => Mode::Running,
        }
    }

    /// The active run, if any
    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the menu should offer Continue
    pub fn has_save(&self) -> bool {
        persistence::has_save(&self.store)
    }

    /// Menu -> Running with a fresh run
    pub fn new_game(&mut self) {
        self.start(RunState::new());
        log::info!("Started new game");
    }

    /// Menu -> Running from the saved slot.
    ///
    /// A missing or corrupt save is returned to the caller and the session
    /// stays in the menu. A corrupt slot is cleared.
    pub fn continue_game(&mut self) -> Result<(), SaveError> {
        let mut state = persistence::load(&self.store).inspect_err(|err| {
            if matches!(err, SaveError::CorruptSave(_)) {
                persistence::clear(&mut self.store);
            }
        })?;
        state.paused = false;
        log::info!("Continuing saved game at level {}", state.level);
        self.start(state);
        Ok(())
    }

    fn start(&mut self, state: RunState) {
        self.run = Some(state);
        self.running_ms = 0.0;
        self.saved_seconds = 0;
    }

    /// Running -> Paused. Returns `false` if not running.
    pub fn pause(&mut self) -> bool {
        self.set_paused(true)
    }

    /// Paused -> Running. Returns `false` if not paused.
    pub fn resume(&mut self) -> bool {
        self.set_paused(false)
    }

    fn set_paused(&mut self, paused: bool) -> bool {
        match &mut self.run {
            Some(run) if run.paused != paused => {
                run.paused = paused;
                true
            }
            _ => false,
        }
    }

    /// Write the active run to the slot (no-op in the menu)
    pub fn save(&mut self) -> Result<(), SaveError> {
        match &self.run {
            Some(run) => persistence::save(&mut self.store, run),
            None => Ok(()),
        }
    }

    /// Pause-menu "Save": write the run as it stands, then resume play.
    /// The slot records the paused run; continue resumes it anyway.
    pub fn save_and_resume(&mut self) -> Result<(), SaveError> {
        let result = self.save();
        self.resume();
        result
    }

    /// Running/Paused -> Menu, saving on the way out.
    ///
    /// The session always reaches the menu; a failed save is still reported.
    pub fn exit_to_menu(&mut self) -> Result<(), SaveError> {
        self.resume();
        let result = self.save();
        self.run = None;
        log::info!("Exited to menu");
        result
    }

    /// Advance one host frame of `dt_ms` milliseconds
    pub fn frame(&mut self, input: &FrameInput, dt_ms: f32) -> Vec<GameEvent> {
        let Some(run) = &mut self.run else {
            return Vec::new();
        };

        let events = tick(run, input, dt_ms, self.settings.pacing, &mut self.dice);
        if run.paused {
            return events;
        }

        self.running_ms += f64::from(dt_ms.clamp(0.0, MAX_FRAME_MS));
        let seconds = (self.running_ms / 1000.0).floor() as u64;
        if seconds > self.saved_seconds {
            self.saved_seconds = seconds;
            if self.settings.autosave {
                if let Err(err) = persistence::save(&mut self.store, run) {
                    log::warn!("Auto-save failed: {err}");
                }
            }
        }

        events
    }
}
