//! Game settings and preferences
//!
//! Persisted separately from the run save in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{ENEMY_SPAWN_CHANCE, REFERENCE_FRAME_MS};

/// How per-frame tuning values relate to real time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Pacing {
    /// Classic behaviour: movement and the spawn roll are per rendered frame,
    /// so a faster display plays a faster game
    #[default]
    PerFrame,
    /// Movement and spawn odds are rescaled to a 60 Hz reference frame
    DeltaNormalized,
}

impl Pacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::PerFrame => "Per frame",
            Pacing::DeltaNormalized => "Delta normalized",
        }
    }

    /// The other pacing mode (pause-menu toggle)
    pub fn toggled(self) -> Self {
        match self {
            Pacing::PerFrame => Pacing::DeltaNormalized,
            Pacing::DeltaNormalized => Pacing::PerFrame,
        }
    }

    /// Multiplier applied to per-frame speeds
    pub fn motion_scale(&self, dt_ms: f32) -> f32 {
        match self {
            Pacing::PerFrame => 1.0,
            Pacing::DeltaNormalized => dt_ms / REFERENCE_FRAME_MS,
        }
    }

    /// Probability of an enemy spawn roll succeeding this frame.
    ///
    /// Normalized pacing keeps the per-second spawn rate of a 60 Hz display:
    /// `1 - (1 - p)^(dt / frame)`.
    pub fn spawn_chance(&self, dt_ms: f32) -> f32 {
        match self {
            Pacing::PerFrame => ENEMY_SPAWN_CHANCE,
            Pacing::DeltaNormalized => {
                let frames = dt_ms / REFERENCE_FRAME_MS;
                1.0 - (1.0 - ENEMY_SPAWN_CHANCE).powf(frames)
            }
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame-rate dependence of movement and spawning
    pub pacing: Pacing,
    /// Save the run once per second of play
    pub autosave: bool,
    /// Show the sprint readiness gauge in the HUD
    pub show_sprint_gauge: bool,

    // === Accessibility ===
    /// Reduced motion (steady level-up banner instead of pulsing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pacing: Pacing::PerFrame,
            autosave: true,
            show_sprint_gauge: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Level-up banner alpha at wall-clock `time_ms`
    pub fn banner_alpha(&self, time_ms: f64) -> f64 {
        if self.reduced_motion {
            1.0
        } else {
            (time_ms * 0.01).sin() * 0.5 + 0.5
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dog_hunter_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_ignores_delta() {
        let pacing = Pacing::PerFrame;
        assert_eq!(pacing.motion_scale(33.0), 1.0);
        assert_eq!(pacing.spawn_chance(33.0), ENEMY_SPAWN_CHANCE);
    }

    #[test]
    fn test_normalized_matches_reference_frame() {
        let pacing = Pacing::DeltaNormalized;
        assert!((pacing.motion_scale(REFERENCE_FRAME_MS) - 1.0).abs() < 1e-6);
        assert!((pacing.spawn_chance(REFERENCE_FRAME_MS) - ENEMY_SPAWN_CHANCE).abs() < 1e-6);
        // Two reference frames at once: same odds as two separate rolls
        let two = pacing.spawn_chance(2.0 * REFERENCE_FRAME_MS);
        assert!((two - (1.0 - 0.98_f32 * 0.98)).abs() < 1e-5);
        assert_eq!(pacing.spawn_chance(0.0), 0.0);
    }

    #[test]
    fn test_pacing_toggle_round_trips() {
        let pacing = Pacing::default().toggled();
        assert_eq!(pacing, Pacing::DeltaNormalized);
        assert_eq!(pacing.as_str(), "Delta normalized");
        assert_eq!(pacing.toggled(), Pacing::PerFrame);

        let settings = Settings {
            pacing,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"reduced_motion":true}"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(settings.autosave);
        assert_eq!(settings.pacing, Pacing::PerFrame);
        assert_eq!(settings.banner_alpha(1234.0), 1.0);
    }
}
