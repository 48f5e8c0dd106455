//! User preferences and physics tuning
//!
//! Persisted as JSON in LocalStorage. Missing fields fall back to defaults so
//! older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable constants for the simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Added to vertical velocity every tick
    pub gravity: f64,
    /// Local-y velocity factor on a segment hit
    pub segment_bounce: f64,
    /// Velocity factor on a wall hit
    pub wall_bounce: f64,
    /// Flash opacity multiplier per tick
    pub flash_decay: f64,
    /// Lowest flash opacity
    pub flash_floor: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            segment_bounce: SEGMENT_BOUNCE,
            wall_bounce: WALL_BOUNCE,
            flash_decay: FLASH_DECAY,
            flash_floor: FLASH_FLOOR,
        }
    }
}

impl PhysicsParams {
    /// Clamp loaded values into ranges the step can honor
    ///
    /// Non-finite fields revert to their defaults. Flash decay, flash floor
    /// and wall damping are fractions in `[0, 1]`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        Self {
            gravity: finite_or(self.gravity, defaults.gravity),
            segment_bounce: finite_or(self.segment_bounce, defaults.segment_bounce),
            wall_bounce: finite_or(self.wall_bounce, defaults.wall_bounce).clamp(0.0, 1.0),
            flash_decay: finite_or(self.flash_decay, defaults.flash_decay).clamp(0.0, 1.0),
            flash_floor: finite_or(self.flash_floor, defaults.flash_floor).clamp(0.0, 1.0),
        }
    }
}

/// Demo settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence collision tones
    pub muted: bool,

    // === Visual ===
    /// Brighten the scene on each collision
    pub flash: bool,
    /// Reduced motion (disables the flash)
    pub reduced_motion: bool,

    // === Physics ===
    pub physics: PhysicsParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            flash: true,
            reduced_motion: false,
            physics: PhysicsParams::default(),
        }
    }
}

impl Settings {
    /// Effective flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Opacity the scene is drawn with for a given flash value
    pub fn draw_opacity(&self, flash_opacity: f64) -> f32 {
        if self.effective_flash() {
            flash_opacity as f32
        } else {
            self.physics.flash_floor as f32
        }
    }

    /// Effective volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(mut settings) => {
                let physics = settings.physics.sanitized();
                if physics != settings.physics {
                    log::warn!("Clamped out-of-range physics settings: {:?}", settings.physics);
                }
                settings.physics = physics;
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "line_bounce_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("Failed to write settings to LocalStorage");
                    } else {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
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
