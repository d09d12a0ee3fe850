//! Game settings and tuning
//!
//! Persisted as JSON. Every field has a default so partial files load.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime tuning for one world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === World ===
    pub segment_width: f32,
    pub ground_height: f32,
    pub ceiling_height: f32,

    // === Player ===
    /// Horizontal auto-advance (units/s)
    pub run_speed: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Upward acceleration while touch is held (units/s²)
    pub thrust: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_ttl: f32,

    // === Timed drops ===
    /// Spawn a block and a coin at the screen edge every `drop_interval`
    pub timed_drops: bool,
    pub drop_interval: f32,
    pub drop_ttl: f32,

    // === Effects ===
    pub effect_lifetime: f32,
    pub walk_frame_time: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            segment_width: SEGMENT_WIDTH,
            ground_height: GROUND_HEIGHT,
            ceiling_height: CEILING_HEIGHT,

            run_speed: RUN_SPEED,
            gravity: GRAVITY,
            thrust: THRUST,

            bullet_speed: BULLET_SPEED,
            bullet_ttl: BULLET_TTL,

            timed_drops: true,
            drop_interval: DROP_INTERVAL,
            drop_ttl: DROP_TTL,

            effect_lifetime: EFFECT_LIFETIME,
            walk_frame_time: WALK_FRAME_TIME,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        fn positive(value: &mut f32, fallback: f32, name: &str) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Setting {} = {} is invalid, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        fn non_negative(value: &mut f32, fallback: f32, name: &str) {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("Setting {} = {} is invalid, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        positive(&mut self.screen_width, defaults.screen_width, "screen_width");
        positive(&mut self.screen_height, defaults.screen_height, "screen_height");
        positive(&mut self.segment_width, defaults.segment_width, "segment_width");
        positive(&mut self.ground_height, defaults.ground_height, "ground_height");
        positive(&mut self.ceiling_height, defaults.ceiling_height, "ceiling_height");
        positive(&mut self.run_speed, defaults.run_speed, "run_speed");
        non_negative(&mut self.gravity, defaults.gravity, "gravity");
        non_negative(&mut self.thrust, defaults.thrust, "thrust");
        non_negative(&mut self.bullet_speed, defaults.bullet_speed, "bullet_speed");
        positive(&mut self.bullet_ttl, defaults.bullet_ttl, "bullet_ttl");
        positive(&mut self.drop_interval, defaults.drop_interval, "drop_interval");
        positive(&mut self.drop_ttl, defaults.drop_ttl, "drop_ttl");
        positive(&mut self.effect_lifetime, defaults.effect_lifetime, "effect_lifetime");
        positive(&mut self.walk_frame_time, defaults.walk_frame_time, "walk_frame_time");

        // Either segment alone must span the visible window, so the pair
        // always covers it plus one segment of lookahead
        if self.segment_width < self.screen_width {
            log::warn!(
                "segment_width {} too small for screen_width {}",
                self.segment_width,
                self.screen_width
            );
            self.segment_width = self.screen_width;
        }
        // At most one segment of travel per tick
        let max_run_speed = self.segment_width / SIM_DT;
        if self.run_speed > max_run_speed {
            log::warn!("run_speed {} capped at {}", self.run_speed, max_run_speed);
            self.run_speed = max_run_speed;
        }
        if self.ground_height + self.ceiling_height >= self.screen_height {
            log::warn!("Ground and ceiling leave no room, using defaults");
            self.ground_height = defaults.ground_height;
            self.ceiling_height = defaults.ceiling_height;
        }

        self
    }
}
