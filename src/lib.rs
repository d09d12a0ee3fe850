//! Jetpack Runner - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (categories, contacts, spawning, scrolling)
//! - `assets`: Named asset catalog with presence checks
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod settings;
pub mod sim;

pub use assets::AssetCatalog;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible window (landscape phone)
    pub const SCREEN_WIDTH: f32 = 667.0;
    pub const SCREEN_HEIGHT: f32 = 375.0;

    /// World segments
    pub const SEGMENT_WIDTH: f32 = 800.0;
    pub const GROUND_HEIGHT: f32 = 40.0;
    pub const CEILING_HEIGHT: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Horizontal auto-advance speed (units/s)
    pub const RUN_SPEED: f32 = 160.0;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 600.0;
    /// Upward acceleration while the jetpack is held (units/s²)
    pub const THRUST: f32 = 1200.0;

    /// Obstacles
    pub const BLOCK_SIZE: f32 = 40.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const BULLET_SIZE: f32 = 8.0;
    pub const BULLET_SPEED: f32 = 600.0;
    /// Bullets expire after this many seconds
    pub const BULLET_TTL: f32 = 1.5;
    /// Timed drops (blocks, coins) expire after this many seconds
    pub const DROP_TTL: f32 = 5.0;
    /// Delay between timed block/coin drops (seconds)
    pub const DROP_INTERVAL: f32 = 2.0;

    /// Transient effects remove themselves after this many seconds
    pub const EFFECT_LIFETIME: f32 = 1.0;
    /// Walk cycle frame duration (seconds)
    pub const WALK_FRAME_TIME: f32 = 0.2;
}

/// Axis-aligned rectangle given by center and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Rectangle anchored at its bottom-left corner
    pub fn from_corner(min: Vec2, size: Vec2) -> Self {
        Self {
            center: min + size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }
}
