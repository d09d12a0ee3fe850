//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - World mutations from contacts are deferred until the step ends
//! - No rendering or platform dependencies

pub mod body;
pub mod category;
pub mod collision;
pub mod command;
pub mod contact;
pub mod patterns;
pub mod segment;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::Body;
pub use category::{CategoryMask, ContactRule, EntityKind, rule_for, should_collide, should_notify};
pub use collision::{CollisionResult, ContactPair, ContactTracker, detect_contacts};
pub use command::{Command, CommandQueue, EffectKind};
pub use contact::{ContactOutcome, resolve};
pub use patterns::{COIN_GRID, CoinPattern, PATTERNS};
pub use segment::{SEGMENT_COUNT, WorldSegment, recycle};
pub use spawner::{ObstacleKind, SpawnTimer, generate};
pub use state::{Effect, GameEvent, GameWorld, WalkCycle};
pub use tick::{TickInput, tick};
