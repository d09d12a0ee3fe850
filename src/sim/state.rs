//! Game world and core simulation types
//!
//! All gameplay state lives in one explicit `GameWorld` value that the tick
//! and contact functions receive by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::category::EntityKind;
use super::collision::ContactTracker;
use super::command::{CommandQueue, EffectKind};
use super::segment::{self, SEGMENT_COUNT, WorldSegment};
use super::spawner::{self, SpawnTimer};
use crate::assets::AssetCatalog;
use crate::consts::*;
use crate::settings::Settings;

/// A transient visual effect that removes itself after its lifetime
#[derive(Debug, Clone)]
pub struct Effect {
    pub kind: EffectKind,
    pub pos: Vec2,
    /// Seconds remaining
    pub remaining: f32,
}

/// Walk cycle through the four walk frames
#[derive(Debug, Clone)]
pub struct WalkCycle {
    pub frame: usize,
    pub frame_time: f32,
    elapsed: f32,
}

impl WalkCycle {
    pub const FRAMES: usize = 4;

    pub fn new(frame_time: f32) -> Self {
        Self {
            frame: 0,
            frame_time,
            elapsed: 0.0,
        }
    }

    /// Advance the animation, looping forever
    pub fn advance(&mut self, dt: f32) {
        if self.frame_time <= 0.0 {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.frame_time {
            self.elapsed -= self.frame_time;
            self.frame = (self.frame + 1) % Self::FRAMES;
        }
    }

    /// Texture name of the current frame
    pub fn texture(&self) -> &'static str {
        crate::assets::WALK_TEXTURES[self.frame]
    }
}

/// Notable things that happened during the last tick (for the host)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { id: u32, score: u64 },
    EnemyDestroyed { id: u32 },
    SegmentRecycled { index: usize, origin_x: f32 },
    EffectSkipped { asset: String },
}

/// Complete world state
#[derive(Debug)]
pub struct GameWorld {
    pub settings: Settings,
    /// Run seed (0 when an external RNG was injected)
    pub seed: u64,
    pub rng: Pcg32,
    /// Every live body, sorted by id
    pub bodies: Vec<Body>,
    pub player_id: u32,
    pub segments: [WorldSegment; SEGMENT_COUNT],
    pub score: u64,
    /// Camera center x; follows the player
    pub camera_x: f32,
    /// Touch held
    pub thrust_held: bool,
    /// Jetpack particles on (follows thrust)
    pub jetpack_emitting: bool,
    pub effects: Vec<Effect>,
    pub commands: CommandQueue,
    pub contacts: ContactTracker,
    pub block_timer: SpawnTimer,
    pub coin_timer: SpawnTimer,
    pub walk: WalkCycle,
    pub assets: AssetCatalog,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameWorld {
    /// Create a world with a seeded RNG
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut world = Self::with_rng(Pcg32::seed_from_u64(seed), settings);
        world.seed = seed;
        world
    }

    /// Create a world drawing from the given RNG
    pub fn with_rng(rng: Pcg32, settings: Settings) -> Self {
        let settings = settings.validated();
        let segments = segment::initial_segments(settings.segment_width);

        let mut world = Self {
            seed: 0,
            rng,
            bodies: Vec::new(),
            player_id: 0,
            segments,
            score: 0,
            camera_x: settings.screen_width / 2.0,
            thrust_held: false,
            jetpack_emitting: false,
            effects: Vec::new(),
            commands: CommandQueue::new(),
            contacts: ContactTracker::new(),
            block_timer: SpawnTimer::new(if settings.timed_drops {
                settings.drop_interval
            } else {
                0.0
            }),
            coin_timer: SpawnTimer::new(if settings.timed_drops {
                settings.drop_interval
            } else {
                0.0
            }),
            walk: WalkCycle::new(settings.walk_frame_time),
            assets: AssetCatalog::default(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            settings,
        };

        world.setup_structure();
        world.setup_player();
        for index in 0..SEGMENT_COUNT {
            spawner::generate(&mut world, index);
        }

        log::info!(
            "World created: seed={}, segment width={}, {} bodies",
            world.seed,
            world.settings.segment_width,
            world.bodies.len()
        );
        world
    }

    /// Replace the asset catalog used for effect presence checks
    pub fn with_assets(mut self, assets: AssetCatalog) -> Self {
        self.assets = assets;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a body keeping id order
    pub fn spawn(&mut self, body: Body) {
        match self.bodies.binary_search_by_key(&body.id, |b| b.id) {
            Ok(i) => self.bodies[i] = body,
            Err(i) => self.bodies.insert(i, body),
        }
    }

    /// Remove a body immediately; only call outside the simulation step
    pub fn despawn(&mut self, id: u32) -> Option<Body> {
        let i = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        self.contacts.forget(id);
        Some(self.bodies.remove(i))
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        match self.bodies.binary_search_by_key(&id, |b| b.id) {
            Ok(i) => Some(&mut self.bodies[i]),
            Err(_) => None,
        }
    }

    pub fn player(&self) -> Option<&Body> {
        self.body(self.player_id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }

    /// Remove every non-structural body owned by a segment
    ///
    /// Returns how many bodies were removed.
    pub fn clear_segment_content(&mut self, segment: usize) -> usize {
        let doomed: Vec<u32> = self
            .bodies
            .iter()
            .filter(|b| b.segment == Some(segment) && !b.kind.is_structural())
            .map(|b| b.id)
            .collect();
        for &id in &doomed {
            self.despawn(id);
        }
        doomed.len()
    }

    /// Move a segment's floor and ceiling to match its origin
    pub fn sync_structure(&mut self, segment: usize) {
        let seg = &self.segments[segment];
        let floor = seg.floor_rect(self.settings.ground_height);
        let ceiling = seg.ceiling_rect(self.settings.screen_height, self.settings.ceiling_height);
        let (floor_id, ceiling_id) = (seg.floor_id, seg.ceiling_id);

        if let Some(body) = self.body_mut(floor_id) {
            body.pos = floor.center;
        }
        if let Some(body) = self.body_mut(ceiling_id) {
            body.pos = ceiling.center;
        }
    }

    fn setup_structure(&mut self) {
        for index in 0..SEGMENT_COUNT {
            let seg = &self.segments[index];
            let floor = seg.floor_rect(self.settings.ground_height);
            let ceiling = seg.ceiling_rect(self.settings.screen_height, self.settings.ceiling_height);

            let floor_id = self.next_entity_id();
            self.spawn(Body::new(floor_id, EntityKind::Floor, floor.center, floor.size).in_segment(index));
            let ceiling_id = self.next_entity_id();
            self.spawn(
                Body::new(ceiling_id, EntityKind::Ceiling, ceiling.center, ceiling.size).in_segment(index),
            );

            let seg = &mut self.segments[index];
            seg.floor_id = floor_id;
            seg.ceiling_id = ceiling_id;
        }
    }

    fn setup_player(&mut self) {
        let pos = Vec2::new(
            self.settings.screen_width / 2.0,
            self.settings.ground_height + PLAYER_HEIGHT / 2.0,
        );
        let id = self.next_entity_id();
        let player = Body::new(id, EntityKind::Player, pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
            .with_velocity(Vec2::new(self.settings.run_speed, 0.0));
        self.spawn(player);
        self.player_id = id;
    }
}
