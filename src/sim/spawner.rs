//! Obstacle generation
//!
//! Segment content is rebuilt from scratch every time a segment is recycled.
//! Independently, two repeating timers drop a block and a coin at the right
//! edge of the screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::category::EntityKind;
use super::patterns::{self, CoinPattern};
use super::state::GameWorld;
use crate::consts::*;

/// What a segment's content slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// A cluster of coins from the pattern library
    CoinPattern,
    /// A single solid block on the ground
    Block,
    /// A single enemy in the air
    Enemy,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::CoinPattern,
        ObstacleKind::Block,
        ObstacleKind::Enemy,
    ];

    /// Uniform draw over the three kinds
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Uniform draw in `[lo, hi)`, collapsing to `lo` for an empty range
fn range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Clear a segment's content slot and fill it with a fresh obstacle
///
/// Returns the kind that was placed.
pub fn generate(world: &mut GameWorld, segment: usize) -> ObstacleKind {
    let removed = world.clear_segment_content(segment);
    let kind = ObstacleKind::roll(&mut world.rng);

    match kind {
        ObstacleKind::CoinPattern => {
            let index = patterns::choose_index(&mut world.rng);
            place_coin_pattern(world, segment, &patterns::PATTERNS[index]);
        }
        ObstacleKind::Block => place_block(world, segment),
        ObstacleKind::Enemy => place_enemy(world, segment),
    }

    let hue = world.rng.random::<f32>();
    let seg = &mut world.segments[segment];
    seg.content = Some(kind);
    seg.hue = hue;

    log::debug!(
        "Segment {} at x={} regenerated: {:?} (cleared {})",
        segment,
        seg.origin_x,
        kind,
        removed
    );
    kind
}

/// Place every coin of a pattern inside a segment
pub fn place_coin_pattern(world: &mut GameWorld, segment: usize, pattern: &CoinPattern) {
    let settings = &world.settings;
    let seg = &world.segments[segment];

    let min_y = settings.ground_height + COIN_SIZE;
    let max_y = settings.screen_height - settings.ceiling_height - pattern.height();
    let (lo_x, hi_x) = (seg.origin_x, seg.trailing_edge() - pattern.width());

    let base = Vec2::new(
        range(&mut world.rng, lo_x, hi_x),
        range(&mut world.rng, min_y, max_y),
    );
    let half = Vec2::splat(COIN_SIZE / 2.0);

    for offset in pattern.offsets() {
        let id = world.next_entity_id();
        let coin = Body::new(id, EntityKind::Coin, base + offset + half, Vec2::splat(COIN_SIZE))
            .in_segment(segment);
        world.spawn(coin);
    }
}

/// Place one block resting on the ground at a random x
pub fn place_block(world: &mut GameWorld, segment: usize) {
    let seg = &world.segments[segment];
    let half = BLOCK_SIZE / 2.0;
    let (lo, hi) = (seg.origin_x + half, seg.trailing_edge() - half);
    let y = world.settings.ground_height + half;

    let x = range(&mut world.rng, lo, hi);
    let id = world.next_entity_id();
    let block =
        Body::new(id, EntityKind::Block, Vec2::new(x, y), Vec2::splat(BLOCK_SIZE)).in_segment(segment);
    world.spawn(block);
}

/// Place one enemy at a random height
pub fn place_enemy(world: &mut GameWorld, segment: usize) {
    let seg = &world.segments[segment];
    let half = ENEMY_SIZE / 2.0;
    let (lo_x, hi_x) = (seg.origin_x + half, seg.trailing_edge() - half);
    let lo_y = world.settings.ground_height + half;
    let hi_y = world.settings.screen_height - world.settings.ceiling_height - half;

    let x = range(&mut world.rng, lo_x, hi_x);
    let y = range(&mut world.rng, lo_y, hi_y);
    let id = world.next_entity_id();
    let enemy =
        Body::new(id, EntityKind::Enemy, Vec2::new(x, y), Vec2::splat(ENEMY_SIZE)).in_segment(segment);
    world.spawn(enemy);
}

/// Repeating "wait, then fire" action
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub interval: f32,
    elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returning how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// X coordinate just past the right edge of the visible window
fn drop_x(world: &GameWorld, half_width: f32) -> f32 {
    world.camera_x + world.settings.screen_width / 2.0 + half_width
}

/// Drop a block on the ground at the right edge of the screen
pub fn drop_block(world: &mut GameWorld) -> u32 {
    let half = BLOCK_SIZE / 2.0;
    let pos = Vec2::new(drop_x(world, half), world.settings.ground_height + half);
    let ttl = world.settings.drop_ttl;

    let id = world.next_entity_id();
    world.spawn(Body::new(id, EntityKind::Block, pos, Vec2::splat(BLOCK_SIZE)).with_ttl(ttl));
    id
}

/// Drop a coin at the right edge of the screen, on a 20-unit height ladder
pub fn drop_coin(world: &mut GameWorld) -> u32 {
    let step = world.rng.random_range(0..14u32);
    let pos = Vec2::new(drop_x(world, COIN_SIZE / 2.0), (step * 20 + 100) as f32);
    let ttl = world.settings.drop_ttl;

    let id = world.next_entity_id();
    world.spawn(Body::new(id, EntityKind::Coin, pos, Vec2::splat(COIN_SIZE)).with_ttl(ttl));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> GameWorld {
        GameWorld::new(7, Settings::default())
    }

    fn content(world: &GameWorld, segment: usize) -> Vec<&Body> {
        world
            .bodies
            .iter()
            .filter(|b| b.segment == Some(segment) && !b.kind.is_structural())
            .collect()
    }

    #[test]
    fn test_kind_roll_uniform() {
        // Chi-square, 2 degrees of freedom, critical value at p = 0.001 is 13.82
        let mut rng = Pcg32::seed_from_u64(1234);
        let trials = 30_000;
        let mut counts = [0u32; 3];
        for _ in 0..trials {
            let kind = ObstacleKind::roll(&mut rng);
            let i = ObstacleKind::ALL.iter().position(|&k| k == kind).unwrap();
            counts[i] += 1;
        }
        let expected = trials as f64 / 3.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        assert!(chi2 < 13.82, "chi2 = {} counts = {:?}", chi2, counts);
    }

    #[test]
    fn test_generate_replaces_content() {
        let mut world = world();
        for _ in 0..20 {
            let kind = generate(&mut world, 1);
            let items = content(&world, 1);
            assert_eq!(world.segments[1].content, Some(kind));
            match kind {
                ObstacleKind::Block => {
                    assert_eq!(items.len(), 1);
                    assert_eq!(items[0].kind, EntityKind::Block);
                }
                ObstacleKind::Enemy => {
                    assert_eq!(items.len(), 1);
                    assert_eq!(items[0].kind, EntityKind::Enemy);
                }
                ObstacleKind::CoinPattern => {
                    assert!(!items.is_empty());
                    assert!(items.iter().all(|b| b.kind == EntityKind::Coin));
                }
            }
        }
        // Structure survives regeneration
        let floor = world.segments[1].floor_id;
        assert!(world.body(floor).is_some());
    }

    #[test]
    fn test_coin_pattern_inside_segment_and_bands() {
        let mut world = world();
        let settings = world.settings.clone();
        for pattern in &patterns::PATTERNS {
            world.clear_segment_content(0);
            place_coin_pattern(&mut world, 0, pattern);

            let coins = content(&world, 0);
            assert_eq!(coins.len(), pattern.coin_count());
            let seg = &world.segments[0];
            for coin in coins {
                let r = coin.rect();
                assert!(r.min().x >= seg.origin_x - 1e-3);
                assert!(r.max().x <= seg.trailing_edge() + 1e-3);
                assert!(r.min().y > settings.ground_height);
                assert!(r.max().y <= settings.screen_height - settings.ceiling_height + 1e-3);
            }
        }
    }

    #[test]
    fn test_block_rests_on_ground() {
        let mut world = world();
        world.clear_segment_content(0);
        place_block(&mut world, 0);
        let blocks = content(&world, 0);
        assert_eq!(blocks.len(), 1);
        let rect = blocks[0].rect();
        assert!((rect.min().y - world.settings.ground_height).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_between_ground_and_ceiling() {
        let mut world = world();
        let floor = world.settings.ground_height;
        let ceiling = world.settings.screen_height - world.settings.ceiling_height;
        for _ in 0..200 {
            world.clear_segment_content(1);
            place_enemy(&mut world, 1);

            let enemies = content(&world, 1);
            assert_eq!(enemies.len(), 1);
            assert_eq!(enemies[0].kind, EntityKind::Enemy);
            let r = enemies[0].rect();
            let seg = &world.segments[1];
            assert!(r.min().y >= floor - 1e-3, "enemy below ground at {}", r.min().y);
            assert!(r.max().y <= ceiling + 1e-3, "enemy above ceiling at {}", r.max().y);
            assert!(r.min().x >= seg.origin_x - 1e-3);
            assert!(r.max().x <= seg.trailing_edge() + 1e-3);
        }
    }

    #[test]
    fn test_spawn_timer_repeats() {
        let mut timer = SpawnTimer::new(2.0);
        assert_eq!(timer.advance(1.5), 0);
        assert_eq!(timer.advance(0.5), 1);
        assert_eq!(timer.advance(4.0), 2);

        let mut disabled = SpawnTimer::new(0.0);
        assert_eq!(disabled.advance(10.0), 0);
    }

    #[test]
    fn test_drop_coin_height_ladder() {
        let mut world = world();
        for _ in 0..50 {
            let id = drop_coin(&mut world);
            let coin = world.body(id).unwrap();
            let y = coin.pos.y;
            assert!((100.0..=360.0).contains(&y));
            assert_eq!((y - 100.0) % 20.0, 0.0);
            assert!(coin.ttl.is_some());
            assert!(coin.segment.is_none());
        }
    }
}
