//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame:
//! 1. apply touch input
//! 2. simulate bodies, resolve collisions, detect contacts
//! 3. drain the command queue produced by contact resolution
//! 4. age effects and timed bodies, fire spawn timers
//! 5. follow the player with the camera and recycle segments

use glam::Vec2;

use super::body::Body;
use super::category::EntityKind;
use super::collision::{detect_contacts, resolve_all};
use super::command::Command;
use super::contact::{self, ContactOutcome};
use super::segment;
use super::spawner;
use super::state::{Effect, GameEvent, GameWorld};
use crate::assets::effect_asset;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch held: jetpack thrust on
    pub thrust: bool,
    /// Fire one bullet (one-shot)
    pub fire: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut GameWorld, input: &TickInput, dt: f32) {
    world.events.clear();
    world.time_ticks += 1;

    apply_input(world, input);
    simulate(world, dt);
    on_physics_simulated(world);
    age(world, dt);
    run_timers(world, dt);
    follow_camera(world);
    world.walk.advance(dt);
}

fn apply_input(world: &mut GameWorld, input: &TickInput) {
    if input.thrust != world.thrust_held {
        log::trace!("Thrust {}", if input.thrust { "on" } else { "off" });
    }
    world.thrust_held = input.thrust;
    world.jetpack_emitting = input.thrust;

    if input.fire {
        fire_bullet(world);
    }
}

/// Spawn a bullet just ahead of the player
pub fn fire_bullet(world: &mut GameWorld) -> Option<u32> {
    let player = world.player()?;
    let pos = player.pos + Vec2::new((PLAYER_WIDTH + BULLET_SIZE) / 2.0, 0.0);
    let vel = Vec2::new(world.settings.run_speed + world.settings.bullet_speed, 0.0);
    let ttl = world.settings.bullet_ttl;

    let id = world.next_entity_id();
    world.spawn(
        Body::new(id, EntityKind::Bullet, pos, Vec2::splat(BULLET_SIZE))
            .with_velocity(vel)
            .with_ttl(ttl),
    );
    Some(id)
}

/// Integrate bodies, resolve collisions and hand new contacts to the resolver
///
/// Nothing is added to or removed from `world.bodies` in here.
fn simulate(world: &mut GameWorld, dt: f32) {
    let thrust = if world.thrust_held {
        world.settings.thrust
    } else {
        0.0
    };
    let (run_speed, gravity) = (world.settings.run_speed, world.settings.gravity);
    let player_id = world.player_id;

    if let Some(player) = world.body_mut(player_id) {
        player.vel.x = run_speed;
        player.vel.y += (thrust - gravity) * dt;
    }

    for body in &mut world.bodies {
        body.advance(dt);
    }
    resolve_all(&mut world.bodies);

    let found = detect_contacts(&world.bodies);
    let changes = world.contacts.update(&found);

    for pair in &changes.began {
        let outcome = contact::resolve(&world.bodies, pair, &mut world.commands);
        if outcome != ContactOutcome::Ignored {
            log::trace!("Contact {:?} between {} and {}", outcome, pair.a, pair.b);
        }
    }
    for &(a, b) in &changes.ended {
        contact::contact_ended(&world.bodies, a, b);
    }
}

/// Apply everything contact resolution queued during the step
pub fn on_physics_simulated(world: &mut GameWorld) {
    for command in world.commands.drain() {
        match command {
            Command::RemoveEntity(id) => {
                let Some(body) = world.despawn(id) else {
                    continue;
                };
                match body.kind {
                    EntityKind::Coin => world.events.push(GameEvent::CoinCollected {
                        id,
                        score: world.score,
                    }),
                    EntityKind::Enemy => world.events.push(GameEvent::EnemyDestroyed { id }),
                    _ => {}
                }
            }
            Command::SpawnEffect { kind, pos } => {
                let asset = effect_asset(kind);
                if !world.assets.has(asset) {
                    log::debug!("Effect {} not available, skipped", asset);
                    world.events.push(GameEvent::EffectSkipped {
                        asset: asset.to_string(),
                    });
                    continue;
                }
                world.effects.push(Effect {
                    kind,
                    pos,
                    remaining: world.settings.effect_lifetime,
                });
            }
            Command::IncrementScore(n) => {
                world.score += u64::from(n);
            }
        }
    }
}

/// Count down effects and timed bodies; drop whatever expired
fn age(world: &mut GameWorld, dt: f32) {
    for effect in &mut world.effects {
        effect.remaining -= dt;
    }
    world.effects.retain(|e| e.remaining > 0.0);

    let expired: Vec<u32> = world
        .bodies
        .iter_mut()
        .filter_map(|b| b.age(dt).then_some(b.id))
        .collect();
    for id in expired {
        world.despawn(id);
    }
}

fn run_timers(world: &mut GameWorld, dt: f32) {
    for _ in 0..world.block_timer.advance(dt) {
        spawner::drop_block(world);
    }
    for _ in 0..world.coin_timer.advance(dt) {
        spawner::drop_coin(world);
    }
}

/// Keep the camera on the player and recycle segments that fell behind
fn follow_camera(world: &mut GameWorld) {
    if let Some(player) = world.player() {
        world.camera_x = player.pos.x;
    }

    let moved = segment::recycle(
        &mut world.segments,
        world.camera_x,
        world.settings.screen_width,
    );
    for index in moved {
        world.sync_structure(index);
        spawner::generate(world, index);
        let origin_x = world.segments[index].origin_x;
        log::info!("Segment {} moved to x={}", index, origin_x);
        world.events.push(GameEvent::SegmentRecycled { index, origin_x });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, COIN_POOF};
    use crate::sim::command::EffectKind;
    use crate::Settings;

    fn quiet_settings() -> Settings {
        Settings {
            timed_drops: false,
            ..Default::default()
        }
    }

    /// World with all segment content removed
    fn empty_world(seed: u64) -> GameWorld {
        let mut world = GameWorld::new(seed, quiet_settings());
        world.clear_segment_content(0);
        world.clear_segment_content(1);
        world
    }

    /// Put a body where the player will be after one tick
    fn spawn_ahead_of_player(world: &mut GameWorld, kind: EntityKind, size: f32) -> u32 {
        let player = world.player().unwrap();
        let pos = player.pos + Vec2::new(world.settings.run_speed * SIM_DT, 0.0);
        let id = world.next_entity_id();
        world.spawn(Body::new(id, kind, pos, Vec2::splat(size)));
        id
    }

    #[test]
    fn test_player_runs_and_stays_on_ground() {
        let mut world = empty_world(1);
        let start = world.player().unwrap().pos;
        for _ in 0..60 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        let player = world.player().unwrap();
        assert!((player.pos.x - (start.x + RUN_SPEED)).abs() < 1.0);
        assert!((player.rect().min().y - GROUND_HEIGHT).abs() < 0.5);
        assert!((world.camera_x - player.pos.x).abs() < 1e-3);
    }

    #[test]
    fn test_thrust_lifts_until_ceiling() {
        let mut world = empty_world(2);
        let hold = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &hold, SIM_DT);
        assert!(world.jetpack_emitting);

        for _ in 0..300 {
            tick(&mut world, &hold, SIM_DT);
        }
        let top = world.player().unwrap().rect().max().y;
        let ceiling = world.settings.screen_height - world.settings.ceiling_height;
        assert!((top - ceiling).abs() < 0.5, "top {} ceiling {}", top, ceiling);

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(!world.jetpack_emitting);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut world = empty_world(3);
        let coin = spawn_ahead_of_player(&mut world, EntityKind::Coin, COIN_SIZE);

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.score, 1);
        assert!(world.body(coin).is_none());
        assert_eq!(world.effects.len(), 1);
        assert_eq!(world.effects[0].kind, EffectKind::CoinPoof);
        assert!(world
            .events
            .contains(&GameEvent::CoinCollected { id: coin, score: 1 }));

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_two_coins_score_two() {
        let mut world = empty_world(4);
        spawn_ahead_of_player(&mut world, EntityKind::Coin, COIN_SIZE);
        spawn_ahead_of_player(&mut world, EntityKind::Coin, COIN_SIZE);
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.score, 2);
        assert_eq!(world.count(EntityKind::Coin), 0);
    }

    #[test]
    fn test_block_contact_is_harmless() {
        let mut world = empty_world(5);
        let block = spawn_ahead_of_player(&mut world, EntityKind::Block, BLOCK_SIZE);
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.body(block).is_some());
        assert_eq!(world.score, 0);
        assert!(world.effects.is_empty());
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut world = empty_world(6);

        // Enemy high above the player, bullet about to reach it
        let enemy_pos = Vec2::new(world.player().unwrap().pos.x + 300.0, 250.0);
        let enemy = world.next_entity_id();
        world.spawn(Body::new(enemy, EntityKind::Enemy, enemy_pos, Vec2::splat(ENEMY_SIZE)));
        let bullet = world.next_entity_id();
        world.spawn(
            Body::new(bullet, EntityKind::Bullet, enemy_pos - Vec2::new(25.0, 0.0), Vec2::splat(BULLET_SIZE))
                .with_velocity(Vec2::new(RUN_SPEED + BULLET_SPEED, 0.0))
                .with_ttl(BULLET_TTL),
        );

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert!(world.body(enemy).is_none());
        assert!(world.body(bullet).is_none());
        assert!(world.events.contains(&GameEvent::EnemyDestroyed { id: enemy }));
        assert_eq!(world.effects.len(), 1);
        let effect = &world.effects[0];
        assert_eq!(effect.kind, EffectKind::EnemyDestroyed);
        assert!((effect.pos.y - 250.0).abs() < 1e-3);

        // Explosion lasts one time unit
        for _ in 0..58 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(world.effects.len(), 1);
        for _ in 0..3 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert!(world.effects.is_empty());
    }

    #[test]
    fn test_fired_bullet_expires() {
        let mut world = empty_world(7);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &fire, SIM_DT);
        assert_eq!(world.count(EntityKind::Bullet), 1);

        let ticks = (BULLET_TTL / SIM_DT) as usize + 2;
        for _ in 0..ticks {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(world.count(EntityKind::Bullet), 0);
    }

    #[test]
    fn test_missing_effect_skipped() {
        let mut world = empty_world(8);
        world.assets = AssetCatalog::default().without(COIN_POOF);
        spawn_ahead_of_player(&mut world, EntityKind::Coin, COIN_SIZE);

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.score, 1);
        assert!(world.effects.is_empty());
        assert!(world.events.contains(&GameEvent::EffectSkipped {
            asset: COIN_POOF.to_string(),
        }));
    }

    #[test]
    fn test_segment_recycled_ahead() {
        let mut world = GameWorld::new(9, quiet_settings());
        let threshold = 801.0 + world.settings.screen_width / 2.0;
        let floor = world.segments[0].floor_id;

        let mut recycled = false;
        for _ in 0..600 {
            tick(&mut world, &TickInput::default(), SIM_DT);
            if world.events.contains(&GameEvent::SegmentRecycled {
                index: 0,
                origin_x: 1600.0,
            }) {
                recycled = true;
                break;
            }
        }
        assert!(recycled);
        assert!(world.camera_x > threshold - 1.0);
        assert_eq!(world.segments[0].origin_x, 1600.0);

        // Floor moved with the segment, content regenerated inside it
        let floor = world.body(floor).unwrap();
        assert!((floor.rect().min().x - 1600.0).abs() < 1e-3);
        for body in world.bodies.iter().filter(|b| b.segment == Some(0)) {
            assert!(body.pos.x >= 1600.0 && body.pos.x <= 2400.0);
        }
    }

    #[test]
    fn test_narrow_segments_still_cover_window() {
        let mut world = GameWorld::new(
            1,
            Settings {
                segment_width: 400.0,
                timed_drops: false,
                ..Default::default()
            },
        );
        assert!(world.settings.segment_width >= world.settings.screen_width);

        let half_screen = world.settings.screen_width / 2.0;
        for i in 0..2000 {
            let input = TickInput {
                thrust: (i / 50) % 3 == 0,
                fire: false,
            };
            tick(&mut world, &input, SIM_DT);

            let right = world
                .segments
                .iter()
                .map(|s| s.trailing_edge())
                .fold(f32::MIN, f32::max);
            assert!(
                right >= world.camera_x + half_screen,
                "tick {}: covered to {} but window ends at {}",
                i,
                right,
                world.camera_x + half_screen
            );
            let player = world.player().unwrap();
            assert!(player.rect().min().y >= world.settings.ground_height - 0.5);
        }
    }

    #[test]
    fn test_timed_drops() {
        let mut world = GameWorld::new(10, Settings::default());
        world.clear_segment_content(0);
        world.clear_segment_content(1);

        let ticks = (DROP_INTERVAL / SIM_DT) as usize + 1;
        for _ in 0..ticks {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        let drops: Vec<_> = world.bodies.iter().filter(|b| b.ttl.is_some()).collect();
        assert_eq!(drops.len(), 2);
        let right_edge = world.camera_x + world.settings.screen_width / 2.0;
        assert!(drops.iter().all(|b| b.rect().min().x >= right_edge - RUN_SPEED * SIM_DT - 1.0));
    }

    #[test]
    fn test_determinism() {
        let mut world1 = GameWorld::new(4242, Settings::default());
        let mut world2 = GameWorld::new(4242, Settings::default());

        for i in 0..900 {
            let input = TickInput {
                thrust: (i / 40) % 2 == 0,
                fire: i % 25 == 0,
            };
            tick(&mut world1, &input, SIM_DT);
            tick(&mut world2, &input, SIM_DT);
        }

        assert_eq!(world1.score, world2.score);
        assert_eq!(world1.bodies.len(), world2.bodies.len());
        for (a, b) in world1.bodies.iter().zip(&world2.bodies) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
        let gap = (world1.segments[0].origin_x - world1.segments[1].origin_x).abs();
        assert_eq!(gap, world1.settings.segment_width);
    }
}
