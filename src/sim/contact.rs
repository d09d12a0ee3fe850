//! Contact resolution
//!
//! Called for every contact that began during a simulation step. The pair is
//! classified by the OR of both categories, and any gameplay consequence is
//! queued as commands rather than applied in place.

use super::body::Body;
use super::category::{CategoryMask, EntityKind};
use super::collision::ContactPair;
use super::command::{Command, CommandQueue, EffectKind};

/// Classification of a contacting pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    PlayerBlock,
    PlayerCoin,
    PlayerFloor,
    PlayerEnemy,
    BulletEnemy,
    /// Not a pair the game reacts to
    Ignored,
}

impl ContactOutcome {
    pub fn classify(pair: CategoryMask) -> Self {
        const PLAYER_BLOCK: CategoryMask = CategoryMask(CategoryMask::PLAYER.0 | CategoryMask::BLOCK.0);
        const PLAYER_COIN: CategoryMask = CategoryMask(CategoryMask::PLAYER.0 | CategoryMask::COIN.0);
        const PLAYER_FLOOR: CategoryMask = CategoryMask(CategoryMask::PLAYER.0 | CategoryMask::FLOOR.0);
        const PLAYER_ENEMY: CategoryMask = CategoryMask(CategoryMask::PLAYER.0 | CategoryMask::ENEMY.0);
        const BULLET_ENEMY: CategoryMask = CategoryMask(CategoryMask::BULLET.0 | CategoryMask::ENEMY.0);

        match pair {
            PLAYER_BLOCK => ContactOutcome::PlayerBlock,
            PLAYER_COIN => ContactOutcome::PlayerCoin,
            PLAYER_FLOOR => ContactOutcome::PlayerFloor,
            PLAYER_ENEMY => ContactOutcome::PlayerEnemy,
            BULLET_ENEMY => ContactOutcome::BulletEnemy,
            _ => ContactOutcome::Ignored,
        }
    }
}

fn find(bodies: &[Body], id: u32) -> Option<&Body> {
    bodies
        .binary_search_by_key(&id, |b| b.id)
        .ok()
        .map(|i| &bodies[i])
}

/// Pick the body of `kind` out of a pair
fn of_kind<'a>(a: &'a Body, b: &'a Body, kind: EntityKind) -> &'a Body {
    if a.kind == kind { a } else { b }
}

/// React to a contact that just began
///
/// `bodies` must be sorted by id.
pub fn resolve(bodies: &[Body], contact: &ContactPair, queue: &mut CommandQueue) -> ContactOutcome {
    let (Some(a), Some(b)) = (find(bodies, contact.a), find(bodies, contact.b)) else {
        return ContactOutcome::Ignored;
    };

    let outcome = ContactOutcome::classify(CategoryMask::pair(a.kind, b.kind));
    match outcome {
        ContactOutcome::PlayerBlock => {
            log::debug!("Player hit block {}", of_kind(a, b, EntityKind::Block).id);
            // A hard hit would destroy the block; only logged for now
        }
        ContactOutcome::PlayerCoin => {
            let coin = of_kind(a, b, EntityKind::Coin);
            if !queue.is_marked(coin.id) {
                log::debug!("Player hit coin {}", coin.id);
                queue.push(Command::IncrementScore(1));
                queue.push(Command::SpawnEffect {
                    kind: EffectKind::CoinPoof,
                    pos: coin.pos,
                });
                queue.mark_for_removal(coin.id);
            }
        }
        ContactOutcome::PlayerFloor => {
            log::debug!("Player hit floor");
        }
        ContactOutcome::PlayerEnemy => {
            log::debug!("Player hit enemy {}", of_kind(a, b, EntityKind::Enemy).id);
        }
        ContactOutcome::BulletEnemy => {
            let bullet = of_kind(a, b, EntityKind::Bullet);
            let enemy = of_kind(a, b, EntityKind::Enemy);
            // A bullet or enemy already spent this step cannot trigger again
            if queue.is_marked(bullet.id) || queue.is_marked(enemy.id) {
                return outcome;
            }
            log::debug!("Bullet {} hit enemy {}", bullet.id, enemy.id);
            queue.push(Command::SpawnEffect {
                kind: EffectKind::EnemyDestroyed,
                pos: contact.point,
            });
            queue.mark_for_removal(bullet.id);
            queue.mark_for_removal(enemy.id);
        }
        ContactOutcome::Ignored => {}
    }

    outcome
}

/// A contact that ended; nothing reacts to these beyond logging
pub fn contact_ended(bodies: &[Body], a: u32, b: u32) {
    if let (Some(a), Some(b)) = (find(bodies, a), find(bodies, b)) {
        log::trace!("Contact ended: {:?} / {:?}", a.kind, b.kind);
    }
}
