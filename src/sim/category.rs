//! Physics categories and contact rules
//!
//! Every body carries a category bit plus two masks:
//! - collision: categories that physically block it
//! - contact: categories that only raise a contact notification
//!
//! The table is fixed at compile time. A pair of kinds that is not listed
//! neither collides nor notifies.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bit-flag set of categories
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(0b1);
    pub const BLOCK: Self = Self(0b10);
    pub const COIN: Self = Self(0b100);
    pub const FLOOR: Self = Self(0b1000);
    pub const ENEMY: Self = Self(0b1_0000);
    pub const BULLET: Self = Self(0b10_0000);
    pub const CEILING: Self = Self(0b100_0000);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit is shared
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Combined category of a contacting pair (order-independent)
    #[inline]
    pub const fn pair(a: EntityKind, b: EntityKind) -> Self {
        Self(a.category().0 | b.category().0)
    }

    const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for CategoryMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CategoryMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryMask({:#09b})", self.0)
    }
}

/// Physical kind of a simulated body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Block,
    Coin,
    Floor,
    Enemy,
    Bullet,
    Ceiling,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Player,
        EntityKind::Block,
        EntityKind::Coin,
        EntityKind::Floor,
        EntityKind::Enemy,
        EntityKind::Bullet,
        EntityKind::Ceiling,
    ];

    /// The single category bit owned by this kind
    pub const fn category(self) -> CategoryMask {
        match self {
            EntityKind::Player => CategoryMask::PLAYER,
            EntityKind::Block => CategoryMask::BLOCK,
            EntityKind::Coin => CategoryMask::COIN,
            EntityKind::Floor => CategoryMask::FLOOR,
            EntityKind::Enemy => CategoryMask::ENEMY,
            EntityKind::Bullet => CategoryMask::BULLET,
            EntityKind::Ceiling => CategoryMask::CEILING,
        }
    }

    /// Floors and ceilings belong to a segment and outlive its content
    pub const fn is_structural(self) -> bool {
        matches!(self, EntityKind::Floor | EntityKind::Ceiling)
    }
}

/// Category plus collision and contact masks for one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRule {
    pub category: CategoryMask,
    pub collision: CategoryMask,
    pub contact: CategoryMask,
}

const fn rule(category: CategoryMask, collision: CategoryMask, contact: CategoryMask) -> ContactRule {
    ContactRule {
        category,
        collision,
        contact,
    }
}

const PLAYER_RULE: ContactRule = rule(
    CategoryMask::PLAYER,
    CategoryMask::FLOOR.union(CategoryMask::CEILING),
    CategoryMask::BLOCK
        .union(CategoryMask::COIN)
        .union(CategoryMask::ENEMY),
);
const BLOCK_RULE: ContactRule = rule(CategoryMask::BLOCK, CategoryMask::NONE, CategoryMask::PLAYER);
const COIN_RULE: ContactRule = rule(CategoryMask::COIN, CategoryMask::NONE, CategoryMask::PLAYER);
const FLOOR_RULE: ContactRule = rule(CategoryMask::FLOOR, CategoryMask::PLAYER, CategoryMask::NONE);
const ENEMY_RULE: ContactRule = rule(
    CategoryMask::ENEMY,
    CategoryMask::NONE,
    CategoryMask::PLAYER.union(CategoryMask::BULLET),
);
const BULLET_RULE: ContactRule = rule(CategoryMask::BULLET, CategoryMask::NONE, CategoryMask::ENEMY);
const CEILING_RULE: ContactRule = rule(CategoryMask::CEILING, CategoryMask::PLAYER, CategoryMask::NONE);

/// Look up the fixed rule for a kind
pub const fn rule_for(kind: EntityKind) -> ContactRule {
    match kind {
        EntityKind::Player => PLAYER_RULE,
        EntityKind::Block => BLOCK_RULE,
        EntityKind::Coin => COIN_RULE,
        EntityKind::Floor => FLOOR_RULE,
        EntityKind::Enemy => ENEMY_RULE,
        EntityKind::Bullet => BULLET_RULE,
        EntityKind::Ceiling => CEILING_RULE,
    }
}

/// Whether two bodies physically block each other
pub fn should_collide(a: &ContactRule, b: &ContactRule) -> bool {
    a.collision.intersects(b.category) || b.collision.intersects(a.category)
}

/// Whether overlap of two bodies raises a contact notification
pub fn should_notify(a: &ContactRule, b: &ContactRule) -> bool {
    a.contact.intersects(b.category) || b.contact.intersects(a.category)
}
