//! Collision detection and response for rectangular bodies
//!
//! Two separate passes run each step:
//! - collision: dynamic bodies are pushed out of the static bodies their
//!   collision mask names (player vs floor/ceiling)
//! - contact: every overlapping pair whose contact masks match is reported,
//!   and begin/end transitions are tracked across steps

use std::collections::BTreeSet;

use glam::Vec2;

use super::body::{Body, overlap_center, overlaps};
use super::category::{should_collide, should_notify};
use crate::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Surface normal pointing from the fixed box toward the moving one
    pub normal: Vec2,
    /// Penetration depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a moving box against a fixed box
///
/// The separating axis is the one with the least penetration.
pub fn box_collision(moving: &Rect, fixed: &Rect) -> CollisionResult {
    let Some(point) = overlap_center(moving, fixed) else {
        return CollisionResult::miss();
    };

    let delta = moving.center - fixed.center;
    let overlap = (moving.size + fixed.size) / 2.0 - delta.abs();

    let (normal, penetration) = if overlap.y <= overlap.x {
        let sign = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        (Vec2::new(0.0, sign), overlap.y)
    } else {
        let sign = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        (Vec2::new(sign, 0.0), overlap.x)
    };

    CollisionResult {
        hit: true,
        point,
        normal,
        penetration,
    }
}

/// Push a dynamic body out of a fixed one and cancel velocity into the surface
pub fn resolve_collision(moving: &mut Body, fixed: &Body) -> CollisionResult {
    if !should_collide(&moving.rule, &fixed.rule) {
        return CollisionResult::miss();
    }

    let result = box_collision(&moving.rect(), &fixed.rect());
    if result.hit {
        moving.pos += result.normal * result.penetration;
        let into = moving.vel.dot(result.normal);
        if into < 0.0 {
            moving.vel -= result.normal * into;
        }
    }
    result
}

/// Resolve every dynamic body against every static body it collides with
///
/// Returns the number of collisions resolved.
pub fn resolve_all(bodies: &mut [Body]) -> usize {
    let fixed: Vec<Body> = bodies.iter().filter(|b| !b.dynamic).cloned().collect();
    let mut hits = 0;

    for body in bodies.iter_mut().filter(|b| b.dynamic) {
        for other in &fixed {
            if resolve_collision(body, other).hit {
                hits += 1;
            }
        }
    }
    hits
}

/// An overlapping pair that raises a notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    /// Lower body id
    pub a: u32,
    /// Higher body id
    pub b: u32,
    /// Center of the overlap
    pub point: Vec2,
}

/// Find all notifying overlaps, ordered by (a, b)
pub fn detect_contacts(bodies: &[Body]) -> Vec<ContactPair> {
    let mut pairs = Vec::new();

    for (i, first) in bodies.iter().enumerate() {
        for second in &bodies[i + 1..] {
            if !should_notify(&first.rule, &second.rule) {
                continue;
            }
            let (ra, rb) = (first.rect(), second.rect());
            if !overlaps(&ra, &rb) {
                continue;
            }
            let point = overlap_center(&ra, &rb).unwrap_or(first.pos);
            let (a, b) = if first.id < second.id {
                (first.id, second.id)
            } else {
                (second.id, first.id)
            };
            pairs.push(ContactPair { a, b, point });
        }
    }

    pairs.sort_by_key(|p| (p.a, p.b));
    pairs
}

/// Begin/end transitions produced by one step
#[derive(Debug, Default)]
pub struct ContactChanges {
    pub began: Vec<ContactPair>,
    pub ended: Vec<(u32, u32)>,
}

/// Tracks which pairs were touching after the previous step
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: BTreeSet<(u32, u32)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare this step's overlaps against the last step's
    pub fn update(&mut self, current: &[ContactPair]) -> ContactChanges {
        let now: BTreeSet<(u32, u32)> = current.iter().map(|p| (p.a, p.b)).collect();

        let began = current
            .iter()
            .filter(|p| !self.active.contains(&(p.a, p.b)))
            .copied()
            .collect();
        let ended = self.active.difference(&now).copied().collect();

        self.active = now;
        ContactChanges { began, ended }
    }

    /// Drop pairs that involve a removed body (no end event is raised)
    pub fn forget(&mut self, id: u32) {
        self.active.retain(|&(a, b)| a != id && b != id);
    }

    pub fn is_touching(&self, a: u32, b: u32) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.active.contains(&key)
    }
}
