//! Rectangular bodies for the simulated world
//!
//! Every entity in the world (player, obstacles, floors, ceilings, bullets)
//! is an axis-aligned box with a fixed contact rule.

use glam::Vec2;

use super::category::{ContactRule, EntityKind, rule_for};
use crate::Rect;

/// A simulated body
#[derive(Debug, Clone)]
pub struct Body {
    pub id: u32,
    pub kind: EntityKind,
    /// Contact rule copied from the category table at spawn
    pub rule: ContactRule,
    /// Center position in world units
    pub pos: Vec2,
    /// Full width/height
    pub size: Vec2,
    pub vel: Vec2,
    /// Dynamic bodies are moved by the simulation, static ones are not
    pub dynamic: bool,
    /// Seconds until timeout removal
    pub ttl: Option<f32>,
    /// Owning world segment (content and structure)
    pub segment: Option<usize>,
}

impl Body {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            rule: rule_for(kind),
            pos,
            size,
            vel: Vec2::ZERO,
            dynamic: false,
            ttl: None,
            segment: None,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self.dynamic = true;
        self
    }

    pub fn with_ttl(mut self, secs: f32) -> Self {
        self.ttl = Some(secs);
        self
    }

    pub fn in_segment(mut self, segment: usize) -> Self {
        self.segment = Some(segment);
        self
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Integrate velocity over one step
    pub fn advance(&mut self, dt: f32) {
        if self.dynamic {
            self.pos += self.vel * dt;
        }
    }

    /// Count down the timeout; returns true once it has expired
    pub fn age(&mut self, dt: f32) -> bool {
        match self.ttl.as_mut() {
            Some(ttl) => {
                *ttl -= dt;
                *ttl <= 0.0
            }
            None => false,
        }
    }
}

/// Whether two rectangles overlap (touching edges do not count)
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (amin, amax) = (a.min(), a.max());
    let (bmin, bmax) = (b.min(), b.max());
    amin.x < bmax.x && amax.x > bmin.x && amin.y < bmax.y && amax.y > bmin.y
}

/// Center of the overlapping region, if any
pub fn overlap_center(a: &Rect, b: &Rect) -> Option<Vec2> {
    if !overlaps(a, b) {
        return None;
    }
    let lo = a.min().max(b.min());
    let hi = a.max().min(b.max());
    Some((lo + hi) / 2.0)
}
