//! Box overlap detection and collision response
//!
//! Everything on the board is an axis-aligned box. This is the minimal
//! overlap test the tick loop needs, not a physics engine.

use std::collections::HashSet;

use glam::Vec2;

use super::world::EntityId;

/// Axis-aligned bounding box stored as center + full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Build from a top-left corner, the way the board layout is measured
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            center: top_left + size * 0.5,
            size,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn top_left(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    pub fn min(&self) -> Vec2 {
        self.top_left()
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }
}

/// Result of an overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the other box toward this one
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Overlap test between two boxes.
///
/// The normal is taken along the axis of least penetration, pointing from `b`
/// toward `a`. Touching edges do not count as overlap.
pub fn aabb_contact(a: &Aabb, b: &Aabb) -> Option<Contact> {
    let delta = a.center - b.center;
    let overlap = a.half_extents() + b.half_extents() - delta.abs();

    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    // Sign of zero delta defaults to +1 so a dead-center hit still has a normal
    let sign = |d: f32| if d < 0.0 { -1.0 } else { 1.0 };

    if overlap.x < overlap.y {
        Some(Contact {
            normal: Vec2::new(sign(delta.x), 0.0),
            penetration: overlap.x,
        })
    } else {
        Some(Contact {
            normal: Vec2::new(0.0, sign(delta.y)),
            penetration: overlap.y,
        })
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Remembers which pairs were overlapping last tick so callbacks fire on enter
/// only, not on every frame of a sustained overlap.
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: HashSet<(EntityId, EntityId)>,
}

impl ContactTracker {
    /// Replace the touching set with this tick's pairs and return only the new ones,
    /// in the order given.
    pub fn entered(
        &mut self,
        current: Vec<(EntityId, EntityId, Contact)>,
    ) -> Vec<(EntityId, EntityId, Contact)> {
        let now: HashSet<_> = current.iter().map(|(a, b, _)| key(*a, *b)).collect();
        let fresh = current
            .into_iter()
            .filter(|(a, b, _)| !self.touching.contains(&key(*a, *b)))
            .collect();
        self.touching = now;
        fresh
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

fn key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}
