//! Circle vs axis-aligned rectangle overlap
//!
//! Projectiles are circles, everything they can hit is an axis-aligned box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle (projectile hitbox)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.half_extents()
    }
}

/// Check whether a circle overlaps a rectangle (touching counts)
///
/// Works in the rectangle's half-space: fold the circle center into the
/// positive quadrant, reject on either axis, accept if the center lies inside
/// either slab, and fall back to the corner distance otherwise.
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let half = rect.half_extents();
    let dist = (circle.center - rect.center()).abs();

    if dist.x > half.x + circle.radius || dist.y > half.y + circle.radius {
        return false;
    }

    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }

    let corner = dist - half;
    corner.length_squared() <= circle.radius * circle.radius
}
