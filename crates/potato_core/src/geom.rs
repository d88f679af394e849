//! Axis-aligned boxes and the overlap tests the collision pass is built on.
//!
//! Coordinates are screen-like: x grows right, y grows down, and a box's
//! `min` corner is its top-left. Overlap is **closed-interval** on both axes,
//! so two boxes that merely touch edges do overlap. Landing detection depends
//! on this: a character resting exactly on a platform's top face keeps
//! reporting contact every tick instead of flickering between grounded and
//! airborne.

use glam::Vec2;

/// Axis-aligned box stored as min/max corners, with `min.x <= max.x` and
/// `min.y <= max.y` by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Builds a box from its top-left corner and a (non-negative) size.
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Closed-interval overlap test: touching edges count as overlapping.
    /// NaN in any corner makes every comparison false, so degenerate boxes
    /// never overlap anything rather than misbehaving downstream.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Overlap test restricted to the x axis.
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
    }

    /// Overlap test restricted to the y axis.
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y <= other.max.y && self.max.y >= other.min.y
    }

    /// Closed-interval point containment. Hit-testing helper for hosts;
    /// the physics pass itself only uses the box-box tests above.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
