//! Static level geometry. The variant set is closed: the collision pass
//! hard-codes how the three kinds interact within a single tick, so new
//! kinds cannot be bolted on without revisiting that ordering.

use glam::Vec2;
use potato_core::Aabb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Solid ground the player collides with and can stand on.
    Platform,
    /// Kills on contact.
    Trap,
    /// Finishes the level on contact.
    Finish,
}

/// One immutable piece of level geometry, in world units. Items are created
/// once at world construction and never move; apparent motion comes entirely
/// from the level's scroll offset.
#[derive(Debug, Clone, Copy)]
pub struct LevelItem {
    pub kind: ItemKind,
    pub position: Vec2,
    pub size: Vec2,
}

impl LevelItem {
    pub fn new(kind: ItemKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            size,
        }
    }

    /// Screen-space bounds under the given scroll offset. Collision and
    /// rendering both read this, so physical and visual positions can never
    /// disagree.
    pub fn bounds(&self, scroll_offset: Vec2) -> Aabb {
        Aabb::from_position_size(self.position - scroll_offset, self.size)
    }
}
