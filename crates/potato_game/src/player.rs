//! The player: per-tick integration and the collision responses that mutate it.
//!
//! Motion is semi-implicit Euler in per-tick units: position moves by the
//! current velocity, then velocity picks up the staged acceleration. Platform
//! resolution is **axis-separated with a last-position side test**: the face
//! the player hit is chosen by comparing the previous tick's per-axis
//! separation with the current overlap, so a fast fall cannot tunnel through
//! a thin platform and a walk into a wall cannot be mistaken for a landing.
//!
//! The player's coordinates are screen space. Each tick the level's scroll
//! vector is subtracted from both `position` and `last_position` (the camera
//! pan carries the player along with the geometry), which keeps the side
//! tests comparing positions expressed in the same frame.

use glam::Vec2;
use potato_core::{Aabb, GameKey, KeyTransition};

use crate::tuning::Tuning;

/// Horizontal sprite orientation, for the host's renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Which face of a platform a resolution acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    /// Landed on the top face: this is the only contact that grounds.
    Top,
    /// Head bump against the bottom face.
    Bottom,
    /// Pushed back out of a left or right face.
    Side,
    /// Boxes already overlapped on both axes last tick; nothing sane to
    /// resolve against, so the player is left where it is.
    Embedded,
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub position: Vec2,
    pub last_position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub jumping: bool,
    pub dying: bool,
    pub lives: u32,
    pub score: u64,
    pub facing: Facing,
    /// Index of the last top-contacted platform in the current level's item
    /// list. Cleared on level advance; the index must never cross levels.
    pub respawn_anchor: Option<usize>,
}

impl Player {
    pub fn new(position: Vec2, tuning: &Tuning) -> Self {
        Self {
            position,
            last_position: position,
            velocity: Vec2::ZERO,
            // Spawns are airborne until proven otherwise; gravity is staged
            // so fall speed starts accumulating on the first tick.
            acceleration: Vec2::new(0.0, tuning.gravity),
            size: tuning.player_size,
            on_ground: false,
            jumping: false,
            dying: false,
            lives: tuning.starting_lives,
            score: 0,
            facing: Facing::Right,
            respawn_anchor: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.size)
    }

    fn last_bounds(&self) -> Aabb {
        Aabb::from_position_size(self.last_position, self.size)
    }

    /// Applies one queued key transition. Key-down owns the horizontal
    /// velocity outright (last press wins); key-up only cancels motion the
    /// matching direction still owns, since the opposite key may have
    /// overwritten it in between. A dying player ignores input entirely.
    pub fn apply_transition(&mut self, transition: KeyTransition, tuning: &Tuning) {
        if self.dying {
            return;
        }
        match (transition.key, transition.pressed) {
            (GameKey::Jump, true) => self.jumping = true,
            (GameKey::Jump, false) => self.jumping = false,
            (GameKey::MoveLeft, true) => {
                self.velocity.x = -tuning.move_speed;
                self.facing = Facing::Left;
            }
            (GameKey::MoveRight, true) => {
                self.velocity.x = tuning.move_speed;
                self.facing = Facing::Right;
            }
            (GameKey::MoveLeft, false) => {
                if self.velocity.x < 0.0 {
                    self.velocity.x = 0.0;
                }
            }
            (GameKey::MoveRight, false) => {
                if self.velocity.x > 0.0 {
                    self.velocity.x = 0.0;
                }
            }
        }
    }

    /// Jump trigger, integration, scroll carry, and the right-edge clamp,
    /// in that order. Runs before the collision pass.
    pub fn integrate(&mut self, scroll_vector: Vec2, tuning: &Tuning) {
        // Jump is legal only from the ground; holding the key re-jumps on
        // the next landing.
        if self.jumping && self.on_ground {
            self.velocity.y = -tuning.jump_force;
            self.on_ground = false;
        }

        self.last_position = self.position;
        self.position += self.velocity;
        self.velocity += self.acceleration;
        self.velocity.x = self.velocity.x.clamp(-tuning.max_speed, tuning.max_speed);

        // Scroll carry: the camera pan shifts the player together with the
        // geometry. last_position shifts too so the collision side tests
        // compare boxes expressed in this tick's frame.
        self.position -= scroll_vector;
        self.last_position -= scroll_vector;

        // The right edge blocks rather than kills. Clamping before the
        // collision pass keeps a player pressed against the edge from being
        // shoved through geometry.
        let right_edge = tuning.field_size().x;
        if self.position.x + self.size.x > right_edge {
            self.position.x = right_edge - self.size.x;
        }
    }

    /// Solid resolution against one platform's screen-space bounds. The
    /// caller has already established overlap. Horizontal penetration
    /// resolves first, vertical second; `claim_ground` gates the top-contact
    /// state so only one platform per tick can author it.
    pub fn resolve_platform(&mut self, bounds: Aabb, claim_ground: bool) -> PlatformContact {
        let last = self.last_bounds();

        // A side block requires the y ranges to have strictly interleaved
        // last tick. Merely touching the surface line does not count, so a
        // walk across two flush platforms glides over the seam instead of
        // snagging on the second one's face.
        let strict_y_overlap = last.min.y < bounds.max.y && last.max.y > bounds.min.y;
        if !last.overlaps_x(&bounds) && strict_y_overlap {
            if last.max.x <= bounds.min.x {
                self.position.x = bounds.min.x - self.size.x;
            } else {
                self.position.x = bounds.max.x;
            }
            // Horizontal velocity is deliberately preserved: under
            // event-driven input a held key keeps pressing into the wall,
            // and zeroing here would make the release test lose its owner.
            return PlatformContact::Side;
        }

        if last.max.y <= bounds.min.y {
            if claim_ground {
                self.position.y = bounds.min.y - self.size.y;
                self.velocity.y = 0.0;
                self.acceleration.y = 0.0;
                self.on_ground = true;
            }
            PlatformContact::Top
        } else if last.min.y >= bounds.max.y {
            self.position.y = bounds.max.y;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
            PlatformContact::Bottom
        } else {
            PlatformContact::Embedded
        }
    }

    /// Trap contact: begin the death arc. The hop pushes up and away from
    /// the trap; gravity then carries the player out of the field, where the
    /// bound check finalizes the death. Gravity is restaged here because a
    /// platform earlier in the same pass may have zeroed it.
    pub fn hit_trap(&mut self, trap_bounds: Aabb, tuning: &Tuning) {
        let away = if self.bounds().center().x < trap_bounds.center().x {
            -1.0
        } else {
            1.0
        };
        self.velocity.x = away * tuning.death_hop.x;
        self.velocity.y = -tuning.death_hop.y;
        self.acceleration.y = tuning.gravity;
        self.dying = true;
        self.on_ground = false;
        self.jumping = false;
    }

    /// Runs after the collision pass. Airborne ticks hold the vertical
    /// acceleration at the gravity constant, so fall speed grows by exactly
    /// one gravity unit per tick; grounded ticks leave the zeroed state from
    /// the platform resolution in place.
    pub fn apply_gravity(&mut self, grounded_this_tick: bool, tuning: &Tuning) {
        if !grounded_this_tick {
            self.on_ground = false;
            self.acceleration.y = tuning.gravity;
        }
    }

    /// Relocates the player after a death. Motion resets; gravity is staged
    /// again because the respawn point may be airborne.
    pub fn respawn_at(&mut self, position: Vec2, tuning: &Tuning) {
        self.position = position;
        self.last_position = position;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::new(0.0, tuning.gravity);
        self.on_ground = false;
        self.dying = false;
    }
}
