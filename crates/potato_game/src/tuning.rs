//! Physics and progression constants, injected at world construction so
//! scenarios and tests can pick their own numbers instead of sharing globals.
//!
//! Velocities are world units per tick and gravity is world units per tick
//! squared; the simulation itself has no dt parameter. Tick cadence belongs
//! to the host loop.

use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    /// Side length of one grid cell in world units. Level definitions are
    /// authored in grid units and multiplied by this at construction.
    pub block_size: f32,
    /// Play field size in grid cells.
    pub grid_size: (u32, u32),
    /// Player box size in world units.
    pub player_size: Vec2,
    /// Horizontal speed a movement key sets.
    pub move_speed: f32,
    /// Hard clamp on horizontal speed after integration.
    pub max_speed: f32,
    /// Upward speed a jump sets.
    pub jump_force: f32,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Speed a trap imparts: x directed away from the trap, y upward.
    pub death_hop: Vec2,
    pub starting_lives: u32,
    /// Score awarded when a level's finish region is reached.
    pub level_clear_points: u64,
}

impl Tuning {
    /// Play field size in world units.
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(
            self.grid_size.0 as f32 * self.block_size,
            self.grid_size.1 as f32 * self.block_size,
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.block_size.is_finite() || self.block_size <= 0.0 {
            return Err("Tuning validation failed: block_size must be positive".to_string());
        }
        if self.grid_size.0 == 0 || self.grid_size.1 == 0 {
            return Err("Tuning validation failed: grid_size must be non-zero".to_string());
        }
        if !self.player_size.is_finite()
            || self.player_size.x <= 0.0
            || self.player_size.y <= 0.0
        {
            return Err("Tuning validation failed: player_size must be positive".to_string());
        }
        for (name, value) in [
            ("move_speed", self.move_speed),
            ("max_speed", self.max_speed),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "Tuning validation failed: {name} must be finite and non-negative"
                ));
            }
        }
        if !self.death_hop.is_finite() {
            return Err("Tuning validation failed: death_hop must be finite".to_string());
        }
        if self.starting_lives == 0 {
            return Err("Tuning validation failed: starting_lives must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_size: 50.0,
            grid_size: (32, 18),
            player_size: Vec2::new(50.0, 100.0),
            move_speed: 2.8,
            max_speed: 2.8,
            jump_force: 10.0,
            gravity: 0.2,
            death_hop: Vec2::new(1.5, 6.0),
            starting_lives: 3,
            level_clear_points: 100,
        }
    }
}
