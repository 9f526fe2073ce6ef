//! Bird kinematics and tilt.
//!
//! A bird only moves vertically. Displacement follows `v * t + a * t^2 / 2`
//! where `t` counts ticks since the last jump, capped at terminal velocity.

use serde::{Deserialize, Serialize};

use super::params::Params;

/// Ticks each wing frame is shown.
pub const ANIMATION_TIME: u64 = 5;

/// Lowest tilt in degrees (nose straight down).
pub const MIN_TILT: f32 = -90.0;

/// A single agent with independent physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Index of the population member controlling this bird.
    pub member: usize,
    /// Horizontal position, fixed for the run.
    pub x: f32,
    /// Vertical position of the sprite's top edge.
    pub y: f32,
    /// Velocity set by the last jump.
    pub vel: f32,
    /// Ticks since the last jump.
    pub tick_count: u32,
    /// Tilt in degrees, positive is nose up.
    pub tilt: f32,
    /// Height at the last jump (or at spawn).
    pub jump_height: f32,
    /// Cleared when the bird is eliminated.
    pub alive: bool,
}

impl Bird {
    /// Creates a bird at rest.
    pub fn new(member: usize, x: f32, y: f32) -> Self {
        Self {
            member,
            x,
            y,
            vel: 0.0,
            tick_count: 0,
            tilt: 0.0,
            jump_height: y,
            alive: true,
        }
    }

    /// Starts a jump from the current height.
    pub fn jump(&mut self, params: &Params) {
        self.vel = params.jump_velocity;
        self.tick_count = 0;
        self.jump_height = self.y;
    }

    /// Moves the bird by one tick and returns the displacement applied.
    pub fn advance(&mut self, params: &Params) -> f32 {
        self.tick_count += 1;
        let t = self.tick_count as f32;

        let mut d = self.vel * t + 0.5 * params.gravity * t * t;
        if d >= params.terminal_velocity {
            d = params.terminal_velocity;
        }
        if d < 0.0 {
            d -= params.upward_bias;
        }
        self.y += d;

        if d < 0.0 || self.y < self.jump_height + params.tilt_margin {
            if self.tilt < params.max_rotation {
                self.tilt = params.max_rotation;
            }
        } else {
            self.tilt -= params.rotation_velocity;
        }
        self.tilt = self.tilt.clamp(MIN_TILT, params.max_rotation);

        d
    }

    /// Whether the bird has left the playfield through the ceiling or the ground.
    pub fn is_out_of_bounds(&self, height: f32, ground_y: f32) -> bool {
        self.y + height >= ground_y || self.y < 0.0
    }

    /// Wing frame to show at `tick`: a 0, 1, 2, 1 flap cycle, or a fixed
    /// glide frame once the bird is diving.
    pub fn wing_frame(&self, tick: u64) -> usize {
        if self.tilt <= -80.0 {
            return 1;
        }
        match (tick / ANIMATION_TIME) % 4 {
            0 => 0,
            1 | 3 => 1,
            _ => 2,
        }
    }
}
