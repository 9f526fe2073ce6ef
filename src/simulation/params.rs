use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::{ConfigError, LoadError};
use super::sprites::BIRD_HEIGHT;

/// Simulation parameters that control physics, scrolling and rewards.
///
/// Every field has a default matching the classic game, so a JSON file only
/// needs to name the values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Playfield width in pixels.
    pub window_width: f32,
    /// Playfield height in pixels.
    pub window_height: f32,
    /// Y coordinate of the ground line.
    pub ground_y: f32,
    /// Horizontal position shared by all birds.
    pub bird_x: f32,
    /// Height at which birds start.
    pub bird_start_y: f32,
    /// Downward acceleration per tick squared.
    pub gravity: f32,
    /// Maximum downward displacement per tick.
    pub terminal_velocity: f32,
    /// Velocity set by a jump (negative is up).
    pub jump_velocity: f32,
    /// Extra upward displacement applied while rising.
    pub upward_bias: f32,
    /// Maximum upward tilt in degrees.
    pub max_rotation: f32,
    /// Tilt lost per tick while falling, in degrees.
    pub rotation_velocity: f32,
    /// Distance below the last jump height that still counts as climbing.
    pub tilt_margin: f32,
    /// Horizontal scroll per tick for pipes and ground.
    pub scroll_speed: f32,
    /// Vertical opening between the two pipe pieces.
    pub pipe_gap: f32,
    /// Smallest gap height (inclusive).
    pub gap_min: i32,
    /// Largest gap height (exclusive).
    pub gap_max: i32,
    /// X where the first pipe of a run is placed.
    pub first_pipe_x: f32,
    /// X where replacement pipes spawn.
    pub spawn_x: f32,
    /// Ticks per second for paced runs.
    pub tick_rate: f32,
    /// A run ends once the score exceeds this value.
    pub score_cap: u32,
    /// Fitness granted to every live bird each tick.
    pub survival_reward: f64,
    /// Fitness removed from a bird that hits a pipe.
    pub collision_penalty: f64,
    /// Fitness granted to every surviving bird when a pipe is cleared.
    pub pass_bonus: f64,
    /// Controller outputs above this value trigger a jump.
    pub jump_threshold: f32,
    /// Seed for pipe placement. `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            window_width: 500.0,
            window_height: 800.0,
            ground_y: 730.0,
            bird_x: 230.0,
            bird_start_y: 350.0,
            gravity: 3.0,
            terminal_velocity: 16.0,
            jump_velocity: -10.5,
            upward_bias: 2.0,
            max_rotation: 25.0,
            rotation_velocity: 20.0,
            tilt_margin: 50.0,
            scroll_speed: 10.0,
            pipe_gap: 200.0,
            gap_min: 50,
            gap_max: 450,
            first_pipe_x: 600.0,
            spawn_x: 600.0,
            tick_rate: 30.0,
            score_cap: 50,
            survival_reward: 0.03,
            collision_penalty: 1.0,
            pass_bonus: 2.0,
            jump_threshold: 0.5,
            rng_seed: None,
        }
    }
}

impl Params {
    /// Checks that a run with these parameters can start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate <= 0.0 || self.tick_rate.is_nan() {
            return Err(ConfigError::NonPositiveTickRate(self.tick_rate));
        }
        if Duration::try_from_secs_f32(1.0 / self.tick_rate).is_err() {
            return Err(ConfigError::TickPeriodOutOfRange(self.tick_rate));
        }
        if self.scroll_speed <= 0.0 || self.scroll_speed.is_nan() {
            return Err(ConfigError::NonPositiveScrollSpeed(self.scroll_speed));
        }
        let bird_height = BIRD_HEIGHT as f32;
        if self.pipe_gap <= bird_height || self.pipe_gap.is_nan() {
            return Err(ConfigError::DegenerateGap {
                gap: self.pipe_gap,
                bird_height,
            });
        }
        if self.gap_min >= self.gap_max {
            return Err(ConfigError::EmptyGapRange {
                min: self.gap_min,
                max: self.gap_max,
            });
        }
        // heights are drawn from gap_min..gap_max, so the largest is gap_max - 1
        if self.gap_min < 0 || (self.gap_max - 1) as f32 + self.pipe_gap > self.ground_y {
            return Err(ConfigError::GapOutOfBounds {
                min: self.gap_min,
                max: self.gap_max,
                gap: self.pipe_gap,
                ground_y: self.ground_y,
            });
        }
        if self.bird_start_y < 0.0 || self.bird_start_y + bird_height >= self.ground_y {
            return Err(ConfigError::StartOutOfBounds {
                y: self.bird_start_y,
                ground_y: self.ground_y,
            });
        }
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
