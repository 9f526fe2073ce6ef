//! Pipes and the generator that places them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::params::Params;
use super::sprites::{PIPE_HEIGHT, PIPE_WIDTH};

/// A pair of pipe pieces with a vertical opening between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Creation sequence number, unique within a run.
    pub id: u64,
    /// Left edge.
    pub x: f32,
    /// Top of the opening.
    pub height: f32,
    /// Y where the upper piece is drawn.
    pub top: f32,
    /// Y where the lower piece is drawn (bottom of the opening).
    pub bottom: f32,
    /// Set once a bird has flown past the left edge.
    pub passed: bool,
}

impl Pipe {
    /// Creates a pipe whose opening starts at `height`.
    pub fn with_height(id: u64, x: f32, height: f32, params: &Params) -> Self {
        Self {
            id,
            x,
            height,
            top: height - PIPE_HEIGHT as f32,
            bottom: height + params.pipe_gap,
            passed: false,
        }
    }

    /// Scrolls the pipe one tick to the left.
    pub fn advance(&mut self, params: &Params) {
        self.x -= params.scroll_speed;
    }

    /// Right edge.
    pub fn right_edge(&self) -> f32 {
        self.x + PIPE_WIDTH as f32
    }

    /// Whether the pipe has scrolled completely past the left border.
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() < 0.0
    }
}

/// Spawns pipes at random heights.
#[derive(Debug, Clone)]
pub struct PipeGenerator {
    rng: StdRng,
    next_id: u64,
}

impl PipeGenerator {
    /// Creates a generator, seeded from `params.rng_seed` when set.
    pub fn new(params: &Params) -> Self {
        let rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, next_id: 0 }
    }

    /// Creates a pipe at `x` with its opening drawn from `gap_min..gap_max`.
    pub fn spawn(&mut self, x: f32, params: &Params) -> Pipe {
        let height = self.rng.random_range(params.gap_min..params.gap_max) as f32;
        let id = self.next_id;
        self.next_id += 1;
        Pipe::with_height(id, x, height, params)
    }
}
