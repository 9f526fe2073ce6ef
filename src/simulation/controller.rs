//! The seams between the simulation and whatever drives the birds.
//!
//! The simulation never sees genomes or networks. It asks a [`Controller`]
//! whether to jump and reports rewards to a [`FitnessSink`].

/// Number of sensor values handed to a controller each tick.
pub const INPUT_SIZE: usize = 3;

/// Decides whether a bird jumps.
///
/// Inputs are the bird's height, its distance to the top of the next gap and
/// its distance to the bottom of the next gap.
pub trait Controller {
    /// Returns one output value; the simulation jumps when it exceeds the
    /// configured threshold.
    fn activate(&mut self, inputs: &[f32; INPUT_SIZE]) -> f32;
}

impl<F> Controller for F
where
    F: FnMut(&[f32; INPUT_SIZE]) -> f32,
{
    fn activate(&mut self, inputs: &[f32; INPUT_SIZE]) -> f32 {
        self(inputs)
    }
}

/// A fitness accumulator owned by the evolutionary driver.
///
/// The simulation only adds to it and never reads it back.
pub trait FitnessSink {
    /// Adds `delta` (negative for penalties).
    fn add(&mut self, delta: f64);
}

impl FitnessSink for f64 {
    fn add(&mut self, delta: f64) {
        *self += delta;
    }
}

/// One population member: a controller and its fitness accumulator.
pub struct Member<'a> {
    /// Decision maker for the member's bird.
    pub controller: &'a mut dyn Controller,
    /// Where rewards and penalties are written.
    pub fitness: &'a mut dyn FitnessSink,
}

impl<'a> Member<'a> {
    /// Pairs a controller with its accumulator.
    pub fn new(controller: &'a mut dyn Controller, fitness: &'a mut dyn FitnessSink) -> Self {
        Self {
            controller,
            fitness,
        }
    }
}
