//! # Flappy Evo - Neuro-evolved Flappy Birds
//!
//! A side-scrolling flappy bird game in which a whole population of birds
//! flies at once, each steered by a small neural network. Birds earn fitness
//! for every tick they survive and every pipe the flock clears; the fittest
//! networks are bred into the next generation.
//!
//! ## Features
//!
//! - Fixed-timestep simulation of many birds against shared pipes
//! - Pixel-accurate collision from sprite alpha masks
//! - Deterministic pipe placement when seeded
//! - Tanh MLP controllers evolved by crossover and mutation
//! - Real-time rendering with macroquad and an egui stats panel
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - The per-tick simulation loop
//! - [`simulation::runner`] - Running a generation with pacing and quit handling
//! - [`simulation::bird`] - Bird kinematics
//! - [`simulation::pipe`] - Pipes and their generator
//! - [`simulation::collision`] - Mask-based collision
//! - [`evolution::population`] - The evolutionary driver

/// Core simulation logic and data structures.
pub mod simulation {
    /// Scrolling ground strips.
    pub mod base;
    /// Bird kinematics and tilt.
    pub mod bird;
    /// Silhouette-accurate collision tests.
    pub mod collision;
    /// Controller and fitness interfaces to the evolutionary driver.
    pub mod controller;
    /// Configuration and loading errors.
    pub mod error;
    /// Events recorded during a tick.
    pub mod events;
    /// Pixel bitmasks.
    pub mod mask;
    /// Simulation parameters.
    pub mod params;
    /// Pipes and pipe generation.
    pub mod pipe;
    /// Whole-generation runs with pacing and a frontend.
    pub mod runner;
    /// Procedural sprites shared by collision and rendering.
    pub mod sprites;
    /// The simulation loop.
    pub mod world;
}

/// Evolutionary driver that supplies controllers and consumes fitness.
pub mod evolution {
    /// Neural network controllers.
    pub mod brain;
    /// Population, selection and breeding.
    pub mod population;
}

pub mod config;
