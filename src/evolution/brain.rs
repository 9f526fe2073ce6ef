//! Neural network controllers.
//!
//! A multi-layer perceptron with tanh activation that supports the genetic
//! operations the population needs (mutation and crossover). Sensor values
//! arrive in pixels and are scaled down before the first layer.

use ndarray::{Array, Array1, Array2, Dimension, ShapeBuilder};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::simulation::controller::{Controller, INPUT_SIZE};
use crate::simulation::error::{ConfigError, LoadError};

/// Sensors are pixel distances; this maps them to roughly `[0, 1]` so the
/// first layer does not start out saturated.
pub const DEFAULT_INPUT_SCALE: f32 = 1.0 / 800.0;

fn default_input_scale() -> f32 {
    DEFAULT_INPUT_SCALE
}

/// Uniform noise in `[-scale, scale)` shaped like `dim`.
fn jitter<D: Dimension, Sh: ShapeBuilder<Dim = D>>(dim: Sh, scale: f32) -> Array<f32, D> {
    Array::random(dim, Uniform::new(-scale, scale))
}

/// One fully connected tanh layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Layer {
    fn random(input_size: usize, output_size: usize, scale: f32) -> Self {
        Self {
            weights: jitter((output_size, input_size), scale),
            biases: jitter(output_size, scale),
        }
    }

    #[inline]
    fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs) + &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }

    fn mutate(&mut self, mutation_scale: f32) {
        self.weights += &jitter(self.weights.raw_dim(), mutation_scale);
        self.biases += &jitter(self.biases.raw_dim(), mutation_scale);
    }

    fn average(a: &Layer, b: &Layer) -> Self {
        Self {
            weights: (&a.weights + &b.weights) * 0.5,
            biases: (&a.biases + &b.biases) * 0.5,
        }
    }
}

/// A feed-forward network mapping the three bird sensors onto one jump signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Layer>,
    /// Factor applied to every sensor before the first layer.
    #[serde(default = "default_input_scale")]
    pub input_scale: f32,
}

impl Brain {
    /// Creates a new brain with random weights in `[-scale, scale)`.
    ///
    /// `layer_sizes` must start with 3 and end with 1, and `scale` must be positive.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Result<Self, ConfigError> {
        validate_layout(layer_sizes)?;
        if scale <= 0.0 || scale.is_nan() {
            return Err(ConfigError::NonPositiveWeightScale(scale));
        }
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::random(pair[0], pair[1], scale))
            .collect();
        Ok(Self {
            layers,
            input_scale: DEFAULT_INPUT_SCALE,
        })
    }

    /// Scales the raw sensors and runs them through every layer.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs * self.input_scale;
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Creates a new brain by averaging two parent brains.
    pub fn crossover(parent1: &Brain, parent2: &Brain) -> Self {
        let layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Layer::average(layer1, layer2))
            .collect();
        Self {
            layers,
            input_scale: parent1.input_scale,
        }
    }

    /// Mutates all layers in the brain.
    pub fn mutate(&mut self, mutation_scale: f32) {
        for layer in &mut self.layers {
            layer.mutate(mutation_scale);
        }
    }

    /// Saves the brain as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a brain saved by [`Brain::save_to_file`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        let brain = serde_json::from_str(&json)?;
        Ok(brain)
    }
}

impl Controller for Brain {
    fn activate(&mut self, inputs: &[f32; INPUT_SIZE]) -> f32 {
        let outputs = self.think(&Array1::from_vec(inputs.to_vec()));
        outputs.first().copied().unwrap_or(0.0)
    }
}

/// Checks that a layer layout maps the sensor inputs onto a single output.
pub fn validate_layout(layer_sizes: &[usize]) -> Result<(), ConfigError> {
    let valid = layer_sizes.len() >= 2
        && layer_sizes.first() == Some(&INPUT_SIZE)
        && layer_sizes.last() == Some(&1)
        && layer_sizes.iter().all(|&size| size > 0);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidLayout(layer_sizes.to_vec()))
    }
}
