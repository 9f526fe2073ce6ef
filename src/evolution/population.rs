//! The evolutionary driver: a fixed-size population of brains bred by fitness.
//!
//! Each generation the population lends its genomes to the simulation as
//! [`Member`]s, then keeps the elites and refills the rest with mutated
//! crossovers of the fittest survivors.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::brain::{Brain, validate_layout};
use crate::simulation::controller::Member;
use crate::simulation::error::ConfigError;
use crate::simulation::runner::Outcome;

/// Parameters of the evolutionary driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Number of genomes per generation.
    pub population_size: usize,
    /// Neural network layer dimensions, from the 3 inputs to the 1 output.
    pub layer_sizes: Vec<usize>,
    /// Initial weights are drawn from `[-weight_scale, weight_scale)`.
    pub weight_scale: f32,
    /// Fittest genomes copied unchanged into the next generation.
    pub elitism: usize,
    /// Fraction of the population allowed to breed.
    pub survival_threshold: f32,
    /// Stop once the best fitness of a generation reaches this value.
    pub fitness_threshold: Option<f64>,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            layer_sizes: vec![3, 1],
            weight_scale: 1.0,
            elitism: 2,
            survival_threshold: 0.2,
            fitness_threshold: Some(100.0),
        }
    }
}

impl EvolutionParams {
    /// Checks that a population can be built from these parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.weight_scale <= 0.0 || self.weight_scale.is_nan() {
            return Err(ConfigError::NonPositiveWeightScale(self.weight_scale));
        }
        validate_layout(&self.layer_sizes)
    }
}

/// A brain and the fitness it earned in the last evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    /// Controller network.
    pub brain: Brain,
    /// Fitness accumulated during the current generation.
    pub fitness: f64,
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation number.
    pub generation: u32,
    /// Highest fitness.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Population standard deviation of fitness.
    pub stdev: f64,
    /// Number of genomes evaluated.
    pub size: usize,
}

impl GenerationStats {
    fn from_genomes(generation: u32, genomes: &[Genome]) -> Self {
        let size = genomes.len();
        let n = size.max(1) as f64;
        let mean = genomes.iter().map(|g| g.fitness).sum::<f64>() / n;
        let variance = genomes
            .iter()
            .map(|g| (g.fitness - mean).powi(2))
            .sum::<f64>()
            / n;
        let best = genomes
            .iter()
            .map(|g| g.fitness)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            generation,
            best,
            mean,
            stdev: variance.sqrt(),
            size,
        }
    }
}

/// A population of genomes evolved across generations.
#[derive(Debug, Clone)]
pub struct Population {
    genomes: Vec<Genome>,
    params: EvolutionParams,
    generation: u32,
    history: Vec<GenerationStats>,
    best: Option<Genome>,
}

impl Population {
    /// Creates a population of random brains.
    pub fn new(params: &EvolutionParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let genomes = (0..params.population_size)
            .map(|_| {
                Brain::new(&params.layer_sizes, params.weight_scale).map(|brain| Genome {
                    brain,
                    fitness: 0.0,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            genomes,
            params: params.clone(),
            generation: 0,
            history: Vec::new(),
            best: None,
        })
    }

    /// Current genomes.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Number of the generation about to be evaluated.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Statistics of every evaluated generation, oldest first.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Fittest genome seen in any evaluated generation.
    pub fn best(&self) -> Option<&Genome> {
        self.best.as_ref()
    }

    /// Resets every fitness to zero and lends the genomes out for evaluation.
    pub fn members(&mut self) -> Vec<Member<'_>> {
        self.genomes
            .iter_mut()
            .map(|genome| {
                let Genome { brain, fitness } = genome;
                *fitness = 0.0;
                Member::new(brain, fitness)
            })
            .collect()
    }

    /// Records the evaluated generation and breeds the next one.
    pub fn evolve(&mut self) -> GenerationStats {
        let stats = GenerationStats::from_genomes(self.generation, &self.genomes);
        info!(
            generation = stats.generation,
            best = stats.best,
            mean = stats.mean,
            stdev = stats.stdev,
            size = stats.size,
            "generation evaluated"
        );
        self.history.push(stats);

        self.genomes.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        if let Some(fittest) = self.genomes.first() {
            let improved = self
                .best
                .as_ref()
                .is_none_or(|best| fittest.fitness > best.fitness);
            if improved {
                self.best = Some(fittest.clone());
            }
        }

        let size = self.params.population_size;
        let elites = self.params.elitism.min(self.genomes.len());
        let parents = ((self.genomes.len() as f32 * self.params.survival_threshold).ceil() as usize)
            .clamp(1, self.genomes.len().max(1));

        let mut next: Vec<Genome> = self.genomes[..elites]
            .iter()
            .map(|genome| Genome {
                brain: genome.brain.clone(),
                fitness: 0.0,
            })
            .collect();

        let mut rng = rand::rng();
        while next.len() < size {
            let parent_1 = &self.genomes[rng.random_range(0..parents)];
            let parent_2 = &self.genomes[rng.random_range(0..parents)];
            let mut brain = Brain::crossover(&parent_1.brain, &parent_2.brain);
            brain.mutate(sample_mutation_scale());
            next.push(Genome {
                brain,
                fitness: 0.0,
            });
        }

        self.genomes = next;
        self.generation += 1;
        stats
    }

    /// Whether a generation's best fitness reached the configured threshold.
    pub fn threshold_reached(&self, stats: &GenerationStats) -> bool {
        self.params
            .fitness_threshold
            .is_some_and(|threshold| stats.best >= threshold)
    }

    /// Runs up to `generations` evaluate/evolve cycles.
    ///
    /// Stops early when `evaluate` reports a quit (the interrupted generation is
    /// not bred) or when the fitness threshold is reached. Returns the fittest
    /// genome seen.
    pub fn run<F, E>(&mut self, generations: u32, mut evaluate: F) -> Result<Option<Genome>, E>
    where
        F: FnMut(&mut [Member<'_>]) -> Result<Outcome, E>,
    {
        for _ in 0..generations {
            let outcome = {
                let mut members = self.members();
                evaluate(&mut members)?
            };
            if let Outcome::Quit(_) = outcome {
                break;
            }

            let stats = self.evolve();
            if self.threshold_reached(&stats) {
                info!(generation = stats.generation, best = stats.best, "fitness threshold reached");
                break;
            }
        }
        Ok(self.best.clone())
    }
}

/// Samples a mutation scale using logarithmic random distribution.
fn sample_mutation_scale() -> f32 {
    let min = 0.002f32;
    let max = 0.2f32;
    let log_mutation_scale = rand::rng().random_range(min.ln()..max.ln());
    log_mutation_scale.exp()
}
