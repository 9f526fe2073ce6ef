use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};

use flappy_evo::config::AppConfig;
use flappy_evo::evolution::population::{Genome, Population};
use flappy_evo::simulation::mask::Silhouettes;
use flappy_evo::simulation::runner::{self, FrameLimiter, Headless, Outcome, Run};
use flappy_evo::simulation::sprites::SpriteSheet;
use flappy_evo::simulation::world::Simulation;

mod graphics;
mod ui;
mod window;

use window::WindowFrontend;

/// Flappy birds that learn to fly through neuro-evolution.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the number of generations to train.
    #[arg(long)]
    generations: Option<u32>,
    /// Seed pipe placement for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Train without a window, as fast as possible.
    #[arg(long)]
    headless: bool,
    /// Write the fittest brain to this JSON file when training ends.
    #[arg(long)]
    save_winner: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(seed) = args.seed {
        config.simulation.rng_seed = Some(seed);
    }
    config.validate().context("invalid configuration")?;

    if args.headless {
        let winner = train_headless(&config)?;
        save_winner(winner.as_ref(), args.save_winner.as_ref())?;
        return Ok(());
    }

    let window = window_conf(&config);
    let save_path = args.save_winner;
    macroquad::Window::from_config(window, async move {
        if let Err(err) = train_windowed(config, save_path).await {
            error!(?err, "training failed");
        }
    });
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn window_conf(config: &AppConfig) -> Conf {
    Conf {
        window_title: "Flappy Evo".to_owned(),
        window_width: config.simulation.window_width as i32 + ui::PANEL_WIDTH as i32,
        window_height: config.simulation.window_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn train_headless(config: &AppConfig) -> Result<Option<Genome>> {
    let mut population = Population::new(&config.evolution)?;
    let mut limiter = FrameLimiter::unpaced();
    let winner = population.run(config.generations, |members| {
        runner::evaluate(members, &config.simulation, &mut Headless, &mut limiter)
    })?;
    Ok(winner)
}

async fn train_windowed(config: AppConfig, save_path: Option<PathBuf>) -> Result<()> {
    prevent_quit();

    let sheet = SpriteSheet::new();
    let textures = graphics::Textures::new(&sheet);
    let silhouettes = Silhouettes::from_sheet(&sheet);
    let mut population = Population::new(&config.evolution)?;
    let mut ui_state = ui::UIState::new();

    'training: for _ in 0..config.generations {
        let generation = population.generation();
        {
            let mut members = population.members();
            let simulation = Simulation::with_silhouettes(
                &config.simulation,
                members.len(),
                silhouettes.clone(),
            )?;
            let mut limiter = FrameLimiter::new(config.simulation.tick_rate);
            let mut run = Run::new(simulation, &mut limiter);
            let mut frontend = WindowFrontend {
                textures: &textures,
                params: &config.simulation,
                ui_state: &ui_state,
                generation,
            };

            let outcome = loop {
                let outcome = run.step(&mut members, &mut frontend);
                next_frame().await;
                if let Some(outcome) = outcome {
                    break outcome;
                }
            };
            match outcome {
                Outcome::Quit(_) => break 'training,
                Outcome::Finished(summary) => ui_state.record_score(summary.score),
            }
        }

        let stats = population.evolve();
        ui_state.record_generation(&stats);
        if population.threshold_reached(&stats) {
            info!(generation = stats.generation, best = stats.best, "fitness threshold reached");
            break;
        }
    }

    save_winner(population.best(), save_path.as_ref())
}

fn save_winner(winner: Option<&Genome>, path: Option<&PathBuf>) -> Result<()> {
    let (Some(winner), Some(path)) = (winner, path) else {
        return Ok(());
    };
    winner
        .brain
        .save_to_file(path)
        .with_context(|| format!("failed to save winner to {}", path.display()))?;
    info!(fitness = winner.fitness, path = %path.display(), "saved winner");
    Ok(())
}
