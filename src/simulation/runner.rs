//! Running a whole generation: pacing, quit handling and presentation.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::controller::Member;
use super::error::ConfigError;
use super::params::Params;
use super::world::{Simulation, Snapshot, Status};

/// The rendering and input side of a run.
pub trait Frontend {
    /// Checked once before every tick; `true` aborts the run immediately.
    fn quit_requested(&mut self) -> bool;

    /// Receives the state after every tick.
    fn present(&mut self, snapshot: &Snapshot<'_>);
}

/// A frontend that draws nothing and never quits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Frontend for Headless {
    fn quit_requested(&mut self) -> bool {
        false
    }

    fn present(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Blocks until the next tick is due.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Option<Duration>,
    last: Option<Instant>,
}

impl FrameLimiter {
    /// Paces calls to [`FrameLimiter::wait`] at `tick_rate` per second.
    ///
    /// Rates with no representable period leave the limiter unpaced.
    pub fn new(tick_rate: f32) -> Self {
        let period = (tick_rate > 0.0)
            .then(|| Duration::try_from_secs_f32(1.0 / tick_rate).ok())
            .flatten();
        Self { period, last: None }
    }

    /// A limiter that never sleeps.
    pub fn unpaced() -> Self {
        Self {
            period: None,
            last: None,
        }
    }

    /// Sleeps for whatever remains of the current period, then starts the next one.
    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < period {
                std::thread::sleep(period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Final state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Pipes cleared.
    pub score: u32,
    /// Ticks run.
    pub ticks: u64,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every bird was eliminated or the score cap was passed.
    Finished(RunSummary),
    /// The frontend asked to quit before the run finished.
    Quit(RunSummary),
}

impl Outcome {
    /// Summary regardless of how the run ended.
    pub fn summary(&self) -> RunSummary {
        match self {
            Outcome::Finished(summary) | Outcome::Quit(summary) => *summary,
        }
    }
}

/// A generation in progress, advanced one paced tick at a time.
///
/// Blocking callers loop over [`Run::step`] through [`evaluate`]; an event
/// loop that has to yield between frames calls it once per frame.
pub struct Run<'l> {
    simulation: Simulation,
    limiter: &'l mut FrameLimiter,
}

impl<'l> Run<'l> {
    /// Wraps a freshly built simulation.
    pub fn new(simulation: Simulation, limiter: &'l mut FrameLimiter) -> Self {
        Self {
            simulation,
            limiter,
        }
    }

    /// The simulation being run.
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.simulation.score(),
            ticks: self.simulation.ticks(),
        }
    }

    /// Waits for the next tick, then either honours a quit request or runs
    /// the tick and presents it.
    ///
    /// Returns `None` while the run goes on.
    pub fn step(
        &mut self,
        members: &mut [Member<'_>],
        frontend: &mut dyn Frontend,
    ) -> Option<Outcome> {
        self.limiter.wait();
        if frontend.quit_requested() {
            let summary = self.summary();
            warn!(score = summary.score, ticks = summary.ticks, "run aborted");
            return Some(Outcome::Quit(summary));
        }

        let status = self.simulation.tick(members);
        frontend.present(&self.simulation.snapshot());

        if status == Status::Terminated {
            let summary = self.summary();
            info!(score = summary.score, ticks = summary.ticks, "run finished");
            return Some(Outcome::Finished(summary));
        }
        None
    }
}

/// Simulates one generation until it terminates or the frontend quits.
///
/// Every member gets one bird. On return each fitness accumulator holds the
/// rewards and penalties earned during this run.
pub fn evaluate(
    population: &mut [Member<'_>],
    params: &Params,
    frontend: &mut dyn Frontend,
    limiter: &mut FrameLimiter,
) -> Result<Outcome, ConfigError> {
    let simulation = Simulation::new(params, population.len())?;
    let mut run = Run::new(simulation, limiter);

    loop {
        if let Some(outcome) = run.step(population, frontend) {
            return Ok(outcome);
        }
    }
}
