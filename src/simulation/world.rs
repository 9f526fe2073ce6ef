//! The fixed-timestep simulation loop.
//!
//! A [`Simulation`] owns every bird, pipe and the ground for one run. Each
//! call to [`Simulation::tick`] runs the same steps in the same order:
//! pick the target pipe, move and steer the birds, resolve collisions and
//! clears, spawn and retire pipes, drop birds that left the playfield,
//! scroll the ground and check for termination.

use tracing::debug;

use super::base::Base;
use super::bird::Bird;
use super::collision;
use super::controller::Member;
use super::error::ConfigError;
use super::events::SimulationEvent;
use super::mask::Silhouettes;
use super::params::Params;
use super::pipe::{Pipe, PipeGenerator};
use super::sprites::{BIRD_HEIGHT, SpriteSheet};

/// Whether a run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Birds remain and the score cap has not been passed.
    Running,
    /// The run is over; further ticks do nothing.
    Terminated,
}

/// Read-only view of a run handed to renderers once per tick.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Live birds.
    pub birds: &'a [Bird],
    /// Live pipes, nearest first.
    pub pipes: &'a [Pipe],
    /// Ground strips.
    pub base: &'a Base,
    /// Pipes cleared so far.
    pub score: u32,
    /// Ticks run so far.
    pub tick: u64,
    /// Birds the run started with.
    pub population: usize,
}

/// State of one run.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: Params,
    birds: Vec<Bird>,
    pipes: Vec<Pipe>,
    base: Base,
    score: u32,
    tick: u64,
    status: Status,
    population: usize,
    generator: PipeGenerator,
    silhouettes: Silhouettes,
    events: Vec<SimulationEvent>,
}

impl Simulation {
    /// Validates `params` and places `population` birds and the first pipe.
    pub fn new(params: &Params, population: usize) -> Result<Self, ConfigError> {
        Self::with_silhouettes(params, population, Silhouettes::from_sheet(&SpriteSheet::new()))
    }

    /// Like [`Simulation::new`], reusing masks that were already built.
    pub fn with_silhouettes(
        params: &Params,
        population: usize,
        silhouettes: Silhouettes,
    ) -> Result<Self, ConfigError> {
        params.validate()?;

        let birds = (0..population)
            .map(|member| Bird::new(member, params.bird_x, params.bird_start_y))
            .collect();
        let mut generator = PipeGenerator::new(params);
        let first = generator.spawn(params.first_pipe_x, params);

        Ok(Self {
            params: params.clone(),
            birds,
            pipes: vec![first],
            base: Base::new(params.ground_y),
            score: 0,
            tick: 0,
            status: Status::Running,
            population,
            generator,
            silhouettes,
            events: Vec::new(),
        })
    }

    /// Live birds in population order.
    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    /// Live pipes in creation order.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Ground strips.
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Pipes cleared so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Parameters of this run.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Events recorded during the most recent tick.
    pub fn last_events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            birds: &self.birds,
            pipes: &self.pipes,
            base: &self.base,
            score: self.score,
            tick: self.tick,
            population: self.population,
        }
    }

    /// Index of the pipe the birds are steering towards.
    fn target_pipe(&self) -> usize {
        match (self.birds.first(), self.pipes.first()) {
            (Some(lead), Some(nearest)) if self.pipes.len() > 1 && lead.x > nearest.right_edge() => 1,
            _ => 0,
        }
    }

    /// Advances the run by one tick.
    ///
    /// `members` is indexed by each bird's `member`; birds without a member
    /// still fall but never jump or earn fitness.
    pub fn tick(&mut self, members: &mut [Member<'_>]) -> Status {
        if self.status == Status::Terminated {
            return self.status;
        }
        self.events.clear();
        if self.birds.is_empty() {
            self.status = Status::Terminated;
            return self.status;
        }
        self.tick += 1;

        let gap = self
            .pipes
            .get(self.target_pipe())
            .map(|pipe| (pipe.height, pipe.bottom));

        for bird in &mut self.birds {
            bird.advance(&self.params);
            let Some(member) = members.get_mut(bird.member) else {
                continue;
            };
            member.fitness.add(self.params.survival_reward);

            if let Some((gap_top, gap_bottom)) = gap {
                let inputs = [bird.y, (bird.y - gap_top).abs(), (bird.y - gap_bottom).abs()];
                if member.controller.activate(&inputs) > self.params.jump_threshold {
                    bird.jump(&self.params);
                }
            }
        }

        // collisions and clears
        let mut cleared = false;
        for pipe in &mut self.pipes {
            for bird in &self.birds {
                if collision::collides(bird, pipe, &self.silhouettes) {
                    self.events.push(SimulationEvent::Collided {
                        member: bird.member,
                        pipe: pipe.id,
                    });
                }
                if !pipe.passed && pipe.x < bird.x {
                    pipe.passed = true;
                    cleared = true;
                    self.events.push(SimulationEvent::PipeCleared { pipe: pipe.id });
                }
            }
            pipe.advance(&self.params);
        }
        self.eliminate(members, |event| matches!(event, SimulationEvent::Collided { .. }));

        if cleared {
            self.score += 1;
            for bird in &self.birds {
                if let Some(member) = members.get_mut(bird.member) {
                    member.fitness.add(self.params.pass_bonus);
                }
            }
            let pipe = self.generator.spawn(self.params.spawn_x, &self.params);
            self.events.push(SimulationEvent::PipeSpawned {
                pipe: pipe.id,
                height: pipe.height,
            });
            self.pipes.push(pipe);
        }

        let retired: Vec<u64> = self
            .pipes
            .iter()
            .filter(|pipe| pipe.is_offscreen())
            .map(|pipe| pipe.id)
            .collect();
        self.pipes.retain(|pipe| !pipe.is_offscreen());
        self.events
            .extend(retired.into_iter().map(|pipe| SimulationEvent::PipeRetired { pipe }));

        let bird_height = BIRD_HEIGHT as f32;
        for bird in &self.birds {
            if bird.is_out_of_bounds(bird_height, self.params.ground_y) {
                self.events.push(SimulationEvent::OutOfBounds {
                    member: bird.member,
                    y: bird.y,
                });
            }
        }
        self.eliminate(members, |event| matches!(event, SimulationEvent::OutOfBounds { .. }));

        self.base.advance(self.params.scroll_speed);

        for event in &self.events {
            debug!(tick = self.tick, ?event, "simulation event");
        }

        if self.birds.is_empty() || self.score > self.params.score_cap {
            self.status = Status::Terminated;
        }
        self.status
    }

    /// Applies the elimination events selected by `filter`: collisions are
    /// penalized once per bird, then every eliminated bird is removed.
    fn eliminate(&mut self, members: &mut [Member<'_>], filter: impl Fn(&SimulationEvent) -> bool) {
        for event in self.events.iter().filter(|event| filter(event)) {
            let Some(member_id) = event.eliminated_member() else {
                continue;
            };
            let Some(bird) = self
                .birds
                .iter_mut()
                .find(|bird| bird.member == member_id && bird.alive)
            else {
                continue;
            };
            bird.alive = false;

            if matches!(event, SimulationEvent::Collided { .. }) {
                if let Some(member) = members.get_mut(member_id) {
                    member.fitness.add(-self.params.collision_penalty);
                }
            }
        }
        self.birds.retain(|bird| bird.alive);
    }
}
