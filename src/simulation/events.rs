//! Events recorded during a tick.
//!
//! Passes over birds and pipes only record what happened; removals are
//! applied once a pass has finished so no collection is mutated while it is
//! being iterated.

/// Something that changed the population or the pipe set during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A bird hit a pipe and was eliminated.
    Collided {
        /// Population member of the bird.
        member: usize,
        /// Pipe that was hit.
        pipe: u64,
    },
    /// A bird touched the ground or flew above the ceiling.
    OutOfBounds {
        /// Population member of the bird.
        member: usize,
        /// Height at elimination.
        y: f32,
    },
    /// The population flew past a pipe.
    PipeCleared {
        /// Pipe that was passed.
        pipe: u64,
    },
    /// A new pipe entered the run.
    PipeSpawned {
        /// New pipe.
        pipe: u64,
        /// Top of its opening.
        height: f32,
    },
    /// A pipe scrolled off screen and was dropped.
    PipeRetired {
        /// Dropped pipe.
        pipe: u64,
    },
}

impl SimulationEvent {
    /// Population member eliminated by this event, if any.
    pub fn eliminated_member(&self) -> Option<usize> {
        match self {
            SimulationEvent::Collided { member, .. } | SimulationEvent::OutOfBounds { member, .. } => {
                Some(*member)
            }
            _ => None,
        }
    }
}
