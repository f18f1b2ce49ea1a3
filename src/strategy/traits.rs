// src/strategy/traits.rs

use crate::simulation::floor::Floor;
use crate::simulation::random::RandomSource;
use std::fmt::Debug;

/// Decides how many new orders show up in a tick.
///
/// We require `Send + Sync` so a simulation can be moved to a worker thread
/// by whatever drives it.
pub trait ArrivalProcess: Debug + Send + Sync {
    /// Short name used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Number of orders arriving at `tick`.
    fn sample(&mut self, tick: u64, rng: &mut RandomSource) -> u32;
}

/// What the service side did in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceOutcome {
    /// Orders the floor could have handled this tick.
    pub capacity: u32,
    /// Orders taken out of the lane queue.
    pub started: u32,
    /// Orders that reached `Complete`.
    pub completed: u32,
}

/// Moves orders from the lane queue to completion.
pub trait ServiceModel: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this model serves orders through the worker pool.
    ///
    /// Models that do not are built without workers.
    fn uses_workers(&self) -> bool {
        true
    }

    /// Runs one tick of service after arrivals have been queued.
    fn serve(&mut self, floor: &mut Floor<'_>, rng: &mut RandomSource) -> ServiceOutcome;
}
