// src/strategy/service.rs

use crate::simulation::assignment::assign_idle_workers;
use crate::simulation::config::MINUTES_PER_HOUR;
use crate::simulation::floor::Floor;
use crate::simulation::random::RandomSource;
use crate::simulation::stages::{advance_in_service, StageDurations};
use crate::strategy::traits::{ServiceModel, ServiceOutcome};

// =========================================================================
// 1. Staged Pipeline
// =========================================================================

/// The worker-pool pipeline: each worker carries one order through
/// Pick, Stage and Ship before taking the next one from the lane.
#[derive(Debug, Clone)]
pub struct StagedPipeline {
    durations: StageDurations,
}

impl StagedPipeline {
    pub fn new(durations: StageDurations) -> Self {
        Self { durations }
    }

    pub fn from_mean_minutes(mean_minutes_per_order: f64) -> Self {
        Self::new(StageDurations::from_mean_minutes(mean_minutes_per_order))
    }
}

impl ServiceModel for StagedPipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn serve(&mut self, floor: &mut Floor<'_>, _rng: &mut RandomSource) -> ServiceOutcome {
        // Advance first so workers finishing this tick can pick again right away
        let completed = advance_in_service(floor, &self.durations);
        let idle = floor.workers.iter().filter(|w| w.is_idle()).count() as u32;
        let started = assign_idle_workers(floor.workers, floor.waiting, self.durations.pick);

        ServiceOutcome {
            capacity: idle,
            started,
            completed,
        }
    }
}

// =========================================================================
// 2. Capacity Service
// =========================================================================

/// Single combined queue-to-ship stage with a random hourly capacity.
///
/// Each tick draws a capacity and completes that many orders from the front
/// of the lane on the spot. No workers, no stage durations.
#[derive(Debug, Clone)]
pub struct CapacityService {
    mean_per_tick: f64,
    std_per_tick: f64,
}

impl CapacityService {
    /// Mean and standard deviation are given in orders per hour.
    pub fn per_hour(mean: f64, std: f64) -> Self {
        Self {
            mean_per_tick: mean / MINUTES_PER_HOUR as f64,
            std_per_tick: std / MINUTES_PER_HOUR as f64,
        }
    }
}

impl ServiceModel for CapacityService {
    fn name(&self) -> &'static str {
        "capacity"
    }

    fn uses_workers(&self) -> bool {
        false
    }

    fn serve(&mut self, floor: &mut Floor<'_>, rng: &mut RandomSource) -> ServiceOutcome {
        let capacity = rng.normal_count(self.mean_per_tick, self.std_per_tick);

        let mut served = 0;
        while served < capacity {
            let Some(order) = floor.waiting.pop_next() else {
                break;
            };
            floor.outbound.ship(order);
            served += 1;
        }

        ServiceOutcome {
            capacity,
            started: served,
            completed: served,
        }
    }
}
