// src/simulation/driver.rs

use crate::simulation::engine::WarehouseSimulation;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Shared stop flag. Clones point at the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOutcome {
    pub ticks_run: u64,
    pub cancelled: bool,
}

/// Steps one simulation on behalf of a caller.
///
/// The driver holds the only mutable borrow of the simulation while it
/// exists, and checks its cancel flag between ticks, so a stopped run is
/// always left on a tick boundary.
pub struct Driver<'a> {
    sim: &'a mut WarehouseSimulation,
    cancel: CancelHandle,
    pace: Option<Duration>,
}

impl<'a> Driver<'a> {
    pub fn new(sim: &'a mut WarehouseSimulation) -> Self {
        Self {
            sim,
            cancel: CancelHandle::new(),
            pace: None,
        }
    }

    /// Wait at least `interval` of wall time between ticks.
    pub fn with_pace(mut self, interval: Duration) -> Self {
        self.pace = Some(interval);
        self
    }

    /// Share an externally owned stop flag.
    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn simulation(&self) -> &WarehouseSimulation {
        &*self.sim
    }

    /// Steps up to `max_ticks` times, stopping early once cancelled.
    pub fn run(&mut self, max_ticks: u64) -> DriverOutcome {
        let start_tick = self.sim.tick();
        info!(start_tick, max_ticks, model = %self.sim.model_name(), "driver started");

        let mut timer = self.pace.map(PaceTimer::start);
        let mut ticks_run = 0;
        let mut cancelled = false;

        while ticks_run < max_ticks {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            if let Some(timer) = timer.as_mut() {
                timer.wait();
            }
            self.sim.step();
            ticks_run += 1;
        }
        drop(timer);

        info!(ticks_run, cancelled, end_tick = self.sim.tick(), "driver stopped");
        DriverOutcome {
            ticks_run,
            cancelled,
        }
    }
}

/// Fixed-interval wall-clock pacing, alive only for the duration of a run.
struct PaceTimer {
    interval: Duration,
    next: Instant,
}

impl PaceTimer {
    fn start(interval: Duration) -> Self {
        debug!(?interval, "pace timer armed");
        Self {
            interval,
            next: Instant::now(),
        }
    }

    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        self.next = self.next.max(now) + self.interval;
    }
}

impl Drop for PaceTimer {
    fn drop(&mut self) {
        debug!("pace timer released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationConfig;

    #[test]
    fn runs_the_requested_number_of_ticks() {
        let mut sim = WarehouseSimulation::new(SimulationConfig::default());
        let outcome = Driver::new(&mut sim).run(25);
        assert_eq!(
            outcome,
            DriverOutcome {
                ticks_run: 25,
                cancelled: false
            }
        );
        assert_eq!(sim.tick(), 25);
    }

    #[test]
    fn cancelled_driver_stops_on_a_tick_boundary() {
        let mut sim = WarehouseSimulation::new(SimulationConfig::default());
        sim.run(10);

        let cancel = CancelHandle::new();
        cancel.cancel();
        let outcome = Driver::new(&mut sim).with_cancel(cancel).run(100);
        assert!(outcome.cancelled);
        assert_eq!(outcome.ticks_run, 0);
        assert_eq!(sim.tick(), 10);
    }

    #[test]
    fn cancel_from_another_thread_halts_a_paced_run() {
        let mut sim = WarehouseSimulation::new(SimulationConfig::default());
        let mut driver = Driver::new(&mut sim).with_pace(Duration::from_millis(2));
        let cancel = driver.cancel_handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            cancel.cancel();
        });
        let outcome = driver.run(1_000_000);
        stopper.join().unwrap();

        assert!(outcome.cancelled);
        assert!(outcome.ticks_run < 1_000_000);
        assert_eq!(driver.simulation().tick(), outcome.ticks_run);
    }
}
