// src/simulation/engine.rs

use crate::model::order::{Order, OrderRecord};
use crate::model::queues::WaitingQueue;
use crate::model::worker::{Worker, WorkerStatus};
use crate::simulation::config::{CapacityConfig, SimulationConfig, MINUTES_PER_HOUR};
use crate::simulation::floor::Floor;
use crate::simulation::metrics::{
    on_time_percent, orders_per_hour, DayLedger, Metrics, RunSummary, TickRecord,
};
use crate::simulation::random::RandomSource;
use crate::strategy::arrivals::{NormalArrivals, ResidualArrivals};
use crate::strategy::service::{CapacityService, StagedPipeline};
use crate::strategy::traits::{ArrivalProcess, ServiceModel};
use tracing::info;

/// The warehouse: lane queue, worker pool, shipped orders and the clock.
///
/// Advances strictly one tick at a time through [`WarehouseSimulation::step`].
/// State is consistent between any two steps, so a driver may stop anywhere.
pub struct WarehouseSimulation {
    config: SimulationConfig,
    rng: RandomSource,

    // Interchangeable arrival and service strategies
    arrivals: Box<dyn ArrivalProcess>,
    service: Box<dyn ServiceModel>,

    tick: u64,
    next_order_id: u64,
    waiting: WaitingQueue,
    workers: Vec<Worker>,
    completed: Vec<Order>,
    ledger: DayLedger,
    history: Vec<TickRecord>,
}

impl WarehouseSimulation {
    /// The multi-stage worker pipeline fed by residual arrivals.
    pub fn new(config: SimulationConfig) -> Self {
        let config = config.clamped();
        let arrivals = ResidualArrivals::new(config.orders_per_day);
        let service = StagedPipeline::from_mean_minutes(config.mean_minutes_per_order);
        Self::with_strategies(config, Box::new(arrivals), Box::new(service))
    }

    /// The single-stage model: normal arrivals against a normal pick capacity.
    ///
    /// Only `seed` and `sla_minutes` are read from `config`.
    pub fn capacity_model(config: SimulationConfig, capacity: &CapacityConfig) -> Self {
        let arrivals =
            NormalArrivals::per_hour(capacity.arrival_mean_per_hour, capacity.arrival_std_per_hour);
        let service =
            CapacityService::per_hour(capacity.pick_mean_per_hour, capacity.pick_std_per_hour);
        Self::with_strategies(config, Box::new(arrivals), Box::new(service))
    }

    pub fn with_strategies(
        config: SimulationConfig,
        arrivals: Box<dyn ArrivalProcess>,
        service: Box<dyn ServiceModel>,
    ) -> Self {
        let config = config.clamped();
        let workers = if service.uses_workers() {
            (0..config.worker_count).map(Worker::new).collect()
        } else {
            Vec::new()
        };

        Self {
            rng: RandomSource::new(config.seed),
            config,
            arrivals,
            service,
            tick: 0,
            next_order_id: 0,
            waiting: WaitingQueue::new(),
            workers,
            completed: Vec::new(),
            ledger: DayLedger::new(),
            history: Vec::new(),
        }
    }

    /// Runs `ticks` steps back to back and returns their records.
    pub fn run(&mut self, ticks: u64) -> &[TickRecord] {
        let start = self.history.len();
        for _ in 0..ticks {
            self.step();
        }
        &self.history[start..]
    }

    /// Advances the simulation by one tick.
    ///
    /// Arrivals join the lane, the service model moves orders along, then
    /// the clock moves forward.
    pub fn step(&mut self) -> TickRecord {
        let tick = self.tick;

        // =================================================================
        // PHASE 1: Arrivals
        // =================================================================
        let arrivals = self.arrivals.sample(tick, &mut self.rng);
        for _ in 0..arrivals {
            let order = Order::new(self.next_order_id, tick);
            self.next_order_id += 1;
            self.waiting.push_arrival(order);
        }
        self.ledger.record_created(tick, arrivals);

        // =================================================================
        // PHASE 2: Service (stage countdowns, completions, assignment)
        // =================================================================
        let outcome = {
            let mut floor = Floor::new(
                tick,
                self.config.sla_minutes,
                &mut self.waiting,
                &mut self.workers,
                &mut self.completed,
                &mut self.ledger,
            );
            self.service.serve(&mut floor, &mut self.rng)
        };

        // =================================================================
        // PHASE 3: Record & advance
        // =================================================================
        self.tick += 1;

        let metrics = self.metrics();
        let record = TickRecord {
            tick,
            arrivals,
            capacity: outcome.capacity,
            started: outcome.started,
            completed: outcome.completed,
            backlog: metrics.lane_queue_depth,
            busy_workers: metrics.busy_workers,
            cum_arrivals: metrics.created,
            cum_completed: metrics.completed,
            cum_on_time: metrics.on_time,
            on_time_pct: metrics.on_time_percent,
            avg_dwell: metrics.average_dwell,
            orders_per_hour: metrics.orders_per_hour,
        };

        if self.tick % MINUTES_PER_HOUR == 0 {
            info!(
                clock = %metrics.clock_label,
                backlog = metrics.lane_queue_depth,
                busy = metrics.busy_workers,
                completed = metrics.completed,
                on_time_pct = metrics.on_time_percent,
                "hourly status"
            );
        }

        self.history.push(record.clone());
        record
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// `"<arrivals>/<service>"`, e.g. `residual/pipeline`.
    pub fn model_name(&self) -> String {
        format!("{}/{}", self.arrivals.name(), self.service.name())
    }

    pub fn waiting_queue(&self) -> &WaitingQueue {
        &self.waiting
    }

    /// Completed orders in completion order.
    pub fn completed(&self) -> &[Order] {
        &self.completed
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn worker_statuses(&self) -> Vec<WorkerStatus> {
        self.workers.iter().map(Worker::status).collect()
    }

    pub fn busy_workers(&self) -> usize {
        self.workers.iter().filter(|w| !w.is_idle()).count()
    }

    /// Orders created since the start of the run.
    pub fn total_created(&self) -> u64 {
        self.next_order_id
    }

    pub fn created_by_day(&self) -> Vec<u64> {
        self.ledger.created_by_day()
    }

    pub fn completed_by_day(&self) -> Vec<u64> {
        self.ledger.completed_by_day()
    }

    pub fn on_time_by_day(&self) -> Vec<u64> {
        self.ledger.on_time_by_day()
    }

    /// Per-tick records for every step so far.
    pub fn history(&self) -> &[TickRecord] {
        &self.history
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::collect(
            self.tick,
            &self.ledger,
            &self.completed,
            self.waiting.len(),
            self.busy_workers(),
        )
    }

    pub fn order_records(&self) -> Vec<OrderRecord> {
        self.completed
            .iter()
            .filter_map(|order| OrderRecord::from_order(order, self.config.sla_minutes))
            .collect()
    }

    pub fn summary(&self) -> RunSummary {
        let totals = self.ledger.totals();
        let dwells = self.completed.iter().filter_map(Order::dwell);
        let (dwell_sum, max_dwell) =
            dwells.fold((0u64, 0u64), |(sum, max), d| (sum + d, max.max(d)));
        let peak_backlog = self.history.iter().map(|r| r.backlog).max().unwrap_or(0);

        RunSummary {
            model: self.model_name(),
            ticks: self.tick,
            created: self.total_created(),
            completed: totals.completed,
            on_time: totals.on_time,
            late: totals.completed - totals.on_time,
            backlog: self.total_created() - totals.completed,
            peak_backlog,
            on_time_percent: on_time_percent(totals.on_time, totals.completed),
            average_dwell: if totals.completed == 0 {
                0.0
            } else {
                dwell_sum as f64 / totals.completed as f64
            },
            max_dwell,
            orders_per_hour: orders_per_hour(totals.completed, self.tick),
        }
    }
}
