//! Discrete-time simulation of a warehouse order-fulfillment pipeline.
//!
//! Orders arrive into a FIFO lane queue, are carried through Pick, Stage and
//! Ship by a fixed worker pool, and are scored against an SLA on completion.
//! Every random decision comes from one seeded source, so a configuration
//! fully determines a run.

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigError, ReportError};
pub use model::order::{Order, OrderRecord, OrderStage};
pub use model::worker::{Worker, WorkerStatus};
pub use simulation::config::{CapacityConfig, SimulationConfig};
pub use simulation::driver::{CancelHandle, Driver, DriverOutcome};
pub use simulation::engine::WarehouseSimulation;
pub use simulation::metrics::{Metrics, RunSummary, TickRecord};
