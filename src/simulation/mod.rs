pub mod assignment;
pub mod config;
pub mod driver;
pub mod engine;
pub mod floor;
pub mod metrics;
pub mod random;
pub mod stages;
