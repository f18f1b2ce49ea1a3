// src/simulation/config.rs

use crate::error::ConfigError;

/// One tick is one simulated minute.
pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Parameters shared by every engine variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub worker_count: usize,
    /// Expected order volume per simulated day.
    pub orders_per_day: f64,
    /// Average total handling time of one order, split across the stages.
    pub mean_minutes_per_order: f64,
    pub seed: u64,
    /// Orders whose dwell time exceeds this are late.
    pub sla_minutes: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            worker_count: 8,
            orders_per_day: 500.0,
            mean_minutes_per_order: 12.0,
            seed: 42,
            sla_minutes: 240,
        }
    }
}

impl SimulationConfig {
    /// Rejects values that no amount of clamping can make meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("orders_per_day", self.orders_per_day)?;
        finite("mean_minutes_per_order", self.mean_minutes_per_order)?;
        Ok(())
    }

    /// Copy with every field pulled into its safe range.
    ///
    /// Rates are non-negative and handling time is at least one tick.
    /// Non-finite values fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let orders_per_day = if self.orders_per_day.is_finite() {
            self.orders_per_day.max(0.0)
        } else {
            defaults.orders_per_day
        };
        let mean_minutes_per_order = if self.mean_minutes_per_order.is_finite() {
            self.mean_minutes_per_order.max(1.0)
        } else {
            defaults.mean_minutes_per_order
        };

        Self {
            orders_per_day,
            mean_minutes_per_order,
            ..self.clone()
        }
    }
}

/// Parameters of the single-stage capacity model.
///
/// Arrivals and pick capacity are both drawn per tick from rounded,
/// non-negative normal distributions given in orders per hour.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityConfig {
    pub arrival_mean_per_hour: f64,
    pub arrival_std_per_hour: f64,
    pub pick_mean_per_hour: f64,
    pub pick_std_per_hour: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            arrival_mean_per_hour: 300.0,
            arrival_std_per_hour: 60.0,
            pick_mean_per_hour: 300.0,
            pick_std_per_hour: 60.0,
        }
    }
}

impl CapacityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("arrival_mean_per_hour", self.arrival_mean_per_hour)?;
        finite("arrival_std_per_hour", self.arrival_std_per_hour)?;
        finite("pick_mean_per_hour", self.pick_mean_per_hour)?;
        finite("pick_std_per_hour", self.pick_std_per_hour)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
