// src/simulation/metrics.rs

use crate::model::order::Order;
use crate::simulation::config::{MINUTES_PER_DAY, MINUTES_PER_HOUR};
use serde::Serialize;

/// Smallest elapsed time (hours) used when computing throughput.
const MIN_ELAPSED_HOURS: f64 = 1e-9;

pub fn day_of(tick: u64) -> usize {
    (tick / MINUTES_PER_DAY) as usize
}

/// Day index and 12-hour wall time for a tick, e.g. `Day 1 09:05 AM`.
///
/// Days are numbered from 1 and the run starts at midnight.
pub fn clock_label(tick: u64) -> String {
    let day = tick / MINUTES_PER_DAY + 1;
    let minute_of_day = tick % MINUTES_PER_DAY;
    let hour = minute_of_day / MINUTES_PER_HOUR;
    let minute = minute_of_day % MINUTES_PER_HOUR;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("Day {} {:02}:{:02} {}", day, hour12, minute, suffix)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayCounts {
    pub created: u64,
    pub completed: u64,
    pub on_time: u64,
}

/// Per-day event counters, captured as arrivals and completions happen.
///
/// A day appears once something happens on it (earlier days with no events
/// are filled with zeros); counts only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLedger {
    days: Vec<DayCounts>,
}

impl DayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn day_mut(&mut self, tick: u64) -> &mut DayCounts {
        let day = day_of(tick);
        if self.days.len() <= day {
            self.days.resize(day + 1, DayCounts::default());
        }
        &mut self.days[day]
    }

    pub fn record_created(&mut self, tick: u64, count: u32) {
        if count == 0 {
            return;
        }
        self.day_mut(tick).created += u64::from(count);
    }

    pub fn record_completed(&mut self, tick: u64, on_time: bool) {
        let day = self.day_mut(tick);
        day.completed += 1;
        if on_time {
            day.on_time += 1;
        }
    }

    pub fn days(&self) -> &[DayCounts] {
        &self.days
    }

    pub fn created_by_day(&self) -> Vec<u64> {
        self.days.iter().map(|d| d.created).collect()
    }

    pub fn completed_by_day(&self) -> Vec<u64> {
        self.days.iter().map(|d| d.completed).collect()
    }

    pub fn on_time_by_day(&self) -> Vec<u64> {
        self.days.iter().map(|d| d.on_time).collect()
    }

    pub fn totals(&self) -> DayCounts {
        self.days.iter().fold(DayCounts::default(), |acc, d| DayCounts {
            created: acc.created + d.created,
            completed: acc.completed + d.completed,
            on_time: acc.on_time + d.on_time,
        })
    }
}

/// Headline numbers derived from the current simulation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub tick: u64,
    pub clock_label: String,
    pub created: u64,
    pub completed: u64,
    pub on_time: u64,
    pub on_time_percent: f64,
    pub average_dwell: f64,
    pub orders_per_hour: f64,
    pub lane_queue_depth: usize,
    pub busy_workers: usize,
}

impl Metrics {
    /// `tick` is the number of ticks already simulated.
    pub fn collect(
        tick: u64,
        ledger: &DayLedger,
        completed: &[Order],
        lane_queue_depth: usize,
        busy_workers: usize,
    ) -> Self {
        let totals = ledger.totals();
        let dwell_sum: u64 = completed.iter().filter_map(Order::dwell).sum();

        Self {
            tick,
            clock_label: clock_label(tick),
            created: totals.created,
            completed: totals.completed,
            on_time: totals.on_time,
            on_time_percent: on_time_percent(totals.on_time, totals.completed),
            average_dwell: ratio(dwell_sum as f64, totals.completed),
            orders_per_hour: orders_per_hour(totals.completed, tick),
            lane_queue_depth,
            busy_workers,
        }
    }

    /// Orders still in the building: waiting plus in service.
    pub fn backlog(&self) -> u64 {
        self.created - self.completed
    }
}

pub fn on_time_percent(on_time: u64, completed: u64) -> f64 {
    ratio(on_time as f64 * 100.0, completed)
}

pub fn orders_per_hour(completed: u64, elapsed_ticks: u64) -> f64 {
    let hours = (elapsed_ticks as f64 / MINUTES_PER_HOUR as f64).max(MIN_ELAPSED_HOURS);
    completed as f64 / hours
}

fn ratio(numerator: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        numerator / count as f64
    }
}

/// Everything that happened in one tick, plus the running totals after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    pub arrivals: u32,
    pub capacity: u32,
    pub started: u32,
    pub completed: u32,
    pub backlog: usize,
    pub busy_workers: usize,
    pub cum_arrivals: u64,
    pub cum_completed: u64,
    pub cum_on_time: u64,
    pub on_time_pct: f64,
    pub avg_dwell: f64,
    pub orders_per_hour: f64,
}

/// End-of-run roll-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub model: String,
    pub ticks: u64,
    pub created: u64,
    pub completed: u64,
    pub on_time: u64,
    pub late: u64,
    pub backlog: u64,
    pub peak_backlog: usize,
    pub on_time_percent: f64,
    pub average_dwell: f64,
    pub max_dwell: u64,
    pub orders_per_hour: f64,
}
