// src/strategy/arrivals.rs

use crate::simulation::config::{MINUTES_PER_DAY, MINUTES_PER_HOUR};
use crate::simulation::random::RandomSource;
use crate::strategy::traits::ArrivalProcess;

// =========================================================================
// 1. Residual Arrivals (stochastic rounding)
// =========================================================================

/// Turns a daily order volume into whole per-tick counts.
///
/// With `λ = orders_per_day / 1440`, each tick yields `floor(λ)` orders plus
/// one more with probability `λ - floor(λ)`. One uniform draw per tick, and
/// the long-run rate is exactly `λ`.
#[derive(Debug, Clone)]
pub struct ResidualArrivals {
    whole: u32,
    remainder: f64,
}

impl ResidualArrivals {
    pub fn new(orders_per_day: f64) -> Self {
        let lambda = if orders_per_day.is_finite() {
            orders_per_day.max(0.0) / MINUTES_PER_DAY as f64
        } else {
            0.0
        };
        let whole = lambda.floor();
        Self {
            whole: whole as u32,
            remainder: lambda - whole,
        }
    }

    /// Expected arrivals per tick.
    pub fn rate_per_tick(&self) -> f64 {
        self.whole as f64 + self.remainder
    }
}

impl ArrivalProcess for ResidualArrivals {
    fn name(&self) -> &'static str {
        "residual"
    }

    fn sample(&mut self, _tick: u64, rng: &mut RandomSource) -> u32 {
        let extra = u32::from(rng.uniform() < self.remainder);
        self.whole + extra
    }
}

// =========================================================================
// 2. Normal Arrivals
// =========================================================================

/// Per-tick arrivals drawn from a rounded, non-negative normal distribution.
#[derive(Debug, Clone)]
pub struct NormalArrivals {
    mean_per_tick: f64,
    std_per_tick: f64,
}

impl NormalArrivals {
    /// Mean and standard deviation are given in orders per hour.
    pub fn per_hour(mean: f64, std: f64) -> Self {
        Self {
            mean_per_tick: mean / MINUTES_PER_HOUR as f64,
            std_per_tick: std / MINUTES_PER_HOUR as f64,
        }
    }
}

impl ArrivalProcess for NormalArrivals {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn sample(&mut self, _tick: u64, rng: &mut RandomSource) -> u32 {
        rng.normal_count(self.mean_per_tick, self.std_per_tick)
    }
}

// =========================================================================
// 3. Scheduled Arrivals
// =========================================================================

/// Replays a fixed arrival count per tick; zero once the schedule runs out.
///
/// Consumes no randomness, which makes it the tool for scripted scenarios.
#[derive(Debug, Clone)]
pub struct ScheduledArrivals {
    schedule: Vec<u32>,
}

impl ScheduledArrivals {
    pub fn new(schedule: Vec<u32>) -> Self {
        Self { schedule }
    }

    /// `count` orders at `tick`, nothing otherwise.
    pub fn single_burst(tick: u64, count: u32) -> Self {
        let mut schedule = vec![0; tick as usize + 1];
        schedule[tick as usize] = count;
        Self::new(schedule)
    }
}

impl ArrivalProcess for ScheduledArrivals {
    fn name(&self) -> &'static str {
        "scheduled"
    }

    fn sample(&mut self, tick: u64, _rng: &mut RandomSource) -> u32 {
        usize::try_from(tick)
            .ok()
            .and_then(|i| self.schedule.get(i).copied())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residual_splits_rate_into_whole_and_fraction() {
        let arrivals = ResidualArrivals::new(3600.0);
        assert_eq!(arrivals.whole, 2);
        assert!((arrivals.remainder - 0.5).abs() < 1e-12);
        assert!((arrivals.rate_per_tick() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn residual_long_run_rate_converges() {
        let mut arrivals = ResidualArrivals::new(500.0);
        let mut rng = RandomSource::new(42);
        let ticks = 200_000u64;
        let total: u64 = (0..ticks)
            .map(|t| u64::from(arrivals.sample(t, &mut rng)))
            .sum();
        let observed = total as f64 / ticks as f64;
        let expected = 500.0 / 1440.0;
        assert!((observed - expected).abs() < 0.01, "observed {observed}");
    }

    #[test]
    fn residual_counts_stay_within_one_of_floor() {
        let mut arrivals = ResidualArrivals::new(5000.0);
        let mut rng = RandomSource::new(9);
        for t in 0..1000 {
            let n = arrivals.sample(t, &mut rng);
            assert!(n == 3 || n == 4, "got {n}");
        }
    }

    #[test]
    fn zero_rate_never_arrives() {
        let mut arrivals = ResidualArrivals::new(0.0);
        let mut rng = RandomSource::new(1);
        assert!((0..1000).all(|t| arrivals.sample(t, &mut rng) == 0));

        let mut negative = ResidualArrivals::new(-50.0);
        assert_eq!(negative.sample(0, &mut rng), 0);
    }

    #[test]
    fn normal_with_zero_std_is_the_rounded_mean() {
        // 150/h = 2.5 per tick, ties go to the even count
        let mut arrivals = NormalArrivals::per_hour(150.0, 0.0);
        let mut rng = RandomSource::new(5);
        assert_eq!(arrivals.sample(0, &mut rng), 2);
    }

    #[test]
    fn half_an_order_per_tick_with_zero_std_never_arrives() {
        // 30/h = 0.5 per tick
        let mut arrivals = NormalArrivals::per_hour(30.0, 0.0);
        let mut rng = RandomSource::new(5);
        assert!((0..60).all(|t| arrivals.sample(t, &mut rng) == 0));
    }

    #[test]
    fn schedule_runs_out_to_zero() {
        let mut arrivals = ScheduledArrivals::new(vec![2, 0, 1]);
        let mut rng = RandomSource::new(0);
        let counts: Vec<u32> = (0..5).map(|t| arrivals.sample(t, &mut rng)).collect();
        assert_eq!(counts, vec![2, 0, 1, 0, 0]);

        let mut burst = ScheduledArrivals::single_burst(2, 4);
        let counts: Vec<u32> = (0..4).map(|t| burst.sample(t, &mut rng)).collect();
        assert_eq!(counts, vec![0, 0, 4, 0]);
    }
}
