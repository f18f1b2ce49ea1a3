// src/simulation/stages.rs

use crate::model::order::OrderStage;
use crate::simulation::floor::Floor;

const PICK_SHARE: f64 = 0.5;
const STAGE_SHARE: f64 = 0.3;
const SHIP_SHARE: f64 = 0.2;

/// Ticks each in-service stage takes, derived once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDurations {
    pub pick: u32,
    pub stage: u32,
    pub ship: u32,
}

impl StageDurations {
    /// Splits the mean handling time 50/30/20 across Pick/Stage/Ship.
    /// Every stage takes at least one tick.
    pub fn from_mean_minutes(mean_minutes_per_order: f64) -> Self {
        Self {
            pick: share(mean_minutes_per_order, PICK_SHARE),
            stage: share(mean_minutes_per_order, STAGE_SHARE),
            ship: share(mean_minutes_per_order, SHIP_SHARE),
        }
    }

    /// Duration of `stage`, or `None` for stages no worker spends time in.
    pub fn for_stage(&self, stage: OrderStage) -> Option<u32> {
        match stage {
            OrderStage::Pick => Some(self.pick),
            OrderStage::Stage => Some(self.stage),
            OrderStage::Ship => Some(self.ship),
            OrderStage::New | OrderStage::Complete => None,
        }
    }

    pub fn total(&self) -> u32 {
        self.pick + self.stage + self.ship
    }
}

fn share(total: f64, fraction: f64) -> u32 {
    let ticks = (total * fraction).round();
    if ticks.is_nan() || ticks < 1.0 {
        1
    } else {
        ticks as u32
    }
}

/// Counts down every busy worker by one tick and moves expired orders on.
///
/// An order leaving `Ship` is completed through the floor's outbound dock
/// and its worker goes idle. Returns how many orders completed.
pub fn advance_in_service(floor: &mut Floor<'_>, durations: &StageDurations) -> u32 {
    let mut completed = 0;

    for worker in floor.workers.iter_mut() {
        if !worker.tick_down() {
            continue;
        }
        let Some(order) = worker.release() else {
            continue;
        };

        match order.stage() {
            OrderStage::Ship => {
                floor.outbound.ship(order);
                completed += 1;
            }
            _ => {
                let order = order.advance();
                let duration = durations.for_stage(order.stage()).unwrap_or(1);
                worker.assign(order, duration);
            }
        }
    }

    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::Order;
    use crate::model::queues::WaitingQueue;
    use crate::model::worker::Worker;
    use crate::simulation::metrics::DayLedger;

    #[test]
    fn ten_minute_orders_split_five_three_two() {
        let durations = StageDurations::from_mean_minutes(10.0);
        assert_eq!(
            durations,
            StageDurations {
                pick: 5,
                stage: 3,
                ship: 2
            }
        );
        assert_eq!(durations.total(), 10);
    }

    #[test]
    fn default_handling_time_rounds_each_share() {
        // 6.0 / 3.6 / 2.4
        let durations = StageDurations::from_mean_minutes(12.0);
        assert_eq!((durations.pick, durations.stage, durations.ship), (6, 4, 2));
    }

    #[test]
    fn short_orders_take_at_least_one_tick_per_stage() {
        let durations = StageDurations::from_mean_minutes(1.0);
        assert_eq!((durations.pick, durations.stage, durations.ship), (1, 1, 1));
        assert_eq!(durations.for_stage(OrderStage::New), None);
        assert_eq!(durations.for_stage(OrderStage::Complete), None);
    }

    #[test]
    fn worker_walks_order_through_every_stage() {
        let durations = StageDurations::from_mean_minutes(10.0);
        let mut waiting = WaitingQueue::new();
        let mut workers = vec![Worker::new(0)];
        let mut completed = Vec::new();
        let mut ledger = DayLedger::new();
        workers[0].assign(Order::new(0, 0).start_pick(), durations.pick);

        let mut seen = Vec::new();
        for tick in 1..=10 {
            let mut floor = Floor::new(
                tick,
                240,
                &mut waiting,
                &mut workers,
                &mut completed,
                &mut ledger,
            );
            let done = advance_in_service(&mut floor, &durations);
            if let Some(order) = workers[0].order() {
                seen.push(order.stage());
            }
            assert_eq!(done == 1, tick == 10);
        }

        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(workers[0].is_idle());
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].complete_tick(), Some(10));
        assert_eq!(ledger.on_time_by_day(), vec![1]);
    }
}
