// src/simulation/floor.rs

use crate::model::order::Order;
use crate::model::queues::WaitingQueue;
use crate::model::worker::Worker;
use crate::simulation::metrics::DayLedger;
use tracing::debug;

/// Mutable view of the warehouse handed to a service model for one tick.
///
/// The fields borrow disjoint parts of the engine, so a service model can
/// walk `workers` while pushing finished orders through `outbound`.
pub struct Floor<'a> {
    pub tick: u64,
    pub waiting: &'a mut WaitingQueue,
    pub workers: &'a mut [Worker],
    pub outbound: Outbound<'a>,
}

impl<'a> Floor<'a> {
    pub fn new(
        tick: u64,
        sla_minutes: u64,
        waiting: &'a mut WaitingQueue,
        workers: &'a mut [Worker],
        completed: &'a mut Vec<Order>,
        ledger: &'a mut DayLedger,
    ) -> Self {
        Self {
            tick,
            waiting,
            workers,
            outbound: Outbound {
                tick,
                sla_minutes,
                completed,
                ledger,
            },
        }
    }
}

/// The shipping dock: where finished orders are stamped and counted.
pub struct Outbound<'a> {
    tick: u64,
    sla_minutes: u64,
    completed: &'a mut Vec<Order>,
    ledger: &'a mut DayLedger,
}

impl Outbound<'_> {
    /// Completes `order` at the current tick. Returns whether it met the SLA.
    pub fn ship(&mut self, order: Order) -> bool {
        let order = order.complete_at(self.tick);
        let on_time = order.is_on_time(self.sla_minutes).unwrap_or(false);
        debug!(
            order_id = order.id(),
            dwell = order.dwell().unwrap_or(0),
            on_time,
            "order complete"
        );
        self.ledger.record_completed(self.tick, on_time);
        self.completed.push(order);
        on_time
    }
}
