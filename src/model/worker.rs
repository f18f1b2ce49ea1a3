// src/model/worker.rs

use crate::model::order::{Order, OrderStage};
use serde::Serialize;

/// One unit of service capacity. Holds at most one order at a time.
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    owned_order: Option<Order>,
    // Ticks left in the owned order's current stage
    remaining_time: u32,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            owned_order: None,
            remaining_time: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_idle(&self) -> bool {
        self.owned_order.is_none()
    }

    pub fn order(&self) -> Option<&Order> {
        self.owned_order.as_ref()
    }

    /// Ticks left in the current stage, or `None` while idle.
    pub fn remaining_time(&self) -> Option<u32> {
        self.owned_order.as_ref().map(|_| self.remaining_time)
    }

    /// Take ownership of `order` for `duration` ticks of its current stage.
    pub fn assign(&mut self, order: Order, duration: u32) {
        debug_assert!(self.is_idle(), "worker {} already holds an order", self.id);
        self.owned_order = Some(order);
        self.remaining_time = duration.max(1);
    }

    /// Count one tick of work. Returns `true` when the current stage has run out.
    pub fn tick_down(&mut self) -> bool {
        if self.owned_order.is_none() {
            return false;
        }
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.remaining_time == 0
    }

    /// Hand the owned order back, leaving the worker idle.
    pub fn release(&mut self) -> Option<Order> {
        self.remaining_time = 0;
        self.owned_order.take()
    }

    pub fn status(&self) -> WorkerStatus {
        WorkerStatus {
            worker_id: self.id,
            order_id: self.owned_order.as_ref().map(Order::id),
            stage: self.owned_order.as_ref().map(Order::stage),
            remaining_time: self.remaining_time().unwrap_or(0),
        }
    }
}

/// Read-only snapshot of a worker for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerStatus {
    pub worker_id: usize,
    pub order_id: Option<u64>,
    pub stage: Option<OrderStage>,
    pub remaining_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_worker_does_not_count_down() {
        let mut worker = Worker::new(0);
        assert!(worker.is_idle());
        assert!(!worker.tick_down());
        assert_eq!(worker.remaining_time(), None);
    }

    #[test]
    fn countdown_expires_after_duration() {
        let mut worker = Worker::new(3);
        worker.assign(Order::new(1, 0).start_pick(), 3);
        assert!(!worker.tick_down());
        assert!(!worker.tick_down());
        assert!(worker.tick_down());
        assert_eq!(worker.remaining_time(), Some(0));
    }

    #[test]
    fn release_returns_order_and_goes_idle() {
        let mut worker = Worker::new(1);
        worker.assign(Order::new(9, 4).start_pick(), 2);
        let status = worker.status();
        assert_eq!(status.order_id, Some(9));
        assert_eq!(status.stage, Some(OrderStage::Pick));
        assert_eq!(status.remaining_time, 2);

        let order = worker.release().unwrap();
        assert_eq!(order.id(), 9);
        assert!(worker.is_idle());
        assert_eq!(worker.status().order_id, None);
    }
}
