// src/model/queues.rs

use crate::model::order::Order;
use std::collections::VecDeque;

/// The lane queue: orders that have arrived but have no worker yet.
///
/// Strict FIFO. Orders go in at the back when they arrive and leave from the
/// front when a worker frees up.
#[derive(Debug, Clone, Default)]
pub struct WaitingQueue {
    buffer: VecDeque<Order>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new order joins the back of the lane.
    pub fn push_arrival(&mut self, order: Order) {
        self.buffer.push_back(order);
    }

    /// The oldest waiting order leaves the lane.
    pub fn pop_next(&mut self) -> Option<Order> {
        self.buffer.pop_front()
    }

    pub fn front(&self) -> Option<&Order> {
        self.buffer.front()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Waiting orders, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.buffer.iter()
    }

    /// Age in ticks of the order at the head of the lane.
    pub fn oldest_age(&self, now: u64) -> Option<u64> {
        self.buffer.front().map(|order| order.age(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_in_arrival_order() {
        let mut queue = WaitingQueue::new();
        for id in 0..4 {
            queue.push_arrival(Order::new(id, id));
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.oldest_age(10), Some(10));

        let served: Vec<u64> = std::iter::from_fn(|| queue.pop_next())
            .map(|order| order.id())
            .collect();
        assert_eq!(served, vec![0, 1, 2, 3]);
        assert!(queue.is_empty());
        assert_eq!(queue.oldest_age(10), None);
    }
}
