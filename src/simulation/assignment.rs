// src/simulation/assignment.rs

use crate::model::queues::WaitingQueue;
use crate::model::worker::Worker;
use tracing::debug;

/// Gives every idle worker, lowest id first, the oldest waiting order.
///
/// The order enters `Pick` with `pick_duration` ticks on the clock. Stops
/// early once the lane is empty. Returns how many orders were started.
pub fn assign_idle_workers(
    workers: &mut [Worker],
    waiting: &mut WaitingQueue,
    pick_duration: u32,
) -> u32 {
    let mut started = 0;

    for worker in workers.iter_mut().filter(|w| w.is_idle()) {
        let Some(order) = waiting.pop_next() else {
            break;
        };
        debug!(worker_id = worker.id(), order_id = order.id(), "pick started");
        worker.assign(order.start_pick(), pick_duration);
        started += 1;
    }

    started
}
