// src/model/order.rs

use serde::Serialize;
use std::fmt;

/// Where an order sits in the fulfillment pipeline.
///
/// The derive order of the variants is the lifecycle order, so `<` on two
/// stages means "earlier in the pipeline".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OrderStage {
    New,
    Pick,
    Stage,
    Ship,
    Complete,
}

impl OrderStage {
    pub const ALL: [OrderStage; 5] = [
        OrderStage::New,
        OrderStage::Pick,
        OrderStage::Stage,
        OrderStage::Ship,
        OrderStage::Complete,
    ];

    /// The stage an order moves to when its current stage finishes.
    pub fn next(self) -> Option<OrderStage> {
        match self {
            OrderStage::New => Some(OrderStage::Pick),
            OrderStage::Pick => Some(OrderStage::Stage),
            OrderStage::Stage => Some(OrderStage::Ship),
            OrderStage::Ship => Some(OrderStage::Complete),
            OrderStage::Complete => None,
        }
    }

    /// True for the stages during which a worker holds the order.
    pub fn is_in_service(self) -> bool {
        matches!(self, OrderStage::Pick | OrderStage::Stage | OrderStage::Ship)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStage::New => "New",
            OrderStage::Pick => "Pick",
            OrderStage::Stage => "Stage",
            OrderStage::Ship => "Ship",
            OrderStage::Complete => "Complete",
        }
    }
}

impl fmt::Display for OrderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single customer order.
///
/// Orders are plain records: every lifecycle change consumes the old value
/// and hands back the updated one, so there is never a second live copy of
/// an order that could drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: u64,
    created_tick: u64,
    stage: OrderStage,
    complete_tick: Option<u64>,
}

impl Order {
    pub fn new(id: u64, created_tick: u64) -> Self {
        Self {
            id,
            created_tick,
            stage: OrderStage::New,
            complete_tick: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn created_tick(&self) -> u64 {
        self.created_tick
    }

    pub fn stage(&self) -> OrderStage {
        self.stage
    }

    pub fn complete_tick(&self) -> Option<u64> {
        self.complete_tick
    }

    /// Hand a waiting order to a picker.
    pub fn start_pick(self) -> Self {
        debug_assert_eq!(self.stage, OrderStage::New, "only new orders can be picked");
        Self {
            stage: OrderStage::Pick,
            ..self
        }
    }

    /// Move to the next in-service stage (`Pick -> Stage -> Ship`).
    ///
    /// Completion carries a timestamp and goes through [`Order::complete_at`];
    /// calling this on a `Ship` or `Complete` order leaves it unchanged.
    pub fn advance(self) -> Self {
        match self.stage.next() {
            Some(next) if next.is_in_service() => Self { stage: next, ..self },
            _ => self,
        }
    }

    /// Mark the order complete at `tick`. The first completion wins.
    pub fn complete_at(self, tick: u64) -> Self {
        if self.complete_tick.is_some() {
            return self;
        }
        Self {
            stage: OrderStage::Complete,
            complete_tick: Some(tick.max(self.created_tick)),
            ..self
        }
    }

    /// Ticks between creation and completion, once completed.
    pub fn dwell(&self) -> Option<u64> {
        self.complete_tick.map(|done| done - self.created_tick)
    }

    /// Ticks spent in the system as of `now`, completed or not.
    pub fn age(&self, now: u64) -> u64 {
        self.complete_tick.unwrap_or(now).saturating_sub(self.created_tick)
    }

    pub fn is_on_time(&self, sla_minutes: u64) -> Option<bool> {
        self.dwell().map(|dwell| dwell <= sla_minutes)
    }
}

/// Flat, exportable view of a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub id: u64,
    pub created_tick: u64,
    pub complete_tick: u64,
    pub dwell: u64,
    pub on_time: bool,
}

impl OrderRecord {
    /// Builds the record for a completed order; `None` while it is still open.
    pub fn from_order(order: &Order, sla_minutes: u64) -> Option<Self> {
        let complete_tick = order.complete_tick()?;
        let dwell = complete_tick - order.created_tick();
        Some(Self {
            id: order.id(),
            created_tick: order.created_tick(),
            complete_tick,
            dwell,
            on_time: dwell <= sla_minutes,
        })
    }
}
