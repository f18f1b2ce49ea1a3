// src/io/board.rs

use crate::model::order::{Order, OrderStage};
use crate::simulation::engine::WarehouseSimulation;

const CELL_WIDTH: usize = 12;
/// Order cells shown per column before the rest is summarised.
const MAX_ROWS: usize = 6;

struct Column {
    stage: OrderStage,
    total: usize,
    cells: Vec<String>,
}

impl Column {
    fn new(stage: OrderStage, entries: Vec<String>) -> Self {
        let total = entries.len();
        let mut cells: Vec<String> = entries.into_iter().take(MAX_ROWS).collect();
        if total > MAX_ROWS {
            cells.pop();
            cells.push(format!("+{} more", total - (MAX_ROWS - 1)));
        }
        Self {
            stage,
            total,
            cells,
        }
    }
}

/// Renders the fixed-width New/Pick/Stage/Ship/Complete board.
///
/// New lists the lane queue oldest first, the in-service columns show
/// `#order (ticks left)` in worker order and Complete lists the most recent
/// completions first.
pub fn render(sim: &WarehouseSimulation) -> String {
    let columns = collect_columns(sim);
    let metrics = sim.metrics();
    let rule = rule_line();
    let mut lines = Vec::new();

    lines.push(format!("{} | {}", metrics.clock_label, sim.model_name()));
    lines.push(rule.clone());
    lines.push(row(columns.iter().map(|c| c.stage.label().to_string())));
    lines.push(rule.clone());

    let depth = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
    for i in 0..depth {
        lines.push(row(
            columns
                .iter()
                .map(|c| c.cells.get(i).cloned().unwrap_or_default()),
        ));
    }
    if depth > 0 {
        lines.push(rule.clone());
    }
    lines.push(row(columns.iter().map(|c| format!("({})", c.total))));
    lines.push(rule);

    lines.push(format!(
        "On-time {:.1}% | Avg dwell {:.1} min | {:.1} orders/h | Lane queue {} | Busy {}/{}",
        metrics.on_time_percent,
        metrics.average_dwell,
        metrics.orders_per_hour,
        metrics.lane_queue_depth,
        metrics.busy_workers,
        sim.workers().len(),
    ));
    if let Some(age) = sim.waiting_queue().oldest_age(sim.tick()) {
        lines.push(format!("Oldest waiting order: {} min", age));
    }

    lines.join("\n")
}

fn collect_columns(sim: &WarehouseSimulation) -> Vec<Column> {
    let waiting = sim.waiting_queue().iter().map(order_cell).collect();

    let in_stage = |stage: OrderStage| -> Vec<String> {
        sim.workers()
            .iter()
            .filter_map(|w| {
                let order = w.order()?;
                (order.stage() == stage)
                    .then(|| format!("#{} ({})", order.id(), w.remaining_time().unwrap_or(0)))
            })
            .collect()
    };

    let complete = sim.completed().iter().rev().map(order_cell).collect();

    vec![
        Column::new(OrderStage::New, waiting),
        Column::new(OrderStage::Pick, in_stage(OrderStage::Pick)),
        Column::new(OrderStage::Stage, in_stage(OrderStage::Stage)),
        Column::new(OrderStage::Ship, in_stage(OrderStage::Ship)),
        Column::new(OrderStage::Complete, complete),
    ]
}

fn order_cell(order: &Order) -> String {
    format!("#{}", order.id())
}

fn row(cells: impl Iterator<Item = String>) -> String {
    let mut line = String::from("|");
    for cell in cells {
        let cell: String = cell.chars().take(CELL_WIDTH).collect();
        line.push_str(&format!(" {:<width$} |", cell, width = CELL_WIDTH));
    }
    line
}

fn rule_line() -> String {
    let mut line = String::from("+");
    for _ in OrderStage::ALL {
        line.push_str(&"-".repeat(CELL_WIDTH + 2));
        line.push('+');
    }
    line
}
