use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::info;
use warehouse_flow::io::{board, reporting};
use warehouse_flow::{logging, CapacityConfig, Driver, SimulationConfig, WarehouseSimulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Model {
    Pipeline,
    Capacity,
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    ticks: u64,
    model: Model,
    config: SimulationConfig,
    csv_dir: Option<PathBuf>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            ticks: 360,
            model: Model::Pipeline,
            config: SimulationConfig::default(),
            csv_dir: None,
        }
    }
}

const USAGE: &str = "usage: warehouse-flow [--ticks N] [--seed N] [--model pipeline|capacity] \
[--workers N] [--orders-per-day X] [--mpo X] [--sla N] [--csv DIR]";

impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("missing value for {flag}\n{USAGE}"))
            };
            match flag.as_str() {
                "--ticks" => options.ticks = value()?.parse().context("--ticks")?,
                "--seed" => options.config.seed = value()?.parse().context("--seed")?,
                "--workers" => options.config.worker_count = value()?.parse().context("--workers")?,
                "--orders-per-day" => {
                    options.config.orders_per_day = value()?.parse().context("--orders-per-day")?
                }
                "--mpo" => {
                    options.config.mean_minutes_per_order = value()?.parse().context("--mpo")?
                }
                "--sla" => options.config.sla_minutes = value()?.parse().context("--sla")?,
                "--csv" => options.csv_dir = Some(PathBuf::from(value()?)),
                "--model" => {
                    options.model = match value()?.as_str() {
                        "pipeline" => Model::Pipeline,
                        "capacity" => Model::Capacity,
                        other => bail!("unknown model '{other}'\n{USAGE}"),
                    }
                }
                other => bail!("unknown argument '{other}'\n{USAGE}"),
            }
        }

        options.config.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    logging::init();

    // 1. SETUP CONFIGURATION
    let options = CliOptions::parse(env::args().skip(1))?;
    let config = options.config.clamped();

    // 2. BUILD THE WAREHOUSE
    let mut sim = match options.model {
        Model::Pipeline => WarehouseSimulation::new(config),
        Model::Capacity => {
            let capacity = CapacityConfig::default();
            capacity.validate()?;
            WarehouseSimulation::capacity_model(config, &capacity)
        }
    };

    // 3. RUN SIMULATION
    Driver::new(&mut sim).run(options.ticks);

    // 4. SHOW THE BOARD
    println!("{}", board::render(&sim));

    // 5. EXPORT RESULTS
    if let Some(dir) = &options.csv_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        reporting::write_tick_log(dir.join("ticks.csv"), sim.history())?;
        reporting::write_order_log(dir.join("orders.csv"), &sim.order_records())?;
    }

    // 6. SUMMARY
    let summary = sim.summary();
    info!(
        model = %summary.model,
        ticks = summary.ticks,
        created = summary.created,
        completed = summary.completed,
        late = summary.late,
        backlog = summary.backlog,
        peak_backlog = summary.peak_backlog,
        on_time_pct = summary.on_time_percent,
        avg_dwell = summary.average_dwell,
        max_dwell = summary.max_dwell,
        orders_per_hour = summary.orders_per_hour,
        "simulation complete"
    );

    Ok(())
}
