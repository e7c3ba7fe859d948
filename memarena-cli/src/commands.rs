use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use memarena_config::MemarenaConfig;
use memarena_telemetry::logging::EventLogger;
use memarena_telemetry::metrics::MetricsRecorder;
use tracing::info;

use crate::demo::run_demo;
use crate::views::run_views;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file; without it `config/memarena.yaml` and `MEMARENA_*` are used
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill an arena, overflow it, reset it and allocate again
    Demo(DemoArgs),
    /// Show zero-copy conversions between text and bytes
    Views(ViewsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Arena capacity (overrides the configuration)
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ViewsArgs {
    /// Text to convert (overrides the configuration)
    #[arg(long)]
    pub text: Option<String>,
}

pub fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match &cli.config {
        Some(path) => MemarenaConfig::load_from_path(path)?,
        None => MemarenaConfig::load()?,
    };

    match &cli.command {
        Commands::Demo(args) => {
            if let Some(capacity) = args.capacity {
                config.arena.capacity = capacity;
            }
            config.telemetry.metrics |= args.metrics;
        }
        Commands::Views(args) => {
            if let Some(text) = &args.text {
                config.demo.text = text.clone();
            }
        }
    }
    let config = config.validated()?;

    EventLogger::init(&config.telemetry.log_level)?;
    info!(command = command_name(&cli.command), "starting");

    match cli.command {
        Commands::Demo(_) => {
            let metrics = if config.telemetry.metrics {
                Some(MetricsRecorder::new()?)
            } else {
                None
            };
            let report = run_demo(&config, metrics.as_ref())?;
            println!("\nSummary:");
            println!("  Sequential slots: {}", yes_no(report.fill_is_sequential()));
            match report.overflow {
                Some(err) => println!("  Overflow rejected: {err}"),
                None => println!("  Overflow rejected: no overflow attempted"),
            }
            println!(
                "  Usage: {} after fill, {} after reset, {} at end",
                report.usage_after_fill, report.usage_after_reset, report.usage_final
            );
            println!("  Storage reused after reset: {}", yes_no(report.storage_reused()));
            println!(
                "  Allocations: {} ok, {} failed, peak {} slots of {} bytes",
                report.stats.allocations(),
                report.stats.failed_allocations(),
                report.stats.high_water_mark(),
                report.element_size
            );
            if let Some(metrics) = metrics {
                println!("\n{}", metrics.gather_metrics()?);
            }
        }
        Commands::Views(_) => {
            let report = run_views(&config.demo.text)?;
            println!("\nZero-copy round trip: {}", yes_no(report.zero_copy()));
            println!("Shared clone reuses buffer: {}", yes_no(report.shared_clone_shares));
            println!("Invalid UTF-8 rejected: {}", yes_no(report.rejected_invalid));
        }
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Demo(_) => "demo",
        Commands::Views(_) => "views",
    }
}
