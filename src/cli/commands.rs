//! Command implementations for the deco-tables CLI
//!
//! Dispatches subcommands, sets up structured logging, and renders reports
//! in human or JSON form.

use colored::Colorize;
use tracing::{info, warn};

use crate::cli::args::{Args, Commands, ComputeArgs, LimitsArgs, OutputFormat};
use crate::compute::{compute, Computation, DiveInputs, DiveReport, Po2Band};
use crate::dataset::Dataset;
use crate::depth::imca_limit;
use crate::record::{Column, DecoRecord};
use crate::{checks, Error, Result};

/// Main command runner: set up logging, then dispatch to the subcommand.
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);

    match args.command {
        Commands::Compute(ref compute_args) => run_compute(compute_args),
        Commands::Limits(ref limits_args) => run_limits(limits_args),
        Commands::Check => run_check(),
    }
}

/// Set up structured logging to stderr from the verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deco_tables={}", args.log_level())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

fn run_compute(args: &ComputeArgs) -> Result<()> {
    let dataset = Dataset::load_file(&args.dataset)?;
    if dataset.is_empty() {
        warn!("Dataset {} produced no records", args.dataset.display());
    }

    let inputs = DiveInputs {
        max_depth: args.depth,
        o2_percent: args.o2,
        dive_time: args.time,
    };
    info!(
        "Computing for depth {} msw, O2 {}%, time {:?}",
        inputs.max_depth, inputs.o2_percent, inputs.dive_time
    );
    let computation = compute(&inputs, &dataset);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&computation)
                .map_err(|e| Error::serialization("Failed to render report as JSON", e))?;
            println!("{}", json);
        }
        OutputFormat::Human => render_human(&computation),
    }
    Ok(())
}

fn run_limits(args: &LimitsArgs) -> Result<()> {
    match imca_limit(args.depth) {
        Some(limit) => println!("{}", limit),
        None => println!("no limit listed for {} msw", args.depth),
    }
    Ok(())
}

fn run_check() -> Result<()> {
    for description in checks::run()? {
        println!("{} {}", "ok".green(), description);
    }
    println!("Self-checks passed");
    Ok(())
}

fn render_human(computation: &Computation) {
    match computation {
        Computation::Fallback(view) => {
            println!("{}", view.status);
            render_rows(&view.rows, None);
        }
        Computation::Resolved(report) => render_report(report),
    }
}

fn render_report(report: &DiveReport) {
    println!("Bell depth:     {:.1} msw", report.bell_depth);
    println!(
        "Inspired PO2:   {:.2} bar ({})",
        report.po2,
        colorize_band(report.po2_band)
    );
    match &report.imca_limit {
        Some(limit) => println!("IMCA TUP limit: {}", limit),
        None => println!("IMCA TUP limit: no limit listed"),
    }
    if let Some(totals) = &report.totals {
        println!("Diver:          {} OTU, {} ESOT", totals.diver_otu, totals.diver_esot);
        println!(
            "Bellman:        {} OTU, {} ESOT",
            totals.bellman_otu, totals.bellman_esot
        );
    }
    println!();
    println!("{}", report.status);
    render_rows(&report.rows, report.selected_row);
}

fn render_rows(rows: &[DecoRecord], selected: Option<usize>) {
    if rows.is_empty() {
        return;
    }
    println!(
        "{:>2} {:>12} {:>12} {:>14}",
        "", "Depth", "Bottom", "Total deco"
    );
    for (index, row) in rows.iter().enumerate() {
        let marker = if selected == Some(index) { ">" } else { " " };
        println!(
            "{:>2} {:>12} {:>12} {:>14}",
            marker,
            row.value(Column::Depth),
            row.value(Column::BottomTime),
            row.value(Column::TotalDecoTime),
        );
    }
}

fn colorize_band(band: Po2Band) -> String {
    match band {
        Po2Band::Ok => band.to_string().green().to_string(),
        Po2Band::Warn => band.to_string().yellow().to_string(),
        Po2Band::Bad => band.to_string().red().to_string(),
    }
}
