//! Wealth Calculators CLI
//!
//! Runs one calculator from the command line, printing the summary, any
//! validation errors and advisory warnings, and optionally exporting the
//! year-by-year schedule as CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use wealth_calculators::{
    CalculatorConfig, CalculatorKind, Controller, Field, InputRecord, ProjectionOutput,
};

#[derive(Debug, Parser)]
#[command(name = "wealth_calculators", version, about = "Run a financial calculator projection")]
struct Cli {
    /// Calculator to run: sip, fd, swp, retirement, emergency-fund
    kind: CalculatorKind,

    /// Override an input, e.g. --set monthlyInvestment=15000 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(Field, f64)>,

    /// Report errors for every field, not just the ones set
    #[arg(long)]
    touch_all: bool,

    /// Assumptions JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Field range CSV file
    #[arg(long, value_name = "FILE")]
    ranges: Option<PathBuf>,

    /// Write the yearly schedule to this CSV file
    #[arg(long, value_name = "FILE")]
    schedule: Option<PathBuf>,

    /// Print the full controller state as JSON
    #[arg(long)]
    json: bool,
}

fn parse_assignment(raw: &str) -> Result<(Field, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{}`", raw))?;
    let field: Field = name.parse().map_err(|e| format!("{}", e))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", value.trim()))?;
    Ok((field, value))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = if cli.config.is_none() && cli.ranges.is_none() {
        CalculatorConfig::load_default().context("loading default configuration")?
    } else {
        CalculatorConfig::load(cli.config.as_deref(), cli.ranges.as_deref())
            .context("loading configuration")?
    };

    let mut controller = Controller::for_kind(cli.kind, config);
    if !cli.set.is_empty() {
        controller.set_inputs(cli.set.iter().copied());
    }
    if cli.touch_all {
        controller.touch_all();
    }
    log::info!(
        "{} calculator evaluated in {} passes",
        cli.kind,
        controller.revision()
    );

    if let Some(path) = &cli.schedule {
        match controller.results().schedule() {
            Some(schedule) => {
                let file = File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?;
                schedule
                    .write_yearly_csv(BufWriter::new(file))
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Schedule written to: {}", path.display());
            }
            None => log::warn!("{} calculator has no schedule to export", cli.kind),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(controller.state())?);
        return Ok(());
    }

    println!("{} calculator", cli.kind);
    println!("{}", "=".repeat(40));

    println!("\nInputs:");
    let inputs = controller.inputs();
    for &field in inputs.fields() {
        println!("  {:<28} {:>16}", field.label(), inputs.get(field).unwrap_or_default());
    }

    println!("\nResults:");
    for (label, value) in controller.results().headline() {
        println!("  {:<28} {:>16.2}", label, value);
    }

    let errors = controller.visible_errors();
    if !errors.is_empty() {
        println!("\nErrors:");
        for (field, message) in errors.iter() {
            println!("  {}: {}", field, message);
        }
    }

    if !controller.warnings().is_empty() {
        println!("\nWarnings:");
        for warning in controller.warnings() {
            println!("  {}", warning);
        }
    }

    println!("\nChart (ready: {}):", controller.chart_ready());
    for segment in controller.chart_series() {
        println!("  {:<28} {:>16.2}  {}", segment.label, segment.display_value, segment.color);
    }

    if let Some(series) = controller.growth_series() {
        println!("\nGrowth:");
        for point in series.iter().take(10) {
            println!(
                "  {:<8} contributed {:>16.2}  balance {:>16.2}",
                point.label, point.contributed, point.balance
            );
        }
        if series.len() > 10 {
            println!("  ... ({} more years)", series.len() - 10);
        }
    }

    Ok(())
}
