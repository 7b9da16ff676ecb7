//! Sweep one input across a range for a calculator
//!
//! Projects every variation in parallel and writes the headline numbers of
//! each to CSV, e.g. to see how the SIP corpus responds to the return rate.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use wealth_calculators::calculator::{AnyInputs, InputRecord, ProjectionOutput};
use wealth_calculators::scenario::linspace;
use wealth_calculators::{CalculatorConfig, CalculatorKind, Field, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "sweep", about = "Project a calculator across a range of one input")]
struct Args {
    /// Calculator to run
    kind: CalculatorKind,

    /// Field to vary
    #[arg(long)]
    field: Field,

    #[arg(long)]
    from: f64,

    #[arg(long)]
    to: f64,

    /// Number of evenly spaced values, ends included
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Assumptions JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "sweep_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(&args)?;
    println!("Output written to {}", args.output.display());
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let base = AnyInputs::defaults_for(args.kind);
    if base.get(args.field).is_none() {
        bail!("{} calculator has no field {}", args.kind, args.field);
    }

    let config = CalculatorConfig::load(args.config.as_deref(), None)
        .context("loading configuration")?;
    let runner = ScenarioRunner::with_assumptions(config.assumptions);
    let values = linspace(args.from, args.to, args.steps);

    let start = Instant::now();
    let outcomes = runner.sweep(&base, args.field, &values);
    log::info!(
        "projected {} {} scenarios in {:?}",
        outcomes.len(),
        args.kind,
        start.elapsed()
    );

    let Some(first) = outcomes.first() else {
        bail!("no values to sweep");
    };

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    let mut header = vec![args.field.key().to_string()];
    header.extend(first.result.headline().iter().map(|(label, _)| label.to_string()));
    header.push("warning".to_string());
    writer.write_record(&header)?;

    for outcome in &outcomes {
        let mut record = vec![outcome.value.to_string()];
        record.extend(
            outcome
                .result
                .headline()
                .iter()
                .map(|(_, value)| format!("{:.2}", value)),
        );
        record.push(outcome.result.warnings().join(" "));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
