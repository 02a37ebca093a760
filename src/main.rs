use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};

mod engine;
mod input;
mod models;
mod report;
mod stages;

use models::{Indicator, InputSnapshot};

#[derive(Parser)]
#[command(name = "ideb-simulator")]
#[command(about = "IDEB/IDEPE index estimator and sensitivity simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Inputs for one simulation run, either as flags or as a saved snapshot.
#[derive(Args)]
#[command(group(
    ArgGroup::new("source")
        .args(["input", "stage"])
        .multiple(false)
))]
struct InputArgs {
    /// Load a saved input snapshot (JSON) instead of passing flags
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value = "early-grades")]
    stage: String,
    #[arg(long, value_enum, default_value = "ideb")]
    indicator: Indicator,
    /// Comma-separated approval rates, one slot per grade; leave a slot
    /// empty for grades with no data yet (e.g. "98.5,,97.0,99.1")
    #[arg(long, default_value = "")]
    approvals: String,
    /// Raw LP proficiency
    #[arg(long)]
    lp: Option<f64>,
    /// Adjustment applied to the LP proficiency (+/- points)
    #[arg(long, default_value_t = 0)]
    lp_delta: i32,
    /// Raw MT proficiency
    #[arg(long)]
    mt: Option<f64>,
    /// Adjustment applied to the MT proficiency (+/- points)
    #[arg(long, default_value_t = 0)]
    mt_delta: i32,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stage catalog with grade levels and constants
    Stages,
    /// Write a blank input snapshot template
    Init {
        #[arg(long, default_value = "simulation.json")]
        out: PathBuf,
    },
    /// Estimate the index and its intermediate metrics
    Estimate {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Sweep proficiency deltas and print both sensitivity curves
    Simulate {
        #[command(flatten)]
        inputs: InputArgs,
        /// Also write the curves as CSV for plotting
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Generate a markdown report with metrics and the sweep
    Report {
        #[command(flatten)]
        inputs: InputArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn resolve_snapshot(args: &InputArgs) -> anyhow::Result<InputSnapshot> {
    let snapshot = match &args.input {
        Some(path) => input::load_snapshot(path)?,
        None => InputSnapshot {
            stage: args.stage.clone(),
            indicator: args.indicator,
            approvals: input::parse_approvals(&args.approvals)?,
            lp_raw: args.lp,
            lp_delta: args.lp_delta,
            mt_raw: args.mt,
            mt_delta: args.mt_delta,
        },
    };
    input::validate(&snapshot)?;
    Ok(snapshot)
}

fn compute(snapshot: &InputSnapshot) -> anyhow::Result<models::MetricsResult> {
    let lp_raw = snapshot.lp_raw.context("LP proficiency missing")?;
    let mt_raw = snapshot.mt_raw.context("MT proficiency missing")?;
    let metrics = engine::estimate_index(
        &snapshot.approvals,
        lp_raw,
        snapshot.lp_delta,
        mt_raw,
        snapshot.mt_delta,
        &snapshot.stage,
    )?;
    Ok(metrics)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stages => {
            for stage in stages::STAGES.iter() {
                println!("{} ({})", stage.label, stage.id);
                println!("  grades: {}", stage.grades.join(", "));
                println!(
                    "  LP offset {} span {}, MT offset {} span {}",
                    stage.lp.offset, stage.lp.span, stage.mt.offset, stage.mt.span
                );
            }
        }
        Commands::Init { out } => {
            input::write_template(&out)?;
            println!("Template written to {}.", out.display());
        }
        Commands::Estimate { inputs } => {
            let snapshot = resolve_snapshot(&inputs)?;
            let metrics = compute(&snapshot)?;
            let stage = stages::stage_config(&snapshot.stage)?;

            println!(
                "Estimated {} for {}:",
                snapshot.indicator.label(),
                stage.label
            );
            for (label, value) in report::metric_lines(&metrics, snapshot.indicator) {
                println!("- {label}: {value}");
            }
        }
        Commands::Simulate { inputs, csv } => {
            let snapshot = resolve_snapshot(&inputs)?;
            let metrics = compute(&snapshot)?;
            let lp_raw = snapshot.lp_raw.context("LP proficiency missing")?;
            let mt_raw = snapshot.mt_raw.context("MT proficiency missing")?;
            let curves = engine::simulate(&metrics, lp_raw, mt_raw, &snapshot.stage)?;

            println!(
                "Sensitivity sweep for {} (base estimate {}):",
                snapshot.indicator.label(),
                report::format_index(metrics.estimated_index, snapshot.indicator)
            );
            println!("delta  LP shifted  MT shifted");
            for (lp, mt) in curves.lp_curve.iter().zip(curves.mt_curve.iter()) {
                println!(
                    "{:>5}  {:>10}  {:>10}",
                    format!("{:+}", lp.delta),
                    report::format_index(lp.value, snapshot.indicator),
                    report::format_index(mt.value, snapshot.indicator)
                );
            }

            if let Some(path) = csv {
                report::write_curves_csv(&path, &curves)?;
                println!("Curves written to {}.", path.display());
            }
        }
        Commands::Report { inputs, out } => {
            let snapshot = resolve_snapshot(&inputs)?;
            let metrics = compute(&snapshot)?;
            let lp_raw = snapshot.lp_raw.context("LP proficiency missing")?;
            let mt_raw = snapshot.mt_raw.context("MT proficiency missing")?;
            let curves = engine::simulate(&metrics, lp_raw, mt_raw, &snapshot.stage)?;
            let stage = stages::stage_config(&snapshot.stage)?;

            let report = report::build_report(stage, snapshot.indicator, &metrics, &curves);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
