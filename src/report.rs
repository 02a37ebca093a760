use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;

use crate::models::{Indicator, MetricsResult, SimulationCurves};
use crate::stages::StageConfig;

/// Final index rendered at the indicator's display precision. The underlying
/// value is the same for both indicators; only the rounding differs.
pub fn format_index(value: f64, indicator: Indicator) -> String {
    format!("{value:.prec$}", prec = indicator.decimals())
}

/// Labelled metric lines in the order they are presented, mirroring the
/// summary panel: flow, both standardized scores, their average, the index.
pub fn metric_lines(metrics: &MetricsResult, indicator: Indicator) -> Vec<(String, String)> {
    vec![
        ("Flow rate (P)".to_string(), format!("{:.3}", metrics.flow_rate)),
        (
            "Standardized LP score".to_string(),
            format!("{:.2}", metrics.score_lp),
        ),
        (
            "Standardized MT score".to_string(),
            format!("{:.2}", metrics.score_mt),
        ),
        (
            "Subject average".to_string(),
            format!("{:.2}", metrics.subject_average),
        ),
        (
            format!("Estimated {}", indicator.label()),
            format_index(metrics.estimated_index, indicator),
        ),
    ]
}

pub fn build_report(
    stage: &StageConfig,
    indicator: Indicator,
    metrics: &MetricsResult,
    curves: &SimulationCurves,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} Simulation Report", indicator.label());
    let _ = writeln!(
        output,
        "Generated on {} for {}",
        Utc::now().date_naive(),
        stage.label
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Estimated Metrics");
    let _ = writeln!(output);

    for (label, value) in metric_lines(metrics, indicator) {
        let _ = writeln!(output, "- {label}: {value}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Sensitivity Sweep");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Estimated {} when one subject's proficiency shifts and the other holds.",
        indicator.label()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "| Delta | LP shifted | MT shifted |");
    let _ = writeln!(output, "|---|---|---|");

    for (lp, mt) in curves.lp_curve.iter().zip(curves.mt_curve.iter()) {
        let _ = writeln!(
            output,
            "| {:+} | {} | {} |",
            lp.delta,
            format_index(lp.value, indicator),
            format_index(mt.value, indicator)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "*This simulator is an estimate; observed values may differ.*"
    );

    output
}

/// Writes the two curves as `delta,lp_index,mt_index` rows for external
/// plotting.
pub fn write_curves_csv(path: &Path, curves: &SimulationCurves) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct CurveRow {
        delta: i32,
        lp_index: f64,
        mt_index: f64,
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for (lp, mt) in curves.lp_curve.iter().zip(curves.mt_curve.iter()) {
        writer.serialize(CurveRow {
            delta: lp.delta,
            lp_index: lp.value,
            mt_index: mt.value,
        })?;
    }

    writer.flush()?;
    Ok(())
}
