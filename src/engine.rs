use crate::models::{MetricsResult, SimulationCurves, SimulationPoint};
use crate::stages::{stage_config, ConfigurationError, NormParams};

/// Fixed sweep for the sensitivity simulation, in proficiency points.
pub const SIMULATION_DELTAS: [i32; 9] = [-20, -15, -10, -5, 0, 5, 10, 15, 20];

/// Geometric mean of the approval fractions that were actually entered.
/// An empty window yields 0.0 rather than an error; absent slots are
/// skipped, not counted as zero.
pub fn compute_flow(rates: &[Option<f64>]) -> f64 {
    let fractions: Vec<f64> = rates.iter().flatten().map(|rate| rate / 100.0).collect();
    if fractions.is_empty() {
        return 0.0;
    }
    let product: f64 = fractions.iter().product();
    product.powf(1.0 / fractions.len() as f64)
}

/// Rescales a raw proficiency onto the 0-10 scale for one subject. Clamped
/// below at zero, unbounded above.
pub fn normalize(raw_value: f64, params: NormParams) -> f64 {
    let score = ((raw_value - params.offset) / params.span) * 10.0;
    score.max(0.0)
}

/// Full estimate: flow rate, per-subject standardized scores, their average,
/// and the final index (average times flow). The effective proficiency for
/// each subject is `raw + delta`.
pub fn estimate_index(
    rates: &[Option<f64>],
    lp_raw: f64,
    lp_delta: i32,
    mt_raw: f64,
    mt_delta: i32,
    stage_id: &str,
) -> Result<MetricsResult, ConfigurationError> {
    let stage = stage_config(stage_id)?;

    let flow_rate = compute_flow(rates);
    let score_lp = normalize(lp_raw + lp_delta as f64, stage.lp);
    let score_mt = normalize(mt_raw + mt_delta as f64, stage.mt);
    let subject_average = (score_lp + score_mt) / 2.0;

    Ok(MetricsResult {
        flow_rate,
        score_lp,
        score_mt,
        subject_average,
        estimated_index: subject_average * flow_rate,
    })
}

/// Sweeps each subject's base proficiency over [`SIMULATION_DELTAS`] while
/// the other subject stays at its already-standardized score. The sweep
/// starts from the raw proficiency without the user's adjustment delta.
pub fn simulate(
    metrics: &MetricsResult,
    lp_raw: f64,
    mt_raw: f64,
    stage_id: &str,
) -> Result<SimulationCurves, ConfigurationError> {
    let stage = stage_config(stage_id)?;

    let lp_curve = SIMULATION_DELTAS
        .iter()
        .map(|&delta| SimulationPoint {
            delta,
            value: metrics.flow_rate
                * (normalize(lp_raw + delta as f64, stage.lp) + metrics.score_mt)
                / 2.0,
        })
        .collect();

    let mt_curve = SIMULATION_DELTAS
        .iter()
        .map(|&delta| SimulationPoint {
            delta,
            value: metrics.flow_rate
                * (metrics.score_lp + normalize(mt_raw + delta as f64, stage.mt))
                / 2.0,
        })
        .collect();

    Ok(SimulationCurves { lp_curve, mt_curve })
}
