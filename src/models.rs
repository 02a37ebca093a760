use serde::{Deserialize, Serialize};

/// The two indicators share one formula; the kind only drives display
/// precision (IDEB one decimal, IDEPE two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Ideb,
    Idepe,
}

impl Indicator {
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Ideb => "IDEB",
            Indicator::Idepe => "IDEPE",
        }
    }

    pub fn decimals(self) -> usize {
        match self {
            Indicator::Ideb => 1,
            Indicator::Idepe => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsResult {
    pub flow_rate: f64,
    pub score_lp: f64,
    pub score_mt: f64,
    pub subject_average: f64,
    pub estimated_index: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimulationPoint {
    pub delta: i32,
    pub value: f64,
}

/// One curve sweeps LP with MT held at its computed score, the other the
/// reverse. Both share the same delta axis.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationCurves {
    pub lp_curve: Vec<SimulationPoint>,
    pub mt_curve: Vec<SimulationPoint>,
}

/// A complete snapshot of the form inputs. The engine only ever sees values
/// copied out of this record, never the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub stage: String,
    pub indicator: Indicator,
    /// One slot per grade level; `None` means not yet entered.
    pub approvals: Vec<Option<f64>>,
    pub lp_raw: Option<f64>,
    pub lp_delta: i32,
    pub mt_raw: Option<f64>,
    pub mt_delta: i32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        InputSnapshot {
            stage: "early-grades".to_string(),
            indicator: Indicator::Ideb,
            approvals: vec![None; 5],
            lp_raw: None,
            lp_delta: 0,
            mt_raw: None,
            mt_delta: 0,
        }
    }
}

impl InputSnapshot {
    /// Restores the blank-form defaults in place.
    pub fn reset(&mut self) {
        *self = InputSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_display_precision() {
        assert_eq!(Indicator::Ideb.decimals(), 1);
        assert_eq!(Indicator::Idepe.decimals(), 2);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut snapshot = InputSnapshot {
            stage: "secondary".to_string(),
            indicator: Indicator::Idepe,
            approvals: vec![Some(91.0), None, Some(88.5)],
            lp_raw: Some(280.0),
            lp_delta: 10,
            mt_raw: Some(295.0),
            mt_delta: -5,
        };
        snapshot.reset();
        assert_eq!(snapshot, InputSnapshot::default());
        assert_eq!(snapshot.approvals, vec![None; 5]);
    }
}
