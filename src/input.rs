use std::path::Path;

use anyhow::{bail, Context};

use crate::models::InputSnapshot;
use crate::stages::stage_config;

pub fn load_snapshot(path: &Path) -> anyhow::Result<InputSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input snapshot {}", path.display()))?;
    let snapshot: InputSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("invalid input snapshot {}", path.display()))?;
    Ok(snapshot)
}

/// Writes a blank snapshot sized for the default stage, to be filled in and
/// fed back through `--input`.
pub fn write_template(path: &Path) -> anyhow::Result<()> {
    let snapshot = InputSnapshot::default();
    let contents = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write template {}", path.display()))?;
    Ok(())
}

/// Parses a comma-separated approval list. An empty slot (or `-`) marks a
/// grade with no data yet; it stays absent rather than becoming zero.
pub fn parse_approvals(raw: &str) -> anyhow::Result<Vec<Option<f64>>> {
    raw.split(',')
        .map(|slot| {
            let slot = slot.trim();
            if slot.is_empty() || slot == "-" {
                return Ok(None);
            }
            let value: f64 = slot
                .parse()
                .with_context(|| format!("invalid approval rate '{slot}'"))?;
            Ok(Some(value))
        })
        .collect()
}

/// Guards the engine's caller contract: the engine itself does not validate
/// ranges or require proficiencies, so everything user-facing is checked
/// here first.
pub fn validate(snapshot: &InputSnapshot) -> anyhow::Result<()> {
    let stage = stage_config(&snapshot.stage)?;

    if snapshot.approvals.len() > stage.grades.len() {
        bail!(
            "{} approval rates given but stage '{}' has {} grade levels",
            snapshot.approvals.len(),
            stage.id,
            stage.grades.len()
        );
    }

    for (slot, rate) in snapshot.approvals.iter().enumerate() {
        if let Some(rate) = rate {
            if !(0.0..=100.0).contains(rate) {
                bail!(
                    "approval rate for {} must be between 0 and 100, got {rate}",
                    stage.grades[slot]
                );
            }
        }
    }

    if snapshot.lp_raw.is_none() || snapshot.mt_raw.is_none() {
        bail!("both LP and MT proficiencies must be filled in");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Indicator;

    fn filled_snapshot() -> InputSnapshot {
        InputSnapshot {
            stage: "early-grades".to_string(),
            indicator: Indicator::Ideb,
            approvals: vec![Some(98.0), Some(97.5), None, Some(99.0), Some(96.0)],
            lp_raw: Some(210.0),
            lp_delta: 0,
            mt_raw: Some(225.0),
            mt_delta: 0,
        }
    }

    #[test]
    fn parses_sparse_approval_lists() {
        let parsed = parse_approvals("98.5,,97.0,-,99.1").unwrap();
        assert_eq!(
            parsed,
            vec![Some(98.5), None, Some(97.0), None, Some(99.1)]
        );
    }

    #[test]
    fn rejects_non_numeric_approvals() {
        assert!(parse_approvals("98.5,high,97.0").is_err());
    }

    #[test]
    fn accepts_a_complete_snapshot() {
        assert!(validate(&filled_snapshot()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_approvals() {
        let mut snapshot = filled_snapshot();
        snapshot.approvals[1] = Some(104.0);
        let err = validate(&snapshot).unwrap_err();
        assert!(err.to_string().contains("between 0 and 100"));
    }

    #[test]
    fn rejects_too_many_approval_slots() {
        let mut snapshot = filled_snapshot();
        snapshot.stage = "secondary".to_string();
        assert!(validate(&snapshot).is_err());
    }

    #[test]
    fn requires_both_proficiencies() {
        let mut snapshot = filled_snapshot();
        snapshot.mt_raw = None;
        let err = validate(&snapshot).unwrap_err();
        assert!(err.to_string().contains("LP and MT"));
    }

    #[test]
    fn rejects_unknown_stage() {
        let mut snapshot = filled_snapshot();
        snapshot.stage = "adult-education".to_string();
        assert!(validate(&snapshot).is_err());
    }
}
