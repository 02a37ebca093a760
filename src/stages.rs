/// Linear rescaling constants for one subject at one stage.
/// `span` is nonzero for every catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormParams {
    pub offset: f64,
    pub span: f64,
}

#[derive(Debug, Clone)]
pub struct StageConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub grades: &'static [&'static str],
    pub lp: NormParams,
    pub mt: NormParams,
}

/// Calibrated SAEB/SAEPE standardization constants per stage. These are
/// domain constants, not tunables.
pub const STAGES: [StageConfig; 3] = [
    StageConfig {
        id: "early-grades",
        label: "Early grades (1st to 5th)",
        grades: &["Grade 1", "Grade 2", "Grade 3", "Grade 4", "Grade 5"],
        lp: NormParams {
            offset: 49.0,
            span: 275.0,
        },
        mt: NormParams {
            offset: 60.0,
            span: 262.0,
        },
    },
    StageConfig {
        id: "later-grades",
        label: "Later grades (6th to 9th)",
        grades: &["Grade 6", "Grade 7", "Grade 8", "Grade 9"],
        lp: NormParams {
            offset: 100.0,
            span: 300.0,
        },
        mt: NormParams {
            offset: 100.0,
            span: 300.0,
        },
    },
    StageConfig {
        id: "secondary",
        label: "Secondary (1st to 3rd year)",
        grades: &["Year 1", "Year 2", "Year 3"],
        lp: NormParams {
            offset: 117.0,
            span: 334.0,
        },
        mt: NormParams {
            offset: 111.0,
            span: 356.0,
        },
    },
];

#[derive(Debug, thiserror::Error)]
#[error("unknown stage id '{0}' (expected one of: early-grades, later-grades, secondary)")]
pub struct ConfigurationError(pub String);

pub fn stage_config(id: &str) -> Result<&'static StageConfig, ConfigurationError> {
    STAGES
        .iter()
        .find(|stage| stage.id == id)
        .ok_or_else(|| ConfigurationError(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_stages_with_expected_grade_counts() {
        assert_eq!(STAGES.len(), 3);
        assert_eq!(stage_config("early-grades").unwrap().grades.len(), 5);
        assert_eq!(stage_config("later-grades").unwrap().grades.len(), 4);
        assert_eq!(stage_config("secondary").unwrap().grades.len(), 3);
    }

    #[test]
    fn catalog_constants_match_calibration() {
        let early = stage_config("early-grades").unwrap();
        assert_eq!(early.lp, NormParams { offset: 49.0, span: 275.0 });
        assert_eq!(early.mt, NormParams { offset: 60.0, span: 262.0 });

        let secondary = stage_config("secondary").unwrap();
        assert_eq!(secondary.lp, NormParams { offset: 117.0, span: 334.0 });
        assert_eq!(secondary.mt, NormParams { offset: 111.0, span: 356.0 });
    }

    #[test]
    fn spans_are_nonzero() {
        for stage in STAGES.iter() {
            assert!(stage.lp.span != 0.0);
            assert!(stage.mt.span != 0.0);
        }
    }

    #[test]
    fn unknown_stage_id_is_a_configuration_error() {
        let err = stage_config("kindergarten").unwrap_err();
        assert!(err.to_string().contains("kindergarten"));
    }
}
