//! Generation error types.

use crate::validate::ValidationReport;

/// Reasons a grid could not be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// The subdivision level is outside `0..=10`. Nothing was built.
    #[error("invalid level {level}: level must be between 0 and 10")]
    InvalidLevel { level: i64 },

    /// The merge tolerance is outside `MIN_MERGE_TOLERANCE..=MAX_MERGE_TOLERANCE`.
    /// Nothing was built.
    #[error("invalid merge tolerance {tolerance}: must be between 1e-12 and 2.5e-4")]
    InvalidTolerance { tolerance: f64 },

    /// The grid was built but broke one or more invariants and must not be used.
    #[error("generated grid failed validation with {} issue(s)", .0.len())]
    Validation(ValidationReport),
}

impl GenerateError {
    /// Human-readable diagnostics for this failure. Never empty.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            GenerateError::Validation(report) if !report.is_valid() => report.diagnostics(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationIssue;

    #[test]
    fn test_invalid_level_diagnostics() {
        let err = GenerateError::InvalidLevel { level: 11 };
        assert_eq!(
            err.diagnostics(),
            vec!["invalid level 11: level must be between 0 and 10".to_string()]
        );
    }

    #[test]
    fn test_invalid_tolerance_names_range() {
        let err = GenerateError::InvalidTolerance { tolerance: 2.0 };
        assert_eq!(
            err.to_string(),
            "invalid merge tolerance 2: must be between 1e-12 and 2.5e-4"
        );
    }

    #[test]
    fn test_validation_diagnostics_list_every_issue() {
        let report = ValidationReport::from_issues(vec![
            ValidationIssue::PentagonCount { found: 11 },
            ValidationIssue::TotalCount {
                expected: 42,
                found: 41,
            },
        ]);
        let err = GenerateError::Validation(report);
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(
            err.to_string(),
            "generated grid failed validation with 2 issue(s)"
        );
    }

    #[test]
    fn test_empty_validation_report_still_has_a_diagnostic() {
        let err = GenerateError::Validation(ValidationReport::default());
        assert_eq!(err.diagnostics().len(), 1);
    }
}
