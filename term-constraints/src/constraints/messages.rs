//! The four ways a constraint can fail, and their exact wording.
//!
//! Callers match on these messages, so the text here is part of the public
//! contract.

use thiserror::Error;

/// Message of a constraint whose analyzer has no metric in the context.
pub const MISSING_ANALYSIS: &str = "Missing Analysis, can't run the constraint!";

/// Prefix of a constraint whose value picker failed.
pub const PROBLEMATIC_METRIC_PICKER: &str = "Can't retrieve the value to assert on";

/// Terminal failure of a constraint evaluation.
///
/// The `Display` output of each variant is the message reported in
/// [`ConstraintResult::message`](crate::core::ConstraintResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintFailure {
    /// The metric itself is a failure; carries the analyzer's message.
    #[error("{0}")]
    DataComputation(String),

    /// No metric was computed for the constraint's analyzer.
    #[error("Missing Analysis, can't run the constraint!")]
    MissingAnalysis,

    /// The value picker could not derive a value from the metric.
    #[error("Can't retrieve the value to assert on: {0}!")]
    ProblematicMetricPicker(String),

    /// The assertion rejected the value.
    #[error("Value: {value} does not meet the constraint requirement!{}", hint_suffix(.hint))]
    AssertionFailed {
        /// The value as rendered in its native representation.
        value: String,
        hint: Option<String>,
    },
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" {hint}"),
        None => String::new(),
    }
}

impl ConstraintFailure {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintFailure::DataComputation(_) => "data_computation",
            ConstraintFailure::MissingAnalysis => "missing_analysis",
            ConstraintFailure::ProblematicMetricPicker(_) => "problematic_metric_picker",
            ConstraintFailure::AssertionFailed { .. } => "assertion_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_analysis_matches_constant() {
        assert_eq!(ConstraintFailure::MissingAnalysis.to_string(), MISSING_ANALYSIS);
    }

    #[test]
    fn test_picker_message_uses_prefix() {
        let message = ConstraintFailure::ProblematicMetricPicker("division by zero".into())
            .to_string();
        assert_eq!(
            message,
            "Can't retrieve the value to assert on: division by zero!"
        );
        assert!(message.starts_with(PROBLEMATIC_METRIC_PICKER));
    }

    #[test]
    fn test_assertion_message_with_and_without_hint() {
        let plain = ConstraintFailure::AssertionFailed {
            value: "1.0".into(),
            hint: None,
        };
        assert_eq!(
            plain.to_string(),
            "Value: 1.0 does not meet the constraint requirement!"
        );

        let hinted = ConstraintFailure::AssertionFailed {
            value: "1.0".into(),
            hint: Some("Value should be like ...!".into()),
        };
        assert_eq!(
            hinted.to_string(),
            "Value: 1.0 does not meet the constraint requirement! Value should be like ...!"
        );
    }

    #[test]
    fn test_data_computation_is_verbatim() {
        let failure =
            ConstraintFailure::DataComputation("requirement failed: Missing column x".into());
        assert_eq!(failure.to_string(), "requirement failed: Missing column x");
        assert_eq!(failure.kind(), "data_computation");
    }
}
