//! Checks: named groups of constraints sharing a severity level.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use super::{Constraint, ConstraintResult, Level};
use crate::analyzers::{AnalyzerContext, Dataset};
use crate::error::Result;

/// Overall outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Every constraint held.
    Success,
    /// Some constraint failed in a [`Level::Warning`] check.
    Warning,
    /// Some constraint failed in a [`Level::Error`] check.
    Error,
}

impl From<Level> for CheckStatus {
    fn from(level: Level) -> Self {
        match level {
            Level::Warning => CheckStatus::Warning,
            Level::Error => CheckStatus::Error,
        }
    }
}

/// Result of one constraint within a check.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintOutcome {
    /// Name of the constraint
    pub constraint: String,
    #[serde(flatten)]
    pub result: ConstraintResult,
}

/// Result of judging every constraint of a check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub check: String,
    pub level: Level,
    pub status: CheckStatus,
    /// One entry per constraint, in declaration order.
    pub constraint_results: Vec<ConstraintOutcome>,
}

impl CheckResult {
    fn from_outcomes(check: &Check, constraint_results: Vec<ConstraintOutcome>) -> Self {
        let status = if constraint_results.iter().all(|o| o.result.is_success()) {
            CheckStatus::Success
        } else {
            check.level.into()
        };
        Self {
            check: check.name.clone(),
            level: check.level,
            status,
            constraint_results,
        }
    }

    /// Iterates over the constraints that did not hold.
    pub fn failures(&self) -> impl Iterator<Item = &ConstraintOutcome> {
        self.constraint_results
            .iter()
            .filter(|o| !o.result.is_success())
    }

    /// Serializes the result as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A validation check containing one or more constraints.
///
/// # Example
///
/// ```rust
/// use term_constraints::analyzers::AnalyzerContext;
/// use term_constraints::constraints::{completeness_constraint, size_constraint};
/// use term_constraints::core::{Check, CheckStatus, Level};
///
/// let check = Check::builder("orders")
///     .level(Level::Error)
///     .constraint(size_constraint(|rows| rows > 0, None))
///     .constraint(completeness_constraint("order_id", |c| c == 1.0, Some("Every order needs an id.")))
///     .build();
///
/// // Nothing has been analyzed yet
/// let result = check.evaluate(&AnalyzerContext::new());
/// assert_eq!(result.status, CheckStatus::Error);
/// assert_eq!(result.failures().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Check {
    name: String,
    level: Level,
    description: Option<String>,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl Check {
    /// Creates a new builder for constructing a check.
    pub fn builder(name: impl Into<String>) -> CheckBuilder {
        CheckBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.constraints
    }

    /// Computes and judges every constraint against `data`, one at a time.
    #[instrument(skip(self, data), fields(check = %self.name, check.level = %self.level))]
    pub async fn calculate(&self, data: &Dataset) -> CheckResult {
        let mut outcomes = Vec::with_capacity(self.constraints.len());
        for constraint in &self.constraints {
            outcomes.push(ConstraintOutcome {
                constraint: constraint.name().to_string(),
                result: constraint.calculate(data).await,
            });
        }
        self.finish(outcomes)
    }

    /// Judges every constraint against metrics computed earlier.
    #[instrument(skip(self, context), fields(check = %self.name, check.level = %self.level))]
    pub fn evaluate(&self, context: &AnalyzerContext) -> CheckResult {
        let outcomes = self
            .constraints
            .iter()
            .map(|constraint| ConstraintOutcome {
                constraint: constraint.name().to_string(),
                result: constraint.evaluate(context),
            })
            .collect();
        self.finish(outcomes)
    }

    fn finish(&self, outcomes: Vec<ConstraintOutcome>) -> CheckResult {
        let result = CheckResult::from_outcomes(self, outcomes);
        info!(
            status = ?result.status,
            failed = result.failures().count(),
            total = result.constraint_results.len(),
            "Check completed"
        );
        result
    }
}

/// Builder for constructing `Check` instances.
#[derive(Debug)]
pub struct CheckBuilder {
    name: String,
    level: Level,
    description: Option<String>,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl CheckBuilder {
    /// Creates a new check builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::default(),
            description: None,
            constraints: Vec::new(),
        }
    }

    /// Sets the severity level for the check.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets a description for the check.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a constraint to the check.
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Adds a boxed constraint to the check.
    pub fn boxed_constraint(mut self, constraint: Box<dyn Constraint>) -> Self {
        self.constraints.push(Arc::from(constraint));
        self
    }

    /// Builds the check.
    pub fn build(self) -> Check {
        Check {
            name: self.name,
            level: self.level,
            description: self.description,
            constraints: self.constraints,
        }
    }
}
