//! Constraints carrying a display name.

use std::fmt;

use async_trait::async_trait;

use crate::analyzers::{AnalyzerContext, Dataset};
use crate::core::{BoxedConstraint, Constraint, ConstraintMetadata, ConstraintResult};

/// Wraps a constraint under a different name.
///
/// Only [`Constraint::name`] changes; results and their messages are the
/// wrapped constraint's, unaltered.
pub struct NamedConstraint {
    inner: BoxedConstraint,
    name: String,
}

impl NamedConstraint {
    pub fn new(inner: impl Constraint + 'static, name: impl Into<String>) -> Self {
        Self {
            inner: Box::new(inner),
            name: name.into(),
        }
    }

    /// Returns the wrapped constraint.
    pub fn inner(&self) -> &dyn Constraint {
        self.inner.as_ref()
    }
}

impl fmt::Debug for NamedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedConstraint")
            .field("name", &self.name)
            .field("inner", &self.inner)
            .finish()
    }
}

impl fmt::Display for NamedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[async_trait]
impl Constraint for NamedConstraint {
    async fn calculate(&self, data: &Dataset) -> ConstraintResult {
        self.inner.calculate(data).await
    }

    fn evaluate(&self, context: &AnalyzerContext) -> ConstraintResult {
        self.inner.evaluate(context)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> ConstraintMetadata {
        self.inner.metadata()
    }
}
