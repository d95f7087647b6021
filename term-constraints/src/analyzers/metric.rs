//! The metric model: a named, scoped value that is either a number or a
//! captured failure.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{AnalyzerError, MetricError};
use super::types::{MetricType, MetricValue};

/// The scope a metric describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    /// The dataset as a whole (e.g. row count).
    Dataset,
    /// A single column.
    Column,
    /// A combination of columns.
    MultiColumn,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Dataset => write!(f, "Dataset"),
            Entity::Column => write!(f, "Column"),
            Entity::MultiColumn => write!(f, "MultiColumn"),
        }
    }
}

/// The result of one analyzer invocation.
///
/// A metric holds exactly one of a computed value or the error that prevented
/// it, and is never mutated after construction.
///
/// # Examples
///
/// ```rust
/// use term_constraints::analyzers::{Entity, Metric};
///
/// let metric = Metric::success(Entity::Column, "att1", "Completeness", 1.0);
/// assert!(metric.is_success());
/// assert_eq!(metric.instance(), "att1");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Metric<T> {
    entity: Entity,
    instance: String,
    name: String,
    value: Result<T, MetricError>,
}

/// A metric holding a double, the most common kind.
pub type DoubleMetric = Metric<f64>;

/// A metric holding an integer count.
pub type LongMetric = Metric<i64>;

impl<T> Metric<T> {
    /// Creates a success-valued metric.
    pub fn success(
        entity: Entity,
        instance: impl Into<String>,
        name: impl Into<String>,
        value: T,
    ) -> Self {
        Self {
            entity,
            instance: instance.into(),
            name: name.into(),
            value: Ok(value),
        }
    }

    /// Creates a failure-valued metric.
    pub fn failure(
        entity: Entity,
        instance: impl Into<String>,
        name: impl Into<String>,
        error: impl Into<MetricError>,
    ) -> Self {
        Self {
            entity,
            instance: instance.into(),
            name: name.into(),
            value: Err(error.into()),
        }
    }

    /// Creates a metric from a computation result.
    pub fn from_result(
        entity: Entity,
        instance: impl Into<String>,
        name: impl Into<String>,
        result: Result<T, AnalyzerError>,
    ) -> Self {
        Self {
            entity,
            instance: instance.into(),
            name: name.into(),
            value: result.map_err(MetricError::new),
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Result<T, MetricError> {
        &self.value
    }

    pub fn is_success(&self) -> bool {
        self.value.is_ok()
    }

    /// Returns the error message if this is a failure-valued metric.
    pub fn error_message(&self) -> Option<String> {
        self.value.as_ref().err().map(MetricError::message)
    }

    /// Transforms the success value, keeping naming and any failure as is.
    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        Metric {
            entity: self.entity,
            instance: self.instance,
            name: self.name,
            value: self.value.map(f),
        }
    }
}

impl<T: MetricType> Metric<T> {
    /// Erases the value type so the metric can be stored next to others.
    pub fn into_erased(self) -> Metric<MetricValue> {
        self.map_value(MetricType::into_metric_value)
    }
}

impl Metric<MetricValue> {
    /// Recovers a typed metric.
    ///
    /// Failure-valued metrics convert to any type; success values convert
    /// only when the stored variant matches `T`.
    pub fn downcast<T: MetricType>(&self) -> Option<Metric<T>> {
        let value = match &self.value {
            Ok(v) => Ok(T::from_metric_value(v)?),
            Err(e) => Err(e.clone()),
        };
        Some(Metric {
            entity: self.entity,
            instance: self.instance.clone(),
            name: self.name.clone(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_metric() {
        let metric: DoubleMetric = Metric::success(Entity::Column, "att1", "Completeness", 0.5);
        assert!(metric.is_success());
        assert_eq!(metric.entity(), Entity::Column);
        assert_eq!(metric.name(), "Completeness");
        assert_eq!(*metric.value().as_ref().unwrap(), 0.5);
        assert!(metric.error_message().is_none());
    }

    #[test]
    fn test_failure_metric() {
        let metric: DoubleMetric = Metric::failure(
            Entity::Column,
            "att2",
            "Completeness",
            AnalyzerError::precondition("Missing column att2"),
        );
        assert!(!metric.is_success());
        assert_eq!(
            metric.error_message().as_deref(),
            Some("requirement failed: Missing column att2")
        );
    }

    #[test]
    fn test_erase_and_downcast() {
        let metric: LongMetric = Metric::success(Entity::Dataset, "*", "Size", 12);
        let erased = metric.into_erased();
        assert_eq!(*erased.value().as_ref().unwrap(), MetricValue::Long(12));

        let typed = erased.downcast::<i64>().unwrap();
        assert_eq!(*typed.value().as_ref().unwrap(), 12);
        assert!(erased.downcast::<f64>().is_none());
    }

    #[test]
    fn test_failure_downcasts_to_any_type() {
        let metric: DoubleMetric =
            Metric::failure(Entity::Column, "c", "Mean", AnalyzerError::custom("bad"));
        let erased = metric.into_erased();
        let as_long = erased.downcast::<i64>().unwrap();
        assert_eq!(as_long.error_message().as_deref(), Some("bad"));
    }
}
