//! Types for analyzer metric values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-erased metric value.
///
/// Analyzers produce strongly typed values (see [`MetricType`]); an
/// [`AnalyzerContext`](super::AnalyzerContext) stores metrics from many
/// analyzers side by side, so it holds them as `MetricValue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MetricValue {
    /// A floating-point metric value (e.g., mean, percentage).
    Double(f64),

    /// An integer metric value (e.g., count, size).
    Long(i64),

    /// A string metric value (e.g., mode, most frequent value).
    String(String),

    /// A boolean metric value (e.g., presence/absence).
    Boolean(bool),
}

impl MetricValue {
    /// Checks if the metric value is numeric (Double or Long).
    pub fn is_numeric(&self) -> bool {
        matches!(self, MetricValue::Double(_) | MetricValue::Long(_))
    }

    /// Attempts to get the numeric value as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Double(v) => Some(*v),
            MetricValue::Long(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetricValue::Long(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Double(v) => write!(f, "{}", v.render()),
            MetricValue::Long(v) => write!(f, "{v}"),
            MetricValue::String(s) => write!(f, "{s}"),
            MetricValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A concrete value type an analyzer can produce.
///
/// Conversion through [`MetricValue`] is lossless: `from_metric_value` only
/// accepts the variant that `into_metric_value` produces.
pub trait MetricType: Clone + fmt::Debug + Send + Sync + 'static {
    /// Erases the value into a [`MetricValue`].
    fn into_metric_value(self) -> MetricValue;

    /// Recovers a typed value, or `None` if the variant does not match.
    fn from_metric_value(value: &MetricValue) -> Option<Self>;

    /// Renders the value in its native representation, as used in
    /// constraint failure messages.
    fn render(&self) -> String;
}

impl MetricType for f64 {
    fn into_metric_value(self) -> MetricValue {
        MetricValue::Double(self)
    }

    fn from_metric_value(value: &MetricValue) -> Option<Self> {
        match value {
            MetricValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    // Doubles always carry a decimal point: 1.0, 0.25, 1.0E20, 1.5E-7, NaN,
    // Infinity.
    fn render(&self) -> String {
        if self.is_infinite() {
            return if self.is_sign_positive() {
                "Infinity".to_string()
            } else {
                "-Infinity".to_string()
            };
        }

        let debug = format!("{self:?}");
        match debug.split_once('e') {
            Some((mantissa, exponent)) if mantissa.contains('.') => {
                format!("{mantissa}E{exponent}")
            }
            Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
            None => debug,
        }
    }
}

impl MetricType for i64 {
    fn into_metric_value(self) -> MetricValue {
        MetricValue::Long(self)
    }

    fn from_metric_value(value: &MetricValue) -> Option<Self> {
        value.as_i64()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl MetricType for String {
    fn into_metric_value(self) -> MetricValue {
        MetricValue::String(self)
    }

    fn from_metric_value(value: &MetricValue) -> Option<Self> {
        match value {
            MetricValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl MetricType for bool {
    fn into_metric_value(self) -> MetricValue {
        MetricValue::Boolean(self)
    }

    fn from_metric_value(value: &MetricValue) -> Option<Self> {
        match value {
            MetricValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Double(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Long(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Boolean(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::String(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_render_keeps_decimal_point() {
        assert_eq!(1.0_f64.render(), "1.0");
        assert_eq!(0.25_f64.render(), "0.25");
        assert_eq!(2.0_f64.render(), "2.0");
        assert_eq!(f64::INFINITY.render(), "Infinity");
        assert_eq!(f64::NEG_INFINITY.render(), "-Infinity");
        assert_eq!(f64::NAN.render(), "NaN");
        assert_eq!(12345678.0_f64.render(), "12345678.0");
    }

    #[test]
    fn test_double_render_exponent_form() {
        assert_eq!(1e20_f64.render(), "1.0E20");
        assert_eq!(1e-7_f64.render(), "1.0E-7");
        assert_eq!(1.5e-7_f64.render(), "1.5E-7");
        assert_eq!((-2.5e21_f64).render(), "-2.5E21");
        assert_eq!(MetricValue::Double(1e20).to_string(), "1.0E20");
    }

    #[test]
    fn test_long_and_string_render() {
        assert_eq!(42_i64.render(), "42");
        assert_eq!("abc".to_string().render(), "abc");
        assert_eq!(true.render(), "true");
    }

    #[test]
    fn test_round_trip_rejects_other_variants() {
        assert_eq!(f64::from_metric_value(&MetricValue::Double(0.5)), Some(0.5));
        assert_eq!(f64::from_metric_value(&MetricValue::Long(5)), None);
        assert_eq!(i64::from_metric_value(&MetricValue::Double(5.0)), None);
        assert_eq!(
            String::from_metric_value(&MetricValue::from("x")),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_metric_value_display() {
        assert_eq!(MetricValue::Double(1.0).to_string(), "1.0");
        assert_eq!(MetricValue::Long(7).to_string(), "7");
        assert!(MetricValue::Long(7).is_numeric());
        assert!(!MetricValue::Boolean(true).is_numeric());
        assert_eq!(MetricValue::Long(7).as_f64(), Some(7.0));
    }
}
