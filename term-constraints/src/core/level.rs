//! Check severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a check.
///
/// A check whose constraints do not all hold reports its level as its
/// status. Levels are ordered by severity: Error > Warning.
///
/// ```rust
/// use term_constraints::core::Level;
///
/// assert!(Level::Error > Level::Warning);
/// assert_eq!(Level::Warning.to_string(), "warning");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Indicates potential issues that should be reviewed
    #[default]
    Warning = 1,
    /// Indicates critical data quality issues that must be addressed
    Error = 2,
}

impl Level {
    /// Returns the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
