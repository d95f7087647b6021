//! Basic statistical analyzers for common metrics.
//!
//! These analyzers serve as both useful functionality and reference
//! implementations for building custom analyzers.

mod completeness;
mod mean;
mod min_max;
mod size;

pub use completeness::{CompletenessAnalyzer, CompletenessState};
pub use mean::{MeanAnalyzer, MeanState};
pub use min_max::{MaxState, MaximumAnalyzer, MinState, MinimumAnalyzer};
pub use size::{SizeAnalyzer, SizeState};

#[cfg(test)]
mod tests;
