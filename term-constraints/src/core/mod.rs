//! Core validation types: the constraint contract and checks.
//!
//! - **[`Constraint`]**: a rule judged against data or a precomputed
//!   [`AnalyzerContext`](crate::analyzers::AnalyzerContext)
//! - **[`ConstraintResult`]**: status, message and the metric it was based on
//! - **[`Check`]**: a named group of constraints with a severity [`Level`]
//!
//! ```text
//! Check (Level: Error)
//!     ├── Constraint 1 ──> ConstraintResult
//!     └── Constraint 2 ──> ConstraintResult
//!                          └──> CheckResult (Success | Warning | Error)
//! ```

mod check;
mod constraint;
mod level;

pub use check::{Check, CheckBuilder, CheckResult, CheckStatus, ConstraintOutcome};
pub use constraint::{
    BoxedConstraint, Constraint, ConstraintMetadata, ConstraintResult, ConstraintStatus,
};
pub use level::Level;
