//! # term-constraints - constraint evaluation on DataFusion
//!
//! `term-constraints` judges data-quality rules of the form "analyzer +
//! assertion". An analyzer computes a metric (row count, completeness of a
//! column, mean, ...) from a dataset registered in a DataFusion
//! `SessionContext`; a constraint asserts on that metric and reports a
//! pass/fail status with a deterministic message.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use datafusion::arrow::array::{Float64Array, Int64Array};
//! use datafusion::arrow::datatypes::{DataType, Field, Schema};
//! use datafusion::arrow::record_batch::RecordBatch;
//! use datafusion::prelude::*;
//! use term_constraints::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![
//!         Field::new("id", DataType::Int64, false),
//!         Field::new("amount", DataType::Float64, true),
//!     ])),
//!     vec![
//!         Arc::new(Int64Array::from(vec![1, 2, 3])),
//!         Arc::new(Float64Array::from(vec![Some(5.0), None, Some(7.0)])),
//!     ],
//! )?;
//! let ctx = SessionContext::new();
//! ctx.register_batch("data", batch)?;
//! let data = Dataset::with_default_table(ctx);
//!
//! let constraint = AnalysisBasedConstraint::new(CompletenessAnalyzer::new("amount"), |c| c == 1.0)
//!     .with_hint("Every order needs an amount.");
//!
//! let result = constraint.calculate(&data).await;
//! assert_eq!(result.status, ConstraintStatus::Failure);
//! assert_eq!(
//!     result.message.as_deref(),
//!     Some("Value: 0.6666666666666666 does not meet the constraint requirement! Every order needs an amount.")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Two ways to judge a constraint
//!
//! - `calculate(data)` computes the metric directly from the data.
//! - `evaluate(context)` reads the metric from an
//!   [`AnalyzerContext`](analyzers::AnalyzerContext) produced earlier, e.g.
//!   by an [`AnalysisRunner`](analyzers::AnalysisRunner). If the context has
//!   no metric for the constraint's analyzer, the constraint fails with
//!   `Missing Analysis, can't run the constraint!`.
//!
//! Both report the same status and message for the same metric. Neither
//! returns an error: see [`constraints::messages`] for the four ways a
//! constraint can fail.
//!
//! ## Architecture
//!
//! - **`analyzers`**: the analyzer abstraction, metrics, state persistence
//!   and the basic analyzers
//! - **`constraints`**: analysis-based constraints, failure messages, factories
//! - **`core`**: the `Constraint` trait, constraint results and checks
//! - **`logging`**: log configuration and subscriber setup
//! - **`error`**: errors of setup and reporting helpers

pub mod analyzers;
pub mod constraints;
pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;

#[cfg(test)]
pub(crate) mod test_helpers;
