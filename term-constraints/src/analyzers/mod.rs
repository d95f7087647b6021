//! Core analyzer framework for computing metrics from data.
//!
//! An [`Analyzer`] computes one [`Metric`] from a [`Dataset`]: it reads the
//! data into an intermediate state, optionally merges that state with a
//! previously stored one, and turns the state into a metric. Whatever goes
//! wrong along the way ends up as a failure-valued metric, never as an error
//! returned to the caller.
//!
//! Metrics from many analyzers are collected into an [`AnalyzerContext`],
//! keyed by [`AnalyzerKey`], so that constraints can later be judged without
//! touching the data again.
//!
//! ## Available Analyzers
//!
//! - **Basic Analyzers** (`basic`): size, completeness, mean, minimum, maximum
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use term_constraints::analyzers::{basic::*, AnalysisRunner, Analyzer, Dataset};
//! use datafusion::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = SessionContext::new();
//! ctx.register_csv("data", "users.csv", CsvReadOptions::new()).await?;
//! let dataset = Dataset::with_default_table(ctx);
//!
//! // One analyzer, computed directly
//! let metric = CompletenessAnalyzer::new("email").calculate(&dataset, None, None).await;
//! match metric.value() {
//!     Ok(completeness) => println!("email completeness: {completeness}"),
//!     Err(e) => println!("could not compute completeness: {e}"),
//! }
//!
//! // Many analyzers, collected for later constraint evaluation
//! let context = AnalysisRunner::new()
//!     .add(SizeAnalyzer::new())
//!     .add(MeanAnalyzer::new("age"))
//!     .run(&dataset)
//!     .await;
//! println!("{}", context.success_metrics_as_json()?);
//! # Ok(())
//! # }
//! ```

pub mod basic;
pub mod context;
pub mod data;
pub mod errors;
pub mod metric;
pub mod preconditions;
pub mod runner;
pub mod state;
pub mod traits;
pub mod types;

pub use context::{AnalysisMetadata, AnalyzerContext, MetricRow};
pub use data::Dataset;
pub use errors::{AnalyzerError, AnalyzerResult, MetricError};
pub use metric::{DoubleMetric, Entity, LongMetric, Metric};
pub use preconditions::Precondition;
pub use runner::AnalysisRunner;
pub use state::{FileSystemStateProvider, InMemoryStateProvider, StateLoader, StatePersister};
pub use traits::{empty_state_metric, merge_optional, Analyzer, AnalyzerKey, AnalyzerState};
pub use types::{MetricType, MetricValue};
