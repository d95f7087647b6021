//! The data handle analyzers compute from.

use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use datafusion::prelude::*;

use super::errors::{AnalyzerError, AnalyzerResult};

/// Table name used when none is given.
pub const DEFAULT_TABLE: &str = "data";

/// A table registered in a DataFusion session.
///
/// Analyzers never see the session directly; they read the schema and issue
/// SQL against the table through this handle.
///
/// # Examples
///
/// ```rust
/// use datafusion::prelude::SessionContext;
/// use term_constraints::analyzers::Dataset;
///
/// let dataset = Dataset::new(SessionContext::new(), "orders");
/// assert_eq!(dataset.table_name(), "orders");
/// ```
#[derive(Clone)]
pub struct Dataset {
    ctx: SessionContext,
    table_name: Arc<str>,
}

impl Dataset {
    /// Creates a handle for `table_name` in the given session.
    pub fn new(ctx: SessionContext, table_name: impl Into<Arc<str>>) -> Self {
        Self {
            ctx,
            table_name: table_name.into(),
        }
    }

    /// Creates a handle for the default table name `"data"`.
    pub fn with_default_table(ctx: SessionContext) -> Self {
        Self::new(ctx, DEFAULT_TABLE)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn session(&self) -> &SessionContext {
        &self.ctx
    }

    /// Returns the table name quoted for use in SQL.
    pub fn quoted_table(&self) -> String {
        quote_identifier(&self.table_name)
    }

    /// Returns the Arrow schema of the table.
    pub async fn schema(&self) -> AnalyzerResult<SchemaRef> {
        let df = self.ctx.table(self.table_name.as_ref()).await?;
        Ok(Arc::clone(df.schema().inner()))
    }

    /// Runs a query and collects its batches.
    pub async fn sql(&self, sql: &str) -> AnalyzerResult<Vec<RecordBatch>> {
        let df = self.ctx.sql(sql).await?;
        Ok(df.collect().await?)
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("table_name", &self.table_name)
            .finish()
    }
}

/// Quotes a column or table name so that case and special characters survive.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Reads an integer from the first row of a single-row aggregate result.
///
/// Returns `None` when the result is empty or the cell is NULL.
pub(crate) fn first_row_i64(batches: &[RecordBatch], column: usize) -> AnalyzerResult<Option<i64>> {
    let Some(batch) = batches.iter().find(|b| b.num_rows() > 0) else {
        return Ok(None);
    };
    let array = batch
        .column(column)
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| {
            AnalyzerError::invalid_data(format!(
                "Expected Int64 array, got {:?}",
                batch.column(column).data_type()
            ))
        })?;
    Ok((!array.is_null(0)).then(|| array.value(0)))
}

/// Reads a double from the first row of a single-row aggregate result.
pub(crate) fn first_row_f64(batches: &[RecordBatch], column: usize) -> AnalyzerResult<Option<f64>> {
    let Some(batch) = batches.iter().find(|b| b.num_rows() > 0) else {
        return Ok(None);
    };
    let array = batch
        .column(column)
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| {
            AnalyzerError::invalid_data(format!(
                "Expected Float64 array, got {:?}",
                batch.column(column).data_type()
            ))
        })?;
    Ok((!array.is_null(0)).then(|| array.value(0)))
}
