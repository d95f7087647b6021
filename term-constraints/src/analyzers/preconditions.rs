//! Schema checks an analyzer runs before touching any data.

use arrow::datatypes::{DataType, Schema};

use super::errors::{AnalyzerError, AnalyzerResult};

/// A check against the input schema.
pub type Precondition = Box<dyn Fn(&Schema) -> AnalyzerResult<()> + Send + Sync>;

/// Requires the schema to contain `column`.
pub fn has_column(column: impl Into<String>) -> Precondition {
    let column = column.into();
    Box::new(move |schema: &Schema| {
        if schema.field_with_name(&column).is_ok() {
            Ok(())
        } else {
            Err(AnalyzerError::precondition(format!(
                "Input data does not include column {column}!"
            )))
        }
    })
}

/// Requires `column`, if present, to have a numeric type.
///
/// Pair with [`has_column`]; a missing column is reported there.
pub fn is_numeric(column: impl Into<String>) -> Precondition {
    let column = column.into();
    Box::new(move |schema: &Schema| {
        let Ok(field) = schema.field_with_name(&column) else {
            return Ok(());
        };
        if is_numeric_type(field.data_type()) {
            Ok(())
        } else {
            Err(AnalyzerError::precondition(format!(
                "Expected type of column {column} to be one of (Int8, Int16, Int32, Int64, \
                 UInt8, UInt16, UInt32, UInt64, Float16, Float32, Float64, Decimal128, \
                 Decimal256), but found {:?} instead!",
                field.data_type()
            )))
        }
    })
}

fn is_numeric_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _)
    )
}

/// Runs the preconditions in order and returns the first failure.
pub fn find_first_failing(schema: &Schema, preconditions: &[Precondition]) -> AnalyzerResult<()> {
    preconditions.iter().try_for_each(|check| check(schema))
}
