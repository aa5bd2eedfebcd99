use thiserror::Error;

use crate::registry::{DataPointKind, SeriesKind};
use crate::tabular::LogicalField;

/// Field-level validation failures raised while constructing models.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error(
        "timestamp must be an ISO-8601 date, RFC3339 date-time or integral epoch seconds: '{value}'"
    )]
    InvalidTimestamp { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },
    #[error("field '{field}' must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("field '{field}' is not a #RRGGBB/#RRGGBBAA hex or named CSS color: '{value}'")]
    InvalidColor { field: &'static str, value: String },
    #[error("opacity can only be applied to hex colors: '{value}'")]
    OpacityRequiresHex { value: String },
    #[error("locale must be a BCP-47 language tag: '{value}'")]
    InvalidLocale { value: String },
    #[error("field '{field}' cannot be empty")]
    EmptyText { field: &'static str },

    #[error("unknown {registry} '{value}'")]
    UnknownVariant {
        registry: &'static str,
        value: String,
    },

    #[error("field '{field}' is required")]
    MissingField { field: &'static str },
    #[error("field '{field}' expected {expected}, got '{value}'")]
    InvalidCell {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,
    #[error("band values must satisfy upper >= middle >= lower")]
    InvalidBandOrder,

    #[error("time {current} at index {index} must be after previous time {previous}")]
    NonIncreasingTime {
        index: usize,
        previous: String,
        current: String,
    },

    #[error("row {row}: {source}")]
    AtRow {
        row: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wrap an error with the 0-based index of the input row that caused it.
    pub fn at_row(self, row: usize) -> Self {
        Self::AtRow {
            row,
            source: Box::new(self),
        }
    }

    /// Row index carried by [`ValidationError::AtRow`], if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::AtRow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// A series was handed a data point of a kind it does not render.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{series} series cannot hold {point} data (point index {index})")]
pub struct TypeMismatchError {
    pub series: SeriesKind,
    pub point: DataPointKind,
    pub index: usize,
}

/// Column mapping does not line up with the tabular source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnMappingError {
    #[error("column '{column}' mapped to field '{field}' is not present in the source")]
    MissingColumn { field: LogicalField, column: String },

    #[error("column '{column}' has {actual} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("tabular source must be {expected}")]
    MalformedSource { expected: &'static str },
}

/// The model graph holds something the frontend payload cannot represent.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("keys collapse to the same camelCase name '{key}' at {path}")]
    KeyCollision { key: String, path: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Top-level error type for chart construction and serialization.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),

    #[error(transparent)]
    ColumnMapping(#[from] ColumnMappingError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_wrapper_exposes_index_and_cause() {
        let err = ValidationError::InvalidBarRange.at_row(3);
        assert_eq!(err.row(), Some(3));
        assert_eq!(err.to_string(), "row 3: bar high must be >= low");
    }

    #[test]
    fn type_mismatch_names_both_kinds() {
        let err = TypeMismatchError {
            series: SeriesKind::Line,
            point: DataPointKind::Candlestick,
            index: 0,
        };
        assert_eq!(
            err.to_string(),
            "line series cannot hold candlestick data (point index 0)"
        );
    }
}
