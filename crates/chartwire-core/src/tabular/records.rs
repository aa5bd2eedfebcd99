use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::{Cell, RowSource, TabularSource};
use crate::ColumnMappingError;

/// Row-major table: one JSON object per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    rows: Vec<Map<String, Value>>,
}

impl Records {
    pub fn new(rows: Vec<Map<String, Value>>) -> Self {
        Self { rows }
    }

    /// Accepts a JSON array whose elements are all objects.
    pub fn from_value(value: Value) -> Result<Self, ColumnMappingError> {
        let malformed = ColumnMappingError::MalformedSource {
            expected: "an array of JSON objects",
        };

        let Value::Array(items) = value else {
            return Err(malformed);
        };

        let rows = items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                _ => Err(malformed.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub fn as_slice(&self) -> &[Map<String, Value>] {
        &self.rows
    }
}

impl RowSource for Map<String, Value> {
    fn get(&self, column: &str) -> Option<Cell<'_>> {
        Map::get(self, column).map(Cell::from_json)
    }
}

impl TabularSource for Records {
    type Row<'a> = &'a Map<String, Value>;

    /// Union of keys over every row.
    fn columns(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn rows(&self) -> impl Iterator<Item = Self::Row<'_>> + '_ {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_object_rows() {
        let err = Records::from_value(json!([{"time": 1}, 2])).expect_err("must fail");
        assert!(matches!(err, ColumnMappingError::MalformedSource { .. }));
        assert!(Records::from_value(json!({"time": [1]})).is_err());
    }

    #[test]
    fn columns_are_the_union_of_row_keys() {
        let records = Records::from_value(json!([
            {"time": 1, "value": 2},
            {"time": 2, "color": "red"},
        ]))
        .expect("records");
        assert_eq!(records.columns(), vec!["color", "time", "value"]);
        assert_eq!(TabularSource::len(&records), 2);
    }
}
