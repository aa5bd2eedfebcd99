use std::collections::BTreeMap;

use serde_json::Value;

use super::{Cell, RowSource, TabularSource};
use crate::ColumnMappingError;

/// Column-major table: equal-length value arrays keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnarFrame {
    columns: BTreeMap<String, Vec<Value>>,
    len: usize,
}

impl ColumnarFrame {
    pub fn new(columns: BTreeMap<String, Vec<Value>>) -> Result<Self, ColumnMappingError> {
        let len = columns.values().next().map_or(0, Vec::len);

        if let Some((column, values)) = columns.iter().find(|(_, values)| values.len() != len) {
            return Err(ColumnMappingError::RaggedColumns {
                column: column.clone(),
                expected: len,
                actual: values.len(),
            });
        }

        Ok(Self { columns, len })
    }

    /// Accepts a JSON object whose members are all arrays.
    pub fn from_value(value: Value) -> Result<Self, ColumnMappingError> {
        let malformed = ColumnMappingError::MalformedSource {
            expected: "an object of JSON arrays",
        };

        let Value::Object(members) = value else {
            return Err(malformed);
        };

        let columns = members
            .into_iter()
            .map(|(name, values)| match values {
                Value::Array(values) => Ok((name, values)),
                _ => Err(malformed.clone()),
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Self::new(columns)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}

/// One row of a [`ColumnarFrame`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnarRow<'a> {
    frame: &'a ColumnarFrame,
    index: usize,
}

impl RowSource for ColumnarRow<'_> {
    fn get(&self, column: &str) -> Option<Cell<'_>> {
        self.frame
            .columns
            .get(column)
            .and_then(|values| values.get(self.index))
            .map(Cell::from_json)
    }
}

impl TabularSource for ColumnarFrame {
    type Row<'a> = ColumnarRow<'a>;

    fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn rows(&self) -> impl Iterator<Item = Self::Row<'_>> + '_ {
        (0..self.len).map(move |index| ColumnarRow { frame: self, index })
    }
}
