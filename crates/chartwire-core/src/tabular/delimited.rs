use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::{Cell, RowSource, TabularSource};
use crate::ChartError;

/// CSV table with a header row; every cell is text.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ChartError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_owned).collect();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, records })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.records.len(),
            "loaded csv table"
        );
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// One record of a [`CsvTable`].
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    headers: &'a [String],
    record: &'a StringRecord,
}

impl RowSource for CsvRow<'_> {
    fn get(&self, column: &str) -> Option<Cell<'_>> {
        let index = self.headers.iter().position(|header| header == column)?;
        Some(self.record.get(index).map_or(Cell::Missing, Cell::from_text))
    }
}

impl TabularSource for CsvTable {
    type Row<'a> = CsvRow<'a>;

    fn columns(&self) -> Vec<&str> {
        self.headers.iter().map(String::as_str).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn rows(&self) -> impl Iterator<Item = Self::Row<'_>> + '_ {
        self.records.iter().map(|record| CsvRow {
            headers: &self.headers,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_read_as_missing() {
        let table = CsvTable::from_reader("time,value,color\n2024-01-01, 1.5 ,\n".as_bytes())
            .expect("csv");
        let row = table.rows().next().expect("one row");
        assert_eq!(row.get("value"), Some(Cell::Text("1.5")));
        assert_eq!(row.get("color"), Some(Cell::Missing));
        assert_eq!(row.get("volume"), None);
    }

    #[test]
    fn ragged_records_are_csv_errors() {
        let err = CsvTable::from_reader("time,value\n2024-01-01\n".as_bytes()).expect_err("must fail");
        assert!(matches!(err, ChartError::Csv(_)));
    }
}
