//! Behavior tests for building series out of tables.
//!
//! Tables arrive as CSV text, row-major JSON records or column-major JSON
//! frames. These tests check what a caller observes: which rows fail, which
//! columns are looked up and how missing data is reported.

use std::io::Write;

use chartwire_core::{
    build_points, AnySeries, BarSeries, ChartError, ColumnMapping, ColumnMappingError,
    ColumnarFrame, CsvTable, DataPointKind, LineSeries, LogicalField, Records, RibbonSeries,
    SeriesKind, ValidationError,
};
use serde_json::json;

fn records(value: serde_json::Value) -> Records {
    Records::from_value(value).expect("array of objects")
}

// =============================================================================
// Row-level validation
// =============================================================================

#[test]
fn invalid_row_is_reported_with_its_zero_based_index() {
    // Given: Five OHLC rows where the fourth has high below low
    let table = records(json!([
        {"time": "2024-01-01", "open": 10, "high": 12, "low": 9, "close": 11},
        {"time": "2024-01-02", "open": 11, "high": 13, "low": 10, "close": 12},
        {"time": "2024-01-03", "open": 12, "high": 14, "low": 11, "close": 13},
        {"time": "2024-01-04", "open": 13, "high": 9, "low": 12, "close": 10},
        {"time": "2024-01-05", "open": 10, "high": 11, "low": 9, "close": 10}
    ]));

    // When: A bar series is built from it
    let err = BarSeries::from_table(&table, &ColumnMapping::new()).expect_err("must fail");

    // Then: The error names row 3 and the violated range
    let ChartError::Validation(error) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(error.row(), Some(3));
    assert!(matches!(
        error,
        ValidationError::AtRow { ref source, .. } if matches!(**source, ValidationError::InvalidBarRange)
    ));
}

#[test]
fn rows_must_move_forward_in_time() {
    // Given: A table whose third row repeats the second row's date
    let table = records(json!([
        {"time": "2024-01-01", "value": 1},
        {"time": "2024-01-02", "value": 2},
        {"time": "2024-01-02", "value": 3}
    ]));

    // When: A line series is built
    let err = LineSeries::from_table(&table, &ColumnMapping::new()).expect_err("must fail");

    // Then: Row 2 is blamed for the ordering violation
    let ChartError::Validation(error) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(error.row(), Some(2));
    assert!(error.to_string().starts_with("row 2: time 2024-01-02"));
}

#[test]
fn unparseable_cell_names_the_field_and_value() {
    let table = records(json!([{"time": "2024-01-01", "value": "n/a"}]));

    let err = LineSeries::from_table(&table, &ColumnMapping::new()).expect_err("must fail");

    assert_eq!(err.to_string(), "row 0: field 'value' expected a number, got 'n/a'");
}

// =============================================================================
// Column mapping
// =============================================================================

#[test]
fn explicit_mapping_reads_renamed_columns() {
    // Given: Columns named the way a market data export names them
    let table = records(json!([
        {"Date": "2024-01-01", "Upper": 3, "Lower": 1},
        {"Date": "2024-01-02", "Upper": 4, "Lower": 2}
    ]));
    let mapping = ColumnMapping::new()
        .with_column(LogicalField::Time, "Date")
        .with_column(LogicalField::Upper, "Upper")
        .with_column(LogicalField::Lower, "Lower");

    // When: A ribbon series is built through the mapping
    let series = RibbonSeries::from_table(&table, &mapping).expect("ribbon");

    // Then: Every row became a point
    assert_eq!(series.len(), 2);
    assert_eq!(series.data()[1].kind(), DataPointKind::Ribbon);
}

#[test]
fn missing_required_column_fails_before_any_row_is_read() {
    // Given: Rows without a close column, the first of which is also invalid
    let table = records(json!([
        {"time": "not a date", "open": 1, "high": 2, "low": 0}
    ]));

    // When: Candlestick points are built
    let err = build_points(DataPointKind::Candlestick, &table, &ColumnMapping::new())
        .expect_err("must fail");

    // Then: The mapping error wins over the bad row
    assert!(matches!(
        err,
        ChartError::ColumnMapping(ColumnMappingError::MissingColumn {
            field: LogicalField::Close,
            ref column,
        }) if column == "close"
    ));
}

#[test]
fn explicitly_mapped_optional_column_must_exist() {
    let table = records(json!([{"time": "2024-01-01", "value": 1}]));
    let mapping = ColumnMapping::new().with_column(LogicalField::Color, "Tint");

    let err = LineSeries::from_table(&table, &mapping).expect_err("must fail");

    assert_eq!(
        err.to_string(),
        "column 'Tint' mapped to field 'color' is not present in the source"
    );
}

#[test]
fn optional_column_is_read_when_present() {
    let table = records(json!([
        {"time": "2024-01-01", "value": 1, "color": "#ff0000"},
        {"time": "2024-01-02", "value": 2}
    ]));

    let series = LineSeries::from_table(&table, &ColumnMapping::new()).expect("line");
    let value = chartwire_core::to_frontend(&series).expect("serialize");

    assert_eq!(value["data"][0]["color"], "#ff0000");
    assert!(value["data"][1].get("color").is_none());
}

#[test]
fn empty_sources_yield_empty_series() {
    let frame = ColumnarFrame::from_value(json!({})).expect("empty frame");
    let series = AnySeries::from_table(SeriesKind::Area, &frame, &ColumnMapping::new())
        .expect("empty series");
    assert!(series.is_empty());
    assert_eq!(series.kind(), SeriesKind::Area);

    let rows = records(json!([]));
    let series = LineSeries::from_table(&rows, &ColumnMapping::new()).expect("empty series");
    assert!(series.is_empty());
}

// =============================================================================
// Source formats
// =============================================================================

#[test]
fn columnar_frames_must_be_rectangular() {
    let err = ColumnarFrame::from_value(json!({
        "time": ["2024-01-01", "2024-01-02"],
        "value": [1.0]
    }))
    .expect_err("must fail");

    assert_eq!(
        err,
        ColumnMappingError::RaggedColumns {
            column: "value".to_owned(),
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn csv_file_with_epoch_times_builds_a_histogram() {
    // Given: A CSV export on disk with epoch-second timestamps and padded cells
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("volume.csv");
    let mut file = std::fs::File::create(&path).expect("create csv");
    writeln!(file, "ts, shares").expect("write");
    writeln!(file, "1704067200, 1500").expect("write");
    writeln!(file, "1704153600, 2200").expect("write");
    drop(file);

    // When: It is loaded and mapped onto a histogram
    let table = CsvTable::from_path(&path).expect("csv");
    let mapping = ColumnMapping::new()
        .with_column(LogicalField::Time, "ts")
        .with_column(LogicalField::Value, "shares");
    let series = AnySeries::from_table(SeriesKind::Histogram, &table, &mapping).expect("series");

    // Then: Times are read as UTC instants and values as numbers
    let value = chartwire_core::to_frontend(&series).expect("serialize");
    assert_eq!(
        value["data"],
        json!([
            {"time": "2024-01-01", "value": 1500.0},
            {"time": "2024-01-02", "value": 2200.0}
        ])
    );
}

#[test]
fn csv_blank_cell_counts_as_missing() {
    let table = CsvTable::from_reader("time,value\n2024-01-01,\n".as_bytes()).expect("csv");

    let err = LineSeries::from_table(&table, &ColumnMapping::new()).expect_err("must fail");

    assert_eq!(err.to_string(), "row 0: field 'value' is required");
}
