//! # Tabular Input
//!
//! Builds data points from row-oriented or column-oriented tables.
//!
//! A [`ColumnMapping`] names the source column for each [`LogicalField`]; the
//! point constructors never see the source schema. Construction is
//! all-or-nothing: the first bad row aborts the whole table with
//! [`ValidationError::AtRow`] carrying its 0-based index.
//!
//! | Source | Shape |
//! |--------|-------|
//! | [`Records`] | JSON array of objects (row-major) |
//! | [`ColumnarFrame`] | JSON object of equal-length arrays (column-major) |
//! | [`CsvTable`] | CSV text with a header row |

mod columnar;
mod delimited;
mod records;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde_json::Value;

use crate::registry::{DataPointKind, SeriesKind};
use crate::serializer::snake_to_camel;
use crate::{
    AreaData, BandData, BarData, BaselineData, CandlestickData, ChartError, ChartTime,
    ColumnMappingError, DataPoint, HistogramData, LineData, Ohlc, OhlcvData, RibbonData,
    ValidationError,
};

pub use columnar::{ColumnarFrame, ColumnarRow};
pub use delimited::{CsvRow, CsvTable};
pub use records::Records;

/// Logical field a data point is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalField {
    Time,
    Value,
    Open,
    High,
    Low,
    Close,
    Volume,
    Color,
    LineColor,
    TopColor,
    BottomColor,
    BorderColor,
    WickColor,
    TopLineColor,
    TopFillColor1,
    TopFillColor2,
    BottomLineColor,
    BottomFillColor1,
    BottomFillColor2,
    Upper,
    Middle,
    Lower,
    Fill,
}

impl LogicalField {
    pub const ALL: [Self; 23] = [
        Self::Time,
        Self::Value,
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::Volume,
        Self::Color,
        Self::LineColor,
        Self::TopColor,
        Self::BottomColor,
        Self::BorderColor,
        Self::WickColor,
        Self::TopLineColor,
        Self::TopFillColor1,
        Self::TopFillColor2,
        Self::BottomLineColor,
        Self::BottomFillColor1,
        Self::BottomFillColor2,
        Self::Upper,
        Self::Middle,
        Self::Lower,
        Self::Fill,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Value => "value",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
            Self::Color => "color",
            Self::LineColor => "line_color",
            Self::TopColor => "top_color",
            Self::BottomColor => "bottom_color",
            Self::BorderColor => "border_color",
            Self::WickColor => "wick_color",
            Self::TopLineColor => "top_line_color",
            Self::TopFillColor1 => "top_fill_color1",
            Self::TopFillColor2 => "top_fill_color2",
            Self::BottomLineColor => "bottom_line_color",
            Self::BottomFillColor1 => "bottom_fill_color1",
            Self::BottomFillColor2 => "bottom_fill_color2",
            Self::Upper => "upper",
            Self::Middle => "middle",
            Self::Lower => "lower",
            Self::Fill => "fill",
        }
    }
}

impl Display for LogicalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalField {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| {
                field.as_str().eq_ignore_ascii_case(wanted)
                    || snake_to_camel(field.as_str()).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ValidationError::UnknownVariant {
                registry: "logical field",
                value: wanted.to_owned(),
            })
    }
}

impl DataPointKind {
    /// Fields every row must provide for this kind.
    pub const fn required_fields(self) -> &'static [LogicalField] {
        use LogicalField::*;
        match self {
            Self::Line | Self::Area | Self::Histogram | Self::Baseline => &[Time, Value],
            Self::Candlestick | Self::Bar => &[Time, Open, High, Low, Close],
            Self::Ohlcv => &[Time, Open, High, Low, Close, Volume],
            Self::Band => &[Time, Upper, Middle, Lower],
            Self::Ribbon => &[Time, Upper, Lower],
        }
    }

    /// Fields read when their column exists.
    pub const fn optional_fields(self) -> &'static [LogicalField] {
        use LogicalField::*;
        match self {
            Self::Line | Self::Histogram | Self::Bar => &[Color],
            Self::Area => &[LineColor, TopColor, BottomColor],
            Self::Candlestick => &[Color, BorderColor, WickColor],
            Self::Ribbon => &[Fill],
            Self::Baseline => &[
                TopLineColor,
                TopFillColor1,
                TopFillColor2,
                BottomLineColor,
                BottomFillColor1,
                BottomFillColor2,
            ],
            Self::Ohlcv | Self::Band => &[],
        }
    }
}

/// How unmapped fields derive their column name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnNaming {
    /// `line_color`
    #[default]
    Snake,
    /// `lineColor`, the names used in serialized output.
    Camel,
}

/// Logical field → source column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<LogicalField, String>,
    naming: ColumnNaming,
}

impl ColumnMapping {
    /// Identity mapping on the snake_case field names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity mapping on the camelCase names the serializer emits, so a
    /// serialized `data` array can be read back.
    pub fn frontend() -> Self {
        Self {
            columns: BTreeMap::new(),
            naming: ColumnNaming::Camel,
        }
    }

    pub fn with_column(mut self, field: LogicalField, column: impl Into<String>) -> Self {
        self.columns.insert(field, column.into());
        self
    }

    pub fn column(&self, field: LogicalField) -> Cow<'_, str> {
        match self.columns.get(&field) {
            Some(column) => Cow::Borrowed(column.as_str()),
            None => match self.naming {
                ColumnNaming::Snake => Cow::Borrowed(field.as_str()),
                ColumnNaming::Camel => Cow::Owned(snake_to_camel(field.as_str())),
            },
        }
    }

    pub fn is_explicit(&self, field: LogicalField) -> bool {
        self.columns.contains_key(&field)
    }
}

impl FromIterator<(LogicalField, String)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (LogicalField, String)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
            naming: ColumnNaming::Snake,
        }
    }
}

/// One cell read from a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Number(f64),
    Text(&'a str),
    /// Null, empty, or absent.
    Missing,
    /// A value of a type no field accepts; carries the type name.
    Unsupported(&'static str),
}

impl<'a> Cell<'a> {
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(number) => number
                .as_f64()
                .map_or(Self::Unsupported("number"), Self::Number),
            Value::String(text) => Self::from_text(text),
            Value::Bool(_) => Self::Unsupported("boolean"),
            Value::Array(_) => Self::Unsupported("array"),
            Value::Object(_) => Self::Unsupported("object"),
        }
    }

    pub fn from_text(text: &'a str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Missing
        } else {
            Self::Text(trimmed)
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => (*text).to_owned(),
            Self::Missing => String::from("<missing>"),
            Self::Unsupported(kind) => format!("<{kind}>"),
        }
    }
}

/// Read access to one row by column name.
pub trait RowSource {
    /// `None` when the row has no such column.
    fn get(&self, column: &str) -> Option<Cell<'_>>;
}

impl<R: RowSource + ?Sized> RowSource for &R {
    fn get(&self, column: &str) -> Option<Cell<'_>> {
        (**self).get(column)
    }
}

/// A table of rows sharing a set of column names.
pub trait TabularSource {
    type Row<'a>: RowSource
    where
        Self: 'a;

    /// Column names known to the source, in a stable order.
    fn columns(&self) -> Vec<&str>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> impl Iterator<Item = Self::Row<'_>> + '_;
}

/// Build points of `kind` from every row of `source`, in row order.
///
/// Fails with [`ColumnMappingError::MissingColumn`] when a required field, or
/// an explicitly mapped optional field, names a column the source lacks. A
/// source with no rows and no known columns yields no points.
pub fn build_points<T: TabularSource>(
    kind: DataPointKind,
    source: &T,
    mapping: &ColumnMapping,
) -> Result<Vec<DataPoint>, ChartError> {
    let columns = source.columns();
    if columns.is_empty() && source.is_empty() {
        tracing::debug!(kind = %kind, "empty tabular source, no points built");
        return Ok(Vec::new());
    }

    check_mapping(kind, &columns, mapping)?;

    let mut points = Vec::with_capacity(source.len());
    let mut previous = None;
    for (index, row) in source.rows().enumerate() {
        let point = point_from_row(kind, &row, mapping).map_err(|error| error.at_row(index))?;
        crate::series::ensure_increasing(previous, point.time(), index)
            .map_err(|error| error.at_row(index))?;
        previous = Some(point.time());
        points.push(point);
    }

    tracing::debug!(kind = %kind, rows = points.len(), "built data points from table");
    Ok(points)
}

/// Point kind a `series` reads from a table with `columns`.
///
/// Series that accept OHLCV bars read them whenever the volume column is
/// present or explicitly mapped, so volume survives the trip through a table.
pub fn table_point_kind(
    series: SeriesKind,
    columns: &[&str],
    mapping: &ColumnMapping,
) -> DataPointKind {
    let has_volume = mapping.is_explicit(LogicalField::Volume)
        || columns.contains(&mapping.column(LogicalField::Volume).as_ref());
    if has_volume && series.accepts(DataPointKind::Ohlcv) {
        DataPointKind::Ohlcv
    } else {
        series.native_point()
    }
}

fn check_mapping(
    kind: DataPointKind,
    columns: &[&str],
    mapping: &ColumnMapping,
) -> Result<(), ColumnMappingError> {
    let required = kind.required_fields().iter().map(|field| (*field, true));
    let optional = kind.optional_fields().iter().map(|field| (*field, false));

    for (field, is_required) in required.chain(optional) {
        if !is_required && !mapping.is_explicit(field) {
            continue;
        }
        let column = mapping.column(field);
        if !columns.contains(&column.as_ref()) {
            return Err(ColumnMappingError::MissingColumn {
                field,
                column: column.into_owned(),
            });
        }
    }

    Ok(())
}

/// Convert one row into a point of `kind`.
pub fn point_from_row<R: RowSource>(
    kind: DataPointKind,
    row: &R,
    mapping: &ColumnMapping,
) -> Result<DataPoint, ValidationError> {
    let reader = RowReader { row, mapping };
    let time = reader.time()?;

    let point = match kind {
        DataPointKind::Line => {
            let mut point = LineData::new(time, reader.number(LogicalField::Value)?)?;
            if let Some(color) = reader.text(LogicalField::Color)? {
                point = point.with_color(color)?;
            }
            point.into()
        }
        DataPointKind::Area => {
            let mut point = AreaData::new(time, reader.number(LogicalField::Value)?)?;
            if let Some(color) = reader.text(LogicalField::LineColor)? {
                point = point.with_line_color(color)?;
            }
            if let Some(color) = reader.text(LogicalField::TopColor)? {
                point = point.with_top_color(color)?;
            }
            if let Some(color) = reader.text(LogicalField::BottomColor)? {
                point = point.with_bottom_color(color)?;
            }
            point.into()
        }
        DataPointKind::Histogram => {
            let mut point = HistogramData::new(time, reader.number(LogicalField::Value)?)?;
            if let Some(color) = reader.text(LogicalField::Color)? {
                point = point.with_color(color)?;
            }
            point.into()
        }
        DataPointKind::Baseline => {
            let mut point = BaselineData::new(time, reader.number(LogicalField::Value)?)?;
            if let Some(color) = reader.text(LogicalField::TopLineColor)? {
                point = point.with_top_line_color(color)?;
            }
            if let Some(color) = reader.text(LogicalField::TopFillColor1)? {
                point = point.with_top_fill_color1(color)?;
            }
            if let Some(color) = reader.text(LogicalField::TopFillColor2)? {
                point = point.with_top_fill_color2(color)?;
            }
            if let Some(color) = reader.text(LogicalField::BottomLineColor)? {
                point = point.with_bottom_line_color(color)?;
            }
            if let Some(color) = reader.text(LogicalField::BottomFillColor1)? {
                point = point.with_bottom_fill_color1(color)?;
            }
            if let Some(color) = reader.text(LogicalField::BottomFillColor2)? {
                point = point.with_bottom_fill_color2(color)?;
            }
            point.into()
        }
        DataPointKind::Candlestick => {
            let mut point = CandlestickData::from_ohlc(time, reader.ohlc()?);
            if let Some(color) = reader.text(LogicalField::Color)? {
                point = point.with_color(color)?;
            }
            if let Some(color) = reader.text(LogicalField::BorderColor)? {
                point = point.with_border_color(color)?;
            }
            if let Some(color) = reader.text(LogicalField::WickColor)? {
                point = point.with_wick_color(color)?;
            }
            point.into()
        }
        DataPointKind::Bar => {
            let mut point = BarData::from_ohlc(time, reader.ohlc()?);
            if let Some(color) = reader.text(LogicalField::Color)? {
                point = point.with_color(color)?;
            }
            point.into()
        }
        DataPointKind::Ohlcv => {
            let ohlc = reader.ohlc()?;
            OhlcvData::new(
                time,
                ohlc.open(),
                ohlc.high(),
                ohlc.low(),
                ohlc.close(),
                reader.number(LogicalField::Volume)?,
            )?
            .into()
        }
        DataPointKind::Band => BandData::new(
            time,
            reader.number(LogicalField::Upper)?,
            reader.number(LogicalField::Middle)?,
            reader.number(LogicalField::Lower)?,
        )?
        .into(),
        DataPointKind::Ribbon => {
            let mut point = RibbonData::new(
                time,
                reader.number(LogicalField::Upper)?,
                reader.number(LogicalField::Lower)?,
            )?;
            if let Some(color) = reader.text(LogicalField::Fill)? {
                point = point.with_fill(color)?;
            }
            point.into()
        }
    };

    Ok(point)
}

fn is_basic_date(text: &str) -> bool {
    text.len() == 8 && text.bytes().all(|byte| byte.is_ascii_digit())
}

struct RowReader<'r, R> {
    row: &'r R,
    mapping: &'r ColumnMapping,
}

impl<R: RowSource> RowReader<'_, R> {
    fn cell(&self, field: LogicalField) -> Cell<'_> {
        self.row
            .get(&self.mapping.column(field))
            .unwrap_or(Cell::Missing)
    }

    /// Numbers are epoch seconds. Eight-digit strings are `YYYYMMDD` dates,
    /// other digit-only strings epoch seconds, and the rest ISO
    /// dates/date-times.
    fn time(&self) -> Result<ChartTime, ValidationError> {
        match self.cell(LogicalField::Time) {
            Cell::Number(seconds) => ChartTime::from_epoch_f64(seconds),
            Cell::Text(text) if is_basic_date(text) => ChartTime::parse(text),
            Cell::Text(text) => match text.parse::<i64>() {
                Ok(seconds) => ChartTime::from_epoch_seconds(seconds),
                Err(_) => ChartTime::parse(text),
            },
            Cell::Missing => Err(ValidationError::MissingField { field: "time" }),
            other @ Cell::Unsupported(_) => Err(ValidationError::InvalidCell {
                field: "time",
                expected: "a timestamp",
                value: other.describe(),
            }),
        }
    }

    fn number(&self, field: LogicalField) -> Result<f64, ValidationError> {
        match self.cell(field) {
            Cell::Number(number) => Ok(number),
            Cell::Text(text) => text.parse::<f64>().map_err(|_| ValidationError::InvalidCell {
                field: field.as_str(),
                expected: "a number",
                value: text.to_owned(),
            }),
            Cell::Missing => Err(ValidationError::MissingField {
                field: field.as_str(),
            }),
            other @ Cell::Unsupported(_) => Err(ValidationError::InvalidCell {
                field: field.as_str(),
                expected: "a number",
                value: other.describe(),
            }),
        }
    }

    fn ohlc(&self) -> Result<Ohlc, ValidationError> {
        Ohlc::new(
            self.number(LogicalField::Open)?,
            self.number(LogicalField::High)?,
            self.number(LogicalField::Low)?,
            self.number(LogicalField::Close)?,
        )
    }

    fn text(&self, field: LogicalField) -> Result<Option<&str>, ValidationError> {
        match self.cell(field) {
            Cell::Text(text) => Ok(Some(text)),
            Cell::Missing => Ok(None),
            other => Err(ValidationError::InvalidCell {
                field: field.as_str(),
                expected: "a string",
                value: other.describe(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(value: Value) -> Records {
        Records::from_value(value).expect("records")
    }

    #[test]
    fn mapping_defaults_and_overrides() {
        let mapping = ColumnMapping::new().with_column(LogicalField::Time, "Date");
        assert_eq!(mapping.column(LogicalField::Time), "Date");
        assert_eq!(mapping.column(LogicalField::LineColor), "line_color");
        assert_eq!(ColumnMapping::frontend().column(LogicalField::LineColor), "lineColor");
    }

    #[test]
    fn parses_logical_field_names() {
        assert_eq!(LogicalField::from_str("wickColor").expect("camel"), LogicalField::WickColor);
        assert_eq!(LogicalField::from_str("WICK_COLOR").expect("snake"), LogicalField::WickColor);
        assert!(LogicalField::from_str("price").is_err());
    }

    #[test]
    fn builds_ohlcv_from_renamed_columns() {
        let source = records(json!([
            {"d": "2024-01-01", "o": 1.0, "h": 2.0, "l": 0.5, "c": 1.5, "v": 100},
            {"d": "2024-01-02", "o": 1.5, "h": 2.5, "l": 1.0, "c": 2.0, "v": 200},
        ]));
        let mapping: ColumnMapping = [
            (LogicalField::Time, "d"),
            (LogicalField::Open, "o"),
            (LogicalField::High, "h"),
            (LogicalField::Low, "l"),
            (LogicalField::Close, "c"),
            (LogicalField::Volume, "v"),
        ]
        .into_iter()
        .map(|(field, column)| (field, column.to_owned()))
        .collect();

        let points = build_points(DataPointKind::Ohlcv, &source, &mapping).expect("must build");
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|point| point.kind() == DataPointKind::Ohlcv));
    }

    #[test]
    fn eight_digit_time_cells_are_calendar_dates() {
        let source = records(json!([
            {"time": "20240102", "value": 1.0},
            {"time": "1704240000", "value": 2.0},
        ]));

        let points =
            build_points(DataPointKind::Line, &source, &ColumnMapping::new()).expect("must build");

        assert_eq!(points[0].time(), ChartTime::parse("2024-01-02").expect("date"));
        assert_eq!(points[1].time(), ChartTime::parse("2024-01-03").expect("date"));

        let bad = records(json!([{"time": "20241340", "value": 1.0}]));
        let err = build_points(DataPointKind::Line, &bad, &ColumnMapping::new())
            .expect_err("month 13 must fail");
        assert!(err.to_string().contains("20241340"));
    }

    #[test]
    fn baseline_rows_carry_their_fill_colors() {
        let source = records(json!([
            {"time": "2024-01-01", "value": 1.0, "top_line_color": "#26a69a",
             "bottom_fill_color2": "#ef5350"},
        ]));

        let points =
            build_points(DataPointKind::Baseline, &source, &ColumnMapping::new()).expect("baseline");

        assert_eq!(
            serde_json::to_value(&points[0]).expect("serialize"),
            json!({
                "time": "2024-01-01",
                "value": 1.0,
                "top_line_color": "#26a69a",
                "bottom_fill_color2": "#ef5350"
            })
        );
    }

    #[test]
    fn volume_column_selects_ohlcv_for_ohlc_series() {
        let mapping = ColumnMapping::new();
        let with_volume = ["time", "open", "high", "low", "close", "volume"];
        let without = ["time", "open", "high", "low", "close"];

        assert_eq!(
            table_point_kind(SeriesKind::Candlestick, &with_volume, &mapping),
            DataPointKind::Ohlcv
        );
        assert_eq!(table_point_kind(SeriesKind::Bar, &with_volume, &mapping), DataPointKind::Ohlcv);
        assert_eq!(
            table_point_kind(SeriesKind::Candlestick, &without, &mapping),
            DataPointKind::Candlestick
        );
        assert_eq!(
            table_point_kind(SeriesKind::Line, &["time", "value", "volume"], &mapping),
            DataPointKind::Line
        );

        let renamed = ColumnMapping::new().with_column(LogicalField::Volume, "Shares");
        assert_eq!(table_point_kind(SeriesKind::Bar, &without, &renamed), DataPointKind::Ohlcv);
    }

    #[test]
    fn missing_required_column_is_a_mapping_error() {
        let source = records(json!([{"time": "2024-01-01", "price": 1.0}]));
        let err = build_points(DataPointKind::Line, &source, &ColumnMapping::new())
            .expect_err("must fail");
        assert!(matches!(
            err,
            ChartError::ColumnMapping(ColumnMappingError::MissingColumn {
                field: LogicalField::Value,
                ..
            })
        ));
    }

    #[test]
    fn explicit_optional_column_must_exist() {
        let source = records(json!([{"time": "2024-01-01", "value": 1.0}]));
        let mapping = ColumnMapping::new().with_column(LogicalField::Color, "shade");
        let err = build_points(DataPointKind::Line, &source, &mapping).expect_err("must fail");
        assert!(matches!(err, ChartError::ColumnMapping(_)));
    }

    #[test]
    fn numeric_strings_and_epoch_cells_are_accepted() {
        let source = records(json!([
            {"time": 1704067200, "value": "1.25"},
            {"time": "1704153600", "value": 2},
        ]));
        let points = build_points(DataPointKind::Line, &source, &ColumnMapping::new())
            .expect("must build");
        assert_eq!(points[0].time(), ChartTime::parse("2024-01-01").expect("date"));
        assert_eq!(points[1].time(), ChartTime::parse("2024-01-02").expect("date"));
    }

    #[test]
    fn out_of_order_row_fails_with_its_index() {
        let source = records(json!([
            {"time": "2024-01-02", "value": 1.0},
            {"time": "2024-01-01", "value": 2.0},
        ]));
        let err = build_points(DataPointKind::Line, &source, &ColumnMapping::new())
            .expect_err("must fail");
        let ChartError::Validation(error) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(error.row(), Some(1));
    }

    #[test]
    fn unsupported_cell_types_are_reported() {
        let source = records(json!([{"time": "2024-01-01", "value": true}]));
        let err = build_points(DataPointKind::Histogram, &source, &ColumnMapping::new())
            .expect_err("must fail");
        let ChartError::Validation(ValidationError::AtRow { row: 0, source }) = err else {
            panic!("expected a row error");
        };
        assert!(matches!(*source, ValidationError::InvalidCell { field: "value", .. }));
    }

    #[test]
    fn empty_records_build_no_points() {
        let points =
            build_points(DataPointKind::Candlestick, &Records::default(), &ColumnMapping::new())
                .expect("empty source is fine");
        assert!(points.is_empty());
    }
}
