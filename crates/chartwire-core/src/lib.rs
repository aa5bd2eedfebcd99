//! # Chartwire Core
//!
//! Validated chart data models and the serializer that turns them into the
//! camelCase configuration a Lightweight-Charts style frontend consumes.
//!
//! ## Overview
//!
//! - **Closed registries** for series kinds, line styles, marker shapes and scale modes
//! - **Validated data points** (line, OHLC, OHLCV, band, ...) that cannot exist in an invalid state
//! - **Tabular input** from JSON records, columnar JSON or CSV through a column mapping
//! - **Option models** for charts and series with fluent, validating setters
//! - **Series and charts** composed from points and options
//! - **Deterministic serialization** to camelCase JSON
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | Chart composition with shared options |
//! | [`domain`] | Timestamps, colors and data point models |
//! | [`error`] | Error types |
//! | [`options`] | Chart and series option models |
//! | [`registry`] | Enumerations understood by the frontend |
//! | [`serializer`] | camelCase conversion and JSON output |
//! | [`series`] | Series models and heterogeneous storage |
//! | [`tabular`] | Column mapping and tabular sources |
//! | [`validate`] | Field validators |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chartwire_core::{to_json_string, ChartTime, LineData, LineSeries};
//!
//! let series = LineSeries::new([
//!     LineData::new(ChartTime::parse("2024-01-01")?, 100.0)?,
//!     LineData::new(ChartTime::parse("2024-01-02")?, 105.0)?,
//! ])?
//! .with_color("#2196F3")?
//! .with_line_width(2)?;
//!
//! // {"color":"#2196F3","data":[...],"lineWidth":2,"type":"line"}
//! let json = to_json_string(&series, false)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Tabular Source  │────▶│ Column Mapping   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Points     │────▶│ Validators       │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Series / Chart  │◀────│ Option Models    │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Serializer      │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Constructors fail fast with [`ValidationError`]; series checks raise
//! [`TypeMismatchError`]; tabular input raises [`ColumnMappingError`];
//! [`ChartError`] unifies them:
//!
//! ```rust
//! use chartwire_core::{ChartError, ValidationError};
//!
//! fn describe(error: &ChartError) -> String {
//!     match error {
//!         ChartError::Validation(ValidationError::AtRow { row, .. }) => {
//!             format!("bad input row {row}")
//!         }
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod chart;
pub mod domain;
pub mod error;
pub mod options;
pub mod registry;
pub mod serializer;
pub mod series;
pub mod tabular;
pub mod validate;

// Chart
pub use chart::Chart;

// Domain models
pub use domain::{
    AreaData, BandData, BarData, BaselineData, CandlestickData, ChartTime, Color, DataPoint,
    HistogramData, LineData, Ohlc, OhlcvData, RibbonData, TimeFormat,
};

// Error types
pub use error::{
    ChartError, ColumnMappingError, SerializationError, TypeMismatchError, ValidationError,
};

// Option models
pub use options::{
    AreaStyleOptions, Background, BandStyleOptions, BarStyleOptions, BaseValue,
    BaselineStyleOptions, CandlestickStyleOptions, ChartOptions, CrosshairLineOptions,
    CrosshairOptions, GridLineOptions, GridOptions, HistogramStyleOptions, LayoutOptions,
    LineStyleOptions, LocalizationOptions, PriceFormat, PriceScaleOptions, RibbonStyleOptions,
    ScaleMargins, SeriesOptions, TimeScaleOptions,
};

// Registries
pub use registry::{
    CrosshairMode, DataPointKind, LastPriceAnimationMode, LineStyle, LineType, MarkerPosition,
    MarkerShape, PriceFormatKind, PriceLineSource, PriceScaleMode, SeriesKind,
};

// Serializer
pub use serializer::{snake_to_camel, to_frontend, to_json_string, to_writer};

// Series
pub use series::{
    AnySeries, AreaSeries, BandSeries, BarSeries, BaselineSeries, CandlestickSeries,
    HistogramSeries, LineSeries, Marker, PriceLine, RibbonSeries, Series, SeriesStyle,
};

// Tabular input
pub use tabular::{
    build_points, table_point_kind, Cell, ColumnMapping, ColumnNaming, ColumnarFrame, CsvTable,
    LogicalField, Records, RowSource, TabularSource,
};
