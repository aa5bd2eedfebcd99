//! # Domain Models
//!
//! Validated data point records and the value types they are built from.
//!
//! ## Overview
//!
//! Every type here is checked on construction, so an instance that exists is
//! valid:
//!
//! - **Validated**: constructors return `Result<_, ValidationError>`
//! - **Immutable**: fields are private; builders consume and return `Self`
//! - **Serializable**: snake_case serde output, camelized by the serializer
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ChartTime`] | Whole-second UTC instant |
//! | [`TimeFormat`] | Business-day or epoch-second wire form for a run of times |
//! | [`Color`] | `#RRGGBB`/`#RRGGBBAA` hex or named CSS color |
//! | [`LineData`] | `time` + `value` |
//! | [`AreaData`] | `time` + `value` with per-point area colors |
//! | [`HistogramData`] | `time` + `value` with per-point column color |
//! | [`BaselineData`] | `time` + `value` with top/bottom colors |
//! | [`CandlestickData`] | `time` + [`Ohlc`] with candle colors |
//! | [`BarData`] | `time` + [`Ohlc`] |
//! | [`OhlcvData`] | `time` + [`Ohlc`] + `volume` |
//! | [`BandData`] | `time` + `upper >= middle >= lower` |
//! | [`RibbonData`] | `time` + `upper >= lower` |
//!
//! ```rust,ignore
//! use chartwire_core::{CandlestickData, ChartTime, ValidationError};
//!
//! let time = ChartTime::parse("2024-01-01")?;
//! let candle = CandlestickData::new(time, 100.0, 105.0, 95.0, 102.0)?;
//!
//! // high < low
//! let invalid = CandlestickData::new(time, 100.0, 95.0, 105.0, 102.0);
//! assert!(matches!(invalid, Err(ValidationError::InvalidBarRange)));
//! ```

mod color;
mod data;
mod timestamp;

pub use color::Color;
pub use data::{
    AreaData, BandData, BarData, BaselineData, CandlestickData, DataPoint, HistogramData,
    LineData, Ohlc, OhlcvData, RibbonData,
};
pub use timestamp::{ChartTime, TimeFormat};
