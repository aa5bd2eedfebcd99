use serde::Serialize;

use crate::registry::DataPointKind;
use crate::{validate, ChartTime, Color, ValidationError};

fn color_field(field: &'static str, input: &str) -> Result<Option<Color>, ValidationError> {
    Color::parse_field(field, input).map(Some)
}

/// Single-value point for line series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineData {
    time: ChartTime,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
}

impl LineData {
    pub fn new(time: ChartTime, value: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            time,
            value: validate::finite("value", value)?,
            color: None,
        })
    }

    pub fn with_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.color = color_field("color", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

/// Single-value point with per-point area colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaData {
    time: ChartTime,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_color: Option<Color>,
}

impl AreaData {
    pub fn new(time: ChartTime, value: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            time,
            value: validate::finite("value", value)?,
            line_color: None,
            top_color: None,
            bottom_color: None,
        })
    }

    pub fn with_line_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.line_color = color_field("line_color", color.as_ref())?;
        Ok(self)
    }

    pub fn with_top_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.top_color = color_field("top_color", color.as_ref())?;
        Ok(self)
    }

    pub fn with_bottom_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.bottom_color = color_field("bottom_color", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Histogram column. Values may be negative (oscillators, deltas).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramData {
    time: ChartTime,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
}

impl HistogramData {
    pub fn new(time: ChartTime, value: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            time,
            value: validate::finite("value", value)?,
            color: None,
        })
    }

    pub fn with_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.color = color_field("color", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

/// Single-value point for baseline series, with optional per-point colors
/// for the parts above and below the base value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineData {
    time: ChartTime,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_fill_color1: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_fill_color2: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_fill_color1: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_fill_color2: Option<Color>,
}

impl BaselineData {
    pub fn new(time: ChartTime, value: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            time,
            value: validate::finite("value", value)?,
            top_line_color: None,
            top_fill_color1: None,
            top_fill_color2: None,
            bottom_line_color: None,
            bottom_fill_color1: None,
            bottom_fill_color2: None,
        })
    }

    /// Line and both fill colors above the base value.
    pub fn with_top_colors(
        self,
        line: impl AsRef<str>,
        fill1: impl AsRef<str>,
        fill2: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        self.with_top_line_color(line)?
            .with_top_fill_color1(fill1)?
            .with_top_fill_color2(fill2)
    }

    /// Line and both fill colors below the base value.
    pub fn with_bottom_colors(
        self,
        line: impl AsRef<str>,
        fill1: impl AsRef<str>,
        fill2: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        self.with_bottom_line_color(line)?
            .with_bottom_fill_color1(fill1)?
            .with_bottom_fill_color2(fill2)
    }

    pub fn with_top_line_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.top_line_color = color_field("top_line_color", color.as_ref())?;
        Ok(self)
    }

    pub fn with_top_fill_color1(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.top_fill_color1 = color_field("top_fill_color1", color.as_ref())?;
        Ok(self)
    }

    pub fn with_top_fill_color2(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.top_fill_color2 = color_field("top_fill_color2", color.as_ref())?;
        Ok(self)
    }

    pub fn with_bottom_line_color(
        mut self,
        color: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        self.bottom_line_color = color_field("bottom_line_color", color.as_ref())?;
        Ok(self)
    }

    pub fn with_bottom_fill_color1(
        mut self,
        color: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        self.bottom_fill_color1 = color_field("bottom_fill_color1", color.as_ref())?;
        Ok(self)
    }

    pub fn with_bottom_fill_color2(
        mut self,
        color: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        self.bottom_fill_color2 = color_field("bottom_fill_color2", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Open/high/low/close quad satisfying
/// `low <= min(open, close) <= max(open, close) <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ohlc {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Ohlc {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Result<Self, ValidationError> {
        validate::finite("open", open)?;
        validate::finite("high", high)?;
        validate::finite("low", low)?;
        validate::finite("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    /// Close at or above open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickData {
    time: ChartTime,
    #[serde(flatten)]
    ohlc: Ohlc,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wick_color: Option<Color>,
}

impl CandlestickData {
    pub fn new(
        time: ChartTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self::from_ohlc(time, Ohlc::new(open, high, low, close)?))
    }

    pub fn from_ohlc(time: ChartTime, ohlc: Ohlc) -> Self {
        Self {
            time,
            ohlc,
            color: None,
            border_color: None,
            wick_color: None,
        }
    }

    pub fn with_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.color = color_field("color", color.as_ref())?;
        Ok(self)
    }

    pub fn with_border_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.border_color = color_field("border_color", color.as_ref())?;
        Ok(self)
    }

    pub fn with_wick_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.wick_color = color_field("wick_color", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn ohlc(&self) -> Ohlc {
        self.ohlc
    }
}

/// OHLC bar for bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarData {
    time: ChartTime,
    #[serde(flatten)]
    ohlc: Ohlc,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
}

impl BarData {
    pub fn new(
        time: ChartTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self::from_ohlc(time, Ohlc::new(open, high, low, close)?))
    }

    pub fn from_ohlc(time: ChartTime, ohlc: Ohlc) -> Self {
        Self {
            time,
            ohlc,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.color = color_field("color", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn ohlc(&self) -> Ohlc {
        self.ohlc
    }
}

/// OHLC bar plus traded volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcvData {
    time: ChartTime,
    #[serde(flatten)]
    ohlc: Ohlc,
    volume: f64,
}

impl OhlcvData {
    pub fn new(
        time: ChartTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            time,
            ohlc: Ohlc::new(open, high, low, close)?,
            volume: validate::non_negative("volume", volume)?,
        })
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn ohlc(&self) -> Ohlc {
        self.ohlc
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

/// Three-line envelope point (e.g. Bollinger bands).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandData {
    time: ChartTime,
    upper: f64,
    middle: f64,
    lower: f64,
}

impl BandData {
    pub fn new(time: ChartTime, upper: f64, middle: f64, lower: f64) -> Result<Self, ValidationError> {
        validate::finite("upper", upper)?;
        validate::finite("middle", middle)?;
        validate::finite("lower", lower)?;
        if upper < middle || middle < lower {
            return Err(ValidationError::InvalidBandOrder);
        }
        Ok(Self {
            time,
            upper,
            middle,
            lower,
        })
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn middle(&self) -> f64 {
        self.middle
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }
}

/// Two-line envelope point with an optional per-point fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibbonData {
    time: ChartTime,
    upper: f64,
    lower: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<Color>,
}

impl RibbonData {
    pub fn new(time: ChartTime, upper: f64, lower: f64) -> Result<Self, ValidationError> {
        validate::finite("upper", upper)?;
        validate::finite("lower", lower)?;
        if upper < lower {
            return Err(ValidationError::InvalidBandOrder);
        }
        Ok(Self {
            time,
            upper,
            lower,
            fill: None,
        })
    }

    pub fn with_fill(mut self, color: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.fill = color_field("fill", color.as_ref())?;
        Ok(self)
    }

    pub fn time(&self) -> ChartTime {
        self.time
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }
}

/// Any validated data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataPoint {
    Line(LineData),
    Area(AreaData),
    Histogram(HistogramData),
    Baseline(BaselineData),
    Candlestick(CandlestickData),
    Bar(BarData),
    Ohlcv(OhlcvData),
    Band(BandData),
    Ribbon(RibbonData),
}

impl DataPoint {
    pub fn kind(&self) -> DataPointKind {
        match self {
            Self::Line(_) => DataPointKind::Line,
            Self::Area(_) => DataPointKind::Area,
            Self::Histogram(_) => DataPointKind::Histogram,
            Self::Baseline(_) => DataPointKind::Baseline,
            Self::Candlestick(_) => DataPointKind::Candlestick,
            Self::Bar(_) => DataPointKind::Bar,
            Self::Ohlcv(_) => DataPointKind::Ohlcv,
            Self::Band(_) => DataPointKind::Band,
            Self::Ribbon(_) => DataPointKind::Ribbon,
        }
    }

    pub fn time(&self) -> ChartTime {
        match self {
            Self::Line(point) => point.time(),
            Self::Area(point) => point.time(),
            Self::Histogram(point) => point.time(),
            Self::Baseline(point) => point.time(),
            Self::Candlestick(point) => point.time(),
            Self::Bar(point) => point.time(),
            Self::Ohlcv(point) => point.time(),
            Self::Band(point) => point.time(),
            Self::Ribbon(point) => point.time(),
        }
    }
}

macro_rules! into_data_point {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for DataPoint {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

into_data_point!(
    Line(LineData),
    Area(AreaData),
    Histogram(HistogramData),
    Baseline(BaselineData),
    Candlestick(CandlestickData),
    Bar(BarData),
    Ohlcv(OhlcvData),
    Band(BandData),
    Ribbon(RibbonData),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn day(input: &str) -> ChartTime {
        ChartTime::parse(input).expect("timestamp")
    }

    #[test]
    fn rejects_invalid_bar_bounds() {
        let err = CandlestickData::new(day("2024-01-01"), 10.0, 12.0, 9.0, 12.5)
            .expect_err("close above high must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));

        let err = BarData::new(day("2024-01-01"), 10.0, 9.0, 11.0, 10.0)
            .expect_err("high below low must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn accepts_flat_bars_and_negative_prices() {
        let flat = Ohlc::new(5.0, 5.0, 5.0, 5.0).expect("flat bar is valid");
        assert!(flat.is_up());
        Ohlc::new(-3.0, -1.0, -4.0, -2.0).expect("negative prices keep the ordering invariant");
    }

    #[test]
    fn ohlcv_requires_non_negative_volume() {
        let err = OhlcvData::new(day("2024-01-01"), 1.0, 2.0, 0.5, 1.5, -10.0)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "volume" }));
    }

    #[test]
    fn band_and_ribbon_enforce_ordering() {
        assert!(matches!(
            BandData::new(day("2024-01-01"), 10.0, 11.0, 9.0),
            Err(ValidationError::InvalidBandOrder)
        ));
        assert!(matches!(
            RibbonData::new(day("2024-01-01"), 1.0, 2.0),
            Err(ValidationError::InvalidBandOrder)
        ));
    }

    #[test]
    fn rejects_non_finite_values_and_bad_colors() {
        assert!(matches!(
            LineData::new(day("2024-01-01"), f64::INFINITY),
            Err(ValidationError::NonFiniteValue { field: "value" })
        ));
        let err = HistogramData::new(day("2024-01-01"), 1.0)
            .expect("valid")
            .with_color("nope")
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidColor { field: "color", .. }));
    }

    #[test]
    fn points_report_kind_and_time() {
        let point: DataPoint = OhlcvData::new(day("2024-02-01"), 1.0, 2.0, 0.5, 1.5, 10.0)
            .expect("valid")
            .into();
        assert_eq!(point.kind(), DataPointKind::Ohlcv);
        assert_eq!(point.time(), day("2024-02-01"));
    }

    #[test]
    fn candlestick_serializes_flat() {
        let point = CandlestickData::new(day("2024-01-01"), 1.0, 2.0, 0.5, 1.5)
            .expect("valid")
            .with_wick_color("#000000")
            .expect("color");
        let value = serde_json::to_value(point).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "time": "2024-01-01",
                "open": 1.0,
                "high": 2.0,
                "low": 0.5,
                "close": 1.5,
                "wick_color": "#000000"
            })
        );
    }
}
