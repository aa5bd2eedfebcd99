//! # Series Models
//!
//! A [`Series`] owns an ordered run of data points, the options shared by
//! every series, one per-kind style bundle, and optional markers and price
//! lines.
//!
//! The style type fixes the series kind at compile time through
//! [`SeriesStyle::KIND`]; point kinds are checked at runtime because
//! [`DataPoint`] is a closed enum. Times are strictly increasing in every
//! series, whether built at once or grown through [`Series::append`].
//!
//! Every time in one serialized series shares a single [`TimeFormat`], so the
//! frontend never sees business days and epoch seconds side by side.
//!
//! | Alias | Style | Accepts |
//! |-------|-------|---------|
//! | [`LineSeries`] | [`LineStyleOptions`] | line |
//! | [`AreaSeries`] | [`AreaStyleOptions`] | area |
//! | [`HistogramSeries`] | [`HistogramStyleOptions`] | histogram |
//! | [`BaselineSeries`] | [`BaselineStyleOptions`] | baseline |
//! | [`CandlestickSeries`] | [`CandlestickStyleOptions`] | candlestick, ohlcv |
//! | [`BarSeries`] | [`BarStyleOptions`] | bar, ohlcv |
//! | [`BandSeries`] | [`BandStyleOptions`] | band |
//! | [`RibbonSeries`] | [`RibbonStyleOptions`] | ribbon |

mod any;
mod marker;

use std::fmt::Debug;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::options::{
    AreaStyleOptions, BandStyleOptions, BarStyleOptions, BaseValue, BaselineStyleOptions,
    CandlestickStyleOptions, HistogramStyleOptions, LineStyleOptions, PriceFormat,
    RibbonStyleOptions, SeriesOptions,
};
use crate::registry::{LastPriceAnimationMode, LineStyle, LineType, SeriesKind};
use crate::tabular::{build_points, table_point_kind, ColumnMapping, TabularSource};
use crate::domain::TimeFormat;
use crate::{
    ChartError, ChartTime, Color, DataPoint, HistogramData, OhlcvData, TypeMismatchError,
    ValidationError,
};

pub use any::AnySeries;
pub use marker::{Marker, PriceLine};

/// Style bundle that determines a series kind.
pub trait SeriesStyle:
    Serialize + Clone + Default + PartialEq + Debug + Send + Sync + 'static
{
    const KIND: SeriesKind;
}

macro_rules! series_style {
    ($($style:ty => $kind:ident),+ $(,)?) => {
        $(
            impl SeriesStyle for $style {
                const KIND: SeriesKind = SeriesKind::$kind;
            }
        )+
    };
}

series_style!(
    LineStyleOptions => Line,
    AreaStyleOptions => Area,
    HistogramStyleOptions => Histogram,
    BaselineStyleOptions => Baseline,
    CandlestickStyleOptions => Candlestick,
    BarStyleOptions => Bar,
    BandStyleOptions => Band,
    RibbonStyleOptions => Ribbon,
);

pub type LineSeries = Series<LineStyleOptions>;
pub type AreaSeries = Series<AreaStyleOptions>;
pub type HistogramSeries = Series<HistogramStyleOptions>;
pub type BaselineSeries = Series<BaselineStyleOptions>;
pub type CandlestickSeries = Series<CandlestickStyleOptions>;
pub type BarSeries = Series<BarStyleOptions>;
pub type BandSeries = Series<BandStyleOptions>;
pub type RibbonSeries = Series<RibbonStyleOptions>;

/// `current` must come strictly after `previous`.
pub(crate) fn ensure_increasing(
    previous: Option<ChartTime>,
    current: ChartTime,
    index: usize,
) -> Result<(), ValidationError> {
    match previous {
        Some(previous) if current <= previous => Err(ValidationError::NonIncreasingTime {
            index,
            previous: previous.to_string(),
            current: current.to_string(),
        }),
        _ => Ok(()),
    }
}

fn ensure_kind(
    series: SeriesKind,
    point: &DataPoint,
    index: usize,
) -> Result<(), TypeMismatchError> {
    if series.accepts(point.kind()) {
        return Ok(());
    }
    Err(TypeMismatchError {
        series,
        point: point.kind(),
        index,
    })
}

/// One visual trace: points plus styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<S> {
    data: Vec<DataPoint>,
    options: SeriesOptions,
    style: S,
    markers: Vec<Marker>,
    price_lines: Vec<PriceLine>,
}

impl<S: SeriesStyle> Default for Series<S> {
    fn default() -> Self {
        Self::from_checked(Vec::new())
    }
}

impl<S: SeriesStyle> Series<S> {
    /// Build from explicit points. Every point must be of a kind this series
    /// accepts and times must be strictly increasing.
    pub fn new<I, P>(points: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = P>,
        P: Into<DataPoint>,
    {
        let data: Vec<DataPoint> = points.into_iter().map(Into::into).collect();

        let mut previous = None;
        for (index, point) in data.iter().enumerate() {
            ensure_kind(S::KIND, point, index)?;
            ensure_increasing(previous, point.time(), index)?;
            previous = Some(point.time());
        }

        Ok(Self::from_checked(data))
    }

    /// Build from a table using this kind's native point shape, or OHLCV bars
    /// when an OHLC series finds a volume column.
    pub fn from_table<T: TabularSource>(
        source: &T,
        mapping: &ColumnMapping,
    ) -> Result<Self, ChartError> {
        let kind = table_point_kind(S::KIND, &source.columns(), mapping);
        let data = build_points(kind, source, mapping)?;
        Ok(Self::from_checked(data))
    }

    fn from_checked(data: Vec<DataPoint>) -> Self {
        Self {
            data,
            options: SeriesOptions::default(),
            style: S::default(),
            markers: Vec::new(),
            price_lines: Vec::new(),
        }
    }

    /// Add one point after the current last point.
    ///
    /// On error the series is left unchanged.
    pub fn append(&mut self, point: impl Into<DataPoint>) -> Result<(), ChartError> {
        let point = point.into();
        let index = self.data.len();
        ensure_kind(S::KIND, &point, index)?;
        ensure_increasing(self.last_time(), point.time(), index)?;
        self.data.push(point);
        Ok(())
    }

    pub fn kind(&self) -> SeriesKind {
        S::KIND
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn last_time(&self) -> Option<ChartTime> {
        self.data.last().map(DataPoint::time)
    }

    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }

    pub fn style(&self) -> &S {
        &self.style
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn price_lines(&self) -> &[PriceLine] {
        &self.price_lines
    }

    /// Wire form for every point and marker time of this series.
    pub fn time_format(&self) -> TimeFormat {
        let points = self.data.iter().map(DataPoint::time);
        let markers = self.markers.iter().map(Marker::time);
        TimeFormat::for_times(points.chain(markers))
    }

    pub fn with_options(mut self, options: SeriesOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_style(mut self, style: S) -> Self {
        self.style = style;
        self
    }

    /// Apply validated setters to the common options.
    pub fn map_options<F>(mut self, update: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(SeriesOptions) -> Result<SeriesOptions, ValidationError>,
    {
        self.options = update(self.options)?;
        Ok(self)
    }

    /// Apply validated setters to the style bundle.
    pub fn map_style<F>(mut self, update: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(S) -> Result<S, ValidationError>,
    {
        self.style = update(self.style)?;
        Ok(self)
    }

    pub fn with_title(mut self, title: &str) -> Result<Self, ValidationError> {
        self.options = self.options.with_title(title)?;
        Ok(self)
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.options = self.options.with_visible(visible);
        self
    }

    pub fn with_price_scale_id(mut self, id: impl Into<String>) -> Self {
        self.options = self.options.with_price_scale_id(id);
        self
    }

    pub fn with_pane_id(mut self, pane: u32) -> Self {
        self.options = self.options.with_pane_id(pane);
        self
    }

    pub fn with_last_value_visible(mut self, visible: bool) -> Self {
        self.options = self.options.with_last_value_visible(visible);
        self
    }

    pub fn with_price_line_visible(mut self, visible: bool) -> Self {
        self.options = self.options.with_price_line_visible(visible);
        self
    }

    pub fn with_price_format(mut self, format: PriceFormat) -> Self {
        self.options = self.options.with_price_format(format);
        self
    }

    /// Markers are kept in time order; equal times keep insertion order.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        let at = self
            .markers
            .partition_point(|existing| existing.time() <= marker.time());
        self.markers.insert(at, marker);
        self
    }

    pub fn with_price_line(mut self, line: PriceLine) -> Self {
        self.price_lines.push(line);
        self
    }
}

#[derive(Serialize)]
struct SeriesPayload<'a, S> {
    #[serde(rename = "type")]
    kind: SeriesKind,
    data: &'a [Value],
    #[serde(flatten)]
    options: &'a SeriesOptions,
    #[serde(flatten)]
    style: &'a S,
    #[serde(skip_serializing_if = "is_empty")]
    markers: &'a [Value],
    #[serde(skip_serializing_if = "is_empty")]
    price_lines: &'a [PriceLine],
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

/// Serialize `item` with its `time` member rewritten in `format`.
fn with_time<T: Serialize>(
    item: &T,
    time: ChartTime,
    format: TimeFormat,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(item)?;
    if let Value::Object(members) = &mut value {
        members.insert("time".to_owned(), serde_json::to_value(time.wire(format))?);
    }
    Ok(value)
}

impl<S: SeriesStyle> Series<S> {
    /// Serialize with every time written in `format`.
    pub(crate) fn serialize_in<Ser>(
        &self,
        format: TimeFormat,
        serializer: Ser,
    ) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let data = self
            .data
            .iter()
            .map(|point| with_time(point, point.time(), format))
            .collect::<Result<Vec<_>, _>>()
            .map_err(<Ser::Error as serde::ser::Error>::custom)?;
        let markers = self
            .markers
            .iter()
            .map(|marker| with_time(marker, marker.time(), format))
            .collect::<Result<Vec<_>, _>>()
            .map_err(<Ser::Error as serde::ser::Error>::custom)?;

        SeriesPayload {
            kind: S::KIND,
            data: &data,
            options: &self.options,
            style: &self.style,
            markers: &markers,
            price_lines: &self.price_lines,
        }
        .serialize(serializer)
    }
}

impl<S: SeriesStyle> Serialize for Series<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        self.serialize_in(self.time_format(), serializer)
    }
}

macro_rules! style_proxies {
    (
        $series:ty {
            $(validated $checked:ident($checked_arg:ty);)*
            $(plain $plain:ident($plain_arg:ty);)*
        }
    ) => {
        impl $series {
            $(
                pub fn $checked(mut self, value: $checked_arg) -> Result<Self, ValidationError> {
                    self.style = self.style.$checked(value)?;
                    Ok(self)
                }
            )*
            $(
                pub fn $plain(mut self, value: $plain_arg) -> Self {
                    self.style = self.style.$plain(value);
                    self
                }
            )*
        }
    };
}

style_proxies!(LineSeries {
    validated with_color(&str);
    validated with_line_width(u32);
    plain with_line_style(LineStyle);
    plain with_line_type(LineType);
    plain with_last_price_animation(LastPriceAnimationMode);
});

style_proxies!(AreaSeries {
    validated with_line_color(&str);
    validated with_top_color(&str);
    validated with_bottom_color(&str);
    validated with_line_width(u32);
    plain with_line_style(LineStyle);
    plain with_line_type(LineType);
});

style_proxies!(HistogramSeries {
    validated with_color(&str);
    validated with_base(f64);
});

style_proxies!(BaselineSeries {
    validated with_top_line_color(&str);
    validated with_bottom_line_color(&str);
    validated with_line_width(u32);
    plain with_base_value(BaseValue);
    plain with_line_style(LineStyle);
});

style_proxies!(CandlestickSeries {
    validated with_up_color(&str);
    validated with_down_color(&str);
    validated with_border_up_color(&str);
    validated with_border_down_color(&str);
    validated with_wick_up_color(&str);
    validated with_wick_down_color(&str);
    plain with_wick_visible(bool);
    plain with_border_visible(bool);
});

style_proxies!(BarSeries {
    validated with_up_color(&str);
    validated with_down_color(&str);
    plain with_open_visible(bool);
    plain with_thin_bars(bool);
});

style_proxies!(BandSeries {
    validated with_upper_line_color(&str);
    validated with_middle_line_color(&str);
    validated with_lower_line_color(&str);
    validated with_line_width(u32);
    plain with_upper_fill(bool);
    plain with_lower_fill(bool);
});

style_proxies!(RibbonSeries {
    validated with_upper_line_color(&str);
    validated with_lower_line_color(&str);
    validated with_fill_color(&str);
    validated with_line_width(u32);
    plain with_fill_visible(bool);
});

impl HistogramSeries {
    /// Volume histogram from OHLCV bars: one column per bar, colored by
    /// candle direction, on its own overlay scale with volume formatting.
    pub fn volume_from_ohlcv<'a, I>(
        bars: I,
        up_color: &str,
        down_color: &str,
    ) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = &'a OhlcvData>,
    {
        let up = Color::parse_field("up_color", up_color)?;
        let down = Color::parse_field("down_color", down_color)?;

        let points = bars
            .into_iter()
            .map(|bar| {
                let color = if bar.ohlc().is_up() { &up } else { &down };
                HistogramData::new(bar.time(), bar.volume())?.with_color(color.as_str())
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let series = Self::new(points)?
            .with_price_format(PriceFormat::volume())
            .with_price_scale_id("");
        tracing::debug!(bars = series.len(), "built volume histogram");
        Ok(series)
    }
}
