use serde::{Serialize, Serializer};

use super::{
    AreaSeries, BandSeries, BarSeries, BaselineSeries, CandlestickSeries, HistogramSeries,
    LineSeries, RibbonSeries,
};
use crate::options::SeriesOptions;
use crate::registry::SeriesKind;
use crate::tabular::{ColumnMapping, TabularSource};
use crate::{ChartError, DataPoint, TimeFormat, ValidationError};

/// Any series, for heterogeneous storage in a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnySeries {
    Line(LineSeries),
    Area(AreaSeries),
    Histogram(HistogramSeries),
    Baseline(BaselineSeries),
    Candlestick(CandlestickSeries),
    Bar(BarSeries),
    Band(BandSeries),
    Ribbon(RibbonSeries),
}

macro_rules! each_series {
    ($value:expr, $series:ident => $body:expr) => {
        match $value {
            AnySeries::Line($series) => $body,
            AnySeries::Area($series) => $body,
            AnySeries::Histogram($series) => $body,
            AnySeries::Baseline($series) => $body,
            AnySeries::Candlestick($series) => $body,
            AnySeries::Bar($series) => $body,
            AnySeries::Band($series) => $body,
            AnySeries::Ribbon($series) => $body,
        }
    };
}

macro_rules! rewrap_series {
    ($value:expr, $series:ident => $body:expr) => {
        match $value {
            AnySeries::Line($series) => AnySeries::Line($body),
            AnySeries::Area($series) => AnySeries::Area($body),
            AnySeries::Histogram($series) => AnySeries::Histogram($body),
            AnySeries::Baseline($series) => AnySeries::Baseline($body),
            AnySeries::Candlestick($series) => AnySeries::Candlestick($body),
            AnySeries::Bar($series) => AnySeries::Bar($body),
            AnySeries::Band($series) => AnySeries::Band($body),
            AnySeries::Ribbon($series) => AnySeries::Ribbon($body),
        }
    };
}

impl AnySeries {
    /// Build a series whose kind is only known at runtime.
    pub fn from_table<T: TabularSource>(
        kind: SeriesKind,
        source: &T,
        mapping: &ColumnMapping,
    ) -> Result<Self, ChartError> {
        let series = match kind {
            SeriesKind::Line => Self::Line(LineSeries::from_table(source, mapping)?),
            SeriesKind::Area => Self::Area(AreaSeries::from_table(source, mapping)?),
            SeriesKind::Histogram => {
                Self::Histogram(HistogramSeries::from_table(source, mapping)?)
            }
            SeriesKind::Baseline => Self::Baseline(BaselineSeries::from_table(source, mapping)?),
            SeriesKind::Candlestick => {
                Self::Candlestick(CandlestickSeries::from_table(source, mapping)?)
            }
            SeriesKind::Bar => Self::Bar(BarSeries::from_table(source, mapping)?),
            SeriesKind::Band => Self::Band(BandSeries::from_table(source, mapping)?),
            SeriesKind::Ribbon => Self::Ribbon(RibbonSeries::from_table(source, mapping)?),
        };
        Ok(series)
    }

    pub fn kind(&self) -> SeriesKind {
        each_series!(self, series => series.kind())
    }

    pub fn data(&self) -> &[DataPoint] {
        each_series!(self, series => series.data())
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    pub fn options(&self) -> &SeriesOptions {
        each_series!(self, series => series.options())
    }

    pub fn append(&mut self, point: impl Into<DataPoint>) -> Result<(), ChartError> {
        each_series!(self, series => series.append(point))
    }

    pub fn time_format(&self) -> TimeFormat {
        each_series!(self, series => series.time_format())
    }

    pub(crate) fn serialize_in<S>(
        &self,
        format: TimeFormat,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        each_series!(self, series => series.serialize_in(format, serializer))
    }

    /// Apply validated setters to the common options of whichever kind this is.
    pub fn map_options<F>(self, update: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(SeriesOptions) -> Result<SeriesOptions, ValidationError>,
    {
        Ok(rewrap_series!(self, series => series.map_options(update)?))
    }
}

macro_rules! into_any_series {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for AnySeries {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

into_any_series!(
    Line(LineSeries),
    Area(AreaSeries),
    Histogram(HistogramSeries),
    Baseline(BaselineSeries),
    Candlestick(CandlestickSeries),
    Bar(BarSeries),
    Band(BandSeries),
    Ribbon(RibbonSeries),
);
