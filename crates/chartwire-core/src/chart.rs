//! Chart composition: series plus one shared [`ChartOptions`].

use std::sync::Arc;

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::options::ChartOptions;
use crate::series::AnySeries;
use crate::{TimeFormat, ValidationError};

/// Zero or more series rendered against one set of chart options.
///
/// All series share one time scale, so a chart serializes every time in one
/// [`TimeFormat`]. Options sit behind an [`Arc`] so panes can share them. Edits through
/// [`Chart::options_mut`] or [`Chart::configure`] clone the options first
/// when another chart still holds them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    options: Arc<ChartOptions>,
    series: Vec<AnySeries>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ChartOptions) -> Self {
        Self::with_shared_options(Arc::new(options))
    }

    pub fn with_shared_options(options: Arc<ChartOptions>) -> Self {
        Self {
            options,
            series: Vec::new(),
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Handle for building further charts over the same options.
    pub fn shared_options(&self) -> Arc<ChartOptions> {
        Arc::clone(&self.options)
    }

    /// Copy-on-write access to this chart's options.
    pub fn options_mut(&mut self) -> &mut ChartOptions {
        Arc::make_mut(&mut self.options)
    }

    /// Run validated setters against this chart's options. On error the
    /// options are left as they were.
    pub fn configure<F>(mut self, update: F) -> Result<Self, ValidationError>
    where
        F: FnOnce(ChartOptions) -> Result<ChartOptions, ValidationError>,
    {
        let updated = update(ChartOptions::clone(&self.options))?;
        *self.options_mut() = updated;
        Ok(self)
    }

    pub fn with_series(mut self, series: impl Into<AnySeries>) -> Self {
        self.series.push(series.into());
        self
    }

    pub fn add_series(&mut self, series: impl Into<AnySeries>) {
        self.series.push(series.into());
    }

    pub fn series(&self) -> &[AnySeries] {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut [AnySeries] {
        &mut self.series
    }

    /// Business days only when every series would emit them on its own.
    pub fn time_format(&self) -> TimeFormat {
        let all_days = self
            .series
            .iter()
            .all(|series| series.time_format() == TimeFormat::BusinessDay);
        if all_days {
            TimeFormat::BusinessDay
        } else {
            TimeFormat::Timestamp
        }
    }
}

struct SeriesList<'a> {
    series: &'a [AnySeries],
    format: TimeFormat,
}

struct InFormat<'a> {
    series: &'a AnySeries,
    format: TimeFormat,
}

impl Serialize for SeriesList<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.series.len()))?;
        for series in self.series {
            seq.serialize_element(&InFormat {
                series,
                format: self.format,
            })?;
        }
        seq.end()
    }
}

impl Serialize for InFormat<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.series.serialize_in(self.format, serializer)
    }
}

impl Serialize for Chart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Chart", 2)?;
        state.serialize_field("chart", self.options.as_ref())?;
        let series = SeriesList {
            series: &self.series,
            format: self.time_format(),
        };
        state.serialize_field("series", &series)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::series::LineSeries;
    use crate::{ChartTime, LineData};

    #[test]
    fn charts_share_options_until_one_is_edited() {
        let first = Chart::with_options(ChartOptions::default().with_height(300).expect("height"));
        let mut second = Chart::with_shared_options(first.shared_options());
        assert!(Arc::ptr_eq(&first.options, &second.options));

        *second.options_mut() = ChartOptions::clone(second.options())
            .with_height(500)
            .expect("height");

        assert_eq!(first.options().height(), Some(300));
        assert_eq!(second.options().height(), Some(500));
    }

    #[test]
    fn failed_configure_keeps_options() {
        let chart = Chart::with_options(ChartOptions::default().with_width(800).expect("width"));
        let err = chart
            .clone()
            .configure(|options| options.with_width(0))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositiveValue { field: "width" }));
        assert_eq!(chart.options().width(), Some(800));
    }

    #[test]
    fn one_intraday_series_moves_every_series_to_epoch_seconds() {
        let day = ChartTime::parse("2024-01-02").expect("date");
        let daily = LineSeries::new([LineData::new(day, 1.0).expect("point")]).expect("series");
        let intraday = LineSeries::new([LineData::new(
            ChartTime::parse("2024-01-02T09:30:00Z").expect("date-time"),
            2.0,
        )
        .expect("point")])
        .expect("series");

        let alone = Chart::new().with_series(daily.clone());
        let alone = serde_json::to_value(&alone).expect("serialize");
        assert_eq!(alone["series"][0]["data"][0]["time"], "2024-01-02");

        let chart = Chart::new().with_series(daily).with_series(intraday);
        assert_eq!(chart.time_format(), TimeFormat::Timestamp);
        let value = serde_json::to_value(&chart).expect("serialize");
        assert_eq!(value["series"][0]["data"][0]["time"], json!(1_704_153_600));
        assert_eq!(value["series"][1]["data"][0]["time"], json!(1_704_187_800));
    }

    #[test]
    fn chart_parts_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Chart>();
        assert_send_sync::<AnySeries>();
        assert_send_sync::<ChartOptions>();
        assert_send_sync::<crate::DataPoint>();
    }

    #[test]
    fn serializes_chart_and_series_sections() {
        let chart = Chart::new().with_series(LineSeries::default());
        assert_eq!(
            serde_json::to_value(&chart).expect("serialize"),
            json!({"chart": {}, "series": [{"type": "line", "data": []}]})
        );
    }
}
