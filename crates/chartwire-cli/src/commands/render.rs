use std::path::Path;
use std::str::FromStr;

use chartwire_core::{
    AnySeries, Background, Chart, ChartError, ChartOptions, ColumnMapping, ColumnarFrame,
    CrosshairOptions, CsvTable, LayoutOptions, LocalizationOptions, LogicalField,
    PriceScaleOptions, Records, SeriesKind, TimeScaleOptions, ValidationError,
};
use serde_json::Value;

use crate::cli::{DataFormat, RenderArgs};
use crate::definition::{self, ChartSettings, SeriesDefinition};
use crate::error::CliError;

/// A loaded data table in whichever shape the file had.
enum Table {
    Csv(CsvTable),
    Records(Records),
    Columnar(ColumnarFrame),
}

impl Table {
    fn load(path: &Path, format: Option<DataFormat>) -> Result<Self, CliError> {
        let format = match format {
            Some(format) => format,
            None => infer_format(path)?,
        };

        match format {
            DataFormat::Csv => Ok(Self::Csv(CsvTable::from_path(path)?)),
            DataFormat::Json => {
                let text = std::fs::read_to_string(path)?;
                let value: Value = serde_json::from_str(&text)?;
                let table = if value.is_object() {
                    Self::Columnar(ColumnarFrame::from_value(value).map_err(ChartError::from)?)
                } else {
                    Self::Records(Records::from_value(value).map_err(ChartError::from)?)
                };
                Ok(table)
            }
        }
    }

    fn series(&self, kind: SeriesKind, mapping: &ColumnMapping) -> Result<AnySeries, ChartError> {
        match self {
            Self::Csv(table) => AnySeries::from_table(kind, table, mapping),
            Self::Records(table) => AnySeries::from_table(kind, table, mapping),
            Self::Columnar(table) => AnySeries::from_table(kind, table, mapping),
        }
    }
}

fn infer_format(path: &Path) -> Result<DataFormat, CliError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(DataFormat::Csv),
        Some("json") => Ok(DataFormat::Json),
        _ => Err(CliError::UnknownFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Build the chart described by `args`.
pub fn build(args: &RenderArgs) -> Result<Chart, CliError> {
    let definition = definition::load(&args.definition)?;
    let table = Table::load(&args.data, args.format)?;

    let mut chart = Chart::new().configure(|options| apply_chart(&definition.chart, options))?;
    for entry in &definition.series {
        let mapping = column_mapping(entry)?;
        let series = table.series(entry.kind, &mapping)?;
        chart.add_series(apply_series(entry, series)?);
    }

    tracing::info!(series = chart.series().len(), "chart built");
    Ok(chart)
}

fn column_mapping(entry: &SeriesDefinition) -> Result<ColumnMapping, ValidationError> {
    entry
        .columns
        .iter()
        .try_fold(ColumnMapping::new(), |mapping, (field, column)| {
            Ok(mapping.with_column(LogicalField::from_str(field)?, column.clone()))
        })
}

fn apply_chart(
    settings: &ChartSettings,
    mut options: ChartOptions,
) -> Result<ChartOptions, ValidationError> {
    if let Some(width) = settings.width {
        options = options.with_width(width)?;
    }
    if let Some(height) = settings.height {
        options = options.with_height(height)?;
    }
    if let Some(auto_size) = settings.auto_size {
        options = options.with_auto_size(auto_size);
    }

    if settings.background.is_some() || settings.text_color.is_some() {
        let mut layout = LayoutOptions::default();
        if let Some(background) = &settings.background {
            layout = layout.with_background(Background::solid(background)?);
        }
        if let Some(text_color) = &settings.text_color {
            layout = layout.with_text_color(text_color)?;
        }
        options = options.with_layout(layout);
    }

    if let Some(mode) = settings.crosshair {
        options = options.with_crosshair(CrosshairOptions::default().with_mode(mode));
    }
    if let Some(mode) = settings.price_scale_mode {
        options = options.with_right_price_scale(PriceScaleOptions::default().with_mode(mode));
    }
    if let Some(spacing) = settings.bar_spacing {
        options = options.with_time_scale(TimeScaleOptions::default().with_bar_spacing(spacing)?);
    }
    if let Some(locale) = &settings.locale {
        options = options.with_localization(LocalizationOptions::default().with_locale(locale)?);
    }

    Ok(options)
}

fn apply_series(entry: &SeriesDefinition, series: AnySeries) -> Result<AnySeries, ValidationError> {
    let series = series.map_options(|mut options| {
        if let Some(title) = &entry.title {
            options = options.with_title(title)?;
        }
        if let Some(visible) = entry.visible {
            options = options.with_visible(visible);
        }
        if let Some(id) = &entry.price_scale_id {
            options = options.with_price_scale_id(id.as_str());
        }
        if let Some(pane) = entry.pane_id {
            options = options.with_pane_id(pane);
        }
        Ok(options)
    })?;

    let color = entry.color.as_deref();
    let up = entry.up_color.as_deref();
    let down = entry.down_color.as_deref();
    let width = entry.line_width;

    let styled = match series {
        AnySeries::Line(mut line) => {
            if let Some(color) = color {
                line = line.with_color(color)?;
            }
            if let Some(width) = width {
                line = line.with_line_width(width)?;
            }
            ignored(entry, &[("up_color", up.is_some()), ("down_color", down.is_some())]);
            AnySeries::Line(line)
        }
        AnySeries::Area(mut area) => {
            if let Some(color) = color {
                area = area.with_line_color(color)?;
            }
            if let Some(width) = width {
                area = area.with_line_width(width)?;
            }
            ignored(entry, &[("up_color", up.is_some()), ("down_color", down.is_some())]);
            AnySeries::Area(area)
        }
        AnySeries::Histogram(mut histogram) => {
            if let Some(color) = color {
                histogram = histogram.with_color(color)?;
            }
            ignored(
                entry,
                &[
                    ("up_color", up.is_some()),
                    ("down_color", down.is_some()),
                    ("line_width", width.is_some()),
                ],
            );
            AnySeries::Histogram(histogram)
        }
        AnySeries::Baseline(mut baseline) => {
            if let Some(up) = up {
                baseline = baseline.with_top_line_color(up)?;
            }
            if let Some(down) = down {
                baseline = baseline.with_bottom_line_color(down)?;
            }
            if let Some(width) = width {
                baseline = baseline.with_line_width(width)?;
            }
            ignored(entry, &[("color", color.is_some())]);
            AnySeries::Baseline(baseline)
        }
        AnySeries::Candlestick(mut candles) => {
            if let Some(up) = up {
                candles = candles.with_up_color(up)?.with_wick_up_color(up)?;
            }
            if let Some(down) = down {
                candles = candles.with_down_color(down)?.with_wick_down_color(down)?;
            }
            ignored(entry, &[("color", color.is_some()), ("line_width", width.is_some())]);
            AnySeries::Candlestick(candles)
        }
        AnySeries::Bar(mut bars) => {
            if let Some(up) = up {
                bars = bars.with_up_color(up)?;
            }
            if let Some(down) = down {
                bars = bars.with_down_color(down)?;
            }
            ignored(entry, &[("color", color.is_some()), ("line_width", width.is_some())]);
            AnySeries::Bar(bars)
        }
        AnySeries::Band(mut band) => {
            if let Some(color) = color {
                band = band.with_middle_line_color(color)?;
            }
            if let Some(up) = up {
                band = band.with_upper_line_color(up)?;
            }
            if let Some(down) = down {
                band = band.with_lower_line_color(down)?;
            }
            if let Some(width) = width {
                band = band.with_line_width(width)?;
            }
            AnySeries::Band(band)
        }
        AnySeries::Ribbon(mut ribbon) => {
            if let Some(color) = color {
                ribbon = ribbon.with_fill_color(color)?;
            }
            if let Some(up) = up {
                ribbon = ribbon.with_upper_line_color(up)?;
            }
            if let Some(down) = down {
                ribbon = ribbon.with_lower_line_color(down)?;
            }
            if let Some(width) = width {
                ribbon = ribbon.with_line_width(width)?;
            }
            AnySeries::Ribbon(ribbon)
        }
    };

    Ok(styled)
}

fn ignored(entry: &SeriesDefinition, settings: &[(&str, bool)]) {
    for (name, set) in settings {
        if *set {
            tracing::warn!(
                kind = %entry.kind,
                setting = *name,
                "setting has no effect on this series kind"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chartwire_core::to_frontend;
    use serde_json::json;

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).expect("write fixture");
        path
    }

    fn args(definition: PathBuf, data: PathBuf) -> RenderArgs {
        RenderArgs {
            definition,
            data,
            format: None,
            output: None,
        }
    }

    #[test]
    fn renders_candlesticks_and_volume_from_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let definition = write(
            &dir,
            "chart.toml",
            r##"
[chart]
height = 400
background = "#FFFFFF"

[[series]]
kind = "candlestick"
title = "ACME"
up_color = "#26a69a"
down_color = "#ef5350"

[series.columns]
time = "Date"
open = "Open"
high = "High"
low = "Low"
close = "Close"

[[series]]
kind = "histogram"
price_scale_id = ""
color = "#90a4ae"

[series.columns]
time = "Date"
value = "Volume"
"##,
        );
        let data = write(
            &dir,
            "bars.csv",
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,10,12,9,11,1500\n\
             2024-01-03,11,11.5,8,9,2200\n",
        );

        let chart = build(&args(definition, data)).expect("chart");
        assert_eq!(chart.series().len(), 2);

        let value = to_frontend(&chart).expect("serialize");
        assert_eq!(value["chart"], json!({"height": 400, "layout": {"background": {"type": "solid", "color": "#FFFFFF"}}}));
        assert_eq!(value["series"][0]["type"], "candlestick");
        assert_eq!(value["series"][0]["title"], "ACME");
        assert_eq!(value["series"][0]["wickDownColor"], "#ef5350");
        assert_eq!(
            value["series"][0]["data"][1],
            json!({"time": "2024-01-03", "open": 11.0, "high": 11.5, "low": 8.0, "close": 9.0})
        );
        assert_eq!(value["series"][1]["priceScaleId"], "");
        assert_eq!(value["series"][1]["data"][0]["value"], 1500.0);
    }

    #[test]
    fn reads_columnar_json_tables() {
        let dir = tempfile::tempdir().expect("tempdir");
        let definition = write(
            &dir,
            "chart.json",
            r##"{"series": [{"kind": "line", "color": "#2196F3", "line_width": 2}]}"##,
        );
        let data = write(
            &dir,
            "data.json",
            r#"{"time": ["2024-01-01", "2024-01-02"], "value": [100.0, 105.0]}"#,
        );

        let chart = build(&args(definition, data)).expect("chart");
        let value = to_frontend(&chart.series()[0]).expect("serialize");
        assert_eq!(
            value,
            json!({
                "type": "line",
                "data": [
                    {"time": "2024-01-01", "value": 100.0},
                    {"time": "2024-01-02", "value": 105.0}
                ],
                "color": "#2196F3",
                "lineWidth": 2
            })
        );
    }

    #[test]
    fn bad_row_fails_with_its_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let definition = write(&dir, "chart.toml", "[[series]]\nkind = \"bar\"\n");
        let data = write(
            &dir,
            "bars.csv",
            "time,open,high,low,close\n2024-01-01,1,2,0.5,1.5\n2024-01-02,1,0.5,2,1\n",
        );

        let err = build(&args(definition, data)).expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "row 1: bar high must be >= low");
    }

    #[test]
    fn unknown_extension_needs_an_explicit_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let definition = write(&dir, "chart.toml", "[[series]]\nkind = \"line\"\n");
        let data = write(&dir, "data.txt", "time,value\n2024-01-01,1\n");

        let err = build(&args(definition.clone(), data.clone())).expect_err("must fail");
        assert!(matches!(err, CliError::UnknownFormat { .. }));

        let mut explicit = args(definition, data);
        explicit.format = Some(DataFormat::Csv);
        let chart = build(&explicit).expect("csv by flag");
        assert_eq!(chart.series()[0].len(), 1);
    }

    #[test]
    fn unknown_column_field_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let definition = write(
            &dir,
            "chart.toml",
            "[[series]]\nkind = \"line\"\n[series.columns]\nprice = \"Close\"\n",
        );
        let data = write(&dir, "data.csv", "time,value\n2024-01-01,1\n");

        let err = build(&args(definition, data)).expect_err("must fail");
        assert!(matches!(
            err,
            CliError::Validation(ValidationError::UnknownVariant { registry: "logical field", .. })
        ));
    }
}
