//! Chart definition files.
//!
//! A definition names the chart-level settings and one entry per series:
//!
//! ```toml
//! [chart]
//! height = 400
//! background = "#ffffff"
//! crosshair = "magnet"
//!
//! [[series]]
//! kind = "candlestick"
//! title = "AAPL"
//! up_color = "#26a69a"
//! down_color = "#ef5350"
//!
//! [series.columns]
//! time = "Date"
//! open = "Open"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chartwire_core::{CrosshairMode, PriceScaleMode, SeriesKind};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::CliError;

const ENV_PREFIX: &str = "CHARTWIRE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartDefinition {
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub series: Vec<SeriesDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub auto_size: Option<bool>,
    pub background: Option<String>,
    pub text_color: Option<String>,
    pub locale: Option<String>,
    pub crosshair: Option<CrosshairMode>,
    pub price_scale_mode: Option<PriceScaleMode>,
    pub bar_spacing: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesDefinition {
    pub kind: SeriesKind,
    pub title: Option<String>,
    pub visible: Option<bool>,
    pub price_scale_id: Option<String>,
    pub pane_id: Option<u32>,
    /// Main color; which style field it sets depends on the kind.
    pub color: Option<String>,
    pub up_color: Option<String>,
    pub down_color: Option<String>,
    pub line_width: Option<u32>,
    /// Logical field → data column.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

/// Load a definition file with `CHARTWIRE_` environment overrides.
pub fn load(path: &Path) -> Result<ChartDefinition, CliError> {
    load_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: &Path, env: Environment) -> Result<ChartDefinition, CliError> {
    let settings = Config::builder()
        .add_source(File::from(path))
        .add_source(env)
        .build()?;

    let definition: ChartDefinition = settings.try_deserialize()?;
    tracing::debug!(
        path = %path.display(),
        series = definition.series.len(),
        "loaded chart definition"
    );
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_definition(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create definition");
        file.write_all(body.as_bytes()).expect("write definition");
        path
    }

    fn no_env() -> Environment {
        environment().source(Some(config::Map::new()))
    }

    #[test]
    fn loads_toml_definition() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_definition(
            &dir,
            "chart.toml",
            r##"
[chart]
height = 400
crosshair = "magnet"

[[series]]
kind = "candlestick"
up_color = "#26a69a"

[series.columns]
time = "Date"
"##,
        );

        let definition = load_with_env(&path, no_env()).expect("definition");
        assert_eq!(definition.chart.height, Some(400));
        assert_eq!(definition.chart.crosshair, Some(CrosshairMode::Magnet));
        assert_eq!(definition.series.len(), 1);
        assert_eq!(definition.series[0].kind, SeriesKind::Candlestick);
        assert_eq!(
            definition.series[0].columns.get("time").map(String::as_str),
            Some("Date")
        );
    }

    #[test]
    fn environment_overrides_file_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_definition(&dir, "chart.toml", "[chart]\nheight = 400\n");

        let mut overrides = config::Map::new();
        overrides.insert("CHARTWIRE_CHART__HEIGHT".to_owned(), "650".to_owned());
        let env = environment().source(Some(overrides));

        let definition = load_with_env(&path, env).expect("definition");
        assert_eq!(definition.chart.height, Some(650));
        assert!(definition.series.is_empty());
    }

    #[test]
    fn unknown_series_kind_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_definition(&dir, "chart.json", r#"{"series": [{"kind": "pie"}]}"#);
        let err = load_with_env(&path, no_env()).expect_err("must fail");
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
