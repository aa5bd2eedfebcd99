//! CLI argument definitions for chartwire.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `render` | Build a chart from a definition file and a data table, print frontend JSON |
//! | `kinds` | List series kinds, the point kinds they accept and the fields each needs |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Render a candlestick chart from CSV bars
//! chartwire render --definition chart.toml --data bars.csv --pretty
//!
//! # Override the chart height from the environment
//! CHARTWIRE_CHART__HEIGHT=600 chartwire render --definition chart.toml --data bars.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Chartwire - typed chart definitions to frontend JSON
#[derive(Debug, Parser)]
#[command(
    name = "chartwire",
    author,
    version,
    about = "Validate chart data and emit Lightweight-Charts configuration"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a chart and print its frontend configuration.
    Render(RenderArgs),
    /// Print the series kind registry.
    Kinds,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Chart definition (TOML, JSON or YAML). `CHARTWIRE_` variables override
    /// its keys, with `__` separating nested keys.
    #[arg(long)]
    pub definition: PathBuf,

    /// Data table shared by every series in the definition.
    #[arg(long)]
    pub data: PathBuf,

    /// Data table format; inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<DataFormat>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Data table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    /// Comma separated values with a header row.
    Csv,
    /// Array of row objects, or an object of column arrays.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::try_parse_from([
            "chartwire",
            "render",
            "--definition",
            "chart.toml",
            "--data",
            "bars.csv",
            "--format",
            "csv",
            "--pretty",
        ])
        .expect("must parse");
        assert!(cli.pretty);
        let Command::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.format, Some(DataFormat::Csv));
        assert_eq!(args.data, PathBuf::from("bars.csv"));
        assert!(args.output.is_none());
    }
}
