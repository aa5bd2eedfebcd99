use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::CliError;

/// Write `model` as frontend JSON to `destination`, or stdout when unset.
pub fn emit<T>(model: &T, pretty: bool, destination: Option<&Path>) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    match destination {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_json(&mut writer, model, pretty)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "wrote chart configuration");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, model, pretty)?;
        }
    }

    Ok(())
}

fn write_json<W, T>(writer: &mut W, model: &T, pretty: bool) -> Result<(), CliError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    chartwire_core::to_writer(&mut *writer, model, pretty)?;
    writeln!(writer)?;
    Ok(())
}
