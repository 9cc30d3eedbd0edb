//! Common utilities shared across CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::OutputArgs;
use crate::log;

/// Serialize `value` as JSON, compact or pretty.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Print `value` to stdout, or write it to `--output`.
pub fn write_output<T: Serialize + ?Sized>(value: &T, args: &OutputArgs, module: &str) -> Result<()> {
    let formatted = to_json(value, args.pretty)?;

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("cannot create `{}`", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!(module; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Write `value` as pretty JSON with a trailing newline.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = to_json(value, true)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("cannot write `{}`", path.display()))
}
