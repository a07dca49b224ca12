//! Export command - write the catalog as a JSON document.

use std::path::PathBuf;

use chrono::Utc;
use colored::Colorize;
use swatch::exchange::export_file_name;
use swatch::{ExportOptions, SwatchError};

use super::GlobalOptions;

pub async fn run(
    options: &GlobalOptions,
    output: Option<PathBuf>,
    include_builtins: bool,
    no_metadata: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;
    swatch.load().await;

    let export_options = ExportOptions::new()
        .with_builtins(include_builtins)
        .with_metadata(!no_metadata);
    let document = swatch.export(&export_options);
    let json = document.to_json_pretty()?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    let path = if output.is_dir() {
        output.join(export_file_name(Utc::now()))
    } else {
        output
    };

    std::fs::write(&path, json).map_err(|e| SwatchError::Io {
        path: path.clone(),
        source: e,
    })?;

    eprintln!(
        "{} {} components to {}",
        "Exported".green().bold(),
        document.components.len(),
        path.display()
    );

    Ok(())
}
