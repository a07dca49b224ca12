//! Import command - preview and apply a component file.

use std::path::PathBuf;

use colored::Colorize;
use swatch::SwatchError;

use super::GlobalOptions;

pub async fn run(
    options: &GlobalOptions,
    file: PathBuf,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&file).map_err(|e| SwatchError::Io {
        path: file.clone(),
        source: e,
    })?;

    let mut swatch = options.open()?;
    swatch.load().await;

    let preview = swatch.preview_import(&text);
    let summary = preview.summary;

    println!("{} {}", "Import preview for".cyan().bold(), file.display());
    println!(
        "  Total: {}  Valid: {}  Invalid: {}  Skipped: {}",
        summary.total,
        summary.valid.to_string().green(),
        summary.invalid.to_string().red(),
        summary.skipped.to_string().yellow()
    );

    if !preview.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for line in preview.error_preview(swatch.config().import_error_preview) {
            println!("  {}", line);
        }
    }

    if !preview.warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for line in &preview.warnings {
            println!("  {}", line);
        }
    }
    println!();

    if !preview.is_valid {
        return Err("nothing to import: no component passed validation".into());
    }

    if dry_run {
        println!(
            "Dry run: {} components would be saved.",
            preview.entries.len().to_string().white().bold()
        );
        return Ok(());
    }

    let applied = swatch.apply_import(&preview)?;
    println!(
        "{} {} components saved ({} in catalog)",
        "Imported".green().bold(),
        applied,
        swatch.state().len()
    );

    Ok(())
}
