//! List command - print components, optionally filtered.

use colored::Colorize;
use swatch::{EntryFilter, Level, Status};

use super::{status_label, GlobalOptions};

pub async fn run(
    options: &GlobalOptions,
    level: Option<Level>,
    status: Option<Status>,
    tag: Option<String>,
    query: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;
    swatch.load().await;

    let filter = EntryFilter {
        level,
        status,
        tag,
        query,
    };
    let entries = swatch.state().filter_by(&filter);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No components match.".yellow());
        return Ok(());
    }

    for level in Level::ALL {
        let group: Vec<_> = entries.iter().filter(|e| e.level == level).collect();
        if group.is_empty() {
            continue;
        }

        println!("{} ({})", level.label().yellow().bold(), group.len());
        for entry in group {
            println!(
                "  {:<28} {:<24} {:<8} {}",
                entry.id.cyan(),
                entry.name,
                entry.version,
                status_label(entry)
            );
        }
        println!();
    }

    if entries.len() != swatch.state().len() {
        println!(
            "{} of {} components shown",
            entries.len().to_string().white().bold(),
            swatch.state().len()
        );
    }

    Ok(())
}
