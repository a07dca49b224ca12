//! Show command - print one component in full.

use colored::Colorize;
use swatch::SwatchError;

use super::{status_label, GlobalOptions};

pub async fn run(
    options: &GlobalOptions,
    id: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;
    swatch.load().await;

    let state = swatch.state();
    let entry = state
        .get(&id)
        .ok_or_else(|| SwatchError::NotFound(format!("component '{}'", id)))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    println!("{} {}", entry.name.white().bold(), format!("({})", entry.id).cyan());
    println!(
        "  {} · v{} · {}",
        entry.level.label(),
        entry.version,
        status_label(entry)
    );
    if let Some(description) = &entry.description {
        println!("  {}", description);
    }
    println!();

    if !entry.tags.is_empty() {
        println!("{} {}", "Tags:".yellow().bold(), entry.tags.join(", "));
    }

    if !entry.dependencies.is_empty() {
        println!("{}", "Depends on:".yellow().bold());
        for dep in &entry.dependencies {
            match state.get(dep) {
                Some(found) => println!("  {} {}", dep.cyan(), found.name),
                None => println!("  {} {}", dep.red(), "(missing)".red()),
            }
        }
    }

    let dependents = state.dependents_of(&entry.id);
    if !dependents.is_empty() {
        let ids: Vec<&str> = dependents.iter().map(|e| e.id.as_str()).collect();
        println!("{} {}", "Used by:".yellow().bold(), ids.join(", "));
    }

    if !entry.props_spec.is_empty() {
        println!("{}", "Props:".yellow().bold());
        for prop in &entry.props_spec {
            let required = if prop.required == Some(true) { " (required)" } else { "" };
            let kind = serde_json::to_value(prop.kind)?;
            print!("  {:<16} {}{}", prop.name.cyan(), kind.as_str().unwrap_or("text"), required);
            if let Some(options) = &prop.options {
                print!(" [{}]", options.join(" | "));
            }
            if let Some(default) = &prop.default {
                print!(" = {}", default);
            }
            println!();
        }
    }

    if let Some(notes) = &entry.notes {
        println!("{} {}", "Notes:".yellow().bold(), notes);
    }

    if swatch.thumbnail(&entry.id).is_some() {
        println!("{}", "Thumbnail cached".dimmed());
    }

    Ok(())
}
