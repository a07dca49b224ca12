//! Stats command - catalog counts and dependency health.

use colored::Colorize;
use swatch::{Level, Status};

use super::GlobalOptions;

pub async fn run(
    options: &GlobalOptions,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;
    let source = swatch.load().await.source;

    let state = swatch.state();
    let counts = state.counts();
    let broken = state.broken_dependencies();
    let user = swatch.user_entries().len();

    if json_output {
        let stats = serde_json::json!({
            "source": source,
            "counts": counts,
            "user_components": user,
            "tags": state.tags(),
            "broken_dependencies": broken,
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Catalog:".cyan().bold(),
        counts.total.to_string().white().bold(),
        format!("components (resolved from {})", source.label()).dimmed()
    );
    println!();

    println!("{}", "By level:".yellow().bold());
    for level in Level::ALL {
        println!("  {:<10} {}", level.label(), counts.by_level.get(level));
    }
    println!();

    println!("{}", "By status:".yellow().bold());
    println!("  {:<10} {}", Status::Ready.label(), counts.by_status.ready.to_string().green());
    println!("  {:<10} {}", Status::Draft.label(), counts.by_status.draft.to_string().yellow());
    println!();

    println!("User components: {}", user);
    println!("Distinct tags:   {}", state.tags().len());
    println!();

    if broken.is_empty() {
        println!("{}", "All dependencies resolve.".green());
    } else {
        println!("{}", "Broken dependencies:".red().bold());
        for reference in &broken {
            println!("  {} → {}", reference.entry_id.cyan(), reference.missing.red());
        }
    }

    Ok(())
}
