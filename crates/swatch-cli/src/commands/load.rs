//! Load command - resolve the catalog and report its source.

use colored::Colorize;
use swatch::LoadSource;

use super::GlobalOptions;

pub async fn run(
    options: &GlobalOptions,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;
    let result = swatch.load().await.clone();
    let total = swatch.state().len();

    if json_output {
        let report = serde_json::json!({
            "source": result.source,
            "count": result.count,
            "locator": result.locator,
            "cached": result.cached,
            "error": result.error,
            "total": total,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(error) = &result.error {
        println!("{} {}", "No catalog available:".red().bold(), error);
        return Ok(());
    }

    let source = match result.source {
        LoadSource::Cache => result.source.label().green(),
        LoadSource::Remote => result.source.label().cyan(),
        LoadSource::Builtin => result.source.label().yellow(),
    };
    println!(
        "Loaded {} components from {}",
        result.count.to_string().white().bold(),
        source
    );
    if let Some(locator) = &result.locator {
        println!("  Locator: {}", locator);
    }
    if result.source != LoadSource::Cache {
        let cached = if result.cached { "yes".green() } else { "no".red() };
        println!("  Cached:  {}", cached);
    }
    if total != result.count {
        println!(
            "  With user components: {}",
            total.to_string().white().bold()
        );
    }
    if options.verbose {
        println!("  Store:   {}", options.store_dir.display());
    }

    Ok(())
}
