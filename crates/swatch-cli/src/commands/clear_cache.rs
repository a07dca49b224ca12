//! Clear-cache command - drop the cached catalog and thumbnails.

use colored::Colorize;

use super::GlobalOptions;

pub fn run(options: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;
    let thumbnails = swatch.clear_cache();

    println!(
        "{} ({} thumbnails removed). User components were kept.",
        "Cache cleared".green().bold(),
        thumbnails
    );

    Ok(())
}
