//! Remove command - delete a user-authored component.

use colored::Colorize;

use super::GlobalOptions;

pub fn run(options: &GlobalOptions, id: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut swatch = options.open()?;

    if swatch.remove_entry(&id)? {
        println!("{} {}", "Removed".green().bold(), id);
    } else {
        println!(
            "{} '{}' is not a user component; builtin and remote components cannot be removed.",
            "Nothing removed:".yellow().bold(),
            id
        );
    }

    Ok(())
}
