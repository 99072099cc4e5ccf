//! Map error text onto an identity.

use anyhow::Result;
use colored::Colorize;
use tracelog_types::ErrorRegistry;

pub fn execute(text: &str) -> Result<()> {
    let identity = ErrorRegistry::global().map_text(text);

    if identity.is_classified() {
        println!("{}", "Classified".green().bold());
        println!("  Facility: {}", identity.facility.cyan());
        println!("  Code: {}", identity.code);
    } else {
        println!("{}", "Unclassified".yellow().bold());
    }
    println!("  Message: {}", identity.message);
    Ok(())
}
