use std::path::Path;

use colored::Colorize;

pub fn print_created(path: &Path) {
    println!("{} {}", "Created:".green(), path.display());
}

pub fn print_summary(mapping_path: &Path, imported: usize) {
    println!();
    println!("{} {}", "ID mapping saved to:".dimmed(), mapping_path.display());
    println!("{}", format!("Imported {imported} tasks").bold());
}
