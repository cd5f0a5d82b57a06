//! Console helpers shared by the commands.

use colored::Colorize;
use std::path::Path;

/// Print the command banner and the paths it works on.
pub(crate) fn print_banner(title: &str, data_dir: &Path, catalog: &Path, entity_count: usize) {
    println!("{}", "======================================".cyan());
    println!("{}", format!("  cryptsheet {}", title).cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!("{} {}", "Data directory:".blue().bold(), data_dir.display());
    println!("{} {}", "Catalog:".blue().bold(), catalog.display());
    println!("{} {}", "Entities:".blue().bold(), entity_count);
    println!();
}

/// Human-readable byte count.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KIB * KIB {
        format!("{:.1} MiB", value / (KIB * KIB))
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
