//! Metric catalog command implementation.

use sectorlens_compare::available_metrics;

/// Print the comparison table's metrics with their derivations.
pub(crate) fn list_metrics() {
    println!("\n{:<20} {:<18} {:<14} Derivation", "Key", "Title", "Category");
    println!("{}", "-".repeat(90));

    for info in available_metrics() {
        let unit = if info.key.is_percentage() { " (%)" } else { "" };
        println!(
            "{:<20} {:<18} {:<14} {}{unit}",
            info.key.as_str(),
            info.key.title(),
            format!("{:?}", info.category),
            info.description,
        );
    }
    println!();
}
