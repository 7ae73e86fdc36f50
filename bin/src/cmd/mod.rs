//! CLI subcommand modules.

pub(crate) mod compare;
pub(crate) mod metrics;
pub(crate) mod ratios;
pub(crate) mod sectors;
pub(crate) mod stocks;

/// Render a figure for display; fractions flagged as percentages are scaled.
pub(crate) fn format_value(value: Option<f64>, is_percentage: bool) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if is_percentage => format!("{:.2}%", v * 100.0),
        Some(v) => format!("{v:.2}"),
    }
}
