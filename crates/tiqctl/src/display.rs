//! Small terminal formatting helpers shared by the subcommands.

use owo_colors::OwoColorize;

use tiq_common::aggregate::RiskLevel;

/// Section header
pub fn head(title: &str) -> String {
    format!("{}", title.bold())
}

/// Aligned label/value line
pub fn kv(label: &str, value: &str) -> String {
    // pad before styling so the escape codes stay out of the width math
    let padded = format!("{:<20}", format!("{label}:"));
    format!("  {} {}", padded.dimmed(), value)
}

/// Risk level with its conventional color
pub fn risk(level: RiskLevel) -> String {
    match level {
        RiskLevel::Stable => format!("{}", "Stable".green()),
        RiskLevel::Elevated => format!("{}", "Elevated".yellow()),
        RiskLevel::Critical => format!("{}", "Critical".red().bold()),
    }
}

/// Clip a cell to `width` characters, marking the cut with an ellipsis.
pub fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let cut: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_values_untouched() {
        assert_eq!(clip("hello", 10), "hello");
        assert_eq!(clip("hello", 5), "hello");
    }

    #[test]
    fn test_clip_long_values_get_ellipsis() {
        assert_eq!(clip("hello world", 6), "hello…");
        assert_eq!(clip("hello world", 6).chars().count(), 6);
    }
}
