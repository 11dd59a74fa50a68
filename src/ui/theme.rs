//! Visual theme and styling.

use console::Style;

/// Styles used by the terminal UI.
#[derive(Debug, Clone)]
pub struct DashTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Style for favorite markers (yellow).
    pub star: Style,
}

impl Default for DashTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DashTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().bold(),
            star: Style::new().yellow(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
            star: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▍"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a `key: value` line.
    pub fn format_key_value(&self, key: &str, value: &str) -> String {
        format!("{} {}", self.key.apply_to(format!("{}:", key)), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = DashTheme::plain().format_success("Saved");
        assert_eq!(msg, "✓ Saved");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = DashTheme::plain().format_warning("Storage full");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Storage full"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = DashTheme::plain().format_error("Failed");
        assert!(msg.starts_with("✗"));
    }

    #[test]
    fn theme_formats_key_value() {
        let msg = DashTheme::plain().format_key_value("tableDensity", "compact");
        assert_eq!(msg, "tableDensity: compact");
    }

    #[test]
    fn colored_theme_creates_without_panic() {
        let theme = DashTheme::new();
        let _ = theme.format_header("Navigation");
        let _ = theme.star.apply_to("★");
    }
}
