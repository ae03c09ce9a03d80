use console::style;
use std::fmt;

/// Colour palette for trainer output.
pub struct Theme;

impl Theme {
    /// Headings and disease names.
    pub fn primary(text: impl fmt::Display) -> String {
        style(text).cyan().bold().to_string()
    }

    pub fn bold(text: impl fmt::Display) -> String {
        style(text).bold().to_string()
    }

    pub fn success(text: impl fmt::Display) -> String {
        style(text).green().bold().to_string()
    }

    pub fn warning(text: impl fmt::Display) -> String {
        style(text).yellow().bold().to_string()
    }

    pub fn error(text: impl fmt::Display) -> String {
        style(text).red().bold().to_string()
    }

    pub fn muted(text: impl fmt::Display) -> String {
        style(text).dim().to_string()
    }
}

pub enum Icon {
    Patient,
    Test,
    Check,
    Cross,
    Info,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self {
            Icon::Patient => "🩺",
            Icon::Test => "🧪",
            Icon::Check => "✔",
            Icon::Cross => "✖",
            Icon::Info => "ℹ️ ",
        };
        write!(f, "{}", icon)
    }
}
