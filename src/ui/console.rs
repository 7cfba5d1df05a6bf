//! Status lines for the terminal
//!
//! Every user-visible outcome is printed with a marker so successes, skips and
//! failures can be told apart at a glance.

use std::fmt::Display;

use nu_ansi_term::{Color, Style};

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Success,
    Failure,
    Warning,
    Skipped,
    DryRun,
    Info,
    Start,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Success => "✅",
            Marker::Failure => "❌",
            Marker::Warning => "⚠️ ",
            Marker::Skipped => "⏭️ ",
            Marker::DryRun => "🔍",
            Marker::Info => "📊",
            Marker::Start => "🚀",
        }
    }

    fn style(&self) -> Style {
        match self {
            Marker::Success => Color::Green.normal(),
            Marker::Failure => Color::Red.bold(),
            Marker::Warning => Color::Yellow.normal(),
            Marker::Skipped => Color::DarkGray.normal(),
            Marker::DryRun => Color::Cyan.normal(),
            Marker::Info | Marker::Start => Style::new(),
        }
    }
}

/// Prints status lines to stdout, optionally colored.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Console honoring the `NO_COLOR` convention on top of `color`.
    pub fn from_env(color: bool) -> Self {
        Self::new(color && std::env::var_os("NO_COLOR").is_none())
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Render a status line without printing it.
    pub fn format(&self, marker: Marker, message: impl Display) -> String {
        let text = format!("{} {}", marker.symbol(), message);
        if self.color {
            marker.style().paint(text).to_string()
        } else {
            text
        }
    }

    pub fn print(&self, marker: Marker, message: impl Display) {
        println!("{}", self.format(marker, message));
    }

    pub fn success(&self, message: impl Display) {
        self.print(Marker::Success, message);
    }

    pub fn failure(&self, message: impl Display) {
        self.print(Marker::Failure, message);
    }

    pub fn warning(&self, message: impl Display) {
        self.print(Marker::Warning, message);
    }

    pub fn info(&self, message: impl Display) {
        self.print(Marker::Info, message);
    }

    /// Banner followed by a rule.
    pub fn heading(&self, title: &str) {
        let title = if self.color {
            Style::new().bold().paint(title).to_string()
        } else {
            title.to_string()
        };
        println!("{title}");
        println!("{}", "=".repeat(50));
    }
}
