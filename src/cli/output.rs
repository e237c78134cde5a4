use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use booking_config::Config;
use booking_domain::NotificationState;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// Labels only, no colour or emphasis.
    pub plain_output: bool,
    /// Emphasis through bold text instead of colour.
    pub high_contrast: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Pushes the stored display settings into the output layer.
pub fn apply_config(config: &Config) {
    if !config.ui_color_enabled {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
    set_preferences(OutputPreferences {
        plain_output: config.accessibility.plain_output,
        high_contrast: config.accessibility.high_contrast,
    });
}

fn label(kind: MessageKind) -> Option<&'static str> {
    match kind {
        MessageKind::Info => None,
        MessageKind::Success => Some("SUCCESS"),
        MessageKind::Warning => Some("WARNING"),
        MessageKind::Error => Some("ERROR"),
        MessageKind::Hint => Some("HINT"),
        MessageKind::Section => None,
    }
}

pub(crate) fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();
    let formatted = match (kind, label(kind)) {
        (MessageKind::Section, _) => format!("=== {} ===", text.trim()),
        (_, Some(label)) => format!("{label}: {text}"),
        (_, None) => text,
    };

    if prefs.plain_output {
        return formatted;
    }

    if prefs.high_contrast {
        return match kind {
            MessageKind::Info | MessageKind::Hint => formatted,
            _ => formatted.bold().to_string(),
        };
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Renders the outcome banner the way a page would show it.
pub fn banner(state: NotificationState, message: Option<&str>) {
    match (state, message) {
        (NotificationState::ShowingSuccess, Some(message)) => success(message),
        (NotificationState::ShowingError, Some(message)) => error(message),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_keeps_labels_without_styling() {
        let prefs = OutputPreferences {
            plain_output: true,
            high_contrast: false,
        };
        assert_eq!(
            format_message(MessageKind::Error, "Please fill out all required fields correctly.", &prefs),
            "ERROR: Please fill out all required fields correctly."
        );
        assert_eq!(
            format_message(MessageKind::Section, " Draft ", &prefs),
            "=== Draft ==="
        );
        assert_eq!(format_message(MessageKind::Info, "hello", &prefs), "hello");
    }
}
