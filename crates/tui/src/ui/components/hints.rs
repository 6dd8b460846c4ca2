use ratatui::{style::Style, text::Span};

use crate::{app::Mode, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Context hints for the bottom bar.
pub fn for_mode(mode: Mode) -> Vec<KeyHint> {
    match mode {
        Mode::List => vec![
            KeyHint::new("a", "add"),
            KeyHint::new(":", "quick add"),
            KeyHint::new("f/F", "filter"),
            KeyHint::new("↑↓", "select"),
            KeyHint::new("d", "delete"),
            KeyHint::new("x", "clear all"),
            KeyHint::new("m", "demo data"),
            KeyHint::new("?", "help"),
            KeyHint::new("q", "quit"),
        ],
        Mode::Form => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "category"),
            KeyHint::new("Enter", "add"),
            KeyHint::new("Ctrl+R", "reset"),
            KeyHint::new("Esc", "back"),
        ],
        Mode::QuickAdd => vec![
            KeyHint::new("Enter", "add"),
            KeyHint::new("Esc", "cancel"),
        ],
        Mode::ConfirmClear => vec![KeyHint::new("y", "confirm"), KeyHint::new("n", "cancel")],
        Mode::Help => vec![KeyHint::new("Esc", "close")],
    }
}
