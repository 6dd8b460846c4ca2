use engine::MoneyCents;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Right-aligned amount for list rows.
#[must_use]
pub fn amount_cell(amount: MoneyCents, width: usize) -> String {
    format!("{:>width$}", amount.to_string())
}

/// Bold total; zero totals are dimmed.
#[must_use]
pub fn styled_total(amount: MoneyCents, theme: &Theme) -> Span<'static> {
    let style = if amount.is_zero() {
        Style::default().fg(theme.dim)
    } else {
        Style::default()
            .fg(theme.positive)
            .add_modifier(Modifier::BOLD)
    };
    Span::styled(amount.to_string(), style)
}
