pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::{Expense, MoneyCents, filter_expenses};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};

use self::theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

/// Draws one frame from the current state and ledger snapshot.
pub fn render(frame: &mut Frame<'_>, state: &AppState, expenses: &[Expense]) {
    let theme = Theme::default();
    let area = frame.area();

    // Info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, expenses.len(), &theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);

    let view = filter_expenses(expenses, state.filter);
    let overall: MoneyCents = expenses.iter().map(|expense| expense.amount).sum();
    screens::entry::render(frame, columns[0], state, &view, overall, &theme);
    screens::expenses::render(frame, columns[1], state, &view, &theme);

    render_bottom_bar(frame, layout[2], state, &theme);

    match state.mode {
        Mode::QuickAdd => components::quick_add::render(frame, area, &state.quick_add, &theme),
        Mode::ConfirmClear => {
            components::confirm::render(frame, area, "Clear ALL expenses?", &theme)
        }
        Mode::Help => components::help_overlay::render(frame, area, &theme),
        Mode::List | Mode::Form => {}
    }
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    count: usize,
    theme: &Theme,
) {
    let line = Line::from(vec![
        Span::styled("Expense Tracker", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("Store", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.storage_label)),
        Span::styled("Entries", Style::default().fg(theme.dim)),
        Span::raw(format!(": {count}  ")),
        Span::styled("Filter", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.filter)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = components::hints::for_mode(state.mode);
    let mut parts = components::hints::hints_to_spans(&hints, theme);

    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
