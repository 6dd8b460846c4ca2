use engine::{FilteredView, MoneyCents};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, FormField, Mode},
    ui::{
        components::{card::Card, money},
        theme::Theme,
    },
};

/// Left column: the add form, then totals and the active filter.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    view: &FilteredView<'_>,
    overall: MoneyCents,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    render_form(frame, layout[0], state, theme);
    render_summary(frame, layout[1], state, view, overall, theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::Form;
    let form = &state.form;

    let mut lines: Vec<Line<'static>> = FormField::ALL
        .iter()
        .map(|field| {
            let focused = editing && form.focus == *field;
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let value = match field {
                FormField::Category => format!("‹ {} ›", form.category),
                FormField::Date if form.date.is_empty() && !focused => "YYYY-MM-DD".to_string(),
                _ => form.value(*field),
            };
            let cursor = if focused && *field != FormField::Category {
                "_"
            } else {
                ""
            };
            Line::from(vec![
                Span::styled(format!("{:<9}", field.label()), label_style),
                Span::raw(value),
                Span::styled(cursor, Style::default().fg(theme.accent)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(match &form.error {
        Some(err) => Line::from(Span::styled(err.clone(), Style::default().fg(theme.error))),
        None if editing => Line::from(Span::styled(
            "Enter to add, Esc to go back",
            Style::default().fg(theme.dim),
        )),
        None => Line::from(Span::styled(
            "Press a to add an expense",
            Style::default().fg(theme.dim),
        )),
    });

    let card = Card::new("Add Expense", theme).focused(editing);
    frame.render_widget(Paragraph::new(lines).block(card.block()), area);
}

fn render_summary(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    view: &FilteredView<'_>,
    overall: MoneyCents,
    theme: &Theme,
) {
    let filters: Vec<Span<'static>> = engine::CategoryFilter::OPTIONS
        .iter()
        .flat_map(|option| {
            let style = if *option == state.filter {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.dim)
            };
            [Span::styled(option.label(), style), Span::raw(" ")]
        })
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::styled("Filtered total: ", Style::default().fg(theme.text)),
            money::styled_total(view.total, theme),
        ]),
        Line::from(vec![
            Span::styled("Overall total:  ", Style::default().fg(theme.dim)),
            Span::styled(overall.to_string(), Style::default().fg(theme.dim)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Filter by category",
            Style::default().fg(theme.dim),
        )),
        Line::from(filters),
    ];

    let card = Card::new("Summary", theme);
    frame.render_widget(Paragraph::new(lines).block(card.block()), area);
}
