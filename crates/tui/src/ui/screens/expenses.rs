use engine::{Expense, FilteredView};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Mode},
    ui::{
        components::{card::Card, money},
        theme::Theme,
    },
};

const AMOUNT_WIDTH: usize = 12;

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    view: &FilteredView<'_>,
    theme: &Theme,
) {
    let card = Card::new(format!("Expenses ({})", view.len()), theme)
        .focused(state.mode == Mode::List);

    if view.is_empty() {
        let content = Paragraph::new(Line::from(Span::styled(
            "No expenses to show.",
            Style::default().fg(theme.dim),
        )))
        .alignment(Alignment::Center)
        .block(card.block());
        frame.render_widget(content, area);
        return;
    }

    let items = view
        .expenses
        .iter()
        .map(|expense| row(expense, theme))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.min(view.len() - 1)));

    let list = List::new(items)
        .block(card.block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row(expense: &Expense, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            money::amount_cell(expense.amount, AMOUNT_WIDTH),
            Style::default().fg(theme.text),
        ),
        Span::raw("  "),
        Span::raw(expense.title.clone()),
        Span::raw("  "),
        Span::styled(
            format!("{} • {}", display_date(expense), expense.category),
            Style::default().fg(theme.dim),
        ),
    ]))
}

/// Calendar dates render as `Jan 5, 2026`; anything else is shown verbatim.
fn display_date(expense: &Expense) -> String {
    expense
        .calendar_date()
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| expense.date.clone())
}
