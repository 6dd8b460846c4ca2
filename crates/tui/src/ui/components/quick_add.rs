use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::QuickAddState,
    ui::{components::centered_fixed, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &QuickAddState, theme: &Theme) {
    let popup = centered_fixed(60, 5, area);

    let footer = match &state.error {
        Some(err) => Line::from(Span::styled(err.clone(), Style::default().fg(theme.error))),
        None => Line::from(Span::styled(
            "Format: amount title [#category]   e.g. 4.20 Coffee #food",
            Style::default().fg(theme.dim),
        )),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::raw(state.input.clone()),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]),
        Line::from(""),
        footer,
    ];

    let block = Block::default()
        .title(" Quick add ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
