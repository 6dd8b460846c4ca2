use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::{components::centered_fixed, theme::Theme};

/// Yes/no dialog over the current screen.
pub fn render(frame: &mut Frame<'_>, area: Rect, question: &str, theme: &Theme) {
    let popup = centered_fixed(50, 5, area);
    let lines = vec![
        Line::from(Span::styled(
            question.to_string(),
            Style::default().fg(theme.error),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" yes   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" no"),
        ]),
    ];

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}
