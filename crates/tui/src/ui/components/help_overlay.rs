use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::Mode,
    ui::{
        components::{centered_rect, hints},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_rect(70, 70, area);

    let mut lines = Vec::new();
    for (title, mode) in [
        ("List", Mode::List),
        ("Add form", Mode::Form),
        ("Quick add", Mode::QuickAdd),
    ] {
        lines.push(Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent),
        )));
        for hint in hints::for_mode(mode) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<8}", hint.key), Style::default().fg(theme.accent)),
                Span::raw(hint.action),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Amounts are rounded half-up to cents. Changes are saved after every edit.",
        Style::default().fg(theme.dim),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
