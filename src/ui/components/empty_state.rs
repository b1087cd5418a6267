//! 空状态提示

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// 居中渲染一段空状态文案
pub fn render(frame: &mut Frame, area: Rect, title: &str, hint: &str, colors: &ThemeColors) {
    let [_, content, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let lines = vec![
        Line::styled(
            title.to_string(),
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(hint.to_string(), Style::default().fg(colors.muted)),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content,
    );
}
