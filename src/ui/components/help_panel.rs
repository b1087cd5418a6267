//! 帮助面板

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::theme::ThemeColors;

const KEYS: &[(&str, &str)] = &[
    ("1 / 2 / 3", "Board / History / Members"),
    ("Tab", "next page"),
    ("j / k", "select task in column"),
    ("h / l", "select column"),
    ("[ / ]", "move selected task left / right"),
    ("mouse drag", "move task between columns"),
    ("n", "new task"),
    ("x", "delete task / remove member"),
    ("w", "switch workspace"),
    ("i", "invite member (Members)"),
    ("e", "edit profile"),
    ("/", "search (History)"),
    ("f / s", "filter / sort (History)"),
    ("t", "theme selector"),
    ("r", "refresh"),
    ("q", "quit"),
];

/// 渲染帮助面板
pub fn render(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect(frame.area(), 56, KEYS.len() as u16 + 4);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![Line::raw("")];
    for (key, desc) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default()
                    .fg(colors.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*desc, Style::default().fg(colors.text)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
