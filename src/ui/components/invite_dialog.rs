//! Invite Member 弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::theme::ThemeColors;

/// Invite 弹窗数据
#[derive(Debug, Default)]
pub struct InviteData {
    pub username: String,
}

impl InviteData {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 渲染 Invite 弹窗
pub fn render(frame: &mut Frame, data: &InviteData, team_name: &str, colors: &ThemeColors) {
    let popup_area = centered_rect(frame.area(), 56, 8);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Invite Member ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [_, target_area, input_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("  Workspace: {}", team_name),
            Style::default().fg(colors.muted),
        )),
        target_area,
    );

    let input_line = Line::from(vec![
        Span::styled("  Username: ", Style::default().fg(colors.muted)),
        Span::styled(&data.username, Style::default().fg(colors.text)),
        Span::styled(
            "█",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(input_line), input_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" invite  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}
