//! New Workspace 弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::theme::ThemeColors;

/// New Workspace 弹窗数据
#[derive(Debug, Default)]
pub struct NewTeamData {
    pub name: String,
}

impl NewTeamData {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 渲染 New Workspace 弹窗
pub fn render(frame: &mut Frame, data: &NewTeamData, colors: &ThemeColors) {
    let popup_area = centered_rect(frame.area(), 52, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" New Workspace ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [_, input_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let input_line = Line::from(vec![
        Span::styled("  Name: ", Style::default().fg(colors.muted)),
        Span::styled(&data.name, Style::default().fg(colors.text)),
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
        Span::styled(" create  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}
