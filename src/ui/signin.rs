//! 未登录提示页
//!
//! 没有会话时所有远端操作都被拒绝，只提示用户走 CLI 登录。

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
    Frame,
};

use crate::app::App;

/// 渲染登录提示
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = app.colors;

    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [_, content, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Fill(1),
    ])
    .areas(area);

    let lines = vec![
        Line::styled(
            "Huddle",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("You are not signed in.", Style::default().fg(colors.text)),
        Line::styled(
            "Run `huddle login` in another terminal, then press r.",
            Style::default().fg(colors.muted),
        ),
        Line::raw(""),
        Line::styled("q quit · r reload session", Style::default().fg(colors.muted)),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), content);
}
