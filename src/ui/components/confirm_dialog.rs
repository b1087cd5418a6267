//! 确认弹窗（删除任务 / 删除团队 / 移除成员）

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use uuid::Uuid;

use super::dialog_utils::centered_rect;
use crate::theme::ThemeColors;

/// 待确认的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmType {
    /// 删除任务
    DeleteTask { task_id: Uuid, title: String },
    /// 删除团队（及其全部任务）
    DeleteTeam { team_id: Uuid, name: String },
    /// 移除团队成员
    RemoveMember { member_index: usize, name: String },
}

impl ConfirmType {
    /// 弹窗正文
    pub fn message(&self) -> String {
        match self {
            ConfirmType::DeleteTask { title, .. } => {
                format!("Delete task \"{}\"?", title)
            }
            ConfirmType::DeleteTeam { name, .. } => {
                format!("Delete workspace \"{}\" and all its tasks?", name)
            }
            ConfirmType::RemoveMember { name, .. } => {
                format!("Remove {} from this workspace?", name)
            }
        }
    }
}

/// 渲染确认弹窗
pub fn render(frame: &mut Frame, confirm: &ConfirmType, colors: &ThemeColors) {
    let message = confirm.message();
    let width = (message.chars().count() as u16 + 8).clamp(36, 70);
    let popup_area = centered_rect(frame.area(), width, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.error))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [_, message_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::styled(message, Style::default().fg(colors.text)))
            .alignment(Alignment::Center),
        message_area,
    );

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("y", Style::default().fg(colors.error)),
        Span::styled(" confirm  ", Style::default().fg(colors.muted)),
        Span::styled("n/Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}
