//! Workspace 切换器弹窗
//!
//! 列出可见团队供选择，末尾带一个 "new workspace" 项。

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::model::Team;
use crate::theme::ThemeColors;

/// 切换器数据
#[derive(Debug, Default)]
pub struct TeamSwitcherData {
    /// 当前高亮索引（== teams.len() 表示 "new workspace" 项）
    pub index: usize,
}

impl TeamSwitcherData {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// 选中上一项
    pub fn prev(&mut self, team_count: usize) {
        let len = team_count + 1;
        self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
    }

    /// 选中下一项
    pub fn next(&mut self, team_count: usize) {
        let len = team_count + 1;
        self.index = (self.index + 1) % len;
    }

    /// 是否选在 "new workspace" 项上
    pub fn on_create_row(&self, team_count: usize) -> bool {
        self.index >= team_count
    }
}

/// 渲染切换器
pub fn render(
    frame: &mut Frame,
    data: &TeamSwitcherData,
    teams: &[Team],
    selected_id: Option<uuid::Uuid>,
    colors: &ThemeColors,
) {
    let height = (teams.len() as u16 + 5).min(16);
    let popup_area = centered_rect(frame.area(), 44, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Switch Workspace ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [list_area, hint_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let mut lines = Vec::new();
    for (i, team) in teams.iter().enumerate() {
        let marker = if Some(team.id) == selected_id { "● " } else { "  " };
        let style = if i == data.index {
            Style::default()
                .fg(colors.tab_active_fg)
                .bg(colors.tab_active_bg)
        } else {
            Style::default().fg(colors.text)
        };
        lines.push(Line::styled(format!(" {}{}", marker, team.name), style));
    }

    let create_style = if data.on_create_row(teams.len()) {
        Style::default()
            .fg(colors.tab_active_fg)
            .bg(colors.tab_active_bg)
    } else {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::styled(" + new workspace", create_style));

    frame.render_widget(Paragraph::new(lines), list_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" select  ", Style::default().fg(colors.muted)),
        Span::styled("d", Style::default().fg(colors.highlight)),
        Span::styled(" delete  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" close", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps_through_create_row() {
        let mut data = TeamSwitcherData::new(0);
        // 两个团队 + create 行
        data.prev(2);
        assert_eq!(data.index, 2);
        assert!(data.on_create_row(2));

        data.next(2);
        assert_eq!(data.index, 0);
        assert!(!data.on_create_row(2));
    }
}
