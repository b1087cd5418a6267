//! 主题选择器弹窗

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialog_utils::centered_rect;
use crate::theme::{Theme, ThemeColors};

/// 渲染主题选择器
pub fn render(frame: &mut Frame, selected_index: usize, colors: &ThemeColors) {
    let themes = Theme::all();
    let popup_area = centered_rect(frame.area(), 30, themes.len() as u16 + 4);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Theme ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [list_area, hint_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = themes
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let style = if i == selected_index {
                Style::default()
                    .fg(colors.tab_active_fg)
                    .bg(colors.tab_active_bg)
            } else {
                Style::default().fg(colors.text)
            };
            Line::styled(format!("  {}", theme.label()), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), list_area);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" apply  ", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" close", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}
