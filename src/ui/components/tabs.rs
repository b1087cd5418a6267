//! 模式切换 Tab（Board / History / Members）

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppMode};

/// 渲染 Tab 行并登记点击区域
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors;
    let mut spans = vec![Span::raw(" ")];
    let mut x = area.x + 1;

    for (i, mode) in AppMode::all().iter().enumerate() {
        let label = format!(" {} ", mode.label());
        let width = label.chars().count() as u16;

        let style = if *mode == app.mode {
            Style::default()
                .fg(colors.tab_active_fg)
                .bg(colors.tab_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted)
        };

        app.ui
            .click_areas
            .mode_tabs
            .push((Rect::new(x, area.y, width, 1), *mode));

        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
        x += width + 1;

        // 数字快捷键提示跟在最后一个 tab 后面
        if i == AppMode::all().len() - 1 {
            spans.push(Span::styled(
                "  (1/2/3)",
                Style::default().fg(colors.muted),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
