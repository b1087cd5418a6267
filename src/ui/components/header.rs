//! 顶部栏：团队名 + 看板统计 + 当前用户

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::model::{status_counts, ColumnKind};

/// 渲染 Header（单行）
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors;

    let [left_area, right_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(30)]).areas(area);

    // 左侧：团队名（可点击切换）+ 各列计数
    let team_label = app
        .teams
        .selected_team()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "No workspace".to_string());

    let mut spans = vec![
        Span::styled(" ◫ ", Style::default().fg(colors.highlight)),
        Span::styled(
            team_label,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▾", Style::default().fg(colors.muted)),
        Span::raw("  "),
    ];

    let counts = status_counts(&app.tasks.tasks);
    for (kind, count) in ColumnKind::all().iter().zip(counts) {
        spans.push(Span::styled(
            format!("{} {}  ", count, kind.title()),
            Style::default().fg(colors.column(*kind)),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), left_area);

    // 团队名点击区域（整个左段开头）
    app.ui.click_areas.team_name_area = Some(Rect {
        width: left_area.width.min(24),
        ..left_area
    });

    // 右侧：当前用户
    let user_label = app.display_name();
    let user = Paragraph::new(Line::from(vec![
        Span::styled(user_label, Style::default().fg(colors.text)),
        Span::styled(
            format!("  v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(colors.muted),
        ),
    ]))
    .alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(user, right_area);
}
