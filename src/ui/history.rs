//! History 页面渲染
//!
//! 当前 workspace 的全量任务列表：搜索、状态过滤、排序。

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::model::format_relative_time;
use crate::ui::components::{empty_state, footer, header, tabs};

/// 渲染 History 页面
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = app.colors;

    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, tabs_area, filter_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    header::render(frame, header_area, app);
    tabs::render(frame, tabs_area, app);
    render_filter_bar(frame, filter_area, app);

    if app.teams.selected_team().is_none() {
        empty_state::render(
            frame,
            content_area,
            "No workspace selected",
            "Press w to create or switch workspaces",
            &colors,
        );
    } else {
        render_rows(frame, content_area, app);
    }

    footer::render(frame, footer_area, app);
    super::render_overlays(frame, app);
}

/// 渲染搜索/过滤/排序栏
fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = app.colors;
    let history = &app.history;

    let mut spans = vec![Span::styled(" / ", Style::default().fg(colors.highlight))];
    if history.search_mode {
        spans.push(Span::styled(
            history.search_query.clone(),
            Style::default().fg(colors.text),
        ));
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    } else if history.search_query.is_empty() {
        spans.push(Span::styled("search", Style::default().fg(colors.muted)));
    } else {
        spans.push(Span::styled(
            history.search_query.clone(),
            Style::default().fg(colors.text),
        ));
    }

    let filter_label = match history.status_filter {
        Some(status) => status.label(),
        None => "All",
    };
    spans.push(Span::styled(
        format!("   f filter: {}", filter_label),
        Style::default().fg(colors.muted),
    ));
    spans.push(Span::styled(
        format!("   s sort: {}", history.sort.label()),
        Style::default().fg(colors.muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// 渲染任务行
fn render_rows(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors;
    let tasks = app.history.visible_tasks(&app.tasks.tasks);

    if tasks.is_empty() {
        let (title, hint) = if app.history.search_query.is_empty() {
            ("No tasks yet", "Press n to create the first task")
        } else {
            ("No matching tasks", "Adjust the search or filter")
        };
        empty_state::render(frame, area, title, hint, &colors);
        return;
    }

    let visible = area.height as usize;
    let selected = app.history.selected.min(tasks.len() - 1);
    app.history.selected = selected;
    let start = if selected + 1 > visible { selected + 1 - visible } else { 0 };

    for (offset, (row_idx, task)) in tasks.iter().enumerate().skip(start).take(visible).enumerate()
    {
        let row_area = Rect::new(area.x, area.y + offset as u16, area.width, 1);
        app.ui.click_areas.history_rows.push((row_area, row_idx));

        let row_style = if row_idx == selected {
            Style::default().bg(colors.bg_secondary)
        } else {
            Style::default()
        };

        let status_color = colors.column(crate::model::ColumnKind::from_status(task.status));

        let line = Line::from(vec![
            Span::styled(
                format!(" {:<14}", task.status.label()),
                Style::default().fg(status_color),
            ),
            Span::styled(
                format!("{:<40}", truncate(&task.title, 38)),
                Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:<14}", task.due_display()),
                Style::default().fg(colors.muted),
            ),
            Span::styled(
                format_relative_time(task.created_at),
                Style::default().fg(colors.muted),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(row_style), row_area);
    }
}

/// 截断超长标题
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long task title", 10), "a very lo…");
    }
}
