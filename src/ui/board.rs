//! 看板页面渲染
//!
//! 四列固定布局，卡片按缓存顺序排列。拖拽中的卡片降淡显示，悬停列
//! 边框高亮。

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::model::{project_columns, Column};
use crate::ui::components::{empty_state, footer, header, tabs};

/// 卡片高度（含边框）
const CARD_HEIGHT: u16 = 5;

/// 渲染看板页面
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, tabs_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    header::render(frame, header_area, app);
    tabs::render(frame, tabs_area, app);

    if app.teams.loading && app.teams.teams.is_empty() {
        empty_state::render(frame, content_area, "Loading workspaces…", "", &colors);
    } else if app.teams.selected_team().is_none() {
        empty_state::render(
            frame,
            content_area,
            "No workspace selected",
            "Press w to create or switch workspaces",
            &colors,
        );
    } else if app.tasks.loading {
        empty_state::render(frame, content_area, "Loading tasks…", "", &colors);
    } else {
        render_columns(frame, content_area, app);
    }

    footer::render(frame, footer_area, app);
    super::render_overlays(frame, app);
}

/// 渲染四列
fn render_columns(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors;
    let columns = project_columns(&app.tasks.tasks);

    let areas: [Rect; 4] = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .areas(area);

    for (col_idx, (column, col_area)) in columns.iter().zip(areas).enumerate() {
        let status = column.kind.status();
        app.ui.click_areas.column_zones.push((col_area, status));

        let accent = colors.column(column.kind);
        let hovered = app.drag_hover == Some(status);
        let border_color = if hovered { colors.highlight } else { colors.border };

        let title = Line::from(vec![
            Span::styled("● ", Style::default().fg(accent)),
            Span::styled(
                format!("{} ", column.kind.title()),
                Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("({})", column.len()), Style::default().fg(colors.muted)),
        ]);

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(col_area);
        frame.render_widget(block, col_area);

        render_cards(frame, inner, app, column, col_idx);
    }
}

/// 渲染一列中的卡片（窗口滚动保证选中卡片可见）
fn render_cards(frame: &mut Frame, area: Rect, app: &mut App, column: &Column, col_idx: usize) {
    let colors = app.colors;
    let visible = (area.height / CARD_HEIGHT).max(1) as usize;

    let (cursor_col, cursor_row) = app.board_cursor;
    let start = if cursor_col == col_idx && cursor_row + 1 > visible {
        cursor_row + 1 - visible
    } else {
        0
    };

    for (offset, (row_idx, task)) in column
        .tasks
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .enumerate()
    {
        let card_area = Rect::new(
            area.x,
            area.y + (offset as u16) * CARD_HEIGHT,
            area.width,
            CARD_HEIGHT,
        );
        app.ui
            .click_areas
            .task_cards
            .push((card_area, task.id, task.status));

        let selected = cursor_col == col_idx && cursor_row == row_idx;
        let dragging = app.drag.is_dragging(task.id);

        let border_color = if selected { colors.highlight } else { colors.border };
        let mut card_style = Style::default();
        if selected {
            card_style = card_style.bg(colors.bg_secondary);
        }
        if dragging {
            card_style = card_style.add_modifier(Modifier::DIM);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(card_style);
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        let (completed, total) = task.progress();
        let lines = vec![
            Line::styled(
                task.title.clone(),
                Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::styled(
                    format!("⬤ {}", task.tag()),
                    Style::default().fg(colors.tag(task.tag_color.as_deref().unwrap_or("gray"))),
                ),
                Span::styled(
                    format!("  {}", task.due_display()),
                    Style::default().fg(colors.muted),
                ),
            ]),
            Line::from(vec![
                Span::styled(progress_bar(completed, total), Style::default().fg(colors.highlight)),
                Span::styled(
                    format!(" {}/{} · {} ppl", completed, total, task.assignees_count.unwrap_or(1)),
                    Style::default().fg(colors.muted),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// 八格进度条，如 "▰▰▰▱▱▱▱▱"
fn progress_bar(completed: i32, total: i32) -> String {
    const CELLS: i32 = 8;
    let filled = if total <= 0 {
        0
    } else {
        (completed * CELLS / total).clamp(0, CELLS)
    };
    let mut bar = String::new();
    for i in 0..CELLS {
        bar.push(if i < filled { '▰' } else { '▱' });
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "▱▱▱▱▱▱▱▱");
        assert_eq!(progress_bar(2, 4), "▰▰▰▰▱▱▱▱");
        assert_eq!(progress_bar(4, 4), "▰▰▰▰▰▰▰▰");
        // total 为 0 不能 panic
        assert_eq!(progress_bar(1, 0), "▱▱▱▱▱▱▱▱");
    }
}
