//! Members 页面渲染
//!
//! 当前 workspace 的成员列表（含 owner 标记），支持邀请和移除。

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame,
};

use crate::app::App;
use crate::ui::components::{empty_state, footer, header, tabs};

/// 渲染 Members 页面
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let colors = app.colors;

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

    if app.teams.selected_team().is_none() {
        empty_state::render(
            frame,
            content_area,
            "No workspace selected",
            "Press w to create or switch workspaces",
            &colors,
        );
    } else if app.teams.members_loading {
        empty_state::render(frame, content_area, "Loading members…", "", &colors);
    } else if app.teams.members.is_empty() {
        empty_state::render(
            frame,
            content_area,
            "No members yet",
            "Press i to invite someone by username",
            &colors,
        );
    } else {
        render_rows(frame, content_area, app);
    }

    footer::render(frame, footer_area, app);
    super::render_overlays(frame, app);
}

fn render_rows(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors;
    let owner_id = app.teams.selected_team().map(|t| t.owner_id);
    let own_id = app.session.as_ref().map(|s| s.user_id);

    let count = app.teams.members.len();
    let selected = app.members_selected.min(count.saturating_sub(1));
    app.members_selected = selected;

    let visible = area.height as usize;
    let start = if selected + 1 > visible { selected + 1 - visible } else { 0 };

    // 借用冲突：先收集渲染行再登记点击区域
    let mut rows = Vec::new();
    for (row_idx, member) in app.teams.members.iter().enumerate().skip(start).take(visible) {
        let is_owner = Some(member.user_id) == owner_id;
        let is_self = Some(member.user_id) == own_id;

        let mut spans = vec![Span::styled(
            format!(" {:<24}", member.display_name()),
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        )];
        if let Some(full_name) = member
            .profile
            .as_ref()
            .and_then(|p| p.full_name.as_deref())
        {
            spans.push(Span::styled(
                format!("{:<24}", full_name),
                Style::default().fg(colors.muted),
            ));
        }
        if is_owner {
            spans.push(Span::styled(
                " owner ",
                Style::default().fg(colors.tab_active_fg).bg(colors.warning),
            ));
        }
        if is_self {
            spans.push(Span::styled(" you", Style::default().fg(colors.highlight)));
        }

        let style = if row_idx == selected {
            Style::default().bg(colors.bg_secondary)
        } else {
            Style::default()
        };
        rows.push((row_idx, Line::from(spans), style));
    }

    for (offset, (row_idx, line, style)) in rows.into_iter().enumerate() {
        let row_area = Rect::new(area.x, area.y + offset as u16, area.width, 1);
        app.ui.click_areas.member_rows.push((row_area, row_idx));
        frame.render_widget(Paragraph::new(line).style(style), row_area);
    }
}
