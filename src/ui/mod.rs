//! TUI 渲染模块

pub mod board;
pub mod click_areas;
pub mod components;
pub mod history;
pub mod members;
pub mod signin;

use ratatui::Frame;

use crate::app::App;
use components::{
    add_task_dialog, confirm_dialog, help_panel, invite_dialog, new_team_dialog, profile_dialog,
    team_switcher, theme_selector, toast,
};

/// 渲染各页面共用的浮层（弹窗、toast、主题选择器、帮助）
pub fn render_overlays(frame: &mut Frame, app: &App) {
    let colors = &app.colors;

    if let Some(ref data) = app.dialogs.add_task {
        add_task_dialog::render(frame, data, colors);
    }
    if let Some(ref data) = app.dialogs.new_team {
        new_team_dialog::render(frame, data, colors);
    }
    if let Some(ref data) = app.dialogs.invite {
        let team_name = app
            .teams
            .selected_team()
            .map(|t| t.name.as_str())
            .unwrap_or("-");
        invite_dialog::render(frame, data, team_name, colors);
    }
    if let Some(ref data) = app.dialogs.profile {
        profile_dialog::render(frame, data, colors);
    }
    if let Some(ref data) = app.dialogs.team_switcher {
        team_switcher::render(frame, data, &app.teams.teams, app.teams.selected_id(), colors);
    }
    if let Some(ref confirm) = app.dialogs.confirm {
        confirm_dialog::render(frame, confirm, colors);
    }
    if app.show_theme_selector {
        theme_selector::render(frame, app.theme_selector_index, colors);
    }
    if app.dialogs.show_help {
        help_panel::render(frame, colors);
    }

    // Toast 永远画在最上层
    if app.busy() {
        toast::render_loading(frame, "Syncing…", colors);
    }
    if let Some(ref t) = app.toast {
        if !t.is_expired() {
            toast::render(frame, &t.message, t.kind, colors);
        }
    }
}
