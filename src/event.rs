use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, AppMode};

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.update_toast();

    // 检查系统主题变化（用于 Auto 模式）
    app.check_system_theme();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) => {
                // 只处理按下事件
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }

    Ok(!app.should_quit)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // 未登录：只响应退出和重载
    if !app.signed_in() {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
            KeyCode::Char('r') => app.reload_session(),
            _ => {}
        }
        return;
    }

    // 优先处理弹窗事件

    // 帮助面板
    if app.dialogs.show_help {
        app.dialogs.show_help = false;
        return;
    }

    // 确认弹窗
    if app.dialogs.confirm.is_some() {
        handle_confirm_key(app, key);
        return;
    }

    // Add Task 弹窗
    if app.dialogs.add_task.is_some() {
        handle_add_task_key(app, key);
        return;
    }

    // New Workspace 弹窗
    if app.dialogs.new_team.is_some() {
        handle_new_team_key(app, key);
        return;
    }

    // Invite 弹窗
    if app.dialogs.invite.is_some() {
        handle_invite_key(app, key);
        return;
    }

    // Edit Profile 弹窗
    if app.dialogs.profile.is_some() {
        handle_profile_key(app, key);
        return;
    }

    // Workspace 切换器
    if app.dialogs.team_switcher.is_some() {
        handle_team_switcher_key(app, key);
        return;
    }

    // 主题选择器
    if app.show_theme_selector {
        handle_theme_selector_key(app, key);
        return;
    }

    // History 搜索模式
    if app.mode == AppMode::History && app.history.search_mode {
        handle_history_search_key(app, key);
        return;
    }

    // 全局按键
    match key.code {
        // 退出
        KeyCode::Char('q') => {
            app.quit();
            return;
        }

        // Tab / 数字切换页面
        KeyCode::Tab => {
            app.set_mode(app.mode.next());
            return;
        }
        KeyCode::Char('1') => {
            app.set_mode(AppMode::Board);
            return;
        }
        KeyCode::Char('2') => {
            app.set_mode(AppMode::History);
            return;
        }
        KeyCode::Char('3') => {
            app.set_mode(AppMode::Members);
            return;
        }

        // Workspace 切换器
        KeyCode::Char('w') => {
            app.open_team_switcher();
            return;
        }

        // Edit Profile
        KeyCode::Char('e') => {
            app.open_profile_dialog();
            return;
        }

        // 主题选择器
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.open_theme_selector();
            return;
        }

        // 刷新
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.refresh();
            return;
        }

        // 帮助
        KeyCode::Char('?') => {
            app.dialogs.show_help = true;
            return;
        }

        _ => {}
    }

    // 页面级按键
    match app.mode {
        AppMode::Board => handle_board_key(app, key),
        AppMode::History => handle_history_key(app, key),
        AppMode::Members => handle_members_key(app, key),
    }
}

/// 处理看板页按键
fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 列内导航
        KeyCode::Char('j') | KeyCode::Down => app.cursor_move(0, 1),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_move(0, -1),

        // 列间导航
        KeyCode::Char('h') | KeyCode::Left => app.cursor_move(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.cursor_move(1, 0),

        // 移动选中任务
        KeyCode::Char('[') => app.move_selected(false),
        KeyCode::Char(']') => app.move_selected(true),

        // 新建任务
        KeyCode::Char('n') => app.open_add_task_dialog(),

        // 删除任务
        KeyCode::Char('x') => app.confirm_delete_selected_task(),

        // 取消拖拽
        KeyCode::Esc => {
            app.drag.cancel();
            app.drag_hover = None;
        }

        _ => {}
    }
}

/// 处理 History 页按键
fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 行导航
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.history.visible_tasks(&app.tasks.tasks).len();
            if count > 0 {
                app.history.selected = (app.history.selected + 1) % count;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let count = app.history.visible_tasks(&app.tasks.tasks).len();
            if count > 0 {
                app.history.selected = if app.history.selected == 0 {
                    count - 1
                } else {
                    app.history.selected - 1
                };
            }
        }

        // 搜索
        KeyCode::Char('/') => {
            app.history.search_mode = true;
        }

        // 状态过滤
        KeyCode::Char('f') => app.history.cycle_filter(),

        // 排序
        KeyCode::Char('s') => {
            app.history.sort = app.history.sort.next();
        }

        // 新建 / 删除
        KeyCode::Char('n') => app.open_add_task_dialog(),
        KeyCode::Char('x') => app.confirm_delete_selected_task(),

        // 清除搜索与过滤
        KeyCode::Esc => {
            app.history.search_query.clear();
            app.history.status_filter = None;
            app.history.selected = 0;
        }

        _ => {}
    }
}

/// 处理 History 搜索模式按键
fn handle_history_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出搜索（保留关键字）
        KeyCode::Enter => {
            app.history.search_mode = false;
        }

        // 取消搜索
        KeyCode::Esc => {
            app.history.search_mode = false;
            app.history.search_query.clear();
        }

        // 删除字符
        KeyCode::Backspace => {
            app.history.search_query.pop();
        }

        // 输入字符
        KeyCode::Char(c) => {
            app.history.search_query.push(c);
            app.history.selected = 0;
        }

        _ => {}
    }
}

/// 处理 Members 页按键
fn handle_members_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 行导航
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.teams.members.len();
            if count > 0 {
                app.members_selected = (app.members_selected + 1) % count;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let count = app.teams.members.len();
            if count > 0 {
                app.members_selected = if app.members_selected == 0 {
                    count - 1
                } else {
                    app.members_selected - 1
                };
            }
        }

        // 邀请 / 移除
        KeyCode::Char('i') => app.open_invite_dialog(),
        KeyCode::Char('x') => app.confirm_remove_selected_member(),

        _ => {}
    }
}

/// 处理确认弹窗按键
fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_yes(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_cancel(),
        _ => {}
    }
}

/// 处理 Add Task 弹窗按键
fn handle_add_task_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_add_task(),
        KeyCode::Esc => app.dialogs.add_task = None,
        KeyCode::Tab => {
            if let Some(data) = &mut app.dialogs.add_task {
                data.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(data) = &mut app.dialogs.add_task {
                data.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(data) = &mut app.dialogs.add_task {
                data.input_char(c);
            }
        }
        _ => {}
    }
}

/// 处理 New Workspace 弹窗按键
fn handle_new_team_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_new_team(),
        KeyCode::Esc => app.dialogs.new_team = None,
        KeyCode::Backspace => {
            if let Some(data) = &mut app.dialogs.new_team {
                data.name.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(data) = &mut app.dialogs.new_team {
                data.name.push(c);
            }
        }
        _ => {}
    }
}

/// 处理 Invite 弹窗按键
fn handle_invite_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_invite(),
        KeyCode::Esc => app.dialogs.invite = None,
        KeyCode::Backspace => {
            if let Some(data) = &mut app.dialogs.invite {
                data.username.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(data) = &mut app.dialogs.invite {
                data.username.push(c);
            }
        }
        _ => {}
    }
}

/// 处理 Edit Profile 弹窗按键
fn handle_profile_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_profile(),
        KeyCode::Esc => app.dialogs.profile = None,
        KeyCode::Tab => {
            if let Some(data) = &mut app.dialogs.profile {
                data.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(data) = &mut app.dialogs.profile {
                data.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(data) = &mut app.dialogs.profile {
                data.input_char(c);
            }
        }
        _ => {}
    }
}

/// 处理 Workspace 切换器按键
fn handle_team_switcher_key(app: &mut App, key: KeyEvent) {
    let team_count = app.teams.teams.len();
    match key.code {
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(data) = &mut app.dialogs.team_switcher {
                data.prev(team_count);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(data) = &mut app.dialogs.team_switcher {
                data.next(team_count);
            }
        }
        KeyCode::Enter => app.team_switcher_confirm(),
        KeyCode::Char('d') => app.team_switcher_delete(),
        KeyCode::Esc => app.dialogs.team_switcher = None,
        _ => {}
    }
}

/// 处理主题选择器按键
fn handle_theme_selector_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('k') | KeyCode::Up => app.theme_selector_prev(),
        KeyCode::Char('j') | KeyCode::Down => app.theme_selector_next(),
        KeyCode::Enter => app.theme_selector_confirm(),
        KeyCode::Esc => app.close_theme_selector(),
        _ => {}
    }
}

/// 处理鼠标事件（拖拽移动任务的手势入口）
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // 弹窗打开时忽略鼠标，避免点穿
    if app.dialogs.has_active_dialog() || app.show_theme_selector || !app.signed_in() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_mouse_down(app, mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag_update(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.drop_at(mouse.column, mouse.row);
        }
        MouseEventKind::ScrollDown => handle_scroll(app, 1),
        MouseEventKind::ScrollUp => handle_scroll(app, -1),
        _ => {}
    }
}

fn handle_mouse_down(app: &mut App, col: u16, row: u16) {
    // Tab 点击
    let tab_hit = app
        .ui
        .click_areas
        .mode_tabs
        .iter()
        .find(|(rect, _)| crate::ui::click_areas::contains(rect, col, row))
        .map(|(_, mode)| *mode);
    if let Some(mode) = tab_hit {
        app.set_mode(mode);
        return;
    }

    // 团队名点击打开切换器
    if let Some(rect) = app.ui.click_areas.team_name_area {
        if crate::ui::click_areas::contains(&rect, col, row) {
            app.open_team_switcher();
            return;
        }
    }

    match app.mode {
        AppMode::Board => {
            // 按住卡片：选中并开始拖拽
            if let Some((task_id, status)) = app.ui.click_areas.card_at(col, row) {
                app.select_card(task_id);
                app.drag.start(task_id, status);
                app.drag_hover = Some(status);
            }
        }
        AppMode::History => {
            let row_hit = app
                .ui
                .click_areas
                .history_rows
                .iter()
                .find(|(rect, _)| crate::ui::click_areas::contains(rect, col, row))
                .map(|(_, idx)| *idx);
            if let Some(idx) = row_hit {
                app.history.selected = idx;
            }
        }
        AppMode::Members => {
            let row_hit = app
                .ui
                .click_areas
                .member_rows
                .iter()
                .find(|(rect, _)| crate::ui::click_areas::contains(rect, col, row))
                .map(|(_, idx)| *idx);
            if let Some(idx) = row_hit {
                app.members_selected = idx;
            }
        }
    }
}

/// 滚轮导航（当前页面的列表选择）
fn handle_scroll(app: &mut App, delta: i32) {
    match app.mode {
        AppMode::Board => app.cursor_move(0, delta),
        AppMode::History => {
            let count = app.history.visible_tasks(&app.tasks.tasks).len();
            if count > 0 {
                let current = app.history.selected as i32;
                app.history.selected = (current + delta).rem_euclid(count as i32) as usize;
            }
        }
        AppMode::Members => {
            let count = app.teams.members.len();
            if count > 0 {
                let current = app.members_selected as i32;
                app.members_selected = (current + delta).rem_euclid(count as i32) as usize;
            }
        }
    }
}
