use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::dialogs::{
    AddTaskData, ConfirmType, DialogState, InviteData, NewTeamData, ProfileData, TeamSwitcherData,
};
use crate::drag_state::{DragState, DropOutcome};
use crate::model::{project_columns, ColumnKind, Profile, Task, TaskStatus};
use crate::operations;
use crate::remote::Client;
use crate::storage::{self, config::Config, session::Session};
use crate::tasks_state::{CacheKey, FetchRequest, MoveRequest, TasksMsg, TasksState};
use crate::teams_state::{TeamsMsg, TeamsOutcome, TeamsState};
use crate::theme::{detect_system_theme, get_theme_colors, Theme, ThemeColors};
use crate::ui_state::UiState;
use crate::update;

/// Toast 种类（信息 / 失败）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 页面模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Board,
    History,
    Members,
}

impl AppMode {
    /// 所有页面（Tab 顺序）
    pub fn all() -> &'static [AppMode] {
        &[AppMode::Board, AppMode::History, AppMode::Members]
    }

    /// Tab 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Board => "Board",
            AppMode::History => "History",
            AppMode::Members => "Members",
        }
    }

    /// 切换到下一个页面（循环）
    pub fn next(&self) -> Self {
        match self {
            AppMode::Board => AppMode::History,
            AppMode::History => AppMode::Members,
            AppMode::Members => AppMode::Board,
        }
    }
}

/// History 页排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Created,
    Title,
    DueDate,
    Status,
}

impl SortBy {
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Created => "Created",
            SortBy::Title => "Title",
            SortBy::DueDate => "Due date",
            SortBy::Status => "Status",
        }
    }

    /// 循环切换
    pub fn next(&self) -> Self {
        match self {
            SortBy::Created => SortBy::Title,
            SortBy::Title => SortBy::DueDate,
            SortBy::DueDate => SortBy::Status,
            SortBy::Status => SortBy::Created,
        }
    }
}

/// History 页状态（搜索 / 过滤 / 排序 / 选中行）
#[derive(Debug, Default)]
pub struct HistoryState {
    pub search_mode: bool,
    pub search_query: String,
    pub status_filter: Option<TaskStatus>,
    pub sort: SortBy,
    pub selected: usize,
}

impl HistoryState {
    /// 过滤 + 排序后的任务（owned 快照，避免和渲染期的可变借用打架）
    pub fn visible_tasks(&self, tasks: &[Task]) -> Vec<Task> {
        let query = self.search_query.to_lowercase();
        let mut visible: Vec<Task> = tasks
            .iter()
            .filter(|task| {
                let matches_search = query.is_empty()
                    || task.title.to_lowercase().contains(&query)
                    || task
                        .description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&query))
                        .unwrap_or(false);
                let matches_status = self
                    .status_filter
                    .map(|f| task.status == f)
                    .unwrap_or(true);
                matches_search && matches_status
            })
            .cloned()
            .collect();

        match self.sort {
            SortBy::Created => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Title => visible.sort_by(|a, b| a.title.cmp(&b.title)),
            // 无截止时间的排在最后
            SortBy::DueDate => visible.sort_by(|a, b| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }),
            SortBy::Status => visible.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str())),
        }
        visible
    }

    /// 循环切换状态过滤（All → todo → … → completed → All）
    pub fn cycle_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(TaskStatus::Todo),
            Some(TaskStatus::Todo) => Some(TaskStatus::InProgress),
            Some(TaskStatus::InProgress) => Some(TaskStatus::InReview),
            Some(TaskStatus::InReview) => Some(TaskStatus::Completed),
            Some(TaskStatus::Completed) => None,
        };
        self.selected = 0;
    }
}

/// 后台操作结束后刷新哪块数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    None,
    Tasks,
    Teams,
    Members,
    Profile,
}

/// 后台操作结果
#[derive(Debug)]
pub enum BgResult {
    /// 通用变更操作：成功消息或错误消息 + 刷新目标
    Done {
        outcome: Result<String, String>,
        refresh: Refresh,
    },
    /// 资料拉取结果
    Profile(Result<Option<Profile>, String>),
    /// 有新版本可用
    UpdateNotice(String),
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 页面模式
    pub mode: AppMode,
    /// 应用配置
    pub config: Config,
    /// 登录会话（None = 未登录）
    pub session: Option<Session>,
    /// 当前用户资料
    pub profile: Option<Profile>,
    /// 远端客户端（配置/会话变化时重建）
    client: Option<Client>,
    /// 团队状态
    pub teams: TeamsState,
    /// 任务缓存
    pub tasks: TasksState,
    /// 拖拽状态
    pub drag: DragState,
    /// 拖拽悬停的列（落点高亮）
    pub drag_hover: Option<TaskStatus>,
    /// 看板光标 (列, 行)
    pub board_cursor: (usize, usize),
    /// History 页状态
    pub history: HistoryState,
    /// Members 页选中行
    pub members_selected: usize,
    /// 对话框状态
    pub dialogs: DialogState,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 是否显示主题选择器
    pub show_theme_selector: bool,
    /// 主题选择器当前选中索引
    pub theme_selector_index: usize,
    /// 上次检测到的系统主题（用于 Auto 模式检测变化）
    last_system_dark: bool,
    /// UI 状态（点击区域）
    pub ui: UiState,
    /// 后台操作结果通道
    bg_tx: mpsc::Sender<BgResult>,
    bg_rx: mpsc::Receiver<BgResult>,
}

impl App {
    pub fn new() -> Self {
        let config = storage::config::load_config();
        let theme = Theme::from_name(&config.theme.name);
        let last_system_dark = detect_system_theme();
        let colors = get_theme_colors(theme);
        let session = storage::session::load_session();
        let selected_team = session.as_ref().and_then(|s| s.selected_team_id);
        let (bg_tx, bg_rx) = mpsc::channel();

        let mut app = Self {
            should_quit: false,
            mode: AppMode::Board,
            config,
            session,
            profile: None,
            client: None,
            teams: TeamsState::with_selected(selected_team),
            tasks: TasksState::new(),
            drag: DragState::default(),
            drag_hover: None,
            board_cursor: (0, 0),
            history: HistoryState::default(),
            members_selected: 0,
            dialogs: DialogState::new(),
            toast: None,
            theme,
            colors,
            show_theme_selector: false,
            theme_selector_index: 0,
            last_system_dark,
            ui: UiState::new(),
            bg_tx,
            bg_rx,
        };

        app.rebuild_client();
        if app.signed_in() {
            app.start_session_loads();
        }
        app
    }

    /// 是否有有效会话
    pub fn signed_in(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| !s.is_expired())
            .unwrap_or(false)
    }

    /// Header 里显示的用户名
    pub fn display_name(&self) -> String {
        if let Some(name) = self.profile.as_ref().and_then(|p| p.display_name()) {
            return name.to_string();
        }
        self.session
            .as_ref()
            .map(|s| s.email.clone())
            .unwrap_or_else(|| "signed out".to_string())
    }

    /// 是否有写操作在途（对账中也算）
    pub fn busy(&self) -> bool {
        !matches!(self.tasks.sync(), crate::tasks_state::SyncState::Idle)
    }

    /// 用当前配置和会话重建远端客户端
    fn rebuild_client(&mut self) {
        match Client::new(&self.config.server, self.session.as_ref()) {
            Ok(client) => self.client = Some(client),
            Err(e) => {
                self.client = None;
                self.show_error(e.to_string());
            }
        }
    }

    /// 登录后的初始加载：团队、资料、更新检查
    fn start_session_loads(&mut self) {
        self.dispatch_teams_load();
        self.dispatch_profile_fetch();
        self.dispatch_update_check();
    }

    /// 重新读取会话文件（登录提示页按 r 触发）
    pub fn reload_session(&mut self) {
        self.dialogs.close_all();
        self.session = storage::session::load_session();
        let selected = self.session.as_ref().and_then(|s| s.selected_team_id);
        self.teams = TeamsState::with_selected(selected);
        self.rebuild_client();
        if self.signed_in() {
            self.start_session_loads();
            self.show_toast("Session loaded");
        } else {
            self.show_error("No session - run `huddle login` first");
        }
    }

    // ========== 后台派发 ==========

    /// 派发任务拉取
    fn dispatch_tasks_fetch(&mut self, req: FetchRequest) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let tx = self.tasks.sender();
        thread::spawn(move || {
            let result = client
                .list_tasks(req.key.user_id, req.key.team_id)
                .map_err(|e| e.to_string());
            let _ = tx.send(TasksMsg::FetchDone {
                key: req.key,
                epoch: req.epoch,
                result,
            });
        });
    }

    /// 派发状态写入
    fn dispatch_move(&mut self, req: MoveRequest) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let tx = self.tasks.sender();
        thread::spawn(move || {
            let result = client
                .update_task_status(req.task_id, req.key.user_id, req.key.team_id, req.new_status)
                .map_err(|e| e.to_string());
            let _ = tx.send(TasksMsg::WriteDone {
                key: req.key,
                epoch: req.epoch,
                result,
            });
        });
    }

    /// 派发团队列表加载
    fn dispatch_teams_load(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
            return;
        };
        let req = self.teams.begin_load();
        let tx = self.teams.sender();
        thread::spawn(move || {
            let result = client.list_teams(user_id).map_err(|e| e.to_string());
            let _ = tx.send(TeamsMsg::TeamsLoaded {
                epoch: req.epoch,
                result,
            });
        });
    }

    /// 派发成员列表加载
    fn dispatch_members_load(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(req) = self.teams.begin_load_members() else {
            return;
        };
        let tx = self.teams.sender();
        thread::spawn(move || {
            let result =
                operations::teams::load_members(&client, req.team_id).map_err(|e| e.to_string());
            let _ = tx.send(TeamsMsg::MembersLoaded {
                epoch: req.epoch,
                team_id: req.team_id,
                result,
            });
        });
    }

    /// 派发资料拉取
    fn dispatch_profile_fetch(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
            return;
        };
        let tx = self.bg_tx.clone();
        thread::spawn(move || {
            let result = client.get_profile(user_id).map_err(|e| e.to_string());
            let _ = tx.send(BgResult::Profile(result));
        });
    }

    /// 派发更新检查（结果缓存回写配置）
    fn dispatch_update_check(&mut self) {
        let cached = self.config.update.latest_version.clone();
        let last_check = self.config.update.last_check.clone();
        let tx = self.bg_tx.clone();
        thread::spawn(move || {
            let info = update::check_for_updates(cached.as_deref(), last_check.as_deref());

            let mut config = storage::config::load_config();
            config.update.latest_version = info.latest_version.clone();
            config.update.last_check = info.check_time.map(|t| t.to_rfc3339());
            let _ = storage::config::save_config(&config);

            if let Some(notice) = info.notice() {
                let _ = tx.send(BgResult::UpdateNotice(notice));
            }
        });
    }

    /// 派发一个通用变更操作到后台线程
    fn dispatch_bg<F>(&mut self, refresh: Refresh, job: F)
    where
        F: FnOnce(&Client) -> crate::error::Result<String> + Send + 'static,
    {
        let Some(client) = self.client.clone() else {
            self.show_error("Not signed in - run `huddle login`");
            return;
        };
        let tx = self.bg_tx.clone();
        thread::spawn(move || {
            let outcome = job(&client).map_err(|e| e.to_string());
            let _ = tx.send(BgResult::Done { outcome, refresh });
        });
    }

    // ========== 后台结果轮询（主循环每帧调用）==========

    pub fn poll_background(&mut self) {
        // 任务缓存
        while let Some(outcome) = self.tasks.poll() {
            use crate::tasks_state::ApplyOutcome;
            match outcome {
                ApplyOutcome::Ignored | ApplyOutcome::Loaded => {}
                ApplyOutcome::LoadFailed(e) => {
                    self.show_error(format!("Error fetching tasks: {}", e));
                }
                ApplyOutcome::Reconcile(req) => self.dispatch_tasks_fetch(req),
                ApplyOutcome::RolledBack(e) => {
                    self.show_error(format!("Error moving task: {}", e));
                }
            }
        }
        self.clamp_board_cursor();

        // 团队
        while let Some(outcome) = self.teams.poll() {
            match outcome {
                TeamsOutcome::Ignored | TeamsOutcome::Members => {}
                TeamsOutcome::Loaded { selection_changed } => {
                    if selection_changed {
                        self.persist_selected_team();
                    }
                    self.sync_cache_key();
                    if self.mode == AppMode::Members {
                        self.dispatch_members_load();
                    }
                }
                TeamsOutcome::LoadFailed(e) => {
                    self.show_error(format!("Error loading workspaces: {}", e));
                    self.sync_cache_key();
                }
                TeamsOutcome::MembersFailed(e) => {
                    self.show_error(format!("Error loading members: {}", e));
                }
            }
        }

        // 通用后台操作
        while let Ok(result) = self.bg_rx.try_recv() {
            match result {
                BgResult::Done { outcome, refresh } => match outcome {
                    Ok(message) => {
                        self.show_toast(message);
                        match refresh {
                            Refresh::None => {}
                            Refresh::Tasks => self.refresh_tasks(),
                            Refresh::Teams => self.dispatch_teams_load(),
                            Refresh::Members => self.dispatch_members_load(),
                            Refresh::Profile => self.dispatch_profile_fetch(),
                        }
                    }
                    Err(e) => self.show_error(e),
                },
                BgResult::Profile(Ok(profile)) => self.profile = profile,
                // 资料加载失败不打扰用户，header 退回邮箱显示
                BgResult::Profile(Err(_)) => {}
                BgResult::UpdateNotice(notice) => self.show_toast(notice),
            }
        }
    }

    /// 让任务缓存键跟上 (会话, 选中团队)
    fn sync_cache_key(&mut self) {
        let desired = match (&self.session, self.teams.selected_id()) {
            (Some(s), Some(team_id)) if !s.is_expired() => Some(CacheKey {
                user_id: s.user_id,
                team_id,
            }),
            _ => None,
        };

        if desired != self.tasks.key() {
            let fetch = self.tasks.set_key(desired);
            self.board_cursor = (0, 0);
            self.history.selected = 0;
            if let Some(req) = fetch {
                self.dispatch_tasks_fetch(req);
            }
        }
    }

    /// 把当前选中团队写回会话文件
    fn persist_selected_team(&mut self) {
        if let Some(session) = &mut self.session {
            session.selected_team_id = self.teams.selected_id();
            let _ = storage::session::save_session(session);
        }
    }

    // ========== 任务移动 ==========

    /// 发起一次移动（拖拽与键盘共用的唯一入口）
    pub fn move_task(&mut self, task_id: Uuid, to: TaskStatus) {
        let title = self
            .tasks
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.title.clone());

        if let Some(req) = self.tasks.begin_move(task_id, to) {
            self.dispatch_move(req);
            if let Some(title) = title {
                self.show_toast(format!(
                    "{} moved to {}",
                    title,
                    ColumnKind::from_status(to).title()
                ));
            }
            self.follow_task(task_id);
        }
    }

    /// 拖拽落点更新（鼠标移动中）
    pub fn drag_update(&mut self, col: u16, row: u16) {
        if self.drag.dragging().is_some() {
            self.drag_hover = self.ui.click_areas.column_at(col, row);
        }
    }

    /// 拖拽结束：判定落点并发起移动
    pub fn drop_at(&mut self, col: u16, row: u16) {
        let target = self.ui.click_areas.column_at(col, row);
        let outcome = self.drag.drop_on(target);
        self.drag_hover = None;
        if let DropOutcome::Move { task_id, to } = outcome {
            self.move_task(task_id, to);
        }
    }

    /// 键盘移动选中任务（[ / ]）
    pub fn move_selected(&mut self, forward: bool) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let target = if forward {
            task.status.next()
        } else {
            task.status.prev()
        };
        let id = task.id;
        self.move_task(id, target);
    }

    // ========== 看板光标 ==========

    /// 当前选中的任务
    pub fn selected_task(&self) -> Option<Task> {
        let columns = project_columns(&self.tasks.tasks);
        let (col, row) = self.board_cursor;
        columns.get(col)?.tasks.get(row).cloned()
    }

    /// 光标跟随任务到它的新列
    fn follow_task(&mut self, task_id: Uuid) {
        let columns = project_columns(&self.tasks.tasks);
        for (col_idx, column) in columns.iter().enumerate() {
            if let Some(row_idx) = column.tasks.iter().position(|t| t.id == task_id) {
                self.board_cursor = (col_idx, row_idx);
                return;
            }
        }
    }

    /// 光标移动（列间 / 列内）
    pub fn cursor_move(&mut self, d_col: i32, d_row: i32) {
        let columns = project_columns(&self.tasks.tasks);
        let (mut col, mut row) = self.board_cursor;

        if d_col != 0 {
            col = (col as i32 + d_col).rem_euclid(4) as usize;
        }
        if d_row != 0 {
            let len = columns[col].tasks.len();
            if len > 0 {
                row = (row as i32 + d_row).rem_euclid(len as i32) as usize;
            }
        }

        let len = columns[col].tasks.len();
        row = row.min(len.saturating_sub(1));
        self.board_cursor = (col, row);
    }

    /// 点击卡片时同步光标
    pub fn select_card(&mut self, task_id: Uuid) {
        self.follow_task(task_id);
    }

    /// 缓存变化后防止光标越界
    fn clamp_board_cursor(&mut self) {
        let columns = project_columns(&self.tasks.tasks);
        let (col, row) = self.board_cursor;
        let col = col.min(3);
        let row = row.min(columns[col].tasks.len().saturating_sub(1));
        self.board_cursor = (col, row);
    }

    // ========== 对话框 ==========

    /// 打开 Add Task 弹窗（需要已选团队）
    pub fn open_add_task_dialog(&mut self) {
        if !self.require_workspace() {
            return;
        }
        self.dialogs.add_task = Some(AddTaskData::new());
    }

    /// 提交 Add Task
    pub fn submit_add_task(&mut self) {
        let Some(data) = self.dialogs.add_task.take() else {
            return;
        };
        let Some(key) = self.tasks.key() else {
            self.show_error("Select a workspace first");
            return;
        };
        self.dispatch_bg(Refresh::Tasks, move |client| {
            operations::tasks::create_task(
                client,
                &data.title,
                &data.description,
                &data.due_date,
                key.user_id,
                key.team_id,
            )
            .map(|task| format!("Task created: {}", task.title))
        });
    }

    /// 打开 New Workspace 弹窗
    pub fn open_new_team_dialog(&mut self) {
        if !self.require_session() {
            return;
        }
        self.dialogs.team_switcher = None;
        self.dialogs.new_team = Some(NewTeamData::new());
    }

    /// 提交 New Workspace
    pub fn submit_new_team(&mut self) {
        let Some(data) = self.dialogs.new_team.take() else {
            return;
        };
        let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
            return;
        };
        self.dispatch_bg(Refresh::Teams, move |client| {
            operations::teams::create_team(client, &data.name, user_id)
                .map(|team| format!("Workspace \"{}\" is ready", team.name))
        });
    }

    /// 打开 Invite 弹窗
    pub fn open_invite_dialog(&mut self) {
        if !self.require_workspace() {
            return;
        }
        self.dialogs.invite = Some(InviteData::new());
    }

    /// 提交 Invite
    pub fn submit_invite(&mut self) {
        let Some(data) = self.dialogs.invite.take() else {
            return;
        };
        let Some(team_id) = self.teams.selected_id() else {
            return;
        };
        let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
            return;
        };
        self.dispatch_bg(Refresh::Members, move |client| {
            operations::teams::invite_member(client, team_id, user_id, &data.username)
        });
    }

    /// 打开 Edit Profile 弹窗
    pub fn open_profile_dialog(&mut self) {
        if !self.require_session() {
            return;
        }
        self.dialogs.profile = Some(ProfileData::from_profile(self.profile.as_ref()));
    }

    /// 提交 Edit Profile
    pub fn submit_profile(&mut self) {
        let Some(data) = self.dialogs.profile.take() else {
            return;
        };
        let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
            return;
        };
        let current = self.profile.clone().unwrap_or(Profile {
            id: user_id,
            username: None,
            full_name: None,
            avatar_url: None,
        });
        self.dispatch_bg(Refresh::Profile, move |client| {
            operations::profiles::save_profile(
                client,
                &current,
                &data.username,
                &data.full_name,
                &data.avatar_url,
            )
        });
    }

    /// 打开 Workspace 切换器
    pub fn open_team_switcher(&mut self) {
        if !self.require_session() {
            return;
        }
        let index = self
            .teams
            .selected_id()
            .and_then(|id| self.teams.teams.iter().position(|t| t.id == id))
            .unwrap_or(0);
        self.dialogs.team_switcher = Some(TeamSwitcherData::new(index));
    }

    /// 切换器确认：选团队或进入新建流程
    pub fn team_switcher_confirm(&mut self) {
        let Some(data) = self.dialogs.team_switcher.take() else {
            return;
        };
        if data.on_create_row(self.teams.teams.len()) {
            self.open_new_team_dialog();
            return;
        }
        if let Some(team) = self.teams.teams.get(data.index) {
            let id = team.id;
            if self.teams.select(id) {
                self.persist_selected_team();
                self.sync_cache_key();
                if self.mode == AppMode::Members {
                    self.dispatch_members_load();
                }
            }
        }
    }

    /// 切换器里对高亮团队发起删除确认
    pub fn team_switcher_delete(&mut self) {
        let Some(data) = &self.dialogs.team_switcher else {
            return;
        };
        if data.on_create_row(self.teams.teams.len()) {
            return;
        }
        if let Some(team) = self.teams.teams.get(data.index) {
            self.dialogs.confirm = Some(ConfirmType::DeleteTeam {
                team_id: team.id,
                name: team.name.clone(),
            });
            self.dialogs.team_switcher = None;
        }
    }

    /// 对看板/History 选中的任务发起删除确认
    pub fn confirm_delete_selected_task(&mut self) {
        let task = match self.mode {
            AppMode::Board => self.selected_task(),
            AppMode::History => {
                let visible = self.history.visible_tasks(&self.tasks.tasks);
                visible.get(self.history.selected).cloned()
            }
            AppMode::Members => None,
        };
        if let Some(task) = task {
            self.dialogs.confirm = Some(ConfirmType::DeleteTask {
                task_id: task.id,
                title: task.title,
            });
        }
    }

    /// 对选中的成员发起移除确认
    pub fn confirm_remove_selected_member(&mut self) {
        let Some(member) = self.teams.members.get(self.members_selected) else {
            return;
        };
        self.dialogs.confirm = Some(ConfirmType::RemoveMember {
            member_index: self.members_selected,
            name: member.display_name(),
        });
    }

    /// 确认弹窗 - 执行
    pub fn confirm_yes(&mut self) {
        let Some(confirm) = self.dialogs.confirm.take() else {
            return;
        };
        match confirm {
            ConfirmType::DeleteTask { task_id, .. } => {
                let Some(task) = self.tasks.tasks.iter().find(|t| t.id == task_id).cloned()
                else {
                    return;
                };
                self.dispatch_bg(Refresh::Tasks, move |client| {
                    operations::tasks::delete_task(client, &task)
                });
            }
            ConfirmType::DeleteTeam { team_id, .. } => {
                let Some(team) = self.teams.teams.iter().find(|t| t.id == team_id).cloned()
                else {
                    return;
                };
                let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
                    return;
                };
                self.dispatch_bg(Refresh::Teams, move |client| {
                    operations::teams::delete_team(client, &team, user_id)
                        .map(|()| format!("Workspace \"{}\" deleted", team.name))
                });
            }
            ConfirmType::RemoveMember { member_index, .. } => {
                let Some(member) = self.teams.members.get(member_index).cloned() else {
                    return;
                };
                let Some(team) = self.teams.selected_team().cloned() else {
                    return;
                };
                let Some(user_id) = self.session.as_ref().map(|s| s.user_id) else {
                    return;
                };
                self.dispatch_bg(Refresh::Members, move |client| {
                    operations::teams::remove_member(client, &team, user_id, &member)
                });
            }
        }
    }

    /// 确认弹窗 - 取消
    pub fn confirm_cancel(&mut self) {
        self.dialogs.confirm = None;
    }

    // ========== 模式与刷新 ==========

    /// 切换页面
    pub fn set_mode(&mut self, mode: AppMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == AppMode::Members {
            self.dispatch_members_load();
        }
    }

    /// 手动刷新当前页数据
    pub fn refresh(&mut self) {
        if !self.signed_in() {
            self.reload_session();
            return;
        }
        self.dispatch_teams_load();
        self.refresh_tasks();
        if self.mode == AppMode::Members {
            self.dispatch_members_load();
        }
    }

    /// 重新拉取任务缓存
    fn refresh_tasks(&mut self) {
        if let Some(req) = self.tasks.refresh() {
            self.dispatch_tasks_fetch(req);
        }
    }

    // ========== 主题 ==========

    /// 打开主题选择器
    pub fn open_theme_selector(&mut self) {
        let themes = Theme::all();
        self.theme_selector_index = themes.iter().position(|t| *t == self.theme).unwrap_or(0);
        self.show_theme_selector = true;
    }

    /// 关闭主题选择器
    pub fn close_theme_selector(&mut self) {
        self.show_theme_selector = false;
    }

    /// 主题选择器 - 选择上一个
    pub fn theme_selector_prev(&mut self) {
        let len = Theme::all().len();
        self.theme_selector_index = if self.theme_selector_index == 0 {
            len - 1
        } else {
            self.theme_selector_index - 1
        };
        // 实时预览
        self.apply_theme_at_index(self.theme_selector_index);
    }

    /// 主题选择器 - 选择下一个
    pub fn theme_selector_next(&mut self) {
        let len = Theme::all().len();
        self.theme_selector_index = (self.theme_selector_index + 1) % len;
        // 实时预览
        self.apply_theme_at_index(self.theme_selector_index);
    }

    /// 主题选择器 - 确认选择并写回配置
    pub fn theme_selector_confirm(&mut self) {
        self.apply_theme_at_index(self.theme_selector_index);
        self.show_theme_selector = false;
        self.config.theme.name = self.theme.label().to_string();
        let _ = storage::config::save_config(&self.config);
        self.show_toast(format!("Theme: {}", self.theme.label()));
    }

    /// 应用指定索引的主题
    fn apply_theme_at_index(&mut self, index: usize) {
        if let Some(theme) = Theme::all().get(index) {
            self.theme = *theme;
            self.colors = get_theme_colors(*theme);
        }
    }

    /// 检查系统主题变化（用于 Auto 模式）
    pub fn check_system_theme(&mut self) {
        if self.theme != Theme::Auto {
            return;
        }

        let current_dark = detect_system_theme();
        if current_dark != self.last_system_dark {
            self.last_system_dark = current_dark;
            self.colors = get_theme_colors(Theme::Auto);
        }
    }

    // ========== Toast ==========

    /// 显示信息 Toast
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, ToastKind::Info, Duration::from_secs(2)));
    }

    /// 显示失败 Toast
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, ToastKind::Error, Duration::from_secs(3)));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    // ========== 前置检查 ==========

    /// 操作需要有效会话，否则提示并拒绝
    fn require_session(&mut self) -> bool {
        if self.signed_in() {
            true
        } else {
            self.show_error("Not signed in - run `huddle login`");
            false
        }
    }

    /// 操作需要已选团队，否则提示并拒绝
    fn require_workspace(&mut self) -> bool {
        if !self.require_session() {
            return false;
        }
        if self.teams.selected_id().is_some() {
            true
        } else {
            self.show_error("Select a workspace first (press w)");
            false
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::sample_task;
    use chrono::{Duration as ChronoDuration, Utc};

    #[test]
    fn test_mode_cycle() {
        let mut mode = AppMode::Board;
        for _ in 0..AppMode::all().len() {
            mode = mode.next();
        }
        assert_eq!(mode, AppMode::Board);
    }

    #[test]
    fn test_history_search_matches_title_and_description() {
        let mut history = HistoryState::default();
        let mut a = sample_task("Fix login", TaskStatus::Todo);
        a.description = Some("oauth flow".to_string());
        let b = sample_task("Write docs", TaskStatus::Todo);

        history.search_query = "oauth".to_string();
        let visible = history.visible_tasks(&[a.clone(), b.clone()]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, a.id);

        history.search_query = "WRITE".to_string();
        let visible = history.visible_tasks(&[a, b.clone()]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, b.id);
    }

    #[test]
    fn test_history_status_filter_cycles_back_to_all() {
        let mut history = HistoryState::default();
        assert_eq!(history.status_filter, None);
        for _ in 0..5 {
            history.cycle_filter();
        }
        assert_eq!(history.status_filter, None);

        history.status_filter = Some(TaskStatus::Completed);
        let tasks = vec![
            sample_task("a", TaskStatus::Todo),
            sample_task("b", TaskStatus::Completed),
        ];
        let visible = history.visible_tasks(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].status, TaskStatus::Completed);
    }

    #[test]
    fn test_history_sort_due_date_puts_undated_last() {
        let mut history = HistoryState::default();
        history.sort = SortBy::DueDate;

        let mut early = sample_task("early", TaskStatus::Todo);
        early.due_date = Some(Utc::now());
        let mut late = sample_task("late", TaskStatus::Todo);
        late.due_date = Some(Utc::now() + ChronoDuration::days(7));
        let undated = sample_task("undated", TaskStatus::Todo);

        let visible = history.visible_tasks(&[undated.clone(), late.clone(), early.clone()]);
        assert_eq!(visible[0].id, early.id);
        assert_eq!(visible[1].id, late.id);
        assert_eq!(visible[2].id, undated.id);
    }

    #[test]
    fn test_history_default_sort_is_newest_first() {
        let mut old = sample_task("old", TaskStatus::Todo);
        old.created_at = Utc::now() - ChronoDuration::days(3);
        let new = sample_task("new", TaskStatus::Todo);

        let history = HistoryState::default();
        let visible = history.visible_tasks(&[old.clone(), new.clone()]);
        assert_eq!(visible[0].id, new.id);
        assert_eq!(visible[1].id, old.id);
    }
}
