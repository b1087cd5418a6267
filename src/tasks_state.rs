//! 任务缓存状态管理
//!
//! 当前 (user, team) 键下任务列表的唯一客户端事实来源。所有变更走
//! 乐观更新协议：先同步改快照，后台线程再落库，失败回滚到移动前的
//! 快照。状态机本身不做 I/O：线程派发在 app.rs，结果消息从 mpsc
//! 通道送回，便于用模拟消息直接测试。
//!
//! 序列化约定：每次乐观写和每次切键都会递增 epoch，后台结果消息带着
//! 发起时的 (key, epoch)，不匹配的消息整条丢弃。由此保证"最新的乐观
//! 写永远不会被更早发起的在途读覆盖"，切换团队后旧键的结果也写不进
//! 新键的缓存。

use std::sync::mpsc;

use uuid::Uuid;

use crate::model::{Task, TaskStatus};

/// 缓存键：(用户, 团队)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheKey {
    pub user_id: Uuid,
    pub team_id: Uuid,
}

/// 同步状态机
#[derive(Debug, Clone, PartialEq)]
pub enum SyncState {
    /// 无在途写
    Idle,
    /// 乐观写在途，保留移动前快照用于回滚（只保留最近一份）
    OptimisticPending { snapshot: Vec<Task> },
    /// 写已成功，等待对账 fetch 回来
    Reconciling,
}

/// 后台线程送回的结果消息
#[derive(Debug)]
pub enum TasksMsg {
    /// 拉取完成（含对账 fetch）
    FetchDone {
        key: CacheKey,
        epoch: u64,
        result: Result<Vec<Task>, String>,
    },
    /// 状态写入完成
    WriteDone {
        key: CacheKey,
        epoch: u64,
        result: Result<(), String>,
    },
}

/// 待派发的拉取请求（app.rs 负责起线程）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: CacheKey,
    pub epoch: u64,
}

/// 待派发的状态写请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub key: CacheKey,
    pub epoch: u64,
    pub task_id: Uuid,
    pub new_status: TaskStatus,
}

/// 应用一条消息后的结果，告诉调用方接下来做什么
#[derive(Debug, PartialEq)]
pub enum ApplyOutcome {
    /// 过期消息（epoch 或 key 不匹配），未触碰缓存
    Ignored,
    /// 拉取成功，缓存已替换
    Loaded,
    /// 拉取失败，缓存清空，错误待提示
    LoadFailed(String),
    /// 写成功，调用方应派发对账 fetch
    Reconcile(FetchRequest),
    /// 写失败，已回滚到移动前快照，错误待提示
    RolledBack(String),
}

/// 任务缓存状态
#[derive(Debug)]
pub struct TasksState {
    /// 当前缓存键（未选团队时为 None）
    key: Option<CacheKey>,
    /// 任务快照（按后端返回顺序）
    pub tasks: Vec<Task>,
    /// 初始拉取进行中
    pub loading: bool,
    /// 同步状态机
    sync: SyncState,
    /// 写/切键序号，结果消息按它判新旧
    epoch: u64,
    /// 后台结果通道
    tx: mpsc::Sender<TasksMsg>,
    rx: mpsc::Receiver<TasksMsg>,
}

impl TasksState {
    /// 创建空缓存
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            key: None,
            tasks: Vec::new(),
            loading: false,
            sync: SyncState::Idle,
            epoch: 0,
            tx,
            rx,
        }
    }

    /// 当前缓存键
    pub fn key(&self) -> Option<CacheKey> {
        self.key
    }

    /// 当前同步状态（只读）
    pub fn sync(&self) -> &SyncState {
        &self.sync
    }

    /// 给后台线程用的发送端
    pub fn sender(&self) -> mpsc::Sender<TasksMsg> {
        self.tx.clone()
    }

    /// 切换缓存键。旧键的在途结果自此全部失效；返回新键的拉取请求。
    pub fn set_key(&mut self, key: Option<CacheKey>) -> Option<FetchRequest> {
        self.key = key;
        self.epoch += 1;
        self.tasks.clear();
        self.sync = SyncState::Idle;
        self.loading = key.is_some();

        key.map(|key| FetchRequest {
            key,
            epoch: self.epoch,
        })
    }

    /// 手动刷新当前键
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let key = self.key?;
        self.epoch += 1;
        self.loading = self.tasks.is_empty();
        self.sync = SyncState::Idle;
        Some(FetchRequest {
            key,
            epoch: self.epoch,
        })
    }

    /// 乐观移动：同步更新快照并返回待派发的写请求。
    ///
    /// 任务不存在或已在目标列时返回 None（不发写请求）。快照在写发起
    /// 前捕获，只保留最近一份。
    pub fn begin_move(&mut self, task_id: Uuid, new_status: TaskStatus) -> Option<MoveRequest> {
        let key = self.key?;

        let task = self.tasks.iter().find(|t| t.id == task_id)?;
        if task.status == new_status {
            return None;
        }

        // 捕获移动前快照，再同步应用乐观状态
        let snapshot = self.tasks.clone();
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.status = new_status;
        }

        self.epoch += 1;
        self.sync = SyncState::OptimisticPending { snapshot };

        Some(MoveRequest {
            key,
            epoch: self.epoch,
            task_id,
            new_status,
        })
    }

    /// 取一条后台消息并应用（每帧轮询）
    pub fn poll(&mut self) -> Option<ApplyOutcome> {
        let msg = self.rx.try_recv().ok()?;
        Some(self.apply(msg))
    }

    /// 应用一条后台结果消息
    pub fn apply(&mut self, msg: TasksMsg) -> ApplyOutcome {
        match msg {
            TasksMsg::FetchDone { key, epoch, result } => {
                if !self.is_current(key, epoch) {
                    return ApplyOutcome::Ignored;
                }
                self.loading = false;
                self.sync = SyncState::Idle;
                match result {
                    Ok(tasks) => {
                        self.tasks = tasks;
                        ApplyOutcome::Loaded
                    }
                    Err(e) => {
                        // 读失败：缓存回到"无数据"态
                        self.tasks.clear();
                        ApplyOutcome::LoadFailed(e)
                    }
                }
            }
            TasksMsg::WriteDone { key, epoch, result } => {
                if !self.is_current(key, epoch) {
                    return ApplyOutcome::Ignored;
                }
                match result {
                    Ok(()) => {
                        // 写成功：丢弃回滚快照，进入对账
                        self.sync = SyncState::Reconciling;
                        ApplyOutcome::Reconcile(FetchRequest { key, epoch })
                    }
                    Err(e) => {
                        // 写失败：回滚到移动前快照，不自动重试。没有待回滚
                        // 快照（重复送达）就什么都不做，失败只上报一次。
                        if let SyncState::OptimisticPending { snapshot } =
                            std::mem::replace(&mut self.sync, SyncState::Idle)
                        {
                            self.tasks = snapshot;
                            ApplyOutcome::RolledBack(e)
                        } else {
                            ApplyOutcome::Ignored
                        }
                    }
                }
            }
        }
    }

    /// 消息是否属于当前键和最新 epoch
    fn is_current(&self, key: CacheKey, epoch: u64) -> bool {
        self.key == Some(key) && self.epoch == epoch
    }
}

impl Default for TasksState {
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
    use crate::model::project_columns;
    use crate::model::task::sample_task;

    fn state_with(tasks: Vec<Task>) -> (TasksState, CacheKey, FetchRequest) {
        let key = CacheKey {
            user_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
        };
        let mut state = TasksState::new();
        let fetch = state.set_key(Some(key)).unwrap();
        let outcome = state.apply(TasksMsg::FetchDone {
            key,
            epoch: fetch.epoch,
            result: Ok(tasks),
        });
        assert_eq!(outcome, ApplyOutcome::Loaded);
        (state, key, fetch)
    }

    #[test]
    fn test_fetch_replaces_cache() {
        let (state, _, _) = state_with(vec![sample_task("a", TaskStatus::Todo)]);
        assert_eq!(state.tasks.len(), 1);
        assert!(!state.loading);
        assert_eq!(*state.sync(), SyncState::Idle);
    }

    #[test]
    fn test_fetch_failure_leaves_empty_cache() {
        let key = CacheKey {
            user_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
        };
        let mut state = TasksState::new();
        let fetch = state.set_key(Some(key)).unwrap();
        assert!(state.loading);

        let outcome = state.apply(TasksMsg::FetchDone {
            key,
            epoch: fetch.epoch,
            result: Err("boom".to_string()),
        });
        assert_eq!(outcome, ApplyOutcome::LoadFailed("boom".to_string()));
        assert!(state.tasks.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_move_applies_optimistically_before_write_resolves() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, key, _) = state_with(vec![task]);

        let req = state.begin_move(id, TaskStatus::InProgress).unwrap();
        assert_eq!(req.key, key);
        assert_eq!(req.new_status, TaskStatus::InProgress);

        // 写还没回来，界面已经看到新列
        assert_eq!(state.tasks[0].status, TaskStatus::InProgress);
        assert!(matches!(state.sync(), SyncState::OptimisticPending { .. }));
    }

    #[test]
    fn test_successful_move_reconciles_to_server_state() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, key, _) = state_with(vec![task.clone()]);

        let req = state.begin_move(id, TaskStatus::InProgress).unwrap();
        let outcome = state.apply(TasksMsg::WriteDone {
            key,
            epoch: req.epoch,
            result: Ok(()),
        });
        let reconcile = match outcome {
            ApplyOutcome::Reconcile(f) => f,
            other => panic!("expected Reconcile, got {:?}", other),
        };
        assert_eq!(*state.sync(), SyncState::Reconciling);

        // 对账 fetch 带回服务端事实
        let mut server_task = task;
        server_task.status = TaskStatus::InProgress;
        let outcome = state.apply(TasksMsg::FetchDone {
            key,
            epoch: reconcile.epoch,
            result: Ok(vec![server_task]),
        });
        assert_eq!(outcome, ApplyOutcome::Loaded);
        assert_eq!(state.tasks[0].status, TaskStatus::InProgress);

        let columns = project_columns(&state.tasks);
        assert!(columns[0].is_empty());
        assert_eq!(columns[1].tasks[0].id, id);
    }

    #[test]
    fn test_failed_move_rolls_back_byte_for_byte() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, key, _) = state_with(vec![task]);
        let before = state.tasks.clone();

        let req = state.begin_move(id, TaskStatus::InProgress).unwrap();
        assert_ne!(state.tasks, before);

        let outcome = state.apply(TasksMsg::WriteDone {
            key,
            epoch: req.epoch,
            result: Err("row policy rejected".to_string()),
        });
        assert_eq!(
            outcome,
            ApplyOutcome::RolledBack("row policy rejected".to_string())
        );
        assert_eq!(state.tasks, before);
        assert_eq!(*state.sync(), SyncState::Idle);

        let columns = project_columns(&state.tasks);
        assert_eq!(columns[0].tasks[0].id, id);
        assert!(columns[1].is_empty());
    }

    #[test]
    fn test_move_to_current_column_issues_no_write() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, _, _) = state_with(vec![task]);

        assert!(state.begin_move(id, TaskStatus::Todo).is_none());
        assert_eq!(*state.sync(), SyncState::Idle);
    }

    #[test]
    fn test_move_of_unknown_task_is_noop() {
        let (mut state, _, _) = state_with(vec![sample_task("t1", TaskStatus::Todo)]);
        let before = state.tasks.clone();

        assert!(state
            .begin_move(Uuid::new_v4(), TaskStatus::Completed)
            .is_none());
        assert_eq!(state.tasks, before);
    }

    #[test]
    fn test_stale_fetch_does_not_clobber_newer_move() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, key, first_fetch) = state_with(vec![task.clone()]);

        // 刷新发出一个在途读
        let stale_fetch = state.refresh().unwrap();
        assert_ne!(stale_fetch.epoch, first_fetch.epoch);

        // 读还没回来，用户先移动了任务
        let req = state.begin_move(id, TaskStatus::InReview).unwrap();
        assert!(req.epoch > stale_fetch.epoch);

        // 旧读带着旧状态回来，必须被丢弃
        let outcome = state.apply(TasksMsg::FetchDone {
            key,
            epoch: stale_fetch.epoch,
            result: Ok(vec![task]),
        });
        assert_eq!(outcome, ApplyOutcome::Ignored);
        assert_eq!(state.tasks[0].status, TaskStatus::InReview);
    }

    #[test]
    fn test_second_move_supersedes_first() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, key, _) = state_with(vec![task]);

        let first = state.begin_move(id, TaskStatus::InProgress).unwrap();
        let second = state.begin_move(id, TaskStatus::Completed).unwrap();
        assert!(second.epoch > first.epoch);

        // 第一个写的结果（无论成败）都已过期
        let outcome = state.apply(TasksMsg::WriteDone {
            key,
            epoch: first.epoch,
            result: Err("late failure".to_string()),
        });
        assert_eq!(outcome, ApplyOutcome::Ignored);
        assert_eq!(state.tasks[0].status, TaskStatus::Completed);

        // 第二个写正常走完
        let outcome = state.apply(TasksMsg::WriteDone {
            key,
            epoch: second.epoch,
            result: Ok(()),
        });
        assert!(matches!(outcome, ApplyOutcome::Reconcile(_)));
    }

    #[test]
    fn test_rollback_failure_is_surfaced_exactly_once() {
        let task = sample_task("t1", TaskStatus::Todo);
        let id = task.id;
        let (mut state, key, _) = state_with(vec![task]);

        let req = state.begin_move(id, TaskStatus::InProgress).unwrap();
        let mut notifications = 0;
        for _ in 0..2 {
            let outcome = state.apply(TasksMsg::WriteDone {
                key,
                epoch: req.epoch,
                result: Err("boom".to_string()),
            });
            if matches!(outcome, ApplyOutcome::RolledBack(_)) {
                notifications += 1;
            }
        }
        // 重复送达的失败消息不会再次回滚/提示
        assert_eq!(notifications, 1);
    }

    #[test]
    fn test_switching_key_invalidates_inflight_results() {
        let task = sample_task("t1", TaskStatus::Todo);
        let (mut state, old_key, old_fetch) = state_with(vec![task.clone()]);

        let new_key = CacheKey {
            user_id: old_key.user_id,
            team_id: Uuid::new_v4(),
        };
        let new_fetch = state.set_key(Some(new_key)).unwrap();
        assert!(state.tasks.is_empty());

        // 旧键的在途读不得写入新键缓存
        let outcome = state.apply(TasksMsg::FetchDone {
            key: old_key,
            epoch: old_fetch.epoch,
            result: Ok(vec![task]),
        });
        assert_eq!(outcome, ApplyOutcome::Ignored);
        assert!(state.tasks.is_empty());

        // 新键数据正常落地，看板内容整体替换
        let other_team_task = sample_task("t2", TaskStatus::Todo);
        let outcome = state.apply(TasksMsg::FetchDone {
            key: new_key,
            epoch: new_fetch.epoch,
            result: Ok(vec![other_team_task.clone()]),
        });
        assert_eq!(outcome, ApplyOutcome::Loaded);
        assert_eq!(state.tasks, vec![other_team_task]);
    }

    #[test]
    fn test_clearing_key_stops_fetches() {
        let (mut state, _, _) = state_with(vec![sample_task("t1", TaskStatus::Todo)]);
        assert!(state.set_key(None).is_none());
        assert!(state.tasks.is_empty());
        assert!(!state.loading);
        assert!(state.refresh().is_none());
    }

    #[test]
    fn test_poll_drains_channel() {
        let (mut state, key, _) = state_with(Vec::new());
        let fetch = state.refresh().unwrap();

        let tx = state.sender();
        tx.send(TasksMsg::FetchDone {
            key,
            epoch: fetch.epoch,
            result: Ok(vec![sample_task("a", TaskStatus::Todo)]),
        })
        .unwrap();

        assert_eq!(state.poll(), Some(ApplyOutcome::Loaded));
        assert_eq!(state.poll(), None);
        assert_eq!(state.tasks.len(), 1);
    }
}
