//! 团队（workspace）状态管理
//!
//! 持有当前用户可见的团队列表、选中项和成员列表。成员关系以
//! team_members 表为准：加载流程是两步查询（成员行 → 按 id 取团队/
//! 资料），由 operations::teams 在后台线程完成，结果经 mpsc 送回。

use std::sync::mpsc;

use uuid::Uuid;

use crate::model::{Team, TeamMember};

/// 后台线程送回的结果消息
#[derive(Debug)]
pub enum TeamsMsg {
    /// 团队列表加载完成
    TeamsLoaded {
        epoch: u64,
        result: Result<Vec<Team>, String>,
    },
    /// 成员列表加载完成
    MembersLoaded {
        epoch: u64,
        team_id: Uuid,
        result: Result<Vec<TeamMember>, String>,
    },
}

/// 待派发的团队列表加载请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamsRequest {
    pub epoch: u64,
}

/// 待派发的成员列表加载请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembersRequest {
    pub team_id: Uuid,
    pub epoch: u64,
}

/// 应用一条消息后的结果
#[derive(Debug, PartialEq)]
pub enum TeamsOutcome {
    /// 过期消息，未触碰状态
    Ignored,
    /// 团队列表已替换；selection_changed 表示选中团队发生了变化，
    /// 调用方需要切换任务缓存键
    Loaded { selection_changed: bool },
    /// 团队列表加载失败
    LoadFailed(String),
    /// 成员列表已替换
    Members,
    /// 成员列表加载失败
    MembersFailed(String),
}

/// 团队状态
#[derive(Debug)]
pub struct TeamsState {
    /// 可见团队（按创建时间升序）
    pub teams: Vec<Team>,
    /// 选中团队 id
    selected: Option<Uuid>,
    /// 团队列表加载中
    pub loading: bool,
    /// 当前选中团队的成员（Members 页）
    pub members: Vec<TeamMember>,
    /// 成员列表加载中
    pub members_loading: bool,
    /// 请求序号，过期结果按它丢弃
    epoch: u64,
    tx: mpsc::Sender<TeamsMsg>,
    rx: mpsc::Receiver<TeamsMsg>,
}

impl TeamsState {
    /// 创建空状态
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            teams: Vec::new(),
            selected: None,
            loading: false,
            members: Vec::new(),
            members_loading: false,
            epoch: 0,
            tx,
            rx,
        }
    }

    /// 带初始选中项的状态（会话里记忆的团队）
    pub fn with_selected(selected: Option<Uuid>) -> Self {
        let mut state = Self::new();
        state.selected = selected;
        state
    }

    /// 给后台线程用的发送端
    pub fn sender(&self) -> mpsc::Sender<TeamsMsg> {
        self.tx.clone()
    }

    /// 选中团队 id
    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    /// 选中团队
    pub fn selected_team(&self) -> Option<&Team> {
        let id = self.selected?;
        self.teams.iter().find(|t| t.id == id)
    }

    /// 发起团队列表加载
    pub fn begin_load(&mut self) -> TeamsRequest {
        self.epoch += 1;
        self.loading = true;
        TeamsRequest { epoch: self.epoch }
    }

    /// 发起成员列表加载（未选团队时返回 None）
    pub fn begin_load_members(&mut self) -> Option<MembersRequest> {
        let team_id = self.selected?;
        self.epoch += 1;
        self.members_loading = true;
        Some(MembersRequest {
            team_id,
            epoch: self.epoch,
        })
    }

    /// 手动选中一个团队；返回选中项是否变化
    pub fn select(&mut self, team_id: Uuid) -> bool {
        if !self.teams.iter().any(|t| t.id == team_id) {
            return false;
        }
        let changed = self.selected != Some(team_id);
        self.selected = Some(team_id);
        if changed {
            self.members.clear();
        }
        changed
    }

    /// 取一条后台消息并应用（每帧轮询）
    pub fn poll(&mut self) -> Option<TeamsOutcome> {
        let msg = self.rx.try_recv().ok()?;
        Some(self.apply(msg))
    }

    /// 应用一条后台结果消息
    pub fn apply(&mut self, msg: TeamsMsg) -> TeamsOutcome {
        match msg {
            TeamsMsg::TeamsLoaded { epoch, result } => {
                if epoch != self.epoch {
                    return TeamsOutcome::Ignored;
                }
                self.loading = false;
                match result {
                    Ok(teams) => {
                        self.teams = teams;
                        let selection_changed = self.ensure_selection();
                        TeamsOutcome::Loaded { selection_changed }
                    }
                    Err(e) => {
                        // 列表清空，选中项随之清掉；错误照常上报
                        self.teams.clear();
                        self.ensure_selection();
                        TeamsOutcome::LoadFailed(e)
                    }
                }
            }
            TeamsMsg::MembersLoaded {
                epoch,
                team_id,
                result,
            } => {
                if epoch != self.epoch || self.selected != Some(team_id) {
                    return TeamsOutcome::Ignored;
                }
                self.members_loading = false;
                match result {
                    Ok(members) => {
                        self.members = members;
                        TeamsOutcome::Members
                    }
                    Err(e) => {
                        self.members.clear();
                        TeamsOutcome::MembersFailed(e)
                    }
                }
            }
        }
    }

    /// 校正选中项：仍在列表里则保持，否则退到第一个团队或 None。
    /// 返回选中项是否变化。
    fn ensure_selection(&mut self) -> bool {
        let still_present = self
            .selected
            .map(|id| self.teams.iter().any(|t| t.id == id))
            .unwrap_or(false);

        let new_selected = if still_present {
            self.selected
        } else {
            self.teams.first().map(|t| t.id)
        };

        let changed = new_selected != self.selected;
        self.selected = new_selected;
        if changed {
            self.members.clear();
        }
        changed
    }
}

impl Default for TeamsState {
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
    use chrono::Utc;

    fn team(name: &str) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_load_selects_first_team_by_default() {
        let mut state = TeamsState::new();
        let req = state.begin_load();
        let teams = vec![team("alpha"), team("beta")];
        let first_id = teams[0].id;

        let outcome = state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(teams),
        });
        assert_eq!(
            outcome,
            TeamsOutcome::Loaded {
                selection_changed: true
            }
        );
        assert_eq!(state.selected_id(), Some(first_id));
    }

    #[test]
    fn test_reload_keeps_selection_when_team_survives() {
        let mut state = TeamsState::new();
        let teams = vec![team("alpha"), team("beta")];
        let second_id = teams[1].id;

        let req = state.begin_load();
        state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(teams.clone()),
        });
        assert!(state.select(second_id));

        let req = state.begin_load();
        let outcome = state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(teams),
        });
        assert_eq!(
            outcome,
            TeamsOutcome::Loaded {
                selection_changed: false
            }
        );
        assert_eq!(state.selected_id(), Some(second_id));
    }

    #[test]
    fn test_reload_falls_back_when_selected_team_deleted() {
        let mut state = TeamsState::new();
        let teams = vec![team("alpha"), team("beta")];
        let first_id = teams[0].id;
        let second_id = teams[1].id;

        let req = state.begin_load();
        state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(teams.clone()),
        });
        state.select(second_id);

        // beta 被删掉后重载
        let req = state.begin_load();
        let outcome = state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(vec![teams[0].clone()]),
        });
        assert_eq!(
            outcome,
            TeamsOutcome::Loaded {
                selection_changed: true
            }
        );
        assert_eq!(state.selected_id(), Some(first_id));
    }

    #[test]
    fn test_load_failure_clears_everything() {
        let mut state = TeamsState::new();
        let req = state.begin_load();
        state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(vec![team("alpha")]),
        });

        let req = state.begin_load();
        let outcome = state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Err("offline".to_string()),
        });
        assert_eq!(outcome, TeamsOutcome::LoadFailed("offline".to_string()));
        assert!(state.teams.is_empty());
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn test_stale_epoch_ignored() {
        let mut state = TeamsState::new();
        let old = state.begin_load();
        let _new = state.begin_load();

        let outcome = state.apply(TeamsMsg::TeamsLoaded {
            epoch: old.epoch,
            result: Ok(vec![team("stale")]),
        });
        assert_eq!(outcome, TeamsOutcome::Ignored);
        assert!(state.teams.is_empty());
    }

    #[test]
    fn test_members_require_matching_team() {
        let mut state = TeamsState::new();
        let req = state.begin_load();
        let teams = vec![team("alpha"), team("beta")];
        let beta_id = teams[1].id;
        state.apply(TeamsMsg::TeamsLoaded {
            epoch: req.epoch,
            result: Ok(teams),
        });

        let members_req = state.begin_load_members().unwrap();

        // 加载期间用户切到了另一个团队
        state.select(beta_id);
        let outcome = state.apply(TeamsMsg::MembersLoaded {
            epoch: members_req.epoch,
            team_id: members_req.team_id,
            result: Ok(Vec::new()),
        });
        assert_eq!(outcome, TeamsOutcome::Ignored);
    }
}
