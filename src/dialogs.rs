//! 对话框状态管理
//!
//! 管理所有 TUI 对话框的显示状态和数据。

// 从 ui/components 导入对话框数据类型
pub use crate::ui::components::add_task_dialog::{AddTaskData, AddTaskField};
pub use crate::ui::components::confirm_dialog::ConfirmType;
pub use crate::ui::components::invite_dialog::InviteData;
pub use crate::ui::components::new_team_dialog::NewTeamData;
pub use crate::ui::components::profile_dialog::{ProfileData, ProfileField};
pub use crate::ui::components::team_switcher::TeamSwitcherData;

/// 对话框状态
#[derive(Debug, Default)]
pub struct DialogState {
    /// Add Task 弹窗
    pub add_task: Option<AddTaskData>,
    /// New Workspace 弹窗
    pub new_team: Option<NewTeamData>,
    /// Invite Member 弹窗
    pub invite: Option<InviteData>,
    /// Edit Profile 弹窗
    pub profile: Option<ProfileData>,
    /// Workspace 切换器
    pub team_switcher: Option<TeamSwitcherData>,
    /// 确认弹窗
    pub confirm: Option<ConfirmType>,
    /// 帮助面板
    pub show_help: bool,
}

impl DialogState {
    /// 创建新的对话框状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 关闭所有对话框
    pub fn close_all(&mut self) {
        self.add_task = None;
        self.new_team = None;
        self.invite = None;
        self.profile = None;
        self.team_switcher = None;
        self.confirm = None;
        self.show_help = false;
    }

    /// 检查是否有活跃的对话框
    pub fn has_active_dialog(&self) -> bool {
        self.add_task.is_some()
            || self.new_team.is_some()
            || self.invite.is_some()
            || self.profile.is_some()
            || self.team_switcher.is_some()
            || self.confirm.is_some()
            || self.show_help
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_new_creates_empty_state() {
        let state = DialogState::new();
        assert!(!state.has_active_dialog());
        assert!(state.add_task.is_none());
        assert!(state.confirm.is_none());
    }

    #[test]
    fn test_close_all_clears_all_dialogs() {
        let mut state = DialogState::new();
        state.add_task = Some(AddTaskData::new());
        state.invite = Some(InviteData::new());
        state.show_help = true;
        state.confirm = Some(ConfirmType::DeleteTask {
            task_id: Uuid::new_v4(),
            title: "Test".to_string(),
        });
        assert!(state.has_active_dialog());

        state.close_all();
        assert!(!state.has_active_dialog());
        assert!(state.add_task.is_none());
        assert!(state.invite.is_none());
        assert!(state.confirm.is_none());
        assert!(!state.show_help);
    }
}
