//! 拖拽状态管理
//!
//! 把一次鼠标拖拽手势翻译成至多一次任务移动。按下卡片进入 Dragging，
//! 松开时无论落点如何都回到 Idle；只有落在另一列上才产生移动。

use uuid::Uuid;

use crate::model::TaskStatus;

/// 拖拽状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// 未拖拽
    #[default]
    Idle,
    /// 拖拽中（携带被拖任务及其起始列）
    Dragging { task_id: Uuid, from: TaskStatus },
}

/// 一次手势的结局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// 未在拖拽 / 落点不在任何列上 / 落回原列：不产生变更
    Cancelled,
    /// 恰好一次移动
    Move { task_id: Uuid, to: TaskStatus },
}

impl DragState {
    /// 按下卡片，开始拖拽
    pub fn start(&mut self, task_id: Uuid, from: TaskStatus) {
        *self = DragState::Dragging { task_id, from };
    }

    /// 是否正在拖拽该任务（渲染高亮用）
    pub fn is_dragging(&self, task_id: Uuid) -> bool {
        matches!(self, DragState::Dragging { task_id: id, .. } if *id == task_id)
    }

    /// 拖拽中的任务
    pub fn dragging(&self) -> Option<Uuid> {
        match self {
            DragState::Dragging { task_id, .. } => Some(*task_id),
            DragState::Idle => None,
        }
    }

    /// 松开：结束手势并判定结局。`target` 为落点所在列（不在任何列上
    /// 时为 None）。无论结局如何，状态都回到 Idle。
    pub fn drop_on(&mut self, target: Option<TaskStatus>) -> DropOutcome {
        let state = std::mem::take(self);
        match (state, target) {
            (DragState::Dragging { task_id, from }, Some(to)) if from != to => {
                DropOutcome::Move { task_id, to }
            }
            _ => DropOutcome::Cancelled,
        }
    }

    /// 取消手势（Esc / 焦点丢失）
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_on_other_column_moves_once() {
        let mut drag = DragState::default();
        let id = Uuid::new_v4();

        drag.start(id, TaskStatus::Todo);
        assert!(drag.is_dragging(id));

        let outcome = drag.drop_on(Some(TaskStatus::InProgress));
        assert_eq!(
            outcome,
            DropOutcome::Move {
                task_id: id,
                to: TaskStatus::InProgress
            }
        );
        // 手势结束后回到 Idle，再松开不会产生第二次移动
        assert_eq!(drag, DragState::Idle);
        assert_eq!(drag.drop_on(Some(TaskStatus::Completed)), DropOutcome::Cancelled);
    }

    #[test]
    fn test_drop_on_source_column_is_cancelled() {
        let mut drag = DragState::default();
        let id = Uuid::new_v4();

        drag.start(id, TaskStatus::InReview);
        assert_eq!(drag.drop_on(Some(TaskStatus::InReview)), DropOutcome::Cancelled);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drop_outside_any_column_is_cancelled() {
        let mut drag = DragState::default();
        drag.start(Uuid::new_v4(), TaskStatus::Todo);
        assert_eq!(drag.drop_on(None), DropOutcome::Cancelled);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drop_without_drag_is_cancelled() {
        let mut drag = DragState::default();
        assert_eq!(drag.drop_on(Some(TaskStatus::Todo)), DropOutcome::Cancelled);
    }

    #[test]
    fn test_cancel_resets() {
        let mut drag = DragState::default();
        let id = Uuid::new_v4();
        drag.start(id, TaskStatus::Todo);
        drag.cancel();
        assert_eq!(drag, DragState::Idle);
        assert!(!drag.is_dragging(id));
    }
}
