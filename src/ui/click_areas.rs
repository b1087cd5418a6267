use ratatui::layout::Rect;
use uuid::Uuid;

use crate::app::AppMode;
use crate::model::TaskStatus;

/// 每帧渲染时缓存的可点击区域
#[derive(Debug, Default, Clone)]
pub struct ClickAreas {
    /// 任务卡片 (区域, 任务 id, 所在列)
    pub task_cards: Vec<(Rect, Uuid, TaskStatus)>,
    /// 列的整体区域（拖拽落点判定）
    pub column_zones: Vec<(Rect, TaskStatus)>,
    /// 顶部 Tab (区域, 模式)
    pub mode_tabs: Vec<(Rect, AppMode)>,
    /// Header 中团队名区域（点击打开切换器）
    pub team_name_area: Option<Rect>,
    /// History 表格行 (区域, 行索引)
    pub history_rows: Vec<(Rect, usize)>,
    /// Members 列表行 (区域, 行索引)
    pub member_rows: Vec<(Rect, usize)>,
}

impl ClickAreas {
    pub fn reset(&mut self) {
        self.task_cards.clear();
        self.column_zones.clear();
        self.mode_tabs.clear();
        self.team_name_area = None;
        self.history_rows.clear();
        self.member_rows.clear();
    }

    /// 坐标下的任务卡片
    pub fn card_at(&self, col: u16, row: u16) -> Option<(Uuid, TaskStatus)> {
        self.task_cards
            .iter()
            .find(|(rect, _, _)| contains(rect, col, row))
            .map(|(_, id, status)| (*id, *status))
    }

    /// 坐标下的列
    pub fn column_at(&self, col: u16, row: u16) -> Option<TaskStatus> {
        self.column_zones
            .iter()
            .find(|(rect, _)| contains(rect, col, row))
            .map(|(_, status)| *status)
    }
}

/// 检查坐标 (col, row) 是否在 Rect 内
pub fn contains(rect: &Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(contains(&rect, 2, 3));
        assert!(contains(&rect, 5, 4));
        assert!(!contains(&rect, 6, 3));
        assert!(!contains(&rect, 2, 5));
    }

    #[test]
    fn test_card_and_column_lookup() {
        let mut areas = ClickAreas::default();
        let id = Uuid::new_v4();
        areas
            .task_cards
            .push((Rect::new(0, 0, 10, 4), id, TaskStatus::Todo));
        areas
            .column_zones
            .push((Rect::new(0, 0, 10, 20), TaskStatus::Todo));
        areas
            .column_zones
            .push((Rect::new(10, 0, 10, 20), TaskStatus::InProgress));

        assert_eq!(areas.card_at(5, 2), Some((id, TaskStatus::Todo)));
        assert_eq!(areas.card_at(5, 10), None);
        assert_eq!(areas.column_at(15, 5), Some(TaskStatus::InProgress));
        assert_eq!(areas.column_at(25, 5), None);

        areas.reset();
        assert!(areas.task_cards.is_empty());
        assert!(areas.column_zones.is_empty());
    }
}
