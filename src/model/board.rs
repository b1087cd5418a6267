//! 看板投影
//!
//! 将扁平的任务快照投影为固定顺序的四列。纯函数：相同快照永远得到
//! 相同的列，不做 I/O，不重排序（保持缓存内的顺序）。

use super::task::{Task, TaskStatus};

/// 看板列的种类（与 TaskStatus 一一对应，固定顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Todo,
    InProgress,
    InReview,
    Completed,
}

impl ColumnKind {
    /// 固定列顺序
    pub fn all() -> &'static [ColumnKind] {
        &[
            ColumnKind::Todo,
            ColumnKind::InProgress,
            ColumnKind::InReview,
            ColumnKind::Completed,
        ]
    }

    /// 状态对应的列
    pub fn from_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => ColumnKind::Todo,
            TaskStatus::InProgress => ColumnKind::InProgress,
            TaskStatus::InReview => ColumnKind::InReview,
            TaskStatus::Completed => ColumnKind::Completed,
        }
    }

    /// 对应的任务状态
    pub fn status(&self) -> TaskStatus {
        match self {
            ColumnKind::Todo => TaskStatus::Todo,
            ColumnKind::InProgress => TaskStatus::InProgress,
            ColumnKind::InReview => TaskStatus::InReview,
            ColumnKind::Completed => TaskStatus::Completed,
        }
    }

    /// 列标题
    pub fn title(&self) -> &'static str {
        self.status().label()
    }
}

/// 一列：状态 + 按缓存顺序排列的任务
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub kind: ColumnKind,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// 把任务快照投影为四列（空列也会输出）
pub fn project_columns(tasks: &[Task]) -> [Column; 4] {
    let mut columns = [
        Column { kind: ColumnKind::Todo, tasks: Vec::new() },
        Column { kind: ColumnKind::InProgress, tasks: Vec::new() },
        Column { kind: ColumnKind::InReview, tasks: Vec::new() },
        Column { kind: ColumnKind::Completed, tasks: Vec::new() },
    ];

    for task in tasks {
        let idx = match task.status {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::InReview => 2,
            TaskStatus::Completed => 3,
        };
        columns[idx].tasks.push(task.clone());
    }

    columns
}

/// 各列任务数（看板头部统计）
pub fn status_counts(tasks: &[Task]) -> [usize; 4] {
    let columns = project_columns(tasks);
    [
        columns[0].len(),
        columns[1].len(),
        columns[2].len(),
        columns[3].len(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::sample_task;

    #[test]
    fn test_empty_snapshot_emits_four_empty_columns() {
        let columns = project_columns(&[]);
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|c| c.is_empty()));
        assert_eq!(columns[0].kind, ColumnKind::Todo);
        assert_eq!(columns[3].kind, ColumnKind::Completed);
    }

    #[test]
    fn test_projection_groups_by_status_in_cache_order() {
        let a = sample_task("a", TaskStatus::Todo);
        let b = sample_task("b", TaskStatus::InProgress);
        let c = sample_task("c", TaskStatus::Todo);
        let tasks = vec![a.clone(), b.clone(), c.clone()];

        let columns = project_columns(&tasks);
        assert_eq!(columns[0].tasks, vec![a, c]);
        assert_eq!(columns[1].tasks, vec![b]);
        assert!(columns[2].is_empty());
        assert!(columns[3].is_empty());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let tasks = vec![
            sample_task("x", TaskStatus::InReview),
            sample_task("y", TaskStatus::Completed),
        ];
        assert_eq!(project_columns(&tasks), project_columns(&tasks));
    }

    #[test]
    fn test_status_counts() {
        let tasks = vec![
            sample_task("a", TaskStatus::Todo),
            sample_task("b", TaskStatus::Todo),
            sample_task("c", TaskStatus::Completed),
        ];
        assert_eq!(status_counts(&tasks), [2, 0, 0, 1]);
    }
}
