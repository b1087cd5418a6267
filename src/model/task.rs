use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 任务状态（看板的四列，与后端枚举一一对应）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "in-review")]
    InReview,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    /// 状态显示名称
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::InReview => "In Review",
            TaskStatus::Completed => "Completed",
        }
    }

    /// 后端枚举值（kebab-case）
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::InReview => "in-review",
            TaskStatus::Completed => "completed",
        }
    }

    /// 左侧相邻列（已在最左则返回自身）
    pub fn prev(&self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::Todo,
            TaskStatus::InProgress => TaskStatus::Todo,
            TaskStatus::InReview => TaskStatus::InProgress,
            TaskStatus::Completed => TaskStatus::InReview,
        }
    }

    /// 右侧相邻列（已在最右则返回自身）
    pub fn next(&self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::InReview,
            TaskStatus::InReview => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Completed,
        }
    }
}

/// 任务数据（tasks 表的一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID
    pub id: Uuid,
    /// 标题
    pub title: String,
    /// 描述（可空）
    #[serde(default)]
    pub description: Option<String>,
    /// 当前状态
    pub status: TaskStatus,
    /// 截止时间（可空）
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// 标签文字（如 "Design"）
    #[serde(default)]
    pub tag_label: Option<String>,
    /// 标签颜色名（如 "blue"）
    #[serde(default)]
    pub tag_color: Option<String>,
    /// 子项完成数
    #[serde(default)]
    pub progress_completed: Option<i32>,
    /// 子项总数
    #[serde(default)]
    pub progress_total: Option<i32>,
    /// 参与人数
    #[serde(default)]
    pub assignees_count: Option<i32>,
    /// 所属用户
    pub user_id: Uuid,
    /// 所属团队
    pub team_id: Uuid,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// 标签显示文字（缺省 "Task"）
    pub fn tag(&self) -> &str {
        self.tag_label.as_deref().unwrap_or("Task")
    }

    /// 进度 (completed, total)，completed 不会超过 total
    pub fn progress(&self) -> (i32, i32) {
        let total = self.progress_total.unwrap_or(1).max(1);
        let completed = self.progress_completed.unwrap_or(0).clamp(0, total);
        (completed, total)
    }

    /// 截止时间显示，如 "Mar 4" / "No due date"
    pub fn due_display(&self) -> String {
        match self.due_date {
            Some(d) => d.format("%b %-d").to_string(),
            None => "No due date".to_string(),
        }
    }
}

/// 格式化相对时间
pub fn format_relative_time(dt: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(dt);

    let seconds = duration.num_seconds();
    if seconds < 0 {
        return "just now".to_string();
    }

    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        if minutes == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", minutes)
        }
    } else if hours < 24 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if days < 30 {
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{} months ago", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1 year ago".to_string()
        } else {
            format!("{} years ago", years)
        }
    }
}

/// 测试用任务构造器（模块内测试与看板/缓存测试共用）
#[cfg(test)]
pub(crate) fn sample_task(title: &str, status: TaskStatus) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        status,
        due_date: None,
        tag_label: None,
        tag_color: None,
        progress_completed: None,
        progress_total: None,
        assignees_count: None,
        user_id: Uuid::new_v4(),
        team_id: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: TaskStatus = serde_json::from_str("\"in-review\"").unwrap();
        assert_eq!(status, TaskStatus::InReview);
    }

    #[test]
    fn test_status_neighbors() {
        assert_eq!(TaskStatus::Todo.prev(), TaskStatus::Todo);
        assert_eq!(TaskStatus::Todo.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::Completed.next(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.prev(), TaskStatus::InReview);
    }

    #[test]
    fn test_progress_clamped() {
        let mut task = sample_task("t", TaskStatus::Todo);
        task.progress_completed = Some(5);
        task.progress_total = Some(3);
        assert_eq!(task.progress(), (3, 3));

        task.progress_completed = None;
        task.progress_total = None;
        assert_eq!(task.progress(), (0, 1));
    }

    #[test]
    fn test_task_roundtrip_preserves_unset_fields() {
        let task = sample_task("roundtrip", TaskStatus::Todo);
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_format_relative_time() {
        assert_eq!(format_relative_time(Utc::now()), "just now");
        assert_eq!(
            format_relative_time(Utc::now() - Duration::minutes(5)),
            "5 mins ago"
        );
        assert_eq!(
            format_relative_time(Utc::now() - Duration::days(2)),
            "2 days ago"
        );
    }
}
