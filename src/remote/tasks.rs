//! Row-scoped task CRUD.
//!
//! Every call filters by owning user and team in addition to the server-side
//! row policies, matching the read/write contract of the board core.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{eq_filter, Client};
use crate::error::Result;
use crate::model::{Task, TaskStatus};

/// Insert payload for a new task. Optional fields are left to the server
/// defaults when `None`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub tag_label: String,
    pub tag_color: String,
    pub progress_total: i32,
    pub progress_completed: i32,
    pub assignees_count: i32,
    pub user_id: Uuid,
    pub team_id: Uuid,
}

impl NewTask {
    /// Dialog defaults: todo column, gray "Task" tag, 0/1 progress, 1 assignee.
    pub fn with_defaults(title: String, user_id: Uuid, team_id: Uuid) -> Self {
        Self {
            title,
            description: None,
            status: TaskStatus::Todo,
            due_date: None,
            tag_label: "Task".to_string(),
            tag_color: "gray".to_string(),
            progress_total: 1,
            progress_completed: 0,
            assignees_count: 1,
            user_id,
            team_id,
        }
    }
}

impl Client {
    /// All tasks for (user, team), newest first.
    pub fn list_tasks(&self, user_id: Uuid, team_id: Uuid) -> Result<Vec<Task>> {
        let req = self
            .rest("GET", "tasks")
            .query("select", "*")
            .query("user_id", &eq_filter(user_id))
            .query("team_id", &eq_filter(team_id))
            .query("order", "created_at.desc");
        Self::call_json(req)
    }

    /// Set the status of one task, scoped to (user, team). The server
    /// answers with the updated row count semantics; the caller reconciles
    /// with a fresh fetch rather than trusting the echo.
    pub fn update_task_status(
        &self,
        task_id: Uuid,
        user_id: Uuid,
        team_id: Uuid,
        status: TaskStatus,
    ) -> Result<()> {
        let req = self
            .rest("PATCH", "tasks")
            .query("id", &eq_filter(task_id))
            .query("user_id", &eq_filter(user_id))
            .query("team_id", &eq_filter(team_id));
        Self::send_json_no_body(req, serde_json::json!({ "status": status }))
    }

    /// Insert a task and return the created row.
    pub fn create_task(&self, task: &NewTask) -> Result<Task> {
        let req = self
            .rest("POST", "tasks")
            .set("Prefer", "return=representation")
            .set("Accept", "application/vnd.pgrst.object+json");
        Self::send_json(req, task)
    }

    /// Delete one task, scoped to (user, team).
    pub fn delete_task(&self, task_id: Uuid, user_id: Uuid, team_id: Uuid) -> Result<()> {
        let req = self
            .rest("DELETE", "tasks")
            .query("id", &eq_filter(task_id))
            .query("user_id", &eq_filter(user_id))
            .query("team_id", &eq_filter(team_id));
        Self::call_no_body(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let user = Uuid::new_v4();
        let team = Uuid::new_v4();
        let task = NewTask::with_defaults("Ship it".to_string(), user, team);

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.tag_label, "Task");
        assert_eq!(task.tag_color, "gray");
        assert_eq!((task.progress_completed, task.progress_total), (0, 1));
        assert_eq!(task.assignees_count, 1);
    }

    #[test]
    fn test_new_task_payload_omits_unset_fields() {
        let task = NewTask::with_defaults("t".to_string(), Uuid::new_v4(), Uuid::new_v4());
        let json = serde_json::to_value(&task).unwrap();

        assert!(json.get("description").is_none());
        assert!(json.get("due_date").is_none());
        assert_eq!(json["status"], "todo");
    }
}
