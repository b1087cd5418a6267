//! Task operations behind the add-task dialog and history page.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{HuddleError, Result};
use crate::model::Task;
use crate::remote::tasks::NewTask;
use crate::remote::Client;

/// Create a task in the (user, team) scope.
///
/// # Steps
///
/// 1. Validate the title
/// 2. Parse the optional due date (dialog passes "YYYY-MM-DD")
/// 3. Insert with dialog defaults (todo column, gray "Task" tag)
pub fn create_task(
    client: &Client,
    title: &str,
    description: &str,
    due_date: &str,
    user_id: Uuid,
    team_id: Uuid,
) -> Result<Task> {
    let title = title.trim();
    if title.is_empty() {
        return Err(HuddleError::invalid_data("Title is required"));
    }

    let mut task = NewTask::with_defaults(title.to_string(), user_id, team_id);

    let description = description.trim();
    if !description.is_empty() {
        task.description = Some(description.to_string());
    }
    task.due_date = parse_due_date(due_date)?;

    client.create_task(&task)
}

/// Delete a task in the (user, team) scope.
pub fn delete_task(client: &Client, task: &Task) -> Result<String> {
    client.delete_task(task.id, task.user_id, task.team_id)?;
    Ok(format!("Deleted: {}", task.title))
}

/// Parse a dialog date string into a due timestamp (midnight UTC).
/// Empty input means no due date.
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        HuddleError::invalid_data(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time");
    Ok(Some(DateTime::from_naive_utc_and_offset(midnight, Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::ServerConfig;

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("   ").unwrap(), None);

        let parsed = parse_due_date("2026-03-04").unwrap().unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2026-03-04 00:00");

        assert!(parse_due_date("04/03/2026").is_err());
        assert!(parse_due_date("2026-13-40").is_err());
    }

    #[test]
    fn test_create_task_rejects_blank_title() {
        let client = Client::new(&ServerConfig::default(), None).unwrap();
        let err = create_task(&client, "  ", "", "", Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, HuddleError::InvalidData(_)));
    }
}
