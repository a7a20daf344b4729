use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Request-time selection over the shared task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    /// No filter.
    #[default]
    All,
    /// Tasks with `completed == false`.
    Pending,
    /// Tasks with `completed == true`.
    Completed,
}

/// Query parameters for listing tasks, e.g. `GET /api/tasks?status=pending`.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    #[serde(default)]
    pub status: TaskFilter,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// The title of the task.
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
}

/// Input structure for partially updating a task.
///
/// Fields left out of the payload are unchanged. An empty `title` is
/// rejected by the store with a validation error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// Tasks are global: every authenticated user sees and edits the same list.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task, assigned by the store.
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// Whether the task has been completed. Defaults to `false`.
    pub completed: bool,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_task_validation() {
        let valid_input = CreateTaskRequest {
            title: "Valid Task".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: "".to_string(),
        };
        assert!(
            empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        let long_title = CreateTaskRequest {
            title: "a".repeat(256),
        };
        assert!(
            long_title.validate().is_err(),
            "Validation should fail for overly long title."
        );
    }

    #[test]
    fn test_task_filter_parsing() {
        assert_eq!(
            serde_json::from_str::<TaskFilter>("\"pending\"").unwrap(),
            TaskFilter::Pending
        );
        assert_eq!(
            serde_json::from_str::<TaskFilter>("\"completed\"").unwrap(),
            TaskFilter::Completed
        );
        assert_eq!(
            serde_json::from_str::<TaskFilter>("\"all\"").unwrap(),
            TaskFilter::All
        );
        assert!(serde_json::from_str::<TaskFilter>("\"done\"").is_err());
    }

    #[test]
    fn test_task_filter_defaults_to_all() {
        assert_eq!(TaskFilter::default(), TaskFilter::All);

        let query: TaskListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.status, TaskFilter::All);
    }

    #[test]
    fn test_update_request_fields_are_optional() {
        let update: UpdateTaskRequest = serde_json::from_str("{\"completed\": true}").unwrap();
        assert_eq!(update.title, None);
        assert_eq!(update.completed, Some(true));

        let update: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(update.title, None);
        assert_eq!(update.completed, None);
    }
}
