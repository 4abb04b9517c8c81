use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque task identifier assigned by the repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single todo item, in the shape the task API serves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    #[serde(rename = "task")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            text: text.into(),
            completed: false,
        }
    }

    /// Builder-style helper mostly used by tests and the demo backend
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Merge the fields present in `patch`, leaving the rest untouched.
    /// The id never changes.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Partial task used when merging a server response into local state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl From<Task> for TaskPatch {
    fn from(task: Task) -> Self {
        Self {
            text: Some(task.text),
            completed: Some(task.completed),
        }
    }
}

/// Body sent to the repository for both creating and editing a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(rename = "task")]
    pub text: String,
    pub completed: bool,
}

impl TaskUpdate {
    /// Edits always go out as not completed
    pub fn edit(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_reads_api_shape() {
        let json = r#"{"_id":"65a1","task":"buy milk","completed":true,"__v":0}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id, TaskId::from("65a1"));
        assert_eq!(task.text, "buy milk");
        assert!(task.completed);
    }

    #[test]
    fn test_missing_completed_defaults_to_false() {
        let task: Task = serde_json::from_str(r#"{"_id":"1","task":"a"}"#).unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn test_apply_patch_keeps_absent_fields() {
        let mut task = Task::new("1", "old").with_completed(true);
        task.apply(TaskPatch {
            text: Some("new".to_string()),
            completed: None,
        });

        assert_eq!(task.text, "new");
        assert!(task.completed);
        assert_eq!(task.id.as_str(), "1");
    }

    #[test]
    fn test_edit_payload_resets_completed() {
        let body = serde_json::to_value(TaskUpdate::edit("walk dog")).unwrap();
        assert_eq!(body, serde_json::json!({"task": "walk dog", "completed": false}));
    }
}
