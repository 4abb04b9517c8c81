use super::{DeleteStatus, NetworkError, TaskRepository};
use crate::domain::{Task, TaskId, TaskUpdate};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Process-local task backend used by `--demo` and by tests.
///
/// Failures can be injected to exercise the error paths of callers.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<Vec<Task>>,
    fetch_limit: Option<usize>,
    calls: AtomicUsize,
    offline: AtomicBool,
    reject_deletes: AtomicBool,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    /// Sample content for demo mode
    pub fn seeded() -> Self {
        Self::with_tasks(vec![
            Task::new(Uuid::new_v4().to_string(), "Water the plants"),
            Task::new(Uuid::new_v4().to_string(), "Reply to the landlord").with_completed(true),
            Task::new(Uuid::new_v4().to_string(), "Book dentist appointment"),
        ])
    }

    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = Some(limit);
        self
    }

    /// Make every call fail as if the server were unreachable
    #[cfg(test)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Answer deletes with a non-confirmation payload
    #[cfg(test)]
    pub fn set_reject_deletes(&self, reject: bool) {
        self.reject_deletes.store(reject, Ordering::SeqCst);
    }

    /// Number of repository calls received so far
    #[cfg(test)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_call(&self) -> Result<(), NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(NetworkError::Unavailable("in-memory backend is offline".to_string()));
        }
        Ok(())
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn fetch_all(&self) -> Result<Vec<Task>, NetworkError> {
        self.begin_call()?;
        let tasks = self.lock();
        let limit = self.fetch_limit.unwrap_or(tasks.len());
        Ok(tasks.iter().take(limit).cloned().collect())
    }

    fn add(&self, text: &str) -> Result<Task, NetworkError> {
        self.begin_call()?;
        let task = Task::new(Uuid::new_v4().to_string(), text);
        self.lock().push(task.clone());
        Ok(task)
    }

    fn update(&self, id: &TaskId, fields: &TaskUpdate) -> Result<Task, NetworkError> {
        self.begin_call()?;
        let mut tasks = self.lock();
        let task = tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| NetworkError::Unavailable(format!("no task with id {}", id)))?;
        task.text = fields.text.clone();
        task.completed = fields.completed;
        Ok(task.clone())
    }

    fn delete(&self, id: &TaskId) -> Result<DeleteStatus, NetworkError> {
        self.begin_call()?;
        if self.reject_deletes.load(Ordering::SeqCst) {
            return Ok(DeleteStatus::Rejected {
                message: "Task could not be deleted".to_string(),
            });
        }

        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|task| &task.id != id);
        if tasks.len() == before {
            return Ok(DeleteStatus::Rejected {
                message: format!("no task with id {}", id),
            });
        }

        tracing::debug!(%id, "task deleted");
        Ok(DeleteStatus::Deleted)
    }
}
