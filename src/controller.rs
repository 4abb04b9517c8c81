use crate::domain::{Filter, Phase, Task, TaskId, TaskUpdate};
use crate::notifications::Notices;
use crate::repository::{DeleteStatus, NetworkError, TaskRepository};
use crate::store::TaskStore;
use thiserror::Error;

/// User gestures understood by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add or update, depending on whether an edit is pending
    Submit,
    InputChar(char),
    InputBackspace,
    ClearInput,
    BeginEdit(TaskId),
    CancelEdit,
    Delete(TaskId),
    ToggleCompleted(TaskId),
    CompleteAll,
    ClearCompleted,
    SetFilter(Filter),
    CycleFilter,
    Reload,
}

/// A repository call the controller wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    FetchAll,
    Add { text: String },
    Update { id: TaskId, fields: TaskUpdate },
    Delete { id: TaskId },
}

/// A resolved repository call, ready to be applied to local state
#[derive(Debug)]
pub enum Completion {
    Fetched(Result<Vec<Task>, NetworkError>),
    Added(Result<Task, NetworkError>),
    Updated {
        id: TaskId,
        result: Result<Task, NetworkError>,
    },
    Deleted {
        id: TaskId,
        result: Result<DeleteStatus, NetworkError>,
    },
}

impl RemoteCall {
    /// Run against `repo`, blocking the calling thread
    pub fn execute(&self, repo: &dyn TaskRepository) -> Completion {
        match self {
            Self::FetchAll => Completion::Fetched(repo.fetch_all()),
            Self::Add { text } => Completion::Added(repo.add(text)),
            Self::Update { id, fields } => Completion::Updated {
                id: id.clone(),
                result: repo.update(id, fields),
            },
            Self::Delete { id } => Completion::Deleted {
                id: id.clone(),
                result: repo.delete(id),
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task text is empty")]
    EmptyText,
}

/// Trimmed task text, or an error when nothing is left
pub fn validate_text(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(trimmed)
}

/// Read-only view handed to the renderer
pub struct ViewSnapshot<'a> {
    pub visible: Vec<&'a Task>,
    pub counts: (usize, usize),
    pub filter: Filter,
    pub input: &'a str,
    pub phase: Phase,
    pub editing: Option<&'a TaskId>,
    pub loading: bool,
    pub in_flight: usize,
    pub notices: &'a Notices,
}

/// Turns gestures into store mutations and repository calls, and folds
/// repository responses back into the store.
pub struct ViewController {
    store: TaskStore,
    input: String,
    notices: Notices,
    loading: bool,
    in_flight: usize,
}

impl ViewController {
    /// Starts in the loading state; call [`ViewController::initial_fetch`] next
    pub fn new(notices: Notices) -> Self {
        Self {
            store: TaskStore::new(),
            input: String::new(),
            notices,
            loading: true,
            in_flight: 0,
        }
    }

    pub fn initial_fetch(&mut self) -> RemoteCall {
        self.in_flight += 1;
        RemoteCall::FetchAll
    }

    pub fn handle(&mut self, command: Command) -> Option<RemoteCall> {
        match command {
            Command::Submit => self.submit(),
            Command::InputChar(c) => {
                self.input.push(c);
                None
            }
            Command::InputBackspace => {
                self.input.pop();
                None
            }
            Command::ClearInput => {
                self.input.clear();
                None
            }
            Command::BeginEdit(id) => {
                self.begin_edit(&id);
                None
            }
            Command::CancelEdit => {
                if self.store.pending_edit().is_some() {
                    self.store.end_edit();
                    self.input.clear();
                }
                None
            }
            Command::Delete(id) => self.issue(RemoteCall::Delete { id }),
            Command::ToggleCompleted(id) => {
                if !self.store.toggle_completed(&id) {
                    tracing::debug!(%id, "toggle for unknown task ignored");
                }
                None
            }
            Command::CompleteAll => {
                self.store.set_all_completed(true);
                tracing::info!(count = self.store.len(), "marked all tasks completed");
                None
            }
            Command::ClearCompleted => {
                let was_editing = self.store.pending_edit().is_some();
                let removed = self.store.remove_where(|task| task.completed);
                self.drop_stale_input(was_editing);
                tracing::info!(removed, "cleared completed tasks");
                None
            }
            Command::SetFilter(filter) => {
                self.store.set_filter(filter);
                None
            }
            Command::CycleFilter => {
                let next = self.store.filter().next();
                self.store.set_filter(next);
                None
            }
            Command::Reload => self.issue(RemoteCall::FetchAll),
        }
    }

    pub fn complete(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match completion {
            Completion::Fetched(Ok(tasks)) => {
                tracing::info!(count = tasks.len(), "loaded tasks");
                let was_editing = self.store.pending_edit().is_some();
                self.store.load(tasks);
                self.drop_stale_input(was_editing);
                self.loading = false;
            }
            Completion::Fetched(Err(err)) => {
                tracing::warn!(error = %err, "error fetching tasks");
                self.notices.error("Error fetching tasks");
                self.loading = false;
            }
            Completion::Added(Ok(task)) => {
                let id = task.id.clone();
                match self.store.append(task) {
                    Ok(()) => {
                        tracing::info!(%id, "task added");
                        // An edit started meanwhile owns the input now
                        if self.store.pending_edit().is_none() {
                            self.input.clear();
                        }
                        self.notices.success("Task added successfully");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "server returned a task we already have");
                        self.notices.error(err.to_string());
                    }
                }
            }
            Completion::Added(Err(err)) => {
                tracing::warn!(error = %err, "error adding task");
                self.notices.error("Error adding task");
            }
            Completion::Updated { id, result: Ok(task) } => {
                if !self.store.replace(&id, task.into()) {
                    tracing::debug!(%id, "updated task is no longer listed");
                }
                if self.store.pending_edit() == Some(&id) {
                    self.store.end_edit();
                    self.input.clear();
                }
                tracing::info!(%id, "task updated");
                self.notices.success("Task updated successfully");
            }
            Completion::Updated { id, result: Err(err) } => {
                tracing::warn!(%id, error = %err, "error updating task");
                self.notices.error("Error updating task");
            }
            Completion::Deleted {
                id,
                result: Ok(DeleteStatus::Deleted),
            } => {
                let was_editing = self.store.pending_edit().is_some();
                self.store.remove(&id);
                self.drop_stale_input(was_editing);
                tracing::info!(%id, "task deleted");
                self.notices.success("Task deleted successfully");
            }
            Completion::Deleted {
                id,
                result: Ok(DeleteStatus::Rejected { message }),
            } => {
                tracing::warn!(%id, %message, "server refused to delete task");
                self.notices.error("Error deleting task");
            }
            Completion::Deleted { id, result: Err(err) } => {
                tracing::warn!(%id, error = %err, "error deleting task");
                self.notices.error("An error occurred while deleting the task");
            }
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            visible: self.store.visible_tasks().collect(),
            counts: self.store.counts(),
            filter: self.store.filter(),
            input: &self.input,
            phase: self.phase(),
            editing: self.store.pending_edit(),
            loading: self.loading,
            in_flight: self.in_flight,
            notices: &self.notices,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.store.pending_edit().is_some() {
            Phase::Editing
        } else {
            Phase::Idle
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn submit(&mut self) -> Option<RemoteCall> {
        let text = match validate_text(&self.input) {
            Ok(text) => text.to_string(),
            Err(err) => {
                tracing::debug!(error = %err, "submission ignored");
                return None;
            }
        };

        let call = match self.store.pending_edit() {
            Some(id) => RemoteCall::Update {
                id: id.clone(),
                fields: TaskUpdate::edit(text),
            },
            None => RemoteCall::Add { text },
        };
        self.issue(call)
    }

    fn begin_edit(&mut self, id: &TaskId) {
        let Some(text) = self.store.get(id).map(|task| task.text.clone()) else {
            tracing::debug!(%id, "edit for unknown task ignored");
            return;
        };
        self.store.begin_edit(id);
        self.input = text;
    }

    /// The edited task vanished from the store; its text must not be
    /// resubmitted as a new task
    fn drop_stale_input(&mut self, was_editing: bool) {
        if was_editing && self.store.pending_edit().is_none() {
            tracing::debug!("edited task removed, clearing input");
            self.input.clear();
        }
    }

    fn issue(&mut self, call: RemoteCall) -> Option<RemoteCall> {
        self.in_flight += 1;
        Some(call)
    }
}
