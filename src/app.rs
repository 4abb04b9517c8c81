use crate::config::Settings;
use crate::controller::{Command, ViewController};
use crate::domain::{Phase, TaskId, UiMode};
use crate::notifications::Notices;
use crate::repository::TaskRepository;
use crate::worker::Worker;
use std::sync::Arc;

/// Main application state
pub struct AppState {
    pub controller: ViewController,
    pub worker: Worker,
    /// Index into the visible (filtered) tasks
    pub selected_index: usize,
    pub ui_mode: UiMode,
}

impl AppState {
    pub fn new(repo: Arc<dyn TaskRepository>, settings: &Settings) -> Self {
        let notices = Notices::new(settings.notice_ttl(), settings.max_notices);
        Self {
            controller: ViewController::new(notices),
            worker: Worker::new(repo),
            selected_index: 0,
            ui_mode: UiMode::Typing,
        }
    }

    /// Kick off the initial fetch
    pub fn start(&mut self) {
        let call = self.controller.initial_fetch();
        self.worker.spawn(call);
    }

    pub fn dispatch(&mut self, command: Command) {
        if let Some(call) = self.controller.handle(command) {
            self.worker.spawn(call);
        }
        self.clamp_selection();
    }

    /// Apply finished repository calls and expire old notices.
    /// Returns how many completions were applied.
    pub fn pump(&mut self) -> usize {
        let completions = self.worker.drain();
        let applied = completions.len();
        for completion in completions {
            self.controller.complete(completion);
        }
        self.controller.notices_mut().prune(chrono::Local::now());
        if applied > 0 {
            self.clamp_selection();
        }
        applied
    }

    pub fn visible_len(&self) -> usize {
        self.controller.store().visible_tasks().count()
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.controller
            .store()
            .visible_tasks()
            .nth(self.selected_index)
            .map(|task| task.id.clone())
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_len() {
            self.selected_index += 1;
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Command::ToggleCompleted(id));
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Command::Delete(id));
        }
    }

    /// Load the selected task into the input and focus it
    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Command::BeginEdit(id));
            self.ui_mode = UiMode::Typing;
        }
    }

    pub fn focus_input(&mut self) {
        self.ui_mode = UiMode::Typing;
    }

    /// Leave the input; an edit in progress is abandoned
    pub fn leave_input(&mut self) {
        if self.controller.phase() == Phase::Editing {
            self.dispatch(Command::CancelEdit);
        }
        self.ui_mode = UiMode::Browsing;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}
