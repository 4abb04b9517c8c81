use crate::app::AppState;
use crate::controller::Command;
use crate::domain::{Filter, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    // Nothing but the loading screen is on display until the first fetch lands
    if app.controller.is_loading() {
        return matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
    }

    match app.ui_mode {
        UiMode::Browsing => handle_browsing_mode(app, key),
        UiMode::Typing => handle_typing_mode(app, key),
    }
}

/// Handle keys while the task list has focus
fn handle_browsing_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Local-only completion toggle
        KeyCode::Char(' ') => app.toggle_selected(),

        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter => app.focus_input(),
        KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),

        // Bulk actions
        KeyCode::Char('A') => app.dispatch(Command::CompleteAll),
        KeyCode::Char('C') => app.dispatch(Command::ClearCompleted),

        // Filters
        KeyCode::Char('f') => app.dispatch(Command::CycleFilter),
        KeyCode::Char('1') => app.dispatch(Command::SetFilter(Filter::All)),
        KeyCode::Char('2') => app.dispatch(Command::SetFilter(Filter::Uncompleted)),
        KeyCode::Char('3') => app.dispatch(Command::SetFilter(Filter::Completed)),

        KeyCode::Char('r') => app.dispatch(Command::Reload),

        KeyCode::Char('q') | KeyCode::Esc => return true,

        _ => {}
    }
    false
}

/// Handle keys while the input bar has focus
fn handle_typing_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.dispatch(Command::Submit),
        KeyCode::Esc | KeyCode::Tab => app.leave_input(),
        KeyCode::Backspace => app.dispatch(Command::InputBackspace),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch(Command::ClearInput)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch(Command::InputChar(c))
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{create_test_app, settle};
    use crate::config::Settings;
    use crate::domain::{Phase, Task, TaskId};
    use crate::repository::InMemoryTaskRepository;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _repo) = create_test_app();
        app.ui_mode = UiMode::Browsing;
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_q_is_text_while_typing() {
        let (mut app, _repo) = create_test_app();
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.controller.input(), "q");
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let (mut app, _repo) = create_test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c));
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let repo = Arc::new(InMemoryTaskRepository::with_tasks(vec![Task::new("1", "a")]));
        let mut app = AppState::new(repo.clone(), &Settings::default());
        app.start();
        assert!(app.controller.is_loading());

        type_str(&mut app, "x");
        assert!(!handle_key(&mut app, key(KeyCode::Enter)));
        assert_eq!(app.controller.input(), "");
        assert_eq!(app.controller.in_flight(), 1);

        settle(&mut app);
        assert_eq!(repo.call_count(), 1);
        assert_eq!(app.controller.store().len(), 1);
        assert_eq!(app.ui_mode, UiMode::Typing);
    }

    #[test]
    fn test_quit_while_loading() {
        let app_with = || {
            let mut app =
                AppState::new(Arc::new(InMemoryTaskRepository::new()), &Settings::default());
            app.start();
            app
        };

        assert!(handle_key(&mut app_with(), key(KeyCode::Esc)));
        assert!(handle_key(&mut app_with(), key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_handle_add_task() {
        let (mut app, repo) = create_test_app();
        let initial_count = app.controller.store().len();

        type_str(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Enter));
        settle(&mut app);

        assert_eq!(app.controller.store().len(), initial_count + 1);
        assert_eq!(app.controller.input(), "");
        assert_eq!(repo.snapshot().len(), initial_count + 1);
    }

    #[test]
    fn test_handle_blank_submit_is_ignored() {
        let (mut app, repo) = create_test_app();
        let calls = repo.call_count();

        type_str(&mut app, "  ");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.controller.in_flight(), 0);
        assert_eq!(repo.call_count(), calls);
    }

    #[test]
    fn test_handle_edit_task() {
        let (mut app, _repo) = create_test_app();
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.ui_mode, UiMode::Browsing);

        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.controller.phase(), Phase::Editing);
        assert_eq!(app.controller.input(), "b");

        handle_key(&mut app, key(KeyCode::Char('!')));
        handle_key(&mut app, key(KeyCode::Enter));
        settle(&mut app);

        let task = app.controller.store().get(&TaskId::from("2")).unwrap();
        assert_eq!(task.text, "b!");
        assert!(!task.completed);
        assert_eq!(app.controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_handle_bulk_actions() {
        let (mut app, _repo) = create_test_app();
        app.ui_mode = UiMode::Browsing;

        handle_key(&mut app, key(KeyCode::Char('A')));
        assert_eq!(app.controller.store().counts(), (3, 3));

        handle_key(&mut app, key(KeyCode::Char('C')));
        assert!(app.controller.store().is_empty());
    }

    #[test]
    fn test_handle_filter_keys() {
        let (mut app, _repo) = create_test_app();
        app.ui_mode = UiMode::Browsing;

        handle_key(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.controller.store().filter(), Filter::Completed);
        assert_eq!(app.visible_len(), 1);

        handle_key(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.controller.store().filter(), Filter::All);
    }

    #[test]
    fn test_handle_delete_with_delete_key() {
        let (mut app, _repo) = create_test_app();
        app.ui_mode = UiMode::Browsing;
        let initial_count = app.controller.store().len();

        handle_key(&mut app, key(KeyCode::Delete));
        settle(&mut app);
        assert_eq!(app.controller.store().len(), initial_count - 1);
    }
}
