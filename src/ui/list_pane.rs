use crate::app::AppState;
use crate::controller::ViewSnapshot;
use crate::domain::{Task, UiMode};
use crate::ui::styles::{
    border_style, default_style, done_style, editing_style, focused_border_style,
    inactive_selected_style, selected_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the task list for the active filter
pub fn render_list_pane(f: &mut Frame, app: &AppState, snapshot: &ViewSnapshot, area: Rect) {
    let browsing = app.ui_mode == UiMode::Browsing;
    let title = format!(" Todo List ({}) ", snapshot.filter.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if browsing {
            focused_border_style()
        } else {
            border_style()
        })
        .title(Span::styled(title, title_style()));

    if snapshot.visible.is_empty() {
        let message = if app.controller.store().is_empty() {
            "No tasks yet".to_string()
        } else {
            format!("No {} tasks", snapshot.filter.label().to_lowercase())
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = snapshot
        .visible
        .iter()
        .map(|task| {
            let editing = snapshot.editing == Some(&task.id);
            ListItem::new(create_task_line(task, editing))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if browsing {
        selected_style()
    } else {
        inactive_selected_style()
    });

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: [x] Write proposal  ✎
fn create_task_line(task: &Task, editing: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox.to_string()));

    let text_style = if editing {
        editing_style()
    } else if task.completed {
        done_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(task.text.clone(), text_style));

    if editing {
        spans.push(Span::styled("  ✎ editing".to_string(), editing_style()));
    }

    Line::from(spans)
}
