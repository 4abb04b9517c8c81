use crate::app::AppState;
use crate::controller::ViewSnapshot;
use crate::domain::{Phase, UiMode};
use crate::ui::styles::{border_style, editing_style, focused_border_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the single-line input used for adding and editing tasks
pub fn render_input_bar(f: &mut Frame, app: &AppState, snapshot: &ViewSnapshot, area: Rect) {
    let typing = app.ui_mode == UiMode::Typing;

    let (title, title_span_style) = match snapshot.phase {
        Phase::Idle => (" Add your todo ", title_style()),
        Phase::Editing => (" Update task ", editing_style()),
    };

    let line = if snapshot.input.is_empty() && !typing {
        Line::from(Span::styled("press a to add a task", hint_style()))
    } else {
        Line::from(vec![
            Span::raw("> "),
            Span::raw(snapshot.input.to_string()),
            if typing {
                Span::styled("█", title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ])
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if typing {
                focused_border_style()
            } else {
                border_style()
            })
            .title(Span::styled(title, title_span_style)),
    );

    f.render_widget(paragraph, area);
}
