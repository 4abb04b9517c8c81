pub mod footer;
pub mod input_bar;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod notice_pane;
pub mod styles;

use crate::app::AppState;
use footer::render_footer;
use input_bar::render_input_bar;
use keybindings::render_keybindings;
use layout::{create_centered_area, create_layout};
use list_pane::render_list_pane;
use notice_pane::render_notice_pane;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use styles::{border_style, title_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let snapshot = app.controller.snapshot();

    if snapshot.loading {
        let area = create_centered_area(size, 20, 3);
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(title_style())
            .block(Block::default().borders(Borders::ALL).border_style(border_style()));
        f.render_widget(loading, area);
        return;
    }

    let layout = create_layout(size, snapshot.notices.len());

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_input_bar(f, app, &snapshot, layout.input_area);
    render_list_pane(f, app, &snapshot, layout.list_area);
    render_footer(f, &snapshot, layout.footer_area);

    if let Some(notice_area) = layout.notice_area {
        render_notice_pane(f, snapshot.notices, notice_area);
    }
}
