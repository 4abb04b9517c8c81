use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub input_area: Rect,
    pub list_area: Rect,
    pub footer_area: Rect,
    pub notice_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Input bar (3 rows, bordered)
/// - Task list (rest)
/// - Footer with counts and filter (1 row)
/// - Notice pane, only while there are notices
pub fn create_layout(area: Rect, notice_count: usize) -> MainLayout {
    let notice_height = if notice_count == 0 {
        0
    } else {
        // Borders plus one row per notice
        notice_count as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Keybindings bar
            Constraint::Length(3),             // Input bar
            Constraint::Min(3),                // Task list
            Constraint::Length(1),             // Footer
            Constraint::Length(notice_height), // Notices
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        input_area: chunks[1],
        list_area: chunks[2],
        footer_area: chunks[3],
        notice_area: if notice_height > 0 { Some(chunks[4]) } else { None },
    }
}

/// Centered box used for the loading screen
pub fn create_centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
