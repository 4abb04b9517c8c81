use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the focused pane
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Browsing => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("space done   "),
            Span::raw("a add   "),
            Span::raw("e edit   "),
            Span::raw("d delete   "),
            Span::raw("A complete all   "),
            Span::raw("C clear done   "),
            Span::raw("f/1/2/3 filter   "),
            Span::raw("r reload   "),
            Span::raw("q quit"),
        ]),
        UiMode::Typing => Line::from(vec![
            Span::raw(" Enter submit   "),
            Span::raw("Ctrl+U clear   "),
            Span::raw("Esc back to list   "),
            Span::raw("Ctrl+C quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
