use crate::notifications::{Notice, NoticeKind, Notices};
use crate::ui::styles::{border_style, error_style, hint_style, success_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render live notices, newest at the bottom
pub fn render_notice_pane(f: &mut Frame, notices: &Notices, area: Rect) {
    let lines: Vec<Line> = notices.iter().map(notice_line).collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Notices ", title_style())),
    );
    f.render_widget(paragraph, area);
}

fn notice_line(notice: &Notice) -> Line<'static> {
    let (glyph, style) = match notice.kind {
        NoticeKind::Success => ("✓", success_style()),
        NoticeKind::Error => ("✗", error_style()),
    };

    Line::from(vec![
        Span::styled(notice.created_at.format("%H:%M:%S ").to_string(), hint_style()),
        Span::styled(format!("{} {}", glyph, notice.message), style),
    ])
}
