use crate::controller::ViewSnapshot;
use crate::ui::styles::{default_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render completed/total counts, the active filter and pending requests
pub fn render_footer(f: &mut Frame, snapshot: &ViewSnapshot, area: Rect) {
    f.render_widget(Paragraph::new(footer_line(snapshot)), area);
}

fn footer_line(snapshot: &ViewSnapshot) -> Line<'static> {
    let (completed, total) = snapshot.counts;
    let mut spans = vec![
        Span::styled(" Completed: ", title_style()),
        Span::styled(completed.to_string(), default_style()),
        Span::styled("   Total Tasks: ", title_style()),
        Span::styled(total.to_string(), default_style()),
        Span::styled("   Filter: ", title_style()),
        Span::styled(snapshot.filter.label(), default_style()),
    ];

    if snapshot.in_flight > 0 {
        spans.push(Span::styled(
            format!("   ⟳ {} pending", snapshot.in_flight),
            hint_style(),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Filter, Phase};
    use crate::notifications::Notices;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_footer_shows_counts_and_pending() {
        let notices = Notices::new(chrono::Duration::seconds(4), 5);
        let mut snapshot = ViewSnapshot {
            visible: Vec::new(),
            counts: (1, 2),
            filter: Filter::Uncompleted,
            input: "",
            phase: Phase::Idle,
            editing: None,
            loading: false,
            in_flight: 0,
            notices: &notices,
        };

        let line = text(&footer_line(&snapshot));
        assert_eq!(line, " Completed: 1   Total Tasks: 2   Filter: Uncompleted");

        snapshot.in_flight = 2;
        assert!(text(&footer_line(&snapshot)).ends_with("⟳ 2 pending"));
    }
}
