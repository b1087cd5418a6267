//! 底部快捷键提示

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppMode};

/// 渲染 Footer
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let colors = app.colors;

    let hints: &[(&str, &str)] = match app.mode {
        AppMode::Board => &[
            ("n", "new task"),
            ("[/]", "move"),
            ("drag", "move"),
            ("x", "delete"),
            ("w", "workspace"),
            ("r", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
        AppMode::History => &[
            ("/", "search"),
            ("f", "filter"),
            ("s", "sort"),
            ("n", "new task"),
            ("x", "delete"),
            ("?", "help"),
            ("q", "quit"),
        ],
        AppMode::Members => &[
            ("i", "invite"),
            ("x", "remove"),
            ("e", "profile"),
            ("w", "workspace"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in hints {
        spans.push(Span::styled(*key, Style::default().fg(colors.highlight)));
        spans.push(Span::styled(
            format!(" {}  ", desc),
            Style::default().fg(colors.muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
