use pagemotion_core::Snapshot;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
        let theme = &app.theme;
        let mode = if snapshot.reduced_motion {
            "REDUCED"
        } else if app.window_blurred {
            "BLURRED"
        } else {
            "LIVE"
        };
        let settled = if snapshot.settled { "settled" } else { "animating" };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode, msg)
        } else {
            format!(
                " {} | frame {} | {:.1}s | {}",
                mode,
                snapshot.frame,
                snapshot.time_ms / 1000.0,
                settled
            )
        };

        let help_hint = " q:quit j/k:scroll J/K:page space:blur p:pointer m:sweep r:remount ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
