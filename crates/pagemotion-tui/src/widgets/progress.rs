use pagemotion_core::Snapshot;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::theme::Theme;

pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
        let title = match &snapshot.active_section {
            Some(section) if snapshot.navbar_scrolled => {
                format!(" Scroll · {} · scrolled ", section)
            }
            Some(section) => format!(" Scroll · {} ", section),
            None => " Scroll ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let percent = snapshot.progress_percent.unwrap_or(0.0);
        let label = match snapshot.progress_percent {
            Some(p) => format!("{:.1}% at {:.0}px", p, snapshot.scroll_y),
            None => format!("no progress bar, {:.0}px", snapshot.scroll_y),
        };

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(theme.accent).bg(theme.bg1))
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, area);
    }
}
