use pagemotion_core::Snapshot;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::{fit, state_color, state_marker};
use crate::theme::Theme;

pub struct RevealsWidget;

impl RevealsWidget {
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
        let shown = snapshot.reveals.iter().filter(|r| r.visible).count();
        let block = Block::default()
            .title(format!(" Reveal {}/{} ", shown, snapshot.reveals.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let label_width = (area.width as usize).saturating_sub(16);
        let items: Vec<ListItem> = snapshot
            .reveals
            .iter()
            .map(|reveal| {
                let color = state_color(reveal.state, theme);
                let status = if reveal.visible { "visible" } else { "pending" };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", state_marker(reveal.state)),
                        Style::default().fg(color),
                    ),
                    Span::styled(fit(&reveal.label, label_width), Style::default().fg(theme.fg0)),
                    Span::styled(format!(" {}", status), Style::default().fg(color)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
