use pagemotion_core::Snapshot;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::{fit, state_color, state_marker};
use crate::theme::Theme;

pub struct CountersWidget;

impl CountersWidget {
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
        let block = Block::default()
            .title(" Counters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let label_width = (area.width as usize).saturating_sub(20).max(8);
        let items: Vec<ListItem> = snapshot
            .counters
            .iter()
            .map(|counter| {
                let color = state_color(counter.state, theme);
                let text = if counter.text.is_empty() { "-" } else { counter.text.as_str() };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", state_marker(counter.state)),
                        Style::default().fg(color),
                    ),
                    Span::styled(
                        fit(&counter.label, label_width),
                        Style::default().fg(theme.grey2),
                    ),
                    Span::styled(
                        format!(" {}", text),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
