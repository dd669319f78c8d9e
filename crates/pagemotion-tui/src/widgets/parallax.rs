use pagemotion_core::Snapshot;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::fit;
use crate::theme::Theme;

pub struct ParallaxWidget;

impl ParallaxWidget {
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
        let title = if snapshot.reduced_motion {
            " Parallax (reduced motion) "
        } else {
            " Parallax "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let label_width = (area.width as usize).saturating_sub(40).max(6);
        let items: Vec<ListItem> = snapshot
            .layers
            .iter()
            .map(|layer| {
                ListItem::new(Line::from(vec![
                    Span::styled(fit(&layer.label, label_width), Style::default().fg(theme.fg0)),
                    Span::styled(
                        format!(" ×{:<5.2}", layer.depth),
                        Style::default().fg(theme.grey1),
                    ),
                    Span::styled(
                        format!(" {}", layer.transform.as_deref().unwrap_or("-")),
                        Style::default().fg(theme.blue),
                    ),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
