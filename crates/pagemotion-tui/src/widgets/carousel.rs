use pagemotion_core::snapshot::CarouselSnapshot;
use pagemotion_core::Snapshot;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::fit;
use crate::theme::Theme;

/// Columns drawn per card
const CARD_CELLS: usize = 14;

/// The visible `width` columns of the card ring at `offset`
///
/// The ring holds every card once; the clones in the track make the real
/// page look the same, so the strip simply wraps around.
pub fn strip(labels: &[String], offset: f64, loop_width: f64, width: usize) -> String {
    let ring: Vec<char> = labels
        .iter()
        .flat_map(|label| {
            let mut cell = String::from("▏");
            cell.push_str(&fit(label, CARD_CELLS - 1));
            cell.chars().collect::<Vec<_>>()
        })
        .collect();
    if ring.is_empty() || width == 0 {
        return String::new();
    }

    let fraction = if loop_width > 0.0 && offset.is_finite() {
        (offset / loop_width).rem_euclid(1.0)
    } else {
        0.0
    };
    let shift = (fraction * ring.len() as f64).floor() as usize % ring.len();
    (0..width).map(|i| ring[(shift + i) % ring.len()]).collect()
}

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
        let Some(carousel) = &snapshot.carousel else {
            let block = Block::default()
                .title(" Carousel ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.grey0))
                .style(Style::default().bg(theme.bg0));
            let text = Paragraph::new(Span::styled("static list", Style::default().fg(theme.grey1)))
                .block(block);
            frame.render_widget(text, area);
            return;
        };

        let (state, color) = Self::state(carousel, theme);
        let block = Block::default()
            .title(format!(
                " Carousel · {} · {:.1}/{:.0}px ",
                state, carousel.offset, carousel.loop_width
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.bg0));

        let width = area.width.saturating_sub(2) as usize;
        let line = Line::from(Span::styled(
            strip(&carousel.cards, carousel.offset, carousel.loop_width, width),
            Style::default().fg(theme.fg0),
        ));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn state(carousel: &CarouselSnapshot, theme: &Theme) -> (&'static str, ratatui::style::Color) {
        match (carousel.running, carousel.paused) {
            (false, _) => ("static", theme.grey1),
            (true, true) => ("paused", theme.paused),
            (true, false) => ("running", theme.accent),
        }
    }
}
