mod carousel;
mod counters;
mod parallax;
mod progress;
mod reveals;
mod status_bar;

pub use carousel::CarouselWidget;
pub use counters::CountersWidget;
pub use parallax::ParallaxWidget;
pub use progress::ProgressWidget;
pub use reveals::RevealsWidget;
pub use status_bar::StatusBarWidget;

use pagemotion_core::AnimationState;
use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;

/// Pad or cut `text` to exactly `width` terminal columns
pub(crate) fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - text.width()));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

pub(crate) fn state_color(state: AnimationState, theme: &Theme) -> Color {
    match state {
        AnimationState::NotStarted => theme.pending,
        AnimationState::Started => theme.animating,
        AnimationState::Done => theme.done,
    }
}

pub(crate) fn state_marker(state: AnimationState) -> &'static str {
    match state {
        AnimationState::NotStarted => "○",
        AnimationState::Started => "◐",
        AnimationState::Done => "●",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("日本語", 4), "日… ");
        assert_eq!(fit("abc", 0), "");
    }
}
