//! Five-star rating

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::{ACCENT_STAR, TEXT_FAINT};

pub const MAX_STARS: u8 = 5;

/// Star rating that reports one value, once.
///
/// A preset rating is displayed as already given and never reports.
#[derive(Debug, Clone)]
pub struct StarRatingState {
    rating: Option<u8>,
    hover: u8,
}

impl StarRatingState {
    pub fn new(preset: Option<u8>) -> Self {
        let rating = preset.filter(|n| (1..=MAX_STARS).contains(n));
        Self {
            rating,
            hover: rating.unwrap_or(MAX_STARS),
        }
    }

    #[cfg(test)]
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    #[cfg(test)]
    pub fn hover(&self) -> u8 {
        self.hover
    }

    pub fn select_next(&mut self) {
        if self.rating.is_none() {
            self.hover = (self.hover % MAX_STARS) + 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.rating.is_none() {
            self.hover = if self.hover <= 1 { MAX_STARS } else { self.hover - 1 };
        }
    }

    /// Rate `stars`; out of range values and repeat ratings are ignored
    pub fn rate(&mut self, stars: u8) -> Option<u8> {
        if self.rating.is_some() || !(1..=MAX_STARS).contains(&stars) {
            return None;
        }
        self.rating = Some(stars);
        self.hover = stars;
        Some(stars)
    }

    pub fn rate_highlighted(&mut self) -> Option<u8> {
        self.rate(self.hover)
    }

    pub fn is_done(&self) -> bool {
        self.rating.is_some()
    }

    pub fn lines(&self, active: bool) -> Vec<Line<'static>> {
        let filled = match self.rating {
            Some(n) => n,
            None if active => self.hover,
            None => 0,
        };
        let mut spans = vec![Span::raw("  ")];
        for i in 1..=MAX_STARS {
            let (glyph, style) = if i <= filled {
                let mut style = Style::default().fg(ACCENT_STAR);
                if self.rating.is_some() {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ("★", style)
            } else {
                ("☆", Style::default().fg(TEXT_FAINT))
            };
            spans.push(Span::styled(glyph, style));
            spans.push(Span::raw(" "));
        }
        vec![Line::from(spans)]
    }
}
