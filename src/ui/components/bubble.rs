//! Chat bubble layout: word wrapping by display width and link styling.

use std::ops::Range;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Which edge of the chat a bubble hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A message bubble at most 80% of the chat width
pub struct Bubble<'a> {
    text: &'a str,
    side: Side,
    style: Style,
    link_style: Style,
    links: &'a [String],
}

impl<'a> Bubble<'a> {
    pub fn new(text: &'a str, side: Side, style: Style) -> Self {
        Self {
            text,
            side,
            style,
            link_style: style.add_modifier(Modifier::UNDERLINED),
            links: &[],
        }
    }

    /// Underline every occurrence of these phrases
    pub fn links(mut self, links: &'a [String], link_style: Style) -> Self {
        self.links = links;
        self.link_style = link_style.add_modifier(Modifier::UNDERLINED);
        self
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        // One column of padding on each side inside the bubble
        let max_inner = (width * 4 / 5).saturating_sub(2).max(1);
        let ranges = wrap_ranges(self.text, max_inner);
        let inner = ranges
            .iter()
            .map(|r| UnicodeWidthStr::width(&self.text[r.clone()]))
            .max()
            .unwrap_or(0);
        let indent = match self.side {
            Side::Left => 0,
            Side::Right => width.saturating_sub(inner + 2),
        };

        let link_ranges = self.link_ranges();

        ranges
            .into_iter()
            .map(|range| {
                let line_width = UnicodeWidthStr::width(&self.text[range.clone()]);
                let mut spans = Vec::new();
                if indent > 0 {
                    spans.push(Span::raw(" ".repeat(indent)));
                }
                spans.push(Span::styled(" ", self.style));
                spans.extend(self.segments(range, &link_ranges));
                spans.push(Span::styled(
                    " ".repeat(inner.saturating_sub(line_width) + 1),
                    self.style,
                ));
                Line::from(spans)
            })
            .collect()
    }

    fn link_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = self
            .links
            .iter()
            .filter(|phrase| !phrase.is_empty())
            .flat_map(|phrase| {
                self.text
                    .match_indices(phrase.as_str())
                    .map(|(start, m)| start..start + m.len())
            })
            .collect();
        ranges.sort_by_key(|r| r.start);
        ranges
    }

    fn segments(&self, line: Range<usize>, links: &[Range<usize>]) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut pos = line.start;

        for link in links {
            let start = link.start.max(pos);
            let end = link.end.min(line.end);
            if start >= end {
                continue;
            }
            if pos < start {
                spans.push(Span::styled(self.text[pos..start].to_string(), self.style));
            }
            spans.push(Span::styled(self.text[start..end].to_string(), self.link_style));
            pos = end;
        }

        if pos < line.end {
            spans.push(Span::styled(self.text[pos..line.end].to_string(), self.style));
        }
        spans
    }
}

/// Wrap `text` to `width` columns.
///
/// Returns byte ranges into `text`, one per visual line. Newlines always
/// break; words wider than `width` are split between characters.
pub fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut base = 0;

    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, base, width, &mut out);
        base += paragraph.len() + 1;
    }

    out
}

fn wrap_paragraph(paragraph: &str, base: usize, width: usize, out: &mut Vec<Range<usize>>) {
    let mut current: Option<Range<usize>> = None;
    let mut current_width = 0;

    for (start, word) in split_words(paragraph) {
        let word_width = UnicodeWidthStr::width(word);

        if let Some(range) = current.as_mut() {
            if current_width + 1 + word_width <= width {
                range.end = base + start + word.len();
                current_width += 1 + word_width;
                continue;
            }
        }
        if let Some(range) = current.take() {
            out.push(range);
        }

        let mut piece_start = start;
        let mut piece_width = 0;
        for (i, c) in word.char_indices() {
            let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
            if piece_width > 0 && piece_width + char_width > width {
                out.push(base + piece_start..base + start + i);
                piece_start = start + i;
                piece_width = 0;
            }
            piece_width += char_width;
        }
        current = Some(base + piece_start..base + start + word.len());
        current_width = piece_width;
    }

    match current {
        Some(range) => out.push(range),
        None => out.push(base..base),
    }
}

fn split_words(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.split(' ')
        .scan(0usize, |pos, word| {
            let start = *pos;
            *pos += word.len() + 1;
            Some((start, word))
        })
        .filter(|(_, word)| !word.is_empty())
}
