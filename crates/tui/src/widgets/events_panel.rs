//! Events panel widget - scrolling feed of flagged minutes.

use crate::widgets::EventEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Scrollable list of session events, oldest first.
pub struct EventsPanel<'a> {
    events: &'a [EventEntry],
    scroll: usize,
}

impl<'a> EventsPanel<'a> {
    /// Create a panel over the event feed.
    pub fn new(events: &'a [EventEntry]) -> Self {
        Self { events, scroll: 0 }
    }

    /// Scroll offset from the top of the feed.
    pub fn scroll_offset(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for EventsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!("Key Events ({})", self.events.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        if self.events.is_empty() {
            Paragraph::new("No events yet")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }

        let visible = area.height.saturating_sub(2) as usize;
        let max_scroll = self.events.len().saturating_sub(visible);
        let scroll = self.scroll.min(max_scroll);

        let lines: Vec<Line> = self
            .events
            .iter()
            .skip(scroll)
            .take(visible.max(1))
            .map(|event| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", event.time),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(event.label.clone(), Style::default().fg(Color::White)),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
