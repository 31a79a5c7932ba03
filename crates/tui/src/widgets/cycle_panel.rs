//! Cycle panel widget - the current minute's astrological state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use types::{Direction, PredictionRecord};

fn direction_color(direction: Direction) -> Color {
    match direction {
        Direction::Bullish => Color::Green,
        Direction::Bearish => Color::Red,
        Direction::Neutral => Color::Gray,
        Direction::Uncertain => Color::Magenta,
    }
}

/// Panel showing the most recently played minute.
pub struct CyclePanel<'a> {
    record: Option<&'a PredictionRecord>,
}

impl<'a> CyclePanel<'a> {
    /// Create a panel over the latest record, if any.
    pub fn new(record: Option<&'a PredictionRecord>) -> Self {
        Self { record }
    }
}

impl Widget for CyclePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Current Minute")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let Some(record) = self.record else {
            Paragraph::new("Waiting for playback…")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        };

        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
        let lines = vec![
            Line::from(vec![
                label("Time: "),
                Span::styled(
                    record.time_label(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("Moon: "),
                Span::styled(record.longitude.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                label("Segment: "),
                Span::styled(
                    record.segment.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {:.0}%", record.segment_progress * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                label("Major period: "),
                Span::styled(
                    record.cycle.major.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {:.1}%", record.cycle.major_progress * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                label("Sub period: "),
                Span::styled(
                    record.cycle.sub.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {:.1}%", record.cycle.sub_progress * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                label("Volatility: "),
                Span::styled(
                    format!("{:.3}", record.volatility),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(vec![
                label("Direction: "),
                Span::styled(
                    record.direction.to_string(),
                    Style::default()
                        .fg(direction_color(record.direction))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("Influence: "),
                Span::styled(
                    format!("{:.3}", record.influence),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
