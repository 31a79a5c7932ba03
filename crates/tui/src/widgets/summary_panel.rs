//! Summary panel widget - end-of-session aggregates.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use types::{RiskLevel, SessionSummary};

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    }
}

/// Panel showing the session summary once playback completes.
pub struct SummaryPanel<'a> {
    summary: Option<&'a SessionSummary>,
}

impl<'a> SummaryPanel<'a> {
    /// Create a panel over the summary, if available yet.
    pub fn new(summary: Option<&'a SessionSummary>) -> Self {
        Self { summary }
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Session Summary")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let Some(summary) = self.summary else {
            Paragraph::new("Session in progress…")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        };

        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
        let mut lines = vec![
            Line::from(vec![
                label("Outcome: "),
                Span::styled(
                    summary.direction.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({:.0}% of minutes)", summary.confidence * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                label("Character: "),
                Span::styled(summary.character.clone(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                label("Avg volatility: "),
                Span::styled(
                    format!("{:.3}", summary.average_volatility),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(vec![
                label("Risk: "),
                Span::styled(
                    summary.risk.level.to_string(),
                    Style::default()
                        .fg(risk_color(summary.risk.level))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", summary.risk.advice),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ];

        if !summary.dominant_rulers.is_empty() {
            lines.push(Line::from(label("Dominant rulers:")));
            for share in &summary.dominant_rulers {
                lines.push(Line::from(Span::styled(
                    format!("  {} {:.1}%", share.ruler, share.percentage),
                    Style::default().fg(Color::Magenta),
                )));
            }
        }

        for window in &summary.windows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", window.kind),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    window.minutes.join(", "),
                    Style::default().fg(Color::White),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", window.kind.recommendation()),
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
