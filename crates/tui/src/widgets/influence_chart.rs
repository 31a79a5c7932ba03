//! Influence chart widget - influence and volatility curves over the
//! session timeline.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

/// Chart of the per-minute influence score and volatility blend.
///
/// Both series live in `[0, 1]`, so the Y axis is fixed and frames never
/// rescale as the session plays.
pub struct InfluenceChart<'a> {
    /// Influence score per minute, oldest first.
    influence: &'a [f64],
    /// Volatility per minute, oldest first.
    volatility: &'a [f64],
    /// Chart title.
    title: &'a str,
    /// Total minutes in the session (X axis extent).
    total_minutes: usize,
}

impl<'a> InfluenceChart<'a> {
    /// Create a chart over the played history.
    pub fn new(influence: &'a [f64], volatility: &'a [f64]) -> Self {
        Self {
            influence,
            volatility,
            title: "Influence",
            total_minutes: 0,
        }
    }

    /// Set the chart title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Fix the X axis to the full session length.
    pub fn total_minutes(mut self, total: usize) -> Self {
        self.total_minutes = total;
        self
    }
}

impl Widget for InfluenceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.influence.is_empty() {
            let block = Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            block.render(area, buf);
            return;
        }

        let influence_data: Vec<(f64, f64)> = self
            .influence
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        let volatility_data: Vec<(f64, f64)> = self
            .volatility
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();

        let x_max = self.total_minutes.max(self.influence.len()).max(2) as f64 - 1.0;

        let datasets = vec![
            Dataset::default()
                .name("influence")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&influence_data),
            Dataset::default()
                .name("volatility")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&volatility_data),
        ];

        let x_labels: Vec<Line> = vec![
            Line::from("0"),
            Line::from(format!("{}", (x_max as usize) / 2)),
            Line::from(format!("{}", x_max as usize)),
        ];
        let y_labels: Vec<Line> = vec![
            Line::from("0.0"),
            Line::from("0.5"),
            Line::from("1.0"),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White)),
            )
            .x_axis(
                Axis::default()
                    .title("Minute")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, 1.0])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}
