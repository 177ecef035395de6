//! Waveform overview widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Reduce `samples` to about `points` chart points.
///
/// Each bucket contributes its most extreme sample so short transients stay
/// visible at any zoom.
pub fn overview(samples: &[f32], points: usize) -> Vec<(f64, f64)> {
    if samples.is_empty() || points == 0 {
        return Vec::new();
    }

    let bucket = samples.len().div_ceil(points);
    samples
        .chunks(bucket)
        .enumerate()
        .map(|(i, chunk)| {
            let extreme = chunk
                .iter()
                .copied()
                .fold(0.0f32, |acc, x| if x.abs() > acc.abs() { x } else { acc });
            let x = (i * bucket) as f64 / samples.len() as f64;
            (x, f64::from(extreme))
        })
        .collect()
}

/// Render the waveform overview
pub fn render_waveform(frame: &mut Frame, area: Rect, data: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Waveform ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
