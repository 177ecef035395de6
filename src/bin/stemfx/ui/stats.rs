//! Stats bar widget - shows the selected stem, its length and levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use stemfx::Stem;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the stats bar
pub fn render_stats(
    frame: &mut Frame,
    area: Rect,
    stem: &Stem,
    index: usize,
    count: usize,
    stats: &AudioStats,
) {
    let block = Block::default()
        .title(" stemfx ")
        .borders(Borders::ALL);

    let sample_rate_khz = stem.buffer.sample_rate() as f32 / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", stem.name),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("({}/{})  ", index + 1, count),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.2}s  ", stem.buffer.duration_seconds()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{} samples  ", stem.buffer.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate_khz),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
