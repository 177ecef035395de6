//! TUI module for stemfx
//!
//! Browse the rendered stems: level stats, an overview waveform and the
//! spectrum around each stem's loudest moment.

mod spectrum;
mod stats;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;
use stemfx::Stem;

use spectrum::{render_spectrum, SpectrumAnalyzer, FFT_SIZE};
use stats::{render_stats, AudioStats};
use waveform::{overview, render_waveform};

/// Points plotted per waveform
const WAVEFORM_POINTS: usize = 1024;

/// What the selected stem looks like, computed once per selection
struct StemView {
    stats: AudioStats,
    waveform: Vec<(f64, f64)>,
    spectrum: Vec<(f64, f64)>,
}

impl StemView {
    fn new(stem: &Stem, analyzer: &mut SpectrumAnalyzer) -> Self {
        let samples = stem.buffer.samples();
        analyzer.update(&loudest_window(samples, FFT_SIZE));

        Self {
            stats: AudioStats::from_buffer(samples),
            waveform: overview(samples, WAVEFORM_POINTS),
            spectrum: analyzer.data().to_vec(),
        }
    }
}

/// `len` samples centred on the loudest sample, zero-padded if the stem is
/// shorter.
fn loudest_window(samples: &[f32], len: usize) -> Vec<f32> {
    let mut window = vec![0.0f32; len];
    if samples.is_empty() {
        return window;
    }

    let loudest = samples
        .iter()
        .enumerate()
        .fold((0, 0.0f32), |best, (i, &x)| if x.abs() > best.1 { (i, x.abs()) } else { best })
        .0;
    let start = loudest.saturating_sub(len / 2).min(samples.len().saturating_sub(len));
    let end = (start + len).min(samples.len());
    window[..end - start].copy_from_slice(&samples[start..end]);
    window
}

/// UI application state
pub struct PreviewApp {
    stems: Vec<Stem>,
    selected: usize,
    analyzer: SpectrumAnalyzer,
    view: Option<StemView>,
    should_quit: bool,
}

impl PreviewApp {
    pub fn new(stems: Vec<Stem>) -> Self {
        let sample_rate = stems
            .first()
            .map(|stem| stem.buffer.sample_rate())
            .unwrap_or(stemfx::DEFAULT_SAMPLE_RATE);
        let mut app = Self {
            stems,
            selected: 0,
            analyzer: SpectrumAnalyzer::new(FFT_SIZE, sample_rate as f32),
            view: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn refresh(&mut self) {
        self.view = self
            .stems
            .get(self.selected)
            .map(|stem| StemView::new(stem, &mut self.analyzer));
    }

    fn select(&mut self, offset: isize) {
        let count = self.stems.len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected as isize + offset).rem_euclid(count as isize) as usize;
        self.refresh();
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => self.select(1),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => self.select(-1),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: stats, waveform, spectrum, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Stats bar
                Constraint::Min(8),     // Waveform
                Constraint::Length(12), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        if let (Some(stem), Some(view)) = (self.stems.get(self.selected), &self.view) {
            render_stats(
                frame,
                chunks[0],
                stem,
                self.selected,
                self.stems.len(),
                &view.stats,
            );
            render_waveform(frame, chunks[1], &view.waveform);
            render_spectrum(frame, chunks[2], &view.spectrum);
        }

        let help = Paragraph::new(" [Q] Quit  [Tab/←/→] Switch stem")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
