//! stemfx - render effect stems from a source recording
//!
//! Run with: cargo run -- render path/to/source.wav --out-dir stems

mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use stemfx::{
    io::{read_mono, write_stems},
    render_stems, EffectConfig, DEFAULT_SAMPLE_RATE,
};
use tracing_subscriber::EnvFilter;

use ui::PreviewApp;

#[derive(Parser)]
#[command(name = "stemfx", version, about = "Cut riser, glitch and hit stems from a recording")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every stem to <out-dir>/<name>.wav
    Render {
        source: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },
    /// Render every stem and inspect them in the terminal
    Preview {
        source: PathBuf,
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.cmd {
        Command::Render {
            source,
            out_dir,
            sample_rate,
        } => {
            init_tracing();
            let source = read_mono(&source, sample_rate)
                .wrap_err_with(|| format!("failed to load {}", source.display()))?;
            let stems = render_stems(&source, &EffectConfig::default())?;
            let paths = write_stems(&out_dir, &stems)
                .wrap_err_with(|| format!("failed to write stems to {}", out_dir.display()))?;
            tracing::info!(count = paths.len(), out_dir = %out_dir.display(), "done");
            Ok(())
        }
        Command::Preview {
            source,
            sample_rate,
        } => {
            // No subscriber here: log lines would tear the alternate screen
            let source = read_mono(&source, sample_rate)
                .wrap_err_with(|| format!("failed to load {}", source.display()))?;
            let stems = render_stems(&source, &EffectConfig::default())?;

            let mut terminal = ratatui::init();
            let result = PreviewApp::new(stems).run(&mut terminal);
            ratatui::restore();
            result
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
