use std::{
    io::{BufRead as _, IsTerminal as _, Write as _},
    path::PathBuf,
    time::Instant,
};

use anyhow::Context as _;
use clap::Parser;

/// Turn PDFs and image sequences into slideshow or scrolling videos.
///
/// Inputs are PDF files, image files or directories of images and PDFs (sorted naturally).
/// GIFs inside directories are skipped unless --gif is set.
#[derive(Parser, Debug)]
#[command(name = "ptv", version)]
struct Cli {
    /// PDF files, images or directories, in display order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Resolution as WIDTHxHEIGHT; 0 takes the size of the first image.
    #[arg(short = 'r', long = "resolution", value_name = "WxH")]
    resolution: Option<String>,

    /// Frames per second.
    #[arg(short = 'f', long)]
    fps: Option<f64>,

    /// Seconds each page or image is shown.
    #[arg(short = 's', long = "seconds-per-item", value_name = "SECONDS")]
    seconds_per_item: Option<f64>,

    /// Total scroll duration in seconds; overrides --seconds-per-item for scroll styles.
    #[arg(short = 'd', long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Style: FRAMES, UP, DOWN, LEFT or RIGHT (single letters accepted).
    #[arg(short = 'a', long = "style")]
    style: Option<String>,

    /// Output video path (default: derived from the first input).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Render GIF frames found in directories.
    #[arg(long)]
    gif: bool,

    /// Read directories back to front.
    #[arg(long = "rev-seq")]
    rev_seq: bool,

    /// PDF rasterisation resolution.
    #[arg(long)]
    dpi: Option<u32>,

    /// JSON settings file; command-line flags take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write frames as JPEGs into this directory instead of encoding a video.
    #[arg(long = "frames-dir", value_name = "DIR")]
    frames_dir: Option<PathBuf>,

    /// Replace the output file if it exists.
    #[arg(long)]
    overwrite: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("install tracing subscriber")?;

    let cli = Cli::parse();
    let settings = build_settings(&cli)?;

    enum Target {
        Video(PathBuf),
        Frames(PathBuf),
    }
    let target = match &cli.frames_dir {
        Some(dir) => Target::Frames(dir.clone()),
        None => {
            let out = match &cli.output {
                Some(out) => out.clone(),
                None => ptv::default_output_path(cli.inputs.first().context("no inputs given")?),
            };
            if settings.overwrite {
                Target::Video(out)
            } else {
                Target::Video(ptv::unique_output_path(&out))
            }
        }
    };
    let target_path = match &target {
        Target::Video(p) | Target::Frames(p) => p.clone(),
    };

    eprintln!("{settings}");
    eprintln!("Output: {}", target_path.display());
    if !cli.yes && std::io::stdin().is_terminal() && !confirm()? {
        eprintln!("aborted");
        return Ok(());
    }

    let start = Instant::now();
    let prepared = ptv::prepare(&cli.inputs, &settings)?;
    let report = match target {
        Target::Video(out) => {
            let mut sink = ptv::FfmpegSink::new(ptv::FfmpegSinkOpts {
                out_path: out,
                overwrite: settings.overwrite,
            });
            ptv::render_to_sink(prepared.images, prepared.viewport, settings.style, &mut sink)?
        }
        Target::Frames(dir) => {
            let mut sink = ptv::ImageSequenceSink::new(dir);
            ptv::render_to_sink(prepared.images, prepared.viewport, settings.style, &mut sink)?
        }
    };

    if let Some(w) = &report.pacing_warning {
        eprintln!("warning: {}", w.message);
    }
    eprintln!(
        "wrote {} frames ({}x{}) to {} in {:.2}s",
        report.frames,
        prepared.viewport.width,
        prepared.viewport.height,
        target_path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn build_settings(cli: &Cli) -> anyhow::Result<ptv::Settings> {
    let mut s = match &cli.config {
        Some(path) => ptv::Settings::from_json_path(path)?,
        None => ptv::Settings::default(),
    };
    if let Some(res) = &cli.resolution {
        (s.width, s.height) = ptv::parse_resolution(res)?;
    }
    if let Some(fps) = cli.fps {
        s.fps = fps;
    }
    if let Some(spp) = cli.seconds_per_item {
        s.seconds_per_item = spp;
    }
    if let Some(duration) = cli.duration {
        s.duration = duration;
    }
    if let Some(style) = &cli.style {
        s.style = style.parse()?;
    }
    if let Some(dpi) = cli.dpi {
        s.dpi = dpi;
    }
    s.render_gifs |= cli.gif;
    s.reverse |= cli.rev_seq;
    s.overwrite |= cli.overwrite;
    s.validate()?;
    Ok(s)
}

fn confirm() -> anyhow::Result<bool> {
    eprint!("Are these values correct: [Y/n] ");
    std::io::stderr().flush().context("flush prompt")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}
