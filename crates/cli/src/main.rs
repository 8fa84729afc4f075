#![deny(unsafe_code)]
//! CLI binary for the dot-matrix renderer.
//!
//! Subcommands:
//! - `render`: animate an image (or background + subject) offline, write PNG(s)
//! - `defaults`: print the default configuration as JSON

mod error;

use clap::{Parser, Subcommand};
use dotmatrix_core::{Animation, DotMatrix, DotMatrixConfig, EngineError, ImageSource, Layers};
use dotmatrix_raster::decode::load_image;
use dotmatrix_raster::snapshot::{sequence_name, write_png};
use dotmatrix_raster::RasterSurface;
use error::CliError;
use std::path::PathBuf;
use std::process;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "dotmatrix", about = "Dot-matrix image animation renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at DEBUG level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the animation at a fixed frame rate and write the last frame as PNG.
    Render {
        /// Background image (PNG or JPEG).
        #[arg(long)]
        image: PathBuf,

        /// Optional subject image, drawn centered over the background.
        #[arg(long)]
        subject: Option<PathBuf>,

        /// Surface width in pixels. Defaults to the background image width.
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Surface height in pixels. Defaults to the background image height.
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Number of frames to play. Defaults to just enough to finish the reveal.
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        frames: Option<u64>,

        /// Simulated frame rate.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Noise seed; overrides the config's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        config: String,

        /// Output file path for the last frame.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Also write every frame as a numbered PNG into this directory.
        #[arg(long)]
        sequence: Option<PathBuf>,
    },
    /// Print the default configuration as JSON.
    Defaults,
}

/// Timestamp of frame `index` when playing at `fps`.
fn frame_timestamp(index: u64, fps: f64) -> f64 {
    index as f64 * 1000.0 / fps
}

/// Frames needed at `fps` until a frame lands at or after `duration_ms`.
fn frames_to_reveal(duration_ms: f64, fps: f64) -> u64 {
    (duration_ms * fps / 1000.0).ceil() as u64 + 1
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Defaults => {
            println!(
                "{}",
                serde_json::to_string_pretty(&DotMatrixConfig::default())?
            );
        }
        Command::Render {
            image,
            subject,
            width,
            height,
            frames,
            fps,
            seed,
            config,
            output,
            sequence,
        } => {
            if !(fps > 0.0 && fps.is_finite()) {
                return Err(CliError::Input(format!("--fps must be positive, got {fps}")));
            }
            let params: serde_json::Value = serde_json::from_str(&config)
                .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
            let mut config = DotMatrixConfig::from_json(&params)?;
            if seed.is_some() {
                config.seed = seed;
            }
            let duration_ms = config.reveal_duration_ms;
            let used_seed = config.seed.unwrap_or(dotmatrix_core::DEFAULT_SEED);

            let background = ImageSource::new(load_image(&image)?);
            let width = width.unwrap_or(background.width());
            let height = height.unwrap_or(background.height());
            if width == 0 || height == 0 {
                return Err(CliError::Input("surface dimensions must be non-zero".into()));
            }
            let layers = match &subject {
                Some(path) => Layers::dual(background, ImageSource::new(load_image(path)?)),
                None => Layers::single(background),
            };

            if let Some(dir) = &sequence {
                std::fs::create_dir_all(dir)
                    .map_err(|e| CliError::Io(format!("{}: {e}", dir.display())))?;
            }

            let frames = frames.unwrap_or_else(|| frames_to_reveal(duration_ms, fps));
            let mut dm = DotMatrix::new(config, layers)?;
            let mut surface = RasterSurface::new(width, height);
            dm.on_resize(width, height);

            for index in 0..frames {
                let ts = frame_timestamp(index, fps);
                if !dm.on_frame(ts, &mut surface) {
                    return Err(EngineError::Surface(format!(
                        "animation stopped at frame {index}"
                    ))
                    .into());
                }
                if let Some(dir) = &sequence {
                    write_png(&surface, &dir.join(sequence_name(index as usize)))?;
                }
                debug!(frame = index, timestamp_ms = ts, drawn = dm.last_stats().drawn, "frame");
            }

            write_png(&surface, &output)?;

            let revealed = dm.clock().is_revealed();
            let grid = dm.grid();
            if cli.json {
                let info = serde_json::json!({
                    "image": image.display().to_string(),
                    "subject": subject.as_ref().map(|p| p.display().to_string()),
                    "width": width,
                    "height": height,
                    "columns": grid.columns(),
                    "rows": grid.rows(),
                    "frames": frames,
                    "fps": fps,
                    "seed": used_seed,
                    "revealed": revealed,
                    "output": output.display().to_string(),
                    "sequence": sequence.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({width}x{height}, {}x{} dots, {frames} frames at {fps} fps, seed {used_seed}{}) -> {}",
                    image.display(),
                    grid.columns(),
                    grid.rows(),
                    if revealed { "" } else { ", reveal incomplete" },
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
