use anyhow::{Context, Result};
use assgen::config::{Config, Mode};
use assgen::interactive::run_interactive_wizard;
use assgen::pipeline::{
    derive_output_path, print_summary, run_job, DimensionSource, JobConfig, StyleOverrides,
};
use assgen::style::{parse_colour, ChatPreset};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "assgen")]
#[command(version, about = "Generate styled ASS subtitles for ffmpeg")]
#[command(
    long_about = "Convert LRC/SRT/VTT/TXT subtitles into ASS scripts laid out for a side canvas, \
bottom-centred horizontal video, or a scrolling chat box overlay. Run without INPUT for an \
interactive wizard."
)]
struct Cli {
    /// Subtitle source (.lrc, .srt, .vtt, .txt). Omit to start the wizard.
    input: Option<PathBuf>,

    /// Output ASS file (defaults to <input>_<mode>.ass)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Layout mode: canvas, horizontal, chat (defaults to the configured mode)
    #[arg(short, long)]
    mode: Option<String>,

    /// Video to read dimensions from
    #[arg(long, conflicts_with_all = ["width", "height"])]
    video: Option<PathBuf>,

    /// Video width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Video height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Total canvas width (canvas mode)
    #[arg(long)]
    canvas_width: Option<u32>,

    /// Chat preset: bilibili, weibo (chat mode)
    #[arg(long)]
    preset: Option<String>,

    /// Font family
    #[arg(long)]
    font_name: Option<String>,

    /// Font size in pixels
    #[arg(long)]
    font_size: Option<u32>,

    /// Text colour: a name (white, yellow, light-blue, ...) or &HAABBGGRR
    #[arg(long)]
    colour: Option<String>,

    /// Characters per line, 0 to disable wrapping
    #[arg(long)]
    wrap_width: Option<usize>,

    /// Render one preview frame to this image (requires --video)
    #[arg(long, requires = "video")]
    preview: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn install_ctrlc_handler() {
    // dialoguer hides the cursor while a prompt is open.
    let result = ctrlc::set_handler(|| {
        let _ = console::Term::stderr().show_cursor();
        eprintln!("\nInterrupted");
        std::process::exit(130);
    });
    if let Err(e) = result {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }
}

fn build_job(cli: &Cli, config: &mut Config, input: PathBuf) -> Result<JobConfig> {
    let mode: Mode = match cli.mode {
        Some(ref m) => m.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => config.default_mode,
    };

    let preset = cli
        .preset
        .as_deref()
        .map(|p| p.parse::<ChatPreset>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let colour = cli
        .colour
        .as_deref()
        .map(parse_colour)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let overrides = StyleOverrides {
        preset,
        font_name: cli.font_name.clone(),
        font_size: cli.font_size,
        colour,
        wrap_width: cli.wrap_width,
        canvas_width: cli.canvas_width,
    };
    overrides.apply(config, mode);

    let dimensions = match (&cli.video, cli.width, cli.height) {
        (Some(video), _, _) => DimensionSource::Video(video.clone()),
        (None, Some(width), Some(height)) => DimensionSource::Fixed { width, height },
        _ => anyhow::bail!("Provide --video or both --width and --height"),
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&input, mode));

    Ok(JobConfig {
        mode,
        input,
        output,
        dimensions,
        preview: cli.preview.clone(),
        show_progress: true,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    install_ctrlc_handler();

    let (job, config) = match cli.input.clone() {
        Some(input) => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }
            let mut config = Config::load().context("Failed to load configuration")?;
            let job = build_job(&cli, &mut config, input)?;
            (job, config)
        }
        None => {
            let result = run_interactive_wizard()?;
            (result.job, result.config)
        }
    };

    config
        .validate()
        .context("Configuration validation failed")?;

    info!("Input:  {}", job.input.display());
    info!("Output: {}", job.output.display());
    info!("Mode:   {}", job.mode);

    let result = run_job(&job, &config)
        .await
        .context("ASS generation failed")?;

    print_summary(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("assgen").chain(args.iter().copied()))
    }

    #[test]
    fn test_build_job_fixed_dimensions() {
        let cli = cli(&[
            "song.lrc", "-m", "chat", "--width", "1080", "--height", "1920", "--preset", "weibo",
            "--colour", "yellow",
        ]);
        let mut config = Config::default();
        let job = build_job(&cli, &mut config, PathBuf::from("/tmp/song.lrc")).unwrap();

        assert_eq!(job.mode, Mode::Chat);
        assert_eq!(job.output, PathBuf::from("/tmp/song_chat.ass"));
        assert_eq!(
            job.dimensions,
            DimensionSource::Fixed {
                width: 1080,
                height: 1920
            }
        );
        assert_eq!(config.chat.font_size, 15);
        assert_eq!(config.chat.primary_colour, "&H0000FFFF");
    }

    #[test]
    fn test_build_job_requires_dimensions() {
        let cli = cli(&["song.lrc"]);
        let mut config = Config::default();
        assert!(build_job(&cli, &mut config, PathBuf::from("song.lrc")).is_err());
    }

    #[test]
    fn test_build_job_rejects_bad_mode() {
        let cli = cli(&["song.lrc", "-m", "diagonal", "--width", "1", "--height", "1"]);
        let mut config = Config::default();
        assert!(build_job(&cli, &mut config, PathBuf::from("song.lrc")).is_err());
    }

    #[test]
    fn test_default_mode_from_config() {
        let cli = cli(&["a.srt", "--video", "clip.mp4", "-o", "custom.ass"]);
        let mut config = Config {
            default_mode: Mode::Horizontal,
            ..Config::default()
        };
        let job = build_job(&cli, &mut config, PathBuf::from("a.srt")).unwrap();

        assert_eq!(job.mode, Mode::Horizontal);
        assert_eq!(job.output, PathBuf::from("custom.ass"));
        assert_eq!(job.dimensions, DimensionSource::Video(PathBuf::from("clip.mp4")));
    }
}
