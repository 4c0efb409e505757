use crate::ass::{CanvasGeometry, ChatViewport};
use crate::config::{Config, Mode};
use crate::convert::{
    generate_canvas_ass, generate_chat_ass, generate_horizontal_ass, ConversionOutcome,
};
use crate::error::{AssgenError, Result};
use crate::preview::{render_preview, seek_point, PreviewRequest, VideoFilter};
use crate::probe::{check_ffprobe, get_video_dimensions, get_video_duration, VideoDimensions};
use crate::style::ChatPreset;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Where the target video size comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionSource {
    /// Probe the video with ffprobe.
    Video(PathBuf),
    Fixed { width: u32, height: u32 },
}

/// Per-run style changes layered over the loaded config.
#[derive(Debug, Clone, Default)]
pub struct StyleOverrides {
    pub preset: Option<ChatPreset>,
    pub font_name: Option<String>,
    pub font_size: Option<u32>,
    /// ASS colour code, already validated.
    pub colour: Option<String>,
    pub wrap_width: Option<usize>,
    pub canvas_width: Option<u32>,
}

impl StyleOverrides {
    /// Apply to the style section used by `mode`. A preset replaces the whole
    /// chat style before the individual fields are applied.
    pub fn apply(&self, config: &mut Config, mode: Mode) {
        match mode {
            Mode::Canvas => {
                let style = &mut config.canvas;
                if let Some(ref name) = self.font_name {
                    style.font_name = name.clone();
                }
                if let Some(size) = self.font_size {
                    style.font_size = size;
                }
                if let Some(ref colour) = self.colour {
                    style.primary_colour = colour.clone();
                }
                if let Some(width) = self.wrap_width {
                    style.wrap_width = width;
                }
                if let Some(width) = self.canvas_width {
                    style.canvas_width = width;
                }
            }
            Mode::Horizontal => {
                let style = &mut config.horizontal;
                if let Some(ref name) = self.font_name {
                    style.font_name = name.clone();
                }
                if let Some(size) = self.font_size {
                    style.font_size = size;
                }
                if let Some(ref colour) = self.colour {
                    style.primary_colour = colour.clone();
                }
                if let Some(width) = self.wrap_width {
                    style.wrap_width = width;
                }
            }
            Mode::Chat => {
                if let Some(preset) = self.preset {
                    config.chat = preset.style();
                }
                let style = &mut config.chat;
                if let Some(ref name) = self.font_name {
                    style.font_name = name.clone();
                }
                if let Some(size) = self.font_size {
                    style.font_size = size;
                }
                if let Some(ref colour) = self.colour {
                    style.primary_colour = colour.clone();
                }
                if let Some(width) = self.wrap_width {
                    style.wrap_width = width;
                }
            }
        }
    }
}

/// One conversion job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub mode: Mode,
    pub input: PathBuf,
    pub output: PathBuf,
    pub dimensions: DimensionSource,
    /// Render a still frame here after converting. Needs a video source.
    pub preview: Option<PathBuf>,
    pub show_progress: bool,
}

#[derive(Debug)]
pub struct JobResult {
    pub mode: Mode,
    pub output_path: PathBuf,
    pub dimensions: VideoDimensions,
    pub message: String,
    pub preview_path: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Default output path: `<stem>_<mode>.ass` next to the input.
pub fn derive_output_path(input: &Path, mode: Mode) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut output = input.to_path_buf();
    output.set_file_name(format!("{}_{}.ass", stem.to_string_lossy(), mode));
    output
}

pub fn resolve_dimensions(source: &DimensionSource, config: &Config) -> Result<VideoDimensions> {
    match source {
        DimensionSource::Video(path) => {
            check_ffprobe(&config.ffprobe_path)?;
            get_video_dimensions(path, &config.ffprobe_path)
        }
        DimensionSource::Fixed { width, height } => {
            if *width == 0 || *height == 0 {
                return Err(AssgenError::Config(format!(
                    "Video dimensions must be positive, got {}x{}",
                    width, height
                )));
            }
            Ok(VideoDimensions {
                width: *width,
                height: *height,
            })
        }
    }
}

/// Run the conversion for `mode` writing to `ass_path`.
pub fn convert(
    mode: Mode,
    input: &Path,
    ass_path: &Path,
    dimensions: VideoDimensions,
    config: &Config,
) -> ConversionOutcome {
    match mode {
        Mode::Canvas => {
            if config.canvas.canvas_width < dimensions.width {
                return ConversionOutcome::failed(format!(
                    "Canvas width {} is narrower than the video ({})",
                    config.canvas.canvas_width, dimensions.width
                ));
            }
            let geometry = CanvasGeometry {
                canvas_width: config.canvas.canvas_width,
                canvas_height: dimensions.height,
                video_width: dimensions.width,
            };
            generate_canvas_ass(input, ass_path, &config.canvas, geometry)
        }
        Mode::Horizontal => generate_horizontal_ass(
            input,
            ass_path,
            &config.horizontal,
            dimensions.width,
            dimensions.height,
        ),
        Mode::Chat => {
            let viewport = ChatViewport {
                video_width: dimensions.width,
                video_height: dimensions.height,
            };
            generate_chat_ass(input, ass_path, &config.chat, viewport)
        }
    }
}

/// Resolve the video size, write the ASS file and optionally render a preview.
pub async fn run_job(job: &JobConfig, config: &Config) -> Result<JobResult> {
    let start_time = Instant::now();

    let dimensions = resolve_dimensions(&job.dimensions, config)?;
    info!(
        "Converting {} ({} mode, {})",
        job.input.display(),
        job.mode,
        dimensions
    );
    if job.mode == Mode::Canvas && !dimensions.is_vertical() {
        warn!(
            "Canvas layout expects a vertical video, got {}; the side panel may be narrow",
            dimensions
        );
    }

    let outcome = convert(job.mode, &job.input, &job.output, dimensions, config);
    if !outcome.success {
        return Err(AssgenError::Conversion(outcome.message));
    }

    let preview_path = match (&job.preview, &job.dimensions) {
        (Some(image), DimensionSource::Video(video)) => {
            let duration = match get_video_duration(video, &config.ffprobe_path) {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!("Could not read video duration, using default seek: {}", e);
                    None
                }
            };

            let request = PreviewRequest {
                video: video.clone(),
                image: image.clone(),
                ffmpeg_path: config.ffmpeg_path.clone(),
                seek_seconds: seek_point(job.mode, duration),
                show_progress: job.show_progress,
            };
            let filter = VideoFilter::for_mode(
                job.mode,
                config.canvas.canvas_width,
                &config.canvas.canvas_color,
            );

            let rendered = render_preview(&request, &filter, |ass_path| {
                convert(job.mode, &job.input, ass_path, dimensions, config)
            })
            .await?;
            Some(rendered)
        }
        (Some(_), DimensionSource::Fixed { .. }) => {
            warn!("Preview needs a video file (--video); skipping");
            None
        }
        (None, _) => None,
    };

    Ok(JobResult {
        mode: job.mode,
        output_path: job.output.clone(),
        dimensions,
        message: outcome.message,
        preview_path,
        elapsed: start_time.elapsed(),
    })
}

/// Print a summary of the job results.
pub fn print_summary(result: &JobResult) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                      ASS Generation Complete                   ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Output:     {}", result.output_path.display());
    println!("  Mode:       {}", result.mode);
    println!("  Video:      {}", result.dimensions);
    println!("  Result:     {}", result.message);
    if let Some(ref preview) = result.preview_path {
        println!("  Preview:    {}", preview.display());
    }
    println!("  Time:       {:.2}s", result.elapsed.as_secs_f64());
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
