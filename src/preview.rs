//! Still-frame preview of a generated script.
//!
//! The ASS file only lives in a temporary directory for the duration of one
//! ffmpeg call; the caller keeps the rendered image.

use crate::config::Mode;
use crate::convert::ConversionOutcome;
use crate::error::{AssgenError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info};

/// ffmpeg `-vf` chain that burns the script into the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoFilter {
    /// Pad the video to the canvas width on the right, then draw subtitles.
    PadAndSubtitles { canvas_width: u32, color: String },
    Subtitles,
    /// libass `ass` filter, which honours `\pos` and `\clip` exactly.
    Ass,
}

impl VideoFilter {
    pub fn for_mode(mode: Mode, canvas_width: u32, canvas_color: &str) -> Self {
        match mode {
            Mode::Canvas => VideoFilter::PadAndSubtitles {
                canvas_width,
                color: canvas_color.to_string(),
            },
            Mode::Horizontal => VideoFilter::Subtitles,
            Mode::Chat => VideoFilter::Ass,
        }
    }

    pub fn chain(&self, ass_path: &Path) -> String {
        let escaped = escape_filter_path(ass_path);
        match self {
            VideoFilter::PadAndSubtitles {
                canvas_width,
                color,
            } => format!(
                "pad=width={}:height=ih:x=0:y=0:color={},subtitles='{}'",
                canvas_width, color, escaped
            ),
            VideoFilter::Subtitles => format!("subtitles='{}'", escaped),
            VideoFilter::Ass => format!("ass=filename='{}'", escaped),
        }
    }
}

/// Escape a path for use inside an ffmpeg filter argument.
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").replace(':', "\\:")
}

/// Timestamp of the preview frame.
///
/// Chat overlays need some history on screen, so they look further in.
/// Videos shorter than the default seek use their midpoint.
pub fn seek_point(mode: Mode, duration: Option<f64>) -> f64 {
    let default = match mode {
        Mode::Chat => 120.0,
        Mode::Canvas | Mode::Horizontal => 10.0,
    };

    match duration {
        Some(d) if d.is_finite() && d > 0.0 && d < default => d / 2.0,
        _ => default,
    }
}

#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub video: PathBuf,
    pub image: PathBuf,
    pub ffmpeg_path: String,
    pub seek_seconds: f64,
    pub show_progress: bool,
}

/// Removes the temporary script directory when dropped.
struct TempCleanupGuard {
    temp_dir: Option<TempDir>,
}

impl TempCleanupGuard {
    fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| {
            AssgenError::Io(std::io::Error::other(format!(
                "Failed to create temp directory: {}",
                e
            )))
        })?;
        Ok(Self {
            temp_dir: Some(temp_dir),
        })
    }

    fn path(&self) -> &Path {
        self.temp_dir
            .as_ref()
            .map(|d| d.path())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl Drop for TempCleanupGuard {
    fn drop(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            debug!("Cleaning up preview directory: {:?}", temp_dir.path());
        }
    }
}

/// Generate a script with `generate` into a temporary file and render one
/// frame of `request.video` with it.
pub async fn render_preview<F>(
    request: &PreviewRequest,
    filter: &VideoFilter,
    generate: F,
) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> ConversionOutcome,
{
    if !request.video.exists() {
        return Err(AssgenError::FileNotFound(request.video.display().to_string()));
    }

    let guard = TempCleanupGuard::new()?;
    let ass_path = guard.path().join("preview.ass");

    let outcome = generate(&ass_path);
    if !outcome.success {
        return Err(AssgenError::Render(outcome.message));
    }
    debug!("Preview script: {}", outcome.message);

    let spinner = request.show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Rendering preview frame...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let seek = format!("{:.3}", request.seek_seconds);
    let chain = filter.chain(&ass_path);
    debug!("ffmpeg -vf {}", chain);

    let output = tokio::process::Command::new(&request.ffmpeg_path)
        .arg("-y")
        .arg("-i")
        .arg(&request.video)
        .args(["-ss", &seek, "-vf", &chain, "-vframes", "1"])
        .arg(&request.image)
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            if let Some(pb) = spinner {
                pb.abandon_with_message("✗ Preview failed");
            }
            return Err(AssgenError::Render(format!(
                "Failed to run ffmpeg '{}': {}",
                request.ffmpeg_path, e
            )));
        }
    };

    if !output.status.success() || !request.image.exists() {
        if let Some(pb) = spinner {
            pb.abandon_with_message("✗ Preview failed");
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
        return Err(AssgenError::Render(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
        )));
    }

    if let Some(pb) = spinner {
        pb.finish_with_message(format!("✓ Preview at {:.1}s", request.seek_seconds));
    }
    info!("Preview frame written to {}", request.image.display());

    Ok(request.image.clone())
}
