use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AssgenError, Result};

/// Pixel size of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

impl VideoDimensions {
    pub fn is_vertical(&self) -> bool {
        self.height > self.width
    }
}

impl std::fmt::Display for VideoDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Check that the ffprobe executable at `ffprobe` runs.
pub fn check_ffprobe(ffprobe: &str) -> Result<()> {
    let output = Command::new(ffprobe)
        .arg("-version")
        .output()
        .map_err(|e| {
            AssgenError::Probe(format!(
                "ffprobe not found at '{ffprobe}'. Please install FFmpeg (includes ffprobe). Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(AssgenError::Probe("ffprobe check failed".to_string()));
    }

    debug!("ffprobe is available");
    Ok(())
}

/// Read the width and height of the first video stream.
pub fn get_video_dimensions(input: &Path, ffprobe: &str) -> Result<VideoDimensions> {
    if !input.exists() {
        return Err(AssgenError::FileNotFound(input.display().to_string()));
    }

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "json",
        ])
        .arg(input)
        .output()
        .map_err(|e| AssgenError::Probe(format!("Failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AssgenError::Probe(format!("ffprobe failed: {}", stderr.trim())));
    }

    let dimensions = parse_dimensions_json(&String::from_utf8_lossy(&output.stdout))?;
    debug!("Video {} is {}", input.display(), dimensions);
    Ok(dimensions)
}

/// Extract dimensions from `ffprobe -of json` output.
pub fn parse_dimensions_json(json: &str) -> Result<VideoDimensions> {
    let probe: ProbeOutput = serde_json::from_str(json)?;

    let stream = probe
        .streams
        .into_iter()
        .find(|s| s.width.is_some() && s.height.is_some())
        .ok_or_else(|| AssgenError::Probe("No video stream found".to_string()))?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Ok(VideoDimensions { width, height })
        }
        (w, h) => Err(AssgenError::Probe(format!(
            "Invalid video dimensions: {:?}x{:?}",
            w, h
        ))),
    }
}

/// Container duration in seconds.
pub fn get_video_duration(input: &Path, ffprobe: &str) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
        .output()
        .map_err(|e| AssgenError::Probe(format!("Failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AssgenError::Probe(format!("ffprobe failed: {}", stderr.trim())));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    duration_str.trim().parse::<f64>().map_err(|e| {
        AssgenError::Probe(format!(
            "Failed to parse duration '{}': {e}",
            duration_str.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffprobe_available() -> bool {
        Command::new("ffprobe")
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_parse_dimensions_json() {
        let json = r#"{"programs": [], "streams": [{"width": 1080, "height": 1920}]}"#;
        let dims = parse_dimensions_json(json).unwrap();
        assert_eq!(
            dims,
            VideoDimensions {
                width: 1080,
                height: 1920
            }
        );
        assert!(dims.is_vertical());
        assert_eq!(dims.to_string(), "1080x1920");
    }

    #[test]
    fn test_parse_dimensions_skips_streams_without_size() {
        let json = r#"{"streams": [{"codec_type": "data"}, {"width": 640, "height": 360}]}"#;
        assert_eq!(parse_dimensions_json(json).unwrap().width, 640);
    }

    #[test]
    fn test_parse_dimensions_no_stream() {
        let result = parse_dimensions_json(r#"{"streams": []}"#);
        assert!(matches!(result, Err(AssgenError::Probe(_))));
        assert!(parse_dimensions_json("{}").is_err());
        assert!(matches!(
            parse_dimensions_json("not json"),
            Err(AssgenError::Json(_))
        ));
    }

    #[test]
    fn test_parse_dimensions_zero_rejected() {
        let result = parse_dimensions_json(r#"{"streams": [{"width": 0, "height": 720}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_ffprobe() {
        if !ffprobe_available() {
            eprintln!("Skipping test: ffprobe not available");
            return;
        }
        assert!(check_ffprobe("ffprobe").is_ok());
    }

    #[test]
    fn test_check_ffprobe_bad_path() {
        let result = check_ffprobe("/nonexistent/bin/ffprobe");
        assert!(matches!(result, Err(AssgenError::Probe(_))));
    }

    #[test]
    fn test_dimensions_file_not_found() {
        let result = get_video_dimensions(Path::new("/nonexistent/video.mp4"), "ffprobe");
        match result {
            Err(AssgenError::FileNotFound(path)) => assert!(path.contains("nonexistent")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }
}
