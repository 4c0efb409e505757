pub mod chat;
pub mod lrc;
pub mod srt;
pub mod time;
pub mod txt;

pub use chat::{format_speaker, parse_chat_log, read_chat_source, ChatMessage};
pub use time::{
    ass_time_to_seconds, seconds_to_ass_time, seconds_to_lrc_time, text_time_to_seconds,
    TimeFormat,
};

use crate::error::{AssgenError, Result};
use std::path::Path;
use tracing::{debug, info};

/// One timed line of text, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEvent {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SubtitleEvent {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Timed-text source formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Lrc,
    Srt,
    Vtt,
    /// `[HH:MM:SS,mmm --> HH:MM:SS,mmm] text` per line.
    Txt,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "lrc" => Ok(SourceFormat::Lrc),
            "srt" => Ok(SourceFormat::Srt),
            "vtt" => Ok(SourceFormat::Vtt),
            "txt" => Ok(SourceFormat::Txt),
            "" => Err(AssgenError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(AssgenError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Parse already-decoded file content.
    pub fn parse(&self, content: &str) -> Vec<SubtitleEvent> {
        match self {
            SourceFormat::Lrc => lrc::parse_lrc(content),
            SourceFormat::Srt | SourceFormat::Vtt => srt::parse_srt_vtt(content),
            SourceFormat::Txt => txt::parse_custom_txt(content),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Lrc => write!(f, "lrc"),
            SourceFormat::Srt => write!(f, "srt"),
            SourceFormat::Vtt => write!(f, "vtt"),
            SourceFormat::Txt => write!(f, "txt"),
        }
    }
}

/// Parse a subtitle file into events ordered by start time.
///
/// Malformed lines are skipped. The result may be empty; callers decide
/// whether that is fatal.
pub fn parse_subtitle_file(path: &Path) -> Result<Vec<SubtitleEvent>> {
    if !path.exists() {
        return Err(AssgenError::FileNotFound(path.display().to_string()));
    }

    let format = SourceFormat::from_path(path)?;
    let content = read_source(path)?;
    let events = normalize_events(format.parse(&content));

    info!(
        "Parsed {} events from {} ({})",
        events.len(),
        file_label(path),
        format
    );
    Ok(events)
}

/// Read a source file as UTF-8, dropping a leading BOM and normalising line endings.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| AssgenError::Parse {
        file: file_label(path),
        reason: e.to_string(),
    })?;

    let text = String::from_utf8(bytes).map_err(|e| AssgenError::Parse {
        file: file_label(path),
        reason: format!("not valid UTF-8: {}", e),
    })?;

    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(text.replace("\r\n", "\n"))
}

/// Drop events that violate `end > start` and sort by start, keeping file
/// order for equal starts.
fn normalize_events(events: Vec<SubtitleEvent>) -> Vec<SubtitleEvent> {
    let total = events.len();
    let mut kept: Vec<SubtitleEvent> = events
        .into_iter()
        .filter(|e| e.start.is_finite() && e.end.is_finite() && e.duration() > 0.0)
        .collect();

    if kept.len() < total {
        debug!(
            "Dropped {} events with non-positive duration",
            total - kept.len()
        );
    }

    kept.sort_by(|a, b| a.start.total_cmp(&b.start));
    kept
}

/// File name for user-facing messages, falling back to the full path.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_event_duration() {
        assert_eq!(SubtitleEvent::new(1.5, 4.0, "x").duration(), 2.5);
        assert_eq!(SubtitleEvent::new(4.0, 4.0, "x").duration(), 0.0);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/b.LRC")).unwrap(),
            SourceFormat::Lrc
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("x.vtt")).unwrap(),
            SourceFormat::Vtt
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("x.ass")),
            Err(AssgenError::UnsupportedFormat(_))
        ));
        assert!(SourceFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = parse_subtitle_file(Path::new("/definitely/not/here.lrc"));
        assert!(matches!(result, Err(AssgenError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "song.ass", b"[Script Info]");
        assert!(matches!(
            parse_subtitle_file(&path),
            Err(AssgenError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bom_and_crlf_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "bom.srt",
            "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n\r\n".as_bytes(),
        );

        let events = parse_subtitle_file(&path).unwrap();
        assert_eq!(events, vec![SubtitleEvent::new(1.0, 2.0, "Hello")]);
    }

    #[test]
    fn test_invalid_utf8_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "broken.lrc", &[0xff, 0xfe, 0x00, 0x5b]);

        let err = parse_subtitle_file(&path).unwrap_err();
        assert!(matches!(err, AssgenError::Parse { .. }));
        assert!(err.to_string().contains("broken.lrc"));
    }

    #[test]
    fn test_normalize_sorts_stably_and_drops_empty_ranges() {
        let events = vec![
            SubtitleEvent::new(5.0, 6.0, "late"),
            SubtitleEvent::new(1.0, 2.0, "first"),
            SubtitleEvent::new(1.0, 3.0, "second"),
            SubtitleEvent::new(4.0, 4.0, "zero"),
            SubtitleEvent::new(7.0, 6.5, "negative"),
        ];

        let result = normalize_events(events);
        let texts: Vec<&str> = result.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "late"]);
    }
}
