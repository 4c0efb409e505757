// Chat transcripts: timestamped messages feeding the chat overlay.
use super::time::components_to_seconds;
use super::{parse_subtitle_file, read_source, SourceFormat};
use crate::error::{AssgenError, Result};
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};

/// A chat message at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub time: f64,
    pub text: String,
}

/// Parse an LRC-style chat log.
///
/// Tags may carry an hour field (`[HH:MM:SS.xx]`) or not (`[MM:SS.xx]`).
/// Message text goes through [`format_speaker`].
pub fn parse_chat_log(content: &str) -> Vec<ChatMessage> {
    let tag = Regex::new(r"\[(?:(\d{2}):)?(\d{2}):(\d{2})[.:](\d{2,3})\](.*)")
        .expect("Invalid regex");

    let mut messages = Vec::new();

    for line in content.lines() {
        let Some(caps) = tag.captures(line) else {
            continue;
        };

        let text = caps[5].trim();
        if text.is_empty() {
            continue;
        }

        let hours = caps.get(1).map_or("0", |m| m.as_str());
        match components_to_seconds(hours, &caps[2], &caps[3], &caps[4]) {
            Some(time) => messages.push(ChatMessage {
                time,
                text: format_speaker(text),
            }),
            None => debug!("Skipping chat line with bad timestamp: {}", line),
        }
    }

    messages.sort_by(|a, b| a.time.total_cmp(&b.time));
    messages
}

/// Render `"speaker message"` as `"speaker:message"`.
///
/// Splits on the first whitespace run; text without whitespace is unchanged.
pub fn format_speaker(text: &str) -> String {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((speaker, rest)) if !rest.trim_start().is_empty() => {
            format!("{}:{}", speaker, rest.trim_start())
        }
        _ => text.to_string(),
    }
}

/// Load chat messages from any supported source file.
///
/// `.lrc` files are read as chat logs; other formats go through the regular
/// subtitle parser and only their start times are used.
pub fn read_chat_source(path: &Path) -> Result<Vec<ChatMessage>> {
    if !path.exists() {
        return Err(AssgenError::FileNotFound(path.display().to_string()));
    }

    let messages = match SourceFormat::from_path(path)? {
        SourceFormat::Lrc => parse_chat_log(&read_source(path)?),
        _ => parse_subtitle_file(path)?
            .into_iter()
            .map(|event| ChatMessage {
                time: event.start,
                text: format_speaker(&event.text),
            })
            .collect(),
    };

    info!("Loaded {} chat messages from {}", messages.len(), path.display());
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_speaker() {
        assert_eq!(format_speaker("alice hello there"), "alice:hello there");
        assert_eq!(format_speaker("bob \t  hi"), "bob:hi");
        assert_eq!(format_speaker("solo"), "solo");
        assert_eq!(format_speaker("  padded  "), "padded");
    }

    #[test]
    fn test_parse_chat_log_with_hours() {
        let content = "[00:00:05.00]alice hi\n[01:00:00.500]bob bye\n";
        let messages = parse_chat_log(content);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].time, 5.0);
        assert_eq!(messages[0].text, "alice:hi");
        assert!((messages[1].time - 3600.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_chat_log_without_hours() {
        let messages = parse_chat_log("[01:02.50]carol yo\n[01:02:50]dave sup");

        assert_eq!(messages.len(), 2);
        assert!((messages[0].time - 62.5).abs() < 1e-9);
        assert!((messages[1].time - 62.5).abs() < 1e-9);
        assert_eq!(messages[1].text, "dave:sup");
    }

    #[test]
    fn test_parse_chat_log_sorts_and_skips_empty() {
        let messages = parse_chat_log("[00:00:09.00]late one\n[00:00:01.00]   \n[00:00:02.00]early one");

        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["early:one", "late:one"]);
    }

    #[test]
    fn test_read_chat_source_from_srt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.srt");
        std::fs::write(
            &path,
            "1\n00:00:02,000 --> 00:00:03,000\nerin hey\n\n2\n00:00:01,000 --> 00:00:04,000\nfrank yo\n",
        )
        .unwrap();

        let messages = read_chat_source(&path).unwrap();
        assert_eq!(messages[0].text, "frank:yo");
        assert_eq!(messages[1].time, 2.0);
    }
}
