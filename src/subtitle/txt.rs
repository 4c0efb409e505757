// Bracketed range transcripts: `[HH:MM:SS,mmm --> HH:MM:SS,mmm] text`.
use super::time::{parse_time, TimeFormat};
use super::SubtitleEvent;
use regex::Regex;
use tracing::debug;

/// Parse a bracketed-range transcript, one event per line.
pub fn parse_custom_txt(content: &str) -> Vec<SubtitleEvent> {
    let line_pattern = Regex::new(
        r"^\[(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})\]\s*(.*)",
    )
    .expect("Invalid regex");

    let mut events = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(caps) = line_pattern.captures(line) else {
            debug!("Skipping TXT line without a time range: {}", line);
            continue;
        };

        let text = caps[3].trim();
        if text.is_empty() {
            debug!("Skipping TXT line with no text: {}", line);
            continue;
        }

        match (
            parse_time(&caps[1], TimeFormat::Clock),
            parse_time(&caps[2], TimeFormat::Clock),
        ) {
            (Some(start), Some(end)) => events.push(SubtitleEvent {
                start,
                end,
                text: text.to_string(),
            }),
            _ => debug!("Skipping TXT line with bad timestamp: {}", line),
        }
    }

    events
}
