// SRT and WebVTT cue blocks.
use super::time::{parse_time, TimeFormat};
use super::SubtitleEvent;
use regex::Regex;
use tracing::debug;

/// Parse SRT or VTT content.
///
/// Blocks are separated by blank lines. The first line containing `-->` holds
/// the timing; every following line that is neither numeric nor another arrow
/// line is joined with spaces to form the text. Blocks without a timing line
/// (the `WEBVTT` header, `NOTE` blocks) are ignored.
pub fn parse_srt_vtt(content: &str) -> Vec<SubtitleEvent> {
    let block_separator = Regex::new(r"\n\s*\n").expect("Invalid regex");
    let timing = Regex::new(
        r"((?:\d{1,2}:)?\d{2}:\d{2}[,.]\d{3})\s*-->\s*((?:\d{1,2}:)?\d{2}:\d{2}[,.]\d{3})",
    )
    .expect("Invalid regex");

    let mut events = Vec::new();

    for block in block_separator.split(content.trim()) {
        let lines: Vec<&str> = block.trim().lines().collect();

        let Some(arrow) = lines.iter().position(|l| l.contains("-->")) else {
            continue;
        };

        let Some(caps) = timing.captures(lines[arrow]) else {
            debug!("Skipping cue with unreadable timing: {}", lines[arrow]);
            continue;
        };

        let (Some(start), Some(end)) = (
            parse_time(&caps[1], TimeFormat::Clock),
            parse_time(&caps[2], TimeFormat::Clock),
        ) else {
            debug!("Skipping cue with bad timestamp: {}", lines[arrow]);
            continue;
        };

        let text = lines[arrow + 1..]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.contains("-->") && !is_numeric(l))
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            continue;
        }

        events.push(SubtitleEvent { start, end, text });
    }

    events
}

fn is_numeric(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_srt() {
        let content = "1\n00:00:01,500 --> 00:00:04,000\nHello, world!\n\n2\n00:00:04,500 --> 00:00:07,000\nThis is\na test.\n";
        let events = parse_srt_vtt(content);

        assert_eq!(
            events,
            vec![
                SubtitleEvent::new(1.5, 4.0, "Hello, world!"),
                SubtitleEvent::new(4.5, 7.0, "This is a test."),
            ]
        );
    }

    #[test]
    fn test_parse_vtt_with_header_and_settings() {
        let content = "WEBVTT\n\nNOTE a comment\n\n00:01.000 --> 00:02.500 align:start\nShort cue\n\nintro\n00:00:03.000 --> 00:00:05.000\nNamed cue\n";
        let events = parse_srt_vtt(content);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SubtitleEvent::new(1.0, 2.5, "Short cue"));
        assert_eq!(events[1], SubtitleEvent::new(3.0, 5.0, "Named cue"));
    }

    #[test]
    fn test_single_digit_hour() {
        let events = parse_srt_vtt("1\n1:22:33.444 --> 1:22:35.000\nLate\n");
        assert!((events[0].start - 4_953.444).abs() < 1e-6);
    }

    #[test]
    fn test_skips_empty_text_and_bad_timing() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\n\n\n2\n00:00:0x,000 --> 00:00:02,000\nBroken\n\n3\n00:00:03,000 --> 00:00:04,000\nGood\n";
        let events = parse_srt_vtt(content);

        assert_eq!(events, vec![SubtitleEvent::new(3.0, 4.0, "Good")]);
    }

    #[test]
    fn test_numeric_lines_excluded_from_text() {
        let events = parse_srt_vtt("7\n00:00:01,000 --> 00:00:02,000\nCount\n42\n");
        assert_eq!(events[0].text, "Count");
    }
}
