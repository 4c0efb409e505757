// LRC lyric format: point-in-time `[mm:ss.xx]text` tags.
use super::time::components_to_seconds;
use super::SubtitleEvent;
use regex::Regex;
use tracing::debug;

/// How long the final LRC line stays on screen, in seconds.
pub const LRC_TAIL_SECONDS: f64 = 5.0;

/// Parse LRC content into ranged events.
///
/// Each tag only marks a start; a line ends where the next one begins and the
/// last line gets [`LRC_TAIL_SECONDS`]. Lines left with no duration are dropped.
pub fn parse_lrc(content: &str) -> Vec<SubtitleEvent> {
    let tag = Regex::new(r"\[(\d{2}):(\d{2})[.:](\d{2,3})\](.*)").expect("Invalid regex");
    // Some exporters repeat the timestamp at the end of the line.
    let trailing_tag = Regex::new(r"\s*\[\d{2}:\d{2}[.:]\d{2,3}\]\s*$").expect("Invalid regex");

    let mut points: Vec<(f64, String)> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        let Some(caps) = tag.captures(line) else {
            continue;
        };

        let text = trailing_tag.replace(caps[4].trim(), "").trim().to_string();
        if text.is_empty() {
            continue;
        }

        match components_to_seconds("0", &caps[1], &caps[2], &caps[3]) {
            Some(time) => points.push((time, text)),
            None => debug!("Skipping LRC line with bad timestamp: {}", line),
        }
    }

    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    derive_ranges(points)
}

fn derive_ranges(points: Vec<(f64, String)>) -> Vec<SubtitleEvent> {
    let next_starts: Vec<Option<f64>> = points
        .iter()
        .skip(1)
        .map(|(t, _)| Some(*t))
        .chain(std::iter::once(None))
        .collect();

    points
        .into_iter()
        .zip(next_starts)
        .map(|((start, text), next)| {
            let end = next.unwrap_or(start + LRC_TAIL_SECONDS);
            SubtitleEvent { start, end, text }
        })
        .filter(|e| e.duration() > 0.0)
        .collect()
}
