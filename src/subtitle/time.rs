// Timestamp conversions between seconds and the LRC, SRT/VTT and ASS text forms.

/// Textual timestamp layouts accepted by [`text_time_to_seconds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:MM:SS,mmm` / `HH:MM:SS.mmm` (SRT, VTT, TXT, ASS). The hour field may
    /// be omitted (`MM:SS.mmm`), as VTT allows.
    Clock,
    /// `MM:SS.xx` or `MM:SS:xx` (LRC).
    Lyric,
}

/// Format seconds as an ASS timestamp `H:MM:SS.CC`.
///
/// Centiseconds are truncated, never rounded. Negative input clamps to zero.
pub fn seconds_to_ass_time(seconds: f64) -> String {
    let (whole, centis) = split_centis(seconds);
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

/// Format seconds as an LRC timestamp `MM:SS.CC`.
pub fn seconds_to_lrc_time(seconds: f64) -> String {
    let (whole, centis) = split_centis(seconds);
    format!("{:02}:{:02}.{:02}", whole / 60, whole % 60, centis)
}

fn split_centis(seconds: f64) -> (u64, u64) {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let whole = seconds.trunc();
    let centis = ((seconds - whole) * 100.0) as u64;
    (whole as u64, centis.min(99))
}

/// Parse a timestamp, returning `0.0` when the text is malformed.
pub fn text_time_to_seconds(text: &str, format: TimeFormat) -> f64 {
    parse_time(text, format).unwrap_or(0.0)
}

/// Parse an ASS `H:MM:SS.CC` timestamp back to seconds.
pub fn ass_time_to_seconds(text: &str) -> f64 {
    text_time_to_seconds(text, TimeFormat::Clock)
}

/// Parse a timestamp, returning `None` when the text is malformed.
pub fn parse_time(text: &str, format: TimeFormat) -> Option<f64> {
    let text = text.trim();
    match format {
        TimeFormat::Clock => {
            let split = text.rfind([',', '.'])?;
            let (clock, fraction) = (&text[..split], &text[split + 1..]);
            let parts: Vec<&str> = clock.split(':').collect();
            match parts.as_slice() {
                [h, m, s] => components_to_seconds(h, m, s, fraction),
                [m, s] => components_to_seconds("0", m, s, fraction),
                _ => None,
            }
        }
        TimeFormat::Lyric => {
            let (clock, fraction) = match text.split_once('.') {
                Some((clock, fraction)) => (clock, fraction),
                None => text.rsplit_once(':')?,
            };
            let (m, s) = clock.split_once(':')?;
            components_to_seconds("0", m, s, fraction)
        }
    }
}

/// Combine digit strings into seconds. The fraction is right-padded to
/// millisecond width, so `"5"` means 500ms and `"05"` means 50ms.
pub(crate) fn components_to_seconds(
    hours: &str,
    minutes: &str,
    seconds: &str,
    fraction: &str,
) -> Option<f64> {
    let h = parse_digits(hours)?;
    let m = parse_digits(minutes)?;
    let s = parse_digits(seconds)?;
    let frac = fraction_to_seconds(fraction)?;
    let whole = h
        .checked_mul(3600)?
        .checked_add(m.checked_mul(60)?)?
        .checked_add(s)?;
    Some(whole as f64 + frac)
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn fraction_to_seconds(fraction: &str) -> Option<f64> {
    let value = parse_digits(fraction)?;
    let width = fraction.len().max(3);
    let padded = value * 10u64.pow((width - fraction.len()) as u32);
    Some(padded as f64 / 10f64.powi(width as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_seconds_to_ass_time() {
        assert_eq!(seconds_to_ass_time(0.0), "0:00:00.00");
        assert_eq!(seconds_to_ass_time(1.5), "0:00:01.50");
        assert_eq!(seconds_to_ass_time(3661.25), "1:01:01.25");
        assert_eq!(seconds_to_ass_time(-4.0), "0:00:00.00");
    }

    #[test]
    fn test_ass_time_truncates() {
        assert_eq!(seconds_to_ass_time(2.999), "0:00:02.99");
        assert_eq!(seconds_to_ass_time(10.0), "0:00:10.00");
    }

    #[test]
    fn test_seconds_to_lrc_time() {
        assert_eq!(seconds_to_lrc_time(65.5), "01:05.50");
        assert_eq!(seconds_to_lrc_time(0.07), "00:00.07");
    }

    #[test]
    fn test_parse_clock() {
        assert!(close(text_time_to_seconds("00:00:01,500", TimeFormat::Clock), 1.5));
        assert!(close(text_time_to_seconds("01:02:03.004", TimeFormat::Clock), 3723.004));
        assert!(close(text_time_to_seconds("1:00:00.000", TimeFormat::Clock), 3600.0));
        assert!(close(text_time_to_seconds("02:03.250", TimeFormat::Clock), 123.25));
    }

    #[test]
    fn test_parse_lyric() {
        assert!(close(text_time_to_seconds("01:02.50", TimeFormat::Lyric), 62.5));
        assert!(close(text_time_to_seconds("01:02:50", TimeFormat::Lyric), 62.5));
        assert!(close(text_time_to_seconds("00:03.125", TimeFormat::Lyric), 3.125));
    }

    #[test]
    fn test_fraction_right_padding() {
        assert!(close(text_time_to_seconds("00:00:01,5", TimeFormat::Clock), 1.5));
        assert!(close(text_time_to_seconds("00:01.05", TimeFormat::Lyric), 1.05));
    }

    #[test]
    fn test_malformed_returns_zero() {
        assert_eq!(text_time_to_seconds("garbage", TimeFormat::Clock), 0.0);
        assert_eq!(text_time_to_seconds("aa:bb.cc", TimeFormat::Lyric), 0.0);
        assert_eq!(text_time_to_seconds("1:2:3:4.000", TimeFormat::Clock), 0.0);
        assert_eq!(text_time_to_seconds("", TimeFormat::Lyric), 0.0);
        assert!(parse_time("12:34", TimeFormat::Clock).is_none());
    }

    #[test]
    fn test_oversized_fields_return_zero() {
        assert_eq!(
            text_time_to_seconds("9999999999999999999:00.00", TimeFormat::Lyric),
            0.0
        );
        assert_eq!(
            text_time_to_seconds("9999999999999999999:00:00.000", TimeFormat::Clock),
            0.0
        );
        assert!(parse_time("00:9999999999999999999:00.000", TimeFormat::Clock).is_none());
    }

    #[test]
    fn test_ass_round_trip() {
        let mut s = 0.0;
        while s < 359_999.99 {
            let back = ass_time_to_seconds(&seconds_to_ass_time(s));
            assert!((back - s).abs() <= 0.01 + 1e-6, "{} -> {}", s, back);
            s += 1234.567;
        }
        let last = 359_999.99;
        assert!((ass_time_to_seconds(&seconds_to_ass_time(last)) - last).abs() <= 0.01 + 1e-6);
    }
}
