//! Style parameters for the three layout modes and the lookup tables they draw on.
//!
//! Every style struct is an immutable value for the duration of one conversion:
//! it is built from defaults, the config file and CLI flags, then passed by
//! reference into the emitter.

use serde::{Deserialize, Serialize};

/// ASS script-level `WrapStyle` setting (renderer-side wrapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WrapStyle {
    /// Smart wrapping, top line wider.
    #[default]
    Smart,
    /// End-of-line wrapping, only `\N` breaks.
    EndOfLine,
    /// No wrapping, `\n` and `\N` both break.
    None,
    /// Smart wrapping, bottom line wider.
    SmartLower,
}

impl TryFrom<u8> for WrapStyle {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(WrapStyle::Smart),
            1 => Ok(WrapStyle::EndOfLine),
            2 => Ok(WrapStyle::None),
            3 => Ok(WrapStyle::SmartLower),
            _ => Err(format!("Invalid WrapStyle {}. Expected 0-3", value)),
        }
    }
}

impl From<WrapStyle> for u8 {
    fn from(style: WrapStyle) -> Self {
        match style {
            WrapStyle::Smart => 0,
            WrapStyle::EndOfLine => 1,
            WrapStyle::None => 2,
            WrapStyle::SmartLower => 3,
        }
    }
}

impl std::fmt::Display for WrapStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Colours offered by name. ASS codes are `&HAABBGGRR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColour {
    White,
    Black,
    Yellow,
    Red,
    LightBlue,
    Pink,
    Grey,
}

impl NamedColour {
    pub const ALL: [NamedColour; 7] = [
        NamedColour::White,
        NamedColour::Black,
        NamedColour::Yellow,
        NamedColour::Red,
        NamedColour::LightBlue,
        NamedColour::Pink,
        NamedColour::Grey,
    ];

    pub fn ass_code(&self) -> &'static str {
        match self {
            NamedColour::White => "&H00FFFFFF",
            NamedColour::Black => "&H00000000",
            NamedColour::Yellow => "&H0000FFFF",
            NamedColour::Red => "&H000000FF",
            NamedColour::LightBlue => "&H00E6D8AD",
            NamedColour::Pink => "&H00CBC0FF",
            NamedColour::Grey => "&H00808080",
        }
    }

    /// HTML hex form, as understood by ffmpeg's `pad` filter.
    pub fn html_hex(&self) -> &'static str {
        match self {
            NamedColour::White => "#FFFFFF",
            NamedColour::Black => "#000000",
            NamedColour::Yellow => "#FFFF00",
            NamedColour::Red => "#FF0000",
            NamedColour::LightBlue => "#ADD8E6",
            NamedColour::Pink => "#FFC0CB",
            NamedColour::Grey => "#808080",
        }
    }
}

impl std::fmt::Display for NamedColour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NamedColour::White => "white",
            NamedColour::Black => "black",
            NamedColour::Yellow => "yellow",
            NamedColour::Red => "red",
            NamedColour::LightBlue => "light-blue",
            NamedColour::Pink => "pink",
            NamedColour::Grey => "grey",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for NamedColour {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "white" => Ok(NamedColour::White),
            "black" => Ok(NamedColour::Black),
            "yellow" => Ok(NamedColour::Yellow),
            "red" => Ok(NamedColour::Red),
            "light-blue" | "lightblue" => Ok(NamedColour::LightBlue),
            "pink" => Ok(NamedColour::Pink),
            "grey" | "gray" => Ok(NamedColour::Grey),
            _ => Err(format!("Unknown colour: {}", s)),
        }
    }
}

/// Accept a colour name or a raw ASS code (`&H00FFFFFF`) and return the ASS code.
pub fn parse_colour(s: &str) -> std::result::Result<String, String> {
    let trimmed = s.trim();
    if let Some(hex) = trimmed
        .strip_prefix("&H")
        .or_else(|| trimmed.strip_prefix("&h"))
    {
        let hex = hex.trim_end_matches('&');
        if !hex.is_empty() && hex.len() <= 8 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(format!("&H{:0>8}", hex.to_uppercase()));
        }
        return Err(format!("Invalid ASS colour code: {}", s));
    }

    trimmed
        .parse::<NamedColour>()
        .map(|c| c.ass_code().to_string())
}

/// Style for the side-canvas layout: video on the left, text centred in the
/// padded area on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    pub font_name: String,
    pub font_size: u32,
    pub primary_colour: String,
    pub spacing: i32,
    pub outline: u32,
    /// Extra vertical gap inserted at every forced line break.
    pub line_spacing: u32,
    /// Characters per line; 0 disables wrapping.
    pub wrap_width: usize,
    pub wrap_style: WrapStyle,
    /// Total output width including the video.
    pub canvas_width: u32,
    /// Fill colour of the padded area (HTML hex).
    pub canvas_color: String,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            font_name: "SimHei".to_string(),
            font_size: 90,
            primary_colour: NamedColour::White.ass_code().to_string(),
            spacing: 5,
            outline: 4,
            line_spacing: 15,
            wrap_width: 10,
            wrap_style: WrapStyle::Smart,
            canvas_width: 1920,
            canvas_color: NamedColour::LightBlue.html_hex().to_string(),
        }
    }
}

/// Style for bottom-centred subtitles on a horizontal video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalStyle {
    pub font_name: String,
    pub font_size: u32,
    pub primary_colour: String,
    pub spacing: i32,
    pub outline: u32,
    pub margin_v: u32,
    pub wrap_width: usize,
    pub wrap_style: WrapStyle,
}

impl Default for HorizontalStyle {
    fn default() -> Self {
        Self {
            font_name: "SimHei".to_string(),
            font_size: 60,
            primary_colour: NamedColour::White.ass_code().to_string(),
            spacing: 1,
            outline: 2,
            margin_v: 80,
            wrap_width: 25,
            wrap_style: WrapStyle::Smart,
        }
    }
}

/// Style for the chat overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatStyle {
    pub font_name: String,
    pub font_size: u32,
    pub primary_colour: String,
    pub letter_spacing: i32,
    pub outline: u32,
    /// Gap between two messages.
    pub line_spacing: u32,
    /// Gap between wrapped lines of one message.
    pub internal_line_spacing: u32,
    pub wrap_width: usize,
    /// Fraction of the video height the chat box may occupy.
    pub chatbox_max_height_ratio: f64,
    pub margin_left: u32,
    pub margin_bottom: u32,
    /// Seconds the last message stays on screen.
    pub chatbox_duration_after_last: f64,
}

impl Default for ChatStyle {
    fn default() -> Self {
        ChatPreset::Bilibili.style()
    }
}

/// Tuned chat layouts for common mobile video platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatPreset {
    #[default]
    Bilibili,
    Weibo,
}

impl ChatPreset {
    pub fn style(&self) -> ChatStyle {
        let base = ChatStyle {
            font_name: "KaiTi".to_string(),
            font_size: 18,
            primary_colour: NamedColour::White.ass_code().to_string(),
            letter_spacing: 0,
            outline: 0,
            line_spacing: 0,
            internal_line_spacing: 0,
            wrap_width: 18,
            chatbox_max_height_ratio: 0.20,
            margin_left: 40,
            margin_bottom: 198,
            chatbox_duration_after_last: 10.0,
        };

        match self {
            ChatPreset::Bilibili => base,
            ChatPreset::Weibo => ChatStyle {
                font_size: 15,
                wrap_width: 15,
                chatbox_max_height_ratio: 0.22,
                margin_left: 50,
                margin_bottom: 190,
                ..base
            },
        }
    }
}

impl std::fmt::Display for ChatPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatPreset::Bilibili => write!(f, "bilibili"),
            ChatPreset::Weibo => write!(f, "weibo"),
        }
    }
}

impl std::str::FromStr for ChatPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bilibili" => Ok(ChatPreset::Bilibili),
            "weibo" => Ok(ChatPreset::Weibo),
            _ => Err(format!(
                "Unknown preset: {}. Use 'bilibili' or 'weibo'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_style_conversion() {
        assert_eq!(WrapStyle::try_from(2).unwrap(), WrapStyle::None);
        assert_eq!(u8::from(WrapStyle::SmartLower), 3);
        assert!(WrapStyle::try_from(4).is_err());
        assert_eq!(WrapStyle::EndOfLine.to_string(), "1");
    }

    #[test]
    fn test_colour_parsing() {
        assert_eq!(parse_colour("white").unwrap(), "&H00FFFFFF");
        assert_eq!(parse_colour("Light_Blue").unwrap(), "&H00E6D8AD");
        assert_eq!(parse_colour("&H00ffff").unwrap(), "&H0000FFFF");
        assert_eq!(parse_colour("&H99000000").unwrap(), "&H99000000");
        assert!(parse_colour("&Hxyz").is_err());
        assert!(parse_colour("mauve").is_err());
    }

    #[test]
    fn test_palette_round_trip_names() {
        for colour in NamedColour::ALL {
            assert_eq!(colour.to_string().parse::<NamedColour>().unwrap(), colour);
            assert_eq!(colour.ass_code().len(), 10);
        }
    }

    #[test]
    fn test_presets() {
        let weibo = ChatPreset::Weibo.style();
        assert_eq!(weibo.font_size, 15);
        assert_eq!(weibo.margin_left, 50);
        assert!((weibo.chatbox_max_height_ratio - 0.22).abs() < f64::EPSILON);

        assert_eq!(ChatStyle::default(), ChatPreset::Bilibili.style());
        assert_eq!("WEIBO".parse::<ChatPreset>().unwrap(), ChatPreset::Weibo);
        assert!("tiktok".parse::<ChatPreset>().is_err());
    }

    #[test]
    fn test_partial_style_deserialization() {
        let style: HorizontalStyle = toml::from_str("font_size = 48\nwrap_style = 2").unwrap();
        assert_eq!(style.font_size, 48);
        assert_eq!(style.wrap_style, WrapStyle::None);
        assert_eq!(style.margin_v, 80);
    }
}
