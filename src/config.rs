use crate::error::{AssgenError, Result};
use crate::style::{CanvasStyle, ChatStyle, HorizontalStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Layout strategy for the generated ASS document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Canvas,
    Horizontal,
    Chat,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Canvas => write!(f, "canvas"),
            Mode::Horizontal => write!(f, "horizontal"),
            Mode::Chat => write!(f, "chat"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canvas" => Ok(Mode::Canvas),
            "horizontal" => Ok(Mode::Horizontal),
            "chat" | "chatbox" => Ok(Mode::Chat),
            _ => Err(format!(
                "Unknown mode: {}. Use 'canvas', 'horizontal', or 'chat'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_mode: Mode,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub canvas: CanvasStyle,
    pub horizontal: HorizontalStyle,
    pub chat: ChatStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: Mode::default(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            canvas: CanvasStyle::default(),
            horizontal: HorizontalStyle::default(),
            chat: ChatStyle::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => {
                        debug!("Loaded config from {:?}", config_path);
                        config = file_config;
                    }
                    Err(e) => warn!("Ignoring invalid config file {:?}: {}", config_path, e),
                }
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(mode) = std::env::var("ASSGEN_DEFAULT_MODE") {
            if let Ok(m) = mode.parse() {
                self.default_mode = m;
            }
        }
        if let Ok(path) = std::env::var("ASSGEN_FFMPEG") {
            self.ffmpeg_path = path;
        }
        if let Ok(path) = std::env::var("ASSGEN_FFPROBE") {
            self.ffprobe_path = path;
        }
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ffmpeg_path.trim().is_empty() || self.ffprobe_path.trim().is_empty() {
            return Err(AssgenError::Config(
                "ffmpeg_path and ffprobe_path must not be empty".to_string(),
            ));
        }

        if self.canvas.font_size == 0
            || self.horizontal.font_size == 0
            || self.chat.font_size == 0
        {
            return Err(AssgenError::Config(
                "Font size must be greater than 0".to_string(),
            ));
        }

        let ratio = self.chat.chatbox_max_height_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(AssgenError::Config(format!(
                "chatbox_max_height_ratio must be in (0, 1], got {}",
                ratio
            )));
        }

        let tail = self.chat.chatbox_duration_after_last;
        if !tail.is_finite() || tail < 0.0 {
            return Err(AssgenError::Config(format!(
                "chatbox_duration_after_last must be a finite, non-negative number, got {}",
                tail
            )));
        }

        Ok(())
    }

    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("assgen").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::WrapStyle;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("canvas".parse::<Mode>().unwrap(), Mode::Canvas);
        assert_eq!("HORIZONTAL".parse::<Mode>().unwrap(), Mode::Horizontal);
        assert_eq!("chatbox".parse::<Mode>().unwrap(), Mode::Chat);
        assert!("vertical".parse::<Mode>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_mode, Mode::Canvas);
        assert_eq!(config.ffmpeg_path, "ffmpeg");
        assert_eq!(config.canvas.canvas_width, 1920);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial_sections() {
        let config = Config::from_toml(
            r#"
default_mode = "chat"

[canvas]
font_size = 72
wrap_style = 1

[chat]
chatbox_max_height_ratio = 0.3
"#,
        )
        .unwrap();

        assert_eq!(config.default_mode, Mode::Chat);
        assert_eq!(config.canvas.font_size, 72);
        assert_eq!(config.canvas.wrap_style, WrapStyle::EndOfLine);
        assert_eq!(config.canvas.wrap_width, 10);
        assert!((config.chat.chatbox_max_height_ratio - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.chat.font_size, 18);
    }

    #[test]
    fn test_from_toml_rejects_bad_wrap_style() {
        assert!(Config::from_toml("[canvas]\nwrap_style = 9").is_err());
    }

    #[test]
    fn test_validate_ratio_bounds() {
        let mut config = Config::default();
        config.chat.chatbox_max_height_ratio = 0.0;
        assert!(config.validate().is_err());

        config.chat.chatbox_max_height_ratio = 1.5;
        assert!(config.validate().is_err());

        config.chat.chatbox_max_height_ratio = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_chat_tail() {
        let mut config = Config::default();
        config.chat.chatbox_duration_after_last = -1.0;
        assert!(config.validate().is_err());

        config.chat.chatbox_duration_after_last = f64::NAN;
        assert!(config.validate().is_err());

        config.chat.chatbox_duration_after_last = f64::INFINITY;
        assert!(config.validate().is_err());

        config.chat.chatbox_duration_after_last = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_tail_from_toml_rejected() {
        let config = Config::from_toml("[chat]\nchatbox_duration_after_last = nan").unwrap();
        assert!(matches!(config.validate(), Err(AssgenError::Config(_))));

        let config = Config::from_toml("[chat]\nchatbox_duration_after_last = inf").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_font_size() {
        let mut config = Config::default();
        config.horizontal.font_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[chat]"));
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.chat, Config::default().chat);
    }
}
