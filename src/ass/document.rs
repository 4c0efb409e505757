// Typed ASS v4.00+ document and its serializer.
use crate::error::Result;
use crate::style::WrapStyle;
use crate::subtitle::seconds_to_ass_time;
use std::path::Path;
use tracing::debug;

pub const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

pub const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

const UTF8_BOM: &str = "\u{feff}";

/// `[Script Info]` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptInfo {
    pub title: String,
    pub wrap_style: WrapStyle,
    pub play_res_x: u32,
    pub play_res_y: u32,
}

/// One `Style:` record with the 23 fields of the V4+ format line.
#[derive(Debug, Clone, PartialEq)]
pub struct AssStyle {
    pub name: String,
    pub font_name: String,
    pub font_size: u32,
    pub primary_colour: String,
    pub secondary_colour: String,
    pub outline_colour: String,
    pub back_colour: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub scale_x: u32,
    pub scale_y: u32,
    pub spacing: i32,
    pub angle: i32,
    pub border_style: u8,
    pub outline: u32,
    pub shadow: u32,
    /// Numpad-style anchor, 1-9.
    pub alignment: u8,
    pub margin_l: u32,
    pub margin_r: u32,
    pub margin_v: u32,
    pub encoding: u8,
}

impl AssStyle {
    /// A style with the usual libass defaults; callers override what they need.
    pub fn new(name: &str, font_name: &str, font_size: u32, primary_colour: &str) -> Self {
        Self {
            name: name.to_string(),
            font_name: font_name.to_string(),
            font_size,
            primary_colour: primary_colour.to_string(),
            secondary_colour: "&H000000FF".to_string(),
            outline_colour: "&H00000000".to_string(),
            back_colour: "&H00000000".to_string(),
            bold: false,
            italic: false,
            underline: false,
            strike_out: false,
            scale_x: 100,
            scale_y: 100,
            spacing: 0,
            angle: 0,
            border_style: 1,
            outline: 0,
            shadow: 0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
            encoding: 1,
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "Style: {},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.name,
            self.font_name,
            self.font_size,
            self.primary_colour,
            self.secondary_colour,
            self.outline_colour,
            self.back_colour,
            flag(self.bold),
            flag(self.italic),
            flag(self.underline),
            flag(self.strike_out),
            self.scale_x,
            self.scale_y,
            self.spacing,
            self.angle,
            self.border_style,
            self.outline,
            self.shadow,
            self.alignment,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.encoding,
        )
    }
}

// ASS booleans are -1 / 0.
fn flag(value: bool) -> i8 {
    if value {
        -1
    } else {
        0
    }
}

/// One `Dialogue:` event. `text` already includes any override block.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialogue {
    pub layer: u32,
    pub start: f64,
    pub end: f64,
    pub style: String,
    pub text: String,
}

impl Dialogue {
    pub fn new(start: f64, end: f64, style: &str, text: String) -> Self {
        Self {
            layer: 0,
            start,
            end,
            style: style.to_string(),
            text,
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "Dialogue: {},{},{},{},,0,0,0,,{}",
            self.layer,
            seconds_to_ass_time(self.start),
            seconds_to_ass_time(self.end),
            self.style,
            self.text
        )
    }
}

/// A complete script: header, a single style and the event list.
#[derive(Debug, Clone, PartialEq)]
pub struct AssDocument {
    pub info: ScriptInfo,
    pub style: AssStyle,
    pub events: Vec<Dialogue>,
}

impl AssDocument {
    pub fn new(info: ScriptInfo, style: AssStyle) -> Self {
        Self {
            info,
            style,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, dialogue: Dialogue) {
        self.events.push(dialogue);
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Serialize without BOM. Dialogue lines are joined with `\n` and the
    /// last one has no trailing newline.
    pub fn serialize(&self) -> String {
        let mut out = String::new();

        out.push_str("[Script Info]\n");
        out.push_str(&format!("Title: {}\n", self.info.title));
        out.push_str("ScriptType: v4.00+\n");
        out.push_str(&format!("WrapStyle: {}\n", self.info.wrap_style));
        out.push_str(&format!("PlayResX: {}\n", self.info.play_res_x));
        out.push_str(&format!("PlayResY: {}\n\n", self.info.play_res_y));

        out.push_str("[V4+ Styles]\n");
        out.push_str(STYLE_FORMAT);
        out.push('\n');
        out.push_str(&self.style.to_line());
        out.push_str("\n\n");

        out.push_str("[Events]\n");
        out.push_str(EVENT_FORMAT);
        out.push('\n');

        let dialogue = self
            .events
            .iter()
            .map(Dialogue::to_line)
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&dialogue);

        out
    }

    /// Write the document as UTF-8 with a byte-order mark, in one write.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content = format!("{}{}", UTF8_BOM, self.serialize());
        std::fs::write(path, content.as_bytes())?;
        debug!(
            "Wrote {} dialogue lines ({} bytes) to {:?}",
            self.events.len(),
            content.len(),
            path
        );
        Ok(())
    }
}
