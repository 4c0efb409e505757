// Side-canvas layout: video on the left, text centred in the padded panel on the right.
use super::document::{AssDocument, AssStyle, Dialogue, ScriptInfo};
use super::wrap::wrap_with_spacing;
use crate::error::{AssgenError, Result};
use crate::style::CanvasStyle;
use crate::subtitle::SubtitleEvent;

const STYLE_NAME: &str = "Default";

/// Output canvas size and the width of the embedded video on its left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub video_width: u32,
}

impl CanvasGeometry {
    /// Centre of the panel to the right of the video.
    pub fn anchor(&self) -> (f64, f64) {
        let panel_width = self.canvas_width as f64 - self.video_width as f64;
        let x = self.video_width as f64 + panel_width / 2.0;
        let y = self.canvas_height as f64 / 2.0;
        (x, y)
    }

    pub fn position_override(&self) -> String {
        let (x, y) = self.anchor();
        format!("{{\\an5\\pos({:.2},{:.2})}}", x, y)
    }
}

pub fn canvas_style(style: &CanvasStyle) -> AssStyle {
    AssStyle {
        secondary_colour: "&H000000FF".to_string(),
        outline_colour: "&H00000000".to_string(),
        back_colour: "&H99000000".to_string(),
        spacing: style.spacing,
        outline: style.outline,
        shadow: 2,
        alignment: 5,
        margin_v: 10,
        ..AssStyle::new(STYLE_NAME, &style.font_name, style.font_size, &style.primary_colour)
    }
}

/// Build the canvas document: every event anchored at the panel centre.
pub fn build_canvas_document(
    events: &[SubtitleEvent],
    style: &CanvasStyle,
    geometry: CanvasGeometry,
    title: &str,
) -> Result<AssDocument> {
    if events.is_empty() {
        return Err(AssgenError::EmptyResult(title.to_string()));
    }

    let info = ScriptInfo {
        title: title.to_string(),
        wrap_style: style.wrap_style,
        play_res_x: geometry.canvas_width,
        play_res_y: geometry.canvas_height,
    };
    let mut doc = AssDocument::new(info, canvas_style(style));

    let position = geometry.position_override();
    for event in events {
        let text = wrap_with_spacing(&event.text, style.wrap_width, style.line_spacing);
        doc.push(Dialogue::new(
            event.start,
            event.end,
            STYLE_NAME,
            format!("{}{}", position, text),
        ));
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> CanvasGeometry {
        CanvasGeometry {
            canvas_width: 1920,
            canvas_height: 1920,
            video_width: 1080,
        }
    }

    #[test]
    fn test_anchor_centres_in_panel() {
        assert_eq!(geometry().anchor(), (1500.0, 960.0));
        assert_eq!(geometry().position_override(), "{\\an5\\pos(1500.00,960.00)}");
    }

    #[test]
    fn test_anchor_fractional() {
        let g = CanvasGeometry {
            canvas_width: 1001,
            canvas_height: 721,
            video_width: 500,
        };
        assert_eq!(g.position_override(), "{\\an5\\pos(750.50,360.50)}");
    }

    #[test]
    fn test_style_record() {
        let line = canvas_style(&CanvasStyle::default()).to_line();
        assert_eq!(
            line,
            "Style: Default,SimHei,90,&H00FFFFFF,&H000000FF,&H00000000,&H99000000,0,0,0,0,100,100,5,0,1,4,2,5,10,10,10,1"
        );
    }

    #[test]
    fn test_build_document() {
        let events = vec![
            SubtitleEvent::new(0.0, 2.0, "Short"),
            SubtitleEvent::new(2.0, 4.0, "ABCDEFGHIJKLMN"),
        ];
        let doc = build_canvas_document(&events, &CanvasStyle::default(), geometry(), "t").unwrap();

        assert_eq!(doc.event_count(), 2);
        assert_eq!(doc.info.play_res_x, 1920);
        assert_eq!(doc.events[0].text, "{\\an5\\pos(1500.00,960.00)}Short");
        assert_eq!(
            doc.events[1].text,
            "{\\an5\\pos(1500.00,960.00)}ABCDEFGHIJ\\N{\\r\\fs15}\\h\\N{\\r}KLMN"
        );
    }

    #[test]
    fn test_empty_events_rejected() {
        let result = build_canvas_document(&[], &CanvasStyle::default(), geometry(), "empty.lrc");
        assert!(matches!(result, Err(AssgenError::EmptyResult(_))));
    }
}
