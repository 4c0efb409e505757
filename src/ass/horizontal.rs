// Bottom-centred subtitles for horizontal video.
use super::document::{AssDocument, AssStyle, Dialogue, ScriptInfo};
use super::wrap::wrap_plain;
use crate::error::{AssgenError, Result};
use crate::style::HorizontalStyle;
use crate::subtitle::SubtitleEvent;

const STYLE_NAME: &str = "Default";

pub fn horizontal_style(style: &HorizontalStyle) -> AssStyle {
    AssStyle {
        back_colour: "&H99000000".to_string(),
        spacing: style.spacing,
        outline: style.outline,
        shadow: 2,
        alignment: 2,
        margin_v: style.margin_v,
        ..AssStyle::new(STYLE_NAME, &style.font_name, style.font_size, &style.primary_colour)
    }
}

/// Build the horizontal document. Events carry no position override; the
/// style's bottom-centre alignment and `MarginV` place them.
pub fn build_horizontal_document(
    events: &[SubtitleEvent],
    style: &HorizontalStyle,
    video_width: u32,
    video_height: u32,
    title: &str,
) -> Result<AssDocument> {
    if events.is_empty() {
        return Err(AssgenError::EmptyResult(title.to_string()));
    }

    let info = ScriptInfo {
        title: title.to_string(),
        wrap_style: style.wrap_style,
        play_res_x: video_width,
        play_res_y: video_height,
    };
    let mut doc = AssDocument::new(info, horizontal_style(style));

    for event in events {
        doc.push(Dialogue::new(
            event.start,
            event.end,
            STYLE_NAME,
            wrap_plain(&event.text, style.wrap_width),
        ));
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_record() {
        let line = horizontal_style(&HorizontalStyle::default()).to_line();
        assert_eq!(
            line,
            "Style: Default,SimHei,60,&H00FFFFFF,&H000000FF,&H00000000,&H99000000,0,0,0,0,100,100,1,0,1,2,2,2,10,10,80,1"
        );
    }

    #[test]
    fn test_build_document_plain_wrap() {
        let style = HorizontalStyle {
            wrap_width: 5,
            ..Default::default()
        };
        let events = vec![SubtitleEvent::new(1.0, 2.0, "abcdefghij12")];
        let doc = build_horizontal_document(&events, &style, 1920, 1080, "t").unwrap();

        assert_eq!(doc.info.play_res_y, 1080);
        assert_eq!(doc.events[0].text, "abcde\\Nfghij\\N12");
        assert!(!doc.serialize().contains("\\pos("));
    }

    #[test]
    fn test_empty_events_rejected() {
        let result = build_horizontal_document(&[], &HorizontalStyle::default(), 1920, 1080, "x");
        assert!(result.is_err());
    }
}
