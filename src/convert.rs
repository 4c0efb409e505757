//! Path-based conversion entry points.
//!
//! Each function reads one source file, builds the document for its layout
//! mode and writes it in a single step. None of them return an error: every
//! failure is folded into a [`ConversionOutcome`] whose message can be shown
//! to the user as-is.

use crate::ass::{
    build_canvas_document, build_chat_document, build_horizontal_document, AssDocument,
    CanvasGeometry, ChatViewport,
};
use crate::error::{AssgenError, Result};
use crate::style::{CanvasStyle, ChatStyle, HorizontalStyle};
use crate::subtitle::{file_label, parse_subtitle_file, read_chat_source};
use std::path::Path;
use tracing::{error, info};

/// Result of one conversion: a success flag plus a printable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub success: bool,
    pub message: String,
}

impl ConversionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// `Title:` value for a document generated from `source`.
pub fn source_title(source: &Path) -> String {
    format!("Converted from {}", file_label(source))
}

/// Side-canvas conversion.
pub fn generate_canvas_ass(
    subtitle_path: &Path,
    ass_path: &Path,
    style: &CanvasStyle,
    geometry: CanvasGeometry,
) -> ConversionOutcome {
    finish("canvas", "subtitle", ass_path, || {
        let events = parse_subtitle_file(subtitle_path)?;
        require_events(events.len(), subtitle_path)?;
        build_canvas_document(&events, style, geometry, &source_title(subtitle_path))
    })
}

/// Bottom-centred conversion for horizontal video.
pub fn generate_horizontal_ass(
    subtitle_path: &Path,
    ass_path: &Path,
    style: &HorizontalStyle,
    video_width: u32,
    video_height: u32,
) -> ConversionOutcome {
    finish("horizontal", "subtitle", ass_path, || {
        let events = parse_subtitle_file(subtitle_path)?;
        require_events(events.len(), subtitle_path)?;
        build_horizontal_document(
            &events,
            style,
            video_width,
            video_height,
            &source_title(subtitle_path),
        )
    })
}

/// Chat overlay conversion.
pub fn generate_chat_ass(
    subtitle_path: &Path,
    ass_path: &Path,
    style: &ChatStyle,
    viewport: ChatViewport,
) -> ConversionOutcome {
    finish("chat", "chat", ass_path, || {
        let messages = read_chat_source(subtitle_path)?;
        require_events(messages.len(), subtitle_path)?;
        build_chat_document(&messages, style, viewport, &source_title(subtitle_path))
    })
}

fn require_events(count: usize, source: &Path) -> Result<()> {
    if count == 0 {
        return Err(AssgenError::EmptyResult(file_label(source)));
    }
    Ok(())
}

fn finish<F>(mode: &str, noun: &str, ass_path: &Path, build: F) -> ConversionOutcome
where
    F: FnOnce() -> Result<AssDocument>,
{
    let result = build().and_then(|doc| {
        doc.write_to(ass_path)?;
        Ok(doc.event_count())
    });

    match result {
        Ok(count) => {
            info!("Wrote {} {} events to {}", count, mode, ass_path.display());
            ConversionOutcome::ok(format!("Generated {} {} events", count, noun))
        }
        Err(e) => {
            error!("Failed to generate {} ASS: {}", mode, e);
            ConversionOutcome::failed(format!("Failed to generate {} ASS: {}", mode, e))
        }
    }
}
