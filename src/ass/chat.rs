//! Chat overlay layout.
//!
//! Every message opens a new interval that lasts until the next message. For
//! each interval a complete snapshot of the chat box is emitted: the newest
//! message at the bottom and as many older messages above it as fit in the
//! box height. No animation is involved; consecutive snapshots give the
//! impression of messages scrolling up and out of the box.

use super::document::{AssDocument, AssStyle, Dialogue, ScriptInfo};
use super::wrap::{chunk_text, spaced_line_break};
use crate::error::{AssgenError, Result};
use crate::style::{ChatStyle, WrapStyle};
use crate::subtitle::ChatMessage;
use std::ops::Range;
use tracing::debug;

const STYLE_NAME: &str = "Chatbox";

/// Intervals shorter than this (seconds) are not emitted.
pub const MIN_BLOCK_DURATION: f64 = 0.1;

/// A wrapped message with its display window and rendered height.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub start: f64,
    pub end: f64,
    pub wrapped_text: String,
    pub line_count: usize,
    pub rendered_height: u64,
}

/// Pixel size of the video the overlay is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatViewport {
    pub video_width: u32,
    pub video_height: u32,
}

/// Wrap messages and compute their windows and heights.
///
/// A message is shown until the next one starts; the last one stays for
/// `chatbox_duration_after_last` seconds.
pub fn build_chat_lines(messages: &[ChatMessage], style: &ChatStyle) -> Vec<ChatLine> {
    let line_height = style.font_size as u64 + style.internal_line_spacing as u64;
    let internal_break = spaced_line_break(style.internal_line_spacing);

    messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let end = messages
                .get(i + 1)
                .map(|next| next.time)
                .unwrap_or(message.time + style.chatbox_duration_after_last);
            let chunks = chunk_text(&message.text, style.wrap_width);
            let line_count = chunks.len();

            ChatLine {
                start: message.time,
                end,
                wrapped_text: chunks.join(&internal_break),
                line_count,
                rendered_height: line_count as u64 * line_height,
            }
        })
        .collect()
}

/// Greedy selection of the history that fits in the chat box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatPacker {
    /// Gap charged between two accepted messages.
    pub separator_height: u64,
    pub max_height: u64,
}

impl ChatPacker {
    pub fn new(style: &ChatStyle, viewport: ChatViewport) -> Self {
        Self {
            separator_height: style.font_size as u64 + style.line_spacing as u64,
            max_height: max_pixel_height(viewport.video_height, style.chatbox_max_height_ratio),
        }
    }

    /// Indices of the lines visible when `newest` is the latest message.
    ///
    /// Walks backwards from `newest`. The first accepted line costs only its
    /// own height; each later one also pays `separator_height`. The walk stops
    /// at the first line that does not fit, so the result is always a
    /// contiguous range ending at `newest` (empty if `newest` itself is too tall).
    /// Also returns the height used.
    pub fn visible_range(&self, lines: &[ChatLine], newest: usize) -> (Range<usize>, u64) {
        let mut used = 0u64;
        let mut first = newest + 1;
        if newest >= lines.len() {
            return (first..first, used);
        }

        for j in (0..=newest).rev() {
            let separator = if first <= newest { self.separator_height } else { 0 };
            let required = lines[j].rendered_height + separator;
            if used + required > self.max_height {
                break;
            }
            used += required;
            first = j;
        }

        (first..newest + 1, used)
    }
}

/// `floor(video_height * ratio)`, never negative.
pub fn max_pixel_height(video_height: u32, ratio: f64) -> u64 {
    let height = (video_height as f64 * ratio).floor();
    if height.is_finite() && height > 0.0 {
        height as u64
    } else {
        0
    }
}

pub fn chat_style(style: &ChatStyle) -> AssStyle {
    AssStyle {
        secondary_colour: style.primary_colour.clone(),
        back_colour: "&H00000000".to_string(),
        spacing: style.letter_spacing,
        outline: style.outline,
        shadow: 0,
        alignment: 1,
        margin_l: 0,
        margin_r: 0,
        margin_v: 0,
        ..AssStyle::new(STYLE_NAME, &style.font_name, style.font_size, &style.primary_colour)
    }
}

/// Build the chat overlay document.
pub fn build_chat_document(
    messages: &[ChatMessage],
    style: &ChatStyle,
    viewport: ChatViewport,
    title: &str,
) -> Result<AssDocument> {
    if messages.is_empty() {
        return Err(AssgenError::EmptyResult(title.to_string()));
    }

    let lines = build_chat_lines(messages, style);
    let packer = ChatPacker::new(style, viewport);

    let pos_x = style.margin_left as i64;
    let pos_y = viewport.video_height as i64 - style.margin_bottom as i64;
    let clip = (
        style.margin_left as i64,
        pos_y - packer.max_height as i64,
        viewport.video_width as i64 - style.margin_left as i64,
        pos_y,
    );
    let overrides = format!(
        "{{\\an1\\pos({},{})\\fs{}\\fn{}\\fsp{}\\clip({},{},{},{})}}",
        pos_x,
        pos_y,
        style.font_size,
        style.font_name,
        style.letter_spacing,
        clip.0,
        clip.1,
        clip.2,
        clip.3
    );
    let message_break = spaced_line_break(style.line_spacing);

    debug!(
        "Chat layout: {} messages, box height {}px, separator {}px, anchor ({}, {})",
        lines.len(),
        packer.max_height,
        packer.separator_height,
        pos_x,
        pos_y
    );

    let info = ScriptInfo {
        title: title.to_string(),
        wrap_style: WrapStyle::None,
        play_res_x: viewport.video_width,
        play_res_y: viewport.video_height,
    };
    let mut doc = AssDocument::new(info, chat_style(style));

    for (i, line) in lines.iter().enumerate() {
        if line.end - line.start < MIN_BLOCK_DURATION {
            debug!(
                "Block {}: skipped, window {:.3}s..{:.3}s is too short",
                i, line.start, line.end
            );
            continue;
        }

        let (visible, used) = packer.visible_range(&lines, i);
        debug!(
            "Block {}: {:.3}s..{:.3}s shows lines {:?} ({}px of {}px)",
            i, line.start, line.end, visible, used, packer.max_height
        );

        let text = lines[visible]
            .iter()
            .map(|l| l.wrapped_text.as_str())
            .collect::<Vec<_>>()
            .join(&message_break);

        doc.push(Dialogue::new(
            line.start,
            line.end,
            STYLE_NAME,
            format!("{}{}", overrides, text),
        ));
    }

    if doc.event_count() == 0 {
        return Err(AssgenError::EmptyResult(format!(
            "{} (every chat interval is shorter than {}s)",
            title, MIN_BLOCK_DURATION
        )));
    }

    Ok(doc)
}
