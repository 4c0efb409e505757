//! ASS script generation for the three layout modes.

pub mod canvas;
pub mod chat;
pub mod document;
pub mod horizontal;
pub mod wrap;

pub use canvas::{build_canvas_document, CanvasGeometry};
pub use chat::{build_chat_document, ChatPacker, ChatViewport};
pub use document::{AssDocument, AssStyle, Dialogue, ScriptInfo};
pub use horizontal::build_horizontal_document;
pub use wrap::{chunk_text, spaced_line_break};
