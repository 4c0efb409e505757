pub mod ass;
pub mod config;
pub mod convert;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod preview;
pub mod probe;
pub mod style;
pub mod subtitle;

pub use config::{Config, Mode};
pub use convert::{
    generate_canvas_ass, generate_chat_ass, generate_horizontal_ass, ConversionOutcome,
};
pub use error::{AssgenError, Result};
pub use pipeline::{
    print_summary, run_job, DimensionSource, JobConfig, JobResult, StyleOverrides,
};
pub use style::{CanvasStyle, ChatPreset, ChatStyle, HorizontalStyle, NamedColour, WrapStyle};
pub use subtitle::{parse_subtitle_file, SubtitleEvent};
