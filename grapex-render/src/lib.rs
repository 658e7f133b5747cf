pub mod skia;
pub mod stimulus;
pub mod text;

pub use stimulus::{renderer_for, StimulusError, StimulusRenderer, FRAME_HEIGHT, FRAME_WIDTH};
pub use text::TextPainter;
