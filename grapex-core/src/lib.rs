pub mod color;
pub mod encoding;
pub mod surface;
pub mod trial;

pub use color::Rgba;
pub use encoding::EncodingType;
pub use surface::{Outline, Primitive, Scene, Style, Surface};
pub use trial::{ResponseRecord, RunState, StimulusResult, Trial};
