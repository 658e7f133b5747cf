//! Stimulus renderers, one per encoding type.
//!
//! Every renderer derives a fixed reference magnitude and a target
//! magnitude of `reference * ratio / 100`, maps both through the
//! encoding's visual channel, and appends the resulting primitives to the
//! caller-cleared surface. The slot holding the reference is randomized
//! per invocation and reported back for bias auditing.

mod area;
mod bars;
mod grid;
mod pie;
mod placement;
mod slope;

pub use area::{CircleArea, StarArea};
pub use bars::{AlignedBars, StackedBars};
pub use grid::{ColorLuminance, ColorSaturation};
pub use pie::PieAngle;
pub use placement::{PlacedCircle, PlacementError, PlacementSpec};
pub use slope::LineSlope;

use grapex_core::{EncodingType, Rgba, StimulusResult, Surface};
use rand::RngCore;

/// Stimulus frame dimensions, in surface coordinates.
pub const FRAME_WIDTH: f32 = 600.0;
pub const FRAME_HEIGHT: f32 = 400.0;

/// Fixed magnitude of the larger comparison element.
pub const REFERENCE_MAGNITUDE: f32 = 100.0;

// Palette shared by the stimulus designs.
pub(crate) const COMPARISON_FILL: Rgba = [255, 165, 0, 255];
pub(crate) const DISTRACTOR_FILL: Rgba = [187, 187, 187, 255];
pub(crate) const REFERENCE_FILL: Rgba = [204, 204, 204, 255];
pub(crate) const AMBIENT_FILL: Rgba = [221, 221, 221, 255];
pub(crate) const SLICE_EDGE: Rgba = [255, 255, 255, 255];

#[derive(Debug, thiserror::Error)]
pub enum StimulusError {
    #[error("ground-truth ratio {0} outside 1..=100")]
    RatioOutOfRange(u8),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Contract every encoding variant implements.
///
/// `render` must be a pure function of `ratio` and the passed rng; it
/// appends to the surface without clearing it (clearing is the caller's
/// job) and reports which slot received the reference magnitude.
pub trait StimulusRenderer: Sync {
    fn encoding(&self) -> EncodingType;

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError>;
}

/// Schedule-driven lookup over the closed variant set.
pub fn renderer_for(encoding: EncodingType) -> &'static dyn StimulusRenderer {
    match encoding {
        EncodingType::AlignedBars => &AlignedBars,
        EncodingType::StackedBars => &StackedBars,
        EncodingType::PieAngle => &PieAngle,
        EncodingType::CircleArea => &CircleArea,
        EncodingType::ColorLuminance => &ColorLuminance,
        EncodingType::LineSlope => &LineSlope,
        EncodingType::ColorSaturation => &ColorSaturation,
        EncodingType::StarArea => &StarArea,
    }
}

/// Reference/target magnitude pair for a validated ratio.
pub(crate) fn magnitudes(ratio: u8) -> Result<(f32, f32), StimulusError> {
    if ratio == 0 || ratio > 100 {
        return Err(StimulusError::RatioOutOfRange(ratio));
    }
    Ok((REFERENCE_MAGNITUDE, f32::from(ratio)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapex_core::Scene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn registry_covers_every_encoding() {
        for encoding in EncodingType::ALL {
            assert_eq!(renderer_for(encoding).encoding(), encoding);
        }
    }

    #[test]
    fn ratio_bounds_are_enforced_by_every_variant() {
        let mut rng = StdRng::seed_from_u64(1);
        for encoding in EncodingType::ALL {
            for bad in [0u8, 101, 255] {
                let mut scene = Scene::new();
                let result = renderer_for(encoding).render(&mut scene, bad, &mut rng);
                assert!(
                    matches!(result, Err(StimulusError::RatioOutOfRange(r)) if r == bad),
                    "{encoding} accepted ratio {bad}"
                );
            }
        }
    }

    #[test]
    fn every_variant_populates_a_cleared_scene() {
        let mut rng = StdRng::seed_from_u64(2);
        for encoding in EncodingType::ALL {
            let mut scene = Scene::new();
            renderer_for(encoding)
                .render(&mut scene, 50, &mut rng)
                .unwrap();
            assert!(!scene.is_empty(), "{encoding} rendered nothing");
        }
    }
}
