use super::{magnitudes, StimulusError, StimulusRenderer, COMPARISON_FILL};
use grapex_core::{EncodingType, Outline, Primitive, StimulusResult, Surface};
use rand::{Rng, RngCore};

const BASELINE_Y: f32 = 350.0;
const RUN: f32 = 180.0;
const RISE_PX_PER_UNIT: f32 = 2.4;
const LEFT_X: f32 = 70.0;
const RIGHT_X: f32 = 350.0;
const STROKE_WIDTH: f32 = 4.0;

/// Two lines with a fixed horizontal run; rise encodes magnitude, so the
/// steeper line carries the larger value. Left/right assignment is
/// randomized.
pub struct LineSlope;

impl StimulusRenderer for LineSlope {
    fn encoding(&self) -> EncodingType {
        EncodingType::LineSlope
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        let (reference, target) = magnitudes(ratio)?;

        let reference_first = rng.random_bool(0.5);
        let (left, right) = if reference_first {
            (reference, target)
        } else {
            (target, reference)
        };

        for (x, magnitude) in [(LEFT_X, left), (RIGHT_X, right)] {
            surface.append(Primitive::Line {
                x1: x,
                y1: BASELINE_Y,
                x2: x + RUN,
                y2: BASELINE_Y - magnitude * RISE_PX_PER_UNIT,
                stroke: Outline {
                    color: COMPARISON_FILL,
                    width: STROKE_WIDTH,
                },
            });
        }

        Ok(StimulusResult {
            larger_index: if reference_first { 0 } else { 1 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapex_core::Scene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rises(scene: &Scene) -> Vec<f32> {
        scene
            .primitives()
            .iter()
            .map(|p| match p {
                Primitive::Line { y1, y2, .. } => y1 - y2,
                other => panic!("expected line, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn rise_is_linear_in_magnitude() {
        let mut rng = StdRng::seed_from_u64(40);
        let mut scene = Scene::new();
        let result = LineSlope.render(&mut scene, 50, &mut rng).unwrap();
        let rises = rises(&scene);
        assert_eq!(rises.len(), 2);
        assert!((rises[result.larger_index] - 240.0).abs() < 1e-3);
        assert!((rises[1 - result.larger_index] - 120.0).abs() < 1e-3);
    }

    #[test]
    fn both_lines_share_the_fixed_run() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut scene = Scene::new();
        LineSlope.render(&mut scene, 86, &mut rng).unwrap();
        for p in scene.primitives() {
            if let Primitive::Line { x1, x2, .. } = p {
                assert!((x2 - x1 - RUN).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn equal_slopes_at_ratio_one_hundred() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut scene = Scene::new();
        LineSlope.render(&mut scene, 100, &mut rng).unwrap();
        let rises = rises(&scene);
        assert!((rises[0] - rises[1]).abs() < 1e-3);
    }
}
