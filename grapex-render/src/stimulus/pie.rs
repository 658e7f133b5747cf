use super::{magnitudes, StimulusError, StimulusRenderer};
use super::{AMBIENT_FILL, COMPARISON_FILL, SLICE_EDGE};
use grapex_core::{EncodingType, Primitive, StimulusResult, Style, Surface};
use rand::{Rng, RngCore};
use std::f32::consts::{FRAC_PI_2, TAU};

const PIE_CX: f32 = 300.0;
const PIE_CY: f32 = 200.0;
const PIE_RADIUS: f32 = 120.0;
const DISTRACTOR_SLICES: usize = 3;
const DISTRACTOR_VALUE_RANGE: (f32, f32) = (10.0, 60.0);
const EDGE_WIDTH: f32 = 2.0;

/// Full disc whose slice angles are proportional to slice value. The two
/// comparison slices come first (order randomized) followed by random
/// distractor slices, starting at 12 o'clock and sweeping clockwise.
pub struct PieAngle;

impl StimulusRenderer for PieAngle {
    fn encoding(&self) -> EncodingType {
        EncodingType::PieAngle
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        let (reference, target) = magnitudes(ratio)?;

        let reference_first = rng.random_bool(0.5);
        let mut slices: Vec<(f32, bool)> = if reference_first {
            vec![(reference, true), (target, true)]
        } else {
            vec![(target, true), (reference, true)]
        };
        for _ in 0..DISTRACTOR_SLICES {
            slices.push((
                rng.random_range(DISTRACTOR_VALUE_RANGE.0..DISTRACTOR_VALUE_RANGE.1),
                false,
            ));
        }

        let total: f32 = slices.iter().map(|(v, _)| v).sum();
        let mut start = -FRAC_PI_2;
        for (value, comparison) in &slices {
            let sweep = value / total * TAU;
            let fill = if *comparison {
                COMPARISON_FILL
            } else {
                AMBIENT_FILL
            };
            surface.append(Primitive::Sector {
                cx: PIE_CX,
                cy: PIE_CY,
                radius: PIE_RADIUS,
                start_angle: start,
                sweep_angle: sweep,
                style: Style::fill(fill).with_stroke(SLICE_EDGE, EDGE_WIDTH),
            });
            start += sweep;
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

    fn sweeps(scene: &Scene) -> Vec<f32> {
        scene
            .primitives()
            .iter()
            .map(|p| match p {
                Primitive::Sector { sweep_angle, .. } => *sweep_angle,
                other => panic!("expected sector, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn slices_cover_the_full_disc() {
        let mut rng = StdRng::seed_from_u64(30);
        let mut scene = Scene::new();
        PieAngle.render(&mut scene, 35, &mut rng).unwrap();
        let sum: f32 = sweeps(&scene).iter().sum();
        assert!((sum - TAU).abs() < 1e-4);
        assert_eq!(scene.len(), 2 + DISTRACTOR_SLICES);
    }

    #[test]
    fn comparison_angles_encode_the_ratio() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut scene = Scene::new();
        let result = PieAngle.render(&mut scene, 25, &mut rng).unwrap();
        let sweeps = sweeps(&scene);
        let reference = sweeps[result.larger_index];
        let target = sweeps[1 - result.larger_index];
        assert!((target / reference - 0.25).abs() < 1e-4);
    }

    #[test]
    fn slice_order_randomization_is_roughly_fair() {
        let mut rng = StdRng::seed_from_u64(32);
        let mut reference_first = 0usize;
        for _ in 0..1000 {
            let mut scene = Scene::new();
            let result = PieAngle.render(&mut scene, 64, &mut rng).unwrap();
            if result.larger_index == 0 {
                reference_first += 1;
            }
        }
        assert!((400..=600).contains(&reference_first));
    }
}
