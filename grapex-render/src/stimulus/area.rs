use super::placement::{self, PlacedCircle, PlacementSpec};
use super::{magnitudes, StimulusError, StimulusRenderer};
use super::{AMBIENT_FILL, COMPARISON_FILL, FRAME_HEIGHT, FRAME_WIDTH};
use grapex_core::{EncodingType, Primitive, StimulusResult, Style, Surface};
use rand::{Rng, RngCore};
use std::f32::consts::TAU;

const LEFT_CENTER: (f32, f32) = (170.0, 200.0);
const RIGHT_CENTER: (f32, f32) = (430.0, 200.0);

const CIRCLE_REF_RADIUS: f32 = 64.0;
const STAR_REF_RADIUS: f32 = 56.0;
const STAR_POINTS: usize = 10;
const STAR_INNER_SHARE: f32 = 0.5;

const CIRCLE_DISTRACTORS: usize = 4;
const STAR_DISTRACTORS: usize = 3;
const DISTRACTOR_MAGNITUDE_RANGE: (f32, f32) = (10.0, 60.0);
const SIZE_TOLERANCE: f32 = 4.0;
const PLACEMENT_PADDING: f32 = 8.0;
const FRAME_MARGIN: f32 = 20.0;
const PLACEMENT_BOUNDS: (f32, f32, f32, f32) = (
    FRAME_MARGIN,
    FRAME_MARGIN,
    FRAME_WIDTH - FRAME_MARGIN,
    FRAME_HEIGHT - FRAME_MARGIN,
);

/// Area ∝ magnitude, so radius ∝ √magnitude.
fn circle_radius(magnitude: f32) -> f32 {
    (magnitude / 100.0).sqrt() * CIRCLE_REF_RADIUS
}

fn star_outer_radius(magnitude: f32) -> f32 {
    (magnitude / 100.0).sqrt() * STAR_REF_RADIUS
}

/// One rejection-sampled distractor slot; on exhaustion the padding is
/// halved once before the failure is surfaced.
fn place_distractor(
    rng: &mut dyn RngCore,
    spec: &PlacementSpec,
    placed: &[PlacedCircle],
) -> Result<PlacedCircle, StimulusError> {
    match placement::place(rng, spec, placed) {
        Ok(candidate) => Ok(candidate),
        Err(exhausted) => {
            tracing::warn!(
                attempts = exhausted.attempts,
                padding = spec.padding,
                "distractor placement exhausted, retrying with relaxed padding"
            );
            let relaxed = PlacementSpec {
                padding: spec.padding * 0.5,
                ..*spec
            };
            placement::place(rng, &relaxed, placed).map_err(StimulusError::from)
        }
    }
}

fn comparison_layout(
    reference: f32,
    target: f32,
    reference_first: bool,
    radius_for: fn(f32) -> f32,
) -> [PlacedCircle; 2] {
    let (left, right) = if reference_first {
        (reference, target)
    } else {
        (target, reference)
    };
    [
        PlacedCircle {
            x: LEFT_CENTER.0,
            y: LEFT_CENTER.1,
            radius: radius_for(left),
        },
        PlacedCircle {
            x: RIGHT_CENTER.0,
            y: RIGHT_CENTER.1,
            radius: radius_for(right),
        },
    ]
}

/// Two comparison circles (left/right randomized) among rejection-placed
/// distractor circles.
pub struct CircleArea;

impl StimulusRenderer for CircleArea {
    fn encoding(&self) -> EncodingType {
        EncodingType::CircleArea
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        let (reference, target) = magnitudes(ratio)?;
        let reference_first = rng.random_bool(0.5);

        let comparison = comparison_layout(reference, target, reference_first, circle_radius);
        for c in comparison {
            surface.append(Primitive::Circle {
                cx: c.x,
                cy: c.y,
                radius: c.radius,
                style: Style::fill(COMPARISON_FILL),
            });
        }

        let avoid = [circle_radius(reference), circle_radius(target)];
        let spec = PlacementSpec {
            bounds: PLACEMENT_BOUNDS,
            magnitude_range: DISTRACTOR_MAGNITUDE_RANGE,
            radius_for: circle_radius,
            avoid_radii: &avoid,
            size_tolerance: SIZE_TOLERANCE,
            padding: PLACEMENT_PADDING,
        };
        let mut placed = comparison.to_vec();
        for _ in 0..CIRCLE_DISTRACTORS {
            let c = place_distractor(rng, &spec, &placed)?;
            surface.append(Primitive::Circle {
                cx: c.x,
                cy: c.y,
                radius: c.radius,
                style: Style::fill(AMBIENT_FILL),
            });
            placed.push(c);
        }

        Ok(StimulusResult {
            larger_index: if reference_first { 0 } else { 1 },
        })
    }
}

fn star_points(cx: f32, cy: f32, outer: f32) -> Vec<[f32; 2]> {
    let inner = outer * STAR_INNER_SHARE;
    (0..STAR_POINTS)
        .map(|i| {
            let angle = i as f32 / STAR_POINTS as f32 * TAU;
            let r = if i % 2 == 0 { outer } else { inner };
            [cx + r * angle.cos(), cy + r * angle.sin()]
        })
        .collect()
}

/// Ten-point stars with a fixed inner/outer radius share; outer radius
/// encodes area. Same comparison/distractor layout discipline as
/// [`CircleArea`], with bounding circles taken at the outer radius.
pub struct StarArea;

impl StimulusRenderer for StarArea {
    fn encoding(&self) -> EncodingType {
        EncodingType::StarArea
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        let (reference, target) = magnitudes(ratio)?;
        let reference_first = rng.random_bool(0.5);

        let comparison = comparison_layout(reference, target, reference_first, star_outer_radius);
        for c in comparison {
            surface.append(Primitive::Polygon {
                points: star_points(c.x, c.y, c.radius),
                style: Style::fill(COMPARISON_FILL),
            });
        }

        let avoid = [star_outer_radius(reference), star_outer_radius(target)];
        let spec = PlacementSpec {
            bounds: PLACEMENT_BOUNDS,
            magnitude_range: DISTRACTOR_MAGNITUDE_RANGE,
            radius_for: star_outer_radius,
            avoid_radii: &avoid,
            size_tolerance: SIZE_TOLERANCE,
            padding: PLACEMENT_PADDING,
        };
        let mut placed = comparison.to_vec();
        for _ in 0..STAR_DISTRACTORS {
            let c = place_distractor(rng, &spec, &placed)?;
            surface.append(Primitive::Polygon {
                points: star_points(c.x, c.y, c.radius),
                style: Style::fill(AMBIENT_FILL),
            });
            placed.push(c);
        }

        Ok(StimulusResult {
            larger_index: if reference_first { 0 } else { 1 },
        })
    }
}
