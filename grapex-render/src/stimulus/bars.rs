use super::{magnitudes, StimulusError, StimulusRenderer};
use super::{COMPARISON_FILL, DISTRACTOR_FILL, REFERENCE_FILL};
use grapex_core::{EncodingType, Primitive, StimulusResult, Style, Surface};
use rand::{Rng, RngCore};

const BASELINE_Y: f32 = 350.0;

// Band layout for the aligned-bar row.
const BAND_LEFT: f32 = 50.0;
const BAND_RIGHT: f32 = 550.0;
const BAND_SLOTS: usize = 12;
const DISTRACTOR_BARS: usize = 10;
const BAND_PADDING: f32 = 0.1;
const BAR_PX_PER_UNIT: f32 = 3.0;

// Single stacked column.
const COLUMN_X: f32 = 260.0;
const COLUMN_WIDTH: f32 = 80.0;
const STACK_PX_PER_UNIT: f32 = 1.5;

/// Bars sharing a common baseline; the comparison pair occupies the two
/// rightmost band slots in randomized order, flanked by random-height
/// distractor bars.
pub struct AlignedBars;

impl StimulusRenderer for AlignedBars {
    fn encoding(&self) -> EncodingType {
        EncodingType::AlignedBars
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        let (reference, target) = magnitudes(ratio)?;

        let mut slots: Vec<(f32, bool)> = (0..DISTRACTOR_BARS)
            .map(|_| (rng.random_range(0.0..100.0), false))
            .collect();
        let reference_first = rng.random_bool(0.5);
        let (first, second) = if reference_first {
            (reference, target)
        } else {
            (target, reference)
        };
        slots.push((first, true));
        slots.push((second, true));

        let step = (BAND_RIGHT - BAND_LEFT) / BAND_SLOTS as f32;
        let width = step * (1.0 - BAND_PADDING);
        for (slot, (magnitude, comparison)) in slots.into_iter().enumerate() {
            let height = magnitude * BAR_PX_PER_UNIT;
            let fill = if comparison {
                COMPARISON_FILL
            } else {
                DISTRACTOR_FILL
            };
            surface.append(Primitive::Rect {
                x: BAND_LEFT + slot as f32 * step + step * BAND_PADDING * 0.5,
                y: BASELINE_Y - height,
                width,
                height,
                style: Style::fill(fill),
            });
        }

        Ok(StimulusResult {
            larger_index: if reference_first {
                DISTRACTOR_BARS
            } else {
                DISTRACTOR_BARS + 1
            },
        })
    }
}

/// Two segments stacked on one column; the participant compares segment
/// lengths. Which segment sits on the bottom is randomized.
pub struct StackedBars;

impl StimulusRenderer for StackedBars {
    fn encoding(&self) -> EncodingType {
        EncodingType::StackedBars
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        let (reference, target) = magnitudes(ratio)?;

        let reference_first = rng.random_bool(0.5);
        let segments = if reference_first {
            [(reference, true), (target, false)]
        } else {
            [(target, false), (reference, true)]
        };

        let mut top = BASELINE_Y;
        for (magnitude, is_reference) in segments {
            let height = magnitude * STACK_PX_PER_UNIT;
            top -= height;
            let fill = if is_reference {
                REFERENCE_FILL
            } else {
                COMPARISON_FILL
            };
            surface.append(Primitive::Rect {
                x: COLUMN_X,
                y: top,
                width: COLUMN_WIDTH,
                height,
                style: Style::fill(fill),
            });
        }

        // Segment index of the reference, computed from the same array
        // that produced the rectangles.
        let larger_index = segments.iter().position(|(_, r)| *r).unwrap_or(0);
        Ok(StimulusResult { larger_index })
    }
}
