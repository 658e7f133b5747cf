use super::{magnitudes, StimulusError, StimulusRenderer, COMPARISON_FILL};
use grapex_core::color::{gray, hsl};
use grapex_core::{EncodingType, Primitive, Rgba, StimulusResult, Style, Surface};
use rand::seq::index;
use rand::{Rng, RngCore};

const GRID_COLS: usize = 4;
const GRID_ROWS: usize = 3;
const GRID_CELLS: usize = GRID_COLS * GRID_ROWS;
const CELL_WIDTH: f32 = 90.0;
const CELL_HEIGHT: f32 = 70.0;
const CELL_GAP: f32 = 10.0;
const GRID_X0: f32 = 105.0;
const GRID_Y0: f32 = 85.0;
const MARK_WIDTH: f32 = 3.0;

const LUMINANCE_DARK_ANCHOR: f32 = 0.15;
const LUMINANCE_LIGHT_ANCHOR: f32 = 0.95;
const SATURATION_HUE: f32 = 25.0;
const SATURATION_LIGHTNESS: f32 = 0.5;

/// Lighter is larger: lerp between the fixed dark and light anchors.
fn luminance_channel(magnitude: f32) -> Rgba {
    let t = magnitude / 100.0;
    gray(LUMINANCE_DARK_ANCHOR + (LUMINANCE_LIGHT_ANCHOR - LUMINANCE_DARK_ANCHOR) * t)
}

/// Fixed hue and lightness; saturation linear in magnitude.
fn saturation_channel(magnitude: f32) -> Rgba {
    hsl(SATURATION_HUE, magnitude / 100.0, SATURATION_LIGHTNESS)
}

fn cell_origin(cell: usize) -> (f32, f32) {
    let col = (cell % GRID_COLS) as f32;
    let row = (cell / GRID_COLS) as f32;
    (
        GRID_X0 + col * (CELL_WIDTH + CELL_GAP),
        GRID_Y0 + row * (CELL_HEIGHT + CELL_GAP),
    )
}

/// Shared grid layout: the two comparison cells land on uniformly random
/// distinct indices (marked with an outline so they stay identifiable);
/// every other cell is a random-channel distractor.
fn render_grid(
    surface: &mut dyn Surface,
    ratio: u8,
    rng: &mut dyn RngCore,
    channel: fn(f32) -> Rgba,
) -> Result<StimulusResult, StimulusError> {
    let (reference, target) = magnitudes(ratio)?;

    let picks = index::sample(rng, GRID_CELLS, 2);
    let (mut reference_cell, mut target_cell) = (picks.index(0), picks.index(1));
    if !rng.random_bool(0.5) {
        std::mem::swap(&mut reference_cell, &mut target_cell);
    }

    for cell in 0..GRID_CELLS {
        let magnitude = if cell == reference_cell {
            reference
        } else if cell == target_cell {
            target
        } else {
            rng.random_range(0.0..100.0)
        };
        let mut style = Style::fill(channel(magnitude));
        if cell == reference_cell || cell == target_cell {
            style = style.with_stroke(COMPARISON_FILL, MARK_WIDTH);
        }
        let (x, y) = cell_origin(cell);
        surface.append(Primitive::Rect {
            x,
            y,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
            style,
        });
    }

    Ok(StimulusResult {
        larger_index: reference_cell,
    })
}

/// Grayscale patch grid; brightness encodes magnitude.
pub struct ColorLuminance;

impl StimulusRenderer for ColorLuminance {
    fn encoding(&self) -> EncodingType {
        EncodingType::ColorLuminance
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        render_grid(surface, ratio, rng, luminance_channel)
    }
}

/// Fixed-hue patch grid; saturation encodes magnitude.
pub struct ColorSaturation;

impl StimulusRenderer for ColorSaturation {
    fn encoding(&self) -> EncodingType {
        EncodingType::ColorSaturation
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ratio: u8,
        rng: &mut dyn RngCore,
    ) -> Result<StimulusResult, StimulusError> {
        render_grid(surface, ratio, rng, saturation_channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapex_core::Scene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn styles(scene: &Scene) -> Vec<Style> {
        scene
            .primitives()
            .iter()
            .map(|p| match p {
                Primitive::Rect { style, .. } => *style,
                other => panic!("expected rect, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn grid_fills_every_cell_and_marks_two() {
        let mut rng = StdRng::seed_from_u64(70);
        let mut scene = Scene::new();
        let result = ColorLuminance.render(&mut scene, 30, &mut rng).unwrap();
        let styles = styles(&scene);
        assert_eq!(styles.len(), GRID_CELLS);
        let marked = styles.iter().filter(|s| s.stroke.is_some()).count();
        assert_eq!(marked, 2);
        assert!(result.larger_index < GRID_CELLS);
        assert!(styles[result.larger_index].stroke.is_some());
    }

    #[test]
    fn luminance_reference_cell_is_the_light_anchor() {
        let mut rng = StdRng::seed_from_u64(71);
        let mut scene = Scene::new();
        let result = ColorLuminance.render(&mut scene, 40, &mut rng).unwrap();
        let styles = styles(&scene);
        assert_eq!(
            styles[result.larger_index].fill,
            Some(luminance_channel(100.0))
        );
        // Grayscale: all three channels equal in every cell.
        for s in &styles {
            let c = s.fill.unwrap();
            assert_eq!(c[0], c[1]);
            assert_eq!(c[1], c[2]);
        }
    }

    #[test]
    fn luminance_is_monotonic_lighter_for_larger() {
        let low = luminance_channel(20.0);
        let high = luminance_channel(90.0);
        assert!(high[0] > low[0]);
    }

    #[test]
    fn saturation_reference_cell_is_fully_saturated() {
        let mut rng = StdRng::seed_from_u64(72);
        let mut scene = Scene::new();
        let result = ColorSaturation.render(&mut scene, 65, &mut rng).unwrap();
        let styles = styles(&scene);
        assert_eq!(
            styles[result.larger_index].fill,
            Some(saturation_channel(100.0))
        );
    }

    #[test]
    fn comparison_cells_are_distinct() {
        let mut rng = StdRng::seed_from_u64(73);
        for _ in 0..200 {
            let mut scene = Scene::new();
            let result = ColorSaturation.render(&mut scene, 50, &mut rng).unwrap();
            let styles = styles(&scene);
            let marked: Vec<usize> = styles
                .iter()
                .enumerate()
                .filter(|(_, s)| s.stroke.is_some())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(marked.len(), 2);
            assert_ne!(marked[0], marked[1]);
            assert!(marked.contains(&result.larger_index));
        }
    }

    #[test]
    fn grid_cells_do_not_overlap() {
        let (x0, y0) = cell_origin(0);
        let (x1, _) = cell_origin(1);
        let (_, y4) = cell_origin(GRID_COLS);
        assert!(x1 >= x0 + CELL_WIDTH);
        assert!(y4 >= y0 + CELL_HEIGHT);
    }
}
