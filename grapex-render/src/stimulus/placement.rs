use rand::{Rng, RngCore};

/// Bounded attempts before a placement request is declared exhausted.
pub const MAX_ATTEMPTS: usize = 1000;

/// An element already occupying layout space, reduced to its bounding
/// circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCircle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("no collision-free placement found in {attempts} attempts")]
pub struct PlacementError {
    pub attempts: usize,
}

/// Candidate-generation parameters for one distractor.
#[derive(Debug, Clone, Copy)]
pub struct PlacementSpec<'a> {
    /// (x0, y0, x1, y1) region the bounding circle must stay inside.
    pub bounds: (f32, f32, f32, f32),
    /// Uniform magnitude range distractors are drawn from.
    pub magnitude_range: (f32, f32),
    /// Magnitude-to-bounding-radius channel mapping of the host variant.
    pub radius_for: fn(f32) -> f32,
    /// Comparison radii a distractor must not approximate.
    pub avoid_radii: &'a [f32],
    /// Minimum radius difference from any `avoid_radii` entry.
    pub size_tolerance: f32,
    /// Clearance required between bounding circles.
    pub padding: f32,
}

/// Rejection sampling: draw (position, magnitude) candidates until one
/// neither approximates a comparison size nor overlaps an already-placed
/// element within the padding margin.
pub fn place(
    rng: &mut dyn RngCore,
    spec: &PlacementSpec,
    placed: &[PlacedCircle],
) -> Result<PlacedCircle, PlacementError> {
    let (x0, y0, x1, y1) = spec.bounds;
    for _ in 0..MAX_ATTEMPTS {
        let magnitude = rng.random_range(spec.magnitude_range.0..spec.magnitude_range.1);
        let radius = (spec.radius_for)(magnitude);
        if x0 + radius >= x1 - radius || y0 + radius >= y1 - radius {
            continue;
        }
        let x = rng.random_range(x0 + radius..x1 - radius);
        let y = rng.random_range(y0 + radius..y1 - radius);

        if spec
            .avoid_radii
            .iter()
            .any(|avoid| (radius - avoid).abs() < spec.size_tolerance)
        {
            continue;
        }

        let candidate = PlacedCircle { x, y, radius };
        if placed.iter().any(|p| overlaps(&candidate, p, spec.padding)) {
            continue;
        }
        return Ok(candidate);
    }
    Err(PlacementError {
        attempts: MAX_ATTEMPTS,
    })
}

fn overlaps(a: &PlacedCircle, b: &PlacedCircle, padding: f32) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let clearance = a.radius + b.radius + padding;
    dx * dx + dy * dy < clearance * clearance
}
