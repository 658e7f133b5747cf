//! tiny-skia rasterization of a [`Scene`] primitive buffer.

use grapex_core::{Outline, Primitive, Rgba, Scene, Style};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Arc flattening step, radians. Fine enough that a 120 px pie edge stays
/// visually smooth.
const ARC_STEP: f32 = 0.06;

fn color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn paint(rgba: Rgba) -> Paint<'static> {
    let mut p = Paint::default();
    p.set_color(color(rgba));
    p.anti_alias = true;
    p
}

pub fn fill_background(pixmap: &mut Pixmap, rgba: Rgba) {
    pixmap.fill(color(rgba));
}

/// Draw every primitive of the scene, in order, onto the pixmap.
pub fn rasterize(scene: &Scene, pixmap: &mut Pixmap) {
    for primitive in scene.primitives() {
        draw_primitive(primitive, pixmap);
    }
}

fn draw_primitive(primitive: &Primitive, pixmap: &mut Pixmap) {
    match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            style,
        } => {
            if let (Some(fill), Some(rect)) = (style.fill, Rect::from_xywh(*x, *y, *width, *height))
            {
                pixmap.fill_rect(rect, &paint(fill), Transform::identity(), None);
            }
            if let Some(outline) = style.stroke {
                if let Some(path) = rect_path(*x, *y, *width, *height) {
                    stroke(pixmap, &path, outline);
                }
            }
        }
        Primitive::Circle {
            cx,
            cy,
            radius,
            style,
        } => {
            let mut pb = PathBuilder::new();
            pb.push_circle(*cx, *cy, *radius);
            if let Some(path) = pb.finish() {
                fill_and_stroke(pixmap, &path, style);
            }
        }
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: outline,
        } => {
            let mut pb = PathBuilder::new();
            pb.move_to(*x1, *y1);
            pb.line_to(*x2, *y2);
            if let Some(path) = pb.finish() {
                stroke(pixmap, &path, *outline);
            }
        }
        Primitive::Polygon { points, style } => {
            if let Some(path) = polygon_path(points) {
                fill_and_stroke(pixmap, &path, style);
            }
        }
        Primitive::Sector {
            cx,
            cy,
            radius,
            start_angle,
            sweep_angle,
            style,
        } => {
            if let Some(path) = sector_path(*cx, *cy, *radius, *start_angle, *sweep_angle) {
                fill_and_stroke(pixmap, &path, style);
            }
        }
    }
}

fn fill_and_stroke(pixmap: &mut Pixmap, path: &Path, style: &Style) {
    if let Some(fill) = style.fill {
        pixmap.fill_path(
            path,
            &paint(fill),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    if let Some(outline) = style.stroke {
        stroke(pixmap, path, outline);
    }
}

fn stroke(pixmap: &mut Pixmap, path: &Path, outline: Outline) {
    let stroke = Stroke {
        width: outline.width,
        ..Stroke::default()
    };
    pixmap.stroke_path(
        path,
        &paint(outline.color),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn rect_path(x: f32, y: f32, width: f32, height: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x, y);
    pb.line_to(x + width, y);
    pb.line_to(x + width, y + height);
    pb.line_to(x, y + height);
    pb.close();
    pb.finish()
}

fn polygon_path(points: &[[f32; 2]]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first[0], first[1]);
    for p in rest {
        pb.line_to(p[0], p[1]);
    }
    pb.close();
    pb.finish()
}

/// Pie-slice sector flattened to line segments along the arc.
fn sector_path(cx: f32, cy: f32, radius: f32, start: f32, sweep: f32) -> Option<Path> {
    let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(2);
    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for i in 0..=steps {
        let angle = start + sweep * i as f32 / steps as f32;
        pb.line_to(cx + radius * angle.cos(), cy + radius * angle.sin());
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapex_core::Surface;

    #[test]
    fn rect_fill_lands_on_the_pixmap() {
        let mut scene = Scene::new();
        scene.append(Primitive::Rect {
            x: 2.0,
            y: 2.0,
            width: 6.0,
            height: 6.0,
            style: Style::fill([255, 0, 0, 255]),
        });
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        fill_background(&mut pixmap, [255, 255, 255, 255]);
        rasterize(&scene, &mut pixmap);

        let inside = pixmap.pixel(5, 5).unwrap();
        assert_eq!((inside.red(), inside.green(), inside.blue()), (255, 0, 0));
        let outside = pixmap.pixel(0, 0).unwrap();
        assert_eq!(outside.red(), 255);
        assert_eq!(outside.green(), 255);
    }

    #[test]
    fn sector_path_stays_on_the_arc() {
        let path = sector_path(0.0, 0.0, 10.0, 0.0, std::f32::consts::FRAC_PI_2).unwrap();
        let bounds = path.bounds();
        assert!(bounds.right() <= 10.0 + 1e-3);
        assert!(bounds.bottom() <= 10.0 + 1e-3);
    }

    #[test]
    fn degenerate_polygon_is_skipped() {
        assert!(polygon_path(&[]).is_none());
    }
}
