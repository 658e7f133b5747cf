//! HUD text rasterization via ab_glyph.
//!
//! Fonts are discovered at startup from well-known system locations (or
//! the `GRAPEX_FONT` override) rather than embedded in the binary.

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use grapex_core::Rgba;
use std::path::PathBuf;
use tiny_skia::{Pixmap, PremultipliedColorU8};

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("no usable font found; set GRAPEX_FONT to a TrueType font path")]
    NotFound,
}

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/local/share/fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct TextPainter {
    font: FontVec,
}

impl TextPainter {
    /// Load the first parseable font from `GRAPEX_FONT` or the candidate
    /// list.
    pub fn from_system_fonts() -> Result<Self, FontError> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Ok(path) = std::env::var("GRAPEX_FONT") {
            candidates.push(path.into());
        }
        candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if let Ok(bytes) = std::fs::read(&path) {
                if let Ok(font) = FontVec::try_from_vec(bytes) {
                    tracing::debug!(path = %path.display(), "loaded HUD font");
                    return Ok(Self { font });
                }
            }
        }
        Err(FontError::NotFound)
    }

    /// Advance width of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Draw `text` with its line box's top-left corner at (x, y),
    /// blending glyph coverage over the existing (opaque) pixels.
    pub fn draw(&self, pixmap: &mut Pixmap, text: &str, size: f32, color: Rgba, x: f32, y: f32) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);

        let mut pen_x = x;
        let baseline = y + scaled.ascent();
        let mut prev = None;
        let mut glyphs: Vec<Glyph> = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = prev {
                pen_x += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(pen_x, baseline)));
            pen_x += scaled.h_advance(id);
            prev = Some(id);
        }

        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;
        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let pixels = pixmap.pixels_mut();
            outlined.draw(|gx, gy, coverage| {
                if coverage <= f32::EPSILON {
                    return;
                }
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                let idx = py as usize * width as usize + px as usize;
                let bg = pixels[idx];
                let mix = |b: u8, f: u8| -> u8 {
                    (b as f32 + (f as f32 - b as f32) * coverage).round() as u8
                };
                if let Some(blended) = PremultipliedColorU8::from_rgba(
                    mix(bg.red(), color[0]),
                    mix(bg.green(), color[1]),
                    mix(bg.blue(), color[2]),
                    255,
                ) {
                    pixels[idx] = blended;
                }
            });
        }
    }

    /// Draw `text` horizontally centered on `cx` with the line top at `y`.
    pub fn draw_centered(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        size: f32,
        color: Rgba,
        cx: f32,
        y: f32,
    ) {
        let x = cx - self.measure(text, size) * 0.5;
        self.draw(pixmap, text, size, color, x, y);
    }
}
