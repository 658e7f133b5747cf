//! Operator-facing chrome around the stimulus frame: instructions,
//! per-trial prompt, slider, progress and completion screens. Drawn
//! through the same primitive model as the stimuli.

use grapex_core::{EncodingType, Outline, Primitive, Rgba, Scene, Style, Surface};
use grapex_render::{skia, TextPainter};
use tiny_skia::Pixmap;

pub const WINDOW_WIDTH: u32 = 600;
pub const WINDOW_HEIGHT: u32 = 520;
// HUD strip sits directly below the stimulus frame.
const HUD_TOP: f32 = grapex_render::FRAME_HEIGHT;

const BACKGROUND: Rgba = [255, 255, 255, 255];
const TEXT_COLOR: Rgba = [30, 30, 30, 255];
const MUTED_TEXT: Rgba = [110, 110, 110, 255];
const SEPARATOR: Rgba = [210, 210, 210, 255];
const SLIDER_TRACK: Rgba = [225, 225, 225, 255];
const SLIDER_FILL: Rgba = [255, 165, 0, 255];

const SLIDER_X0: f32 = 110.0;
const SLIDER_X1: f32 = 430.0;
const SLIDER_Y: f32 = 478.0;

pub fn clear(pixmap: &mut Pixmap) {
    skia::fill_background(pixmap, BACKGROUND);
}

/// Per-encoding task description shown above the slider.
pub fn prompt(encoding: EncodingType) -> &'static str {
    match encoding {
        EncodingType::AlignedBars => "Compare the LENGTH of the two highlighted bars.",
        EncodingType::StackedBars => "Compare the LENGTH of the stacked bar segments.",
        EncodingType::PieAngle => "Compare the ANGLE of the two highlighted pie slices.",
        EncodingType::CircleArea => "Compare the AREA of the two highlighted circles.",
        EncodingType::ColorLuminance => "Compare the BRIGHTNESS of the two outlined patches.",
        EncodingType::LineSlope => "Compare the SLOPE of the two lines.",
        EncodingType::ColorSaturation => "Compare the COLOR INTENSITY of the two outlined patches.",
        EncodingType::StarArea => "Compare the AREA of the two highlighted stars.",
    }
}

pub fn draw_instructions(pixmap: &mut Pixmap, text: &TextPainter) {
    let cx = WINDOW_WIDTH as f32 / 2.0;
    text.draw_centered(pixmap, "GRAPHICAL PERCEPTION EXPERIMENT", 26.0, TEXT_COLOR, cx, 80.0);

    let body = [
        "Each trial shows two highlighted visual elements.",
        "One encodes a larger value, one a smaller value.",
        "",
        "Estimate: what percentage of the larger value",
        "is the smaller value?",
        "",
        "Adjust the slider with Left/Right (Up/Down steps by 5),",
        "then press ENTER to submit your estimate.",
    ];
    let mut y = 160.0;
    for line in body {
        if !line.is_empty() {
            text.draw_centered(pixmap, line, 18.0, TEXT_COLOR, cx, y);
        }
        y += 30.0;
    }

    text.draw_centered(pixmap, "Press SPACE to begin", 20.0, MUTED_TEXT, cx, 440.0);
}

pub fn draw_trial_hud(
    pixmap: &mut Pixmap,
    text: &TextPainter,
    encoding: EncodingType,
    slider: f64,
    progress: Option<(usize, usize)>,
) {
    let mut chrome = Scene::new();
    chrome.append(Primitive::Line {
        x1: 0.0,
        y1: HUD_TOP,
        x2: WINDOW_WIDTH as f32,
        y2: HUD_TOP,
        stroke: Outline {
            color: SEPARATOR,
            width: 1.0,
        },
    });

    // Slider track, filled share and handle.
    let share = (slider / 100.0) as f32;
    let handle_x = SLIDER_X0 + (SLIDER_X1 - SLIDER_X0) * share;
    chrome.append(Primitive::Rect {
        x: SLIDER_X0,
        y: SLIDER_Y - 3.0,
        width: SLIDER_X1 - SLIDER_X0,
        height: 6.0,
        style: Style::fill(SLIDER_TRACK),
    });
    chrome.append(Primitive::Rect {
        x: SLIDER_X0,
        y: SLIDER_Y - 3.0,
        width: (handle_x - SLIDER_X0).max(0.0),
        height: 6.0,
        style: Style::fill(SLIDER_FILL),
    });
    chrome.append(Primitive::Circle {
        cx: handle_x,
        cy: SLIDER_Y,
        radius: 9.0,
        style: Style::fill(SLIDER_FILL),
    });
    skia::rasterize(&chrome, pixmap);

    let cx = WINDOW_WIDTH as f32 / 2.0;
    text.draw_centered(pixmap, prompt(encoding), 16.0, TEXT_COLOR, cx, 410.0);
    text.draw_centered(
        pixmap,
        "What percentage of the larger value is the smaller value?",
        15.0,
        MUTED_TEXT,
        cx,
        434.0,
    );
    text.draw(
        pixmap,
        &format!("{slider:.0}%"),
        20.0,
        TEXT_COLOR,
        SLIDER_X1 + 24.0,
        SLIDER_Y - 12.0,
    );
    if let Some((current, total)) = progress {
        text.draw(
            pixmap,
            &format!("Trial {current}/{total}"),
            14.0,
            MUTED_TEXT,
            10.0,
            408.0,
        );
    }
}

pub fn draw_completion(pixmap: &mut Pixmap, text: &TextPainter, csv_path: &str) {
    let cx = WINDOW_WIDTH as f32 / 2.0;
    text.draw_centered(pixmap, "RUN COMPLETE", 26.0, TEXT_COLOR, cx, 200.0);
    text.draw_centered(pixmap, "Thank you for participating.", 18.0, TEXT_COLOR, cx, 250.0);
    text.draw_centered(
        pixmap,
        &format!("Results written to {csv_path}"),
        15.0,
        MUTED_TEXT,
        cx,
        290.0,
    );
    text.draw_centered(pixmap, "Press ESC to exit", 15.0, MUTED_TEXT, cx, 340.0);
}
