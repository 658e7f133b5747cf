use crate::hud;
use anyhow::{anyhow, Context, Result};
use grapex_core::Scene;
use grapex_experiment::{ExperimentConfig, SubmitOutcome, TrialRunner};
use grapex_render::{skia, TextPainter};
use grapex_timing::MonotonicClock;
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::ThreadRng;
use std::sync::Arc;
use tiny_skia::Pixmap;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

const CSV_PATH: &str = "graphical_perception_results.csv";
const JSON_PATH: &str = "graphical_perception_results.json";
const SLIDER_DEFAULT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Instructions,
    Running,
    Complete,
}

pub struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    runner: TrialRunner<MonotonicClock, ThreadRng>,
    scene: Scene,
    canvas: Pixmap,
    text: TextPainter,
    screen: Screen,
    slider: f64,
}

impl App {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        // Fail configuration problems before a window ever opens.
        config.validate()?;

        let text = TextPainter::from_system_fonts()?;
        let canvas = Pixmap::new(hud::WINDOW_WIDTH, hud::WINDOW_HEIGHT)
            .ok_or_else(|| anyhow!("canvas allocation failed"))?;
        let runner = TrialRunner::new(config, MonotonicClock::new(), rand::rng());

        Ok(Self {
            window: None,
            pixels: None,
            runner,
            scene: Scene::new(),
            canvas,
            text,
            screen: Screen::Instructions,
            slider: SLIDER_DEFAULT,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        println!("=== GRAPHICAL PERCEPTION EXPERIMENT ===");
        println!("Platform: {}", std::env::consts::OS);
        println!("Press SPACE to start or ESC to exit.\n");

        event_loop.run_app(&mut self).map_err(Into::into)
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Grapex")
            .with_inner_size(LogicalSize::new(
                hud::WINDOW_WIDTH as f64,
                hud::WINDOW_HEIGHT as f64,
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        self.pixels = Some(Pixels::new(
            hud::WINDOW_WIDTH,
            hud::WINDOW_HEIGHT,
            surface_texture,
        )?);

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let pixels = self
            .pixels
            .as_mut()
            .ok_or_else(|| anyhow!("render before surface creation"))?;

        hud::clear(&mut self.canvas);
        match self.screen {
            Screen::Instructions => hud::draw_instructions(&mut self.canvas, &self.text),
            Screen::Running => {
                skia::rasterize(&self.scene, &mut self.canvas);
                if let Some(trial) = self.runner.current_trial() {
                    hud::draw_trial_hud(
                        &mut self.canvas,
                        &self.text,
                        trial.encoding,
                        self.slider,
                        self.runner.progress(),
                    );
                }
            }
            Screen::Complete => hud::draw_completion(&mut self.canvas, &self.text, CSV_PATH),
        }

        pixels.frame_mut().copy_from_slice(self.canvas.data());
        pixels.render().context("surface present")?;
        Ok(())
    }

    fn redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn start_run(&mut self, event_loop: &ActiveEventLoop) {
        match self.runner.start(&mut self.scene) {
            Ok(()) => {
                self.screen = Screen::Running;
                self.redraw();
            }
            Err(e) => {
                eprintln!("failed to start run: {e}");
                event_loop.exit();
            }
        }
    }

    fn submit(&mut self, event_loop: &ActiveEventLoop) {
        match self.runner.submit_response(&mut self.scene, self.slider) {
            Ok(SubmitOutcome::Recorded) => {
                self.slider = SLIDER_DEFAULT;
            }
            Ok(SubmitOutcome::Finished) => {
                if let Err(e) = self.write_results() {
                    eprintln!("failed to write results: {e}");
                }
                self.screen = Screen::Complete;
            }
            Ok(SubmitOutcome::Ignored | SubmitOutcome::Resubmit) => {}
            Err(e) => {
                // The response is recorded; presenting the next stimulus
                // failed. One retry, then give up.
                tracing::error!(error = %e, "presentation failed, retrying once");
                if let Err(e) = self.runner.present(&mut self.scene) {
                    eprintln!("presentation failed twice: {e}");
                    event_loop.exit();
                }
            }
        }
        self.redraw();
    }

    fn nudge_slider(&mut self, delta: f64) {
        self.slider = (self.slider + delta).clamp(0.0, 100.0);
        self.redraw();
    }

    fn write_results(&self) -> Result<()> {
        use grapex_experiment::export;
        std::fs::write(CSV_PATH, export::csv_string(self.runner.results()))?;
        std::fs::write(JSON_PATH, export::json_string(self.runner.results())?)?;
        println!("Results written to {CSV_PATH} and {JSON_PATH}");
        Ok(())
    }

    fn handle_key(&mut self, key: winit::keyboard::PhysicalKey, event_loop: &ActiveEventLoop) {
        use winit::keyboard::{KeyCode, PhysicalKey};
        let PhysicalKey::Code(code) = key else {
            return;
        };
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => {
                if self.screen == Screen::Instructions {
                    self.start_run(event_loop);
                }
            }
            KeyCode::Enter | KeyCode::NumpadEnter => {
                if self.screen == Screen::Running {
                    self.submit(event_loop);
                }
            }
            KeyCode::ArrowLeft => self.nudge_slider(-1.0),
            KeyCode::ArrowRight => self.nudge_slider(1.0),
            KeyCode::ArrowDown => self.nudge_slider(-5.0),
            KeyCode::ArrowUp => self.nudge_slider(5.0),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window_and_surface(event_loop) {
                eprintln!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    eprintln!("render failed: {e}");
                    event_loop.exit();
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                self.handle_key(event.physical_key, event_loop);
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        eprintln!("failed to resize surface: {e}");
                    }
                }
            }
            _ => {}
        }
    }
}
