// Copyright (c) 2026 James O. Schreckengast
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::rc::Rc;
use std::time::Instant;

use clap::Parser;
use confetti_countdown::draw::TextPainter;
use confetti_countdown::surface::{logical_bounds, physical_to_logical, RenderSurface};
use confetti_countdown::{Config, Error, KeyOutcome, Keystroke, Result, Scene, SceneSettings};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Fullscreen, Window, WindowId},
};

/// Translate a pressed key into scene input.
fn keystroke(event: &KeyEvent) -> Option<Keystroke> {
    match &event.logical_key {
        Key::Named(NamedKey::Enter) => Some(Keystroke::Enter),
        Key::Named(NamedKey::Escape) => Some(Keystroke::Escape),
        Key::Named(NamedKey::Backspace) => Some(Keystroke::Backspace),
        Key::Named(NamedKey::Space) => Some(Keystroke::Char(' ')),
        Key::Character(text) => text.chars().next().map(Keystroke::Char),
        _ => None,
    }
}

/// Main application state.
struct App {
    config: Config,
    settings: SceneSettings,
    painter: TextPainter,

    // Window and rendering (initialized on resume)
    render: Option<RenderSurface>,
    scene: Option<Scene>,

    // Timing
    frame_count: u64,
    fps_timer: Instant,

    // First fatal error, reported once the loop has exited
    failure: Option<Error>,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        Ok(App {
            settings: config.scene_settings(),
            config,
            painter: TextPainter::new()?,
            render: None,
            scene: None,
            frame_count: 0,
            fps_timer: Instant::now(),
            failure: None,
        })
    }

    /// Build the window, either at the requested size or fullscreen.
    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window> {
        let window_attrs = Window::default_attributes()
            .with_title("Confetti Countdown - Press Q to exit")
            .with_resizable(true);

        let window_attrs = if let Some((w, h)) = self.config.window_size() {
            // Validate against actual display size
            if let Some(monitor) = event_loop.available_monitors().next() {
                let monitor_size = monitor.size();
                let scale = monitor.scale_factor();
                let max_width = physical_to_logical(monitor_size.width, scale);
                let max_height = physical_to_logical(monitor_size.height, scale);

                if w > max_width || h > max_height {
                    return Err(Error::WindowTooLarge {
                        requested_width: w,
                        requested_height: h,
                        max_width,
                        max_height,
                    });
                }
            }
            info!("Window mode: {w}x{h}");
            window_attrs.with_inner_size(LogicalSize::new(w, h))
        } else {
            info!("Window mode: fullscreen");
            window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
        };

        Ok(event_loop.create_window(window_attrs)?)
    }

    /// Acquire the window, surface and scene.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Rc::new(self.create_window(event_loop)?);

        let physical_size = window.inner_size();
        let scale_factor = window.scale_factor();
        let bounds = logical_bounds(physical_size, scale_factor);
        info!(
            "Window: {}x{} physical, {}x{} logical, scale={}",
            physical_size.width, physical_size.height, bounds.width, bounds.height, scale_factor
        );

        let render = RenderSurface::create(&window, bounds, self.config.cpu)?;
        self.scene = Some(Scene::start(&self.settings, bounds, Instant::now()));
        self.fps_timer = Instant::now();
        self.frame_count = 0;
        render.window().request_redraw();
        self.render = Some(render);
        Ok(())
    }

    /// Release the scene (and with it both timers) and the surface.
    fn stop(&mut self) {
        self.scene = None;
        self.render = None;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        error!("{err}");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    fn resize(&mut self, physical_size: winit::dpi::PhysicalSize<u32>) -> Result<()> {
        let Some(render) = self.render.as_mut() else {
            return Ok(());
        };
        let bounds = logical_bounds(physical_size, render.window().scale_factor());
        debug!("Resized to {}x{} logical", bounds.width, bounds.height);
        render.resize(physical_size, bounds)?;
        if let Some(scene) = self.scene.as_mut() {
            scene.resize(render.bounds());
        }
        render.window().request_redraw();
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(render), Some(scene)) = (self.render.as_mut(), self.scene.as_ref()) else {
            return Ok(());
        };
        let bounds = render.bounds();
        let painter = &self.painter;
        render.with_frame(|frame| scene.render(frame, bounds.width, bounds.height, painter));
        render.present()?;
        self.update_fps_counter();
        Ok(())
    }

    /// Update FPS counter and log statistics.
    fn update_fps_counter(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_timer.elapsed().as_secs_f64();
        if elapsed >= 1.0 {
            // Precision loss acceptable: frame_count is small relative to f64 mantissa
            #[allow(clippy::cast_precision_loss)]
            let fps = self.frame_count as f64 / elapsed;
            debug!("FPS: {fps:.1}");
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render.is_some() {
            return; // Already initialized
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } if key_event.state == ElementState::Pressed => {
                let Some(key) = keystroke(&key_event) else {
                    return;
                };
                let outcome = self
                    .scene
                    .as_mut()
                    .map_or(KeyOutcome::Ignored, |scene| scene.handle_key(key));
                match outcome {
                    KeyOutcome::Quit => event_loop.exit(),
                    KeyOutcome::Redraw => {
                        if let Some(ref render) = self.render {
                            render.window().request_redraw();
                        }
                    }
                    KeyOutcome::Ignored => {}
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Err(err) = self.resize(new_size) {
                    self.fail(event_loop, err);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scene) = self.scene.as_mut() else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };
        if scene.poll(Instant::now()) {
            if let Some(ref render) = self.render {
                render.window().request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(scene.next_deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop();
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let default_filter = if config.verbose {
        "confetti_countdown=debug"
    } else {
        "confetti_countdown=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Counting down to {} ({} fps, {:?} per frame{})",
        config.event(),
        config.fps,
        config.frame_period(),
        config
            .seed
            .map(|seed| format!(", seed {seed}"))
            .unwrap_or_default()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
