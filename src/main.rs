//! Soft Walls entry point
//!
//! Opens the window, advances the scene once per redraw and hands each
//! frame to the renderer.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use soft_walls::renderer::{RenderState, RgbaImage};
use soft_walls::sim::{FrameState, SceneState, tick};
use soft_walls::{AppError, Result, Settings};

/// Ticks between debug snapshots of the frame
const SNAPSHOT_INTERVAL: u64 = 120;

/// Window and GPU state, created once the event loop is resumed
struct Running {
    window: Arc<Window>,
    render_state: RenderState,
    last_frame: Instant,
}

struct App {
    settings: Settings,
    water: RgbaImage,
    scene: SceneState,
    running: Option<Running>,
    /// First fatal error; returned from `run` after the loop exits
    error: Option<AppError>,
}

impl App {
    fn new(settings: Settings, water: RgbaImage) -> Self {
        Self {
            settings,
            water,
            scene: SceneState::new(),
            running: None,
            error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);
        log::info!(
            "Window created: {}x{}",
            self.settings.window_width,
            self.settings.window_height
        );

        let initial = FrameState::at_rest(&self.scene);
        let render_state = pollster::block_on(RenderState::new(
            window.clone(),
            &self.settings,
            &self.water,
            &initial,
        ))?;

        Ok(Running {
            window,
            render_state,
            last_frame: Instant::now(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    /// Advance the scene and draw one frame
    fn redraw(&mut self) -> Result<()> {
        let Some(running) = self.running.as_mut() else {
            return Ok(());
        };

        let now = Instant::now();
        let elapsed = now.duration_since(running.last_frame).as_secs_f64();
        running.last_frame = now;

        let frame = tick(&mut self.scene, elapsed);
        if self.scene.ticks % SNAPSHOT_INTERVAL == 0 && log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "tick {}: {}",
                self.scene.ticks,
                serde_json::to_string(&frame).unwrap_or_default()
            );
        }

        running.render_state.update(&frame);
        let result = match running.render_state.render() {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                let (w, h) = running.render_state.size;
                running.render_state.resize(w, h);
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(AppError::SurfaceOutOfMemory),
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                Ok(())
            }
        };

        running.window.request_redraw();
        result
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("Escape pressed, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(running) = self.running.as_mut() {
                    running.render_state.resize(size.width, size.height);
                    log::debug!("Resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

fn run() -> Result<()> {
    log::info!("Soft Walls starting...");

    let settings = Settings::load();
    let water = RgbaImage::load(&settings.texture_path)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(settings, water);
    event_loop.run_app(&mut app)?;

    log::info!("Stopped after {} ticks", app.scene.ticks);
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
