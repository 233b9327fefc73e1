//! Window host for the backdrop.
//!
//! [`App`] is the winit application: it owns the window, the GPU presenter,
//! the framebuffer and the [`ParticleField`], and drives one engine frame
//! per redraw. If the GPU cannot be brought up the window stays open on an
//! empty backdrop instead of failing.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::EngineConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::gpu::Presenter;
use crate::raster::PixelCanvas;
use crate::time::FrameClock;

pub struct App {
    field: ParticleField,
    canvas: PixelCanvas,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    /// Fatal error raised inside the event loop, reported by [`run`].
    error: Option<FieldError>,
}

impl App {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            canvas: PixelCanvas::new(0, 0),
            clock: FrameClock::new(Instant::now()),
            window: None,
            presenter: None,
            error: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.field.teardown();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = &mut self.presenter else {
            return;
        };
        let now = Instant::now();
        if self.clock.tick(now) {
            debug!(fps = self.clock.fps(), frame = self.clock.frame(), "frame rate");
        }
        if self.field.frame(&mut self.canvas, now).is_none() {
            return;
        }
        match presenter.present(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, stopping");
                self.field.teardown();
                event_loop.exit();
                return;
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Particle Field")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                self.shutdown(event_loop);
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(Presenter::new(window.clone())) {
            Ok(presenter) => {
                let (width, height) = presenter.surface_size();
                self.presenter = Some(presenter);
                self.field.mount(&mut self.canvas, width, height);
                window.request_redraw();
            }
            Err(e) => warn!("GPU unavailable, backdrop disabled: {}", e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.field.handle_event(&event) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                self.field.request_resize(size.width, size.height, Instant::now());
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.field.teardown();
    }
}

/// Open a window and animate the backdrop until it is closed.
///
/// ```ignore
/// particle_field::run(EngineConfig::default().with_particle_count(120))?;
/// ```
pub fn run(config: EngineConfig) -> Result<(), FieldError> {
    let field = ParticleField::new(config)?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(field);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
