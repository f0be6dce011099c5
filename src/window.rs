//! Native window host.
//!
//! Drives a [`Backdrop`] drawn into a [`Raster`] from winit events and shows
//! each admitted frame through the GPU presenter.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::backdrop::Backdrop;
use crate::config::BackdropConfig;
use crate::error::HostError;
use crate::gpu::Presenter;
use crate::random::SmallRandom;
use crate::raster::Raster;
use crate::scheduler::FrameOutcome;
use crate::surface::SurfaceSize;
use crate::time::Clock;

pub struct App {
    config: BackdropConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    backdrop: Option<Backdrop<Raster, SmallRandom>>,
    clock: Clock,
}

impl App {
    pub fn new(config: BackdropConfig) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            backdrop: None,
            clock: Clock::new(),
        }
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(presenter), Some(backdrop)) = (&mut self.presenter, &self.backdrop) else {
            return;
        };
        match presenter.present(backdrop.surface()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = presenter.size();
                presenter.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => tracing::warn!("present failed: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("backdrop")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("{}", HostError::from(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        // Without a presenter there is nowhere to draw.
        let surface = match pollster::block_on(Presenter::new(window.clone(), self.config.background_color)) {
            Ok(presenter) => {
                self.presenter = Some(presenter);
                Some(Raster::new(SurfaceSize::from(window.inner_size())))
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };

        match Backdrop::attach(&self.config, surface, SmallRandom::from_entropy(), window.as_ref()) {
            Ok(backdrop) => {
                self.backdrop = Some(backdrop);
                window.request_redraw();
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size.into());
                }
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.notify_resize(self.clock.now_ms());
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(backdrop)) = (&self.window, &mut self.backdrop) else {
                    return;
                };
                let mut host = window.clone();
                let outcome = backdrop.on_frame(self.clock.now_ms(), window.as_ref(), &mut host);

                if outcome == FrameOutcome::Admitted {
                    if self.clock.record_tick() {
                        tracing::trace!(
                            ticks_per_second = self.clock.tick_rate(),
                            connections = backdrop.last_frame().connections,
                            "tick rate"
                        );
                    }
                    self.present(event_loop);
                }
            }
            _ => {}
        }
    }
}

/// Open a window and run the animation until it is closed.
pub fn run(config: BackdropConfig) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
