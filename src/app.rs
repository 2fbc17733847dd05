use std::{sync::Arc, time::Instant};

use anyhow::Context;
use log::debug;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::RunConfig,
    gfx::{render_engine::RenderEngine, viewport::InputTranslator},
    session::{Session, TickOutcome},
};

/// Window and event loop around a [`Session`]
pub struct LifeApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: RunConfig,
    session: Session,
    translator: InputTranslator,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    /// Earliest time the next generation may be computed
    next_frame: Instant,
    /// Fatal setup error, reported once the loop has exited
    error: Option<anyhow::Error>,
}

impl LifeApp {
    pub fn new(config: RunConfig, session: Session) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                session,
                translator: InputTranslator::new(),
                window: None,
                render_engine: None,
                next_frame: Instant::now(),
                error: None,
            },
        })
    }

    /// Run until the window is closed or Escape is released
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("Event loop already consumed")?;
        event_loop
            .run_app(&mut self.app_state)
            .context("Event loop terminated abnormally")?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    /// Stop the loop; `run` hands `e` back to the caller
    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        self.error = Some(e);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_config = &self.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_resizable(true);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                let e = anyhow::Error::new(e).context("Failed to create window");
                return self.fail(event_loop, e);
            }
        };
        self.window = Some(window.clone());

        let (grid_width, grid_height) = self.session.simulation().current().dimensions();
        let renderer = pollster::block_on(RenderEngine::new(
            window,
            grid_width as u32,
            grid_height as u32,
        ));
        match renderer {
            Ok(renderer) => self.render_engine = Some(renderer),
            Err(e) => return self.fail(event_loop, e.context("Failed to initialise renderer")),
        }

        self.next_frame = Instant::now();
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(input) = self.translator.translate(&event) {
            self.session.handle(&input);
            if self.session.is_finished() {
                event_loop.exit();
                return;
            }
            self.request_redraw();
        }

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    self.session.render(render_engine);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_finished() {
            event_loop.exit();
            return;
        }
        if self.render_engine.is_none() {
            return;
        }

        let now = Instant::now();
        if now >= self.next_frame {
            if self.session.tick() == TickOutcome::Finished {
                event_loop.exit();
                return;
            }
            // Present every frame, paused or not
            self.request_redraw();
            self.next_frame = now + self.config.frame_delay;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        debug!("Event loop exiting");
        self.session.log_summary();
    }
}
