use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::sched::Scheduler;
use crate::time::MonotonicClock;

use super::pacer::FALLBACK_REFRESH_MILLIHERTZ;
use super::WindowTicks;

/// Scheduler driven by a window's redraw requests.
pub type WindowScheduler = Scheduler<MonotonicClock, WindowTicks>;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Refresh rate used for tick pacing when the monitor reports none.
    pub fallback_refresh_millihertz: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "framepace".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            fallback_refresh_millihertz: FALLBACK_REFRESH_MILLIHERTZ,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct Live {
    window: Arc<Window>,
    scheduler: WindowScheduler,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,
    live: Option<Live>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            live: None,
            exit_requested: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let fallback = self.config.fallback_refresh_millihertz;
        let ticks = WindowTicks::for_window(window.clone(), fallback);
        let mut scheduler = Scheduler::new(MonotonicClock::new(), ticks);
        self.app
            .start(&window, &mut scheduler)
            .context("application failed to start")?;

        log::info!("runtime started with {} task(s)", scheduler.len());
        self.live = Some(Live { window, scheduler });
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(live) = self.live.as_mut() {
            live.scheduler.cancel_all();
        }
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.live.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("failed to start: {e:#}");
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraws are requested by the scheduler only while it has tasks, and
        // about one display refresh after the previous tick at the earliest.
        let wake = self
            .live
            .as_mut()
            .and_then(|live| live.scheduler.host_mut().poll(Instant::now()));

        event_loop.set_control_flow(match wake {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(live) = self.live.as_mut() else {
            return;
        };
        if live.window.id() != window_id {
            return;
        }

        if self.app.on_window_event(&event, &mut live.scheduler) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::RedrawRequested => {
                // Redraws the scheduler did not ask for (expose, resize) are not ticks.
                if live.scheduler.host_mut().take_pending().is_some() {
                    live.scheduler.tick();
                }
            }

            _ => {}
        }
    }
}
