use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use framepace_engine::core::{App, AppControl};
use framepace_engine::device::{Gpu, GpuInit};
use framepace_engine::logging::{init_logging, LoggingConfig};
use framepace_engine::sched::{TaskOptions, TaskRef};
use framepace_engine::window::{Runtime, RuntimeConfig, WindowScheduler};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

mod config;
mod renderers;

use config::StudioConfig;
use renderers::{PulseRenderer, TitleOverlay};

/// Demo app: a GPU pulse renderer and a title-bar load overlay sharing one
/// scheduler. Space toggles the renderer, Escape quits.
struct Studio {
    config: StudioConfig,
    window: Option<Arc<Window>>,
    pulse: Option<Rc<RefCell<PulseRenderer>>>,
}

/// How a window event affects the pulse renderer's surface.
#[derive(Debug, Copy, Clone, PartialEq)]
enum SurfaceChange {
    /// The window reported its new physical size.
    Resize(PhysicalSize<u32>),
    /// The scale factor changed; read the size back from the window.
    FollowWindow,
}

fn surface_change(event: &WindowEvent) -> Option<SurfaceChange> {
    match event {
        WindowEvent::Resized(size) => Some(SurfaceChange::Resize(*size)),
        WindowEvent::ScaleFactorChanged { .. } => Some(SurfaceChange::FollowWindow),
        _ => None,
    }
}

impl Studio {
    fn new(config: StudioConfig) -> Self {
        Self {
            config,
            window: None,
            pulse: None,
        }
    }

    fn pulse_options(&self) -> TaskOptions {
        let options = TaskOptions::default().with_label("pulse");
        match self.config.pulse_rate {
            Some(rate) => options.with_rate(rate),
            None => options,
        }
    }

    fn toggle_pulse(&mut self, scheduler: &mut WindowScheduler) {
        let Some(pulse) = self.pulse.clone() else {
            return;
        };
        let task: TaskRef = pulse;

        match scheduler.handle_of(&task) {
            Some(handle) => {
                let label = scheduler.label(handle).unwrap_or("pulse").to_owned();
                scheduler.cancel(handle);
                log::info!("`{label}` stopped");
            }
            None => {
                let handle = scheduler.register(task, self.pulse_options());
                log::info!("`{}` started as {handle}", scheduler.label(handle).unwrap_or("pulse"));
            }
        }
    }

    fn resize_pulse(&self, change: SurfaceChange) {
        let size = match change {
            SurfaceChange::Resize(size) => size,
            SurfaceChange::FollowWindow => match &self.window {
                Some(window) => window.inner_size(),
                None => return,
            },
        };

        if let Some(pulse) = &self.pulse {
            match pulse.try_borrow_mut() {
                Ok(mut pulse) => pulse.resize(size),
                Err(_) => log::warn!("pulse renderer busy; resize dropped"),
            }
        }
    }
}

impl App for Studio {
    fn start(&mut self, window: &Arc<Window>, scheduler: &mut WindowScheduler) -> Result<()> {
        let gpu = Gpu::create(window.clone(), GpuInit::default())?;
        let pulse = Rc::new(RefCell::new(PulseRenderer::new(gpu, self.config.pulse_period)));

        scheduler.register(pulse.clone(), self.pulse_options());
        scheduler.register_owned(
            TitleOverlay::new(window.clone(), self.config.title.clone()),
            TaskOptions::default()
                .with_rate(self.config.overlay_rate)
                .with_label("overlay"),
        );

        self.window = Some(window.clone());
        self.pulse = Some(pulse);
        Ok(())
    }

    fn on_window_event(
        &mut self,
        event: &WindowEvent,
        scheduler: &mut WindowScheduler,
    ) -> AppControl {
        if let Some(change) = surface_change(event) {
            self.resize_pulse(change);
            return AppControl::Continue;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Space) => self.toggle_pulse(scheduler),
                    PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
                    _ => {}
                }
            }

            _ => {}
        }

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::default();
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: config.size,
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, Studio::new(config))
}
