use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

use crate::window::WindowScheduler;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by binaries.
///
/// The runtime owns the window and a scheduler driven by its redraw requests.
/// Apps register their renderers in `start` and adjust them from window events.
pub trait App {
    /// Called once the window exists.
    fn start(
        &mut self,
        window: &Arc<Window>,
        scheduler: &mut WindowScheduler,
    ) -> anyhow::Result<()>;

    /// Called for window events, before the runtime handles them.
    fn on_window_event(
        &mut self,
        event: &WindowEvent,
        scheduler: &mut WindowScheduler,
    ) -> AppControl {
        let _ = (event, scheduler);
        AppControl::Continue
    }
}
