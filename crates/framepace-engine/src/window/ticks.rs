use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use crate::host::{TickHandle, TickSource};

use super::pacer::{FramePacer, Wake};

/// Tick source backed by window redraw requests.
///
/// Requests are paced to the display refresh rate: one that arrives too soon
/// after the previous tick is deferred and issued from [`poll`](Self::poll).
///
/// winit cannot withdraw a redraw request, so cancellation only forgets the
/// pending handle; the runtime then ignores the redraw when it arrives.
pub struct WindowTicks {
    window: Arc<Window>,
    pacer: FramePacer,
    next_id: u64,
    pending: Option<TickHandle>,
}

impl WindowTicks {
    pub fn new(window: Arc<Window>, pacer: FramePacer) -> Self {
        Self {
            window,
            pacer,
            next_id: 0,
            pending: None,
        }
    }

    /// Paces ticks to the monitor the window is on, falling back to
    /// `fallback_millihertz` when the platform reports no refresh rate.
    pub fn for_window(window: Arc<Window>, fallback_millihertz: u32) -> Self {
        let reported = window
            .current_monitor()
            .and_then(|monitor| monitor.refresh_rate_millihertz());
        let pacer = FramePacer::for_refresh_rate(reported.or(Some(fallback_millihertz)));
        log::debug!(
            "pacing redraws to {:?} (monitor reports {reported:?} mHz)",
            pacer.interval()
        );
        Self::new(window, pacer)
    }

    /// Consumes the outstanding request if its redraw has been issued.
    ///
    /// A redraw that arrives while the request is still deferred (expose,
    /// resize) is not a tick.
    pub fn take_pending(&mut self) -> Option<TickHandle> {
        if self.pacer.is_deferred() {
            return None;
        }
        let handle = self.pending.take()?;
        self.pacer.delivered(Instant::now());
        Some(handle)
    }

    /// Issues a deferred redraw once it is due.
    ///
    /// Returns the instant the event loop should wake at, if a request is
    /// still waiting.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        match self.pacer.poll(now) {
            Wake::Idle => None,
            Wake::Now => {
                self.window.request_redraw();
                None
            }
            Wake::At(at) => Some(at),
        }
    }
}

impl TickSource for WindowTicks {
    fn schedule_next_tick(&mut self) -> TickHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TickHandle::new(self.next_id);
        self.pending = Some(handle);
        if self.pacer.request(Instant::now()) {
            self.window.request_redraw();
        }
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.pacer.cancel();
        }
    }
}
