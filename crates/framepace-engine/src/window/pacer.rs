use std::time::{Duration, Instant};

/// Refresh rate assumed when the monitor does not report one.
pub const FALLBACK_REFRESH_MILLIHERTZ: u32 = 60_000;

/// What the event loop should do about a deferred redraw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Wake {
    /// Nothing deferred; sleep until the next event.
    Idle,
    /// The deferred redraw is due; request it now.
    Now,
    /// Sleep until this instant, then poll again.
    At(Instant),
}

/// Spaces redraw requests at least one display refresh apart.
///
/// Redraw requests are not throttled by winit itself, so a scheduler whose
/// tasks never present would otherwise spin the event loop. The pacer keeps
/// tick starts at least `interval` apart by deferring early requests.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_delivery: Option<Instant>,
    deferred: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_delivery: None,
            deferred: None,
        }
    }

    /// Builds a pacer for a display refresh rate in millihertz, as reported
    /// by `MonitorHandle::refresh_rate_millihertz`.
    ///
    /// The interval is 90% of the refresh period so pacing never causes a
    /// vsync to be missed.
    pub fn for_refresh_rate(millihertz: Option<u32>) -> Self {
        let millihertz = match millihertz {
            Some(mhz) if mhz > 0 => mhz,
            _ => FALLBACK_REFRESH_MILLIHERTZ,
        };
        let period = Duration::from_nanos(1_000_000_000_000 / u64::from(millihertz));
        Self::new(period * 9 / 10)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Registers a tick request at `now`.
    ///
    /// Returns true when the redraw may be requested immediately. Otherwise the
    /// request is deferred until [`poll`](Self::poll) reports it due.
    pub fn request(&mut self, now: Instant) -> bool {
        let earliest = self
            .last_delivery
            .and_then(|last| last.checked_add(self.interval));

        match earliest {
            Some(at) if at > now => {
                self.deferred = Some(at);
                false
            }
            _ => {
                self.deferred = None;
                true
            }
        }
    }

    pub fn poll(&mut self, now: Instant) -> Wake {
        match self.deferred {
            None => Wake::Idle,
            Some(at) if now >= at => {
                self.deferred = None;
                Wake::Now
            }
            Some(at) => Wake::At(at),
        }
    }

    /// True while a request is waiting for its slot.
    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Records that a tick started at `at`.
    pub fn delivered(&mut self, at: Instant) {
        self.last_delivery = Some(at);
    }

    /// Drops a deferred request.
    pub fn cancel(&mut self) {
        self.deferred = None;
    }
}
