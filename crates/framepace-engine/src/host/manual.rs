use super::{TickHandle, TickSource};

/// Tick source driven by the caller.
///
/// Records the single outstanding request; a simulation loop checks
/// [`ManualTicks::take_pending`] before delivering a tick.
#[derive(Debug, Default)]
pub struct ManualTicks {
    next_id: u64,
    pending: Option<TickHandle>,
    scheduled: u64,
    cancelled: u64,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a tick has been requested and not yet consumed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the outstanding request, if any.
    pub fn take_pending(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    /// Total number of requests ever made.
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }

    /// Number of requests withdrawn before delivery.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl TickSource for ManualTicks {
    fn schedule_next_tick(&mut self) -> TickHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TickHandle::new(self.next_id);
        if self.pending.replace(handle).is_some() {
            log::trace!("tick requested while another was pending; replacing it");
        }
        self.scheduled += 1;
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_marks_pending() {
        let mut t = ManualTicks::new();
        let h = t.schedule_next_tick();
        assert!(t.is_pending());
        assert_eq!(t.take_pending(), Some(h));
        assert!(!t.is_pending());
    }

    #[test]
    fn cancel_withdraws_matching_request() {
        let mut t = ManualTicks::new();
        let h = t.schedule_next_tick();
        t.cancel_tick(h);
        assert!(!t.is_pending());
        assert_eq!(t.cancelled(), 1);
    }

    #[test]
    fn cancel_of_stale_handle_is_ignored() {
        let mut t = ManualTicks::new();
        let old = t.schedule_next_tick();
        t.take_pending();
        let _new = t.schedule_next_tick();
        t.cancel_tick(old);
        assert!(t.is_pending());
        assert_eq!(t.cancelled(), 0);
    }

    #[test]
    fn handles_are_unique() {
        let mut t = ManualTicks::new();
        let a = t.schedule_next_tick();
        let b = t.schedule_next_tick();
        assert_ne!(a, b);
        assert_eq!(t.scheduled(), 2);
    }
}
