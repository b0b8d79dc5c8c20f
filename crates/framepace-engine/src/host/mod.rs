//! Host frame-timing primitives.
//!
//! A host delivers ticks at its own pace (typically display refresh). The
//! scheduler asks for exactly one pending tick at a time and cancels it when it
//! has nothing left to run.

mod manual;

pub use manual::ManualTicks;

/// Handle to a pending tick request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Host frame-timing primitive.
///
/// Implementations make no promise about the exact interval between ticks.
/// Delivering the tick means calling `Scheduler::tick` on the owning scheduler.
pub trait TickSource {
    /// Requests that the host deliver one more tick.
    fn schedule_next_tick(&mut self) -> TickHandle;

    /// Withdraws a pending request. Unknown or already-delivered handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}
