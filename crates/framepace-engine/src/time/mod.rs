//! Time subsystem.
//!
//! The scheduler never calls `Instant::now()` directly; it reads time through a
//! [`Clock`] so that frame pacing can be driven by simulated time in tests.
//! Intended usage:
//! - `MonotonicClock` for real render loops
//! - `ManualClock` for deterministic simulation

mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
