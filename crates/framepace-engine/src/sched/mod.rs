//! Per-frame task scheduling.
//!
//! A [`Scheduler`] multiplexes any number of [`FrameTask`]s onto one host tick
//! subscription. Tasks may be throttled to a target rate; throttling skips
//! ticks that arrive too early and never catches up, so a task's achieved rate
//! is an upper bound that jitters with host frame timing.

mod ctx;
mod scheduler;
mod task;

pub use ctx::TaskCtx;
pub use scheduler::Scheduler;
pub use task::{from_fn, FnTask, FrameTask, TaskHandle, TaskOptions, TaskRef};
