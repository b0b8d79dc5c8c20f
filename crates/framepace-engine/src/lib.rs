//! framepace engine crate.
//!
//! A per-frame task scheduler that multiplexes renderers onto one host tick
//! source and meters their load, plus the winit/wgpu host pieces used to run it
//! in a window.
//!
//! ```no_run
//! use framepace_engine::host::ManualTicks;
//! use framepace_engine::sched::{Scheduler, TaskOptions};
//! use framepace_engine::time::MonotonicClock;
//!
//! let mut scheduler = Scheduler::new(MonotonicClock::new(), ManualTicks::new());
//! let handle = scheduler.register_fn(
//!     |ctx| {
//!         let _dt = ctx.elapsed();
//!         Ok(())
//!     },
//!     TaskOptions::default().with_rate(30.0).with_label("spinner"),
//! );
//!
//! while scheduler.host_mut().take_pending().is_some() {
//!     scheduler.tick();
//!     if scheduler.metrics().frames == 600 {
//!         scheduler.cancel(handle);
//!     }
//! }
//! ```

pub mod core;
pub mod device;
pub mod host;
pub mod logging;
pub mod metrics;
pub mod sched;
pub mod time;
pub mod window;
