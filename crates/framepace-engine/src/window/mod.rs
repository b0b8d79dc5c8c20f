//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window. Redraw requests are the host tick
//! primitive: the scheduler asks for a redraw, and each `RedrawRequested` it
//! asked for drives one scheduler tick. Requests are paced to the display
//! refresh rate so tasks that never block cannot spin the loop.

mod pacer;
mod runtime;
mod ticks;

pub use pacer::{FramePacer, Wake, FALLBACK_REFRESH_MILLIHERTZ};
pub use runtime::{Runtime, RuntimeConfig, WindowScheduler};
pub use ticks::WindowTicks;
