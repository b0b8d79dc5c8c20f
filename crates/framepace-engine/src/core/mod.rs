//! Core engine-facing contracts.
//!
//! Defines the interface between the window runtime (the host that delivers
//! ticks) and applications that register tasks on its scheduler.

mod app;

pub use app::{App, AppControl};
