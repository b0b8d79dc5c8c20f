//! Frame load metrics.
//!
//! The recorder is updated only by the scheduler. Consumers (overlays, logs)
//! receive [`FrameMetrics`] copies, which never change after being handed out.

mod readout;
mod recorder;

pub use readout::LoadReadout;
pub use recorder::FrameMetrics;

pub(crate) use recorder::Recorder;
