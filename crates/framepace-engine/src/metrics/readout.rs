use std::fmt;

use super::FrameMetrics;

/// Human-readable load figures for an on-screen overlay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadReadout {
    pub frame_ms: f64,
    pub load_percent: f64,
}

impl LoadReadout {
    pub fn from_metrics(metrics: &FrameMetrics) -> Self {
        Self {
            frame_ms: metrics.last_frame_duration.as_secs_f64() * 1000.0,
            load_percent: metrics.load() * 100.0,
        }
    }
}

impl From<&FrameMetrics> for LoadReadout {
    fn from(metrics: &FrameMetrics) -> Self {
        Self::from_metrics(metrics)
    }
}

impl fmt::Display for LoadReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {:.1} ms | load {:.1}%", self.frame_ms, self.load_percent)
    }
}
