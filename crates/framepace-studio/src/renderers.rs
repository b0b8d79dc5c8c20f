use std::sync::Arc;

use anyhow::Context;
use framepace_engine::device::Gpu;
use framepace_engine::metrics::LoadReadout;
use framepace_engine::sched::{FrameTask, TaskCtx};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Clears the window to a slowly cycling color.
pub struct PulseRenderer {
    gpu: Gpu,
    phase: f64,
    period: f64,
}

impl PulseRenderer {
    pub fn new(gpu: Gpu, period: f64) -> Self {
        Self {
            gpu,
            phase: 0.0,
            period: period.max(0.1),
        }
    }

    /// Reconfigures the surface when `size` differs from the current one.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if self.gpu.size() != size {
            self.gpu.resize(size);
        }
    }

    fn color(&self) -> wgpu::Color {
        let (r, g, b) = hue_to_rgb(self.phase / self.period);
        wgpu::Color {
            r: r * 0.35,
            g: g * 0.35,
            b: b * 0.35,
            a: 1.0,
        }
    }
}

impl FrameTask for PulseRenderer {
    fn on_frame(&mut self, ctx: &mut TaskCtx<'_>) -> anyhow::Result<()> {
        self.phase = (self.phase + ctx.elapsed().as_secs_f64()) % self.period;
        let color = self.color();
        self.gpu.clear(color).context("pulse clear failed")
    }
}

/// Shows frame duration and scheduler load in the window title.
pub struct TitleOverlay {
    window: Arc<Window>,
    base_title: String,
}

impl TitleOverlay {
    pub fn new(window: Arc<Window>, base_title: impl Into<String>) -> Self {
        Self {
            window,
            base_title: base_title.into(),
        }
    }
}

impl FrameTask for TitleOverlay {
    fn on_frame(&mut self, ctx: &mut TaskCtx<'_>) -> anyhow::Result<()> {
        let metrics = ctx.metrics();
        let readout = LoadReadout::from(metrics);
        log::debug!(
            "{readout} ({} frames, {} failures)",
            metrics.frames,
            metrics.callback_failures
        );
        self.window.set_title(&format!("{} | {readout}", self.base_title));
        Ok(())
    }
}

/// Maps a hue in turns to a saturated RGB triple.
fn hue_to_rgb(turns: f64) -> (f64, f64, f64) {
    let h = turns.rem_euclid(1.0) * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wheel_points() {
        assert_eq!(hue_to_rgb(0.0), (1.0, 0.0, 0.0));
        assert_eq!(hue_to_rgb(0.25), (0.5, 1.0, 0.0));
        assert_eq!(hue_to_rgb(0.5), (0.0, 1.0, 1.0));
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(hue_to_rgb(1.0), hue_to_rgb(0.0));
        assert_eq!(hue_to_rgb(-0.5), hue_to_rgb(0.5));
    }
}
