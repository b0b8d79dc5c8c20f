use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::ctx::TaskCtx;

/// Opaque key for a registered task.
///
/// Issued by the scheduler at registration and never reused by it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub(crate) fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// A per-frame callback.
///
/// Returning an error does not stop the scheduler; the failure is logged and
/// counted, and the remaining tasks still run.
pub trait FrameTask {
    fn on_frame(&mut self, ctx: &mut TaskCtx<'_>) -> anyhow::Result<()>;
}

/// Shared task object. Its allocation is the task's identity for duplicate
/// detection.
pub type TaskRef = Rc<RefCell<dyn FrameTask>>;

/// Adapter turning a closure into a [`FrameTask`].
pub struct FnTask<F>(F);

/// Wraps a closure as a [`FrameTask`].
pub fn from_fn<F>(f: F) -> FnTask<F>
where
    F: FnMut(&mut TaskCtx<'_>) -> anyhow::Result<()>,
{
    FnTask(f)
}

impl<F> FrameTask for FnTask<F>
where
    F: FnMut(&mut TaskCtx<'_>) -> anyhow::Result<()>,
{
    fn on_frame(&mut self, ctx: &mut TaskCtx<'_>) -> anyhow::Result<()> {
        (self.0)(ctx)
    }
}

/// Registration options.
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    /// Target invocations per second. `None` runs the task every tick.
    pub rate: Option<f64>,

    /// Display name for diagnostics. Defaults to the handle.
    pub label: Option<String>,
}

impl TaskOptions {
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Minimum time between invocations; zero when unthrottled.
    ///
    /// Rates that are not finite and positive fall back to unthrottled. Positive
    /// rates so low that the interval overflows `Duration` saturate to
    /// `Duration::MAX`.
    pub fn min_interval(&self) -> Duration {
        match self.rate {
            None => Duration::ZERO,
            Some(rate) if rate.is_finite() && rate > 0.0 => {
                Duration::try_from_secs_f64(1.0 / rate).unwrap_or_else(|_| {
                    log::warn!("task rate {rate} is too low to represent; running it once");
                    Duration::MAX
                })
            }
            Some(rate) => {
                log::warn!("ignoring invalid task rate {rate}; running unthrottled");
                Duration::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rate_is_unthrottled() {
        assert_eq!(TaskOptions::default().min_interval(), Duration::ZERO);
    }

    #[test]
    fn rate_maps_to_interval() {
        let interval = |rate| TaskOptions::default().with_rate(rate).min_interval();
        assert_eq!(interval(10.0), Duration::from_millis(100));
        assert_eq!(interval(1.0), Duration::from_secs(1));
    }

    #[test]
    fn vanishingly_small_rates_saturate() {
        for rate in [1e-20, f64::MIN_POSITIVE] {
            assert_eq!(TaskOptions::default().with_rate(rate).min_interval(), Duration::MAX);
        }
    }

    #[test]
    fn invalid_rates_fall_back_to_unthrottled() {
        for rate in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(TaskOptions::default().with_rate(rate).min_interval(), Duration::ZERO);
        }
    }

    #[test]
    fn handle_display() {
        assert_eq!(TaskHandle::from_raw(3).to_string(), "task#3");
    }
}
