use std::collections::BTreeMap;
use std::time::Duration;

use crate::sched::TaskHandle;

/// Timing of the most recently completed frame.
///
/// All timestamps are clock readings (time since the clock origin). A
/// zero-valued snapshot means the scheduler is idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameMetrics {
    /// Clock reading at the start of the last tick.
    pub last_frame_time: Duration,

    /// Time between the two most recent tick starts.
    ///
    /// Includes both callback work and the wait for the host, so it is bounded
    /// below by host frame pacing.
    pub last_frame_duration: Duration,

    /// Sum of callback execution times measured during the previous tick.
    ///
    /// Paired with `last_frame_duration` to compute load.
    pub last_frame_all_callbacks_duration: Duration,

    /// Most recent execution time per task. Entries leave with their task.
    pub callback_durations: BTreeMap<TaskHandle, Duration>,

    /// Ticks delivered since the scheduler last started.
    pub frames: u64,

    /// Failed callback invocations since the scheduler last started.
    pub callback_failures: u64,
}

impl FrameMetrics {
    /// Fraction of the last frame spent inside callbacks.
    ///
    /// Returns 0.0 before the first full frame.
    pub fn load(&self) -> f64 {
        if self.last_frame_duration.is_zero() {
            return 0.0;
        }
        self.last_frame_all_callbacks_duration.as_secs_f64()
            / self.last_frame_duration.as_secs_f64()
    }

    /// Instantaneous frame rate derived from the last frame duration.
    pub fn fps(&self) -> Option<f64> {
        if self.last_frame_duration.is_zero() {
            None
        } else {
            Some(1.0 / self.last_frame_duration.as_secs_f64())
        }
    }

    pub fn callback_duration(&self, handle: TaskHandle) -> Option<Duration> {
        self.callback_durations.get(&handle).copied()
    }

    /// True when every field holds its zero value, as after the last task is cancelled.
    pub fn is_idle(&self) -> bool {
        *self == FrameMetrics::default()
    }
}

/// Scheduler-owned metrics state.
///
/// Holds the published view plus the accumulator for the tick in progress,
/// which is only promoted into the view when the next tick begins.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    view: FrameMetrics,
    frame_all_callbacks_duration: Duration,
}

impl Recorder {
    /// Marks the start of a live period. The first tick measures from here.
    pub(crate) fn start(&mut self, now: Duration) {
        self.view.last_frame_time = now;
    }

    pub(crate) fn begin_frame(&mut self, now: Duration) {
        let view = &mut self.view;
        view.last_frame_duration = now.saturating_sub(view.last_frame_time);
        view.last_frame_all_callbacks_duration = self.frame_all_callbacks_duration;
        view.last_frame_time = now;
        view.frames = view.frames.wrapping_add(1);
        self.frame_all_callbacks_duration = Duration::ZERO;
    }

    pub(crate) fn record(&mut self, handle: TaskHandle, spent: Duration) {
        self.frame_all_callbacks_duration += spent;
        self.view.callback_durations.insert(handle, spent);
    }

    pub(crate) fn record_failure(&mut self) {
        self.view.callback_failures += 1;
    }

    pub(crate) fn forget(&mut self, handle: TaskHandle) {
        self.view.callback_durations.remove(&handle);
    }

    /// Returns every field to its zero value.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn view(&self) -> &FrameMetrics {
        &self.view
    }

    /// Accumulated callback time for the tick in progress.
    pub(crate) fn frame_all_callbacks_duration(&self) -> Duration {
        self.frame_all_callbacks_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn h(id: u64) -> TaskHandle {
        TaskHandle::from_raw(id)
    }

    // ── derived values ────────────────────────────────────────────────────

    #[test]
    fn load_is_zero_without_a_frame() {
        assert_eq!(FrameMetrics::default().load(), 0.0);
        assert!(FrameMetrics::default().fps().is_none());
    }

    #[test]
    fn load_is_callback_share_of_frame() {
        let m = FrameMetrics {
            last_frame_duration: ms(20),
            last_frame_all_callbacks_duration: ms(5),
            ..FrameMetrics::default()
        };
        assert!((m.load() - 0.25).abs() < 1e-9);
        assert!((m.fps().unwrap() - 50.0).abs() < 1e-9);
    }

    // ── recorder ──────────────────────────────────────────────────────────

    #[test]
    fn accumulator_is_published_on_next_frame() {
        let mut r = Recorder::default();
        r.start(ms(100));
        r.begin_frame(ms(116));
        r.record(h(1), ms(2));
        r.record(h(2), ms(3));
        assert_eq!(r.frame_all_callbacks_duration(), ms(5));
        assert_eq!(r.view().last_frame_all_callbacks_duration, Duration::ZERO);

        r.begin_frame(ms(132));
        assert_eq!(r.view().last_frame_all_callbacks_duration, ms(5));
        assert_eq!(r.view().last_frame_duration, ms(16));
        assert_eq!(r.frame_all_callbacks_duration(), Duration::ZERO);
        assert_eq!(r.view().frames, 2);
    }

    #[test]
    fn forget_drops_only_that_entry() {
        let mut r = Recorder::default();
        r.record(h(1), ms(1));
        r.record(h(2), ms(2));
        r.forget(h(1));
        assert_eq!(r.view().callback_duration(h(1)), None);
        assert_eq!(r.view().callback_duration(h(2)), Some(ms(2)));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut r = Recorder::default();
        r.start(ms(10));
        r.begin_frame(ms(26));
        r.record(h(7), ms(4));
        r.record_failure();
        r.reset();
        assert!(r.view().is_idle());
        assert_eq!(r.frame_all_callbacks_duration(), Duration::ZERO);
    }
}
