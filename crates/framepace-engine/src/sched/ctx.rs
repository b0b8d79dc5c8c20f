use std::time::Duration;

use crate::metrics::FrameMetrics;

use super::task::{TaskHandle, TaskOptions, TaskRef};

/// Per-invocation context passed to [`FrameTask::on_frame`](super::FrameTask::on_frame).
///
/// Scheduling requests are buffered and applied after every task of the
/// current tick has run. A task registered from here first runs next tick.
pub struct TaskCtx<'a> {
    handle: TaskHandle,
    elapsed: Duration,
    now: Duration,
    metrics: &'a FrameMetrics,
    commands: &'a mut Vec<Command>,
}

pub(crate) enum Command {
    Register(TaskRef, TaskOptions),
    Cancel(TaskHandle),
}

impl<'a> TaskCtx<'a> {
    pub(crate) fn new(
        handle: TaskHandle,
        elapsed: Duration,
        now: Duration,
        metrics: &'a FrameMetrics,
        commands: &'a mut Vec<Command>,
    ) -> Self {
        Self {
            handle,
            elapsed,
            now,
            metrics,
            commands,
        }
    }

    /// Handle of the task being invoked.
    pub fn handle(&self) -> TaskHandle {
        self.handle
    }

    /// Time since this task last ran (or since registration, on its first run).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Clock reading at the start of the current tick.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Metrics published when this tick began.
    ///
    /// The frame-level fields describe the previous frame and stay fixed for
    /// the whole tick. `callback_durations` is updated as tasks finish, so
    /// tasks that already ran this tick show their new duration here.
    pub fn metrics(&self) -> &FrameMetrics {
        self.metrics
    }

    /// Stops this task after the current tick.
    pub fn cancel(&mut self) {
        self.commands.push(Command::Cancel(self.handle));
    }

    pub fn cancel_task(&mut self, handle: TaskHandle) {
        self.commands.push(Command::Cancel(handle));
    }

    pub fn register(&mut self, task: TaskRef, options: TaskOptions) {
        self.commands.push(Command::Register(task, options));
    }
}
