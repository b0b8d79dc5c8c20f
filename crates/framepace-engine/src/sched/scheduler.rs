use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::host::{TickHandle, TickSource};
use crate::metrics::{FrameMetrics, Recorder};
use crate::time::Clock;

use super::ctx::{Command, TaskCtx};
use super::task::{from_fn, FrameTask, TaskHandle, TaskOptions, TaskRef};

struct TaskEntry {
    handle: TaskHandle,
    label: String,
    task: TaskRef,
    min_interval: Duration,
    /// Tick time of the last invocation; registration time before the first.
    last_invoked_at: Duration,
    invoked: bool,
}

impl TaskEntry {
    /// A fresh task is due on its first tick. After that, a throttled task
    /// waits until at least `min_interval` has passed at tick granularity.
    fn is_due(&self, elapsed: Duration) -> bool {
        !self.invoked || self.min_interval.is_zero() || elapsed >= self.min_interval
    }
}

/// Multiplexes per-frame tasks onto a single host tick subscription.
///
/// Invariant: a tick request is outstanding with the host if and only if at
/// least one task is registered. Metrics are live while tasks exist and reset
/// to zero when the last one is cancelled.
///
/// The scheduler is single-threaded. `tick`, `register` and `cancel` all take
/// `&mut self`, so no registration change can interleave with a running tick.
pub struct Scheduler<C, H>
where
    C: Clock,
    H: TickSource,
{
    clock: C,
    host: H,
    tasks: Vec<TaskEntry>,
    next_id: u64,
    subscription: Option<TickHandle>,
    recorder: Recorder,
}

impl<C, H> Scheduler<C, H>
where
    C: Clock,
    H: TickSource,
{
    pub fn new(clock: C, host: H) -> Self {
        Self {
            clock,
            host,
            tasks: Vec::new(),
            next_id: 0,
            subscription: None,
            recorder: Recorder::default(),
        }
    }

    /// Registers a shared task.
    ///
    /// Registering an object that is already scheduled logs a warning, changes
    /// nothing, and returns the existing handle.
    pub fn register(&mut self, task: TaskRef, options: TaskOptions) -> TaskHandle {
        if let Some(existing) = self.tasks.iter().find(|e| Rc::ptr_eq(&e.task, &task)) {
            log::warn!(
                "task `{}` is already scheduled as {}; cancel it before registering again",
                existing.label,
                existing.handle
            );
            return existing.handle;
        }

        self.next_id += 1;
        let handle = TaskHandle::from_raw(self.next_id);
        let now = self.clock.now();
        let min_interval = options.min_interval();
        let label = options.label.unwrap_or_else(|| handle.to_string());

        log::debug!("registered `{label}` as {handle} (min interval {min_interval:?})");

        self.tasks.push(TaskEntry {
            handle,
            label,
            task,
            min_interval,
            last_invoked_at: now,
            invoked: false,
        });

        if self.subscription.is_none() {
            self.recorder.start(now);
            self.subscription = Some(self.host.schedule_next_tick());
            log::debug!("scheduler started");
        }

        handle
    }

    /// Registers a task the scheduler will own exclusively.
    pub fn register_owned<T>(&mut self, task: T, options: TaskOptions) -> TaskHandle
    where
        T: FrameTask + 'static,
    {
        self.register(Rc::new(RefCell::new(task)), options)
    }

    /// Registers a closure as a task.
    pub fn register_fn<F>(&mut self, f: F, options: TaskOptions) -> TaskHandle
    where
        F: FnMut(&mut TaskCtx<'_>) -> anyhow::Result<()> + 'static,
    {
        self.register_owned(from_fn(f), options)
    }

    /// Removes a task. Unknown handles are ignored.
    ///
    /// Returns whether a task was removed.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let Some(index) = self.tasks.iter().position(|e| e.handle == handle) else {
            return false;
        };

        let entry = self.tasks.remove(index);
        self.recorder.forget(handle);
        log::debug!("cancelled `{}` ({handle})", entry.label);

        if self.tasks.is_empty() {
            self.stop();
        }
        true
    }

    /// Removes a task by object identity.
    pub fn cancel_task(&mut self, task: &TaskRef) -> bool {
        match self.handle_of(task) {
            Some(handle) => self.cancel(handle),
            None => false,
        }
    }

    /// Removes every task and stops the host subscription.
    pub fn cancel_all(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.tasks.clear();
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(pending) = self.subscription.take() {
            self.host.cancel_tick(pending);
        }
        self.recorder.reset();
        log::debug!("scheduler stopped");
    }

    /// Runs one frame. Called by the host for each delivered tick.
    ///
    /// Ticks delivered after the scheduler stopped are ignored.
    pub fn tick(&mut self) {
        if self.subscription.take().is_none() {
            log::trace!("ignoring tick delivered while stopped");
            return;
        }

        let mut commands = Vec::new();
        {
            let Self {
                clock,
                tasks,
                recorder,
                ..
            } = self;

            let now = clock.now();
            recorder.begin_frame(now);

            for entry in tasks.iter_mut() {
                let elapsed = now.saturating_sub(entry.last_invoked_at);
                if !entry.is_due(elapsed) {
                    continue;
                }

                let Ok(mut task) = entry.task.try_borrow_mut() else {
                    log::warn!("task `{}` is borrowed elsewhere; skipping this frame", entry.label);
                    continue;
                };

                // Tick time, not completion time, so slow callbacks do not drift.
                entry.last_invoked_at = now;
                entry.invoked = true;

                let started = clock.now();
                let result = {
                    let mut ctx =
                        TaskCtx::new(entry.handle, elapsed, now, recorder.view(), &mut commands);
                    task.on_frame(&mut ctx)
                };
                drop(task);
                let spent = clock.now().saturating_sub(started);

                recorder.record(entry.handle, spent);

                if let Err(err) = result {
                    recorder.record_failure();
                    log::error!("task `{}` ({}) failed: {err:#}", entry.label, entry.handle);
                }
            }
        }

        self.subscription = Some(self.host.schedule_next_tick());
        self.apply(commands);
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for cmd in commands {
            match cmd {
                Command::Register(task, options) => {
                    self.register(task, options);
                }
                Command::Cancel(handle) => {
                    self.cancel(handle);
                }
            }
        }
    }

    /// Returns a copy of the last completed frame's metrics.
    pub fn metrics(&self) -> FrameMetrics {
        self.recorder.view().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True while a host tick is outstanding.
    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|e| e.handle == handle)
    }

    pub fn handle_of(&self, task: &TaskRef) -> Option<TaskHandle> {
        self.tasks
            .iter()
            .find(|e| Rc::ptr_eq(&e.task, task))
            .map(|e| e.handle)
    }

    pub fn label(&self, handle: TaskHandle) -> Option<&str> {
        self.tasks
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.label.as_str())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
