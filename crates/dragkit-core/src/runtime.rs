use crate::{FrameCallbackId, FrameClock, ScheduledTask, TaskId};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TaskEntry {
    id: TaskId,
    deadline_nanos: u64,
    callback: Box<dyn FnOnce() + 'static>,
}

struct RuntimeInner {
    now_nanos: Cell<u64>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_task_id: Cell<TaskId>,
    tasks: RefCell<Vec<TaskEntry>>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            now_nanos: Cell::new(0),
            next_frame_callback_id: Cell::new(1),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_task_id: Cell::new(1),
            tasks: RefCell::new(Vec::new()),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn take_frame_callback(&self, id: FrameCallbackId) -> Option<Box<dyn FnOnce(u64) + 'static>> {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let index = callbacks.iter().position(|entry| entry.id == id)?;
        callbacks.remove(index).and_then(|mut entry| entry.callback.take())
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Only callbacks registered before this frame run now. Each one is
        // looked up again right before it runs so that a callback cancelled
        // by an earlier one in the same frame is skipped.
        let ids: SmallVec<[FrameCallbackId; 8]> = self
            .frame_callbacks
            .borrow()
            .iter()
            .map(|entry| entry.id)
            .collect();
        for id in ids {
            if let Some(callback) = self.take_frame_callback(id) {
                callback(frame_time_nanos);
            }
        }
    }

    fn schedule_task(&self, delay: Duration, callback: Box<dyn FnOnce() + 'static>) -> TaskId {
        let id = self.next_task_id.get();
        self.next_task_id.set(id + 1);
        let delay_nanos = u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX);
        let deadline_nanos = self.now_nanos.get().saturating_add(delay_nanos);
        self.tasks.borrow_mut().push(TaskEntry {
            id,
            deadline_nanos,
            callback,
        });
        log::trace!("scheduled task {id} for t={deadline_nanos}ns");
        id
    }

    fn cancel_task(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.borrow_mut();
        match tasks.iter().position(|entry| entry.id == id) {
            Some(index) => {
                tasks.remove(index);
                log::trace!("cancelled task {id}");
                true
            }
            None => false,
        }
    }

    fn is_task_pending(&self, id: TaskId) -> bool {
        self.tasks.borrow().iter().any(|entry| entry.id == id)
    }

    fn take_next_due_task(&self, now_nanos: u64) -> Option<TaskEntry> {
        let mut tasks = self.tasks.borrow_mut();
        let index = tasks
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline_nanos <= now_nanos)
            .min_by_key(|(_, entry)| (entry.deadline_nanos, entry.id))
            .map(|(index, _)| index)?;
        Some(tasks.remove(index))
    }

    fn run_due_tasks(&self, now_nanos: u64) {
        while let Some(entry) = self.take_next_due_task(now_nanos) {
            log::trace!("running task {} at t={now_nanos}ns", entry.id);
            (entry.callback)();
        }
    }

    fn advance_frame(&self, frame_time_nanos: u64) {
        let now = frame_time_nanos.max(self.now_nanos.get());
        self.now_nanos.set(now);
        self.run_due_tasks(now);
        self.drain_frame_callbacks(now);
    }
}

/// Owner of the runtime queues. Dropping it turns every [`RuntimeHandle`]
/// into an inert handle whose registrations never fire.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Moves the clock to `frame_time_nanos`, runs every scheduled task that
    /// became due, then drains the frame callbacks registered so far.
    ///
    /// Timestamps earlier than the current time are clamped; the clock never
    /// goes backwards.
    pub fn advance_frame(&self, frame_time_nanos: u64) {
        self.inner.advance_frame(frame_time_nanos);
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner.now_nanos.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.handle().frame_clock()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_nanos.get())
            .unwrap_or(0)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.frame_callbacks.borrow().is_empty())
            .unwrap_or(false)
    }

    /// Runs `callback` once the runtime clock has advanced by `delay`.
    ///
    /// The returned handle cancels the task when cancelled or dropped.
    pub fn schedule_after(
        &self,
        delay: Duration,
        callback: impl FnOnce() + 'static,
    ) -> ScheduledTask {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.schedule_task(delay, Box::new(callback));
                ScheduledTask::new(self.clone(), id)
            }
            None => ScheduledTask::inactive(self.clone()),
        }
    }

    /// Removes a scheduled task. Returns false when the task already ran or
    /// was cancelled before.
    pub fn cancel_task(&self, id: TaskId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.cancel_task(id))
            .unwrap_or(false)
    }

    pub fn is_task_pending(&self, id: TaskId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.is_task_pending(id))
            .unwrap_or(false)
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.tasks.borrow().is_empty())
            .unwrap_or(false)
    }

    /// True when neither frame callbacks nor scheduled tasks are queued.
    pub fn is_idle(&self) -> bool {
        !self.has_frame_callbacks() && !self.has_pending_tasks()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
