//! Cancellable handle for work scheduled on the runtime clock.

use crate::{RuntimeHandle, TaskId};
use std::cell::Cell;

/// Handle to a task queued with [`RuntimeHandle::schedule_after`].
///
/// Cancelling is idempotent: cancelling twice, or after the task already
/// ran, does nothing. Dropping the handle cancels the task.
pub struct ScheduledTask {
    runtime: RuntimeHandle,
    id: Cell<Option<TaskId>>,
}

impl ScheduledTask {
    pub(crate) fn new(runtime: RuntimeHandle, id: TaskId) -> Self {
        Self {
            runtime,
            id: Cell::new(Some(id)),
        }
    }

    pub(crate) fn inactive(runtime: RuntimeHandle) -> Self {
        Self {
            runtime,
            id: Cell::new(None),
        }
    }

    pub fn id(&self) -> Option<TaskId> {
        self.id.get()
    }

    /// True while the task is queued and has neither run nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.id
            .get()
            .map(|id| self.runtime.is_task_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(&self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_task(id);
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("id", &self.id.get())
            .field("pending", &self.is_pending())
            .finish()
    }
}
