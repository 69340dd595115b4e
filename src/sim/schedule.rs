//! Deferred tasks with cancellation handles
//!
//! Replaces ad-hoc timers: the spawn loop and the time-slow reset are queued
//! here with a due time and fired by the host's `advance` in due order.

use serde::{Deserialize, Serialize};

/// Handle returned by [`Scheduler::schedule`], used to cancel a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

/// Work a deferred task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// One spawn-loop firing
    Spawn,
    /// Restore normal time after a time-slow window
    EndTimeSlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub handle: TaskHandle,
    pub kind: TaskKind,
    /// Due time (ms)
    pub due: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, kind: TaskKind) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledTask { handle, kind, due });
        handle
    }

    /// Returns true if the task was still pending
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time among pending tasks
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|t| t.due).min_by(f64::total_cmp)
    }

    /// Remove and return the earliest task due at or before `now`.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: f64) -> Option<ScheduledTask> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.handle.0.cmp(&b.handle.0)))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx))
    }
}
