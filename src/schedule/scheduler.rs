//! Virtual-clock task queue.
//!
//! Tasks are kept ordered by due time, then by insertion order, so two tasks
//! due at the same instant fire in the order they were scheduled.

use serde::{Deserialize, Serialize};

/// Identifier of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A pending task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask<T> {
    /// Unique identifier for this task.
    pub id: TaskId,

    /// Virtual time (ms) at which the task is due.
    pub due_ms: u64,

    /// The task payload.
    pub task: T,
}

/// Cancellable deferred-task queue driven by a virtual clock.
///
/// Owners drain it with `pop_due` in a loop so that tasks scheduled by a
/// firing task still fire within the same window:
///
/// ```
/// use sequence_games::schedule::PlaybackScheduler;
///
/// let mut scheduler = PlaybackScheduler::new();
/// scheduler.schedule_after(100, "first");
/// scheduler.schedule_after(50, "second");
///
/// let horizon = scheduler.now() + 200;
/// let mut fired = Vec::new();
/// while let Some(entry) = scheduler.pop_due(horizon) {
///     fired.push(entry.task);
/// }
/// scheduler.settle(horizon);
///
/// assert_eq!(fired, vec!["second", "first"]);
/// assert_eq!(scheduler.now(), 200);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackScheduler<T> {
    /// Current virtual time (ms).
    now: u64,

    /// Pending tasks, sorted by (due, insertion).
    entries: Vec<ScheduledTask<T>>,

    /// Next task ID.
    next_id: u64,
}

impl<T> Default for PlaybackScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PlaybackScheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: 0,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Current virtual time (ms).
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due time of the next pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.entries.first().map(|e| e.due_ms)
    }

    /// Schedule a task at an absolute time. Past times fire on the next drain.
    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TaskId {
        let due_ms = due_ms.max(self.now);
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let pos = self.entries.partition_point(|e| e.due_ms <= due_ms);
        self.entries.insert(pos, ScheduledTask { id, due_ms, task });
        tracing::trace!(%id, due_ms, "task scheduled");
        id
    }

    /// Schedule a task `delay_ms` after the current time.
    pub fn schedule_after(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.schedule_at(self.now.saturating_add(delay_ms), task)
    }

    /// Cancel one task. Returns its payload if it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).task)
    }

    /// Drop every pending task at once. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        if cancelled > 0 {
            tracing::trace!(cancelled, "pending tasks flushed");
        }
        cancelled
    }

    /// Remove and return the earliest task due at or before `horizon`.
    ///
    /// The clock moves to the task's due time, so tasks scheduled while
    /// handling it are timed relative to the moment it fired.
    pub fn pop_due(&mut self, horizon: u64) -> Option<ScheduledTask<T>> {
        if self.entries.first()?.due_ms > horizon {
            return None;
        }
        let entry = self.entries.remove(0);
        self.now = self.now.max(entry.due_ms);
        Some(entry)
    }

    /// Move the clock to `horizon` once all due tasks have been drained.
    pub fn settle(&mut self, horizon: u64) {
        self.now = self.now.max(horizon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(scheduler: &mut PlaybackScheduler<T>, elapsed: u64) -> Vec<T> {
        let horizon = scheduler.now() + elapsed;
        let mut fired = Vec::new();
        while let Some(entry) = scheduler.pop_due(horizon) {
            fired.push(entry.task);
        }
        scheduler.settle(horizon);
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = PlaybackScheduler::new();
        scheduler.schedule_after(1600, 'c');
        scheduler.schedule_after(0, 'a');
        scheduler.schedule_after(800, 'b');

        assert_eq!(scheduler.next_due(), Some(0));
        assert_eq!(drain(&mut scheduler, 2000), vec!['a', 'b', 'c']);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut scheduler = PlaybackScheduler::new();
        for i in 0..5 {
            scheduler.schedule_at(100, i);
        }
        assert_eq!(drain(&mut scheduler, 100), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_partial_advance() {
        let mut scheduler = PlaybackScheduler::new();
        scheduler.schedule_after(500, "late");
        scheduler.schedule_after(100, "early");

        assert_eq!(drain(&mut scheduler, 300), vec!["early"]);
        assert_eq!(scheduler.now(), 300);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(drain(&mut scheduler, 200), vec!["late"]);
    }

    #[test]
    fn test_cancel_one() {
        let mut scheduler = PlaybackScheduler::new();
        let keep = scheduler.schedule_after(10, 1);
        let drop = scheduler.schedule_after(20, 2);

        assert_eq!(scheduler.cancel(drop), Some(2));
        assert_eq!(scheduler.cancel(drop), None);
        assert_eq!(drain(&mut scheduler, 100), vec![1]);
        assert_eq!(scheduler.cancel(keep), None);
    }

    #[test]
    fn test_cancel_all_prevents_firing() {
        let mut scheduler = PlaybackScheduler::new();
        for i in 0..4 {
            scheduler.schedule_after(i * 800, i);
        }
        assert_eq!(drain(&mut scheduler, 900), vec![0, 1]);
        assert_eq!(scheduler.cancel_all(), 2);
        assert!(drain(&mut scheduler, 10_000).is_empty());
    }

    #[test]
    fn test_past_due_clamps_to_now() {
        let mut scheduler = PlaybackScheduler::new();
        scheduler.settle(1000);
        scheduler.schedule_at(10, "stale");
        assert_eq!(scheduler.next_due(), Some(1000));
        assert_eq!(drain(&mut scheduler, 0), vec!["stale"]);
    }

    #[test]
    fn test_chained_tasks_fire_in_same_window() {
        let mut scheduler = PlaybackScheduler::new();
        scheduler.schedule_after(100, 0u32);

        let horizon = scheduler.now() + 1000;
        let mut fired = Vec::new();
        while let Some(entry) = scheduler.pop_due(horizon) {
            if entry.task < 3 {
                scheduler.schedule_after(200, entry.task + 1);
            }
            fired.push((entry.task, scheduler.now()));
        }
        assert_eq!(fired, vec![(0, 100), (1, 300), (2, 500), (3, 700)]);
    }
}
