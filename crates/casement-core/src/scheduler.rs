//! Single-threaded tick scheduler for time-based callbacks.
//!
//! The scheduler backs everything in Casement that happens "later" without
//! leaving the GUI thread: caret blink, hover-delay menu expansion, tween
//! animation steps. Entries are drained by [`TickScheduler::poll`], which
//! the GUI root calls exactly once per tick, so every callback runs on the
//! thread that owns the control tree and never overlaps another callback.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use casement_core::TickScheduler;
//!
//! let mut scheduler = TickScheduler::new();
//! let id = scheduler.schedule_once(Duration::from_millis(300), || {
//!     // open the submenu
//! });
//!
//! // The pointer left before the delay elapsed:
//! scheduler.cancel(id).unwrap();
//!
//! // Once per tick:
//! scheduler.poll(Instant::now());
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::error::SchedulerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled task.
    pub struct TaskId;
}

/// Whether a scheduled task runs once or repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Executes once at the scheduled time, then is removed.
    OneShot,
    /// Executes at every interval until cancelled.
    Repeating,
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnMut()>;

struct TaskData {
    /// When this task should next execute.
    next_run: Instant,
    /// The interval for repeating tasks.
    interval: Duration,
    kind: ScheduleKind,
    /// Cleared on cancellation; stale heap entries check this.
    active: bool,
    task: BoxedTask,
}

/// An entry in the scheduler queue (min-heap by execution time).
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    id: TaskId,
    run_time: Instant,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.run_time.cmp(&self.run_time)
    }
}

/// Manages time-based callbacks polled from the GUI tick.
///
/// Tasks are kept in a slotmap keyed by [`TaskId`] with a priority queue
/// ordered by next execution time. Cancellation marks the slot inactive;
/// stale queue entries are discarded when they surface.
pub struct TickScheduler {
    tasks: SlotMap<TaskId, TaskData>,
    queue: BinaryHeap<QueueEntry>,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler {
    /// Create a new empty scheduler.
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a one-shot task to execute after the specified delay.
    ///
    /// Returns the task ID, which can be used to cancel the task before it
    /// fires.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> TaskId
    where
        F: FnMut() + 'static,
    {
        self.schedule(delay, ScheduleKind::OneShot, Box::new(task))
    }

    /// Schedule a task to execute repeatedly at the specified interval.
    ///
    /// The first execution happens one full interval from now.
    pub fn schedule_repeating<F>(&mut self, interval: Duration, task: F) -> TaskId
    where
        F: FnMut() + 'static,
    {
        self.schedule(interval, ScheduleKind::Repeating, Box::new(task))
    }

    fn schedule(&mut self, interval: Duration, kind: ScheduleKind, task: BoxedTask) -> TaskId {
        let next_run = Instant::now() + interval;
        let id = self.tasks.insert(TaskData {
            next_run,
            interval,
            kind,
            active: true,
            task,
        });
        self.queue.push(QueueEntry { id, run_time: next_run });
        tracing::trace!(target: targets::SCHEDULER, ?id, ?kind, ?interval, "scheduled task");
        id
    }

    /// Cancel a scheduled task.
    ///
    /// Returns an error if the ID is unknown or the task already ran (for
    /// one-shots) or was already cancelled.
    pub fn cancel(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        match self.tasks.get_mut(id) {
            Some(data) if data.active => {
                data.active = false;
                self.tasks.remove(id);
                tracing::trace!(target: targets::SCHEDULER, ?id, "cancelled task");
                Ok(())
            }
            _ => Err(SchedulerError::InvalidTaskId),
        }
    }

    /// Check whether a task is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.get(id).is_some_and(|data| data.active)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The instant the earliest pending task is due, if any.
    ///
    /// Hosts running in on-demand ("no-loop") mode use this to decide how
    /// long they may sleep before the next poll.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.iter().map(|entry| entry.run_time).min()
    }

    /// Run every task that is due at `now`.
    ///
    /// One-shot tasks are removed after running; repeating tasks are
    /// re-queued one interval ahead. Returns the number of tasks executed.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut executed = 0;

        while let Some(&QueueEntry { id, run_time }) = self.queue.peek() {
            if run_time > now {
                break;
            }
            self.queue.pop();

            // Stale entries: cancelled tasks, or repeating tasks that were
            // re-queued with a later run time.
            let Some(data) = self.tasks.get_mut(id) else {
                continue;
            };
            if !data.active || data.next_run != run_time {
                continue;
            }

            (data.task)();
            executed += 1;

            match data.kind {
                ScheduleKind::OneShot => {
                    self.tasks.remove(id);
                }
                ScheduleKind::Repeating => {
                    let next_run = now + data.interval;
                    data.next_run = next_run;
                    self.queue.push(QueueEntry { id, run_time: next_run });
                }
            }
        }

        if executed > 0 {
            tracing::trace!(target: targets::SCHEDULER, executed, "poll drained tasks");
        }
        executed
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("pending", &self.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn one_shot_fires_once() {
        let mut scheduler = TickScheduler::new();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        scheduler.schedule_once(Duration::ZERO, move || c.set(c.get() + 1));

        let later = Instant::now() + Duration::from_millis(1);
        assert_eq!(scheduler.poll(later), 1);
        assert_eq!(count.get(), 1);

        // A second poll must not re-run it.
        assert_eq!(scheduler.poll(later + Duration::from_secs(1)), 0);
        assert_eq!(count.get(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn not_due_tasks_stay_queued() {
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule_once(Duration::from_secs(60), || {});

        assert_eq!(scheduler.poll(Instant::now()), 0);
        assert!(scheduler.is_pending(id));
    }

    #[test]
    fn cancel_prevents_execution() {
        let mut scheduler = TickScheduler::new();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        let id = scheduler.schedule_once(Duration::ZERO, move || c.set(c.get() + 1));

        scheduler.cancel(id).unwrap();
        assert_eq!(scheduler.poll(Instant::now() + Duration::from_secs(1)), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn cancel_unknown_id_fails() {
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule_once(Duration::ZERO, || {});
        scheduler.poll(Instant::now() + Duration::from_millis(1));

        // Already ran; the slot is gone.
        assert_eq!(scheduler.cancel(id), Err(SchedulerError::InvalidTaskId));
    }

    #[test]
    fn repeating_task_reschedules() {
        let mut scheduler = TickScheduler::new();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        let id = scheduler.schedule_repeating(Duration::from_millis(10), move || {
            c.set(c.get() + 1);
        });

        let mut now = Instant::now() + Duration::from_millis(11);
        scheduler.poll(now);
        assert_eq!(count.get(), 1);

        now += Duration::from_millis(11);
        scheduler.poll(now);
        assert_eq!(count.get(), 2);

        assert!(scheduler.is_pending(id));
        scheduler.cancel(id).unwrap();
        assert!(!scheduler.is_pending(id));
    }

    #[test]
    fn next_due_reports_earliest() {
        let mut scheduler = TickScheduler::new();
        assert!(scheduler.next_due().is_none());

        scheduler.schedule_once(Duration::from_secs(10), || {});
        scheduler.schedule_once(Duration::from_secs(1), || {});

        let due = scheduler.next_due().unwrap();
        assert!(due <= Instant::now() + Duration::from_secs(1));
    }
}
