//! Recurring timers.
//!
//! A [`Scheduler`] owns recurring tasks and fires them on its own clock.
//! [`TimerQueue`] is the clock-agnostic core shared by the real-time
//! [`EventLoop`](crate::EventLoop) and virtual-clock test schedulers: it
//! fires the earliest due task, reschedules it, and drops cancelled or
//! failed timers.
//!
//! Cancellation goes through a [`TimerHandle`], a cheap clone of a shared
//! flag, so a task may cancel its own timer from inside `fire()`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Add;
use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;
use tracing::error;
use wavemarch_core::TimerId;

use crate::config::check_interval;
use crate::error::DriverError;

/// Work run on every timer firing.
pub trait RecurringTask {
    /// Run one firing. An error cancels the timer.
    fn fire(&mut self) -> Result<(), DriverError>;
}

impl<T: RecurringTask> RecurringTask for Rc<RefCell<T>> {
    fn fire(&mut self) -> Result<(), DriverError> {
        self.try_borrow_mut()
            .map_err(|_| DriverError::Busy {
                what: "recurring task",
            })?
            .fire()
    }
}

/// Adapts a closure into a [`RecurringTask`].
pub struct FnTask<F>(pub F);

impl<F: FnMut() -> Result<(), DriverError>> RecurringTask for FnTask<F> {
    fn fire(&mut self) -> Result<(), DriverError> {
        (self.0)()
    }
}

/// Shared handle to one scheduled timer.
#[derive(Clone, Debug)]
pub struct TimerHandle {
    id: TimerId,
    interval: Duration,
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    fn new(interval: Duration) -> Self {
        Self {
            id: TimerId::next(),
            interval,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    /// Timer id.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Firing interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the timer. No firing starts after this returns.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Something that fires recurring tasks.
pub trait Scheduler {
    /// Fire `task` every `interval`, starting one interval from now.
    ///
    /// A zero interval is rejected with `ConfigError::NonPositiveInterval`,
    /// one above [`MAX_INTERVAL`](crate::config::MAX_INTERVAL) with
    /// `ConfigError::IntervalTooLarge`.
    fn schedule(
        &mut self,
        interval: Duration,
        task: Box<dyn RecurringTask>,
    ) -> Result<TimerHandle, DriverError>;

    /// Number of timers not yet cancelled.
    fn live_timers(&self) -> usize;
}

struct Entry<C> {
    handle: TimerHandle,
    due: C,
    task: Box<dyn RecurringTask>,
}

/// Timers ordered by due time on clock `C`.
pub struct TimerQueue<C> {
    entries: SmallVec<[Entry<C>; 4]>,
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.handle.id, &e.due)))
            .finish()
    }
}

impl<C: Copy + Ord + Add<Duration, Output = C>> TimerQueue<C> {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer first due at `now + interval`.
    pub fn insert(
        &mut self,
        now: C,
        interval: Duration,
        task: Box<dyn RecurringTask>,
    ) -> Result<TimerHandle, DriverError> {
        check_interval(interval)?;
        self.prune();
        let handle = TimerHandle::new(interval);
        self.entries.push(Entry {
            handle: handle.clone(),
            due: now + interval,
            task,
        });
        Ok(handle)
    }

    /// Drop every cancelled timer.
    pub fn prune(&mut self) {
        self.entries.retain(|e| !e.handle.is_cancelled());
    }

    /// Number of timers not yet cancelled.
    pub fn live(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .count()
    }

    /// Earliest due time among live timers.
    pub fn next_due(&self) -> Option<C> {
        self.entries
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .map(|e| e.due)
            .min()
    }

    /// Cancel the timer with `id`. Returns whether it was live.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let found = self
            .entries
            .iter()
            .find(|e| e.handle.id == id && !e.handle.is_cancelled());
        let live = found.is_some();
        if let Some(e) = found {
            e.handle.cancel();
        }
        self.prune();
        live
    }

    /// Cancel every timer. Returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let live = self.live();
        for e in &self.entries {
            e.handle.cancel();
        }
        self.entries.clear();
        live
    }

    /// Fire the earliest live timer due at or before `now`.
    ///
    /// Returns `None` when nothing is due. On success the timer is
    /// rescheduled one interval after its due time, or at `clock()` if it
    /// overran, so missed firings are coalesced. A task error cancels and
    /// removes the timer before the error is returned.
    pub fn fire_next<F: FnOnce() -> C>(
        &mut self,
        now: C,
        clock: F,
    ) -> Option<Result<TimerHandle, DriverError>> {
        self.prune();
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| e.due)
            .map(|(i, _)| i)?;
        let entry = &mut self.entries[idx];
        let handle = entry.handle.clone();
        if let Err(e) = entry.task.fire() {
            handle.cancel();
            self.entries.remove(idx);
            error!(timer = %handle.id(), error = %e, "task failed, timer cancelled");
            return Some(Err(e));
        }
        if handle.is_cancelled() {
            self.entries.remove(idx);
        } else {
            entry.due = (entry.due + handle.interval()).max(clock());
        }
        Some(Ok(handle))
    }
}
