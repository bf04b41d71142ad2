//! Start/stop control of the single recurring animation timer.

use std::time::Duration;

use tracing::{debug, info};
use wavemarch_core::TimerId;

use crate::config::check_interval;
use crate::error::DriverError;
use crate::scheduler::{RecurringTask, Scheduler, TimerHandle};

#[derive(Debug)]
enum DriverState {
    Stopped,
    Running(TimerHandle),
}

/// Owns at most one live recurring timer.
///
/// Starting while running cancels the previous timer before the new one is
/// scheduled, so the two never both fire. Dropping the driver stops it.
#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    /// A stopped driver.
    pub fn new() -> Self {
        Self {
            state: DriverState::Stopped,
        }
    }

    /// Schedule `task` every `interval`, replacing any running timer.
    ///
    /// An interval outside `(0, MAX_INTERVAL]` is rejected before the
    /// running timer is touched.
    pub fn start(
        &mut self,
        scheduler: &mut dyn Scheduler,
        task: impl RecurringTask + 'static,
        interval: Duration,
    ) -> Result<TimerId, DriverError> {
        check_interval(interval)?;
        if self.stop() {
            debug!("replacing running animation timer");
        }
        let handle = scheduler.schedule(interval, Box::new(task))?;
        let id = handle.id();
        info!(timer = %id, interval_ms = interval.as_millis() as u64, "animation started");
        self.state = DriverState::Running(handle);
        Ok(id)
    }

    /// Cancel the running timer. Returns whether one was live.
    ///
    /// Safe to call from inside a tick through [`stopper`](Self::stopper).
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.state, DriverState::Stopped) {
            DriverState::Running(handle) => {
                let was_live = !handle.is_cancelled();
                handle.cancel();
                if was_live {
                    debug!(timer = %handle.id(), "animation stopped");
                }
                was_live
            }
            DriverState::Stopped => false,
        }
    }

    /// Whether a timer is live. A timer cancelled elsewhere (by its own
    /// tick, an error, or the scheduler) counts as stopped.
    pub fn is_running(&self) -> bool {
        matches!(&self.state, DriverState::Running(h) if !h.is_cancelled())
    }

    /// Id of the live timer.
    pub fn timer(&self) -> Option<TimerId> {
        match &self.state {
            DriverState::Running(h) if !h.is_cancelled() => Some(h.id()),
            _ => None,
        }
    }

    /// A clone of the live timer's handle, for stopping from inside a tick.
    pub fn stopper(&self) -> Option<TimerHandle> {
        match &self.state {
            DriverState::Running(h) if !h.is_cancelled() => Some(h.clone()),
            _ => None,
        }
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::scheduler::{FnTask, TimerQueue};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct VirtualClock {
        queue: TimerQueue<Duration>,
        now: Duration,
    }

    impl VirtualClock {
        fn advance(&mut self, d: Duration) -> Result<u32, DriverError> {
            let target = self.now + d;
            let mut fired = 0;
            while let Some(due) = self.queue.next_due().filter(|&due| due <= target) {
                self.now = due;
                if let Some(r) = self.queue.fire_next(due, || due) {
                    r?;
                    fired += 1;
                }
            }
            self.now = target;
            Ok(fired)
        }
    }

    impl Scheduler for VirtualClock {
        fn schedule(
            &mut self,
            interval: Duration,
            task: Box<dyn RecurringTask>,
        ) -> Result<TimerHandle, DriverError> {
            self.queue.insert(self.now, interval, task)
        }

        fn live_timers(&self) -> usize {
            self.queue.live()
        }
    }

    fn counter(n: &Rc<Cell<u32>>) -> impl RecurringTask + 'static {
        let n = n.clone();
        FnTask(move || {
            n.set(n.get() + 1);
            Ok(())
        })
    }

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn start_then_stop() {
        let mut clock = VirtualClock::default();
        let mut anim = AnimationDriver::new();
        let n = Rc::new(Cell::new(0));
        anim.start(&mut clock, counter(&n), 10 * MS).unwrap();
        assert!(anim.is_running());
        assert_eq!(clock.advance(30 * MS).unwrap(), 3);
        assert!(anim.stop());
        assert!(!anim.stop());
        assert_eq!(clock.advance(100 * MS).unwrap(), 0);
        assert_eq!(n.get(), 3);
    }

    #[test]
    fn restart_keeps_one_timer() {
        let mut clock = VirtualClock::default();
        let mut anim = AnimationDriver::new();
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));
        let first = anim.start(&mut clock, counter(&a), 10 * MS).unwrap();
        let second = anim.start(&mut clock, counter(&b), 10 * MS).unwrap();
        assert_ne!(first, second);
        assert_eq!(clock.live_timers(), 1);
        assert_eq!(anim.timer(), Some(second));
        clock.advance(50 * MS).unwrap();
        assert_eq!((a.get(), b.get()), (0, 5));
    }

    #[test]
    fn zero_interval_leaves_running_timer_alone() {
        let mut clock = VirtualClock::default();
        let mut anim = AnimationDriver::new();
        let n = Rc::new(Cell::new(0));
        let id = anim.start(&mut clock, counter(&n), 10 * MS).unwrap();
        assert_eq!(
            anim.start(&mut clock, counter(&n), Duration::ZERO),
            Err(DriverError::Config(ConfigError::NonPositiveInterval))
        );
        assert_eq!(
            anim.start(&mut clock, counter(&n), Duration::MAX),
            Err(DriverError::Config(ConfigError::IntervalTooLarge {
                interval: Duration::MAX
            }))
        );
        assert_eq!(anim.timer(), Some(id));
        assert_eq!(clock.live_timers(), 1);
    }

    #[test]
    fn drop_cancels() {
        let mut clock = VirtualClock::default();
        let n = Rc::new(Cell::new(0));
        {
            let mut anim = AnimationDriver::new();
            anim.start(&mut clock, counter(&n), MS).unwrap();
        }
        assert_eq!(clock.live_timers(), 0);
        clock.advance(10 * MS).unwrap();
        assert_eq!(n.get(), 0);
    }

    #[test]
    fn stopper_works_from_inside_a_tick() {
        let mut clock = VirtualClock::default();
        let mut anim = AnimationDriver::new();
        let n = Rc::new(Cell::new(0));
        let stopper: Rc<Cell<Option<TimerHandle>>> = Rc::default();
        let (n2, s2) = (n.clone(), stopper.clone());
        anim.start(
            &mut clock,
            FnTask(move || {
                n2.set(n2.get() + 1);
                if n2.get() == 2 {
                    if let Some(h) = s2.take() {
                        h.cancel();
                    }
                }
                Ok(())
            }),
            MS,
        )
        .unwrap();
        stopper.set(anim.stopper());
        clock.advance(20 * MS).unwrap();
        assert_eq!(n.get(), 2);
        assert!(!anim.is_running());
    }
}
