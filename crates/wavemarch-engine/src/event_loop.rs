//! Real-time single-threaded event loop.
//!
//! [`EventLoop`] is the wall-clock [`Scheduler`]. Its run methods sleep
//! until the next timer is due, fire it on the calling thread, and between
//! firings apply [`LoopEvent`]s sent through a [`LoopHandle`]. Handles are
//! `Send`, so another thread can ask the loop to quit; the timers
//! themselves never leave the loop's thread.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};
use wavemarch_core::TimerId;

use crate::error::DriverError;
use crate::scheduler::{RecurringTask, Scheduler, TimerHandle, TimerQueue};

/// Control messages for a running loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopEvent {
    /// Return from the run call.
    Quit,
    /// Cancel every live timer.
    StopAnimation,
    /// Cancel one timer.
    Cancel(TimerId),
}

/// Sending side of a loop's event channel.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    tx: Sender<LoopEvent>,
}

impl LoopHandle {
    /// Queue an event. Returns `false` once the loop has been dropped.
    pub fn send(&self, event: LoopEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Ask the loop to return.
    pub fn quit(&self) -> bool {
        self.send(LoopEvent::Quit)
    }

    /// Ask the loop to cancel every timer.
    pub fn stop_animation(&self) -> bool {
        self.send(LoopEvent::StopAnimation)
    }
}

/// Why a run call returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A [`LoopEvent::Quit`] was received.
    Quit,
    /// The deadline passed.
    Deadline,
    /// The requested number of firings happened.
    TickLimit,
    /// No live timers remain.
    Idle,
}

/// Outcome of a run call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Timer firings during the call.
    pub ticks: u64,
    /// Why the call returned.
    pub stop: StopReason,
}

/// Wall-clock scheduler and event pump.
#[derive(Debug)]
pub struct EventLoop {
    queue: TimerQueue<Instant>,
    tx: Sender<LoopEvent>,
    rx: Receiver<LoopEvent>,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Loop with no timers.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            queue: TimerQueue::new(),
            tx,
            rx,
        }
    }

    /// A handle for sending events to this loop.
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run until `deadline`, a quit event, or no live timers remain.
    pub fn run_until(&mut self, deadline: Instant) -> Result<RunReport, DriverError> {
        self.run(Some(deadline), None)
    }

    /// Run for `period` of wall-clock time.
    pub fn run_for(&mut self, period: Duration) -> Result<RunReport, DriverError> {
        self.run_until(Instant::now() + period)
    }

    /// Run until `ticks` firings, a quit event, or no live timers remain.
    pub fn run_ticks(&mut self, ticks: u64) -> Result<RunReport, DriverError> {
        self.run(None, Some(ticks))
    }

    /// Returns `true` when the event asks the loop to quit.
    fn apply(&mut self, event: LoopEvent) -> bool {
        match event {
            LoopEvent::Quit => return true,
            LoopEvent::StopAnimation => {
                let n = self.queue.cancel_all();
                debug!(cancelled = n, "animation stopped by event");
            }
            LoopEvent::Cancel(id) => {
                self.queue.cancel(id);
            }
        }
        false
    }

    fn run(
        &mut self,
        deadline: Option<Instant>,
        max_ticks: Option<u64>,
    ) -> Result<RunReport, DriverError> {
        let mut ticks = 0;
        let report = |ticks, stop| Ok(RunReport { ticks, stop });
        loop {
            while let Ok(event) = self.rx.try_recv() {
                if self.apply(event) {
                    return report(ticks, StopReason::Quit);
                }
            }
            if max_ticks.is_some_and(|m| ticks >= m) {
                return report(ticks, StopReason::TickLimit);
            }
            let Some(due) = self.queue.next_due() else {
                return report(ticks, StopReason::Idle);
            };
            let now = Instant::now();
            if deadline.is_some_and(|d| now >= d) {
                return report(ticks, StopReason::Deadline);
            }
            if due > now {
                let wake = deadline.map_or(due, |d| d.min(due));
                match self.rx.recv_timeout(wake - now) {
                    Ok(event) => {
                        if self.apply(event) {
                            return report(ticks, StopReason::Quit);
                        }
                    }
                    Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {}
                }
                continue;
            }
            let started = Instant::now();
            match self.queue.fire_next(now, Instant::now) {
                Some(Ok(handle)) => {
                    ticks += 1;
                    let took = started.elapsed();
                    if took > handle.interval() {
                        warn!(
                            timer = %handle.id(),
                            took_us = took.as_micros() as u64,
                            interval_us = handle.interval().as_micros() as u64,
                            "tick overran its interval"
                        );
                    }
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }
    }
}

impl Scheduler for EventLoop {
    fn schedule(
        &mut self,
        interval: Duration,
        task: Box<dyn RecurringTask>,
    ) -> Result<TimerHandle, DriverError> {
        self.queue.insert(Instant::now(), interval, task)
    }

    fn live_timers(&self) -> usize {
        self.queue.live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FnTask;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_task(n: &Rc<Cell<u32>>) -> Box<dyn RecurringTask> {
        let n = n.clone();
        Box::new(FnTask(move || {
            n.set(n.get() + 1);
            Ok(())
        }))
    }

    #[test]
    fn idle_loop_returns_immediately() {
        let mut ev = EventLoop::new();
        let r = ev.run_for(Duration::from_secs(5)).unwrap();
        assert_eq!(r, RunReport { ticks: 0, stop: StopReason::Idle });
    }

    #[test]
    fn run_ticks_fires_exactly_n() {
        let mut ev = EventLoop::new();
        let n = Rc::new(Cell::new(0));
        ev.schedule(Duration::from_millis(1), counting_task(&n))
            .unwrap();
        let r = ev.run_ticks(3).unwrap();
        assert_eq!(r.stop, StopReason::TickLimit);
        assert_eq!(r.ticks, 3);
        assert_eq!(n.get(), 3);
    }

    #[test]
    fn quit_event_stops_the_loop() {
        let mut ev = EventLoop::new();
        let n = Rc::new(Cell::new(0));
        ev.schedule(Duration::from_millis(1), counting_task(&n))
            .unwrap();
        ev.handle().quit();
        let r = ev.run_for(Duration::from_secs(5)).unwrap();
        assert_eq!(r.stop, StopReason::Quit);
        assert_eq!(n.get(), 0);
    }

    #[test]
    fn quit_from_another_thread() {
        let mut ev = EventLoop::new();
        let n = Rc::new(Cell::new(0));
        ev.schedule(Duration::from_millis(1), counting_task(&n))
            .unwrap();
        let handle = ev.handle();
        let t = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            handle.quit();
        });
        let r = ev.run_for(Duration::from_secs(10)).unwrap();
        t.join().unwrap();
        assert_eq!(r.stop, StopReason::Quit);
        assert!(n.get() > 0);
    }

    #[test]
    fn stop_animation_event_cancels_timers() {
        let mut ev = EventLoop::new();
        let n = Rc::new(Cell::new(0));
        let h = ev
            .schedule(Duration::from_millis(1), counting_task(&n))
            .unwrap();
        ev.handle().stop_animation();
        let r = ev.run_for(Duration::from_millis(50)).unwrap();
        assert_eq!(r.stop, StopReason::Idle);
        assert!(h.is_cancelled());
        assert_eq!(ev.live_timers(), 0);
    }

    #[test]
    fn failing_task_surfaces_after_cancel() {
        let mut ev = EventLoop::new();
        let h = ev
            .schedule(
                Duration::from_millis(1),
                Box::new(FnTask(|| Err(DriverError::NotSetUp))),
            )
            .unwrap();
        assert_eq!(ev.run_ticks(5), Err(DriverError::NotSetUp));
        assert!(h.is_cancelled());
        assert_eq!(ev.live_timers(), 0);
    }

    #[test]
    fn deadline_bounds_the_run() {
        let mut ev = EventLoop::new();
        let n = Rc::new(Cell::new(0));
        ev.schedule(Duration::from_secs(60), counting_task(&n))
            .unwrap();
        let r = ev.run_for(Duration::from_millis(10)).unwrap();
        assert_eq!(r.stop, StopReason::Deadline);
        assert_eq!(n.get(), 0);
    }
}
