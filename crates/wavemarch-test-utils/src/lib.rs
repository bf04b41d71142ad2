//! Test utilities and fake collaborators for wavemarch development.
//!
//! - [`ManualScheduler`]: a [`Scheduler`] on a virtual clock that only
//!   moves when the test says so.
//! - [`RecordingFigure`]: a [`Drawable`] that records every call.
//! - [`FailingDrawable`]: a [`Drawable`] whose `draw` fails after N calls.
//! - [`fixtures`]: seeded solvers and configs.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::time::Duration;

use wavemarch_core::CurveId;
use wavemarch_engine::{
    Drawable, DriverError, Figure, RecurringTask, RenderError, Scheduler, TimerHandle, TimerQueue,
};

/// Deterministic scheduler driven by explicit time advances.
///
/// Timers fire at their exact due instants: advancing by 50 ms with a
/// 10 ms timer fires it five times, at 10, 20, 30, 40 and 50 ms.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: TimerQueue<Duration>,
    now: Duration,
    fired: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Total firings so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Move the clock forward by `d`, firing everything due on the way.
    ///
    /// Stops at the first task error; the failing timer is already
    /// cancelled when the error is returned.
    pub fn advance_by(&mut self, d: Duration) -> Result<u64, DriverError> {
        let target = self.now + d;
        let mut fired = 0;
        while let Some(due) = self.queue.next_due().filter(|&due| due <= target) {
            self.now = due;
            if let Some(result) = self.queue.fire_next(due, || due) {
                result?;
                fired += 1;
                self.fired += 1;
            }
        }
        self.now = target;
        Ok(fired)
    }

    /// Jump to the next due timer and fire it. `Ok(false)` when idle.
    pub fn fire_next(&mut self) -> Result<bool, DriverError> {
        let Some(due) = self.queue.next_due() else {
            return Ok(false);
        };
        self.now = self.now.max(due);
        let now = self.now;
        match self.queue.fire_next(now, || now) {
            Some(result) => {
                result?;
                self.fired += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fire up to `n` timers back to back. Returns how many fired.
    pub fn fire_ticks(&mut self, n: u64) -> Result<u64, DriverError> {
        let mut fired = 0;
        while fired < n && self.fire_next()? {
            fired += 1;
        }
        Ok(fired)
    }
}

impl Scheduler for ManualScheduler {
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

/// Drawable that records every call and delegates storage to a [`Figure`].
#[derive(Debug, Default)]
pub struct RecordingFigure {
    pub figure: Figure,
    pub plots: u32,
    /// `(curve, x_len, y_len)` of every `set_curve_data` call.
    pub replacements: Vec<(CurveId, usize, usize)>,
    pub draws: u32,
}

impl RecordingFigure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest `(x, y)` of `curve`.
    pub fn last_data(&self, curve: CurveId) -> Option<(&[f64], &[f64])> {
        self.figure
            .curve(curve)
            .map(|c| (c.x.as_slice(), c.y.as_slice()))
    }

    /// Number of `set_curve_data` calls for `curve`.
    pub fn replacements_of(&self, curve: CurveId) -> usize {
        self.replacements.iter().filter(|r| r.0 == curve).count()
    }
}

impl Drawable for RecordingFigure {
    fn plot(&mut self, x: &[f64], y: &[f64], style: &str) -> Result<CurveId, RenderError> {
        let id = self.figure.plot(x, y, style)?;
        self.plots += 1;
        Ok(id)
    }

    fn set_curve_data(&mut self, curve: CurveId, x: &[f64], y: &[f64]) -> Result<(), RenderError> {
        self.figure.set_curve_data(curve, x, y)?;
        self.replacements.push((curve, x.len(), y.len()));
        Ok(())
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        self.figure.draw()?;
        self.draws += 1;
        Ok(())
    }

    fn curve_count(&self) -> usize {
        self.figure.curve_count()
    }
}

/// Drawable whose `draw` succeeds `ok_draws` times, then fails.
#[derive(Debug, Default)]
pub struct FailingDrawable {
    pub inner: RecordingFigure,
    pub ok_draws: u32,
}

impl FailingDrawable {
    pub fn new(ok_draws: u32) -> Self {
        Self {
            inner: RecordingFigure::new(),
            ok_draws,
        }
    }
}

impl Drawable for FailingDrawable {
    fn plot(&mut self, x: &[f64], y: &[f64], style: &str) -> Result<CurveId, RenderError> {
        self.inner.plot(x, y, style)
    }

    fn set_curve_data(&mut self, curve: CurveId, x: &[f64], y: &[f64]) -> Result<(), RenderError> {
        self.inner.set_curve_data(curve, x, y)
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        if self.inner.draws >= self.ok_draws {
            return Err(RenderError::Backend {
                reason: format!("draw {} refused", self.inner.draws + 1),
            });
        }
        self.inner.draw()
    }

    fn curve_count(&self) -> usize {
        self.inner.curve_count()
    }
}
