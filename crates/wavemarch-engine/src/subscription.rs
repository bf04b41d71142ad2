//! Binding of one stepping controller to one curve on a drawable.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use std::time::Instant;

use tracing::trace;
use wavemarch_core::CurveId;

use crate::error::DriverError;
use crate::metrics::TickMetrics;
use crate::plot::Drawable;
use crate::scheduler::RecurringTask;
use crate::stepping::SteppingController;

/// Line style of the animated curve.
const CURVE_STYLE: &str = "-";

/// Pushes a fresh snapshot to one curve on every tick.
///
/// The curve's data is fully replaced each tick; nothing from earlier
/// ticks is kept.
#[derive(Debug)]
pub struct RenderSubscription<D> {
    controller: SteppingController,
    drawable: Rc<RefCell<D>>,
    curve: CurveId,
    slot: usize,
    ticks: u64,
    last_metrics: TickMetrics,
}

impl<D: Drawable> RenderSubscription<D> {
    /// Plot the controller's current snapshot and bind to the new curve.
    ///
    /// The controller must already be set up.
    pub fn bind(
        controller: SteppingController,
        drawable: Rc<RefCell<D>>,
        slot: usize,
    ) -> Result<Self, DriverError> {
        let snap = controller.snapshot(slot)?;
        let curve = borrow_drawable(&drawable)?.plot(&snap.display_x(), &snap.y, CURVE_STYLE)?;
        Ok(Self {
            controller,
            drawable,
            curve,
            slot,
            ticks: 0,
            last_metrics: TickMetrics {
                half_step: snap.half_step,
                ..TickMetrics::default()
            },
        })
    }

    /// Advance one half-step, replace the curve data, and request a redraw.
    pub fn tick(&mut self) -> Result<(), DriverError> {
        let start = Instant::now();
        self.controller.advance(1)?;
        let advanced = Instant::now();
        let snap = self.controller.snapshot(self.slot)?;
        {
            let mut d = borrow_drawable(&self.drawable)?;
            d.set_curve_data(self.curve, &snap.display_x(), &snap.y)?;
            d.draw()?;
        }
        let end = Instant::now();
        self.ticks += 1;
        self.last_metrics = TickMetrics {
            half_step: snap.half_step,
            advance_us: (advanced - start).as_micros() as u64,
            render_us: (end - advanced).as_micros() as u64,
            total_us: (end - start).as_micros() as u64,
        };
        trace!(
            tick = self.ticks,
            half_step = %snap.half_step,
            total_us = self.last_metrics.total_us,
            "frame rendered"
        );
        Ok(())
    }

    /// The bound curve.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Ticks completed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timing of the most recent tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// The underlying controller.
    pub fn controller(&self) -> &SteppingController {
        &self.controller
    }

    /// The drawable being updated.
    pub fn drawable(&self) -> &Rc<RefCell<D>> {
        &self.drawable
    }
}

impl<D: Drawable> RecurringTask for RenderSubscription<D> {
    fn fire(&mut self) -> Result<(), DriverError> {
        self.tick()
    }
}

fn borrow_drawable<D>(drawable: &Rc<RefCell<D>>) -> Result<RefMut<'_, D>, DriverError> {
    drawable
        .try_borrow_mut()
        .map_err(|_| DriverError::Busy { what: "drawable" })
}
