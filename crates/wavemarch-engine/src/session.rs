//! Session orchestration: batch comparison and interactive animation.
//!
//! Both modes build the same grid and solver, seed the same pulse, and set
//! up the march once. They differ only in presentation:
//!
//! - **batch**: plot the initial state, march `batch_steps` half-steps,
//!   plot the result on the same axes, draw once;
//! - **interactive**: bind a [`RenderSubscription`] and start an
//!   [`AnimationDriver`] firing it every `interval`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use wavemarch_core::{CurveId, TimerId};
use wavemarch_solver::LinearScalarSolver;

use crate::animation::AnimationDriver;
use crate::config::SessionConfig;
use crate::error::DriverError;
use crate::init::DomainInitializer;
use crate::metrics::TickMetrics;
use crate::plot::{Drawable, Figure};
use crate::scheduler::Scheduler;
use crate::stepping::{Snapshot, SolverHandle, SteppingController};
use crate::subscription::RenderSubscription;

/// Style of both batch curves.
const BATCH_STYLE: &str = "-";

enum SessionMode<D> {
    Batch {
        curves: [CurveId; 2],
    },
    Interactive {
        subscription: Rc<RefCell<RenderSubscription<D>>>,
        animation: AnimationDriver,
    },
}

/// A launched session: the drawable, the solver, and (interactive mode)
/// the running animation.
///
/// Dropping an interactive session cancels its timer.
pub struct Session<D> {
    drawable: Rc<RefCell<D>>,
    solver: SolverHandle,
    interval: Duration,
    mode: SessionMode<D>,
}

impl<D: Drawable + 'static> Session<D> {
    /// The drawable rendered to.
    pub fn drawable(&self) -> &Rc<RefCell<D>> {
        &self.drawable
    }

    /// The session's solver.
    pub fn solver(&self) -> &SolverHandle {
        &self.solver
    }

    /// Whether this is an interactive session.
    pub fn is_interactive(&self) -> bool {
        matches!(self.mode, SessionMode::Interactive { .. })
    }

    /// Whether the animation timer is live.
    pub fn is_animating(&self) -> bool {
        match &self.mode {
            SessionMode::Interactive { animation, .. } => animation.is_running(),
            SessionMode::Batch { .. } => false,
        }
    }

    /// Id of the live animation timer.
    pub fn timer(&self) -> Option<TimerId> {
        match &self.mode {
            SessionMode::Interactive { animation, .. } => animation.timer(),
            SessionMode::Batch { .. } => None,
        }
    }

    /// Stop the animation. Returns whether a timer was live.
    pub fn stop(&mut self) -> bool {
        match &mut self.mode {
            SessionMode::Interactive { animation, .. } => animation.stop(),
            SessionMode::Batch { .. } => false,
        }
    }

    /// Restart the animation on `scheduler`, replacing any live timer.
    ///
    /// The solver continues from where it stopped. Returns `Ok(None)` for
    /// a batch session.
    pub fn restart(&mut self, scheduler: &mut dyn Scheduler) -> Result<Option<TimerId>, DriverError> {
        match &mut self.mode {
            SessionMode::Interactive {
                subscription,
                animation,
            } => animation
                .start(scheduler, subscription.clone(), self.interval)
                .map(Some),
            SessionMode::Batch { .. } => Ok(None),
        }
    }

    /// Curves plotted by the session, in plotting order.
    pub fn curves(&self) -> Result<Vec<CurveId>, DriverError> {
        match &self.mode {
            SessionMode::Batch { curves } => Ok(curves.to_vec()),
            SessionMode::Interactive { subscription, .. } => {
                Ok(vec![borrow_subscription(subscription)?.curve()])
            }
        }
    }

    /// Animation ticks completed. Always zero for a batch session.
    pub fn ticks(&self) -> Result<u64, DriverError> {
        match &self.mode {
            SessionMode::Interactive { subscription, .. } => {
                Ok(borrow_subscription(subscription)?.ticks())
            }
            SessionMode::Batch { .. } => Ok(0),
        }
    }

    /// Timing of the latest animation tick.
    pub fn last_metrics(&self) -> Result<Option<TickMetrics>, DriverError> {
        match &self.mode {
            SessionMode::Interactive { subscription, .. } => Ok(Some(
                borrow_subscription(subscription)?.last_metrics().clone(),
            )),
            SessionMode::Batch { .. } => Ok(None),
        }
    }
}

fn borrow_subscription<D>(
    sub: &Rc<RefCell<RenderSubscription<D>>>,
) -> Result<std::cell::Ref<'_, RenderSubscription<D>>, DriverError> {
    sub.try_borrow()
        .map_err(|_| DriverError::Busy {
            what: "render subscription",
        })
}

/// Builds sessions from a validated [`SessionConfig`].
#[derive(Clone, Debug)]
pub struct SessionLauncher {
    config: SessionConfig,
}

impl SessionLauncher {
    /// Validate `config`. Nothing touches a solver if this fails.
    pub fn new(config: SessionConfig) -> Result<Self, DriverError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build the grid and solver and seed the initial pulse.
    pub fn build_solver(&self) -> Result<SolverHandle, DriverError> {
        let cfg = &self.config;
        let grid = Arc::new(cfg.grid.build()?);
        let dt = cfg.time_increment()?;
        let mut svr = LinearScalarSolver::with_wave_speed(grid, dt, cfg.wave_speed)?;
        DomainInitializer::new(cfg.pulse, cfg.slot).seed(&mut svr)?;
        Ok(Rc::new(RefCell::new(svr)))
    }

    /// Launch in the configured mode.
    ///
    /// Batch sessions ignore `scheduler`.
    pub fn launch<D: Drawable + 'static>(
        &self,
        drawable: D,
        scheduler: &mut dyn Scheduler,
    ) -> Result<(Session<D>, SolverHandle), DriverError> {
        if self.config.animate {
            self.launch_interactive(drawable, scheduler)
        } else {
            self.launch_batch(drawable)
        }
    }

    /// Two-frame comparison: initial state and `batch_steps` later.
    pub fn launch_batch<D: Drawable + 'static>(
        &self,
        drawable: D,
    ) -> Result<(Session<D>, SolverHandle), DriverError> {
        let cfg = &self.config;
        let solver = self.build_solver()?;
        let mut controller = SteppingController::new(solver.clone());
        controller.setup()?;
        let drawable = Rc::new(RefCell::new(drawable));

        let (curves, after) = self.render_batch(&mut controller, &drawable)?;
        info!(
            ncelm = after.len(),
            half_steps = %after.half_step,
            "batch session rendered"
        );
        let session = Session {
            drawable,
            solver: solver.clone(),
            interval: cfg.interval,
            mode: SessionMode::Batch { curves },
        };
        Ok((session, solver))
    }

    /// Plot the current frame, march `batch_steps`, plot again, draw once.
    fn render_batch<D: Drawable>(
        &self,
        controller: &mut SteppingController,
        drawable: &RefCell<D>,
    ) -> Result<([CurveId; 2], Snapshot), DriverError> {
        let slot = self.config.slot;
        let mut d = drawable
            .try_borrow_mut()
            .map_err(|_| DriverError::Busy { what: "drawable" })?;
        let before = controller.snapshot(slot)?;
        let first = d.plot(&before.display_x(), &before.y, BATCH_STYLE)?;
        controller.advance(self.config.batch_steps)?;
        let after = controller.snapshot(slot)?;
        let second = d.plot(&after.display_x(), &after.y, BATCH_STYLE)?;
        d.draw()?;
        Ok(([first, second], after))
    }

    /// Live animation: one tick per `interval` on `scheduler`.
    pub fn launch_interactive<D: Drawable + 'static>(
        &self,
        drawable: D,
        scheduler: &mut dyn Scheduler,
    ) -> Result<(Session<D>, SolverHandle), DriverError> {
        let cfg = &self.config;
        let solver = self.build_solver()?;
        let mut controller = SteppingController::new(solver.clone());
        controller.setup()?;
        let drawable = Rc::new(RefCell::new(drawable));
        let subscription = Rc::new(RefCell::new(RenderSubscription::bind(
            controller,
            drawable.clone(),
            cfg.slot,
        )?));
        let mut animation = AnimationDriver::new();
        animation.start(scheduler, subscription.clone(), cfg.interval)?;
        info!(
            interval_ms = cfg.interval.as_millis() as u64,
            "interactive session started"
        );
        let session = Session {
            drawable,
            solver: solver.clone(),
            interval: cfg.interval,
            mode: SessionMode::Interactive {
                subscription,
                animation,
            },
        };
        Ok((session, solver))
    }
}

/// Launch the default session on a fresh [`Figure`].
///
/// Grid `(0, 8π, 256)`, unit CFL and wave speed; `animate` picks the mode.
pub fn run_linear(
    animate: bool,
    interval: Duration,
    scheduler: &mut dyn Scheduler,
) -> Result<(Session<Figure>, SolverHandle), DriverError> {
    let config = SessionConfig {
        animate,
        interval,
        ..SessionConfig::default()
    };
    SessionLauncher::new(config)?.launch(Figure::default(), scheduler)
}
