//! Solver lifecycle control: setup, advance, snapshot.
//!
//! [`SteppingController`] owns a shared [`SolverHandle`] and exposes the
//! three operations the rest of the driver needs. It has no rendering
//! concern; [`RenderSubscription`](crate::RenderSubscription) layers that
//! on top.

use std::cell::{Ref, RefCell, RefMut};
use std::f64::consts::PI;
use std::rc::Rc;

use tracing::debug;
use wavemarch_core::{HalfStepId, Plane, SolverError};
use wavemarch_solver::LinearScalarSolver;

use crate::config::ConfigError;
use crate::error::DriverError;

/// Shared, single-threaded handle to a session's solver.
pub type SolverHandle = Rc<RefCell<LinearScalarSolver>>;

/// Solution state on the current plane at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Cumulative half-steps since setup.
    pub half_step: HalfStepId,
    /// Simulated time.
    pub time: f64,
    /// Plane the data was read from.
    pub plane: Plane,
    /// Element centres.
    pub x: Vec<f64>,
    /// Values of the requested slot.
    pub y: Vec<f64>,
}

impl Snapshot {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the snapshot holds no points.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// x coordinates in units of π, as plotted.
    pub fn display_x(&self) -> Vec<f64> {
        self.x.iter().map(|x| x / PI).collect()
    }
}

/// Drives one solver through setup and marching.
#[derive(Debug)]
pub struct SteppingController {
    solver: SolverHandle,
    set_up: bool,
}

impl SteppingController {
    /// Wrap a solver handle. The solver may already be seeded but must not
    /// be marched through this controller until [`setup`](Self::setup).
    pub fn new(solver: SolverHandle) -> Self {
        let set_up = solver.try_borrow().is_ok_and(|s| s.is_set_up());
        Self { solver, set_up }
    }

    /// The shared solver handle.
    pub fn solver(&self) -> &SolverHandle {
        &self.solver
    }

    /// Whether [`setup`](Self::setup) has run.
    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    /// One-time march preparation.
    pub fn setup(&mut self) -> Result<(), DriverError> {
        if self.set_up {
            return Err(DriverError::AlreadySetUp);
        }
        let result = self.solver_mut()?.setup_march();
        match result {
            Ok(()) => {}
            Err(SolverError::AlreadySetUp) => return Err(DriverError::AlreadySetUp),
            Err(e) => return Err(e.into()),
        }
        self.set_up = true;
        debug!("stepping controller set up");
        Ok(())
    }

    /// March `steps` half-steps, blocking until done.
    pub fn advance(&mut self, steps: u64) -> Result<(), DriverError> {
        if steps == 0 {
            return Err(ConfigError::NonPositiveStepCount.into());
        }
        if !self.set_up {
            return Err(DriverError::NotSetUp);
        }
        self.solver_mut()?.march_alpha2(steps)?;
        Ok(())
    }

    /// Read the current plane's centres and values of `slot`.
    ///
    /// Does not mutate solver state; two calls with no `advance` between
    /// them return equal snapshots.
    pub fn snapshot(&self, slot: usize) -> Result<Snapshot, DriverError> {
        if !self.set_up {
            return Err(DriverError::NotSetUp);
        }
        let svr = self.solver_ref()?;
        let y = svr.get_so0(slot)?;
        Ok(Snapshot {
            half_step: svr.half_steps(),
            time: svr.time(),
            plane: svr.current_plane(),
            x: svr.xctr(),
            y,
        })
    }

    /// Cumulative half-steps advanced since setup.
    pub fn half_steps(&self) -> Result<HalfStepId, DriverError> {
        Ok(self.solver_ref()?.half_steps())
    }

    fn solver_ref(&self) -> Result<Ref<'_, LinearScalarSolver>, DriverError> {
        self.solver
            .try_borrow()
            .map_err(|_| DriverError::Busy { what: "solver" })
    }

    fn solver_mut(&self) -> Result<RefMut<'_, LinearScalarSolver>, DriverError> {
        self.solver
            .try_borrow_mut()
            .map_err(|_| DriverError::Busy { what: "solver" })
    }
}
