//! The linear scalar CE/SE solver.
//!
//! Lifecycle: construct → seed through [`selms_mut`](LinearScalarSolver::selms_mut)
//! → [`setup_march`](LinearScalarSolver::setup_march) once →
//! [`march_alpha2`](LinearScalarSolver::march_alpha2) any number of times.
//! Marching before setup and setting up twice are rejected.

use std::sync::Arc;

use tracing::{debug, trace};
use wavemarch_core::{HalfStepId, Plane, SolverError};
use wavemarch_grid::Grid;

use crate::fields::{PlaneFields, PlaneMut};
use crate::scheme::{self, HalfStep};
use crate::selm::{Selm, SelmMut};

/// Number of conserved variables carried by the linear scalar equation.
pub const NVAR: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MarchState {
    Seeding,
    Marching,
}

/// Solver for `u_t + a u_x = 0` on a periodic staggered grid.
///
/// The state starts on the even plane at `t = 0`. Each half-step advances
/// time by `time_increment / 2` and moves the solution to the other plane;
/// [`xctr`](Self::xctr) and [`get_so0`](Self::get_so0) always report the
/// plane holding the latest solution.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use wavemarch_grid::Grid;
/// use wavemarch_solver::LinearScalarSolver;
///
/// let grid = Arc::new(Grid::new(0.0, 4.0, 4).unwrap());
/// let mut svr = LinearScalarSolver::new(grid, 1.0).unwrap();
/// for (j, mut e) in svr.selms_mut(false).enumerate() {
///     e.set_so0(0, j as f64).unwrap();
/// }
/// svr.setup_march().unwrap();
/// svr.march_alpha2(2).unwrap();
/// // At unit Courant number a full step shifts the profile one element right.
/// assert_eq!(svr.get_so0(0).unwrap(), vec![3.0, 0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearScalarSolver {
    grid: Arc<Grid>,
    time_increment: f64,
    wave_speed: f64,
    fields: PlaneFields,
    plane: Plane,
    state: MarchState,
    half_steps: HalfStepId,
}

impl LinearScalarSolver {
    /// Create a solver with unit wave speed.
    ///
    /// Returns `Err(SolverError::InvalidTimeIncrement)` unless
    /// `time_increment` is finite and positive.
    pub fn new(grid: Arc<Grid>, time_increment: f64) -> Result<Self, SolverError> {
        Self::with_wave_speed(grid, time_increment, 1.0)
    }

    /// Create a solver with an explicit wave speed `a`.
    pub fn with_wave_speed(
        grid: Arc<Grid>,
        time_increment: f64,
        wave_speed: f64,
    ) -> Result<Self, SolverError> {
        if !time_increment.is_finite() || time_increment <= 0.0 {
            return Err(SolverError::InvalidTimeIncrement {
                value: time_increment,
            });
        }
        let fields = PlaneFields::new(grid.ncelm(), NVAR);
        Ok(Self {
            grid,
            time_increment,
            wave_speed,
            fields,
            plane: Plane::Even,
            state: MarchState::Seeding,
            half_steps: HalfStepId(0),
        })
    }

    /// The grid this solver marches on.
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// Full time increment `dt`.
    pub fn time_increment(&self) -> f64 {
        self.time_increment
    }

    /// Wave speed `a`.
    pub fn wave_speed(&self) -> f64 {
        self.wave_speed
    }

    /// Courant number `a dt / dx`.
    pub fn cfl(&self) -> f64 {
        self.half_step().nu()
    }

    /// Number of variables per element.
    pub fn nvar(&self) -> usize {
        NVAR
    }

    /// Plane currently holding the latest solution.
    pub fn current_plane(&self) -> Plane {
        self.plane
    }

    /// Half-steps marched since setup.
    pub fn half_steps(&self) -> HalfStepId {
        self.half_steps
    }

    /// Simulated time reached, `half_steps * dt / 2`.
    pub fn time(&self) -> f64 {
        self.half_steps.0 as f64 * self.time_increment * 0.5
    }

    /// Whether [`setup_march`](Self::setup_march) has run.
    pub fn is_set_up(&self) -> bool {
        self.state == MarchState::Marching
    }

    /// Read-only views of every element on one plane, in order.
    ///
    /// The iterator is finite and can be restarted by calling this again.
    pub fn selms(&self, odd_plane: bool) -> impl Iterator<Item = Selm<'_>> + '_ {
        let plane = Plane::from_odd(odd_plane);
        let grid = &*self.grid;
        let p = self.fields.plane(plane);
        p.so0
            .chunks_exact(NVAR)
            .zip(p.so1.chunks_exact(NVAR))
            .enumerate()
            .map(move |(index, (so0, so1))| Selm {
                plane,
                index,
                xctr: grid.xctr(plane, index),
                so0,
                so1,
            })
    }

    /// Mutable views of every element on one plane, in order.
    pub fn selms_mut(&mut self, odd_plane: bool) -> impl Iterator<Item = SelmMut<'_>> + '_ {
        let plane = Plane::from_odd(odd_plane);
        let grid = &*self.grid;
        let PlaneMut { so0, so1 } = self.fields.plane_mut(plane);
        so0.chunks_exact_mut(NVAR)
            .zip(so1.chunks_exact_mut(NVAR))
            .enumerate()
            .map(move |(index, (so0, so1))| SelmMut {
                plane,
                index,
                xctr: grid.xctr(plane, index),
                so0,
                so1,
            })
    }

    /// One-time preparation before marching.
    ///
    /// Verifies the seeded state is finite. Returns
    /// `Err(SolverError::AlreadySetUp)` on a second call.
    pub fn setup_march(&mut self) -> Result<(), SolverError> {
        if self.state == MarchState::Marching {
            return Err(SolverError::AlreadySetUp);
        }
        if let Some(index) = self.fields.first_non_finite(self.plane) {
            return Err(SolverError::NonFiniteState {
                plane: self.plane,
                index,
            });
        }
        self.state = MarchState::Marching;
        debug!(
            ncelm = self.grid.ncelm(),
            dt = self.time_increment,
            cfl = self.cfl(),
            "march set up"
        );
        Ok(())
    }

    /// March `steps` half-steps. Blocks until done.
    ///
    /// # Errors
    ///
    /// `SolverError::NotSetUp` before [`setup_march`](Self::setup_march);
    /// `SolverError::NonFiniteState` if a half-step produces NaN or
    /// infinity, in which case the solver stops at the last good plane.
    pub fn march_alpha2(&mut self, steps: u64) -> Result<(), SolverError> {
        if self.state != MarchState::Marching {
            return Err(SolverError::NotSetUp);
        }
        for _ in 0..steps {
            self.march_half()?;
        }
        trace!(half_steps = self.half_steps.0, "marched {steps} half-steps");
        Ok(())
    }

    fn half_step(&self) -> HalfStep {
        HalfStep {
            wave_speed: self.wave_speed,
            tau: self.time_increment * 0.5,
            h: self.grid.half_dx(),
        }
    }

    fn march_half(&mut self) -> Result<(), SolverError> {
        let step = self.half_step();
        let target = self.plane.flip();
        let grid = &*self.grid;
        let (src, dst) = self.fields.split(self.plane);
        scheme::march_half_so0(grid, target, NVAR, step, src, dst.so0);
        scheme::march_half_so1_alpha2(grid, target, NVAR, step, src, dst);
        if let Some(index) = self.fields.first_non_finite(target) {
            return Err(SolverError::NonFiniteState {
                plane: target,
                index,
            });
        }
        self.plane = target;
        self.half_steps = self.half_steps.advanced_by(1);
        Ok(())
    }

    /// Centres of the current plane's elements.
    pub fn xctr(&self) -> Vec<f64> {
        self.grid.xctrs(self.plane)
    }

    /// Dense copy of the values of `slot` on the current plane.
    pub fn get_so0(&self, slot: usize) -> Result<Vec<f64>, SolverError> {
        self.check_slot(slot)?;
        Ok(self.fields.gather_so0(self.plane, slot))
    }

    /// Dense copy of the derivatives of `slot` on the current plane.
    pub fn get_so1(&self, slot: usize) -> Result<Vec<f64>, SolverError> {
        self.check_slot(slot)?;
        Ok(self.fields.gather_so1(self.plane, slot))
    }

    fn check_slot(&self, slot: usize) -> Result<(), SolverError> {
        if slot >= NVAR {
            return Err(SolverError::SlotOutOfRange { slot, nvar: NVAR });
        }
        Ok(())
    }
}
