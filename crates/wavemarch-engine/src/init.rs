//! Initial condition: a single sine period on a band, zero elsewhere.

use tracing::debug;
use wavemarch_solver::LinearScalarSolver;

use crate::config::PulseBand;
use crate::error::DriverError;

/// Seeds the even plane of a solver before setup.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DomainInitializer {
    band: PulseBand,
    slot: usize,
}

impl DomainInitializer {
    /// Initializer writing the pulse on `band` into variable `slot`.
    pub fn new(band: PulseBand, slot: usize) -> Self {
        Self { band, slot }
    }

    /// The pulse band.
    pub fn band(&self) -> PulseBand {
        self.band
    }

    /// `(value, derivative)` at element centre `x`.
    pub fn initial_state(&self, x: f64) -> (f64, f64) {
        if self.band.contains(x) {
            (x.sin(), x.cos())
        } else {
            (0.0, 0.0)
        }
    }

    /// Write the initial state into every element of the even plane.
    ///
    /// Returns the number of elements visited, which always equals the
    /// grid's element count on success.
    pub fn seed(&self, solver: &mut LinearScalarSolver) -> Result<usize, DriverError> {
        if solver.is_set_up() {
            return Err(DriverError::AlreadySetUp);
        }
        let expected = solver.grid().ncelm();
        let mut visited = 0;
        for mut e in solver.selms_mut(false) {
            let (v, dv) = self.initial_state(e.xctr());
            e.set_so0(self.slot, v)?;
            e.set_so1(self.slot, dv)?;
            visited += 1;
        }
        if visited != expected {
            return Err(DriverError::IncompleteSeeding { visited, expected });
        }
        debug!(visited, lo = self.band.lo, hi = self.band.hi, "domain seeded");
        Ok(visited)
    }
}
