//! Reusable solver and session fixtures.
//!
//! - [`pulse_solver`]: a default-band pulse seeded onto a fresh solver.
//! - [`ready_controller`]: the same, wrapped in a set-up controller.
//! - [`session_config`]: the default config with a chosen mode.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use wavemarch_engine::{DomainInitializer, SessionConfig, SteppingController};
use wavemarch_grid::Grid;
use wavemarch_solver::LinearScalarSolver;

/// Seeded, not yet set up, solver over `(0, 8π)` with `ncelm` elements.
pub fn pulse_solver(ncelm: usize, cfl: f64) -> LinearScalarSolver {
    let grid = Arc::new(Grid::new(0.0, 8.0 * PI, ncelm).expect("valid fixture grid"));
    let dt = grid.dx() * cfl;
    let mut svr = LinearScalarSolver::new(grid, dt).expect("valid fixture time increment");
    DomainInitializer::default()
        .seed(&mut svr)
        .expect("fixture seeding");
    svr
}

/// Set-up controller over [`pulse_solver`].
pub fn ready_controller(ncelm: usize, cfl: f64) -> SteppingController {
    let mut c = SteppingController::new(Rc::new(RefCell::new(pulse_solver(ncelm, cfl))));
    c.setup().expect("fixture setup");
    c
}

/// Default config in the given mode and interval.
pub fn session_config(animate: bool, interval: Duration) -> SessionConfig {
    SessionConfig {
        animate,
        interval,
        ..SessionConfig::default()
    }
}
