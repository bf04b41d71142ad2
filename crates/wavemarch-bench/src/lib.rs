//! Benchmark profiles for the wavemarch solver and driver.
//!
//! - [`reference_config`]: the default 256-element session.
//! - [`stress_config`]: 16× the elements on the same domain.
//! - [`seeded_solver`]: a solver from a config, seeded but not set up.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use wavemarch_engine::{DriverError, GridConfig, SessionConfig, SessionLauncher};
use wavemarch_solver::LinearScalarSolver;

/// Default session: `(0, 8π)`, 256 elements, unit CFL.
pub fn reference_config() -> SessionConfig {
    SessionConfig::default()
}

/// Same domain at 4096 elements and CFL 0.8.
pub fn stress_config() -> SessionConfig {
    SessionConfig {
        grid: GridConfig {
            ncelm: 4096,
            ..GridConfig::default()
        },
        cfl: 0.8,
        ..SessionConfig::default()
    }
}

/// Build and seed the solver `config` describes.
pub fn seeded_solver(config: SessionConfig) -> Result<LinearScalarSolver, DriverError> {
    let handle = SessionLauncher::new(config)?.build_solver()?;
    let svr = handle.borrow().clone();
    Ok(svr)
}
