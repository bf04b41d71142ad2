//! Wavemarch: an animated CE/SE solution of `u_t + a u_x = 0`.
//!
//! This is the facade crate that re-exports the public API of the
//! wavemarch sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use wavemarch::prelude::*;
//!
//! // Batch mode: two frames 50 half-steps apart on the default domain.
//! let mut event_loop = EventLoop::new();
//! let (session, solver) = run_linear(false, Duration::from_millis(10), &mut event_loop).unwrap();
//! assert_eq!(session.drawable().borrow().curve_count(), 2);
//! assert_eq!(solver.borrow().half_steps(), HalfStepId(50));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wavemarch-core` | IDs, planes, grid and solver errors |
//! | [`grid`] | `wavemarch-grid` | Periodic staggered grid |
//! | [`solver`] | `wavemarch-solver` | Linear scalar CE/SE solver and element views |
//! | [`engine`] | `wavemarch-engine` | Seeding, stepping, rendering, scheduling, sessions |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core ids, [`types::Plane`], and error types (`wavemarch-core`).
pub use wavemarch_core as types;

/// Grid discretization (`wavemarch-grid`).
pub use wavemarch_grid as grid;

/// The linear scalar solver (`wavemarch-solver`).
///
/// [`solver::LinearScalarSolver`] marches the a-α scheme; element views are
/// [`solver::Selm`] and [`solver::SelmMut`].
pub use wavemarch_solver as solver;

/// The time-stepping animation driver (`wavemarch-engine`).
///
/// [`engine::SessionLauncher`] for batch and interactive sessions,
/// [`engine::EventLoop`] for wall-clock scheduling.
pub use wavemarch_engine as engine;

/// Common imports for typical wavemarch usage.
///
/// ```rust
/// use wavemarch::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use wavemarch_core::{CurveId, GridError, HalfStepId, Plane, SolverError, TimerId};

    // Grid and solver
    pub use wavemarch_grid::Grid;
    pub use wavemarch_solver::{LinearScalarSolver, Selm, SelmMut};

    // Configuration and errors
    pub use wavemarch_engine::{
        ConfigError, DriverError, GridConfig, PulseBand, RenderError, SessionConfig,
    };

    // Driver
    pub use wavemarch_engine::{
        run_linear, AnimationDriver, DomainInitializer, RenderSubscription, Session,
        SessionLauncher, Snapshot, SolverHandle, SteppingController, TickMetrics,
    };

    // Rendering and scheduling
    pub use wavemarch_engine::{
        Drawable, EventLoop, Figure, FigureConfig, LoopEvent, LoopHandle, RecurringTask,
        RunReport, Scheduler, StopReason,
    };
}
