//! Render and driver error types.
//!
//! [`DriverError`] is what every session operation returns. It wraps
//! configuration errors (rejected before any solver call), solver errors,
//! and render errors, plus the lifecycle misuse the controller guards
//! against.

use std::error::Error;
use std::fmt;

use wavemarch_core::{CurveId, SolverError};

use crate::config::ConfigError;

/// Errors from a [`Drawable`](crate::Drawable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The curve id was never returned by `plot` on this drawable.
    UnknownCurve {
        /// The unknown id.
        curve: CurveId,
    },
    /// x and y sequences differ in length.
    LengthMismatch {
        /// Number of x coordinates.
        x_len: usize,
        /// Number of y values.
        y_len: usize,
    },
    /// The rendering backend failed.
    Backend {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCurve { curve } => write!(f, "unknown curve {curve}"),
            Self::LengthMismatch { x_len, y_len } => {
                write!(f, "x has {x_len} points but y has {y_len}")
            }
            Self::Backend { reason } => write!(f, "render backend failed: {reason}"),
        }
    }
}

impl Error for RenderError {}

/// Errors surfaced by the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverError {
    /// Configuration rejected at the call boundary.
    Config(ConfigError),
    /// The solver failed.
    Solver(SolverError),
    /// The drawable failed.
    Render(RenderError),
    /// `advance` or `snapshot` before `setup`.
    NotSetUp,
    /// `setup` (or seeding) after the session was already set up.
    AlreadySetUp,
    /// A shared handle was already borrowed when a tick needed it.
    Busy {
        /// Which handle was busy.
        what: &'static str,
    },
    /// Seeding visited fewer elements than the plane holds.
    IncompleteSeeding {
        /// Elements visited.
        visited: usize,
        /// Elements on the plane.
        expected: usize,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Solver(e) => write!(f, "solver: {e}"),
            Self::Render(e) => write!(f, "render: {e}"),
            Self::NotSetUp => write!(f, "controller used before setup()"),
            Self::AlreadySetUp => write!(f, "setup() already ran for this session"),
            Self::Busy { what } => write!(f, "{what} is already borrowed"),
            Self::IncompleteSeeding { visited, expected } => {
                write!(f, "seeded {visited} of {expected} elements")
            }
        }
    }
}

impl Error for DriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Solver(e) => Some(e),
            Self::Render(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for DriverError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SolverError> for DriverError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

impl From<RenderError> for DriverError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}
