//! Error types shared across the wavemarch workspace.
//!
//! Organized by subsystem: grid construction and solver marching. The
//! engine crate adds its own configuration, render, and driver errors on
//! top of these.

use std::error::Error;
use std::fmt;

use crate::plane::Plane;

/// Errors from grid construction (`wavemarch_grid::Grid::new`).
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with zero elements.
    EmptyGrid,
    /// `xmax` does not lie strictly above `xmin`.
    InvalidBounds {
        /// Lower bound as given.
        xmin: f64,
        /// Upper bound as given.
        xmax: f64,
    },
    /// A bound is NaN or infinite.
    NonFiniteBound,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one element"),
            Self::InvalidBounds { xmin, xmax } => {
                write!(f, "xmax ({xmax}) must be greater than xmin ({xmin})")
            }
            Self::NonFiniteBound => write!(f, "grid bounds must be finite"),
        }
    }
}

impl Error for GridError {}

/// Errors from the linear scalar solver.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// `time_increment` is NaN, infinite, zero, or negative.
    InvalidTimeIncrement {
        /// The rejected value.
        value: f64,
    },
    /// `setup_march()` was called a second time.
    AlreadySetUp,
    /// Marching was requested before `setup_march()`.
    NotSetUp,
    /// A NaN or infinity was found in the field state.
    NonFiniteState {
        /// Plane holding the offending element.
        plane: Plane,
        /// Index of the first offending element.
        index: usize,
    },
    /// A variable slot beyond the solver's variable count was requested.
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// Number of variables the solver carries.
        nvar: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeIncrement { value } => {
                write!(f, "time_increment must be finite and positive, got {value}")
            }
            Self::AlreadySetUp => write!(f, "setup_march() called more than once"),
            Self::NotSetUp => write!(f, "march requested before setup_march()"),
            Self::NonFiniteState { plane, index } => {
                write!(f, "non-finite state on {plane} plane at element {index}")
            }
            Self::SlotOutOfRange { slot, nvar } => {
                write!(f, "variable slot {slot} out of range (nvar = {nvar})")
            }
        }
    }
}

impl Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_error_display() {
        let e = GridError::InvalidBounds {
            xmin: 1.0,
            xmax: 0.5,
        };
        assert_eq!(e.to_string(), "xmax (0.5) must be greater than xmin (1)");
    }

    #[test]
    fn slot_out_of_range_display() {
        let e = SolverError::SlotOutOfRange { slot: 3, nvar: 1 };
        assert_eq!(e.to_string(), "variable slot 3 out of range (nvar = 1)");
    }

    #[test]
    fn non_finite_state_names_plane() {
        let e = SolverError::NonFiniteState {
            plane: Plane::Odd,
            index: 7,
        };
        assert_eq!(e.to_string(), "non-finite state on odd plane at element 7");
    }
}
