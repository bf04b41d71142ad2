//! Core types and errors for the wavemarch CE/SE driver.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers, the staggered [`Plane`] selector, and the error enums shared
//! by the grid, solver, and engine crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod plane;

pub use error::{GridError, SolverError};
pub use id::{CurveId, HalfStepId, TimerId};
pub use plane::Plane;
