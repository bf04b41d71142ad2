//! Space-time CE/SE solver for the one-dimensional linear scalar wave.
//!
//! [`LinearScalarSolver`] marches `u_t + a u_x = 0` on a periodic
//! [`Grid`](wavemarch_grid::Grid) with the a-α scheme. The solution
//! alternates between the two staggered [`Plane`](wavemarch_core::Plane)s:
//! every half-step reads one plane and writes the other.
//!
//! Field state lives in dense per-plane buffers ([`PlaneFields`]); solution
//! elements are exposed as positional views ([`Selm`], [`SelmMut`]) into
//! those buffers rather than as separately allocated objects.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fields;
pub mod scheme;
pub mod selm;
pub mod solver;

pub use fields::PlaneFields;
pub use selm::{Selm, SelmMut};
pub use solver::LinearScalarSolver;
