//! Spatial discretization for wavemarch.
//!
//! A [`Grid`] divides the half-open interval `[xmin, xmax)` into a fixed
//! number of elements and defines the periodic, staggered topology the
//! CE/SE solver marches on: even-plane elements sit on cell midpoints,
//! odd-plane elements on cell edges, and each element's neighbours live on
//! the opposite plane.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;

pub use grid::Grid;
