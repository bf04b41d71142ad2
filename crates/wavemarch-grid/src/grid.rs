//! Periodic staggered grid over a half-open interval.

use wavemarch_core::{GridError, Plane};

/// A one-dimensional discretization of `[xmin, xmax)` into `ncelm` elements.
///
/// Element `j` of the even plane is centred at `xmin + (j + 1/2) dx`, element
/// `j` of the odd plane at `xmin + j dx`. Both planes hold exactly `ncelm`
/// elements and wrap periodically, so every element has one left and one
/// right neighbour on the opposite plane, each `dx / 2` away.
///
/// Immutable once constructed.
///
/// # Examples
///
/// ```
/// use wavemarch_core::Plane;
/// use wavemarch_grid::Grid;
///
/// let grid = Grid::new(0.0, 4.0, 4).unwrap();
/// assert_eq!(grid.ncelm(), 4);
/// assert_eq!(grid.dx(), 1.0);
/// assert_eq!(grid.xctr(Plane::Even, 0), 0.5);
/// assert_eq!(grid.xctr(Plane::Odd, 0), 0.0);
///
/// // Neighbours wrap around the periodic boundary.
/// assert_eq!(grid.neighbours(Plane::Odd, 0), (3, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xmin: f64,
    xmax: f64,
    ncelm: usize,
}

impl Grid {
    /// Create a grid of `ncelm` elements over `[xmin, xmax)`.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if `ncelm == 0`,
    /// `Err(GridError::NonFiniteBound)` if a bound is NaN or infinite, and
    /// `Err(GridError::InvalidBounds)` if `xmax <= xmin`.
    pub fn new(xmin: f64, xmax: f64, ncelm: usize) -> Result<Self, GridError> {
        if ncelm == 0 {
            return Err(GridError::EmptyGrid);
        }
        if !xmin.is_finite() || !xmax.is_finite() {
            return Err(GridError::NonFiniteBound);
        }
        if xmax <= xmin {
            return Err(GridError::InvalidBounds { xmin, xmax });
        }
        Ok(Self { xmin, xmax, ncelm })
    }

    /// Lower (inclusive) bound.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Upper (exclusive) bound.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Number of elements per plane.
    pub fn ncelm(&self) -> usize {
        self.ncelm
    }

    /// Element spacing `(xmax - xmin) / ncelm`.
    pub fn dx(&self) -> f64 {
        (self.xmax - self.xmin) / self.ncelm as f64
    }

    /// Distance between an element and either neighbour, `dx / 2`.
    pub fn half_dx(&self) -> f64 {
        self.dx() * 0.5
    }

    /// Centre coordinate of element `index` on `plane`.
    ///
    /// `index` is not bounds-checked; callers iterate `0..ncelm`.
    pub fn xctr(&self, plane: Plane, index: usize) -> f64 {
        let offset = match plane {
            Plane::Even => 0.5,
            Plane::Odd => 0.0,
        };
        self.xmin + (index as f64 + offset) * self.dx()
    }

    /// All element centres of `plane`, in ascending order.
    pub fn xctrs(&self, plane: Plane) -> Vec<f64> {
        (0..self.ncelm).map(|j| self.xctr(plane, j)).collect()
    }

    /// Indices `(left, right)` on the opposite plane that bound element
    /// `index` of `plane`.
    pub fn neighbours(&self, plane: Plane, index: usize) -> (usize, usize) {
        let n = self.ncelm;
        match plane {
            // Midpoint j sits between edges j and j + 1.
            Plane::Even => (index, (index + 1) % n),
            // Edge j sits between midpoints j - 1 and j.
            Plane::Odd => ((index + n - 1) % n, index),
        }
    }
}
