//! Dense per-plane field storage.
//!
//! [`PlaneFields`] owns one `so0` (value) and one `so1` (spatial derivative)
//! buffer per plane. Element `j`, variable slot `iv` lives at
//! `j * nvar + iv`. The two planes alternate between "source" (read) and
//! "destination" (written) roles on every half-step, so a half-step borrows
//! one plane immutably and the other mutably via [`PlaneFields::split`].

use wavemarch_core::Plane;

/// Read-only borrow of one plane's buffers.
#[derive(Clone, Copy, Debug)]
pub struct PlaneRef<'a> {
    /// Values, `ncelm * nvar` entries.
    pub so0: &'a [f64],
    /// Spatial derivatives, `ncelm * nvar` entries.
    pub so1: &'a [f64],
}

/// Mutable borrow of one plane's buffers.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    /// Values, `ncelm * nvar` entries.
    pub so0: &'a mut [f64],
    /// Spatial derivatives, `ncelm * nvar` entries.
    pub so1: &'a mut [f64],
}

/// Value and derivative buffers for both planes.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneFields {
    nvar: usize,
    so0: [Vec<f64>; 2],
    so1: [Vec<f64>; 2],
}

impl PlaneFields {
    /// Zero-initialized storage for `ncelm` elements of `nvar` variables.
    pub fn new(ncelm: usize, nvar: usize) -> Self {
        let len = ncelm * nvar;
        Self {
            nvar,
            so0: [vec![0.0; len], vec![0.0; len]],
            so1: [vec![0.0; len], vec![0.0; len]],
        }
    }

    /// Borrow one plane read-only.
    pub fn plane(&self, plane: Plane) -> PlaneRef<'_> {
        PlaneRef {
            so0: &self.so0[plane.index()],
            so1: &self.so1[plane.index()],
        }
    }

    /// Borrow one plane mutably.
    pub fn plane_mut(&mut self, plane: Plane) -> PlaneMut<'_> {
        PlaneMut {
            so0: &mut self.so0[plane.index()],
            so1: &mut self.so1[plane.index()],
        }
    }

    /// Borrow `source` read-only and the opposite plane mutably.
    pub fn split(&mut self, source: Plane) -> (PlaneRef<'_>, PlaneMut<'_>) {
        let [so0_even, so0_odd] = &mut self.so0;
        let [so1_even, so1_odd] = &mut self.so1;
        match source {
            Plane::Even => (
                PlaneRef {
                    so0: so0_even,
                    so1: so1_even,
                },
                PlaneMut {
                    so0: so0_odd,
                    so1: so1_odd,
                },
            ),
            Plane::Odd => (
                PlaneRef {
                    so0: so0_odd,
                    so1: so1_odd,
                },
                PlaneMut {
                    so0: so0_even,
                    so1: so1_even,
                },
            ),
        }
    }

    /// Strided copy of slot `iv` of `so0` on `plane`.
    pub fn gather_so0(&self, plane: Plane, iv: usize) -> Vec<f64> {
        gather(&self.so0[plane.index()], self.nvar, iv)
    }

    /// Strided copy of slot `iv` of `so1` on `plane`.
    pub fn gather_so1(&self, plane: Plane, iv: usize) -> Vec<f64> {
        gather(&self.so1[plane.index()], self.nvar, iv)
    }

    /// Index of the first element on `plane` holding a non-finite value or
    /// derivative, if any.
    pub fn first_non_finite(&self, plane: Plane) -> Option<usize> {
        let p = self.plane(plane);
        p.so0
            .iter()
            .zip(p.so1)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
            .map(|i| i / self.nvar)
    }
}

fn gather(buf: &[f64], nvar: usize, iv: usize) -> Vec<f64> {
    buf.iter().skip(iv).step_by(nvar).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let f = PlaneFields::new(4, 2);
        assert_eq!(f.plane(Plane::Even).so0.len(), 8);
        assert!(f.plane(Plane::Odd).so1.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn split_targets_opposite_plane() {
        let mut f = PlaneFields::new(3, 1);
        f.plane_mut(Plane::Even).so0.fill(1.0);
        {
            let (src, dst) = f.split(Plane::Even);
            assert_eq!(src.so0, &[1.0, 1.0, 1.0]);
            dst.so0.copy_from_slice(&[2.0, 3.0, 4.0]);
        }
        assert_eq!(f.gather_so0(Plane::Odd, 0), vec![2.0, 3.0, 4.0]);
        assert_eq!(f.gather_so0(Plane::Even, 0), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn gather_strides_by_nvar() {
        let mut f = PlaneFields::new(3, 2);
        f.plane_mut(Plane::Odd)
            .so1
            .copy_from_slice(&[0.0, 10.0, 1.0, 11.0, 2.0, 12.0]);
        assert_eq!(f.gather_so1(Plane::Odd, 0), vec![0.0, 1.0, 2.0]);
        assert_eq!(f.gather_so1(Plane::Odd, 1), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn first_non_finite_reports_element() {
        let mut f = PlaneFields::new(4, 2);
        assert_eq!(f.first_non_finite(Plane::Even), None);
        f.plane_mut(Plane::Even).so1[5] = f64::NAN;
        assert_eq!(f.first_non_finite(Plane::Even), Some(2));
    }
}
