//! Positional views of solution elements.
//!
//! A solution element is not an allocated object: [`Selm`] and [`SelmMut`]
//! are `(plane, index)` handles carrying borrowed slices of the element's
//! variable slots inside [`PlaneFields`](crate::PlaneFields). Iterating a
//! plane yields one view per element without any per-element allocation.

use wavemarch_core::{Plane, SolverError};

/// Read-only view of one solution element.
#[derive(Clone, Copy, Debug)]
pub struct Selm<'a> {
    pub(crate) plane: Plane,
    pub(crate) index: usize,
    pub(crate) xctr: f64,
    pub(crate) so0: &'a [f64],
    pub(crate) so1: &'a [f64],
}

impl Selm<'_> {
    /// Plane this element belongs to.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Position of this element within its plane.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Centre coordinate.
    pub fn xctr(&self) -> f64 {
        self.xctr
    }

    /// Value of variable `slot`, or `None` if out of range.
    pub fn so0(&self, slot: usize) -> Option<f64> {
        self.so0.get(slot).copied()
    }

    /// Spatial derivative of variable `slot`, or `None` if out of range.
    pub fn so1(&self, slot: usize) -> Option<f64> {
        self.so1.get(slot).copied()
    }
}

/// Mutable view of one solution element, used for seeding state.
#[derive(Debug)]
pub struct SelmMut<'a> {
    pub(crate) plane: Plane,
    pub(crate) index: usize,
    pub(crate) xctr: f64,
    pub(crate) so0: &'a mut [f64],
    pub(crate) so1: &'a mut [f64],
}

impl SelmMut<'_> {
    /// Plane this element belongs to.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Position of this element within its plane.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Centre coordinate.
    pub fn xctr(&self) -> f64 {
        self.xctr
    }

    /// Value of variable `slot`, or `None` if out of range.
    pub fn so0(&self, slot: usize) -> Option<f64> {
        self.so0.get(slot).copied()
    }

    /// Spatial derivative of variable `slot`, or `None` if out of range.
    pub fn so1(&self, slot: usize) -> Option<f64> {
        self.so1.get(slot).copied()
    }

    /// Set the value of variable `slot`.
    pub fn set_so0(&mut self, slot: usize, value: f64) -> Result<(), SolverError> {
        let nvar = self.so0.len();
        let cell = self
            .so0
            .get_mut(slot)
            .ok_or(SolverError::SlotOutOfRange { slot, nvar })?;
        *cell = value;
        Ok(())
    }

    /// Set the spatial derivative of variable `slot`.
    pub fn set_so1(&mut self, slot: usize, value: f64) -> Result<(), SolverError> {
        let nvar = self.so1.len();
        let cell = self
            .so1
            .get_mut(slot)
            .ok_or(SolverError::SlotOutOfRange { slot, nvar })?;
        *cell = value;
        Ok(())
    }
}
