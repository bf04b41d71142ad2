//! Half-step kernels of the a-α CE/SE scheme for `u_t + a u_x = 0`.
//!
//! Each destination element `j` is bounded by a left (`L`) and right (`R`)
//! solution element on the source plane, `h` away in space and `τ` behind
//! in time. With `ν = a τ / h`:
//!
//! ```text
//! u_j   = ½[(1 + ν) u_L + (1 − ν) u_R] + (h / 4)(1 − ν²)(ux_L − ux_R)
//! u'_L  = u_L − a τ ux_L
//! u'_R  = u_R − a τ ux_R
//! ux⁻   = (u_j − u'_L) / h
//! ux⁺   = (u'_R − u_j) / h
//! ux_j  = (|ux⁺|^α ux⁻ + |ux⁻|^α ux⁺) / (|ux⁺|^α + |ux⁻|^α),  α = 2
//! ```
//!
//! The value update is the space-time flux balance over the conservation
//! element; the derivative update is the α-weighted average of the two
//! one-sided differences, falling back to the plain mean when both vanish.

use wavemarch_core::Plane;
use wavemarch_grid::Grid;

use crate::fields::{PlaneMut, PlaneRef};

/// Weighting exponent of the derivative average.
pub const ALPHA: i32 = 2;

/// Coefficients shared by every element of one half-step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfStep {
    /// Wave speed `a`.
    pub wave_speed: f64,
    /// Half time increment `τ = dt / 2`.
    pub tau: f64,
    /// Half spacing `h = dx / 2`.
    pub h: f64,
}

impl HalfStep {
    /// Courant number `ν = a τ / h`.
    pub fn nu(&self) -> f64 {
        self.wave_speed * self.tau / self.h
    }
}

/// α-weighted average of two one-sided differences.
pub fn weighted_average(minus: f64, plus: f64) -> f64 {
    let w_minus = plus.abs().powi(ALPHA);
    let w_plus = minus.abs().powi(ALPHA);
    let denom = w_minus + w_plus;
    if denom > f64::MIN_POSITIVE {
        (w_minus * minus + w_plus * plus) / denom
    } else {
        0.5 * (minus + plus)
    }
}

/// Advance `so0` onto `target` from the opposite plane.
pub fn march_half_so0(
    grid: &Grid,
    target: Plane,
    nvar: usize,
    step: HalfStep,
    src: PlaneRef<'_>,
    dst: &mut [f64],
) {
    let nu = step.nu();
    let ux_coef = step.h * 0.25 * (1.0 - nu * nu);
    for j in 0..grid.ncelm() {
        let (l, r) = grid.neighbours(target, j);
        for iv in 0..nvar {
            let (il, ir) = (l * nvar + iv, r * nvar + iv);
            dst[j * nvar + iv] = 0.5 * ((1.0 + nu) * src.so0[il] + (1.0 - nu) * src.so0[ir])
                + ux_coef * (src.so1[il] - src.so1[ir]);
        }
    }
}

/// Advance `so1` onto `target` with α = 2 weighting.
///
/// Must run after [`march_half_so0`] has filled `dst.so0` for the same
/// half-step.
pub fn march_half_so1_alpha2(
    grid: &Grid,
    target: Plane,
    nvar: usize,
    step: HalfStep,
    src: PlaneRef<'_>,
    dst: PlaneMut<'_>,
) {
    let a_tau = step.wave_speed * step.tau;
    for j in 0..grid.ncelm() {
        let (l, r) = grid.neighbours(target, j);
        for iv in 0..nvar {
            let (il, ir, ij) = (l * nvar + iv, r * nvar + iv, j * nvar + iv);
            let ul = src.so0[il] - a_tau * src.so1[il];
            let ur = src.so0[ir] - a_tau * src.so1[ir];
            let uj = dst.so0[ij];
            let minus = (uj - ul) / step.h;
            let plus = (ur - uj) / step.h;
            dst.so1[ij] = weighted_average(minus, plus);
        }
    }
}
