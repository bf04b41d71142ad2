//! Per-tick timing for the render subscription.

use wavemarch_core::HalfStepId;

/// Timing collected during a single animation tick.
///
/// All durations are in microseconds. The subscription fills these after
/// each `tick()`; consumers read them from the most recent tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickMetrics {
    /// Cumulative half-steps reached by this tick.
    pub half_step: HalfStepId,
    /// Time spent marching the solver, in microseconds.
    pub advance_us: u64,
    /// Time spent replacing curve data and redrawing, in microseconds.
    pub render_us: u64,
    /// Wall-clock time for the whole tick, in microseconds.
    pub total_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.half_step, HalfStepId(0));
        assert_eq!(m.advance_us, 0);
        assert_eq!(m.render_us, 0);
        assert_eq!(m.total_us, 0);
    }
}
