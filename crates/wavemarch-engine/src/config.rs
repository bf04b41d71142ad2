//! Session configuration, validation, and error types.
//!
//! [`SessionConfig`] is the builder-input for a [`SessionLauncher`](crate::SessionLauncher).
//! [`validate()`](SessionConfig::validate) runs before any solver is
//! constructed, so a bad interval or step count never reaches the solver.

use std::error::Error;
use std::f64::consts::PI;
use std::fmt;
use std::time::Duration;

use wavemarch_core::GridError;
use wavemarch_grid::Grid;

/// Longest accepted timer interval.
///
/// Keeps `now + interval` representable on every clock a scheduler uses.
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a session configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Animation interval is zero.
    NonPositiveInterval,
    /// Animation interval exceeds [`MAX_INTERVAL`].
    IntervalTooLarge {
        /// The rejected interval.
        interval: Duration,
    },
    /// A step count of zero was requested.
    NonPositiveStepCount,
    /// CFL number is NaN, infinite, zero, or negative.
    InvalidCfl {
        /// The invalid value.
        value: f64,
    },
    /// Wave speed is NaN, infinite, or zero.
    InvalidWaveSpeed {
        /// The invalid value.
        value: f64,
    },
    /// Pulse band is empty, inverted, or non-finite.
    InvalidPulseBand {
        /// Lower edge.
        lo: f64,
        /// Upper edge.
        hi: f64,
    },
    /// Grid parameters rejected.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveInterval => write!(f, "animation interval must be positive"),
            Self::IntervalTooLarge { interval } => write!(
                f,
                "animation interval {interval:?} exceeds the maximum of {MAX_INTERVAL:?}"
            ),
            Self::NonPositiveStepCount => write!(f, "step count must be at least 1"),
            Self::InvalidCfl { value } => {
                write!(f, "cfl must be finite and positive, got {value}")
            }
            Self::InvalidWaveSpeed { value } => {
                write!(f, "wave speed must be finite and non-zero, got {value}")
            }
            Self::InvalidPulseBand { lo, hi } => {
                write!(f, "pulse band [{lo}, {hi}) is empty or non-finite")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Check a timer interval lies in `(0, MAX_INTERVAL]`.
pub fn check_interval(interval: Duration) -> Result<(), ConfigError> {
    if interval.is_zero() {
        return Err(ConfigError::NonPositiveInterval);
    }
    if interval > MAX_INTERVAL {
        return Err(ConfigError::IntervalTooLarge { interval });
    }
    Ok(())
}

// ── GridConfig ─────────────────────────────────────────────────────

/// Domain discretization parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Left edge of the domain. Default: 0.
    pub xmin: f64,
    /// Right edge of the domain. Default: 8π.
    pub xmax: f64,
    /// Number of elements per plane. Default: 256.
    pub ncelm: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 8.0 * PI,
            ncelm: 256,
        }
    }
}

impl GridConfig {
    /// Construct the [`Grid`] these parameters describe.
    pub fn build(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::new(self.xmin, self.xmax, self.ncelm)?)
    }
}

// ── PulseBand ──────────────────────────────────────────────────────

/// Half-open interval `[lo, hi)` carrying the initial sinusoidal pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseBand {
    /// Inclusive lower edge. Default: 2π.
    pub lo: f64,
    /// Exclusive upper edge. Default: 4π.
    pub hi: f64,
}

impl Default for PulseBand {
    fn default() -> Self {
        Self {
            lo: 2.0 * PI,
            hi: 4.0 * PI,
        }
    }
}

impl PulseBand {
    /// Whether `x` lies in `[lo, hi)`.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lo && x < self.hi
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.lo.is_finite() || !self.hi.is_finite() || self.hi <= self.lo {
            return Err(ConfigError::InvalidPulseBand {
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(())
    }
}

// ── SessionConfig ──────────────────────────────────────────────────

/// Everything a [`SessionLauncher`](crate::SessionLauncher) needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Domain discretization.
    pub grid: GridConfig,
    /// Courant number `a dt / dx`. Default: 1.
    pub cfl: f64,
    /// Wave speed `a`. Default: 1.
    pub wave_speed: f64,
    /// Band holding the initial pulse.
    pub pulse: PulseBand,
    /// Interactive animation (`true`) or two-frame batch comparison.
    pub animate: bool,
    /// Timer interval between animation ticks. Default: 10 ms.
    pub interval: Duration,
    /// Half-steps between the two batch frames. Default: 50.
    pub batch_steps: u64,
    /// Variable slot rendered. Default: 0.
    pub slot: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            cfl: 1.0,
            wave_speed: 1.0,
            pulse: PulseBand::default(),
            animate: false,
            interval: Duration::from_millis(10),
            batch_steps: 50,
            slot: 0,
        }
    }
}

impl SessionConfig {
    /// Check every parameter without touching the solver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.build()?;
        if !self.cfl.is_finite() || self.cfl <= 0.0 {
            return Err(ConfigError::InvalidCfl { value: self.cfl });
        }
        if !self.wave_speed.is_finite() || self.wave_speed == 0.0 {
            return Err(ConfigError::InvalidWaveSpeed {
                value: self.wave_speed,
            });
        }
        self.pulse.validate()?;
        check_interval(self.interval)?;
        if self.batch_steps == 0 {
            return Err(ConfigError::NonPositiveStepCount);
        }
        Ok(())
    }

    /// Full time increment `dx * cfl / |a|`.
    pub fn time_increment(&self) -> Result<f64, ConfigError> {
        let grid = self.grid.build()?;
        Ok(grid.dx() * self.cfl / self.wave_speed.abs())
    }
}
