//! Time-stepping animation driver for the wavemarch CE/SE solver.
//!
//! The engine seeds a pulse onto a [`LinearScalarSolver`], advances it at a
//! fixed cadence, and renders successive snapshots onto a [`Drawable`]:
//!
//! - [`DomainInitializer`] seeds value and derivative from element centres.
//! - [`SteppingController`] owns the solver handle: `setup`, `advance`,
//!   `snapshot`.
//! - [`RenderSubscription`] binds one controller to one curve and replaces
//!   the curve's data on every tick.
//! - [`AnimationDriver`] keeps at most one recurring timer alive on a
//!   [`Scheduler`].
//! - [`SessionLauncher`] wires them together in batch or interactive mode.
//!
//! Everything runs on one cooperative thread: handles are `Rc<RefCell<_>>`
//! and are not `Send`. The [`EventLoop`] scheduler drives real
//! time; tests substitute a deterministic scheduler.
//!
//! [`LinearScalarSolver`]: wavemarch_solver::LinearScalarSolver

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod init;
pub mod metrics;
pub mod plot;
pub mod scheduler;
pub mod session;
pub mod stepping;
pub mod subscription;

pub use animation::AnimationDriver;
pub use config::{
    check_interval, ConfigError, GridConfig, PulseBand, SessionConfig, MAX_INTERVAL,
};
pub use error::{DriverError, RenderError};
pub use event_loop::{EventLoop, LoopEvent, LoopHandle, RunReport, StopReason};
pub use init::DomainInitializer;
pub use metrics::TickMetrics;
pub use plot::{Curve, Drawable, Figure, FigureConfig};
pub use scheduler::{FnTask, RecurringTask, Scheduler, TimerHandle, TimerQueue};
pub use session::{run_linear, Session, SessionLauncher};
pub use stepping::{Snapshot, SolverHandle, SteppingController};
pub use subscription::RenderSubscription;
