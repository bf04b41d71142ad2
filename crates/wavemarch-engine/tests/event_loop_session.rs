//! Integration test: an interactive session on the wall-clock event loop.

use std::time::Duration;

use wavemarch_core::HalfStepId;
use wavemarch_engine::{
    ConfigError, DriverError, EventLoop, Figure, LoopEvent, Scheduler, SessionConfig,
    SessionLauncher, StopReason, MAX_INTERVAL,
};
use wavemarch_test_utils::fixtures::session_config;
use wavemarch_test_utils::RecordingFigure;

#[test]
fn event_loop_drives_the_animation() {
    let mut ev = EventLoop::new();
    let launcher = SessionLauncher::new(session_config(true, Duration::from_millis(1))).unwrap();
    let (session, solver) = launcher.launch(RecordingFigure::new(), &mut ev).unwrap();

    let report = ev.run_ticks(5).unwrap();
    assert_eq!(report.stop, StopReason::TickLimit);
    assert_eq!(report.ticks, 5);
    assert_eq!(solver.borrow().half_steps(), HalfStepId(5));
    assert_eq!(session.drawable().borrow().draws, 5);
}

#[test]
fn stop_animation_event_ends_the_run() {
    let mut ev = EventLoop::new();
    let launcher = SessionLauncher::new(session_config(true, Duration::from_millis(1))).unwrap();
    let (session, _solver) = launcher.launch(RecordingFigure::new(), &mut ev).unwrap();

    ev.run_ticks(2).unwrap();
    assert!(ev.handle().send(LoopEvent::StopAnimation));
    let report = ev.run_for(Duration::from_millis(50)).unwrap();
    assert_eq!(report, wavemarch_engine::RunReport { ticks: 0, stop: StopReason::Idle });
    assert!(!session.is_animating());
    assert_eq!(ev.live_timers(), 0);
}

#[test]
fn cancel_event_targets_the_session_timer() {
    let mut ev = EventLoop::new();
    let launcher = SessionLauncher::new(session_config(true, Duration::from_millis(1))).unwrap();
    let (session, _solver) = launcher.launch(RecordingFigure::new(), &mut ev).unwrap();
    let id = session.timer().unwrap();

    ev.handle().send(LoopEvent::Cancel(id));
    let report = ev.run_for(Duration::from_millis(50)).unwrap();
    assert_eq!(report.stop, StopReason::Idle);
    assert_eq!(session.ticks().unwrap(), 0);
}

#[test]
fn unrepresentable_interval_never_reaches_the_clock() {
    let cfg = SessionConfig {
        interval: Duration::MAX,
        ..session_config(true, Duration::from_millis(1))
    };
    assert_eq!(
        SessionLauncher::new(cfg).unwrap_err(),
        DriverError::Config(ConfigError::IntervalTooLarge {
            interval: Duration::MAX
        })
    );

    let mut ev = EventLoop::new();
    let (mut session, _solver) = SessionLauncher::new(session_config(true, MAX_INTERVAL))
        .unwrap()
        .launch(Figure::default(), &mut ev)
        .unwrap();
    assert_eq!(ev.live_timers(), 1);
    assert!(session.stop());
}
