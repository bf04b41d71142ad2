//! Integration test: batch comparison on the default domain.
//!
//! Grid `(0, 8π, 256)` at unit CFL gives `dt = 8π / 256`. Fifty half-steps
//! are 25 full steps, and at unit Courant number each full step moves the
//! profile exactly one element to the right, so the second curve is the
//! first rotated by 25 elements.

use std::f64::consts::PI;
use std::time::Duration;

use wavemarch_core::HalfStepId;
use wavemarch_engine::{Drawable, Scheduler, SessionConfig, SessionLauncher};
use wavemarch_test_utils::fixtures::session_config;
use wavemarch_test_utils::{ManualScheduler, RecordingFigure};

#[test]
fn batch_renders_two_frames_fifty_half_steps_apart() {
    let launcher = SessionLauncher::new(session_config(false, Duration::from_millis(10))).unwrap();
    let mut sched = ManualScheduler::new();
    let (session, solver) = launcher.launch(RecordingFigure::new(), &mut sched).unwrap();

    let svr = solver.borrow();
    assert!((svr.time_increment() - 8.0 * PI / 256.0).abs() < 1e-15);
    assert_eq!(svr.half_steps(), HalfStepId(50));
    drop(svr);

    let fig = session.drawable().borrow();
    assert_eq!(fig.plots, 2);
    assert_eq!(fig.draws, 1);
    assert!(fig.replacements.is_empty());
    assert_eq!(fig.curve_count(), 2);
    assert_eq!(sched.live_timers(), 0);

    let curves = session.curves().unwrap();
    let (x0, y0) = fig.last_data(curves[0]).unwrap();
    let (x1, y1) = fig.last_data(curves[1]).unwrap();
    assert_eq!((x0.len(), y0.len(), x1.len(), y1.len()), (256, 256, 256, 256));
    // Both frames are on the even plane.
    assert_eq!(x0, x1);
    assert_ne!(y0, y1);
    for j in 0..256 {
        let src = (j + 256 - 25) % 256;
        assert!((y1[j] - y0[src]).abs() < 1e-12, "element {j}");
    }
}

#[test]
fn batch_x_axis_is_in_units_of_pi() {
    let mut sched = ManualScheduler::new();
    let (session, _) =
        wavemarch_engine::run_linear(false, Duration::from_millis(10), &mut sched).unwrap();
    let fig = session.drawable().borrow();
    let first = session.curves().unwrap()[0];
    let xs = &fig.curve(first).unwrap().x;
    assert!((xs[0] - 0.5 * 8.0 / 256.0).abs() < 1e-12);
    assert!(xs.iter().all(|&x| (0.0..8.0).contains(&x)));
}

#[test]
fn batch_mode_is_deterministic() {
    let run = || {
        let launcher = SessionLauncher::new(SessionConfig::default()).unwrap();
        let (session, _) = launcher.launch_batch(RecordingFigure::new()).unwrap();
        let fig = session.drawable().borrow();
        let id = session.curves().unwrap()[1];
        let y = fig.last_data(id).unwrap().1.to_vec();
        y
    };
    assert_eq!(run(), run());
}

#[test]
fn custom_batch_step_count() {
    let cfg = SessionConfig {
        batch_steps: 7,
        ..SessionConfig::default()
    };
    let (_, solver) = SessionLauncher::new(cfg)
        .unwrap()
        .launch_batch(RecordingFigure::new())
        .unwrap();
    assert_eq!(solver.borrow().half_steps(), HalfStepId(7));
}

#[test]
fn both_modes_start_from_the_same_frame() {
    let mut sched = ManualScheduler::new();
    let (batch, _) = SessionLauncher::new(session_config(false, Duration::from_millis(10)))
        .unwrap()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    let (live, _) = SessionLauncher::new(session_config(true, Duration::from_millis(10)))
        .unwrap()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();

    let batch_fig = batch.drawable().borrow();
    let live_fig = live.drawable().borrow();
    let (bx, by) = batch_fig.last_data(batch.curves().unwrap()[0]).unwrap();
    let (lx, ly) = live_fig.last_data(live.curves().unwrap()[0]).unwrap();
    assert_eq!(live_fig.replacements_of(live.curves().unwrap()[0]), 0);
    assert_eq!(bx, lx);
    assert_eq!(by, ly);
}
