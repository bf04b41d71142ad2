//! Integration test: interactive animation on a virtual clock.
//!
//! Covers the tick cadence, the single-timer invariant, stopping (from
//! outside and from inside a tick), and fatal tick errors.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wavemarch_core::HalfStepId;
use wavemarch_engine::{
    AnimationDriver, Drawable, DriverError, FnTask, RenderError, RenderSubscription, Scheduler,
    SessionLauncher, TimerHandle,
};
use wavemarch_test_utils::fixtures::{ready_controller, session_config};
use wavemarch_test_utils::{FailingDrawable, ManualScheduler, RecordingFigure};

const TEN_MS: Duration = Duration::from_millis(10);

fn interactive() -> SessionLauncher {
    SessionLauncher::new(session_config(true, TEN_MS)).unwrap()
}

// ── Cadence ──────────────────────────────────────────────────────────

#[test]
fn five_ticks_replace_the_curve_five_times() {
    let mut sched = ManualScheduler::new();
    let (session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    assert_eq!(sched.advance_by(Duration::from_millis(50)).unwrap(), 5);

    let fig = session.drawable().borrow();
    let curve = session.curves().unwrap()[0];
    assert_eq!(fig.plots, 1);
    assert_eq!(fig.replacements_of(curve), 5);
    assert_eq!(fig.draws, 5);
    assert!(fig.replacements.iter().all(|&(_, xl, yl)| xl == 256 && yl == 256));
    assert_eq!(solver.borrow().half_steps(), HalfStepId(5));
    assert_eq!(session.ticks().unwrap(), 5);
}

#[test]
fn tick_n_observes_n_half_steps() {
    let mut sched = ManualScheduler::new();
    let (session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    for n in 1..=8u64 {
        sched.fire_ticks(1).unwrap();
        assert_eq!(solver.borrow().half_steps(), HalfStepId(n));
        assert_eq!(
            session.last_metrics().unwrap().unwrap().half_step,
            HalfStepId(n)
        );
    }
}

#[test]
fn rendered_data_is_latest_snapshot_only() {
    let mut sched = ManualScheduler::new();
    let (session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    sched.fire_ticks(3).unwrap();
    let fig = session.drawable().borrow();
    let (_, y) = fig.last_data(session.curves().unwrap()[0]).unwrap();
    assert_eq!(y, solver.borrow().get_so0(0).unwrap().as_slice());
    assert_eq!(fig.curve_count(), 1);
}

// ── Single timer ─────────────────────────────────────────────────────

#[test]
fn double_start_keeps_one_timer() {
    let mut sched = ManualScheduler::new();
    let (mut session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    let first = session.timer().unwrap();
    let second = session.restart(&mut sched).unwrap().unwrap();
    assert_ne!(first, second);
    assert_eq!(sched.live_timers(), 1);
    sched.advance_by(Duration::from_millis(100)).unwrap();
    // Two live timers would have marched 20.
    assert_eq!(solver.borrow().half_steps(), HalfStepId(10));
}

// ── Stopping ─────────────────────────────────────────────────────────

#[test]
fn stop_means_no_further_ticks() {
    let mut sched = ManualScheduler::new();
    let (mut session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    sched.advance_by(Duration::from_millis(30)).unwrap();
    assert!(session.stop());
    assert!(!session.is_animating());
    for d in [TEN_MS, Duration::from_millis(11), Duration::from_secs(60)] {
        assert_eq!(sched.advance_by(d).unwrap(), 0);
    }
    assert_eq!(solver.borrow().half_steps(), HalfStepId(3));
}

#[test]
fn stop_from_inside_a_tick() {
    let mut sched = ManualScheduler::new();
    let fig = Rc::new(RefCell::new(RecordingFigure::new()));
    let sub = Rc::new(RefCell::new(
        RenderSubscription::bind(ready_controller(64, 1.0), fig.clone(), 0).unwrap(),
    ));
    let stopper: Rc<RefCell<Option<TimerHandle>>> = Rc::default();

    let (task_sub, task_stopper) = (sub.clone(), stopper.clone());
    let mut anim = AnimationDriver::new();
    anim.start(
        &mut sched,
        FnTask(move || {
            let mut s = task_sub.borrow_mut();
            s.tick()?;
            if s.ticks() == 3 {
                if let Some(h) = task_stopper.borrow().as_ref() {
                    h.cancel();
                }
            }
            Ok(())
        }),
        TEN_MS,
    )
    .unwrap();
    *stopper.borrow_mut() = anim.stopper();

    sched.advance_by(Duration::from_secs(1)).unwrap();
    assert_eq!(sub.borrow().ticks(), 3);
    assert_eq!(fig.borrow().draws, 3);
    assert!(!anim.is_running());
    assert_eq!(sched.live_timers(), 0);
}

#[test]
fn dropping_the_session_stops_the_timer() {
    let mut sched = ManualScheduler::new();
    let (session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    drop(session);
    assert_eq!(sched.live_timers(), 0);
    sched.advance_by(Duration::from_secs(1)).unwrap();
    assert_eq!(solver.borrow().half_steps(), HalfStepId(0));
}

// ── Errors ───────────────────────────────────────────────────────────

#[test]
fn failing_render_cancels_the_timer() {
    let mut sched = ManualScheduler::new();
    let (session, solver) = interactive()
        .launch(FailingDrawable::new(2), &mut sched)
        .unwrap();
    let err = sched.advance_by(Duration::from_secs(1)).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Render(RenderError::Backend { .. })
    ));
    assert_eq!(sched.live_timers(), 0);
    assert!(!session.is_animating());
    assert_eq!(sched.fired(), 2);
    // The third tick advanced the solver before the draw failed.
    assert_eq!(solver.borrow().half_steps(), HalfStepId(3));
    assert_eq!(sched.advance_by(Duration::from_secs(1)).unwrap(), 0);
}

#[test]
fn busy_solver_fails_the_tick() {
    let mut sched = ManualScheduler::new();
    let (_session, solver) = interactive()
        .launch(RecordingFigure::new(), &mut sched)
        .unwrap();
    {
        let _held = solver.borrow_mut();
        let err = sched.fire_ticks(1).unwrap_err();
        assert_eq!(err, DriverError::Busy { what: "solver" });
    }
    assert_eq!(sched.live_timers(), 0);
}
