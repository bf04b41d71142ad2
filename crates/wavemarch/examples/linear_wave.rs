//! Linear wave demo.
//!
//! ```text
//! cargo run -p wavemarch --example linear_wave                # batch comparison
//! cargo run -p wavemarch --example linear_wave -- --animate 40
//! RUST_LOG=wavemarch_engine=trace cargo run -p wavemarch --example linear_wave -- --animate
//! ```
//!
//! Batch mode prints the initial pulse and the pulse 50 half-steps later on
//! one text plot. Animate mode runs the real event loop at 10 ms per tick
//! and prints a sparkline per frame.

use std::error::Error;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wavemarch::prelude::*;

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn sparkline(y: &[f64], width: usize) -> String {
    let stride = (y.len() / width.max(1)).max(1);
    y.iter()
        .step_by(stride)
        .map(|v| {
            // Values lie in [-1, 1].
            let t = ((v + 1.0) * 0.5).clamp(0.0, 1.0);
            SPARKS[((t * (SPARKS.len() - 1) as f64).round()) as usize]
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let animate = args.next().as_deref() == Some("--animate");
    let frames: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(20);

    let mut event_loop = EventLoop::new();
    let (session, solver) = run_linear(animate, Duration::from_millis(10), &mut event_loop)?;

    if !animate {
        let fig = session.drawable().borrow();
        println!("initial (*) and after 50 half-steps (o), x in units of pi:");
        print!("{}", fig.render_ascii(128, 24));
        return Ok(());
    }

    for _ in 0..frames {
        let report = event_loop.run_ticks(1)?;
        if report.stop != StopReason::TickLimit {
            break;
        }
        let fig = session.drawable().borrow();
        if let Some((_, curve)) = fig.curves().next() {
            println!("{:>5} {}", solver.borrow().half_steps(), sparkline(&curve.y, 96));
        };
    }
    if let Some(m) = session.last_metrics()? {
        info!(
            half_step = %m.half_step,
            advance_us = m.advance_us,
            render_us = m.render_us,
            "last frame"
        );
    }
    Ok(())
}
