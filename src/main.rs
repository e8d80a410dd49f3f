//! Demo binary: loads a segment drawing, plans the stroke order, fits the
//! drawing into the arm's work envelope and runs the drawing session to
//! completion, reporting progress.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rs_scara_draw::drawing::{DrawingSession, DrawingState};
use rs_scara_draw::fitting::fit_to_rect;
use rs_scara_draw::parameters::Parameters;
use rs_scara_draw::routing::plan_route;
use rs_scara_draw::segment_io::load_segments;
use rs_scara_draw::segments::Point2D;
use rs_scara_draw::simplify::simplify_segments;
use rs_scara_draw::simulator::ScaraSimulator;
use rs_scara_draw::utils::dump_joints;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scara-draw", about = "Trace a segment drawing with a simulated SCARA arm")]
struct Args {
    /// JSON file with the drawing: an array of segments, each an array of [x, y] pairs
    segments: PathBuf,

    /// Length of the first link
    #[arg(long, default_value_t = 1.0)]
    a1: f64,

    /// Length of the second link
    #[arg(long, default_value_t = 1.0)]
    a2: f64,

    /// Simplification tolerance; 0 keeps every point
    #[arg(long, default_value_t = 0.0)]
    eps: f64,

    /// Maximum joint rate for both revolute joints, radians per second
    #[arg(long, default_value_t = 6.0)]
    max_rate: f64,

    /// Time step of the simulation tick
    #[arg(long, default_value_t = 0.016)]
    dt: f64,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 10_000_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let parameters = Parameters { a1: args.a1, a2: args.a2 };

    let segments = load_segments(&args.segments)
        .with_context(|| format!("Loading {}", args.segments.display()))?;
    println!("{} segments loaded", segments.len());

    let segments = if args.eps > 0.0 {
        let simplified = simplify_segments(&segments, args.eps);
        println!("{} segments after simplification", simplified.len());
        simplified
    } else {
        segments
    };

    // The drawing goes into a square inscribed into the upper right quarter
    // of the reachable disc, leaving the rest as maneuvering room.
    let reach = 0.95 * parameters.reach();
    let half_side = reach / f64::sqrt(2.0);
    let segments = fit_to_rect(&segments, 0.0, half_side, 0.0, half_side);

    let plan = plan_route(segments, 0);
    let total_points: usize = plan.iter().map(|s| s.len()).sum();

    let simulator = ScaraSimulator::new(parameters, Point2D::new(0.0, 0.0))
        .with_rate_limits(args.max_rate, args.max_rate);
    let mut session = DrawingSession::new(simulator, plan);

    let mut ticks: u64 = 0;
    while session.state() != DrawingState::Finished {
        if ticks >= args.max_ticks {
            bail!("Did not finish within {} ticks", args.max_ticks);
        }
        session.tick(args.dt).context("Drawing session tick")?;
        ticks += 1;
    }

    println!(
        "{} after {} ticks ({:.1} s simulated), {} points traced",
        session.state(),
        ticks,
        ticks as f64 * args.dt,
        total_points
    );
    print!("Final joints: ");
    dump_joints(session.simulator().joints());
    Ok(())
}
