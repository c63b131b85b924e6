// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless marquee simulator.
//!
//! Mounts the engine on a recording host, pumps frames at a fixed rate, and
//! prints one JSON snapshot per line so motion can be inspected or plotted
//! without a browser.
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use marquee_core::{HostEvent, Marquee, MarqueeOptions, MarqueeSnapshot};
use marquee_dry_tests::{fire_timers, logos, FrameClock, MockHost};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON options file (camelCase keys); synthetic logos are used when absent
    #[clap(short, long)]
    options: Option<PathBuf>,

    /// Number of synthetic logos when no options file is given
    #[clap(long, default_value_t = 8)]
    logos: usize,

    /// Rendered width of one item, used to size the first Copy
    #[clap(long, default_value_t = 160.0)]
    item_width: f64,

    /// Viewport (and container) width in pixels
    #[clap(short, long, default_value_t = 1280.0)]
    viewport_width: f64,

    /// Display refresh rate
    #[clap(long, default_value_t = 60.0)]
    fps: f64,

    /// Simulated seconds
    #[clap(short, long, default_value_t = 5.0)]
    duration: f64,

    /// Start hovering at this many seconds
    #[clap(long)]
    hover_at: Option<f64>,

    /// Hover length in seconds
    #[clap(long, default_value_t = 1.0)]
    hover_for: f64,

    /// Start with the reduced-motion preference on
    #[clap(long)]
    reduced_motion: bool,

    /// Print a snapshot every N frames
    #[clap(long, default_value_t = 30)]
    snapshot_every: usize,

    /// Log filter used when RUST_LOG is unset
    #[clap(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Line<'a> {
    time_ms: f64,
    #[serde(flatten)]
    snapshot: &'a MarqueeSnapshot,
}

fn load_options(args: &Args) -> Result<MarqueeOptions> {
    match &args.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MarqueeOptions::from_json(&json).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(MarqueeOptions::with_logos(logos(args.logos))),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    anyhow::ensure!(args.fps > 0.0, "fps must be positive");
    anyhow::ensure!(args.snapshot_every > 0, "snapshot-every must be positive");

    let options = load_options(&args)?;
    let sequence = options.logos.len() as f64 * (args.item_width + options.gap);
    let mut host = MockHost::new()
        .with_viewport_width(args.viewport_width)
        .with_container_width(args.viewport_width)
        .with_sequence_width(sequence);
    if args.reduced_motion {
        host = host.with_reduced_motion();
    }
    info!(
        logos = options.logos.len(),
        sequence,
        viewport = args.viewport_width,
        "starting simulation"
    );

    let mut marquee = Marquee::new(host, options);
    let mut clock = FrameClock::new(0.0, 1000.0 / args.fps);
    marquee.mount();
    fire_timers(&mut marquee);

    let hover = args
        .hover_at
        .map(|start| (start * 1000.0, (start + args.hover_for) * 1000.0));
    let frames = (args.duration * args.fps).round() as usize;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for frame in 0..frames {
        if let Some((enter, leave)) = hover {
            let now = clock.now_ms;
            let next = now + clock.interval_ms;
            if now <= enter && enter < next {
                debug!(at_ms = now, "pointer enter");
                marquee.dispatch(HostEvent::PointerEnter);
            }
            if now <= leave && leave < next {
                debug!(at_ms = now, "pointer leave");
                marquee.dispatch(HostEvent::PointerLeave);
            }
        }
        let time_ms = clock.now_ms;
        clock.step(&mut marquee);
        if frame % args.snapshot_every == 0 {
            let snapshot = marquee.snapshot();
            let line = serde_json::to_string(&Line {
                time_ms,
                snapshot: &snapshot,
            })?;
            writeln!(out, "{line}")?;
        }
    }

    marquee.unmount();
    let host = marquee.host();
    info!(
        transforms = host.transforms.len(),
        renders = host.renders.len(),
        native_installs = host.native_installs,
        "simulation finished"
    );
    Ok(())
}
