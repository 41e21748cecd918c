//! Headless driver: spawns a school, sweeps a synthetic pointer across the
//! viewport and logs how the fish react.
//!
//! Usage: `shoal-native [fish] [frames] [seed]`

use anyhow::Context;
use glam::Vec2;
use shoal_core::constants::COOL_DOWN_MS;
use shoal_core::{
    AgentOverrides, AnimationClip, Aquarium, FishAssets, FixedStep, ResolverParams,
};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
const STEP_MS: f32 = 16.0;
const REPORT_EVERY: u32 = 60;
// pointer sweep period and pause length, in frames
const SWEEP_FRAMES: u32 = 240;
const PAUSE_FRAMES: u32 = ((COOL_DOWN_MS / STEP_MS) as u32) + 60;

struct Args {
    fish: u32,
    frames: u32,
    seed: u64,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let fish = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid fish count {s:?}"))?,
        None => 30,
    };
    let frames = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid frame count {s:?}"))?,
        None => 600,
    };
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
        None => rand::random(),
    };
    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument {extra:?}");
    }
    Ok(Args { fish, frames, seed })
}

/// Lissajous sweep in pixel space, holding still for `PAUSE_FRAMES` after each
/// sweep so the resolver's cool-down kicks in.
fn pointer_at(frame: u32) -> Option<Vec2> {
    let cycle = SWEEP_FRAMES + PAUSE_FRAMES;
    let local = frame % cycle;
    if local >= SWEEP_FRAMES {
        return None;
    }
    let t = local as f32 / SWEEP_FRAMES as f32 * std::f32::consts::TAU;
    let ndc = Vec2::new((3.0 * t).sin() * 0.8, (2.0 * t).sin() * 0.6);
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * WIDTH,
        (1.0 - ndc.y) * 0.5 * HEIGHT,
    ))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args()?;
    log::info!(
        "[native] {} fish, {} frames, seed={}",
        args.fish,
        args.frames,
        args.seed
    );

    let mut aquarium = Aquarium::new(ResolverParams::default(), WIDTH, HEIGHT, args.seed)?;
    let spawner = aquarium.spawner();
    let assets = FishAssets {
        burst: AnimationClip::new("swim", 1.0),
        swim_loop: AnimationClip::new("swim_loop", 0.6),
    };
    for _ in 0..args.fish {
        if let Err(e) = spawner.spawn_scattered(assets.clone(), &AgentOverrides::default()) {
            log::warn!("[native] rejected fish config: {}", e);
        }
    }

    let mut clock = FixedStep::new(STEP_MS);
    let (mut started, mut stopped) = (0, 0);
    for frame in 0..args.frames {
        if let Some(p) = pointer_at(frame) {
            aquarium.resolver_mut().on_pointer_move(p.x, p.y);
        }
        let report = aquarium.frame(clock.advance());
        started += report.started_following;
        stopped += report.stopped_following;

        if (frame + 1) % REPORT_EVERY == 0 {
            let state = aquarium.resolver().state();
            log::info!(
                "[native] frame {:>5}: {}/{} following (+{} -{}), target active={} at {:.2?}",
                frame + 1,
                report.following,
                aquarium.school().len(),
                started,
                stopped,
                state.is_active,
                state.target_point.to_array()
            );
            started = 0;
            stopped = 0;
        }
    }
    Ok(())
}
