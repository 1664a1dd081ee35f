use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use raytracer2d::{
    config::{self, FRAME_RATE_LIMIT},
    renderer::render_image_name,
    FrameBuffer, RenderMode,
};
use std::{fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless driver: replays the scripted input, advances the scene and saves
/// rendered frames.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene and input description
    #[arg(long, default_value = "scene.json")]
    config: PathBuf,

    /// Lighting model, overrides the config file
    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Sample every pixel instead of every other one (ray-traced mode)
    #[arg(long)]
    anti_aliasing: bool,

    /// Frames to simulate, overrides the config file
    #[arg(long)]
    frames: Option<u32>,

    /// Also save every n-th frame; the last frame is always saved
    #[arg(long)]
    capture_every: Option<u32>,

    /// Where frames are written
    #[arg(long, default_value = "renders")]
    output: PathBuf,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    // ── parse JSON ────────────────────────────────────────────────────────
    let cfg = if args.config.exists() {
        config::load(&args.config)
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        warn!(path = %args.config.display(), "config not found, using built-in scene");
        config::Config::default()
    };

    let mut scene = cfg.build_scene();
    let mut renderer = cfg.build_renderer();
    if let Some(mode) = args.mode {
        renderer.set_mode(mode);
    }
    if args.anti_aliasing {
        renderer.ray_tracer.set_anti_aliasing(true);
    }

    let frames = args.frames.unwrap_or_else(|| cfg.input.total_frames()).max(1);
    let dt = 1.0 / FRAME_RATE_LIMIT as f32;

    info!(width = cfg.render.width, height = cfg.render.height, mode = renderer.mode().as_str(), frames, "starting");
    info!(pos = ?scene.sphere().center, radius = scene.sphere().radius(), material = ?scene.sphere().material(), "sphere");
    info!(pos = ?scene.light().pos, color = ?scene.light().color(), "light");

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    // ── frame loop ────────────────────────────────────────────────────────
    let bar = if !args.quiet {
        let pb = ProgressBar::new(frames as u64);
        pb.set_style(ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} frames | {elapsed_precise} | ETA: {eta}")?);
        Some(pb)
    } else {
        None
    };

    let mut fb = FrameBuffer::new(cfg.render.width, cfg.render.height);
    for frame in 0..frames {
        cfg.input.play_frame(frame, &mut scene, &mut renderer);
        scene.update(dt);

        let last = frame + 1 == frames;
        let capture = args.capture_every.is_some_and(|n| n > 0 && frame % n == 0);
        if last || capture {
            renderer.render_scene(&scene, &mut fb);
            let name = args.output.join(render_image_name(renderer.mode(), frame));
            fb.save(&name).with_context(|| format!("saving {}", name.display()))?;
            info!(frame, path = %name.display(), "saved frame");
        }

        if let Some(b) = &bar {
            b.inc(1);
        }
    }

    if let Some(b) = bar {
        b.finish_with_message("Rendering complete");
    }

    Ok(())
}
