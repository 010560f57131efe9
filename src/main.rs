//! Headless run of the scene lifecycle.
//!
//! Wires `Sizes`, `Time` and `Resources` the way the camera, renderer and
//! world would, then drives a short simulated session: assets arrive, the
//! viewport changes, frames tick, and everything is torn down.
//!
//! Usage: `experience [config.json] [#debug]`. Debug mode (from the config
//! or the `#debug` hash) raises the default log level; `RUST_LOG` overrides
//! it.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

use experience::config::{config_path, load_config};
use experience::model::{
    LoadError, Resources, Sizes, Source, Time, Viewport, EVENT_READY, EVENT_RESIZE, EVENT_TICK,
};
use experience::Observable;

/// Simulated frames, about one second at 60 fps.
const FRAMES: u32 = 60;
const FRAME_MS: f64 = 1000.0 / 60.0;

//
// ===================== App =====================
//

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let arg = args.next();
    let hash = args.next().unwrap_or_default();

    let path = config_path(arg.as_deref());
    let config = load_config(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?
        .with_debug_hash(&hash);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();
    info!(
        path = %path.display(),
        debug = config.debug,
        sources = config.sources.len(),
        "starting"
    );

    let sizes = Rc::new(Sizes::with_max_pixel_ratio(
        Viewport::default(),
        config.max_pixel_ratio,
    ));
    let time = Rc::new(Time::new(0.0));
    let resources = Rc::new(Resources::<String>::new(config.sources.clone())?);
    for source in resources.sources() {
        debug!(
            name = %source.name,
            kind = %source.kind,
            paths = source.paths.len(),
            "source declared"
        );
    }
    let world_ready = Rc::new(Cell::new(false));
    let updates = Rc::new(Cell::new(0u32));

    // Camera and renderer follow the viewport
    let camera_sizes = Rc::downgrade(&sizes);
    sizes.on(&format!("{EVENT_RESIZE}.camera"), move |_| {
        if let Some(sizes) = camera_sizes.upgrade() {
            info!(aspect = sizes.aspect_ratio(), "camera resized");
        }
    })?;
    let renderer_sizes = Rc::downgrade(&sizes);
    sizes.on(&format!("{EVENT_RESIZE}.renderer"), move |_| {
        if let Some(sizes) = renderer_sizes.upgrade() {
            info!(
                width = sizes.width(),
                height = sizes.height(),
                pixel_ratio = sizes.pixel_ratio(),
                "renderer resized"
            );
        }
    })?;

    // The world is built once every asset is in
    let ready_flag = Rc::clone(&world_ready);
    let world_resources = Rc::downgrade(&resources);
    resources.on(&format!("{EVENT_READY}.world"), move |_| {
        if let Some(resources) = world_resources.upgrade() {
            info!(sources = resources.loaded(), "world built");
        }
        ready_flag.set(true);
    })?;

    // Per-frame update only runs once the world exists
    let frame_flag = Rc::clone(&world_ready);
    let frame_updates = Rc::clone(&updates);
    let world_time = Rc::downgrade(&time);
    time.on(&format!("{EVENT_TICK}.world"), move |_| {
        if !frame_flag.get() {
            return;
        }
        if let Some(time) = world_time.upgrade() {
            trace!(step = time.delta_seconds(), "animation mixer advanced");
        }
        frame_updates.set(frame_updates.get() + 1);
    })?;

    let loader = |source: &Source| -> Result<String, LoadError> {
        source
            .paths
            .first()
            .cloned()
            .ok_or_else(|| format!("source {} has no path", source.name).into())
    };
    resources.start_loading(&loader)?;

    sizes.resize(Viewport::new(1280.0, 720.0, 3.0));

    for frame in 1..=FRAMES {
        time.tick(frame as f64 * FRAME_MS);
    }

    info!(
        frames = time.frames(),
        updates = updates.get(),
        elapsed_ms = time.elapsed(),
        "session finished"
    );

    sizes.destroy();
    time.stop();
    resources.off(".world")?;

    Ok(())
}
