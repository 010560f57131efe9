//! Tests for the lifecycle producers (Sizes, Time, Resources) wired
//! together the way camera, renderer and world use them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use experience::model::*;
use experience::Observable;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// === Sizes ===

#[test]
fn sizes_default_viewport() {
    let sizes = Sizes::default();
    assert!(approx_eq(sizes.width(), DEFAULT_VIEWPORT_WIDTH));
    assert!(approx_eq(sizes.height(), DEFAULT_VIEWPORT_HEIGHT));
    assert!(approx_eq(sizes.pixel_ratio(), 1.0));
}

#[test]
fn sizes_resize_notifies_camera_and_renderer() {
    let sizes = Rc::new(Sizes::new(Viewport::default()));
    let log = Rc::new(RefCell::new(Vec::new()));

    for (names, who) in [("resize.camera", "camera"), ("resize.renderer", "renderer")] {
        let log = Rc::clone(&log);
        sizes.on(names, move |_| log.borrow_mut().push(who)).unwrap();
    }

    sizes.resize(Viewport::new(1280.0, 720.0, 3.0));

    assert_eq!(*log.borrow(), vec!["camera", "renderer"]);
    assert!(approx_eq(sizes.aspect_ratio(), 1280.0 / 720.0));
    assert!(approx_eq(sizes.pixel_ratio(), MAX_PIXEL_RATIO));
}

#[test]
fn sizes_custom_pixel_ratio_cap() {
    let sizes = Sizes::with_max_pixel_ratio(Viewport::new(10.0, 10.0, 3.0), 1.5);
    assert!(approx_eq(sizes.pixel_ratio(), 1.5));
}

#[test]
fn sizes_off_one_namespace_keeps_the_other() {
    let sizes = Sizes::default();
    let renderer_hits = Rc::new(Cell::new(0));

    sizes.on("resize.camera", |_| {}).unwrap();
    let sink = Rc::clone(&renderer_hits);
    sizes
        .on("resize.renderer", move |_| sink.set(sink.get() + 1))
        .unwrap();

    sizes.off(".camera").unwrap();
    sizes.resize(Viewport::default());

    assert_eq!(renderer_hits.get(), 1);
    assert!(!sizes.events().has_namespace("camera"));
}

// === Time ===

#[test]
fn time_tick_feeds_animation_delta() {
    let time = Rc::new(Time::new(0.0));
    let steps = Rc::new(RefCell::new(Vec::new()));

    let weak = Rc::downgrade(&time);
    let sink = Rc::clone(&steps);
    time.on("tick.fox", move |_| {
        if let Some(time) = weak.upgrade() {
            sink.borrow_mut().push(time.delta_seconds());
        }
    })
    .unwrap();

    time.tick(20.0);
    time.tick(50.0);

    let steps = steps.borrow();
    assert_eq!(steps.len(), 2);
    assert!(approx_eq(steps[0], 0.020));
    assert!(approx_eq(steps[1], 0.030));
    assert!(approx_eq(time.elapsed(), 50.0));
}

// === Resources ===

#[test]
fn resources_default_manifest_counts_down_to_ready() {
    let resources: Resources<usize> = Resources::new(default_sources()).unwrap();
    let ready = Rc::new(Cell::new(0));

    let sink = Rc::clone(&ready);
    resources
        .on(EVENT_READY, move |_| sink.set(sink.get() + 1))
        .unwrap();

    let names: Vec<String> = resources.sources().iter().map(|s| s.name.clone()).collect();
    for (i, name) in names.iter().enumerate() {
        assert_eq!(ready.get(), 0);
        resources.source_loaded(name, i).unwrap();
    }

    assert_eq!(ready.get(), 1);
    assert_eq!(resources.to_load(), 4);
    assert_eq!(resources.loaded(), 4);
    assert_eq!(resources.item("foxModel").as_deref(), Some(&3));
}

#[test]
fn resources_loader_sees_kind_and_paths() {
    let resources: Resources<(SourceKind, usize)> = Resources::new(default_sources()).unwrap();

    let loader = |source: &Source| -> Result<(SourceKind, usize), LoadError> {
        Ok((source.kind, source.paths.len()))
    };
    resources.start_loading(&loader).unwrap();

    assert!(resources.is_ready());
    assert_eq!(
        resources.item("environmentMapTexture").as_deref(),
        Some(&(SourceKind::CubeTexture, 6))
    );
    assert_eq!(
        resources.item("grassColorTexture").as_deref(),
        Some(&(SourceKind::Texture, 1))
    );
}

// === Wiring ===

#[test]
fn world_updates_only_after_ready() {
    let time = Time::new(0.0);
    let resources: Resources<String> = Resources::new(default_sources()).unwrap();
    let world_ready = Rc::new(Cell::new(false));
    let updates = Rc::new(Cell::new(0));

    let flag = Rc::clone(&world_ready);
    resources.on("ready.world", move |_| flag.set(true)).unwrap();

    let flag = Rc::clone(&world_ready);
    let sink = Rc::clone(&updates);
    time.on("tick.world", move |_| {
        if flag.get() {
            sink.set(sink.get() + 1);
        }
    })
    .unwrap();

    time.tick(16.0);
    assert_eq!(updates.get(), 0);

    let loader = |source: &Source| -> Result<String, LoadError> { Ok(source.name.clone()) };
    resources.start_loading(&loader).unwrap();

    time.tick(32.0);
    time.tick(48.0);
    assert_eq!(updates.get(), 2);

    time.stop();
    time.tick(64.0);
    assert_eq!(updates.get(), 2);
}
