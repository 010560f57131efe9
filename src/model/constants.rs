//! Lifecycle event names and default values.
//!
//! This module contains the event names producers trigger, viewport and
//! clock defaults, and the config file location.

// === Lifecycle Events ===

/// Triggered by `Sizes` after the viewport changed.
pub const EVENT_RESIZE: &str = "resize";

/// Triggered by `Time` once per animation frame.
pub const EVENT_TICK: &str = "tick";

/// Triggered by `Resources` once every declared source has loaded.
pub const EVENT_READY: &str = "ready";

// === Viewport ===

/// Upper bound for the device pixel ratio used by the renderer.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Viewport width used before the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

/// Viewport height used before the host reports one.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

// === Clock ===

/// Frame delta (ms) assumed before the first tick, roughly 60 fps.
pub const DEFAULT_FRAME_DELTA_MS: f64 = 16.0;

// === Config ===

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "experience.json";

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "EXPERIENCE_CONFIG";

/// Location hash that switches debug mode on.
pub const DEBUG_HASH: &str = "#debug";

// === Logging ===

/// Log filter used when `RUST_LOG` is unset.
pub const LOG_FILTER: &str = "experience=info";

/// Log filter used in debug mode when `RUST_LOG` is unset.
pub const DEBUG_LOG_FILTER: &str = "experience=debug";
