//! Lifecycle plumbing for a 3D scene runtime. Keep this crate free of
//! rendering and windowing bindings so everything runs under plain tests.
//!
//! - [`events`]: namespaced `EventEmitter` (`on` / `off` / `trigger`)
//! - [`model`]: producers of `resize`, `tick` and `ready`
//! - [`config`]: JSON settings and the asset manifest

pub mod config;
pub mod events;
pub mod model;

// Re-export event types for convenience
pub use events::{EmitterError, EventEmitter, EventName, Observable};

// Re-export model types for convenience
pub use model::{Resources, Sizes, Source, SourceKind, Time, Viewport};

pub use config::{load_config, ExperienceConfig};
