//! Scene lifecycle model.
//!
//! This module contains the producers of lifecycle events (pure Rust, no
//! host bindings):
//!
//! - [`Sizes`] triggers `resize`
//! - [`Time`] triggers `tick`
//! - [`Resources`] triggers `ready`
//!
//! plus the asset manifest and shared constants. Rendering, camera math
//! and asset decoding live with the host.

pub mod constants;
pub mod resources;
pub mod sizes;
pub mod sources;
pub mod time;

pub use constants::*;
pub use resources::{AssetLoader, LoadError, ResourceError, Resources};
pub use sizes::{Sizes, Viewport};
pub use sources::{default_sources, validate_manifest, ManifestError, Source, SourceKind};
pub use time::Time;
