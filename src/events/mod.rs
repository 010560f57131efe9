//! Event system for decoupled lifecycle communication.
//!
//! This module provides a synchronous publish/subscribe mechanism with
//! string-named, optionally namespaced events. It enables:
//!
//! - **Decoupled wiring**: producers trigger `resize`, `tick` or `ready`
//!   without knowing who listens
//! - **Scoped cleanup**: listeners registered under `event.namespace` can
//!   be removed together with `off(".namespace")`
//! - **Testability**: the emitter and the name parser are plain Rust with
//!   no host dependencies
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Sizes    │     │    Time     │     │  Resources  │
//! │  (viewport) │     │   (frames)  │     │  (assets)   │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │                   │                   │
//!        │ trigger("resize") │ trigger("tick")   │ trigger("ready")
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    EventEmitter                     │
//! │        namespace → event → [callbacks]              │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ inline, insertion order
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │           camera / renderer / world callbacks       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use experience::events::EventEmitter;
//!
//! let emitter: EventEmitter = EventEmitter::new();
//! emitter.on("resize.camera, resize.renderer", |_| {}).unwrap();
//!
//! emitter.trigger("resize", &[]).unwrap();
//!
//! // Drop everything the camera registered
//! emitter.off(".camera").unwrap();
//! assert!(!emitter.has_namespace("camera"));
//! ```
//!
//! # Module Structure
//!
//! - [`name`]: specifier parsing (`EventName`, `resolve_names`)
//! - [`emitter`]: `EventEmitter` and the `Callback` handle type
//! - [`observable`]: `Observable` trait for emitter owners
//! - [`error`]: `EmitterError`

pub mod emitter;
pub mod error;
pub mod name;
pub mod observable;

// Re-export main types for convenient access
pub use emitter::{Callback, EventEmitter};
pub use error::EmitterError;
pub use name::{parse_names, resolve_names, EventName, BASE_NAMESPACE};
pub use observable::Observable;
