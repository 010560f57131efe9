//! Asset bookkeeping.
//!
//! `Resources` tracks which declared sources have been delivered and
//! triggers `ready` once all of them are in. Fetching and decoding belong
//! to an [`AssetLoader`]; this type only stores what the loader returns.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::constants::*;
use super::sources::{validate_manifest, ManifestError, Source};
use crate::events::{EventEmitter, Observable};

/// Error a loader reports for a single source.
pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

/// Fetches and decodes one source into an item of type `T`.
pub trait AssetLoader<T> {
    fn load(&self, source: &Source) -> Result<T, LoadError>;
}

impl<T, F> AssetLoader<T> for F
where
    F: Fn(&Source) -> Result<T, LoadError>,
{
    fn load(&self, source: &Source) -> Result<T, LoadError> {
        self(source)
    }
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("unknown source {0:?}")]
    UnknownSource(String),

    #[error("failed to load source {name:?}: {source}")]
    Load {
        name: String,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Loaded items keyed by source name, broadcasting `ready`.
pub struct Resources<T> {
    sources: Vec<Source>,
    items: RefCell<HashMap<String, T>>,
    loaded: Cell<usize>,
    events: EventEmitter,
}

impl<T> Resources<T> {
    /// Build from a manifest. Rejects invalid or duplicate sources.
    pub fn new(sources: Vec<Source>) -> Result<Self, ResourceError> {
        validate_manifest(&sources)?;
        Ok(Self {
            items: RefCell::new(HashMap::with_capacity(sources.len())),
            sources,
            loaded: Cell::new(0),
            events: EventEmitter::new(),
        })
    }

    /// Load every source through `loader`, in manifest order.
    ///
    /// A failing source is logged and loading continues with the next one;
    /// the first failure is returned once all sources were attempted. An
    /// empty manifest is ready straight away.
    pub fn start_loading(&self, loader: &dyn AssetLoader<T>) -> Result<(), ResourceError> {
        if self.sources.is_empty() {
            info!("no sources declared");
            self.events.trigger(EVENT_READY, &[]).ok();
            return Ok(());
        }

        let mut first_error = None;
        for source in &self.sources {
            match loader.load(source) {
                Ok(item) => self.source_loaded(&source.name, item)?,
                Err(err) => {
                    warn!(source = %source.name, kind = %source.kind, error = %err, "failed to load source");
                    if first_error.is_none() {
                        first_error = Some(ResourceError::Load {
                            name: source.name.clone(),
                            source: err,
                        });
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Store the item for a declared source.
    ///
    /// Each source counts once; delivering it again replaces the item.
    /// The delivery that completes the manifest triggers `ready`.
    pub fn source_loaded(&self, name: &str, item: T) -> Result<(), ResourceError> {
        if !self.sources.iter().any(|source| source.name == name) {
            return Err(ResourceError::UnknownSource(name.to_string()));
        }

        let first_delivery = self
            .items
            .borrow_mut()
            .insert(name.to_string(), item)
            .is_none();
        if !first_delivery {
            debug!(source = name, "source reloaded");
            return Ok(());
        }

        self.loaded.set(self.loaded.get() + 1);
        debug!(
            source = name,
            loaded = self.loaded(),
            to_load = self.to_load(),
            "source loaded"
        );

        if self.is_ready() {
            info!(count = self.to_load(), "all sources loaded");
            self.events.trigger(EVENT_READY, &[]).ok();
        }
        Ok(())
    }

    /// Borrow a loaded item.
    pub fn item(&self, name: &str) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.items.borrow(), |items| items.get(name)).ok()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn to_load(&self) -> usize {
        self.sources.len()
    }

    pub fn loaded(&self) -> usize {
        self.loaded.get()
    }

    pub fn is_ready(&self) -> bool {
        self.loaded() == self.to_load()
    }

    /// Fraction of sources loaded, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.to_load() == 0 {
            return 1.0;
        }
        self.loaded() as f64 / self.to_load() as f64
    }
}

impl<T> Observable for Resources<T> {
    type Arg = Value;
    type Output = ();

    fn events(&self) -> &EventEmitter {
        &self.events
    }
}
