//! Namespaced event emitter.
//!
//! The emitter keeps a two-level registry:
//!
//! ```text
//! namespace ("base", "loader", ...)
//!   └── event ("resize", "tick", ...)
//!         └── [callback, callback, ...]   (insertion order)
//! ```
//!
//! - `on` / `subscribe` append callbacks for one or more specifiers
//! - `off` removes events, whole namespaces, or an event across all namespaces
//! - `trigger` invokes matching callbacks synchronously and returns the
//!   result of the first one
//!
//! Everything runs on the caller's thread. Methods take `&self` so an owner
//! can hand out shared references and callbacks can re-enter the emitter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::error::{EmitterError, Result};
use super::name::{parse_names, resolve_names, EventName, BASE_NAMESPACE};

/// Shared callback handle.
///
/// Registering the same handle twice stores two entries; both fire.
pub type Callback<A, R> = Rc<dyn Fn(&[A]) -> R>;

type Listeners<A, R> = IndexMap<String, Vec<Callback<A, R>>>;

/// Single-threaded publish/subscribe dispatcher with namespaces.
///
/// `A` is the argument type handed to callbacks, `R` what they return.
/// Lifecycle producers use the defaults (`serde_json::Value` arguments,
/// no return value).
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use experience::events::EventEmitter;
///
/// let emitter: EventEmitter<f64, f64> = EventEmitter::new();
/// let seen = Rc::new(Cell::new(0.0));
///
/// let sink = Rc::clone(&seen);
/// emitter
///     .on("tick.clock", move |args| {
///         sink.set(args[0]);
///         args[0] * 2.0
///     })
///     .unwrap();
///
/// assert_eq!(emitter.trigger("tick", &[16.6]).unwrap(), Some(33.2));
/// assert_eq!(seen.get(), 16.6);
/// ```
pub struct EventEmitter<A = serde_json::Value, R = ()> {
    callbacks: RefCell<IndexMap<String, Listeners<A, R>>>,
}

impl<A, R> EventEmitter<A, R> {
    /// Create an empty emitter with the base namespace seeded.
    pub fn new() -> Self {
        let mut callbacks = IndexMap::new();
        callbacks.insert(BASE_NAMESPACE.to_string(), IndexMap::new());
        Self {
            callbacks: RefCell::new(callbacks),
        }
    }

    /// Register a closure under every specifier in `names`.
    pub fn on<F>(&self, names: &str, callback: F) -> Result<&Self>
    where
        F: Fn(&[A]) -> R + 'static,
    {
        let callback: Callback<A, R> = Rc::new(callback);
        self.subscribe(names, Some(callback))
    }

    /// Register a shared callback handle under every specifier in `names`.
    ///
    /// Fails without touching the registry when `names` holds no specifier
    /// or `callback` is `None`.
    pub fn subscribe(&self, names: &str, callback: Option<Callback<A, R>>) -> Result<&Self> {
        let parsed = validate_names(names)?;

        let Some(callback) = callback else {
            warn!(names, "wrong callback");
            return Err(EmitterError::MissingCallback(names.to_string()));
        };

        let mut callbacks = self.callbacks.borrow_mut();
        for name in parsed {
            callbacks
                .entry(name.namespace().to_string())
                .or_default()
                .entry(name.value().to_string())
                .or_default()
                .push(Rc::clone(&callback));

            trace!(
                event = name.value(),
                namespace = name.namespace(),
                "callback subscribed"
            );
        }

        Ok(self)
    }

    /// Remove callbacks for every specifier in `names`.
    ///
    /// - `.ns` drops the whole namespace
    /// - `event` drops the event from every namespace
    /// - `event.ns` drops the event from `ns` only
    ///
    /// Namespaces left without events are removed; `base` always stays.
    pub fn off(&self, names: &str) -> Result<&Self> {
        let parsed = validate_names(names)?;

        let mut callbacks = self.callbacks.borrow_mut();
        for name in parsed {
            if name.is_namespace_only() {
                if callbacks.shift_remove(name.namespace()).is_some() {
                    debug!(namespace = name.namespace(), "namespace removed");
                }
            } else if name.is_base_scoped() {
                for listeners in callbacks.values_mut() {
                    listeners.shift_remove(name.value());
                }
                callbacks.retain(|namespace, listeners| {
                    namespace == BASE_NAMESPACE || !listeners.is_empty()
                });
                trace!(event = name.value(), "event removed from all namespaces");
            } else if let Some(listeners) = callbacks.get_mut(name.namespace()) {
                listeners.shift_remove(name.value());
                if listeners.is_empty() {
                    callbacks.shift_remove(name.namespace());
                    debug!(namespace = name.namespace(), "empty namespace collected");
                }
                trace!(
                    event = name.value(),
                    namespace = name.namespace(),
                    "event removed"
                );
            }
        }

        Ok(self)
    }

    /// Invoke every callback matching `name` with `args`.
    ///
    /// Only the first specifier of `name` is used, even when it is empty
    /// (`",tick"` matches nothing). A base-scoped name searches every
    /// namespace (registration order, then insertion order).
    ///
    /// Returns the result of the first invoked callback, or `None` when
    /// nothing matched. Callbacks may re-enter the emitter; changes they
    /// make apply from the next trigger on. A panicking callback aborts the
    /// remaining invocations and unwinds into the caller.
    pub fn trigger(&self, name: &str, args: &[A]) -> Result<Option<R>> {
        validate_names(name)?;
        let Some(first) = resolve_names(name).into_iter().next() else {
            return Err(EmitterError::InvalidName(name.to_string()));
        };
        let name = EventName::parse(&first);

        if name.is_namespace_only() && self.has_namespace(name.namespace()) {
            warn!(name = name.original(), "wrong name: no event to trigger");
            return Ok(None);
        }

        let matched = self.listeners_for(&name);
        trace!(
            event = name.value(),
            namespace = name.namespace(),
            count = matched.len(),
            "triggering"
        );

        let mut first = None;
        for callback in matched {
            let result = callback(args);
            if first.is_none() {
                first = Some(result);
            }
        }

        Ok(first)
    }

    /// Number of callbacks `trigger(name, ..)` would invoke right now.
    pub fn listener_count(&self, name: &str) -> usize {
        parse_names(name)
            .first()
            .map(|name| self.listeners_for(name).len())
            .unwrap_or(0)
    }

    /// Namespaces currently in the registry, in registration order.
    pub fn namespaces(&self) -> Vec<String> {
        self.callbacks.borrow().keys().cloned().collect()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.callbacks.borrow().contains_key(namespace)
    }

    /// Returns true if no callback is registered anywhere.
    pub fn is_empty(&self) -> bool {
        self.callbacks
            .borrow()
            .values()
            .all(|listeners| listeners.values().all(Vec::is_empty))
    }

    /// Snapshot the callbacks a trigger of `name` resolves to.
    fn listeners_for(&self, name: &EventName) -> Vec<Callback<A, R>> {
        let callbacks = self.callbacks.borrow();

        if name.is_base_scoped() {
            return callbacks
                .values()
                .filter_map(|listeners| listeners.get(name.value()))
                .flatten()
                .cloned()
                .collect();
        }

        if name.is_namespace_only() {
            return Vec::new();
        }

        callbacks
            .get(name.namespace())
            .and_then(|listeners| listeners.get(name.value()))
            .cloned()
            .unwrap_or_default()
    }
}

impl<A, R> Default for EventEmitter<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> fmt::Debug for EventEmitter<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks = self.callbacks.borrow();
        let mut map = f.debug_map();
        for (namespace, listeners) in callbacks.iter() {
            let counts: Vec<(&String, usize)> = listeners
                .iter()
                .map(|(event, list)| (event, list.len()))
                .collect();
            map.entry(namespace, &counts);
        }
        map.finish()
    }
}

/// Reject names that yield no specifier.
fn validate_names(names: &str) -> Result<Vec<EventName>> {
    let parsed = parse_names(names);
    if parsed.is_empty() {
        warn!(names, "wrong names");
        return Err(EmitterError::InvalidName(names.to_string()));
    }
    Ok(parsed)
}
