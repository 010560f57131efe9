//! Shared subscribe/trigger surface for types that own an emitter.

use super::emitter::{Callback, EventEmitter};
use super::error::Result;

/// A type that broadcasts its own events through an embedded [`EventEmitter`].
///
/// Implementors only provide [`Observable::events`]; the subscription
/// methods forward to the emitter. Producers such as `Sizes` or `Time`
/// call `trigger` themselves; consumers use `on` and `off`.
pub trait Observable {
    type Arg;
    type Output;

    fn events(&self) -> &EventEmitter<Self::Arg, Self::Output>;

    fn on<F>(&self, names: &str, callback: F) -> Result<&EventEmitter<Self::Arg, Self::Output>>
    where
        F: Fn(&[Self::Arg]) -> Self::Output + 'static,
    {
        self.events().on(names, callback)
    }

    fn subscribe(
        &self,
        names: &str,
        callback: Option<Callback<Self::Arg, Self::Output>>,
    ) -> Result<&EventEmitter<Self::Arg, Self::Output>> {
        self.events().subscribe(names, callback)
    }

    fn off(&self, names: &str) -> Result<&EventEmitter<Self::Arg, Self::Output>> {
        self.events().off(names)
    }

    fn trigger(&self, name: &str, args: &[Self::Arg]) -> Result<Option<Self::Output>> {
        self.events().trigger(name, args)
    }
}
