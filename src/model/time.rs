//! Frame clock.
//!
//! The host calls [`Time::tick`] once per animation frame with its current
//! timestamp. The clock updates `delta`/`elapsed` and triggers `tick`.
//! Scheduling the next frame stays with the host.

use std::cell::Cell;

use serde_json::Value;
use tracing::trace;

use super::constants::*;
use crate::events::{EventEmitter, Observable};

/// Millisecond frame clock broadcasting `tick`.
pub struct Time {
    start: f64,
    current: Cell<f64>,
    elapsed: Cell<f64>,
    delta: Cell<f64>,
    frames: Cell<u64>,
    events: EventEmitter,
}

impl Time {
    /// Start the clock at `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            start: start_ms,
            current: Cell::new(start_ms),
            elapsed: Cell::new(0.0),
            delta: Cell::new(DEFAULT_FRAME_DELTA_MS),
            frames: Cell::new(0),
            events: EventEmitter::new(),
        }
    }

    /// Advance to `now_ms` and trigger `tick` with no arguments.
    ///
    /// A timestamp older than the previous one yields a zero delta.
    pub fn tick(&self, now_ms: f64) {
        let delta = (now_ms - self.current.get()).max(0.0);
        let now = self.current.get() + delta;

        self.delta.set(delta);
        self.current.set(now);
        self.elapsed.set(now - self.start);
        self.frames.set(self.frames.get() + 1);

        trace!(delta, elapsed = self.elapsed(), "tick");
        self.events.trigger(EVENT_TICK, &[]).ok();
    }

    /// Drop every `tick` listener.
    pub fn stop(&self) {
        self.events.off(EVENT_TICK).ok();
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn current(&self) -> f64 {
        self.current.get()
    }

    /// Milliseconds since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed.get()
    }

    /// Milliseconds since the previous tick.
    pub fn delta(&self) -> f64 {
        self.delta.get()
    }

    /// Delta in seconds, the unit animation mixers advance by.
    pub fn delta_seconds(&self) -> f64 {
        self.delta() / 1000.0
    }

    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Observable for Time {
    type Arg = Value;
    type Output = ();

    fn events(&self) -> &EventEmitter {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_initial_state() {
        let time = Time::new(1000.0);
        assert_eq!(time.start(), 1000.0);
        assert_eq!(time.current(), 1000.0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.delta(), DEFAULT_FRAME_DELTA_MS);
        assert_eq!(time.frames(), 0);
    }

    #[test]
    fn test_tick_updates_delta_and_elapsed() {
        let time = Time::new(1000.0);
        time.tick(1016.6);
        time.tick(1033.0);

        assert!(approx_eq(time.delta(), 16.4));
        assert!(approx_eq(time.elapsed(), 33.0));
        assert!(approx_eq(time.delta_seconds(), 0.0164));
        assert_eq!(time.frames(), 2);
    }

    #[test]
    fn test_tick_with_older_timestamp_has_zero_delta() {
        let time = Time::new(500.0);
        time.tick(400.0);

        assert_eq!(time.delta(), 0.0);
        assert_eq!(time.current(), 500.0);
    }

    #[test]
    fn test_tick_triggers_once_per_frame() {
        let time = Time::default();
        let hits = Rc::new(Cell::new(0));

        let sink = Rc::clone(&hits);
        time.on(EVENT_TICK, move |_| sink.set(sink.get() + 1)).unwrap();

        time.tick(16.0);
        time.tick(32.0);
        assert_eq!(hits.get(), 2);

        time.stop();
        time.tick(48.0);
        assert_eq!(hits.get(), 2);
    }
}
