//! Repeating schedules bound to a view's lifetime.
//!
//! [`every`] spawns a tokio task that fires a callback on a fixed period and
//! returns a [`TickHandle`]. Dropping the handle cancels the schedule, so a
//! schedule can never outlive its owner on any exit path. [`mount`] builds on
//! it to drive a [`View`] from a [`Clock`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::clock::Clock;
use crate::events::Event;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Cancels its schedule when dropped.
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
    running: Arc<Mutex<()>>,
}

impl TickHandle {
    /// Stop the schedule. A callback already in flight on another worker is
    /// waited for; none runs after this returns.
    ///
    /// Must not be called from inside the callback itself.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
        drop(self.running.lock().unwrap_or_else(|e| e.into_inner()));
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Call `on_tick` now and then once per `period`.
///
/// Late ticks are not replayed in a burst; the schedule skips ahead instead.
/// Must be called from within a tokio runtime.
pub fn every<F>(period: Duration, mut on_tick: F) -> TickHandle
where
    F: FnMut() + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let running = Arc::new(Mutex::new(()));
    let flag = cancelled.clone();
    let gate = running.clone();
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            // The flag is checked under the gate so cancel() can wait out a
            // callback that already passed the check.
            let _running = gate.lock().unwrap_or_else(|e| e.into_inner());
            if flag.load(Ordering::SeqCst) {
                break;
            }
            on_tick();
        }
    });
    TickHandle {
        task,
        cancelled,
        running,
    }
}

/// Per-view state driven by a repeating schedule.
pub trait View: Send + 'static {
    /// Name used in mount/unmount events and logs.
    fn name(&self) -> &'static str;

    /// Called once when the view is mounted, before the first tick.
    fn on_mount(&mut self, _now: DateTime<Utc>) {}

    /// Recompute from `now`, returning the events this produced.
    fn on_tick(&mut self, now: DateTime<Utc>) -> Vec<Event>;

    fn period(&self) -> Duration {
        DEFAULT_PERIOD
    }
}

/// A view that is on screen. Its schedule runs until this is dropped or
/// [`Mounted::unmount`] is called.
pub struct Mounted<V> {
    state: Arc<Mutex<V>>,
    ticker: TickHandle,
    events: Option<mpsc::UnboundedSender<Event>>,
    name: &'static str,
    clock: Arc<dyn Clock>,
}

/// Mount `view`: run `on_mount`, then tick it every `view.period()` from
/// `clock`, forwarding produced events to `events` when given.
pub fn mount<V, C>(mut view: V, clock: C, events: Option<mpsc::UnboundedSender<Event>>) -> Mounted<V>
where
    V: View,
    C: Clock,
{
    let clock: Arc<dyn Clock> = Arc::new(clock);
    let name = view.name();
    let now = clock.now();
    view.on_mount(now);
    debug!(view = name, "view mounted");
    send(&events, Event::ViewMounted {
        view: name.to_string(),
        at: now,
    });

    let period = view.period();
    let state = Arc::new(Mutex::new(view));

    let tick_state = state.clone();
    let tick_clock = clock.clone();
    let tick_events = events.clone();
    let ticker = every(period, move || {
        let now = tick_clock.now();
        let produced = tick_state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .on_tick(now);
        for event in produced {
            send(&tick_events, event);
        }
    });

    Mounted {
        state,
        ticker,
        events,
        name,
        clock,
    }
}

impl<V: View> Mounted<V> {
    /// Read the view's current state.
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.state.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Take the view off screen. Equivalent to dropping, but emits the
    /// unmount event once the last tick has finished.
    pub fn unmount(self) {
        self.ticker.cancel();
        send(&self.events, Event::ViewUnmounted {
            view: self.name.to_string(),
            at: self.clock.now(),
        });
        debug!(view = self.name, "view unmounted");
    }
}

fn send(events: &Option<mpsc::UnboundedSender<Event>>, event: Event) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening any more.
        let _ = tx.send(event);
    }
}
