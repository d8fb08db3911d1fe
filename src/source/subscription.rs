//! Periodic polling of a single endpoint.
//!
//! A [`PollSubscription`] owns a timer task and a last-value slot. The timer
//! fires once immediately and then every period; each tick spawns one fetch.
//! Fetches run detached from the timer, so a slow response never delays the
//! next tick. When requests overlap, whichever response arrives last is the
//! one left in the slot.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{Endpoint, FetchError, Fetcher};
use crate::data::PolledValue;

/// Default polling period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);

type Slot = watch::Sender<Option<PolledValue>>;

/// Turn a fetch outcome into a displayable value.
///
/// Failures are dropped here: the caller keeps whatever it was
/// showing and the next tick is the only recovery. They are logged at debug
/// level and nowhere else.
pub fn settle(endpoint: &Endpoint, outcome: Result<Value, FetchError>) -> Option<PolledValue> {
    match outcome {
        Ok(value) => Some(PolledValue::new(value)),
        Err(err) => {
            debug!(endpoint = %endpoint, error = %err, "poll failed, keeping previous value");
            None
        }
    }
}

/// Fetch an endpoint exactly once under the same discard policy as a tick.
pub async fn fetch_once(fetcher: &dyn Fetcher, endpoint: &Endpoint) -> Option<PolledValue> {
    settle(endpoint, fetcher.fetch(endpoint).await)
}

/// Spawn one fetch that writes into `slot` on success.
///
/// The stop flag is checked before the request goes out. Once issued, the
/// request runs to completion even if the subscription is stopped.
fn spawn_fetch(
    fetcher: Arc<dyn Fetcher>,
    endpoint: Arc<Endpoint>,
    slot: Arc<Slot>,
    stop_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        if *stop_rx.borrow() {
            return;
        }
        if let Some(value) = fetch_once(fetcher.as_ref(), &endpoint).await {
            slot.send_replace(Some(value));
        }
    });
}

/// A running poll of one endpoint.
///
/// Must be started from within a Tokio runtime. Stopping (explicitly or by
/// dropping) ends the timer; no fetch is issued afterwards.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use statusboard::{ApiBase, Endpoint, HttpFetcher, PollSubscription, DEFAULT_PERIOD};
///
/// # tokio_test::block_on(async {
/// let endpoint = Endpoint::resolve(&ApiBase::Fallback, "/status").unwrap();
/// let mut sub = PollSubscription::start(endpoint, Arc::new(HttpFetcher::default()), DEFAULT_PERIOD);
///
/// let mut values = sub.subscribe();
/// values.changed().await.unwrap();
/// println!("{:?}", *values.borrow());
///
/// sub.stop();
/// # });
/// ```
#[derive(Debug)]
pub struct PollSubscription {
    endpoint: Arc<Endpoint>,
    fetcher: Arc<dyn Fetcher>,
    period: Duration,
    slot: Arc<Slot>,
    receiver: watch::Receiver<Option<PolledValue>>,
    stop_tx: watch::Sender<bool>,
    timer: Option<JoinHandle<()>>,
}

impl PollSubscription {
    /// Start polling `endpoint` every `period`, beginning with an immediate fetch.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero or if called outside a Tokio runtime.
    pub fn start(endpoint: Endpoint, fetcher: Arc<dyn Fetcher>, period: Duration) -> Self {
        let endpoint = Arc::new(endpoint);
        let (slot, receiver) = watch::channel(None);
        let slot = Arc::new(slot);
        let (stop_tx, stop_rx) = watch::channel(false);

        info!(endpoint = %endpoint, period_ms = period.as_millis() as u64, "polling started");

        let timer = {
            let endpoint = endpoint.clone();
            let fetcher = fetcher.clone();
            let slot = slot.clone();
            let mut stop_rx = stop_rx;

            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    tokio::select! {
                        biased;
                        changed = stop_rx.changed() => {
                            if changed.is_err() || *stop_rx.borrow() {
                                break;
                            }
                        }
                        _ = ticker.tick() => {
                            spawn_fetch(fetcher.clone(), endpoint.clone(), slot.clone(), stop_rx.clone());
                        }
                    }
                }
            })
        };

        Self {
            endpoint,
            fetcher,
            period,
            slot,
            receiver,
            stop_tx,
            timer: Some(timer),
        }
    }

    /// The endpoint being polled.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The polling period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true until [`stop`](Self::stop) is called.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Stop the timer. Idempotent.
    ///
    /// Requests already in flight are not cancelled and may still update
    /// the value when they complete.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            self.stop_tx.send_replace(true);
            info!(endpoint = %self.endpoint, "polling stopped");
        }
    }

    /// Issue one extra fetch now without touching the timer cadence.
    ///
    /// Does nothing once the subscription is stopped.
    pub fn refresh(&self) {
        if self.is_running() {
            spawn_fetch(
                self.fetcher.clone(),
                self.endpoint.clone(),
                self.slot.clone(),
                self.stop_tx.subscribe(),
            );
        }
    }

    /// The current value, if any fetch has succeeded yet.
    pub fn current(&self) -> Option<PolledValue> {
        self.receiver.borrow().clone()
    }

    /// Return the latest value if it changed since the previous call.
    ///
    /// Non-blocking; intended to be called from the render loop.
    pub fn poll(&mut self) -> Option<PolledValue> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    /// A receiver that observes every value written to the slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<PolledValue>> {
        self.slot.subscribe()
    }
}

impl Drop for PollSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}
