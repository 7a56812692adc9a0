//! Debounced push notifications.
//!
//! A [`Notifier`] fans a string payload out to every registered
//! [`Subscriber`]. Identical payloads are rate limited: once a payload has
//! gone out, the same payload is suppressed until the debounce window has
//! elapsed. Different payloads never suppress each other.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use lutcam_link::{Notifier, NotifyOutcome};
//!
//! let notifier = Notifier::new(Duration::from_secs(1), "ready");
//! notifier.mark_ready();
//! notifier.set_connected(true);
//!
//! let t0 = Instant::now();
//! assert_eq!(notifier.notify_at("done", t0).unwrap(), NotifyOutcome::Sent(0));
//! assert_eq!(notifier.notify_at("done", t0).unwrap(), NotifyOutcome::Suppressed);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::{LinkError, LinkResult};

/// Default minimum spacing between two identical notifications.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Receiver of push notifications.
pub trait Subscriber: Send + Sync {
    /// Delivers one payload.
    fn deliver(&self, payload: &str) -> LinkResult<()>;
}

impl<F> Subscriber for F
where
    F: Fn(&str) -> LinkResult<()> + Send + Sync,
{
    fn deliver(&self, payload: &str) -> LinkResult<()> {
        self(payload)
    }
}

/// What happened to one notification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Transmitted; the count is the number of subscribers that took it.
    Sent(usize),
    /// Identical payload already sent within the debounce window.
    Suppressed,
    /// No client connected; nothing sent or recorded.
    NotConnected,
}

impl NotifyOutcome {
    /// True for [`NotifyOutcome::Sent`].
    #[inline]
    pub fn was_sent(self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Counters for a notifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyStats {
    /// Notifications transmitted
    pub sent: u64,
    /// Notifications dropped by the debounce window
    pub suppressed: u64,
    /// Notifications dropped because no client was connected
    pub disconnected: u64,
}

/// Debounced fan-out of string payloads.
///
/// The window for a payload is measured from its last transmission;
/// suppressed attempts do not extend it. Suppression is per payload, not
/// per run of consecutive duplicates: `a, b, a` inside one window sends
/// `a` and `b` and suppresses the second `a`.
///
/// Only payloads sent within the last window are remembered, so the
/// history stays bounded by the message rate rather than by the number of
/// distinct payloads over the session.
///
/// `Send + Sync`; share it behind an [`Arc`].
pub struct Notifier {
    window: Duration,
    ready: AtomicBool,
    connected: AtomicBool,
    subscribers: RwLock<Vec<Arc<dyn Subscriber>>>,
    last_sent: Mutex<HashMap<String, Instant>>,
    value: Mutex<String>,
    stats: Mutex<NotifyStats>,
}

impl Notifier {
    /// Creates a notifier with the given window and initial value.
    ///
    /// The notifier starts not ready and disconnected.
    pub fn new(window: Duration, initial_value: impl Into<String>) -> Self {
        Self {
            window,
            ready: AtomicBool::new(false),
            connected: AtomicBool::new(false),
            subscribers: RwLock::new(Vec::new()),
            last_sent: Mutex::new(HashMap::new()),
            value: Mutex::new(initial_value.into()),
            stats: Mutex::new(NotifyStats::default()),
        }
    }

    /// The debounce window.
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Marks the underlying service as started.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// True once [`mark_ready`](Self::mark_ready) has been called.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Records whether a client is connected.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    /// True while a client is connected.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Registers a subscriber.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The last transmitted payload, or the initial value.
    pub fn value(&self) -> String {
        lock(&self.value).clone()
    }

    /// Counters since creation.
    pub fn stats(&self) -> NotifyStats {
        *lock(&self.stats)
    }

    /// Forgets when each payload was last sent.
    pub fn clear_history(&self) {
        lock(&self.last_sent).clear();
    }

    /// Number of payloads currently remembered for debouncing.
    pub fn history_len(&self) -> usize {
        lock(&self.last_sent).len()
    }

    /// Sends `payload` now.
    pub fn notify(&self, payload: &str) -> LinkResult<NotifyOutcome> {
        self.notify_at(payload, Instant::now())
    }

    /// Sends `payload` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// [`LinkError::NotInitialized`] before [`mark_ready`](Self::mark_ready).
    /// Subscriber failures are logged and excluded from the sent count.
    pub fn notify_at(&self, payload: &str, now: Instant) -> LinkResult<NotifyOutcome> {
        if !self.is_ready() {
            warn!("Link service not initialized");
            return Err(LinkError::NotInitialized);
        }

        if !self.is_connected() {
            debug!("No clients connected, skipping notification");
            lock(&self.stats).disconnected += 1;
            return Ok(NotifyOutcome::NotConnected);
        }

        {
            let mut last = lock(&self.last_sent);
            if let Some(&prev) = last.get(payload) {
                let since = now.saturating_duration_since(prev);
                if since < self.window {
                    trace!(payload, since_ms = since.as_millis(), "Notification suppressed");
                    lock(&self.stats).suppressed += 1;
                    return Ok(NotifyOutcome::Suppressed);
                }
            }
            // Entries past the window can no longer suppress anything.
            let window = self.window;
            last.retain(|_, sent| now.saturating_duration_since(*sent) < window);
            last.insert(payload.to_string(), now);
        }

        *lock(&self.value) = payload.to_string();

        let subscribers = self.subscribers.read().unwrap_or_else(PoisonError::into_inner);
        let mut delivered = 0;
        for subscriber in subscribers.iter() {
            match subscriber.deliver(payload) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(error = %e, "Subscriber rejected notification"),
            }
        }

        lock(&self.stats).sent += 1;
        debug!(payload, delivered, "Notification sent");
        Ok(NotifyOutcome::Sent(delivered))
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, String::new())
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("window", &self.window)
            .field("ready", &self.is_ready())
            .field("connected", &self.is_connected())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Subscriber for Recorder {
        fn deliver(&self, payload: &str) -> LinkResult<()> {
            self.0.lock().unwrap().push(payload.to_string());
            Ok(())
        }
    }

    fn live() -> (Notifier, Arc<Recorder>) {
        let notifier = Notifier::new(Duration::from_millis(500), "ready");
        notifier.mark_ready();
        notifier.set_connected(true);
        let recorder = Arc::new(Recorder::default());
        notifier.subscribe(recorder.clone());
        (notifier, recorder)
    }

    #[test]
    fn test_identical_within_window() {
        let (notifier, recorder) = live();
        let t0 = Instant::now();
        assert_eq!(notifier.notify_at("saved", t0).unwrap(), NotifyOutcome::Sent(1));
        assert_eq!(
            notifier.notify_at("saved", t0 + Duration::from_millis(499)).unwrap(),
            NotifyOutcome::Suppressed
        );
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
        assert_eq!(notifier.stats().suppressed, 1);
    }

    #[test]
    fn test_identical_after_window() {
        let (notifier, recorder) = live();
        let t0 = Instant::now();
        notifier.notify_at("saved", t0).unwrap();
        let outcome = notifier.notify_at("saved", t0 + Duration::from_millis(600)).unwrap();
        assert!(outcome.was_sent());
        assert_eq!(*recorder.0.lock().unwrap(), ["saved", "saved"]);
    }

    #[test]
    fn test_window_measured_from_last_send() {
        let (notifier, _) = live();
        let t0 = Instant::now();
        notifier.notify_at("a", t0).unwrap();
        // a suppressed attempt does not extend the window
        notifier.notify_at("a", t0 + Duration::from_millis(400)).unwrap();
        assert!(notifier
            .notify_at("a", t0 + Duration::from_millis(500))
            .unwrap()
            .was_sent());
    }

    #[test]
    fn test_distinct_payloads_independent() {
        let (notifier, recorder) = live();
        let t0 = Instant::now();
        assert!(notifier.notify_at("a", t0).unwrap().was_sent());
        assert!(notifier.notify_at("b", t0).unwrap().was_sent());
        assert_eq!(notifier.notify_at("a", t0).unwrap(), NotifyOutcome::Suppressed);
        assert_eq!(*recorder.0.lock().unwrap(), ["a", "b"]);
        assert_eq!(notifier.value(), "b");
    }

    #[test]
    fn test_history_stays_bounded() {
        let (notifier, recorder) = live();
        let t0 = Instant::now();
        for i in 0..10_000u32 {
            let at = t0 + notifier.window() * i;
            assert!(notifier.notify_at(&format!("progress {i}"), at).unwrap().was_sent());
            assert!(notifier.history_len() <= 1);
        }
        assert_eq!(recorder.0.lock().unwrap().len(), 10_000);

        // payloads still inside the window are kept
        let late = t0 + notifier.window() * 20_000;
        notifier.notify_at("x", late).unwrap();
        notifier.notify_at("y", late + Duration::from_millis(100)).unwrap();
        assert_eq!(notifier.history_len(), 2);
        assert_eq!(
            notifier.notify_at("x", late + Duration::from_millis(200)).unwrap(),
            NotifyOutcome::Suppressed
        );
    }

    #[test]
    fn test_not_connected() {
        let (notifier, recorder) = live();
        notifier.set_connected(false);
        let t0 = Instant::now();
        assert_eq!(notifier.notify_at("x", t0).unwrap(), NotifyOutcome::NotConnected);

        // nothing was recorded, so reconnecting sends immediately
        notifier.set_connected(true);
        assert!(notifier.notify_at("x", t0).unwrap().was_sent());
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
        assert_eq!(notifier.stats().disconnected, 1);
    }

    #[test]
    fn test_not_initialized() {
        let notifier = Notifier::default();
        notifier.set_connected(true);
        assert!(matches!(notifier.notify("x"), Err(LinkError::NotInitialized)));
        assert_eq!(notifier.value(), "");
    }

    #[test]
    fn test_failing_subscriber_not_counted() {
        let (notifier, recorder) = live();
        notifier.subscribe(Arc::new(|_: &str| -> LinkResult<()> {
            Err(LinkError::delivery("queue full"))
        }));
        assert_eq!(notifier.notify("x").unwrap(), NotifyOutcome::Sent(1));
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_no_subscribers() {
        let notifier = Notifier::new(DEFAULT_DEBOUNCE, "ready");
        notifier.mark_ready();
        notifier.set_connected(true);
        assert_eq!(notifier.notify("x").unwrap(), NotifyOutcome::Sent(0));
        assert_eq!(notifier.value(), "x");
    }
}
