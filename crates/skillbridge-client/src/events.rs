//! Session invalidation broadcast.
//!
//! [`InvalidationHub`] is an explicitly constructed publish/subscribe object:
//! whoever needs to react to a lost session (navigation, cached state)
//! subscribes and receives every invalidation without polling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Why a session was invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationEvent {
    /// A response came back 401/403.
    AuthFailure { status: u16, path: String },
    /// Invalidation requested directly through the session manager.
    Requested,
}

type Callback = Arc<dyn Fn(&InvalidationEvent) + Send + Sync>;

struct HubInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Callback)>>,
}

impl HubInner {
    fn remove(&self, id: u64) {
        let mut subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subs.retain(|(sub_id, _)| *sub_id != id);
    }

    fn contains(&self, id: u64) -> bool {
        let subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subs.iter().any(|(sub_id, _)| *sub_id == id)
    }
}

/// Many-to-one notifier for session loss. Cheap to clone; clones share
/// subscribers.
#[derive(Clone)]
pub struct InvalidationHub {
    inner: Arc<HubInner>,
}

impl Default for InvalidationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InvalidationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvalidationHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl InvalidationHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                next_id: AtomicU64::new(0),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a callback. It stays registered until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&InvalidationEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));

        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Call every subscriber once, in registration order. Returns how many
    /// were called.
    ///
    /// The lock is not held while callbacks run, so a callback may subscribe
    /// or unsubscribe freely. A subscriber removed mid-notification is skipped.
    pub fn notify(&self, event: &InvalidationEvent) -> usize {
        let snapshot: Vec<(u64, Callback)> = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut called = 0;
        for (id, callback) in snapshot {
            if !self.inner.contains(id) {
                continue;
            }
            callback(event);
            called += 1;
        }
        called
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Handle for one registered callback.
///
/// Unsubscribes on drop. `unsubscribe` may be called any number of times and
/// only ever removes this subscription.
#[must_use = "dropping a Subscription unsubscribes it immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<HubInner>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.hub.upgrade().is_some_and(|hub| hub.contains(self.id))
    }

    /// Keep the callback registered for the hub's whole lifetime.
    pub fn detach(mut self) {
        self.hub = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn recorder() -> (Arc<StdMutex<Vec<&'static str>>>, InvalidationHub) {
        (Arc::new(StdMutex::new(Vec::new())), InvalidationHub::new())
    }

    #[test]
    fn test_notifies_in_registration_order() {
        let (log, hub) = recorder();
        let l1 = Arc::clone(&log);
        let l2 = Arc::clone(&log);
        let _a = hub.subscribe(move |_| l1.lock().unwrap().push("nav"));
        let _b = hub.subscribe(move |_| l2.lock().unwrap().push("cache"));

        assert_eq!(hub.notify(&InvalidationEvent::Requested), 2);
        assert_eq!(*log.lock().unwrap(), vec!["nav", "cache"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent_and_isolated() {
        let (log, hub) = recorder();
        let l1 = Arc::clone(&log);
        let l2 = Arc::clone(&log);
        let a = hub.subscribe(move |_| l1.lock().unwrap().push("a"));
        let _b = hub.subscribe(move |_| l2.lock().unwrap().push("b"));

        a.unsubscribe();
        a.unsubscribe();
        assert!(!a.is_active());
        assert_eq!(hub.subscriber_count(), 1);

        hub.notify(&InvalidationEvent::Requested);
        assert_eq!(*log.lock().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_drop_unsubscribes_and_detach_keeps() {
        let hub = InvalidationHub::new();
        {
            let _scoped = hub.subscribe(|_| {});
            assert_eq!(hub.subscriber_count(), 1);
        }
        assert_eq!(hub.subscriber_count(), 0);

        hub.subscribe(|_| {}).detach();
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let hub = InvalidationHub::new();
        let slot: Arc<StdMutex<Option<Subscription>>> = Arc::new(StdMutex::new(None));
        let slot_in_cb = Arc::clone(&slot);
        let sub = hub.subscribe(move |_| {
            if let Some(sub) = slot_in_cb.lock().unwrap().take() {
                sub.unsubscribe();
            }
        });
        *slot.lock().unwrap() = Some(sub);

        assert_eq!(hub.notify(&InvalidationEvent::Requested), 1);
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.notify(&InvalidationEvent::Requested), 0);
    }

    #[test]
    fn test_event_carries_status() {
        let hub = InvalidationHub::new();
        let seen = Arc::new(StdMutex::new(None));
        let seen_cb = Arc::clone(&seen);
        let _s = hub.subscribe(move |e| *seen_cb.lock().unwrap() = Some(e.clone()));

        hub.notify(&InvalidationEvent::AuthFailure {
            status: 403,
            path: "/vagas".into(),
        });
        assert_eq!(
            *seen.lock().unwrap(),
            Some(InvalidationEvent::AuthFailure {
                status: 403,
                path: "/vagas".into()
            })
        );
    }
}
