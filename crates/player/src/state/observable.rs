//! Observable value cells.
//!
//! An `Observable<T>` holds one value and a list of subscribers. Every `set`
//! replaces the value and then calls each subscriber with the new value. No
//! lock is held while subscribers run, so a subscriber may read or write any
//! observable, including the one that notified it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

struct Inner<T> {
    name: &'static str,
    value: Mutex<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

/// A named, shared, observable value.
///
/// Cloning yields another handle to the same cell.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// A panicking subscriber must not wedge the whole store.
fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Observable<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                value: Mutex::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        lock(&self.inner.value).clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner.value))
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        {
            let mut current = lock(&self.inner.value);
            *current = value.clone();
        }
        self.notify(&value);
    }

    /// Read-modify-write, then notify subscribers with the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let value = {
            let mut current = lock(&self.inner.value);
            f(&mut current);
            current.clone()
        };
        self.notify(&value);
    }

    /// Register a callback for every future `set`/`update`.
    ///
    /// The callback stays registered until the returned `Subscription` is
    /// cancelled or dropped. Use `Subscription::detach` to keep it for the
    /// lifetime of the observable.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).push((id, Arc::new(callback)));

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner.subscribers).retain(|(sub_id, _)| *sub_id != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    fn notify(&self, value: &T) {
        let subscribers: Vec<Callback<T>> = lock(&self.inner.subscribers)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for subscriber in subscribers {
            subscriber(value);
        }
    }
}

/// Registration handle returned by `Observable::subscribe`.
///
/// Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the callback registered for as long as the observable lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_set_notifies_in_subscription_order() {
        let cell = Observable::new("numbers", 0_i32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        let _a = cell.subscribe(move |v| first.lock().expect("lock").push(("a", *v)));
        let second = Arc::clone(&seen);
        let _b = cell.subscribe(move |v| second.lock().expect("lock").push(("b", *v)));

        cell.set(5);
        cell.update(|v| *v += 1);

        assert_eq!(cell.get(), 6);
        assert_eq!(
            *seen.lock().expect("lock"),
            vec![("a", 5), ("b", 5), ("a", 6), ("b", 6)]
        );
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let cell = Observable::new("flag", false);
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let sub = cell.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cell.set(true);
        drop(sub);
        cell.set(false);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_detached_subscription_survives() {
        let cell = Observable::new("flag", false);
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        cell.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .detach();
        cell.set(true);
        cell.set(true);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscriber_may_read_and_write_other_cells() {
        let source = Observable::new("source", 0_u32);
        let mirror = Observable::new("mirror", 0_u32);

        let reader = source.clone();
        let writer = mirror.clone();
        source
            .subscribe(move |v| {
                assert_eq!(reader.get(), *v);
                writer.set(*v * 2);
            })
            .detach();

        source.set(21);
        assert_eq!(mirror.get(), 42);
    }

    #[test]
    fn test_clones_share_state() {
        let cell = Observable::new("name", String::from("a"));
        let other = cell.clone();
        other.set("b".into());
        assert_eq!(cell.get(), "b");
        assert_eq!(cell.name(), "name");
    }
}
