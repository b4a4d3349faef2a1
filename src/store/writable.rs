use std::sync::Arc;

use tokio::sync::watch;

/// A replace-on-write value cell that subscribers can watch.
///
/// Every write swaps the whole value in one step; readers holding an earlier
/// [`Arc`] keep seeing the old value. Subscribers are woken on each write.
#[derive(Debug)]
pub struct Writable<T> {
    tx: watch::Sender<Arc<T>>,
}

impl<T> Writable<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(value));
        Self { tx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.tx.borrow())
    }

    /// Replaces the value, returning the previous one.
    pub fn set(&self, value: T) -> Arc<T> {
        self.tx.send_replace(Arc::new(value))
    }

    /// Edits the value in place (cloning it first if a reader still holds it).
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        self.tx.send_modify(|v| f(Arc::make_mut(v)));
    }

    /// A receiver that is marked changed on every later write.
    pub fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.tx.subscribe()
    }
}

impl<T: Default> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
