//! Per-order mutual exclusion for lifecycle mutations.
//!
//! Two concurrent status changes on the same order must be serialized so
//! the loser observes the winner's committed state (and fails the
//! transition check) instead of double-publishing effects. Isolation is
//! per order; there is no cross-order locking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use fieldops_core::OrderId;

#[derive(Default)]
pub struct OrderLocks {
    inner: Mutex<HashMap<OrderId, Arc<AsyncMutex<()>>>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the mutation lock for one order, creating it on first use.
    ///
    /// The guard is owned so it can be held across awaits.
    pub async fn acquire(&self, order_id: OrderId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("order lock map poisoned");
            map.entry(order_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
