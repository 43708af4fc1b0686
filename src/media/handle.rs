//! Revocable object handles for generated image data.
//!
//! Every preview/download reference is issued by a registry and released
//! exactly once when superseded. The registry keeps create/revoke ledgers
//! so the no-leak invariant stays observable.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

#[derive(Debug, Default)]
struct Ledger {
    live: HashSet<Uuid>,
    created: u64,
    revoked: u64,
}

/// Registry of live handles with create/revoke bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    inner: Arc<Mutex<Ledger>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Issue a new live handle.
    pub fn create(&self) -> ObjectUrl {
        let id = Uuid::new_v4();
        let mut ledger = self.ledger();
        ledger.live.insert(id);
        ledger.created += 1;
        ObjectUrl {
            id,
            registry: self.clone(),
        }
    }

    fn release(&self, id: Uuid) {
        let mut ledger = self.ledger();
        if ledger.live.remove(&id) {
            ledger.revoked += 1;
        }
    }

    /// Handles issued and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.ledger().live.len()
    }

    pub fn created_count(&self) -> u64 {
        self.ledger().created
    }

    pub fn revoked_count(&self) -> u64 {
        self.ledger().revoked
    }
}

/// A live, revocable reference to in-memory image data.
///
/// Releases itself back to the registry on drop; [`ObjectUrl::revoke`]
/// does the same eagerly. Either way the registry sees exactly one
/// release per handle.
#[derive(Debug)]
pub struct ObjectUrl {
    id: Uuid,
    registry: HandleRegistry,
}

impl ObjectUrl {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Release the handle now instead of at drop.
    pub fn revoke(self) {}
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_drop_balance_the_ledger() {
        let registry = HandleRegistry::new();
        let url = registry.create();
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.created_count(), 1);

        drop(url);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn test_explicit_revoke_counts_once() {
        let registry = HandleRegistry::new();
        let url = registry.create();
        url.revoke();
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn test_handles_are_distinct() {
        let registry = HandleRegistry::new();
        let a = registry.create();
        let b = registry.create();
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.live_count(), 2);
    }
}
