//! Per-entity in-flight latch.
//!
//! One pending action per `entity:id` key. A claim is an RAII guard: the key
//! is released when the claim drops, whether the call succeeded or failed.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::EntityKind;

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(entity: EntityKind, id: &str) -> String {
        format!("{}:{}", entity.as_str(), id)
    }

    /// Claim `key`, or `None` if it is already held.
    pub fn try_claim(&self, key: String) -> Option<InFlightClaim> {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlightClaim {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
    }

    pub fn pending_count(&self) -> usize {
        self.keys.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Held while an action is pending; releases its key on drop.
#[derive(Debug)]
pub struct InFlightClaim {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_on_same_key_is_refused_until_drop() {
        let latch = InFlight::new();
        let key = InFlight::key(EntityKind::Order, "o-1");

        let first = latch.try_claim(key.clone()).expect("first claim");
        assert!(latch.try_claim(key.clone()).is_none());
        assert!(latch.is_pending(&key));

        drop(first);
        assert!(!latch.is_pending(&key));
        assert!(latch.try_claim(key).is_some());
    }

    #[test]
    fn different_entities_do_not_collide() {
        let latch = InFlight::new();
        let _a = latch.try_claim(InFlight::key(EntityKind::Order, "7")).unwrap();
        let _b = latch
            .try_claim(InFlight::key(EntityKind::PaymentSlip, "7"))
            .unwrap();
        assert_eq!(latch.pending_count(), 2);
    }
}
