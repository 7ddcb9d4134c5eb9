//! Per-service serialization for concurrent callers

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Async locks keyed by service name
///
/// Holding the guard for the whole reconciliation keeps two requests for the
/// same service from both observing "not registered" and both adding it.
/// Different services proceed in parallel.
///
/// Entries nobody holds or waits on are pruned on every acquire, so the map
/// only grows with the number of services in flight.
#[derive(Clone, Default)]
pub struct ServiceLocks {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ServiceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, service_name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // the map's own reference is the only one left for idle services
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(service_name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of service names currently tracked
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_service_is_serialized() {
        let locks = ServiceLocks::new();
        let guard = locks.acquire("db1-svc").await;

        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire("db1-svc")).await;
        assert!(second.is_err(), "second acquire should wait for the first guard");

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(500), locks.acquire("db1-svc")).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn test_idle_services_are_pruned() {
        let locks = ServiceLocks::new();
        for i in 0..100 {
            let _guard = locks.acquire(&format!("svc-{}", i)).await;
        }
        assert!(locks.tracked().await <= 1);

        let held = locks.acquire("db1-svc").await;
        let _other = locks.acquire("db2-svc").await;
        assert_eq!(locks.tracked().await, 2);

        drop(held);
        let _third = locks.acquire("db3-svc").await;
        assert_eq!(locks.tracked().await, 2);
    }

    #[tokio::test]
    async fn test_waiter_keeps_entry_alive() {
        let locks = ServiceLocks::new();
        let guard = locks.acquire("db1-svc").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire("db1-svc").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // pruning by another service must not split db1-svc into two mutexes
        let _other = locks.acquire("db2-svc").await;
        assert_eq!(locks.tracked().await, 2);
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_millis(500), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_services_do_not_block() {
        let locks = ServiceLocks::new();
        let _a = locks.acquire("db1-svc").await;
        let b = tokio::time::timeout(Duration::from_millis(500), locks.acquire("db2-svc")).await;
        assert!(b.is_ok());
    }
}
