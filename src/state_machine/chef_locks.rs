//! Per-chef serialization point for admission control.
//!
//! The capacity check reads the chef's COOKING count and the claim writes it
//! several steps later. Holding the chef's lock across both keeps two
//! concurrent claims by the same chef from both passing the check.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct ChefLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl ChefLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of the chef's admission decisions
    pub async fn acquire(&self, chef_id: i64) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(chef_id).or_default().clone();
        lock.lock_owned().await
    }

    /// Number of chefs that have ever taken a lock
    pub fn tracked_chefs(&self) -> usize {
        self.locks.len()
    }
}
